//! Kanban view of the opportunity pipeline with optimistic card moves.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::{Opportunity, PipelineStage};

#[derive(Debug, Clone, PartialEq)]
pub struct StageColumn<'a> {
    pub stage: &'a PipelineStage,
    pub cards: Vec<&'a Opportunity>,
    pub total: Decimal,
}

/// A move applied locally but not yet acknowledged by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    pub opportunity_id: String,
    pub from_stage: String,
    pub to_stage: String,
    previous_update: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineBoard {
    stages: Vec<PipelineStage>,
    opportunities: Vec<Opportunity>,
}

impl PipelineBoard {
    pub fn new(stages: Vec<PipelineStage>, opportunities: Vec<Opportunity>) -> Self {
        Self { stages, opportunities }
    }

    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    pub fn opportunities(&self) -> &[Opportunity] {
        &self.opportunities
    }

    /// One column per stage, in stage order. Cards pointing at an unknown stage are not shown.
    pub fn columns(&self) -> Vec<StageColumn<'_>> {
        self.stages
            .iter()
            .map(|stage| {
                let cards: Vec<&Opportunity> = self
                    .opportunities
                    .iter()
                    .filter(|o| o.stage_id == stage.id)
                    .collect();
                let total = cards.iter().map(|o| o.value).sum();
                StageColumn { stage, cards, total }
            })
            .collect()
    }

    pub fn total_value(&self) -> Decimal {
        self.columns().iter().map(|c| c.total).sum()
    }

    pub fn add(&mut self, opportunity: Opportunity) {
        self.opportunities.push(opportunity);
    }

    /// Moves a card to another stage right away. Returns `None` when nothing moved.
    pub fn move_card(&mut self, opportunity_id: &str, stage_id: &str) -> Option<PendingMove> {
        if !self.stages.iter().any(|s| s.id == stage_id) {
            debug!(stage_id, "move_card: unknown stage");
            return None;
        }
        let card = self.opportunities.iter_mut().find(|o| o.id == opportunity_id)?;
        if card.stage_id == stage_id {
            return None;
        }

        let pending = PendingMove {
            opportunity_id: card.id.clone(),
            from_stage: std::mem::replace(&mut card.stage_id, stage_id.to_string()),
            to_stage: stage_id.to_string(),
            previous_update: card.last_update,
        };
        card.last_update = Utc::now();
        Some(pending)
    }

    /// Undoes a move the server refused.
    pub fn rollback(&mut self, pending: PendingMove) {
        if let Some(card) = self
            .opportunities
            .iter_mut()
            .find(|o| o.id == pending.opportunity_id && o.stage_id == pending.to_stage)
        {
            card.stage_id = pending.from_stage;
            card.last_update = pending.previous_update;
        }
    }

    /// Replaces the local card with the server's copy once a move is acknowledged.
    pub fn confirm(&mut self, saved: Opportunity) {
        if let Some(card) = self.opportunities.iter_mut().find(|o| o.id == saved.id) {
            *card = saved;
        }
    }
}
