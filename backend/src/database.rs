//! In-memory keyed storage, one table per entity.
//!
//! A table seeds itself with the demo rows from `apexleads_shared::mock_data`
//! the first time any operation touches it, unless seeding is disabled.

use apexleads_shared::{Appointment, Contact, Funnel, Opportunity, PipelineStage, Workflow, mock_data};
use tokio::sync::{OnceCell, RwLock};

use crate::error::{ApiResult, AppError};

/// A row that can live in an [`EntityTable`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human name used in errors and logs.
    const NAME: &'static str;

    fn id(&self) -> &str;
}

macro_rules! entity {
    ($ty:ty, $name:literal) => {
        impl Entity for $ty {
            const NAME: &'static str = $name;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

entity!(Contact, "Contact");
entity!(PipelineStage, "Stage");
entity!(Opportunity, "Opportunity");
entity!(Appointment, "Appointment");
entity!(Workflow, "Workflow");
entity!(Funnel, "Funnel");

pub struct EntityTable<T: Entity> {
    rows: RwLock<Vec<T>>,
    seeded: OnceCell<()>,
    seed: Option<fn() -> Vec<T>>,
}

impl<T: Entity> EntityTable<T> {
    pub fn new(seed: Option<fn() -> Vec<T>>) -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            seeded: OnceCell::new(),
            seed,
        }
    }

    async fn ensure_seeded(&self) {
        self.seeded
            .get_or_init(|| async {
                if let Some(seed) = self.seed {
                    let rows = seed();
                    tracing::info!(entity = T::NAME, count = rows.len(), "seeding table");
                    self.rows.write().await.extend(rows);
                }
            })
            .await;
    }

    pub async fn list(&self) -> Vec<T> {
        self.ensure_seeded().await;
        self.rows.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> ApiResult<T> {
        self.ensure_seeded().await;
        self.rows
            .read()
            .await
            .iter()
            .find(|row| row.id() == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(T::NAME.to_string()))
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.get(id).await.is_ok()
    }

    pub async fn insert(&self, row: T) -> ApiResult<T> {
        self.ensure_seeded().await;
        let mut rows = self.rows.write().await;
        if rows.iter().any(|r| r.id() == row.id()) {
            return Err(AppError::Conflict(format!("{} {} already exists", T::NAME, row.id())));
        }
        rows.push(row.clone());
        Ok(row)
    }

    /// Applies `change` to the row under the write lock. Nothing is stored if `change` fails.
    pub async fn update<F>(&self, id: &str, change: F) -> ApiResult<T>
    where
        F: FnOnce(&mut T) -> ApiResult<()>,
    {
        self.ensure_seeded().await;
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| AppError::NotFound(T::NAME.to_string()))?;
        let mut updated = row.clone();
        change(&mut updated)?;
        *row = updated.clone();
        Ok(updated)
    }

    /// Replaces the whole row stored under `row.id()`.
    pub async fn replace(&self, row: T) -> ApiResult<T> {
        let id = row.id().to_string();
        self.update(&id, |current| {
            *current = row;
            Ok(())
        })
        .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.ensure_seeded().await;
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        if rows.len() == before {
            return Err(AppError::NotFound(T::NAME.to_string()));
        }
        Ok(())
    }
}

pub struct Database {
    pub contacts: EntityTable<Contact>,
    pub stages: EntityTable<PipelineStage>,
    pub opportunities: EntityTable<Opportunity>,
    pub appointments: EntityTable<Appointment>,
    pub workflows: EntityTable<Workflow>,
    pub funnels: EntityTable<Funnel>,
}

impl Database {
    pub fn new(seed_mock_data: bool) -> Self {
        fn seed<T>(enabled: bool, rows: fn() -> Vec<T>) -> Option<fn() -> Vec<T>> {
            enabled.then_some(rows)
        }

        Self {
            contacts: EntityTable::new(seed(seed_mock_data, mock_data::contacts)),
            // Stages are reference data and are always present.
            stages: EntityTable::new(seed(true, mock_data::pipeline_stages)),
            opportunities: EntityTable::new(seed(seed_mock_data, mock_data::opportunities)),
            appointments: EntityTable::new(seed(seed_mock_data, mock_data::appointments)),
            workflows: EntityTable::new(seed(seed_mock_data, mock_data::workflows)),
            funnels: EntityTable::new(seed(seed_mock_data, mock_data::funnels)),
        }
    }
}
