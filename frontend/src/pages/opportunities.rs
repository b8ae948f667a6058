// Opportunities page - kanban pipeline with drag and drop between stages
use apexleads_shared::Opportunity;
use apexleads_shared::pipeline::{PendingMove, PipelineBoard};
use rust_decimal::Decimal;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::toast::use_toast;
use crate::services::opportunities;

#[derive(Default, PartialEq)]
struct BoardState {
    board: PipelineBoard,
    loaded: bool,
}

enum BoardAction {
    Load(PipelineBoard),
    Move { id: String, stage: String },
    Rollback(PendingMove),
    Confirm(Opportunity),
}

impl Reducible for BoardState {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut board = self.board.clone();
        match action {
            BoardAction::Load(loaded) => board = loaded,
            BoardAction::Move { id, stage } => {
                board.move_card(&id, &stage);
            }
            BoardAction::Rollback(pending) => board.rollback(pending),
            BoardAction::Confirm(saved) => board.confirm(saved),
        }
        Rc::new(BoardState { board, loaded: true })
    }
}

pub fn format_currency(value: Decimal) -> String {
    let whole = value.round().to_string();
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(rest) => ("-", rest.to_string()),
        None => ("", whole),
    };
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}${}", sign, grouped)
}

#[function_component(OpportunitiesPage)]
pub fn opportunities_page() -> Html {
    let state = use_reducer(BoardState::default);
    let dragging = use_state(|| None::<String>);
    let toast = use_toast();

    {
        let state = state.clone();
        let toast = toast.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match opportunities::get_pipeline().await {
                    Ok(pipeline) => state.dispatch(BoardAction::Load(PipelineBoard::new(
                        pipeline.stages,
                        pipeline.opportunities,
                    ))),
                    Err(e) => {
                        toast.error(format!("Failed to load pipeline: {}", e));
                        state.dispatch(BoardAction::Load(PipelineBoard::default()));
                    }
                }
            });
            || ()
        });
    }

    // The card moves at once; a refused PATCH puts it back.
    let on_drop_card = {
        let state = state.clone();
        let toast = toast.clone();
        Callback::from(move |(id, stage): (String, String)| {
            let mut probe = state.board.clone();
            let Some(pending) = probe.move_card(&id, &stage) else {
                return;
            };
            state.dispatch(BoardAction::Move {
                id: id.clone(),
                stage: stage.clone(),
            });

            let state = state.clone();
            let toast = toast.clone();
            spawn_local(async move {
                match opportunities::move_to_stage(&id, &stage).await {
                    Ok(saved) => state.dispatch(BoardAction::Confirm(saved)),
                    Err(e) => {
                        toast.error(format!("Could not move opportunity: {}", e.summary()));
                        state.dispatch(BoardAction::Rollback(pending));
                    }
                }
            });
        })
    };

    if !state.loaded {
        return html! {
            <div class="p-8 grid grid-cols-5 gap-4">
                { for (0..5).map(|_| html! { <div class="h-96 rounded-lg bg-gray-200 animate-pulse"></div> }) }
            </div>
        };
    }

    let columns = state.board.columns();

    html! {
        <div class="p-8 space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-gray-900 dark:text-white">{"Opportunities"}</h1>
                <span class="text-sm text-gray-500">
                    { format!("Pipeline total {}", format_currency(state.board.total_value())) }
                </span>
            </div>
            <div class="flex space-x-4 overflow-x-auto pb-4">
                { for columns.iter().map(|column| {
                    let stage_id = column.stage.id.clone();
                    let ondragover = Callback::from(|e: DragEvent| e.prevent_default());
                    let ondrop = {
                        let dragging = dragging.clone();
                        let on_drop_card = on_drop_card.clone();
                        Callback::from(move |e: DragEvent| {
                            e.prevent_default();
                            let dropped = e
                                .data_transfer()
                                .and_then(|data| data.get_data("text/plain").ok())
                                .filter(|id| !id.is_empty())
                                .or_else(|| (*dragging).clone());
                            if let Some(id) = dropped {
                                on_drop_card.emit((id, stage_id.clone()));
                            }
                            dragging.set(None);
                        })
                    };
                    html! {
                        <div key={column.stage.id.clone()} class="flex-shrink-0 w-72 bg-gray-100 dark:bg-gray-900 rounded-lg p-3" {ondragover} {ondrop}>
                            <div class="flex items-center justify-between mb-3">
                                <h2 class="font-semibold text-gray-800 dark:text-gray-100">{ &column.stage.title }</h2>
                                <span class="text-xs text-gray-500">
                                    { format!("{} · {}", column.cards.len(), format_currency(column.total)) }
                                </span>
                            </div>
                            <div class="space-y-2 min-h-[4rem]">
                                { for column.cards.iter().map(|card| {
                                    let ondragstart = {
                                        let dragging = dragging.clone();
                                        let id = card.id.clone();
                                        Callback::from(move |e: DragEvent| {
                                            if let Some(data) = e.data_transfer() {
                                                let _ = data.set_data("text/plain", &id);
                                            }
                                            dragging.set(Some(id.clone()));
                                        })
                                    };
                                    html! {
                                        <div key={card.id.clone()} draggable="true" {ondragstart}
                                            class="bg-white dark:bg-gray-800 rounded-lg shadow p-3 cursor-grab">
                                            <p class="font-medium text-sm text-gray-900 dark:text-white">{ &card.title }</p>
                                            <p class="text-xs text-gray-500 mt-1">{ &card.contact_name }</p>
                                            <p class="text-sm font-semibold text-indigo-600 mt-2">{ format_currency(card.value) }</p>
                                        </div>
                                    }
                                })}
                            </div>
                        </div>
                    }
                })}
            </div>
        </div>
    }
}
