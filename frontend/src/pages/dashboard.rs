// Dashboard page - pipeline stats and the monthly revenue chart
use apexleads_shared::{ChartPoint, DashboardStats};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::opportunities::format_currency;
use crate::components::toast::use_toast;
use crate::services::dashboard;

#[derive(Properties, PartialEq)]
struct StatCardProps {
    label: AttrValue,
    value: AttrValue,
    accent: AttrValue,
}

#[function_component(StatCard)]
fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="bg-white dark:bg-gray-800 rounded-lg shadow p-5">
            <p class="text-sm text-gray-500">{ props.label.clone() }</p>
            <p class={classes!("mt-2", "text-2xl", "font-bold", props.accent.to_string())}>{ props.value.clone() }</p>
        </div>
    }
}

/// Bar height as a percentage of the tallest bar.
fn bar_height(value: u32, max: u32) -> f64 {
    if max == 0 { 0.0 } else { f64::from(value) / f64::from(max) * 100.0 }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let stats = use_state(|| None::<DashboardStats>);
    let chart = use_state(Vec::<ChartPoint>::new);
    let toast = use_toast();

    // Fetch stats and chart on mount
    {
        let stats = stats.clone();
        let chart = chart.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match dashboard::get_stats().await {
                    Ok(s) => stats.set(Some(s)),
                    Err(e) => toast.error(format!("Failed to load dashboard: {}", e)),
                }
                match dashboard::get_revenue_chart().await {
                    Ok(points) => chart.set(points),
                    Err(e) => toast.error(format!("Failed to load revenue chart: {}", e)),
                }
            });
            || ()
        });
    }

    let max = chart.iter().map(|p| p.value).max().unwrap_or(0);

    html! {
        <div class="p-8 space-y-8">
            <h1 class="text-2xl font-bold text-gray-900 dark:text-white">{"Dashboard"}</h1>

            {
                match &*stats {
                    Some(stats) => html! {
                        <div class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-4 gap-4">
                            <StatCard label="Open Opportunities" value={stats.opportunities.to_string()} accent="text-gray-900 dark:text-white" />
                            <StatCard label="Pipeline Value" value={format_currency(stats.pipeline_value)} accent="text-indigo-600" />
                            <StatCard label="Conversion Rate" value={format!("{:.1}%", stats.conversion_rate)} accent="text-green-600" />
                            <StatCard label="Closed Won" value={format_currency(stats.closed_won_value)} accent="text-emerald-600" />
                        </div>
                    },
                    None => html! {
                        <div class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-4 gap-4">
                            { for (0..4).map(|_| html! { <div class="h-24 rounded-lg bg-gray-200 animate-pulse"></div> }) }
                        </div>
                    },
                }
            }

            <div class="bg-white dark:bg-gray-800 rounded-lg shadow p-6">
                <h2 class="text-lg font-semibold text-gray-900 dark:text-white mb-4">{"Revenue"}</h2>
                <div class="flex items-end space-x-4 h-56">
                    { for chart.iter().map(|point| html! {
                        <div key={point.name.clone()} class="flex-1 flex flex-col items-center justify-end h-full">
                            <span class="text-xs text-gray-500 mb-1">{ point.value }</span>
                            <div
                                class="w-full rounded-t bg-indigo-500"
                                style={format!("height: {:.0}%;", bar_height(point.value, max))}
                            ></div>
                            <span class="text-xs text-gray-600 dark:text-gray-300 mt-2">{ &point.name }</span>
                        </div>
                    })}
                </div>
            </div>
        </div>
    }
}
