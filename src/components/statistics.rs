//! Statistics Page
//!
//! Aggregate completion statistics for one questionnaire: average completion
//! time, completions by date and per-question answer distribution. Rendered
//! as plain proportional bars; charting is the backend dashboard's business.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::BackButton;
use crate::models::Statistics;

#[component]
pub fn StatisticsPage(id: String) -> impl IntoView {
    let (stats, set_stats) = signal(None::<Statistics>);

    Effect::new(move |_| {
        let quiz_id = id.clone();
        spawn_local(async move {
            match api::get_statistics(&quiz_id).await {
                Ok(loaded) => set_stats.set(Some(loaded)),
                Err(err) => {
                    web_sys::console::error_1(
                        &format!("[STATS] Error loading statistics: {}", err).into(),
                    );
                }
            }
        });
    });

    view! {
        <BackButton />
        {move || match stats.get() {
            None => view! { <p class="loading">"Loading statistics..."</p> }.into_any(),
            Some(stats) if stats.avg_time.is_none() => {
                view! { <p class="no-completions">"No completions yet"</p> }.into_any()
            }
            Some(stats) => {
                let avg_time = stats.avg_time.unwrap_or_default();
                let max_count = stats.completions.values().copied().max().unwrap_or(1).max(1);
                view! {
                    <div class="stats-page">
                        <h2>"Statistics"</h2>
                        <p class="avg-time">
                            {format!("Average completion time: {} seconds", avg_time)}
                        </p>

                        <div class="completions">
                            <h3>"Completions by date"</h3>
                            {stats
                                .completions
                                .iter()
                                .map(|(date, count)| {
                                    let width = *count as f64 / max_count as f64 * 100.0;
                                    view! {
                                        <div class="completion-row">
                                            <span class="completion-date">{date.clone()}</span>
                                            <div
                                                class="completion-bar"
                                                style=format!("width: {:.0}%;", width)
                                            ></div>
                                            <span class="completion-count">{*count}</span>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>

                        <div class="distributions">
                            <h3>"Answers Distribution"</h3>
                            {stats
                                .piecharts
                                .iter()
                                .map(|chart| {
                                    let total: f64 =
                                        chart.data.iter().map(|slice| slice.value).sum();
                                    view! {
                                        <div class="distribution">
                                            <p class="distribution-question">
                                                {chart.question.clone()}
                                            </p>
                                            {chart
                                                .data
                                                .iter()
                                                .map(|slice| {
                                                    let share = if total > 0.0 {
                                                        slice.value / total * 100.0
                                                    } else {
                                                        0.0
                                                    };
                                                    view! {
                                                        <div class="distribution-row">
                                                            <span class="slice-name">
                                                                {slice.name.clone()}
                                                            </span>
                                                            <div
                                                                class="slice-bar"
                                                                style=format!("width: {:.0}%;", share)
                                                            ></div>
                                                            <span class="slice-share">
                                                                {format!("{:.0}%", share)}
                                                            </span>
                                                        </div>
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>
                }
                .into_any()
            }
        }}
    }
}
