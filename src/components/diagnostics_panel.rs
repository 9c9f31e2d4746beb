//! Diagnostics Panel Component
//!
//! Collapsible view of the most recent log entries.

use leptos::prelude::*;

fn recent_lines() -> Vec<String> {
    rolling_logger::recent().iter().rev().map(|entry| entry.line()).collect()
}

#[component]
pub fn DiagnosticsPanel() -> impl IntoView {
    let (open, set_open) = signal(false);
    let (lines, set_lines) = signal(Vec::<String>::new());

    let toggle = move |_| {
        let now_open = !open.get();
        if now_open {
            set_lines.set(recent_lines());
        }
        set_open.set(now_open);
    };

    view! {
        <section class="diagnostics">
            <button class="diagnostics-toggle" on:click=toggle>
                {move || if open.get() { "Hide diagnostics" } else { "Show diagnostics" }}
            </button>
            <Show when=move || open.get()>
                <button class="diagnostics-refresh" on:click=move |_| set_lines.set(recent_lines())>
                    "Refresh"
                </button>
                <ul class="diagnostics-list">
                    {move || lines.get().into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                </ul>
            </Show>
        </section>
    }
}
