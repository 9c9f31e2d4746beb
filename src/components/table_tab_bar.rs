//! Table Tab Bar Component
//!
//! Switches between the table views; exactly one is shown at a time.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::tables::TableId;

#[component]
pub fn TableTabBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    view! {
        <div class="table-tab-bar">
            {TableId::ALL.into_iter().map(|table| {
                let is_active = move || store.tables().with(|t| t.is_visible(table));
                let tab_class = move || {
                    if is_active() { "table-tab active" } else { "table-tab" }
                };

                view! {
                    <button
                        class=tab_class
                        on:click=move |_| ctx.controller().show_table(table.dom_id())
                    >
                        {table.label()}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
