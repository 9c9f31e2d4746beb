//! Classes Table Component
//!
//! The student's enrolled classes, with a drop action per row.

use leptos::prelude::*;

use super::{header_cells, is_stale, view_display};
use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::tables::TableId;

#[component]
pub fn ClassesTable() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let table = TableId::UserClasses;

    let rows = Memo::new(move |_| store.tables().with(|t| t.snapshot(table).body().to_vec()));
    let header = header_cells(store, table);

    view! {
        <table id=table.dom_id() class="tables" style:display=view_display(store, table)>
            <Show when=is_stale(store, table)>
                <caption class="stale-hint">"Saved copy, refreshing..."</caption>
            </Show>
            <thead>
                <tr>
                    {move || header().into_iter().map(|label| view! { <th>{label}</th> }).collect_view()}
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {move || rows.get().into_iter().map(|row| {
                    let course = row.first().cloned().unwrap_or_default();
                    let on_drop = move |_| {
                        let course = course.clone();
                        ctx.spawn(move |controller| async move {
                            let _ = controller.drop_class(&course).await;
                        });
                    };

                    view! {
                        <tr>
                            {row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                            <td>
                                <button class="drop-btn" on:click=on_drop>"Drop"</button>
                            </td>
                        </tr>
                    }
                }).collect_view()}
            </tbody>
        </table>
    }
}
