//! Course Catalog Component
//!
//! Offered courses with live capacity cells (`capacity-<courseId>`) and an
//! add action that is disabled while a course is full.

use leptos::prelude::*;

use super::{header_cells, is_stale, view_display};
use crate::context::AppContext;
use crate::snapshot::capacity_cell_id;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::tables::TableId;

#[component]
pub fn CourseCatalog() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let table = TableId::CoursesTable;

    let courses = Memo::new(move |_| {
        store.tables().with(|t| {
            t.snapshot(table)
                .body()
                .iter()
                .filter_map(|row| row.first().cloned())
                .collect::<Vec<_>>()
        })
    });
    let header = header_cells(store, table);

    view! {
        <table id=table.dom_id() class="tables" style:display=view_display(store, table)>
            <Show when=is_stale(store, table)>
                <caption class="stale-hint">"Saved capacity, refreshing..."</caption>
            </Show>
            <thead>
                <tr>
                    {move || header().into_iter().map(|label| view! { <th>{label}</th> }).collect_view()}
                    <th></th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || courses.get()
                    key=|course| course.clone()
                    children=move |course| {
                        let capacity = {
                            let course = course.clone();
                            move || {
                                store.tables().with(|t| t.capacity_text(&course).unwrap_or_default().to_string())
                            }
                        };
                        let is_full = {
                            let course = course.clone();
                            move || store.tables().with(|t| t.is_course_full(&course))
                        };
                        let on_add = {
                            let course = course.clone();
                            move |_| {
                                let course = course.clone();
                                ctx.spawn(move |controller| async move {
                                    let _ = controller.add_class(&course).await;
                                });
                            }
                        };

                        view! {
                            <tr>
                                <td>{course.clone()}</td>
                                <td id=capacity_cell_id(&course) class:full=is_full.clone()>{capacity}</td>
                                <td>
                                    <button class="add-btn" disabled=is_full on:click=on_add>"Add"</button>
                                </td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}
