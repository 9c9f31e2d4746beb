//! Gradebook Component
//!
//! Roster of one class with inline grade editing. Each grade is either a
//! display span (`grade-display-<student>`, click to edit) or an input
//! (`grade-input-<student>`, Enter submits, Escape cancels).

use leptos::prelude::*;

use super::{is_stale, view_display};
use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::tables::{GradeCell, TableId, GRADEBOOK_HEADER};

/// Class picker
#[component]
fn RosterForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (class_name, set_class_name) = signal(String::new());

    let load = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = class_name.get();
        ctx.spawn(move |controller| async move {
            let _ = controller.load_roster(&name).await;
        });
    };

    view! {
        <form class="roster-form" on:submit=load>
            <input
                type="text"
                placeholder="Class name..."
                prop:value=move || class_name.get()
                on:input=move |ev| set_class_name.set(event_target_value(&ev))
            />
            <button type="submit">"Load roster"</button>
        </form>
    }
}

/// One student's grade cell
#[component]
fn GradeCellView(cell: GradeCell, class_name: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let student = cell.student.clone();

    if cell.editing {
        let on_keydown = move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
            "Enter" => {
                let raw = event_target_value(&ev);
                let class_name = class_name.clone();
                let student = student.clone();
                ctx.spawn(move |controller| async move {
                    let _ = controller.submit_grade(&class_name, &student, &raw).await;
                });
            }
            "Escape" => ctx.controller().cancel_grade_edit(&student),
            _ => {}
        };

        view! {
            <input
                id=cell.input_id()
                class="grade-input"
                type="number"
                min="0"
                max="100"
                step="any"
                value=cell.grade.clone()
                on:keydown=on_keydown
            />
        }
        .into_any()
    } else {
        view! {
            <span
                id=cell.display_id()
                class="grade-display"
                title="Click to edit"
                on:click=move |_| ctx.controller().begin_grade_edit(&student)
            >
                {cell.grade.clone()}
            </span>
        }
        .into_any()
    }
}

#[component]
pub fn Gradebook() -> impl IntoView {
    let store = use_app_store();
    let table = TableId::Gradebook;

    let class_name = move || store.tables().with(|t| t.grade_class().map(str::to_string));
    let cells = Memo::new(move |_| store.tables().with(|t| t.grade_cells().to_vec()));

    view! {
        <table id=table.dom_id() class="tables" style:display=view_display(store, table)>
            <caption>
                <RosterForm />
                {move || class_name().unwrap_or_else(|| "No class loaded".to_string())}
                <Show when=is_stale(store, table)>" (refreshing)"</Show>
            </caption>
            <thead>
                <tr>
                    {GRADEBOOK_HEADER.iter().map(|label| view! { <th>{*label}</th> }).collect_view()}
                </tr>
            </thead>
            <tbody>
                {move || {
                    let class_name = class_name().unwrap_or_default();
                    cells.get().into_iter().map(|cell| {
                        let student = cell.student.clone();
                        let class_name = class_name.clone();
                        view! {
                            <tr>
                                <td>{student}</td>
                                <td><GradeCellView cell=cell class_name=class_name /></td>
                            </tr>
                        }
                    }).collect_view()
                }}
            </tbody>
        </table>
    }
}
