//! Error Banner Component
//!
//! Visible notice for the last failed operation. Dismissed by hand or after
//! the configured timeout.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let timeout_ms = ctx.controller().config().notice_timeout_ms;

    let notice = Memo::new(move |_| store.tables().with(|t| t.notice().map(str::to_string)));
    let notice_id = Memo::new(move |_| store.tables().with(|t| t.notice_id()));

    // Auto-dismiss, unless a newer notice replaced this one meanwhile
    Effect::new(move |_| {
        let Some(id) = notice_id.get() else { return };
        if timeout_ms == 0 {
            return;
        }
        spawn_local(async move {
            TimeoutFuture::new(timeout_ms).await;
            ctx.controller().expire_error(id);
        });
    });

    view! {
        <Show when=move || notice.get().is_some()>
            <div class="error-banner" role="alert">
                <span class="error-text">{move || notice.get().unwrap_or_default()}</span>
                <button class="dismiss-btn" on:click=move |_| ctx.controller().dismiss_error()>
                    "×"
                </button>
            </div>
        </Show>
    }
}
