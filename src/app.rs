//! Enrollment Frontend App
//!
//! Wires store, renderer, mirror and backend together, then lays out the
//! tab bar and the three table views.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::commands::HttpBackend;
use crate::components::{ClassesTable, CourseCatalog, DiagnosticsPanel, ErrorBanner, Gradebook, TableTabBar};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::controller::SyncController;
use crate::mirror::{BrowserStorage, Mirror};
use crate::renderer::StoreRenderer;
use crate::store::AppState;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let store = Store::new(AppState::new(config.capacity.clone()));
    provide_context(store);

    let controller = SyncController::new(
        HttpBackend::new(&config.api_base),
        StoreRenderer::new(store),
        Mirror::new(BrowserStorage::local()),
        config,
    );
    let ctx = AppContext::new(controller);
    provide_context(ctx);

    // Page ready: paint from the mirror, then fetch fresh data
    Effect::new(move |_| {
        ctx.spawn(|controller| async move { controller.page_ready().await });
    });

    view! {
        <div class="enrollment-app">
            <ErrorBanner />

            <h1>"Class Enrollment"</h1>

            <TableTabBar />

            <ClassesTable />
            <CourseCatalog />
            <Gradebook />

            <DiagnosticsPanel />
        </div>
    }
}
