//! UI Components
//!
//! Leptos views over the app store. They read the store and send user
//! actions to the controller; none of them writes table state directly.

mod table_tab_bar;
mod classes_table;
mod course_catalog;
mod gradebook;
mod error_banner;
mod diagnostics_panel;

pub use table_tab_bar::TableTabBar;
pub use classes_table::ClassesTable;
pub use course_catalog::CourseCatalog;
pub use gradebook::Gradebook;
pub use error_banner::ErrorBanner;
pub use diagnostics_panel::DiagnosticsPanel;

use leptos::prelude::*;

use crate::store::{AppStateStoreFields, AppStore};
use crate::tables::{SyncState, TableId};

/// CSS `display` of a table view: only the visible one is shown
fn view_display(store: AppStore, table: TableId) -> impl Fn() -> &'static str + Copy + 'static {
    move || {
        if store.tables().with(|t| t.is_visible(table)) {
            "block"
        } else {
            "none"
        }
    }
}

/// Whether the table still shows mirror data awaiting a fresh response
fn is_stale(store: AppStore, table: TableId) -> impl Fn() -> bool + Copy + 'static {
    move || store.tables().with(|t| t.sync_state(table) == SyncState::MirrorPainted)
}

/// Header cells of a table, or nothing before the first render
fn header_cells(store: AppStore, table: TableId) -> impl Fn() -> Vec<String> + Copy + 'static {
    move || {
        store
            .tables()
            .with(|t| t.table(table).and_then(|s| s.header()).map(<[String]>::to_vec))
            .unwrap_or_default()
    }
}
