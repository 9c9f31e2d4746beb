//! Global Application State Store
//!
//! Uses Leptos reactive_stores so components subscribe to the table model
//! while the renderer is the only writer.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::capacity::CapacityRule;
use crate::tables::RenderedTables;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Everything the tables, catalog and gradebook display
    pub tables: RenderedTables,
}

impl AppState {
    pub fn new(capacity_rule: CapacityRule) -> Self {
        Self {
            tables: RenderedTables::new(capacity_rule),
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}
