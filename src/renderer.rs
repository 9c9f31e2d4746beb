//! Table Renderer
//!
//! Single owner of presentation state. The controller talks to tables only
//! through these entry points; components subscribe to the store behind
//! `StoreRenderer` and never mutate it themselves.

use leptos::prelude::*;

use crate::snapshot::{CourseCapacitySnapshot, TableSnapshot};
use crate::store::{AppStateStoreFields, AppStore};
use crate::tables::{RenderedTables, SyncState, TableId};

pub trait TableRenderer {
    /// Run `f` against the current model without subscribing
    fn with_tables<T>(&self, f: impl FnOnce(&RenderedTables) -> T) -> T;

    /// Run `f` against the model and publish the change
    fn update_tables<T>(&self, f: impl FnOnce(&mut RenderedTables) -> T) -> T;

    fn show_table(&self, id: &str) {
        if !self.update_tables(|t| t.show_table(id)) {
            log::debug!("[RENDER] no table view '{}', visibility unchanged", id);
        }
    }

    fn render_rows(&self, table: TableId, header: &[&str], rows: Vec<Vec<String>>) {
        log::debug!("[RENDER] {} <- {} rows", table.dom_id(), rows.len());
        self.update_tables(|t| t.render_rows(table, header, rows));
    }

    fn render_snapshot(&self, table: TableId, snapshot: &TableSnapshot) {
        if !snapshot.is_rectangular() {
            log::debug!("[RENDER] {} snapshot has uneven rows", table.dom_id());
        }
        self.update_tables(|t| t.render_snapshot(table, snapshot));
    }

    fn update_capacity_cell(&self, course_id: &str, text: &str) {
        self.update_tables(|t| t.update_capacity_cell(course_id, text));
    }

    fn clear_capacity_cells(&self) {
        self.update_tables(|t| t.clear_capacity());
    }

    fn snapshot(&self, table: TableId) -> TableSnapshot {
        self.with_tables(|t| t.snapshot(table))
    }

    fn capacity_snapshot(&self) -> CourseCapacitySnapshot {
        self.with_tables(|t| t.capacity_snapshot())
    }

    #[cfg(test)]
    fn sync_state(&self, table: TableId) -> SyncState {
        self.with_tables(|t| t.sync_state(table))
    }

    fn set_sync_state(&self, table: TableId, state: SyncState) {
        log::debug!("[RENDER] {} -> {:?}", table.dom_id(), state);
        self.update_tables(|t| t.set_sync_state(table, state));
    }

    fn set_roster(&self, class_name: &str, students: Vec<(String, String)>) {
        self.update_tables(|t| t.set_roster(class_name, students));
    }

    fn begin_grade_edit(&self, student: &str) {
        self.update_tables(|t| t.begin_grade_edit(student));
    }

    fn cancel_grade_edit(&self, student: &str) {
        self.update_tables(|t| t.cancel_grade_edit(student));
    }

    /// Swap the cell from edit mode to display mode with the new grade
    fn commit_grade(&self, student: &str, grade: &str) {
        self.update_tables(|t| t.commit_grade(student, grade));
    }

    /// Visible error notice
    fn report_error(&self, message: String) {
        self.update_tables(|t| t.set_notice(message));
    }

    fn clear_error(&self) {
        self.update_tables(|t| t.clear_notice());
    }

    /// Drop notice `id` unless a newer one replaced it
    fn expire_error(&self, id: u64) {
        if !self.update_tables(|t| t.expire_notice(id)) {
            log::debug!("[RENDER] notice {} already replaced", id);
        }
    }
}

/// Renderer backed by the app store
#[derive(Clone, Copy)]
pub struct StoreRenderer {
    store: AppStore,
}

impl StoreRenderer {
    pub fn new(store: AppStore) -> Self {
        Self { store }
    }
}

impl TableRenderer for StoreRenderer {
    fn with_tables<T>(&self, f: impl FnOnce(&RenderedTables) -> T) -> T {
        self.store.tables().with_untracked(f)
    }

    fn update_tables<T>(&self, f: impl FnOnce(&mut RenderedTables) -> T) -> T {
        let field = self.store.tables();
        let mut tables = field.write();
        f(&mut *tables)
    }
}
