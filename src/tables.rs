//! Rendered Table Model
//!
//! Everything the page shows, as plain data. The Leptos components only
//! read this; every change goes through the renderer entry points.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::capacity::CapacityRule;
use crate::snapshot::{capacity_cell_id, CapacityCell, CourseCapacitySnapshot, TableSnapshot};

pub const CLASSES_HEADER: [&str; 4] = ["Course Name", "Teacher", "Time", "Students Enrolled"];
pub const CATALOG_HEADER: [&str; 2] = ["Course", "Enrollment"];
pub const GRADEBOOK_HEADER: [&str; 2] = ["Student", "Grade"];

/// Table views addressable on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum TableId {
    #[serde(rename = "user_classes")]
    UserClasses,
    #[serde(rename = "courses_table")]
    CoursesTable,
    #[serde(rename = "gradebook")]
    Gradebook,
}

impl TableId {
    pub const ALL: [TableId; 3] = [TableId::UserClasses, TableId::CoursesTable, TableId::Gradebook];

    pub fn dom_id(self) -> &'static str {
        match self {
            TableId::UserClasses => "user_classes",
            TableId::CoursesTable => "courses_table",
            TableId::Gradebook => "gradebook",
        }
    }

    pub fn from_dom_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.dom_id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            TableId::UserClasses => "My Classes",
            TableId::CoursesTable => "Add Classes",
            TableId::Gradebook => "Gradebook",
        }
    }

    /// Local storage key of this table's snapshot
    pub fn mirror_key(self) -> &'static str {
        match self {
            TableId::UserClasses => "userClassesTable",
            TableId::CoursesTable => "coursesTable",
            TableId::Gradebook => "gradebookTable",
        }
    }
}

/// Per-table load cycle: mirror paint is optional, fresh is re-entered after every mutation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncState {
    #[default]
    Uninitialized,
    MirrorPainted,
    Fresh,
}

/// One student's grade cell, in display or edit mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeCell {
    pub student: String,
    pub grade: String,
    pub editing: bool,
}

impl GradeCell {
    pub fn display_id(&self) -> String {
        format!("grade-display-{}", self.student)
    }

    pub fn input_id(&self) -> String {
        format!("grade-input-{}", self.student)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedTables {
    views: Vec<TableId>,
    visible: Option<TableId>,
    tables: BTreeMap<TableId, TableSnapshot>,
    sync: BTreeMap<TableId, SyncState>,
    capacity_rule: CapacityRule,
    /// Capacity cell id -> displayed text
    capacity: BTreeMap<String, String>,
    grade_class: Option<String>,
    grades: Vec<GradeCell>,
    notice: Option<String>,
    /// Bumped on every new notice, so repeats of the same text are distinct
    notice_seq: u64,
}

impl RenderedTables {
    /// Model with every table view registered
    pub fn new(capacity_rule: CapacityRule) -> Self {
        Self::with_views(&TableId::ALL, capacity_rule)
    }

    pub fn with_views(views: &[TableId], capacity_rule: CapacityRule) -> Self {
        Self {
            views: views.to_vec(),
            capacity_rule,
            ..Default::default()
        }
    }

    // ========================
    // View switching
    // ========================

    /// Show only `id`. Unknown ids and a page without views change nothing.
    pub fn show_table(&mut self, id: &str) -> bool {
        if self.views.is_empty() {
            return false;
        }
        match TableId::from_dom_id(id).filter(|t| self.views.contains(t)) {
            Some(table) => {
                self.visible = Some(table);
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn visible(&self) -> Option<TableId> {
        self.visible
    }

    pub fn is_visible(&self, table: TableId) -> bool {
        self.visible == Some(table)
    }

    // ========================
    // Table content
    // ========================

    /// Replace the table's content with header + rows, in the given order
    pub fn render_rows<S: AsRef<str>>(&mut self, table: TableId, header: &[S], rows: Vec<Vec<String>>) {
        self.tables.insert(table, TableSnapshot::from_parts(header, rows));
    }

    /// Replay a snapshot verbatim, whatever its row widths
    pub fn render_snapshot(&mut self, table: TableId, snapshot: &TableSnapshot) {
        self.tables.insert(table, snapshot.clone());
    }

    pub fn table(&self, table: TableId) -> Option<&TableSnapshot> {
        self.tables.get(&table)
    }

    pub fn snapshot(&self, table: TableId) -> TableSnapshot {
        self.tables.get(&table).cloned().unwrap_or_default()
    }

    pub fn sync_state(&self, table: TableId) -> SyncState {
        self.sync.get(&table).copied().unwrap_or_default()
    }

    pub fn set_sync_state(&mut self, table: TableId, state: SyncState) {
        self.sync.insert(table, state);
    }

    // ========================
    // Capacity cells
    // ========================

    /// Set one capacity cell, applying the full-course rule. The matching
    /// catalog row, if rendered, follows the cell.
    pub fn update_capacity_cell(&mut self, course_id: &str, raw: &str) {
        let text = self.capacity_rule.display(raw);
        if let Some(catalog) = self.tables.get_mut(&TableId::CoursesTable) {
            for row in catalog.body_mut() {
                if row.first().map(String::as_str) == Some(course_id) {
                    if let Some(cell) = row.get_mut(1) {
                        *cell = text.clone();
                    }
                }
            }
        }
        self.capacity.insert(capacity_cell_id(course_id), text);
    }

    /// Forget every capacity cell before a fresh catalog is applied
    pub fn clear_capacity(&mut self) {
        self.capacity.clear();
    }

    pub fn capacity_text(&self, course_id: &str) -> Option<&str> {
        self.capacity.get(&capacity_cell_id(course_id)).map(String::as_str)
    }

    pub fn is_course_full(&self, course_id: &str) -> bool {
        self.capacity_text(course_id)
            .is_some_and(|text| text == self.capacity_rule.full_label || self.capacity_rule.is_full(text))
    }

    pub fn capacity_snapshot(&self) -> CourseCapacitySnapshot {
        CourseCapacitySnapshot::new(
            self.capacity
                .iter()
                .map(|(id, value)| CapacityCell { id: id.clone(), value: value.clone() })
                .collect(),
        )
    }

    // ========================
    // Gradebook
    // ========================

    /// Replace the roster; every cell starts in display mode
    pub fn set_roster(&mut self, class_name: &str, students: Vec<(String, String)>) {
        self.grade_class = Some(class_name.to_string());
        self.grades = students
            .into_iter()
            .map(|(student, grade)| GradeCell { student, grade, editing: false })
            .collect();
        self.sync_gradebook_table();
    }

    pub fn grade_class(&self) -> Option<&str> {
        self.grade_class.as_deref()
    }

    pub fn grade_cells(&self) -> &[GradeCell] {
        &self.grades
    }

    #[cfg(test)]
    pub fn grade_cell(&self, student: &str) -> Option<&GradeCell> {
        self.grades.iter().find(|c| c.student == student)
    }

    pub fn begin_grade_edit(&mut self, student: &str) -> bool {
        self.set_editing(student, true)
    }

    pub fn cancel_grade_edit(&mut self, student: &str) -> bool {
        self.set_editing(student, false)
    }

    /// Store the accepted grade and swap the cell back to display mode
    pub fn commit_grade(&mut self, student: &str, grade: &str) -> bool {
        let Some(cell) = self.grades.iter_mut().find(|c| c.student == student) else {
            return false;
        };
        cell.grade = grade.to_string();
        cell.editing = false;
        self.sync_gradebook_table();
        true
    }

    fn set_editing(&mut self, student: &str, editing: bool) -> bool {
        match self.grades.iter_mut().find(|c| c.student == student) {
            Some(cell) => {
                cell.editing = editing;
                true
            }
            None => false,
        }
    }

    fn sync_gradebook_table(&mut self) {
        let rows = self
            .grades
            .iter()
            .map(|c| vec![c.student.clone(), c.grade.clone()])
            .collect();
        self.render_rows(TableId::Gradebook, &GRADEBOOK_HEADER, rows);
    }

    // ========================
    // Error notice
    // ========================

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Sequence number of the current notice
    pub fn notice_id(&self) -> Option<u64> {
        self.notice.as_ref().map(|_| self.notice_seq)
    }

    pub fn set_notice(&mut self, message: String) {
        self.notice_seq += 1;
        self.notice = Some(message);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Clear the notice only if it is still notice `id`
    pub fn expire_notice(&mut self, id: u64) -> bool {
        if self.notice_id() == Some(id) {
            self.notice = None;
            true
        } else {
            false
        }
    }
}
