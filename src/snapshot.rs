//! Table Snapshots
//!
//! Serialized, order-preserving copies of rendered table text. These are
//! what the mirror persists, so they carry cell text only, no typed fields.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, Result};

/// Prefix of every capacity cell id (`capacity-<courseId>`)
pub const CAPACITY_PREFIX: &str = "capacity-";

/// Header row plus data rows, each an ordered list of cell text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableSnapshot {
    rows: Vec<Vec<String>>,
}

impl TableSnapshot {
    #[cfg(test)]
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Build from a header and data rows (header becomes row 0)
    pub fn from_parts<S: AsRef<str>>(header: &[S], body: Vec<Vec<String>>) -> Self {
        let mut rows = Vec::with_capacity(body.len() + 1);
        rows.push(header.iter().map(|h| h.as_ref().to_string()).collect());
        rows.extend(body);
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Data rows (everything after the header)
    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub(crate) fn body_mut(&mut self) -> &mut [Vec<String>] {
        self.rows.get_mut(1..).unwrap_or(&mut [])
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every row as wide as the header
    pub fn is_rectangular(&self) -> bool {
        match self.rows.first() {
            Some(header) => self.rows.iter().all(|row| row.len() == header.len()),
            None => true,
        }
    }

    /// Accept only non-empty rectangular snapshots
    pub fn validate(self) -> Result<Self> {
        let Some(width) = self.rows.first().map(Vec::len) else {
            return Err(ErrorKind::Cache("snapshot has no header row".to_string()).into());
        };
        if let Some((index, row)) = self.rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(ErrorKind::Cache(format!(
                "row {} has {} cells, header has {}",
                index,
                row.len(),
                width
            ))
            .into());
        }
        Ok(self)
    }
}

/// One persisted capacity cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityCell {
    pub id: String,
    pub value: String,
}

impl CapacityCell {
    /// Course id addressed by this cell, if the id carries the prefix
    pub fn course_id(&self) -> Option<&str> {
        course_id_from_cell(&self.id)
    }
}

/// Capacity cells keyed by cell id, stored apart from table snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseCapacitySnapshot {
    cells: Vec<CapacityCell>,
}

impl CourseCapacitySnapshot {
    pub fn new(cells: Vec<CapacityCell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[CapacityCell] {
        &self.cells
    }
}

pub fn capacity_cell_id(course_id: &str) -> String {
    format!("{}{}", CAPACITY_PREFIX, course_id)
}

pub fn course_id_from_cell(cell_id: &str) -> Option<&str> {
    cell_id.strip_prefix(CAPACITY_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_from_parts_puts_header_first() {
        let snapshot = TableSnapshot::from_parts(&["A", "B"], vec![row(&["1", "2"])]);
        assert_eq!(snapshot.header(), Some(&row(&["A", "B"])[..]));
        assert_eq!(snapshot.body(), &[row(&["1", "2"])]);
    }

    #[test]
    fn test_validate_rejects_ragged_rows() {
        let snapshot = TableSnapshot::new(vec![row(&["A", "B"]), row(&["only one"])]);
        assert!(!snapshot.is_rectangular());
        let err = snapshot.validate().unwrap_err();
        assert!(err.to_string().contains("row 1 has 1 cells"));
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(TableSnapshot::default().validate().is_err());
    }

    #[test]
    fn test_header_only_is_valid() {
        let snapshot = TableSnapshot::new(vec![row(&["A"])]);
        assert!(snapshot.clone().validate().is_ok());
        assert!(snapshot.body().is_empty());
    }

    #[test]
    fn test_serializes_as_nested_arrays() {
        let snapshot = TableSnapshot::new(vec![row(&["A"]), row(&["x"])]);
        assert_eq!(serde_json::to_string(&snapshot).unwrap(), r#"[["A"],["x"]]"#);
    }

    #[test]
    fn test_capacity_cell_ids() {
        let cell = CapacityCell { id: capacity_cell_id("CSE 108"), value: "FULL".into() };
        assert_eq!(cell.id, "capacity-CSE 108");
        assert_eq!(cell.course_id(), Some("CSE 108"));
        assert_eq!(course_id_from_cell("grade-display-amy"), None);
    }
}
