//! Capacity Display Rule
//!
//! Decides when a catalog enrollment cell reads as full.

use serde::Deserialize;

/// Presentation rule for `enrolled/total` capacity cells
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CapacityRule {
    /// Fixed seat count; `None` compares against the total in the cell
    pub capacity: Option<u32>,
    /// Label substituted for a full course
    pub full_label: String,
}

impl Default for CapacityRule {
    fn default() -> Self {
        Self {
            capacity: None,
            full_label: "FULL".to_string(),
        }
    }
}

/// Parse `"enrolled/total"`, tolerating whitespace around either number
pub fn parse_fraction(text: &str) -> Option<(u32, u32)> {
    let (enrolled, total) = text.split_once('/')?;
    let enrolled = enrolled.trim().parse().ok()?;
    let total = total.trim().parse().ok()?;
    Some((enrolled, total))
}

impl CapacityRule {
    pub fn is_full(&self, text: &str) -> bool {
        match parse_fraction(text) {
            Some((enrolled, total)) => enrolled >= self.capacity.unwrap_or(total),
            None => false,
        }
    }

    /// Text to show for a raw capacity value
    pub fn display(&self, raw: &str) -> String {
        if self.is_full(raw) {
            self.full_label.clone()
        } else {
            raw.to_string()
        }
    }
}
