//! Frontend Configuration
//!
//! Defaults, optionally overridden by a JSON block embedded in the page
//! (`<script id="enrollment-config" type="application/json">`) and then by
//! build-time environment variables.

use serde::Deserialize;

use crate::capacity::CapacityRule;
use crate::error::Result;
use crate::tables::TableId;

/// Element id of the embedded JSON configuration
pub const CONFIG_ELEMENT_ID: &str = "enrollment-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend origin, without trailing slash
    pub api_base: String,
    pub capacity: CapacityRule,
    /// Placeholder grade sent when adding a class
    pub default_grade: String,
    /// Table shown once the page is ready
    pub default_table: TableId,
    /// Auto-dismiss delay for the error notice; 0 keeps it until dismissed
    pub notice_timeout_ms: u32,
    /// Diagnostic entries kept for the diagnostics panel
    pub log_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:5000".to_string(),
            capacity: CapacityRule::default(),
            default_grade: "N/A".to_string(),
            default_table: TableId::UserClasses,
            notice_timeout_ms: 6000,
            log_capacity: 200,
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Resolve the effective configuration. A malformed page block falls
    /// back to defaults; the returned warning is logged once logging is up.
    pub fn load(page_json: Option<&str>) -> (Self, Option<String>) {
        let (base, warning) = match page_json.map(Self::from_json) {
            Some(Ok(config)) => (config, None),
            Some(Err(e)) => (Self::default(), Some(format!("ignoring page config: {}", e))),
            None => (Self::default(), None),
        };
        let config = base.with_overrides(
            option_env!("ENROLLMENT_API_BASE"),
            option_env!("ENROLLMENT_FULL_LABEL"),
            option_env!("ENROLLMENT_CAPACITY"),
        );
        (config, warning)
    }

    pub fn with_overrides(mut self, api_base: Option<&str>, full_label: Option<&str>, capacity: Option<&str>) -> Self {
        if let Some(base) = api_base.filter(|b| !b.is_empty()) {
            self.api_base = base.to_string();
        }
        if let Some(label) = full_label.filter(|l| !l.is_empty()) {
            self.capacity.full_label = label.to_string();
        }
        if let Some(seats) = capacity.and_then(|c| c.trim().parse().ok()) {
            self.capacity.capacity = Some(seats);
        }
        self
    }
}
