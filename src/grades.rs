//! Grade Input Validation

use crate::error::{ErrorKind, Result};

pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 100.0;

/// Parse an edited grade; must be a finite number within [0, 100]
pub fn parse_grade(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ErrorKind::Validation(format!("grade '{}' is not a number", trimmed)))?;
    if !value.is_finite() || !(MIN_GRADE..=MAX_GRADE).contains(&value) {
        return Err(ErrorKind::Validation(format!(
            "grade {} is outside {}-{}",
            trimmed, MIN_GRADE, MAX_GRADE
        ))
        .into());
    }
    Ok(value)
}

/// Display form of an accepted grade (`100`, `57.5`)
pub fn format_grade(value: f64) -> String {
    format!("{}", value)
}
