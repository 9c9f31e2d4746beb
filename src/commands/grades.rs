//! Grade Commands
//!
//! Roster lookup and single-grade updates.

use super::{segment, HttpBackend};
use crate::error::{ErrorKind, Result};
use crate::models::{GradeUpdateRequest, GradeUpdateResponse, RosterResponse};

pub(super) async fn roster(backend: &HttpBackend, class_name: &str) -> Result<RosterResponse> {
    backend.get_json(&format!("/roster/{}", segment(class_name))).await
}

/// A parsed reply with `success: false` is returned as `Rejected`
pub(super) async fn update(
    backend: &HttpBackend,
    class_name: &str,
    student: &str,
    request: &GradeUpdateRequest,
) -> Result<GradeUpdateResponse> {
    let path = format!("/update_grade/{}/{}", segment(class_name), segment(student));
    let response: GradeUpdateResponse = backend.post_json(&path, request).await?;
    if !response.success {
        return Err(ErrorKind::Rejected(response.message).into());
    }
    Ok(response)
}
