//! Class Commands
//!
//! Enrolled-class list and add/drop mutations.

use super::HttpBackend;
use crate::error::Result;
use crate::models::{AddClassRequest, ClassListResponse, DropClassRequest};

pub(super) async fn start(backend: &HttpBackend) -> Result<ClassListResponse> {
    backend.get_json("/updateClasses/start").await
}

pub(super) async fn add_class(backend: &HttpBackend, request: &AddClassRequest<'_>) -> Result<ClassListResponse> {
    backend.post_json("/updateClasses/add", request).await
}

pub(super) async fn drop_class(backend: &HttpBackend, request: &DropClassRequest<'_>) -> Result<ClassListResponse> {
    backend.post_json("/updateClasses/drop", request).await
}
