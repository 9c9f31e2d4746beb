//! Backend Command Wrappers
//!
//! Frontend bindings to the enrollment backend's HTTP endpoints. The
//! controller only sees the `Backend` trait; `HttpBackend` is the browser
//! fetch implementation.

mod classes;
mod courses;
mod grades;

use gloo_net::http::{Request, RequestBuilder, Response};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::{RequestCredentials, RequestMode};

use crate::error::{Error, ErrorKind, Result};
use crate::models::{
    AddClassRequest, ClassListResponse, CourseListResponse, DropClassRequest, EnrollmentResponse, ErrorBody,
    GradeUpdateRequest, GradeUpdateResponse, RosterResponse,
};

/// Characters escaped inside one URL path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Longest body excerpt carried in a status error
const BODY_EXCERPT_CHARS: usize = 200;

/// One async call per backend endpoint
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// `GET /updateClasses/start`
    async fn start_classes(&self) -> Result<ClassListResponse>;
    /// `POST /updateClasses/add`
    async fn add_class(&self, request: &AddClassRequest<'_>) -> Result<ClassListResponse>;
    /// `POST /updateClasses/drop`
    async fn drop_class(&self, request: &DropClassRequest<'_>) -> Result<ClassListResponse>;
    /// `GET /updateCourses`
    async fn list_courses(&self) -> Result<CourseListResponse>;
    /// `GET /enrollment/:classId`
    async fn course_enrollment(&self, course_id: &str) -> Result<EnrollmentResponse>;
    /// `GET /roster/:className`
    async fn class_roster(&self, class_name: &str) -> Result<RosterResponse>;
    /// `POST /update_grade/:className/:studentName`
    async fn update_grade(
        &self,
        class_name: &str,
        student: &str,
        request: &GradeUpdateRequest,
    ) -> Result<GradeUpdateResponse>;
}

/// Backend reached with the browser's fetch API
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base: String,
}

impl HttpBackend {
    pub fn new(api_base: &str) -> Self {
        Self {
            base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn builder(request: RequestBuilder) -> RequestBuilder {
        request
            .mode(RequestMode::Cors)
            .credentials(RequestCredentials::Include)
            .header("Accept", "application/json")
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        log::debug!("[HTTP] GET {}", url);
        let response = Self::builder(Request::get(&url)).send().await?;
        decode(response).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        log::debug!("[HTTP] POST {}", url);
        let response = Self::builder(Request::post(&url)).json(body)?.send().await?;
        decode(response).await
    }
}

impl Backend for HttpBackend {
    async fn start_classes(&self) -> Result<ClassListResponse> {
        classes::start(self).await
    }

    async fn add_class(&self, request: &AddClassRequest<'_>) -> Result<ClassListResponse> {
        classes::add_class(self, request).await
    }

    async fn drop_class(&self, request: &DropClassRequest<'_>) -> Result<ClassListResponse> {
        classes::drop_class(self, request).await
    }

    async fn list_courses(&self) -> Result<CourseListResponse> {
        courses::list(self).await
    }

    async fn course_enrollment(&self, course_id: &str) -> Result<EnrollmentResponse> {
        courses::enrollment(self, course_id).await
    }

    async fn class_roster(&self, class_name: &str) -> Result<RosterResponse> {
        grades::roster(self, class_name).await
    }

    async fn update_grade(
        &self,
        class_name: &str,
        student: &str,
        request: &GradeUpdateRequest,
    ) -> Result<GradeUpdateResponse> {
        grades::update(self, class_name, student, request).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let code = response.status();
    let body = response.text().await?;
    if !response.ok() {
        return Err(status_error(code, &body));
    }
    Ok(serde_json::from_str(&body)?)
}

/// Status error carrying the backend's `{"error": ...}` message when present
pub(crate) fn status_error(code: u16, body: &str) -> Error {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => body.chars().take(BODY_EXCERPT_CHARS).collect(),
    };
    ErrorKind::Status { code, message }.into()
}

/// Percent-encode one path segment (`"Physics 121"` -> `"Physics%20121"`)
pub(crate) fn segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}
