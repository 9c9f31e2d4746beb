//! Sync Controller
//!
//! Keeps the rendered tables in step with the backend. On page-ready the
//! mirror paints first (possibly stale), then fresh backend data repaints
//! and re-saves the mirror. Mutations render only what the backend returns,
//! so a failed request leaves the page exactly as it was.
//!
//! Requests are independent: nothing is queued, coalesced or de-duplicated,
//! and there are no timeouts. Two rapid add/drop clicks produce two
//! requests whose responses render in arrival order, so the last response
//! to resolve wins even when it answers the earlier request.

use std::rc::Rc;

use crate::commands::Backend;
use crate::config::AppConfig;
use crate::error::{ErrorKind, Result};
use crate::grades::{format_grade, parse_grade};
use crate::mirror::{KeyValueStore, Mirror};
use crate::models::{AddClassRequest, ClassListResponse, ClassRecord, DropClassRequest, GradeUpdateRequest};
use crate::renderer::TableRenderer;
use crate::snapshot::CourseCapacitySnapshot;
use crate::tables::{SyncState, TableId, CATALOG_HEADER, CLASSES_HEADER};

pub struct SyncController<B, R, S> {
    backend: Rc<B>,
    renderer: R,
    mirror: Rc<Mirror<S>>,
    config: Rc<AppConfig>,
}

impl<B, R: Clone, S> Clone for SyncController<B, R, S> {
    fn clone(&self) -> Self {
        Self {
            backend: Rc::clone(&self.backend),
            renderer: self.renderer.clone(),
            mirror: Rc::clone(&self.mirror),
            config: Rc::clone(&self.config),
        }
    }
}

impl<B, R, S> SyncController<B, R, S>
where
    B: Backend,
    R: TableRenderer,
    S: KeyValueStore,
{
    pub fn new(backend: B, renderer: R, mirror: Mirror<S>, config: AppConfig) -> Self {
        Self {
            backend: Rc::new(backend),
            renderer,
            mirror: Rc::new(mirror),
            config: Rc::new(config),
        }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[cfg(test)]
    pub fn mirror(&self) -> &Mirror<S> {
        &self.mirror
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // ========================
    // Page load
    // ========================

    /// Paint from the mirror, show the default table, then fetch classes
    /// and catalog concurrently. Each fetch settles on its own.
    pub async fn page_ready(&self) {
        self.restore_from_mirror();
        self.renderer.show_table(self.config.default_table.dom_id());
        let (classes, courses) = futures::join!(self.refresh_classes(), self.refresh_courses());
        log::info!(
            "[SYNC] page ready: classes {}, catalog {}",
            if classes.is_ok() { "fresh" } else { "stale" },
            if courses.is_ok() { "fresh" } else { "stale" }
        );
    }

    /// Paint whatever the mirror holds. Returns whether anything was painted.
    pub fn restore_from_mirror(&self) -> bool {
        let mut painted = false;
        if let Some(snapshot) = self.mirror.load(TableId::UserClasses) {
            self.renderer.render_snapshot(TableId::UserClasses, &snapshot);
            self.renderer.set_sync_state(TableId::UserClasses, SyncState::MirrorPainted);
            painted = true;
        }
        if let Some(cells) = self.mirror.load_capacity() {
            self.restore_capacity(&cells);
            self.renderer.set_sync_state(TableId::CoursesTable, SyncState::MirrorPainted);
            painted = true;
        }
        painted
    }

    fn restore_capacity(&self, cells: &CourseCapacitySnapshot) {
        let restorable: Vec<(&str, &str)> = cells
            .cells()
            .iter()
            .filter_map(|cell| cell.course_id().map(|id| (id, cell.value.as_str())))
            .collect();
        if self.renderer.snapshot(TableId::CoursesTable).is_empty() {
            let rows = restorable
                .iter()
                .map(|(id, value)| vec![id.to_string(), value.to_string()])
                .collect();
            self.renderer.render_rows(TableId::CoursesTable, &CATALOG_HEADER, rows);
        }
        for (id, value) in restorable {
            self.renderer.update_capacity_cell(id, value);
        }
    }

    /// `GET /updateClasses/start` and repaint the classes table
    pub async fn refresh_classes(&self) -> Result<()> {
        let response = self.settle("load your classes", self.backend.start_classes().await)?;
        self.apply_class_list(&response);
        Ok(())
    }

    /// `GET /updateCourses` and repaint the catalog with its capacity cells
    pub async fn refresh_courses(&self) -> Result<()> {
        let response = self.settle("load the course catalog", self.backend.list_courses().await)?;
        let entries = response.entries();
        let rows = entries
            .iter()
            .map(|e| vec![e.course_id.clone(), e.enrollment.clone()])
            .collect();
        self.renderer.render_rows(TableId::CoursesTable, &CATALOG_HEADER, rows);
        self.renderer.clear_capacity_cells();
        for entry in &entries {
            self.renderer.update_capacity_cell(&entry.course_id, &entry.enrollment);
        }
        self.renderer.set_sync_state(TableId::CoursesTable, SyncState::Fresh);
        self.save_capacity();
        Ok(())
    }

    // ========================
    // Mutations
    // ========================

    /// Enroll in `course_id`; see the module docs for ordering
    pub async fn add_class(&self, course_id: &str) -> Result<()> {
        let request = AddClassRequest {
            class_name: course_id,
            grade: &self.config.default_grade,
        };
        let response = self.settle(&format!("add {}", course_id), self.backend.add_class(&request).await)?;
        self.apply_mutation(course_id, &response).await;
        Ok(())
    }

    pub async fn drop_class(&self, course_id: &str) -> Result<()> {
        let request = DropClassRequest { class_name: course_id };
        let response = self.settle(&format!("drop {}", course_id), self.backend.drop_class(&request).await)?;
        self.apply_mutation(course_id, &response).await;
        Ok(())
    }

    async fn apply_mutation(&self, course_id: &str, response: &ClassListResponse) {
        self.apply_class_list(response);
        // The class list stays applied even if the enrollment refresh fails
        let _ = self.refresh_enrollment(course_id).await;
    }

    fn apply_class_list(&self, response: &ClassListResponse) {
        let rows = response.records().iter().map(ClassRecord::cells).collect();
        self.renderer.render_rows(TableId::UserClasses, &CLASSES_HEADER, rows);
        self.renderer.set_sync_state(TableId::UserClasses, SyncState::Fresh);
        self.save(TableId::UserClasses);
    }

    /// `GET /enrollment/:classId` and update that course's capacity cell
    pub async fn refresh_enrollment(&self, course_id: &str) -> Result<()> {
        let response = self.settle(
            &format!("refresh enrollment of {}", course_id),
            self.backend.course_enrollment(course_id).await,
        )?;
        if response.class_id_format != course_id {
            log::debug!("[SYNC] enrollment of {} reported as {}", course_id, response.class_id_format);
        }
        self.renderer.update_capacity_cell(course_id, &response.class_enrollment);
        self.save_capacity();
        Ok(())
    }

    // ========================
    // Mirror
    // ========================

    /// Mirror the currently rendered rows of `table`
    pub fn save(&self, table: TableId) {
        self.mirror.save(table, &self.renderer.snapshot(table));
    }

    pub fn save_capacity(&self) {
        self.mirror.save_capacity(&self.renderer.capacity_snapshot());
    }

    // ========================
    // View switching
    // ========================

    pub fn show_table(&self, id: &str) {
        self.renderer.show_table(id);
    }

    pub fn dismiss_error(&self) {
        self.renderer.clear_error();
    }

    /// Timed dismissal of notice `id`; a newer notice stays up
    pub fn expire_error(&self, id: u64) {
        self.renderer.expire_error(id);
    }

    // ========================
    // Gradebook
    // ========================

    /// Fetch a class roster into the gradebook table
    pub async fn load_roster(&self, class_name: &str) -> Result<()> {
        let class_name = class_name.trim();
        if class_name.is_empty() {
            return self.settle(
                "load the roster",
                Err(ErrorKind::Validation("class name is empty".to_string()).into()),
            );
        }
        let response = self.settle(
            &format!("load the roster of {}", class_name),
            self.backend.class_roster(class_name).await,
        )?;
        let students = response
            .students
            .into_iter()
            .map(|s| (s.name, s.grade))
            .collect();
        self.renderer.set_roster(&response.class_name, students);
        self.renderer.set_sync_state(TableId::Gradebook, SyncState::Fresh);
        Ok(())
    }

    pub fn begin_grade_edit(&self, student: &str) {
        self.renderer.begin_grade_edit(student);
    }

    pub fn cancel_grade_edit(&self, student: &str) {
        self.renderer.cancel_grade_edit(student);
    }

    /// Validate locally, then send. The cell leaves edit mode only once the
    /// backend accepts the grade.
    pub async fn submit_grade(&self, class_name: &str, student: &str, raw: &str) -> Result<()> {
        let grade = self.settle(&format!("update the grade of {}", student), parse_grade(raw))?;
        let request = GradeUpdateRequest { new_grade: grade };
        self.settle(
            &format!("update the grade of {}", student),
            self.backend.update_grade(class_name, student, &request).await,
        )?;
        self.renderer.commit_grade(student, &format_grade(grade));
        log::info!("[SYNC] grade of {} in {} set to {}", student, class_name, grade);
        Ok(())
    }

    /// Log and surface a failure; the rendered state is left untouched
    fn settle<T>(&self, action: &str, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            match e.kind() {
                ErrorKind::Validation(_) => log::warn!("[SYNC] {} rejected: {}", action, e),
                _ => log::error!("[SYNC] {} failed: {}", action, e),
            }
            self.renderer.report_error(format!("Could not {}: {}", action, e));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use futures::executor::block_on;

    use crate::capacity::CapacityRule;
    use crate::mirror::{MemoryStorage, CAPACITY_KEY};
    use crate::models::{
        CourseListResponse, EnrollmentResponse, GradeUpdateResponse, RosterEntry, RosterResponse,
    };
    use crate::snapshot::TableSnapshot;
    use crate::tables::RenderedTables;

    #[derive(Clone)]
    struct MemoryRenderer(Rc<RefCell<RenderedTables>>);

    impl TableRenderer for MemoryRenderer {
        fn with_tables<T>(&self, f: impl FnOnce(&RenderedTables) -> T) -> T {
            f(&self.0.borrow())
        }

        fn update_tables<T>(&self, f: impl FnOnce(&mut RenderedTables) -> T) -> T {
            f(&mut self.0.borrow_mut())
        }
    }

    /// Canned backend; `None` answers fail as network errors
    #[derive(Default)]
    struct FakeBackend {
        calls: RefCell<Vec<String>>,
        classes: RefCell<Option<ClassListResponse>>,
        mutation: RefCell<Option<ClassListResponse>>,
        courses: RefCell<Option<CourseListResponse>>,
        enrollment: RefCell<Option<EnrollmentResponse>>,
        roster: RefCell<Option<RosterResponse>>,
        grade_accepted: Cell<bool>,
    }

    impl FakeBackend {
        fn record(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn answer<T: Clone>(slot: &RefCell<Option<T>>) -> Result<T> {
            slot.borrow()
                .clone()
                .ok_or_else(|| ErrorKind::Network("connection refused".to_string()).into())
        }
    }

    impl Backend for FakeBackend {
        async fn start_classes(&self) -> Result<ClassListResponse> {
            self.record("GET /updateClasses/start".to_string());
            Self::answer(&self.classes)
        }

        async fn add_class(&self, request: &AddClassRequest<'_>) -> Result<ClassListResponse> {
            self.record(format!("POST /updateClasses/add {}", serde_json::to_string(request)?));
            Self::answer(&self.mutation)
        }

        async fn drop_class(&self, request: &DropClassRequest<'_>) -> Result<ClassListResponse> {
            self.record(format!("POST /updateClasses/drop {}", serde_json::to_string(request)?));
            Self::answer(&self.mutation)
        }

        async fn list_courses(&self) -> Result<CourseListResponse> {
            self.record("GET /updateCourses".to_string());
            Self::answer(&self.courses)
        }

        async fn course_enrollment(&self, course_id: &str) -> Result<EnrollmentResponse> {
            self.record(format!("GET /enrollment/{}", course_id));
            Self::answer(&self.enrollment)
        }

        async fn class_roster(&self, class_name: &str) -> Result<RosterResponse> {
            self.record(format!("GET /roster/{}", class_name));
            Self::answer(&self.roster)
        }

        async fn update_grade(
            &self,
            class_name: &str,
            student: &str,
            request: &GradeUpdateRequest,
        ) -> Result<GradeUpdateResponse> {
            self.record(format!("POST /update_grade/{}/{} {}", class_name, student, request.new_grade));
            if self.grade_accepted.get() {
                Ok(GradeUpdateResponse { success: true, message: "updated".to_string() })
            } else {
                Err(ErrorKind::Rejected("student not enrolled".to_string()).into())
            }
        }
    }

    type TestController = SyncController<FakeBackend, MemoryRenderer, MemoryStorage>;

    fn controller_with(backend: FakeBackend, storage: MemoryStorage) -> TestController {
        let renderer = MemoryRenderer(Rc::new(RefCell::new(RenderedTables::new(CapacityRule::default()))));
        SyncController::new(backend, renderer, Mirror::new(storage), AppConfig::default())
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn cse101_classes() -> ClassListResponse {
        ClassListResponse {
            classes: vec!["CSE101".to_string()],
            class_professor: map(&[("CSE101", "Dr. X")]),
            class_time: map(&[("CSE101", "MWF 9am")]),
            class_status: map(&[("CSE101", "5/10")]),
        }
    }

    fn catalog(pairs: &[(&str, &str)]) -> CourseListResponse {
        CourseListResponse {
            classes: pairs.iter().map(|(id, _)| id.to_string()).collect(),
            enrollment: map(pairs),
        }
    }

    fn notice(controller: &TestController) -> Option<String> {
        controller.renderer().with_tables(|t| t.notice().map(str::to_string))
    }

    #[test]
    fn test_initial_load_with_empty_mirror() {
        let backend = FakeBackend::default();
        *backend.classes.borrow_mut() = Some(cse101_classes());
        *backend.courses.borrow_mut() = Some(catalog(&[("CSE101", "5/10")]));
        let controller = controller_with(backend, MemoryStorage::default());

        block_on(controller.page_ready());

        assert_eq!(controller.backend().calls(), vec!["GET /updateClasses/start", "GET /updateCourses"]);
        let classes = controller.renderer().snapshot(TableId::UserClasses);
        assert_eq!(classes.header(), Some(&row(&CLASSES_HEADER)[..]));
        assert_eq!(classes.body(), &[row(&["CSE101", "Dr. X", "MWF 9am", "5/10"])]);
        assert_eq!(controller.renderer().sync_state(TableId::UserClasses), SyncState::Fresh);
        assert_eq!(controller.mirror().load(TableId::UserClasses), Some(classes));
        assert_eq!(
            controller.renderer().with_tables(|t| t.visible()),
            Some(TableId::UserClasses)
        );
        assert_eq!(notice(&controller), None);
    }

    #[test]
    fn test_mirror_paints_when_backend_is_down() {
        let storage = MemoryStorage::default();
        let cached = TableSnapshot::new(vec![row(&CLASSES_HEADER), row(&["CSE 108", "Ammon Hepworth", "TR", "4/10"])]);
        Mirror::new(storage.clone()).save(TableId::UserClasses, &cached);
        let controller = controller_with(FakeBackend::default(), storage);

        block_on(controller.page_ready());

        assert_eq!(controller.renderer().snapshot(TableId::UserClasses), cached);
        assert_eq!(controller.renderer().sync_state(TableId::UserClasses), SyncState::MirrorPainted);
        assert!(notice(&controller).unwrap().contains("connection refused"));
    }

    #[test]
    fn test_backend_supersedes_mirror() {
        let storage = MemoryStorage::default();
        let stale = TableSnapshot::new(vec![row(&CLASSES_HEADER), row(&["OLD 1", "", "", ""])]);
        Mirror::new(storage.clone()).save(TableId::UserClasses, &stale);
        let backend = FakeBackend::default();
        *backend.classes.borrow_mut() = Some(cse101_classes());
        let controller = controller_with(backend, storage);

        block_on(controller.page_ready());

        let body = controller.renderer().snapshot(TableId::UserClasses).body().to_vec();
        assert_eq!(body, vec![row(&["CSE101", "Dr. X", "MWF 9am", "5/10"])]);
        assert_eq!(controller.mirror().load(TableId::UserClasses).unwrap().body(), &body[..]);
    }

    #[test]
    fn test_corrupt_mirror_is_ignored() {
        let storage = MemoryStorage::default();
        storage.put_raw("userClassesTable", "{{{");
        let controller = controller_with(FakeBackend::default(), storage);

        assert!(!controller.restore_from_mirror());
        assert!(controller.renderer().snapshot(TableId::UserClasses).is_empty());
    }

    #[test]
    fn test_full_course_renders_label() {
        let backend = FakeBackend::default();
        *backend.courses.borrow_mut() = Some(catalog(&[("CSE 108", "10/10"), ("Math 131", "9/10")]));
        let controller = controller_with(backend, MemoryStorage::default());

        block_on(controller.refresh_courses()).unwrap();

        let tables = controller.renderer();
        assert_eq!(tables.with_tables(|t| t.capacity_text("CSE 108").map(str::to_string)), Some("FULL".to_string()));
        assert_eq!(tables.with_tables(|t| t.capacity_text("Math 131").map(str::to_string)), Some("9/10".to_string()));
        assert_eq!(
            tables.snapshot(TableId::CoursesTable).body(),
            &[row(&["CSE 108", "FULL"]), row(&["Math 131", "9/10"])]
        );
        let saved = controller.mirror().load_capacity().unwrap();
        assert_eq!(saved.cells().len(), 2);
    }

    #[test]
    fn test_capacity_mirror_rebuilds_catalog() {
        let storage = MemoryStorage::default();
        storage.put_raw(CAPACITY_KEY, r#"[{"id":"capacity-CSE 162","value":"FULL"},{"id":"stray","value":"x"}]"#);
        let controller = controller_with(FakeBackend::default(), storage);

        assert!(controller.restore_from_mirror());

        assert_eq!(
            controller.renderer().snapshot(TableId::CoursesTable).body(),
            &[row(&["CSE 162", "FULL"])]
        );
        assert_eq!(controller.renderer().sync_state(TableId::CoursesTable), SyncState::MirrorPainted);
    }

    #[test]
    fn test_fresh_catalog_drops_stale_capacity_cells() {
        let storage = MemoryStorage::default();
        storage.put_raw(CAPACITY_KEY, r#"[{"id":"capacity-Old 100","value":"3/10"}]"#);
        let backend = FakeBackend::default();
        *backend.courses.borrow_mut() = Some(catalog(&[("CSE 108", "4/10")]));
        let controller = controller_with(backend, storage);

        controller.restore_from_mirror();
        block_on(controller.refresh_courses()).unwrap();

        let cells = controller.mirror().load_capacity().unwrap();
        let ids: Vec<&str> = cells.cells().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["capacity-CSE 108"]);
    }

    #[test]
    fn test_add_failure_leaves_page_and_mirror_untouched() {
        let storage = MemoryStorage::default();
        let backend = FakeBackend::default();
        *backend.classes.borrow_mut() = Some(cse101_classes());
        let controller = controller_with(backend, storage.clone());
        block_on(controller.refresh_classes()).unwrap();
        let rendered = controller.renderer().snapshot(TableId::UserClasses);
        let mirrored = storage.raw("userClassesTable");

        let result = block_on(controller.add_class("CSE 108"));

        assert!(matches!(result.unwrap_err().kind(), ErrorKind::Network(_)));
        assert_eq!(controller.renderer().snapshot(TableId::UserClasses), rendered);
        assert_eq!(storage.raw("userClassesTable"), mirrored);
        assert!(notice(&controller).unwrap().starts_with("Could not add CSE 108"));
        assert!(!controller.backend().calls().iter().any(|c| c.starts_with("GET /enrollment")));
    }

    #[test]
    fn test_add_success_repaints_and_refreshes_enrollment() {
        let backend = FakeBackend::default();
        *backend.mutation.borrow_mut() = Some(ClassListResponse {
            classes: vec!["CSE 108".to_string()],
            class_professor: map(&[("CSE 108", "Ammon Hepworth")]),
            class_time: map(&[("CSE 108", "TR 11:00-11:50 AM")]),
            class_status: map(&[("CSE 108", "10/10")]),
        });
        *backend.courses.borrow_mut() = Some(catalog(&[("CSE 108", "9/10")]));
        *backend.enrollment.borrow_mut() = Some(EnrollmentResponse {
            class_id_format: "CSE 108".to_string(),
            class_enrollment: "10/10".to_string(),
        });
        let controller = controller_with(backend, MemoryStorage::default());
        block_on(controller.refresh_courses()).unwrap();

        block_on(controller.add_class("CSE 108")).unwrap();

        let calls = controller.backend().calls();
        assert_eq!(calls[1], r#"POST /updateClasses/add {"class_name":"CSE 108","grade":"N/A"}"#);
        assert_eq!(calls[2], "GET /enrollment/CSE 108");
        assert_eq!(
            controller.renderer().snapshot(TableId::UserClasses).body(),
            &[row(&["CSE 108", "Ammon Hepworth", "TR 11:00-11:50 AM", "10/10"])]
        );
        assert_eq!(
            controller.renderer().snapshot(TableId::CoursesTable).body(),
            &[row(&["CSE 108", "FULL"])]
        );
        let saved = controller.mirror().load_capacity().unwrap();
        assert_eq!(saved.cells()[0].value, "FULL");
        assert!(controller.mirror().load(TableId::UserClasses).is_some());
    }

    #[test]
    fn test_enrollment_updates_requested_course_when_backend_reformats_id() {
        let backend = FakeBackend::default();
        *backend.mutation.borrow_mut() = Some(ClassListResponse::default());
        *backend.courses.borrow_mut() = Some(catalog(&[("CSE 108", "9/10")]));
        *backend.enrollment.borrow_mut() = Some(EnrollmentResponse {
            class_id_format: "CSE108".to_string(),
            class_enrollment: "10/10".to_string(),
        });
        let controller = controller_with(backend, MemoryStorage::default());
        block_on(controller.refresh_courses()).unwrap();

        block_on(controller.add_class("CSE 108")).unwrap();

        assert_eq!(
            controller.renderer().snapshot(TableId::CoursesTable).body(),
            &[row(&["CSE 108", "FULL"])]
        );
        let cells = controller.renderer().capacity_snapshot();
        let ids: Vec<&str> = cells.cells().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["capacity-CSE 108"]);
        let saved = controller.mirror().load_capacity().unwrap();
        assert_eq!(saved, cells);
    }

    #[test]
    fn test_drop_keeps_class_list_when_enrollment_fails() {
        let backend = FakeBackend::default();
        *backend.mutation.borrow_mut() = Some(ClassListResponse::default());
        let controller = controller_with(backend, MemoryStorage::default());

        block_on(controller.drop_class("Math 131")).unwrap();

        assert_eq!(
            controller.backend().calls(),
            vec![r#"POST /updateClasses/drop {"class_name":"Math 131"}"#, "GET /enrollment/Math 131"]
        );
        let classes = controller.renderer().snapshot(TableId::UserClasses);
        assert!(classes.body().is_empty());
        assert_eq!(controller.mirror().load(TableId::UserClasses), Some(classes));
        assert!(notice(&controller).is_some());
    }

    fn roster_controller(grade_accepted: bool) -> TestController {
        let backend = FakeBackend::default();
        *backend.roster.borrow_mut() = Some(RosterResponse {
            class_name: "CSE 108".to_string(),
            students: vec![RosterEntry { name: "amy".to_string(), grade: "80".to_string() }],
        });
        backend.grade_accepted.set(grade_accepted);
        let controller = controller_with(backend, MemoryStorage::default());
        block_on(controller.load_roster("CSE 108")).unwrap();
        controller
    }

    fn grade_posts(controller: &TestController) -> usize {
        controller
            .backend()
            .calls()
            .iter()
            .filter(|c| c.starts_with("POST /update_grade"))
            .count()
    }

    #[test]
    fn test_invalid_grades_never_reach_backend() {
        let controller = roster_controller(true);
        controller.begin_grade_edit("amy");

        for raw in ["-1", "101", "abc"] {
            let err = block_on(controller.submit_grade("CSE 108", "amy", raw)).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::Validation(_)));
        }

        assert_eq!(grade_posts(&controller), 0);
        assert!(controller.renderer().with_tables(|t| t.grade_cell("amy").unwrap().editing));
    }

    #[test]
    fn test_valid_grades_send_one_request_each() {
        let controller = roster_controller(true);

        for (sent, raw) in ["0", "57.5", "100"].into_iter().enumerate() {
            controller.begin_grade_edit("amy");
            block_on(controller.submit_grade("CSE 108", "amy", raw)).unwrap();
            assert_eq!(grade_posts(&controller), sent + 1);
        }

        let cell = controller.renderer().with_tables(|t| t.grade_cell("amy").cloned()).unwrap();
        assert_eq!(cell.grade, "100");
        assert!(!cell.editing);
    }

    #[test]
    fn test_rejected_grade_stays_in_edit_mode() {
        let controller = roster_controller(false);
        controller.begin_grade_edit("amy");

        let err = block_on(controller.submit_grade("CSE 108", "amy", "90")).unwrap_err();

        assert!(matches!(err.kind(), ErrorKind::Rejected(_)));
        let cell = controller.renderer().with_tables(|t| t.grade_cell("amy").cloned()).unwrap();
        assert!(cell.editing);
        assert_eq!(cell.grade, "80");
    }

    #[test]
    fn test_empty_roster_name_is_rejected_locally() {
        let controller = controller_with(FakeBackend::default(), MemoryStorage::default());
        assert!(block_on(controller.load_roster("  ")).is_err());
        assert!(controller.backend().calls().is_empty());
    }
}
