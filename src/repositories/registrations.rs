use async_trait::async_trait;

use crate::db::models::ExamRegistration;
use crate::db::types::RegistrationStatus;
use crate::repositories::{InsertOutcome, StoreResult};

pub(crate) struct NewRegistration<'a> {
    pub(crate) reg_no: &'a str,
    pub(crate) semester: i32,
    pub(crate) subjects: &'a [i64],
    pub(crate) elective_subjects: &'a [i64],
    pub(crate) backlog_subjects: &'a [i64],
    pub(crate) registration_date: &'a str,
    pub(crate) status: RegistrationStatus,
}

#[derive(Default)]
pub(crate) struct RegistrationFilter<'a> {
    pub(crate) reg_no: Option<&'a str>,
    pub(crate) semester: Option<i32>,
}

pub(crate) struct SubjectLists {
    pub(crate) subjects: Vec<i64>,
    pub(crate) elective_subjects: Vec<i64>,
    pub(crate) backlog_subjects: Vec<i64>,
}

/// Exam registrations (`exam_registrations` table), unique per
/// (reg_no, semester); registration_date is immutable once written.
#[async_trait]
pub(crate) trait RegistrationStore: Send + Sync {
    /// Atomic conditional insert against the (reg_no, semester) uniqueness
    /// constraint; a duplicate submission creates nothing.
    async fn insert_if_absent(
        &self,
        registration: NewRegistration<'_>,
    ) -> StoreResult<InsertOutcome<ExamRegistration>>;

    async fn find(&self, id: i64) -> StoreResult<Option<ExamRegistration>>;

    async fn find_for_student(
        &self,
        reg_no: &str,
        semester: i32,
    ) -> StoreResult<Option<ExamRegistration>>;

    /// Newest first.
    async fn search(&self, filter: RegistrationFilter<'_>) -> StoreResult<Vec<ExamRegistration>>;

    async fn set_subject_lists(
        &self,
        id: i64,
        lists: SubjectLists,
    ) -> StoreResult<ExamRegistration>;

    async fn set_status(
        &self,
        id: i64,
        status: RegistrationStatus,
    ) -> StoreResult<ExamRegistration>;

    async fn delete(&self, id: i64) -> StoreResult<()>;

    /// Administrative reset; returns how many records were removed.
    async fn delete_all(&self) -> StoreResult<u64>;

    /// Registration numbers of students whose registered subject list includes
    /// the subject, scoped to the semester.
    async fn students_with_subject(
        &self,
        subject_id: i64,
        semester: i32,
    ) -> StoreResult<Vec<String>>;
}
