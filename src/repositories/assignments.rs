use async_trait::async_trait;

use crate::db::models::ProfessorCourse;
use crate::repositories::StoreResult;

pub(crate) struct NewAssignment<'a> {
    pub(crate) prof_id: &'a str,
    pub(crate) subject_id: i64,
    pub(crate) semester: i32,
}

pub(crate) struct AssignmentChanges {
    pub(crate) prof_id: Option<String>,
    pub(crate) subject_id: Option<i64>,
    pub(crate) semester: Option<i32>,
}

/// Professor-to-subject teaching assignments (`professor_course` table).
#[async_trait]
pub(crate) trait AssignmentStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<ProfessorCourse>>;

    async fn create(&self, assignment: NewAssignment<'_>) -> StoreResult<ProfessorCourse>;

    async fn update(&self, id: i64, changes: AssignmentChanges) -> StoreResult<ProfessorCourse>;

    async fn delete(&self, id: i64) -> StoreResult<()>;

    async fn subject_ids_for_professor(&self, prof_id: &str) -> StoreResult<Vec<i64>>;

    /// Authorization check: does an assignment record link this professor to
    /// this subject in this semester?
    async fn is_assigned(&self, prof_id: &str, subject_id: i64, semester: i32)
        -> StoreResult<bool>;
}
