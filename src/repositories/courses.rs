use async_trait::async_trait;

use crate::db::models::Course;
use crate::repositories::StoreResult;

pub(crate) struct NewCourse<'a> {
    pub(crate) name: &'a str,
    pub(crate) description: Option<&'a str>,
}

pub(crate) struct CourseChanges {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
}

#[async_trait]
pub(crate) trait CourseStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Course>>;

    async fn create(&self, course: NewCourse<'_>) -> StoreResult<Course>;

    /// Partial update; unset fields keep their stored values. `NotFound` when
    /// the id does not exist.
    async fn update(&self, id: i64, changes: CourseChanges) -> StoreResult<Course>;

    async fn delete(&self, id: i64) -> StoreResult<()>;
}
