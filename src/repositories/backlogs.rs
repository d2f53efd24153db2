use async_trait::async_trait;

use crate::db::models::BacklogRecord;
use crate::repositories::StoreResult;

/// One incremental change to a backlog subject set.
#[derive(Debug, Clone, Copy)]
pub(crate) enum BacklogEdit {
    Add(i64),
    Remove(i64),
}

/// Failed-subject sets per (reg_no, semester) (`backlog` table).
///
/// The record's lifecycle is owned by the store: a set that becomes empty
/// deletes the record, an Add against a missing record creates it. Callers
/// express intent, never read-modify-write.
#[async_trait]
pub(crate) trait BacklogStore: Send + Sync {
    async fn find(&self, reg_no: &str, semester: i32) -> StoreResult<Option<BacklogRecord>>;

    /// Set-reconcile one subject in or out. Add unions (deduplicated); Remove
    /// drops the subject and deletes the record if the set empties. Returns
    /// the resulting subject set (empty means the record is gone).
    async fn reconcile(
        &self,
        reg_no: &str,
        semester: i32,
        edit: BacklogEdit,
    ) -> StoreResult<Vec<i64>>;

    /// Replace the whole subject set. An empty set removes the record.
    async fn replace(
        &self,
        reg_no: &str,
        semester: i32,
        subject_ids: &[i64],
    ) -> StoreResult<Vec<i64>>;
}
