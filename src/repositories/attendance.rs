use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::db::models::AttendanceMark;
use crate::repositories::StoreResult;

/// Attendance marks (`attendance_mark` table), unique per (reg_no, subject).
#[async_trait]
pub(crate) trait AttendanceStore: Send + Sync {
    /// Upsert keyed (reg_no, subject_id); the count overwrites, it does not
    /// accumulate. Every successful write is published to the change feed.
    async fn record(
        &self,
        reg_no: &str,
        subject_id: i64,
        attendance_count: i32,
    ) -> StoreResult<AttendanceMark>;

    /// Subscribe to rows as they are written. Feeds the SSE stream.
    fn changes(&self) -> broadcast::Receiver<AttendanceMark>;
}
