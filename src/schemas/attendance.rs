use serde::Deserialize;
use validator::Validate;

use crate::db::types::AttendanceStatus;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AttendanceCreate {
    #[validate(length(min = 1, message = "reg_no must not be empty"))]
    pub(crate) reg_no: String,
    pub(crate) subject_id: i64,
    pub(crate) status: AttendanceStatus,
}
