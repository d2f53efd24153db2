use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::date_only;
use crate::db::models::ExamRegistration;
use crate::db::types::RegistrationStatus;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct RegistrationCreate {
    #[validate(length(min = 1, message = "reg_no must not be empty"))]
    pub(crate) reg_no: String,
    #[validate(range(min = 1, message = "semester must be positive"))]
    pub(crate) semester: i32,
    /// Omitted entirely means "derive from the enrollment record".
    #[serde(default)]
    pub(crate) subjects: Option<Vec<i64>>,
    #[serde(default)]
    pub(crate) elective_subjects: Vec<i64>,
    #[serde(default)]
    pub(crate) backlog_subjects: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegistrationCreated {
    pub(crate) message: String,
    pub(crate) registered_subjects: Vec<i64>,
    pub(crate) backlog_subjects: Vec<i64>,
    pub(crate) elective_subjects: Vec<i64>,
    pub(crate) registration_date: String,
    pub(crate) semester: i32,
}

/// Stored registration shaped for list/detail reads; the timestamp is cut to
/// its calendar date.
#[derive(Debug, Serialize)]
pub(crate) struct RegistrationView {
    pub(crate) id: i64,
    pub(crate) reg_no: String,
    pub(crate) semester: i32,
    pub(crate) subjects: Vec<i64>,
    pub(crate) elective_subjects: Vec<i64>,
    pub(crate) backlog_subjects: Vec<i64>,
    pub(crate) registration_date: String,
    pub(crate) status: RegistrationStatus,
}

impl RegistrationView {
    pub(crate) fn from_model(registration: ExamRegistration) -> Self {
        Self {
            id: registration.id,
            reg_no: registration.reg_no,
            semester: registration.semester,
            subjects: registration.subjects,
            elective_subjects: registration.elective_subjects,
            backlog_subjects: registration.backlog_subjects,
            registration_date: date_only(&registration.registration_date),
            status: registration.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErpQuery {
    #[serde(default)]
    pub(crate) reg_no: Option<String>,
    #[serde(default)]
    pub(crate) semester: Option<i32>,
}

/// Incremental add/remove edits, one pair of lists per stored subject list.
#[derive(Debug, Deserialize)]
pub(crate) struct SubjectEditRequest {
    #[serde(default)]
    pub(crate) add_backlog: Vec<i64>,
    #[serde(default)]
    pub(crate) remove_backlog: Vec<i64>,
    #[serde(default)]
    pub(crate) add_subjects: Vec<i64>,
    #[serde(default)]
    pub(crate) remove_subjects: Vec<i64>,
    #[serde(default)]
    pub(crate) add_electives: Vec<i64>,
    #[serde(default)]
    pub(crate) remove_electives: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubjectEditResponse {
    pub(crate) message: String,
    pub(crate) updated_registration: RegistrationView,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdate {
    pub(crate) status: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusUpdated {
    pub(crate) message: String,
    pub(crate) data: RegistrationView,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegistrationsDeleted {
    pub(crate) message: String,
    pub(crate) deleted: u64,
}
