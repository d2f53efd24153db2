use serde::Serialize;

use crate::db::models::Subject;

#[derive(Debug, Serialize)]
pub(crate) struct TaughtSubject {
    pub(crate) subject_id: i64,
    pub(crate) name: String,
    pub(crate) semester: i32,
}

impl TaughtSubject {
    pub(crate) fn from_model(subject: Subject) -> Self {
        Self { subject_id: subject.subject_id, name: subject.name, semester: subject.semester }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ProfessorCourses {
    pub(crate) courses: Vec<TaughtSubject>,
}
