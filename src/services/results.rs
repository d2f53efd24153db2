//! Grade recording and the enrollment/backlog transition it drives.
//!
//! The workflow is a four-step saga. Steps run in order against the remote
//! store and are not transactional as a unit; a failure reports the step it
//! happened in and leaves earlier writes committed (no compensation).

use thiserror::Error;

use crate::db::types::Grade;
use crate::repositories::backlogs::BacklogEdit;
use crate::repositories::enrollments::NewEnrollment;
use crate::repositories::results::ResultUpsert;
use crate::repositories::{Datastore, StoreError};

#[derive(Debug)]
pub(crate) struct GradeEntry<'a> {
    pub(crate) subject_id: i64,
    pub(crate) prof_id: &'a str,
    pub(crate) semester: i32,
    pub(crate) reg_no: &'a str,
    pub(crate) midsem_marks: f64,
    pub(crate) endsem_marks: f64,
    pub(crate) classtest_marks: f64,
    pub(crate) grade: Grade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResultStep {
    Persist,
    FetchCurriculum,
    EnrollmentWrite,
    BacklogWrite,
}

impl ResultStep {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ResultStep::Persist => "persist",
            ResultStep::FetchCurriculum => "fetch-curriculum",
            ResultStep::EnrollmentWrite => "enrollment-write",
            ResultStep::BacklogWrite => "backlog-write",
        }
    }
}

#[derive(Debug, Error)]
#[error("result workflow step '{}' failed: {source}", .step.as_str())]
pub(crate) struct ResultWorkflowError {
    pub(crate) step: ResultStep,
    #[source]
    pub(crate) source: StoreError,
}

fn at(step: ResultStep) -> impl Fn(StoreError) -> ResultWorkflowError {
    move |source| ResultWorkflowError { step, source }
}

/// Record or correct a grade, then keep the following semester's enrollment
/// and backlog records consistent with it.
pub(crate) async fn record_grade(
    store: &Datastore,
    entry: GradeEntry<'_>,
) -> Result<(), ResultWorkflowError> {
    let previous = store
        .results()
        .find_grade(entry.subject_id, entry.reg_no)
        .await
        .map_err(at(ResultStep::Persist))?;
    store
        .results()
        .upsert(ResultUpsert {
            subject_id: entry.subject_id,
            prof_id: entry.prof_id,
            reg_no: entry.reg_no,
            midsem_marks: entry.midsem_marks,
            endsem_marks: entry.endsem_marks,
            classtest_marks: entry.classtest_marks,
            grade: entry.grade,
        })
        .await
        .map_err(at(ResultStep::Persist))?;

    let next_semester = entry.semester + 1;
    let curriculum = store
        .subjects()
        .list_for_semester(next_semester)
        .await
        .map_err(at(ResultStep::FetchCurriculum))?;
    let curriculum_ids: Vec<i64> =
        curriculum.iter().map(|subject| subject.subject_id).collect();

    let outcome = store
        .enrollments()
        .insert_if_absent(NewEnrollment {
            reg_no: entry.reg_no,
            semester: next_semester,
            subject_ids: &curriculum_ids,
        })
        .await
        .map_err(at(ResultStep::EnrollmentWrite))?;
    let enrollment_created = outcome.created();

    let was_fail = previous.map_or(false, Grade::is_fail);
    let backlog = if entry.grade.is_fail() {
        let set = store
            .backlogs()
            .reconcile(entry.reg_no, next_semester, BacklogEdit::Add(entry.subject_id))
            .await
            .map_err(at(ResultStep::BacklogWrite))?;
        Some(set)
    } else if was_fail {
        let set = store
            .backlogs()
            .reconcile(entry.reg_no, next_semester, BacklogEdit::Remove(entry.subject_id))
            .await
            .map_err(at(ResultStep::BacklogWrite))?;
        Some(set)
    } else {
        None
    };

    tracing::info!(
        reg_no = %entry.reg_no,
        subject_id = entry.subject_id,
        grade = entry.grade.as_str(),
        next_semester,
        enrollment_created,
        backlog_touched = backlog.is_some(),
        "Grade recorded"
    );

    Ok(())
}
