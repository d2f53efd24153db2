//! Exam registration: submission and incremental subject-list edits.

use thiserror::Error;

use crate::core::time::now_rfc3339;
use crate::db::models::ExamRegistration;
use crate::db::types::RegistrationStatus;
use crate::repositories::registrations::{NewRegistration, SubjectLists};
use crate::repositories::{Datastore, InsertOutcome, StoreError};
use crate::services::subject_sets;

#[derive(Debug)]
pub(crate) struct RegistrationRequest<'a> {
    pub(crate) reg_no: &'a str,
    pub(crate) semester: i32,
    /// Explicit subject list; `None` derives it from the enrollment record.
    pub(crate) subjects: Option<&'a [i64]>,
    pub(crate) elective_subjects: &'a [i64],
    pub(crate) backlog_subjects: &'a [i64],
}

#[derive(Debug, Error)]
pub(crate) enum RegistrationError {
    #[error("no enrollment record for {reg_no} in semester {semester}")]
    MissingEnrollment { reg_no: String, semester: i32 },
    #[error("electives cannot be selected while backlog subjects are outstanding")]
    ElectivesWithBacklog,
    #[error("student is already registered for this semester")]
    AlreadyRegistered,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Submit a registration. The effective backlog set is the submitted list
/// unioned with the stored backlog record, so outstanding backlogs count even
/// when the client does not echo them. Electives and a non-empty backlog set
/// are mutually exclusive; rejected submissions write nothing.
pub(crate) async fn submit(
    store: &Datastore,
    request: RegistrationRequest<'_>,
) -> Result<ExamRegistration, RegistrationError> {
    let enrolled: Vec<i64> = match request.subjects {
        Some(subjects) => subjects.to_vec(),
        None => store
            .enrollments()
            .find(request.reg_no, request.semester)
            .await?
            .ok_or_else(|| RegistrationError::MissingEnrollment {
                reg_no: request.reg_no.to_string(),
                semester: request.semester,
            })?
            .subject_ids,
    };

    let stored_backlog = store
        .backlogs()
        .find(request.reg_no, request.semester)
        .await?
        .map(|record| record.subject_ids)
        .unwrap_or_default();
    let backlog = subject_sets::union_dedup(request.backlog_subjects, &stored_backlog);

    if !backlog.is_empty() && !request.elective_subjects.is_empty() {
        return Err(RegistrationError::ElectivesWithBacklog);
    }

    let subjects = subject_sets::union_dedup(
        &subject_sets::union_dedup(&enrolled, request.elective_subjects),
        &backlog,
    );

    let outcome = store
        .registrations()
        .insert_if_absent(NewRegistration {
            reg_no: request.reg_no,
            semester: request.semester,
            subjects: &subjects,
            elective_subjects: request.elective_subjects,
            backlog_subjects: &backlog,
            registration_date: &now_rfc3339(),
            status: RegistrationStatus::Registered,
        })
        .await?;

    match outcome {
        InsertOutcome::Created(created) => {
            tracing::info!(
                reg_no = %created.reg_no,
                semester = created.semester,
                subjects = created.subjects.len(),
                backlogs = created.backlog_subjects.len(),
                "Exam registration created"
            );
            Ok(created)
        }
        InsertOutcome::AlreadyExists => Err(RegistrationError::AlreadyRegistered),
    }
}

#[derive(Debug, Default)]
pub(crate) struct ListEdit {
    pub(crate) add: Vec<i64>,
    pub(crate) remove: Vec<i64>,
}

#[derive(Debug, Default)]
pub(crate) struct SubjectEdits {
    pub(crate) subjects: ListEdit,
    pub(crate) electives: ListEdit,
    pub(crate) backlogs: ListEdit,
}

/// Apply add/remove edits to the three subject lists of an existing
/// registration. Removal always wins over addition within one edit.
pub(crate) async fn modify_subjects(
    store: &Datastore,
    id: i64,
    edits: SubjectEdits,
) -> Result<ExamRegistration, RegistrationError> {
    let registration =
        store.registrations().find(id).await?.ok_or(StoreError::NotFound("Registration"))?;

    let lists = SubjectLists {
        subjects: subject_sets::apply_edit(
            &registration.subjects,
            &edits.subjects.add,
            &edits.subjects.remove,
        ),
        elective_subjects: subject_sets::apply_edit(
            &registration.elective_subjects,
            &edits.electives.add,
            &edits.electives.remove,
        ),
        backlog_subjects: subject_sets::apply_edit(
            &registration.backlog_subjects,
            &edits.backlogs.add,
            &edits.backlogs.remove,
        ),
    };

    Ok(store.registrations().set_subject_lists(id, lists).await?)
}
