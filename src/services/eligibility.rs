//! Eligible-student query for professors.

use thiserror::Error;

use crate::repositories::{Datastore, StoreError};

#[derive(Debug, Error)]
pub(crate) enum EligibilityError {
    #[error("professor is not assigned to this subject for the semester")]
    NotAssigned,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Students both enrolled in the subject and registered for its exam, scoped
/// to one semester. The requesting professor must hold an assignment record
/// for that subject+semester.
pub(crate) async fn eligible_students(
    store: &Datastore,
    prof_id: &str,
    subject_id: i64,
    semester: i32,
) -> Result<Vec<String>, EligibilityError> {
    if !store.assignments().is_assigned(prof_id, subject_id, semester).await? {
        return Err(EligibilityError::NotAssigned);
    }

    let enrolled = store.enrollments().students_with_subject(subject_id, semester).await?;
    let registered = store.registrations().students_with_subject(subject_id, semester).await?;

    Ok(enrolled.into_iter().filter(|reg_no| registered.contains(reg_no)).collect())
}
