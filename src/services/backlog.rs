//! Administrative backlog derivation from prior-semester failing grades.

use crate::repositories::{Datastore, StoreResult};

/// Rebuild the backlog record for (student, semester) from the previous
/// semester's curriculum joined against the student's failing grades. The
/// derived set replaces any stored one; an empty set removes the record.
pub(crate) async fn derive_for_semester(
    store: &Datastore,
    reg_no: &str,
    semester: i32,
) -> StoreResult<Vec<i64>> {
    let prior_semester = semester - 1;
    let curriculum = store.subjects().list_for_semester(prior_semester).await?;
    let curriculum_ids: Vec<i64> =
        curriculum.iter().map(|subject| subject.subject_id).collect();

    let failed = store.results().failed_subject_ids(reg_no, &curriculum_ids).await?;
    let written = store.backlogs().replace(reg_no, semester, &failed).await?;

    tracing::info!(
        reg_no = %reg_no,
        semester,
        backlog_subjects = written.len(),
        "Backlog record derived"
    );
    Ok(written)
}
