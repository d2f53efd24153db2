use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::db::models::ExamResult;
use crate::repositories::results::ResultFilter;
use crate::schemas::result::{
    GradeAssign, ResultsQuery, StudentResultsQuery, SubjectGradeRow, SubjectGradesQuery,
};
use crate::schemas::{DataResponse, MessageResponse};
use crate::services::results::{record_grade, GradeEntry};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/assign-grade", post(assign_grade))
        .route("/updateResult", put(update_result))
        .route("/studentResults", get(student_results))
        .route("/exam-results", get(exam_results))
        .route("/subject-grades", get(subject_grades))
        .route("/results/:subject_id/:reg_no", delete(delete_result))
}

async fn assign_grade(
    State(state): State<AppState>,
    Json(payload): Json<GradeAssign>,
) -> Result<Json<MessageResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    record_grade(state.store(), grade_entry(&payload))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(MessageResponse {
        message: "Exam result and updates saved successfully.".to_string(),
    }))
}

/// Same saga as grade assignment, but refuses to create a result that does
/// not already exist.
async fn update_result(
    State(state): State<AppState>,
    Json(payload): Json<GradeAssign>,
) -> Result<Json<MessageResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let existing = state
        .store()
        .results()
        .find_grade(payload.subject_id, &payload.reg_no)
        .await
        .map_err(ApiError::from)?;
    if existing.is_none() {
        return Err(ApiError::NotFound("Result not found".to_string()));
    }

    record_grade(state.store(), grade_entry(&payload))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(MessageResponse {
        message: "Exam result and backlog updated successfully.".to_string(),
    }))
}

fn grade_entry(payload: &GradeAssign) -> GradeEntry<'_> {
    GradeEntry {
        subject_id: payload.subject_id,
        prof_id: &payload.prof_id,
        semester: payload.semester,
        reg_no: &payload.reg_no,
        midsem_marks: payload.midsem_marks,
        endsem_marks: payload.endsem_marks,
        classtest_marks: payload.classtest_marks,
        grade: payload.grade,
    }
}

/// A student's results for one semester, restricted to that semester's
/// curriculum.
async fn student_results(
    State(state): State<AppState>,
    Query(query): Query<StudentResultsQuery>,
) -> Result<Json<DataResponse<Vec<ExamResult>>>, ApiError> {
    let curriculum = state
        .store()
        .subjects()
        .list_for_semester(query.semester)
        .await
        .map_err(ApiError::from)?;
    let subject_ids: Vec<i64> = curriculum.iter().map(|subject| subject.subject_id).collect();

    let results = state
        .store()
        .results()
        .list_for_student_in(&query.reg_no, &subject_ids)
        .await
        .map_err(ApiError::from)?;
    Ok(Json(DataResponse { data: results }))
}

async fn exam_results(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<DataResponse<Vec<ExamResult>>>, ApiError> {
    let results = state
        .store()
        .results()
        .list(ResultFilter { reg_no: query.reg_no.as_deref(), subject_id: query.subject_id })
        .await
        .map_err(ApiError::from)?;
    Ok(Json(DataResponse { data: results }))
}

async fn subject_grades(
    State(state): State<AppState>,
    Query(query): Query<SubjectGradesQuery>,
) -> Result<Json<DataResponse<Vec<SubjectGradeRow>>>, ApiError> {
    let results = state
        .store()
        .results()
        .list(ResultFilter { reg_no: None, subject_id: Some(query.subject_id) })
        .await
        .map_err(ApiError::from)?;

    let grades = results
        .into_iter()
        .map(|result| SubjectGradeRow { reg_no: result.reg_no, grade: result.grade })
        .collect();
    Ok(Json(DataResponse { data: grades }))
}

async fn delete_result(
    State(state): State<AppState>,
    Path((subject_id, reg_no)): Path<(i64, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store().results().delete(subject_id, &reg_no).await.map_err(ApiError::from)?;
    Ok(Json(MessageResponse { message: "Result deleted".to_string() }))
}
