use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::db::models::Exam;
use crate::repositories::exams::{ExamChanges, NewExam};
use crate::repositories::InsertOutcome;
use crate::schemas::exam::{ExamCreate, ExamEnvelope, ExamUpdate};
use crate::schemas::{DataResponse, MessageResponse};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_exams).post(create_exam))
        .route("/:exam_id", get(get_exam).put(update_exam).delete(delete_exam))
}

async fn create_exam(
    State(state): State<AppState>,
    Json(payload): Json<ExamCreate>,
) -> Result<(StatusCode, Json<ExamEnvelope>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let listed = state
        .store()
        .subjects()
        .exists(payload.subject_id, payload.semester)
        .await
        .map_err(ApiError::from)?;
    if !listed {
        return Err(ApiError::NotFound(
            "Subject not found for the given semester".to_string(),
        ));
    }

    let outcome = state
        .store()
        .exams()
        .insert_if_absent(NewExam {
            subject_id: payload.subject_id,
            prof_id: &payload.prof_id,
            exam_type: payload.exam_type,
            semester: payload.semester,
            max_marks: payload.max_marks,
            exam_date: &payload.exam_date,
        })
        .await
        .map_err(ApiError::from)?;

    match outcome {
        InsertOutcome::Created(exam) => {
            tracing::info!(
                exam_id = exam.id,
                subject_id = exam.subject_id,
                exam_type = %exam.exam_type.as_str(),
                semester = exam.semester,
                "Exam created"
            );
            Ok((
                StatusCode::CREATED,
                Json(ExamEnvelope { message: "Exam created".to_string(), data: exam }),
            ))
        }
        InsertOutcome::AlreadyExists => {
            Err(ApiError::BadRequest("Exam already exists".to_string()))
        }
    }
}

async fn list_exams(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Exam>>>, ApiError> {
    let exams = state.store().exams().list().await.map_err(ApiError::from)?;
    Ok(Json(DataResponse { data: exams }))
}

async fn get_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<i64>,
) -> Result<Json<DataResponse<Exam>>, ApiError> {
    let exam = state
        .store()
        .exams()
        .find(exam_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound("Exam not found".to_string()))?;
    Ok(Json(DataResponse { data: exam }))
}

async fn update_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<i64>,
    Json(payload): Json<ExamUpdate>,
) -> Result<Json<ExamEnvelope>, ApiError> {
    if payload.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let exam = state
        .store()
        .exams()
        .update(
            exam_id,
            ExamChanges {
                prof_id: payload.prof_id,
                exam_type: payload.exam_type,
                max_marks: payload.max_marks,
                exam_date: payload.exam_date,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ExamEnvelope { message: "Exam updated".to_string(), data: exam }))
}

async fn delete_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store().exams().delete(exam_id).await.map_err(ApiError::from)?;
    Ok(Json(MessageResponse { message: "Exam deleted".to_string() }))
}

#[cfg(test)]
mod tests;
