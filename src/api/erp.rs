use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::db::types::RegistrationStatus;
use crate::repositories::registrations::RegistrationFilter;
use crate::schemas::erp::{
    ErpQuery, RegistrationCreate, RegistrationCreated, RegistrationView, RegistrationsDeleted,
    StatusUpdate, StatusUpdated, SubjectEditRequest, SubjectEditResponse,
};
use crate::schemas::{DataResponse, MessageResponse};
use crate::services::registration::{self, ListEdit, RegistrationError, SubjectEdits};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_registrations).post(submit_registration).delete(delete_all))
        .route(
            "/:id",
            get(get_registration).put(modify_subjects).delete(delete_registration),
        )
        .route("/:id/status", put(update_status))
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::MissingEnrollment { reg_no, semester } => ApiError::NotFound(
                format!("No enrollment record found for {reg_no} in semester {semester}"),
            ),
            RegistrationError::ElectivesWithBacklog => ApiError::BadRequest(
                "Backlog detected: Electives cannot be selected for this semester".to_string(),
            ),
            RegistrationError::AlreadyRegistered => ApiError::BadRequest(
                "You have already registered for this semester.".to_string(),
            ),
            RegistrationError::Store(err) => ApiError::from(err),
        }
    }
}

async fn submit_registration(
    State(state): State<AppState>,
    Json(payload): Json<RegistrationCreate>,
) -> Result<(StatusCode, Json<RegistrationCreated>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let created = registration::submit(
        state.store(),
        registration::RegistrationRequest {
            reg_no: &payload.reg_no,
            semester: payload.semester,
            subjects: payload.subjects.as_deref(),
            elective_subjects: &payload.elective_subjects,
            backlog_subjects: &payload.backlog_subjects,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationCreated {
            message: "Exam registration successful".to_string(),
            registered_subjects: created.subjects,
            backlog_subjects: created.backlog_subjects,
            elective_subjects: created.elective_subjects,
            registration_date: created.registration_date,
            semester: created.semester,
        }),
    ))
}

async fn list_registrations(
    State(state): State<AppState>,
    Query(query): Query<ErpQuery>,
) -> Result<Json<DataResponse<Vec<RegistrationView>>>, ApiError> {
    let registrations = state
        .store()
        .registrations()
        .search(RegistrationFilter {
            reg_no: query.reg_no.as_deref(),
            semester: query.semester,
        })
        .await
        .map_err(ApiError::from)?;

    let views = registrations.into_iter().map(RegistrationView::from_model).collect();
    Ok(Json(DataResponse { data: views }))
}

async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DataResponse<RegistrationView>>, ApiError> {
    let registration = state
        .store()
        .registrations()
        .find(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;
    Ok(Json(DataResponse { data: RegistrationView::from_model(registration) }))
}

async fn modify_subjects(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<SubjectEditRequest>,
) -> Result<Json<SubjectEditResponse>, ApiError> {
    let updated = registration::modify_subjects(
        state.store(),
        id,
        SubjectEdits {
            subjects: ListEdit { add: payload.add_subjects, remove: payload.remove_subjects },
            electives: ListEdit { add: payload.add_electives, remove: payload.remove_electives },
            backlogs: ListEdit { add: payload.add_backlog, remove: payload.remove_backlog },
        },
    )
    .await?;

    Ok(Json(SubjectEditResponse {
        message: "Subjects updated successfully".to_string(),
        updated_registration: RegistrationView::from_model(updated),
    }))
}

async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<StatusUpdated>, ApiError> {
    let status = match payload.status.as_str() {
        "Registered" => RegistrationStatus::Registered,
        "Not Registered" => RegistrationStatus::NotRegistered,
        _ => return Err(ApiError::BadRequest("Invalid status value".to_string())),
    };

    let updated =
        state.store().registrations().set_status(id, status).await.map_err(ApiError::from)?;

    Ok(Json(StatusUpdated {
        message: "Status updated successfully".to_string(),
        data: RegistrationView::from_model(updated),
    }))
}

async fn delete_registration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store().registrations().delete(id).await.map_err(ApiError::from)?;
    Ok(Json(MessageResponse { message: "Registration deleted successfully".to_string() }))
}

async fn delete_all(
    State(state): State<AppState>,
) -> Result<Json<RegistrationsDeleted>, ApiError> {
    let deleted = state.store().registrations().delete_all().await.map_err(ApiError::from)?;

    tracing::info!(deleted, "All exam registrations deleted");
    Ok(Json(RegistrationsDeleted {
        message: "All exam registrations deleted successfully".to_string(),
        deleted,
    }))
}
