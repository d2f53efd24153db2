use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::db::models::{Course, ProfessorCourse, StudentCourse};
use crate::repositories::assignments::{AssignmentChanges, NewAssignment};
use crate::repositories::courses::{CourseChanges, NewCourse};
use crate::repositories::enrollments::NewEnrollment;
use crate::repositories::InsertOutcome;
use crate::schemas::admin::{
    AssignmentCreate, AssignmentUpdate, BacklogDerive, BacklogDerived, CourseCreate,
    CourseUpdate, EligibleStudents, EligibleStudentsQuery, EnrollmentCreate, EnrollmentUpdate,
};
use crate::schemas::DataResponse;
use crate::services::{backlog, eligibility};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/:id", put(update_course).delete(delete_course))
        .route("/professor_courses", get(list_assignments).post(create_assignment))
        .route("/professor_courses/:id", put(update_assignment).delete(delete_assignment))
        .route("/student_courses", get(list_enrollments).post(create_enrollment))
        .route("/student_courses/:id", put(update_enrollment).delete(delete_enrollment))
        .route("/backlog", post(derive_backlog))
        .route("/getStudent", post(eligible_students))
}

async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Course>>>, ApiError> {
    let courses = state.store().courses().list().await.map_err(ApiError::from)?;
    Ok(Json(DataResponse { data: courses }))
}

async fn create_course(
    State(state): State<AppState>,
    Json(payload): Json<CourseCreate>,
) -> Result<(StatusCode, Json<DataResponse<Course>>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let course = state
        .store()
        .courses()
        .create(NewCourse { name: &payload.name, description: payload.description.as_deref() })
        .await
        .map_err(ApiError::from)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: course })))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CourseUpdate>,
) -> Result<Json<DataResponse<Course>>, ApiError> {
    if payload.name.is_none() && payload.description.is_none() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let course = state
        .store()
        .courses()
        .update(id, CourseChanges { name: payload.name, description: payload.description })
        .await
        .map_err(ApiError::from)?;
    Ok(Json(DataResponse { data: course }))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store().courses().delete(id).await.map_err(ApiError::from)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_assignments(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<ProfessorCourse>>>, ApiError> {
    let assignments = state.store().assignments().list().await.map_err(ApiError::from)?;
    Ok(Json(DataResponse { data: assignments }))
}

async fn create_assignment(
    State(state): State<AppState>,
    Json(payload): Json<AssignmentCreate>,
) -> Result<(StatusCode, Json<DataResponse<ProfessorCourse>>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let assignment = state
        .store()
        .assignments()
        .create(NewAssignment {
            prof_id: &payload.prof_id,
            subject_id: payload.subject_id,
            semester: payload.semester,
        })
        .await
        .map_err(ApiError::from)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

async fn update_assignment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AssignmentUpdate>,
) -> Result<Json<DataResponse<ProfessorCourse>>, ApiError> {
    if payload.prof_id.is_none() && payload.subject_id.is_none() && payload.semester.is_none() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let assignment = state
        .store()
        .assignments()
        .update(
            id,
            AssignmentChanges {
                prof_id: payload.prof_id,
                subject_id: payload.subject_id,
                semester: payload.semester,
            },
        )
        .await
        .map_err(ApiError::from)?;
    Ok(Json(DataResponse { data: assignment }))
}

async fn delete_assignment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store().assignments().delete(id).await.map_err(ApiError::from)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_enrollments(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<StudentCourse>>>, ApiError> {
    let enrollments = state.store().enrollments().list().await.map_err(ApiError::from)?;
    Ok(Json(DataResponse { data: enrollments }))
}

async fn create_enrollment(
    State(state): State<AppState>,
    Json(payload): Json<EnrollmentCreate>,
) -> Result<(StatusCode, Json<DataResponse<StudentCourse>>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let outcome = state
        .store()
        .enrollments()
        .insert_if_absent(NewEnrollment {
            reg_no: &payload.reg_no,
            semester: payload.semester,
            subject_ids: &payload.subject_ids,
        })
        .await
        .map_err(ApiError::from)?;

    match outcome {
        InsertOutcome::Created(enrollment) => {
            Ok((StatusCode::CREATED, Json(DataResponse { data: enrollment })))
        }
        InsertOutcome::AlreadyExists => Err(ApiError::BadRequest(
            "Student is already enrolled for this semester".to_string(),
        )),
    }
}

async fn update_enrollment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<EnrollmentUpdate>,
) -> Result<Json<DataResponse<StudentCourse>>, ApiError> {
    let enrollment = state
        .store()
        .enrollments()
        .set_subjects(id, &payload.subject_ids)
        .await
        .map_err(ApiError::from)?;
    Ok(Json(DataResponse { data: enrollment }))
}

async fn delete_enrollment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store().enrollments().delete(id).await.map_err(ApiError::from)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Rebuild a student's backlog record for a semester from the prior semester's
/// failing grades.
async fn derive_backlog(
    State(state): State<AppState>,
    Json(payload): Json<BacklogDerive>,
) -> Result<Json<BacklogDerived>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let backlog_subjects = backlog::derive_for_semester(
        state.store(),
        &payload.reg_no,
        payload.semester,
    )
    .await
    .map_err(ApiError::from)?;

    Ok(Json(BacklogDerived {
        message: "Backlog derived successfully".to_string(),
        reg_no: payload.reg_no,
        semester: payload.semester,
        backlog_subjects,
    }))
}

async fn eligible_students(
    State(state): State<AppState>,
    Json(payload): Json<EligibleStudentsQuery>,
) -> Result<Json<EligibleStudents>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let students = eligibility::eligible_students(
        state.store(),
        &payload.prof_id,
        payload.subject_id,
        payload.semester,
    )
    .await
    .map_err(|e| match e {
        eligibility::EligibilityError::NotAssigned => {
            ApiError::Forbidden("Professor is not assigned to this subject for the semester")
        }
        eligibility::EligibilityError::Store(err) => ApiError::from(err),
    })?;

    Ok(Json(EligibleStudents { students }))
}

#[cfg(test)]
mod tests;
