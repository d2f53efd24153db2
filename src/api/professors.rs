use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::schemas::professor::{ProfessorCourses, TaughtSubject};

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/professor/:prof_id", get(taught_subjects))
}

async fn taught_subjects(
    State(state): State<AppState>,
    Path(prof_id): Path<String>,
) -> Result<Json<ProfessorCourses>, ApiError> {
    let subject_ids = state
        .store()
        .assignments()
        .subject_ids_for_professor(&prof_id)
        .await
        .map_err(ApiError::from)?;
    if subject_ids.is_empty() {
        return Err(ApiError::NotFound("No subjects assigned to this professor".to_string()));
    }

    let subjects = state
        .store()
        .subjects()
        .fetch_by_ids(&subject_ids)
        .await
        .map_err(ApiError::from)?;

    let courses = subjects.into_iter().map(TaughtSubject::from_model).collect();
    Ok(Json(ProfessorCourses { courses }))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::test_support;

    #[tokio::test]
    async fn unassigned_professor_gets_not_found() {
        let ctx = test_support::setup_test_context().await;

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(Method::GET, "/api/professor/P-404", None))
            .await
            .expect("professor lookup");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = test_support::read_json(response).await;
        assert_eq!(body["error"], "No subjects assigned to this professor");
    }

    #[tokio::test]
    async fn taught_subjects_resolve_through_assignments() {
        let ctx = test_support::setup_test_context().await;
        ctx.memory.seed_subject(11, "Signals", 3).await;
        ctx.memory.seed_subject(12, "Circuits", 3).await;

        for subject_id in [11, 12] {
            let response = ctx
                .app
                .clone()
                .oneshot(test_support::json_request(
                    Method::POST,
                    "/api/admin/professor_courses",
                    Some(json!({"prof_id": "P-7", "subject_id": subject_id, "semester": 3})),
                ))
                .await
                .expect("assign subject");
            assert_eq!(response.status(), StatusCode::CREATED, "assigning {subject_id}");
        }

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(Method::GET, "/api/professor/P-7", None))
            .await
            .expect("professor lookup");

        assert_eq!(response.status(), StatusCode::OK);
        let body = test_support::read_json(response).await;
        let courses = body["courses"].as_array().expect("courses array");
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0]["name"], "Signals");
        assert_eq!(courses[0]["semester"], 3);
    }
}
