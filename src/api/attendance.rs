use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::stream::{self, Stream};
use tokio::sync::broadcast;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::db::models::AttendanceMark;
use crate::schemas::attendance::AttendanceCreate;
use crate::schemas::DataResponse;

const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", post(mark_attendance)).route("/stream", get(stream_attendance))
}

async fn mark_attendance(
    State(state): State<AppState>,
    Json(payload): Json<AttendanceCreate>,
) -> Result<(StatusCode, Json<DataResponse<AttendanceMark>>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let known = state
        .store()
        .subjects()
        .exists_anywhere(payload.subject_id)
        .await
        .map_err(ApiError::from)?;
    if !known {
        return Err(ApiError::BadRequest(format!(
            "Subject {} does not exist.",
            payload.subject_id
        )));
    }

    let mark = state
        .store()
        .attendance()
        .record(&payload.reg_no, payload.subject_id, payload.status.count())
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: mark })))
}

/// Server-push feed of attendance writes, one JSON row per event. Slow
/// subscribers that lag behind the broadcast buffer skip ahead rather than
/// tearing the stream down.
async fn stream_attendance(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.store().attendance().changes();

    let stream = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(mark) => match Event::default().json_data(&mark) {
                    Ok(event) => return Some((Ok(event), receiver)),
                    Err(err) => {
                        tracing::error!(error = %err, "Failed to encode attendance event");
                        continue;
                    }
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Attendance subscriber lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL).text("ping"))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::test_support;

    #[tokio::test]
    async fn unknown_subject_is_rejected() {
        let ctx = test_support::setup_test_context().await;

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/attendance",
                Some(json!({"reg_no": "S100", "subject_id": 77, "status": "present"})),
            ))
            .await
            .expect("mark attendance");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = test_support::read_json(response).await;
        assert_eq!(body["error"], "Subject 77 does not exist.");
    }

    #[tokio::test]
    async fn marking_writes_the_row_and_publishes_it() {
        let ctx = test_support::setup_test_context().await;
        ctx.memory.seed_subject(21, "Thermodynamics", 2).await;
        let mut changes = ctx.state.store().attendance().changes();

        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/attendance",
                Some(json!({"reg_no": "S100", "subject_id": 21, "status": "present"})),
            ))
            .await
            .expect("mark attendance");

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = test_support::read_json(response).await;
        assert_eq!(body["data"]["reg_no"], "S100");
        assert_eq!(body["data"]["attendance_count"], 1);

        let published = changes.try_recv().expect("published mark");
        assert_eq!(published.subject_id, 21);
        assert_eq!(published.attendance_count, 1);
    }

    #[tokio::test]
    async fn remarking_overwrites_the_count() {
        let ctx = test_support::setup_test_context().await;
        ctx.memory.seed_subject(21, "Thermodynamics", 2).await;

        for (status, expected) in [("present", 1), ("absent", 0)] {
            let response = ctx
                .app
                .clone()
                .oneshot(test_support::json_request(
                    Method::POST,
                    "/api/attendance",
                    Some(json!({"reg_no": "S100", "subject_id": 21, "status": status})),
                ))
                .await
                .expect("mark attendance");

            assert_eq!(response.status(), StatusCode::CREATED);
            let body = test_support::read_json(response).await;
            assert_eq!(body["data"]["attendance_count"], expected, "status {status}");
        }
    }
}
