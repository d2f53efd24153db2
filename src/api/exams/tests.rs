use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::test_support;

#[tokio::test]
async fn create_requires_subject_listed_for_the_semester() {
    let ctx = test_support::setup_test_context().await;
    // Listed, but for a different semester.
    ctx.memory.seed_subject(31, "Control Systems", 5).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/exams",
            Some(json!({
                "subject_id": 31,
                "prof_id": "P-1",
                "exam_type": "midsem",
                "semester": 3,
                "max_marks": 30,
                "exam_date": "2026-03-14"
            })),
        ))
        .await
        .expect("create exam");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = test_support::read_json(response).await;
    assert_eq!(body["error"], "Subject not found for the given semester");
}

#[tokio::test]
async fn duplicate_subject_type_semester_is_rejected() {
    let ctx = test_support::setup_test_context().await;
    ctx.memory.seed_subject(31, "Control Systems", 3).await;

    let payload = json!({
        "subject_id": 31,
        "prof_id": "P-1",
        "exam_type": "midsem",
        "semester": 3,
        "max_marks": 30,
        "exam_date": "2026-03-14"
    });

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, "/api/exams", Some(payload.clone())))
        .await
        .expect("create exam");
    let status = response.status();
    let created = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "response: {created}");
    assert_eq!(created["message"], "Exam created");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, "/api/exams", Some(payload)))
        .await
        .expect("create duplicate exam");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = test_support::read_json(response).await;
    assert_eq!(body["error"], "Exam already exists");

    // Same subject and semester under a different exam type is a new exam.
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/exams",
            Some(json!({
                "subject_id": 31,
                "prof_id": "P-1",
                "exam_type": "endsem",
                "semester": 3,
                "max_marks": 70,
                "exam_date": "2026-05-20"
            })),
        ))
        .await
        .expect("create endsem exam");
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn exam_lifecycle_fetch_update_delete() {
    let ctx = test_support::setup_test_context().await;
    ctx.memory.seed_subject(31, "Control Systems", 3).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/exams",
            Some(json!({
                "subject_id": 31,
                "prof_id": "P-1",
                "exam_type": "classtest",
                "semester": 3,
                "max_marks": 10,
                "exam_date": "2026-02-01"
            })),
        ))
        .await
        .expect("create exam");
    let created = test_support::read_json(response).await;
    let exam_id = created["data"]["id"].as_i64().expect("exam id");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/exams/{exam_id}"),
            None,
        ))
        .await
        .expect("fetch exam");
    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["data"]["subject_id"], 31);
    assert_eq!(body["data"]["exam_type"], "classtest");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PUT,
            &format!("/api/exams/{exam_id}"),
            Some(json!({})),
        ))
        .await
        .expect("empty update");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = test_support::read_json(response).await;
    assert_eq!(body["error"], "No fields to update");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PUT,
            &format!("/api/exams/{exam_id}"),
            Some(json!({"max_marks": 15, "exam_date": "2026-02-08"})),
        ))
        .await
        .expect("update exam");
    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["message"], "Exam updated");
    assert_eq!(body["data"]["max_marks"], 15);
    assert_eq!(body["data"]["exam_date"], "2026-02-08");
    assert_eq!(body["data"]["prof_id"], "P-1");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::DELETE,
            &format!("/api/exams/{exam_id}"),
            None,
        ))
        .await
        .expect("delete exam");
    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["message"], "Exam deleted");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/exams/{exam_id}"),
            None,
        ))
        .await
        .expect("fetch deleted exam");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = test_support::read_json(response).await;
    assert_eq!(body["error"], "Exam not found");
}

#[tokio::test]
async fn missing_exam_update_and_delete_are_not_found() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PUT,
            "/api/exams/9000",
            Some(json!({"max_marks": 40})),
        ))
        .await
        .expect("update missing exam");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::DELETE, "/api/exams/9000", None))
        .await
        .expect("delete missing exam");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_every_exam() {
    let ctx = test_support::setup_test_context().await;
    ctx.memory.seed_subject(31, "Control Systems", 3).await;
    ctx.memory.seed_subject(32, "Microprocessors", 3).await;

    for subject_id in [31, 32] {
        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/exams",
                Some(json!({
                    "subject_id": subject_id,
                    "prof_id": "P-1",
                    "exam_type": "midsem",
                    "semester": 3,
                    "max_marks": 30,
                    "exam_date": "2026-03-14"
                })),
            ))
            .await
            .expect("create exam");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/exams", None))
        .await
        .expect("list exams");
    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["data"].as_array().expect("exam list").len(), 2);
}
