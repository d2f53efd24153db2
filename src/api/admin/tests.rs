use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::db::types::Grade;
use crate::repositories::results::ResultUpsert;
use crate::test_support;

#[tokio::test]
async fn course_crud_roundtrip() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/admin/courses",
            Some(json!({"name": "B.Tech ECE", "description": "Electronics and Communication"})),
        ))
        .await
        .expect("create course");
    let status = response.status();
    let created = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "response: {created}");
    let course_id = created["data"]["id"].as_i64().expect("course id");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/admin/courses", None))
        .await
        .expect("list courses");
    let body = test_support::read_json(response).await;
    assert_eq!(body["data"].as_array().expect("course list").len(), 1);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PUT,
            &format!("/api/admin/courses/{course_id}"),
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
            &format!("/api/admin/courses/{course_id}"),
            Some(json!({"name": "B.Tech ECE (Revised)"})),
        ))
        .await
        .expect("update course");
    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["data"]["name"], "B.Tech ECE (Revised)");
    assert_eq!(body["data"]["description"], "Electronics and Communication");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::DELETE,
            &format!("/api/admin/courses/{course_id}"),
            None,
        ))
        .await
        .expect("delete course");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/admin/courses", None))
        .await
        .expect("list courses after delete");
    let body = test_support::read_json(response).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn assignment_crud_roundtrip() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/admin/professor_courses",
            Some(json!({"prof_id": "P-7", "subject_id": 41, "semester": 4})),
        ))
        .await
        .expect("create assignment");
    let status = response.status();
    let created = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "response: {created}");
    let id = created["data"]["id"].as_i64().expect("assignment id");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PUT,
            &format!("/api/admin/professor_courses/{id}"),
            Some(json!({"semester": 5})),
        ))
        .await
        .expect("update assignment");
    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["data"]["semester"], 5);
    assert_eq!(body["data"]["prof_id"], "P-7");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::DELETE,
            &format!("/api/admin/professor_courses/{id}"),
            None,
        ))
        .await
        .expect("delete assignment");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn duplicate_enrollment_for_a_semester_is_rejected() {
    let ctx = test_support::setup_test_context().await;

    // Older admin clients send student_id for the registration number.
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/admin/student_courses",
            Some(json!({"student_id": "S100", "semester": 4, "subject_ids": [41, 42]})),
        ))
        .await
        .expect("enroll student");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/admin/student_courses",
            Some(json!({"reg_no": "S100", "semester": 4, "subject_ids": [43]})),
        ))
        .await
        .expect("enroll duplicate");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = test_support::read_json(response).await;
    assert_eq!(body["error"], "Student is already enrolled for this semester");

    // A different semester is a separate record.
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/admin/student_courses",
            Some(json!({"reg_no": "S100", "semester": 5, "subject_ids": [51]})),
        ))
        .await
        .expect("enroll next semester");
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn enrollment_subject_list_can_be_replaced() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/admin/student_courses",
            Some(json!({"reg_no": "S100", "semester": 4, "subject_ids": [41]})),
        ))
        .await
        .expect("enroll student");
    let created = test_support::read_json(response).await;
    let id = created["data"]["id"].as_i64().expect("enrollment id");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PUT,
            &format!("/api/admin/student_courses/{id}"),
            Some(json!({"subject_ids": [41, 42, 43]})),
        ))
        .await
        .expect("update enrollment");
    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["data"]["subject_ids"], json!([41, 42, 43]));

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::DELETE,
            &format!("/api/admin/student_courses/{id}"),
            None,
        ))
        .await
        .expect("delete enrollment");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn backlog_derivation_collects_prior_semester_failures() {
    let ctx = test_support::setup_test_context().await;
    ctx.memory.seed_subject(12, "Database Systems", 3).await;
    ctx.memory.seed_subject(13, "Operating Systems", 3).await;

    for (subject_id, grade) in [(12, Grade::F), (13, Grade::A)] {
        ctx.state
            .store()
            .results()
            .upsert(ResultUpsert {
                subject_id,
                prof_id: "P-1",
                reg_no: "S100",
                midsem_marks: 10.0,
                endsem_marks: 20.0,
                classtest_marks: 5.0,
                grade,
            })
            .await
            .expect("seed result");
    }

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/admin/backlog",
            Some(json!({"reg_no": "S100", "semester": 4})),
        ))
        .await
        .expect("derive backlog");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["message"], "Backlog derived successfully");
    assert_eq!(body["backlog_subjects"], json!([12]));

    let record = ctx
        .state
        .store()
        .backlogs()
        .find("S100", 4)
        .await
        .expect("backlog lookup")
        .expect("backlog record");
    assert_eq!(record.subject_ids, vec![12]);
}

#[tokio::test]
async fn backlog_derivation_with_no_failures_removes_the_record() {
    let ctx = test_support::setup_test_context().await;
    ctx.memory.seed_subject(12, "Database Systems", 3).await;
    ctx.state
        .store()
        .backlogs()
        .replace("S100", 4, &[12])
        .await
        .expect("seed stale backlog");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/admin/backlog",
            Some(json!({"reg_no": "S100", "semester": 4})),
        ))
        .await
        .expect("derive backlog");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["backlog_subjects"], json!([]));

    let record = ctx.state.store().backlogs().find("S100", 4).await.expect("backlog lookup");
    assert!(record.is_none());
}

#[tokio::test]
async fn backlog_derivation_needs_a_prior_semester() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/admin/backlog",
            Some(json!({"reg_no": "S100", "semester": 1})),
        ))
        .await
        .expect("derive backlog");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn eligible_students_requires_a_matching_assignment() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/admin/getStudent",
            Some(json!({"subject_id": 41, "semester": 4, "prof_id": "P-7"})),
        ))
        .await
        .expect("eligible students");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = test_support::read_json(response).await;
    assert_eq!(body["error"], "Professor is not assigned to this subject for the semester");
}

#[tokio::test]
async fn eligible_students_intersect_enrollment_and_registration() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/admin/professor_courses",
            Some(json!({"prof_id": "P-7", "subject_id": 41, "semester": 4})),
        ))
        .await
        .expect("create assignment");
    assert_eq!(response.status(), StatusCode::CREATED);

    for reg_no in ["S100", "S200"] {
        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/admin/student_courses",
                Some(json!({"reg_no": reg_no, "semester": 4, "subject_ids": [41]})),
            ))
            .await
            .expect("enroll student");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Only S100 registers for the exam.
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/erp",
            Some(json!({"reg_no": "S100", "semester": 4})),
        ))
        .await
        .expect("submit registration");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/admin/getStudent",
            Some(json!({"subject_id": 41, "semester": 4, "prof_id": "P-7"})),
        ))
        .await
        .expect("eligible students");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["students"], json!(["S100"]));
}
