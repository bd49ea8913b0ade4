use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details;
use serde_json::json;

use crate::common::{default_units, CALLER_HEADER};
use crate::support::app_builder::{build_app, memory_state};

#[actix_web::test]
async fn missing_caller_is_unauthorized() {
    let app = test::init_service(build_app(memory_state().await)).await;

    let req = test::TestRequest::post()
        .uri("/api/sessions")
        .set_json(json!({ "roster": default_units() }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(resp, "MISSING_CALLER_ID", StatusCode::UNAUTHORIZED).await;
}

#[actix_web::test]
async fn unknown_session_is_not_found() {
    let app = test::init_service(build_app(memory_state().await)).await;

    let req = test::TestRequest::get()
        .uri("/api/sessions/ghost/phase")
        .insert_header((CALLER_HEADER, "p1"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let problem = assert_problem_details(resp, "SESSION_NOT_FOUND", StatusCode::NOT_FOUND).await;
    assert_eq!(problem.title, "Session Not Found");
    assert!(problem.detail.contains("ghost"));
}

#[actix_web::test]
async fn bad_roster_is_bad_request() {
    let app = test::init_service(build_app(memory_state().await)).await;

    let req = test::TestRequest::post()
        .uri("/api/sessions")
        .insert_header((CALLER_HEADER, "p1"))
        .set_json(json!({ "roster": ["knight", "knight", "mage"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "DUPLICATE_ROSTER_UNITS", StatusCode::BAD_REQUEST).await;

    let req = test::TestRequest::post()
        .uri("/api/sessions")
        .insert_header((CALLER_HEADER, "p1"))
        .set_json(json!({ "roster": ["knight"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "INVALID_ROSTER_SIZE", StatusCode::BAD_REQUEST).await;
}

#[actix_web::test]
async fn malformed_body_and_round_are_bad_requests() {
    let app = test::init_service(build_app(memory_state().await)).await;

    let req = test::TestRequest::post()
        .uri("/api/sessions")
        .insert_header((CALLER_HEADER, "p1"))
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"roster\": 3")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST).await;

    let req = test::TestRequest::get()
        .uri("/api/sessions/p1/commands/minus-one")
        .insert_header((CALLER_HEADER, "p1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "INVALID_ROUND", StatusCode::BAD_REQUEST).await;
}

#[actix_web::test]
async fn conflicts_and_outsiders() {
    let app = test::init_service(build_app(memory_state().await)).await;

    let req = test::TestRequest::post()
        .uri("/api/sessions")
        .insert_header((CALLER_HEADER, "p1"))
        .set_json(json!({ "roster": default_units() }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/sessions/p1/join")
        .insert_header((CALLER_HEADER, "p1"))
        .set_json(json!({ "roster": default_units() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "SELF_JOIN", StatusCode::CONFLICT).await;

    let req = test::TestRequest::post()
        .uri("/api/sessions/p1/commands")
        .insert_header((CALLER_HEADER, "mallory"))
        .set_json(json!({ "payload": "{}" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "NOT_A_PARTICIPANT", StatusCode::FORBIDDEN).await;
}
