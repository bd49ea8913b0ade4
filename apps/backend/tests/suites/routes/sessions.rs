use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use crate::common::{default_units, CALLER_HEADER};
use crate::support::app_builder::{build_app, memory_state};

macro_rules! get {
    ($app:expr, $caller:expr, $uri:expr) => {
        test::call_service(
            &$app,
            test::TestRequest::get()
                .uri($uri)
                .insert_header((CALLER_HEADER, $caller))
                .to_request(),
        )
        .await
    };
}

macro_rules! post {
    ($app:expr, $caller:expr, $uri:expr, $body:expr) => {
        test::call_service(
            &$app,
            test::TestRequest::post()
                .uri($uri)
                .insert_header((CALLER_HEADER, $caller))
                .set_json($body)
                .to_request(),
        )
        .await
    };
}

#[actix_web::test]
async fn two_players_exchange_moves_over_http() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let roster = json!({ "roster": default_units() });

    // Create, then a repeat create reports the waiting session
    let resp = post!(app, "p1", "/api/sessions", &roster);
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "outcome": "created", "session_id": "p1" }));

    let resp = post!(app, "p1", "/api/sessions", &roster);
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["outcome"], "awaiting_opponent");

    let resp = get!(app, "p1", "/api/sessions/p1/joined");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["joined"], false);

    // Join
    let resp = post!(app, "p2", "/api/sessions/p1/join", &roster);
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["phase"], "PLAYING");
    assert_eq!(body["player2_id"], "p2");

    let body: Value = test::read_body_json(get!(app, "p1", "/api/sessions/p1/joined")).await;
    assert_eq!(body["joined"], true);
    let body: Value = test::read_body_json(get!(app, "p2", "/api/sessions/p1/joined")).await;
    assert_eq!(body["joined"], false);

    let body: Value = test::read_body_json(get!(app, "p2", "/api/sessions/p1/phase")).await;
    assert_eq!(body["phase"], "PLAYING");
    let body: Value = test::read_body_json(get!(app, "p2", "/api/sessions/p1/in-progress")).await;
    assert_eq!(body["in_progress"], true);

    let body: Value = test::read_body_json(get!(app, "p2", "/api/sessions/p1/initial")).await;
    assert_eq!(body["player1_roster"], json!(default_units()));
    assert_eq!(body["current_round"], 0);

    // p2 commits twice; the second is a no-op
    let resp = post!(app, "p2", "/api/sessions/p1/commands", json!({ "payload": "{a}" }));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "current_round": 0, "player1_turn": 0, "player2_turn": 1, "payload": "" })
    );
    let resp = post!(app, "p2", "/api/sessions/p1/commands", json!({ "payload": "{b}" }));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["player2_turn"], 1);

    // p1 commits and receives p2's move in the same response
    let resp = post!(app, "p1", "/api/sessions/p1/commands", json!({ "payload": "{c}" }));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["current_round"], 1);
    assert_eq!(body["payload"], "{a}");

    let body: Value = test::read_body_json(get!(app, "p2", "/api/sessions/p1/commands/next")).await;
    assert_eq!(body["payload"], "{c}");

    let body: Value = test::read_body_json(get!(app, "p1", "/api/sessions/p1/commands/0")).await;
    assert_eq!(body["payload"], "{a}");

    let body: Value = test::read_body_json(get!(app, "p1", "/api/sessions/p1/commands")).await;
    assert_eq!(body["player1"], json!(["{c}", ""]));
    assert_eq!(body["player2"], json!(["{a}"]));

    let body: Value = test::read_body_json(get!(app, "p1", "/api/sessions/p1")).await;
    assert_eq!(body["current_round"], 1);
    assert!(body.get("player1_commands").is_none());

    // Concede
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/sessions/p1/concede")
            .insert_header((CALLER_HEADER, "p2"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let body: Value = test::read_body_json(get!(app, "p1", "/api/sessions/p1/phase")).await;
    assert_eq!(body["phase"], "ENDED");
    let body: Value = test::read_body_json(get!(app, "p1", "/api/sessions/p1/in-progress")).await;
    assert_eq!(body["in_progress"], false);
}

#[actix_web::test]
async fn responses_carry_request_id() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let resp = post!(app, "p1", "/api/sessions", json!({ "roster": default_units() }));
    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    assert!(request_id.is_some_and(|id| id.len() == 36));
}
