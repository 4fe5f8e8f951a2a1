//! End-to-end entry submission and listing flows.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use async_trait::async_trait;
use serde_json::{Value, json};

use backend::domain::ports::{PlatformUsernameVerifier, UsernameVerifierError};
use backend::domain::{TelegramPolicy, UniquenessScope};
use support::{ADMIN_TOKEN, default_state, entry_payload, seed_topic, state_with, test_app};

const WALLET_A: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
const WALLET_B: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";

struct RejectingVerifier;

#[async_trait]
impl PlatformUsernameVerifier for RejectingVerifier {
    async fn verify(&self, _username: &str) -> Result<bool, UsernameVerifierError> {
        Ok(false)
    }
}

struct DownVerifier;

#[async_trait]
impl PlatformUsernameVerifier for DownVerifier {
    async fn verify(&self, _username: &str) -> Result<bool, UsernameVerifierError> {
        Err(UsernameVerifierError::unreachable("connection refused"))
    }
}

fn submission(topic_id: &str, wallet: &str, email: &str) -> Value {
    json!({
        "topicId": topic_id,
        "telegramUsername": "@alice",
        "platformUsername": "alice",
        "walletAddress": wallet,
        "email": email,
    })
}

#[actix_web::test]
async fn submission_round_trips_through_listing() {
    let state = default_state();
    let app = test::init_service(test_app(state.clone())).await;
    let topic_id = seed_topic(&state, "Launch Week").await;

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/entries")
            .set_json(submission(&topic_id, WALLET_A, "a@x.com"))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let entry: Value = test::read_body_json(created).await;
    assert!(entry.get("id").and_then(Value::as_str).is_some());
    assert!(entry.get("createdAt").and_then(Value::as_i64).is_some());
    // Canonical forms: checksummed wallet, sigil-less telegram username.
    assert_eq!(entry.get("walletAddress").and_then(Value::as_str), Some(WALLET_A));
    assert_eq!(entry.get("telegramUsername").and_then(Value::as_str), Some("alice"));
    assert_eq!(entry.get("topicName").and_then(Value::as_str), Some("Launch Week"));

    let listed = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/entries?topicId={topic_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(listed.status(), StatusCode::OK);
    let body: Value = test::read_body_json(listed).await;
    assert_eq!(
        body.pointer("/pagination/total").and_then(Value::as_u64),
        Some(1)
    );
    assert_eq!(
        body.pointer("/entries/0/email").and_then(Value::as_str),
        Some("a@x.com")
    );
}

#[actix_web::test]
async fn invalid_fields_are_reported_per_field() {
    let state = default_state();
    let app = test::init_service(test_app(state.clone())).await;
    let topic_id = seed_topic(&state, "Launch Week").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/entries")
            .set_json(json!({
                "topicId": topic_id,
                "telegramUsername": "",
                "platformUsername": "1leading",
                "walletAddress": "0x123",
                "email": "nope",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("invalid_request"));
    let fields = body.pointer("/details/fields").expect("field map");
    assert_eq!(
        fields.get("telegramUsername").and_then(Value::as_str),
        Some("this field is required")
    );
    assert!(fields.get("platformUsername").is_some());
    assert!(fields.get("walletAddress").is_some());
    assert!(fields.get("email").is_some());
}

#[actix_web::test]
async fn submission_against_unknown_topic_is_not_found() {
    let state = default_state();
    let app = test::init_service(test_app(state.clone())).await;
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/entries")
            .set_json(submission(
                "00000000-0000-0000-0000-000000000001",
                WALLET_A,
                "a@x.com",
            ))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn duplicate_wallet_is_rejected_per_topic_only() {
    let state = default_state();
    let app = test::init_service(test_app(state.clone())).await;
    let topic = seed_topic(&state, "Launch Week").await;
    let other_topic = seed_topic(&state, "Genesis").await;

    // Entry A.
    let first = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/entries")
            .set_json(submission(&topic, WALLET_A, "a@x.com"))
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    // Entry B: same wallet, different email, same topic.
    let duplicate = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/entries")
            .set_json(json!({
                "topicId": topic,
                "telegramUsername": "@bob",
                "platformUsername": "bob",
                "walletAddress": WALLET_A,
                "email": "b@x.com",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(duplicate).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("conflict"));
    assert_eq!(
        body.pointer("/details/constraint").and_then(Value::as_str),
        Some("walletAddress")
    );

    // Entry C: A's data against another topic passes under per-topic scope.
    let elsewhere = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/entries")
            .set_json(submission(&other_topic, WALLET_A, "a@x.com"))
            .to_request(),
    )
    .await;
    assert_eq!(elsewhere.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn global_scope_rejects_the_same_wallet_across_topics() {
    let state = state_with(
        backend::domain::ports::FixturePlatformUsernameVerifier,
        TelegramPolicy::Lenient,
        UniquenessScope::Global,
    );
    let app = test::init_service(test_app(state.clone())).await;
    let topic = seed_topic(&state, "Launch Week").await;
    let other_topic = seed_topic(&state, "Genesis").await;

    let first = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/entries")
            .set_json(submission(&topic, WALLET_A, "a@x.com"))
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let elsewhere = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/entries")
            .set_json(json!({
                "topicId": other_topic,
                "telegramUsername": "@bob",
                "platformUsername": "bob",
                "walletAddress": WALLET_A,
                "email": "b@x.com",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(elsewhere.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn pagination_windows_are_exact() {
    let state = default_state();
    let app = test::init_service(test_app(state.clone())).await;
    let topic = seed_topic(&state, "Launch Week").await;
    for seq in 0..25 {
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/entries")
                .set_json(entry_payload(&topic, seq))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let page3 = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/entries?topicId={topic}&page=3&limit=10"))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(page3).await;
    assert_eq!(body.pointer("/pagination/total").and_then(Value::as_u64), Some(25));
    assert_eq!(
        body.pointer("/pagination/totalPages").and_then(Value::as_u64),
        Some(3)
    );
    assert_eq!(
        body.get("entries").and_then(Value::as_array).map(Vec::len),
        Some(5)
    );

    // Requesting past the end is an empty page, not an error.
    let beyond = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/entries?topicId={topic}&page=9&limit=10"))
            .to_request(),
    )
    .await;
    assert_eq!(beyond.status(), StatusCode::OK);
    let body: Value = test::read_body_json(beyond).await;
    assert_eq!(
        body.get("entries").and_then(Value::as_array).map(Vec::len),
        Some(0)
    );
}

#[actix_web::test]
async fn listing_order_is_reproducible_across_requests() {
    let state = default_state();
    let app = test::init_service(test_app(state.clone())).await;
    let topic = seed_topic(&state, "Launch Week").await;
    for seq in 0..12 {
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/entries")
                .set_json(entry_payload(&topic, seq))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let uri = format!("/api/v1/entries?topicId={topic}&page=1&limit=5");
    let first: Value = test::read_body_json(
        test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await,
    )
    .await;
    let second: Value = test::read_body_json(
        test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await,
    )
    .await;
    assert_eq!(first, second);
}

#[actix_web::test]
async fn topic_name_search_filters_in_memory() {
    let state = default_state();
    let app = test::init_service(test_app(state.clone())).await;
    let launch = seed_topic(&state, "Launch Week").await;
    let genesis = seed_topic(&state, "Genesis").await;
    for (seq, topic) in [(0_u32, &launch), (1, &launch), (2, &genesis)] {
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/entries")
                .set_json(entry_payload(topic, seq))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let filtered = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/entries?topicName=launch")
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(filtered).await;
    assert_eq!(body.pointer("/pagination/total").and_then(Value::as_u64), Some(2));
    let entries = body.get("entries").and_then(Value::as_array).expect("entries");
    assert!(
        entries
            .iter()
            .all(|entry| entry.get("topicName").and_then(Value::as_str) == Some("Launch Week"))
    );

    // No matches is an empty page, never an error.
    let none = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/entries?topicName=zzz&page=4")
            .to_request(),
    )
    .await;
    assert_eq!(none.status(), StatusCode::OK);
    let body: Value = test::read_body_json(none).await;
    assert_eq!(body.pointer("/pagination/total").and_then(Value::as_u64), Some(0));
    assert_eq!(
        body.pointer("/pagination/totalPages").and_then(Value::as_u64),
        Some(0)
    );

    // topicId wins when both filters are supplied.
    let both = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/entries?topicId={genesis}&topicName=launch"))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(both).await;
    assert_eq!(body.pointer("/pagination/total").and_then(Value::as_u64), Some(1));
}

#[actix_web::test]
async fn strict_telegram_policy_demands_the_sigil() {
    let state = state_with(
        backend::domain::ports::FixturePlatformUsernameVerifier,
        TelegramPolicy::Strict,
        UniquenessScope::PerTopic,
    );
    let app = test::init_service(test_app(state.clone())).await;
    let topic = seed_topic(&state, "Launch Week").await;

    let bare = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/entries")
            .set_json(json!({
                "topicId": topic,
                "telegramUsername": "alice",
                "platformUsername": "alice",
                "walletAddress": WALLET_A,
                "email": "a@x.com",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(bare.status(), StatusCode::BAD_REQUEST);

    let sigiled = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/entries")
            .set_json(submission(&topic, WALLET_A, "a@x.com"))
            .to_request(),
    )
    .await;
    assert_eq!(sigiled.status(), StatusCode::CREATED);
    let entry: Value = test::read_body_json(sigiled).await;
    assert_eq!(entry.get("telegramUsername").and_then(Value::as_str), Some("alice"));
}

#[actix_web::test]
async fn rejected_platform_username_is_a_validation_error() {
    let state = state_with(
        RejectingVerifier,
        TelegramPolicy::Lenient,
        UniquenessScope::PerTopic,
    );
    let app = test::init_service(test_app(state.clone())).await;
    let topic = seed_topic(&state, "Launch Week").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/entries")
            .set_json(submission(&topic, WALLET_A, "a@x.com"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(
        body.pointer("/details/code").and_then(Value::as_str),
        Some("platform_username_rejected")
    );
}

#[actix_web::test]
async fn unreachable_verifier_is_service_unavailable() {
    let state = state_with(DownVerifier, TelegramPolicy::Lenient, UniquenessScope::PerTopic);
    let app = test::init_service(test_app(state.clone())).await;
    let topic = seed_topic(&state, "Launch Week").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/entries")
            .set_json(submission(&topic, WALLET_A, "a@x.com"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("service_unavailable"));
}

#[actix_web::test]
async fn entry_deletion_requires_admin_and_reports_missing() {
    let state = default_state();
    let app = test::init_service(test_app(state.clone())).await;
    let topic = seed_topic(&state, "Launch Week").await;

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/entries")
            .set_json(submission(&topic, WALLET_B, "b@x.com"))
            .to_request(),
    )
    .await;
    let entry: Value = test::read_body_json(created).await;
    let id = entry.get("id").and_then(Value::as_str).expect("entry id").to_owned();

    let unauthorized = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/v1/entries")
            .set_json(json!({ "id": id }))
            .to_request(),
    )
    .await;
    assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

    let deleted = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/v1/entries")
            .insert_header(("Authorization", format!("Bearer {ADMIN_TOKEN}")))
            .set_json(json!({ "id": id }))
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);

    let again = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/v1/entries")
            .insert_header(("Authorization", format!("Bearer {ADMIN_TOKEN}")))
            .set_json(json!({ "id": id }))
            .to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}
