use base64::{engine::general_purpose, Engine as _};
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use godo_organiser::config::ApiConfig;
use godo_organiser::error::AppError;
use godo_organiser::forms::{to_payload, QuickCreateDraft};
use godo_organiser::models::draft::{EventDraft, Recurrence};
use godo_organiser::models::event::EventFilterDto;
use godo_organiser::models::payload::PatchEventDto;
use godo_organiser::models::user::{LoginRequest, RegisterOrganiserRequest};
use godo_organiser::services::{
    ApiClient, EventsDashboard, FailureKind, SubmissionDispatcher, SubmissionOutcome,
};
use godo_organiser::session::SessionContext;

fn token_for(user_id: &str) -> String {
    let header = general_purpose::URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = general_purpose::URL_SAFE_NO_PAD.encode(json!({ "sub": user_id }).to_string());
    format!("{}.{}.sig", header, body)
}

fn client(server: &MockServer, session: SessionContext) -> ApiClient {
    let config = ApiConfig {
        base_url: format!("{}/api", server.uri()),
        timeout_seconds: Some(5),
    };
    ApiClient::from_config(&config, session).unwrap()
}

fn jazz_night() -> EventDraft {
    EventDraft {
        organiser: "Jazzklubben".into(),
        title: "Jazz Night".into(),
        categories: vec![3],
        street_name: "Main St".into(),
        city: "Helsingborg".into(),
        postal_code: "25221".into(),
        start_date: NaiveDate::from_ymd_opt(2025, 6, 1),
        start_time: "19:00".into(),
        end_date: NaiveDate::from_ymd_opt(2025, 6, 1),
        end_time: "22:00".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn login_stores_token_and_later_requests_carry_it() {
    let server = MockServer::start().await;
    let token = token_for("org-42");

    Mock::given(method("POST"))
        .and(path("/api/organisers/auth/login"))
        .and(body_partial_json(json!({"username": "jazz", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isSuccess": true,
            "data": { "token": token },
            "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/events/e-1"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isSuccess": true,
            "data": {
                "id": "e-1", "organiser": "Jazzklubben", "title": "Jazz Night",
                "streetName": "Main St", "city": "Helsingborg", "postalCode": "25221",
                "isActive": true, "createdAt": "2025-05-01T10:00:00"
            },
            "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionContext::in_memory();
    let api = client(&server, session.clone());

    api.login(&LoginRequest {
        username: "jazz".into(),
        password: "secret".into(),
    })
    .await
    .unwrap();
    assert_eq!(session.user_id().unwrap(), "org-42");

    let event = api.get_event("e-1").await.unwrap().into_result().unwrap();
    assert_eq!(event.title, "Jazz Night");
}

#[tokio::test]
async fn requests_without_session_have_no_bearer_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events/e-1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"title": "Unauthorized"})))
        .mount(&server)
        .await;

    let api = client(&server, SessionContext::in_memory());
    match api.get_event("e-1").await {
        Err(AppError::Api { status, messages }) => {
            assert_eq!(status, Some(401));
            assert_eq!(messages, vec!["Unauthorized"]);
        }
        other => panic!("unexpected {:?}", other),
    }

    let received = server.received_requests().await.unwrap();
    assert!(received[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn list_query_is_encoded_from_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .and(query_param("isActive", "true"))
        .and(query_param("categoryCodes", "1,3"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isSuccess": true,
            "data": { "items": [], "totalCount": 0, "pageNumber": 1, "pageSize": 10 },
            "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, SessionContext::in_memory());
    let filter = EventFilterDto {
        is_active: Some(true),
        category_codes: vec![1, 3],
        page_size: Some(10),
        ..Default::default()
    };
    let page = api.list_events(&filter).await.unwrap().into_result().unwrap();
    assert_eq!(page.total_count, 0);

    let received = server.received_requests().await.unwrap();
    let query = received[0].url.query().unwrap_or_default();
    assert!(!query.contains("city"), "unset fields must not be sent: {}", query);
}

#[tokio::test]
async fn dispatcher_posts_local_wall_clock_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events"))
        .and(body_partial_json(json!({
            "title": "Jazz Night",
            "startDate": "2025-06-01T19:00:00.000",
            "endDate": "2025-06-01T22:00:00.000",
            "hasSingleDates": true,
            "hasSchedule": false,
            "isAlwaysOpen": false,
            "categoryCodes": [3]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isSuccess": true,
            "data": { "id": "e-77" },
            "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = SubmissionDispatcher::new(client(&server, SessionContext::in_memory()));
    let outcome = dispatcher.submit(&to_payload(&jazz_night())).await;
    assert_eq!(
        outcome,
        SubmissionOutcome::Succeeded {
            data: Some(json!({"id": "e-77"}))
        }
    );
}

#[tokio::test]
async fn dispatcher_surfaces_first_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/events/e-5"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "isSuccess": false,
            "data": null,
            "errors": ["Spotlight dates overlap", "Title is taken"]
        })))
        .mount(&server)
        .await;

    let dispatcher = SubmissionDispatcher::new(client(&server, SessionContext::in_memory()));
    let outcome = dispatcher.submit_update("e-5", &to_payload(&jazz_night())).await;
    assert_eq!(
        outcome,
        SubmissionOutcome::Failed {
            kind: FailureKind::Rejected,
            message: "Spotlight dates overlap".to_string()
        }
    );
}

#[tokio::test]
async fn unreadable_success_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let dispatcher = SubmissionDispatcher::new(client(&server, SessionContext::in_memory()));
    match dispatcher.submit(&to_payload(&jazz_night())).await {
        SubmissionOutcome::Failed { kind, message } => {
            assert_eq!(kind, FailureKind::Malformed);
            assert_eq!(message, "Something went wrong, please try again later.");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_backend_is_a_network_failure() {
    // Порт без слушателя
    let config = ApiConfig {
        base_url: "http://127.0.0.1:9/api".to_string(),
        timeout_seconds: Some(2),
    };
    let api = ApiClient::from_config(&config, SessionContext::in_memory()).unwrap();
    let outcome = SubmissionDispatcher::new(api)
        .submit(&to_payload(&jazz_night()))
        .await;
    assert_eq!(
        outcome,
        SubmissionOutcome::Failed {
            kind: FailureKind::Network,
            message: "Submission failed. Please check your input and try again.".to_string()
        }
    );
}

#[tokio::test]
async fn dashboard_lists_own_events_and_deletes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .and(query_param("createdById", "org-42"))
        .and(query_param("isActive", "true"))
        .and(query_param("pageNumber", "2"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isSuccess": true,
            "data": { "items": [], "totalCount": 23, "pageNumber": 2, "pageSize": 10 },
            "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/events/e-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isSuccess": true, "data": true, "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionContext::in_memory();
    session.sign_in(&token_for("org-42")).unwrap();
    let dashboard = EventsDashboard::new(client(&server, session));

    let page = dashboard.my_events(2).await.unwrap();
    assert_eq!(page.total_pages, 3);
    assert!(page.has_next());

    dashboard.delete("e-9").await.unwrap();
}

#[tokio::test]
async fn dashboard_requires_sign_in() {
    let server = MockServer::start().await;
    let dashboard = EventsDashboard::new(client(&server, SessionContext::in_memory()));
    assert!(matches!(dashboard.my_events(1).await, Err(AppError::Unauthenticated)));
}

#[tokio::test]
async fn patch_sends_only_changed_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/events/e-5"))
        .and(body_json(json!({
            "streetName2": "Entrance B",
            "houseNumber": 11,
            "hasSchedule": true,
            "hasSingleDates": false,
            "weekday": 2,
            "recurrence": "weekly",
            "subcategoryCodesByCategory": { "3": [302] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isSuccess": true,
            "data": {
                "id": "e-5", "organiser": "Jazzklubben", "title": "Jazz Night",
                "streetName": "Main St", "city": "Helsingborg", "postalCode": "25221",
                "isActive": true, "createdAt": "2025-05-01T10:00:00"
            },
            "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let patch = PatchEventDto {
        street_name2: Some("Entrance B".into()),
        house_number: Some(11),
        has_schedule: Some(true),
        has_single_dates: Some(false),
        weekday: Some(2),
        recurrence: Some(Recurrence::Weekly),
        subcategory_codes_by_category: Some([(3, vec![302])].into_iter().collect()),
        ..Default::default()
    };
    let dispatcher = SubmissionDispatcher::new(client(&server, SessionContext::in_memory()));
    let outcome = dispatcher.submit_patch("e-5", &patch).await;
    assert!(outcome.is_success(), "{:?}", outcome);
}

#[tokio::test]
async fn empty_patch_is_not_sent() {
    let server = MockServer::start().await;
    let dispatcher = SubmissionDispatcher::new(client(&server, SessionContext::in_memory()));
    let outcome = dispatcher.submit_patch("e-5", &PatchEventDto::default()).await;
    assert!(matches!(
        outcome,
        SubmissionOutcome::Failed { kind: FailureKind::Rejected, .. }
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn quick_create_omits_blank_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events/quick"))
        .and(body_json(json!({
            "name": "Kulturmagasinet",
            "place": "Helsingborg",
            "subcategoryCodes": [403],
            "readMoreUrl": "https://example.se/kulturmagasinet"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isSuccess": true,
            "data": { "id": "q-1" },
            "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let form = QuickCreateDraft {
        name: " Kulturmagasinet ".into(),
        place: "Helsingborg".into(),
        address: "   ".into(),
        subcategory_codes: vec![403],
        read_more_url: "https://example.se/kulturmagasinet".into(),
        ..Default::default()
    };
    let api = client(&server, SessionContext::in_memory());
    let outcome = SubmissionOutcome::from_response(api.quick_create_event(&form.to_payload()).await);
    assert_eq!(
        outcome,
        SubmissionOutcome::Succeeded {
            data: Some(json!({"id": "q-1"}))
        }
    );
}

#[tokio::test]
async fn quick_create_rejection_shows_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events/quick"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isSuccess": false,
            "data": null,
            "errors": ["Name is required"]
        })))
        .mount(&server)
        .await;

    let api = client(&server, SessionContext::in_memory());
    let payload = QuickCreateDraft::default().to_payload();
    let outcome = SubmissionOutcome::from_response(api.quick_create_event(&payload).await);
    assert_eq!(
        outcome,
        SubmissionOutcome::Failed {
            kind: FailureKind::Rejected,
            message: "Name is required".to_string()
        }
    );
}

fn dunkers() -> RegisterOrganiserRequest {
    RegisterOrganiserRequest {
        username: "dunkers".into(),
        email: "info@dunkers.se".into(),
        password: "hemligt123".into(),
        full_name: "Anna Berg".into(),
        phone_number: "042-10 74 00".into(),
        business_name: "Dunkers kulturhus".into(),
        organisation_number: "556677-8899".into(),
    }
}

#[tokio::test]
async fn register_posts_camel_case_account() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register-organizer"))
        .and(body_partial_json(json!({
            "username": "dunkers",
            "fullName": "Anna Berg",
            "phoneNumber": "042-10 74 00",
            "businessName": "Dunkers kulturhus",
            "organisationNumber": "556677-8899"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isSuccess": true,
            "data": { "userId": "org-7" },
            "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, SessionContext::in_memory());
    let data = api.register_organiser(&dunkers()).await.unwrap().into_result().unwrap();
    assert_eq!(data["userId"], "org-7");
}

#[tokio::test]
async fn register_conflict_surfaces_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register-organizer"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "isSuccess": false,
            "data": null,
            "errors": ["Username is already taken"]
        })))
        .mount(&server)
        .await;

    let api = client(&server, SessionContext::in_memory());
    match api.register_organiser(&dunkers()).await.unwrap().into_result() {
        Err(AppError::Api { messages, .. }) => {
            assert_eq!(messages, vec!["Username is already taken"]);
        }
        other => panic!("unexpected {:?}", other),
    }
}
