use ai::{AiService, BackendAssistant, Conversation, APOLOGY};
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use client::{ApiClient, ApiError, Session};
use models::{Mood, Role, Ticket, User};
use serde_json::{Value, json};
use std::collections::HashMap;
use tokio::net::TcpListener;

async fn spawn(app: Router) -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    ApiClient::new(&format!("http://{addr}"), 5).unwrap()
}

fn ai_routes() -> Router {
    Router::new()
        .route(
            "/api/assistant/summarize-ticket",
            post(|Json(body): Json<Value>| async move {
                if body["ticketData"]["title"] == "boom" {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": "Summarizer unavailable" })),
                    );
                }
                if body["ticketData"]["title"] == "echo" {
                    return (
                        StatusCode::OK,
                        Json(json!({
                            "summary": serde_json::to_string(&json!({
                                "comments": body["ticketData"]["comments"],
                                "mood": body["ticketData"]["mood"],
                            })).unwrap()
                        })),
                    );
                }
                (
                    StatusCode::OK,
                    Json(json!({ "summary": format!("Summary of {}", body["ticketId"].as_str().unwrap()) })),
                )
            }),
        )
        .route(
            "/api/translation/languages",
            get(|| async { Json(json!({ "es": "Spanish", "en": "English", "fr": "French" })) }),
        )
        .route(
            "/api/translation/translate",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "translatedText": format!("[{}] {}", body["targetLanguage"].as_str().unwrap(), body["text"].as_str().unwrap())
                }))
            }),
        )
}

fn backend_routes() -> Router {
    Router::new()
        .route(
            "/api/assistant/chat",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let who = if body["isPublic"] == true {
                    "guest".to_string()
                } else {
                    assert!(headers.contains_key("authorization"));
                    body["userRole"].as_str().unwrap().to_string()
                };
                if body["message"] == "fail" {
                    return (StatusCode::BAD_GATEWAY, Json(json!({ "message": "upstream" })));
                }
                (StatusCode::OK, Json(json!({ "response": format!("hi {who}") })))
            }),
        )
        .route(
            "/api/tickets/{id}/suggestions",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                Json(json!({
                    "suggestions": [
                        { "response": format!("Reply for {}", q["role"]), "rationale": "tone" }
                    ]
                }))
            }),
        )
        .route(
            "/api/assistant/voice-ticket",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "title": "Spoken issue",
                    "description": body["speech"],
                    "priority": "Medium"
                }))
            }),
        )
}

fn ticket(title: &str) -> Ticket {
    serde_json::from_value(json!({
        "_id": "t-5",
        "title": title,
        "description": "Monitor flickers",
        "category": "IT",
        "status": "Open",
        "priority": "Low",
        "requester": { "_id": "u-1", "name": "Ana" },
        "createdAt": "2024-03-01T09:00:00Z"
    }))
    .unwrap()
}

fn session() -> Session {
    Session::new(
        "tok",
        User {
            id: "u-2".into(),
            name: "Sam".into(),
            email: "sam@example.com".into(),
            role: Role::It,
            department: None,
            avatar: None,
        },
    )
}

#[tokio::test]
async fn summarize_and_translate() {
    let svc = AiService::new(spawn(ai_routes()).await);

    let summary = svc.summarize(&ticket("Flicker"), Role::It).await.unwrap();
    assert_eq!(summary, "Summary of t-5");
    assert_eq!(svc.translate(&summary, "es").await.unwrap(), "[es] Summary of t-5");

    let langs = svc.languages().await.unwrap();
    assert_eq!(langs.keys().collect::<Vec<_>>(), vec!["en", "es", "fr"]);
}

#[tokio::test]
async fn summary_failure_carries_error_field() {
    let svc = AiService::new(spawn(ai_routes()).await);
    let err = svc.summarize(&ticket("boom"), Role::It).await.unwrap_err();
    assert_eq!(err.to_string(), "Summarizer unavailable");
}

fn ticket_with_notes() -> Ticket {
    let mut ticket = ticket("echo");
    ticket.mood = Some(Mood::Angry);
    ticket.comments = serde_json::from_value(json!([
        { "_id": "c-1", "content": "Swapped the cable", "author": { "_id": "u-2", "name": "Sam" },
          "createdAt": "2024-03-01T10:00:00Z", "isInternal": false },
        { "_id": "c-2", "content": "User keeps unplugging it", "author": { "_id": "u-2", "name": "Sam" },
          "createdAt": "2024-03-01T10:05:00Z", "isInternal": true }
    ]))
    .unwrap();
    ticket
}

#[tokio::test]
async fn employee_summary_never_sees_staff_notes() {
    let svc = AiService::new(spawn(ai_routes()).await);
    let ticket = ticket_with_notes();

    let echoed = svc.summarize(&ticket, Role::Employee).await.unwrap();
    let sent: Value = serde_json::from_str(&echoed).unwrap();
    let comments = sent["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["content"], "Swapped the cable");
    assert!(sent["mood"].is_null());

    let echoed = svc.summarize(&ticket, Role::Hr).await.unwrap();
    let staff: Value = serde_json::from_str(&echoed).unwrap();
    assert_eq!(staff["comments"].as_array().unwrap().len(), 2);
    assert_eq!(staff["mood"], "angry");
}

#[tokio::test]
async fn english_target_skips_the_network() {
    let svc = AiService::new(ApiClient::new("http://127.0.0.1:9", 1).unwrap());
    assert_eq!(svc.translate("Already English", "EN").await.unwrap(), "Already English");
}

#[tokio::test]
async fn chat_public_and_authenticated() {
    let api = spawn(backend_routes()).await;
    let api = ApiClient::new(&format!("{}/api", api.base_url()), 5).unwrap();

    let public = BackendAssistant::new(api.clone(), None);
    assert_eq!(public.chat("hello").await.unwrap(), "hi guest");

    let staff = BackendAssistant::new(api, Some(session()));
    assert_eq!(staff.chat("hello").await.unwrap(), "hi it");
}

#[tokio::test]
async fn failed_chat_reads_as_apology() {
    let api = spawn(backend_routes()).await;
    let api = ApiClient::new(&format!("{}/api", api.base_url()), 5).unwrap();

    let mut convo = Conversation::new(BackendAssistant::new(api, Some(session())));
    assert_eq!(convo.send("fail").await.unwrap().content, APOLOGY);
    assert_eq!(convo.send("hello").await.unwrap().content, "hi it");
    assert_eq!(convo.messages().len(), 4);
}

#[tokio::test]
async fn suggestions_pass_role() {
    let api = spawn(backend_routes()).await;
    let api = ApiClient::new(&format!("{}/api", api.base_url()), 5).unwrap();

    let assistant = BackendAssistant::new(api, Some(session()));
    let suggestions = assistant.suggestions("t-5", Role::SuperAdmin).await.unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].response, "Reply for super-admin");
}

#[tokio::test]
async fn voice_ticket_drafts() {
    let api = spawn(backend_routes()).await;
    let api = ApiClient::new(&format!("{}/api", api.base_url()), 5).unwrap();
    let assistant = BackendAssistant::new(api, Some(session()));

    let draft = assistant.voice_ticket("  my printer is on fire ").await.unwrap();
    assert_eq!(draft.title, "Spoken issue");
    assert_eq!(draft.description, "my printer is on fire");

    let err = assistant.voice_ticket("   ").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(ref m) if m == "Please speak your issue first"));
}
