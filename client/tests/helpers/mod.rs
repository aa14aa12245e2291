#![allow(dead_code)]

use axum::Router;
use axum::http::HeaderMap;
use client::{ApiClient, Session};
use models::{Role, User};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const TOKEN: &str = "test-token";

/// Serves `routes` under `/api` on a random local port and returns a client
/// pointed at it.
pub async fn spawn_backend(routes: Router) -> ApiClient {
    let app = Router::new().nest("/api", routes);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ApiClient::new(&format!("http://{addr}/api"), 5).unwrap()
}

pub fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

pub fn user(id: &str, role: Role) -> User {
    User {
        id: id.into(),
        name: format!("User {id}"),
        email: format!("{id}@example.com"),
        role,
        department: Some("Operations".into()),
        avatar: None,
    }
}

pub fn session(role: Role) -> Session {
    Session::new(TOKEN, user("u-1", role))
}

pub fn ticket_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "ticketNumber": "TKT-0042",
        "title": "Laptop will not boot",
        "description": "Black screen after the update",
        "category": "IT",
        "status": status,
        "priority": "High",
        "mood": "frustrated",
        "requester": { "_id": "u-1", "name": "Ana", "email": "ana@example.com" },
        "createdAt": "2024-03-01T09:00:00Z",
        "comments": [],
        "statusHistory": [
            {
                "status": "Open",
                "changedBy": { "_id": "u-1", "name": "Ana" },
                "changedAt": "2024-03-01T09:00:00Z"
            }
        ],
        "history": []
    })
}
