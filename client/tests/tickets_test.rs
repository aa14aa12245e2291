mod helpers;

#[cfg(test)]
mod tests {
    use crate::helpers::{bearer_ok, session, spawn_backend, ticket_json};
    use axum::extract::{Path, Query};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use client::tickets::{self, NewTicket};
    use client::{ApiError, TicketQuery};
    use models::{Category, Role, TicketStatus, TicketUpdate};
    use serde_json::{Value, json};
    use std::collections::HashMap;

    fn routes() -> Router {
        Router::new()
            .route(
                "/tickets",
                get(|headers: HeaderMap, Query(q): Query<HashMap<String, String>>| async move {
                    if !bearer_ok(&headers) {
                        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "No token" })));
                    }
                    let status = q.get("status").cloned().unwrap_or_else(|| "Open".into());
                    (
                        StatusCode::OK,
                        Json(json!({
                            "tickets": [ticket_json("t-1", &status)],
                            "pagination": {
                                "total": 11, "page": 2, "limit": 10, "totalPages": 2,
                                "hasNextPage": false, "hasPrevPage": true
                            },
                            "echo": q,
                        })),
                    )
                })
                .post(|Json(body): Json<Value>| async move {
                    let mut t = ticket_json("t-new", "Open");
                    t["title"] = body["title"].clone();
                    (StatusCode::CREATED, Json(json!({ "ticket": t })))
                }),
            )
            .route(
                "/tickets/{id}",
                get(|Path(id): Path<String>| async move {
                    if id == "missing" {
                        return (
                            StatusCode::NOT_FOUND,
                            Json(json!({ "message": "Ticket not found" })),
                        );
                    }
                    (StatusCode::OK, Json(json!({ "ticket": ticket_json(&id, "Open") })))
                })
                .put(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                    if body.get("status").is_none() {
                        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "status missing" })));
                    }
                    let mut t = ticket_json(&id, body["status"].as_str().unwrap_or("Open"));
                    t["statusHistory"]
                        .as_array_mut()
                        .unwrap()
                        .push(json!({
                            "status": body["status"],
                            "changedBy": { "_id": "u-9", "name": "Staff" },
                            "changedAt": "2024-03-02T10:00:00Z",
                            "comment": body.get("statusComment"),
                        }));
                    (StatusCode::OK, Json(t))
                }),
            )
            .route(
                "/tickets/{id}/comments",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({
                        "comment": {
                            "_id": "c-1",
                            "content": body["content"],
                            "author": { "_id": "u-1", "name": "Ana" },
                            "createdAt": "2024-03-02T11:00:00Z",
                            "isInternal": body["isInternal"],
                        }
                    }))
                }),
            )
            .route(
                "/tickets/department-stats/{category}",
                get(|Path(category): Path<String>| async move {
                    Json(json!({
                        "topDepts": [format!("{category} Support"), "Facilities"],
                        "avgSteps": 3,
                        "avgResolutionTime": 5.6
                    }))
                }),
            )
    }

    #[tokio::test]
    async fn list_sends_filters_and_decodes_page() {
        let api = spawn_backend(routes()).await;
        let query = TicketQuery {
            status: Some(TicketStatus::InProgress),
            page: Some(2),
            ..Default::default()
        };

        let page = tickets::list_tickets(&api, &session(Role::It), &query)
            .await
            .unwrap();
        assert_eq!(page.tickets.len(), 1);
        assert_eq!(page.tickets[0].status, TicketStatus::InProgress);
        assert_eq!(page.pagination.total_pages, 2);
        assert!(page.pagination.has_prev_page);
    }

    #[tokio::test]
    async fn get_missing_ticket_surfaces_server_message() {
        let api = spawn_backend(routes()).await;
        let err = tickets::get_ticket(&api, &session(Role::Employee), "missing")
            .await
            .unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Ticket not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn status_update_returns_full_ticket() {
        let api = spawn_backend(routes()).await;
        let update = TicketUpdate::status_with_comment(TicketStatus::Resolved, "  fixed  ");

        let ticket = tickets::update_ticket(&api, &session(Role::It), "t-7", &update)
            .await
            .unwrap();
        assert_eq!(ticket.id, "t-7");
        assert_eq!(ticket.status, TicketStatus::Resolved);
        assert_eq!(ticket.status_history.len(), 2);
        let last = ticket.status_history.last().unwrap();
        assert_eq!(last.comment.as_deref(), Some("fixed"));
    }

    #[tokio::test]
    async fn rejected_update_uses_error_field() {
        let api = spawn_backend(routes()).await;
        let update = TicketUpdate::category(Category::Hr, "");
        let err = tickets::update_ticket(&api, &session(Role::Admin), "t-7", &update)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "status missing");
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn invalid_update_is_never_sent() {
        // Port 9 is discard; a request reaching the network would fail with Transport.
        let api = client::ApiClient::new("http://127.0.0.1:9/api", 1).unwrap();
        let err = tickets::update_ticket(&api, &session(Role::It), "t-7", &TicketUpdate::assign(" "))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m == "Assignee is required"));
    }

    #[tokio::test]
    async fn missing_token_maps_to_unauthorized() {
        let api = spawn_backend(routes()).await;
        let anonymous = client::Session::new("wrong", crate::helpers::user("u-1", Role::It));
        let err = tickets::list_tickets(&api, &anonymous, &TicketQuery::default())
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn create_and_comment() {
        let api = spawn_backend(routes()).await;
        let s = session(Role::Employee);

        let ticket = tickets::create_ticket(&api, &s, NewTicket::new(" VPN drops ", "Every hour"))
            .await
            .unwrap();
        assert_eq!(ticket.id, "t-new");
        assert_eq!(ticket.title, "VPN drops");

        let comment = tickets::add_comment(&api, &s, &ticket.id, "Still happening", false)
            .await
            .unwrap();
        assert_eq!(comment.content, "Still happening");
        assert!(!comment.is_internal);
    }

    #[tokio::test]
    async fn blank_comment_is_rejected_locally() {
        let api = spawn_backend(routes()).await;
        let err = tickets::add_comment(&api, &session(Role::It), "t-1", "   ", true)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m == "Comment Required"));
    }

    #[tokio::test]
    async fn department_stats_feed_the_forecast() {
        let api = spawn_backend(routes()).await;
        let stats = tickets::department_stats(&api, &session(Role::Employee), Category::It)
            .await
            .unwrap();
        assert_eq!(
            stats.forecast(),
            "This will likely take 3 steps, involve IT Support & Facilities, and be resolved in ~6 hours."
        );
    }
}
