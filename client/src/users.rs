use models::{Role, User, UserPage};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::auth::NewUser;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::query::UserQuery;
use crate::session::Session;

/// Partial profile edit; unset fields are left unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "common::not_blank", message = "Name is required"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

#[derive(Debug, Clone, Validate)]
pub struct PasswordChange {
    #[validate(custom(function = "common::not_blank", message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UserReply {
    Wrapped { user: User },
    Bare(User),
}

impl From<UserReply> for User {
    fn from(value: UserReply) -> Self {
        match value {
            UserReply::Wrapped { user } | UserReply::Bare(user) => user,
        }
    }
}

/// The server sometimes answers with a bare array; both shapes land in a
/// [`UserPage`].
#[derive(Deserialize)]
#[serde(untagged)]
enum UserListReply {
    Bare(Vec<User>),
    Paged(UserPage),
}

pub async fn list_users(
    api: &ApiClient,
    session: &Session,
    query: &UserQuery,
) -> Result<UserPage, ApiError> {
    let req = api
        .request(Method::GET, "/users", Some(session))
        .query(&query.pairs());
    let reply: UserListReply = api.send(req).await?;
    Ok(match reply {
        UserListReply::Paged(page) => page,
        UserListReply::Bare(users) => UserPage {
            total: users.len() as u64,
            users,
            total_pages: 1,
            current_page: 1,
        },
    })
}

pub async fn create_user(api: &ApiClient, session: &Session, user: NewUser) -> Result<User, ApiError> {
    let form = user.into_form().await?;
    let reply: UserReply = api
        .send(api.request(Method::POST, "/users", Some(session)).multipart(form))
        .await?;
    let user = User::from(reply);
    info!(user = %user.id, role = %user.role, "user created");
    Ok(user)
}

pub async fn update_user(
    api: &ApiClient,
    session: &Session,
    id: &str,
    update: &UserUpdate,
) -> Result<User, ApiError> {
    update.validate()?;
    let reply: UserReply = api
        .send(
            api.request(Method::PUT, &format!("/users/{id}"), Some(session))
                .json(update),
        )
        .await?;
    Ok(reply.into())
}

pub async fn delete_user(api: &ApiClient, session: &Session, id: &str) -> Result<(), ApiError> {
    let _: serde_json::Value = api
        .send(api.request(Method::DELETE, &format!("/users/{id}"), Some(session)))
        .await?;
    info!(user = %id, "user deleted");
    Ok(())
}

pub async fn user_stats(api: &ApiClient, session: &Session) -> Result<serde_json::Value, ApiError> {
    api.send(api.request(Method::GET, "/users/stats", Some(session)))
        .await
}

pub async fn change_password(
    api: &ApiClient,
    session: &Session,
    change: &PasswordChange,
) -> Result<(), ApiError> {
    change.validate()?;
    let req = api
        .request(Method::PUT, "/users/change-password", Some(session))
        .json(&json!({
            "currentPassword": change.current_password,
            "newPassword": change.new_password,
        }));
    let _: serde_json::Value = api.send(req).await?;
    Ok(())
}
