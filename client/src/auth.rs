//! Login, registration, face verification and session restore.

use models::User;
use reqwest::Method;
use reqwest::multipart::Form;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use validator::Validate;

use crate::error::ApiError;
use crate::http::{ApiClient, file_part};
use crate::session::{Session, SessionStore};

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
    user: User,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: User,
}

/// Outcome of a face check; `success` is false when the face did not match.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FaceCheck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Exchanges credentials for a session.
pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<Session, ApiError> {
    let req = api
        .request(Method::POST, "/auth/login", None)
        .json(&json!({ "email": email.trim(), "password": password }));
    let resp: LoginResponse = api.send(req).await?;

    let token = resp
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Malformed("login response carried no token".into()))?;

    info!(user = %resp.user.id, role = %resp.user.role, "logged in");
    Ok(Session::new(token, resp.user))
}

/// The user the session's token belongs to.
pub async fn me(api: &ApiClient, session: &Session) -> Result<User, ApiError> {
    let env: UserEnvelope = api
        .send(api.request(Method::GET, "/auth/me", Some(session)))
        .await?;
    Ok(env.user)
}

/// Loads the persisted session and checks it against the backend.
///
/// A rejected token deletes the session file and yields `None`. Any other
/// failure is returned so the caller can tell "offline" from "logged out".
pub async fn restore_session(
    api: &ApiClient,
    store: &SessionStore,
) -> Result<Option<Session>, ApiError> {
    let Some(session) = store.load()? else {
        return Ok(None);
    };

    match me(api, &session).await {
        Ok(user) => {
            let session = session.with_user(user);
            store.save(&session)?;
            Ok(Some(session))
        }
        Err(ApiError::Unauthorized) => {
            warn!("stored session rejected, clearing it");
            store.clear()?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[derive(Debug, Clone, Validate)]
pub struct NewUser {
    #[validate(custom(function = "common::not_blank", message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub department: Option<String>,
    pub role: Option<models::Role>,
    pub face_image: Option<PathBuf>,
}

impl NewUser {
    pub(crate) async fn into_form(self) -> Result<Form, ApiError> {
        self.validate()?;
        let mut form = Form::new()
            .text("name", self.name.trim().to_string())
            .text("email", self.email.trim().to_string())
            .text("password", self.password);
        if let Some(dept) = self.department.filter(|d| !d.trim().is_empty()) {
            form = form.text("department", dept);
        }
        if let Some(role) = self.role {
            form = form.text("role", role.to_string());
        }
        if let Some(path) = self.face_image {
            form = form.part("faceImage", file_part(&path).await?);
        }
        Ok(form)
    }
}

/// Self-registration. Returns a session when the server logs the new user
/// straight in.
pub async fn register(api: &ApiClient, user: NewUser) -> Result<Option<Session>, ApiError> {
    let form = user.into_form().await?;
    let resp: serde_json::Value = api
        .send(api.request(Method::POST, "/auth/register", None).multipart(form))
        .await?;

    let token = resp.get("token").and_then(|t| t.as_str()).map(str::to_string);
    let user = resp
        .get("user")
        .cloned()
        .map(serde_json::from_value::<User>)
        .transpose()
        .map_err(|e| ApiError::Malformed(e.to_string()))?;

    Ok(match (token, user) {
        (Some(token), Some(user)) if !token.is_empty() => Some(Session::new(token, user)),
        _ => None,
    })
}

/// Checks a face image against the one enrolled for `email`.
pub async fn verify_face(api: &ApiClient, email: &str, image: &Path) -> Result<FaceCheck, ApiError> {
    let form = Form::new()
        .text("email", email.trim().to_string())
        .part("faceImage", file_part(image).await?);
    api.send(api.request(Method::POST, "/auth/verify-face", None).multipart(form))
        .await
}

#[derive(Debug, Validate)]
struct PasswordReset {
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    new_password: String,
}

/// Resets a forgotten password after a face check.
pub async fn reset_password_with_face(
    api: &ApiClient,
    email: &str,
    new_password: &str,
    image: &Path,
) -> Result<FaceCheck, ApiError> {
    PasswordReset {
        new_password: new_password.to_string(),
    }
    .validate()?;
    let form = Form::new()
        .text("email", email.trim().to_string())
        .text("newPassword", new_password.to_string())
        .part("faceImage", file_part(image).await?);
    api.send(
        api.request(Method::POST, "/auth/verify-face-reset", None)
            .multipart(form),
    )
    .await
}
