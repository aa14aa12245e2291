//! Explicit session context.
//!
//! A [`Session`] is created by a successful login and handed to every
//! authenticated call. [`SessionStore`] persists it between CLI runs;
//! logging out drops the session and deletes the file.

use models::{Role, User};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::ApiError;

#[derive(Clone, Serialize, Deserialize)]
pub struct Session {
    token: String,
    user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub(crate) fn with_user(self, user: User) -> Self {
        Self { user, ..self }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user.id)
            .field("role", &self.user.role)
            .finish()
    }
}

/// File-backed persistence for one session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored session, if any. A corrupt file counts as logged out.
    pub fn load(&self) -> Result<Option<Session>, ApiError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), ApiError> {
        util::paths::ensure_parent_dir(&self.path)?;
        let raw = serde_json::to_string_pretty(session)
            .map_err(|e| ApiError::Malformed(e.to_string()))?;
        let mut file = open_private(&self.path)?;
        file.write_all(raw.as_bytes())?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ApiError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Opens `path` for writing, readable by the owner only.
#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

/// Ends `session` and forgets the persisted token.
pub fn logout(store: &SessionStore, session: Session) -> Result<(), ApiError> {
    info!(user = %session.user().id, "logging out");
    drop(session);
    store.clear()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn employee() -> User {
        User {
            id: "u-1".into(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            role: Role::Employee,
            department: Some("Sales".into()),
            avatar: None,
        }
    }

    #[test]
    fn save_load_clear_cycle() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::new(tmp.path().join("nested/session.json"));
        assert!(store.load().unwrap().is_none());

        store.save(&Session::new("tok-123", employee())).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token(), "tok-123");
        assert_eq!(loaded.role(), Role::Employee);

        logout(&store, loaded).unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("session.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = SessionStore::new(&path);
        store.save(&Session::new("tok-123", employee())).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().unwrap().unwrap().token(), "tok-123");

        let fresh = SessionStore::new(tmp.path().join("fresh/session.json"));
        fresh.save(&Session::new("tok-456", employee())).unwrap();
        let mode = fs::metadata(fresh.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn corrupt_file_reads_as_logged_out() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        assert!(SessionStore::new(path).load().unwrap().is_none());
    }

    #[test]
    fn debug_output_hides_token() {
        let rendered = format!("{:?}", Session::new("secret-token", employee()));
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("u-1"));
    }
}
