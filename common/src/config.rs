//! Process-wide client configuration.
//!
//! Values come from an optional `.env` file and the environment. Every key
//! has a default, so a bare environment yields a config pointing at a local
//! backend.

use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub project_name: String,
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub api_base_url: String,
    pub ai_base_url: String,
    pub session_file: PathBuf,
    pub request_timeout_secs: u64,
    /// Offer the "Create Ticket" shortcut in the filter bar for non-staff.
    pub filter_create_shortcut: bool,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    /// Loads `env_path` (if present) and freezes the config for the process.
    pub fn init(env_path: &str) -> &'static Self {
        dotenvy::from_filename(env_path).ok();
        CONFIG.get_or_init(Self::from_env)
    }

    pub fn get() -> &'static Self {
        CONFIG.get_or_init(Self::from_env)
    }

    pub fn from_env() -> Self {
        let project_name = env::var("PROJECT_NAME").unwrap_or_else(|_| "helpdesk".into());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".into());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "helpdesk.log".into());
        let log_to_stdout = flag("LOG_TO_STDOUT", false);
        let api_base_url =
            env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:5000/api".into());
        let ai_base_url =
            env::var("AI_BASE_URL").unwrap_or_else(|_| "https://helpdesk-ai.onrender.com".into());
        let session_file = env::var("SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_session_file());
        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);
        let filter_create_shortcut = flag("FILTER_CREATE_SHORTCUT", true);

        Config {
            project_name,
            log_level,
            log_dir,
            log_file,
            log_to_stdout,
            api_base_url,
            ai_base_url,
            session_file,
            request_timeout_secs,
            filter_create_shortcut,
        }
    }
}

fn flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
        Err(_) => default,
    }
}

fn default_session_file() -> PathBuf {
    env::var("HOME")
        .map(|home| PathBuf::from(home).join(".helpdesk").join("session.json"))
        .unwrap_or_else(|_| PathBuf::from(".helpdesk/session.json"))
}
