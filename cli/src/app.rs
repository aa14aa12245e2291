use anyhow::{Context, Result, bail};
use client::auth::restore_session;
use client::{ApiClient, Session, SessionStore};
use common::config::Config;
use services::HttpBackend;

/// Everything a command needs: config, clients and the session store.
pub struct App {
    pub config: &'static Config,
    pub api: ApiClient,
    pub ai_api: ApiClient,
    pub store: SessionStore,
}

impl App {
    pub fn new(config: &'static Config) -> Result<Self> {
        let api = ApiClient::new(&config.api_base_url, config.request_timeout_secs)
            .context("building backend client")?;
        let ai_api = ApiClient::new(&config.ai_base_url, config.request_timeout_secs)
            .context("building AI service client")?;
        Ok(Self {
            config,
            api,
            ai_api,
            store: SessionStore::new(&config.session_file),
        })
    }

    /// The persisted session, checked against the backend.
    pub async fn session(&self) -> Result<Session> {
        match restore_session(&self.api, &self.store).await? {
            Some(session) => Ok(session),
            None => bail!("Not logged in. Run `helpdesk login` first."),
        }
    }

    /// Like [`App::session`] but a missing login is not an error.
    pub async fn optional_session(&self) -> Result<Option<Session>> {
        Ok(restore_session(&self.api, &self.store).await?)
    }

    pub fn backend(&self, session: Session) -> HttpBackend {
        HttpBackend::new(self.api.clone(), session)
    }
}
