use reqwest::{Client, StatusCode, redirect};
use std::time::Duration;

/// Shared HTTP client: bounded request time, limited redirects, and a
/// user agent naming the caller.
pub fn build_client(agent: &str, timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(format!("{agent}/{}", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(redirect::Policy::limited(5))
        .build()
}

/// Returns true if the URL appears reachable (2xx/3xx considered alive).
///  - HEAD first (fast), fall back to GET on 405/501.
pub async fn is_url_alive(client: &Client, url: &str) -> Result<bool, reqwest::Error> {
    if let Ok(resp) = client.head(url).send().await {
        let code = resp.status();
        if is_alive(code) {
            return Ok(true);
        }
        if code != StatusCode::METHOD_NOT_ALLOWED && code != StatusCode::NOT_IMPLEMENTED {
            tracing::debug!(%url, status = %code, "HEAD probe rejected");
            return Ok(false);
        }
    }

    let code = client.get(url).send().await?.status();
    Ok(is_alive(code))
}

fn is_alive(code: StatusCode) -> bool {
    code.is_success() || code.is_redirection() || code == StatusCode::NOT_MODIFIED
}
