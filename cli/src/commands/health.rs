use anyhow::{Result, bail};
use colored::Colorize;

use crate::app::App;

pub async fn run(app: &App) -> Result<()> {
    let targets = [
        ("backend", app.api.url("/health")),
        ("ai service", app.ai_api.base_url().to_string()),
    ];

    let mut down = 0;
    for (name, url) in &targets {
        let alive = util::http::is_url_alive(app.api.http(), url)
            .await
            .unwrap_or(false);
        let mark = if alive { "up".green() } else { "down".red() };
        println!("{name:<11} {mark}  {}", url.dimmed());
        if !alive {
            down += 1;
        }
    }
    if down > 0 {
        bail!("{down} service(s) unreachable");
    }
    Ok(())
}
