use anyhow::Result;
use clap::Subcommand;
use client::{admin, TicketQuery, UserQuery};

use crate::app::App;
use crate::render;

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Dashboard figures
    Dashboard,
    /// Raw user listing
    Users {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Raw ticket listing
    Tickets {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

pub async fn run(app: &App, cmd: AdminCommand) -> Result<()> {
    let session = app.session().await?;
    let body = match cmd {
        AdminCommand::Dashboard => admin::dashboard_stats(&app.api, &session).await?,
        AdminCommand::Users { page } => {
            let query = UserQuery {
                page: Some(page),
                ..Default::default()
            };
            admin::admin_users(&app.api, &session, &query).await?
        }
        AdminCommand::Tickets { page } => {
            let query = TicketQuery {
                page: Some(page),
                ..Default::default()
            };
            admin::admin_tickets(&app.api, &session, &query).await?
        }
    };
    render::json(&body);
    Ok(())
}
