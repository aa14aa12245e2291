mod app;
mod commands;
mod prompt;
mod render;

use clap::{Parser, Subcommand};
use common::config::Config;
use common::logger::init_logging;
use tracing::{error, info};

use crate::app::App;
use crate::commands::{admin, assistant, auth, health, tickets, users};

#[derive(Parser, Debug)]
#[command(name = "helpdesk", version, about = "Helpdesk tickets from the terminal")]
struct Cli {
    /// Optional .env file read before the environment
    #[arg(long, global = true, default_value = ".env")]
    env_file: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Auth(auth::AuthCommand),

    /// Ticket list, detail and updates
    #[command(subcommand)]
    Tickets(tickets::TicketsCommand),

    /// Describe an issue in plain words and file it as a ticket
    Voice {
        /// Transcript of the spoken issue
        #[arg(required = true, num_args = 1..)]
        transcript: Vec<String>,
    },

    #[command(flatten)]
    Assistant(assistant::AssistantCommand),

    /// User management
    #[command(subcommand)]
    Users(users::UsersCommand),

    /// Admin dashboard
    #[command(subcommand)]
    Admin(admin::AdminCommand),

    /// Check that the backend and the AI service answer
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::init(&cli.env_file);
    let _log_guard = init_logging(config);
    info!(project = %config.project_name, api = %config.api_base_url, "starting");

    let app = App::new(config)?;
    let result = match cli.command {
        Command::Auth(cmd) => auth::run(&app, cmd).await,
        Command::Tickets(cmd) => tickets::run(&app, cmd).await,
        Command::Voice { transcript } => assistant::voice(&app, &transcript.join(" ")).await,
        Command::Assistant(cmd) => assistant::run(&app, cmd).await,
        Command::Users(cmd) => users::run(&app, cmd).await,
        Command::Admin(cmd) => admin::run(&app, cmd).await,
        Command::Health => health::run(&app).await,
    };

    if let Err(e) = &result {
        error!(error = %e, "command failed");
    }
    result
}
