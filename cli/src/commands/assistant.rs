use ai::{AiService, BackendAssistant, Conversation};
use anyhow::Result;
use clap::Subcommand;
use client::tickets;
use colored::Colorize;

use crate::app::App;
use crate::{prompt, render};

#[derive(Subcommand, Debug)]
pub enum AssistantCommand {
    /// Summarize a ticket, optionally translated
    Summary {
        id: String,
        /// Target language code, e.g. `es`
        #[arg(long, default_value = "en")]
        lang: String,
    },
    /// Languages the summary can be translated into
    Languages,
    /// Suggested replies for a ticket
    Suggest { id: String },
    /// Ask the assistant; without a message, start an interactive chat
    Chat { message: Option<String> },
}

pub async fn run(app: &App, cmd: AssistantCommand) -> Result<()> {
    match cmd {
        AssistantCommand::Summary { id, lang } => {
            let session = app.session().await?;
            let ticket = tickets::get_ticket(&app.api, &session, &id).await?;
            let service = AiService::new(app.ai_api.clone());

            let summary = service.summarize(&ticket, session.role()).await?;
            let summary = service.translate(&summary, &lang).await?;
            println!("{} {}", ticket.ticket_number.bold(), ticket.title.bold());
            println!("{summary}");
        }
        AssistantCommand::Languages => {
            let service = AiService::new(app.ai_api.clone());
            for (code, name) in service.languages().await? {
                println!("{code:<6} {name}");
            }
        }
        AssistantCommand::Suggest { id } => {
            let session = app.session().await?;
            let role = session.role();
            let assistant = BackendAssistant::new(app.api.clone(), Some(session));
            let suggestions = assistant.suggestions(&id, role).await?;
            if suggestions.is_empty() {
                println!("{}", "No suggestions for this ticket.".dimmed());
            }
            for (i, s) in suggestions.iter().enumerate() {
                println!("{}. {}", i + 1, s.response);
                if !s.rationale.is_empty() {
                    println!("   {}", s.rationale.dimmed());
                }
            }
        }
        AssistantCommand::Chat { message } => {
            let session = app.optional_session().await?;
            let mut convo = Conversation::new(BackendAssistant::new(app.api.clone(), session));
            match message {
                Some(message) => {
                    if let Some(reply) = convo.send(&message).await {
                        println!("{}", reply.content);
                    }
                }
                None => chat_loop(&mut convo).await?,
            }
        }
    }
    Ok(())
}

async fn chat_loop(convo: &mut Conversation<BackendAssistant>) -> Result<()> {
    println!("{}", "Type a question; an empty line or `exit` quits.".dimmed());
    loop {
        let input = prompt::ask(&format!("{} ", "you>".cyan().bold()))?;
        if input.is_empty() || input.eq_ignore_ascii_case("exit") {
            return Ok(());
        }
        if let Some(reply) = convo.send(&input).await {
            println!("{} {}", "assistant>".magenta().bold(), reply.content);
        }
    }
}

/// Drafts a ticket from a transcript and files it.
pub async fn voice(app: &App, transcript: &str) -> Result<()> {
    let session = app.session().await?;
    let assistant = BackendAssistant::new(app.api.clone(), Some(session));
    let ticket = assistant.file_voice_ticket(transcript).await?;
    println!("{} {}", "Ticket created:".green().bold(), render::ticket_row(&ticket));
    Ok(())
}
