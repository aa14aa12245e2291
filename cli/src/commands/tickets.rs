use anyhow::{Context, Result, bail};
use clap::Subcommand;
use client::tickets::{self, NewTicket};
use colored::Colorize;
use models::{Category, Mood, Priority, TicketStatus};
use services::filter_bar::parse_choice;
use services::{HttpBackend, ScopeHandle, TicketDetail, TicketList};
use std::path::PathBuf;
use tracing::debug;

use crate::app::App;
use crate::{prompt, render};

#[derive(Subcommand, Debug)]
pub enum TicketsCommand {
    /// List tickets visible to you
    List {
        /// `all` or a status
        #[arg(long, default_value = "all")]
        status: String,
        /// `all` or a mood (staff only)
        #[arg(long, default_value = "all")]
        mood: String,
        /// Match ticket number, title or description
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Show one ticket with its history and comments
    Show { id: String },
    /// Change the status of a ticket, after confirmation
    Status {
        id: String,
        /// Target status; omit to list the choices
        status: Option<TicketStatus>,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Close a ticket you filed
    Close { id: String },
    /// Reopen a closed ticket you filed
    Reopen { id: String },
    /// Add a comment
    Comment {
        id: String,
        content: String,
        /// Staff-only note hidden from the requester
        #[arg(long)]
        internal: bool,
    },
    /// Move a ticket to another category
    Category {
        id: String,
        category: Category,
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Assign a ticket to a user
    Assign { id: String, user_id: String },
    /// Change the priority of a ticket
    Priority { id: String, priority: Priority },
    /// File a new ticket
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        priority: Option<Priority>,
        /// Up to five files
        #[arg(long = "attach")]
        attachments: Vec<PathBuf>,
    },
    /// Ticket counts
    Stats,
    /// Historical resolution figures for a category
    DeptStats { category: Category },
}

pub async fn run(app: &App, cmd: TicketsCommand) -> Result<()> {
    let session = app.session().await?;

    match cmd {
        TicketsCommand::List {
            status,
            mood,
            search,
            page,
            limit,
        } => {
            let status: Option<TicketStatus> =
                parse_choice(&status).with_context(|| format!("unknown status `{status}`"))?;
            let mood: Option<Mood> =
                parse_choice(&mood).with_context(|| format!("unknown mood `{mood}`"))?;

            let actor = session.user().clone();
            let mut list = TicketList::new(app.backend(session), actor, app.config.filter_create_shortcut)
                .with_page_size(limit);
            cancel_on_ctrl_c(list.scope_handle());
            {
                let filters = list.filters_mut();
                filters.set_status(status);
                if mood.is_some() && !filters.set_mood(mood) {
                    debug!("mood filter ignored for non-staff");
                }
                if let Some(search) = &search {
                    filters.set_search(search);
                }
            }

            let ok = list.go_to(page).await;
            if render::drain_notices(list.notices_mut()) || !ok {
                bail!("could not load tickets");
            }

            let visible = list.visible();
            if visible.is_empty() {
                println!("{}", "No tickets found.".dimmed());
            }
            for ticket in &visible {
                println!("{}", render::ticket_row(ticket));
            }
            if let Some(p) = list.pagination() {
                println!("\n{}  ({} total)", list.pager_line(), p.total);
            }
            if list.filters().shows_create_shortcut() {
                println!("{}", "New issue? helpdesk tickets create --title … --description …".dimmed());
            }
        }
        TicketsCommand::Show { id } => {
            let view = open(app, session, &id).await?;
            if let Some(ticket) = view.visible_ticket() {
                render::ticket_detail(&ticket, view.displayed_status(), view.forecast());
            }
            if view.can_change_status() {
                println!("\n{}", "Status choices".underline());
                render::status_options(&view.status_options());
            }
        }
        TicketsCommand::Status { id, status, yes } => {
            let mut view = open(app, session, &id).await?;
            let options = view.status_options();
            let Some(target) = status else {
                render::status_options(&options);
                return Ok(());
            };
            let Some(choice) = options.iter().find(|o| o.status == target) else {
                bail!("`{target}` is not one of your status choices for this ticket");
            };

            view.request_status(choice.status);
            let question = format!("{}: set status to {}?", choice.label, choice.status);
            if !yes && !prompt::confirm(&question)? {
                view.cancel_status_change();
                println!("Cancelled.");
                return Ok(());
            }
            let changed = view.confirm_status_change().await;
            finish(&mut view, changed)?;
        }
        TicketsCommand::Close { id } => {
            let mut view = open(app, session, &id).await?;
            let changed = view.close_ticket().await;
            finish(&mut view, changed)?;
        }
        TicketsCommand::Reopen { id } => {
            let mut view = open(app, session, &id).await?;
            let changed = view.reopen_ticket().await;
            finish(&mut view, changed)?;
        }
        TicketsCommand::Comment {
            id,
            content,
            internal,
        } => {
            let mut view = open(app, session, &id).await?;
            let changed = view.add_comment(&content, internal).await;
            finish(&mut view, changed)?;
        }
        TicketsCommand::Category {
            id,
            category,
            comment,
        } => {
            let mut view = open(app, session, &id).await?;
            let changed = view.change_category(category, &comment).await;
            finish(&mut view, changed)?;
        }
        TicketsCommand::Assign { id, user_id } => {
            let mut view = open(app, session, &id).await?;
            let changed = view.assign(&user_id).await;
            finish(&mut view, changed)?;
        }
        TicketsCommand::Priority { id, priority } => {
            let mut view = open(app, session, &id).await?;
            let changed = view.change_priority(priority).await;
            finish(&mut view, changed)?;
        }
        TicketsCommand::Create {
            title,
            description,
            priority,
            attachments,
        } => {
            let draft = NewTicket {
                priority,
                attachments,
                ..NewTicket::new(title, description)
            };
            let ticket = tickets::create_ticket(&app.api, &session, draft).await?;
            println!("{} {}", "Ticket created:".green().bold(), render::ticket_row(&ticket));
        }
        TicketsCommand::Stats => {
            render::json(&tickets::ticket_stats(&app.api, &session).await?);
        }
        TicketsCommand::DeptStats { category } => {
            let stats = tickets::department_stats(&app.api, &session, category).await?;
            println!("{}", stats.forecast());
        }
    }
    Ok(())
}

/// Loads the detail view; a failed load is reported and ends the command.
async fn open(
    app: &App,
    session: client::Session,
    id: &str,
) -> Result<TicketDetail<HttpBackend>> {
    let actor = session.user().clone();
    let mut view = TicketDetail::new(app.backend(session), actor, id);
    cancel_on_ctrl_c(view.scope_handle());
    if !view.load().await {
        render::drain_notices(view.notices_mut());
        bail!("could not load ticket {id}");
    }
    Ok(view)
}

/// Prints the outcome of an update and the resulting status.
fn finish(view: &mut TicketDetail<HttpBackend>, changed: bool) -> Result<()> {
    let failed = render::drain_notices(view.notices_mut());
    if failed {
        bail!("ticket was not updated");
    }
    if !changed {
        println!("Interrupted; nothing was changed.");
        return Ok(());
    }
    if let Some(status) = view.displayed_status() {
        println!("{} {}", "Status:".dimmed(), render::status(status));
    }
    Ok(())
}

fn cancel_on_ctrl_c(handle: ScopeHandle) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.close();
        }
    });
}
