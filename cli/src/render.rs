//! Terminal rendering for tickets, users and notices.

use colored::{ColoredString, Colorize};
use models::{Priority, Ticket, TicketStatus, User};
use services::{Notice, Notices, Severity, StatusOption};

pub fn status(status: TicketStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        TicketStatus::Open => label.blue(),
        TicketStatus::InProgress => label.yellow(),
        TicketStatus::Resolved => label.green(),
        TicketStatus::Closed => label.dimmed(),
    }
}

pub fn priority(priority: Priority) -> ColoredString {
    let label = priority.to_string();
    match priority {
        Priority::Low => label.normal(),
        Priority::Medium => label.cyan(),
        Priority::High => label.yellow(),
        Priority::Critical => label.red().bold(),
    }
}

pub fn ticket_row(ticket: &Ticket) -> String {
    let mood = ticket.mood.map(|m| format!(" {}", m.icon())).unwrap_or_default();
    format!(
        "{:<10} {:<12} {:<9} {}{}",
        ticket.ticket_number.bold(),
        status(ticket.status),
        priority(ticket.priority),
        ticket.title,
        mood
    )
}

pub fn ticket_detail(ticket: &Ticket, displayed: Option<TicketStatus>, forecast: Option<&str>) {
    let shown = displayed.unwrap_or(ticket.status);
    println!("{} {}", ticket.ticket_number.bold(), ticket.title.bold());
    println!(
        "{} {}  {} {}  {} {}",
        "Status:".dimmed(),
        status(shown),
        "Priority:".dimmed(),
        priority(ticket.priority),
        "Category:".dimmed(),
        ticket.category
    );
    if let Some(mood) = ticket.mood {
        println!("{} {} {}", "Mood:".dimmed(), mood.icon(), mood);
    }
    println!("{} {}", "Requester:".dimmed(), ticket.requester.name);
    if let Some(assignee) = &ticket.assigned_to {
        println!("{} {}", "Assigned To:".dimmed(), assignee.name);
    }
    println!(
        "{} {}",
        "Created:".dimmed(),
        ticket.created_at.format("%Y-%m-%d %H:%M")
    );
    println!("\n{}\n", ticket.description);

    if !ticket.attachments.is_empty() {
        println!("{}", "Attachments".underline());
        for a in &ticket.attachments {
            println!("  {} ({})", a.original_name, a.url);
        }
        println!();
    }

    if let Some(forecast) = forecast {
        println!("{} {}\n", "Forecast:".magenta().bold(), forecast);
    }

    if !ticket.status_history.is_empty() {
        println!("{}", "Status history".underline());
        for change in &ticket.status_history {
            let note = change
                .comment
                .as_deref()
                .map(|c| format!(": {c}"))
                .unwrap_or_default();
            println!(
                "  {} {} by {}{}",
                change.changed_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
                status(change.status),
                change.changed_by.name,
                note
            );
        }
        println!();
    }

    if !ticket.history.is_empty() {
        println!("{}", "Changes".underline());
        for change in &ticket.history {
            println!(
                "  {} {} changed from {} to {} by {}",
                change.changed_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
                change.kind,
                change.old_value.as_deref().unwrap_or("none"),
                change.new_value.as_deref().unwrap_or("none"),
                change.changed_by.name
            );
        }
        println!();
    }

    println!("{}", "Comments".underline());
    if ticket.comments.is_empty() {
        println!("  {}", "No comments yet.".dimmed());
    }
    for c in &ticket.comments {
        let tag = if c.is_internal { " [internal]".yellow().to_string() } else { String::new() };
        println!(
            "  {} {}{}: {}",
            c.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            c.author.name.bold(),
            tag,
            c.content
        );
    }
}

pub fn status_options(options: &[StatusOption]) {
    if options.is_empty() {
        println!("{}", "You cannot change the status of this ticket.".dimmed());
        return;
    }
    for option in options {
        println!("  {:<12} {}", status(option.status), option.label);
    }
}

pub fn user_row(user: &User) {
    println!(
        "{:<26} {:<24} {:<28} {:<12} {}",
        user.id.dimmed(),
        user.name,
        user.email,
        user.role.to_string().cyan(),
        user.department.as_deref().unwrap_or("")
    );
}

fn notice(n: &Notice) {
    match n.severity {
        Severity::Info => println!("{} {}", format!("{}:", n.title).green().bold(), n.description),
        Severity::Destructive => {
            eprintln!("{} {}", format!("{}:", n.title).red().bold(), n.description)
        }
    }
}

/// Prints and clears every pending notice. Returns true if any was an error.
pub fn drain_notices(notices: &mut Notices) -> bool {
    let drained = notices.drain();
    drained.iter().for_each(notice);
    drained.iter().any(|n| n.severity == Severity::Destructive)
}

pub fn json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}
