use anyhow::Result;
use clap::Subcommand;
use client::auth::NewUser;
use client::users::{self, PasswordChange, UserUpdate};
use client::UserQuery;
use colored::Colorize;
use models::Role;
use std::path::PathBuf;

use crate::app::App;
use crate::{prompt, render};

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List users
    List {
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Create a user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "employee")]
        role: Role,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        face: Option<PathBuf>,
    },
    /// Edit a user's profile
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        department: Option<String>,
    },
    /// Delete a user
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// User counts
    Stats,
    /// Change your own password
    Passwd {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },
}

pub async fn run(app: &App, cmd: UsersCommand) -> Result<()> {
    let session = app.session().await?;

    match cmd {
        UsersCommand::List {
            role,
            department,
            page,
            limit,
        } => {
            let query = UserQuery {
                role,
                department,
                page: Some(page),
                limit: Some(limit),
            };
            let page = users::list_users(&app.api, &session, &query).await?;
            for user in &page.users {
                render::user_row(user);
            }
            println!(
                "\npage {} of {}  ({} total)",
                page.current_page, page.total_pages, page.total
            );
        }
        UsersCommand::Create {
            name,
            email,
            password,
            role,
            department,
            face,
        } => {
            let user = NewUser {
                name,
                email,
                password,
                department,
                role: Some(role),
                face_image: face,
            };
            let created = users::create_user(&app.api, &session, user).await?;
            println!("{} {} ({})", "Created".green(), created.name.bold(), created.id);
        }
        UsersCommand::Update {
            id,
            name,
            email,
            role,
            department,
        } => {
            let update = UserUpdate {
                name,
                email,
                role,
                department,
            };
            let user = users::update_user(&app.api, &session, &id, &update).await?;
            render::user_row(&user);
        }
        UsersCommand::Delete { id, yes } => {
            if !yes && !prompt::confirm(&format!("Delete user {id}?"))? {
                println!("Cancelled.");
                return Ok(());
            }
            users::delete_user(&app.api, &session, &id).await?;
            println!("Deleted {id}.");
        }
        UsersCommand::Stats => {
            render::json(&users::user_stats(&app.api, &session).await?);
        }
        UsersCommand::Passwd { current, new } => {
            let change = PasswordChange {
                current_password: current,
                new_password: new,
            };
            users::change_password(&app.api, &session, &change).await?;
            println!("{}", "Password changed.".green());
        }
    }
    Ok(())
}
