use anyhow::{Result, bail};
use clap::Subcommand;
use client::auth::{self, NewUser};
use client::logout;
use colored::Colorize;
use models::Role;
use std::path::PathBuf;

use crate::app::App;
use crate::prompt;

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        /// Read from the terminal when omitted
        #[arg(long, env = "HELPDESK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        department: Option<String>,
        /// Face image enrolled for password recovery
        #[arg(long)]
        face: Option<PathBuf>,
    },
    /// Check a face image against the account's enrolled face
    VerifyFace {
        #[arg(long)]
        email: String,
        #[arg(long)]
        image: PathBuf,
    },
    /// Reset a forgotten password with a face check
    ResetPassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        new_password: String,
        #[arg(long)]
        image: PathBuf,
    },
}

pub async fn run(app: &App, cmd: AuthCommand) -> Result<()> {
    match cmd {
        AuthCommand::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt::ask("Password: ")?,
            };
            let session = auth::login(&app.api, &email, &password).await?;
            app.store.save(&session)?;
            println!(
                "{} {} ({})",
                "Logged in as".green(),
                session.user().name.bold(),
                session.role()
            );
        }
        AuthCommand::Logout => match app.store.load()? {
            Some(session) => {
                logout(&app.store, session)?;
                println!("Logged out.");
            }
            None => println!("Not logged in."),
        },
        AuthCommand::Whoami => {
            let session = app.session().await?;
            let user = session.user();
            println!("{} <{}>", user.name.bold(), user.email);
            println!("role: {}", user.role);
            if let Some(dept) = &user.department {
                println!("department: {dept}");
            }
        }
        AuthCommand::Register {
            name,
            email,
            password,
            department,
            face,
        } => {
            let user = NewUser {
                name,
                email,
                password,
                department,
                role: Some(Role::Employee),
                face_image: face,
            };
            match auth::register(&app.api, user).await? {
                Some(session) => {
                    app.store.save(&session)?;
                    println!("Registered and logged in as {}.", session.user().name.bold());
                }
                None => println!("Registered. You can now log in."),
            }
        }
        AuthCommand::VerifyFace { email, image } => {
            let check = auth::verify_face(&app.api, &email, &image).await?;
            if !check.success {
                bail!(check.message.unwrap_or_else(|| "Face verification failed".into()));
            }
            println!("{}", "Face verified.".green());
        }
        AuthCommand::ResetPassword {
            email,
            new_password,
            image,
        } => {
            let check = auth::reset_password_with_face(&app.api, &email, &new_password, &image).await?;
            if !check.success {
                bail!(check.message.unwrap_or_else(|| "Face verification failed".into()));
            }
            println!("{}", "Password reset. You can now log in.".green());
        }
    }
    Ok(())
}
