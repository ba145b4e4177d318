//! directory-client - terminal front end for the employee directory

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};

use directory::client::{DirectoryApi, DirectorySession, Field, SubmitOutcome, UserForm};

/// Employee directory client
#[derive(Parser)]
#[command(name = "directory-client", version, about, long_about = None)]
struct Cli {
    /// Base URL of the directory service
    #[arg(long, env = "DIRECTORY_API_URL", default_value = "http://localhost:5000")]
    api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

const ACTIONS: [&str; 4] = ["Add user", "Delete user", "Refresh", "Quit"];

fn main() -> Result<()> {
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "directory=warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = DirectoryApi::new(&cli.api_url, Duration::from_secs(cli.timeout_secs))?;
    let api_status = match api.health_check() {
        Ok(h) => h.status,
        Err(_) => "unreachable".to_string(),
    };

    let mut session = DirectorySession::new(api);
    session.load();

    loop {
        println!(
            "\n{}",
            directory::client::render::render_page(session.view(), &api_status, Instant::now())
        );

        let choice = Select::new()
            .with_prompt("Action")
            .items(&ACTIONS)
            .default(0)
            .interact()?;

        match choice {
            0 => add_user(&mut session)?,
            1 => delete_user(&mut session)?,
            2 => session.load(),
            _ => break,
        }
    }
    Ok(())
}

fn add_user(session: &mut DirectorySession) -> Result<()> {
    println!("\n{}", "Add New User".bold());
    let mut form = UserForm::default();

    loop {
        for field in [Field::Name, Field::Email, Field::City, Field::Country] {
            let value: String = Input::new()
                .with_prompt(format!("{field} *"))
                .with_initial_text(form.value(field))
                .allow_empty(true)
                .interact_text()?;
            form.set(field, value);
        }

        match session.submit(&form) {
            SubmitOutcome::Invalid(errors) => {
                for (field, msg) in &errors {
                    eprintln!("{}", format!("{field}: {msg}").red());
                }
                if !Confirm::new()
                    .with_prompt("Fix and try again?")
                    .default(true)
                    .interact()?
                {
                    return Ok(());
                }
            }
            SubmitOutcome::Created(_) | SubmitOutcome::Failed => return Ok(()),
        }
    }
}

fn delete_user(session: &mut DirectorySession) -> Result<()> {
    let users = session.view().snapshot();
    if users.is_empty() {
        println!("{}", "No users to delete".dimmed());
        return Ok(());
    }

    let labels: Vec<String> = users
        .iter()
        .map(|u| format!("{} - {} <{}>", u.id, u.name, u.email))
        .collect();
    let Some(idx) = Select::new()
        .with_prompt("Delete which user? (Esc to cancel)")
        .items(&labels)
        .interact_opt()?
    else {
        return Ok(());
    };

    let mut prompt_err = None;
    session.delete(users[idx].id, || {
        match Confirm::new()
            .with_prompt("Are you sure you want to delete this user?")
            .default(false)
            .interact()
        {
            Ok(yes) => yes,
            Err(e) => {
                prompt_err = Some(e);
                false
            }
        }
    });
    if let Some(e) = prompt_err {
        return Err(e.into());
    }
    Ok(())
}
