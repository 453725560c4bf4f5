//! Login command - sign in and store the session.

use std::io::Write;

use anyhow::Context;
use clap::Args;
use console::style;

use sdbx_core::ApiClient;

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(short, long)]
    email: String,

    /// Account password (prompted when omitted)
    #[arg(short, long)]
    password: Option<String>,
}

pub async fn run(args: LoginArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let password = match args.password {
        Some(password) => password,
        None => prompt_password()?,
    };

    let api = ApiClient::new(&config.api.base_url)?;
    let session = api.login(&args.email, &password).await?.into_session();

    let path = super::session_path();
    session.save(&path)?;

    println!(
        "{} Signed in as {} ({})",
        style("✓").green(),
        style(&session.email).cyan(),
        session.role.as_deref().unwrap_or("user")
    );
    println!("Session stored at {}", path.display());

    Ok(())
}

fn prompt_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush().ok();

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;

    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("empty password");
    }
    Ok(password)
}
