//! CLI mode
//!
//! One-shot commands that share the server's storage and services.

use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use crate::cli::Commands;
use crate::config::StaticConfig;
use crate::runtime::lifetime::startup::prepare_context;
use crate::storage::{NewUser, UserRole};

/// Run one CLI command
pub async fn run_cli(command: Commands) -> Result<()> {
    match command {
        Commands::GenerateConfig { output_path, force } => generate_config(output_path, force),
        Commands::CreateUser {
            username,
            email,
            role,
            password,
            stdin,
        } => create_user(username, email, role, password, stdin).await,
        Commands::SyncNews => sync_news().await,
        Commands::Serve => super::run_server().await,
    }
}

fn confirm_overwrite(path: &str) -> Result<bool> {
    print!(
        "{} {} {}",
        "File already exists:".yellow(),
        path.blue(),
        "Overwrite? [y/N] ".yellow()
    );
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn generate_config(output_path: Option<String>, force: bool) -> Result<()> {
    let path = output_path.unwrap_or_else(|| "config.example.toml".to_string());

    if !force && Path::new(&path).exists() && !confirm_overwrite(&path)? {
        println!("{}", "Aborted.".red());
        return Ok(());
    }

    StaticConfig::default()
        .save_to_file(&path)
        .map_err(|e| anyhow!("Unable to write configuration file {}: {}", path, e))?;

    println!(
        "{} {}",
        "Configuration file generated:".green(),
        path.blue()
    );
    Ok(())
}

/// Password from `--stdin`, `--password` or an interactive prompt
fn read_password(password: Option<String>, stdin: bool) -> Result<String> {
    if stdin {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read password from stdin")?;
        return Ok(line.trim().to_string());
    }
    if let Some(password) = password {
        return Ok(password);
    }

    if !io::stdin().is_terminal() {
        bail!("No password provided. Use --password or --stdin flag, or run interactively.");
    }

    let password =
        rpassword::prompt_password("Enter password: ").context("Failed to read password")?;
    let confirm =
        rpassword::prompt_password("Confirm password: ").context("Failed to read password")?;
    if password != confirm {
        bail!("Passwords do not match");
    }
    Ok(password)
}

async fn create_user(
    username: String,
    email: String,
    role: UserRole,
    password: Option<String>,
    stdin: bool,
) -> Result<()> {
    let password = read_password(password, stdin)?;
    let context = prepare_context().await?;

    let user = context
        .users
        .create_user(NewUser {
            username,
            email,
            password,
            role,
            is_active: true,
        })
        .await
        .map_err(|e| anyhow!(e.format_colored()))?;

    println!(
        "{} Created {} '{}' (id {})",
        "✓".green().bold(),
        user.role.as_ref(),
        user.username.cyan(),
        user.id
    );
    Ok(())
}

async fn sync_news() -> Result<()> {
    let context = prepare_context().await?;
    let report = context
        .news
        .sync_all_news()
        .await
        .map_err(|e| anyhow!(e.format_colored()))?;

    for source in &report.sources {
        println!("  {} {} articles", source.source.blue(), source.articles);
    }
    println!(
        "{} Stored {} articles",
        "✓".green().bold(),
        report.stored
    );
    Ok(())
}
