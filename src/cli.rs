//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

use crate::storage::UserRole;

/// Livescore - football scores, news and the back-office API
#[derive(Parser)]
#[command(name = "livescore")]
#[command(version)]
#[command(about = "Football livescore backend", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Create a back-office account
    CreateUser {
        username: String,

        email: String,

        /// user, editor or admin
        #[arg(long, default_value = "admin")]
        role: UserRole,

        /// Password (if not provided, will prompt interactively)
        #[arg(long)]
        password: Option<String>,

        /// Read password from stdin (for scripting)
        #[arg(long)]
        stdin: bool,
    },

    /// Fetch every news source once and store the articles
    SyncNews,

    /// Write a config file filled with the defaults
    GenerateConfig {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["livescore"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_create_user_args() {
        let cli = Cli::try_parse_from([
            "livescore",
            "create-user",
            "editor1",
            "editor@example.com",
            "--role",
            "editor",
            "--config",
            "prod.toml",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("prod.toml"));
        assert_eq!(
            cli.command,
            Some(Commands::CreateUser {
                username: "editor1".to_string(),
                email: "editor@example.com".to_string(),
                role: UserRole::Editor,
                password: None,
                stdin: false,
            })
        );
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(
            Cli::try_parse_from(["livescore", "create-user", "a", "a@b.co", "--role", "root"])
                .is_err()
        );
    }
}
