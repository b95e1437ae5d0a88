use anyhow::Result;
use clap::Parser;

use livescore::cli::{Cli, Commands};
use livescore::config::{StaticConfig, get_config, init_config, init_config_with};
use livescore::runtime::modes::{self, Mode};
use livescore::system::init_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.config.as_deref() {
        Some(path) => init_config_with(StaticConfig::load_from(path)),
        None => init_config(),
    }

    let config = get_config();
    let _guard = init_logging(&config.logging);

    match modes::detect_mode(cli.command.as_ref()) {
        #[cfg(feature = "server")]
        Mode::Server => modes::run_server().await,
        #[cfg(feature = "cli")]
        Mode::Cli => modes::run_cli(cli.command.unwrap_or(Commands::Serve)).await,
        Mode::Unknown => {
            anyhow::bail!("No execution mode available; enable the `server` feature")
        }
    }
}
