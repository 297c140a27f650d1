use clap::Parser;
use recipe_catalog::infrastructure::config::AppConfig;
use recipe_catalog::infrastructure::logging::init_logging;
use recipe_catalog::presentation::Cli;
use recipe_catalog::presentation::handlers::{HttpAppState, run};
use tracing::{debug, info};

async fn execute(cli: Cli) -> anyhow::Result<bool> {
    let config = AppConfig::from_env()?;
    debug!(?config, "Configuration loaded");
    let state = HttpAppState::from_config(&config)?;
    run(cli, &state).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    match execute(cli).await {
        Ok(true) => Ok(()),
        Ok(false) => {
            info!("Command reported a failure");
            std::process::exit(1);
        }
        Err(e) => {
            match std::env::var("CLI_VERBOSE").as_deref() {
                Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
                _ => eprintln!("Error: {e}"),
            }
            std::process::exit(1);
        }
    }
}
