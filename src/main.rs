use anyhow::Result;
use tokio::io::BufReader;

use instagrab::cli::{Cli, Commands};
use instagrab::commands;
use instagrab::core::{init_logger, log_upstream_configuration, Settings};
use instagrab::Session;

/// Entry point
///
/// Parses CLI arguments, loads configuration and dispatches to the subcommand.
/// Errors surface on stderr with a non-zero exit code.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let settings = Settings::load(cli.config.as_deref())?;
    let level = if cli.verbose { "debug" } else { settings.log.level.as_str() };
    init_logger(level)?;

    let mut stdout = std::io::stdout();
    match cli.command {
        Commands::Fetch { url, json, save } => {
            log_upstream_configuration(&settings);
            let session = Session::from_settings(&settings)?;
            let results = commands::fetch(&session, &url, json, &mut stdout).await?;
            if let Some(dir) = save {
                for path in commands::save_results(&settings, &url, &results, &dir).await? {
                    eprintln!("saved {}", path.display());
                }
            }
            Ok(())
        }
        Commands::Check { url } => commands::check(&url, &mut stdout),
        Commands::Interactive => {
            log_upstream_configuration(&settings);
            let session = Session::from_settings(&settings)?;
            commands::interactive(&session, BufReader::new(tokio::io::stdin()), &mut stdout).await
        }
    }
}
