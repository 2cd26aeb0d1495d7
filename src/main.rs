use clap::error::ErrorKind;
use clap::Parser;
use stackpilot::cli::{lifecycle, output, Cli, Commands};
use stackpilot::config::Config;
use tracing::error;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // Parse by hand so an unrecognized or missing mode exits 1, not
    // clap's default usage code.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => std::process::exit(0),
                _ => std::process::exit(1),
            }
        }
    };

    output::configure(output::OutputConfig::new(cli.json, cli.quiet));

    let config = match Config::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            output::failure(format!("Failed to load config: {err}"));
            std::process::exit(1);
        }
    };

    config.logging.init();

    let result = match cli.command {
        Commands::Start => lifecycle::execute_start(&config).await,
        Commands::Stop => lifecycle::execute_stop(&config).await,
        Commands::Restart => lifecycle::execute_restart(&config).await,
    };

    if let Err(err) = result {
        error!(error = %err, "lifecycle command failed");
        output::failure(format!("{err}"));
        std::process::exit(err.exit_code());
    }
}
