use clap::Parser;
use stand_forecast::cli::{Cli, Commands};
use stand_forecast::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    let _telemetry = stand_forecast::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Predict(args) => {
            tracing::debug!(event = %args.event.display(), "Starting prediction");
            args.execute(&config).await?;
        }
        Commands::History(args) => {
            tracing::debug!(history = %args.history.display(), "Summarizing history");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("# Effective configuration ({})", cli.config);
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
