use anyhow::Result;
use clap::Parser;
use soiree::app::App;
use soiree::cli::Cli;
use soiree::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing for logging
    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path)?.with_cli_overrides(&cli);

    // Create the application and run the event loop
    let mut app = App::new(&config)?;
    app.run().await?;

    Ok(())
}
