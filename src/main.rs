use anyhow::Context;
use clap::Parser;
use create_install_bat::{
    cli::commands::{generate::GenerateCommand, CommandHandler},
    cli::{Cli, LogLevel},
    config,
};
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout only carries progress lines
fn initialize_tracing(log_level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_filter_directive()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level);

    let settings = config::load_settings(cli.config.as_deref())?;
    let options = settings.resolve(&cli.director_url, cli.output_dir.clone(), cli.overrides())?;

    let command = GenerateCommand::new(options);
    command
        .execute()
        .with_context(|| format!("Failed to generate installer files from {}", cli.director_url))?;

    Ok(())
}
