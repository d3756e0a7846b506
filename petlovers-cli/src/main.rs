//! `petlovers`: browse and edit PetLoversHub adoption listings from a terminal

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod context;
mod output;

use commands::{browse::BrowseArgs, show::ShowArgs, update::UpdateArgs};
use context::Context;
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "petlovers", version, about = "Browse and edit PetLoversHub adoption listings")]
pub struct Cli {
    /// API base URL (overrides configuration)
    #[arg(long, global = true, env = "PETLOVERS_API_URL")]
    pub api_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, global = true, env = "PETLOVERS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scroll through available pets
    Browse(BrowseArgs),

    /// Show a single pet
    Show(ShowArgs),

    /// Edit a pet listing
    Update(UpdateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::CliConfig::load()?;

    init_tracing(cli.verbose, &config.log_level);
    tracing::debug!(api_url = %config.api_url, "Configuration loaded");

    let ctx = Context::new(&cli, config);
    match cli.command {
        Commands::Browse(args) => commands::browse::execute(&ctx, args).await,
        Commands::Show(args) => commands::show::execute(&ctx, args).await,
        Commands::Update(args) => commands::update::execute(&ctx, args).await,
    }
}

fn init_tracing(verbose: bool, log_level: &str) {
    let filter = if verbose {
        EnvFilter::new("petlovers_cli=debug,petlovers_sdk=debug,petlovers_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!(
                "petlovers_cli={lvl},petlovers_sdk={lvl},petlovers_core={lvl}",
                lvl = log_level
            )
            .into()
        })
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
