//! mods-cocina - MODS to Cocina mapping
//!
//! Reads one MODS XML record and prints the Cocina descriptive JSON.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mods_cocina::{AppConfig, Description, Notifier};

#[derive(Parser)]
#[command(name = "mods-cocina", version, about = "Map a MODS record to Cocina descriptive JSON")]
struct Cli {
    /// Path to the MODS XML file
    input: PathBuf,

    /// Druid of the object, with or without the druid: prefix
    #[arg(long, default_value = "")]
    druid: String,

    /// Object label, used as the fallback title
    #[arg(long, default_value = "")]
    label: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("mods_cocina={}", config.logging.level).into());

    // Keep stdout clean for the JSON output
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let xml = std::fs::read_to_string(&cli.input)?;

    let notifier = Notifier::new();
    let description = Description::from_xml(
        &xml,
        &cli.druid,
        &cli.label,
        &config.purl.base_url,
        &notifier,
    )?;

    tracing::info!(
        warnings = notifier.warnings().len(),
        errors = notifier.errors().len(),
        "mapped {}",
        cli.input.display()
    );

    let json = if cli.pretty {
        serde_json::to_string_pretty(&description)?
    } else {
        serde_json::to_string(&description)?
    };
    println!("{json}");

    Ok(())
}
