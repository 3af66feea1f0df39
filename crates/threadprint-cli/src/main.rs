//! Threadprint CLI — estimate the sustainability footprint of the garments
//! in a photo.
//!
//! Runs the two-agent pipeline from threadprint-core: a vision model
//! extracts the material composition, optional web research grounds the
//! numbers, and a second model produces per-garment estimates.

use clap::Parser;

use threadprint_cli::commands;

/// Threadprint — garment photo sustainability reports
#[derive(Parser)]
#[command(
    name = "threadprint",
    version,
    about = "Estimate the sustainability footprint of the garments in a photo"
)]
struct Cli {
    /// Garment photo: a local file path, an http(s) URL, or a data: URI
    image: String,

    /// Extra guidance for the analyst (e.g. "focus on the jacket")
    #[arg(long)]
    focus: Option<String>,

    /// Write the report JSON to this file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "threadprint_core=warn,threadprint_cli=info".into()),
        )
        .init();

    let result = commands::analyze::run(
        &cli.image,
        cli.focus.as_deref(),
        cli.output.as_deref(),
    )
    .await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
