mod cli;
mod engine;
mod logging;
mod model;
mod orchestrator;
mod text_summary;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Result;
use clap::Parser;
use logging::LogTarget;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let target = if args.is_headless() {
        LogTarget::Stderr
    } else {
        LogTarget::File(
            args.log_file
                .clone()
                .unwrap_or_else(logging::default_log_path),
        )
    };
    logging::init(target)?;
    tracing::info!(base_url = %args.base_url, headless = args.is_headless(), "starting smart-screen");

    cli::run(args).await
}
