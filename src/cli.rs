use crate::engine::{self, client::ScreeningClient};
use crate::model::{ResumeFile, ScreenConfig, ScreenEvent, ScreeningRecord};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "smart-screen",
    version,
    about = "Resume screening client for the Smart Screen backend, with optional TUI"
)]
pub struct Cli {
    /// Base URL of the screening backend
    #[arg(long, env = "SMART_SCREEN_BACKEND_URL", default_value = "http://127.0.0.1:8000")]
    pub base_url: String,

    /// Resume (PDF, max 5 MB) to preselect; screened directly in --json/--text mode
    #[arg(long)]
    pub resume: Option<std::path::PathBuf>,

    /// Print JSON result and exit (no TUI)
    #[arg(long, conflicts_with = "text")]
    pub json: bool,

    /// Print text summary and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Minimum time before a screening result or error is shown
    #[arg(long, env = "SMART_SCREEN_MIN_WAIT", default_value = "60s")]
    pub min_wait: humantime::Duration,

    /// Period of the elapsed-time counter shown while a screening runs
    #[arg(long, default_value = "1s")]
    pub tick: humantime::Duration,

    /// Timeout for each backend request
    #[arg(long, default_value = "5m")]
    pub request_timeout: humantime::Duration,

    /// Export each completed screening as JSON
    #[arg(long)]
    pub export_json: Option<std::path::PathBuf>,

    /// Log file used in TUI mode (defaults to the user data directory)
    #[arg(long)]
    pub log_file: Option<std::path::PathBuf>,
}

impl Cli {
    /// Whether this invocation runs without the TUI.
    pub fn is_headless(&self) -> bool {
        self.json || self.text || cfg!(not(feature = "tui"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Json,
    Text,
}

pub async fn run(args: Cli) -> Result<()> {
    if Duration::from(args.tick).is_zero() {
        return Err(anyhow::anyhow!("--tick must be greater than zero"));
    }

    if !args.json && !args.text {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(args).await;
        }
        #[cfg(not(feature = "tui"))]
        {
            // Fallback when built without TUI support.
            return run_headless(args, OutputMode::Text).await;
        }
    }

    let mode = if args.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };
    run_headless(args, mode).await
}

/// Build a `ScreenConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> ScreenConfig {
    ScreenConfig {
        base_url: args.base_url.clone(),
        min_wait: Duration::from(args.min_wait),
        tick: Duration::from(args.tick),
        request_timeout: Duration::from(args.request_timeout),
        user_agent: format!("smart-screen-cli/{}", env!("CARGO_PKG_VERSION")),
    }
}

/// Fetch one role, print it, and screen `--resume` against it when given.
async fn run_headless(args: Cli, mode: OutputMode) -> Result<()> {
    let cfg = build_config(&args);
    let client = ScreeningClient::new(&cfg).context("failed to build HTTP client")?;
    let (out_tx, out_handle) = spawn_output_writer();

    // Load the resume first so a bad path fails before the backend is called.
    let resume = match args.resume.as_deref() {
        Some(p) => Some(ResumeFile::load_async(p).await?),
        None => None,
    };

    if mode == OutputMode::Text {
        let _ = out_tx.send(OutputLine::Stderr("Generating job role…".into()));
    }
    let role = client
        .generate_job_role()
        .await
        .context("failed to fetch job role")?;

    if mode == OutputMode::Text {
        for line in crate::text_summary::build_role_summary(&role).lines {
            let _ = out_tx.send(OutputLine::Stdout(line));
        }
    }

    let Some(resume) = resume else {
        if mode == OutputMode::Json {
            let _ = out_tx.send(OutputLine::Stdout(serde_json::to_string_pretty(&role)?));
        }
        drop(out_tx);
        let _ = out_handle.await;
        return Ok(());
    };

    let (evt_tx, mut evt_rx) = mpsc::unbounded_channel::<ScreenEvent>();
    let progress_tx = out_tx.clone();
    let progress = tokio::spawn(async move {
        while let Some(ev) = evt_rx.recv().await {
            if let ScreenEvent::ElapsedTick { secs } = ev {
                if mode == OutputMode::Text {
                    let _ = progress_tx.send(OutputLine::Stderr(format!("Processing ({secs}s)")));
                }
            }
        }
    });

    let resume_name = resume.name.clone();
    if mode == OutputMode::Text {
        let _ = out_tx.send(OutputLine::Stderr(format!(
            "Submitting {} for {}…",
            resume_name, role.role
        )));
    }
    let result = engine::run_submission(
        &client,
        resume,
        role.role.clone(),
        cfg.min_wait,
        cfg.tick,
        evt_tx,
    )
    .await
    .context("analysis failed");
    let _ = progress.await;
    let result = result?;

    let record = ScreeningRecord::new(&cfg.base_url, &resume_name, &role, &result);
    let processed = crate::orchestrator::process_screening(args.export_json.as_deref(), record);
    for msg in processed.export_messages {
        let _ = out_tx.send(OutputLine::Stderr(msg));
    }

    match mode {
        OutputMode::Json => {
            let out = serde_json::to_string_pretty(&processed.record)?;
            let _ = out_tx.send(OutputLine::Stdout(out));
        }
        OutputMode::Text => {
            let _ = out_tx.send(OutputLine::Stdout(String::new()));
            for line in crate::text_summary::build_verdict_summary(&result).lines {
                let _ = out_tx.send(OutputLine::Stdout(line));
            }
        }
    }

    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}
