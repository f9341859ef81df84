pub mod client;
mod floor;

pub use floor::with_floor;

use crate::model::{AnalysisResult, JobRole, ResumeFile, ScreenEvent};
use anyhow::Result;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

/// The two calls the client makes against the screening service.
pub trait ScreeningBackend: Send + Sync + 'static {
    fn fetch_role(&self) -> impl Future<Output = Result<JobRole>> + Send;

    fn submit(
        &self,
        resume: ResumeFile,
        job_role: String,
    ) -> impl Future<Output = Result<AnalysisResult>> + Send;
}

/// Repeating elapsed-seconds counter. The task is aborted when the guard is
/// dropped, so every exit path of a submission releases it.
pub(crate) struct ElapsedTicker {
    handle: JoinHandle<()>,
}

impl ElapsedTicker {
    pub(crate) fn spawn(period: Duration, event_tx: mpsc::UnboundedSender<ScreenEvent>) -> Self {
        let period = period.max(Duration::from_millis(10));
        let handle = tokio::spawn(async move {
            let started = tokio::time::Instant::now();
            let mut interval = tokio::time::interval_at(started + period, period);
            loop {
                interval.tick().await;
                let secs = started.elapsed().as_secs();
                if event_tx.send(ScreenEvent::ElapsedTick { secs }).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for ElapsedTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Upload one resume for `job_role` and hold the outcome until at least
/// `min_wait` has passed. Emits elapsed ticks while pending.
pub async fn run_submission<B: ScreeningBackend>(
    backend: &B,
    resume: ResumeFile,
    job_role: String,
    min_wait: Duration,
    tick: Duration,
    event_tx: mpsc::UnboundedSender<ScreenEvent>,
) -> Result<AnalysisResult> {
    info!(
        resume = %resume.name,
        role = %job_role,
        min_wait_s = min_wait.as_secs(),
        "submitting application"
    );
    let _ticker = ElapsedTicker::spawn(tick, event_tx);
    let started = tokio::time::Instant::now();
    let res = with_floor(backend.submit(resume, job_role), min_wait).await;
    info!(
        ok = res.is_ok(),
        elapsed_s = started.elapsed().as_secs(),
        "submission settled"
    );
    res
}
