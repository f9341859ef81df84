//! Screening lifecycle controller.
//!
//! Owns role fetches and submissions and emits events for presentation layers.

use crate::engine::{self, ScreeningBackend};
use crate::model::{AnalysisResult, InfoEvent, JobRole, ResumeFile, ScreenConfig, ScreenEvent};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Commands emitted by UI layers.
#[derive(Debug, Clone)]
pub(crate) enum UiCommand {
    RegenerateRole,
    Submit(ResumeFile),
    Quit,
}

/// Spawn a role fetch. Listeners drop any role, result and file on `RoleRequested`.
fn start_role_fetch<B: ScreeningBackend>(
    backend: &Arc<B>,
    event_tx: &UnboundedSender<ScreenEvent>,
) -> JoinHandle<Result<JobRole>> {
    let _ = event_tx.send(ScreenEvent::RoleRequested);
    let backend = backend.clone();
    tokio::spawn(async move { backend.fetch_role().await })
}

fn start_submission<B: ScreeningBackend>(
    cfg: &ScreenConfig,
    backend: &Arc<B>,
    role: &JobRole,
    resume: ResumeFile,
    event_tx: &UnboundedSender<ScreenEvent>,
) -> JoinHandle<Result<AnalysisResult>> {
    let _ = event_tx.send(ScreenEvent::SubmissionStarted {
        resume_name: resume.name.clone(),
    });
    let backend = backend.clone();
    let job_role = role.role.clone();
    let min_wait = cfg.min_wait;
    let tick = cfg.tick;
    let tx = event_tx.clone();
    tokio::spawn(async move {
        engine::run_submission(backend.as_ref(), resume, job_role, min_wait, tick, tx).await
    })
}

/// Await a task slot without taking the handle out of it. Pending forever when
/// the slot is empty.
async fn join_slot<T>(slot: &mut Option<JoinHandle<T>>) -> Result<T, tokio::task::JoinError> {
    match slot.as_mut() {
        Some(h) => h.await,
        None => futures::future::pending().await,
    }
}

/// Drive role and submission lifecycles from UI commands. Fetches one role on
/// start-up and runs until `Quit` or the command channel closes.
pub(crate) async fn run_controller<B: ScreeningBackend>(
    cfg: &ScreenConfig,
    backend: Arc<B>,
    event_tx: UnboundedSender<ScreenEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let mut role: Option<JobRole> = None;
    let mut role_task = Some(start_role_fetch(&backend, &event_tx));
    let mut submission_task: Option<JoinHandle<Result<AnalysisResult>>> = None;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UiCommand::RegenerateRole) => {
                        if submission_task.is_some() {
                            let _ = event_tx.send(ScreenEvent::Info(InfoEvent::RegenerateRefused));
                        } else if role_task.is_some() {
                            debug!("role fetch already in flight");
                            let _ = event_tx.send(ScreenEvent::Info(InfoEvent::Message(
                                "A role is already being generated".into(),
                            )));
                        } else {
                            role = None;
                            role_task = Some(start_role_fetch(&backend, &event_tx));
                        }
                    }
                    Some(UiCommand::Submit(resume)) => {
                        let refusal = if submission_task.is_some() {
                            Some("a screening is already running")
                        } else if role_task.is_some() || role.is_none() {
                            Some("no job role loaded")
                        } else {
                            None
                        };
                        match (refusal, role.as_ref()) {
                            (None, Some(r)) => {
                                submission_task =
                                    Some(start_submission(cfg, &backend, r, resume, &event_tx));
                            }
                            (reason, _) => {
                                let reason = reason.unwrap_or("no job role loaded");
                                let _ = event_tx.send(ScreenEvent::Info(InfoEvent::SubmitRefused(reason)));
                            }
                        }
                    }
                    Some(UiCommand::Quit) | None => {
                        if let Some(h) = role_task.take() {
                            h.abort();
                        }
                        if let Some(h) = submission_task.take() {
                            h.abort();
                        }
                        break Ok(());
                    }
                }
            }
            done = join_slot(&mut role_task) => {
                role_task = None;
                match done {
                    Ok(Ok(r)) => {
                        info!(role = %r.role, level = %r.experience_level, "job role ready");
                        role = Some(r.clone());
                        let _ = event_tx.send(ScreenEvent::RoleReady { role: r });
                    }
                    Ok(Err(e)) => {
                        error!(error = %format!("{e:#}"), "failed to fetch job role");
                        let _ = event_tx.send(ScreenEvent::RoleFailed { message: format!("{e:#}") });
                    }
                    Err(e) => {
                        error!(error = %e, "role fetch task failed");
                        let _ = event_tx.send(ScreenEvent::RoleFailed { message: e.to_string() });
                    }
                }
            }
            done = join_slot(&mut submission_task) => {
                submission_task = None;
                match done {
                    Ok(Ok(r)) => {
                        info!(decision = %r.final_decision, skill_match = %r.skill_match, "screening complete");
                        let _ = event_tx.send(ScreenEvent::SubmissionCompleted { result: Box::new(r) });
                    }
                    Ok(Err(e)) => {
                        error!(error = %format!("{e:#}"), "analysis failed");
                        let _ = event_tx.send(ScreenEvent::SubmissionFailed { message: format!("{e:#}") });
                    }
                    Err(e) => {
                        error!(error = %e, "submission task failed");
                        let _ = event_tx.send(ScreenEvent::SubmissionFailed { message: e.to_string() });
                    }
                }
            }
        }
    }
}
