use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Decision string the backend uses for a positive outcome.
pub const INTERVIEW_SCHEDULED: &str = "Interview Scheduled";

/// Largest resume the client will upload.
pub const MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub base_url: String,
    #[serde(with = "humantime_serde")]
    pub min_wait: Duration,
    #[serde(with = "humantime_serde")]
    pub tick: Duration,
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    pub user_agent: String,
}

/// Target position generated by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRole {
    pub role: String,
    pub experience_level: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
}

/// Screening outcome for one resume against one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    // The screening pipeline has shipped this key misspelled.
    #[serde(alias = "expereince_level")]
    pub experience_level: String,
    pub skill_match: String,
    pub final_decision: String,
    #[serde(default)]
    pub screened_for_role: String,
}

impl AnalysisResult {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_decision(&self.final_decision)
    }

    pub fn is_skill_match(&self) -> bool {
        self.skill_match == "Match"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Recommended,
    NotSelected,
}

impl Verdict {
    pub fn from_decision(decision: &str) -> Self {
        if decision == INTERVIEW_SCHEDULED {
            Verdict::Recommended
        } else {
            Verdict::NotSelected
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::Recommended => "RECOMMENDED",
            Verdict::NotSelected => "NOT SELECTED",
        }
    }

    pub fn reasoning(self) -> &'static str {
        match self {
            Verdict::Recommended => {
                "The candidate demonstrates strong alignment with core technical requirements and experience levels necessary for this role."
            }
            Verdict::NotSelected => {
                "The candidate's profile lacks critical skillsets or experience depth required for this specific seniority level."
            }
        }
    }
}

/// A resume picked for upload. Contents are shared cheaply between the UI and
/// the submission task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub contents: Bytes,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResumeError {
    #[error("only PDF resumes are supported: {0}")]
    NotPdf(String),
    #[error("resume is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
    #[error("resume path has no file name")]
    NoFileName,
}

impl ResumeFile {
    /// Build a resume from already-read contents, enforcing the PDF-only and
    /// size rules.
    pub fn from_parts(name: impl Into<String>, contents: Bytes) -> Result<Self, ResumeError> {
        let name = name.into();
        if !name.to_ascii_lowercase().ends_with(".pdf") {
            return Err(ResumeError::NotPdf(name));
        }
        let size = contents.len() as u64;
        if size > MAX_RESUME_BYTES {
            return Err(ResumeError::TooLarge {
                size,
                limit: MAX_RESUME_BYTES,
            });
        }
        Ok(Self { name, contents })
    }

    pub fn file_name_of(path: &Path) -> Result<String, ResumeError> {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .ok_or(ResumeError::NoFileName)
    }

    /// Read a resume from disk. Blocking; used from the UI thread.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let name = Self::file_name_of(path)?;
        let meta =
            std::fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
        if meta.len() > MAX_RESUME_BYTES {
            return Err(ResumeError::TooLarge {
                size: meta.len(),
                limit: MAX_RESUME_BYTES,
            }
            .into());
        }
        let contents = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        Ok(Self::from_parts(name, Bytes::from(contents))?)
    }

    /// Async variant for the headless modes.
    pub async fn load_async(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let name = Self::file_name_of(path)?;
        let meta = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("stat {}", path.display()))?;
        if meta.len() > MAX_RESUME_BYTES {
            return Err(ResumeError::TooLarge {
                size: meta.len(),
                limit: MAX_RESUME_BYTES,
            }
            .into());
        }
        let contents = tokio::fs::read(path)
            .await
            .with_context(|| format!("read {}", path.display()))?;
        Ok(Self::from_parts(name, Bytes::from(contents))?)
    }
}

#[derive(Debug, Clone)]
pub enum ScreenEvent {
    /// A role fetch started; any role, result and file selection are void.
    RoleRequested,
    RoleReady {
        role: JobRole,
    },
    RoleFailed {
        message: String,
    },
    SubmissionStarted {
        resume_name: String,
    },
    /// Cosmetic elapsed counter while a submission is pending.
    ElapsedTick {
        secs: u64,
    },
    SubmissionCompleted {
        result: Box<AnalysisResult>,
    },
    SubmissionFailed {
        message: String,
    },
    Info(InfoEvent),
}

/// Structured info events emitted by the controller and consumed by UI/CLI layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoEvent {
    Message(String),
    RegenerateRefused,
    SubmitRefused(&'static str),
}

impl InfoEvent {
    /// Render a human-readable message for UI/CLI layers.
    pub fn to_message(&self) -> String {
        match self {
            InfoEvent::Message(msg) => msg.clone(),
            InfoEvent::RegenerateRefused => {
                "A screening is in progress; wait for it before generating a new role".to_string()
            }
            InfoEvent::SubmitRefused(reason) => format!("Cannot submit: {reason}"),
        }
    }
}

/// Export envelope for a completed screening.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningRecord {
    pub timestamp_utc: String,
    pub backend_url: String,
    pub resume_name: String,
    pub role: JobRole,
    pub result: AnalysisResult,
    pub verdict: Verdict,
}

impl ScreeningRecord {
    pub fn new(
        backend_url: &str,
        resume_name: &str,
        role: &JobRole,
        result: &AnalysisResult,
    ) -> Self {
        Self {
            timestamp_utc: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_else(|_| "now".into()),
            backend_url: backend_url.to_string(),
            resume_name: resume_name.to_string(),
            role: role.clone(),
            result: result.clone(),
            verdict: result.verdict(),
        }
    }
}
