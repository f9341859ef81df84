use super::ScreeningBackend;
use crate::model::{AnalysisResult, JobRole, ResumeFile, ScreenConfig};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::debug;

const GENERATE_ROLE_PATH: &str = "/generate-job-role";
const PROCESS_APPLICATION_PATH: &str = "/process-application";
const MAX_ERROR_BODY_BYTES: usize = 2 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid response JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// HTTP client for the screening backend.
#[derive(Clone)]
pub struct ScreeningClient {
    http: reqwest::Client,
    base_url: String,
}

impl ScreeningClient {
    pub fn new(cfg: &ScreenConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(cfg.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(
        resp: reqwest::Response,
        started: Instant,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        let body = resp.bytes().await?;
        debug!(
            %status,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "backend response"
        );
        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            let body = if text.len() > MAX_ERROR_BODY_BYTES {
                let mut cut = MAX_ERROR_BODY_BYTES;
                while !text.is_char_boundary(cut) {
                    cut -= 1;
                }
                format!("{}…", &text[..cut])
            } else {
                text.into_owned()
            };
            return Err(ClientError::Status { status, body });
        }
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn generate_job_role(&self) -> Result<JobRole, ClientError> {
        let started = Instant::now();
        let resp = self.http.post(self.url(GENERATE_ROLE_PATH)).send().await?;
        Self::read_json(resp, started).await
    }

    pub async fn process_application(
        &self,
        resume: &ResumeFile,
        job_role: &str,
    ) -> Result<AnalysisResult, ClientError> {
        let part = Part::bytes(resume.contents.to_vec())
            .file_name(resume.name.clone())
            .mime_str("application/pdf")?;
        let form = Form::new()
            .part("file", part)
            .text("job_role", job_role.to_string());

        let started = Instant::now();
        let resp = self
            .http
            .post(self.url(PROCESS_APPLICATION_PATH))
            .multipart(form)
            .send()
            .await?;
        Self::read_json(resp, started).await
    }
}

impl ScreeningBackend for ScreeningClient {
    async fn fetch_role(&self) -> anyhow::Result<JobRole> {
        Ok(self.generate_job_role().await?)
    }

    async fn submit(&self, resume: ResumeFile, job_role: String) -> anyhow::Result<AnalysisResult> {
        Ok(self.process_application(&resume, &job_role).await?)
    }
}
