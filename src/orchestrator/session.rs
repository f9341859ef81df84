//! Screening view-model.
//!
//! Everything a front end renders is derived from this struct, which changes
//! only through controller events and the user's file selection.

use crate::model::{AnalysisResult, JobRole, ResumeFile, ScreenEvent, ScreeningRecord, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolePhase {
    Empty,
    Generating,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Pending,
    Done,
}

/// What the screen should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Generating,
    Ready,
    Uploading { elapsed_secs: u64 },
    Result(Verdict),
}

#[derive(Debug, Default, Clone)]
pub struct Session {
    pub role: Option<JobRole>,
    pub generating_role: bool,
    pub resume: Option<ResumeFile>,
    pub result: Option<AnalysisResult>,
    pub submitting: bool,
    pub elapsed_secs: u64,
    /// Blocking alert text; front ends must show it until dismissed.
    pub alert: Option<String>,
    /// Resume name the current result (or pending submission) belongs to.
    pub submitted_resume: Option<String>,
}

impl Session {
    pub fn apply(&mut self, ev: &ScreenEvent) {
        match ev {
            ScreenEvent::RoleRequested => {
                self.role = None;
                self.generating_role = true;
                self.result = None;
                self.resume = None;
                self.submitted_resume = None;
            }
            ScreenEvent::RoleReady { role } => {
                self.role = Some(role.clone());
                self.generating_role = false;
            }
            ScreenEvent::RoleFailed { .. } => {
                self.generating_role = false;
            }
            ScreenEvent::SubmissionStarted { resume_name } => {
                self.submitting = true;
                self.result = None;
                self.elapsed_secs = 0;
                self.submitted_resume = Some(resume_name.clone());
            }
            ScreenEvent::ElapsedTick { secs } => {
                if self.submitting {
                    self.elapsed_secs = *secs;
                }
            }
            ScreenEvent::SubmissionCompleted { result } => {
                self.submitting = false;
                self.result = Some((**result).clone());
            }
            ScreenEvent::SubmissionFailed { message } => {
                self.submitting = false;
                self.alert = Some(format!("Analysis failed. {message}"));
            }
            ScreenEvent::Info(_) => {}
        }
    }

    pub fn select_resume(&mut self, resume: ResumeFile) {
        self.resume = Some(resume);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn role_phase(&self) -> RolePhase {
        if self.generating_role {
            RolePhase::Generating
        } else if self.role.is_some() {
            RolePhase::Ready
        } else {
            RolePhase::Empty
        }
    }

    pub fn submission_phase(&self) -> SubmissionPhase {
        if self.submitting {
            SubmissionPhase::Pending
        } else if self.result.is_some() {
            SubmissionPhase::Done
        } else {
            SubmissionPhase::Idle
        }
    }

    pub fn can_submit(&self) -> bool {
        self.resume.is_some() && self.role.is_some() && !self.submitting
    }

    pub fn can_regenerate(&self) -> bool {
        !self.generating_role && !self.submitting
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.result.as_ref().map(AnalysisResult::verdict)
    }

    pub fn view(&self) -> ViewState {
        if self.generating_role {
            ViewState::Generating
        } else if self.submitting {
            ViewState::Uploading {
                elapsed_secs: self.elapsed_secs,
            }
        } else if let Some(v) = self.verdict() {
            ViewState::Result(v)
        } else if self.role.is_some() {
            ViewState::Ready
        } else {
            ViewState::Idle
        }
    }

    /// Export envelope for the current result, if there is one.
    pub fn record(&self, backend_url: &str) -> Option<ScreeningRecord> {
        let role = self.role.as_ref()?;
        let result = self.result.as_ref()?;
        let resume = self.submitted_resume.as_deref().unwrap_or("-");
        Some(ScreeningRecord::new(backend_url, resume, role, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{sample_result, sample_role};
    use bytes::Bytes;

    fn resume() -> ResumeFile {
        ResumeFile::from_parts("resume.pdf", Bytes::from_static(b"%PDF")).unwrap()
    }

    fn ready_session() -> Session {
        let mut s = Session::default();
        s.apply(&ScreenEvent::RoleRequested);
        s.apply(&ScreenEvent::RoleReady {
            role: sample_role("Backend Engineer"),
        });
        s
    }

    #[test]
    fn role_lifecycle() {
        let mut s = Session::default();
        assert_eq!(s.role_phase(), RolePhase::Empty);
        assert_eq!(s.view(), ViewState::Idle);

        s.apply(&ScreenEvent::RoleRequested);
        assert_eq!(s.role_phase(), RolePhase::Generating);
        assert!(!s.can_regenerate());

        s.apply(&ScreenEvent::RoleFailed {
            message: "boom".into(),
        });
        assert_eq!(s.role_phase(), RolePhase::Empty);
        assert!(s.alert.is_none());

        s.apply(&ScreenEvent::RoleRequested);
        s.apply(&ScreenEvent::RoleReady {
            role: sample_role("Backend Engineer"),
        });
        assert_eq!(s.role_phase(), RolePhase::Ready);
        assert_eq!(s.view(), ViewState::Ready);
    }

    #[test]
    fn regenerating_clears_result_and_file() {
        let mut s = ready_session();
        s.select_resume(resume());
        s.apply(&ScreenEvent::SubmissionStarted {
            resume_name: "resume.pdf".into(),
        });
        s.apply(&ScreenEvent::SubmissionCompleted {
            result: Box::new(sample_result("Interview Scheduled")),
        });
        assert!(s.result.is_some());

        s.apply(&ScreenEvent::RoleRequested);
        assert!(s.result.is_none());
        assert!(s.resume.is_none());
        assert!(s.role.is_none());
        assert_eq!(s.view(), ViewState::Generating);
    }

    #[test]
    fn submit_enabled_only_with_file_and_role_and_nothing_in_flight() {
        let mut s = Session::default();
        s.select_resume(resume());
        assert!(!s.can_submit());

        let mut s = ready_session();
        assert!(!s.can_submit());
        s.select_resume(resume());
        assert!(s.can_submit());

        s.apply(&ScreenEvent::SubmissionStarted {
            resume_name: "resume.pdf".into(),
        });
        assert!(!s.can_submit());
        assert!(!s.can_regenerate());
        assert_eq!(s.submission_phase(), SubmissionPhase::Pending);
    }

    #[test]
    fn elapsed_ticks_only_count_while_pending() {
        let mut s = ready_session();
        s.apply(&ScreenEvent::ElapsedTick { secs: 4 });
        assert_eq!(s.elapsed_secs, 0);

        s.apply(&ScreenEvent::SubmissionStarted {
            resume_name: "resume.pdf".into(),
        });
        s.apply(&ScreenEvent::ElapsedTick { secs: 12 });
        assert_eq!(s.view(), ViewState::Uploading { elapsed_secs: 12 });
    }

    #[test]
    fn failure_raises_alert_and_keeps_inputs() {
        let mut s = ready_session();
        s.select_resume(resume());
        s.apply(&ScreenEvent::SubmissionStarted {
            resume_name: "resume.pdf".into(),
        });
        s.apply(&ScreenEvent::SubmissionFailed {
            message: "backend returned 500".into(),
        });
        assert!(!s.submitting);
        assert!(s.alert.as_deref().unwrap().contains("backend returned 500"));

        s.dismiss_alert();
        assert!(s.alert.is_none());
        assert!(!s.submitting);
        assert!(s.result.is_none());
        assert!(s.can_submit());
        assert_eq!(s.submission_phase(), SubmissionPhase::Idle);
    }

    #[test]
    fn verdict_follows_final_decision() {
        let mut s = ready_session();
        s.apply(&ScreenEvent::SubmissionStarted {
            resume_name: "resume.pdf".into(),
        });
        s.apply(&ScreenEvent::SubmissionCompleted {
            result: Box::new(sample_result("Interview Scheduled")),
        });
        assert_eq!(s.view(), ViewState::Result(Verdict::Recommended));

        s.apply(&ScreenEvent::SubmissionStarted {
            resume_name: "resume.pdf".into(),
        });
        assert!(s.result.is_none());
        s.apply(&ScreenEvent::SubmissionCompleted {
            result: Box::new(sample_result("Application Rejected")),
        });
        assert_eq!(s.view(), ViewState::Result(Verdict::NotSelected));

        let rec = s.record("http://127.0.0.1:8000").unwrap();
        assert_eq!(rec.resume_name, "resume.pdf");
        assert_eq!(rec.verdict, Verdict::NotSelected);
    }
}
