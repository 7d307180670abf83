//! Answer authoring service.
//!
//! Wraps an [`AnswerDraft`] for the authoring panel and drives the
//! publish flow: check that the chosen event key is still unclaimed, export
//! the draft as an [`AnswerSubmission`], and send it through the submission
//! client. Note the inversion relative to the capture gate: a key the
//! server already knows (`success == true`) is *taken* here, while the 404
//! lookup miss is the good case.

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::bail;

use keyhunt_domain::{AnswerDraft, Constraint, EventKey};
use keyhunt_protocol::{AnswerSubmission, ApiResult, ErrorKind};

use crate::ports::ValidationApiPort;

/// Outcome of an authoring-side key lookup
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAvailability {
    /// The server has no answer under this key - free to claim
    Available,
    /// An answer already exists under this key
    Taken,
    /// The lookup itself failed; carries a displayable message
    CheckFailed(String),
}

/// Composes answer drafts and publishes them to the server
pub struct AuthoringService {
    api: Arc<dyn ValidationApiPort>,
    draft: Mutex<AnswerDraft>,
}

impl AuthoringService {
    pub fn new(api: Arc<dyn ValidationApiPort>) -> Self {
        Self {
            api,
            draft: Mutex::new(AnswerDraft::new()),
        }
    }

    fn draft_guard(&self) -> MutexGuard<'_, AnswerDraft> {
        match self.draft.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn add_constraint(&self, constraint: Constraint) {
        self.draft_guard().add_constraint(constraint);
    }

    /// Remove by index; out-of-range indices are a no-op.
    pub fn remove_constraint(&self, index: usize) {
        self.draft_guard().remove_constraint(index);
    }

    pub fn set_reward_text(&self, text: impl Into<String>) {
        self.draft_guard().set_reward_text(text);
    }

    /// Discard the draft (constraints and reward text together).
    pub fn clear(&self) {
        self.draft_guard().clear();
    }

    /// A copy of the current draft for display.
    pub fn draft(&self) -> AnswerDraft {
        self.draft_guard().clone()
    }

    /// Whether the draft could be submitted (non-empty reward text and at
    /// least one constraint). The caller still needs an available key.
    pub fn is_submittable(&self) -> bool {
        self.draft_guard().is_submittable()
    }

    /// Check whether an event key is free to publish an answer under.
    pub async fn check_key_availability(&self, raw_key: &str) -> KeyAvailability {
        let Ok(key) = EventKey::new(raw_key) else {
            return KeyAvailability::CheckFailed("Event key cannot be empty.".to_string());
        };

        let result = self.api.validate_key(key.as_str()).await;
        if result.success {
            // 2xx means an answer is already stored under this key
            return KeyAvailability::Taken;
        }
        match result.error_type {
            Some(ErrorKind::KeyNotFound) => KeyAvailability::Available,
            _ => KeyAvailability::CheckFailed(result.message),
        }
    }

    /// Publish the draft under `raw_key`.
    ///
    /// Re-checks availability immediately before sending; requires a
    /// submittable draft. The draft is cleared only when the server accepts
    /// the answer.
    pub async fn submit_answer(&self, raw_key: &str) -> anyhow::Result<ApiResult> {
        let Ok(key) = EventKey::new(raw_key) else {
            bail!("Event key cannot be empty.");
        };

        let draft = self.draft();
        if !draft.is_submittable() {
            bail!("Answer needs reward text and at least one constraint.");
        }

        match self.check_key_availability(key.as_str()).await {
            KeyAvailability::Available => {}
            KeyAvailability::Taken => bail!("Key already exists"),
            KeyAvailability::CheckFailed(message) => bail!(message),
        }

        let submission = AnswerSubmission::from_draft(key.as_str(), &draft);
        tracing::info!(
            "Submitting answer for '{}' with {} constraints",
            key,
            submission.constraints.len()
        );

        let result = self.api.submit_answer(submission).await;
        if result.success {
            self.clear();
        }
        Ok(result)
    }
}
