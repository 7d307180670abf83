//! Event key value object and gate lifecycle.
//!
//! The event key is a user-supplied string that both gates local capture and
//! identifies which server-side puzzle a submission is evaluated against. A
//! key is valid when it is non-empty after trimming; the trimmed form is the
//! canonical one sent over the wire.

use crate::error::DomainError;

/// A validated, trimmed event key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventKey(String);

impl EventKey {
    /// Validate and canonicalize a raw key.
    ///
    /// Surrounding whitespace is trimmed; an empty result is rejected.
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("event key cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for EventKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of the process-wide event-key gate: unset -> set -> changed or
/// cleared. A capture attempt proceeds only while the gate is set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EventKeyState {
    #[default]
    Unset,
    Set(EventKey),
}

impl EventKeyState {
    /// Derive the gate state from a persisted raw string.
    ///
    /// Anything that fails [`EventKey::new`] validation (empty, whitespace)
    /// leaves the gate unset.
    pub fn from_raw(raw: &str) -> Self {
        match EventKey::new(raw) {
            Ok(key) => Self::Set(key),
            Err(_) => Self::Unset,
        }
    }

    /// Set or change the gate. Returns the previous key, if any.
    pub fn set(&mut self, key: EventKey) -> Option<EventKey> {
        match std::mem::replace(self, Self::Set(key)) {
            Self::Set(previous) => Some(previous),
            Self::Unset => None,
        }
    }

    /// Clear the gate. Returns the previous key, if any.
    pub fn clear(&mut self) -> Option<EventKey> {
        match std::mem::take(self) {
            Self::Set(previous) => Some(previous),
            Self::Unset => None,
        }
    }

    pub fn current(&self) -> Option<&EventKey> {
        match self {
            Self::Set(key) => Some(key),
            Self::Unset => None,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }
}
