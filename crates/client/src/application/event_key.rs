//! Event-key gate service.
//!
//! Owns the lifecycle of the process-wide event key: unset -> set ->
//! changed/cleared. Setting and changing are the same operation with the
//! same server-side validation - they are distinguished only so the UI can
//! pre-fill the prior value when changing. Mutations go through the config
//! store's single update entry point and are immediately observable by the
//! orchestrator's next gate check.

use std::sync::Arc;

use anyhow::bail;

use keyhunt_domain::{EventKey, EventKeyState};

use crate::config::ConfigStore;
use crate::events::PluginEvent;
use crate::infrastructure::status_bus::StatusBus;
use crate::ports::ValidationApiPort;

/// Gate operations over the persisted event key
pub struct EventKeyService {
    config: ConfigStore,
    api: Arc<dyn ValidationApiPort>,
    bus: StatusBus,
}

impl EventKeyService {
    pub fn new(config: ConfigStore, api: Arc<dyn ValidationApiPort>, bus: StatusBus) -> Self {
        Self { config, api, bus }
    }

    /// Current gate state derived from the persisted key.
    pub fn state(&self) -> EventKeyState {
        EventKeyState::from_raw(&self.config.snapshot().event_key)
    }

    /// The committed key, if the gate is set.
    pub fn current_key(&self) -> Option<EventKey> {
        self.state().current().cloned()
    }

    /// Whether a capture attempt would pass the gate right now.
    pub fn is_valid(&self) -> bool {
        self.state().is_set()
    }

    /// Validate a key against the server and commit it to the gate.
    ///
    /// The key must exist server-side (`success == true` from the lookup);
    /// only then is it committed. On failure the error message is the short
    /// user-facing string for the failure category, ready for inline
    /// display.
    pub async fn set_key(&self, raw: &str) -> anyhow::Result<()> {
        let Ok(key) = EventKey::new(raw) else {
            bail!("Event key cannot be empty.");
        };

        let result = self.api.validate_key(key.as_str()).await;
        if result.success {
            tracing::info!("Event key set: {}", key);
            self.config
                .update(|config| config.event_key = key.as_str().to_string());
            self.bus.dispatch(PluginEvent::KeySet {
                key: key.as_str().to_string(),
            });
            return Ok(());
        }

        match result.error_type {
            Some(kind) => {
                tracing::debug!("Event key rejected ({:?}): {}", kind, result.message);
                bail!(kind.user_message());
            }
            // A success:false body with no category means the server looked
            // the key up and disowned it
            None => {
                tracing::debug!("Event key rejected: {}", result.message);
                bail!("Invalid event key");
            }
        }
    }

    /// Same validation and commit as [`set_key`](Self::set_key); the prior
    /// value stays available through [`current_key`](Self::current_key) for
    /// the UI's pre-fill affordance.
    pub async fn change_key(&self, raw: &str) -> anyhow::Result<()> {
        self.set_key(raw).await
    }

    /// Clear the gate. Purely local - no server round-trip.
    pub fn clear_key(&self) {
        tracing::info!("Event key cleared");
        self.config.update(|config| config.event_key.clear());
        self.bus.dispatch(PluginEvent::KeyCleared);
    }
}
