//! Capture orchestrator.
//!
//! Drives a capture attempt through its states: Idle -> Gating -> (rejected
//! | Building) -> Submitting -> (Succeeded | Failed). Trigger handling and
//! snapshot building run synchronously on the caller's (host) thread; the
//! network round-trip is spawned onto the tokio handle; outcomes are
//! republished on the status bus for observers.
//!
//! There is deliberately no guard against overlapping in-flight captures: a
//! rapid double-click racing an animation trigger produces two submissions,
//! each publishes its own completion, and the last one wins the displayed
//! status. Once dispatched, a submission always runs to completion - there
//! is no cancellation path.

use std::sync::Arc;

use tokio::task::JoinHandle;

use keyhunt_domain::{classify_menu_action, CaptureTrigger, EventKey, MenuAction};

use crate::application::snapshot::SnapshotBuilder;
use crate::config::ConfigStore;
use crate::events::PluginEvent;
use crate::infrastructure::status_bus::StatusBus;
use crate::ports::{HostActionPort, ValidationApiPort};

/// Orchestrates trigger-gated capture attempts
pub struct CaptureService {
    config: ConfigStore,
    api: Arc<dyn ValidationApiPort>,
    snapshots: SnapshotBuilder,
    host: Arc<dyn HostActionPort>,
    bus: StatusBus,
    runtime: tokio::runtime::Handle,
}

impl CaptureService {
    pub fn new(
        config: ConfigStore,
        api: Arc<dyn ValidationApiPort>,
        snapshots: SnapshotBuilder,
        host: Arc<dyn HostActionPort>,
        bus: StatusBus,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        Self {
            config,
            api,
            snapshots,
            host,
            bus,
            runtime,
        }
    }

    /// Handle a local-player animation change.
    ///
    /// The host adapter must already have filtered to the local player. In
    /// debug mode every animation id is echoed to chat, trigger or not.
    /// Returns the in-flight submission task when a capture was dispatched;
    /// dropping the handle does not cancel it.
    pub fn on_animation_changed(&self, animation_id: i32) -> Option<JoinHandle<()>> {
        if self.config.snapshot().debug {
            self.host
                .send_chat_message(&format!("[KH-debug] Animation ID: {animation_id}"));
        }

        let trigger = CaptureTrigger::from_animation(animation_id)?;
        tracing::info!("{} detected with animation ID: {}", trigger.kind(), animation_id);
        self.capture(trigger)
    }

    /// Handle a clicked menu option.
    ///
    /// Only NPC options qualify; every other menu action (walk, objects,
    /// widgets) is ignored.
    pub fn on_menu_option_clicked(
        &self,
        action: MenuAction,
        npc_id: i32,
        option: &str,
    ) -> Option<JoinHandle<()>> {
        classify_menu_action(action)?;

        tracing::info!("NPC interaction detected (ID: {}) - {}", npc_id, option);
        self.capture(CaptureTrigger::NpcInteraction {
            npc_id,
            option: option.to_string(),
        })
    }

    /// Capture on the manual submit button.
    pub fn submit_manual(&self) -> Option<JoinHandle<()>> {
        self.capture(CaptureTrigger::Button)
    }

    fn capture(&self, trigger: CaptureTrigger) -> Option<JoinHandle<()>> {
        let config = self.config.snapshot();

        // Gating: an unset key terminates silently, before any host reads or
        // network traffic
        let event_key = match EventKey::new(&config.event_key) {
            Ok(key) => key,
            Err(_) => {
                tracing::debug!("Capture skipped - event key is empty ({})", trigger.detail());
                if config.debug {
                    self.host.send_chat_message(&format!(
                        "[KH-debug] Capture skipped - Event Key is empty ({})",
                        trigger.detail()
                    ));
                }
                return None;
            }
        };

        // Building: no resolvable player ends the attempt with a status, not
        // a network call
        let Some(submission) = self.snapshots.build(&trigger, &event_key) else {
            tracing::warn!("Capture aborted - player not found");
            self.bus.dispatch(PluginEvent::CapturePlayerNotFound);
            return None;
        };

        tracing::info!(
            "Game state submission ({}): {} | Event Key: {}, Inventory: {} items, Worn: {} items",
            trigger.kind(),
            trigger.detail(),
            event_key,
            submission.inventory.len(),
            submission.worn_items.len()
        );

        // Submitting: observers see the in-flight status before the
        // round-trip resolves
        self.bus.dispatch(PluginEvent::CaptureStarted {
            trigger: trigger.kind(),
            detail: trigger.detail(),
            event_key: event_key.as_str().to_string(),
        });

        if config.debug {
            self.host
                .send_chat_message(&format!("[KH-debug] Submitting guess for '{event_key}'..."));
        }

        let api = Arc::clone(&self.api);
        let bus = self.bus.clone();
        Some(self.runtime.spawn(async move {
            let result = api.submit_guess(submission).await;
            bus.dispatch(PluginEvent::CaptureCompleted { result });
        }))
    }
}
