//! Composition root for the Keyhunt plugin.
//!
//! Wires ports, config, services, and the status-bus observers together and
//! exposes the host-facing event entry points. The host adapter owns the
//! actual client integration (event feed, chat, sounds) and hands this
//! struct its ports at startup.

use std::sync::Arc;

use keyhunt_domain::MenuAction;
use tokio::task::JoinHandle;

use crate::application::authoring::AuthoringService;
use crate::application::capture::CaptureService;
use crate::application::celebration::CelebrationService;
use crate::application::event_key::EventKeyService;
use crate::application::snapshot::SnapshotBuilder;
use crate::config::ConfigStore;
use crate::events::PluginEvent;
use crate::infrastructure::status_bus::StatusBus;
use crate::ports::{GameStatePort, HostActionPort, ValidationApiPort};

/// Which top-level panel the UI should present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePanel {
    Capture,
    AnswerBuilder,
}

/// Everything the composition root needs from the host adapter
pub struct PluginDeps {
    pub game_state: Arc<dyn GameStatePort>,
    pub host: Arc<dyn HostActionPort>,
    pub api: Arc<dyn ValidationApiPort>,
    pub config: ConfigStore,
    pub runtime: tokio::runtime::Handle,
}

/// The assembled plugin
pub struct KeyhuntPlugin {
    capture: CaptureService,
    event_keys: EventKeyService,
    authoring: Arc<AuthoringService>,
    bus: StatusBus,
    config: ConfigStore,
}

impl KeyhuntPlugin {
    pub fn new(deps: PluginDeps) -> Self {
        let PluginDeps {
            game_state,
            host,
            api,
            config,
            runtime,
        } = deps;

        tracing::info!("Keyhunt started");

        let bus = StatusBus::new();

        let capture = CaptureService::new(
            config.clone(),
            Arc::clone(&api),
            SnapshotBuilder::new(game_state),
            Arc::clone(&host),
            bus.clone(),
            runtime.clone(),
        );
        let event_keys = EventKeyService::new(config.clone(), Arc::clone(&api), bus.clone());
        let authoring = Arc::new(AuthoringService::new(Arc::clone(&api)));
        let celebration = CelebrationService::new(Arc::clone(&host), config.clone(), runtime);

        // Completion observer: echo to host chat (successes always, failures
        // only in debug mode) and fire the celebration on success. Runs on
        // the completion context; the host port marshals its own side.
        let relay_host = host;
        let relay_config = config.clone();
        bus.subscribe(move |event| {
            if let PluginEvent::CaptureCompleted { result } = event {
                if result.success {
                    relay_host.send_chat_message(&format!("[Keyhunt] \u{2713} {}", result.message));
                    celebration.celebrate();
                } else if relay_config.snapshot().debug {
                    relay_host.send_chat_message(&format!("[KH-debug] \u{2717} {}", result.message));
                }
            }
        });

        Self {
            capture,
            event_keys,
            authoring,
            bus,
            config,
        }
    }

    // =========================================================================
    // Host-facing event entry points
    // =========================================================================

    /// Forward a local-player animation change from the host event feed.
    pub fn on_animation_changed(&self, animation_id: i32) -> Option<JoinHandle<()>> {
        self.capture.on_animation_changed(animation_id)
    }

    /// Forward a clicked menu option from the host event feed.
    pub fn on_menu_option_clicked(
        &self,
        action: MenuAction,
        npc_id: i32,
        option: &str,
    ) -> Option<JoinHandle<()>> {
        self.capture.on_menu_option_clicked(action, npc_id, option)
    }

    /// Manual capture from the panel's submit button.
    pub fn submit_manual(&self) -> Option<JoinHandle<()>> {
        self.capture.submit_manual()
    }

    // =========================================================================
    // Panel-facing accessors
    // =========================================================================

    pub fn event_keys(&self) -> &EventKeyService {
        &self.event_keys
    }

    pub fn authoring(&self) -> &Arc<AuthoringService> {
        &self.authoring
    }

    pub fn status_bus(&self) -> &StatusBus {
        &self.bus
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Which panel the UI should present, from `answer_builder_mode`.
    pub fn active_panel(&self) -> ActivePanel {
        if self.config.snapshot().answer_builder_mode {
            ActivePanel::AnswerBuilder
        } else {
            ActivePanel::Capture
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ports::{MockGameStatePort, MockHostActionPort, MockValidationApiPort};

    fn deps(
        api: MockValidationApiPort,
        host: MockHostActionPort,
    ) -> (PluginDeps, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = ConfigStore::open(dir.path().join("config.json"));
        let deps = PluginDeps {
            game_state: Arc::new(MockGameStatePort::new()),
            host: Arc::new(host),
            api: Arc::new(api),
            config,
            runtime: tokio::runtime::Handle::current(),
        };
        (deps, dir)
    }

    #[tokio::test]
    async fn test_active_panel_follows_builder_mode_flag() {
        let (deps, _dir) = deps(MockValidationApiPort::new(), MockHostActionPort::new());
        let plugin = KeyhuntPlugin::new(deps);
        assert_eq!(plugin.active_panel(), ActivePanel::Capture);

        plugin.config().update(|c| c.answer_builder_mode = true);
        assert_eq!(plugin.active_panel(), ActivePanel::AnswerBuilder);
    }

    #[tokio::test]
    async fn test_failure_completions_stay_out_of_chat_without_debug() {
        // No expectations on the host mock: any chat call would panic
        let (deps, _dir) = deps(MockValidationApiPort::new(), MockHostActionPort::new());
        let plugin = KeyhuntPlugin::new(deps);
        plugin.status_bus().dispatch(PluginEvent::CaptureCompleted {
            result: keyhunt_protocol::ApiResult::error("Not quite"),
        });
    }

    #[tokio::test]
    async fn test_failure_completions_echo_in_debug_mode() {
        let mut host = MockHostActionPort::new();
        host.expect_send_chat_message()
            .withf(|message: &str| message == "[KH-debug] \u{2717} Not quite")
            .times(1)
            .return_const(());

        let (deps, _dir) = deps(MockValidationApiPort::new(), host);
        let plugin = KeyhuntPlugin::new(deps);
        plugin.config().update(|c| c.debug = true);
        plugin.status_bus().dispatch(PluginEvent::CaptureCompleted {
            result: keyhunt_protocol::ApiResult::error("Not quite"),
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_completions_echo_and_celebrate() {
        let mut host = MockHostActionPort::new();
        host.expect_send_chat_message()
            .withf(|message: &str| message == "[Keyhunt] \u{2713} Correct!")
            .times(1)
            .return_const(());
        // Default config has both celebration flags on
        host.expect_play_sound().times(3).return_const(());
        host.expect_play_player_graphic().times(1).return_const(());

        let (deps, _dir) = deps(MockValidationApiPort::new(), host);
        let plugin = KeyhuntPlugin::new(deps);
        plugin.status_bus().dispatch(PluginEvent::CaptureCompleted {
            result: keyhunt_protocol::ApiResult::ok("Correct!"),
        });

        // Let the delayed sound stage run before the mocks are verified
        tokio::time::sleep(std::time::Duration::from_millis(700)).await;
    }
}
