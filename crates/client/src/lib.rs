//! Keyhunt client crate.
//!
//! The plugin half of the system: outbound ports to the host game client and
//! the validation service, application services (capture orchestration,
//! snapshot building, event-key gating, answer authoring, celebration),
//! infrastructure adapters (HTTP client, config store, status bus), and the
//! composition root that wires them together.
//!
//! # Execution contexts
//!
//! Three contexts are in play (see individual module docs):
//! - the host client's event-dispatch thread, where trigger handling and all
//!   [`ports::GameStatePort`] reads happen;
//! - the tokio runtime, where network submissions run;
//! - whatever context each status-bus subscriber marshals to before touching
//!   UI state. [`ports::HostActionPort`] implementations marshal back to the
//!   host thread themselves.

pub mod application;
pub mod config;
pub mod events;
pub mod infrastructure;
pub mod plugin;
pub mod ports;

pub use application::authoring::{AuthoringService, KeyAvailability};
pub use application::capture::CaptureService;
pub use application::celebration::CelebrationService;
pub use application::event_key::EventKeyService;
pub use application::snapshot::SnapshotBuilder;
pub use config::{ConfigStore, PluginConfig};
pub use events::PluginEvent;
pub use infrastructure::http::EventApiClient;
pub use infrastructure::status_bus::StatusBus;
pub use plugin::{ActivePanel, KeyhuntPlugin, PluginDeps};
pub use ports::{GameStatePort, HostActionPort, PlayerState, ValidationApiPort};
