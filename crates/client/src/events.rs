//! Events published on the status bus.
//!
//! The orchestrator and the event-key service publish; the UI panel, chat
//! relay, and celebration hooks observe. This one-directional channel
//! replaces a bidirectional orchestrator/panel reference - observers never
//! call back into the publisher from their callbacks.

use keyhunt_domain::TriggerKind;
use keyhunt_protocol::ApiResult;

/// Notification published to status-bus subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum PluginEvent {
    /// A capture passed the gate and its submission is in flight. Dispatched
    /// before the network round-trip so the UI can show "submitting".
    CaptureStarted {
        trigger: TriggerKind,
        detail: String,
        event_key: String,
    },
    /// A capture attempt ended because no player entity was resolvable
    CapturePlayerNotFound,
    /// A submission resolved; `result` carries the server or network outcome
    CaptureCompleted { result: ApiResult },
    /// The event-key gate was set or changed
    KeySet { key: String },
    /// The event-key gate was cleared
    KeyCleared,
}
