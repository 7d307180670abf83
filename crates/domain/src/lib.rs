//! Keyhunt domain layer.
//!
//! Pure types and rules for the capture/authoring pipeline: trigger
//! classification, the event-key gate state machine, the constraint model,
//! and answer drafts. No I/O, no async, no ambient state - everything here
//! is deterministic and unit testable in isolation.

pub mod answer;
pub mod constraints;
pub mod error;
pub mod event_key;
pub mod triggers;
pub mod types;

pub use answer::AnswerDraft;
pub use constraints::{
    ActionConstraint, ActionKind, Constraint, EquipmentConstraint, EquipmentKind,
    EventKeyConstraint, EventKeyKind, InventoryConstraint, InventoryKind, LocationConstraint,
    LocationKind,
};
pub use error::DomainError;
pub use event_key::{EventKey, EventKeyState};
pub use triggers::{
    classify_animation, classify_menu_action, CaptureTrigger, MenuAction, TriggerKind,
    DIG_ANIMATION, TRIGGER_ANIMATIONS,
};
pub use types::{ItemStack, ScenePoint, WorldPoint};
