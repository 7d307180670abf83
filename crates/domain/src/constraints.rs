//! Constraint model for puzzle-answer acceptance criteria.
//!
//! A closed set of constraint variants, each carrying a sub-mode
//! discriminator (`type` on the wire) plus only the fields relevant to that
//! sub-mode. Constraints are a pure authoring/description layer: matching is
//! the server's job, the client never evaluates them locally.
//!
//! Sub-mode enums keep an `Unknown` catch-all so a forward-compatible server
//! can introduce new sub-modes without breaking deserialization; the
//! description table degrades to a generic sentence for those.

use serde::{Deserialize, Serialize};

/// One acceptance criterion for a puzzle answer.
///
/// Serialized with a `constraint_type` tag alongside the variant's own
/// fields, matching the validation service's storage format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "constraint_type", rename_all = "snake_case")]
pub enum Constraint {
    Location(LocationConstraint),
    Inventory(InventoryConstraint),
    Equipment(EquipmentConstraint),
    Action(ActionConstraint),
    EventKey(EventKeyConstraint),
}

impl Constraint {
    pub fn constraint_type(&self) -> &'static str {
        match self {
            Self::Location(_) => "location",
            Self::Inventory(_) => "inventory",
            Self::Equipment(_) => "equipment",
            Self::Action(_) => "action",
            Self::EventKey(_) => "event_key",
        }
    }

    /// Human-readable summary of what the constraint requires.
    ///
    /// Stable and non-empty for every declared sub-mode, with a generic
    /// fallback for unrecognized ones.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Location(c) => c.description(),
            Self::Inventory(c) => c.description(),
            Self::Equipment(c) => c.description(),
            Self::Action(c) => c.description(),
            Self::EventKey(c) => c.description(),
        }
    }
}

// =============================================================================
// Location
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Exact,
    Bounds,
    Tolerance,
    #[serde(other)]
    Unknown,
}

/// Where the player must be standing when the snapshot is taken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConstraint {
    #[serde(rename = "type")]
    pub kind: LocationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plane: Option<i32>,
    /// Maximum tile distance from the exact point, for `tolerance` mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<i32>,
}

impl LocationConstraint {
    fn empty(kind: LocationKind) -> Self {
        Self {
            kind,
            exact_x: None,
            exact_y: None,
            min_x: None,
            max_x: None,
            min_y: None,
            max_y: None,
            plane: None,
            tolerance: None,
        }
    }

    pub fn exact(x: i32, y: i32, plane: i32) -> Self {
        Self {
            exact_x: Some(x),
            exact_y: Some(y),
            plane: Some(plane),
            ..Self::empty(LocationKind::Exact)
        }
    }

    pub fn bounds(min_x: i32, max_x: i32, min_y: i32, max_y: i32, plane: i32) -> Self {
        Self {
            min_x: Some(min_x),
            max_x: Some(max_x),
            min_y: Some(min_y),
            max_y: Some(max_y),
            plane: Some(plane),
            ..Self::empty(LocationKind::Bounds)
        }
    }

    pub fn tolerance(x: i32, y: i32, plane: i32, tiles: i32) -> Self {
        Self {
            exact_x: Some(x),
            exact_y: Some(y),
            plane: Some(plane),
            tolerance: Some(tiles),
            ..Self::empty(LocationKind::Tolerance)
        }
    }

    pub fn description(&self) -> &'static str {
        match self.kind {
            LocationKind::Exact => "Must be at exact coordinates",
            LocationKind::Bounds => "Must be within specified area bounds",
            LocationKind::Tolerance => "Must be within tolerance of target location",
            LocationKind::Unknown => "Location constraint",
        }
    }
}

// =============================================================================
// Inventory
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryKind {
    Contains,
    Exact,
    MinimumQuantity,
    AnyOf,
    #[serde(other)]
    Unknown,
}

/// What the inventory must contain when the snapshot is taken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryConstraint {
    #[serde(rename = "type")]
    pub kind: InventoryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<i32>,
    /// Candidate items for `any_of` mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_ids: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_quantity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_slot: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_slot: Option<i32>,
}

impl InventoryConstraint {
    fn empty(kind: InventoryKind) -> Self {
        Self {
            kind,
            item_id: None,
            item_ids: None,
            min_quantity: None,
            exact_slot: None,
            required_slot: None,
        }
    }

    pub fn contains(item_id: i32) -> Self {
        Self {
            item_id: Some(item_id),
            ..Self::empty(InventoryKind::Contains)
        }
    }

    pub fn exact(item_id: i32, slot: i32) -> Self {
        Self {
            item_id: Some(item_id),
            exact_slot: Some(slot),
            ..Self::empty(InventoryKind::Exact)
        }
    }

    pub fn minimum_quantity(item_id: i32, quantity: i32) -> Self {
        Self {
            item_id: Some(item_id),
            min_quantity: Some(quantity),
            ..Self::empty(InventoryKind::MinimumQuantity)
        }
    }

    pub fn any_of(item_ids: Vec<i32>) -> Self {
        Self {
            item_ids: Some(item_ids),
            ..Self::empty(InventoryKind::AnyOf)
        }
    }

    pub fn description(&self) -> &'static str {
        match self.kind {
            InventoryKind::Contains => "Inventory must contain specified item",
            InventoryKind::Exact => "Specific inventory slot must contain specified item",
            InventoryKind::MinimumQuantity => "Inventory must contain minimum quantity of specified item",
            InventoryKind::AnyOf => "Inventory must contain at least one of specified items",
            InventoryKind::Unknown => "Inventory constraint",
        }
    }
}

// =============================================================================
// Equipment
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    Contains,
    ExactSlot,
    AnyOf,
    #[serde(other)]
    Unknown,
}

/// What must be worn when the snapshot is taken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentConstraint {
    #[serde(rename = "type")]
    pub kind: EquipmentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<i32>,
    /// Candidate items for `any_of` mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_ids: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_quantity: Option<i32>,
}

impl EquipmentConstraint {
    fn empty(kind: EquipmentKind) -> Self {
        Self {
            kind,
            item_id: None,
            item_ids: None,
            slot: None,
            min_quantity: None,
        }
    }

    pub fn contains(item_id: i32) -> Self {
        Self {
            item_id: Some(item_id),
            ..Self::empty(EquipmentKind::Contains)
        }
    }

    pub fn exact_slot(item_id: i32, slot: i32) -> Self {
        Self {
            item_id: Some(item_id),
            slot: Some(slot),
            ..Self::empty(EquipmentKind::ExactSlot)
        }
    }

    pub fn any_of(item_ids: Vec<i32>) -> Self {
        Self {
            item_ids: Some(item_ids),
            ..Self::empty(EquipmentKind::AnyOf)
        }
    }

    pub fn description(&self) -> &'static str {
        match self.kind {
            EquipmentKind::Contains => "Must have specified item equipped",
            EquipmentKind::ExactSlot => "Specific equipment slot must contain specified item",
            EquipmentKind::AnyOf => "Must have at least one of specified items equipped",
            EquipmentKind::Unknown => "Equipment constraint",
        }
    }
}

// =============================================================================
// Action
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Emote,
    NpcInteraction,
    AnyEmote,
    AnyNpc,
    #[serde(other)]
    Unknown,
}

/// What action must have triggered the capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionConstraint {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emote_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emote_ids: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npc_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npc_ids: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_types: Option<Vec<String>>,
}

impl ActionConstraint {
    fn empty(kind: ActionKind) -> Self {
        Self {
            kind,
            emote_id: None,
            emote_ids: None,
            npc_id: None,
            npc_ids: None,
            interaction_type: None,
            interaction_types: None,
        }
    }

    pub fn emote(emote_id: i32) -> Self {
        Self {
            emote_id: Some(emote_id),
            ..Self::empty(ActionKind::Emote)
        }
    }

    pub fn any_emote(emote_ids: Vec<i32>) -> Self {
        Self {
            emote_ids: Some(emote_ids),
            ..Self::empty(ActionKind::AnyEmote)
        }
    }

    pub fn npc_interaction(npc_id: i32, interaction_type: impl Into<String>) -> Self {
        Self {
            npc_id: Some(npc_id),
            interaction_type: Some(interaction_type.into()),
            ..Self::empty(ActionKind::NpcInteraction)
        }
    }

    pub fn any_npc() -> Self {
        Self::empty(ActionKind::AnyNpc)
    }

    pub fn description(&self) -> &'static str {
        match self.kind {
            ActionKind::Emote => "Must perform specific emote",
            ActionKind::AnyEmote => "Must perform one of specified emotes",
            ActionKind::NpcInteraction => "Must interact with specified NPC",
            ActionKind::AnyNpc => "Must interact with any NPC",
            ActionKind::Unknown => "Action constraint",
        }
    }
}

// =============================================================================
// Event key
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKeyKind {
    Exact,
    Prefix,
    Suffix,
    AnyOf,
    #[serde(other)]
    Unknown,
}

/// What event key the submission must carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventKeyConstraint {
    #[serde(rename = "type")]
    pub kind: EventKeyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_keys: Option<Vec<String>>,
}

impl EventKeyConstraint {
    fn empty(kind: EventKeyKind) -> Self {
        Self {
            kind,
            exact_key: None,
            prefix: None,
            suffix: None,
            allowed_keys: None,
        }
    }

    pub fn exact(key: impl Into<String>) -> Self {
        Self {
            exact_key: Some(key.into()),
            ..Self::empty(EventKeyKind::Exact)
        }
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::empty(EventKeyKind::Prefix)
        }
    }

    pub fn suffix(suffix: impl Into<String>) -> Self {
        Self {
            suffix: Some(suffix.into()),
            ..Self::empty(EventKeyKind::Suffix)
        }
    }

    pub fn any_of(keys: Vec<String>) -> Self {
        Self {
            allowed_keys: Some(keys),
            ..Self::empty(EventKeyKind::AnyOf)
        }
    }

    pub fn description(&self) -> &'static str {
        match self.kind {
            EventKeyKind::Exact => "Must have exact event key",
            EventKeyKind::Prefix => "Event key must start with specified prefix",
            EventKeyKind::Suffix => "Event key must end with specified suffix",
            EventKeyKind::AnyOf => "Must have one of allowed event keys",
            EventKeyKind::Unknown => "Event key constraint",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_wire_shape_omits_unused_fields() {
        let constraint = Constraint::Location(LocationConstraint::exact(3222, 3218, 0));
        let value = serde_json::to_value(&constraint).expect("serialize");
        assert_eq!(value["constraint_type"], "location");
        assert_eq!(value["type"], "exact");
        assert_eq!(value["exact_x"], 3222);
        assert_eq!(value["plane"], 0);
        // Bounds and tolerance fields are absent, not null
        let object = value.as_object().expect("object");
        assert!(!object.contains_key("min_x"));
        assert!(!object.contains_key("tolerance"));
    }

    #[test]
    fn test_event_key_variant_tag() {
        let constraint = Constraint::EventKey(EventKeyConstraint::exact("spring-hunt"));
        let value = serde_json::to_value(&constraint).expect("serialize");
        assert_eq!(value["constraint_type"], "event_key");
        assert_eq!(value["exact_key"], "spring-hunt");
    }

    #[test]
    fn test_constraint_roundtrip() {
        let original = Constraint::Inventory(InventoryConstraint::minimum_quantity(1511, 5));
        let json = serde_json::to_string(&original).expect("serialize");
        let back: Constraint = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(original, back);
    }

    #[test]
    fn test_descriptions_are_stable_and_non_empty() {
        let constraints = [
            Constraint::Location(LocationConstraint::bounds(3200, 3250, 3200, 3250, 0)),
            Constraint::Inventory(InventoryConstraint::contains(952)),
            Constraint::Equipment(EquipmentConstraint::any_of(vec![1163, 1127])),
            Constraint::Action(ActionConstraint::emote(866)),
            Constraint::EventKey(EventKeyConstraint::any_of(vec!["a".into(), "b".into()])),
        ];
        for constraint in &constraints {
            assert!(!constraint.description().is_empty());
            assert!(!constraint.constraint_type().is_empty());
        }
    }

    #[test]
    fn test_unknown_sub_mode_deserializes_with_fallback_description() {
        let json = r#"{"constraint_type":"location","type":"teleport_anchor"}"#;
        let constraint: Constraint = serde_json::from_str(json).expect("deserialize");
        match &constraint {
            Constraint::Location(c) => assert_eq!(c.kind, LocationKind::Unknown),
            other => panic!("expected location constraint, got {other:?}"),
        }
        assert_eq!(constraint.description(), "Location constraint");
    }

    #[test]
    fn test_npc_interaction_constructor_populates_only_relevant_fields() {
        let constraint = ActionConstraint::npc_interaction(3077, "Talk-to");
        assert_eq!(constraint.kind, ActionKind::NpcInteraction);
        assert_eq!(constraint.npc_id, Some(3077));
        assert_eq!(constraint.interaction_type.as_deref(), Some("Talk-to"));
        assert_eq!(constraint.emote_id, None);
        assert_eq!(constraint.npc_ids, None);
    }
}
