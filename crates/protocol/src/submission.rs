//! Game-state submission payload for `POST /submit-guess`.
//!
//! A submission is built once per successful trigger, never mutated after
//! construction, and discarded when the async round-trip completes. Trigger
//! fields serialize as explicit `null` when unpopulated so the server can
//! distinguish "not applicable" from "field missing" - exactly one of
//! `emote_id` / `npc_id`+`interaction_type` is populated per trigger
//! category (`dig` and `button` captures carry neither).

use serde::{Deserialize, Serialize};

use keyhunt_domain::{ItemStack, ScenePoint, WorldPoint};

/// Absolute world-grid position on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldCoords {
    pub x: i32,
    pub y: i32,
    pub plane: i32,
}

impl From<WorldPoint> for WorldCoords {
    fn from(point: WorldPoint) -> Self {
        Self {
            x: point.x,
            y: point.y,
            plane: point.plane,
        }
    }
}

/// Render-local position on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalCoords {
    #[serde(rename = "sceneX")]
    pub scene_x: i32,
    #[serde(rename = "sceneY")]
    pub scene_y: i32,
}

impl From<ScenePoint> for LocalCoords {
    fn from(point: ScenePoint) -> Self {
        Self {
            scene_x: point.scene_x,
            scene_y: point.scene_y,
        }
    }
}

/// Player position at capture time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationData {
    pub world: WorldCoords,
    pub local: LocalCoords,
}

impl LocationData {
    pub fn new(world: WorldPoint, local: ScenePoint) -> Self {
        Self {
            world: world.into(),
            local: local.into(),
        }
    }
}

/// One occupied container slot on the wire.
///
/// Empty slots are omitted from the payload entirely, never sent as
/// `id = -1` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemData {
    pub slot: i32,
    pub id: i32,
    pub quantity: i32,
}

impl ItemData {
    /// Flatten a host container into wire items.
    ///
    /// Slot indices follow the source container's 0-based positions; `None`
    /// slots contribute nothing.
    pub fn from_slots(slots: &[Option<ItemStack>]) -> Vec<Self> {
        slots
            .iter()
            .enumerate()
            .filter_map(|(slot, stack)| {
                stack.map(|stack| Self {
                    slot: slot as i32,
                    id: stack.id,
                    quantity: stack.quantity,
                })
            })
            .collect()
    }
}

/// Canonical snapshot submitted for puzzle validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStateSubmission {
    pub location: LocationData,
    pub inventory: Vec<ItemData>,
    pub worn_items: Vec<ItemData>,
    pub emote_id: Option<i32>,
    pub npc_id: Option<i32>,
    pub interaction_type: Option<String>,
    pub event_key: String,
    /// Player display name; `None` when no identity is resolvable
    pub rsn: Option<String>,
}

impl GameStateSubmission {
    /// Build a submission with no trigger payload (`dig` and `button`
    /// captures).
    pub fn new(
        location: LocationData,
        inventory: Vec<ItemData>,
        worn_items: Vec<ItemData>,
        event_key: impl Into<String>,
        rsn: Option<String>,
    ) -> Self {
        Self {
            location,
            inventory,
            worn_items,
            emote_id: None,
            npc_id: None,
            interaction_type: None,
            event_key: event_key.into(),
            rsn,
        }
    }

    /// Attach the emote animation id (`emote` captures).
    pub fn with_emote(mut self, emote_id: i32) -> Self {
        self.emote_id = Some(emote_id);
        self
    }

    /// Attach the NPC id and menu option (`npc_interaction` captures).
    pub fn with_npc_interaction(mut self, npc_id: i32, interaction_type: impl Into<String>) -> Self {
        self.npc_id = Some(npc_id);
        self.interaction_type = Some(interaction_type.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> LocationData {
        LocationData::new(WorldPoint::new(3222, 3218, 0), ScenePoint::new(52, 50))
    }

    #[test]
    fn test_from_slots_omits_empty_slots_and_keeps_indices() {
        let slots = vec![
            Some(ItemStack::new(952, 1)),
            None,
            Some(ItemStack::new(1511, 27)),
            None,
        ];
        let items = ItemData::from_slots(&slots);
        assert_eq!(
            items,
            vec![
                ItemData { slot: 0, id: 952, quantity: 1 },
                ItemData { slot: 2, id: 1511, quantity: 27 },
            ]
        );
    }

    #[test]
    fn test_empty_containers_serialize_as_empty_arrays() {
        let submission = GameStateSubmission::new(location(), Vec::new(), Vec::new(), "abc123", None);
        let value = serde_json::to_value(&submission).expect("serialize");
        assert_eq!(value["inventory"], serde_json::json!([]));
        assert_eq!(value["worn_items"], serde_json::json!([]));
    }

    #[test]
    fn test_unpopulated_trigger_fields_serialize_as_explicit_null() {
        let submission =
            GameStateSubmission::new(location(), Vec::new(), Vec::new(), "abc123", None).with_emote(862);
        let value = serde_json::to_value(&submission).expect("serialize");
        let object = value.as_object().expect("object");

        assert_eq!(value["emote_id"], 862);
        assert!(object.contains_key("npc_id"));
        assert!(value["npc_id"].is_null());
        assert!(object.contains_key("interaction_type"));
        assert!(value["interaction_type"].is_null());
        assert!(object.contains_key("rsn"));
        assert!(value["rsn"].is_null());
    }

    #[test]
    fn test_local_coords_use_scene_camel_case_on_the_wire() {
        let value = serde_json::to_value(location()).expect("serialize");
        assert_eq!(value["local"]["sceneX"], 52);
        assert_eq!(value["local"]["sceneY"], 50);
    }

    #[test]
    fn test_submission_roundtrip_preserves_every_field() {
        let original = GameStateSubmission::new(
            location(),
            vec![ItemData { slot: 0, id: 952, quantity: 1 }],
            vec![ItemData { slot: 3, id: 1163, quantity: 1 }],
            "abc123",
            Some("Zezima".to_string()),
        )
        .with_npc_interaction(3077, "Talk-to");

        let json = serde_json::to_string(&original).expect("serialize");
        let back: GameStateSubmission = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(original, back);
        assert_eq!(back.emote_id, None);
        assert_eq!(back.npc_id, Some(3077));
    }
}
