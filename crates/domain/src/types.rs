//! Shared vocabulary types for game-state snapshots.
//!
//! These mirror what the host client exposes at capture time. They are
//! immutable snapshots - once read from the host they are never updated in
//! place, only rebuilt on the next capture.

use serde::{Deserialize, Serialize};

/// Absolute world-grid position of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: i32,
    pub y: i32,
    /// Vertical level (0 = ground)
    pub plane: i32,
}

impl WorldPoint {
    pub fn new(x: i32, y: i32, plane: i32) -> Self {
        Self { x, y, plane }
    }
}

/// Render-local position within the loaded scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenePoint {
    pub scene_x: i32,
    pub scene_y: i32,
}

impl ScenePoint {
    pub fn new(scene_x: i32, scene_y: i32) -> Self {
        Self { scene_x, scene_y }
    }
}

/// One occupied container slot as read from the host client.
///
/// Containers are reported as `Vec<Option<ItemStack>>` with 0-based,
/// contiguous slot indexing sized to the container's capacity; `None` marks
/// an empty slot. The wire payload omits empty slots entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub id: i32,
    pub quantity: i32,
}

impl ItemStack {
    pub fn new(id: i32, quantity: i32) -> Self {
        Self { id, quantity }
    }
}
