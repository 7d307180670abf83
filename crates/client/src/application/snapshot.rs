//! Snapshot builder: live host state -> canonical submission.
//!
//! Reads location, inventory, and worn equipment through [`GameStatePort`]
//! and assembles the wire payload. Must run on the host client's
//! event-dispatch context - the port's reads are not safe from arbitrary
//! threads - so the orchestrator calls it synchronously from trigger
//! handlers before anything is moved to the network context.

use std::sync::Arc;

use keyhunt_domain::{CaptureTrigger, EventKey};
use keyhunt_protocol::{GameStateSubmission, ItemData, LocationData};

use crate::ports::GameStatePort;

/// Builds [`GameStateSubmission`] records from current host state
#[derive(Clone)]
pub struct SnapshotBuilder {
    game_state: Arc<dyn GameStatePort>,
}

impl SnapshotBuilder {
    pub fn new(game_state: Arc<dyn GameStatePort>) -> Self {
        Self { game_state }
    }

    /// Assemble a submission for the given trigger.
    ///
    /// Returns `None` when no player entity is resolvable - the one
    /// condition under which a gated capture attempt still produces no
    /// network call. Empty container slots are omitted; slot indices match
    /// the source container's positions. The `rsn` field is `None` when the
    /// player's display name is unavailable.
    pub fn build(&self, trigger: &CaptureTrigger, event_key: &EventKey) -> Option<GameStateSubmission> {
        let player = self.game_state.local_player()?;

        let location = LocationData::new(player.world, player.scene);
        let inventory = ItemData::from_slots(&self.game_state.inventory());
        let worn_items = ItemData::from_slots(&self.game_state.equipment());

        let submission = GameStateSubmission::new(
            location,
            inventory,
            worn_items,
            event_key.as_str(),
            player.display_name,
        );

        Some(match trigger {
            CaptureTrigger::Emote { animation_id } => submission.with_emote(*animation_id),
            CaptureTrigger::NpcInteraction { npc_id, option } => {
                submission.with_npc_interaction(*npc_id, option.clone())
            }
            // Dig and manual captures carry no trigger payload
            CaptureTrigger::Dig { .. } | CaptureTrigger::Button => submission,
        })
    }
}
