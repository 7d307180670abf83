//! Trigger classification for capture attempts.
//!
//! A capture is initiated by a qualifying game event: a player animation on
//! the allow-list below, an NPC menu interaction, or the manual submit
//! button. Classification is pure - no side effects, no I/O - so the
//! orchestrator can call it on the host's event-dispatch context.
//!
//! The animation allow-list is data, not logic. Extending the event with new
//! emotes means adding an id to [`TRIGGER_ANIMATIONS`], nothing else. Several
//! of the ids are estimated rather than confirmed in-game values; the table
//! is configuration to be corrected as testing catches up, not verified
//! domain truth.

use serde::{Deserialize, Serialize};

/// Animation id for digging with a spade.
///
/// The one allow-listed animation that classifies as `Dig` instead of
/// `Emote`.
pub const DIG_ANIMATION: i32 = 830;

/// Animation ids that qualify as capture triggers.
///
/// Emote animations plus the dig tool action. Ids marked estimated came from
/// community lists and have not all been confirmed in-game.
pub const TRIGGER_ANIMATIONS: &[i32] = &[
    // Basic emotes (confirmed)
    855,  // Yes
    856,  // No
    857,  // Thinking
    858,  // Bow
    859,  // Angry
    860,  // Cry
    861,  // Laugh
    862,  // Cheer
    863,  // Wave
    864,  // Beckon
    865,  // Clap
    866,  // Dance
    1128, // Jump for Joy
    1129, // Yawn
    1130, // Spin
    1131, // Shrug
    2105, // Salute
    2127, // Goblin bow
    2128, // Goblin salute
    2108, // Glass box
    2109, // Climb rope
    2110, // Lean
    2111, // Glass wall
    1374, // Blow Kiss
    3544, // Zombie Walk
    6111, // Rabbit Hop
    // Additional emotes (estimated)
    1132, // Jig
    2104, // Headbang
    2112, // Panic
    2113, // Raspberry
    3920, // Premier Shield
    1200, // Sit down
    1133, // Flex
    3545, // Zombie Dance
    1201, // Sit up
    1202, // Push up
    1203, // Star jump
    1204, // Jog
    7535, // Air Guitar
    8118, // Uri transform
    8524, // Explore
    9990, // Fortis Salute
    4275, // Idea
    4276, // Stamp
    4277, // Flap
    4278, // Slap Head
    3867, // Scared
    3546, // Zombie Hand
    7929, // Hypermobile Drinker
    7930, // Smooth dance
    7931, // Crazy dance
    7932, // Party
    7933, // Trick
    // Tool actions
    DIG_ANIMATION,
];

/// Category of event that initiated a capture attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    Dig,
    Emote,
    NpcInteraction,
    Button,
}

impl TriggerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dig => "dig",
            Self::Emote => "emote",
            Self::NpcInteraction => "npc_interaction",
            Self::Button => "button",
        }
    }
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Menu-action kinds reported by the host client.
///
/// Only the five NPC option kinds qualify as triggers; everything else
/// (movement, object and widget interactions) is rejected by
/// [`classify_menu_action`]. `Unknown` covers host action kinds this plugin
/// has no interest in distinguishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    Walk,
    WidgetTarget,
    GameObjectFirstOption,
    GameObjectSecondOption,
    ItemUse,
    NpcFirstOption,
    NpcSecondOption,
    NpcThirdOption,
    NpcFourthOption,
    NpcFifthOption,
    #[serde(other)]
    Unknown,
}

/// A qualifying game event together with its payload.
///
/// This is what the capture orchestrator carries through a capture attempt;
/// [`TriggerKind`] is the category, `CaptureTrigger` keeps the identifiers
/// needed for the wire payload and for human-readable status text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureTrigger {
    Dig { animation_id: i32 },
    Emote { animation_id: i32 },
    NpcInteraction { npc_id: i32, option: String },
    Button,
}

impl CaptureTrigger {
    /// Classify an animation id and wrap it with its payload.
    pub fn from_animation(animation_id: i32) -> Option<Self> {
        match classify_animation(animation_id)? {
            TriggerKind::Dig => Some(Self::Dig { animation_id }),
            TriggerKind::Emote => Some(Self::Emote { animation_id }),
            // Animations never classify as these
            TriggerKind::NpcInteraction | TriggerKind::Button => None,
        }
    }

    pub fn kind(&self) -> TriggerKind {
        match self {
            Self::Dig { .. } => TriggerKind::Dig,
            Self::Emote { .. } => TriggerKind::Emote,
            Self::NpcInteraction { .. } => TriggerKind::NpcInteraction,
            Self::Button => TriggerKind::Button,
        }
    }

    /// Short human-readable description of what fired, for status text and
    /// debug traces.
    pub fn detail(&self) -> String {
        match self {
            Self::Dig { animation_id } | Self::Emote { animation_id } => {
                format!("Animation ID: {animation_id}")
            }
            Self::NpcInteraction { npc_id, option } => {
                format!("NPC ID: {npc_id}, Action: {option}")
            }
            Self::Button => "Manual submission via Submit Answer button".to_string(),
        }
    }
}

/// Classify a player animation id.
///
/// Returns `None` for any id outside the allow-list. [`DIG_ANIMATION`] maps
/// to [`TriggerKind::Dig`]; every other allow-listed id maps to
/// [`TriggerKind::Emote`].
pub fn classify_animation(animation_id: i32) -> Option<TriggerKind> {
    if !TRIGGER_ANIMATIONS.contains(&animation_id) {
        return None;
    }
    if animation_id == DIG_ANIMATION {
        Some(TriggerKind::Dig)
    } else {
        Some(TriggerKind::Emote)
    }
}

/// Classify a clicked menu action.
///
/// Accepts only the first through fifth NPC options; all other menu actions
/// are rejected regardless of target.
pub fn classify_menu_action(action: MenuAction) -> Option<TriggerKind> {
    match action {
        MenuAction::NpcFirstOption
        | MenuAction::NpcSecondOption
        | MenuAction::NpcThirdOption
        | MenuAction::NpcFourthOption
        | MenuAction::NpcFifthOption => Some(TriggerKind::NpcInteraction),
        _ => None,
    }
}
