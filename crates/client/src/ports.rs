//! Outbound ports - interfaces to the host game client and the validation
//! service.
//!
//! These traits define the contracts that infrastructure adapters must
//! implement, so application services never depend on a concrete host client
//! or HTTP stack. Mocks are generated for tests (and for downstream crates
//! via the `testing` feature).

use keyhunt_domain::{ItemStack, ScenePoint, WorldPoint};
use keyhunt_protocol::{AnswerSubmission, ApiResult, GameStateSubmission};

/// Player state as read from the host client at capture time
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub world: WorldPoint,
    pub scene: ScenePoint,
    /// Display name; `None` when identity is not yet resolved (e.g. during
    /// login)
    pub display_name: Option<String>,
}

/// Read access to live game state.
///
/// Reads are only safe from the host client's event-dispatch context; the
/// orchestrator guarantees it calls these synchronously from trigger
/// handlers, never from the network or UI contexts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait GameStatePort: Send + Sync {
    /// The local player, or `None` if no player entity is resolvable
    fn local_player(&self) -> Option<PlayerState>;

    /// Inventory container slots, 0-based and sized to capacity; `None`
    /// marks an empty slot
    fn inventory(&self) -> Vec<Option<ItemStack>>;

    /// Worn-equipment container slots, same indexing rules as `inventory`
    fn equipment(&self) -> Vec<Option<ItemStack>>;
}

/// Side effects on the host client.
///
/// Implementations are responsible for marshaling onto the host client's
/// thread - callers may invoke these from the network completion context.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait HostActionPort: Send + Sync {
    /// Append a line to the host client's message log
    fn send_chat_message(&self, message: &str);

    /// Play a sound effect by host sound id
    fn play_sound(&self, sound_id: u32);

    /// Render a graphic (spot animation) on the local player
    fn play_player_graphic(&self, graphic_id: u32);
}

/// Asynchronous access to the puzzle-validation service.
///
/// Every call resolves to exactly one [`ApiResult`] - transport, HTTP, and
/// parse failures are folded into it, never raised past the async boundary.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait::async_trait]
pub trait ValidationApiPort: Send + Sync {
    /// POST a game-state snapshot for evaluation
    async fn submit_guess(&self, submission: GameStateSubmission) -> ApiResult;

    /// Look up an event key. HTTP 404 resolves with
    /// [`keyhunt_protocol::ErrorKind::KeyNotFound`] - the expected "key does
    /// not exist" signal, not a fault.
    async fn validate_key(&self, event_key: &str) -> ApiResult;

    /// POST an authored answer for storage under its event key
    async fn submit_answer(&self, answer: AnswerSubmission) -> ApiResult;
}
