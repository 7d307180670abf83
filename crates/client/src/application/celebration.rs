//! Celebratory side effects on a correct submission.
//!
//! Plays the victory sound and the level-up fireworks through the host
//! client, each behind its own config flag. Host failures here are cosmetic
//! and never surface beyond a warn log.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::ConfigStore;
use crate::ports::HostActionPort;

/// Teleport-woosh sound effect, triumphant enough for a correct answer.
const VICTORY_SOUND: u32 = 1930;

/// The vanilla level-up fireworks graphic rendered on the player.
const LEVEL_UP_FIREWORKS_GRAPHIC: u32 = 199;

const LEVEL_UP_SOUND_FIRST: u32 = 2396;
const LEVEL_UP_SOUND_SECOND: u32 = 2384;

/// Gap between the two level-up sound stages (~35 client ticks).
const LEVEL_UP_SOUND_GAP: Duration = Duration::from_millis(583);

/// Plays victory effects according to the celebration config flags
pub struct CelebrationService {
    host: Arc<dyn HostActionPort>,
    config: ConfigStore,
    runtime: tokio::runtime::Handle,
}

impl CelebrationService {
    pub fn new(
        host: Arc<dyn HostActionPort>,
        config: ConfigStore,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        Self {
            host,
            config,
            runtime,
        }
    }

    /// Trigger the victory celebration.
    ///
    /// Returns the task playing the delayed second sound stage, when
    /// fireworks are enabled; dropping it does not cancel the sound.
    pub fn celebrate(&self) -> Option<JoinHandle<()>> {
        let config = self.config.snapshot();
        tracing::debug!(
            sound = config.show_celebration_sound,
            fireworks = config.show_celebration_fireworks,
            "Triggering victory celebration"
        );

        if config.show_celebration_sound {
            self.host.play_sound(VICTORY_SOUND);
        }

        if !config.show_celebration_fireworks {
            return None;
        }

        self.host.play_player_graphic(LEVEL_UP_FIREWORKS_GRAPHIC);
        self.host.play_sound(LEVEL_UP_SOUND_FIRST);

        let host = Arc::clone(&self.host);
        Some(self.runtime.spawn(async move {
            tokio::time::sleep(LEVEL_UP_SOUND_GAP).await;
            host.play_sound(LEVEL_UP_SOUND_SECOND);
        }))
    }
}
