use tracing::debug;

use crate::playback::{AudioError, AudioOutput};

use super::player::AudioPlayer;
use super::types::{AudioCmd, AudioEvent};

/// `AudioOutput` backed by the rodio audio thread.
///
/// Each `play`/`stop` bumps the token, so any event still in flight for an
/// earlier track fails `is_current` and is dropped by the caller.
pub struct RodioOutput {
    player: AudioPlayer,
    token: u64,
}

impl RodioOutput {
    pub fn new(player: AudioPlayer) -> Self {
        Self { player, token: 0 }
    }

    pub fn player(&self) -> &AudioPlayer {
        &self.player
    }

    /// True when `event` belongs to the track most recently passed to `play`.
    pub fn is_current(&self, event: &AudioEvent) -> bool {
        let current = self.token != 0 && event.token() == self.token;
        if !current {
            debug!(event = ?event, token = self.token, "dropping stale audio event");
        }
        current
    }
}

impl AudioOutput for RodioOutput {
    fn play(&mut self, source_ref: &str) -> Result<(), AudioError> {
        self.token += 1;

        if source_ref.trim().is_empty() {
            // Nothing to load, but the previous track must not keep playing.
            let _ = self.player.send(AudioCmd::Stop);
            return Err(AudioError::NoSource);
        }

        self.player
            .send(AudioCmd::Load {
                source_ref: source_ref.to_string(),
                token: self.token,
            })
            .map_err(|_| AudioError::Disconnected)
    }

    fn stop(&mut self) {
        self.token += 1;
        let _ = self.player.send(AudioCmd::Stop);
    }
}
