//! Audio-related small types.
//!
//! Commands sent to the audio thread and the events it sends back. Every
//! load carries a `token`; events echo it so superseded tracks can be told
//! apart from the current one.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCmd {
    /// Fetch, decode and start the preview at `source_ref`, replacing whatever plays.
    Load { source_ref: String, token: u64 },
    /// Stop playback immediately.
    Stop,
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    /// The track finished on its own.
    Ended { token: u64 },
    /// Periodic position report.
    Progress {
        token: u64,
        position: Duration,
        /// `None` when the decoder cannot tell.
        duration: Option<Duration>,
    },
    /// The track could not be started.
    StartRejected { token: u64, reason: String },
}

impl AudioEvent {
    pub fn token(&self) -> u64 {
        match self {
            Self::Ended { token }
            | Self::Progress { token, .. }
            | Self::StartRejected { token, .. } => *token,
        }
    }
}
