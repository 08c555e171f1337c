//! Small value types shared by the controller and its observers.

use crate::catalog::TrackDescriptor;

/// Playback state. `Playing` always carries the current track.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing(TrackDescriptor),
}

impl PlaybackState {
    pub fn current(&self) -> Option<&TrackDescriptor> {
        match self {
            Self::Idle => None,
            Self::Playing(track) => Some(track),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// What a call to `PlaybackController::enqueue` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// The controller was idle and started the track (or the next one) at once.
    Started,
    /// Something is playing; the track waits at `position` (1-based).
    Queued { position: usize },
}

/// Change notifications emitted by the controller for the presentation side.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackNotice {
    /// The pending queue changed; carries a snapshot in playback order.
    QueueChanged(Vec<TrackDescriptor>),
    /// A new current track, or `None` when going idle.
    NowPlaying(Option<TrackDescriptor>),
    /// Progress of the current track, 0-100.
    Progress(f64),
}
