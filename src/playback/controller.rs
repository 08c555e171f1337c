use std::time::Duration;

use tracing::{debug, info, warn};

use crate::catalog::TrackDescriptor;

use super::output::AudioOutput;
use super::progress;
use super::queue::PlayQueue;
use super::types::{EnqueueOutcome, PlaybackNotice, PlaybackState};

/// Owns the pending queue and the current track, and drives the output.
///
/// Transitions:
/// - `enqueue` while `Idle` immediately calls `play_next`; while `Playing` it
///   only appends.
/// - `play_next` pops the front of the queue into `Playing`, or goes `Idle`
///   when the queue is empty.
/// - `on_ended` is the only way past a finished track.
///
/// Every observable change is pushed to an outbox of `PlaybackNotice`s that
/// the caller drains with `take_notices`.
pub struct PlaybackController<O: AudioOutput> {
    queue: PlayQueue,
    state: PlaybackState,
    output: O,
    skip_unplayable: bool,
    notices: Vec<PlaybackNotice>,
}

impl<O: AudioOutput> PlaybackController<O> {
    pub fn new(output: O) -> Self {
        Self {
            queue: PlayQueue::new(),
            state: PlaybackState::Idle,
            output,
            skip_unplayable: false,
            notices: Vec::new(),
        }
    }

    /// When set, a track the output refuses to start is skipped instead of
    /// being left as the (silent) current track.
    pub fn with_skip_unplayable(mut self, skip: bool) -> Self {
        self.skip_unplayable = skip;
        self
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn current(&self) -> Option<&TrackDescriptor> {
        self.state.current()
    }

    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn queue_snapshot(&self) -> Vec<TrackDescriptor> {
        self.queue.snapshot()
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Drain pending notifications, oldest first.
    pub fn take_notices(&mut self) -> Vec<PlaybackNotice> {
        std::mem::take(&mut self.notices)
    }

    /// Append `track` to the queue and start playback if nothing is playing.
    pub fn enqueue(&mut self, track: TrackDescriptor) -> EnqueueOutcome {
        debug!(title = %track.title, artist = %track.artist, "enqueue");
        self.queue.enqueue(track);
        self.notify_queue();

        if self.is_idle() {
            self.play_next();
            EnqueueOutcome::Started
        } else {
            EnqueueOutcome::Queued {
                position: self.queue.len(),
            }
        }
    }

    /// Move to the next queued track, or to `Idle` when there is none.
    ///
    /// Calling this while `Playing` replaces the current track outright.
    pub fn play_next(&mut self) {
        loop {
            let Some(track) = self.queue.dequeue_front() else {
                self.go_idle();
                return;
            };

            info!(title = %track.title, artist = %track.artist, "now playing");
            self.state = PlaybackState::Playing(track.clone());
            self.notify_queue();
            self.notices
                .push(PlaybackNotice::NowPlaying(Some(track.clone())));
            self.notices.push(PlaybackNotice::Progress(0.0));

            match self.output.play(&track.preview_source_ref) {
                Ok(()) => return,
                Err(e) => {
                    warn!(title = %track.title, error = %e, "playback start rejected");
                    if !self.skip_unplayable {
                        // Stay `Playing`; the output may still come round.
                        return;
                    }
                }
            }
        }
    }

    /// The output finished the current track.
    pub fn on_ended(&mut self) {
        debug!(
            current = ?self.current().map(|t| &t.title),
            queue_empty = self.queue.is_empty(),
            "track ended"
        );
        self.play_next();
    }

    /// Periodic position update from the output.
    pub fn on_progress(&mut self, position: Duration, duration: Option<Duration>) {
        if self.is_idle() {
            return;
        }
        self.notices
            .push(PlaybackNotice::Progress(progress::percent(position, duration)));
    }

    /// The output gave up on starting the current track after `play` returned.
    pub fn on_start_rejected(&mut self, reason: &str) {
        warn!(
            current = ?self.current().map(|t| &t.title),
            reason,
            "playback start rejected"
        );
        if self.skip_unplayable && !self.is_idle() {
            self.play_next();
        }
    }

    fn go_idle(&mut self) {
        if !self.is_idle() {
            debug!("queue exhausted, going idle");
            self.output.stop();
        }
        self.state = PlaybackState::Idle;
        self.notices.push(PlaybackNotice::NowPlaying(None));
        self.notices.push(PlaybackNotice::Progress(0.0));
    }

    fn notify_queue(&mut self) {
        let snapshot = self.queue_snapshot();
        self.notices.push(PlaybackNotice::QueueChanged(snapshot));
    }
}
