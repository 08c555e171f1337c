//! FIFO of tracks waiting to be played.

use std::collections::VecDeque;

use crate::catalog::TrackDescriptor;

/// Pending tracks in insertion order. Never holds the current track.
#[derive(Debug, Default, Clone)]
pub struct PlayQueue {
    items: VecDeque<TrackDescriptor>,
}

impl PlayQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `track` at the back. Duplicates are allowed.
    pub fn enqueue(&mut self, track: TrackDescriptor) {
        self.items.push_back(track);
    }

    /// Remove and return the oldest track, or `None` when empty.
    pub fn dequeue_front(&mut self) -> Option<TrackDescriptor> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copy of the pending tracks for rendering.
    pub fn snapshot(&self) -> Vec<TrackDescriptor> {
        self.items.iter().cloned().collect()
    }
}
