use std::time::{Duration, Instant};

/// What a quiet input should turn into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceOutcome {
    /// Issue a search for this text (verbatim, not trimmed).
    Search(String),
    /// The input is blank: show the prompt, do not search.
    Cleared,
}

/// Holds back the search until the input has been quiet for `delay`.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a new input value; restarts the quiet period.
    pub fn input_changed(&mut self, text: &str, now: Instant) {
        self.pending = Some((text.to_string(), now + self.delay));
    }

    /// Fire at most once per quiet period.
    pub fn poll(&mut self, now: Instant) -> Option<DebounceOutcome> {
        let (_, due) = self.pending.as_ref()?;
        if now < *due {
            return None;
        }

        let (text, _) = self.pending.take()?;
        if text.trim().is_empty() {
            Some(DebounceOutcome::Cleared)
        } else {
            Some(DebounceOutcome::Search(text))
        }
    }
}
