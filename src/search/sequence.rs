/// Numbers outgoing searches and decides which responses may be shown.
///
/// With `discard_stale` a response is shown unless a newer one has already
/// been applied (or the input was cleared after it was issued). Without it
/// every response is accepted in arrival order.
#[derive(Debug)]
pub struct SearchSequencer {
    latest: u64,
    /// Responses at or below this sequence number are stale.
    applied: u64,
    discard_stale: bool,
}

impl SearchSequencer {
    pub fn new(discard_stale: bool) -> Self {
        Self {
            latest: 0,
            applied: 0,
            discard_stale,
        }
    }

    /// Sequence number for a new request.
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Make every request issued so far stale (e.g. the input was cleared).
    pub fn invalidate(&mut self) {
        self.applied = self.latest;
    }

    /// Whether the response to `seq` may be shown. An accepted response
    /// becomes the newest applied one.
    pub fn accept(&mut self, seq: u64) -> bool {
        if !self.discard_stale {
            return true;
        }
        if seq <= self.applied {
            return false;
        }
        self.applied = seq;
        true
    }
}
