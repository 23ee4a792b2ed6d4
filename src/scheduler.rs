/// Single-slot redraw request flag.
///
/// Any number of [`request`](Self::request) calls between two frames collapse
/// into one redraw. The host owns the display loop: when `request` returns
/// true it schedules one frame callback, and that callback calls
/// [`take`](Self::take) to learn whether a redraw is due.
#[derive(Debug, Default)]
pub struct RedrawScheduler {
    pending: bool,
    requested: u64,
    coalesced: u64,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a redraw as needed. True only for the call that armed the slot.
    pub fn request(&mut self) -> bool {
        self.requested += 1;
        if self.pending {
            self.coalesced += 1;
            return false;
        }
        self.pending = true;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Clears the slot at frame time. True if a redraw was pending.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Requests absorbed by an already pending frame.
    pub fn coalesced_count(&self) -> u64 {
        self.coalesced
    }

    pub fn request_count(&self) -> u64 {
        self.requested
    }
}
