//! Outbound repaint requests to the host

/// Host hook for scheduling a future repaint
///
/// The host may coalesce requests, but every request must be followed by at
/// least one `on_repaint` call.
pub trait RepaintRequester {
    fn request_repaint(&mut self);
}

impl<F: FnMut()> RepaintRequester for F {
    fn request_repaint(&mut self) {
        self()
    }
}

/// Counts outstanding repaint requests for hosts that poll
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RepaintCounter {
    pending: u32,
    total: u64,
}

impl RepaintCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume pending requests, coalescing them into one
    /// Returns true if at least one repaint was requested since the last call
    pub fn take(&mut self) -> bool {
        let pending = self.pending > 0;
        self.pending = 0;
        pending
    }

    #[inline]
    pub fn pending(&self) -> u32 {
        self.pending
    }

    /// Requests seen over the counter's lifetime
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }
}

impl RepaintRequester for RepaintCounter {
    fn request_repaint(&mut self) {
        self.pending = self.pending.saturating_add(1);
        self.total += 1;
    }
}
