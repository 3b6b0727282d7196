/// Token for one scheduled redraw.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameHandle(u64);

/// Cooperative redraw scheduler ticked once per display refresh.
///
/// At most one frame is pending at a time. A frame that fires is consumed;
/// the draw step must request the next one to keep the loop running.
#[derive(Debug, Default)]
pub struct FrameLoop {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the next frame, replacing any pending one.
    pub fn request(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    /// Drop the pending frame, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Fire the pending frame, if any.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}
