// frames.rs - Per-frame callback scheduling

/// Identifies one requested frame so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// The host's "call me on the next display refresh" facility.
pub trait FrameScheduler {
    /// Request one callback on the next frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a request. A cancelled handle is never handed out by `take_due`.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// The frame due on this host turn, if one was requested.
    fn take_due(&mut self) -> Option<FrameHandle>;
}

/// A scheduler with no display attached: whoever owns it decides when a
/// frame happens by calling [`FrameScheduler::take_due`].
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Option<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Total number of frames requested so far.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total number of requests withdrawn before they fired.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }

    fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

/// Frame scheduling on top of egui: every request asks for a repaint, and
/// the next `update` call collects the due frame.
pub struct RepaintFrames {
    ctx: egui::Context,
    queue: FrameQueue,
}

impl RepaintFrames {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            queue: FrameQueue::new(),
        }
    }
}

impl FrameScheduler for RepaintFrames {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = self.queue.request_frame();
        self.ctx.request_repaint();
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.queue.cancel_frame(handle);
    }

    fn take_due(&mut self) -> Option<FrameHandle> {
        self.queue.take_due()
    }
}
