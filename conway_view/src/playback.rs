// playback.rs - Running/paused state machine and the tick accumulator

use std::ops::RangeInclusive;

use tracing::{debug, warn};

use crate::engine::Engine;
use crate::frames::{FrameHandle, FrameScheduler};

/// Upper bound accepted for the ticks-per-frame speed.
pub const MAX_TICKS_PER_FRAME: f64 = 1000.0;

/// Speeds accepted from the command line and offered by the slider.
pub const TICKS_PER_FRAME_RANGE: RangeInclusive<f64> = 0.0..=MAX_TICKS_PER_FRAME;

/// Clamp a speed value into `[0, MAX_TICKS_PER_FRAME]`; non-finite input becomes 0.
pub fn sanitize_ticks_per_frame(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(*TICKS_PER_FRAME_RANGE.start(), *TICKS_PER_FRAME_RANGE.end())
    } else {
        0.0
    }
}

/// Fractional ticks owed since the last whole tick was taken.
///
/// Once at least one whole tick is owed, all whole ticks are taken and the
/// remainder is dropped, not carried into the next frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TickAccumulator {
    owed: f64,
}

impl TickAccumulator {
    pub fn owed(&self) -> f64 {
        self.owed
    }

    pub fn reset(&mut self) {
        self.owed = 0.0;
    }

    /// Add one frame's worth of progress and return how many ticks are due now.
    pub fn advance(&mut self, ticks_per_frame: f64) -> u32 {
        self.owed += ticks_per_frame;
        if self.owed >= 1.0 {
            let due = self.owed.floor() as u32;
            self.owed = 0.0;
            due
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Paused,
    /// Carries the pending frame request so a pause can cancel it.
    Running(FrameHandle),
}

/// What one frame callback did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No live frame: nothing was due, or the handle had been cancelled.
    Skipped,
    /// Still short of a whole tick; nothing changed.
    Accumulating,
    /// This many ticks were taken.
    Stepped(u32),
}

impl FrameOutcome {
    pub fn needs_redraw(self) -> bool {
        matches!(self, FrameOutcome::Stepped(_))
    }
}

/// Owns the playback state, the accumulator and the frame scheduler.
pub struct PlaybackController<S> {
    scheduler: S,
    state: PlaybackState,
    accumulator: TickAccumulator,
    ticks_per_frame: f64,
}

impl<S: FrameScheduler> PlaybackController<S> {
    /// A paused controller.
    pub fn new(scheduler: S, ticks_per_frame: f64) -> Self {
        Self {
            scheduler,
            state: PlaybackState::Paused,
            accumulator: TickAccumulator::default(),
            ticks_per_frame: sanitize_ticks_per_frame(ticks_per_frame),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, PlaybackState::Running(_))
    }

    pub fn accumulator(&self) -> &TickAccumulator {
        &self.accumulator
    }

    pub fn ticks_per_frame(&self) -> f64 {
        self.ticks_per_frame
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Start requesting frames. Returns false if already running.
    pub fn play(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        let handle = self.scheduler.request_frame();
        self.state = PlaybackState::Running(handle);
        debug!(frame = handle.id(), "playback started");
        true
    }

    /// Cancel the pending frame and drop any owed ticks. Returns false if
    /// already paused.
    pub fn pause(&mut self) -> bool {
        let PlaybackState::Running(handle) = self.state else {
            return false;
        };
        self.scheduler.cancel_frame(handle);
        self.state = PlaybackState::Paused;
        self.accumulator.reset();
        debug!(frame = handle.id(), "playback paused");
        true
    }

    pub fn toggle(&mut self) -> PlaybackState {
        if self.is_running() {
            self.pause();
        } else {
            self.play();
        }
        self.state
    }

    /// Change the speed. Owed ticks are dropped in either state so the new
    /// speed starts from a clean slate.
    pub fn set_ticks_per_frame(&mut self, ticks_per_frame: f64) {
        self.ticks_per_frame = sanitize_ticks_per_frame(ticks_per_frame);
        self.accumulator.reset();
        debug!(ticks_per_frame = self.ticks_per_frame, "speed changed");
    }

    /// Run the frame callback for `handle`.
    ///
    /// Only the handle currently held in [`PlaybackState::Running`] does
    /// anything; cancelled or superseded handles are skipped.
    pub fn on_frame<E: Engine + ?Sized>(&mut self, handle: FrameHandle, engine: &mut E) -> FrameOutcome {
        if self.state != PlaybackState::Running(handle) {
            return FrameOutcome::Skipped;
        }

        let due = self.accumulator.advance(self.ticks_per_frame);
        for _ in 0..due {
            engine.step();
        }

        let next = self.scheduler.request_frame();
        self.state = PlaybackState::Running(next);

        if due > 0 {
            FrameOutcome::Stepped(due)
        } else {
            FrameOutcome::Accumulating
        }
    }

    /// Collect the due frame from the scheduler, if any, and run it.
    pub fn poll<E: Engine + ?Sized>(&mut self, engine: &mut E) -> FrameOutcome {
        match self.scheduler.take_due() {
            Some(handle) => self.on_frame(handle, engine),
            None => FrameOutcome::Skipped,
        }
    }

    /// Manual single step, allowed only while paused.
    pub fn step_once<E: Engine + ?Sized>(&mut self, engine: &mut E) -> bool {
        if self.is_running() {
            warn!("manual step ignored while playback is running");
            return false;
        }
        engine.step();
        true
    }
}
