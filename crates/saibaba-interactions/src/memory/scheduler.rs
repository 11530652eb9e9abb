use std::{
    cell::{Cell, RefCell},
    time::Duration,
};

use crate::dom::{DomError, Scheduler};

enum TimerCallback {
    Once(Box<dyn FnOnce()>),
    Repeat {
        period: Duration,
        callback: Box<dyn FnMut()>,
    },
}

struct PendingTimer {
    due: Duration,
    seq: u64,
    callback: TimerCallback,
}

/// A scheduler driven by virtual time.
///
/// Nothing runs until [`ManualScheduler::advance`] moves the clock or
/// [`ManualScheduler::run_frame`] flushes the frame queue. Timers due at the
/// same instant fire in the order they were scheduled.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    next_seq: Cell<u64>,
    timers: RefCell<Vec<PendingTimer>>,
    frames: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Number of timers (one-shot or repeating) waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Moves the clock forward by `by`, firing every timer that falls due,
    /// including ones scheduled by callbacks along the way.
    pub fn advance(&self, by: Duration) {
        let deadline = self.now.get() + by;
        while let Some(timer) = self.pop_due(deadline) {
            self.now.set(timer.due);
            match timer.callback {
                TimerCallback::Once(callback) => callback(),
                TimerCallback::Repeat {
                    period,
                    mut callback,
                } => {
                    callback();
                    self.push(
                        timer.due + period,
                        TimerCallback::Repeat { period, callback },
                    );
                }
            }
        }
        self.now.set(deadline);
    }

    /// Runs every callback queued for the next frame and returns how many
    /// ran. Callbacks queued while running wait for the following frame.
    pub fn run_frame(&self) -> usize {
        let frames = std::mem::take(&mut *self.frames.borrow_mut());
        let count = frames.len();
        for callback in frames {
            callback();
        }
        count
    }

    fn pop_due(&self, deadline: Duration) -> Option<PendingTimer> {
        let mut timers = self.timers.borrow_mut();
        let index = timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= deadline)
            .min_by_key(|(_, timer)| (timer.due, timer.seq))
            .map(|(index, _)| index)?;
        Some(timers.remove(index))
    }

    fn push(&self, due: Duration, callback: TimerCallback) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.timers.borrow_mut().push(PendingTimer { due, seq, callback });
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        self.push(self.now.get() + delay, TimerCallback::Once(callback));
    }

    fn set_interval(&self, period: Duration, callback: Box<dyn FnMut()>) {
        // a zero period would never let `advance` finish
        let period = period.max(Duration::from_millis(1));
        self.push(
            self.now.get() + period,
            TimerCallback::Repeat { period, callback },
        );
    }

    fn request_animation_frame(&self, callback: Box<dyn FnOnce()>) -> Result<(), DomError> {
        self.frames.borrow_mut().push(callback);
        Ok(())
    }
}
