//! # Scheduling
//!
//! Components never talk to an event loop directly. They receive a
//! [`Scheduler`], which offers the two deferral primitives a UI host provides:
//!
//! - a delayed callback ([`Scheduler::set_timeout`]) with a matching cancel,
//! - a next-frame callback ([`Scheduler::request_animation_frame`]) with a
//!   matching cancel.
//!
//! Every scheduled callback yields a [`TaskHandle`]. Cancelling a handle that
//! already fired, was already cancelled, or was never issued by this scheduler
//! is a no-op, so teardown code can cancel unconditionally.
//!
//! Two implementations ship with the crate:
//!
//! - [`ManualScheduler`] queues callbacks until the host drains them
//!   explicitly. It keeps a virtual clock and never touches real time, which
//!   makes it the natural fit for tests and for hosts that own their loop.
//! - `TokioScheduler` (behind the `tokio` feature) runs callbacks as tasks on a
//!   tokio runtime.

use std::{
    collections::VecDeque,
    sync::atomic::{AtomicU64, AtomicUsize, Ordering},
    time::Duration,
};

use parking_lot::Mutex;
use tracing::trace;

#[cfg(feature = "tokio")]
mod tokio_scheduler;

#[cfg(feature = "tokio")]
pub use tokio_scheduler::TokioScheduler;

/// Nominal duration of one display frame.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

/// A deferred unit of work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Identifies one scheduled callback.
///
/// Handles are unique across all schedulers in the process.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TaskHandle(u64);

impl TaskHandle {
    /// Allocates a fresh handle.
    pub fn next() -> Self {
        Self(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric id, useful for logging.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Deferred-callback primitives offered by a UI host.
pub trait Scheduler: Send + Sync {
    /// Runs `task` once after `delay` has elapsed.
    fn set_timeout(&self, delay: Duration, task: Task) -> TaskHandle;

    /// Cancels a pending timeout.
    fn clear_timeout(&self, handle: TaskHandle);

    /// Runs `task` before the next frame is painted.
    fn request_animation_frame(&self, task: Task) -> TaskHandle;

    /// Cancels a pending frame callback.
    fn cancel_animation_frame(&self, handle: TaskHandle);
}

struct PendingTimer {
    handle: TaskHandle,
    due: Duration,
    task: Task,
}

struct PendingFrame {
    handle: TaskHandle,
    task: Task,
}

#[derive(Default)]
struct Queues {
    now: Duration,
    timers: Vec<PendingTimer>,
    frames: VecDeque<PendingFrame>,
}

impl Queues {
    /// Removes the earliest timer due at or before `now`, keeping insertion
    /// order among timers with the same deadline.
    fn pop_due_timer(&mut self) -> Option<PendingTimer> {
        let now = self.now;
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= now)
            .min_by_key(|(index, timer)| (timer.due, *index))
            .map(|(index, _)| index)?;
        Some(self.timers.remove(index))
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|timer| timer.due).min()
    }
}

/// A scheduler that only runs callbacks when told to.
///
/// Timers are ordered by deadline on a virtual clock starting at zero; frames
/// run in request order. Callbacks are invoked without any internal lock held,
/// so they may schedule or cancel further work.
///
/// ```
/// use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
/// use std::time::Duration;
/// use ringlet_ui::{ManualScheduler, Scheduler};
///
/// let scheduler = ManualScheduler::new();
/// let fired = Arc::new(AtomicBool::new(false));
/// let flag = fired.clone();
/// scheduler.set_timeout(Duration::ZERO, Box::new(move || flag.store(true, Ordering::SeqCst)));
///
/// assert_eq!(scheduler.run_timers(), 1);
/// assert!(fired.load(Ordering::SeqCst));
/// ```
#[derive(Default)]
pub struct ManualScheduler {
    queues: Mutex<Queues>,
    timers_scheduled: AtomicUsize,
    frames_scheduled: AtomicUsize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.queues.lock().now
    }

    pub fn pending_timers(&self) -> usize {
        self.queues.lock().timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.queues.lock().frames.len()
    }

    /// Total number of timeouts ever requested.
    pub fn timers_scheduled(&self) -> usize {
        self.timers_scheduled.load(Ordering::Relaxed)
    }

    /// Total number of frame callbacks ever requested.
    pub fn frames_scheduled(&self) -> usize {
        self.frames_scheduled.load(Ordering::Relaxed)
    }

    /// Runs every timer due at the current virtual time, including timers
    /// scheduled with zero delay by callbacks run during this call.
    ///
    /// Returns the number of callbacks run.
    pub fn run_timers(&self) -> usize {
        let mut ran = 0;
        loop {
            let timer = self.queues.lock().pop_due_timer();
            let Some(timer) = timer else {
                break;
            };
            trace!(task = timer.handle.id(), "running timeout");
            (timer.task)();
            ran += 1;
        }
        ran
    }

    /// Moves the virtual clock forward by `by`, running timers as they come
    /// due.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut ran = 0;
        loop {
            let next = {
                let mut queues = self.queues.lock();
                match queues.next_deadline() {
                    Some(deadline) if deadline <= target => {
                        queues.now = queues.now.max(deadline);
                        true
                    }
                    _ => {
                        queues.now = target;
                        false
                    }
                }
            };
            if !next {
                break;
            }
            ran += self.run_timers();
        }
        ran
    }

    /// Runs one frame: every frame callback requested before this call.
    ///
    /// Callbacks requested while the frame runs wait for the next frame.
    pub fn run_frame(&self) -> usize {
        let batch: Vec<TaskHandle> = self
            .queues
            .lock()
            .frames
            .iter()
            .map(|frame| frame.handle)
            .collect();
        let mut ran = 0;
        for handle in batch {
            // Earlier callbacks in the batch may cancel later ones.
            let frame = {
                let mut queues = self.queues.lock();
                match queues.frames.iter().position(|frame| frame.handle == handle) {
                    Some(index) => queues.frames.remove(index),
                    None => None,
                }
            };
            if let Some(frame) = frame {
                trace!(task = frame.handle.id(), "running frame callback");
                (frame.task)();
                ran += 1;
            }
        }
        ran
    }

    /// Alternates between due timers and frames, advancing the clock to the
    /// next deadline when nothing else is runnable, until both queues are
    /// empty.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            ran += self.run_timers();
            if self.pending_frames() > 0 {
                ran += self.run_frame();
                continue;
            }
            let next_deadline = self.queues.lock().next_deadline();
            match next_deadline {
                Some(deadline) => {
                    let now = self.now();
                    ran += self.advance(deadline.saturating_sub(now));
                }
                None => break,
            }
        }
        ran
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay: Duration, task: Task) -> TaskHandle {
        let handle = TaskHandle::next();
        let mut queues = self.queues.lock();
        let due = queues.now + delay;
        queues.timers.push(PendingTimer { handle, due, task });
        self.timers_scheduled.fetch_add(1, Ordering::Relaxed);
        trace!(task = handle.id(), ?delay, "timeout scheduled");
        handle
    }

    fn clear_timeout(&self, handle: TaskHandle) {
        let mut queues = self.queues.lock();
        let before = queues.timers.len();
        queues.timers.retain(|timer| timer.handle != handle);
        if queues.timers.len() != before {
            trace!(task = handle.id(), "timeout cancelled");
        }
    }

    fn request_animation_frame(&self, task: Task) -> TaskHandle {
        let handle = TaskHandle::next();
        self.queues
            .lock()
            .frames
            .push_back(PendingFrame { handle, task });
        self.frames_scheduled.fetch_add(1, Ordering::Relaxed);
        trace!(task = handle.id(), "frame callback scheduled");
        handle
    }

    fn cancel_animation_frame(&self, handle: TaskHandle) {
        let mut queues = self.queues.lock();
        let before = queues.frames.len();
        queues.frames.retain(|frame| frame.handle != handle);
        if queues.frames.len() != before {
            trace!(task = handle.id(), "frame callback cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let make = move |label: &'static str| -> Task {
            let sink = sink.clone();
            Box::new(move || sink.lock().push(label))
        };
        (log, make)
    }

    #[test]
    fn handles_are_unique() {
        let a = TaskHandle::next();
        let b = TaskHandle::next();
        assert_ne!(a, b);
        assert!(b.id() > a.id());
    }

    #[test]
    fn timers_run_in_deadline_then_insertion_order() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        scheduler.set_timeout(Duration::from_millis(10), task("late"));
        scheduler.set_timeout(Duration::ZERO, task("first"));
        scheduler.set_timeout(Duration::ZERO, task("second"));

        assert_eq!(scheduler.run_timers(), 2);
        assert_eq!(*log.lock(), ["first", "second"]);
        assert_eq!(scheduler.pending_timers(), 1);

        assert_eq!(scheduler.advance(Duration::from_millis(9)), 0);
        assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
        assert_eq!(*log.lock(), ["first", "second", "late"]);
        assert_eq!(scheduler.now(), Duration::from_millis(10));
    }

    #[test]
    fn cleared_timeout_never_runs() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        let handle = scheduler.set_timeout(Duration::ZERO, task("cancelled"));
        scheduler.clear_timeout(handle);
        // Cancelling twice or cancelling a foreign handle is harmless.
        scheduler.clear_timeout(handle);
        scheduler.cancel_animation_frame(TaskHandle::next());

        assert_eq!(scheduler.run_until_idle(), 0);
        assert!(log.lock().is_empty());
        assert_eq!(scheduler.timers_scheduled(), 1);
    }

    #[test]
    fn frames_requested_during_a_frame_wait_for_the_next_one() {
        let scheduler = Arc::new(ManualScheduler::new());
        let (log, task) = recorder();
        let inner = scheduler.clone();
        let nested = task("nested");
        scheduler.request_animation_frame(Box::new(move || {
            inner.request_animation_frame(nested);
        }));
        scheduler.request_animation_frame(task("outer"));

        assert_eq!(scheduler.run_frame(), 2);
        assert_eq!(*log.lock(), ["outer"]);
        assert_eq!(scheduler.pending_frames(), 1);
        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(*log.lock(), ["outer", "nested"]);
    }

    #[test]
    fn run_until_idle_follows_timeout_into_frame() {
        let scheduler = Arc::new(ManualScheduler::new());
        let (log, task) = recorder();
        let inner = scheduler.clone();
        let frame = task("frame");
        scheduler.set_timeout(
            Duration::from_millis(5),
            Box::new(move || {
                inner.request_animation_frame(frame);
            }),
        );

        assert_eq!(scheduler.run_until_idle(), 2);
        assert_eq!(*log.lock(), ["frame"]);
        assert_eq!(scheduler.frames_scheduled(), 1);
        assert_eq!(scheduler.now(), Duration::from_millis(5));
    }
}
