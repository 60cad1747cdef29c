use std::{collections::HashMap, sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio::{runtime::Handle, sync::oneshot};
use tracing::trace;

use super::{FRAME_INTERVAL, Scheduler, Task, TaskHandle};

/// Runs scheduled callbacks as tasks on a tokio runtime.
///
/// A timeout sleeps for its delay, a frame callback sleeps for
/// [`FRAME_INTERVAL`]. Each task races its sleep against a cancellation
/// channel, and a callback only runs if its handle is still registered when
/// the sleep completes.
pub struct TokioScheduler {
    runtime: Handle,
    pending: Arc<Mutex<HashMap<TaskHandle, oneshot::Sender<()>>>>,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Binds to the runtime of the calling context.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// Number of callbacks that have neither run nor been cancelled.
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Cancels every pending callback.
    pub fn cancel_all(&self) {
        let mut pending = self.pending.lock();
        for (_, cancel) in pending.drain() {
            let _ = cancel.send(());
        }
    }

    fn spawn_after(&self, delay: Duration, task: Task) -> TaskHandle {
        let handle = TaskHandle::next();
        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(handle, tx);

        let pending = Arc::clone(&self.pending);
        self.runtime.spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    let registered = pending.lock().remove(&handle).is_some();
                    if registered {
                        trace!(task = handle.id(), "running scheduled task");
                        task();
                    }
                },
                _ = rx => {},
            }
        });
        handle
    }

    fn cancel(&self, handle: TaskHandle) {
        if let Some(cancel) = self.pending.lock().remove(&handle) {
            trace!(task = handle.id(), "scheduled task cancelled");
            let _ = cancel.send(());
        }
    }
}

impl Scheduler for TokioScheduler {
    fn set_timeout(&self, delay: Duration, task: Task) -> TaskHandle {
        self.spawn_after(delay, task)
    }

    fn clear_timeout(&self, handle: TaskHandle) {
        self.cancel(handle);
    }

    fn request_animation_frame(&self, task: Task) -> TaskHandle {
        self.spawn_after(FRAME_INTERVAL, task)
    }

    fn cancel_animation_frame(&self, handle: TaskHandle) {
        self.cancel(handle);
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
