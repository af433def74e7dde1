//! Task spawning for Actor processor loops

use std::future::Future;
use tokio::task::JoinHandle;

/// Handle to a spawned processor task that aborts the task when dropped.
///
/// Actors hold their processor loop through this handle so the loop never
/// outlives the last clone of the Actor that owns it.
#[derive(Debug)]
pub struct TaskHandle {
    handle: JoinHandle<()>,
}

impl TaskHandle {
    /// Spawn `future` on the current tokio runtime.
    ///
    /// Must be called from within a runtime; every domain struct in this
    /// crate is constructed inside one.
    pub fn start_droppable<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn dropping_the_handle_aborts_the_task() {
        let finished = Arc::new(AtomicBool::new(false));
        let finished_clone = finished.clone();

        let handle = TaskHandle::start_droppable(async move {
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
            finished_clone.store(true, Ordering::SeqCst);
        });
        drop(handle);

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        assert!(!finished.load(Ordering::SeqCst));
    }
}
