//! Single-value Actor implementation for reactive state management
//!
//! Actor provides controlled state mutation with sequential event
//! processing. It owns a `Mutable<T>` and updates it exclusively from the
//! processor loop it was constructed with.

use crate::dataflow::task::TaskHandle;
use futures_signals::signal::{Mutable, Signal};
use std::future::Future;
use std::sync::Arc;

/// Single-value reactive state container.
///
/// All mutations to the contained value happen inside the processor loop,
/// one event at a time, which rules out races between competing writers.
/// Reads go through signals; there is deliberately no `get()`.
///
/// # Examples
///
/// ```ignore
/// let (increment_relay, mut increment_stream) = relay();
///
/// let counter = Actor::new(0u32, async move |state| {
///     while let Some(amount) = increment_stream.next().await {
///         state.update_mut(|current| *current += amount);
///     }
/// });
///
/// increment_relay.send(5);
/// counter.signal() // reactive access to the current count
/// ```
#[derive(Clone, Debug)]
pub struct Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    state: Mutable<T>,
    #[allow(dead_code)]
    task_handle: Arc<TaskHandle>,
}

impl<T> Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new Actor with initial state and an event processing loop.
    ///
    /// The processor receives the state handle and typically runs a
    /// `select!` loop over one or more relay streams. It is spawned
    /// immediately and aborted when the last clone of the Actor is dropped.
    pub fn new<F, Fut>(initial_state: T, processor: F) -> Self
    where
        F: FnOnce(Mutable<T>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let state = Mutable::new(initial_state);
        let task_handle = Arc::new(TaskHandle::start_droppable(processor(state.clone())));

        Self { state, task_handle }
    }

    /// Reactive signal carrying clones of the current state.
    pub fn signal(&self) -> impl Signal<Item = T> + use<T> {
        self.state.signal_cloned()
    }

    /// Reactive signal derived from a reference to the state, for cases
    /// where cloning the whole value per emission would be wasteful.
    pub fn signal_ref<U, F>(&self, f: F) -> impl Signal<Item = U> + use<T, U, F>
    where
        F: FnMut(&T) -> U,
    {
        self.state.signal_ref(f)
    }
}
