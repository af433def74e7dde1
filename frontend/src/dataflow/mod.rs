//! Core dataflow primitives for reactive state management
//!
//! This module provides the Actor+Relay building blocks the rest of the
//! crate is assembled from. They are independent of the encounter domain:
//!
//! - **[`Relay`]** - Type-safe event streaming over simple unbounded channels
//! - **[`Actor`]** - Single-value reactive state container
//! - **[`TaskHandle`]** - Abort-on-drop handle for spawned processor loops
//!
//! # Architecture Principles
//!
//! 1. **No Raw Mutables** - Every piece of state lives in an Actor
//! 2. **Event-Source Naming** - Relays follow the `{source}_{event}_relay` pattern
//! 3. **No Direct Access** - State is read through signals, never getters
//! 4. **Sequential Processing** - An Actor's loop is the only mutator of its state

pub mod actor;
pub mod relay;
pub mod task;

pub use actor::Actor;
pub use relay::{Relay, relay};
pub use task::TaskHandle;

use futures_signals::signal::Mutable;

/// In-place update helpers for the `Mutable` state handle an [`Actor`]
/// processor receives.
pub trait MutableExt<T> {
    /// Mutate the current value through `f` and notify subscribers.
    fn update_mut(&self, f: impl FnOnce(&mut T));
}

impl<T> MutableExt<T> for Mutable<T> {
    fn update_mut(&self, f: impl FnOnce(&mut T)) {
        let mut lock = self.lock_mut();
        f(&mut lock);
    }
}
