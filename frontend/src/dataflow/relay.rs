//! Event streaming Relay implementation
//!
//! Relay provides type-safe event streaming for the Actor+Relay
//! architecture using plain unbounded channels instead of a custom Stream
//! implementation.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};

/// Type-safe event source for the Actor+Relay architecture.
///
/// Relays carry events from the UI (or from spawned system tasks) into an
/// Actor's processing loop. The relay half is freely clonable; the receiver
/// half is handed to exactly one Actor at construction time.
///
/// # Event-Source Naming Convention
///
/// Relays are named `{source}_{event}_relay`:
/// - `search_typed_relay` - user edited the search box
/// - `page_next_clicked_relay` - user clicked the next-page control
/// - `fetch_settled_relay` - a spawned fetch task finished
#[derive(Clone, Debug)]
pub struct Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    sender: UnboundedSender<T>,
}

/// Error type for Relay operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// The channel has been closed (receiver dropped)
    ChannelClosed,
}

impl<T> Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new Relay with an associated receiver stream.
    ///
    /// Returns a `(Relay, UnboundedReceiver)` tuple following Rust's channel
    /// conventions. Use the [`relay()`] function for more convenient creation.
    pub fn new() -> (Self, UnboundedReceiver<T>) {
        let (sender, receiver) = unbounded();
        (Relay { sender }, receiver)
    }

    /// Send an event through the relay.
    ///
    /// If the receiver has been dropped, the event is silently discarded.
    /// Use [`Relay::try_send`] to handle send failures explicitly.
    pub fn send(&self, value: T) {
        let _ = self.sender.unbounded_send(value);
    }

    /// Send an event, reporting whether the receiving Actor is still alive.
    pub fn try_send(&self, value: T) -> Result<(), RelayError> {
        self.sender
            .unbounded_send(value)
            .map_err(|_| RelayError::ChannelClosed)
    }
}

impl<T> Default for Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a "disconnected" relay whose events are silently discarded.
    ///
    /// Useful as a placeholder before the real relay is wired up, and in
    /// tests that do not care about a particular event source.
    fn default() -> Self {
        let (relay, _receiver) = Self::new();
        relay
    }
}

/// Creates a new Relay with an associated receiver stream.
///
/// This is the idiomatic way to create a Relay for use with Actors.
///
/// # Examples
///
/// ```ignore
/// let (search_typed_relay, mut search_typed_stream) = relay::<String>();
///
/// search_typed_relay.send("brel".to_string());
///
/// while let Some(text) = search_typed_stream.next().await {
///     // react to the edit
/// }
/// ```
pub fn relay<T>() -> (Relay<T>, UnboundedReceiver<T>)
where
    T: Clone + Send + Sync + 'static,
{
    Relay::new()
}
