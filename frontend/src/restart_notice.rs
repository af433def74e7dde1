//! Restart-required notice for network interface changes
//!
//! The capture backend signals when the machine's network interface set
//! changed and packet capture can no longer continue; the UI answers with a
//! banner telling the user to restart the application. This state is
//! process-wide, independent of the query lifecycle, and only an explicit
//! dismissal hides it again.

use crate::dataflow::{Actor, Relay, relay};
use futures::{StreamExt, select};
use futures_signals::signal::Signal;

#[derive(Clone)]
pub struct RestartNotice {
    visible: Actor<bool>,

    /// The capture backend reported a changed network interface.
    pub interface_changed_relay: Relay<()>,
    /// User dismissed the banner.
    pub dismissed_relay: Relay<()>,
}

impl RestartNotice {
    pub fn new() -> Self {
        let (interface_changed_relay, interface_changed_stream) = relay::<()>();
        let (dismissed_relay, dismissed_stream) = relay::<()>();

        let visible = Actor::new(false, async move |state| {
            let mut interface_changed = interface_changed_stream;
            let mut dismissed = dismissed_stream;

            loop {
                select! {
                    raised = interface_changed.next() => {
                        if raised.is_some() {
                            state.set_neq(true);
                        } else {
                            break;
                        }
                    }
                    dismiss = dismissed.next() => {
                        if dismiss.is_some() {
                            state.set_neq(false);
                        } else {
                            break;
                        }
                    }
                }
            }
        });

        Self {
            visible,
            interface_changed_relay,
            dismissed_relay,
        }
    }

    /// Whether the restart banner is showing.
    pub fn visible_signal(&self) -> impl Signal<Item = bool> + use<> {
        self.visible.signal()
    }
}

impl Default for RestartNotice {
    fn default() -> Self {
        Self::new()
    }
}
