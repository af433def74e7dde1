//! EncounterSelection domain using Actor+Relay architecture
//!
//! Multi-row selection over the encounter history. The selection set lives
//! independently of the fetch lifecycle: ids stay selected when their rows
//! page out of view, and turning selection mode off hides the checkboxes
//! without discarding the set. Clearing is always an explicit event.

use crate::dataflow::{Actor, MutableExt, Relay, relay};
use futures::{StreamExt, select};
use futures_signals::signal::Signal;
use indexmap::IndexSet;

/// Selected-encounter state plus the selection-mode UI flag.
#[derive(Clone)]
pub struct EncounterSelection {
    selected: Actor<IndexSet<i64>>,
    selection_mode: Actor<bool>,

    /// User toggled the checkbox of one encounter row.
    pub encounter_toggled_relay: Relay<i64>,
    /// User selected everything on the current page.
    pub page_selected_relay: Relay<Vec<i64>>,
    /// User cleared the whole selection (or a bulk action finished).
    pub selection_cleared_relay: Relay<()>,
    /// User toggled the selection-mode switch.
    pub selection_mode_toggled_relay: Relay<()>,
}

impl EncounterSelection {
    pub fn new() -> Self {
        let (encounter_toggled_relay, encounter_toggled_stream) = relay::<i64>();
        let (page_selected_relay, page_selected_stream) = relay::<Vec<i64>>();
        let (selection_cleared_relay, selection_cleared_stream) = relay::<()>();
        let (selection_mode_toggled_relay, selection_mode_toggled_stream) = relay::<()>();

        let selected = Actor::new(IndexSet::new(), async move |state| {
            let mut encounter_toggled = encounter_toggled_stream;
            let mut page_selected = page_selected_stream;
            let mut selection_cleared = selection_cleared_stream;

            loop {
                select! {
                    id = encounter_toggled.next() => {
                        let Some(id) = id else { break };
                        state.update_mut(|set| {
                            if !set.shift_remove(&id) {
                                set.insert(id);
                            }
                        });
                    }
                    ids = page_selected.next() => {
                        let Some(ids) = ids else { break };
                        state.update_mut(|set| set.extend(ids));
                    }
                    cleared = selection_cleared.next() => {
                        if cleared.is_some() {
                            state.update_mut(|set| set.clear());
                        } else {
                            break;
                        }
                    }
                }
            }
        });

        let selection_mode = Actor::new(false, async move |state| {
            let mut toggled = selection_mode_toggled_stream;
            while let Some(()) = toggled.next().await {
                state.update_mut(|mode| *mode = !*mode);
            }
        });

        Self {
            selected,
            selection_mode,
            encounter_toggled_relay,
            page_selected_relay,
            selection_cleared_relay,
            selection_mode_toggled_relay,
        }
    }

    /// The full selection set, in insertion order.
    pub fn selected_signal(&self) -> impl Signal<Item = IndexSet<i64>> + use<> {
        self.selected.signal()
    }

    /// Whether one specific encounter is currently selected.
    pub fn is_selected_signal(&self, id: i64) -> impl Signal<Item = bool> + use<> {
        self.selected.signal_ref(move |set| set.contains(&id))
    }

    /// Number of selected encounters.
    pub fn selected_count_signal(&self) -> impl Signal<Item = usize> + use<> {
        self.selected.signal_ref(|set| set.len())
    }

    /// Whether per-row checkboxes are shown.
    pub fn selection_mode_signal(&self) -> impl Signal<Item = bool> + use<> {
        self.selection_mode.signal()
    }
}

impl Default for EncounterSelection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_signals::signal::SignalExt;
    use tokio::time::{Duration, sleep};

    async fn settle() {
        sleep(Duration::from_millis(20)).await;
    }

    async fn selected(selection: &EncounterSelection) -> IndexSet<i64> {
        selection.selected_signal().to_stream().next().await.unwrap()
    }

    #[tokio::test]
    async fn toggle_twice_is_a_no_op() {
        let selection = EncounterSelection::new();
        settle().await;

        selection.encounter_toggled_relay.send(7);
        settle().await;
        assert!(selected(&selection).await.contains(&7));

        selection.encounter_toggled_relay.send(7);
        settle().await;
        assert!(selected(&selection).await.is_empty());
    }

    #[tokio::test]
    async fn selection_survives_mode_toggling() {
        let selection = EncounterSelection::new();
        settle().await;

        selection.selection_mode_toggled_relay.send(());
        selection.encounter_toggled_relay.send(1);
        selection.encounter_toggled_relay.send(2);
        settle().await;
        assert!(selection.selection_mode_signal().to_stream().next().await.unwrap());

        // Leaving selection mode hides the checkboxes but keeps the set.
        selection.selection_mode_toggled_relay.send(());
        settle().await;
        assert!(!selection.selection_mode_signal().to_stream().next().await.unwrap());
        assert_eq!(selected(&selection).await.len(), 2);
    }

    #[tokio::test]
    async fn page_selection_unions_into_the_set() {
        let selection = EncounterSelection::new();
        settle().await;

        selection.encounter_toggled_relay.send(2);
        selection.page_selected_relay.send(vec![1, 2, 3]);
        settle().await;

        let set = selected(&selection).await;
        assert_eq!(set.len(), 3);
        assert!(set.contains(&1) && set.contains(&2) && set.contains(&3));
    }

    #[tokio::test]
    async fn clearing_empties_the_set() {
        let selection = EncounterSelection::new();
        settle().await;

        selection.page_selected_relay.send(vec![1, 2, 3]);
        settle().await;
        selection.selection_cleared_relay.send(());
        settle().await;

        assert!(selected(&selection).await.is_empty());
        assert_eq!(selection.selected_count_signal().to_stream().next().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn is_selected_tracks_one_id() {
        let selection = EncounterSelection::new();
        settle().await;

        assert!(!selection.is_selected_signal(5).to_stream().next().await.unwrap());
        selection.encounter_toggled_relay.send(5);
        settle().await;
        assert!(selection.is_selected_signal(5).to_stream().next().await.unwrap());
    }
}
