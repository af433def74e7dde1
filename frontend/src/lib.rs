//! Encounter history browser core
//!
//! The reactive controller behind the encounter log page of the meter:
//! turns user inputs (search text, structured filter, page navigation,
//! selection mode) into canonical queries against an external encounter
//! store, keeps the rendered list and pagination window consistent with the
//! latest result under rapid input changes, and carries selection state
//! across re-fetches.
//!
//! State management follows the Actor+Relay architecture: events enter
//! through relays, exactly one actor loop owns each piece of state, and the
//! rendering layer reads everything through signals.

pub mod dataflow;
pub mod encounter_history;
pub mod pagination;
pub mod platform;
pub mod restart_notice;
pub mod search_query;
pub mod selection;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use encounter_history::{EncounterHistory, FetchPhase};
pub use restart_notice::RestartNotice;
pub use selection::EncounterSelection;
