//! View-model derivations for the encounter history page
//!
//! Pure mappings from domain state to the shapes the rendering layer binds
//! to. Rows come out in fetch-result order; the store is the ordering
//! authority and nothing here re-sorts.

use crate::pagination;
use chrono::{Local, TimeZone};
use shared::{EncounterPreview, EncountersOverview};

/// One participant cell: name plus the class icon the row renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantView {
    pub name: String,
    pub class_id: i32,
    pub class_name: &'static str,
    pub icon_path: String,
}

/// One rendered history row.
#[derive(Debug, Clone, PartialEq)]
pub struct EncounterRow {
    pub id: i64,
    pub boss: String,
    pub fought_at: String,
    pub duration: String,
    pub cleared: bool,
    pub favorite: bool,
    pub participants: Vec<ParticipantView>,
}

/// Which of the two empty states the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyEncounters {
    /// A search (or filter) is active and nothing matches.
    NoMatches,
    /// The store has never recorded anything.
    NothingRecorded,
}

impl EmptyEncounters {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyEncounters::NoMatches => "No encounters found.",
            EmptyEncounters::NothingRecorded => "No encounters recorded.",
        }
    }

    /// Extra hint rendered under the message, when there is one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            EmptyEncounters::NoMatches => None,
            EmptyEncounters::NothingRecorded => {
                Some("Start the meter before entering combat to record encounters.")
            }
        }
    }
}

/// Derive row view models from the latest overview, in fetch-result order.
pub fn encounter_rows(overview: &EncountersOverview) -> Vec<EncounterRow> {
    overview.encounters.iter().map(encounter_row).collect()
}

fn encounter_row(preview: &EncounterPreview) -> EncounterRow {
    let participants = preview
        .names
        .iter()
        .zip(preview.classes.iter())
        .map(|(name, &class_id)| ParticipantView {
            name: name.clone(),
            class_id,
            class_name: shared::class_name(class_id),
            icon_path: shared::class_icon_path(class_id),
        })
        .collect();

    EncounterRow {
        id: preview.id,
        boss: preview.current_boss.clone(),
        fought_at: format_fight_start(preview.fight_start),
        duration: format_duration(preview.duration),
        cleared: preview.cleared,
        favorite: preview.favorite,
        participants,
    }
}

/// Local-time fight start, e.g. `"Mar  4, 21:40"`.
pub fn format_fight_start(epoch_ms: i64) -> String {
    match Local.timestamp_millis_opt(epoch_ms).single() {
        Some(time) => time.format("%b %e, %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Fight length as `m:ss`.
pub fn format_duration(ms: i64) -> String {
    let secs = ms.max(0) / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Pagination summary, e.g. `"21-25 of 25"`.
///
/// With nothing to show the whole range collapses to `"1 of 1"`; the pager
/// never displays a zero denominator.
pub fn pagination_summary(page: u32, page_size: u32, total: u64) -> String {
    if total == 0 {
        return "1 of 1".to_string();
    }
    let (first, last) = pagination::row_range(page, page_size, total);
    format!("{first}-{last} of {total}")
}

/// Decide which empty state to render, if any.
///
/// A page that is empty while the total is non-zero is a transient
/// out-of-range page (the controller is already clamping and re-fetching),
/// so it renders no empty state at all.
pub fn empty_state(search: &str, overview: &EncountersOverview) -> Option<EmptyEncounters> {
    if !overview.encounters.is_empty() || overview.total_encounters > 0 {
        return None;
    }
    if search.is_empty() {
        Some(EmptyEncounters::NothingRecorded)
    } else {
        Some(EmptyEncounters::NoMatches)
    }
}
