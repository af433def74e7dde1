use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

// ===== ENCOUNTER TYPES =====

/// One row of the encounter history list, as returned by the encounter store.
///
/// `names` and `classes` are parallel sequences: `classes[i]` is the class id
/// of the participant shown as `names[i]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EncounterPreview {
    pub id: i64,
    /// Fight start, epoch milliseconds.
    pub fight_start: i64,
    pub current_boss: String,
    /// Fight length, milliseconds.
    pub duration: i64,
    pub names: Vec<String>,
    pub classes: Vec<i32>,
    #[serde(default)]
    pub cleared: bool,
    #[serde(default)]
    pub favorite: bool,
}

/// One page of encounter previews plus the total match count for the
/// current filter. `total_encounters` counts everything matching the query,
/// not just this page; an out-of-range page yields an empty `encounters`
/// with a non-zero total.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EncountersOverview {
    pub encounters: Vec<EncounterPreview>,
    pub total_encounters: u64,
}

// ===== QUERY TYPES =====

/// `min_duration` value meaning "use the default from settings".
pub const MIN_DURATION_DEFAULT_SENTINEL: i64 = -1;

/// Structured filter over the encounter history. All fields are conjunctive.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchFilter {
    /// Minimum fight duration in milliseconds, or
    /// [`MIN_DURATION_DEFAULT_SENTINEL`] to defer to settings.
    pub min_duration: i64,
    pub bosses: IndexSet<String>,
    pub classes: IndexSet<i32>,
    pub cleared_only: bool,
    pub favorites_only: bool,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            min_duration: MIN_DURATION_DEFAULT_SENTINEL,
            bosses: IndexSet::new(),
            classes: IndexSet::new(),
            cleared_only: false,
            favorites_only: false,
        }
    }
}

impl SearchFilter {
    /// Resolve the minimum duration this filter actually asks for.
    pub fn effective_min_duration(&self, default_min_duration: i64) -> i64 {
        if self.min_duration == MIN_DURATION_DEFAULT_SENTINEL {
            default_min_duration
        } else {
            self.min_duration
        }
    }
}

/// The canonical request sent to the encounter store. A pure function of the
/// UI inputs at assembly time; it never aliases live filter state.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EncounterQuery {
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub filter: SearchFilter,
}

// ===== SETTINGS =====

/// Read-only application settings consumed by the history browser.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Fallback minimum encounter duration (milliseconds) applied when the
    /// filter carries the sentinel value.
    pub default_min_duration: i64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_min_duration: 30_000,
        }
    }
}

// ===== CLASS LOOKUPS =====

/// Display name for a class id. Unknown ids map to "Unknown".
pub fn class_name(class_id: i32) -> &'static str {
    match class_id {
        102 => "Berserker",
        103 => "Destroyer",
        104 => "Gunlancer",
        105 => "Paladin",
        112 => "Slayer",
        202 => "Arcanist",
        203 => "Summoner",
        204 => "Bard",
        205 => "Sorceress",
        302 => "Wardancer",
        303 => "Scrapper",
        304 => "Soulfist",
        305 => "Glaivier",
        312 => "Striker",
        313 => "Breaker",
        402 => "Deathblade",
        403 => "Shadowhunter",
        404 => "Reaper",
        405 => "Souleater",
        502 => "Sharpshooter",
        503 => "Deadeye",
        504 => "Artillerist",
        505 => "Machinist",
        512 => "Gunslinger",
        602 => "Artist",
        603 => "Aeromancer",
        604 => "Wildsoul",
        _ => "Unknown",
    }
}

/// Icon asset path for a class id. Purely indexed access; whether the asset
/// exists is the asset pipeline's concern, not ours.
pub fn class_icon_path(class_id: i32) -> String {
    format!("classes/{class_id}.png")
}
