//! Test support: a programmable in-memory encounter store
//!
//! `MockStore` answers queries from a fixed dataset the way the real store
//! would (filter, search, paginate), records every query it receives, and
//! can delay or fail specific requests so tests can stage out-of-order
//! completions and transport faults.

use crate::platform::{EncounterStore, StoreError};
use shared::{EncounterPreview, EncounterQuery, EncountersOverview};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

pub struct MockStore {
    dataset: Vec<EncounterPreview>,
    calls: Mutex<Vec<EncounterQuery>>,
    // Artificial latency keyed by boss filter; deterministic regardless of
    // task scheduling order, unlike a pop-per-call queue.
    boss_delays: Mutex<HashMap<String, Duration>>,
    failures: Mutex<VecDeque<StoreError>>,
}

impl MockStore {
    pub fn with_dataset(dataset: Vec<EncounterPreview>) -> Self {
        Self {
            dataset,
            calls: Mutex::new(Vec::new()),
            boss_delays: Mutex::new(HashMap::new()),
            failures: Mutex::new(VecDeque::new()),
        }
    }

    /// `count` encounters with ids `1..=count`, bosses cycling through a
    /// fixed rotation, durations comfortably above the default minimum.
    pub fn encounters(count: usize) -> Vec<EncounterPreview> {
        const BOSSES: [&str; 3] = ["Valtan", "Vykas", "Brelshaza"];
        (1..=count)
            .map(|n| EncounterPreview {
                id: n as i64,
                fight_start: 1_700_000_000_000 + n as i64 * 60_000,
                current_boss: BOSSES[(n - 1) % BOSSES.len()].to_string(),
                duration: 60_000 + n as i64 * 1_000,
                names: vec!["Aria".to_string(), "Dorn".to_string()],
                classes: vec![204, 102],
                cleared: n % 2 == 0,
                favorite: n % 5 == 0,
            })
            .collect()
    }

    /// Delay any query whose boss filter contains `boss`.
    pub fn delay_boss(&self, boss: &str, delay: Duration) {
        self.boss_delays
            .lock()
            .unwrap()
            .insert(boss.to_string(), delay);
    }

    /// Fail the next query (FIFO when queued multiple times).
    pub fn push_failure(&self, error: StoreError) {
        self.failures.lock().unwrap().push_back(error);
    }

    /// Every query received so far, in call order.
    pub fn calls(&self) -> Vec<EncounterQuery> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, query: &EncounterQuery) -> EncountersOverview {
        let needle = query.search.to_lowercase();
        let matches: Vec<EncounterPreview> = self
            .dataset
            .iter()
            .filter(|preview| {
                preview.duration >= query.filter.min_duration
                    && (query.filter.bosses.is_empty()
                        || query.filter.bosses.contains(&preview.current_boss))
                    && (query.filter.classes.is_empty()
                        || preview.classes.iter().any(|class| query.filter.classes.contains(class)))
                    && (!query.filter.cleared_only || preview.cleared)
                    && (!query.filter.favorites_only || preview.favorite)
                    && (needle.is_empty()
                        || preview.current_boss.to_lowercase().contains(&needle)
                        || preview.names.iter().any(|name| name.to_lowercase().contains(&needle)))
            })
            .cloned()
            .collect();

        let total = matches.len() as u64;
        let skip = (query.page as usize - 1) * query.page_size as usize;
        let encounters = matches
            .into_iter()
            .skip(skip)
            .take(query.page_size as usize)
            .collect();

        EncountersOverview {
            encounters,
            total_encounters: total,
        }
    }
}

impl EncounterStore for MockStore {
    fn load_encounters_preview(
        &self,
        query: EncounterQuery,
    ) -> impl Future<Output = Result<EncountersOverview, StoreError>> + Send {
        let delay = query
            .filter
            .bosses
            .iter()
            .find_map(|boss| self.boss_delays.lock().unwrap().get(boss).copied());
        let failure = self.failures.lock().unwrap().pop_front();
        let overview = self.respond(&query);
        self.calls.lock().unwrap().push(query);

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            match failure {
                Some(error) => Err(error),
                None => Ok(overview),
            }
        }
    }
}
