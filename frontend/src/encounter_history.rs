//! EncounterHistory domain using Actor+Relay architecture
//!
//! The reactive query controller behind the encounter history page: every
//! user input (search keystrokes, filter edits, page navigation) flows in
//! through relays, one coordination loop turns them into canonical queries
//! against the [`EncounterStore`], and the resulting view model is exposed
//! through signals.
//!
//! Overlapping fetches are resolved by issue order, not arrival order: each
//! fetch carries a monotonically increasing sequence number and a response
//! is applied only if its number is still the latest issued. There is no
//! transport-level cancellation; discarding stale responses is the
//! cancellation substitute.

use crate::dataflow::{Actor, Relay, relay};
use crate::pagination::{self, PAGE_SIZE};
use crate::platform::{EncounterStore, StoreError};
use crate::search_query;
use crate::views;
use futures::{FutureExt, StreamExt, pin_mut, select};
use futures_signals::map_ref;
use futures_signals::signal::Signal;
use log::{debug, warn};
use shared::{AppSettings, EncountersOverview, SearchFilter};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Quiet period after the last search keystroke before a fetch is issued.
pub const SEARCH_DEBOUNCE_MS: u64 = 150;

/// Fetch lifecycle of the controller. `Fetching` covers every in-flight
/// request; a hung transport simply stays in `Fetching` (timeouts are the
/// transport's concern, not ours).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Fetching,
}

/// Internal completion event delivered by spawned fetch tasks.
#[derive(Debug, Clone)]
struct FetchSettled {
    seq: u64,
    result: Result<EncountersOverview, StoreError>,
}

/// Issues sequence-numbered fetches against the store.
struct FetchDispatcher<S> {
    store: Arc<S>,
    default_min_duration: i64,
    seq: Arc<AtomicU64>,
    fetch_settled_relay: Relay<FetchSettled>,
    phase_updated_relay: Relay<FetchPhase>,
}

impl<S: EncounterStore> FetchDispatcher<S> {
    /// Assemble the canonical query for the given inputs and start one
    /// asynchronous fetch tagged with a fresh sequence number.
    fn issue(&self, search: &str, filter: &SearchFilter, page: u32) -> u64 {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let query =
            search_query::assemble(search, filter, page, PAGE_SIZE, self.default_min_duration);
        debug!("issuing encounter fetch seq {seq} (page {page})");
        self.phase_updated_relay.send(FetchPhase::Fetching);

        let store = Arc::clone(&self.store);
        let settled = self.fetch_settled_relay.clone();
        tokio::spawn(async move {
            let result = store.load_encounters_preview(query).await;
            settled.send(FetchSettled { seq, result });
        });
        seq
    }
}

/// Encounter history browser domain.
///
/// Owns the current [`EncountersOverview`] view model plus the pagination,
/// fetch-phase, and scroll state derived from it. All mutation goes through
/// the public relays; all reads go through signals.
#[derive(Clone)]
pub struct EncounterHistory {
    overview: Actor<EncountersOverview>,
    page: Actor<u32>,
    phase: Actor<FetchPhase>,
    applied_search: Actor<String>,
    scroll_target: Actor<Option<i64>>,

    /// User edited the search box (raw keystrokes, debounced internally).
    pub search_typed_relay: Relay<String>,
    /// Caller is restoring a previously scrolled search result page; the
    /// next empty-to-non-empty search transition keeps its page. One-shot.
    pub back_navigation_relay: Relay<()>,
    /// User replaced the structured filter.
    pub filter_changed_relay: Relay<SearchFilter>,
    /// User clicked the first-page control.
    pub page_first_clicked_relay: Relay<()>,
    /// User clicked the previous-page control.
    pub page_previous_clicked_relay: Relay<()>,
    /// User clicked the next-page control.
    pub page_next_clicked_relay: Relay<()>,
    /// User clicked the last-page control.
    pub page_last_clicked_relay: Relay<()>,
    /// The recorder saved a new encounter; re-run the current query as-is.
    pub refresh_requested_relay: Relay<()>,
}

impl EncounterHistory {
    /// Create the domain and issue the initial first-page fetch.
    pub fn new<S: EncounterStore>(store: Arc<S>, settings: AppSettings) -> Self {
        let (search_typed_relay, search_typed_stream) = relay::<String>();
        let (back_navigation_relay, back_navigation_stream) = relay::<()>();
        let (filter_changed_relay, filter_changed_stream) = relay::<SearchFilter>();
        let (page_first_clicked_relay, page_first_clicked_stream) = relay::<()>();
        let (page_previous_clicked_relay, page_previous_clicked_stream) = relay::<()>();
        let (page_next_clicked_relay, page_next_clicked_stream) = relay::<()>();
        let (page_last_clicked_relay, page_last_clicked_stream) = relay::<()>();
        let (refresh_requested_relay, refresh_requested_stream) = relay::<()>();

        let (fetch_settled_relay, fetch_settled_stream) = relay::<FetchSettled>();
        let (page_updated_relay, page_updated_stream) = relay::<u32>();
        let (phase_updated_relay, phase_updated_stream) = relay::<FetchPhase>();
        let (applied_search_relay, applied_search_stream) = relay::<String>();
        let (scroll_updated_relay, scroll_updated_stream) = relay::<i64>();

        // Mirror actors keep derived state observable without giving anyone
        // but the coordination loop a way to write it.
        let page = Actor::new(1u32, async move |state| {
            let mut page_updated = page_updated_stream;
            while let Some(page) = page_updated.next().await {
                state.set_neq(page);
            }
        });
        let phase = Actor::new(FetchPhase::Fetching, async move |state| {
            let mut phase_updated = phase_updated_stream;
            while let Some(phase) = phase_updated.next().await {
                state.set_neq(phase);
            }
        });
        let applied_search = Actor::new(String::new(), async move |state| {
            let mut applied_search_updated = applied_search_stream;
            while let Some(search) = applied_search_updated.next().await {
                state.set_neq(search);
            }
        });
        let scroll_target = Actor::new(None, async move |state| {
            let mut scroll_updated = scroll_updated_stream;
            while let Some(row_id) = scroll_updated.next().await {
                state.set(Some(row_id));
            }
        });

        let dispatcher = FetchDispatcher {
            store,
            default_min_duration: settings.default_min_duration,
            seq: Arc::new(AtomicU64::new(0)),
            fetch_settled_relay,
            phase_updated_relay,
        };

        let overview = Actor::new(EncountersOverview::default(), {
            let page_updated_relay = page_updated_relay.clone();
            async move |state| {
                let mut search_typed = search_typed_stream;
                let mut back_navigation = back_navigation_stream;
                let mut filter_changed = filter_changed_stream;
                let mut page_first_clicked = page_first_clicked_stream;
                let mut page_previous_clicked = page_previous_clicked_stream;
                let mut page_next_clicked = page_next_clicked_stream;
                let mut page_last_clicked = page_last_clicked_stream;
                let mut refresh_requested = refresh_requested_stream;
                let mut fetch_settled = fetch_settled_stream;

                let mut search = String::new();
                let mut filter = SearchFilter::default();
                let mut page_num = 1u32;
                let mut total = 0u64;
                let mut suppress_reset = false;
                // Sequence number of the last navigation-triggered fetch;
                // only its arrival moves the scroll position.
                let mut nav_seq: Option<u64> = None;

                dispatcher.issue(&search, &filter, page_num);

                loop {
                    select! {
                        text = search_typed.next() => {
                            let Some(mut pending) = text else { break };
                            // Restart the quiet-period timer on every further
                            // keystroke; only the final value becomes a query.
                            loop {
                                let timer = tokio::time::sleep(
                                    Duration::from_millis(SEARCH_DEBOUNCE_MS),
                                ).fuse();
                                pin_mut!(timer);
                                select! {
                                    more = search_typed.next() => {
                                        match more {
                                            Some(next_text) => pending = next_text,
                                            None => break,
                                        }
                                    }
                                    _ = timer => break,
                                }
                            }
                            if pending == search {
                                continue;
                            }
                            // A back-navigation mark queued behind the
                            // keystroke must win the race with the reset.
                            while let Ok(Some(())) = back_navigation.try_next() {
                                suppress_reset = true;
                            }
                            let was_empty = search.is_empty();
                            search = pending;
                            applied_search_relay.send(search.clone());
                            if was_empty && !search.is_empty() {
                                if suppress_reset {
                                    suppress_reset = false;
                                } else if page_num != 1 {
                                    page_num = 1;
                                    page_updated_relay.send(page_num);
                                }
                            }
                            dispatcher.issue(&search, &filter, page_num);
                        }
                        mark = back_navigation.next() => {
                            if mark.is_some() {
                                suppress_reset = true;
                            } else {
                                break;
                            }
                        }
                        new_filter = filter_changed.next() => {
                            let Some(new_filter) = new_filter else { break };
                            filter = new_filter;
                            dispatcher.issue(&search, &filter, page_num);
                        }
                        clicked = page_first_clicked.next() => {
                            let Some(()) = clicked else { break };
                            if pagination::can_retreat(page_num) {
                                page_num = 1;
                                page_updated_relay.send(page_num);
                                nav_seq = Some(dispatcher.issue(&search, &filter, page_num));
                            }
                        }
                        clicked = page_previous_clicked.next() => {
                            let Some(()) = clicked else { break };
                            if pagination::can_retreat(page_num) {
                                page_num -= 1;
                                page_updated_relay.send(page_num);
                                nav_seq = Some(dispatcher.issue(&search, &filter, page_num));
                            }
                        }
                        clicked = page_next_clicked.next() => {
                            let Some(()) = clicked else { break };
                            if pagination::can_advance(page_num, PAGE_SIZE, total) {
                                page_num += 1;
                                page_updated_relay.send(page_num);
                                nav_seq = Some(dispatcher.issue(&search, &filter, page_num));
                            }
                        }
                        clicked = page_last_clicked.next() => {
                            let Some(()) = clicked else { break };
                            let last = pagination::total_pages(total, PAGE_SIZE);
                            if page_num != last {
                                page_num = last;
                                page_updated_relay.send(page_num);
                                nav_seq = Some(dispatcher.issue(&search, &filter, page_num));
                            }
                        }
                        requested = refresh_requested.next() => {
                            let Some(()) = requested else { break };
                            dispatcher.issue(&search, &filter, page_num);
                        }
                        settled = fetch_settled.next() => {
                            let Some(settled) = settled else { break };
                            if settled.seq != dispatcher.seq.load(Ordering::SeqCst) {
                                debug!(
                                    "discarding stale encounter fetch result (seq {})",
                                    settled.seq,
                                );
                                continue;
                            }
                            match settled.result {
                                Ok(overview) => {
                                    total = overview.total_encounters;
                                    if nav_seq.take() == Some(settled.seq) {
                                        if let Some(first_row) = overview.encounters.first() {
                                            scroll_updated_relay.send(first_row.id);
                                        }
                                    }
                                    state.set(overview);
                                    dispatcher.phase_updated_relay.send(FetchPhase::Idle);
                                    // A narrowed filter can strand the page
                                    // past the end; clamp and fetch again.
                                    let clamped =
                                        pagination::clamp_page(page_num, total, PAGE_SIZE);
                                    if clamped != page_num {
                                        page_num = clamped;
                                        page_updated_relay.send(page_num);
                                        dispatcher.issue(&search, &filter, page_num);
                                    }
                                }
                                Err(error) => {
                                    warn!("encounter fetch failed, keeping previous page: {error}");
                                    dispatcher.phase_updated_relay.send(FetchPhase::Idle);
                                }
                            }
                        }
                    }
                }
            }
        });

        Self {
            overview,
            page,
            phase,
            applied_search,
            scroll_target,
            search_typed_relay,
            back_navigation_relay,
            filter_changed_relay,
            page_first_clicked_relay,
            page_previous_clicked_relay,
            page_next_clicked_relay,
            page_last_clicked_relay,
            refresh_requested_relay,
        }
    }

    /// Latest successfully fetched page of encounters.
    pub fn overview_signal(&self) -> impl Signal<Item = EncountersOverview> + use<> {
        self.overview.signal()
    }

    /// Current 1-indexed page.
    pub fn page_signal(&self) -> impl Signal<Item = u32> + use<> {
        self.page.signal()
    }

    /// Idle/Fetching lifecycle of the controller.
    pub fn phase_signal(&self) -> impl Signal<Item = FetchPhase> + use<> {
        self.phase.signal()
    }

    /// Search text of the last issued query (post-debounce).
    pub fn applied_search_signal(&self) -> impl Signal<Item = String> + use<> {
        self.applied_search.signal()
    }

    /// Encounter id to scroll into view after the latest page navigation.
    pub fn scroll_target_signal(&self) -> impl Signal<Item = Option<i64>> + use<> {
        self.scroll_target.signal()
    }

    /// Rendered row view models, in fetch-result order.
    pub fn rows_signal(&self) -> impl Signal<Item = Vec<views::EncounterRow>> + use<> {
        self.overview.signal_ref(views::encounter_rows)
    }

    /// Human-readable pagination summary, e.g. `"21-25 of 25"`.
    pub fn summary_signal(&self) -> impl Signal<Item = String> + use<> {
        map_ref! {
            let page = self.page.signal(),
            let overview = self.overview.signal() =>
            views::pagination_summary(*page, PAGE_SIZE, overview.total_encounters)
        }
    }

    /// Which empty-state message to render, if any.
    pub fn empty_state_signal(&self) -> impl Signal<Item = Option<views::EmptyEncounters>> + use<> {
        map_ref! {
            let search = self.applied_search.signal(),
            let overview = self.overview.signal() =>
            views::empty_state(search.as_str(), overview)
        }
    }
}
