//! Backend seam for the encounter history browser
//!
//! The encounter store itself (capture, parsing, persistence, query
//! execution) lives outside this crate; everything here talks to it through
//! the [`EncounterStore`] trait. Deployment glue (IPC, HTTP, in-process
//! database handle) implements the trait on its side of the boundary.

use shared::{EncounterQuery, EncountersOverview};
use std::future::Future;
use thiserror::Error;

/// Failure surfaced by the encounter store.
///
/// The controller never retries on its own; it keeps the previous view
/// model, returns to idle, and lets the next input change retry naturally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The transport to the store broke (connection, IPC channel, ...).
    #[error("encounter store transport failed: {0}")]
    Transport(String),

    /// The store itself rejected or failed the query.
    #[error("encounter store query failed: {0}")]
    Query(String),
}

/// Asynchronous, read-only access to the recorded encounter history.
///
/// Contract the controller upholds before every call: `query.page >= 1`,
/// `query.page_size` is the fixed positive page size, and `query.search`
/// has already been truncated to
/// [`MAX_SEARCH_LEN`](crate::search_query::MAX_SEARCH_LEN) chars.
/// The store is the ordering authority for the returned page.
pub trait EncounterStore: Send + Sync + 'static {
    /// Execute one canonical query and return the matching page plus the
    /// total number of encounters matching the filter.
    fn load_encounters_preview(
        &self,
        query: EncounterQuery,
    ) -> impl Future<Output = Result<EncountersOverview, StoreError>> + Send;
}
