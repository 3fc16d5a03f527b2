//! Deferred population shared by the resource types.
//!
//! Divisions, bills and members are built as stubs carrying the cheap fields
//! from a listing payload; everything else lives behind a [`Deferred`] cell
//! that is filled by exactly one detail fetch on first access.

use once_cell::unsync::OnceCell;

use crate::error::{Error, Result};

/// Fetch-once cell backing a resource's deferred fields.
///
/// State machine: the cell starts empty ("unfetched") and is filled at most
/// once by a successful detail fetch, which populates the whole payload
/// atomically. A failed fetch leaves the cell empty, so the next access
/// retries; after a success, every access is served from the cell with no
/// further requests. Callers that find an attribute still absent in a filled
/// cell must fail with [`Error::MissingAttribute`] rather than fetch again.
#[derive(Debug, Clone)]
pub(crate) struct Deferred<T> {
    cell: OnceCell<T>,
}

impl<T> Deferred<T> {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Whether the one-shot fetch has already completed.
    pub fn is_fetched(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Return the payload, running `fetch` first if the cell is still empty.
    pub fn get_or_fetch<F>(&self, fetch: F) -> Result<&T>
    where
        F: FnOnce() -> Result<T>,
    {
        self.cell.get_or_try_init(fetch)
    }
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the numeric identifier from the trailing path segment of a
/// linked-data resource URL, e.g.
/// `http://data.parliament.uk/resources/709842` → `709842`.
pub(crate) fn id_from_resource_url(url: &str) -> Result<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
        .ok_or_else(|| Error::MalformedReference(url.to_string()))
}
