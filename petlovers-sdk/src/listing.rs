//! Async driver for the infinite-scroll listing
//!
//! [`PetListing`] owns a [`ListingLoop`] and a [`PageFetcher`]. Each trigger
//! (initial load, filter change, sentinel visibility) asks the loop for a
//! request, performs it, and feeds the outcome back. The loop is locked only
//! around those two steps, never across the fetch itself, so overlapping
//! triggers see the in-flight guard and a filter change made mid-fetch turns
//! the older response stale.

use petlovers_core::domain::{FilterKey, Pet, PetCategory};
use petlovers_core::error::FetchError;
use petlovers_core::listing::{
    Completion, FetchTicket, ListingLoop, ListingPhase, PageRequest, PageSizing,
};
use petlovers_core::traits::PageFetcher;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Owned copy of the listing's render state
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSnapshot {
    pub phase: ListingPhase,
    pub pets: Vec<Pet>,
    pub skeletons: usize,
    pub loading_more: bool,
    pub end_of_results: bool,
    pub error: Option<FetchError>,
}

#[derive(Debug)]
pub struct PetListing<F> {
    fetcher: F,
    state: Mutex<ListingLoop>,
}

impl<F: PageFetcher> PetListing<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_sizing(fetcher, PageSizing::default())
    }

    pub fn with_sizing(fetcher: F, sizing: PageSizing) -> Self {
        Self {
            fetcher,
            state: Mutex::new(ListingLoop::with_sizing(sizing)),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch page 0 for the current filter if nothing has been loaded yet.
    ///
    /// Returns `None` when no request was needed.
    pub async fn load_initial(&self) -> Option<Completion> {
        let request = self.lock().load_initial();
        self.run(request).await
    }

    pub async fn set_search(&self, search: impl Into<String>) -> Option<Completion> {
        let request = self.lock().set_search(search);
        self.run(request).await
    }

    pub async fn set_category(&self, category: Option<PetCategory>) -> Option<Completion> {
        let request = self.lock().set_category(category);
        self.run(request).await
    }

    pub async fn set_filter(&self, filter: FilterKey) -> Option<Completion> {
        let request = self.lock().set_filter(filter);
        self.run(request).await
    }

    /// The sentinel became visible; fetch the next page if one is due
    pub async fn sentinel_visible(&self) -> Option<Completion> {
        let request = self.lock().sentinel_visible();
        self.run(request).await
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        let state = self.lock();
        let view = state.view();
        ListingSnapshot {
            phase: view.phase,
            pets: view.pets.into_iter().cloned().collect(),
            skeletons: view.skeletons,
            loading_more: view.loading_more,
            end_of_results: view.end_of_results,
            error: view.error.cloned(),
        }
    }

    /// Run a closure against the current state without cloning it
    pub fn inspect<R>(&self, f: impl FnOnce(&ListingLoop) -> R) -> R {
        f(&*self.lock())
    }

    async fn run(&self, request: Option<PageRequest>) -> Option<Completion> {
        let request = request?;
        debug!(page = request.page, limit = request.limit, "Fetching listing page");

        let mut pending = PendingFetch {
            state: &self.state,
            ticket: Some(request.ticket),
        };
        let result = self.fetcher.fetch_page(&request).await;
        pending.ticket = None;

        let completion = self.lock().complete(request.ticket, result);
        Some(completion)
    }

    fn lock(&self) -> MutexGuard<'_, ListingLoop> {
        lock_state(&self.state)
    }
}

/// Releases the in-flight guard if the fetch future is dropped before it
/// resolves (timeout, `select!`, cancelled task)
struct PendingFetch<'a> {
    state: &'a Mutex<ListingLoop>,
    ticket: Option<FetchTicket>,
}

impl Drop for PendingFetch<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            lock_state(self.state).abandon(ticket);
        }
    }
}

fn lock_state(state: &Mutex<ListingLoop>) -> MutexGuard<'_, ListingLoop> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
