//! Infinite-scroll listing state
//!
//! [`ListingLoop`] decides which page of the available-pets listing to request
//! next and accumulates the pages that come back. It performs no I/O: every
//! operation that needs a fetch returns a [`PageRequest`], and the caller
//! reports the outcome through [`ListingLoop::complete`].
//!
//! Pages accumulate per filter key. Changing the search text or the category
//! drops everything accumulated so far, bumps the filter generation and
//! restarts from page 0. A response that arrives for an older generation is
//! discarded rather than merged.

use crate::domain::{FilterKey, Pet, PetCategory, PetPage};
use crate::error::FetchError;
use tracing::{debug, info, warn};

/// Page size of the first request, sized to fill the viewport
pub const INITIAL_PAGE_SIZE: u32 = 10;

/// Page size once the user has scrolled to the sentinel at least once
pub const CONTINUATION_PAGE_SIZE: u32 = 4;

/// Page sizes used for initial and continuation requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizing {
    pub initial: u32,
    pub continuation: u32,
}

impl Default for PageSizing {
    fn default() -> Self {
        Self {
            initial: INITIAL_PAGE_SIZE,
            continuation: CONTINUATION_PAGE_SIZE,
        }
    }
}

/// Identifies one issued fetch so its completion can be matched (or rejected)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    page: u32,
}

impl FetchTicket {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A page fetch the caller must perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub ticket: FetchTicket,
    pub search: String,
    pub category: Option<PetCategory>,
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Value of the `category` query parameter
    pub fn category_param(&self) -> &'static str {
        self.category.map(|c| c.as_str()).unwrap_or("")
    }
}

/// What the rendering layer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingPhase {
    /// Nothing accumulated yet for the current filter key
    LoadingInitial,
    /// Pages accumulated, more available
    Loaded,
    /// A continuation fetch is in flight
    LoadingNext,
    /// The server declared no further page for the current filter key
    Exhausted,
}

/// Result of feeding a finished fetch back into the loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Appended {
        page: u32,
        items: usize,
        next_page: Option<u32>,
    },
    Failed(FetchError),
    /// The response belongs to a filter key that is no longer current
    Stale,
}

/// Borrowed snapshot of everything a renderer needs
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView<'a> {
    pub phase: ListingPhase,
    pub pets: Vec<&'a Pet>,
    /// Number of placeholder cards to draw (non-zero only while loading initially)
    pub skeletons: usize,
    pub loading_more: bool,
    pub end_of_results: bool,
    pub error: Option<&'a FetchError>,
}

#[derive(Debug, Clone)]
pub struct ListingLoop {
    sizing: PageSizing,
    filter: FilterKey,
    generation: u64,
    pages: Vec<PetPage>,
    next_page: Option<u32>,
    in_flight: Option<FetchTicket>,
    has_continued: bool,
    last_error: Option<FetchError>,
}

impl Default for ListingLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingLoop {
    pub fn new() -> Self {
        Self::with_sizing(PageSizing::default())
    }

    pub fn with_sizing(sizing: PageSizing) -> Self {
        Self {
            sizing,
            filter: FilterKey::default(),
            generation: 0,
            pages: Vec::new(),
            next_page: Some(0),
            in_flight: None,
            has_continued: false,
            last_error: None,
        }
    }

    pub fn filter(&self) -> &FilterKey {
        &self.filter
    }

    pub fn sizing(&self) -> PageSizing {
        self.sizing
    }

    /// Update the search text. Returns the fresh page-0 request when the key changed.
    pub fn set_search(&mut self, search: impl Into<String>) -> Option<PageRequest> {
        let filter = FilterKey::new(search, self.filter.category);
        self.set_filter(filter)
    }

    /// Update the category filter (`None` = all categories)
    pub fn set_category(&mut self, category: Option<PetCategory>) -> Option<PageRequest> {
        let filter = FilterKey::new(self.filter.search.clone(), category);
        self.set_filter(filter)
    }

    /// Replace the whole filter key at once
    pub fn set_filter(&mut self, filter: FilterKey) -> Option<PageRequest> {
        if filter == self.filter {
            return None;
        }

        info!(
            search = %filter.search,
            category = filter.category_param(),
            "Filter changed, restarting listing from page 0"
        );

        self.filter = filter;
        self.generation += 1;
        self.pages.clear();
        self.next_page = Some(0);
        self.in_flight = None;
        self.last_error = None;

        self.load_initial()
    }

    /// Issue the page-0 request if nothing is accumulated or in flight
    pub fn load_initial(&mut self) -> Option<PageRequest> {
        if !self.pages.is_empty() || self.in_flight.is_some() {
            return None;
        }
        Some(self.issue(0))
    }

    /// The sentinel scrolled into view.
    ///
    /// Issues the continuation request when a next page exists and no fetch is
    /// in flight. If the initial load failed, this retries page 0 instead.
    pub fn sentinel_visible(&mut self) -> Option<PageRequest> {
        if let Some(ticket) = self.in_flight {
            debug!(page = ticket.page, "Fetch already in flight, ignoring sentinel");
            return None;
        }

        if self.pages.is_empty() {
            return self.load_initial();
        }

        let page = self.next_page?;
        self.has_continued = true;
        Some(self.issue(page))
    }

    fn issue(&mut self, page: u32) -> PageRequest {
        let limit = self.page_size();
        let ticket = FetchTicket {
            generation: self.generation,
            page,
        };

        self.in_flight = Some(ticket);
        self.last_error = None;

        debug!(page, limit, generation = self.generation, "Issuing page request");

        PageRequest {
            ticket,
            search: self.filter.search.clone(),
            category: self.filter.category,
            page,
            limit,
        }
    }

    /// Apply the outcome of a fetch previously returned by this loop
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<PetPage, FetchError>,
    ) -> Completion {
        if ticket.generation != self.generation || self.in_flight != Some(ticket) {
            warn!(
                page = ticket.page,
                generation = ticket.generation,
                current_generation = self.generation,
                "Discarding stale page response"
            );
            return Completion::Stale;
        }

        self.in_flight = None;

        match result {
            Err(error) => {
                warn!(page = ticket.page, %error, "Page fetch failed");
                self.last_error = Some(error.clone());
                Completion::Failed(error)
            }
            Ok(mut page) => {
                let next_page = match page.next_page {
                    Some(next) if next <= ticket.page => {
                        warn!(
                            page = ticket.page,
                            next_page = next,
                            "Server cursor did not advance, treating listing as exhausted"
                        );
                        None
                    }
                    other => other,
                };
                page.next_page = next_page;

                let items = page.pets.len();
                self.next_page = next_page;
                self.pages.push(page);

                debug!(page = ticket.page, items, ?next_page, "Page appended");

                Completion::Appended {
                    page: ticket.page,
                    items,
                    next_page,
                }
            }
        }
    }

    /// Release the in-flight guard for a fetch that will never complete.
    ///
    /// Returns `false` when the ticket is no longer the current in-flight one,
    /// in which case nothing changes.
    pub fn abandon(&mut self, ticket: FetchTicket) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }
        debug!(page = ticket.page, generation = ticket.generation, "Page fetch abandoned");
        self.in_flight = None;
        true
    }

    /// Limit the next request will carry
    pub fn page_size(&self) -> u32 {
        if self.has_continued {
            self.sizing.continuation
        } else {
            self.sizing.initial
        }
    }

    pub fn has_next_page(&self) -> bool {
        !self.pages.is_empty() && self.next_page.is_some()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn pages(&self) -> &[PetPage] {
        &self.pages
    }

    /// Accumulated pets in arrival order
    pub fn pets(&self) -> impl Iterator<Item = &Pet> {
        self.pages.iter().flat_map(|page| page.pets.iter())
    }

    pub fn len(&self) -> usize {
        self.pages.iter().map(|page| page.pets.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn phase(&self) -> ListingPhase {
        if self.pages.is_empty() {
            ListingPhase::LoadingInitial
        } else if self.in_flight.is_some() {
            ListingPhase::LoadingNext
        } else if self.next_page.is_none() {
            ListingPhase::Exhausted
        } else {
            ListingPhase::Loaded
        }
    }

    pub fn view(&self) -> ListingView<'_> {
        let phase = self.phase();
        ListingView {
            phase,
            pets: self.pets().collect(),
            skeletons: if phase == ListingPhase::LoadingInitial {
                self.sizing.initial as usize
            } else {
                0
            },
            loading_more: phase == ListingPhase::LoadingNext,
            end_of_results: phase == ListingPhase::Exhausted,
            error: self.last_error.as_ref(),
        }
    }
}
