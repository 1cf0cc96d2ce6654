//! Infinite-scroll driver shared by the listing pages.
//!
//! A [`ListingFeed`] pairs a [`PageSource`] with the [`Paginated`] state from
//! `classifieds_ui_state`. It turns fetch results into state transitions:
//! a 404 ends the stream, any other error leaves the loaded items alone and
//! records a short message for display.

use async_trait::async_trait;
use classifieds_ui_state::{Identified, PageRequest, Paginated};

use crate::error::Result;
use crate::types::Page;

/// Fetches one page of a listing
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Identified + Send;

    async fn fetch(&self, page: PageRequest) -> Result<Page<Self::Item>>;
}

/// What a load attempt did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Page merged; the number of items that were new
    Loaded(usize),
    /// The server has nothing more
    Exhausted,
    /// A fetch is already in flight
    Busy,
    /// The fetch failed; the message is suitable for display
    Failed(String),
}

pub struct ListingFeed<S: PageSource> {
    source: S,
    state: Paginated<S::Item>,
    error: Option<String>,
}

impl<S: PageSource> ListingFeed<S> {
    pub fn new(source: S, page_size: u32) -> Self {
        Self {
            source,
            state: Paginated::new(page_size),
            error: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn items(&self) -> &[S::Item] {
        self.state.items()
    }

    pub fn state(&self) -> &Paginated<S::Item> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut Paginated<S::Item> {
        &mut self.state
    }

    /// Message from the last failed load
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.cursor().is_loading()
    }

    pub fn has_more(&self) -> bool {
        self.state.cursor().has_more()
    }

    /// Fetches the page the cursor points at and merges it
    pub async fn load(&mut self) -> LoadOutcome {
        let request = match self.state.begin_load() {
            Some(request) => request,
            None => return LoadOutcome::Busy,
        };

        match self.source.fetch(request).await {
            Ok(page) => {
                self.error = None;
                let added = self.state.complete(page.results, page.has_more);
                log::debug!(
                    "Loaded page {} ({} new, has_more={})",
                    request.page,
                    added,
                    page.has_more
                );
                LoadOutcome::Loaded(added)
            }
            Err(e) if e.is_not_found() => {
                log::warn!("Page {} not found, treating as end of results", request.page);
                self.error = None;
                self.state.exhaust();
                LoadOutcome::Exhausted
            }
            Err(e) => {
                log::error!("Failed to load page {}: {}", request.page, e);
                self.state.fail();
                let message = e.user_message();
                self.error = Some(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }

    /// Called when the sentinel becomes visible. After a failed load the same
    /// page is tried again instead of skipping ahead.
    ///
    /// Returns `None` when nothing was fetched.
    pub async fn on_sentinel_visible(&mut self) -> Option<LoadOutcome> {
        if self.is_loading() {
            return None;
        }
        if self.error.is_some() {
            return Some(self.load().await);
        }
        if self.state.on_sentinel_visible() {
            return Some(self.load().await);
        }
        None
    }

    /// Drops everything and starts over from page one
    pub async fn reload(&mut self) -> LoadOutcome {
        self.state.reset();
        self.error = None;
        self.load().await
    }

    /// Back/forward navigation to the page always refetches
    pub async fn on_history_navigation(&mut self) -> LoadOutcome {
        self.reload().await
    }

    /// Another user signed in, or the user signed out
    pub async fn on_identity_changed(&mut self) -> LoadOutcome {
        self.reload().await
    }
}
