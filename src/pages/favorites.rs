use crate::classifieds::Classified;
use crate::error::Result;
use crate::events::PlatformEvent;
use crate::favorites::FavoritesClient;
use crate::feed::{ListingFeed, LoadOutcome};
use crate::pages::{FavoritesSource, ListingTab};
use crate::settings::{relabel_currency, Settings};
use crate::types::ClassifiedId;

/// The signed-in user's saved listings
pub struct FavoritesPage {
    feed: ListingFeed<FavoritesSource>,
    favorites: FavoritesClient,
    tab: ListingTab,
    notice: Option<String>,
}

impl FavoritesPage {
    pub fn new(source: FavoritesSource, page_size: u32) -> Self {
        let favorites = source.favorites.clone();
        Self {
            feed: ListingFeed::new(source, page_size),
            favorites,
            tab: ListingTab::All,
            notice: None,
        }
    }

    pub fn tab(&self) -> ListingTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: ListingTab) {
        self.tab = tab;
    }

    /// Loaded favorites under the selected tab
    pub fn visible(&self) -> Vec<&Classified> {
        let tab = self.tab;
        self.feed.state().filtered(|item| tab.matches(item))
    }

    pub fn feed(&self) -> &ListingFeed<FavoritesSource> {
        &self.feed
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref().or_else(|| self.feed.error())
    }

    pub async fn load(&mut self) -> LoadOutcome {
        self.feed.load().await
    }

    pub async fn on_identity_changed(&mut self) -> LoadOutcome {
        self.feed.on_identity_changed().await
    }

    pub fn on_settings_changed(&mut self, settings: &Settings) {
        relabel_currency(self.feed.state_mut().items_mut(), settings.currency);
    }

    pub async fn handle(&mut self, event: &PlatformEvent) -> Option<LoadOutcome> {
        match event {
            PlatformEvent::SentinelVisible => self.feed.on_sentinel_visible().await,
            PlatformEvent::PopState => Some(self.feed.on_history_navigation().await),
            _ => None,
        }
    }

    /// Unfavorite a listing. It leaves the page once the server agrees.
    pub async fn remove(&mut self, id: ClassifiedId) -> Result<()> {
        match self.favorites.toggle(id).await {
            Ok(false) => {
                self.notice = None;
                self.feed.state_mut().remove(&id);
                Ok(())
            }
            Ok(true) => {
                self.notice = None;
                self.feed.state_mut().update(&id, |item| item.is_favorite = true);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to remove favorite {}: {}", id, e);
                self.notice = Some(e.user_message());
                Err(e)
            }
        }
    }
}
