use classifieds_ui_state::{SliderState, Viewport};

use crate::classifieds::Classified;
use crate::error::Result;
use crate::events::PlatformEvent;
use crate::favorites::FavoritesClient;
use crate::feed::{ListingFeed, LoadOutcome};
use crate::pages::SearchSource;
use crate::settings::{relabel_currency, Settings};
use crate::types::ClassifiedId;

/// Number of listings in the featured slider at the top of the home page
pub const FEATURED_COUNT: usize = 8;

/// Search feed with favorites and the featured slider
pub struct HomePage {
    feed: ListingFeed<SearchSource>,
    favorites: FavoritesClient,
    viewport: Viewport,
    slider: SliderState,
    notice: Option<String>,
}

impl HomePage {
    pub fn new(source: SearchSource, favorites: FavoritesClient, page_size: u32, viewport: Viewport) -> Self {
        Self {
            feed: ListingFeed::new(source, page_size),
            favorites,
            slider: SliderState::new(0, viewport.breakpoint().columns()),
            viewport,
            notice: None,
        }
    }

    pub fn items(&self) -> &[Classified] {
        self.feed.items()
    }

    pub fn feed(&self) -> &ListingFeed<SearchSource> {
        &self.feed
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn slider(&self) -> &SliderState {
        &self.slider
    }

    /// Inline message from the last failed action
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref().or_else(|| self.feed.error())
    }

    /// Listings currently visible in the featured slider
    pub fn featured(&self) -> &[Classified] {
        let items = self.feed.items();
        let featured = &items[..items.len().min(FEATURED_COUNT)];
        let window = self.slider.window();
        let end = window.end.min(featured.len());
        &featured[window.start.min(end)..end]
    }

    pub fn slide_next(&mut self) {
        self.slider.next();
    }

    pub fn slide_prev(&mut self) {
        self.slider.prev();
    }

    pub async fn load(&mut self) -> LoadOutcome {
        let outcome = self.feed.load().await;
        self.sync_slider();
        outcome
    }

    /// New search criteria: start again from page one
    pub async fn on_search_changed(&mut self) -> LoadOutcome {
        let outcome = self.feed.reload().await;
        self.slider.go_to(0);
        self.sync_slider();
        outcome
    }

    /// Favorite flags depend on who is signed in
    pub async fn on_identity_changed(&mut self) -> LoadOutcome {
        let outcome = self.feed.on_identity_changed().await;
        self.sync_slider();
        outcome
    }

    pub fn on_settings_changed(&mut self, settings: &Settings) {
        relabel_currency(self.feed.state_mut().items_mut(), settings.currency);
    }

    pub async fn handle(&mut self, event: &PlatformEvent) -> Option<LoadOutcome> {
        let outcome = match event {
            PlatformEvent::Resize { width, height } => {
                if self.viewport.resize(*width, *height) {
                    self.slider.set_visible(self.viewport.breakpoint().columns());
                }
                None
            }
            PlatformEvent::SentinelVisible => self.feed.on_sentinel_visible().await,
            PlatformEvent::PopState => Some(self.feed.on_history_navigation().await),
            PlatformEvent::KeyDown(_) => None,
        };
        self.sync_slider();
        outcome
    }

    /// Toggle a favorite and apply the state the server reports
    pub async fn toggle_favorite(&mut self, id: ClassifiedId) -> Result<bool> {
        let is_favorite = match self.favorites.toggle(id).await {
            Ok(is_favorite) => is_favorite,
            Err(e) => {
                log::error!("Failed to toggle favorite {}: {}", id, e);
                self.notice = Some(e.user_message());
                return Err(e);
            }
        };

        self.notice = None;
        self.feed.state_mut().update(&id, |item| {
            if item.is_favorite != is_favorite {
                item.favorites_count = if is_favorite {
                    item.favorites_count + 1
                } else {
                    item.favorites_count.saturating_sub(1)
                };
            }
            item.is_favorite = is_favorite;
        });
        Ok(is_favorite)
    }

    fn sync_slider(&mut self) {
        self.slider.set_len(self.feed.items().len().min(FEATURED_COUNT));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{signed_in, transport};
    use crate::Classifieds;
    use classifieds_ui_state::Viewport;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_feed(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/classifieds/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    { "id": 1, "title": "Lamp", "price": 10.0, "currency": "USD", "favorites_count": 0 },
                    { "id": 2, "title": "Desk", "price": 40.0, "currency": "USD", "favorites_count": 4 }
                ],
                "has_more": false
            })))
            .mount(server)
            .await;
    }

    fn favorites_count(page: &HomePage, id: ClassifiedId) -> (bool, u64) {
        let item = page.items().iter().find(|item| item.id == id).unwrap();
        (item.is_favorite, item.favorites_count)
    }

    #[tokio::test]
    async fn test_toggle_favorite_follows_server_state() {
        let server = MockServer::start().await;
        mount_feed(&server).await;
        Mock::given(method("POST"))
            .and(path("/favorites/2/toggle/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "is_favorite": true })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        // a second toggle the server ignores, e.g. a double click
        Mock::given(method("POST"))
            .and(path("/favorites/2/toggle/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "is_favorite": true })))
            .mount(&server)
            .await;

        let app = Classifieds::with_transport(signed_in(&server, 1));
        let mut page = app.home_page(Viewport::new(1280, 800));
        page.load().await;

        assert!(page.toggle_favorite(2).await.unwrap());
        assert_eq!(favorites_count(&page, 2), (true, 5));

        assert!(page.toggle_favorite(2).await.unwrap());
        assert_eq!(favorites_count(&page, 2), (true, 5));
        assert_eq!(favorites_count(&page, 1), (false, 0));
    }

    #[tokio::test]
    async fn test_toggle_favorite_signed_out_leaves_items_alone() {
        let server = MockServer::start().await;
        mount_feed(&server).await;

        let app = Classifieds::with_transport(transport(&server));
        let mut page = app.home_page(Viewport::new(1280, 800));
        page.load().await;

        assert!(page.toggle_favorite(2).await.is_err());
        assert_eq!(page.notice(), Some("Sign in to save favorites"));
        assert_eq!(favorites_count(&page, 2), (false, 4));
    }

    #[tokio::test]
    async fn test_featured_window_follows_viewport() {
        let server = MockServer::start().await;
        mount_feed(&server).await;

        let app = Classifieds::with_transport(transport(&server));
        let mut page = app.home_page(Viewport::new(320, 640));
        page.load().await;
        assert_eq!(page.featured().len(), 1);

        page.handle(&PlatformEvent::Resize { width: 1280, height: 800 }).await;
        assert_eq!(page.featured().len(), 2);
    }
}
