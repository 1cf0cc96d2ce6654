//! Page controllers.
//!
//! Each page owns its local state and the services it calls. The host UI
//! renders what a page exposes and forwards [`PlatformEvent`]s to it.
//!
//! [`PlatformEvent`]: crate::events::PlatformEvent

mod create;
mod favorites;
mod home;
mod my_classifieds;
mod plans;
mod profile;

use async_trait::async_trait;
use classifieds_ui_state::PageRequest;

use crate::classifieds::{Classified, ClassifiedsClient};
use crate::error::Result;
use crate::favorites::FavoritesClient;
use crate::feed::PageSource;
use crate::search::SearchContext;
use crate::settings::SettingsStore;
use crate::types::{ClassifiedId, Page};

pub use create::*;
pub use favorites::*;
pub use home::*;
pub use my_classifieds::*;
pub use plans::*;
pub use profile::*;

/// Where the UI should navigate next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Classified(ClassifiedId),
    Favorites,
    MyClassifieds,
    CreateClassified,
    Profile,
    Plans,
    Login,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Classified(id) => format!("/classifieds/{}", id),
            Route::Favorites => "/favorites".to_string(),
            Route::MyClassifieds => "/my-classifieds".to_string(),
            Route::CreateClassified => "/create".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::Plans => "/plans".to_string(),
            Route::Login => "/login".to_string(),
        }
    }
}

/// Client-side filter over loaded listings. Switching tabs never fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingTab {
    #[default]
    All,
    Active,
    Inactive,
}

impl ListingTab {
    pub fn matches(&self, classified: &Classified) -> bool {
        match self {
            ListingTab::All => true,
            ListingTab::Active => classified.is_active,
            ListingTab::Inactive => !classified.is_active,
        }
    }
}

/// Home feed: search results for the current criteria
pub struct SearchSource {
    pub classifieds: ClassifiedsClient,
    pub search: SearchContext,
    pub settings: SettingsStore,
}

#[async_trait]
impl PageSource for SearchSource {
    type Item = Classified;

    async fn fetch(&self, page: PageRequest) -> Result<Page<Classified>> {
        let criteria = self.search.criteria();
        self.classifieds
            .search(&criteria, page, Some(self.settings.currency()))
            .await
    }
}

/// The signed-in user's favorites
pub struct FavoritesSource {
    pub favorites: FavoritesClient,
    pub settings: SettingsStore,
}

#[async_trait]
impl PageSource for FavoritesSource {
    type Item = Classified;

    async fn fetch(&self, page: PageRequest) -> Result<Page<Classified>> {
        self.favorites
            .list(page, Some(self.settings.currency()))
            .await
    }
}

/// The signed-in user's own listings
pub struct MineSource {
    pub classifieds: ClassifiedsClient,
    pub settings: SettingsStore,
}

#[async_trait]
impl PageSource for MineSource {
    type Item = Classified;

    async fn fetch(&self, page: PageRequest) -> Result<Page<Classified>> {
        self.classifieds
            .mine(page, Some(self.settings.currency()))
            .await
    }
}
