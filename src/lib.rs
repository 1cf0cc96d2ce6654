//! Classifieds Client Library
//!
//! A Rust client for a classifieds marketplace: typed REST services plus the
//! state a UI needs for browsing, favorites, listing management, listing
//! creation, the profile and paid plans.
//!
//! Shared state lives in explicitly passed containers (session, settings,
//! search criteria, form channels). Pages are plain structs that the host UI
//! drives with [`events::PlatformEvent`]s.

pub mod auth;
pub mod classifieds;
pub mod config;
pub mod currency;
pub mod error;
pub mod events;
pub mod favorites;
pub mod feed;
pub mod fetch;
pub mod files;
pub mod forms;
pub mod geo;
pub mod notifications;
pub mod pages;
pub mod plan;
pub mod search;
pub mod settings;
pub mod tags;
pub mod types;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

pub use classifieds_ui_state as ui;

use crate::auth::{Auth, SessionStore};
use crate::classifieds::ClassifiedsClient;
use crate::config::ClientConfig;
use crate::currency::CurrencyClient;
use crate::error::Result;
use crate::events::PlatformEvents;
use crate::favorites::FavoritesClient;
use crate::fetch::Transport;
use crate::geo::GeoClient;
use crate::notifications::NotificationsClient;
use crate::pages::{
    CreateClassifiedPage, FavoritesPage, FavoritesSource, HomePage, MineSource, MyClassifiedsPage,
    PlansPage, ProfilePage, SearchSource,
};
use crate::plan::PlanClient;
use crate::search::SearchContext;
use crate::settings::SettingsStore;
use crate::tags::TagsClient;
use crate::users::UsersClient;
use classifieds_ui_state::Viewport;

/// The main entry point for the classifieds client
///
/// # Example
///
/// ```no_run
/// use classifieds_client::Classifieds;
/// use classifieds_client::auth::Credentials;
///
/// # async fn run() -> classifieds_client::error::Result<()> {
/// let app = Classifieds::from_env()?;
/// app.auth().login(&Credentials::new("ann@example.com", "secret")).await?;
///
/// let mut home = app.home_page(classifieds_client::ui::Viewport::new(1280, 800));
/// home.load().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Classifieds {
    transport: Transport,
    search: SearchContext,
    events: PlatformEvents,
}

impl Classifieds {
    /// Create a client for `config` with a fresh session
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = Transport::new(&config, SessionStore::new())?;
        Ok(Self::with_transport(transport))
    }

    /// Configure from `CLASSIFIEDS_API_URL` and friends
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn with_transport(transport: Transport) -> Self {
        Self {
            transport,
            search: SearchContext::default(),
            events: PlatformEvents::new(),
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn session(&self) -> &SessionStore {
        self.transport.session()
    }

    pub fn settings(&self) -> &SettingsStore {
        self.transport.settings()
    }

    pub fn search(&self) -> &SearchContext {
        &self.search
    }

    /// Hub the host UI feeds with resize, history, keyboard and scroll events
    pub fn events(&self) -> &PlatformEvents {
        &self.events
    }

    pub fn auth(&self) -> Auth {
        Auth::new(self.transport.clone())
    }

    pub fn classifieds(&self) -> ClassifiedsClient {
        ClassifiedsClient::new(self.transport.clone())
    }

    pub fn favorites(&self) -> FavoritesClient {
        FavoritesClient::new(self.transport.clone())
    }

    pub fn tags(&self) -> TagsClient {
        TagsClient::new(self.transport.clone())
    }

    pub fn users(&self) -> UsersClient {
        UsersClient::new(self.transport.clone())
    }

    pub fn currency(&self) -> CurrencyClient {
        CurrencyClient::new(self.transport.clone())
    }

    pub fn notifications(&self) -> NotificationsClient {
        NotificationsClient::new(self.transport.clone())
    }

    pub fn plans(&self) -> PlanClient {
        PlanClient::new(self.transport.clone())
    }

    /// City lookup, configured from `GEO_API_URL` and `GEO_API_KEY`
    pub fn geo(&self) -> Result<GeoClient> {
        GeoClient::from_env(self.transport.http_client().clone())
    }

    pub fn home_page(&self, viewport: Viewport) -> HomePage {
        let source = SearchSource {
            classifieds: self.classifieds(),
            search: self.search.clone(),
            settings: self.settings().clone(),
        };
        HomePage::new(source, self.favorites(), self.transport.page_size(), viewport)
    }

    pub fn favorites_page(&self) -> FavoritesPage {
        let source = FavoritesSource {
            favorites: self.favorites(),
            settings: self.settings().clone(),
        };
        FavoritesPage::new(source, self.transport.page_size())
    }

    pub fn my_classifieds_page(&self) -> MyClassifiedsPage {
        let source = MineSource {
            classifieds: self.classifieds(),
            settings: self.settings().clone(),
        };
        MyClassifiedsPage::new(source, self.transport.page_size())
    }

    pub fn create_page(&self) -> CreateClassifiedPage {
        CreateClassifiedPage::new(self.classifieds(), self.tags(), self.settings())
    }

    pub fn profile_page(&self) -> ProfilePage {
        ProfilePage::new(self.users(), self.session().clone(), self.settings().clone())
    }

    pub fn plans_page(&self) -> PlansPage {
        PlansPage::new(self.plans())
    }
}

/// Commonly used types
pub mod prelude {
    pub use crate::auth::{Credentials, Session, SessionStore};
    pub use crate::classifieds::{Classified, NewClassified};
    pub use crate::config::{ClientConfig, ClientOptions};
    pub use crate::error::{Error, Result};
    pub use crate::events::{PlatformEvent, PlatformEvents};
    pub use crate::feed::LoadOutcome;
    pub use crate::files::PendingFile;
    pub use crate::pages::{ListingTab, Route};
    pub use crate::search::{Ordering, SearchCriteria};
    pub use crate::settings::{relabel_currency, Settings};
    pub use crate::types::{Currency, Language, Page};
    pub use crate::Classifieds;
}
