//! Language, currency and city preferences

use std::sync::Arc;
use tokio::sync::watch;

use crate::classifieds::Classified;
use crate::config::ClientOptions;
use crate::types::{Currency, Language};
use crate::users::UserProfile;

/// Viewer preferences read by every page that shows prices or text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub language: Language,
    pub currency: Currency,
    pub city: Option<String>,
}

impl Settings {
    pub fn from_options(options: &ClientOptions) -> Self {
        Self {
            language: options.default_language,
            currency: options.default_currency,
            city: None,
        }
    }

    /// Profile values where set, `fallback` otherwise
    pub fn from_profile(profile: &UserProfile, fallback: &Settings) -> Self {
        Self {
            language: profile.language.unwrap_or(fallback.language),
            currency: profile.currency.unwrap_or(fallback.currency),
            city: profile.city.clone().or_else(|| fallback.city.clone()),
        }
    }
}

/// Shared settings container with change notifications.
///
/// Every setter returns whether the value changed; unchanged writes do not
/// wake subscribers.
#[derive(Clone)]
pub struct SettingsStore {
    settings: Arc<watch::Sender<Settings>>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl SettingsStore {
    pub fn new(initial: Settings) -> Self {
        let (settings, _) = watch::channel(initial);
        Self {
            settings: Arc::new(settings),
        }
    }

    pub fn get(&self) -> Settings {
        self.settings.borrow().clone()
    }

    pub fn currency(&self) -> Currency {
        self.settings.borrow().currency
    }

    pub fn language(&self) -> Language {
        self.settings.borrow().language
    }

    pub fn set_currency(&self, currency: Currency) -> bool {
        self.modify(|s| s.currency = currency)
    }

    pub fn set_language(&self, language: Language) -> bool {
        self.modify(|s| s.language = language)
    }

    pub fn set_city(&self, city: Option<String>) -> bool {
        self.modify(|s| s.city = city)
    }

    /// Replace everything at once, e.g. after loading the profile
    pub fn replace(&self, settings: Settings) -> bool {
        self.modify(|s| *s = settings)
    }

    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.settings.subscribe()
    }

    fn modify<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut Settings),
    {
        self.settings.send_if_modified(|current| {
            let before = current.clone();
            f(current);
            if *current == before {
                return false;
            }
            log::info!("Settings changed: {:?}", current);
            true
        })
    }
}

/// Re-labels the display currency of already loaded listings.
///
/// Only the label changes. The amount stays whatever the server last
/// converted to, so it is stale until the next fetch.
pub fn relabel_currency(items: &mut [Classified], currency: Currency) {
    for item in items {
        if item.converted_price.is_none() {
            item.converted_price = Some(item.price);
        }
        item.converted_currency = Some(currency);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_relabel_swaps_label_and_keeps_numbers() {
        let mut items: Vec<Classified> = serde_json::from_value(json!([
            { "id": 1, "title": "A", "price": 100.0, "currency": "USD",
              "converted_price": 100.0, "converted_currency": "USD" },
            { "id": 2, "title": "B", "price": 50.0, "currency": "UAH" }
        ]))
        .unwrap();

        relabel_currency(&mut items, Currency::Eur);

        assert_eq!(items[0].display_price(), (100.0, Currency::Eur));
        assert_eq!(items[1].display_price(), (50.0, Currency::Eur));
        assert_eq!(items[0].price, 100.0);
        assert_eq!(items[1].currency, Currency::Uah);
    }

    #[tokio::test]
    async fn test_setters_report_changes() {
        let store = SettingsStore::default();
        let mut rx = store.subscribe();

        assert!(!store.set_currency(Currency::Usd));
        assert!(!rx.has_changed().unwrap());

        assert!(store.set_currency(Currency::Eur));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().currency, Currency::Eur);

        assert!(store.set_city(Some("Odesa".into())));
        assert!(!store.set_city(Some("Odesa".into())));
    }

    #[test]
    fn test_from_profile_falls_back_per_field() {
        let profile: UserProfile = serde_json::from_value(json!({
            "id": 1, "email": "a@b.c", "currency": "UAH"
        }))
        .unwrap();
        let fallback = Settings {
            language: Language::Uk,
            currency: Currency::Usd,
            city: Some("Kyiv".into()),
        };

        let settings = Settings::from_profile(&profile, &fallback);
        assert_eq!(settings.currency, Currency::Uah);
        assert_eq!(settings.language, Language::Uk);
        assert_eq!(settings.city.as_deref(), Some("Kyiv"));
    }
}
