//! Search and filter criteria for the home feed

use std::sync::Arc;
use tokio::sync::watch;

/// Sort order of search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ordering {
    #[default]
    Newest,
    Oldest,
    PriceLowToHigh,
    PriceHighToLow,
    MostViewed,
}

impl Ordering {
    /// Value of the `ordering` query parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            Ordering::Newest => "-created_at",
            Ordering::Oldest => "created_at",
            Ordering::PriceLowToHigh => "price",
            Ordering::PriceHighToLow => "-price",
            Ordering::MostViewed => "-views_count",
        }
    }
}

/// What the user is looking for
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    pub query: Option<String>,
    pub city: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub tags: Vec<String>,
    pub ordering: Ordering,
}

impl SearchCriteria {
    /// Query pairs for the search endpoint. Blank text filters are skipped and
    /// tags are repeated.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        let text = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        if let Some(query) = text(&self.query) {
            params.push(("search".to_string(), query));
        }
        if let Some(city) = text(&self.city) {
            params.push(("city".to_string(), city));
        }
        if let Some(min) = self.min_price {
            params.push(("min_price".to_string(), min.to_string()));
        }
        if let Some(max) = self.max_price {
            params.push(("max_price".to_string(), max.to_string()));
        }
        for tag in &self.tags {
            params.push(("tags".to_string(), tag.clone()));
        }
        params.push(("ordering".to_string(), self.ordering.as_param().to_string()));

        params
    }

    /// True when no filter narrows the results
    pub fn is_empty(&self) -> bool {
        let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
        blank(&self.query)
            && blank(&self.city)
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.tags.is_empty()
    }
}

/// Shared search criteria. Writers go through [`update`](Self::update);
/// readers either read a snapshot or subscribe to changes.
#[derive(Clone)]
pub struct SearchContext {
    criteria: Arc<watch::Sender<SearchCriteria>>,
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new(SearchCriteria::default())
    }
}

impl SearchContext {
    pub fn new(initial: SearchCriteria) -> Self {
        let (criteria, _) = watch::channel(initial);
        Self {
            criteria: Arc::new(criteria),
        }
    }

    pub fn criteria(&self) -> SearchCriteria {
        self.criteria.borrow().clone()
    }

    /// Applies `f` to the criteria. Subscribers are woken only if something
    /// actually changed; the return value says whether it did.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut SearchCriteria),
    {
        self.criteria.send_if_modified(|current| {
            let mut next = current.clone();
            f(&mut next);
            if next == *current {
                return false;
            }
            log::debug!("Search criteria changed: {:?}", next);
            *current = next;
            true
        })
    }

    pub fn reset(&self) -> bool {
        self.update(|criteria| *criteria = SearchCriteria::default())
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchCriteria> {
        self.criteria.subscribe()
    }
}
