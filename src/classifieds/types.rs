use chrono::{DateTime, Utc};
use classifieds_ui_state::{Identified, ImageSource};
use reqwest::multipart::Form;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::files::PendingFile;
use crate::types::{ClassifiedId, Currency, UserId};

fn default_true() -> bool {
    true
}

/// A marketplace listing as the server returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classified {
    pub id: ClassifiedId,
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Price in the currency the seller chose
    pub price: f64,
    pub currency: Currency,

    /// Price converted to the viewer's currency, when the request asked for one
    #[serde(default)]
    pub converted_price: Option<f64>,

    #[serde(default)]
    pub converted_currency: Option<Currency>,

    /// Image URLs. The first one is the main image.
    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub views_count: u64,

    #[serde(default)]
    pub messages_count: u64,

    #[serde(default)]
    pub favorites_count: u64,

    #[serde(default)]
    pub is_favorite: bool,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub owner: Option<UserId>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Classified {
    /// Amount and currency to show. The converted pair wins when present.
    pub fn display_price(&self) -> (f64, Currency) {
        match (self.converted_price, self.converted_currency) {
            (Some(amount), Some(currency)) => (amount, currency),
            (Some(amount), None) => (amount, self.currency),
            _ => (self.price, self.currency),
        }
    }

    /// Display price formatted with the currency symbol, e.g. `€12.50`
    pub fn formatted_price(&self) -> String {
        let (amount, currency) = self.display_price();
        format!("{}{:.2}", currency.symbol(), amount)
    }

    pub fn main_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

impl Identified for Classified {
    type Id = ClassifiedId;

    fn id(&self) -> ClassifiedId {
        self.id
    }
}

/// Payload for creating or replacing a listing.
///
/// Images keep their order on the wire: each one is sent under `images`,
/// pending files as file parts and already stored images as their URL.
#[derive(Debug, Clone, Default)]
pub struct NewClassified {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub currency: Currency,
    pub city: Option<String>,
    pub tags: Vec<String>,
    pub images: Vec<ImageSource<PendingFile>>,
}

impl NewClassified {
    pub(crate) fn to_form(&self) -> Result<Form> {
        let mut form = Form::new()
            .text("title", self.title.clone())
            .text("description", self.description.clone())
            .text("price", self.price.to_string())
            .text("currency", self.currency.code());

        if let Some(city) = &self.city {
            form = form.text("city", city.clone());
        }
        for tag in &self.tags {
            form = form.text("tags", tag.clone());
        }
        for image in &self.images {
            form = match image {
                ImageSource::Pending(file) => form.part("images", file.to_part()?),
                ImageSource::Remote(url) => form.text("images", url.clone()),
            };
        }

        Ok(form)
    }
}
