use crate::error::{Error, Result};
use crate::types::Currency;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;
pub const PRICE_MAX: f64 = 1_000_000_000.0;

/// One invalid field with the message to show next to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Text fields of the creation form, as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedFields {
    pub title: String,
    pub description: String,
    /// Raw price text; parsed during validation
    pub price: String,
    pub currency: Currency,
    pub city: Option<String>,
}

impl ClassifiedFields {
    /// Every problem with the current values, in field order
    pub fn errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let title = self.title.trim().chars().count();
        if title < TITLE_MIN_CHARS {
            errors.push(FieldError::new(
                "title",
                format!("Title must be at least {} characters", TITLE_MIN_CHARS),
            ));
        } else if title > TITLE_MAX_CHARS {
            errors.push(FieldError::new(
                "title",
                format!("Title must be at most {} characters", TITLE_MAX_CHARS),
            ));
        }

        let description = self.description.trim().chars().count();
        if description == 0 {
            errors.push(FieldError::new("description", "Description is required"));
        } else if description > DESCRIPTION_MAX_CHARS {
            errors.push(FieldError::new(
                "description",
                format!("Description must be at most {} characters", DESCRIPTION_MAX_CHARS),
            ));
        }

        if let Err(message) = parse_price(&self.price) {
            errors.push(FieldError::new("price", message));
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// The price as a number, once the fields are valid
    pub fn price_value(&self) -> Result<f64> {
        parse_price(&self.price).map_err(Error::validation)
    }
}

/// Accepts `12`, `12.5` and `12,5`
fn parse_price(raw: &str) -> std::result::Result<f64, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Price is required");
    }
    let value: f64 = raw
        .replace(',', ".")
        .parse()
        .map_err(|_| "Price must be a number")?;

    if !value.is_finite() || value <= 0.0 {
        return Err("Price must be greater than zero");
    }
    if value > PRICE_MAX {
        return Err("Price is too large");
    }
    Ok(value)
}
