//! Currency conversion endpoints

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;
use crate::fetch::Transport;
use crate::types::Currency;

/// Result of converting an amount between currencies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub amount: f64,
    pub from: Currency,
    pub to: Currency,
    pub result: f64,
    pub rate: Option<f64>,
}

#[derive(Deserialize)]
struct ConvertResponse {
    result: f64,
    #[serde(default)]
    rate: Option<f64>,
}

/// Exchange rates relative to `base`, keyed by currency code
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rates {
    pub base: Currency,
    pub rates: HashMap<String, f64>,
}

impl Rates {
    pub fn rate(&self, currency: Currency) -> Option<f64> {
        if currency == self.base {
            return Some(1.0);
        }
        self.rates.get(currency.code()).copied()
    }
}

#[derive(Clone)]
pub struct CurrencyClient {
    transport: Transport,
}

impl CurrencyClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn convert(&self, amount: f64, from: Currency, to: Currency) -> Result<Conversion> {
        if from == to {
            return Ok(Conversion {
                amount,
                from,
                to,
                result: amount,
                rate: Some(1.0),
            });
        }

        let response = self
            .transport
            .get("currency/convert/")
            .query([
                ("amount", amount.to_string()),
                ("from", from.code().to_string()),
                ("to", to.code().to_string()),
            ])
            .execute::<ConvertResponse>()
            .await?;

        Ok(Conversion {
            amount,
            from,
            to,
            result: response.result,
            rate: response.rate,
        })
    }

    pub async fn rates(&self, base: Currency) -> Result<Rates> {
        self.transport
            .get("currency/rates/")
            .query([("base", base.code())])
            .execute()
            .await
    }
}
