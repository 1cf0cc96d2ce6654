//! Paid plans

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fetch::Transport;
use crate::types::Currency;

/// How often a plan is billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    #[default]
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: i64,
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub price: f64,
    pub currency: Currency,

    #[serde(default)]
    pub period: BillingPeriod,

    #[serde(default)]
    pub features: Vec<String>,
}

/// Where to send the user to pay
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Checkout {
    pub checkout_url: String,
}

#[derive(Clone)]
pub struct PlanClient {
    transport: Transport,
}

impl PlanClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<Plan>> {
        self.transport.get("plans/").execute().await
    }

    pub async fn purchase(&self, plan_id: i64) -> Result<Checkout> {
        self.transport
            .post(&format!("plans/{}/purchase/", plan_id))
            .execute()
            .await
    }
}
