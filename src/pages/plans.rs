use crate::error::Result;
use crate::plan::{BillingPeriod, Checkout, Plan, PlanClient};

/// Plan listing with monthly/yearly tabs
pub struct PlansPage {
    plans: PlanClient,
    all: Vec<Plan>,
    period: BillingPeriod,
    error: Option<String>,
}

impl PlansPage {
    pub fn new(plans: PlanClient) -> Self {
        Self {
            plans,
            all: Vec::new(),
            period: BillingPeriod::default(),
            error: None,
        }
    }

    pub fn period(&self) -> BillingPeriod {
        self.period
    }

    pub fn set_period(&mut self, period: BillingPeriod) {
        self.period = period;
    }

    /// Plans billed in the selected period
    pub fn visible(&self) -> Vec<&Plan> {
        self.all.iter().filter(|plan| plan.period == self.period).collect()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn load(&mut self) -> Result<()> {
        match self.plans.list().await {
            Ok(plans) => {
                self.all = plans;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load plans: {}", e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Start checkout. The host opens the returned URL.
    pub async fn purchase(&mut self, plan_id: i64) -> Result<Checkout> {
        match self.plans.purchase(plan_id).await {
            Ok(checkout) => {
                log::info!("Checkout started for plan {}", plan_id);
                self.error = None;
                Ok(checkout)
            }
            Err(e) => {
                log::error!("Failed to purchase plan {}: {}", plan_id, e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}
