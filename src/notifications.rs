//! User notifications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fetch::Transport;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub message: String,

    #[serde(default)]
    pub is_read: bool,

    /// Listing the notification is about, if any
    #[serde(default)]
    pub classified: Option<i64>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Number of unread entries in `notifications`
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}

#[derive(Clone)]
pub struct NotificationsClient {
    transport: Transport,
}

impl NotificationsClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<Notification>> {
        self.transport.get("notifications/").execute().await
    }

    pub async fn mark_read(&self, id: i64) -> Result<()> {
        self.transport
            .post(&format!("notifications/{}/read/", id))
            .execute_empty()
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.transport
            .delete(&format!("notifications/{}/", id))
            .execute_empty()
            .await
    }
}
