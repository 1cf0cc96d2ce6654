use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::files::PendingFile;
use crate::types::{Currency, Language, UserId};

/// A marketplace user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    /// Avatar URL
    #[serde(default)]
    pub avatar: Option<String>,

    #[serde(default)]
    pub language: Option<Language>,

    #[serde(default)]
    pub currency: Option<Currency>,

    /// Name of the purchased plan, if any
    #[serde(default)]
    pub plan: Option<String>,

    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// First and last name, or the email when neither is set
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.email.clone()
        } else {
            name
        }
    }
}

/// Changes to a profile. Unset fields are left alone by the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub language: Option<Language>,
    pub currency: Option<Currency>,
    pub avatar: Option<PendingFile>,
}

impl ProfileUpdate {
    /// Text fields as multipart pairs, in a stable order
    pub(crate) fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        let mut push = |name: &'static str, value: Option<String>| {
            if let Some(value) = value {
                fields.push((name, value));
            }
        };
        push("first_name", self.first_name.clone());
        push("last_name", self.last_name.clone());
        push("email", self.email.clone());
        push("phone", self.phone.clone());
        push("city", self.city.clone());
        push("language", self.language.map(|l| l.code().to_string()));
        push("currency", self.currency.map(|c| c.code().to_string()));
        fields
    }
}
