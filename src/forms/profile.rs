use crate::files::PendingFile;
use crate::forms::FieldError;
use crate::settings::Settings;
use crate::types::{Currency, Language};
use crate::users::{ProfileUpdate, UserProfile};

/// Editable copy of the profile
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub language: Language,
    pub currency: Currency,
    pub avatar: Option<PendingFile>,
    loaded: Option<UserProfile>,
    loaded_language: Language,
    loaded_currency: Currency,
}

impl ProfileForm {
    /// Form over `profile`. Language and currency come from `settings`, the
    /// preferences already resolved for the viewer, so an unset profile value
    /// is not mistaken for an edit.
    pub fn from_profile(profile: &UserProfile, settings: &Settings) -> Self {
        Self {
            first_name: profile.first_name.clone().unwrap_or_default(),
            last_name: profile.last_name.clone().unwrap_or_default(),
            email: profile.email.clone(),
            phone: profile.phone.clone().unwrap_or_default(),
            city: profile.city.clone().unwrap_or_default(),
            language: settings.language,
            currency: settings.currency,
            avatar: None,
            loaded: Some(profile.clone()),
            loaded_language: settings.language,
            loaded_currency: settings.currency,
        }
    }

    pub fn errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let email = self.email.trim();
        let valid_email = match email.split_once('@') {
            Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
            None => false,
        };
        if !valid_email {
            errors.push(FieldError {
                field: "email",
                message: "Enter a valid email address".to_string(),
            });
        }

        let phone = self.phone.trim();
        if !phone.is_empty() {
            let digits = phone.trim_start_matches('+');
            let ok = digits.chars().all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
                && (7..=15).contains(&digits.chars().filter(char::is_ascii_digit).count());
            if !ok {
                errors.push(FieldError {
                    field: "phone",
                    message: "Enter a valid phone number".to_string(),
                });
            }
        }

        if let Some(avatar) = &self.avatar {
            if !avatar.is_image() {
                errors.push(FieldError {
                    field: "avatar",
                    message: "Avatar must be an image".to_string(),
                });
            }
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Only the fields that differ from the loaded profile
    pub fn to_update(&self) -> ProfileUpdate {
        let changed = |value: &str, before: Option<&str>| {
            let value = value.trim();
            if Some(value) == before.map(str::trim) || (value.is_empty() && before.is_none()) {
                None
            } else {
                Some(value.to_string())
            }
        };
        let loaded = self.loaded.as_ref();

        ProfileUpdate {
            first_name: changed(&self.first_name, loaded.and_then(|p| p.first_name.as_deref())),
            last_name: changed(&self.last_name, loaded.and_then(|p| p.last_name.as_deref())),
            email: changed(&self.email, loaded.map(|p| p.email.as_str())),
            phone: changed(&self.phone, loaded.and_then(|p| p.phone.as_deref())),
            city: changed(&self.city, loaded.and_then(|p| p.city.as_deref())),
            language: Some(self.language).filter(|l| *l != self.loaded_language),
            currency: Some(self.currency).filter(|c| *c != self.loaded_currency),
            avatar: self.avatar.clone(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.to_update() != ProfileUpdate::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile() -> UserProfile {
        serde_json::from_value(json!({
            "id": 1,
            "email": "ann@example.com",
            "first_name": "Ann",
            "city": "Lviv",
            "language": "en",
            "currency": "USD"
        }))
        .unwrap()
    }

    fn settings() -> Settings {
        Settings::from_profile(&profile(), &Settings::default())
    }

    #[test]
    fn test_untouched_form_is_clean() {
        let form = ProfileForm::from_profile(&profile(), &settings());
        assert!(form.is_valid());
        assert!(!form.is_dirty());
    }

    #[test]
    fn test_unset_preferences_use_resolved_settings() {
        let bare: UserProfile = serde_json::from_value(json!({ "id": 2, "email": "bo@example.com" })).unwrap();
        let resolved = Settings {
            language: Language::Uk,
            currency: Currency::Eur,
            city: None,
        };

        let mut form = ProfileForm::from_profile(&bare, &resolved);
        assert_eq!(form.currency, Currency::Eur);
        assert_eq!(form.language, Language::Uk);
        assert!(!form.is_dirty());

        form.currency = Currency::Usd;
        assert_eq!(form.to_update().currency, Some(Currency::Usd));
        assert!(form.to_update().language.is_none());
    }

    #[test]
    fn test_update_carries_only_changes() {
        let mut form = ProfileForm::from_profile(&profile(), &settings());
        form.city = "Odesa".into();
        form.currency = Currency::Uah;

        let update = form.to_update();
        assert_eq!(update.city.as_deref(), Some("Odesa"));
        assert_eq!(update.currency, Some(Currency::Uah));
        assert!(update.first_name.is_none());
        assert!(update.language.is_none());
        assert!(update.email.is_none());
    }

    #[test]
    fn test_validation() {
        let mut form = ProfileForm::from_profile(&profile(), &settings());
        form.email = "ann@".into();
        form.phone = "+380 67-123-45-67".into();
        let fields: Vec<_> = form.errors().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["email"]);

        form.email = "ann@example.com".into();
        form.phone = "12ab".into();
        form.avatar = Some(PendingFile::new("cv.pdf", "application/pdf", &b"%PDF"[..]));
        let fields: Vec<_> = form.errors().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["phone", "avatar"]);
    }
}
