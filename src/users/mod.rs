//! User profile endpoints

mod types;

use reqwest::multipart::Form;

use crate::error::Result;
use crate::fetch::Transport;

pub use types::*;

/// Client for the signed-in user's profile
#[derive(Clone)]
pub struct UsersClient {
    transport: Transport,
}

impl UsersClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Fetch the signed-in user's profile
    pub async fn me(&self) -> Result<UserProfile> {
        self.transport.get("users/me/").execute().await
    }

    /// Update the profile. Sent as multipart so an avatar can ride along.
    pub async fn update(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        let mut form = Form::new();
        for (name, value) in update.text_fields() {
            form = form.text(name, value);
        }
        if let Some(avatar) = &update.avatar {
            form = form.part("avatar", avatar.to_part()?);
        }

        self.transport
            .patch("users/me/")
            .multipart(form)
            .execute()
            .await
    }

    /// Delete the account. The caller should clear the session afterwards.
    pub async fn delete(&self) -> Result<()> {
        self.transport.delete("users/me/").execute_empty().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::PendingFile;
    use crate::test_support::signed_in;
    use crate::types::Currency;
    use serde_json::json;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn profile() -> serde_json::Value {
        json!({
            "id": 3,
            "email": "ann@example.com",
            "first_name": "Ann",
            "last_name": null,
            "city": "Lviv",
            "currency": "EUR",
            "language": "uk"
        })
    }

    #[tokio::test]
    async fn test_me_parses_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me/"))
            .and(header_exists("Authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile()))
            .mount(&server)
            .await;

        let me = UsersClient::new(signed_in(&server, 3)).me().await.unwrap();
        assert_eq!(me.display_name(), "Ann");
        assert_eq!(me.currency, Some(Currency::Eur));
        assert!(me.avatar.is_none());
    }

    #[tokio::test]
    async fn test_update_sends_multipart_with_avatar() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/users/me/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile()))
            .mount(&server)
            .await;

        let update = ProfileUpdate {
            city: Some("Lviv".into()),
            currency: Some(Currency::Eur),
            avatar: Some(PendingFile::new("me.png", "image/png", &b"png-bytes"[..])),
            ..Default::default()
        };
        UsersClient::new(signed_in(&server, 3))
            .update(&update)
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("Content-Disposition: form-data"));
        assert!(body.contains("name=\"city\""));
        assert!(body.contains("EUR"));
        assert!(body.contains("filename=\"me.png\""));
        assert!(body.contains("png-bytes"));
        assert!(!body.contains("name=\"phone\""));
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let profile: UserProfile =
            serde_json::from_value(json!({ "id": 1, "email": "x@example.com", "first_name": " " }))
                .unwrap();
        assert_eq!(profile.display_name(), "x@example.com");
    }
}
