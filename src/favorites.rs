//! Favorite listings of the signed-in user

use classifieds_ui_state::PageRequest;
use serde::Deserialize;

use crate::classifieds::{page_query, Classified};
use crate::error::{Error, Result};
use crate::fetch::Transport;
use crate::types::{ClassifiedId, Currency, Page};

#[derive(Deserialize)]
struct ToggleResponse {
    is_favorite: bool,
}

#[derive(Clone)]
pub struct FavoritesClient {
    transport: Transport,
}

impl FavoritesClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn list(&self, page: PageRequest, currency: Option<Currency>) -> Result<Page<Classified>> {
        let mut builder = self.transport.get("favorites/").query(page_query(page));
        if let Some(currency) = currency {
            builder = builder.query([("currency", currency.code())]);
        }
        builder.execute().await
    }

    /// Flip the favorite flag. Returns the state the server settled on.
    pub async fn toggle(&self, id: ClassifiedId) -> Result<bool> {
        if !self.transport.session().is_authenticated() {
            return Err(Error::auth("Sign in to save favorites"));
        }

        let response = self
            .transport
            .post(&format!("favorites/{}/toggle/", id))
            .execute::<ToggleResponse>()
            .await?;
        Ok(response.is_favorite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{signed_in, transport};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_toggle_returns_server_state() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/favorites/8/toggle/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "is_favorite": true })))
            .mount(&server)
            .await;

        let client = FavoritesClient::new(signed_in(&server, 2));
        assert!(client.toggle(8).await.unwrap());
    }

    #[tokio::test]
    async fn test_toggle_requires_sign_in() {
        let server = MockServer::start().await;
        let client = FavoritesClient::new(transport(&server));
        assert!(matches!(client.toggle(8).await, Err(Error::Auth(_))));
    }

    #[tokio::test]
    async fn test_list_uses_limit_and_offset() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/favorites/"))
            .and(query_param("limit", "3"))
            .and(query_param("offset", "0"))
            .and(query_param("currency", "UAH"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "id": 1, "title": "Sofa", "price": 5.0, "currency": "USD", "is_favorite": true }],
                "has_more": true
            })))
            .mount(&server)
            .await;

        let client = FavoritesClient::new(signed_in(&server, 2));
        let page = client
            .list(PageRequest::new(1, 3), Some(Currency::Uah))
            .await
            .unwrap();
        assert!(page.has_more);
        assert!(page.results[0].is_favorite);
    }
}
