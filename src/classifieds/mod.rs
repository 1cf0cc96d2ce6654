//! Classified listing endpoints

mod types;

use classifieds_ui_state::PageRequest;
use serde_json::json;

use crate::error::{Error, Result};
use crate::fetch::{FetchBuilder, Transport};
use crate::search::SearchCriteria;
use crate::types::{ClassifiedId, Currency, Page};

pub use types::*;

/// `limit`/`offset` pairs for a one-based page
pub(crate) fn page_query(page: PageRequest) -> [(&'static str, String); 2] {
    [
        ("limit", page.limit().to_string()),
        ("offset", page.offset().to_string()),
    ]
}

fn with_currency(builder: FetchBuilder<'_>, currency: Option<Currency>) -> FetchBuilder<'_> {
    match currency {
        Some(currency) => builder.query([("currency", currency.code())]),
        None => builder,
    }
}

/// Client for listing search and management
#[derive(Clone)]
pub struct ClassifiedsClient {
    transport: Transport,
}

impl ClassifiedsClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Search active listings. Prices are converted to `currency` when given.
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
        page: PageRequest,
        currency: Option<Currency>,
    ) -> Result<Page<Classified>> {
        let builder = self
            .transport
            .get("classifieds/")
            .query(page_query(page))
            .query(criteria.to_query());

        with_currency(builder, currency).execute().await
    }

    pub async fn get(&self, id: ClassifiedId, currency: Option<Currency>) -> Result<Classified> {
        let builder = self.transport.get(&format!("classifieds/{}/", id));
        with_currency(builder, currency).execute().await
    }

    /// Listings owned by the signed-in user, active and inactive
    pub async fn mine(&self, page: PageRequest, currency: Option<Currency>) -> Result<Page<Classified>> {
        let builder = self
            .transport
            .get("classifieds/my/")
            .query(page_query(page));

        with_currency(builder, currency).execute().await
    }

    pub async fn create(&self, classified: &NewClassified) -> Result<Classified> {
        if classified.images.is_empty() {
            return Err(Error::validation("At least one image is required"));
        }

        self.transport
            .post("classifieds/")
            .multipart(classified.to_form()?)
            .execute()
            .await
    }

    pub async fn update(&self, id: ClassifiedId, classified: &NewClassified) -> Result<Classified> {
        self.transport
            .put(&format!("classifieds/{}/", id))
            .multipart(classified.to_form()?)
            .execute()
            .await
    }

    /// Show or hide a listing. Only `is_active` is sent.
    pub async fn set_active(&self, id: ClassifiedId, active: bool) -> Result<Classified> {
        self.transport
            .patch(&format!("classifieds/{}/", id))
            .json(&json!({ "is_active": active }))?
            .execute()
            .await
    }

    pub async fn delete(&self, id: ClassifiedId) -> Result<()> {
        self.transport
            .delete(&format!("classifieds/{}/", id))
            .execute_empty()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::PendingFile;
    use crate::test_support::{signed_in, transport};
    use classifieds_ui_state::ImageSource;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn item(id: i64) -> serde_json::Value {
        json!({ "id": id, "title": format!("Item {}", id), "price": 10.0, "currency": "USD" })
    }

    #[tokio::test]
    async fn test_search_sends_page_criteria_and_currency() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/classifieds/"))
            .and(query_param("limit", "3"))
            .and(query_param("offset", "3"))
            .and(query_param("search", "lamp"))
            .and(query_param("currency", "EUR"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "results": [item(4)], "next": null })),
            )
            .mount(&server)
            .await;

        let client = ClassifiedsClient::new(transport(&server));
        let criteria = SearchCriteria {
            query: Some("lamp".into()),
            ..Default::default()
        };
        let page = client
            .search(&criteria, PageRequest::new(2, 3), Some(Currency::Eur))
            .await
            .unwrap();

        assert_eq!(page.results.len(), 1);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_set_active_patches_only_the_flag() {
        let server = MockServer::start().await;
        let mut hidden = item(7);
        hidden["is_active"] = json!(false);

        Mock::given(method("PATCH"))
            .and(path("/classifieds/7/"))
            .and(body_json(json!({ "is_active": false })))
            .respond_with(ResponseTemplate::new(200).set_body_json(hidden))
            .expect(1)
            .mount(&server)
            .await;

        let client = ClassifiedsClient::new(signed_in(&server, 1));
        let updated = client.set_active(7, false).await.unwrap();
        assert!(!updated.is_active);
    }

    #[tokio::test]
    async fn test_create_sends_images_in_order_and_repeated_tags() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/classifieds/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(item(11)))
            .mount(&server)
            .await;

        let new = NewClassified {
            title: "Desk".into(),
            description: "Oak desk".into(),
            price: 40.0,
            currency: Currency::Uah,
            tags: vec!["furniture".into(), "oak".into()],
            images: vec![
                ImageSource::Pending(PendingFile::new("second.jpg", "image/jpeg", &b"2"[..])),
                ImageSource::Pending(PendingFile::new("first.jpg", "image/jpeg", &b"1"[..])),
            ],
            ..Default::default()
        };
        let created = ClassifiedsClient::new(signed_in(&server, 1))
            .create(&new)
            .await
            .unwrap();
        assert_eq!(created.id, 11);

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body).to_string();
        let second = body.find("filename=\"second.jpg\"").unwrap();
        let first = body.find("filename=\"first.jpg\"").unwrap();
        assert!(second < first);
        assert_eq!(body.matches("name=\"images\"").count(), 2);
        assert_eq!(body.matches("name=\"tags\"").count(), 2);
        assert!(body.contains("UAH"));
    }

    #[tokio::test]
    async fn test_create_without_images_is_rejected_locally() {
        let server = MockServer::start().await;
        let client = ClassifiedsClient::new(signed_in(&server, 1));
        let result = client.create(&NewClassified::default()).await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mine_past_the_end_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/classifieds/my/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Invalid page." })))
            .mount(&server)
            .await;

        let client = ClassifiedsClient::new(signed_in(&server, 1));
        let err = client.mine(PageRequest::new(5, 3), None).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
