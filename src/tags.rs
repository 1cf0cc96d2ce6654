//! Tag catalogue endpoints

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{Error, Result};
use crate::fetch::Transport;

/// A tag known to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Clone)]
pub struct TagsClient {
    transport: Transport,
}

impl TagsClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Every known tag
    pub async fn list(&self) -> Result<Vec<Tag>> {
        self.transport.get("tags/").execute().await
    }

    pub async fn create(&self, name: &str) -> Result<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("Tag cannot be empty"));
        }

        self.transport
            .post("tags/")
            .json(&json!({ "name": name }))?
            .execute()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::signed_in;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_trims_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tags/"))
            .and(body_json(json!({ "name": "vintage" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 4, "name": "vintage" })))
            .mount(&server)
            .await;

        let client = TagsClient::new(signed_in(&server, 1));
        let tag = client.create("  vintage ").await.unwrap();
        assert_eq!(tag, Tag { id: 4, name: "vintage".into() });
        assert!(matches!(client.create(" ").await, Err(Error::Validation(_))));
    }
}
