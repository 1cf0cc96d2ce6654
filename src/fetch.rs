//! HTTP transport shared by every API service

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::{multipart::Form, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::auth::SessionStore;
use crate::config::{ClientConfig, ClientOptions};
use crate::error::{extract_message, Error, Result};
use crate::settings::{Settings, SettingsStore};
use crate::types::Language;

enum Body {
    Empty,
    Json(Vec<u8>),
    Multipart(Form),
}

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: Body,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self {
            client,
            url: url.to_string(),
            method,
            headers,
            query_params: Vec::new(),
            body: Body::Empty,
        }
    }

    /// Add a header to the request. Invalid names or values are skipped.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (HeaderName::try_from(name), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => log::warn!("Skipping invalid header {}", name),
        }
        self
    }

    /// Add bearer token authentication to the request
    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("Authorization", &format!("Bearer {}", token))
    }

    /// Append query parameters. Repeated keys are kept.
    pub fn query<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query_params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body)?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Body::Json(json);
        Ok(self)
    }

    /// Add a multipart body to the request. reqwest sets the boundary header.
    pub fn multipart(mut self, form: Form) -> Self {
        self.headers.remove(CONTENT_TYPE);
        self.body = Body::Multipart(form);
        self
    }

    /// Build the request
    fn build(self) -> Result<(RequestBuilder, String)> {
        let mut url = Url::parse(&self.url)?;

        if !self.query_params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                query_pairs.append_pair(key, value);
            }
        }

        let label = format!("{} {}", self.method, url.path());
        let mut req = self.client.request(self.method, url.as_str());
        req = req.headers(self.headers);

        req = match self.body {
            Body::Empty => req,
            Body::Json(body) => req.body(body),
            Body::Multipart(form) => req.multipart(form),
        };

        Ok((req, label))
    }

    /// Execute the request and return the response if its status is a success
    pub async fn execute_raw(self) -> Result<Response> {
        let (req, label) = self.build()?;
        log::debug!("{}", label);
        let response = req.send().await.map_err(|e| {
            // the query may carry an API key
            let e = e.without_url();
            log::error!("{} failed: {}", label, e);
            Error::from(e)
        })?;
        check_status(&label, response).await
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(self) -> Result<T> {
        let response = self.execute_raw().await?;
        let result = response.json::<T>().await.map_err(|e| Error::from(e.without_url()))?;
        Ok(result)
    }

    /// Execute the request and ignore the response body
    pub async fn execute_empty(self) -> Result<()> {
        self.execute_raw().await?;
        Ok(())
    }
}

/// Turns a non-success response into an [`Error`], logging status and body.
async fn check_status(label: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_message(&body);

    if status.as_u16() == 404 {
        log::warn!("{} returned 404: {}", label, body);
        return Err(Error::NotFound(message.unwrap_or_else(|| label.to_string())));
    }

    log::error!("{} failed with status {}: {}", label, status, body);
    Err(Error::Api {
        status: status.as_u16(),
        message,
        body,
    })
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a GET request
    pub fn get<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::GET)
    }

    /// Create a POST request
    pub fn post<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::POST)
    }

    /// Create a PUT request
    pub fn put<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::PUT)
    }

    /// Create a PATCH request
    pub fn patch<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::PATCH)
    }

    /// Create a DELETE request
    pub fn delete<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::DELETE)
    }
}

/// The configured request-sending object every service goes through.
///
/// Attaches the base URL, client info, language and the current access token.
/// The language follows the shared [`SettingsStore`].
#[derive(Clone)]
pub struct Transport {
    base_url: Url,
    client: Client,
    session: SessionStore,
    settings: SettingsStore,
    options: ClientOptions,
}

impl Transport {
    /// Create a transport with its own HTTP client
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self::with_client(config, client, session))
    }

    /// Create a transport around an existing HTTP client
    pub fn with_client(config: &ClientConfig, client: Client, session: SessionStore) -> Self {
        Self {
            base_url: config.api_url.clone(),
            client,
            session,
            settings: SettingsStore::new(Settings::from_options(&config.options)),
            options: config.options.clone(),
        }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn page_size(&self) -> u32 {
        self.options.page_size
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Language sent in `Accept-Language`
    pub fn language(&self) -> Language {
        self.settings.language()
    }

    pub fn set_language(&self, language: Language) {
        self.settings.set_language(language);
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Start a request against `path` with the standard headers applied
    pub fn request(&self, method: Method, path: &str) -> FetchBuilder<'_> {
        let url = self.url(path);
        let mut builder = FetchBuilder::new(&self.client, &url, method)
            .header("X-Client-Info", &self.options.client_info)
            .header(ACCEPT_LANGUAGE.as_str(), self.language().code());

        if let Some(token) = self.session.access_token() {
            builder = builder.bearer_auth(&token);
        }
        builder
    }

    pub fn get(&self, path: &str) -> FetchBuilder<'_> {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> FetchBuilder<'_> {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> FetchBuilder<'_> {
        self.request(Method::PUT, path)
    }

    pub fn patch(&self, path: &str) -> FetchBuilder<'_> {
        self.request(Method::PATCH, path)
    }

    pub fn delete(&self, path: &str) -> FetchBuilder<'_> {
        self.request(Method::DELETE, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport(server: &MockServer) -> Transport {
        let config = ClientConfig::new(&server.uri(), ClientOptions::default()).unwrap();
        Transport::new(&config, SessionStore::new()).unwrap()
    }

    #[tokio::test]
    async fn test_standard_headers_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/things/"))
            .and(header("Accept", "application/json"))
            .and(header("Accept-Language", "uk"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .mount(&server)
            .await;

        let transport = transport(&server);
        transport.set_language(Language::Uk);
        let body: serde_json::Value = transport
            .get("/things/")
            .query([("limit", "5")])
            .execute()
            .await
            .unwrap();
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_404_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Invalid page." })))
            .mount(&server)
            .await;

        let result = transport(&server).get("missing/").execute_empty().await;
        match result {
            Err(Error::NotFound(message)) => assert_eq!(message, "Invalid page."),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_keeps_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/things/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let result = transport(&server)
            .post("things/")
            .json(&json!({ "a": 1 }))
            .unwrap()
            .execute_empty()
            .await;
        match result {
            Err(Error::Api { status, message, body }) => {
                assert_eq!(status, 500);
                assert!(message.is_none());
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_url_joins_without_double_slashes() {
        let config = ClientConfig::new("https://api.example.com/api/v1/", ClientOptions::default()).unwrap();
        let transport = Transport::with_client(&config, Client::new(), SessionStore::new());
        assert_eq!(
            transport.url("/classifieds/"),
            "https://api.example.com/api/v1/classifieds/"
        );
    }
}
