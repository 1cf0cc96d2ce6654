//! Helpers shared by unit tests

use jsonwebtoken::{encode, EncodingKey, Header};
use wiremock::MockServer;

use crate::auth::{Session, SessionStore};
use crate::config::{ClientConfig, ClientOptions};
use crate::fetch::Transport;

/// Signs `claims` with a throwaway secret
pub(crate) fn token(claims: serde_json::Value) -> String {
    encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test-secret")).unwrap()
}

/// Transport pointed at the mock server, small pages, no session
pub(crate) fn transport(server: &MockServer) -> Transport {
    let options = ClientOptions::default().with_page_size(3);
    let config = ClientConfig::new(&server.uri(), options).unwrap();
    Transport::new(&config, SessionStore::new()).unwrap()
}

/// Same as [`transport`] with user `user_id` signed in
pub(crate) fn signed_in(server: &MockServer, user_id: i64) -> Transport {
    let transport = transport(server);
    let access = token(serde_json::json!({ "user_id": user_id, "exp": 4_102_444_800i64 }));
    transport
        .session()
        .set(Session::from_tokens(&access, "refresh").unwrap());
    transport
}
