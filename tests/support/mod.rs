//! Test support utilities for capstan integration tests.
//!
//! Stands up a wiremock-backed fake of the GitHub secrets API with a real
//! sealed-box keypair behind the public-key endpoint, so tests can open the
//! ciphertexts the client uploads.

#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use crypto_box::SecretKey;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use capstan::core::github::GitHubClient;
use capstan::core::publish::Publisher;

/// Repository path used by all integration tests.
pub const REPO: &str = "acme/widgets";

/// A fake remote repository with its own encryption keypair.
pub struct FakeRepo {
    pub server: MockServer,
    pub secret_key: SecretKey,
    pub key_id: String,
}

impl FakeRepo {
    pub async fn start() -> Self {
        Self::with_key_id("1").await
    }

    pub async fn with_key_id(key_id: &str) -> Self {
        let server = MockServer::start().await;
        let mut rng = crypto_box::aead::OsRng;
        let secret_key = SecretKey::generate(&mut rng);

        Self {
            server,
            secret_key,
            key_id: key_id.to_string(),
        }
    }

    /// The repository public key, base64-encoded as the platform serves it.
    pub fn public_key_b64(&self) -> String {
        BASE64.encode(self.secret_key.public_key().as_bytes())
    }

    /// Path of the public-key endpoint.
    pub fn public_key_path(&self) -> String {
        format!("/repos/{REPO}/actions/secrets/public-key")
    }

    /// Path of one secret's endpoint.
    pub fn secret_path(&self, name: &str) -> String {
        format!("/repos/{REPO}/actions/secrets/{name}")
    }

    /// Mount the public-key endpoint, asserting it is hit exactly
    /// `expected` times over the server's lifetime.
    pub async fn mount_public_key(&self, expected: u64) {
        Mock::given(method("GET"))
            .and(path(self.public_key_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "key_id": self.key_id,
                "key": self.public_key_b64(),
            })))
            .expect(expected)
            .mount(&self.server)
            .await;
    }

    /// Mount a PUT handler for one resolved secret name.
    pub async fn mount_put(&self, name: &str, status: u16) {
        Mock::given(method("PUT"))
            .and(path(self.secret_path(name)))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Mount a PUT handler accepting any secret name.
    pub async fn mount_put_any(&self, status: u16) {
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// A publisher pointed at this fake repository.
    pub fn publisher(&self, prefix: &str) -> Publisher {
        let client = GitHubClient::new(&self.server.uri(), "test-token", REPO.parse().unwrap())
            .expect("client for mock server");
        Publisher::new(client, prefix)
    }

    /// Open a captured `encrypted_value` with the repository's private key.
    pub fn unseal(&self, encrypted_value_b64: &str) -> Vec<u8> {
        let ciphertext = BASE64
            .decode(encrypted_value_b64)
            .expect("encrypted_value should be base64");
        self.secret_key
            .unseal(&ciphertext)
            .expect("ciphertext should open with the repository key")
    }

    /// All PUT requests received so far, as (path, json body) pairs in
    /// arrival order.
    pub async fn received_puts(&self) -> Vec<(String, serde_json::Value)> {
        self.server
            .received_requests()
            .await
            .expect("request recording enabled")
            .into_iter()
            .filter(|r| r.method.to_string().eq_ignore_ascii_case("PUT"))
            .map(|r| {
                let body = serde_json::from_slice(&r.body).expect("PUT body should be JSON");
                (r.url.path().to_string(), body)
            })
            .collect()
    }

    /// Number of public-key fetches received so far.
    pub async fn key_fetch_count(&self) -> usize {
        let key_path = self.public_key_path();
        self.server
            .received_requests()
            .await
            .expect("request recording enabled")
            .iter()
            .filter(|r| r.url.path() == key_path)
            .count()
    }
}
