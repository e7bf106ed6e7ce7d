//! Integration tests for FreshCart.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p freshcart-cli -- migrate
//!
//! # Start the API server
//! cargo run -p freshcart-api
//!
//! # Run integration tests against it
//! cargo test -p freshcart-integration-tests -- --ignored
//! ```
//!
//! The tests are `#[ignore]`d by default because they need a live server;
//! `FRESHCART_BASE_URL` overrides the default `http://localhost:4000`.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Client;
use serde_json::{Value, json};

/// Shared context for one test: an HTTP client and the server base URL.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

static COUNTER: AtomicU32 = AtomicU32::new(0);

impl TestContext {
    /// Create a context pointed at the configured server.
    #[must_use]
    pub fn new() -> Self {
        let base_url = std::env::var("FRESHCART_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:4000".to_string());
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// A process-unique email address for registering throwaway accounts.
    #[must_use]
    pub fn unique_email(&self, tag: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or_default();
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        format!("{tag}-{nanos}-{n}@test.example.com")
    }

    /// Register a customer account, returning the response body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the server rejects the registration.
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let resp = self
            .client
            .post(format!("{}/api/auth/register", self.base_url))
            .json(&json!({"name": "Test User", "email": email, "password": password}))
            .send()
            .await
            .expect("register request failed");
        assert_eq!(resp.status(), 201, "registration rejected");
        resp.json().await.expect("register response not JSON")
    }

    /// Log in and return the bearer token.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the credentials are rejected.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let resp = self
            .client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&json!({"email": email, "password": password}))
            .send()
            .await
            .expect("login request failed");
        assert_eq!(resp.status(), 200, "login rejected");
        let body: Value = resp.json().await.expect("login response not JSON");
        body["token"]
            .as_str()
            .expect("login response missing token")
            .to_string()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
