//! Integration tests for İolo Pizza.
//!
//! These run against live servers and a migrated database, so every test is
//! `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! iolo-cli migrate
//! ADMIN_PASSWORD='...' iolo-cli admin create -e test@iolopizza.com -n Test
//! cargo run -p iolo-storefront &
//! cargo run -p iolo-admin &
//!
//! ADMIN_TEST_EMAIL=test@iolopizza.com ADMIN_TEST_PASSWORD='...' \
//!     cargo test -p iolo-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_URL` - default `http://localhost:3000`
//! - `ADMIN_URL` - default `http://localhost:3001`
//! - `ADMIN_TEST_EMAIL` / `ADMIN_TEST_PASSWORD` - an `admin` role account
//! - `DATABASE_URL` - the migrated database, for tests that talk to it directly

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use iolo_core::Category;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

/// Base URL of the public site.
#[must_use]
pub fn storefront_url() -> String {
    std::env::var("STOREFRONT_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL of the admin API.
#[must_use]
pub fn admin_url() -> String {
    std::env::var("ADMIN_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Connect to `DATABASE_URL` directly.
pub async fn database() -> sqlx::PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
    iolo_admin::db::create_pool(&secrecy::SecretString::from(url))
        .await
        .expect("Failed to connect to database")
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// An HTTP client holding a bearer token for the admin API.
pub struct AdminClient {
    pub client: Client,
    pub base_url: String,
    token: String,
}

impl AdminClient {
    /// Log in with `ADMIN_TEST_EMAIL` / `ADMIN_TEST_PASSWORD`.
    pub async fn login() -> Self {
        let email = std::env::var("ADMIN_TEST_EMAIL").expect("ADMIN_TEST_EMAIL not set");
        let password = std::env::var("ADMIN_TEST_PASSWORD").expect("ADMIN_TEST_PASSWORD not set");
        let client = Client::new();
        let base_url = admin_url();

        let resp = client
            .post(format!("{base_url}/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to log in");
        assert_eq!(resp.status(), StatusCode::OK, "login failed");
        let body: LoginResponse = resp.json().await.expect("Invalid login response");

        Self {
            client,
            base_url,
            token: body.token,
        }
    }

    /// Build a request with the bearer token attached.
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
    }

    /// Create a menu item and return the stored JSON.
    pub async fn create_food(&self, body: &Value) -> Value {
        let resp = self
            .request(reqwest::Method::POST, "/api/foods")
            .json(body)
            .send()
            .await
            .expect("Failed to create food");
        assert_eq!(resp.status(), StatusCode::CREATED);
        resp.json().await.expect("Invalid food JSON")
    }

    /// Delete a menu item, ignoring the outcome.
    pub async fn delete_food(&self, id: &str) {
        let _ = self
            .request(reqwest::Method::DELETE, &format!("/api/foods/{id}"))
            .send()
            .await;
    }
}

/// A menu item payload with a unique name so tests don't collide.
#[must_use]
pub fn test_food(category: Category) -> Value {
    json!({
        "name": format!("Test {}", uuid::Uuid::new_v4()),
        "description": "Integration test item",
        "price": 123.45,
        "category": category.as_str(),
        "ingredients": ["Mozarella", "Fesleğen"],
        "images": [],
        "isAvailable": true,
    })
}
