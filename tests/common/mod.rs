#![allow(dead_code)]

use anyhow::{Context, Result};
use reqwest::{RequestBuilder, StatusCode};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use shop_api::auth::hash_password;
use shop_api::database::manager;
use shop_api::database::models::NewUser;
use shop_api::database::users;
use shop_api::{app, AppState};

pub const ADMIN_EMAIL: &str = "admin@shop.test";
pub const USER_EMAIL: &str = "user@shop.test";
pub const PASSWORD: &str = "password123";

/// The real router served on an ephemeral port over a private in-memory
/// database. Every test gets its own instance.
pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub pool: SqlitePool,
}

pub async fn spawn_app() -> Result<TestApp> {
    let pool = manager::connect_in_memory().await?;
    manager::migrate(&pool).await?;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind ephemeral port")?;
    let addr = listener.local_addr()?;

    let router = app(AppState::new(pool.clone()));
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(TestApp {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
        pool,
    })
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.client.put(self.url(path))
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.client.delete(self.url(path))
    }

    /// Insert an account directly, bypassing the HTTP surface
    pub async fn create_user(&self, email: &str, password: &str, is_admin: bool) -> Result<i64> {
        let id = users::create_user(
            &self.pool,
            NewUser {
                name: "Test User".to_string(),
                email: email.to_string(),
                password_hash: hash_password(password)?,
                is_admin,
            },
        )
        .await?;
        Ok(id)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let res = self
            .post("/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

        let body: Value = res.json().await?;
        body["access_token"]
            .as_str()
            .map(str::to_string)
            .context("login response without access_token")
    }

    pub async fn admin_token(&self) -> Result<String> {
        self.create_user(ADMIN_EMAIL, PASSWORD, true).await?;
        self.login(ADMIN_EMAIL, PASSWORD).await
    }

    pub async fn user_token(&self) -> Result<String> {
        self.create_user(USER_EMAIL, PASSWORD, false).await?;
        self.login(USER_EMAIL, PASSWORD).await
    }

    pub async fn create_category(&self, token: &str, name: &str) -> Result<i64> {
        let res = self
            .post("/admin/categories")
            .bearer_auth(token)
            .json(&json!({ "name": name, "description": format!("All {}", name) }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create category: {}", res.status());

        let body: Value = res.json().await?;
        body["id"].as_i64().context("category response without id")
    }

    pub async fn create_product(
        &self,
        token: &str,
        category_id: i64,
        name: &str,
        title: &str,
        price: f64,
    ) -> Result<i64> {
        let res = self
            .post("/admin/products")
            .bearer_auth(token)
            .json(&json!({
                "name": name,
                "title": title,
                "price": price,
                "category_id": category_id,
            }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create product: {}", res.status());

        let body: Value = res.json().await?;
        body["id"].as_i64().context("product response without id")
    }
}
