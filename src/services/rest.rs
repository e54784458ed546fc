// src/services/rest.rs
use std::time::Duration;

use async_trait::async_trait;
use http::StatusCode;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::dtos::ProductPayload;
use crate::error::{AppError, AppResult};
use crate::models::{CategoryOption, ProductRecord};

use super::{CategoryRepository, ProductRepository};

/// Error bodies the catalog service may send back.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "message")]
    error: String,
}

/// REST client for the product and category endpoints.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = Self::new(config.api_base_url.clone(), config.request_timeout)?;
        Ok(match &config.api_token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = self.authorize(request).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    debug!(%status, %message, "Catalog service returned an error");

    if status == StatusCode::NOT_FOUND {
        return Err(AppError::not_found(if message.is_empty() {
            "Resource not found".to_string()
        } else {
            message
        }));
    }
    Err(AppError::remote(status, message))
}

#[async_trait]
impl ProductRepository for HttpCatalogClient {
    #[instrument(skip(self))]
    async fn get_product(&self, id: i64) -> AppResult<ProductRecord> {
        self.send(self.client.get(self.url(&format!("/api/products/{id}"))))
            .await
    }

    #[instrument(skip(self, payload))]
    async fn create_product(&self, payload: &ProductPayload) -> AppResult<ProductRecord> {
        self.send(self.client.post(self.url("/api/products")).json(payload))
            .await
    }

    #[instrument(skip(self, payload))]
    async fn update_product(&self, id: i64, payload: &ProductPayload) -> AppResult<ProductRecord> {
        self.send(
            self.client
                .put(self.url(&format!("/api/products/{id}")))
                .json(payload),
        )
        .await
    }
}

#[async_trait]
impl CategoryRepository for HttpCatalogClient {
    #[instrument(skip(self))]
    async fn list_categories(&self) -> AppResult<Vec<CategoryOption>> {
        self.send(self.client.get(self.url("/api/categories"))).await
    }
}
