//! Remote collaborators of the form.

pub mod rest;

use async_trait::async_trait;

use crate::dtos::ProductPayload;
use crate::error::AppResult;
use crate::models::{CategoryOption, ProductRecord};

pub use rest::HttpCatalogClient;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_product(&self, id: i64) -> AppResult<ProductRecord>;
    async fn create_product(&self, payload: &ProductPayload) -> AppResult<ProductRecord>;
    async fn update_product(&self, id: i64, payload: &ProductPayload) -> AppResult<ProductRecord>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list_categories(&self) -> AppResult<Vec<CategoryOption>>;
}
