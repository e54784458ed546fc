// src/dtos/product.rs
use serde::{Deserialize, Serialize};

/// Body of the create and update calls. The service expects camelCase for the
/// category and activity fields while the record it returns uses snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub quantity: i64,
    #[serde(rename = "categoryId")]
    pub category_id: i64,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}
