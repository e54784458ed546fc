use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product as the catalog service returns it. Only a subset of these fields
/// is editable through the form; `created_at` is managed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub is_active: bool,
    pub image_url: String,
    pub quantity: i64,
    pub category_id: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
