// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppResult;
use crate::routes::{Navigator, TracingNavigator, PRODUCT_LIST_PATH};
use crate::services::{CategoryRepository, HttpCatalogClient, ProductRepository};

/// Collaborators shared by every form session.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub navigator: Arc<dyn Navigator>,
    pub list_path: String,
}

impl AppState {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            products,
            categories,
            navigator,
            list_path: PRODUCT_LIST_PATH.to_string(),
        }
    }

    pub fn with_list_path(mut self, path: impl Into<String>) -> Self {
        self.list_path = path.into();
        self
    }

    /// Wires the HTTP catalog client and a logging navigator.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let catalog = Arc::new(HttpCatalogClient::from_config(config)?);
        Ok(Self::new(catalog.clone(), catalog, Arc::new(TracingNavigator))
            .with_list_path(config.list_path.clone()))
    }
}
