#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::StatusCode;
use tokio::sync::watch;

use product_form::dtos::ProductPayload;
use product_form::models::{CategoryOption, ProductRecord};
use product_form::routes::{Navigator, RouteParams};
use product_form::services::{CategoryRepository, ProductRepository};
use product_form::{AppError, AppResult, AppState, ProductForm};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListCategories,
    GetProduct(i64),
    Create(ProductPayload),
    Update(i64, ProductPayload),
}

/// In-memory product and category services that record every call.
#[derive(Default)]
pub struct FakeCatalog {
    calls: Mutex<Vec<Call>>,
    product: Mutex<Option<ProductRecord>>,
    categories: Mutex<Option<Vec<CategoryOption>>>,
    fail_save: AtomicBool,
    hang_get: AtomicBool,
    hang_save: AtomicBool,
}

impl FakeCatalog {
    pub fn new() -> Arc<Self> {
        let catalog = Self::default();
        *catalog.categories.lock().unwrap() = Some(vec![
            CategoryOption { id: 1, name: "Tools".into() },
            CategoryOption { id: 3, name: "Furniture".into() },
        ]);
        Arc::new(catalog)
    }

    pub fn with_product(self: Arc<Self>, record: ProductRecord) -> Arc<Self> {
        self.set_product(Some(record));
        self
    }

    pub fn set_product(&self, record: Option<ProductRecord>) {
        *self.product.lock().unwrap() = record;
    }

    pub fn set_categories(&self, categories: Option<Vec<CategoryOption>>) {
        *self.categories.lock().unwrap() = categories;
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }

    pub fn hang_gets(&self, hang: bool) {
        self.hang_get.store(hang, Ordering::SeqCst);
    }

    pub fn hang_saves(&self, hang: bool) {
        self.hang_save.store(hang, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than the category listing.
    pub fn product_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| *call != Call::ListCategories)
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn saved(&self, id: i64, payload: &ProductPayload) -> AppResult<ProductRecord> {
        if self.hang_save.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(AppError::remote(StatusCode::INTERNAL_SERVER_ERROR, "save failed"));
        }
        Ok(ProductRecord {
            id,
            name: payload.name.clone(),
            description: payload.description.clone(),
            price: payload.price,
            is_active: payload.is_active,
            image_url: payload.image_url.clone(),
            quantity: payload.quantity,
            category_id: payload.category_id,
            created_at: None,
        })
    }
}

#[async_trait]
impl ProductRepository for FakeCatalog {
    async fn get_product(&self, id: i64) -> AppResult<ProductRecord> {
        self.record(Call::GetProduct(id));
        if self.hang_get.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.product
            .lock()
            .unwrap()
            .clone()
            .filter(|record| record.id == id)
            .ok_or_else(|| AppError::not_found("Product not found"))
    }

    async fn create_product(&self, payload: &ProductPayload) -> AppResult<ProductRecord> {
        self.record(Call::Create(payload.clone()));
        self.saved(100, payload).await
    }

    async fn update_product(&self, id: i64, payload: &ProductPayload) -> AppResult<ProductRecord> {
        self.record(Call::Update(id, payload.clone()));
        self.saved(id, payload).await
    }
}

#[async_trait]
impl CategoryRepository for FakeCatalog {
    async fn list_categories(&self) -> AppResult<Vec<CategoryOption>> {
        self.record(Call::ListCategories);
        self.categories
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AppError::remote(StatusCode::SERVICE_UNAVAILABLE, "categories down"))
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

pub fn chair() -> ProductRecord {
    ProductRecord {
        id: 7,
        name: "Chair".into(),
        description: "A sturdy oak chair".into(),
        price: 49.5,
        is_active: false,
        image_url: "https://cdn.example.com/chair.png".into(),
        quantity: 12,
        category_id: 3,
        created_at: None,
    }
}

pub struct Harness {
    pub form: ProductForm,
    pub catalog: Arc<FakeCatalog>,
    pub navigator: Arc<RecordingNavigator>,
    pub route: watch::Sender<RouteParams>,
}

pub fn harness(catalog: Arc<FakeCatalog>, params: RouteParams) -> Harness {
    let navigator = Arc::new(RecordingNavigator::default());
    let state = AppState::new(catalog.clone(), catalog.clone(), navigator.clone());
    let (route, route_rx) = watch::channel(params);
    Harness {
        form: ProductForm::new(state, route_rx),
        catalog,
        navigator,
        route,
    }
}
