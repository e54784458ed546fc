// src/routes/mod.rs
//
// Navigation context of the form: the route parameters it is opened with and
// the place it goes back to.
use std::collections::HashMap;
use std::fmt;

use tracing::{info, warn};

/// Default path of the product listing view.
pub const PRODUCT_LIST_PATH: &str = "/admin/products";

/// Route parameter naming the product being edited.
pub const ID_PARAM: &str = "id";

/// Key/value parameters of the current route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(HashMap<String, String>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The `id` parameter, if present and a positive integer.
    pub fn product_id(&self) -> Option<i64> {
        let raw = self.get(ID_PARAM)?;
        match raw.trim().parse::<i64>() {
            Ok(id) if id > 0 => Some(id),
            _ => {
                warn!(id = raw, "Ignoring invalid product id in route");
                None
            }
        }
    }
}

/// Whether the form creates a new product or edits a stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit { id: i64 },
}

impl Mode {
    pub fn from_params(params: &RouteParams) -> Self {
        match params.product_id() {
            Some(id) => Mode::Edit { id },
            None => Mode::Create,
        }
    }

    pub fn product_id(self) -> Option<i64> {
        match self {
            Mode::Create => None,
            Mode::Edit { id } => Some(id),
        }
    }

    pub fn is_edit(self) -> bool {
        matches!(self, Mode::Edit { .. })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Create => f.write_str("create"),
            Mode::Edit { id } => write!(f, "edit({id})"),
        }
    }
}

/// Hosting navigation system. Fire and forget.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, path: &str);
}

/// Navigator for headless sessions: records the move in the log.
#[derive(Debug, Clone, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate_to(&self, path: &str) {
        info!(path, "Navigating");
    }
}
