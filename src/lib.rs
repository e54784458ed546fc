//! Create/edit form for catalog products, backed by remote product and
//! category services.

pub mod config;
pub mod dtos;
pub mod error;
pub mod form;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use handlers::{Phase, ProductForm};
pub use state::AppState;
