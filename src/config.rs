// src/config.rs
use std::time::Duration;

use crate::error::{AppError, AppResult};
use crate::routes::PRODUCT_LIST_PATH;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    pub list_path: String,
}

impl Config {
    /// Reads configuration from the process environment. Call
    /// `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let request_timeout = match non_empty("REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(AppError::config(format!(
                        "REQUEST_TIMEOUT_SECS must be a positive integer, got '{raw}'"
                    )))
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let api_base_url =
            non_empty("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(AppError::config(format!(
                "API_BASE_URL must start with http:// or https://, got '{api_base_url}'"
            )));
        }

        Ok(Self {
            api_base_url,
            api_token: non_empty("API_TOKEN"),
            request_timeout,
            list_path: non_empty("PRODUCT_LIST_PATH")
                .unwrap_or_else(|| PRODUCT_LIST_PATH.to_string()),
        })
    }
}
