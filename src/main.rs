// src/main.rs
use std::process::ExitCode;

use dotenvy::dotenv;
use tokio::sync::watch;
use tracing_subscriber::fmt::init as tracing_init;

use product_form::form::{apply_field_inputs, read_field_inputs};
use product_form::routes::{RouteParams, ID_PARAM};
use product_form::{AppError, AppState, Config, Phase, ProductForm};

/// Runs one headless form session:
///
/// `product-form [ID] [--cancel] < fields.json`
///
/// With an ID the stored product is loaded first and the JSON fields are
/// applied on top of it. The JSON object is keyed by form field name.
#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_init();

    // Load environment variables
    dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    let app_state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build catalog client");
            return ExitCode::FAILURE;
        }
    };

    let mut cancel = false;
    let mut params = RouteParams::new();
    for arg in std::env::args().skip(1) {
        if arg == "--cancel" {
            cancel = true;
        } else {
            params.insert(ID_PARAM, arg);
        }
    }

    let (_route_tx, route_rx) = watch::channel(params);
    let mut form = ProductForm::new(app_state, route_rx);
    form.start().await;
    tracing::info!(
        mode = %form.mode(),
        categories = form.categories().len(),
        "Form ready"
    );

    if cancel {
        form.cancel();
        return ExitCode::SUCCESS;
    }
    if let Phase::LoadFailed { id, reason } = form.phase() {
        tracing::error!(id, %reason, "Cannot edit product");
        return ExitCode::FAILURE;
    }

    let applied = match read_field_inputs(tokio::io::stdin()).await {
        Ok(inputs) => apply_field_inputs(form.form_mut(), inputs),
        Err(e) => Err(e),
    };
    if let Err(e) = applied {
        tracing::error!(error = %e, "Invalid field input");
        return ExitCode::FAILURE;
    }

    match form.submit().await {
        Ok(record) => {
            tracing::info!(id = record.id, name = %record.name, "Saved");
            ExitCode::SUCCESS
        }
        Err(AppError::Validation(errors)) => {
            for (field, error) in errors.iter() {
                tracing::error!(%field, "{error}");
            }
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!(error = %e, "Save failed");
            ExitCode::FAILURE
        }
    }
}
