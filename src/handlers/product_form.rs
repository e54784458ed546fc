// src/handlers/product_form.rs
//
// Lifecycle of one product form session: start-up loading, route changes,
// submit and cancel.
use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::error::{AppError, AppResult};
use crate::form::FormState;
use crate::models::{CategoryOption, ProductRecord};
use crate::routes::{Mode, RouteParams};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Mode not resolved yet, or the product is being fetched.
    Initializing,
    Ready,
    /// The product to edit could not be fetched. The form holds defaults and
    /// refuses to save until a reload succeeds.
    LoadFailed { id: i64, reason: String },
    Submitting,
    Navigated,
}

pub struct ProductForm {
    state: AppState,
    route: watch::Receiver<RouteParams>,
    shutdown: CancellationToken,
    form: FormState,
    mode: Mode,
    phase: Phase,
    categories: Vec<CategoryOption>,
}

impl ProductForm {
    pub fn new(state: AppState, route: watch::Receiver<RouteParams>) -> Self {
        Self {
            state,
            route,
            shutdown: CancellationToken::new(),
            form: FormState::new(),
            mode: Mode::Create,
            phase: Phase::Initializing,
            categories: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn categories(&self) -> &[CategoryOption] {
        &self.categories
    }

    pub fn load_error(&self) -> Option<&str> {
        match &self.phase {
            Phase::LoadFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Token that aborts every outstanding remote call of this form when
    /// cancelled. Hand it to whoever owns the form's lifetime.
    pub fn teardown_handle(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn initialize_form(&mut self) {
        self.form.reset();
    }

    /// Builds the form, then loads categories while the route is resolved.
    #[instrument(skip(self))]
    pub async fn start(&mut self) {
        self.phase = Phase::Initializing;
        self.initialize_form();

        let params = self.route.borrow_and_update().clone();
        let categories = Arc::clone(&self.state.categories);
        let token = self.shutdown.clone();
        let fetch = async move { cancellable(&token, categories.list_categories()).await };

        let (fetched, ()) = tokio::join!(fetch, self.resolve_route(&params));
        let _ = self.apply_categories(fetched);
    }

    /// Fetches the category options again, replacing the current list on
    /// success.
    #[instrument(skip(self))]
    pub async fn load_categories(&mut self) -> AppResult<usize> {
        let fetched = cancellable(&self.shutdown, self.state.categories.list_categories()).await;
        self.apply_categories(fetched)
    }

    fn apply_categories(&mut self, fetched: AppResult<Vec<CategoryOption>>) -> AppResult<usize> {
        match fetched {
            Ok(categories) => {
                debug!(count = categories.len(), "Loaded categories");
                self.categories = categories;
                Ok(self.categories.len())
            }
            Err(e) => {
                error!(error = %e, kept = self.categories.len(), "Failed to fetch categories");
                Err(e)
            }
        }
    }

    /// Derives the mode from route parameters. A different mode resets the
    /// form and, for edit mode, loads the product.
    #[instrument(skip(self, params))]
    pub async fn resolve_route(&mut self, params: &RouteParams) {
        if self.phase == Phase::Navigated {
            return;
        }
        let mode = Mode::from_params(params);
        if self.phase != Phase::Initializing && mode == self.mode {
            debug!(%mode, "Route changed without changing mode");
            return;
        }
        if self.phase != Phase::Initializing {
            self.initialize_form();
        }

        self.mode = mode;
        info!(%mode, "Resolved form mode");
        match mode {
            Mode::Create => self.phase = Phase::Ready,
            Mode::Edit { id } => {
                let _ = self.load_product(id).await;
            }
        }
    }

    /// Waits for the next route change and re-resolves the mode. Returns
    /// false once the route source is gone or the form is torn down.
    pub async fn route_changed(&mut self) -> bool {
        let changed = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => false,
            changed = self.route.changed() => changed.is_ok(),
        };
        if !changed {
            return false;
        }
        let params = self.route.borrow_and_update().clone();
        self.resolve_route(&params).await;
        true
    }

    #[instrument(skip(self))]
    pub async fn load_product(&mut self, id: i64) -> AppResult<()> {
        // A load abandoned mid-flight leaves nothing trustworthy in the form.
        let phase = PhaseGuard::enter(
            &mut self.phase,
            Phase::Initializing,
            Phase::LoadFailed { id, reason: AppError::Cancelled.to_string() },
        );
        let fetched = cancellable(&self.shutdown, self.state.products.get_product(id)).await;
        match fetched {
            Ok(record) => {
                self.form.patch_from_record(&record);
                phase.settle(Phase::Ready);
                info!(id, name = %record.name, "Loaded product into form");
                Ok(())
            }
            Err(e) => {
                error!(id, error = %e, "Failed to load product; form holds defaults");
                phase.settle(Phase::LoadFailed { id, reason: e.to_string() });
                Err(e)
            }
        }
    }

    /// Retries the product fetch in edit mode.
    pub async fn reload_product(&mut self) -> AppResult<()> {
        match self.mode {
            Mode::Edit { id } if self.phase != Phase::Navigated => self.load_product(id).await,
            Mode::Edit { .. } => Err(AppError::Closed),
            Mode::Create => Err(AppError::invalid_input("no product to reload in create mode")),
        }
    }

    /// Validates and saves the form, then returns to the listing view.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub async fn submit(&mut self) -> AppResult<ProductRecord> {
        self.form.mark_submitted();

        match &self.phase {
            Phase::Ready => {}
            Phase::Initializing => return Err(AppError::NotReady),
            Phase::Submitting => return Err(AppError::SubmitInFlight),
            Phase::Navigated => return Err(AppError::Closed),
            Phase::LoadFailed { id, .. } => {
                warn!(id, "Refusing to save a product that was never loaded");
                return Err(AppError::ProductNotLoaded(*id));
            }
        }

        let payload = match self.form.to_payload() {
            Ok(payload) => payload,
            Err(errors) => {
                warn!(invalid = errors.len(), "Submit blocked by validation: {}", errors);
                return Err(errors.into());
            }
        };

        // Dropping this future mid-save counts as a failed save.
        let phase = PhaseGuard::enter(&mut self.phase, Phase::Submitting, Phase::Ready);
        let products = &self.state.products;
        let saved = match self.mode {
            Mode::Create => cancellable(&self.shutdown, products.create_product(&payload)).await,
            Mode::Edit { id } => {
                cancellable(&self.shutdown, products.update_product(id, &payload)).await
            }
        };
        phase.settle(Phase::Ready);

        match saved {
            Ok(record) => {
                info!(id = record.id, "Product saved");
                self.navigate_to_list();
                Ok(record)
            }
            Err(e) => {
                error!(error = %e, "Failed to save product");
                Err(e)
            }
        }
    }

    /// Leaves the form without saving.
    pub fn cancel(&mut self) {
        info!(mode = %self.mode, "Form cancelled");
        self.navigate_to_list();
    }

    /// Aborts outstanding remote calls without navigating.
    pub fn teardown(&self) {
        self.shutdown.cancel();
    }

    fn navigate_to_list(&mut self) {
        self.shutdown.cancel();
        self.state.navigator.navigate_to(&self.state.list_path);
        self.phase = Phase::Navigated;
    }
}

impl Drop for ProductForm {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Holds the form in a transient phase across an `.await`. If the owning
/// future is dropped before [`PhaseGuard::settle`], the fallback phase is
/// written instead.
struct PhaseGuard<'a> {
    phase: &'a mut Phase,
    fallback: Option<Phase>,
}

impl<'a> PhaseGuard<'a> {
    fn enter(phase: &'a mut Phase, transient: Phase, fallback: Phase) -> Self {
        *phase = transient;
        Self { phase, fallback: Some(fallback) }
    }

    fn settle(mut self, next: Phase) {
        self.fallback = None;
        *self.phase = next;
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        if let Some(fallback) = self.fallback.take() {
            *self.phase = fallback;
        }
    }
}

async fn cancellable<T, F>(token: &CancellationToken, call: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(AppError::Cancelled),
        result = call => result,
    }
}
