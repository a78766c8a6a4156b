//! Recipe search and filter orchestration over TheMealDB.
//!
//! A [`Session`] turns free-text input and at most one active filter into
//! exactly one current list request. Text is debounced, and responses that
//! arrive after a newer request was issued are discarded. The async
//! [`spawn_session`] driver wires a session to a [`RecipeApi`] and publishes a
//! [`SessionView`] to whatever renders it.
//!
//! # Example
//! ```no_run
//! # use std::sync::Arc;
//! # use quickbite::{spawn_session, AppConfig, FilterDimension, MealDbClient};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let api = Arc::new(MealDbClient::new(&config)?);
//! let session = spawn_session(&config, api);
//!
//! session.toggle_filter(FilterDimension::Cuisine, "Japanese");
//! let mut view = session.subscribe();
//! view.changed().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod debounce;
pub mod detail;
pub mod driver;
pub mod error;
pub mod filters;
pub mod model;
pub mod orchestrator;
pub mod query;
pub mod session;

pub use api::{MealDbClient, RecipeApi};
pub use config::AppConfig;
pub use debounce::Debouncer;
pub use detail::{DetailFetcher, DetailTicket, DetailView};
pub use driver::{spawn_session, SessionEvent, SessionHandle};
pub use error::QuickBiteError;
pub use filters::{FilterDimension, FilterSelection};
pub use model::{DietaryType, Ingredient, RecipeDetail, RecipeSummary};
pub use orchestrator::{FetchOrchestrator, ListTicket, RequestState, FETCH_FAILED_MESSAGE};
pub use query::{build_query, QueryDescriptor, QueryInputs};
pub use session::{Session, SessionView};

/// Run one list query outside a session and return the state it resolves to.
///
/// The excluded-title rule and error mapping are the same as in a session.
pub async fn fetch_list(
    api: &dyn RecipeApi,
    config: &AppConfig,
    query: QueryDescriptor,
) -> RequestState {
    let mut orchestrator = FetchOrchestrator::new(config.excluded_title.clone());
    let ticket = orchestrator.issue(query);
    let outcome = api.list(&ticket.query).await;
    orchestrator.resolve(ticket.seq, outcome);
    orchestrator.state().clone()
}

/// Look up one recipe outside a session. Failures come back as `NotFound`.
pub async fn fetch_detail(api: &dyn RecipeApi, id: &str) -> DetailView {
    let mut fetcher = DetailFetcher::new();
    let ticket = fetcher.open(id);
    let outcome = api.lookup(&ticket.id).await;
    fetcher.resolve(ticket.seq, outcome);
    fetcher.view().clone()
}
