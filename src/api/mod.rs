mod mealdb;

pub use mealdb::MealDbClient;

use crate::error::QuickBiteError;
use crate::model::{RecipeDetail, RecipeSummary};
use crate::query::QueryDescriptor;
use async_trait::async_trait;

/// Network boundary of the session: the remote recipe API.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Run a search or filter request. A `null` result list is returned as empty.
    async fn list(&self, query: &QueryDescriptor) -> Result<Vec<RecipeSummary>, QuickBiteError>;

    /// Look up one recipe by id. `Ok(None)` when the id is unknown.
    async fn lookup(&self, id: &str) -> Result<Option<RecipeDetail>, QuickBiteError>;
}
