use crate::api::RecipeApi;
use crate::config::AppConfig;
use crate::error::QuickBiteError;
use crate::model::{MealsEnvelope, RecipeDetail, RecipeSummary};
use crate::query::QueryDescriptor;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// TheMealDB v1 JSON API client
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    /// Create a client from configuration
    pub fn new(config: &AppConfig) -> Result<Self, QuickBiteError> {
        Self::build(config.api_base_url.clone(), config.timeout())
    }

    /// Create a client against a custom endpoint with the default timeout
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, QuickBiteError> {
        Self::build(base_url.into(), AppConfig::default().timeout())
    }

    fn build(base_url: String, timeout: Duration) -> Result<Self, QuickBiteError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quickbite/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(MealDbClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_meals<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
        value: &str,
    ) -> Result<Vec<T>, QuickBiteError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {}?{}={}", url, key, value);

        let response = self
            .client
            .get(&url)
            .query(&[(key, value)])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let envelope: MealsEnvelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.into_vec())
    }
}

#[async_trait]
impl RecipeApi for MealDbClient {
    async fn list(&self, query: &QueryDescriptor) -> Result<Vec<RecipeSummary>, QuickBiteError> {
        let (path, key, value) = query.endpoint();
        self.get_meals(path, key, value).await
    }

    async fn lookup(&self, id: &str) -> Result<Option<RecipeDetail>, QuickBiteError> {
        let meals: Vec<RecipeDetail> = self.get_meals("lookup.php", "i", id).await?;
        Ok(meals.into_iter().next())
    }
}
