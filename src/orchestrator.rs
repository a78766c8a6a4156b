use log::{debug, warn};

use crate::error::QuickBiteError;
use crate::model::RecipeSummary;
use crate::query::QueryDescriptor;

/// Message shown for any list failure. Transport and payload errors are not
/// distinguished for the user.
pub const FETCH_FAILED_MESSAGE: &str = "Could not fetch recipes. Please try again later.";

/// What the list view should show
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(Vec<RecipeSummary>),
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn recipes(&self) -> &[RecipeSummary] {
        match self {
            RequestState::Success(recipes) => recipes,
            _ => &[],
        }
    }
}

/// A list request that has been issued and awaits resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTicket {
    pub seq: u64,
    pub query: QueryDescriptor,
}

/// Tracks list requests and decides which resolution may update the view.
///
/// Each issued query gets the next sequence number; only the resolution
/// carrying the latest number is applied, so a slow older response can never
/// overwrite a newer one.
#[derive(Debug)]
pub struct FetchOrchestrator {
    state: RequestState,
    latest_seq: u64,
    last_query: Option<QueryDescriptor>,
    excluded_title: String,
}

impl FetchOrchestrator {
    pub fn new(excluded_title: impl Into<String>) -> Self {
        Self {
            state: RequestState::Idle,
            latest_seq: 0,
            last_query: None,
            excluded_title: excluded_title.into(),
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn last_query(&self) -> Option<&QueryDescriptor> {
        self.last_query.as_ref()
    }

    /// Move to `Loading` for `query` and hand back the ticket to resolve later.
    pub fn issue(&mut self, query: QueryDescriptor) -> ListTicket {
        self.latest_seq += 1;
        self.state = RequestState::Loading;
        self.last_query = Some(query.clone());
        debug!("Issued list request #{}: {:?}", self.latest_seq, query);

        ListTicket {
            seq: self.latest_seq,
            query,
        }
    }

    /// Apply the outcome of request `seq`.
    ///
    /// Returns `false` (and leaves the state untouched) when a newer request
    /// has been issued since.
    pub fn resolve(
        &mut self,
        seq: u64,
        outcome: Result<Vec<RecipeSummary>, QuickBiteError>,
    ) -> bool {
        if seq != self.latest_seq {
            debug!(
                "Discarding stale list response #{} (latest is #{})",
                seq, self.latest_seq
            );
            return false;
        }

        self.state = match outcome {
            Ok(recipes) => RequestState::Success(self.exclude_broken(recipes)),
            Err(e) => {
                warn!("List request #{} failed: {}", seq, e);
                RequestState::Failed(FETCH_FAILED_MESSAGE.to_string())
            }
        };
        true
    }

    fn exclude_broken(&self, recipes: Vec<RecipeSummary>) -> Vec<RecipeSummary> {
        recipes
            .into_iter()
            .filter(|recipe| recipe.name != self.excluded_title)
            .collect()
    }
}
