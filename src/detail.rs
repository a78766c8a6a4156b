use log::{debug, warn};

use crate::error::QuickBiteError;
use crate::model::RecipeDetail;

/// State of the recipe detail view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailView {
    #[default]
    Closed,
    Loading,
    Loaded(RecipeDetail),
    NotFound,
}

impl DetailView {
    pub fn is_loading(&self) -> bool {
        matches!(self, DetailView::Loading)
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, DetailView::Closed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    pub seq: u64,
    pub id: String,
}

/// On-demand lookup of a single recipe, independent of the list view.
///
/// Uses the same "last issued wins" rule as the list: a lookup that has been
/// superseded by a newer one, or by closing the view, is ignored.
#[derive(Debug, Default)]
pub struct DetailFetcher {
    view: DetailView,
    latest_seq: u64,
}

impl DetailFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &DetailView {
        &self.view
    }

    pub fn open(&mut self, id: impl Into<String>) -> DetailTicket {
        self.latest_seq += 1;
        self.view = DetailView::Loading;
        let id = id.into();
        debug!("Issued lookup #{} for recipe {}", self.latest_seq, id);

        DetailTicket {
            seq: self.latest_seq,
            id,
        }
    }

    /// Apply a lookup outcome. Errors are treated as "not found".
    pub fn resolve(
        &mut self,
        seq: u64,
        outcome: Result<Option<RecipeDetail>, QuickBiteError>,
    ) -> bool {
        if seq != self.latest_seq || self.view == DetailView::Closed {
            debug!("Discarding stale lookup #{}", seq);
            return false;
        }

        self.view = match outcome {
            Ok(Some(detail)) => DetailView::Loaded(detail),
            Ok(None) => DetailView::NotFound,
            Err(e) => {
                warn!("Failed to fetch recipe details: {}", e);
                DetailView::NotFound
            }
        };
        true
    }

    /// Close the view; any lookup still in flight is invalidated.
    pub fn close(&mut self) {
        self.latest_seq += 1;
        self.view = DetailView::Closed;
    }
}
