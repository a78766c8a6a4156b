use crate::config::AppConfig;
use crate::detail::{DetailFetcher, DetailTicket, DetailView};
use crate::error::QuickBiteError;
use crate::filters::{FilterDimension, FilterSelection};
use crate::model::{RecipeDetail, RecipeSummary};
use crate::orchestrator::{FetchOrchestrator, ListTicket, RequestState};
use crate::query::{build_query, QueryInputs};

/// Snapshot handed to the rendering layer after every transition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    pub search_text: String,
    pub filters: FilterSelection,
    pub list: RequestState,
    pub detail: DetailView,
}

/// All state of one browsing session.
///
/// Performs no I/O: operations that need a network call return a ticket, and
/// the caller reports the outcome back with the ticket's sequence number.
#[derive(Debug)]
pub struct Session {
    search_text: String,
    debounced_text: String,
    filters: FilterSelection,
    list: FetchOrchestrator,
    detail: DetailFetcher,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            search_text: String::new(),
            debounced_text: String::new(),
            filters: FilterSelection::new(),
            list: FetchOrchestrator::new(config.excluded_title.clone()),
            detail: DetailFetcher::new(),
        }
    }

    /// Initial listing request.
    pub fn start(&mut self) -> ListTicket {
        self.refresh()
    }

    /// Record raw search text as typed.
    ///
    /// Non-empty text clears any active filter; that change alone re-runs the
    /// list query. The text itself only counts once it has been debounced.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> Option<ListTicket> {
        self.search_text = text.into();
        if !self.search_text.is_empty() && self.filters.clear() {
            Some(self.refresh())
        } else {
            None
        }
    }

    /// Accept a value that survived the debounce window.
    pub fn apply_debounced_text(&mut self, text: impl Into<String>) -> Option<ListTicket> {
        let text = text.into();
        if text == self.debounced_text {
            return None;
        }
        self.debounced_text = text;
        Some(self.refresh())
    }

    pub fn toggle_filter(&mut self, dimension: FilterDimension, label: impl Into<String>) -> ListTicket {
        self.filters.select(dimension, label);
        self.refresh()
    }

    pub fn resolve_list(
        &mut self,
        seq: u64,
        outcome: Result<Vec<RecipeSummary>, QuickBiteError>,
    ) -> bool {
        self.list.resolve(seq, outcome)
    }

    pub fn select_recipe(&mut self, id: impl Into<String>) -> DetailTicket {
        self.detail.open(id)
    }

    pub fn resolve_detail(
        &mut self,
        seq: u64,
        outcome: Result<Option<RecipeDetail>, QuickBiteError>,
    ) -> bool {
        self.detail.resolve(seq, outcome)
    }

    pub fn close_detail(&mut self) {
        self.detail.close();
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    pub fn list_state(&self) -> &RequestState {
        self.list.state()
    }

    pub fn detail_view(&self) -> &DetailView {
        self.detail.view()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            search_text: self.search_text.clone(),
            filters: self.filters.clone(),
            list: self.list.state().clone(),
            detail: self.detail.view().clone(),
        }
    }

    fn refresh(&mut self) -> ListTicket {
        let query = build_query(QueryInputs::new(&self.filters, &self.debounced_text));
        self.list.issue(query)
    }
}
