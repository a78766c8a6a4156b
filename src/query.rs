use crate::filters::{FilterDimension, FilterSelection};

/// The one list request derived from the current search text and filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryDescriptor {
    /// `filter.php?c=<label>`
    Category(String),
    /// `filter.php?a=<label>`
    Cuisine(String),
    /// `search.php?s=<text>`
    Search(String),
    /// `search.php?s=` - the default listing
    EmptySearch,
}

impl QueryDescriptor {
    /// Endpoint path (relative to the API base URL) and its single query parameter
    pub fn endpoint(&self) -> (&'static str, &'static str, &str) {
        match self {
            QueryDescriptor::Category(label) => ("filter.php", "c", label.as_str()),
            QueryDescriptor::Cuisine(label) => ("filter.php", "a", label.as_str()),
            QueryDescriptor::Search(text) => ("search.php", "s", text.as_str()),
            QueryDescriptor::EmptySearch => ("search.php", "s", ""),
        }
    }
}

/// Raw inputs to [`build_query`].
///
/// Kept separate from [`FilterSelection`] so precedence can be checked with
/// inputs the selection itself would never hold at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryInputs<'a> {
    pub category: Option<&'a str>,
    pub cuisine: Option<&'a str>,
    pub search: &'a str,
}

impl<'a> QueryInputs<'a> {
    pub fn new(filters: &'a FilterSelection, search: &'a str) -> Self {
        Self {
            category: filters.label_for(FilterDimension::Category),
            cuisine: filters.label_for(FilterDimension::Cuisine),
            search,
        }
    }
}

/// Category beats cuisine, cuisine beats search text, and with nothing set
/// the default listing is requested.
pub fn build_query(inputs: QueryInputs<'_>) -> QueryDescriptor {
    if let Some(category) = inputs.category {
        QueryDescriptor::Category(category.to_string())
    } else if let Some(cuisine) = inputs.cuisine {
        QueryDescriptor::Cuisine(cuisine.to_string())
    } else if !inputs.search.is_empty() {
        QueryDescriptor::Search(inputs.search.to_string())
    } else {
        QueryDescriptor::EmptySearch
    }
}
