use std::fmt;
use std::str::FromStr;

use crate::error::QuickBiteError;

/// A dimension the user can constrain results by.
///
/// Only `Category` and `Cuisine` reach the network query; `Mood` and `Time`
/// are selectable but have no API counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    Mood,
    Time,
    Category,
    Cuisine,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 4] = [
        FilterDimension::Mood,
        FilterDimension::Time,
        FilterDimension::Category,
        FilterDimension::Cuisine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterDimension::Mood => "Mood",
            FilterDimension::Time => "Time",
            FilterDimension::Category => "Category",
            FilterDimension::Cuisine => "Cuisine",
        }
    }

    /// Whether selecting a label in this dimension changes the API request
    pub fn affects_query(&self) -> bool {
        matches!(self, FilterDimension::Category | FilterDimension::Cuisine)
    }

    /// The fixed set of labels offered for this dimension
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            FilterDimension::Mood => &["Comfort Food", "Quick & Easy", "Healthy", "Fancy"],
            FilterDimension::Time => &["< 15 min", "< 30 min", "< 1 hour", "1 hour+"],
            FilterDimension::Category => &[
                "Vegetarian",
                "Seafood",
                "Dessert",
                "Pasta",
                "Chicken",
                "Breakfast",
            ],
            FilterDimension::Cuisine => {
                &["Italian", "Japanese", "Indian", "Chinese", "French", "Mexican"]
            }
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterDimension {
    type Err = QuickBiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterDimension::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                QuickBiteError::InvalidArgument(format!(
                    "Unknown filter dimension '{}' (expected Mood, Time, Category or Cuisine)",
                    s
                ))
            })
    }
}

/// The active filter, if any.
///
/// Holds at most one (dimension, label) pair across all dimensions: selecting
/// anything replaces the previous selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    active: Option<(FilterDimension, String)>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `(dimension, label)`.
    ///
    /// Selecting the currently active pair clears the selection; any other pair
    /// replaces it.
    pub fn select(&mut self, dimension: FilterDimension, label: impl Into<String>) {
        let label = label.into();
        if self.is_active(dimension, &label) {
            self.active = None;
        } else {
            self.active = Some((dimension, label));
        }
    }

    /// Drop the selection. Returns `true` if something was active.
    pub fn clear(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn is_active(&self, dimension: FilterDimension, label: &str) -> bool {
        matches!(&self.active, Some((d, l)) if *d == dimension && l == label)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_none()
    }

    /// Label selected for `dimension`, if that dimension is the active one
    pub fn label_for(&self, dimension: FilterDimension) -> Option<&str> {
        match &self.active {
            Some((d, label)) if *d == dimension => Some(label.as_str()),
            _ => None,
        }
    }

    pub fn active(&self) -> Option<(FilterDimension, &str)> {
        self.active.as_ref().map(|(d, l)| (*d, l.as_str()))
    }
}
