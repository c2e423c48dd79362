//! Decides which universities the landing view shows, given the catalog and
//! the two independent signals (recommendation and search).

use crate::domain::model::{University, UniversityId};
use serde::Serialize;

pub const SEARCH_RESULTS_LABEL: &str = "Search Results";
pub const RECOMMENDED_LABEL: &str = "Your Recommended University";
pub const ALL_CATALOG_LABEL: &str = "Explore All Universities";
pub const NO_RESULTS_MESSAGE: &str =
    "No universities found. Please try a different search or recommendation.";

/// Outcome of the last search, if any.
///
/// `Active(vec![])` is a search that ran and matched nothing. That is not
/// the same as `Inactive`, which means no search is in effect.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchSignal {
    #[default]
    Inactive,
    Active(Vec<University>),
}

impl SearchSignal {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "university_id", rename_all = "snake_case")]
pub enum DisplayMode {
    AllCatalog,
    Recommended(UniversityId),
    SearchResults,
}

impl DisplayMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AllCatalog => ALL_CATALOG_LABEL,
            Self::Recommended(_) => RECOMMENDED_LABEL,
            Self::SearchResults => SEARCH_RESULTS_LABEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState<'a> {
    pub mode: DisplayMode,
    pub universities: Vec<&'a University>,
}

impl DisplayState<'_> {
    pub fn label(&self) -> &'static str {
        self.mode.label()
    }

    pub fn is_empty(&self) -> bool {
        self.universities.is_empty()
    }

    /// Whether `university` is the recommended one and should be highlighted.
    pub fn is_highlighted(&self, university: &University) -> bool {
        matches!(&self.mode, DisplayMode::Recommended(id) if *id == university.university_id)
    }
}

/// Active search wins over a recommendation, which wins over the catalog.
/// A recommended id missing from the catalog yields an empty list.
pub fn resolve<'a>(
    catalog: &'a [University],
    recommended: Option<&UniversityId>,
    search: &'a SearchSignal,
) -> DisplayState<'a> {
    if let SearchSignal::Active(results) = search {
        return DisplayState {
            mode: DisplayMode::SearchResults,
            universities: results.iter().collect(),
        };
    }

    match recommended {
        Some(id) => DisplayState {
            mode: DisplayMode::Recommended(id.clone()),
            universities: catalog.iter().filter(|u| u.university_id == *id).collect(),
        },
        None => DisplayState {
            mode: DisplayMode::AllCatalog,
            universities: catalog.iter().collect(),
        },
    }
}
