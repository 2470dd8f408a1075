//! # Search Models
//!
//! Data shapes for the search flow: ranked results as returned by the
//! service and the outcome state machine that drives the results view.

use serde::Deserialize;

/// A single ranked hit as returned by the service.
///
/// Display order is service order. The service ranks by relevance and
/// the client never re-sorts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResult {
    pub doc_id: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub preview: String,
}

/// Response body of the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// Outcome state machine for the results view.
///
/// Exactly one variant is active at a time. `Loading` is always
/// transient: every submission settles in `Results`, `Empty` or
/// `Failed`, and the surface stays ready for the next submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchOutcome {
    #[default]
    Idle,
    Loading {
        query: String,
    },
    Results {
        query: String,
        hits: Vec<SearchResult>,
    },
    Empty {
        query: String,
    },
    Failed {
        reason: String,
    },
}

impl SearchOutcome {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchOutcome::Loading { .. })
    }
}

/// Mutable state of the search surface.
#[derive(Debug, Default)]
pub struct SearchState {
    /// Raw text of the query input control.
    pub input: String,
    /// Current outcome shown in the results area.
    pub outcome: SearchOutcome,
}
