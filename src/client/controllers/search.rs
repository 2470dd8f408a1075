//! # Search Controller
//!
//! Drives the query submission lifecycle: `Idle -> Loading ->
//! {Results | Empty | Failed}`, always returning the surface to a
//! submittable state.

use serde_json::json;

use crate::client::events::{Effect, Flow};
use crate::client::models::{SearchOutcome, SearchResponse, Session, Severity};
use crate::client::services::gateway::SEARCH_ENDPOINT;
use crate::client::services::GatewayResult;

/// Submit the current query input.
///
/// A whitespace-only query never reaches the network: the view resets
/// to idle and an informational notification asks for a query.
pub fn submit(session: &mut Session) -> Vec<Effect> {
    if session.in_flight(Flow::Search) {
        return Vec::new();
    }

    let query = session.search.input.trim().to_string();
    if query.is_empty() {
        session.search.outcome = SearchOutcome::Idle;
        session.enter_home();
        return vec![session.notify("Please enter a search query", Severity::Info)];
    }

    tracing::debug!("submitting search for {query:?}");
    session.search.outcome = SearchOutcome::Loading {
        query: query.clone(),
    };
    session.set_in_flight(Flow::Search, true);

    vec![Effect::Post {
        flow: Flow::Search,
        path: SEARCH_ENDPOINT,
        body: json!({ "query": query }),
    }]
}

/// Apply a settled search request.
///
/// The in-flight flag is cleared and the loading indicator replaced
/// unconditionally, whatever the outcome.
pub fn settle(session: &mut Session, result: GatewayResult) -> Vec<Effect> {
    session.set_in_flight(Flow::Search, false);

    let query = match &session.search.outcome {
        SearchOutcome::Loading { query } => query.clone(),
        _ => session.search.input.trim().to_string(),
    };

    match result {
        Ok(body) => {
            let response: SearchResponse = serde_json::from_value(body).unwrap_or_default();
            if response.results.is_empty() {
                tracing::debug!("search for {query:?} returned no results");
                session.search.outcome = SearchOutcome::Empty { query };
            } else {
                tracing::debug!(
                    "search for {query:?} returned {} results",
                    response.results.len()
                );
                session.search.outcome = SearchOutcome::Results {
                    query,
                    hits: response.results,
                };
            }
            Vec::new()
        }
        Err(error) => {
            let reason = error.user_message("The search request failed");
            session.search.outcome = SearchOutcome::Failed {
                reason: reason.clone(),
            };
            vec![session.notify(reason, Severity::Error)]
        }
    }
}
