//! # Live Request Commands
//!
//! Incoming transfer requests wait in a queue until an operator accepts or
//! declines them. Either answer takes the request off the queue.

use tracing::debug;

use medmap_core::status::RequestPriority;
use medmap_core::{Action, EmergencyRequest, Facet, Outcome, RequestDecision, Store};

use super::{filter_state, list, tag_selection, Listing};
use crate::error::ApiError;
use crate::state::StoreState;

pub fn list_requests(
    store: &StoreState,
    priority: Option<&str>,
    query: Option<&str>,
) -> Result<Listing<EmergencyRequest>, ApiError> {
    debug!(?priority, ?query, "list_requests command");
    let priority = tag_selection::<RequestPriority>(priority)?;
    let filter = filter_state(query, &[(Facet::Priority, priority)])?;
    list(store, Store::requests, &filter)
}

pub fn accept_request(store: &StoreState, id: &str) -> Result<Outcome, ApiError> {
    resolve_request(store, id, RequestDecision::Accepted)
}

pub fn decline_request(store: &StoreState, id: &str) -> Result<Outcome, ApiError> {
    resolve_request(store, id, RequestDecision::Declined)
}

fn resolve_request(store: &StoreState, id: &str, decision: RequestDecision) -> Result<Outcome, ApiError> {
    debug!(id, ?decision, "resolve_request command");
    store.apply(Action::ResolveRequest {
        id: id.to_string(),
        decision,
    })
}
