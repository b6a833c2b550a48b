//! # Bed Commands
//!
//! ## Bed Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   bed-add ──► ┌───────────┐   bed-toggle   ┌───────────┐               │
//! │               │ available │ ◄────────────► │ occupied  │               │
//! │               └───────────┘                └───────────┘               │
//! │                     ▲                                                   │
//! │                     │ bed-release                                       │
//! │               ┌─────┴─────┐                                             │
//! │               │ cleaning  │  blocked                                    │
//! │               └───────────┘                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use medmap_core::draft::NewBed;
use medmap_core::status::BedStatus;
use medmap_core::{Action, Bed, Facet, Outcome, Store};

use super::{filter_state, list, tag_selection, Listing};
use crate::error::ApiError;
use crate::state::StoreState;

/// Lists beds, narrowed by ward, status and search text.
pub fn list_beds(
    store: &StoreState,
    ward: Option<&str>,
    status: Option<&str>,
    query: Option<&str>,
) -> Result<Listing<Bed>, ApiError> {
    debug!(?ward, ?status, ?query, "list_beds command");
    let status = tag_selection::<BedStatus>(status)?;
    let filter = filter_state(query, &[(Facet::Ward, ward), (Facet::Status, status)])?;
    list(store, Store::beds, &filter)
}

/// Flips a bed between available and occupied.
pub fn toggle_bed(store: &StoreState, id: &str) -> Result<Outcome, ApiError> {
    debug!(id, "toggle_bed command");
    store.apply(Action::ToggleBed { id: id.to_string() })
}

/// Returns a cleaning or blocked bed to service.
pub fn release_bed(store: &StoreState, id: &str) -> Result<Outcome, ApiError> {
    debug!(id, "release_bed command");
    store.apply(Action::ReleaseBed { id: id.to_string() })
}

pub fn add_bed(store: &StoreState, draft: NewBed) -> Result<Outcome, ApiError> {
    debug!(name = %draft.name, ward = %draft.ward, "add_bed command");
    store.apply(Action::AddBed(draft))
}
