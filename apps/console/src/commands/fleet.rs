//! # Ambulance Commands
//!
//! ```text
//!            ambulance-dispatch
//!  ┌────────┐ ───────────────► ┌────────────┐ ──► ┌─────────┐
//!  │ onduty │                  │ dispatched │     │ enroute │
//!  └────────┘ ◄─────────────────────────────────── └─────────┘
//!     ▲  │
//!     │  ▼
//!  ┌────────┐
//!  │  off   │
//!  └────────┘
//! ```

use tracing::debug;

use medmap_core::status::{AmbulanceStatus, StatusTag};
use medmap_core::{Action, Ambulance, Facet, Outcome, Store};

use super::{filter_state, list, tag_selection, Listing};
use crate::error::ApiError;
use crate::state::StoreState;

pub fn list_ambulances(
    store: &StoreState,
    status: Option<&str>,
    query: Option<&str>,
) -> Result<Listing<Ambulance>, ApiError> {
    debug!(?status, ?query, "list_ambulances command");
    let status = tag_selection::<AmbulanceStatus>(status)?;
    let filter = filter_state(query, &[(Facet::Status, status)])?;
    list(store, Store::ambulances, &filter)
}

pub fn dispatch_ambulance(store: &StoreState, id: &str) -> Result<Outcome, ApiError> {
    debug!(id, "dispatch_ambulance command");
    store.apply(Action::DispatchAmbulance { id: id.to_string() })
}

/// Moves an ambulance to `status`, parsed from its wire spelling.
pub fn set_ambulance_status(store: &StoreState, id: &str, status: &str) -> Result<Outcome, ApiError> {
    debug!(id, status, "set_ambulance_status command");
    let status = AmbulanceStatus::parse_tag(status)?;
    store.apply(Action::SetAmbulanceStatus {
        id: id.to_string(),
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_search_vehicle_id() {
        let store = StoreState::seeded();
        let listing = list_ambulances(&store, None, Some("amb-00")).unwrap();
        assert_eq!(listing.visible, 6);
        assert!(listing
            .items
            .iter()
            .all(|a| a.vehicle_id.to_lowercase().contains("amb-00")));

        let listing = list_ambulances(&store, Some("onduty"), Some("AMB-004")).unwrap();
        assert_eq!(listing.visible, 1);
    }

    #[test]
    fn test_full_trip() {
        let store = StoreState::seeded();
        dispatch_ambulance(&store, "4").unwrap();
        set_ambulance_status(&store, "4", "enroute").unwrap();
        match set_ambulance_status(&store, "4", "onduty").unwrap() {
            Outcome::Ambulance(a) => assert_eq!(a.status, AmbulanceStatus::OnDuty),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_bad_status_and_refusal() {
        let store = StoreState::seeded();
        let err = set_ambulance_status(&store, "1", "flying").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        // en route cannot be dispatched again
        let err = dispatch_ambulance(&store, "2").unwrap_err();
        assert_eq!(err.code, ErrorCode::TransitionRefused);
    }
}
