//! # Surgery Commands

use tracing::debug;

use medmap_core::draft::NewSurgery;
use medmap_core::status::{StatusTag, SurgeryPriority, SurgeryStatus};
use medmap_core::{Action, Facet, Outcome, Store, Surgery};

use super::{filter_state, list, tag_selection, Listing};
use crate::error::ApiError;
use crate::state::StoreState;

pub fn list_surgeries(
    store: &StoreState,
    status: Option<&str>,
    priority: Option<&str>,
    query: Option<&str>,
) -> Result<Listing<Surgery>, ApiError> {
    debug!(?status, ?priority, ?query, "list_surgeries command");
    let status = tag_selection::<SurgeryStatus>(status)?;
    let priority = tag_selection::<SurgeryPriority>(priority)?;
    let filter = filter_state(
        query,
        &[(Facet::Status, status), (Facet::Priority, priority)],
    )?;
    list(store, Store::surgeries, &filter)
}

/// Books a surgery; it starts out scheduled.
pub fn add_surgery(store: &StoreState, draft: NewSurgery) -> Result<Outcome, ApiError> {
    debug!(procedure = %draft.procedure, surgeon = %draft.surgeon, "add_surgery command");
    store.apply(Action::AddSurgery(draft))
}

pub fn set_surgery_status(store: &StoreState, id: &str, status: &str) -> Result<Outcome, ApiError> {
    debug!(id, status, "set_surgery_status command");
    let status = SurgeryStatus::parse_tag(status)?;
    store.apply(Action::SetSurgeryStatus {
        id: id.to_string(),
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn draft(time: &str) -> NewSurgery {
        NewSurgery {
            patient_name: "Anna Lee".to_string(),
            procedure: "Hernia Repair".to_string(),
            surgeon: "Dr. Brown".to_string(),
            scheduled_time: time.to_string(),
            room: "OR-2".to_string(),
            ..NewSurgery::default()
        }
    }

    #[test]
    fn test_add_then_start() {
        let store = StoreState::seeded();
        let outcome = add_surgery(&store, draft("2024-01-16 08:00")).unwrap();
        let Outcome::Surgery(surgery) = outcome else {
            panic!("unexpected outcome");
        };
        assert_eq!(surgery.id, "S004");

        set_surgery_status(&store, "S004", "in-progress").unwrap();
        let listing = list_surgeries(&store, Some("in-progress"), None, None).unwrap();
        assert_eq!(listing.visible, 2);
    }

    #[test]
    fn test_bad_time_is_validation() {
        let store = StoreState::seeded();
        let err = add_surgery(&store, draft("tomorrow morning")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(list_surgeries(&store, None, None, None).unwrap().total, 3);
    }

    #[test]
    fn test_filter_priority() {
        let store = StoreState::seeded();
        let listing = list_surgeries(&store, None, Some("urgent"), None).unwrap();
        assert_eq!(listing.items[0].id, "S003");
    }

    #[test]
    fn test_cancel_in_progress_refused() {
        let store = StoreState::seeded();
        let err = set_surgery_status(&store, "S003", "cancelled").unwrap_err();
        assert_eq!(err.code, ErrorCode::TransitionRefused);
    }
}
