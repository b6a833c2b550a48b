//! # Status Transitions
//!
//! Explicit transition tables for the record kinds whose status the
//! operator can change.
//!
//! ## Tables
//! ```text
//! Bed (toggle)        available ◄──────► occupied
//! Bed (release)       cleaning ──► available
//!                     blocked  ──► available
//!
//! Ambulance           onduty ──► dispatched ──► enroute ──► onduty
//!                     onduty ◄──► off
//!
//! Surgery             scheduled ──► in-progress ──► completed
//!                     scheduled ──► cancelled
//!                     (completed, cancelled: terminal)
//! ```
//!
//! Nothing moves a bed into `cleaning` or `blocked`; those states only
//! come from the seed data.

use crate::error::{CoreError, CoreResult};
use crate::status::{AmbulanceStatus, BedStatus, StatusTag, SurgeryStatus};
use crate::types::RecordKind;

// =============================================================================
// Lifecycle Trait
// =============================================================================

/// A status vocabulary with an enforced transition table.
pub trait Lifecycle: StatusTag {
    /// Whether `self -> to` is an edge of the table. Staying put is not.
    fn allows(self, to: Self) -> bool;

    /// States reachable in one step, in vocabulary order.
    fn next_states(self) -> Vec<Self> {
        Self::ALL.iter().copied().filter(|to| self.allows(*to)).collect()
    }

    /// No outgoing edges.
    fn is_terminal(self) -> bool {
        self.next_states().is_empty()
    }
}

impl Lifecycle for AmbulanceStatus {
    fn allows(self, to: Self) -> bool {
        use AmbulanceStatus::*;
        matches!(
            (self, to),
            (OnDuty, Dispatched)
                | (Dispatched, EnRoute)
                | (EnRoute, OnDuty)
                | (OnDuty, Off)
                | (Off, OnDuty)
        )
    }
}

impl Lifecycle for SurgeryStatus {
    fn allows(self, to: Self) -> bool {
        use SurgeryStatus::*;
        matches!(
            (self, to),
            (Scheduled, InProgress) | (InProgress, Completed) | (Scheduled, Cancelled)
        )
    }
}

/// Checks one edge, naming the record in the refusal.
///
/// ## Example
/// ```rust
/// use medmap_core::status::SurgeryStatus;
/// use medmap_core::transition::check_transition;
/// use medmap_core::types::RecordKind;
///
/// let next = check_transition(RecordKind::Surgery, "S001", SurgeryStatus::Scheduled, SurgeryStatus::InProgress);
/// assert_eq!(next.unwrap(), SurgeryStatus::InProgress);
///
/// let refused = check_transition(RecordKind::Surgery, "S001", SurgeryStatus::Completed, SurgeryStatus::Scheduled);
/// assert!(refused.is_err());
/// ```
pub fn check_transition<S: Lifecycle>(kind: RecordKind, id: &str, from: S, to: S) -> CoreResult<S> {
    if from.allows(to) {
        Ok(to)
    } else {
        Err(refused(kind, id, from, to))
    }
}

fn refused<S: StatusTag>(kind: RecordKind, id: &str, from: S, to: S) -> CoreError {
    CoreError::TransitionNotAllowed {
        kind,
        id: id.to_string(),
        from: from.as_str().to_string(),
        to: to.as_str().to_string(),
    }
}

// =============================================================================
// Beds
// =============================================================================

impl BedStatus {
    /// The other side of the available/occupied toggle.
    pub const fn toggled(self) -> Option<BedStatus> {
        match self {
            BedStatus::Available => Some(BedStatus::Occupied),
            BedStatus::Occupied => Some(BedStatus::Available),
            BedStatus::Cleaning | BedStatus::Blocked => None,
        }
    }

    /// Returns a cleaning or blocked bed to service.
    pub const fn released(self) -> Option<BedStatus> {
        match self {
            BedStatus::Cleaning | BedStatus::Blocked => Some(BedStatus::Available),
            BedStatus::Available | BedStatus::Occupied => None,
        }
    }
}

/// Toggle a bed, or refuse with the bed's id.
pub fn toggle_bed(id: &str, from: BedStatus) -> CoreResult<BedStatus> {
    from.toggled().ok_or_else(|| {
        let to = match from {
            BedStatus::Cleaning | BedStatus::Blocked => BedStatus::Occupied,
            _ => BedStatus::Available,
        };
        refused(RecordKind::Bed, id, from, to)
    })
}

/// Release a bed, or refuse with the bed's id.
pub fn release_bed(id: &str, from: BedStatus) -> CoreResult<BedStatus> {
    from.released()
        .ok_or_else(|| refused(RecordKind::Bed, id, from, BedStatus::Available))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bed_toggle_round_trip() {
        assert_eq!(BedStatus::Available.toggled(), Some(BedStatus::Occupied));
        assert_eq!(BedStatus::Occupied.toggled(), Some(BedStatus::Available));
        assert_eq!(BedStatus::Cleaning.toggled(), None);
        assert_eq!(BedStatus::Blocked.toggled(), None);
    }

    #[test]
    fn test_bed_release() {
        assert_eq!(BedStatus::Cleaning.released(), Some(BedStatus::Available));
        assert_eq!(BedStatus::Blocked.released(), Some(BedStatus::Available));
        assert!(release_bed("3", BedStatus::Occupied).is_err());
        assert!(release_bed("1", BedStatus::Available).is_err());
    }

    #[test]
    fn test_toggle_refusal_names_bed() {
        let err = toggle_bed("4", BedStatus::Cleaning).unwrap_err();
        assert_eq!(err.to_string(), "bed 4 cannot move from cleaning to occupied");
    }

    #[test]
    fn test_ambulance_cycle() {
        use AmbulanceStatus::*;
        assert!(OnDuty.allows(Dispatched));
        assert!(Dispatched.allows(EnRoute));
        assert!(EnRoute.allows(OnDuty));
        assert!(OnDuty.allows(Off));
        assert!(Off.allows(OnDuty));

        assert!(!Off.allows(Dispatched));
        assert!(!Dispatched.allows(Off));
        assert!(!OnDuty.allows(OnDuty));
        assert_eq!(OnDuty.next_states(), vec![Dispatched, Off]);
    }

    #[test]
    fn test_surgery_terminal_states() {
        use SurgeryStatus::*;
        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!Scheduled.is_terminal());
        assert!(!InProgress.allows(Cancelled));
        assert_eq!(Scheduled.next_states(), vec![InProgress, Cancelled]);
    }

    #[test]
    fn test_check_transition_error() {
        let err = check_transition(
            RecordKind::Ambulance,
            "3",
            AmbulanceStatus::Off,
            AmbulanceStatus::Dispatched,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::TransitionNotAllowed { .. }));
        assert_eq!(err.to_string(), "ambulance 3 cannot move from off to dispatched");
    }
}
