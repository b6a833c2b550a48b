//! # Stock Commands
//!
//! Blood bank, oxygen supply and equipment pools. All three are counts that
//! operators nudge up and down; none of them ever goes below zero, and an
//! equipment pool never holds more than its total allows.

use tracing::debug;

use medmap_core::draft::{NewEquipment, NewOxygenStock};
use medmap_core::status::StockLevel;
use medmap_core::{Action, BloodUnit, Equipment, Facet, Outcome, OxygenStock, Store};

use super::{filter_state, list, tag_selection, Listing};
use crate::error::ApiError;
use crate::state::StoreState;

// =============================================================================
// Blood Bank
// =============================================================================

pub fn list_blood(
    store: &StoreState,
    component: Option<&str>,
    status: Option<&str>,
    query: Option<&str>,
) -> Result<Listing<BloodUnit>, ApiError> {
    debug!(?component, ?status, ?query, "list_blood command");
    let status = tag_selection::<StockLevel>(status)?;
    let filter = filter_state(
        query,
        &[(Facet::Component, component), (Facet::Status, status)],
    )?;
    list(store, Store::blood_units, &filter)
}

/// Adds (or with a negative delta, issues) units of one blood type.
pub fn adjust_blood(store: &StoreState, blood_type: &str, delta: i64) -> Result<Outcome, ApiError> {
    debug!(blood_type, delta, "adjust_blood command");
    store.apply(Action::AdjustBlood {
        blood_type: blood_type.to_string(),
        delta,
    })
}

// =============================================================================
// Oxygen
// =============================================================================

pub fn list_oxygen(
    store: &StoreState,
    status: Option<&str>,
    query: Option<&str>,
) -> Result<Listing<OxygenStock>, ApiError> {
    debug!(?status, ?query, "list_oxygen command");
    let status = tag_selection::<StockLevel>(status)?;
    let filter = filter_state(query, &[(Facet::Status, status)])?;
    list(store, Store::oxygen_stock, &filter)
}

pub fn adjust_oxygen(store: &StoreState, id: &str, delta: i64) -> Result<Outcome, ApiError> {
    debug!(id, delta, "adjust_oxygen command");
    store.apply(Action::AdjustOxygen {
        id: id.to_string(),
        delta,
    })
}

pub fn add_oxygen(store: &StoreState, draft: NewOxygenStock) -> Result<Outcome, ApiError> {
    debug!(supply_type = %draft.supply_type, size = %draft.size, "add_oxygen command");
    store.apply(Action::AddOxygen(draft))
}

// =============================================================================
// Equipment
// =============================================================================

pub fn list_equipment(store: &StoreState, query: Option<&str>) -> Result<Listing<Equipment>, ApiError> {
    debug!(?query, "list_equipment command");
    let filter = filter_state(query, &[])?;
    list(store, Store::equipment, &filter)
}

pub fn adjust_equipment(store: &StoreState, id: &str, delta: i64) -> Result<Outcome, ApiError> {
    debug!(id, delta, "adjust_equipment command");
    store.apply(Action::AdjustEquipment {
        id: id.to_string(),
        delta,
    })
}

pub fn add_equipment(store: &StoreState, draft: NewEquipment) -> Result<Outcome, ApiError> {
    debug!(name = %draft.name, "add_equipment command");
    store.apply(Action::AddEquipment(draft))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_low_blood() {
        let store = StoreState::seeded();
        let listing = list_blood(&store, None, Some("low"), None).unwrap();
        let types: Vec<_> = listing.items.iter().map(|u| u.blood_type.as_str()).collect();
        assert_eq!(types, vec!["A-", "B-", "AB-", "O-"]);
    }

    #[test]
    fn test_adjust_blood_never_negative() {
        let store = StoreState::seeded();
        match adjust_blood(&store, "AB-", -100).unwrap() {
            Outcome::BloodUnit(unit) => assert_eq!(unit.units, 0),
            other => panic!("unexpected outcome: {other:?}"),
        }
        let listing = list_blood(&store, None, Some("out"), None).unwrap();
        assert_eq!(listing.visible, 1);
    }

    #[test]
    fn test_adjust_unknown_blood_type() {
        let store = StoreState::seeded();
        let err = adjust_blood(&store, "C+", 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_add_oxygen_rejects_text_count() {
        let store = StoreState::seeded();
        let err = add_oxygen(
            &store,
            NewOxygenStock {
                supply_type: "Oxygen Cylinder".to_string(),
                size: "H".to_string(),
                available: "lots".to_string(),
                threshold: "4".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(list_oxygen(&store, None, None).unwrap().total, 4);
    }

    #[test]
    fn test_equipment_search() {
        let store = StoreState::seeded();
        let listing = list_equipment(&store, Some("PUMP")).unwrap();
        assert_eq!(listing.visible, 1);
        assert_eq!(listing.items[0].name, "Infusion Pumps");
    }

    #[test]
    fn test_add_equipment() {
        let store = StoreState::seeded();
        let outcome = add_equipment(
            &store,
            NewEquipment {
                name: "Syringe Pumps".to_string(),
                available: "6".to_string(),
                total: "10".to_string(),
            },
        )
        .unwrap();
        assert!(matches!(outcome, Outcome::Equipment(ref e) if e.id == "5"));
    }
}
