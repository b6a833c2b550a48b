//! # Store
//!
//! The single state container for every collection, and the one function
//! that mutates it.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Store::apply                                   │
//! │                                                                         │
//! │   Action ──► look up record ──► check rule ──► write ──► Outcome        │
//! │                   │                  │                                  │
//! │                   ▼                  ▼                                  │
//! │            RecordNotFound    TransitionNotAllowed / Validation          │
//! │                                                                         │
//! │   On any error the store is exactly as it was before the call.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Collections are readable from outside; their write methods are
//! crate-private, so `apply` is the only way in.
//!
//! ## Example
//! ```rust
//! use chrono::NaiveDate;
//! use medmap_core::status::BedStatus;
//! use medmap_core::store::{Action, Outcome, Store};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! let mut store = Store::seeded();
//!
//! let outcome = store.apply(Action::ToggleBed { id: "2".into() }, today).unwrap();
//! match outcome {
//!     Outcome::Bed(bed) => assert_eq!(bed.status, BedStatus::Occupied),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::draft::{Draft, NewBed, NewEquipment, NewMedicalRecord, NewOxygenStock, NewSurgery};
use crate::error::CoreResult;
use crate::filter::Record;
use crate::fixtures;
use crate::quantity::Quantity;
use crate::status::{AmbulanceStatus, BedStatus, SurgeryStatus};
use crate::transition::{check_transition, release_bed, toggle_bed};
use crate::types::{
    Admission, Ambulance, Bed, BloodUnit, Discharge, EmergencyCase, EmergencyRequest, Equipment,
    MedicalRecord, Medication, OxygenStock, Patient, RecordKind, RequestDecision, StaffMember,
    Surgery,
};

// =============================================================================
// Actions & Outcomes
// =============================================================================

/// Every mutation the dashboard can perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// available ↔ occupied.
    ToggleBed { id: String },
    /// cleaning/blocked → available.
    ReleaseBed { id: String },
    AddBed(NewBed),

    AdjustBlood { blood_type: String, delta: i64 },

    AdjustOxygen { id: String, delta: i64 },
    AddOxygen(NewOxygenStock),

    /// Clamped to what the pool can hold.
    AdjustEquipment { id: String, delta: i64 },
    AddEquipment(NewEquipment),

    /// onduty → dispatched.
    DispatchAmbulance { id: String },
    SetAmbulanceStatus { id: String, status: AmbulanceStatus },

    AddSurgery(NewSurgery),
    SetSurgeryStatus { id: String, status: SurgeryStatus },

    /// Accept or decline; either way the request leaves the queue.
    ResolveRequest { id: String, decision: RequestDecision },

    AddMedicalRecord(NewMedicalRecord),
}

impl Action {
    /// Collection the action writes to.
    pub const fn kind(&self) -> RecordKind {
        match self {
            Action::ToggleBed { .. } | Action::ReleaseBed { .. } | Action::AddBed(_) => {
                RecordKind::Bed
            }
            Action::AdjustBlood { .. } => RecordKind::BloodUnit,
            Action::AdjustOxygen { .. } | Action::AddOxygen(_) => RecordKind::OxygenStock,
            Action::AdjustEquipment { .. } | Action::AddEquipment(_) => RecordKind::Equipment,
            Action::DispatchAmbulance { .. } | Action::SetAmbulanceStatus { .. } => {
                RecordKind::Ambulance
            }
            Action::AddSurgery(_) | Action::SetSurgeryStatus { .. } => RecordKind::Surgery,
            Action::ResolveRequest { .. } => RecordKind::Request,
            Action::AddMedicalRecord(_) => RecordKind::MedicalRecord,
        }
    }
}

/// The record as it stands after a successful action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum Outcome {
    Bed(Bed),
    BloodUnit(BloodUnit),
    OxygenStock(OxygenStock),
    Equipment(Equipment),
    Ambulance(Ambulance),
    Surgery(Surgery),
    MedicalRecord(MedicalRecord),
    /// The request that left the queue.
    RequestResolved {
        request: EmergencyRequest,
        decision: RequestDecision,
    },
}

// =============================================================================
// Store
// =============================================================================

/// Session state: one collection per page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    beds: Collection<Bed>,
    blood_units: Collection<BloodUnit>,
    oxygen_stock: Collection<OxygenStock>,
    equipment: Collection<Equipment>,
    ambulances: Collection<Ambulance>,
    surgeries: Collection<Surgery>,
    requests: Collection<EmergencyRequest>,
    patients: Collection<Patient>,
    staff: Collection<StaffMember>,
    admissions: Collection<Admission>,
    discharges: Collection<Discharge>,
    medical_records: Collection<MedicalRecord>,
    medications: Collection<Medication>,
    emergency_cases: Collection<EmergencyCase>,
}

impl Store {
    /// A store with every collection empty.
    pub fn empty() -> Self {
        Store::default()
    }

    /// A store loaded with the sample data.
    pub fn seeded() -> Self {
        Store {
            beds: fixtures::beds().into(),
            blood_units: fixtures::blood_units().into(),
            oxygen_stock: fixtures::oxygen_stock().into(),
            equipment: fixtures::equipment().into(),
            ambulances: fixtures::ambulances().into(),
            surgeries: fixtures::surgeries().into(),
            requests: fixtures::requests().into(),
            patients: fixtures::patients().into(),
            staff: fixtures::staff().into(),
            admissions: fixtures::admissions().into(),
            discharges: fixtures::discharges().into(),
            medical_records: fixtures::medical_records().into(),
            medications: fixtures::medications().into(),
            emergency_cases: fixtures::emergency_cases().into(),
        }
    }

    pub fn beds(&self) -> &Collection<Bed> {
        &self.beds
    }

    pub fn blood_units(&self) -> &Collection<BloodUnit> {
        &self.blood_units
    }

    pub fn oxygen_stock(&self) -> &Collection<OxygenStock> {
        &self.oxygen_stock
    }

    pub fn equipment(&self) -> &Collection<Equipment> {
        &self.equipment
    }

    pub fn ambulances(&self) -> &Collection<Ambulance> {
        &self.ambulances
    }

    pub fn surgeries(&self) -> &Collection<Surgery> {
        &self.surgeries
    }

    pub fn requests(&self) -> &Collection<EmergencyRequest> {
        &self.requests
    }

    pub fn patients(&self) -> &Collection<Patient> {
        &self.patients
    }

    pub fn staff(&self) -> &Collection<StaffMember> {
        &self.staff
    }

    pub fn admissions(&self) -> &Collection<Admission> {
        &self.admissions
    }

    pub fn discharges(&self) -> &Collection<Discharge> {
        &self.discharges
    }

    pub fn medical_records(&self) -> &Collection<MedicalRecord> {
        &self.medical_records
    }

    pub fn medications(&self) -> &Collection<Medication> {
        &self.medications
    }

    pub fn emergency_cases(&self) -> &Collection<EmergencyCase> {
        &self.emergency_cases
    }

    /// Applies one action. `today` fills dates a draft leaves blank.
    ///
    /// ## Errors
    /// - `RecordNotFound`: no record with the given id
    /// - `TransitionNotAllowed`: the status table refuses the change
    /// - `Validation`: a draft field is missing or malformed
    ///
    /// In every error case nothing was written.
    pub fn apply(&mut self, action: Action, today: NaiveDate) -> CoreResult<Outcome> {
        match action {
            // -----------------------------------------------------------------
            // Beds
            // -----------------------------------------------------------------
            Action::ToggleBed { id } => {
                let (_, bed) = self.beds.update(&id, |bed| {
                    bed.status = toggle_bed(&bed.id, bed.status)?;
                    if bed.status == BedStatus::Available {
                        bed.patient = None;
                    }
                    Ok(())
                })?;
                Ok(Outcome::Bed(bed))
            }
            Action::ReleaseBed { id } => {
                let (_, bed) = self.beds.update(&id, |bed| {
                    bed.status = release_bed(&bed.id, bed.status)?;
                    Ok(())
                })?;
                Ok(Outcome::Bed(bed))
            }
            Action::AddBed(draft) => add(&mut self.beds, draft, today).map(Outcome::Bed),

            // -----------------------------------------------------------------
            // Stock
            // -----------------------------------------------------------------
            Action::AdjustBlood { blood_type, delta } => {
                let (_, unit) = self.blood_units.update(&blood_type, |unit| {
                    unit.units = unit.quantity().adjust(delta).get();
                    Ok(())
                })?;
                Ok(Outcome::BloodUnit(unit))
            }
            Action::AdjustOxygen { id, delta } => {
                let (_, stock) = self.oxygen_stock.update(&id, |stock| {
                    stock.available = Quantity::new(stock.available).adjust(delta).get();
                    Ok(())
                })?;
                Ok(Outcome::OxygenStock(stock))
            }
            Action::AddOxygen(draft) => {
                add(&mut self.oxygen_stock, draft, today).map(Outcome::OxygenStock)
            }
            Action::AdjustEquipment { id, delta } => {
                let (_, item) = self.equipment.update(&id, |item| {
                    let cap = item.available_cap();
                    item.available = Quantity::new(item.available)
                        .adjust_within(delta, cap)
                        .get();
                    Ok(())
                })?;
                Ok(Outcome::Equipment(item))
            }
            Action::AddEquipment(draft) => {
                add(&mut self.equipment, draft, today).map(Outcome::Equipment)
            }

            // -----------------------------------------------------------------
            // Fleet
            // -----------------------------------------------------------------
            Action::DispatchAmbulance { id } => {
                self.set_ambulance_status(&id, AmbulanceStatus::Dispatched)
            }
            Action::SetAmbulanceStatus { id, status } => self.set_ambulance_status(&id, status),

            // -----------------------------------------------------------------
            // Surgery
            // -----------------------------------------------------------------
            Action::AddSurgery(draft) => add(&mut self.surgeries, draft, today).map(Outcome::Surgery),
            Action::SetSurgeryStatus { id, status } => {
                let (_, surgery) = self.surgeries.update(&id, |surgery| {
                    surgery.status =
                        check_transition(RecordKind::Surgery, &surgery.id, surgery.status, status)?;
                    Ok(())
                })?;
                Ok(Outcome::Surgery(surgery))
            }

            // -----------------------------------------------------------------
            // Live requests
            // -----------------------------------------------------------------
            Action::ResolveRequest { id, decision } => {
                let request = self.requests.remove(&id)?;
                Ok(Outcome::RequestResolved { request, decision })
            }

            // -----------------------------------------------------------------
            // Records
            // -----------------------------------------------------------------
            Action::AddMedicalRecord(draft) => {
                add(&mut self.medical_records, draft, today).map(Outcome::MedicalRecord)
            }
        }
    }

    fn set_ambulance_status(&mut self, id: &str, status: AmbulanceStatus) -> CoreResult<Outcome> {
        let (_, ambulance) = self.ambulances.update(id, |ambulance| {
            ambulance.status =
                check_transition(RecordKind::Ambulance, &ambulance.id, ambulance.status, status)?;
            Ok(())
        })?;
        Ok(Outcome::Ambulance(ambulance))
    }
}

/// Validates a draft under the collection's next id and appends it.
fn add<D>(collection: &mut Collection<D::Record>, draft: D, today: NaiveDate) -> CoreResult<D::Record>
where
    D: Draft,
    D::Record: Record + Clone,
{
    let id = collection.next_id(D::ID_SCHEME);
    let record = draft.into_record(id, today)?;
    collection.push(record.clone());
    Ok(record)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::status::{StockLevel, SurgeryPriority};
    use std::collections::HashSet;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
    }

    fn bed(store: &Store, id: &str) -> Bed {
        store.beds().require(id).unwrap().clone()
    }

    #[test]
    fn test_toggle_bed_round_trip() {
        let mut store = Store::empty();
        store.beds.push(Bed {
            id: "1".to_string(),
            name: "ICU-01".to_string(),
            ward: "ICU".to_string(),
            status: BedStatus::Available,
            ventilator: false,
            patient: None,
        });

        store.apply(Action::ToggleBed { id: "1".into() }, today()).unwrap();
        assert_eq!(bed(&store, "1").status, BedStatus::Occupied);

        store.apply(Action::ToggleBed { id: "1".into() }, today()).unwrap();
        assert_eq!(bed(&store, "1").status, BedStatus::Available);
    }

    #[test]
    fn test_toggle_to_available_clears_patient() {
        let mut store = Store::seeded();
        assert!(bed(&store, "1").patient.is_some());
        store.apply(Action::ToggleBed { id: "1".into() }, today()).unwrap();
        assert_eq!(bed(&store, "1").patient, None);
    }

    #[test]
    fn test_cleaning_bed_refuses_toggle_then_releases() {
        let mut store = Store::seeded();
        let before = store.clone();

        let err = store
            .apply(Action::ToggleBed { id: "3".into() }, today())
            .unwrap_err();
        assert!(matches!(err, CoreError::TransitionNotAllowed { .. }));
        assert_eq!(store, before);

        store.apply(Action::ReleaseBed { id: "3".into() }, today()).unwrap();
        assert_eq!(bed(&store, "3").status, BedStatus::Available);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut store = Store::seeded();
        let err = store
            .apply(Action::ToggleBed { id: "99".into() }, today())
            .unwrap_err();
        assert!(matches!(err, CoreError::RecordNotFound { kind: RecordKind::Bed, .. }));
    }

    #[test]
    fn test_adjust_blood_clamps_at_zero() {
        let mut store = Store::seeded();
        let outcome = store
            .apply(
                Action::AdjustBlood {
                    blood_type: "O-".into(),
                    delta: -50,
                },
                today(),
            )
            .unwrap();
        match outcome {
            Outcome::BloodUnit(unit) => {
                assert_eq!(unit.units, 0);
                assert_eq!(unit.stock_level(), StockLevel::Out);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_adjust_quantity_is_max_zero_sum() {
        for delta in [-30i64, -5, -1, 0, 1, 7] {
            let mut store = Store::seeded();
            let prev = store.oxygen_stock().require("3").unwrap().available as i64;
            store
                .apply(Action::AdjustOxygen { id: "3".into(), delta }, today())
                .unwrap();
            let next = store.oxygen_stock().require("3").unwrap().available as i64;
            assert_eq!(next, (prev + delta).max(0));
        }
    }

    #[test]
    fn test_adjust_equipment_respects_pool() {
        let mut store = Store::seeded();
        // Monitors: 12 available, 18 in use, 2 in maintenance, 32 total
        store
            .apply(Action::AdjustEquipment { id: "2".into(), delta: 10 }, today())
            .unwrap();
        let monitors = store.equipment().require("2").unwrap();
        assert_eq!(monitors.available, 12);
        assert!(monitors.available <= monitors.total);

        store
            .apply(Action::AdjustEquipment { id: "2".into(), delta: -20 }, today())
            .unwrap();
        assert_eq!(store.equipment().require("2").unwrap().available, 0);
    }

    #[test]
    fn test_add_valid_draft_grows_by_one_with_unique_id() {
        let mut store = Store::seeded();
        let len = store.oxygen_stock().len();

        let outcome = store
            .apply(
                Action::AddOxygen(NewOxygenStock {
                    supply_type: "Oxygen Cylinder".into(),
                    size: "H".into(),
                    available: "10".into(),
                    threshold: "4".into(),
                }),
                today(),
            )
            .unwrap();

        assert_eq!(store.oxygen_stock().len(), len + 1);
        let Outcome::OxygenStock(stock) = outcome else {
            panic!("unexpected outcome");
        };
        assert_eq!(stock.id, "5");
        let ids: HashSet<_> = store.oxygen_stock().iter().map(|o| o.id.clone()).collect();
        assert_eq!(ids.len(), store.oxygen_stock().len());
    }

    #[test]
    fn test_add_invalid_draft_is_noop() {
        let mut store = Store::seeded();
        let before = store.clone();

        let err = store
            .apply(
                Action::AddEquipment(NewEquipment {
                    name: "".into(),
                    available: "3".into(),
                    total: "5".into(),
                }),
                today(),
            )
            .unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(store, before);
    }

    #[test]
    fn test_add_medical_record_continues_sequence() {
        let mut store = Store::seeded();
        store
            .apply(
                Action::AddMedicalRecord(NewMedicalRecord {
                    patient_name: "John Smith".into(),
                    patient_id: "P001".into(),
                    description: "ECG".into(),
                    doctor: "Dr. Sarah Miller".into(),
                    ..NewMedicalRecord::default()
                }),
                today(),
            )
            .unwrap();
        let last = store.medical_records().iter().last().unwrap();
        assert_eq!(last.id, "MR005");
        assert_eq!(last.date_created, today());
    }

    #[test]
    fn test_add_surgery_gets_next_prefixed_id() {
        let mut store = Store::seeded();
        let outcome = store
            .apply(
                Action::AddSurgery(NewSurgery {
                    patient_name: "Anna Lee".into(),
                    procedure: "Hernia Repair".into(),
                    surgeon: "Dr. Brown".into(),
                    scheduled_time: "2024-01-16 10:30".into(),
                    priority: "urgent".into(),
                    ..NewSurgery::default()
                }),
                today(),
            )
            .unwrap();
        let Outcome::Surgery(surgery) = outcome else {
            panic!("unexpected outcome");
        };
        assert_eq!(surgery.id, "S004");
        assert_eq!(surgery.priority, SurgeryPriority::Urgent);
    }

    #[test]
    fn test_dispatch_only_from_on_duty() {
        let mut store = Store::seeded();
        store
            .apply(Action::DispatchAmbulance { id: "1".into() }, today())
            .unwrap();
        assert_eq!(
            store.ambulances().require("1").unwrap().status,
            AmbulanceStatus::Dispatched
        );

        // AMB-005 is off duty
        let err = store
            .apply(Action::DispatchAmbulance { id: "5".into() }, today())
            .unwrap_err();
        assert!(matches!(err, CoreError::TransitionNotAllowed { .. }));
    }

    #[test]
    fn test_surgery_lifecycle() {
        let mut store = Store::seeded();
        let set = |status| Action::SetSurgeryStatus {
            id: "S003".into(),
            status,
        };

        store.apply(set(SurgeryStatus::Completed), today()).unwrap();
        let err = store.apply(set(SurgeryStatus::Scheduled), today()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "surgery S003 cannot move from completed to scheduled"
        );
    }

    #[test]
    fn test_resolve_request_removes_it() {
        let mut store = Store::seeded();
        let len = store.requests().len();

        let outcome = store
            .apply(
                Action::ResolveRequest {
                    id: "REQ-004".into(),
                    decision: RequestDecision::Accepted,
                },
                today(),
            )
            .unwrap();
        assert!(matches!(
            outcome,
            Outcome::RequestResolved {
                decision: RequestDecision::Accepted,
                ..
            }
        ));
        assert_eq!(store.requests().len(), len - 1);
        assert!(!store.requests().contains("REQ-004"));

        let err = store
            .apply(
                Action::ResolveRequest {
                    id: "REQ-004".into(),
                    decision: RequestDecision::Declined,
                },
                today(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::RecordNotFound { .. }));
    }

    #[test]
    fn test_action_wire_format() {
        let action: Action =
            serde_json::from_str(r#"{"type":"adjust_blood","blood_type":"A+","delta":-2}"#)
                .unwrap();
        assert_eq!(
            action,
            Action::AdjustBlood {
                blood_type: "A+".into(),
                delta: -2
            }
        );
        assert_eq!(action.kind(), RecordKind::BloodUnit);

        let action: Action =
            serde_json::from_str(r#"{"type":"add_bed","name":"ICU-06","ward":"ICU"}"#).unwrap();
        assert!(matches!(action, Action::AddBed(_)));
    }

    #[test]
    fn test_empty_store() {
        let store = Store::empty();
        assert!(store.beds().is_empty());
        assert!(store.requests().is_empty());
    }
}
