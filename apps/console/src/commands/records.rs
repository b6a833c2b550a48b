//! # Record Screen Commands
//!
//! Read-mostly pages: patients, staff, admissions, discharges, medical
//! records, pharmacy and the emergency department. Only medical records
//! accept new entries from the console.

use tracing::debug;

use medmap_core::draft::NewMedicalRecord;
use medmap_core::status::{
    AdmissionStatus, CasePriority, DischargeStatus, EmergencyStatus, MedicationStock,
    PatientStatus, RecordStatus, StaffStatus,
};
use medmap_core::{
    Action, Admission, Discharge, EmergencyCase, Facet, MedicalRecord, Medication, Outcome,
    Patient, StaffMember, Store,
};

use super::{filter_state, list, tag_selection, Listing};
use crate::error::ApiError;
use crate::state::StoreState;

pub fn list_patients(
    store: &StoreState,
    status: Option<&str>,
    query: Option<&str>,
) -> Result<Listing<Patient>, ApiError> {
    debug!(?status, ?query, "list_patients command");
    let status = tag_selection::<PatientStatus>(status)?;
    let filter = filter_state(query, &[(Facet::Status, status)])?;
    list(store, Store::patients, &filter)
}

pub fn list_staff(
    store: &StoreState,
    department: Option<&str>,
    status: Option<&str>,
    query: Option<&str>,
) -> Result<Listing<StaffMember>, ApiError> {
    debug!(?department, ?status, ?query, "list_staff command");
    let status = tag_selection::<StaffStatus>(status)?;
    let filter = filter_state(
        query,
        &[(Facet::Department, department), (Facet::Status, status)],
    )?;
    list(store, Store::staff, &filter)
}

pub fn list_admissions(
    store: &StoreState,
    department: Option<&str>,
    status: Option<&str>,
    query: Option<&str>,
) -> Result<Listing<Admission>, ApiError> {
    debug!(?department, ?status, ?query, "list_admissions command");
    let status = tag_selection::<AdmissionStatus>(status)?;
    let filter = filter_state(
        query,
        &[(Facet::Department, department), (Facet::Status, status)],
    )?;
    list(store, Store::admissions, &filter)
}

pub fn list_discharges(
    store: &StoreState,
    status: Option<&str>,
    query: Option<&str>,
) -> Result<Listing<Discharge>, ApiError> {
    debug!(?status, ?query, "list_discharges command");
    let status = tag_selection::<DischargeStatus>(status)?;
    let filter = filter_state(query, &[(Facet::Status, status)])?;
    list(store, Store::discharges, &filter)
}

pub fn list_medical_records(
    store: &StoreState,
    record_type: Option<&str>,
    status: Option<&str>,
    query: Option<&str>,
) -> Result<Listing<MedicalRecord>, ApiError> {
    debug!(?record_type, ?status, ?query, "list_medical_records command");
    let status = tag_selection::<RecordStatus>(status)?;
    let filter = filter_state(
        query,
        &[(Facet::RecordType, record_type), (Facet::Status, status)],
    )?;
    list(store, Store::medical_records, &filter)
}

/// Files a new medical record. A blank date means today.
pub fn add_medical_record(store: &StoreState, draft: NewMedicalRecord) -> Result<Outcome, ApiError> {
    debug!(patient_id = %draft.patient_id, "add_medical_record command");
    store.apply(Action::AddMedicalRecord(draft))
}

pub fn list_medications(
    store: &StoreState,
    status: Option<&str>,
    query: Option<&str>,
) -> Result<Listing<Medication>, ApiError> {
    debug!(?status, ?query, "list_medications command");
    let status = tag_selection::<MedicationStock>(status)?;
    let filter = filter_state(query, &[(Facet::Status, status)])?;
    list(store, Store::medications, &filter)
}

pub fn list_emergencies(
    store: &StoreState,
    priority: Option<&str>,
    status: Option<&str>,
    query: Option<&str>,
) -> Result<Listing<EmergencyCase>, ApiError> {
    debug!(?priority, ?status, ?query, "list_emergencies command");
    let priority = tag_selection::<CasePriority>(priority)?;
    let status = tag_selection::<EmergencyStatus>(status)?;
    let filter = filter_state(
        query,
        &[(Facet::Priority, priority), (Facet::Status, status)],
    )?;
    list(store, Store::emergency_cases, &filter)
}
