//! # Filter & Search
//!
//! One generic filter over every collection, parameterized by record kind.
//!
//! ## How a Record Passes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FilterState { query: "amb-00", selections: [(Status, "onduty")] }      │
//! │                                                                         │
//! │  record ──► query empty?  ─yes─┐                                        │
//! │               │ no             │                                        │
//! │               ▼                │                                        │
//! │        any search field        │                                        │
//! │        contains query          │                                        │
//! │        (case-insensitive)? ────┤                                        │
//! │                                ▼                                        │
//! │        every selection is "all" or equals record.facet(..) exactly     │
//! │                                │                                        │
//! │                                ▼                                        │
//! │                             visible                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Filtering borrows from the input slice and keeps its order, so the
//! visible set is always a subsequence of the collection.
//!
//! ## Usage
//! ```rust
//! use medmap_core::filter::{Facet, FilterState};
//! use medmap_core::fixtures;
//!
//! let beds = fixtures::beds();
//! let icu = FilterState::new().select(Facet::Ward, "ICU").apply(&beds);
//! assert_eq!(icu.len(), 5);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::status::StatusTag;
use crate::types::{
    Admission, Ambulance, Bed, BloodUnit, Discharge, EmergencyCase, EmergencyRequest, Equipment,
    MedicalRecord, Medication, OxygenStock, Patient, RecordKind, StaffMember, Surgery,
};
use crate::validation::{validate_search_query, ValidationResult};

/// Selection value that disables a facet.
pub const ALL: &str = "all";

// =============================================================================
// Facet
// =============================================================================

/// A categorical field a collection can be narrowed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum Facet {
    Ward,
    Status,
    Department,
    Component,
    Priority,
    RecordType,
}

impl Facet {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Facet::Ward => "ward",
            Facet::Status => "status",
            Facet::Department => "department",
            Facet::Component => "component",
            Facet::Priority => "priority",
            Facet::RecordType => "record-type",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facet {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ward" => Ok(Facet::Ward),
            "status" => Ok(Facet::Status),
            "department" => Ok(Facet::Department),
            "component" => Ok(Facet::Component),
            "priority" => Ok(Facet::Priority),
            "record-type" | "type" => Ok(Facet::RecordType),
            _ => Err(ValidationError::NotAllowed {
                field: "facet".to_string(),
                allowed: ["ward", "status", "department", "component", "priority", "record-type"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            }),
        }
    }
}

// =============================================================================
// Record Trait
// =============================================================================

/// A row of a collection: identified, searchable, faceted.
pub trait Record {
    const KIND: RecordKind;

    fn id(&self) -> &str;

    /// Text the search box looks at. Always includes the id.
    fn search_fields(&self) -> Vec<&str>;

    /// Value of a categorical field, or `None` if this kind has no such
    /// facet. Derived levels (blood, oxygen, pharmacy) report their tag.
    fn facet(&self, facet: Facet) -> Option<&str>;

    /// Case-insensitive substring match over the search fields.
    /// `needle` must already be lowercase.
    fn matches_query(&self, needle: &str) -> bool {
        needle.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle))
    }
}

impl Record for Bed {
    const KIND: RecordKind = RecordKind::Bed;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str(), self.name.as_str(), self.ward.as_str()];
        if let Some(patient) = &self.patient {
            fields.push(patient.as_str());
        }
        fields
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Ward => Some(self.ward.as_str()),
            Facet::Status => Some(self.status.as_str()),
            _ => None,
        }
    }
}

impl Record for BloodUnit {
    const KIND: RecordKind = RecordKind::BloodUnit;

    fn id(&self) -> &str {
        &self.blood_type
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.blood_type.as_str(), self.component.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Component => Some(self.component.as_str()),
            Facet::Status => Some(self.stock_level().as_str()),
            _ => None,
        }
    }
}

impl Record for OxygenStock {
    const KIND: RecordKind = RecordKind::OxygenStock;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.supply_type.as_str(), self.size.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.stock_level().as_str()),
            _ => None,
        }
    }
}

impl Record for Equipment {
    const KIND: RecordKind = RecordKind::Equipment;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.name.as_str()]
    }

    fn facet(&self, _facet: Facet) -> Option<&str> {
        None
    }
}

impl Record for Ambulance {
    const KIND: RecordKind = RecordKind::Ambulance;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.vehicle_id.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.status.as_str()),
            _ => None,
        }
    }
}

impl Record for Surgery {
    const KIND: RecordKind = RecordKind::Surgery;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.patient_name.as_str(),
            self.procedure.as_str(),
            self.surgeon.as_str(),
            self.room.as_str(),
        ]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.status.as_str()),
            Facet::Priority => Some(self.priority.as_str()),
            _ => None,
        }
    }
}

impl Record for EmergencyRequest {
    const KIND: RecordKind = RecordKind::Request;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.patient.name.as_str(),
            self.patient.blood_type.as_str(),
        ]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Priority => Some(self.priority.as_str()),
            _ => None,
        }
    }
}

impl Record for Patient {
    const KIND: RecordKind = RecordKind::Patient;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.name.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.status.as_str()),
            _ => None,
        }
    }
}

impl Record for StaffMember {
    const KIND: RecordKind = RecordKind::Staff;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.name.as_str(), self.role.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Department => Some(self.department.as_str()),
            Facet::Status => Some(self.status.as_str()),
            _ => None,
        }
    }
}

impl Record for Admission {
    const KIND: RecordKind = RecordKind::Admission;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.patient_name.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.status.as_str()),
            Facet::Department => Some(self.department.as_str()),
            _ => None,
        }
    }
}

impl Record for Discharge {
    const KIND: RecordKind = RecordKind::Discharge;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.patient_name.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.status.as_str()),
            _ => None,
        }
    }
}

impl Record for MedicalRecord {
    const KIND: RecordKind = RecordKind::MedicalRecord;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.patient_name.as_str(), self.record_type.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::RecordType => Some(self.record_type.as_str()),
            Facet::Status => Some(self.status.as_str()),
            _ => None,
        }
    }
}

impl Record for Medication {
    const KIND: RecordKind = RecordKind::Medication;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.name.as_str(), self.generic_name.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.stock_level().as_str()),
            _ => None,
        }
    }
}

impl Record for EmergencyCase {
    const KIND: RecordKind = RecordKind::EmergencyCase;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.patient_name.as_str(), self.condition.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Priority => Some(self.priority.as_str()),
            Facet::Status => Some(self.status.as_str()),
            _ => None,
        }
    }
}

// =============================================================================
// Filter State
// =============================================================================

/// Search text plus categorical selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    query: String,
    selections: Vec<(Facet, String)>,
}

impl FilterState {
    /// Matches everything.
    pub fn new() -> Self {
        FilterState::default()
    }

    /// Sets the search text (trimmed, at most 100 characters).
    pub fn with_query(mut self, query: &str) -> ValidationResult<Self> {
        self.query = validate_search_query(query)?;
        Ok(self)
    }

    /// Adds a selection. A later selection on the same facet replaces the
    /// earlier one.
    pub fn select(mut self, facet: Facet, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.selections.iter_mut().find(|(f, _)| *f == facet) {
            Some(slot) => slot.1 = value,
            None => self.selections.push((facet, value)),
        }
        self
    }

    /// Like [`select`](Self::select), skipping `None`.
    pub fn select_opt(self, facet: Facet, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.select(facet, value),
            None => self,
        }
    }

    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[inline]
    pub fn selections(&self) -> &[(Facet, String)] {
        &self.selections
    }

    /// True when no query and no active selection is set.
    pub fn is_pass_through(&self) -> bool {
        self.query.is_empty() && self.selections.iter().all(|(_, v)| is_all(v))
    }

    /// Whether one record is visible under this state.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        record.matches_query(&self.query.to_lowercase()) && self.matches_selections(record)
    }

    fn matches_selections<R: Record>(&self, record: &R) -> bool {
        self.selections
            .iter()
            .all(|(facet, wanted)| is_all(wanted) || record.facet(*facet) == Some(wanted.as_str()))
    }

    /// The visible subset, in collection order.
    pub fn apply<'a, R: Record>(&self, records: &'a [R]) -> Vec<&'a R> {
        let needle = self.query.to_lowercase();
        records
            .iter()
            .filter(|record| record.matches_query(&needle) && self.matches_selections(*record))
            .collect()
    }
}

fn is_all(value: &str) -> bool {
    value.eq_ignore_ascii_case(ALL)
}

// =============================================================================
// Facet Options
// =============================================================================

/// Choices for a facet's filter pills: `"all"` then each distinct value in
/// the order it first appears.
///
/// ## Example
/// ```rust
/// use medmap_core::filter::{facet_options, Facet};
/// use medmap_core::fixtures;
///
/// assert_eq!(facet_options(&fixtures::beds(), Facet::Ward), vec!["all", "ICU", "CCU"]);
/// ```
pub fn facet_options<R: Record>(records: &[R], facet: Facet) -> Vec<String> {
    let mut options = vec![ALL.to_string()];
    for value in records.iter().filter_map(|r| r.facet(facet)) {
        if !options.iter().any(|o| o == value) {
            options.push(value.to_string());
        }
    }
    options
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::status::{AmbulanceStatus, BedStatus};

    #[test]
    fn test_empty_state_passes_everything() {
        let beds = fixtures::beds();
        let visible = FilterState::new().apply(&beds);
        assert_eq!(visible.len(), beds.len());
        assert!(FilterState::new().is_pass_through());
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let ambulances = fixtures::ambulances();
        let state = FilterState::new().with_query("amb-00").unwrap();
        let visible = state.apply(&ambulances);

        assert!(!visible.is_empty());
        for amb in &visible {
            assert!(amb.vehicle_id.to_lowercase().contains("amb-00"));
        }
        let expected = ambulances
            .iter()
            .filter(|a| a.vehicle_id.to_lowercase().contains("amb-00"))
            .count();
        assert_eq!(visible.len(), expected);
    }

    #[test]
    fn test_ambulance_query_ignores_driver_and_location() {
        let ambulances = fixtures::ambulances();
        let by_driver = FilterState::new().with_query("martinez").unwrap();
        assert!(by_driver.apply(&ambulances).is_empty());

        let by_location = FilterState::new().with_query("base station").unwrap();
        assert!(by_location.apply(&ambulances).is_empty());
    }

    #[test]
    fn test_query_matches_id() {
        let surgeries = fixtures::surgeries();
        let visible = FilterState::new().with_query("s002").unwrap().apply(&surgeries);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "S002");
    }

    #[test]
    fn test_selections_and_combine() {
        let beds = fixtures::beds();
        let state = FilterState::new()
            .select(Facet::Ward, "ICU")
            .select(Facet::Status, BedStatus::Available.as_str());
        for bed in state.apply(&beds) {
            assert_eq!(bed.ward, "ICU");
            assert_eq!(bed.status, BedStatus::Available);
        }
    }

    #[test]
    fn test_all_selection_passes() {
        let beds = fixtures::beds();
        let state = FilterState::new().select(Facet::Ward, "All");
        assert_eq!(state.apply(&beds).len(), beds.len());
        assert!(state.is_pass_through());
    }

    #[test]
    fn test_selection_is_exact() {
        let ambulances = fixtures::ambulances();
        let state = FilterState::new().select(Facet::Status, "on");
        assert!(state.apply(&ambulances).is_empty());

        let state = FilterState::new().select(Facet::Status, AmbulanceStatus::OnDuty.as_str());
        assert!(state
            .apply(&ambulances)
            .iter()
            .all(|a| a.status == AmbulanceStatus::OnDuty));
    }

    #[test]
    fn test_select_replaces_same_facet() {
        let state = FilterState::new()
            .select(Facet::Ward, "ICU")
            .select(Facet::Ward, "CCU");
        assert_eq!(state.selections(), &[(Facet::Ward, "CCU".to_string())]);
    }

    #[test]
    fn test_missing_facet_excludes() {
        let equipment = fixtures::equipment();
        let state = FilterState::new().select(Facet::Ward, "ICU");
        assert!(state.apply(&equipment).is_empty());
    }

    #[test]
    fn test_filter_is_ordered_subset() {
        let beds = fixtures::beds();
        let state = FilterState::new().with_query("icu").unwrap();
        let visible = state.apply(&beds);

        let mut cursor = 0;
        for bed in &visible {
            let pos = beds[cursor..]
                .iter()
                .position(|b| b.id == bed.id)
                .expect("visible record must come from the collection");
            cursor += pos + 1;
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let staff = fixtures::staff();
        let state = FilterState::new()
            .with_query("dr")
            .unwrap()
            .select(Facet::Status, "On Duty");
        let once = state.apply(&staff);
        let twice = state.apply(&staff);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_derived_status_facet() {
        let blood = fixtures::blood_units();
        let low = FilterState::new().select(Facet::Status, "low").apply(&blood);
        assert!(low.iter().any(|u| u.blood_type == "O-"));
        assert!(low.iter().all(|u| u.units > 0 && u.units < u.threshold));
    }

    #[test]
    fn test_query_too_long() {
        assert!(FilterState::new().with_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_facet_options_first_seen_order() {
        let options = facet_options(&fixtures::beds(), Facet::Ward);
        assert_eq!(options, vec!["all", "ICU", "CCU"]);
        let none = facet_options(&fixtures::equipment(), Facet::Ward);
        assert_eq!(none, vec!["all"]);
    }

    #[test]
    fn test_facet_from_str() {
        assert_eq!("Ward".parse::<Facet>().unwrap(), Facet::Ward);
        assert_eq!("type".parse::<Facet>().unwrap(), Facet::RecordType);
        assert!("colour".parse::<Facet>().is_err());
    }
}
