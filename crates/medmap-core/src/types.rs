//! # Domain Types
//!
//! Records tracked by the MedMap dashboard.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Resource records (status-bearing, mutable through the Store)          │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │     Bed      │ │  BloodUnit   │ │ OxygenStock  │ │  Equipment   │   │
//! │  │  status      │ │  units       │ │  available   │ │  available   │   │
//! │  │  ward        │ │  threshold   │ │  threshold   │ │  total       │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────────────────────┐    │
//! │  │  Ambulance   │ │   Surgery    │ │  EmergencyRequest            │    │
//! │  │  status      │ │  status      │ │  priority (no lifecycle)     │    │
//! │  └──────────────┘ └──────────────┘ └──────────────────────────────┘    │
//! │                                                                         │
//! │  Record screens (searchable, mostly read-only)                         │
//! │  Patient · StaffMember · Admission · Discharge · MedicalRecord ·       │
//! │  Medication · EmergencyCase                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every record owns a stable string `id` and serializes camelCase, which
//! is also the shape of the generated TypeScript bindings.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::quantity::Quantity;
use crate::status::{
    AdmissionStatus, AmbulanceStatus, BedStatus, CasePriority, DischargeStatus, EmergencyStatus,
    MedicationStock, PatientStatus, RecordStatus, RequestPriority, StaffStatus, StockLevel,
    SurgeryPriority, SurgeryStatus,
};

// =============================================================================
// Record Kind
// =============================================================================

/// Which collection a record lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    Bed,
    BloodUnit,
    OxygenStock,
    Equipment,
    Ambulance,
    Surgery,
    Request,
    Patient,
    Staff,
    Admission,
    Discharge,
    MedicalRecord,
    Medication,
    EmergencyCase,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Bed => "bed",
            RecordKind::BloodUnit => "blood unit",
            RecordKind::OxygenStock => "oxygen stock",
            RecordKind::Equipment => "equipment",
            RecordKind::Ambulance => "ambulance",
            RecordKind::Surgery => "surgery",
            RecordKind::Request => "request",
            RecordKind::Patient => "patient",
            RecordKind::Staff => "staff member",
            RecordKind::Admission => "admission",
            RecordKind::Discharge => "discharge",
            RecordKind::MedicalRecord => "medical record",
            RecordKind::Medication => "medication",
            RecordKind::EmergencyCase => "emergency case",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Timestamp Format
// =============================================================================

/// Serde adapter for `YYYY-MM-DD HH:MM` timestamps, the spelling the
/// dashboard shows for schedules and arrivals.
pub mod minute_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::validation::MINUTE_FORMAT;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(MINUTE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, MINUTE_FORMAT).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Beds
// =============================================================================

/// A bed in a ward or ICU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Bed {
    pub id: String,
    /// Display name, e.g. `ICU-01`.
    pub name: String,
    pub ward: String,
    pub status: BedStatus,
    /// Whether a ventilator is attached.
    pub ventilator: bool,
    /// Occupant, when one is assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub patient: Option<String>,
}

// =============================================================================
// Blood Bank
// =============================================================================

/// Inventory line for one blood type. The blood type is the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BloodUnit {
    /// ABO/Rh type, e.g. `O-`.
    pub blood_type: String,
    pub units: u32,
    /// Below this many units the line is low.
    pub threshold: u32,
    /// Whole Blood, Plasma, Platelets or RBC.
    pub component: String,
}

impl BloodUnit {
    /// Derived stock level.
    ///
    /// ## Example
    /// ```rust
    /// use medmap_core::types::BloodUnit;
    /// use medmap_core::status::StockLevel;
    ///
    /// let unit = BloodUnit {
    ///     blood_type: "O-".to_string(),
    ///     units: 18,
    ///     threshold: 20,
    ///     component: "Whole Blood".to_string(),
    /// };
    /// assert_eq!(unit.stock_level(), StockLevel::Low);
    /// ```
    #[inline]
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::derive(self.units, self.threshold)
    }

    #[inline]
    pub fn quantity(&self) -> Quantity {
        Quantity::new(self.units)
    }
}

// =============================================================================
// Oxygen & Equipment
// =============================================================================

/// A line of oxygen supply (cylinders of one size, or a liquid tank).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OxygenStock {
    pub id: String,
    /// e.g. `Oxygen Cylinder`, `Liquid Oxygen Tank`.
    #[serde(rename = "type")]
    pub supply_type: String,
    /// Cylinder size code (`D`, `E`, `M`) or tank size.
    pub size: String,
    pub available: u32,
    pub in_use: u32,
    pub refilling: u32,
    pub threshold: u32,
}

impl OxygenStock {
    #[inline]
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::derive(self.available, self.threshold)
    }
}

/// A pool of identical medical devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub available: u32,
    pub in_use: u32,
    pub maintenance: u32,
    pub total: u32,
}

impl Equipment {
    /// Largest `available` count the pool can hold: devices in use or in
    /// maintenance are not on the shelf.
    pub fn available_cap(&self) -> Quantity {
        Quantity::new(self.total) - Quantity::new(self.in_use) - Quantity::new(self.maintenance)
    }
}

// =============================================================================
// Ambulances
// =============================================================================

/// A vehicle in the ambulance fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Ambulance {
    pub id: String,
    /// Fleet number, e.g. `AMB-001`.
    pub vehicle_id: String,
    pub driver: String,
    pub status: AmbulanceStatus,
    pub location: String,
    /// Relative time of the last GPS ping, as reported by the tracker.
    pub last_ping: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub distance: Option<String>,
}

// =============================================================================
// Surgery
// =============================================================================

/// A scheduled operating-room slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Surgery {
    pub id: String,
    pub patient_name: String,
    pub procedure: String,
    pub surgeon: String,
    #[serde(with = "minute_format")]
    #[ts(as = "String")]
    pub scheduled_time: NaiveDateTime,
    /// Free text, e.g. `2 hours`.
    pub duration: String,
    pub status: SurgeryStatus,
    pub room: String,
    pub priority: SurgeryPriority,
}

// =============================================================================
// Live Requests
// =============================================================================

/// Patient summary attached to an emergency request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RequestPatient {
    pub name: String,
    pub age: u32,
    pub blood_type: String,
}

/// An incoming emergency request awaiting accept/decline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyRequest {
    pub id: String,
    pub priority: RequestPriority,
    pub patient: RequestPatient,
    pub location: String,
    /// Miles from the hospital.
    pub distance: String,
    pub request_time: String,
    /// Minutes left on the response SLA.
    pub sla_minutes: u32,
    /// Resources asked for (ICU Bed, Ventilator, ...).
    pub resources: Vec<String>,
}

/// What the operator did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RequestDecision {
    Accepted,
    Declined,
}

// =============================================================================
// Patients & Staff
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    #[ts(as = "String")]
    pub admission_date: NaiveDate,
    pub status: PatientStatus,
    pub room: String,
    pub diagnosis: String,
    pub priority: CasePriority,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub department: String,
    pub status: StaffStatus,
    pub shift: String,
    pub phone: String,
    pub email: String,
    pub experience: String,
    pub specialization: String,
    pub location: String,
    #[serde(with = "minute_format")]
    #[ts(as = "String")]
    pub last_active: NaiveDateTime,
}

// =============================================================================
// Admissions & Discharges
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Admission {
    pub id: String,
    pub patient_name: String,
    pub age: u32,
    pub gender: String,
    #[serde(with = "minute_format")]
    #[ts(as = "String")]
    pub admission_time: NaiveDateTime,
    pub status: AdmissionStatus,
    pub priority: CasePriority,
    pub diagnosis: String,
    pub department: String,
    pub assigned_doctor: String,
    pub contact: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Discharge {
    pub id: String,
    pub patient_name: String,
    pub age: u32,
    pub gender: String,
    #[ts(as = "String")]
    pub admission_date: NaiveDate,
    #[ts(as = "String")]
    pub discharge_date: NaiveDate,
    pub status: DischargeStatus,
    pub diagnosis: String,
    pub treatment: String,
    pub room: String,
    pub doctor: String,
    pub contact: String,
    pub email: String,
    pub discharge_notes: String,
}

impl Discharge {
    /// Nights between admission and discharge.
    pub fn length_of_stay(&self) -> i64 {
        (self.discharge_date - self.admission_date).num_days()
    }
}

// =============================================================================
// Medical Records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: String,
    pub patient_name: String,
    /// Id of the patient the record belongs to, e.g. `P001`.
    pub patient_id: String,
    /// Medical History, Lab Results, Imaging Report, Surgery Report, ...
    pub record_type: String,
    #[ts(as = "String")]
    pub date_created: NaiveDate,
    #[serde(with = "minute_format")]
    #[ts(as = "String")]
    pub last_updated: NaiveDateTime,
    pub status: RecordStatus,
    pub department: String,
    pub doctor: String,
    pub description: String,
    pub attachments: u32,
    #[serde(default)]
    pub notes: String,
}

// =============================================================================
// Pharmacy
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub generic_name: String,
    pub category: String,
    pub stock: u32,
    pub min_stock: u32,
    pub max_stock: u32,
    /// vials, tablets, ...
    pub unit: String,
    #[ts(as = "String")]
    pub expiry_date: NaiveDate,
    pub supplier: String,
    #[ts(as = "String")]
    pub last_restocked: NaiveDate,
    /// Unit price in cents.
    pub price_cents: i64,
}

impl Medication {
    /// Derived pharmacy stock level.
    #[inline]
    pub fn stock_level(&self) -> MedicationStock {
        MedicationStock::derive(self.stock, self.min_stock)
    }
}

// =============================================================================
// Emergency Department
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyCase {
    pub id: String,
    pub patient_name: String,
    pub age: u32,
    pub gender: String,
    #[serde(with = "minute_format")]
    #[ts(as = "String")]
    pub arrival_time: NaiveDateTime,
    pub priority: CasePriority,
    pub condition: String,
    pub vital_signs: String,
    pub assigned_doctor: String,
    pub status: EmergencyStatus,
    pub location: String,
    pub contact: String,
    pub notes: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn surgery() -> Surgery {
        Surgery {
            id: "S001".to_string(),
            patient_name: "John Smith".to_string(),
            procedure: "Appendectomy".to_string(),
            surgeon: "Dr. Johnson".to_string(),
            scheduled_time: NaiveDateTime::parse_from_str("2024-01-15 09:00", "%Y-%m-%d %H:%M")
                .unwrap(),
            duration: "2 hours".to_string(),
            status: SurgeryStatus::Scheduled,
            room: "OR-1".to_string(),
            priority: SurgeryPriority::High,
        }
    }

    #[test]
    fn test_record_kind_display() {
        assert_eq!(RecordKind::BloodUnit.to_string(), "blood unit");
        assert_eq!(RecordKind::MedicalRecord.to_string(), "medical record");
    }

    #[test]
    fn test_surgery_serializes_minute_timestamp() {
        let json = serde_json::to_value(surgery()).unwrap();
        assert_eq!(json["scheduledTime"], "2024-01-15 09:00");
        assert_eq!(json["status"], "scheduled");
        assert_eq!(json["patientName"], "John Smith");

        let back: Surgery = serde_json::from_value(json).unwrap();
        assert_eq!(back, surgery());
    }

    #[test]
    fn test_oxygen_type_field_name() {
        let stock = OxygenStock {
            id: "1".to_string(),
            supply_type: "Oxygen Cylinder".to_string(),
            size: "D".to_string(),
            available: 24,
            in_use: 8,
            refilling: 3,
            threshold: 15,
        };
        let json = serde_json::to_value(&stock).unwrap();
        assert_eq!(json["type"], "Oxygen Cylinder");
        assert_eq!(json["inUse"], 8);
        assert_eq!(stock.stock_level(), StockLevel::InStock);
    }

    #[test]
    fn test_equipment_available_cap() {
        let monitors = Equipment {
            id: "2".to_string(),
            name: "Monitors".to_string(),
            available: 12,
            in_use: 18,
            maintenance: 2,
            total: 32,
        };
        assert_eq!(monitors.available_cap().get(), 12);
    }

    #[test]
    fn test_optional_fields_are_optional_in_bindings() {
        assert!(Bed::decl().contains("patient?: string"));
        assert!(Ambulance::decl().contains("distance?: string"));
    }

    #[test]
    fn test_bed_omits_missing_patient() {
        let bed = Bed {
            id: "2".to_string(),
            name: "ICU-02".to_string(),
            ward: "ICU".to_string(),
            status: BedStatus::Available,
            ventilator: true,
            patient: None,
        };
        let json = serde_json::to_value(&bed).unwrap();
        assert!(json.get("patient").is_none());
    }
}
