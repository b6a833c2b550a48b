//! # Drafts
//!
//! Operator-entered, not-yet-committed records. A draft holds form text as
//! typed; committing it validates every field and builds the record, or
//! fails without side effects.
//!
//! ## Commit Flow
//! ```text
//! ┌────────────┐   next_id(existing)   ┌───────────────┐  validate   ┌──────────┐
//! │  NewBed    │ ────────────────────► │ into_record() │ ──────────► │   Bed    │
//! │  (text)    │                       │  id, today    │   ok        │ appended │
//! └────────────┘                       └───────┬───────┘             └──────────┘
//!                                              │ err
//!                                              ▼
//!                                       ValidationError (collection untouched)
//! ```
//!
//! ## Id Schemes
//! New ids continue the numeric suffix of the largest existing id, so an
//! id is never reused even after removals.
//!
//! ```rust
//! use medmap_core::draft::IdScheme;
//!
//! let surgery = IdScheme::Prefixed { prefix: "S", width: 3 };
//! assert_eq!(surgery.next_id(["S001", "S003"]), "S004");
//! assert_eq!(IdScheme::Numeric.next_id(["1", "2", "7"]), "8");
//! assert_eq!(IdScheme::Numeric.next_id(Vec::<&str>::new()), "1");
//! ```

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::filter::Record;
use crate::status::{BedStatus, RecordStatus, StatusTag, SurgeryPriority, SurgeryStatus};
use crate::types::{Bed, Equipment, MedicalRecord, OxygenStock, Surgery};
use crate::validation::{
    parse_count, parse_date, parse_timestamp, validate_capacity, validate_optional,
    validate_required, ValidationResult,
};

// =============================================================================
// Id Scheme
// =============================================================================

/// How new ids are spelled for one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdScheme {
    /// Plain decimal: `"1"`, `"2"`, ...
    Numeric,
    /// Prefix plus zero-padded decimal: `"S001"`, `"MR012"`.
    Prefixed { prefix: &'static str, width: usize },
}

impl IdScheme {
    /// Numeric part of an id under this scheme, if it follows the scheme.
    pub fn sequence_of(&self, id: &str) -> Option<u64> {
        let digits = match self {
            IdScheme::Numeric => id,
            IdScheme::Prefixed { prefix, .. } => id.strip_prefix(prefix)?,
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    pub fn format(&self, sequence: u64) -> String {
        match self {
            IdScheme::Numeric => sequence.to_string(),
            IdScheme::Prefixed { prefix, width } => format!("{prefix}{sequence:0width$}"),
        }
    }

    /// One past the largest existing sequence. Ids outside the scheme are
    /// ignored; they can never collide with a formatted id.
    pub fn next_id<'a, I>(&self, existing: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let max = existing
            .into_iter()
            .filter_map(|id| self.sequence_of(id))
            .max()
            .unwrap_or(0);
        self.format(max.saturating_add(1))
    }
}

// =============================================================================
// Draft Trait
// =============================================================================

/// Form input for a new record of `Self::Record`.
pub trait Draft {
    type Record: Record;

    const ID_SCHEME: IdScheme;

    /// Validates the draft and builds the record under `id`. `today` fills
    /// any date the operator left blank.
    fn into_record(self, id: String, today: NaiveDate) -> ValidationResult<Self::Record>;
}

// =============================================================================
// Beds
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewBed {
    pub name: String,
    pub ward: String,
    #[serde(default)]
    pub ventilator: bool,
}

impl Draft for NewBed {
    type Record = Bed;
    const ID_SCHEME: IdScheme = IdScheme::Numeric;

    fn into_record(self, id: String, _today: NaiveDate) -> ValidationResult<Bed> {
        Ok(Bed {
            id,
            name: validate_required("name", &self.name)?,
            ward: validate_required("ward", &self.ward)?,
            status: BedStatus::Available,
            ventilator: self.ventilator,
            patient: None,
        })
    }
}

// =============================================================================
// Oxygen & Equipment
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewOxygenStock {
    #[serde(rename = "type")]
    pub supply_type: String,
    pub size: String,
    pub available: String,
    pub threshold: String,
}

impl Draft for NewOxygenStock {
    type Record = OxygenStock;
    const ID_SCHEME: IdScheme = IdScheme::Numeric;

    fn into_record(self, id: String, _today: NaiveDate) -> ValidationResult<OxygenStock> {
        Ok(OxygenStock {
            id,
            supply_type: validate_required("type", &self.supply_type)?,
            size: validate_required("size", &self.size)?,
            available: parse_count("available", &self.available)?,
            in_use: 0,
            refilling: 0,
            threshold: parse_count("threshold", &self.threshold)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewEquipment {
    pub name: String,
    pub available: String,
    pub total: String,
}

impl Draft for NewEquipment {
    type Record = Equipment;
    const ID_SCHEME: IdScheme = IdScheme::Numeric;

    fn into_record(self, id: String, _today: NaiveDate) -> ValidationResult<Equipment> {
        let name = validate_required("name", &self.name)?;
        let available = parse_count("available", &self.available)?;
        let total = parse_count("total", &self.total)?;
        validate_capacity(available, total)?;

        Ok(Equipment {
            id,
            name,
            available,
            in_use: 0,
            maintenance: 0,
            total,
        })
    }
}

// =============================================================================
// Surgery
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewSurgery {
    pub patient_name: String,
    pub procedure: String,
    pub surgeon: String,
    /// `YYYY-MM-DD HH:MM` (or the `T`-separated form).
    pub scheduled_time: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub room: String,
    /// Blank means medium.
    #[serde(default)]
    pub priority: String,
}

impl Draft for NewSurgery {
    type Record = Surgery;
    const ID_SCHEME: IdScheme = IdScheme::Prefixed {
        prefix: "S",
        width: 3,
    };

    fn into_record(self, id: String, _today: NaiveDate) -> ValidationResult<Surgery> {
        let priority = match validate_optional("priority", &self.priority)? {
            Some(tag) => SurgeryPriority::parse_tag(&tag)?,
            None => SurgeryPriority::Medium,
        };

        Ok(Surgery {
            id,
            patient_name: validate_required("patientName", &self.patient_name)?,
            procedure: validate_required("procedure", &self.procedure)?,
            surgeon: validate_required("surgeon", &self.surgeon)?,
            scheduled_time: parse_timestamp("scheduledTime", &self.scheduled_time)?,
            duration: validate_optional("duration", &self.duration)?.unwrap_or_default(),
            status: SurgeryStatus::Scheduled,
            room: validate_optional("room", &self.room)?.unwrap_or_default(),
            priority,
        })
    }
}

// =============================================================================
// Medical Records
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicalRecord {
    pub patient_name: String,
    pub patient_id: String,
    pub description: String,
    pub doctor: String,
    /// Blank means `Lab Results`.
    #[serde(default)]
    pub record_type: String,
    #[serde(default)]
    pub department: String,
    /// `YYYY-MM-DD`; blank means today.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub notes: String,
}

impl NewMedicalRecord {
    pub const DEFAULT_RECORD_TYPE: &'static str = "Lab Results";
    pub const DEFAULT_DEPARTMENT: &'static str = "General";
}

impl Draft for NewMedicalRecord {
    type Record = MedicalRecord;
    const ID_SCHEME: IdScheme = IdScheme::Prefixed {
        prefix: "MR",
        width: 3,
    };

    fn into_record(self, id: String, today: NaiveDate) -> ValidationResult<MedicalRecord> {
        let patient_name = validate_required("patientName", &self.patient_name)?;
        let patient_id = validate_required("patientId", &self.patient_id)?;
        let description = validate_required("description", &self.description)?;
        let doctor = validate_required("doctor", &self.doctor)?;

        let date_created = if self.date.trim().is_empty() {
            today
        } else {
            parse_date("date", &self.date)?
        };

        Ok(MedicalRecord {
            id,
            patient_name,
            patient_id,
            record_type: validate_optional("recordType", &self.record_type)?
                .unwrap_or_else(|| Self::DEFAULT_RECORD_TYPE.to_string()),
            date_created,
            last_updated: date_created.and_time(NaiveTime::MIN),
            status: RecordStatus::Active,
            department: validate_optional("department", &self.department)?
                .unwrap_or_else(|| Self::DEFAULT_DEPARTMENT.to_string()),
            doctor,
            description,
            attachments: 0,
            notes: validate_optional("notes", &self.notes)?.unwrap_or_default(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
