//! # Status Taxonomy
//!
//! Closed status vocabularies for every record kind, and the resolver that
//! turns a tag into a presentation descriptor.
//!
//! ## Vocabulary Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Status Taxonomy                                 │
//! │                                                                         │
//! │  tag (wire spelling) ──► StatusTag enum ──► Tone ──► style class        │
//! │                                                                         │
//! │  "occupied"  ──► BedStatus::Occupied      ──► Info    ──► bg-info/10 …  │
//! │  "enroute"   ──► AmbulanceStatus::EnRoute ──► Info    ──► bg-info/10 …  │
//! │  "Low Stock" ──► MedicationStock::Low     ──► Warning ──► bg-warning/10 │
//! │  "???"       ──► (none)                   ──► Neutral ──► "Unknown"     │
//! │                                                                         │
//! │  Same spelling, different kind: `available` is a bed status and        │
//! │  `Available` a medication stock level. The kind decides.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Parsing (`FromStr`) is strict and fails with [`ValidationError::NotAllowed`].
//! Resolving for display ([`resolve`]) never fails: unknown tags get the
//! neutral "Unknown" descriptor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::ValidationResult;

// =============================================================================
// Tone
// =============================================================================

/// Visual tone of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Warning,
    Emergency,
    Info,
    Muted,
    Destructive,
    /// Fallback for tags outside every vocabulary.
    Neutral,
}

impl Tone {
    /// Style class applied to a badge with this tone.
    pub const fn style_class(&self) -> &'static str {
        match self {
            Tone::Success => "bg-success/10 text-success border-success/20",
            Tone::Warning => "bg-warning/10 text-warning border-warning/20",
            Tone::Emergency => "bg-emergency/10 text-emergency border-emergency/20",
            Tone::Info => "bg-info/10 text-info border-info/20",
            Tone::Muted => "bg-muted text-muted-foreground border-border",
            Tone::Destructive => "bg-destructive/10 text-destructive border-destructive/20",
            Tone::Neutral => "bg-muted/50 text-muted-foreground border-dashed border-border",
        }
    }
}

// =============================================================================
// Status Descriptor
// =============================================================================

/// What a badge renders for one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StatusDescriptor {
    /// The tag as given (canonical spelling when it was recognized).
    pub tag: String,
    pub label: String,
    pub tone: Tone,
    pub style_class: String,
}

impl StatusDescriptor {
    /// Label shown for tags outside the vocabulary.
    pub const UNKNOWN_LABEL: &'static str = "Unknown";

    fn new(tag: &str, label: &str, tone: Tone) -> Self {
        StatusDescriptor {
            tag: tag.to_string(),
            label: label.to_string(),
            tone,
            style_class: tone.style_class().to_string(),
        }
    }

    /// The fallback descriptor for an unrecognized tag.
    pub fn unknown(tag: &str) -> Self {
        StatusDescriptor::new(tag, Self::UNKNOWN_LABEL, Tone::Neutral)
    }

    /// Whether this is the fallback descriptor.
    pub fn is_unknown(&self) -> bool {
        self.tone == Tone::Neutral
    }
}

// =============================================================================
// Entity Kind
// =============================================================================

/// The context a status tag is interpreted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Bed,
    /// Blood and oxygen stock levels (derived from units vs threshold).
    Stock,
    Ambulance,
    Surgery,
    SurgeryPriority,
    RequestPriority,
    CasePriority,
    Patient,
    Staff,
    Admission,
    Discharge,
    MedicalRecord,
    Medication,
    EmergencyCase,
}

impl EntityKind {
    /// Every kind, in declaration order.
    pub const ALL: &'static [EntityKind] = &[
        EntityKind::Bed,
        EntityKind::Stock,
        EntityKind::Ambulance,
        EntityKind::Surgery,
        EntityKind::SurgeryPriority,
        EntityKind::RequestPriority,
        EntityKind::CasePriority,
        EntityKind::Patient,
        EntityKind::Staff,
        EntityKind::Admission,
        EntityKind::Discharge,
        EntityKind::MedicalRecord,
        EntityKind::Medication,
        EntityKind::EmergencyCase,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Bed => "bed",
            EntityKind::Stock => "stock",
            EntityKind::Ambulance => "ambulance",
            EntityKind::Surgery => "surgery",
            EntityKind::SurgeryPriority => "surgery-priority",
            EntityKind::RequestPriority => "request-priority",
            EntityKind::CasePriority => "case-priority",
            EntityKind::Patient => "patient",
            EntityKind::Staff => "staff",
            EntityKind::Admission => "admission",
            EntityKind::Discharge => "discharge",
            EntityKind::MedicalRecord => "medical-record",
            EntityKind::Medication => "medication",
            EntityKind::EmergencyCase => "emergency-case",
        }
    }

    /// Field name used in validation errors for this vocabulary.
    pub const fn field_name(&self) -> &'static str {
        match self {
            EntityKind::SurgeryPriority
            | EntityKind::RequestPriority
            | EntityKind::CasePriority => "priority",
            EntityKind::Stock | EntityKind::Medication => "stock level",
            _ => "status",
        }
    }

    /// Canonical tags of this vocabulary.
    pub fn tags(&self) -> Vec<&'static str> {
        match self {
            EntityKind::Bed => tags_of::<BedStatus>(),
            EntityKind::Stock => tags_of::<StockLevel>(),
            EntityKind::Ambulance => tags_of::<AmbulanceStatus>(),
            EntityKind::Surgery => tags_of::<SurgeryStatus>(),
            EntityKind::SurgeryPriority => tags_of::<SurgeryPriority>(),
            EntityKind::RequestPriority => tags_of::<RequestPriority>(),
            EntityKind::CasePriority => tags_of::<CasePriority>(),
            EntityKind::Patient => tags_of::<PatientStatus>(),
            EntityKind::Staff => tags_of::<StaffStatus>(),
            EntityKind::Admission => tags_of::<AdmissionStatus>(),
            EntityKind::Discharge => tags_of::<DischargeStatus>(),
            EntityKind::MedicalRecord => tags_of::<RecordStatus>(),
            EntityKind::Medication => tags_of::<MedicationStock>(),
            EntityKind::EmergencyCase => tags_of::<EmergencyStatus>(),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ValidationError;

    /// Accepts the canonical name plus the page aliases `blood` and `oxygen`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("blood") || s.eq_ignore_ascii_case("oxygen") {
            return Ok(EntityKind::Stock);
        }
        EntityKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "kind".to_string(),
                allowed: EntityKind::ALL.iter().map(|k| k.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// StatusTag Trait
// =============================================================================

/// A member of one closed status vocabulary.
pub trait StatusTag: Copy + Eq + Sized + 'static {
    /// Vocabulary this tag belongs to.
    const KIND: EntityKind;

    /// Every member, in display order.
    const ALL: &'static [Self];

    /// Wire spelling (what serde reads and writes).
    fn as_str(&self) -> &'static str;

    /// Human-readable badge label.
    fn label(&self) -> &'static str;

    fn tone(&self) -> Tone;

    fn descriptor(&self) -> StatusDescriptor {
        StatusDescriptor::new(self.as_str(), self.label(), self.tone())
    }

    /// Parses a tag by its wire spelling, ignoring ASCII case and
    /// surrounding whitespace.
    fn parse_tag(tag: &str) -> ValidationResult<Self> {
        let tag = tag.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: Self::KIND.field_name().to_string(),
                allowed: tags_of::<Self>().into_iter().map(String::from).collect(),
            })
    }
}

fn tags_of<S: StatusTag>() -> Vec<&'static str> {
    S::ALL.iter().map(|s| s.as_str()).collect()
}

/// Declares one closed vocabulary: the enum, its serde spellings, and the
/// `StatusTag`, `Display` and `FromStr` impls.
macro_rules! status_vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident => $kind:ident {
            $( $variant:ident = ($wire:literal, $label:literal, $tone:ident) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
        #[ts(export)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl StatusTag for $name {
            const KIND: EntityKind = EntityKind::$kind;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            fn tone(&self) -> Tone {
                match self {
                    $($name::$variant => Tone::$tone,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$name as StatusTag>::parse_tag(s)
            }
        }
    };
}

// =============================================================================
// Resource Vocabularies
// =============================================================================

status_vocabulary! {
    /// Occupancy state of a bed.
    BedStatus => Bed {
        Available = ("available", "Available", Success),
        Occupied = ("occupied", "Occupied", Info),
        Cleaning = ("cleaning", "Cleaning", Muted),
        Blocked = ("blocked", "Blocked", Destructive),
    }
}

status_vocabulary! {
    /// Stock level of a blood unit or oxygen line, derived from units vs
    /// threshold (see [`StockLevel::derive`]).
    StockLevel => Stock {
        InStock = ("in-stock", "In Stock", Success),
        Low = ("low", "Low", Warning),
        Out = ("out", "Out", Emergency),
    }
}

status_vocabulary! {
    /// Fleet state of an ambulance.
    AmbulanceStatus => Ambulance {
        OnDuty = ("onduty", "On Duty", Success),
        Dispatched = ("dispatched", "Dispatched", Warning),
        EnRoute = ("enroute", "En route", Info),
        Off = ("off", "Off", Muted),
    }
}

status_vocabulary! {
    /// Lifecycle of a scheduled surgery.
    SurgeryStatus => Surgery {
        Scheduled = ("scheduled", "Scheduled", Info),
        InProgress = ("in-progress", "In Progress", Warning),
        Completed = ("completed", "Completed", Success),
        Cancelled = ("cancelled", "Cancelled", Emergency),
    }
}

status_vocabulary! {
    SurgeryPriority => SurgeryPriority {
        Low = ("low", "Low", Success),
        Medium = ("medium", "Medium", Info),
        High = ("high", "High", Warning),
        Urgent = ("urgent", "Urgent", Emergency),
    }
}

status_vocabulary! {
    /// Priority of an incoming emergency request. Requests have no
    /// lifecycle status: they are accepted or declined and leave the queue.
    RequestPriority => RequestPriority {
        Critical = ("critical", "Critical", Emergency),
        High = ("high", "High", Warning),
        Medium = ("medium", "Medium", Info),
    }
}

// =============================================================================
// Record Vocabularies
// =============================================================================

status_vocabulary! {
    /// Triage priority shared by patients, admissions and emergency cases.
    CasePriority => CasePriority {
        Critical = ("Critical", "Critical", Emergency),
        High = ("High", "High", Warning),
        Medium = ("Medium", "Medium", Info),
        Low = ("Low", "Low", Success),
    }
}

status_vocabulary! {
    PatientStatus => Patient {
        Critical = ("Critical", "Critical", Emergency),
        Active = ("Active", "Active", Warning),
        Recovering = ("Recovering", "Recovering", Info),
        Discharged = ("Discharged", "Discharged", Success),
    }
}

status_vocabulary! {
    StaffStatus => Staff {
        OnDuty = ("On Duty", "On Duty", Success),
        OnCall = ("On Call", "On Call", Warning),
        OffDuty = ("Off Duty", "Off Duty", Muted),
    }
}

status_vocabulary! {
    AdmissionStatus => Admission {
        Pending = ("Pending", "Pending", Warning),
        Approved = ("Approved", "Approved", Success),
        Rejected = ("Rejected", "Rejected", Emergency),
    }
}

status_vocabulary! {
    DischargeStatus => Discharge {
        Ready = ("Ready", "Ready", Success),
        Processing = ("Processing", "Processing", Warning),
        Completed = ("Completed", "Completed", Info),
    }
}

status_vocabulary! {
    RecordStatus => MedicalRecord {
        Active = ("Active", "Active", Success),
        Archived = ("Archived", "Archived", Muted),
    }
}

status_vocabulary! {
    /// Pharmacy stock level (see [`MedicationStock::derive`]).
    MedicationStock => Medication {
        Available = ("Available", "Available", Success),
        Low = ("Low Stock", "Low Stock", Warning),
        Out = ("Out of Stock", "Out of Stock", Emergency),
    }
}

status_vocabulary! {
    EmergencyStatus => EmergencyCase {
        Active = ("Active", "Active", Emergency),
        Stabilizing = ("Stabilizing", "Stabilizing", Warning),
        UnderObservation = ("Under Observation", "Under Observation", Info),
        WaitingForTests = ("Waiting for Tests", "Waiting for Tests", Muted),
    }
}

// =============================================================================
// Derived Levels
// =============================================================================

impl StockLevel {
    /// Derives the level of a stock line.
    ///
    /// - `units == 0` → `Out`
    /// - `units < threshold` → `Low`
    /// - otherwise → `InStock`
    ///
    /// ## Example
    /// ```rust
    /// use medmap_core::status::StockLevel;
    ///
    /// assert_eq!(StockLevel::derive(18, 20), StockLevel::Low);
    /// assert_eq!(StockLevel::derive(0, 20), StockLevel::Out);
    /// assert_eq!(StockLevel::derive(20, 20), StockLevel::InStock);
    /// ```
    pub const fn derive(units: u32, threshold: u32) -> Self {
        if units == 0 {
            StockLevel::Out
        } else if units < threshold {
            StockLevel::Low
        } else {
            StockLevel::InStock
        }
    }
}

impl MedicationStock {
    /// Pharmacy rule: at or below the minimum counts as low.
    pub const fn derive(stock: u32, min_stock: u32) -> Self {
        if stock == 0 {
            MedicationStock::Out
        } else if stock <= min_stock {
            MedicationStock::Low
        } else {
            MedicationStock::Available
        }
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves a tag to its badge descriptor within one vocabulary.
///
/// Never fails: a tag outside the vocabulary yields
/// [`StatusDescriptor::unknown`].
///
/// ## Example
/// ```rust
/// use medmap_core::status::{resolve, EntityKind, Tone};
///
/// let badge = resolve(EntityKind::Ambulance, "enroute");
/// assert_eq!(badge.label, "En route");
/// assert_eq!(badge.tone, Tone::Info);
///
/// let badge = resolve(EntityKind::Bed, "enroute");
/// assert!(badge.is_unknown());
/// ```
pub fn resolve(kind: EntityKind, tag: &str) -> StatusDescriptor {
    match kind {
        EntityKind::Bed => describe::<BedStatus>(tag),
        EntityKind::Stock => describe::<StockLevel>(tag),
        EntityKind::Ambulance => describe::<AmbulanceStatus>(tag),
        EntityKind::Surgery => describe::<SurgeryStatus>(tag),
        EntityKind::SurgeryPriority => describe::<SurgeryPriority>(tag),
        EntityKind::RequestPriority => describe::<RequestPriority>(tag),
        EntityKind::CasePriority => describe::<CasePriority>(tag),
        EntityKind::Patient => describe::<PatientStatus>(tag),
        EntityKind::Staff => describe::<StaffStatus>(tag),
        EntityKind::Admission => describe::<AdmissionStatus>(tag),
        EntityKind::Discharge => describe::<DischargeStatus>(tag),
        EntityKind::MedicalRecord => describe::<RecordStatus>(tag),
        EntityKind::Medication => describe::<MedicationStock>(tag),
        EntityKind::EmergencyCase => describe::<EmergencyStatus>(tag),
    }
}

fn describe<S: StatusTag>(tag: &str) -> StatusDescriptor {
    S::parse_tag(tag)
        .map(|status| status.descriptor())
        .unwrap_or_else(|_| StatusDescriptor::unknown(tag))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bed_vocabulary() {
        assert_eq!(BedStatus::ALL.len(), 4);
        assert_eq!(BedStatus::Occupied.as_str(), "occupied");
        assert_eq!(BedStatus::Blocked.tone(), Tone::Destructive);
        assert_eq!("cleaning".parse::<BedStatus>().unwrap(), BedStatus::Cleaning);
    }

    #[test]
    fn test_parse_ignores_case_and_whitespace() {
        assert_eq!(" ONDUTY ".parse::<AmbulanceStatus>().unwrap(), AmbulanceStatus::OnDuty);
        assert_eq!("on call".parse::<StaffStatus>().unwrap(), StaffStatus::OnCall);
        assert_eq!(
            "In-Progress".parse::<SurgeryStatus>().unwrap(),
            SurgeryStatus::InProgress
        );
    }

    #[test]
    fn test_parse_unknown_tag_lists_allowed() {
        let err = "lost".parse::<AmbulanceStatus>().unwrap_err();
        match err {
            ValidationError::NotAllowed { field, allowed } => {
                assert_eq!(field, "status");
                assert_eq!(allowed, vec!["onduty", "dispatched", "enroute", "off"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_shared_spelling_depends_on_kind() {
        let bed = resolve(EntityKind::Bed, "available");
        let medication = resolve(EntityKind::Medication, "available");
        assert_eq!(bed.label, "Available");
        assert_eq!(medication.label, "Available");
        assert_eq!(bed.tag, "available");
        assert_eq!(medication.tag, "Available");

        // `off` is an ambulance state, not a staff one.
        assert!(!resolve(EntityKind::Ambulance, "off").is_unknown());
        assert!(resolve(EntityKind::Staff, "off").is_unknown());
    }

    #[test]
    fn test_resolve_unknown_falls_back() {
        let badge = resolve(EntityKind::Surgery, "postponed");
        assert_eq!(badge.label, StatusDescriptor::UNKNOWN_LABEL);
        assert_eq!(badge.tone, Tone::Neutral);
        assert_eq!(badge.tag, "postponed");
        assert_eq!(badge.style_class, Tone::Neutral.style_class());
    }

    #[test]
    fn test_every_tag_resolves_in_its_own_kind() {
        for kind in EntityKind::ALL {
            for tag in kind.tags() {
                assert!(!resolve(*kind, tag).is_unknown(), "{kind}/{tag}");
            }
        }
    }

    #[test]
    fn test_descriptor_style_follows_tone() {
        let badge = BedStatus::Available.descriptor();
        assert_eq!(badge.style_class, "bg-success/10 text-success border-success/20");
        let badge = AmbulanceStatus::Off.descriptor();
        assert_eq!(badge.style_class, "bg-muted text-muted-foreground border-border");
    }

    #[test]
    fn test_stock_level_derivation() {
        assert_eq!(StockLevel::derive(18, 20), StockLevel::Low);
        assert_eq!(StockLevel::derive(0, 0), StockLevel::Out);
        assert_eq!(StockLevel::derive(45, 20), StockLevel::InStock);
        assert_eq!(StockLevel::derive(20, 20), StockLevel::InStock);
    }

    #[test]
    fn test_medication_stock_derivation() {
        assert_eq!(MedicationStock::derive(0, 10), MedicationStock::Out);
        assert_eq!(MedicationStock::derive(8, 15), MedicationStock::Low);
        assert_eq!(MedicationStock::derive(15, 15), MedicationStock::Low);
        assert_eq!(MedicationStock::derive(45, 20), MedicationStock::Available);
    }

    #[test]
    fn test_entity_kind_aliases() {
        assert_eq!("blood".parse::<EntityKind>().unwrap(), EntityKind::Stock);
        assert_eq!("Oxygen".parse::<EntityKind>().unwrap(), EntityKind::Stock);
        assert_eq!(
            "medical-record".parse::<EntityKind>().unwrap(),
            EntityKind::MedicalRecord
        );
        assert!("wardrobe".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_spelling() {
        let json = serde_json::to_string(&AmbulanceStatus::EnRoute).unwrap();
        assert_eq!(json, "\"enroute\"");
        let status: StaffStatus = serde_json::from_str("\"Off Duty\"").unwrap();
        assert_eq!(status, StaffStatus::OffDuty);
    }
}
