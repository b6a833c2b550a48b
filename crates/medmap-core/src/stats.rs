//! # Page Statistics
//!
//! The counters shown in the summary cards at the top of each page, as pure
//! functions of a collection.
//!
//! ```rust
//! use medmap_core::fixtures;
//! use medmap_core::stats::BedStats;
//!
//! let stats = BedStats::from(fixtures::beds().as_slice());
//! assert_eq!((stats.total, stats.available, stats.occupied, stats.cleaning), (8, 3, 3, 1));
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::quantity::Quantity;
use crate::status::{
    AmbulanceStatus, BedStatus, MedicationStock, RequestPriority, StaffStatus, StockLevel,
    SurgeryStatus,
};
use crate::types::{
    Ambulance, Bed, BloodUnit, EmergencyRequest, Equipment, Medication, OxygenStock, StaffMember,
    Surgery,
};

fn count<T>(items: &[T], pred: impl Fn(&T) -> bool) -> usize {
    items.iter().filter(|item| pred(item)).count()
}

fn total<T>(items: &[T], field: impl Fn(&T) -> u32) -> u32 {
    items.iter().map(|item| Quantity::new(field(item))).sum::<Quantity>().get()
}

// =============================================================================
// Resource Pages
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BedStats {
    pub total: usize,
    pub available: usize,
    pub occupied: usize,
    pub cleaning: usize,
}

impl From<&[Bed]> for BedStats {
    fn from(beds: &[Bed]) -> Self {
        let with = |status: BedStatus| count(beds, |b| b.status == status);
        BedStats {
            total: beds.len(),
            available: with(BedStatus::Available),
            occupied: with(BedStatus::Occupied),
            cleaning: with(BedStatus::Cleaning),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BloodStats {
    pub total_units: u32,
    pub in_stock: usize,
    /// Below threshold, including empty lines.
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl From<&[BloodUnit]> for BloodStats {
    fn from(units: &[BloodUnit]) -> Self {
        BloodStats {
            total_units: total(units, |u| u.units),
            in_stock: count(units, |u| u.stock_level() == StockLevel::InStock),
            low_stock: count(units, |u| u.units < u.threshold),
            out_of_stock: count(units, |u| u.stock_level() == StockLevel::Out),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OxygenStats {
    pub available: u32,
    pub in_use: u32,
    pub low_stock: usize,
    pub refilling: u32,
}

impl From<&[OxygenStock]> for OxygenStats {
    fn from(stock: &[OxygenStock]) -> Self {
        OxygenStats {
            available: total(stock, |o| o.available),
            in_use: total(stock, |o| o.in_use),
            low_stock: count(stock, |o| o.available < o.threshold),
            refilling: total(stock, |o| o.refilling),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentStats {
    pub available: u32,
    pub in_use: u32,
    pub maintenance: u32,
    pub total: u32,
}

impl From<&[Equipment]> for EquipmentStats {
    fn from(items: &[Equipment]) -> Self {
        EquipmentStats {
            available: total(items, |e| e.available),
            in_use: total(items, |e| e.in_use),
            maintenance: total(items, |e| e.maintenance),
            total: total(items, |e| e.total),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AmbulanceStats {
    pub total: usize,
    pub on_duty: usize,
    /// Dispatched or en route.
    pub dispatched: usize,
    pub off: usize,
}

impl From<&[Ambulance]> for AmbulanceStats {
    fn from(fleet: &[Ambulance]) -> Self {
        use AmbulanceStatus::*;
        AmbulanceStats {
            total: fleet.len(),
            on_duty: count(fleet, |a| a.status == OnDuty),
            dispatched: count(fleet, |a| matches!(a.status, Dispatched | EnRoute)),
            off: count(fleet, |a| a.status == Off),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SurgeryStats {
    pub total: usize,
    pub scheduled: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl From<&[Surgery]> for SurgeryStats {
    fn from(surgeries: &[Surgery]) -> Self {
        let with = |status: SurgeryStatus| count(surgeries, |s| s.status == status);
        SurgeryStats {
            total: surgeries.len(),
            scheduled: with(SurgeryStatus::Scheduled),
            in_progress: with(SurgeryStatus::InProgress),
            completed: with(SurgeryStatus::Completed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RequestStats {
    pub pending: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
}

impl From<&[EmergencyRequest]> for RequestStats {
    fn from(requests: &[EmergencyRequest]) -> Self {
        let with = |priority: RequestPriority| count(requests, |r| r.priority == priority);
        RequestStats {
            pending: requests.len(),
            critical: with(RequestPriority::Critical),
            high: with(RequestPriority::High),
            medium: with(RequestPriority::Medium),
        }
    }
}

// =============================================================================
// Record Pages
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StaffStats {
    pub total: usize,
    pub on_duty: usize,
    pub on_call: usize,
    pub off_duty: usize,
}

impl From<&[StaffMember]> for StaffStats {
    fn from(staff: &[StaffMember]) -> Self {
        let with = |status: StaffStatus| count(staff, |m| m.status == status);
        StaffStats {
            total: staff.len(),
            on_duty: with(StaffStatus::OnDuty),
            on_call: with(StaffStatus::OnCall),
            off_duty: with(StaffStatus::OffDuty),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyStats {
    pub total: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub available: usize,
}

impl From<&[Medication]> for PharmacyStats {
    fn from(medications: &[Medication]) -> Self {
        let with = |level: MedicationStock| count(medications, |m| m.stock_level() == level);
        PharmacyStats {
            total: medications.len(),
            low_stock: with(MedicationStock::Low),
            out_of_stock: with(MedicationStock::Out),
            available: with(MedicationStock::Available),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
