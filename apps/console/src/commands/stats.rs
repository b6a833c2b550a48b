//! # Statistics Commands
//!
//! The summary cards of each page, plus the dashboard overview that
//! combines the resource pages.

use clap::ValueEnum;
use serde::Serialize;
use tracing::debug;

use medmap_core::stats::{
    AmbulanceStats, BedStats, BloodStats, EquipmentStats, OxygenStats, PharmacyStats,
    RequestStats, StaffStats, SurgeryStats,
};
use medmap_core::Store;

use crate::error::ApiError;
use crate::state::StoreState;

/// Pages that show summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatsPage {
    Dashboard,
    Beds,
    Blood,
    Oxygen,
    Equipment,
    Ambulances,
    Surgery,
    Requests,
    Staff,
    Pharmacy,
}

/// The dashboard's resource overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub beds: BedStats,
    pub blood: BloodStats,
    pub oxygen: OxygenStats,
    pub ambulances: AmbulanceStats,
    pub requests: RequestStats,
}

impl From<&Store> for DashboardStats {
    fn from(store: &Store) -> Self {
        DashboardStats {
            beds: store.beds().as_slice().into(),
            blood: store.blood_units().as_slice().into(),
            oxygen: store.oxygen_stock().as_slice().into(),
            ambulances: store.ambulances().as_slice().into(),
            requests: store.requests().as_slice().into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageStats {
    Dashboard(DashboardStats),
    Beds(BedStats),
    Blood(BloodStats),
    Oxygen(OxygenStats),
    Equipment(EquipmentStats),
    Ambulances(AmbulanceStats),
    Surgery(SurgeryStats),
    Requests(RequestStats),
    Staff(StaffStats),
    Pharmacy(PharmacyStats),
}

pub fn get_stats(store: &StoreState, page: StatsPage) -> Result<PageStats, ApiError> {
    debug!(?page, "get_stats command");
    store.with_store(|s| match page {
        StatsPage::Dashboard => PageStats::Dashboard(DashboardStats::from(s)),
        StatsPage::Beds => PageStats::Beds(s.beds().as_slice().into()),
        StatsPage::Blood => PageStats::Blood(s.blood_units().as_slice().into()),
        StatsPage::Oxygen => PageStats::Oxygen(s.oxygen_stock().as_slice().into()),
        StatsPage::Equipment => PageStats::Equipment(s.equipment().as_slice().into()),
        StatsPage::Ambulances => PageStats::Ambulances(s.ambulances().as_slice().into()),
        StatsPage::Surgery => PageStats::Surgery(s.surgeries().as_slice().into()),
        StatsPage::Requests => PageStats::Requests(s.requests().as_slice().into()),
        StatsPage::Staff => PageStats::Staff(s.staff().as_slice().into()),
        StatsPage::Pharmacy => PageStats::Pharmacy(s.medications().as_slice().into()),
    })
}
