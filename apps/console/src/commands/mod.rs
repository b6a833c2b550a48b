//! # Console Commands Module
//!
//! Every operation the console exposes, one file per dashboard area.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (shared listing helpers)
//! ├── beds.rs        ◄─── Bed listing, toggle, release, add
//! ├── stock.rs       ◄─── Blood, oxygen, equipment
//! ├── fleet.rs       ◄─── Ambulances
//! ├── surgery.rs     ◄─── Surgery schedule
//! ├── requests.rs    ◄─── Live request queue
//! ├── records.rs     ◄─── Patients, staff, admissions, ... (read + record add)
//! ├── navigation.rs  ◄─── Routes and status badges
//! ├── stats.rs       ◄─── Summary card counters
//! └── config.rs      ◄─── Configuration and settings changes
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  medmap beds --ward ICU --query icu-0                                   │
//! │         │                                                               │
//! │         │ (clap)                                                        │
//! │         ▼                                                               │
//! │  fn list_beds(                                                          │
//! │      store: &StoreState,      ◄── session state                        │
//! │      ward: Option<&str>,      ◄── facet selection                      │
//! │      status: Option<&str>,                                              │
//! │      query: Option<&str>,     ◄── free text                            │
//! │  ) -> Result<Listing<Bed>, ApiError>                                    │
//! │         │                                                               │
//! │         │ (serde_json)                                                  │
//! │         ▼                                                               │
//! │  stdout: { "total": 8, "visible": 5, "items": [...] }                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod beds;
pub mod config;
pub mod fleet;
pub mod navigation;
pub mod records;
pub mod requests;
pub mod stats;
pub mod stock;
pub mod surgery;

use serde::Serialize;

use medmap_core::filter::ALL;
use medmap_core::{Collection, Facet, FilterState, Record, StatusTag, Store};

use crate::error::ApiError;
use crate::state::StoreState;

/// One page's visible records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing<R> {
    /// Size of the whole collection
    pub total: usize,
    /// Size of the filtered subset
    pub visible: usize,
    pub items: Vec<R>,
}

/// Builds a filter from command flags.
pub(crate) fn filter_state(
    query: Option<&str>,
    selections: &[(Facet, Option<&str>)],
) -> Result<FilterState, ApiError> {
    let mut state = FilterState::new().with_query(query.unwrap_or_default())?;
    for (facet, value) in selections {
        state = state.select_opt(*facet, *value);
    }
    Ok(state)
}

/// Canonical spelling of a status flag, or `None` for "no filter".
///
/// Unknown tags are rejected so a typo does not silently empty the page.
pub(crate) fn tag_selection<S: StatusTag>(value: Option<&str>) -> Result<Option<&'static str>, ApiError> {
    match value {
        None => Ok(None),
        Some(value) if value.trim().eq_ignore_ascii_case(ALL) => Ok(Some(ALL)),
        Some(value) => Ok(Some(S::parse_tag(value)?.as_str())),
    }
}

/// Filters one collection of the session store.
pub(crate) fn list<R>(
    store: &StoreState,
    pick: fn(&Store) -> &Collection<R>,
    filter: &FilterState,
) -> Result<Listing<R>, ApiError>
where
    R: Record + Clone,
{
    store.with_store(|s| {
        let collection = pick(s);
        let items: Vec<R> = collection.filter(filter).into_iter().cloned().collect();
        Listing {
            total: collection.len(),
            visible: items.len(),
            items,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use medmap_core::status::BedStatus;

    #[test]
    fn test_tag_selection_canonicalizes() {
        assert_eq!(tag_selection::<BedStatus>(Some("Occupied")).unwrap(), Some("occupied"));
        assert_eq!(tag_selection::<BedStatus>(Some("ALL")).unwrap(), Some("all"));
        assert_eq!(tag_selection::<BedStatus>(None).unwrap(), None);

        let err = tag_selection::<BedStatus>(Some("asleep")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_filter_state_rejects_long_query() {
        let query = "x".repeat(101);
        let err = filter_state(Some(&query), &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_list_counts() {
        let store = StoreState::seeded();
        let filter = filter_state(None, &[(Facet::Ward, Some("CCU"))]).unwrap();
        let listing = list(&store, Store::beds, &filter).unwrap();
        assert_eq!(listing.total, 8);
        assert_eq!(listing.visible, 3);
        assert_eq!(listing.items.len(), 3);
    }
}
