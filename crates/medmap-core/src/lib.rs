//! # medmap-core: Pure Domain Logic for MedMap
//!
//! This crate is the **heart** of the MedMap hospital operations dashboard.
//! It holds the status vocabulary, the filter/search rules and every
//! mutation the operator can perform, as pure functions over in-memory
//! collections.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       MedMap Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  apps/console (medmap binary)                   │   │
//! │  │    beds, bed-toggle, blood-adjust, surgery-add, shell, ...      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Action / FilterState                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ medmap-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  status   │  │  filter   │  │   store   │  │   draft   │  │   │
//! │  │   │ taxonomy  │  │  facets   │  │  apply()  │  │  id rules │  │   │
//! │  │   │ resolve() │  │  search   │  │ Outcome   │  │ validate  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO PERSISTENCE • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`status`] - Status tags per entity kind and their display descriptors
//! - [`types`] - Records (Bed, BloodUnit, Ambulance, Surgery, ...)
//! - [`filter`] - Facet selection and free-text search
//! - [`store`] - The session store and its single mutation entry point
//! - [`draft`] - Operator input for new records, plus id schemes
//! - [`transition`] - Which status changes are allowed
//! - [`quantity`] - Non-negative stock counts with clamped adjustment
//! - [`stats`] - Summary card counters
//! - [`routes`] - The page route table
//! - [`fixtures`] - Seed data
//! - [`error`] / [`validation`] - Typed errors and field checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same store + same action = same result
//! 2. **No I/O**: the caller supplies today's date; nothing here reads a clock
//! 3. **All or Nothing**: a refused mutation leaves the store untouched
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use medmap_core::filter::{Facet, FilterState};
//! use medmap_core::status::{self, EntityKind};
//! use medmap_core::Store;
//!
//! let store = Store::seeded();
//!
//! // Ambulances whose vehicle id contains "amb-00", any status
//! let filter = FilterState::new().with_query("amb-00").unwrap();
//! assert_eq!(store.ambulances().filter(&filter).len(), 6);
//!
//! // Only ICU beds
//! let icu = FilterState::new().select(Facet::Ward, "ICU");
//! assert_eq!(store.beds().filter(&icu).len(), 5);
//!
//! // Unknown tags still render
//! let descriptor = status::resolve(EntityKind::Bed, "teleported");
//! assert!(descriptor.is_unknown());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod collection;
pub mod draft;
pub mod error;
pub mod filter;
pub mod fixtures;
pub mod quantity;
pub mod routes;
pub mod stats;
pub mod status;
pub mod store;
pub mod transition;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use medmap_core::Store` instead of
// `use medmap_core::store::Store`

pub use collection::Collection;
pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{Facet, FilterState, Record};
pub use quantity::Quantity;
pub use status::{EntityKind, StatusDescriptor, StatusTag, Tone};
pub use store::{Action, Outcome, Store};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Product name shown in the header and the login screen.
pub const APP_NAME: &str = "MedMap";
