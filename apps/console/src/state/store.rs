//! # Store State
//!
//! The session store behind a mutex.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command              StoreState                 medmap-core            │
//! │  ───────              ──────────                 ───────────            │
//! │                                                                         │
//! │  beds --ward ICU ───► with_store(|s| ..) ──────► s.beds().filter(..)    │
//! │                                                                         │
//! │  bed-toggle 2 ──────► apply(action) ───────────► s.apply(action, today) │
//! │                          │                                              │
//! │                          ├── Ok  → info!  (record id, kind)             │
//! │                          └── Err → warn!  (reason)                      │
//! │                                                                         │
//! │  NOTE: every call takes the lock for its whole duration, so commands    │
//! │        run one at a time, in order.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use medmap_core::{Action, Outcome, Store};

use crate::error::ApiError;

/// Shared handle to the session store.
#[derive(Debug, Clone)]
pub struct StoreState {
    store: Arc<Mutex<Store>>,
    started_at: DateTime<Utc>,
}

impl StoreState {
    pub fn new(store: Store) -> Self {
        StoreState {
            store: Arc::new(Mutex::new(store)),
            started_at: Utc::now(),
        }
    }

    /// A session over the sample data.
    pub fn seeded() -> Self {
        StoreState::new(Store::seeded())
    }

    /// When this session began.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = store_state.with_store(|store| store.beds().len())?;
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&Store) -> R,
    {
        let store = self.lock()?;
        Ok(f(&store))
    }

    /// Applies one action with today's date (UTC) and logs the result.
    pub fn apply(&self, action: Action) -> Result<Outcome, ApiError> {
        self.apply_on(action, Utc::now().date_naive())
    }

    /// Like [`apply`](Self::apply) with an explicit date.
    pub fn apply_on(&self, action: Action, today: NaiveDate) -> Result<Outcome, ApiError> {
        let kind = action.kind();
        let mut store = self.lock()?;

        match store.apply(action, today) {
            Ok(outcome) => {
                info!(%kind, "Applied action");
                Ok(outcome)
            }
            Err(err) => {
                warn!(%kind, reason = %err, "Action refused");
                Err(err.into())
            }
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, ApiError> {
        self.store
            .lock()
            .map_err(|_| ApiError::internal("Store lock poisoned"))
    }
}
