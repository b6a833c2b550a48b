//! # State Module
//!
//! Session state for the console.
//!
//! Two focused state types instead of one `AppState`; each command takes
//! only what it reads.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      medmap_console::run                        │   │
//! │  │  let config   = ConfigState::from_env();                        │   │
//! │  │  let settings = SettingsState::new(config);                     │   │
//! │  │  let store    = StoreState seeded or empty;                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │               ┌──────────────┴──────────────┐                           │
//! │               ▼                             ▼                           │
//! │  ┌──────────────────────────┐  ┌──────────────────────────┐            │
//! │  │       StoreState         │  │      SettingsState       │            │
//! │  │                          │  │                          │            │
//! │  │  Arc<Mutex<Store>>       │  │  Arc<Mutex<ConfigState>> │            │
//! │  │                          │  │  hospital contact        │            │
//! │  │  started_at              │  │  notification switches   │            │
//! │  │                          │  │  session timeout         │            │
//! │  └──────────────────────────┘  └──────────────────────────┘            │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • StoreState: one command holds the lock for its whole run            │
//! │  • SettingsState: same, changed only by settings-set                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod settings;
mod store;

pub use config::{
    ConfigState, HospitalInfo, NotificationSettings, SecuritySettings, SettingsSection,
};
pub use settings::SettingsState;
pub use store::StoreState;
