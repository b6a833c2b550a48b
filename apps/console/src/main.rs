//! # MedMap Console Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MedMap Console                                   │
//! │                                                                         │
//! │  main.rs ────► hands off to the library                                 │
//! │                                                                         │
//! │  lib.rs ─────► logging, config, session, dispatch, shell                │
//! │                                                                         │
//! │  commands/ ──► beds, stock, fleet, surgery, requests, records, ...      │
//! │                                                                         │
//! │  state/ ─────► StoreState, ConfigState                                  │
//! │                                                                         │
//! │                         │                                               │
//! │                         ▼                                               │
//! │                  medmap-core (Store::apply)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    medmap_console::run()
}
