//! # Command Line
//!
//! clap definitions for `medmap <command>`. The interactive shell parses
//! each line with the same definitions.

use clap::{Args, Parser, Subcommand};

use crate::commands::stats::StatsPage;
use crate::error::ApiError;
use crate::state::SettingsSection;

#[derive(Debug, Parser)]
#[command(name = "medmap")]
#[command(about = "MedMap hospital operations console")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Free-text search shared by every listing.
#[derive(Debug, Clone, Default, Args)]
pub struct Search {
    /// Case-insensitive substring over the page's search fields
    #[arg(long, short)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------
    /// List the route table
    Routes,
    /// Resolve a path to its page
    Route { path: String },
    /// Show the badge for a status tag (or every tag of a kind)
    Status { kind: String, tag: Option<String> },
    /// Show the configuration
    Config,
    /// Change one setting (key as shown by `config`)
    SettingsSet {
        #[arg(value_enum)]
        section: SettingsSection,
        key: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Summary card counters for a page
    Stats {
        #[arg(value_enum)]
        page: StatsPage,
    },

    // -------------------------------------------------------------------------
    // Beds
    // -------------------------------------------------------------------------
    /// List beds
    Beds {
        #[arg(long)]
        ward: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        search: Search,
    },
    /// Flip a bed between available and occupied
    BedToggle { id: String },
    /// Return a cleaning or blocked bed to service
    BedRelease { id: String },
    /// Add a bed
    BedAdd {
        #[arg(long)]
        name: String,
        #[arg(long)]
        ward: String,
        #[arg(long)]
        ventilator: bool,
    },

    // -------------------------------------------------------------------------
    // Stock
    // -------------------------------------------------------------------------
    /// List blood units
    Blood {
        #[arg(long)]
        component: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        search: Search,
    },
    /// Add or issue units of a blood type
    BloodAdjust {
        blood_type: String,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// List oxygen supplies
    Oxygen {
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        search: Search,
    },
    /// Change an oxygen supply's available count
    OxygenAdjust {
        id: String,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Add an oxygen supply line
    OxygenAdd {
        #[arg(long = "type")]
        supply_type: String,
        #[arg(long)]
        size: String,
        #[arg(long)]
        available: String,
        #[arg(long)]
        threshold: String,
    },
    /// List equipment pools
    Equipment {
        #[command(flatten)]
        search: Search,
    },
    /// Change an equipment pool's available count
    EquipmentAdjust {
        id: String,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Add an equipment pool
    EquipmentAdd {
        #[arg(long)]
        name: String,
        #[arg(long)]
        available: String,
        #[arg(long)]
        total: String,
    },

    // -------------------------------------------------------------------------
    // Fleet
    // -------------------------------------------------------------------------
    /// List ambulances
    Ambulances {
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        search: Search,
    },
    /// Send an on-duty ambulance out
    AmbulanceDispatch { id: String },
    /// Move an ambulance to another status
    AmbulanceStatus { id: String, status: String },

    // -------------------------------------------------------------------------
    // Surgery
    // -------------------------------------------------------------------------
    /// List surgeries
    Surgeries {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[command(flatten)]
        search: Search,
    },
    /// Book a surgery
    SurgeryAdd {
        #[arg(long)]
        patient: String,
        #[arg(long)]
        procedure: String,
        #[arg(long)]
        surgeon: String,
        /// YYYY-MM-DD HH:MM
        #[arg(long)]
        time: String,
        #[arg(long, default_value = "")]
        duration: String,
        #[arg(long, default_value = "")]
        room: String,
        #[arg(long, default_value = "")]
        priority: String,
    },
    /// Move a surgery to another status
    SurgeryStatus { id: String, status: String },

    // -------------------------------------------------------------------------
    // Live requests
    // -------------------------------------------------------------------------
    /// List pending requests
    Requests {
        #[arg(long)]
        priority: Option<String>,
        #[command(flatten)]
        search: Search,
    },
    /// Accept a request
    RequestAccept { id: String },
    /// Decline a request
    RequestDecline { id: String },

    // -------------------------------------------------------------------------
    // Record screens
    // -------------------------------------------------------------------------
    /// List patients
    Patients {
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        search: Search,
    },
    /// List staff
    Staff {
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        search: Search,
    },
    /// List admission requests
    Admissions {
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        search: Search,
    },
    /// List discharges
    Discharges {
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        search: Search,
    },
    /// List medical records
    Records {
        #[arg(long = "type")]
        record_type: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        search: Search,
    },
    /// File a medical record
    RecordAdd {
        #[arg(long)]
        patient: String,
        #[arg(long)]
        patient_id: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        doctor: String,
        #[arg(long = "type", default_value = "")]
        record_type: String,
        #[arg(long, default_value = "")]
        department: String,
        /// YYYY-MM-DD, today when omitted
        #[arg(long, default_value = "")]
        date: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List pharmacy stock
    Medications {
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        search: Search,
    },
    /// List emergency department cases
    Emergencies {
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        search: Search,
    },

    /// Read commands from stdin against one session
    Shell,
}

/// Splits a shell line into words. Single or double quotes group words;
/// there are no escapes.
pub fn split_words(line: &str) -> Result<Vec<String>, ApiError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(ApiError::validation("unterminated quote"));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(std::iter::once("medmap").chain(args.iter().copied()))
            .unwrap()
            .command
            .unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_delta() {
        match parse(&["blood-adjust", "O-", "-3"]) {
            Command::BloodAdjust { blood_type, delta } => {
                assert_eq!(blood_type, "O-");
                assert_eq!(delta, -3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_listing_flags() {
        match parse(&["beds", "--ward", "ICU", "-q", "icu-0"]) {
            Command::Beds { ward, status, search } => {
                assert_eq!(ward.as_deref(), Some("ICU"));
                assert_eq!(status, None);
                assert_eq!(search.query.as_deref(), Some("icu-0"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_type_flag() {
        match parse(&["oxygen-add", "--type", "Oxygen Cylinder", "--size", "H", "--available", "3", "--threshold", "2"]) {
            Command::OxygenAdd { supply_type, .. } => assert_eq!(supply_type, "Oxygen Cylinder"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_settings_set() {
        match parse(&["settings-set", "security", "sessionTimeoutMinutes", "45"]) {
            Command::SettingsSet { section, key, value } => {
                assert_eq!(section, SettingsSection::Security);
                assert_eq!(key, "sessionTimeoutMinutes");
                assert_eq!(value, "45");
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["medmap", "settings-set", "system", "debugMode", "true"]).is_err());
    }

    #[test]
    fn test_split_words() {
        assert_eq!(
            split_words(r#"surgery-add --patient "Anna Lee" --time '2024-01-16 10:30'"#).unwrap(),
            vec!["surgery-add", "--patient", "Anna Lee", "--time", "2024-01-16 10:30"]
        );
        assert_eq!(split_words("   ").unwrap(), Vec::<String>::new());
        assert_eq!(split_words(r#"route """#).unwrap(), vec!["route", ""]);
        assert!(split_words(r#"route "/beds"#).is_err());
    }
}
