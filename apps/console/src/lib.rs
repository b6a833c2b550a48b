//! # MedMap Console Library
//!
//! Operator console for the MedMap dashboard core. One-shot commands run
//! against a fresh session; `medmap shell` keeps one session across lines.
//!
//! ## Module Organization
//! ```text
//! medmap_console/
//! ├── lib.rs          ◄─── You are here (startup, dispatch, shell)
//! ├── cli.rs          ◄─── clap definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── store.rs    ◄─── Session store behind a mutex
//! │   ├── settings.rs ◄─── Session configuration behind a mutex
//! │   └── config.rs   ◄─── Configuration values and setting changes
//! ├── commands/
//! │   ├── mod.rs      ◄─── Listing helpers
//! │   └── ...         ◄─── One file per dashboard area
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Output Contract
//! - stdout: exactly one pretty JSON document per command
//! - stderr: logs (`RUST_LOG`)
//! - the shell prompt and line editing only appear on a terminal; piped
//!   input gets no prompt
//! - help and version requests inside the shell: `{"help": "..."}`
//! - exit status: 0 on success, 1 for a refused command, 2 for an internal
//!   failure

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::io::{self, BufRead, IsTerminal};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use medmap_core::draft::{NewBed, NewEquipment, NewMedicalRecord, NewOxygenStock, NewSurgery};
use medmap_core::Store;

use cli::{split_words, Cli, Command};
use commands::{beds, config, fleet, navigation, records, requests, stats, stock, surgery};
use error::ApiError;
use state::{ConfigState, SettingsState, StoreState};

const PROMPT: &str = "medmap> ";

/// Everything a command may read or change.
#[derive(Debug, Clone)]
pub struct Session {
    pub settings: SettingsState,
    pub store: StoreState,
}

impl Session {
    /// A session shaped by the configuration: seeded or empty.
    pub fn new(config: ConfigState) -> Self {
        let store = if config.seed {
            StoreState::seeded()
        } else {
            StoreState::new(Store::empty())
        };
        Session {
            settings: SettingsState::new(config),
            store,
        }
    }
}

/// Runs the console.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Console Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, writing to stderr             │
/// │     • Default: info,medmap=debug; override with RUST_LOG                │
/// │                                                                         │
/// │  2. Parse Arguments ──────────────────────────────────────────────────► │
/// │                                                                         │
/// │  3. Load Configuration ───────────────────────────────────────────────► │
/// │     • MEDMAP_* environment variables over defaults                      │
/// │                                                                         │
/// │  4. Build Session ────────────────────────────────────────────────────► │
/// │     • Store seeded with sample data unless MEDMAP_SEED=false            │
/// │                                                                         │
/// │  5. Execute ──────────────────────────────────────────────────────────► │
/// │     • One command, or the shell loop                                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let config = ConfigState::from_env();
    info!(hospital = %config.hospital.name, seed = config.seed, "Starting MedMap console");

    let session = Session::new(config);

    match cli.command {
        Some(Command::Shell) if io::stdin().is_terminal() => run_editor(&session),
        Some(Command::Shell) => run_shell(&session, io::stdin().lock()),
        Some(command) => match execute(&session, command) {
            Ok(output) => emit(&output),
            Err(err) => fail(&err),
        },
        None => {
            eprintln!("Use 'medmap --help' for commands");
            ExitCode::SUCCESS
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=medmap=trace` - Show trace for medmap crates only
/// - Default: INFO, DEBUG for medmap crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,medmap=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(value)?)
}

/// Runs one parsed command and returns its JSON output.
pub fn execute(session: &Session, command: Command) -> Result<Value, ApiError> {
    let store = &session.store;

    match command {
        // Navigation
        Command::Routes => to_json(navigation::list_routes()),
        Command::Route { path } => to_json(navigation::resolve_route(&path)),
        Command::Status { kind, tag } => to_json(navigation::describe_status(&kind, tag.as_deref())?),
        Command::Config => to_json(config::get_config(&session.settings, store)?),
        Command::SettingsSet {
            section,
            key,
            value,
        } => to_json(config::set_setting(&session.settings, section, &key, &value)?),
        Command::Stats { page } => to_json(stats::get_stats(store, page)?),

        // Beds
        Command::Beds { ward, status, search } => to_json(beds::list_beds(
            store,
            ward.as_deref(),
            status.as_deref(),
            search.query.as_deref(),
        )?),
        Command::BedToggle { id } => to_json(beds::toggle_bed(store, &id)?),
        Command::BedRelease { id } => to_json(beds::release_bed(store, &id)?),
        Command::BedAdd {
            name,
            ward,
            ventilator,
        } => to_json(beds::add_bed(
            store,
            NewBed {
                name,
                ward,
                ventilator,
            },
        )?),

        // Stock
        Command::Blood {
            component,
            status,
            search,
        } => to_json(stock::list_blood(
            store,
            component.as_deref(),
            status.as_deref(),
            search.query.as_deref(),
        )?),
        Command::BloodAdjust { blood_type, delta } => {
            to_json(stock::adjust_blood(store, &blood_type, delta)?)
        }
        Command::Oxygen { status, search } => to_json(stock::list_oxygen(
            store,
            status.as_deref(),
            search.query.as_deref(),
        )?),
        Command::OxygenAdjust { id, delta } => to_json(stock::adjust_oxygen(store, &id, delta)?),
        Command::OxygenAdd {
            supply_type,
            size,
            available,
            threshold,
        } => to_json(stock::add_oxygen(
            store,
            NewOxygenStock {
                supply_type,
                size,
                available,
                threshold,
            },
        )?),
        Command::Equipment { search } => {
            to_json(stock::list_equipment(store, search.query.as_deref())?)
        }
        Command::EquipmentAdjust { id, delta } => {
            to_json(stock::adjust_equipment(store, &id, delta)?)
        }
        Command::EquipmentAdd {
            name,
            available,
            total,
        } => to_json(stock::add_equipment(
            store,
            NewEquipment {
                name,
                available,
                total,
            },
        )?),

        // Fleet
        Command::Ambulances { status, search } => to_json(fleet::list_ambulances(
            store,
            status.as_deref(),
            search.query.as_deref(),
        )?),
        Command::AmbulanceDispatch { id } => to_json(fleet::dispatch_ambulance(store, &id)?),
        Command::AmbulanceStatus { id, status } => {
            to_json(fleet::set_ambulance_status(store, &id, &status)?)
        }

        // Surgery
        Command::Surgeries {
            status,
            priority,
            search,
        } => to_json(surgery::list_surgeries(
            store,
            status.as_deref(),
            priority.as_deref(),
            search.query.as_deref(),
        )?),
        Command::SurgeryAdd {
            patient,
            procedure,
            surgeon,
            time,
            duration,
            room,
            priority,
        } => to_json(surgery::add_surgery(
            store,
            NewSurgery {
                patient_name: patient,
                procedure,
                surgeon,
                scheduled_time: time,
                duration,
                room,
                priority,
            },
        )?),
        Command::SurgeryStatus { id, status } => {
            to_json(surgery::set_surgery_status(store, &id, &status)?)
        }

        // Live requests
        Command::Requests { priority, search } => to_json(requests::list_requests(
            store,
            priority.as_deref(),
            search.query.as_deref(),
        )?),
        Command::RequestAccept { id } => to_json(requests::accept_request(store, &id)?),
        Command::RequestDecline { id } => to_json(requests::decline_request(store, &id)?),

        // Record screens
        Command::Patients { status, search } => to_json(records::list_patients(
            store,
            status.as_deref(),
            search.query.as_deref(),
        )?),
        Command::Staff {
            department,
            status,
            search,
        } => to_json(records::list_staff(
            store,
            department.as_deref(),
            status.as_deref(),
            search.query.as_deref(),
        )?),
        Command::Admissions {
            department,
            status,
            search,
        } => to_json(records::list_admissions(
            store,
            department.as_deref(),
            status.as_deref(),
            search.query.as_deref(),
        )?),
        Command::Discharges { status, search } => to_json(records::list_discharges(
            store,
            status.as_deref(),
            search.query.as_deref(),
        )?),
        Command::Records {
            record_type,
            status,
            search,
        } => to_json(records::list_medical_records(
            store,
            record_type.as_deref(),
            status.as_deref(),
            search.query.as_deref(),
        )?),
        Command::RecordAdd {
            patient,
            patient_id,
            description,
            doctor,
            record_type,
            department,
            date,
            notes,
        } => to_json(records::add_medical_record(
            store,
            NewMedicalRecord {
                patient_name: patient,
                patient_id,
                description,
                doctor,
                record_type,
                department,
                date,
                notes,
            },
        )?),
        Command::Medications { status, search } => to_json(records::list_medications(
            store,
            status.as_deref(),
            search.query.as_deref(),
        )?),
        Command::Emergencies {
            priority,
            status,
            search,
        } => to_json(records::list_emergencies(
            store,
            priority.as_deref(),
            status.as_deref(),
            search.query.as_deref(),
        )?),

        Command::Shell => Err(ApiError::validation("already in a shell")),
    }
}

/// Parses one shell line and runs it. `Ok(None)` for a blank line.
///
/// `help`, `--help` and `--version` are answered as `{"help": text}`.
pub fn execute_line(session: &Session, line: &str) -> Result<Option<Value>, ApiError> {
    let words = split_words(line)?;
    if words.is_empty() {
        return Ok(None);
    }

    let cli = match Cli::try_parse_from(std::iter::once("medmap".to_string()).chain(words)) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let text = err.render().to_string();
            return Ok(Some(json!({ "help": text.trim_end() })));
        }
        Err(err) => return Err(ApiError::validation(err.to_string().trim_end())),
    };

    match cli.command {
        Some(command) => execute(session, command).map(Some),
        None => Ok(None),
    }
}

/// Runs one shell line. `None` when the operator asked to leave.
fn shell_line(session: &Session, line: &str) -> Option<ExitCode> {
    let line = line.trim();
    if line == "exit" || line == "quit" {
        return None;
    }

    debug!(line, "shell line");
    Some(match execute_line(session, line) {
        Ok(Some(output)) => emit(&output),
        Ok(None) => ExitCode::SUCCESS,
        Err(err) => fail(&err),
    })
}

/// Interactive shell on a terminal, with line editing and history.
/// Ctrl-D, Ctrl-C and `exit` leave; the exit status reflects the last
/// command.
fn run_editor(session: &Session) -> ExitCode {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => return fail(&ApiError::internal(format!("Failed to start line editor: {err}"))),
    };

    info!("Shell started");
    let mut status = ExitCode::SUCCESS;

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.trim());
                }
                match shell_line(session, &line) {
                    Some(code) => status = code,
                    None => break,
                }
            }
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(err) => return fail(&ApiError::internal(format!("Failed to read input: {err}"))),
        }
    }

    info!("Shell finished");
    status
}

/// Reads piped commands line by line until EOF or `exit`. Failures are
/// printed and the loop goes on; the exit status reflects the last command.
fn run_shell(session: &Session, input: impl BufRead) -> ExitCode {
    info!("Shell started");
    let mut status = ExitCode::SUCCESS;

    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => return fail(&ApiError::internal(format!("Failed to read input: {err}"))),
        };
        match shell_line(session, &line) {
            Some(code) => status = code,
            None => break,
        }
    }

    info!("Shell finished");
    status
}

fn emit(output: &Value) -> ExitCode {
    match serde_json::to_string_pretty(output) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => fail(&ApiError::from(err)),
    }
}

fn fail(err: &ApiError) -> ExitCode {
    let text = serde_json::to_string_pretty(err)
        .unwrap_or_else(|_| format!("{{\"code\":\"INTERNAL\",\"message\":\"{}\"}}", err.message));
    println!("{text}");
    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn session() -> Session {
        Session::new(ConfigState::default())
    }

    #[test]
    fn test_lines_share_one_store() {
        let session = session();
        execute_line(&session, "bed-toggle 2").unwrap();
        let output = execute_line(&session, "beds --status occupied").unwrap().unwrap();
        assert_eq!(output["visible"], 4);
    }

    #[test]
    fn test_outcome_json_shape() {
        let session = session();
        let output = execute_line(&session, "blood-adjust O- -3").unwrap().unwrap();
        assert_eq!(output["kind"], "blood_unit");
        assert_eq!(output["record"]["units"], 15);
    }

    #[test]
    fn test_quoted_arguments() {
        let session = session();
        let output = execute_line(
            &session,
            r#"surgery-add --patient "Anna Lee" --procedure "Hernia Repair" --surgeon "Dr. Brown" --time "2024-01-16 10:30" --priority high"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(output["record"]["id"], "S004");
        assert_eq!(output["record"]["scheduledTime"], "2024-01-16 10:30");
    }

    #[test]
    fn test_errors_carry_codes() {
        let session = session();
        let err = execute_line(&session, "bed-toggle 99").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = execute_line(&session, "no-such-command").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = execute_line(&session, "shell").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_blank_id_is_a_validation_error() {
        let session = session();
        let err = execute_line(&session, "bed-toggle ''").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_help_is_a_result() {
        let session = session();
        for line in ["help", "--help", "beds --help"] {
            let output = execute_line(&session, line).unwrap().unwrap();
            assert!(output["help"].as_str().unwrap().contains("Usage"));
        }
    }

    #[test]
    fn test_settings_change_within_session() {
        let session = session();
        let output = execute_line(&session, "settings-set notifications sms true")
            .unwrap()
            .unwrap();
        assert_eq!(output["notifications"]["sms"], true);

        let output = execute_line(&session, "config").unwrap().unwrap();
        assert_eq!(output["notifications"]["sms"], true);

        let err = execute_line(&session, "settings-set security passwordExpiryDays -5").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(execute_line(&session(), "   ").unwrap(), None);
    }

    #[test]
    fn test_unseeded_session() {
        let config = ConfigState {
            seed: false,
            ..ConfigState::default()
        };
        let session = Session::new(config);
        let output = execute_line(&session, "requests").unwrap().unwrap();
        assert_eq!(output["total"], 0);

        let output = execute_line(&session, "bed-add --name ICU-01 --ward ICU").unwrap().unwrap();
        assert_eq!(output["record"]["id"], "1");
    }

    #[test]
    fn test_shell_stops_at_exit() {
        let session = session();
        let input = io::Cursor::new("request-accept REQ-001\nexit\nrequest-accept REQ-002\n");
        let _ = run_shell(&session, input);
        let pending = session.store.with_store(|s| s.requests().len()).unwrap();
        assert_eq!(pending, 7);
    }
}
