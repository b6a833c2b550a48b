//! # Configuration State
//!
//! Hospital profile and operator preferences loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MEDMAP_*`)
//! 2. Defaults (this file)
//!
//! Settings can be changed during a session with `settings-set`; the
//! session keeps them behind [`SettingsState`](super::SettingsState).

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::warn;

use medmap_core::validation::{parse_count, validate_required, ValidationResult};
use medmap_core::{ValidationError, APP_NAME};

/// Console configuration, as shown on the Settings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    pub app_name: String,

    pub hospital: HospitalInfo,

    pub notifications: NotificationSettings,

    pub security: SecuritySettings,

    /// Start the session with the sample data. `false` starts empty.
    pub seed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email: bool,
    pub sms: bool,
    pub push: bool,
    /// Critical alerts; always delivered regardless of the others
    pub emergency: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySettings {
    pub two_factor: bool,
    pub session_timeout_minutes: u32,
    pub password_expiry_days: u32,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Hospital: New York Presbyterian Hospital
    /// - Notifications: email, push and emergency on; SMS off
    /// - Security: 2FA on, 30 minute sessions, 90 day password expiry
    /// - Seed data: on
    fn default() -> Self {
        ConfigState {
            app_name: APP_NAME.to_string(),
            hospital: HospitalInfo {
                name: "New York Presbyterian Hospital".to_string(),
                address: "525 E 68th St, New York, NY 10065".to_string(),
                phone: "+1-212-746-5454".to_string(),
                email: "info@nyp.org".to_string(),
            },
            notifications: NotificationSettings {
                email: true,
                sms: false,
                push: true,
                emergency: true,
            },
            security: SecuritySettings {
                two_factor: true,
                session_timeout_minutes: 30,
                password_expiry_days: 90,
            },
            seed: true,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MEDMAP_HOSPITAL_NAME`, `MEDMAP_HOSPITAL_ADDRESS`,
    ///   `MEDMAP_HOSPITAL_PHONE`, `MEDMAP_HOSPITAL_EMAIL`
    /// - `MEDMAP_SESSION_TIMEOUT_MINUTES`: positive integer
    /// - `MEDMAP_SEED`: `false`/`0`/`no` starts with empty collections
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unparseable values keep the
    /// default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(name) = lookup("MEDMAP_HOSPITAL_NAME") {
            config.hospital.name = name;
        }
        if let Some(address) = lookup("MEDMAP_HOSPITAL_ADDRESS") {
            config.hospital.address = address;
        }
        if let Some(phone) = lookup("MEDMAP_HOSPITAL_PHONE") {
            config.hospital.phone = phone;
        }
        if let Some(email) = lookup("MEDMAP_HOSPITAL_EMAIL") {
            config.hospital.email = email;
        }

        if let Some(timeout) = lookup("MEDMAP_SESSION_TIMEOUT_MINUTES") {
            match timeout.trim().parse::<u32>() {
                Ok(minutes) if minutes > 0 => config.security.session_timeout_minutes = minutes,
                _ => warn!(%timeout, "Ignoring invalid MEDMAP_SESSION_TIMEOUT_MINUTES"),
            }
        }

        if let Some(seed) = lookup("MEDMAP_SEED") {
            match parse_flag(&seed) {
                Some(flag) => config.seed = flag,
                None => warn!(%seed, "Ignoring invalid MEDMAP_SEED"),
            }
        }

        config
    }
}

/// The cards of the Settings page that hold editable values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SettingsSection {
    Hospital,
    Notifications,
    Security,
}

const HOSPITAL_KEYS: &[&str] = &["name", "address", "phone", "email"];
const NOTIFICATION_KEYS: &[&str] = &["email", "sms", "push", "emergency"];
const SECURITY_KEYS: &[&str] = &["twoFactor", "sessionTimeoutMinutes", "passwordExpiryDays"];

impl ConfigState {
    /// Changes one setting. `key` is the field name as it appears in the
    /// JSON output; `value` is parsed to the field's type.
    ///
    /// ## Errors
    /// - `NotAllowed`: the section has no such key
    /// - `InvalidFormat`: a switch that is not true/false
    /// - `OutOfRange`: a zero timeout or expiry
    /// - `Required`: blank hospital details
    ///
    /// Nothing is changed on error.
    pub fn set(&mut self, section: SettingsSection, key: &str, value: &str) -> ValidationResult<()> {
        match section {
            SettingsSection::Hospital => {
                let field = match key {
                    "name" => &mut self.hospital.name,
                    "address" => &mut self.hospital.address,
                    "phone" => &mut self.hospital.phone,
                    "email" => &mut self.hospital.email,
                    _ => return Err(unknown_key(HOSPITAL_KEYS)),
                };
                *field = validate_required(key, value)?;
            }
            SettingsSection::Notifications => {
                let field = match key {
                    "email" => &mut self.notifications.email,
                    "sms" => &mut self.notifications.sms,
                    "push" => &mut self.notifications.push,
                    "emergency" => &mut self.notifications.emergency,
                    _ => return Err(unknown_key(NOTIFICATION_KEYS)),
                };
                *field = parse_switch(key, value)?;
            }
            SettingsSection::Security => match key {
                "twoFactor" => self.security.two_factor = parse_switch(key, value)?,
                "sessionTimeoutMinutes" => {
                    self.security.session_timeout_minutes = parse_positive(key, value)?
                }
                "passwordExpiryDays" => {
                    self.security.password_expiry_days = parse_positive(key, value)?
                }
                _ => return Err(unknown_key(SECURITY_KEYS)),
            },
        }
        Ok(())
    }
}

fn unknown_key(allowed: &[&str]) -> ValidationError {
    ValidationError::NotAllowed {
        field: "key".to_string(),
        allowed: allowed.iter().map(|k| k.to_string()).collect(),
    }
}

fn parse_switch(key: &str, value: &str) -> ValidationResult<bool> {
    parse_flag(value).ok_or_else(|| ValidationError::InvalidFormat {
        field: key.to_string(),
        reason: "expected true or false".to_string(),
    })
}

fn parse_positive(key: &str, value: &str) -> ValidationResult<u32> {
    match parse_count(key, value)? {
        0 => Err(ValidationError::OutOfRange {
            field: key.to_string(),
            min: 1,
            max: u32::MAX as i64,
        }),
        n => Ok(n),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::default();
        assert_eq!(config.hospital.name, "New York Presbyterian Hospital");
        assert_eq!(config.security.session_timeout_minutes, 30);
        assert!(!config.notifications.sms);
        assert!(config.seed);
    }

    #[test]
    fn test_overrides() {
        let config = ConfigState::from_lookup(lookup_from(&[
            ("MEDMAP_HOSPITAL_NAME", "St. Mary's"),
            ("MEDMAP_SESSION_TIMEOUT_MINUTES", "45"),
            ("MEDMAP_SEED", "false"),
        ]));
        assert_eq!(config.hospital.name, "St. Mary's");
        assert_eq!(config.security.session_timeout_minutes, 45);
        assert!(!config.seed);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = ConfigState::from_lookup(lookup_from(&[
            ("MEDMAP_SESSION_TIMEOUT_MINUTES", "0"),
            ("MEDMAP_SEED", "maybe"),
        ]));
        assert_eq!(config.security.session_timeout_minutes, 30);
        assert!(config.seed);
    }

    #[test]
    fn test_set_changes_one_field() {
        let mut config = ConfigState::default();
        config.set(SettingsSection::Notifications, "sms", "on").unwrap();
        config.set(SettingsSection::Security, "sessionTimeoutMinutes", "45").unwrap();
        config.set(SettingsSection::Hospital, "phone", " +1-212-555-0100 ").unwrap();

        assert!(config.notifications.sms);
        assert!(config.notifications.email);
        assert_eq!(config.security.session_timeout_minutes, 45);
        assert_eq!(config.hospital.phone, "+1-212-555-0100");
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = ConfigState::default();
        let before = config.clone();

        assert!(matches!(
            config.set(SettingsSection::Security, "theme", "dark"),
            Err(ValidationError::NotAllowed { .. })
        ));
        assert!(matches!(
            config.set(SettingsSection::Notifications, "push", "maybe"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            config.set(SettingsSection::Security, "passwordExpiryDays", "0"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            config.set(SettingsSection::Hospital, "name", "  "),
            Err(ValidationError::Required { .. })
        ));
        assert_eq!(config, before);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(ConfigState::default()).unwrap();
        assert_eq!(json["security"]["sessionTimeoutMinutes"], 30);
        assert_eq!(json["hospital"]["email"], "info@nyp.org");
    }
}
