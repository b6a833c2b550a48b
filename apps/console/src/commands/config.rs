//! # Config Commands

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, SettingsSection, SettingsState, StoreState};

/// Configuration plus session facts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    #[serde(flatten)]
    pub config: ConfigState,
    pub session_started_at: DateTime<Utc>,
}

/// Gets the current configuration.
pub fn get_config(settings: &SettingsState, store: &StoreState) -> Result<ConfigResponse, ApiError> {
    debug!("get_config command");
    Ok(ConfigResponse {
        config: settings.with_config(|c| c.clone())?,
        session_started_at: store.started_at(),
    })
}

/// Changes one setting, as the Settings page switches and fields do.
///
/// ## Example
/// ```text
/// medmap settings-set notifications sms true
/// medmap settings-set security sessionTimeoutMinutes 45
/// ```
pub fn set_setting(
    settings: &SettingsState,
    section: SettingsSection,
    key: &str,
    value: &str,
) -> Result<ConfigState, ApiError> {
    debug!(?section, key, "set_setting command");
    settings.update(section, key, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_config_response_is_flat() {
        let settings = SettingsState::new(ConfigState::default());
        let response = get_config(&settings, &StoreState::seeded()).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["appName"], "MedMap");
        assert!(json["sessionStartedAt"].is_string());
    }

    #[test]
    fn test_setting_shows_in_config() {
        let settings = SettingsState::new(ConfigState::default());
        let store = StoreState::seeded();

        set_setting(&settings, SettingsSection::Hospital, "name", "St. Mary's").unwrap();
        let response = get_config(&settings, &store).unwrap();
        assert_eq!(response.config.hospital.name, "St. Mary's");

        let err = set_setting(&settings, SettingsSection::Security, "sessionTimeoutMinutes", "soon")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(
            get_config(&settings, &store).unwrap().config.security.session_timeout_minutes,
            30
        );
    }
}
