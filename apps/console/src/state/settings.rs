//! # Settings State
//!
//! The session's configuration behind a mutex, so `settings-set` can
//! change it between commands.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use super::config::{ConfigState, SettingsSection};
use crate::error::ApiError;

/// Shared handle to the session configuration.
#[derive(Debug, Clone)]
pub struct SettingsState {
    config: Arc<Mutex<ConfigState>>,
}

impl SettingsState {
    pub fn new(config: ConfigState) -> Self {
        SettingsState {
            config: Arc::new(Mutex::new(config)),
        }
    }

    /// Executes a function with read access to the configuration.
    pub fn with_config<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&ConfigState) -> R,
    {
        let config = self.lock()?;
        Ok(f(&config))
    }

    /// Changes one setting and returns the configuration as it now stands.
    pub fn update(
        &self,
        section: SettingsSection,
        key: &str,
        value: &str,
    ) -> Result<ConfigState, ApiError> {
        let mut config = self.lock()?;

        match config.set(section, key, value) {
            Ok(()) => {
                info!(?section, key, "Setting changed");
                Ok(config.clone())
            }
            Err(err) => {
                warn!(?section, key, reason = %err, "Setting refused");
                Err(err.into())
            }
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ConfigState>, ApiError> {
        self.config
            .lock()
            .map_err(|_| ApiError::internal("Settings lock poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_update_is_visible_to_clones() {
        let settings = SettingsState::new(ConfigState::default());
        let other = settings.clone();

        let updated = other
            .update(SettingsSection::Security, "twoFactor", "false")
            .unwrap();
        assert!(!updated.security.two_factor);

        let two_factor = settings.with_config(|c| c.security.two_factor).unwrap();
        assert!(!two_factor);
    }

    #[test]
    fn test_refused_update_maps_code() {
        let settings = SettingsState::new(ConfigState::default());
        let err = settings
            .update(SettingsSection::Hospital, "fax", "555")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(settings.with_config(|c| c.clone()).unwrap(), ConfigState::default());
    }
}
