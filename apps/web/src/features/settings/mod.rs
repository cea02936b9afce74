//! Platform settings, kept in local storage until the backend grows an
//! endpoint for them.

use crate::app_lib::{storage::LocalStorageBackend, AppError};
use admin_session::SessionBackend;
use dashboard_model::settings::{Settings, SETTINGS_KEY};

pub fn load() -> Settings {
    Settings::from_json(LocalStorageBackend.read(SETTINGS_KEY).as_deref())
}

/// Validates, then persists.
pub fn save(settings: &Settings) -> Result<(), AppError> {
    settings.validate()?;
    let json = serde_json::to_string(settings).map_err(|err| AppError::Serialization(err.to_string()))?;
    LocalStorageBackend.write(SETTINGS_KEY, &json)?;
    Ok(())
}

/// Forgets the saved settings and returns the defaults.
pub fn reset() -> Result<Settings, AppError> {
    LocalStorageBackend.remove(SETTINGS_KEY)?;
    Ok(Settings::default())
}
