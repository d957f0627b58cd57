use gloo_storage::{LocalStorage, Storage};
use log::warn;
use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "shopswipe_prefs";

/// Preferences that survive a reload. Only the loop setting is kept, the
/// queue position and past decisions always start fresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredPrefs {
    pub loop_enabled: bool,
}

impl Default for StoredPrefs {
    fn default() -> Self {
        Self { loop_enabled: true }
    }
}

pub fn load_prefs() -> StoredPrefs {
    match LocalStorage::get::<StoredPrefs>(STORAGE_KEY) {
        Ok(prefs) => prefs,
        Err(err) => {
            warn!("Falling back to default preferences: {}", err);
            StoredPrefs::default()
        }
    }
}

pub fn save_prefs(prefs: &StoredPrefs) {
    if let Err(err) = LocalStorage::set(STORAGE_KEY, prefs) {
        warn!("Failed to persist preferences: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looping_defaults_on() {
        assert!(StoredPrefs::default().loop_enabled);
    }

    #[test]
    fn prefs_round_trip_through_json() {
        let prefs = StoredPrefs {
            loop_enabled: false,
        };
        let body = serde_json::to_string(&prefs).unwrap();
        let restored: StoredPrefs = serde_json::from_str(&body).unwrap();
        assert_eq!(restored, prefs);
    }

    #[test]
    fn unknown_payloads_fall_back_to_defaults() {
        let restored: StoredPrefs = serde_json::from_str("{}").unwrap();
        assert!(restored.loop_enabled);
    }
}
