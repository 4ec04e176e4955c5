//! Play store configuration.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::ports::outbound::storage_keys;

/// Ten minutes of inactivity ends a session.
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Settings for [`crate::stores::PlayStore`] and its session guard.
///
/// Deserializes from e.g. `{"storageKey": "squiggle_plays", "sessionTimeoutSecs": 600}`;
/// missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayStoreConfig {
    /// Storage key holding the serialized play list
    pub storage_key: String,
    /// Inactivity window after which stored plays are wiped
    #[serde(rename = "sessionTimeoutSecs", deserialize_with = "duration_from_secs")]
    pub session_timeout: Duration,
}

impl Default for PlayStoreConfig {
    fn default() -> Self {
        Self {
            storage_key: storage_keys::PLAYS.to_string(),
            session_timeout: DEFAULT_SESSION_TIMEOUT,
        }
    }
}

impl PlayStoreConfig {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_session_timeout(mut self, timeout: Duration) -> Self {
        self.session_timeout = timeout;
        self
    }
}

fn duration_from_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}
