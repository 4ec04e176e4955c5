use std::fmt;

use serde::{Deserialize, Serialize};

const ID_PREFIX: &str = "play";
const SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identifier of a stored play.
///
/// Generated ids look like `play_1718000000000_k3j9x0q2m`: a millisecond
/// timestamp followed by nine base-36 characters. Ids loaded from storage or
/// import files are kept verbatim, whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayId(String);

impl PlayId {
    /// Build an id from a timestamp and a source of random numbers.
    ///
    /// `next_random` is called once per suffix character; only the value
    /// modulo 36 is used.
    pub fn generate(now_millis: u64, mut next_random: impl FnMut() -> u32) -> Self {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| BASE36[(next_random() % 36) as usize] as char)
            .collect();
        Self(format!("{ID_PREFIX}_{now_millis}_{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PlayId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PlayId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<PlayId> for String {
    fn from(value: PlayId) -> Self {
        value.0
    }
}
