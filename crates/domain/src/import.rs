//! Import document validation.
//!
//! Import files come from outside the app, so entries are read as loose JSON
//! and checked field by field. A bad entry is reported and skipped; only a
//! broken top-level structure rejects the whole document.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{CreatePlayRequest, DomainError, PlayerState, Position, StateTimestamp};

/// Outcome of an import: how many plays were created and why the rest were not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub success_count: usize,
    pub errors: Vec<String>,
}

impl ImportSummary {
    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub fn record_error(&mut self, error: &ImportEntryError) {
        self.errors.push(error.to_string());
    }
}

/// Why a single import entry was skipped. `index` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportEntryError {
    MissingName { index: usize },
    MissingPlayerStates { index: usize },
    NoValidPlayerStates { index: usize },
    /// The entry was valid but the store refused it
    Rejected { index: usize, message: String },
}

impl fmt::Display for ImportEntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName { index } => write!(f, "Play {index}: Missing or invalid name"),
            Self::MissingPlayerStates { index } => {
                write!(f, "Play {index}: Missing or invalid player states")
            }
            Self::NoValidPlayerStates { index } => {
                write!(f, "Play {index}: No valid player states found")
            }
            Self::Rejected { index, message } => write!(f, "Play {index}: {message}"),
        }
    }
}

impl std::error::Error for ImportEntryError {}

/// Parse import text and return the raw entries of its `plays` array.
pub fn parse_import_document(contents: &str) -> Result<Vec<Value>, DomainError> {
    let document: Value =
        serde_json::from_str(contents).map_err(|e| DomainError::parse(e.to_string()))?;

    let plays = match document.get("plays") {
        Some(Value::Array(plays)) => plays,
        _ => return Err(DomainError::InvalidImportFormat),
    };

    if plays.is_empty() {
        return Err(DomainError::EmptyImport);
    }

    Ok(plays.clone())
}

/// Check one entry and turn it into a create request.
///
/// Player states that do not match the expected shape are dropped; the entry
/// only fails if none survive.
pub fn validate_entry(index: usize, entry: &Value) -> Result<CreatePlayRequest, ImportEntryError> {
    let name = match entry.get("name") {
        Some(Value::String(name)) if !name.is_empty() => name.clone(),
        _ => return Err(ImportEntryError::MissingName { index }),
    };

    let states = match entry.get("playerStates") {
        Some(Value::Array(states)) => states,
        _ => return Err(ImportEntryError::MissingPlayerStates { index }),
    };

    let player_states: Vec<PlayerState> = states
        .iter()
        .filter_map(|state| state.as_object().and_then(player_state_from_object))
        .collect();

    if player_states.is_empty() {
        return Err(ImportEntryError::NoValidPlayerStates { index });
    }

    Ok(CreatePlayRequest::new(name, player_states))
}

fn player_state_from_object(state: &Map<String, Value>) -> Option<PlayerState> {
    let player_id = match state.get("playerId") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        _ => return None,
    };

    let position = state.get("position")?.as_object()?;
    let x = position.get("x")?.as_f64()?;
    let y = position.get("y")?.as_f64()?;

    let timestamp = StateTimestamp::from(state.get("timestamp")?.clone());
    if !timestamp.is_present() {
        return None;
    }

    Some(PlayerState::new(player_id, Position::new(x, y), timestamp))
}
