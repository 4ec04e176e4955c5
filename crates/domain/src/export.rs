//! Export envelope written when the user downloads their plays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::datetime::{iso_date, iso_millis};
use crate::{DomainError, Play};

pub const EXPORT_VERSION: &str = "1.0";
pub const EXPORT_APP_NAME: &str = "Squiggle Rugby Play Designer";

/// Top-level export document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayExport {
    pub version: String,
    #[serde(with = "iso_millis")]
    pub exported_at: DateTime<Utc>,
    pub plays: Vec<Play>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub total_plays: usize,
    pub app_name: String,
}

impl PlayExport {
    pub fn new(plays: Vec<Play>, exported_at: DateTime<Utc>) -> Self {
        let metadata = ExportMetadata {
            total_plays: plays.len(),
            app_name: EXPORT_APP_NAME.to_string(),
        };
        Self {
            version: EXPORT_VERSION.to_string(),
            exported_at,
            plays,
            metadata,
        }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_pretty_json(&self) -> Result<String, DomainError> {
        serde_json::to_string_pretty(self).map_err(|e| DomainError::serialization(e.to_string()))
    }

    pub fn file_name(&self) -> String {
        export_file_name(&self.exported_at)
    }
}

/// Download name for an export taken at `exported_at`.
///
/// ```
/// use squiggle_domain::export_file_name;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2024, 9, 7, 18, 45, 0).unwrap();
/// assert_eq!(export_file_name(&at), "squiggle-plays-2024-09-07.json");
/// ```
pub fn export_file_name(exported_at: &DateTime<Utc>) -> String {
    format!("squiggle-plays-{}.json", iso_date(exported_at))
}
