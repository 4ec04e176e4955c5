//! Play Service - Application service for play management
//!
//! Wraps the [`PlayStore`] with uniform error reporting and adds the batch
//! operations the store does not know about: export to a download, import
//! from a user-supplied file, and clearing everything.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use squiggle_domain::{
    parse_import_document, validate_entry, CreatePlayRequest, ImportEntryError, ImportSummary,
    Play, PlayExport, PlayId,
};

use crate::application::ServiceError;
use crate::config::PlayStoreConfig;
use crate::ports::outbound::{ImportSource, JSON_MIME_TYPE};
use crate::state::Platform;
use crate::stores::PlayStore;

/// Store handle shared between clones of the service
pub type SharedPlayStore = Arc<Mutex<PlayStore>>;

/// Play service for managing plays
///
/// Cheap to clone; all clones operate on the same store.
#[derive(Clone)]
pub struct PlayService {
    store: SharedPlayStore,
    platform: Platform,
}

impl PlayService {
    /// Create a new PlayService around an existing store
    pub fn new(store: PlayStore, platform: Platform) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            platform,
        }
    }

    /// Build the store from `config` and wrap it
    pub fn from_config(platform: Platform, config: &PlayStoreConfig) -> Self {
        Self::new(PlayStore::from_config(platform.clone(), config), platform)
    }

    // Store calls leave no partial state behind, so poisoning is ignored.
    fn store(&self) -> MutexGuard<'_, PlayStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a new play
    pub fn create_play(&self, request: CreatePlayRequest) -> Result<Play, ServiceError> {
        Ok(self.store().create_play(request)?)
    }

    /// List all plays
    pub fn list_plays(&self) -> Result<Vec<Play>, ServiceError> {
        Ok(self.store().list_plays().to_vec())
    }

    /// Get a single play by ID
    pub fn get_play(&self, id: &PlayId) -> Result<Play, ServiceError> {
        self.store()
            .get_play(id)
            .cloned()
            .ok_or(ServiceError::NotFound)
    }

    /// Delete a play; unknown ids succeed silently
    pub fn delete_play(&self, id: &PlayId) -> Result<(), ServiceError> {
        self.store().delete_play(id);
        Ok(())
    }

    /// Remove every play regardless of session state
    pub fn clear_all_plays(&self) {
        self.store().clear_plays();
    }

    pub fn is_session_valid(&self) -> bool {
        self.store().session().is_valid()
    }

    /// Seconds left before the session lapses, for countdown displays
    pub fn remaining_seconds(&self) -> u64 {
        self.store().session().remaining_seconds()
    }

    /// Export all plays as a JSON document through the platform export sink
    pub fn export_plays(&self) -> Result<(), ServiceError> {
        let plays = self.store().list_plays().to_vec();
        if plays.is_empty() {
            return Err(ServiceError::NoPlaysToExport);
        }

        let export = PlayExport::new(plays, self.platform.now_utc());
        let contents = export.to_pretty_json()?;
        let file_name = export.file_name();

        self.platform
            .deliver_export(&file_name, JSON_MIME_TYPE, &contents)
            .map_err(ServiceError::Export)?;

        tracing::info!(
            total_plays = export.metadata.total_plays,
            file_name = %file_name,
            "Plays exported"
        );
        Ok(())
    }

    /// Read an import file and create a play for every valid entry
    pub async fn import_plays<S>(&self, source: &S) -> Result<ImportSummary, ServiceError>
    where
        S: ImportSource + ?Sized,
    {
        let contents = source.read_text().await.map_err(|e| {
            tracing::warn!("Failed to read import file: {}", e);
            ServiceError::ReadFailed(e)
        })?;

        self.import_from_str(&contents)
    }

    /// Import from already-read file contents.
    ///
    /// Entries are handled independently: a bad entry is recorded in the
    /// summary and skipped. Only an unreadable document fails the call, and
    /// then nothing has been created.
    pub fn import_from_str(&self, contents: &str) -> Result<ImportSummary, ServiceError> {
        let entries = parse_import_document(contents)?;

        let mut summary = ImportSummary::default();
        let mut store = self.store();

        for (offset, entry) in entries.iter().enumerate() {
            let index = offset + 1;
            let outcome = validate_entry(index, entry).and_then(|request| {
                store
                    .create_play(request)
                    .map_err(|e| ImportEntryError::Rejected {
                        index,
                        message: e.to_string(),
                    })
            });

            match outcome {
                Ok(_) => summary.record_success(),
                Err(e) => {
                    tracing::debug!("Skipping import entry: {}", e);
                    summary.record_error(&e);
                }
            }
        }

        tracing::info!(
            imported = summary.success_count,
            skipped = summary.errors.len(),
            "Import finished"
        );
        Ok(summary)
    }
}
