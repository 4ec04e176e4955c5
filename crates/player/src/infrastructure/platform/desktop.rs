//! Desktop platform implementations
//!
//! Provides platform-specific implementations for desktop using
//! standard library and native crates.

use crate::ports::outbound::{
    ExportSink, ImportSource, PlatformError, RandomProvider, StorageProvider, TimeProvider,
};
use crate::state::Platform;
use directories::{ProjectDirs, UserDirs};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use std::time::{SystemTime, UNIX_EPOCH};

/// Desktop time provider using std::time
#[derive(Clone, Default)]
pub struct DesktopTimeProvider;

impl TimeProvider for DesktopTimeProvider {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Desktop random provider using rand crate
#[derive(Clone, Default)]
pub struct DesktopRandomProvider;

impl RandomProvider for DesktopRandomProvider {
    fn random_range(&self, min: i32, max: i32) -> i32 {
        use rand::Rng;
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Stand-in for the browser's session storage on desktop.
///
/// Entries are mirrored into one JSON object on disk (`storage.json` under
/// the `io.squiggle.squiggle` config directory) so a store reopened in a new
/// process finds the plays of the last run. Expiry is still enforced by the
/// session guard, not here.
#[derive(Clone)]
pub struct DesktopStorageProvider {
    file: PathBuf,
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl Default for DesktopStorageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopStorageProvider {
    pub fn new() -> Self {
        let file = ProjectDirs::from("io", "squiggle", "squiggle")
            .map(|dirs| dirs.config_dir().join("storage.json"))
            .unwrap_or_else(|| PathBuf::from("squiggle_storage.json"));
        Self::with_path(file)
    }

    /// Open (or lazily create) the storage file at `file`.
    pub fn with_path(file: impl Into<PathBuf>) -> Self {
        let file = file.into();
        let entries = read_entries(&file);
        tracing::debug!(path = ?file, entries = entries.len(), "Play storage file opened");

        Self {
            file,
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    fn entries_mut(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rewrite the whole file from a snapshot of the entries.
    fn flush(&self, snapshot: &HashMap<String, String>) {
        let write = || -> Result<(), PlatformError> {
            if let Some(dir) = self.file.parent() {
                fs::create_dir_all(dir)?;
            }
            let body = serde_json::to_string_pretty(snapshot)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            fs::write(&self.file, body)?;
            Ok(())
        };

        if let Err(e) = write() {
            tracing::error!(path = ?self.file, "Could not write play storage file: {}", e);
        }
    }
}

/// A missing file is an empty store; an unreadable one is logged and ignored.
fn read_entries(file: &Path) -> HashMap<String, String> {
    let body = match fs::read_to_string(file) {
        Ok(body) => body,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return HashMap::new(),
        Err(e) => {
            tracing::warn!(path = ?file, "Play storage file unreadable, starting empty: {}", e);
            return HashMap::new();
        }
    };

    serde_json::from_str(&body).unwrap_or_else(|e| {
        tracing::warn!(path = ?file, "Play storage file is not a JSON object, starting empty: {}", e);
        HashMap::new()
    })
}

impl StorageProvider for DesktopStorageProvider {
    fn save(&self, key: &str, value: &str) {
        let snapshot = {
            let mut entries = self.entries_mut();
            entries.insert(key.to_string(), value.to_string());
            entries.clone()
        };
        self.flush(&snapshot);
    }

    fn load(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn remove(&self, key: &str) {
        let snapshot = {
            let mut entries = self.entries_mut();
            if entries.remove(key).is_none() {
                return;
            }
            entries.clone()
        };
        self.flush(&snapshot);
    }
}

/// Desktop export sink writing into a directory (the user's downloads by default)
#[derive(Clone)]
pub struct DesktopExportSink {
    dir: PathBuf,
}

impl Default for DesktopExportSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopExportSink {
    pub fn new() -> Self {
        let dir = UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::with_dir(dir)
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ExportSink for DesktopExportSink {
    fn deliver(
        &self,
        file_name: &str,
        _mime_type: &str,
        contents: &str,
    ) -> Result<(), PlatformError> {
        fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(file_name);
        fs::write(&target, contents)?;
        tracing::info!("Export written to {:?}", target);
        Ok(())
    }
}

/// Import source reading a file from disk
#[derive(Debug, Clone)]
pub struct FileImportSource {
    path: PathBuf,
}

impl FileImportSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl ImportSource for FileImportSource {
    async fn read_text(&self) -> Result<String, PlatformError> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}

/// Create platform services for desktop
pub fn create_platform() -> Platform {
    Platform::new(
        DesktopTimeProvider,
        DesktopRandomProvider,
        DesktopStorageProvider::new(),
        DesktopExportSink::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn storage_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = DesktopStorageProvider::with_path(&path);
        storage.save("squiggle_plays", "[]");
        assert!(path.exists());

        let reopened = DesktopStorageProvider::with_path(&path);
        assert_eq!(reopened.load("squiggle_plays").as_deref(), Some("[]"));
    }

    #[test]
    fn storage_remove_is_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let storage = DesktopStorageProvider::with_path(&path);
        storage.save("a", "1");
        storage.remove("a");

        let reopened = DesktopStorageProvider::with_path(&path);
        assert_eq!(reopened.load("a"), None);
    }

    #[test]
    fn corrupt_storage_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let storage = DesktopStorageProvider::with_path(&path);
        assert_eq!(storage.load("squiggle_plays"), None);
    }

    #[test]
    fn removing_absent_key_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        DesktopStorageProvider::with_path(&path).remove("squiggle_plays");
        assert!(!path.exists());
    }

    #[test]
    fn export_sink_writes_named_file() {
        let dir = TempDir::new().unwrap();
        let sink = DesktopExportSink::with_dir(dir.path());

        sink.deliver("squiggle-plays-2024-01-15.json", "application/json", "{}")
            .unwrap();

        let written = fs::read_to_string(dir.path().join("squiggle-plays-2024-01-15.json")).unwrap();
        assert_eq!(written, "{}");
    }

    #[tokio::test]
    async fn file_import_source_reads_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("import.json");
        fs::write(&path, "{\"plays\": []}").unwrap();

        let text = FileImportSource::new(&path).read_text().await.unwrap();
        assert_eq!(text, "{\"plays\": []}");
    }

    #[tokio::test]
    async fn file_import_source_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let source = FileImportSource::new(dir.path().join("missing.json"));

        assert!(matches!(
            source.read_text().await,
            Err(PlatformError::Io(_))
        ));
    }

    #[test]
    fn time_provider_reports_current_epoch() {
        // 2020-01-01T00:00:00Z
        assert!(DesktopTimeProvider.now_millis() > 1_577_836_800_000);
    }
}
