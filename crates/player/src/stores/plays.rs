//! Session-gated play store.
//!
//! Owns the in-memory play list and its persisted mirror. Every operation
//! except `clear_plays` checks the session first: an expired session wipes
//! everything, a live one is extended.

use std::collections::HashSet;

use thiserror::Error;

use squiggle_domain::{CreatePlayRequest, Play, PlayCollection, PlayId};

use crate::config::PlayStoreConfig;
use crate::state::Platform;
use crate::stores::SessionGuard;

/// Failure of a store operation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Session expired")]
    SessionExpired,
}

pub struct PlayStore {
    platform: Platform,
    session: SessionGuard,
    storage_key: String,
    plays: PlayCollection,
    /// Every id this store has handed out or loaded, deleted ones included
    issued_ids: HashSet<PlayId>,
}

impl PlayStore {
    /// Create a store and load whatever is persisted under `storage_key`.
    pub fn new(platform: Platform, session: SessionGuard, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let plays = Self::load(&platform, &storage_key);
        let issued_ids = plays.ids().cloned().collect();

        Self {
            platform,
            session,
            storage_key,
            plays,
            issued_ids,
        }
    }

    /// Create a store with a fresh session guard built from `config`.
    pub fn from_config(platform: Platform, config: &PlayStoreConfig) -> Self {
        let session = SessionGuard::new(platform.clone(), config.session_timeout);
        Self::new(platform, session, config.storage_key.clone())
    }

    fn load(platform: &Platform, storage_key: &str) -> PlayCollection {
        let Some(raw) = platform.storage_load(storage_key) else {
            return PlayCollection::new();
        };

        match PlayCollection::from_json(&raw) {
            Ok(plays) => {
                tracing::info!(count = plays.len(), "Plays loaded from session storage");
                plays
            }
            Err(e) => {
                tracing::error!("Failed to load plays from session storage: {}", e);
                PlayCollection::new()
            }
        }
    }

    fn save(&self) {
        match self.plays.to_json() {
            Ok(raw) => self.platform.storage_save(&self.storage_key, &raw),
            Err(e) => tracing::error!("Failed to save plays to session storage: {}", e),
        }
    }

    /// Returns false (after wiping everything) when the session has lapsed.
    fn check_session(&mut self) -> bool {
        if !self.session.is_valid() {
            tracing::warn!(
                last_activity = self.session.last_activity_millis(),
                "Session expired, clearing stored plays"
            );
            self.clear_plays();
            return false;
        }

        self.session.record_activity();
        true
    }

    fn next_id(&mut self) -> PlayId {
        let now = self.platform.now_millis();
        let platform = &self.platform;
        let mut attempt = 0;
        loop {
            let id = PlayId::generate(now + attempt, || platform.random_range(0, 35) as u32);
            if self.issued_ids.insert(id.clone()) {
                return id;
            }
            tracing::debug!(%id, "Generated play id already issued, retrying");
            attempt += 1;
        }
    }

    pub fn create_play(&mut self, request: CreatePlayRequest) -> Result<Play, StoreError> {
        if !self.check_session() {
            return Err(StoreError::SessionExpired);
        }

        let id = self.next_id();
        let play = Play::new(id, request, self.platform.now_utc());
        self.plays.push(play.clone());
        self.save();

        tracing::info!(play_id = %play.id, name = %play.name, "Play created");
        Ok(play)
    }

    /// All plays in creation order; empty if the session has lapsed.
    pub fn list_plays(&mut self) -> &[Play] {
        if !self.check_session() {
            return &[];
        }
        self.plays.as_slice()
    }

    pub fn get_play(&mut self, id: &PlayId) -> Option<&Play> {
        if !self.check_session() {
            return None;
        }
        self.plays.get(id)
    }

    /// Remove a play; unknown ids are ignored.
    pub fn delete_play(&mut self, id: &PlayId) {
        if !self.check_session() {
            return;
        }

        if self.plays.remove(id).is_some() {
            self.save();
            tracing::info!(play_id = %id, "Play deleted");
        }
    }

    /// Drop every play and the persisted entry, whatever the session state.
    pub fn clear_plays(&mut self) {
        self.plays.clear();
        self.platform.storage_remove(&self.storage_key);
        tracing::info!("All plays cleared");
    }

    pub fn session(&self) -> &SessionGuard {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SESSION_TIMEOUT;
    use crate::infrastructure::platform::mock::{
        CapturingExportSink, FixedRandomProvider, MemoryStorageProvider, MockPlatform,
        MockTimeProvider,
    };
    use crate::infrastructure::testing::fixtures::create_request;
    use crate::ports::outbound::{storage_keys, StorageProvider};

    fn store(mock: &MockPlatform) -> PlayStore {
        PlayStore::from_config(mock.platform.clone(), &PlayStoreConfig::default())
    }

    fn persisted(mock: &MockPlatform) -> Option<String> {
        mock.storage.load(storage_keys::PLAYS)
    }

    fn assert_mirror_matches(store: &mut PlayStore, mock: &MockPlatform) {
        let in_memory = serde_json::to_string(store.list_plays()).unwrap();
        assert_eq!(persisted(mock).unwrap(), in_memory);
    }

    #[test]
    fn create_assigns_id_and_timestamp() {
        let mock = MockPlatform::new();
        let mut store = store(&mock);

        let play = store.create_play(create_request("Crash ball")).unwrap();

        assert!(play.id.as_str().starts_with("play_1705314600000_"));
        assert_eq!(play.created_at, mock.platform.now_utc());
        assert_eq!(play.name, "Crash ball");
        assert_eq!(play.player_states.len(), 3);
    }

    #[test]
    fn create_allows_empty_player_states() {
        let mock = MockPlatform::new();
        let mut store = store(&mock);

        let play = store
            .create_play(CreatePlayRequest::new("Blank", Vec::new()))
            .unwrap();
        assert!(play.player_states.is_empty());
    }

    #[test]
    fn persisted_copy_tracks_every_mutation() {
        let mock = MockPlatform::new();
        let mut store = store(&mock);

        let first = store.create_play(create_request("One")).unwrap();
        assert_mirror_matches(&mut store, &mock);

        store.create_play(create_request("Two")).unwrap();
        assert_mirror_matches(&mut store, &mock);

        store.delete_play(&first.id);
        assert_mirror_matches(&mut store, &mock);
        assert_eq!(store.list_plays().len(), 1);
    }

    #[test]
    fn ids_are_unique_even_with_frozen_clock_and_constant_random() {
        let storage = MemoryStorageProvider::default();
        let platform = Platform::new(
            MockTimeProvider::default(),
            FixedRandomProvider(7),
            storage,
            CapturingExportSink::default(),
        );
        let mut store = PlayStore::from_config(platform, &PlayStoreConfig::default());

        let mut seen = HashSet::new();
        for i in 0..25 {
            let play = store.create_play(create_request(&format!("P{i}"))).unwrap();
            assert!(seen.insert(play.id));
        }
    }

    #[test]
    fn ids_of_deleted_plays_are_not_reissued() {
        let storage = MemoryStorageProvider::default();
        let platform = Platform::new(
            MockTimeProvider::default(),
            FixedRandomProvider(0),
            storage,
            CapturingExportSink::default(),
        );
        let mut store = PlayStore::from_config(platform, &PlayStoreConfig::default());

        let first = store.create_play(create_request("Gone")).unwrap();
        store.delete_play(&first.id);
        let second = store.create_play(create_request("New")).unwrap();

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn get_finds_play_by_id() {
        let mock = MockPlatform::new();
        let mut store = store(&mock);
        let play = store.create_play(create_request("Loop")).unwrap();

        assert_eq!(store.get_play(&play.id), Some(&play));
        assert_eq!(store.get_play(&PlayId::from("play_missing")), None);
    }

    #[test]
    fn delete_missing_id_is_a_no_op() {
        let mock = MockPlatform::new();
        let mut store = store(&mock);
        store.create_play(create_request("Keep")).unwrap();
        let before = persisted(&mock);

        store.delete_play(&PlayId::from("play_missing"));

        assert_eq!(store.list_plays().len(), 1);
        assert_eq!(persisted(&mock), before);
    }

    #[test]
    fn loads_plays_written_by_previous_store() {
        let mock = MockPlatform::new();
        let created = {
            let mut first = store(&mock);
            first.create_play(create_request("Persisted")).unwrap()
        };

        let mut second = store(&mock);
        assert_eq!(second.list_plays(), &[created]);
    }

    #[test]
    fn corrupt_storage_loads_as_empty() {
        let storage = MemoryStorageProvider::with_entry(storage_keys::PLAYS, "{oops");
        let mock = MockPlatform::with_storage(storage);

        let mut store = store(&mock);
        assert!(store.list_plays().is_empty());
    }

    #[test]
    fn loads_plays_with_boolean_timestamps() {
        let raw = r#"[{"id":"play_1_abc","name":"Legacy","createdAt":"2024-01-15T10:30:00.000Z",
            "playerStates":[{"playerId":"p1","position":{"x":1,"y":1},"timestamp":true}]}]"#;
        let storage = MemoryStorageProvider::with_entry(storage_keys::PLAYS, raw);
        let mock = MockPlatform::with_storage(storage);

        let mut store = store(&mock);
        let plays = store.list_plays();
        assert_eq!(plays.len(), 1);
        assert_eq!(plays[0].name, "Legacy");
    }

    #[test]
    fn activity_slides_the_session_window() {
        let mock = MockPlatform::new();
        let mut store = store(&mock);
        store.create_play(create_request("Alive")).unwrap();

        for _ in 0..5 {
            mock.clock.advance_secs(500);
            assert_eq!(store.list_plays().len(), 1);
            assert_eq!(store.session().remaining_seconds(), 600);
        }
    }

    #[test]
    fn expired_session_wipes_on_next_read() {
        let mock = MockPlatform::new();
        let mut store = store(&mock);
        let play = store.create_play(create_request("Old")).unwrap();

        mock.clock.advance_secs(600);
        assert!(!store.session().is_valid());

        assert!(store.get_play(&play.id).is_none());
        assert!(persisted(&mock).is_none());
        assert!(store.list_plays().is_empty());
    }

    #[test]
    fn expired_session_rejects_create_after_clearing() {
        let mock = MockPlatform::new();
        let mut store = store(&mock);
        store.create_play(create_request("Old")).unwrap();

        mock.clock.advance_secs(DEFAULT_SESSION_TIMEOUT.as_secs() + 1);

        assert_eq!(
            store.create_play(create_request("New")),
            Err(StoreError::SessionExpired)
        );
        assert!(persisted(&mock).is_none());
    }

    #[test]
    fn expired_session_delete_clears_instead() {
        let mock = MockPlatform::new();
        let mut store = store(&mock);
        let keep = store.create_play(create_request("A")).unwrap();
        store.create_play(create_request("B")).unwrap();

        mock.clock.advance_secs(700);
        store.delete_play(&keep.id);

        assert!(persisted(&mock).is_none());
    }

    #[test]
    fn clear_ignores_session_state() {
        let mock = MockPlatform::new();
        let mut store = store(&mock);
        store.create_play(create_request("A")).unwrap();

        store.clear_plays();

        assert!(persisted(&mock).is_none());
        assert!(store.list_plays().is_empty());
    }

    #[test]
    fn custom_storage_key_is_used() {
        let mock = MockPlatform::new();
        let config = PlayStoreConfig::default().with_storage_key("plays_alt");
        let mut store = PlayStore::from_config(mock.platform.clone(), &config);

        store.create_play(create_request("A")).unwrap();

        assert!(mock.storage.load("plays_alt").is_some());
        assert!(persisted(&mock).is_none());
    }
}
