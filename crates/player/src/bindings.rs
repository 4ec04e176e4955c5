//! Browser entry points.
//!
//! `PlayDesigner` is the only type the JS side sees. Plays cross the boundary
//! as plain objects in the same camelCase shape the export file uses; every
//! failure is rejected with its message string.

use std::fmt::Display;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use squiggle_domain::{CreatePlayRequest, PlayId, PlayerState};

use crate::application::services::PlayService;
use crate::config::PlayStoreConfig;
use crate::infrastructure::init_logging;
use crate::infrastructure::platform::{create_platform, WasmFileImportSource};

fn js_error(error: impl Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(js_error)
}

#[wasm_bindgen]
pub struct PlayDesigner {
    service: PlayService,
}

impl PlayDesigner {
    fn from_config(config: &PlayStoreConfig) -> PlayDesigner {
        init_logging();
        PlayDesigner {
            service: PlayService::from_config(create_platform(), config),
        }
    }
}

#[wasm_bindgen]
impl PlayDesigner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PlayDesigner {
        Self::from_config(&PlayStoreConfig::default())
    }

    /// Build with overrides, e.g. `{ storageKey: "plays_demo", sessionTimeoutSecs: 60 }`.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<PlayDesigner, JsValue> {
        let config: PlayStoreConfig = serde_wasm_bindgen::from_value(config).map_err(js_error)?;
        Ok(Self::from_config(&config))
    }

    #[wasm_bindgen(js_name = createPlay)]
    pub fn create_play(&self, name: String, player_states: JsValue) -> Result<JsValue, JsValue> {
        let player_states: Vec<PlayerState> =
            serde_wasm_bindgen::from_value(player_states).map_err(js_error)?;
        let play = self
            .service
            .create_play(CreatePlayRequest::new(name, player_states))
            .map_err(js_error)?;
        to_js(&play)
    }

    #[wasm_bindgen(js_name = listPlays)]
    pub fn list_plays(&self) -> Result<JsValue, JsValue> {
        to_js(&self.service.list_plays().map_err(js_error)?)
    }

    #[wasm_bindgen(js_name = getPlay)]
    pub fn get_play(&self, id: String) -> Result<JsValue, JsValue> {
        to_js(&self.service.get_play(&PlayId::from(id)).map_err(js_error)?)
    }

    #[wasm_bindgen(js_name = deletePlay)]
    pub fn delete_play(&self, id: String) -> Result<(), JsValue> {
        self.service.delete_play(&PlayId::from(id)).map_err(js_error)
    }

    #[wasm_bindgen(js_name = clearAllPlays)]
    pub fn clear_all_plays(&self) {
        self.service.clear_all_plays();
    }

    /// Starts a download of every play as `squiggle-plays-<date>.json`.
    #[wasm_bindgen(js_name = exportPlays)]
    pub fn export_plays(&self) -> Result<(), JsValue> {
        self.service.export_plays().map_err(js_error)
    }

    /// Resolves to `{ successCount, errors }`.
    #[wasm_bindgen(js_name = importPlays)]
    pub fn import_plays(&self, file: web_sys::File) -> js_sys::Promise {
        let service = self.service.clone();
        wasm_bindgen_futures::future_to_promise(async move {
            let source = WasmFileImportSource::new(file);
            let summary = service.import_plays(&source).await.map_err(js_error)?;
            to_js(&summary)
        })
    }

    #[wasm_bindgen(js_name = isSessionValid)]
    pub fn is_session_valid(&self) -> bool {
        self.service.is_session_valid()
    }

    #[wasm_bindgen(js_name = remainingSeconds)]
    pub fn remaining_seconds(&self) -> u32 {
        u32::try_from(self.service.remaining_seconds()).unwrap_or(u32::MAX)
    }
}

impl Default for PlayDesigner {
    fn default() -> Self {
        Self::new()
    }
}
