//! WebAssembly bindings for builder-core.
//!
//! This module provides the JavaScript-callable store surface when compiled
//! to WASM. Every mutation goes through [`BuilderStore::dispatch`], so no
//! call here throws into the view layer.

use wasm_bindgen::prelude::*;

use crate::{palette, BuilderStore, Command, StoreConfig};

/// Initialize the builder WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();
}

/// Builder store instance for WASM.
#[wasm_bindgen]
pub struct WasmBuilder {
    store: BuilderStore,
}

#[wasm_bindgen]
impl WasmBuilder {
    /// Create a new store with one "Home" page.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: BuilderStore::new(),
        }
    }

    /// Create a store with a custom undo depth.
    #[wasm_bindgen(js_name = withHistoryLimit)]
    #[must_use]
    pub fn with_history_limit(history_limit: usize) -> Self {
        Self {
            store: BuilderStore::with_config(StoreConfig { history_limit }),
        }
    }

    /// Apply a JSON-encoded command. Returns whether the state changed;
    /// malformed commands are ignored.
    pub fn dispatch(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Command>(json) {
            Ok(command) => self.store.dispatch(command),
            Err(e) => {
                tracing::debug!("Ignoring malformed command: {e}");
                false
            }
        }
    }

    /// Get the full editor state as JSON.
    #[wasm_bindgen(js_name = getStateJson)]
    #[must_use]
    pub fn get_state_json(&self) -> String {
        serde_json::to_string(&self.store.snapshot()).unwrap_or_default()
    }

    /// Get the website export as pretty-printed JSON.
    #[wasm_bindgen(js_name = exportJson)]
    #[must_use]
    pub fn export_json(&self) -> String {
        self.store
            .export(chrono::Utc::now())
            .to_pretty_json()
            .unwrap_or_default()
    }

    /// Get the component palette as JSON.
    #[wasm_bindgen(js_name = paletteJson)]
    #[must_use]
    pub fn palette_json(&self) -> String {
        serde_json::to_string(&palette::entries()).unwrap_or_default()
    }

    /// Step back in history.
    pub fn undo(&mut self) -> bool {
        self.store.undo()
    }

    /// Step forward in history.
    pub fn redo(&mut self) -> bool {
        self.store.redo()
    }

    /// Check if undo is available.
    #[wasm_bindgen(js_name = canUndo)]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    /// Check if redo is available.
    #[wasm_bindgen(js_name = canRedo)]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }
}

impl Default for WasmBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasm_builder_starts_with_home_page() {
        let builder = WasmBuilder::new();
        let state: serde_json::Value =
            serde_json::from_str(&builder.get_state_json()).expect("state json");
        assert_eq!(state["currentPageId"], "page-1");
        assert_eq!(state["pages"][0]["name"], "Home");
        assert_eq!(state["isDarkMode"], true);
    }

    #[test]
    fn dispatch_applies_valid_commands() {
        let mut builder = WasmBuilder::new();
        assert!(builder.dispatch(r#"{"op":"addFromPalette","type":"heading"}"#));
        assert!(builder.can_undo());
        let state: serde_json::Value =
            serde_json::from_str(&builder.get_state_json()).expect("state json");
        assert_eq!(state["pages"][0]["elements"][0]["type"], "heading");
    }

    #[test]
    fn dispatch_ignores_malformed_json() {
        let mut builder = WasmBuilder::new();
        assert!(!builder.dispatch("{ not valid json }"));
        assert!(!builder.dispatch(r#"{"op":"explode"}"#));
        assert!(!builder.can_undo());
    }

    #[test]
    fn undo_redo_roundtrip() {
        let mut builder = WasmBuilder::default();
        assert!(builder.dispatch(r#"{"op":"addPage","name":"Blog"}"#));
        assert!(builder.undo());
        assert!(builder.can_redo());
        assert!(builder.redo());
        assert!(!builder.redo());
    }

    #[test]
    fn export_json_lists_pages() {
        let builder = WasmBuilder::new();
        let export: serde_json::Value =
            serde_json::from_str(&builder.export_json()).expect("export json");
        assert_eq!(export["pages"].as_array().map(Vec::len), Some(1));
        assert!(export["pages"][0]["exportedAt"].is_string());
    }

    #[test]
    fn palette_json_has_every_kind() {
        let builder = WasmBuilder::new();
        let entries: serde_json::Value =
            serde_json::from_str(&builder.palette_json()).expect("palette json");
        assert_eq!(entries.as_array().map(Vec::len), Some(11));
    }
}
