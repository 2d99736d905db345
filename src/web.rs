//! Browser bindings (wasm32)
//!
//! Thin wrapper so the page script can drive a [`Spellbook`] backed by
//! LocalStorage and read card projections as plain JS objects.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::app::Spellbook;
use crate::catalog::Catalog;
use crate::error::ProfileError;
use crate::persistence::LocalStorage;
use crate::selection::SortMethod;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    crate::init_logging();
    log::info!("Spellbook starting...");
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("encode failed: {e}")))
}

fn profile_error(e: ProfileError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Fetch a URL and return its body as text
async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: Response = JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "failed to fetch {url}: HTTP {}",
            response.status()
        )));
    }
    JsFuture::from(response.text()?)
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("catalog response was not text"))
}

/// Browser-exposed spellbook handle
#[wasm_bindgen]
pub struct SpellbookApp {
    book: Spellbook<LocalStorage>,
}

#[wasm_bindgen]
impl SpellbookApp {
    /// Fetch the catalog from `url` and open saved profiles
    pub async fn load(url: String) -> Result<SpellbookApp, JsValue> {
        let json = fetch_text(&url).await?;
        Self::from_json(&json)
    }

    /// Open with catalog JSON already in hand
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<SpellbookApp, JsValue> {
        let catalog = Catalog::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let storage = LocalStorage::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            book: Spellbook::open(catalog, storage),
        })
    }

    /// Both card columns and the counter
    pub fn cards(&self) -> Result<JsValue, JsValue> {
        to_js(&self.book.cards())
    }

    #[wasm_bindgen(js_name = classOptions)]
    pub fn class_options(&self) -> Result<JsValue, JsValue> {
        to_js(&self.book.catalog().class_options())
    }

    #[wasm_bindgen(js_name = levelOptions)]
    pub fn level_options(&self) -> Result<JsValue, JsValue> {
        to_js(&self.book.catalog().level_options())
    }

    // === Filters ===

    #[wasm_bindgen(js_name = setClassFilter)]
    pub fn set_class_filter(&mut self, class: &str) {
        self.book.set_class_filter(class);
    }

    #[wasm_bindgen(js_name = setMinLevel)]
    pub fn set_min_level(&mut self, level: &str) {
        self.book.set_min_level(level);
    }

    #[wasm_bindgen(js_name = setMaxLevel)]
    pub fn set_max_level(&mut self, level: &str) {
        self.book.set_max_level(level);
    }

    /// Unknown methods fall back to catalog order
    #[wasm_bindgen(js_name = setSortMethod)]
    pub fn set_sort_method(&mut self, method: &str) {
        let sort = SortMethod::from_str(method).unwrap_or_else(|| {
            log::warn!("Unknown sort method {method:?}, keeping catalog order");
            SortMethod::None
        });
        self.book.set_sort_method(sort);
    }

    /// Raw substring; whitespace in the term is significant
    #[wasm_bindgen(js_name = setSearchTerm)]
    pub fn set_search_term(&mut self, term: &str) {
        self.book.set_search_term(term);
    }

    #[wasm_bindgen(js_name = resetFilter)]
    pub fn reset_filter(&mut self) {
        self.book.reset_filter();
    }

    #[wasm_bindgen(js_name = toggleExpanded)]
    pub fn toggle_expanded(&mut self, name: &str) -> bool {
        self.book.toggle_expanded(name)
    }

    // === Selection ===

    pub fn prepare(&mut self, name: &str) -> bool {
        self.book.prepare(name)
    }

    pub fn unprepare(&mut self, name: &str) -> bool {
        self.book.unprepare(name)
    }

    #[wasm_bindgen(js_name = togglePrepared)]
    pub fn toggle_prepared(&mut self, name: &str) -> bool {
        self.book.toggle_prepared(name)
    }

    #[wasm_bindgen(js_name = setIgnored)]
    pub fn set_ignored(&mut self, name: &str, ignored: bool) -> bool {
        self.book.set_ignored(name, ignored)
    }

    // === Profiles ===

    #[wasm_bindgen(js_name = profileNames)]
    pub fn profile_names(&self) -> Result<JsValue, JsValue> {
        to_js(&self.book.profiles().names())
    }

    #[wasm_bindgen(js_name = activeProfile)]
    pub fn active_profile(&self) -> String {
        self.book.profiles().active_name().to_string()
    }

    #[wasm_bindgen(js_name = activateProfile)]
    pub fn activate_profile(&mut self, name: &str) -> Result<(), JsValue> {
        self.book.activate_profile(name).map_err(profile_error)
    }

    #[wasm_bindgen(js_name = createProfile)]
    pub fn create_profile(&mut self, name: &str) -> Result<(), JsValue> {
        self.book.create_profile(name).map_err(profile_error)
    }

    #[wasm_bindgen(js_name = deleteProfile)]
    pub fn delete_profile(&mut self, name: &str) -> Result<(), JsValue> {
        self.book.delete_profile(name).map_err(profile_error)
    }
}
