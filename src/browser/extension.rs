//! WebExtension APIs: packaged dataset, `storage.local`, `storage.onChanged`
//!
//! Requests are split into a synchronous `start` that fires the underlying JS
//! call and an async `finish`, so both startup loads can be in flight at once.

use crate::annotator::reactor::PreferenceChange;
use crate::pattern::PatternDatabase;
use js_sys::{Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["browser", "runtime"], js_name = getURL)]
    fn runtime_get_url(path: &str) -> Result<String, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["browser", "storage", "local"], js_name = get)]
    fn storage_local_get(keys: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["browser", "storage", "local"], js_name = set)]
    fn storage_local_set(items: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["browser", "storage", "onChanged"], js_name = addListener)]
    fn storage_on_changed_add_listener(listener: &Closure<dyn FnMut(JsValue, JsValue)>) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["browser", "storage", "onChanged"], js_name = removeListener)]
    fn storage_on_changed_remove_listener(listener: &Closure<dyn FnMut(JsValue, JsValue)>) -> Result<(), JsValue>;
}

fn describe(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

// =============================================================================
// Dataset
// =============================================================================

/// In-flight fetch of the packaged pattern dataset
pub struct DatasetRequest {
    response: Promise,
}

impl DatasetRequest {
    pub fn start(path: &str) -> Result<Self, String> {
        let window = web_sys::window().ok_or("no window")?;
        let url = runtime_get_url(path).map_err(describe)?;
        let response = window.fetch_with_str(&url);
        Ok(Self { response })
    }

    pub async fn finish(self) -> Result<PatternDatabase, String> {
        let response: Response = JsFuture::from(self.response)
            .await
            .map_err(describe)?
            .dyn_into()
            .map_err(describe)?;
        if !response.ok() {
            return Err(format!("dataset request failed with status {}", response.status()));
        }

        let text = JsFuture::from(response.text().map_err(describe)?)
            .await
            .map_err(describe)?
            .as_string()
            .ok_or("dataset body is not text")?;

        PatternDatabase::from_json(&text).map_err(|e| e.to_string())
    }
}

// =============================================================================
// Preference store
// =============================================================================

/// In-flight read of one stored preference
pub struct PreferenceRequest {
    key: String,
    items: Result<Promise, String>,
}

impl PreferenceRequest {
    pub fn start(key: &str) -> Self {
        Self {
            key: key.to_string(),
            items: storage_local_get(&JsValue::from_str(key)).map_err(describe),
        }
    }

    /// The stored string, `None` when the key was never written
    pub async fn finish(self) -> Result<Option<String>, String> {
        let items = JsFuture::from(self.items?).await.map_err(describe)?;
        let value = Reflect::get(&items, &JsValue::from_str(&self.key)).map_err(describe)?;
        Ok(value.as_string())
    }
}

pub async fn write_preference(key: &str, value: &str) -> Result<(), String> {
    let items = Object::new();
    Reflect::set(&items, &JsValue::from_str(key), &JsValue::from_str(value)).map_err(describe)?;
    let promise = storage_local_set(&items).map_err(describe)?;
    JsFuture::from(promise).await.map_err(describe)?;
    Ok(())
}

/// Registration of a `storage.onChanged` listener for one `local` key.
/// Dropping it unregisters the listener.
pub struct PreferenceListener {
    closure: Closure<dyn FnMut(JsValue, JsValue)>,
}

impl PreferenceListener {
    pub fn register(key: &str, mut on_change: impl FnMut(PreferenceChange) + 'static) -> Result<Self, String> {
        let key = JsValue::from_str(key);
        let closure = Closure::wrap(Box::new(move |changes: JsValue, area: JsValue| {
            if area.as_string().as_deref() != Some("local") {
                return;
            }
            let Ok(entry) = Reflect::get(&changes, &key) else {
                return;
            };
            if entry.is_undefined() {
                return;
            }
            match serde_wasm_bindgen::from_value::<PreferenceChange>(entry) {
                Ok(change) => on_change(change),
                Err(e) => console_warn!("[Extension] Unreadable storage change: {}", e),
            }
        }) as Box<dyn FnMut(JsValue, JsValue)>);

        storage_on_changed_add_listener(&closure).map_err(describe)?;
        Ok(Self { closure })
    }
}

impl Drop for PreferenceListener {
    fn drop(&mut self) {
        let _ = storage_on_changed_remove_listener(&self.closure);
    }
}
