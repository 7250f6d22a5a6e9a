//! Settings bridge for the extension popup.
//!
//! The popup form is plain HTML; it reads and writes the metric preference
//! through these bindings so only valid metric names ever reach storage.
//! The content script picks changes up via `storage.onChanged`.

use crate::browser::extension::{write_preference, PreferenceRequest};
use crate::config::AnnotatorConfig;
use crate::pattern::Metric;
use wasm_bindgen::prelude::*;

/// Stored AK-47 metric, or the default when none was saved
#[wasm_bindgen(js_name = loadPreference)]
pub async fn load_preference() -> Result<String, JsValue> {
    let key = AnnotatorConfig::default().preference_key;
    let stored = PreferenceRequest::start(&key)
        .finish()
        .await
        .map_err(|e| JsValue::from_str(&e))?;
    Ok(crate::annotator::reactor::parse_preference(stored.as_deref()).key().to_string())
}

/// Validate and persist a new AK-47 metric
#[wasm_bindgen(js_name = savePreference)]
pub async fn save_preference(metric: String) -> Result<(), JsValue> {
    let metric: Metric = metric.parse().map_err(|e: crate::pattern::UnknownMetric| JsValue::from_str(&e.to_string()))?;
    let key = AnnotatorConfig::default().preference_key;
    write_preference(&key, metric.key())
        .await
        .map_err(|e| JsValue::from_str(&format!("Failed to save preference: {}", e)))
}

/// Metric keys the popup may offer, in display order
#[wasm_bindgen(js_name = metricOptions)]
pub fn metric_options() -> JsValue {
    let options: Vec<(&str, &str)> = Metric::ALL.iter().map(|m| (m.key(), m.display_name())).collect();
    serde_wasm_bindgen::to_value(&options).unwrap_or(JsValue::NULL)
}
