//! BlueGem: Case Hardened pattern annotator
//!
//! A Rust/WASM content script that badges marketplace listings with the
//! blue-coverage figures of their Case Hardened pattern seed.
//!
//! # Architecture
//!
//! ## Pattern data
//! - `pattern/database.rs` - PatternDatabase: weapon key → seed → metric set
//! - `pattern/metric.rs` - Metric names, metric sets, colour tiers
//! - `pattern/resolver.rs` - Host internal weapon names → dataset keys
//! - `pattern/policy.rs` - Which metric a badge leads with
//!
//! ## Annotation pipeline
//! - `annotator/host.rs` - ListingHost: the page as seen by the pipeline
//! - `annotator/extract.rs` - Listing attributes → ListingRecord
//! - `annotator/render.rs` - Badge building and attachment
//! - `annotator/conductor.rs` - Annotator: scan / invalidate with per-row markers
//! - `annotator/reactor.rs` - Reactor: page and preference notifications
//!
//! ## Browser adapter
//! - `browser/dom.rs` - DomHost over `web_sys::Document`
//! - `browser/extension.rs` - Dataset fetch and `storage.local` bindings
//! - `browser/content.rs` - ContentScript entry point
//! - `browser/settings.rs` - Popup preference bindings
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { ContentScript } from './bluegem.js';
//!
//! await init();
//! window.__bluegem = await ContentScript.start();
//! console.log(window.__bluegem.stats()); // { scans, badges_attached, ... }
//! ```

#[macro_use]
pub mod log;

pub mod annotator;
pub mod browser;
pub mod config;
pub mod pattern;

// Public exports
pub use annotator::*;
pub use config::*;
pub use pattern::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("bluegem v{}", env!("CARGO_PKG_VERSION"))
}
