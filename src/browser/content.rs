//! ContentScript: wires the reactor to the live page
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { ContentScript } from './bluegem.js';
//!
//! await init();
//! // Keep the handle alive for the lifetime of the page
//! window.__bluegem = await ContentScript.start();
//! ```

use crate::annotator::conductor::{Annotator, ScanReport};
use crate::annotator::reactor::{parse_preference, Reactor};
use crate::browser::dom::DomHost;
use crate::browser::extension::{DatasetRequest, PreferenceListener, PreferenceRequest};
use crate::config::AnnotatorConfig;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MutationObserver, MutationObserverInit};

type Shared = Rc<RefCell<Reactor>>;

fn log_report(source: &str, report: &ScanReport) {
    if report.annotated > 0 || report.malformed > 0 {
        console_log!(
            "[ContentScript] {}: {} annotated, {} malformed, {} examined in {}us",
            source,
            report.annotated,
            report.malformed,
            report.examined,
            report.elapsed_us
        );
    }
}

#[wasm_bindgen]
pub struct ContentScript {
    reactor: Shared,
    host: Rc<DomHost>,
    observer: Option<MutationObserver>,
    _on_mutation: Option<Closure<dyn FnMut(js_sys::Array, MutationObserver)>>,
    _preference_listener: Option<PreferenceListener>,
}

#[wasm_bindgen]
impl ContentScript {
    /// Load the dataset and stored preference, annotate the page, then keep
    /// annotating on page and preference changes.
    ///
    /// `config` may be `undefined` or a partial `AnnotatorConfig` object.
    #[wasm_bindgen(js_name = start)]
    pub async fn start(config: JsValue) -> Result<ContentScript, JsValue> {
        let config: AnnotatorConfig = if config.is_undefined() || config.is_null() {
            AnnotatorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };

        let host = Rc::new(
            DomHost::from_window(config.clone()).ok_or_else(|| JsValue::from_str("No document available"))?,
        );
        let reactor: Shared = Rc::new(RefCell::new(Reactor::new(Annotator::new(config.clone()))));

        // Listen before loading: a change saved while the loads are in flight
        // must not be lost behind a stale stored read
        let preference_listener = listen_for_preference(&reactor, &host, &config.preference_key);

        // Both loads are in flight before either is awaited
        let dataset = DatasetRequest::start(&config.dataset_path);
        let preference = PreferenceRequest::start(&config.preference_key);

        let database = match dataset {
            Ok(request) => request.finish().await,
            Err(e) => Err(e),
        };
        let database = database
            .map_err(|e| console_warn!("[ContentScript] Pattern data unavailable: {}", e))
            .ok();
        let stored = preference
            .finish()
            .await
            .unwrap_or_else(|e| {
                console_warn!("[ContentScript] Could not read preference: {}", e);
                None
            });

        let report = reactor
            .borrow_mut()
            .on_ready(&*host, database, parse_preference(stored.as_deref()));
        log_report("initial scan", &report);

        let mut script = ContentScript {
            reactor,
            host,
            observer: None,
            _on_mutation: None,
            _preference_listener: preference_listener,
        };
        script.observe_page()?;
        Ok(script)
    }

    /// Current state name ("loading" / "ready")
    #[wasm_bindgen(js_name = stateName)]
    pub fn state_name(&self) -> String {
        self.reactor.borrow().annotator().state_name().to_string()
    }

    /// Cumulative annotator statistics
    #[wasm_bindgen(js_name = stats)]
    pub fn stats(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.reactor.borrow().annotator().stats()).unwrap_or(JsValue::NULL)
    }

    /// Run a scan now. Returns the pass report, or null if a pass is already running.
    #[wasm_bindgen(js_name = rescan)]
    pub fn rescan(&self) -> JsValue {
        match self.reactor.try_borrow_mut() {
            Ok(mut reactor) => {
                let report = reactor.on_page_mutation(&*self.host);
                serde_wasm_bindgen::to_value(&report).unwrap_or(JsValue::NULL)
            }
            Err(_) => JsValue::NULL,
        }
    }

    /// Stop reacting to page and preference changes. Existing badges stay.
    #[wasm_bindgen(js_name = disconnect)]
    pub fn disconnect(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self._on_mutation = None;
        self._preference_listener = None;
    }
}

impl ContentScript {
    fn observe_page(&mut self) -> Result<(), JsValue> {
        let Some(target) = self.host.observe_target() else {
            console_warn!("[ContentScript] Nothing to observe, page changes will be missed");
            return Ok(());
        };

        let reactor = Rc::clone(&self.reactor);
        let host = Rc::clone(&self.host);
        let on_mutation = Closure::wrap(Box::new(move |_records: js_sys::Array, _observer: MutationObserver| {
            // Badges we append trigger another notification; that pass finds
            // everything marked and does nothing.
            if let Ok(mut reactor) = reactor.try_borrow_mut() {
                let report = reactor.on_page_mutation(&*host);
                log_report("page change", &report);
            }
        }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>);

        let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())?;
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer.observe_with_options(&target, &options)?;

        self.observer = Some(observer);
        self._on_mutation = Some(on_mutation);
        Ok(())
    }
}

fn listen_for_preference(reactor: &Shared, host: &Rc<DomHost>, key: &str) -> Option<PreferenceListener> {
    let reactor = Rc::clone(reactor);
    let host = Rc::clone(host);
    let registered = PreferenceListener::register(key, move |change| match reactor.try_borrow_mut() {
        Ok(mut reactor) => {
            let report = reactor.on_preference_change(&*host, &change);
            log_report("preference change", &report);
        }
        Err(_) => console_warn!("[ContentScript] Preference changed mid-scan, ignoring"),
    });
    registered
        .map_err(|e| console_warn!("[ContentScript] Preference changes will not apply live: {}", e))
        .ok()
}
