//! Reactor: dispatches page and preference notifications to the annotator
//!
//! Two independent event sources feed the same two operations:
//!
//! | Event | Action |
//! |-------|--------|
//! | startup loads finished | install database + preference, `scan` |
//! | page structure changed | `scan` |
//! | stored preference changed | `invalidate`, then `scan` |
//!
//! The reactor owns the annotator and with it the current preference, so the
//! preference is only ever written from here. A change notification can land
//! while the startup loads are still in flight; it outranks the stored value
//! those loads read.

use crate::annotator::conductor::{Annotator, ScanReport};
use crate::annotator::host::ListingHost;
use crate::pattern::{Metric, PatternDatabase};
use serde::{Deserialize, Serialize};

/// Payload of a stored-preference change notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceChange {
    #[serde(default)]
    pub old_value: Option<String>,
    #[serde(default)]
    pub new_value: Option<String>,
}

/// Parse a stored preference, falling back to the default for anything unknown
pub fn parse_preference(value: Option<&str>) -> Metric {
    match value {
        None => Metric::default(),
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            console_warn!("[Reactor] {}, using '{}'", e, Metric::default());
            Metric::default()
        }),
    }
}

pub struct Reactor {
    annotator: Annotator,
    /// Set once a change notification has been applied
    preference_pushed: bool,
}

impl Reactor {
    pub fn new(annotator: Annotator) -> Self {
        Self {
            annotator,
            preference_pushed: false,
        }
    }

    pub fn annotator(&self) -> &Annotator {
        &self.annotator
    }

    /// Both startup loads completed. A missing database leaves the annotator
    /// loading, so later notifications stay no-ops.
    ///
    /// `stored` is ignored when a change notification arrived during loading.
    pub fn on_ready<H: ListingHost>(
        &mut self,
        host: &H,
        database: Option<PatternDatabase>,
        stored: Metric,
    ) -> ScanReport {
        if !self.preference_pushed {
            self.annotator.set_preference(stored);
        }
        if let Some(database) = database {
            console_log!(
                "[Reactor] Pattern database ready ({} weapons), metric '{}'",
                database.weapon_count(),
                self.annotator.preference()
            );
            self.annotator.load_database(database);
        }
        self.annotator.scan(host)
    }

    pub fn on_page_mutation<H: ListingHost>(&mut self, host: &H) -> ScanReport {
        self.annotator.scan(host)
    }

    /// Apply a new preference. Every badge drawn under the old one is removed
    /// before the rescan starts.
    pub fn on_preference_change<H: ListingHost>(&mut self, host: &H, change: &PreferenceChange) -> ScanReport {
        let preference = parse_preference(change.new_value.as_deref());
        self.annotator.set_preference(preference);
        self.preference_pushed = true;
        self.annotator.invalidate(host);
        self.annotator.scan(host)
    }
}
