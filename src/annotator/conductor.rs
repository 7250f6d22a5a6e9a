//! Annotator: scan controller for listing badges
//!
//! # Design Principles
//! 1. State machine: Loading → Ready (pattern database installed)
//! 2. One marker attribute per listing is the only annotation state
//! 3. Every examined listing is marked, badge or not, so permanent rejects are
//!    not re-parsed on every page mutation
//!
//! # Usage
//! ```rust,ignore
//! let mut annotator = Annotator::new(AnnotatorConfig::default());
//! annotator.scan(&page);              // no-op, still loading
//! annotator.load_database(db);
//! let report = annotator.scan(&page); // badges every eligible listing once
//! annotator.set_preference(Metric::Magazine);
//! annotator.invalidate(&page);
//! annotator.scan(&page);              // badges again under the new preference
//! ```

use crate::annotator::extract::{extract, ExtractError, RawListing, Rejection};
use crate::annotator::host::ListingHost;
use crate::annotator::render;
use crate::config::AnnotatorConfig;
use crate::pattern::{resolver, Metric, PatternDatabase};
use serde::{Deserialize, Serialize};

const MARKER_VALUE: &str = "true";

// =============================================================================
// Reports
// =============================================================================

/// What happened to one listing during a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingOutcome {
    Annotated,
    Rejected(Rejection),
    /// Weapon name outside the resolver table
    Unresolved,
    /// Weapon resolved but the dataset has no entry for the seed
    NoData,
    /// Badge built but the listing has no anchor region
    NoAnchor,
    Malformed,
}

/// Counters for a single scan pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// True when the pass did nothing because the database is not loaded yet
    pub skipped_not_ready: bool,
    pub examined: usize,
    pub already_marked: usize,
    pub annotated: usize,
    pub rejected: usize,
    pub unresolved: usize,
    pub no_data: usize,
    pub no_anchor: usize,
    pub malformed: usize,
    pub elapsed_us: u64,
}

impl ScanReport {
    fn record(&mut self, outcome: ListingOutcome) {
        match outcome {
            ListingOutcome::Annotated => self.annotated += 1,
            ListingOutcome::Rejected(_) => self.rejected += 1,
            ListingOutcome::Unresolved => self.unresolved += 1,
            ListingOutcome::NoData => self.no_data += 1,
            ListingOutcome::NoAnchor => self.no_anchor += 1,
            ListingOutcome::Malformed => self.malformed += 1,
        }
    }
}

/// Running totals across the annotator's lifetime
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatorStats {
    pub scans: u64,
    pub scans_skipped: u64,
    pub badges_attached: u64,
    pub badges_removed: u64,
    pub invalidations: u64,
    pub malformed: u64,
}

// =============================================================================
// State Machine
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting for the pattern database
    Loading,
    /// Database installed, scans annotate
    Ready,
}

// =============================================================================
// Annotator
// =============================================================================

/// Drives extraction, lookup and rendering over every listing on the page
pub struct Annotator {
    config: AnnotatorConfig,
    database: Option<PatternDatabase>,
    preference: Metric,
    state: State,
    stats: AnnotatorStats,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(AnnotatorConfig::default())
    }
}

impl Annotator {
    pub fn new(config: AnnotatorConfig) -> Self {
        Self {
            config,
            database: None,
            preference: Metric::default(),
            state: State::Loading,
            stats: AnnotatorStats::default(),
        }
    }

    /// Install the pattern database. Later calls are ignored: the dataset is
    /// loaded once per page.
    pub fn load_database(&mut self, database: PatternDatabase) {
        if self.state == State::Ready {
            console_warn!("[Annotator] Pattern database already loaded, ignoring reload");
            return;
        }
        self.database = Some(database);
        self.state = State::Ready;
    }

    pub fn is_ready(&self) -> bool {
        self.state == State::Ready
    }

    pub fn state_name(&self) -> &'static str {
        match self.state {
            State::Loading => "loading",
            State::Ready => "ready",
        }
    }

    pub fn preference(&self) -> Metric {
        self.preference
    }

    /// Change the preference. Existing badges keep the old value until
    /// [`Annotator::invalidate`] runs.
    pub fn set_preference(&mut self, preference: Metric) {
        self.preference = preference;
    }

    pub fn database(&self) -> Option<&PatternDatabase> {
        self.database.as_ref()
    }

    pub fn stats(&self) -> &AnnotatorStats {
        &self.stats
    }

    /// Annotate every unmarked listing currently on the page.
    ///
    /// Before the database is loaded this touches nothing, so every listing
    /// is picked up by the first scan after loading.
    pub fn scan<H: ListingHost>(&mut self, host: &H) -> ScanReport {
        let start = instant::Instant::now();
        let mut report = ScanReport::default();
        self.stats.scans += 1;

        let Some(database) = self.database.as_ref() else {
            report.skipped_not_ready = true;
            self.stats.scans_skipped += 1;
            return report;
        };

        for element in host.listings() {
            report.examined += 1;
            if host.attribute(&element, &self.config.marker_attribute).is_some() {
                report.already_marked += 1;
                continue;
            }
            host.set_attribute(&element, &self.config.marker_attribute, MARKER_VALUE);

            let outcome = annotate_listing(host, &element, database, self.preference, &self.config);
            report.record(outcome);
        }

        self.stats.badges_attached += report.annotated as u64;
        self.stats.malformed += report.malformed as u64;
        report.elapsed_us = start.elapsed().as_micros() as u64;
        report
    }

    /// Clear every marker and remove every badge, ready for a full rescan.
    /// Walks marked rows rather than listings, so a row whose data attributes
    /// changed since it was badged is still cleared.
    /// Returns the number of listings that were un-marked.
    pub fn invalidate<H: ListingHost>(&mut self, host: &H) -> usize {
        let mut cleared = 0;
        for element in host.marked_listings() {
            host.remove_attribute(&element, &self.config.marker_attribute);
            self.stats.badges_removed += host.remove_badges(&element) as u64;
            cleared += 1;
        }
        self.stats.invalidations += 1;
        cleared
    }
}

/// Run the per-listing pipeline. Every failure stays inside this listing.
fn annotate_listing<H: ListingHost>(
    host: &H,
    element: &H::Element,
    database: &PatternDatabase,
    preference: Metric,
    config: &AnnotatorConfig,
) -> ListingOutcome {
    let raw = RawListing {
        asset_info: host.attribute(element, &config.asset_info_attribute),
        goods_info: host.attribute(element, &config.goods_info_attribute),
    };

    let record = match extract(&raw, config) {
        Ok(record) => record,
        Err(ExtractError::Rejected(reason)) => return ListingOutcome::Rejected(reason),
        Err(e @ ExtractError::Malformed(_)) => {
            console_error!("[Annotator] Error processing listing: {}", e);
            return ListingOutcome::Malformed;
        }
    };

    let Some(weapon_key) = resolver::resolve(&record.weapon_internal_name) else {
        return ListingOutcome::Unresolved;
    };
    let Some(metrics) = database.lookup(weapon_key, record.pattern_seed) else {
        return ListingOutcome::NoData;
    };

    let badge = render::build_badge(&record, metrics, weapon_key, preference, &config.badge_class);
    if render::attach(host, element, &badge) {
        ListingOutcome::Annotated
    } else {
        ListingOutcome::NoAnchor
    }
}
