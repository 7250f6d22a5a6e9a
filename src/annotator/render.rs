//! Annotation renderer: metric figures to a display badge
//!
//! Building a badge is pure. Attaching it is the only step that touches the
//! host, and it does no deduplication of its own: the conductor's marker is
//! what keeps a listing from being badged twice.

use crate::annotator::extract::ListingRecord;
use crate::annotator::host::ListingHost;
use crate::pattern::{policy, ColorTier, Metric, MetricSet};
use serde::{Deserialize, Serialize};

/// Inline style shared by every badge; `{}` is the tier colour
const BADGE_STYLE: &str = "float: left; background: {}; margin-left: 5px; padding: 2px 6px; border-radius: 3px; font-size: 11px; font-weight: 500;";

// =============================================================================
// Badge
// =============================================================================

/// A rendered annotation, ready to be attached to a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    /// Metric the badge leads with
    pub metric: Metric,
    /// Value of that metric
    pub value: f64,
    pub tier: ColorTier,
    /// e.g. `Top: 62.3%`
    pub label: String,
    /// Multi-line detail shown on hover
    pub tooltip: String,
    pub class_name: String,
    pub style: String,
}

// =============================================================================
// Rendering
// =============================================================================

/// Build the badge for one listing under the given preference
pub fn build_badge(
    listing: &ListingRecord,
    metrics: &MetricSet,
    weapon_key: &str,
    preference: Metric,
    class_name: &str,
) -> Badge {
    let metric = policy::primary_metric(weapon_key, preference);
    let value = metrics.get(metric);
    let tier = ColorTier::for_value(value);

    let label = format!("{}: {:.1}%", metric.display_name(), value);
    let tooltip = if policy::is_configurable(weapon_key) {
        format!(
            "Pattern Seed: {}\nTop: {:.2}%\nMagazine: {:.2}%\nOverall: {:.2}%\n",
            listing.pattern_seed, metrics.top, metrics.magazine, metrics.overall
        )
    } else {
        format!(
            "Pattern Seed: {}\nOverall Blue: {:.2}%",
            listing.pattern_seed, metrics.overall
        )
    };

    Badge {
        metric,
        value,
        tier,
        label,
        tooltip,
        class_name: class_name.to_string(),
        style: BADGE_STYLE.replace("{}", tier.color()),
    }
}

/// Attach a badge to the listing's anchor region.
///
/// Returns `false` if the listing has no anchor or the host refused the write.
pub fn attach<H: ListingHost>(host: &H, element: &H::Element, badge: &Badge) -> bool {
    let Some(anchor) = host.anchor(element) else {
        return false;
    };
    match host.append_badge(&anchor, badge) {
        Ok(()) => true,
        Err(e) => {
            console_warn!("[Renderer] Could not attach badge: {}", e);
            false
        }
    }
}
