//! Metric policy: which figure a badge leads with.
//!
//! Only the AK-47 lets the user pick the headline metric. Every other weapon
//! shows the overall figure no matter what the preference says.

use super::metric::Metric;

/// Dataset key of the one weapon family with a user-selectable metric
pub const CONFIGURABLE_WEAPON: &str = "ak47";

pub fn is_configurable(weapon_key: &str) -> bool {
    weapon_key == CONFIGURABLE_WEAPON
}

/// Primary metric for `weapon_key` under the given preference
pub fn primary_metric(weapon_key: &str, preference: Metric) -> Metric {
    if is_configurable(weapon_key) {
        preference
    } else {
        Metric::Overall
    }
}
