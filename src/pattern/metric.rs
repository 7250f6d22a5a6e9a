//! Metric names, per-seed metric sets and display colour tiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Metric
// =============================================================================

/// One of the blue-coverage figures recorded per pattern seed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Blue coverage of the top (playside) of the weapon
    #[default]
    Top,
    /// Blue coverage of the magazine
    Magazine,
    /// Blue coverage across the whole skin
    Overall,
    /// Any shade of blue, including light and dark variants
    AnyBlue,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Top, Metric::Magazine, Metric::Overall, Metric::AnyBlue];

    /// Key used in the dataset and in the stored preference
    pub fn key(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Magazine => "magazine",
            Self::Overall => "overall",
            Self::AnyBlue => "any_blue",
        }
    }

    /// Human readable label shown on the badge
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Magazine => "Magazine",
            Self::Overall => "Overall",
            Self::AnyBlue => "Blue",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a stored preference names no known metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMetric(pub String);

impl fmt::Display for UnknownMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown metric '{}'", self.0)
    }
}

impl std::error::Error for UnknownMetric {}

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.key() == s)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

// =============================================================================
// MetricSet
// =============================================================================

/// Percentages recorded for one pattern seed, each in `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MetricSet {
    pub top: f64,
    pub magazine: f64,
    pub overall: f64,
    pub any_blue: f64,
}

impl MetricSet {
    pub fn new(top: f64, magazine: f64, overall: f64, any_blue: f64) -> Self {
        Self { top, magazine, overall, any_blue }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Top => self.top,
            Metric::Magazine => self.magazine,
            Metric::Overall => self.overall,
            Metric::AnyBlue => self.any_blue,
        }
    }
}

// =============================================================================
// Colour tiers
// =============================================================================

/// Discrete colour band for a primary value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTier {
    High,
    MidHigh,
    Mid,
    Low,
}

/// Inclusive lower bounds, checked top-down. Anything below the last bound is `Low`.
pub const TIER_THRESHOLDS: [(f64, ColorTier); 3] = [
    (50.0, ColorTier::High),
    (30.0, ColorTier::MidHigh),
    (15.0, ColorTier::Mid),
];

const TIER_COLORS: [(ColorTier, &str); 4] = [
    (ColorTier::High, "#00D4FF"),
    (ColorTier::MidHigh, "#4A90E2"),
    (ColorTier::Mid, "#5299FF"),
    (ColorTier::Low, "#7B8A99"),
];

impl ColorTier {
    pub fn for_value(value: f64) -> Self {
        TIER_THRESHOLDS
            .iter()
            .find(|(bound, _)| value >= *bound)
            .map(|(_, tier)| *tier)
            .unwrap_or(ColorTier::Low)
    }

    /// CSS background colour for this tier
    pub fn color(&self) -> &'static str {
        TIER_COLORS
            .iter()
            .find(|(tier, _)| tier == self)
            .map(|(_, color)| *color)
            .unwrap_or("#5299FF")
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::MidHigh => "mid-high",
            Self::Mid => "mid",
            Self::Low => "low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_keys_round_trip_through_from_str() {
        for metric in Metric::ALL {
            assert_eq!(metric.key().parse::<Metric>().unwrap(), metric);
        }
        assert!("blue".parse::<Metric>().is_err());
    }

    #[test]
    fn test_any_blue_displays_as_blue() {
        assert_eq!(Metric::AnyBlue.display_name(), "Blue");
        assert_eq!(Metric::Magazine.display_name(), "Magazine");
    }

    #[test]
    fn test_tier_examples() {
        assert_eq!(ColorTier::for_value(55.0), ColorTier::High);
        assert_eq!(ColorTier::for_value(32.0), ColorTier::MidHigh);
        assert_eq!(ColorTier::for_value(18.0), ColorTier::Mid);
        assert_eq!(ColorTier::for_value(5.0), ColorTier::Low);
    }

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        assert_eq!(ColorTier::for_value(50.0), ColorTier::High);
        assert_eq!(ColorTier::for_value(30.0), ColorTier::MidHigh);
        assert_eq!(ColorTier::for_value(15.0), ColorTier::Mid);
        assert_eq!(ColorTier::for_value(14.99), ColorTier::Low);
    }

    #[test]
    fn test_every_tier_has_a_distinct_color() {
        let tiers = [ColorTier::High, ColorTier::MidHigh, ColorTier::Mid, ColorTier::Low];
        let colors: std::collections::HashSet<_> = tiers.iter().map(|t| t.color()).collect();
        assert_eq!(colors.len(), 4);
        assert_eq!(ColorTier::High.color(), "#00D4FF");
        assert_eq!(ColorTier::Low.color(), "#7B8A99");
    }
}
