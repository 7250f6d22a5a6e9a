//! PatternDatabase: static blue-coverage figures keyed by weapon and seed
//!
//! The dataset ships with the extension as JSON:
//!
//! ```json
//! { "skins": { "ak47": { "ch": { "661": { "top": 80.1, "magazine": 61.4, "overall": 70.9, "any_blue": 88.0 } } } } }
//! ```
//!
//! The `skins` wrapper is optional; a `skins` key that is not an object is
//! read as no wrapper at all. Loading is lenient: entries that do not
//! fit the shape are dropped rather than failing the whole file.

use super::metric::MetricSet;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum DatasetError {
    /// The text is not JSON at all
    Parse(serde_json::Error),
    /// JSON parsed, but the root (or `skins`) is not an object
    NotAnObject,
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "dataset is not valid JSON: {}", e),
            Self::NotAnObject => write!(f, "dataset root is not an object"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::NotAnObject => None,
        }
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

// =============================================================================
// Wire types
// =============================================================================

/// One seed entry as stored; missing or null figures read as zero
#[derive(Debug, Default, Deserialize)]
struct RawMetrics {
    #[serde(default)]
    top: Option<f64>,
    #[serde(default)]
    magazine: Option<f64>,
    #[serde(default)]
    overall: Option<f64>,
    #[serde(default)]
    any_blue: Option<f64>,
}

impl From<RawMetrics> for MetricSet {
    fn from(raw: RawMetrics) -> Self {
        MetricSet::new(
            raw.top.unwrap_or(0.0),
            raw.magazine.unwrap_or(0.0),
            raw.overall.unwrap_or(0.0),
            raw.any_blue.unwrap_or(0.0),
        )
    }
}

// =============================================================================
// PatternDatabase
// =============================================================================

/// Per-weapon seed table
#[derive(Debug, Clone, Default)]
pub struct WeaponEntry {
    seeds: HashMap<u32, MetricSet>,
}

impl WeaponEntry {
    pub fn get(&self, seed: u32) -> Option<&MetricSet> {
        self.seeds.get(&seed)
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }
}

/// Immutable lookup table loaded once per page
#[derive(Debug, Clone, Default)]
pub struct PatternDatabase {
    weapons: HashMap<String, WeaponEntry>,
}

impl PatternDatabase {
    /// Parse the dataset text
    pub fn from_json(text: &str) -> Result<Self, DatasetError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Build from an already parsed dataset
    pub fn from_value(mut value: Value) -> Result<Self, DatasetError> {
        let root = if value.get("skins").is_some_and(Value::is_object) {
            value["skins"].take()
        } else {
            value
        };
        let Value::Object(weapons) = root else {
            return Err(DatasetError::NotAnObject);
        };

        let mut db = PatternDatabase::default();
        for (weapon_key, mut weapon) in weapons {
            let Some(Value::Object(seeds)) = weapon.get_mut("ch").map(Value::take) else {
                continue;
            };

            let entry = db.weapons.entry(weapon_key).or_default();
            for (seed, metrics) in seeds {
                let Ok(seed) = seed.trim().parse::<u32>() else {
                    continue;
                };
                if !metrics.is_object() {
                    continue;
                }
                if let Ok(raw) = serde_json::from_value::<RawMetrics>(metrics) {
                    entry.seeds.insert(seed, raw.into());
                }
            }
        }

        Ok(db)
    }

    /// Insert a single figure set (used to assemble fixtures)
    pub fn insert(&mut self, weapon_key: impl Into<String>, seed: u32, metrics: MetricSet) {
        self.weapons.entry(weapon_key.into()).or_default().seeds.insert(seed, metrics);
    }

    /// Look up the figures for a weapon/seed pair. `None` means "no data".
    pub fn lookup(&self, weapon_key: &str, seed: u32) -> Option<&MetricSet> {
        self.weapons.get(weapon_key)?.get(seed)
    }

    pub fn weapon(&self, weapon_key: &str) -> Option<&WeaponEntry> {
        self.weapons.get(weapon_key)
    }

    pub fn weapon_count(&self) -> usize {
        self.weapons.len()
    }

    pub fn seed_count(&self, weapon_key: &str) -> usize {
        self.weapons.get(weapon_key).map(WeaponEntry::len).unwrap_or(0)
    }
}
