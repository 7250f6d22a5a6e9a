//! Listing extractor: raw row attributes to a normalized listing record
//!
//! The host page attaches two JSON blobs to every listing row:
//!
//! | Attribute | Path read | Meaning |
//! |-----------|-----------|---------|
//! | asset info | `info.paintseed` | pattern seed |
//! | goods info | `tags.series.internal_name` | skin family tag |
//! | goods info | `tags.weapon.internal_name` | weapon internal name |
//!
//! Anything else in the blobs is ignored. Paths are walked optionally, so a
//! missing branch is a rejection and only unparsable text is reported as
//! malformed.

use crate::config::AnnotatorConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// =============================================================================
// Types
// =============================================================================

/// The two attribute values of one listing row, as read from the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawListing {
    pub asset_info: Option<String>,
    pub goods_info: Option<String>,
}

impl RawListing {
    pub fn new(asset_info: impl Into<String>, goods_info: impl Into<String>) -> Self {
        Self {
            asset_info: Some(asset_info.into()),
            goods_info: Some(goods_info.into()),
        }
    }
}

/// A listing that belongs to the target family and carries both identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub weapon_internal_name: String,
    pub pattern_seed: u32,
}

/// Why a listing was skipped without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// One of the JSON attributes disappeared before it could be read
    MissingAttribute,
    /// Series tag is not one of the accepted family spellings
    NotTargetFamily,
    /// No `info.paintseed`
    MissingSeed,
    /// No `tags.weapon.internal_name`
    MissingWeapon,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// Expected absence, skipped silently
    Rejected(Rejection),
    /// Data present but unusable, worth a diagnostic
    Malformed(String),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(reason) => write!(f, "listing rejected: {:?}", reason),
            Self::Malformed(msg) => write!(f, "malformed listing data: {}", msg),
        }
    }
}

impl std::error::Error for ExtractError {}

impl From<Rejection> for ExtractError {
    fn from(reason: Rejection) -> Self {
        Self::Rejected(reason)
    }
}

// =============================================================================
// Extraction
// =============================================================================

/// Turn a raw listing into a record, or explain why not
pub fn extract(raw: &RawListing, config: &AnnotatorConfig) -> Result<ListingRecord, ExtractError> {
    let (Some(asset_text), Some(goods_text)) = (&raw.asset_info, &raw.goods_info) else {
        return Err(Rejection::MissingAttribute.into());
    };

    let asset = parse_blob(asset_text, "asset info")?;
    let goods = parse_blob(goods_text, "goods info")?;

    let in_family = goods
        .pointer("/tags/series/internal_name")
        .and_then(Value::as_str)
        .is_some_and(|tag| config.is_family_tag(tag));
    if !in_family {
        return Err(Rejection::NotTargetFamily.into());
    }

    let pattern_seed = match asset.pointer("/info/paintseed") {
        None | Some(Value::Null) => return Err(Rejection::MissingSeed.into()),
        Some(seed) => parse_seed(seed)?,
    };

    let weapon_internal_name = match goods.pointer("/tags/weapon/internal_name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(Rejection::MissingWeapon.into()),
    };

    Ok(ListingRecord {
        weapon_internal_name,
        pattern_seed,
    })
}

fn parse_blob(text: &str, what: &str) -> Result<Value, ExtractError> {
    serde_json::from_str(text).map_err(|e| ExtractError::Malformed(format!("{}: {}", what, e)))
}

/// Seeds arrive as numbers, occasionally as numeric strings
fn parse_seed(value: &Value) -> Result<u32, ExtractError> {
    let seed = match value {
        Value::Number(n) => match n.as_u64() {
            Some(n) => u32::try_from(n).ok(),
            // 7.0 names the same seed as 7
            None => n
                .as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(f))
                .map(|f| f as u32),
        },
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    seed.ok_or_else(|| ExtractError::Malformed(format!("paintseed {} is not a non-negative integer", value)))
}
