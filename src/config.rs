//! Configuration types and defaults for the annotator
//!
//! Every selector and attribute name the pipeline touches lives here so the
//! content script can be pointed at a changed page layout without a rebuild.

use serde::{Deserialize, Serialize};

/// Series tag spellings that identify a Case Hardened listing.
///
/// Both spellings have been observed on the host page and are equivalent.
pub const CASE_HARDENED_TAGS: [&str; 2] = ["weapon_case_hardened", "case_hardened"];

// =============================================================================
// AnnotatorConfig
// =============================================================================

/// Annotator configuration.
///
/// Deserialises from a partial JS object: any field left out keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnotatorConfig {
    /// Structural signature of a listing row.
    /// Default: `tr.selling[data-asset-info][data-goods-info]`
    pub listing_selector: String,
    /// Anchor region inside a row that receives the badge. Default: `.sticker-premium`
    pub anchor_selector: String,
    /// Container observed for page mutations. Default: `.list_tb_csgo`
    pub container_selector: String,
    /// Marker attribute set on every processed row. Default: `data-ch-processed`
    pub marker_attribute: String,
    /// Rows carrying the marker, whatever their data attributes now hold.
    /// Default: `tr.selling[data-ch-processed]`
    pub marked_selector: String,
    /// JSON-encoded asset info attribute. Default: `data-asset-info`
    pub asset_info_attribute: String,
    /// JSON-encoded goods info attribute. Default: `data-goods-info`
    pub goods_info_attribute: String,
    /// Class list applied to the badge element. Default: `stag ch-blue-gem`
    pub badge_class: String,
    /// Selector matching every badge element this crate may have attached.
    /// Default: `.ch-blue-gem, .ch-tier`
    pub badge_selector: String,
    /// Extension-relative path of the pattern dataset. Default: `blue_gem_data.json`
    pub dataset_path: String,
    /// Storage key of the metric preference. Default: `akMetric`
    pub preference_key: String,
    /// Accepted series tags for the target skin family.
    pub family_tags: Vec<String>,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            listing_selector: "tr.selling[data-asset-info][data-goods-info]".to_string(),
            anchor_selector: ".sticker-premium".to_string(),
            container_selector: ".list_tb_csgo".to_string(),
            marker_attribute: "data-ch-processed".to_string(),
            marked_selector: "tr.selling[data-ch-processed]".to_string(),
            asset_info_attribute: "data-asset-info".to_string(),
            goods_info_attribute: "data-goods-info".to_string(),
            badge_class: "stag ch-blue-gem".to_string(),
            badge_selector: ".ch-blue-gem, .ch-tier".to_string(),
            dataset_path: "blue_gem_data.json".to_string(),
            preference_key: "akMetric".to_string(),
            family_tags: CASE_HARDENED_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl AnnotatorConfig {
    /// True if `tag` is one of the accepted family spellings
    pub fn is_family_tag(&self, tag: &str) -> bool {
        self.family_tags.iter().any(|t| t == tag)
    }
}
