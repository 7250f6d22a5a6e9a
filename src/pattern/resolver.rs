//! Weapon name resolver: host page internal names to dataset keys.

/// Closed table of every Case Hardened weapon, knife and pistol variant the
/// dataset covers. `internal name -> dataset key`.
pub const WEAPON_KEYS: &[(&str, &str)] = &[
    ("weapon_ak47", "ak47"),
    ("weapon_knife_widowmaker", "talon"),
    ("weapon_knife_m9_bayonet", "m9"),
    ("weapon_knife_butterfly", "butterfly"),
    ("weapon_knife_karambit", "karambit"),
    ("weapon_bayonet", "bayonet"),
    ("weapon_knife_flip", "flip"),
    ("weapon_knife_gut", "gut"),
    ("weapon_knife_push", "shadow_daggers"),
    ("weapon_knife_tactical", "huntsman"),
    ("weapon_knife_gypsy_jackknife", "navaja"),
    ("weapon_knife_stiletto", "stiletto"),
    ("weapon_knife_ursus", "ursus"),
    ("weapon_knife_falchion", "falchion"),
    ("weapon_knife_skeleton", "skeleton"),
    ("weapon_knife_cord", "paracord"),
    ("weapon_knife_survival_bowie", "bowie"),
    ("weapon_knife_css", "classic"),
    ("weapon_knife_outdoor", "nomad"),
    ("weapon_knife_canis", "survival"),
    ("weapon_knife_kukri", "kukri"),
    ("weapon_fiveseven", "five_seven"),
    ("weapon_mac10", "mac_10"),
];

/// Resolve a host internal name. `None` for anything outside the table.
pub fn resolve(internal_name: &str) -> Option<&'static str> {
    WEAPON_KEYS
        .iter()
        .find(|(name, _)| *name == internal_name)
        .map(|(_, key)| *key)
}
