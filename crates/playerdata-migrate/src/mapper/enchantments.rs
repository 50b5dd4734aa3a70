//! Legacy numeric enchantment ids.
//!
//! The server API only registers enchantments once the game is running, so
//! the names are pinned here.

/// Key used for enchantment ids missing from [`ENCHANTMENTS`].
pub const UNKNOWN_ENCHANTMENT_KEY: &str = "null";

/// `(id, name)`, sorted by id.
static ENCHANTMENTS: &[(i32, &str)] = &[
    (0, "PROTECTION_ENVIRONMENTAL"),
    (1, "PROTECTION_FIRE"),
    (2, "PROTECTION_FALL"),
    (3, "PROTECTION_EXPLOSIONS"),
    (4, "PROTECTION_PROJECTILE"),
    (5, "OXYGEN"),
    (6, "WATER_WORKER"),
    (7, "THORNS"),
    (8, "DEPTH_STRIDER"),
    (16, "DAMAGE_ALL"),
    (17, "DAMAGE_UNDEAD"),
    (18, "DAMAGE_ARTHROPODS"),
    (19, "KNOCKBACK"),
    (20, "FIRE_ASPECT"),
    (21, "LOOT_BONUS_MOBS"),
    (32, "DIG_SPEED"),
    (33, "SILK_TOUCH"),
    (34, "DURABILITY"),
    (35, "LOOT_BONUS_BLOCKS"),
    (48, "ARROW_DAMAGE"),
    (49, "ARROW_KNOCKBACK"),
    (50, "ARROW_FIRE"),
    (51, "ARROW_INFINITE"),
    (61, "LUCK"),
    (62, "LURE"),
];

/// Looks up the canonical name of a legacy enchantment id.
#[must_use]
pub fn enchantment_name(id: i32) -> Option<&'static str> {
    ENCHANTMENTS
        .binary_search_by_key(&id, |&(k, _)| k)
        .ok()
        .map(|i| ENCHANTMENTS[i].1)
}
