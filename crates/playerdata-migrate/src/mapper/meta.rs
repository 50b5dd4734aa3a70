//! Item metadata records.
//!
//! Metadata documents are read back by the server through its configuration
//! serialization, which is why they carry the `"=="` type markers.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use super::enchantments::UNKNOWN_ENCHANTMENT_KEY;
use super::fields::Fields;
use super::MappingError;
use crate::nbt::{Compound, Tag};

const ITEM_META_TYPE: &str = "ItemMeta";

/// Metadata variant selected from an item's display identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKind {
    /// Written books and books being edited.
    Book,
    /// Player heads.
    Skull,
    /// Dyeable leather armor.
    LeatherArmor,
    /// Enchanted books.
    Enchanted,
    /// Everything else.
    Unspecific,
}

impl MetaKind {
    /// Picks the variant for a display identifier (exact, case-sensitive).
    #[must_use]
    pub fn for_identifier(identifier: &str) -> Self {
        match identifier {
            "WRITTEN_BOOK" | "BOOK_AND_QUILL" => Self::Book,
            "SKULL_ITEM" => Self::Skull,
            "LEATHER_HELMET" | "LEATHER_CHESTPLATE" | "LEATHER_LEGGINGS" | "LEATHER_BOOTS" => {
                Self::LeatherArmor
            }
            "ENCHANTED_BOOK" => Self::Enchanted,
            _ => Self::Unspecific,
        }
    }
}

/// Enchantment name to level, in the order the entries were read.
///
/// Ids missing from the enchantment table are kept under a `None` name,
/// serialized as `"null"`; inserting an existing name replaces its level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enchantments {
    entries: Vec<(Option<&'static str>, i32)>,
}

impl Enchantments {
    /// Sets the level for `name`, keeping the position of an existing entry.
    pub fn insert(&mut self, name: Option<&'static str>, level: i32) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = level,
            None => self.entries.push((name, level)),
        }
    }

    /// Level recorded for `name`.
    #[must_use]
    pub fn get(&self, name: Option<&str>) -> Option<i32> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, level)| *level)
    }

    /// Number of distinct enchantments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no enchantment was read.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Option<&'static str>, i32)> + '_ {
        self.entries.iter().copied()
    }
}

impl Serialize for Enchantments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, level) in &self.entries {
            map.serialize_entry(name.unwrap_or(UNKNOWN_ENCHANTMENT_KEY), level)?;
        }
        map.end()
    }
}

/// RGB color of dyed leather armor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    /// Unpacks a `0xRRGGBB` integer; bits above 23 are ignored.
    #[must_use]
    pub fn from_packed(rgb: i32) -> Self {
        Self {
            red: ((rgb >> 16) & 0xFF) as u8,
            green: ((rgb >> 8) & 0xFF) as u8,
            blue: (rgb & 0xFF) as u8,
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Color", 4)?;
        s.serialize_field("==", "Color")?;
        s.serialize_field("RED", &i32::from(self.red))?;
        s.serialize_field("GREEN", &i32::from(self.green))?;
        s.serialize_field("BLUE", &i32::from(self.blue))?;
        s.end()
    }
}

/// Fields of written books and books being edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub pages: Vec<String>,
}

/// Variant-specific metadata, tagged by `meta-type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "meta-type")]
#[allow(missing_docs)]
pub enum MetaVariant {
    #[serde(rename = "BOOK")]
    Book(BookMeta),
    #[serde(rename = "SKULL")]
    Skull {
        #[serde(rename = "skull-owner", skip_serializing_if = "Option::is_none")]
        owner: Option<String>,
    },
    #[serde(rename = "LEATHER_ARMOR")]
    LeatherArmor {
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
    },
    #[serde(rename = "ENCHANTED")]
    Enchanted {
        #[serde(rename = "stored-enchants", skip_serializing_if = "Option::is_none")]
        stored_enchants: Option<Enchantments>,
    },
    #[serde(rename = "UNSPECIFIC")]
    Unspecific,
}

impl MetaVariant {
    /// The `meta-type` discriminator.
    #[must_use]
    pub fn meta_type(&self) -> &'static str {
        match self {
            Self::Book(_) => "BOOK",
            Self::Skull { .. } => "SKULL",
            Self::LeatherArmor { .. } => "LEATHER_ARMOR",
            Self::Enchanted { .. } => "ENCHANTED",
            Self::Unspecific => "UNSPECIFIC",
        }
    }
}

/// Metadata attached to an item stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemMeta {
    #[serde(rename = "==")]
    serialized_type: &'static str,
    /// Variant-specific fields.
    #[serde(flatten)]
    pub variant: MetaVariant,
    /// Custom name.
    #[serde(rename = "display-name", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Tooltip lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lore: Option<Vec<String>>,
    /// Applied enchantments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enchants: Option<Enchantments>,
    /// Anvil repair cost.
    #[serde(rename = "repair-cost", skip_serializing_if = "Option::is_none")]
    pub repair_cost: Option<i32>,
    /// Tooltip hide-flags bitmask.
    #[serde(rename = "item-flags", skip_serializing_if = "Option::is_none")]
    pub item_flags: Option<i32>,
}

impl ItemMeta {
    /// Metadata with the given variant and no common fields.
    #[must_use]
    pub fn new(variant: MetaVariant) -> Self {
        Self {
            serialized_type: ITEM_META_TYPE,
            variant,
            display_name: None,
            lore: None,
            enchants: None,
            repair_cost: None,
            item_flags: None,
        }
    }
}

/// Maps an item's `tag` compound to metadata.
///
/// The variant is chosen from `identifier`; common fields are extracted for
/// every variant.
///
/// # Errors
///
/// Returns [`MappingError`] when a field is present with the wrong tag kind
/// or an enchantment entry lacks `id` or `lvl`.
pub fn map_metadata(identifier: &str, tag: &Compound) -> Result<ItemMeta, MappingError> {
    let fields = Fields::new(tag);
    let display = fields.compound("display")?.map(Fields::new);

    let variant = match MetaKind::for_identifier(identifier) {
        MetaKind::Book => MetaVariant::Book(BookMeta {
            resolved: fields.byte("resolved")?.map(|b| b != 0),
            generation: fields.int("generation")?,
            author: fields.string("author")?,
            title: fields.string("title")?,
            pages: fields.strings("pages")?.unwrap_or_default(),
        }),
        MetaKind::Skull => MetaVariant::Skull {
            owner: skull_owner(&fields)?,
        },
        MetaKind::LeatherArmor => MetaVariant::LeatherArmor {
            color: match &display {
                Some(display) => display.int("color")?.map(Color::from_packed),
                None => None,
            },
        },
        MetaKind::Enchanted => MetaVariant::Enchanted {
            stored_enchants: fields.enchantments("StoredEnchantments")?,
        },
        MetaKind::Unspecific => MetaVariant::Unspecific,
    };

    let mut meta = ItemMeta::new(variant);
    if let Some(display) = &display {
        meta.display_name = display.string("Name")?;
        meta.lore = display.strings("Lore")?;
    }
    meta.enchants = fields.enchantments("ench")?;
    meta.repair_cost = fields.int("RepairCost")?;
    meta.item_flags = fields.int("HideFlags")?;
    Ok(meta)
}

/// `SkullOwner` is either the owner's name or a profile compound.
fn skull_owner(fields: &Fields<'_>) -> Result<Option<String>, MappingError> {
    match fields.get("SkullOwner") {
        None => Ok(None),
        Some(Tag::String(name)) => Ok(Some(name.clone())),
        Some(Tag::Compound(profile)) => Fields::new(profile).string("Name"),
        Some(other) => Err(MappingError::wrong_kind(
            "SkullOwner",
            "String or Compound",
            other,
        )),
    }
}
