//! Mapping of decoded item tags to item records.
//!
//! An item stack in a player file is a compound with `Count`, `Slot`,
//! `Damage` and `id`, plus an optional `tag` compound holding metadata.
//! [`ItemMapper`] turns it into an [`ItemRecord`] ready to be stored.

pub mod enchantments;
mod fields;
pub mod materials;
mod meta;

use serde::Serialize;
use thiserror::Error;

use crate::nbt::{Tag, TagKind};
use crate::resolver::ItemTable;
use fields::{required, Fields};

pub use meta::{map_metadata, BookMeta, Color, Enchantments, ItemMeta, MetaKind, MetaVariant};

/// Errors raised while mapping an item tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// A required field is absent.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// A field holds a different kind of tag than expected.
    #[error("field '{field}' is {found}, expected {expected}")]
    WrongKind {
        /// Field name.
        field: &'static str,
        /// Expected kind(s).
        expected: &'static str,
        /// Kind found in the file.
        found: &'static str,
    },

    /// A list field holds elements of the wrong kind.
    #[error("list '{field}' holds {found} elements, expected {expected}")]
    WrongElementKind {
        /// Field name.
        field: &'static str,
        /// Expected element kind.
        expected: &'static str,
        /// Element kind declared by the list.
        found: &'static str,
    },
}

impl MappingError {
    pub(crate) fn wrong_kind(field: &'static str, expected: &'static str, found: &Tag) -> Self {
        Self::WrongKind {
            field,
            expected,
            found: found.kind().name(),
        }
    }
}

/// A normalized item stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRecord {
    /// Stack size.
    pub amount: i32,
    /// Inventory slot.
    pub slot: i32,
    /// Damage or data value.
    pub damage: i32,
    /// Legacy material name.
    #[serde(rename = "type")]
    pub item_type: String,
    /// Metadata, when the stack has a `tag` compound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ItemMeta>,
}

/// Maps item tags using a fetched item table for string ids.
#[derive(Debug, Clone, Copy)]
pub struct ItemMapper<'a> {
    table: &'a ItemTable,
}

impl<'a> ItemMapper<'a> {
    /// Creates a mapper resolving string ids through `table`.
    #[must_use]
    pub fn new(table: &'a ItemTable) -> Self {
        Self { table }
    }

    /// Maps one item stack.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] if `Count`, `Slot`, `Damage` or `id` is
    /// missing or mistyped, or if the metadata compound is malformed.
    pub fn map_item(&self, tag: &Tag) -> Result<ItemRecord, MappingError> {
        let item = tag
            .as_compound()
            .ok_or_else(|| MappingError::wrong_kind("item", TagKind::Compound.name(), tag))?;
        let fields = Fields::new(item);

        let amount = required(fields.byte("Count"), "Count")?;
        let slot = required(fields.byte("Slot"), "Slot")?;
        let damage = required(fields.short("Damage"), "Damage")?;

        let numeric_id = match fields.get("id") {
            None => return Err(MappingError::MissingField("id")),
            Some(Tag::String(name)) => self.table.resolve(name),
            Some(Tag::Short(id)) => i32::from(*id),
            Some(other) => return Err(MappingError::wrong_kind("id", "String or Short", other)),
        };
        let item_type = materials::display_identifier(numeric_id);

        let meta = match fields.compound("tag")? {
            Some(meta_tag) => Some(map_metadata(item_type, meta_tag)?),
            None => None,
        };

        Ok(ItemRecord {
            amount: i32::from(amount),
            slot: i32::from(slot),
            damage: i32::from(damage),
            item_type: item_type.to_string(),
            meta,
        })
    }

    /// Maps every stack of a list, failing on the first bad one.
    ///
    /// # Errors
    ///
    /// Returns the first [`MappingError`] encountered.
    pub fn map_items<'t>(
        &self,
        items: impl IntoIterator<Item = &'t Tag>,
    ) -> Result<Vec<ItemRecord>, MappingError> {
        items.into_iter().map(|tag| self.map_item(tag)).collect()
    }
}

#[cfg(test)]
#[path = "mapper_tests.rs"]
mod tests;
