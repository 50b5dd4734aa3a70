//! Typed access to compound fields.

use super::enchantments::enchantment_name;
use super::{Enchantments, MappingError};
use crate::nbt::{Compound, Tag, TagKind};

type MapResult<T> = std::result::Result<T, MappingError>;

/// Read-only view over a compound that reports absent and mistyped fields.
///
/// Optional accessors return `Ok(None)` for an absent key and an error for a
/// key that holds the wrong kind of tag.
pub(crate) struct Fields<'a> {
    map: &'a Compound,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(map: &'a Compound) -> Self {
        Self { map }
    }

    pub(crate) fn get(&self, key: &str) -> Option<&'a Tag> {
        self.map.get(key)
    }

    fn typed<T>(
        &self,
        key: &'static str,
        expected: TagKind,
        pick: impl FnOnce(&'a Tag) -> Option<T>,
    ) -> MapResult<Option<T>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(tag) => pick(tag)
                .map(Some)
                .ok_or_else(|| MappingError::wrong_kind(key, expected.name(), tag)),
        }
    }

    pub(crate) fn byte(&self, key: &'static str) -> MapResult<Option<i8>> {
        self.typed(key, TagKind::Byte, Tag::as_byte)
    }

    pub(crate) fn short(&self, key: &'static str) -> MapResult<Option<i16>> {
        self.typed(key, TagKind::Short, Tag::as_short)
    }

    pub(crate) fn int(&self, key: &'static str) -> MapResult<Option<i32>> {
        self.typed(key, TagKind::Int, Tag::as_int)
    }

    pub(crate) fn string(&self, key: &'static str) -> MapResult<Option<String>> {
        self.typed(key, TagKind::String, |t| t.as_str().map(str::to_owned))
    }

    pub(crate) fn compound(&self, key: &'static str) -> MapResult<Option<&'a Compound>> {
        self.typed(key, TagKind::Compound, Tag::as_compound)
    }

    /// A list whose elements all have `element` kind.
    ///
    /// An empty list is accepted whatever kind it declares, since the game
    /// writes never-filled lists as lists of `End`.
    fn list_of(&self, key: &'static str, element: TagKind) -> MapResult<Option<&'a [Tag]>> {
        let Some(list) = self.typed(key, TagKind::List, Tag::as_list)? else {
            return Ok(None);
        };
        if !list.is_empty() && list.kind() != element {
            return Err(MappingError::WrongElementKind {
                field: key,
                expected: element.name(),
                found: list.kind().name(),
            });
        }
        Ok(Some(list.as_slice()))
    }

    pub(crate) fn strings(&self, key: &'static str) -> MapResult<Option<Vec<String>>> {
        Ok(self.list_of(key, TagKind::String)?.map(|items| {
            items
                .iter()
                .filter_map(Tag::as_str)
                .map(str::to_owned)
                .collect()
        }))
    }

    /// Decodes a list of `{id: short, lvl: short}` compounds.
    pub(crate) fn enchantments(&self, key: &'static str) -> MapResult<Option<Enchantments>> {
        let Some(entries) = self.list_of(key, TagKind::Compound)? else {
            return Ok(None);
        };
        let mut enchants = Enchantments::default();
        for entry in entries.iter().filter_map(Tag::as_compound) {
            let entry = Fields::new(entry);
            let id = required(entry.short("id"), "id")?;
            let level = required(entry.short("lvl"), "lvl")?;
            enchants.insert(enchantment_name(i32::from(id)), i32::from(level));
        }
        Ok(Some(enchants))
    }
}

/// Turns an absent optional field into [`MappingError::MissingField`].
pub(crate) fn required<T>(value: MapResult<Option<T>>, key: &'static str) -> MapResult<T> {
    value?.ok_or(MappingError::MissingField(key))
}
