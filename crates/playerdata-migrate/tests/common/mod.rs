//! Shared fixtures: a binary tag encoder, item builders and a scripted
//! prompter.

#![allow(dead_code)]

use byteorder::{BigEndian, WriteBytesExt};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::VecDeque;
use std::io::Write;
use std::path::Path;

use playerdata_migrate::nbt::{Compound, List, Tag, TagKind};
use playerdata_migrate::resolver::RemoteItem;
use playerdata_migrate::{ItemTable, Prompter, Result};

/// Encodes `root` as an uncompressed named root compound.
pub fn encode_root(root: &Compound) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.write_u8(TagKind::Compound as u8).unwrap();
    write_string(&mut buf, "");
    write_compound(&mut buf, root);
    buf
}

/// Encodes and gzips `root`, as the server writes player files.
pub fn encode_gzip(root: &Compound) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&encode_root(root)).unwrap();
    encoder.finish().unwrap()
}

/// Writes a gzipped player file for `uuid` into `dir`.
pub fn write_player_file(dir: &Path, uuid: &str, root: &Compound) {
    std::fs::write(dir.join(format!("{uuid}.dat")), encode_gzip(root)).unwrap();
}

fn write_string(buf: &mut Vec<u8>, value: &str) {
    buf.write_u16::<BigEndian>(value.len() as u16).unwrap();
    buf.extend_from_slice(value.as_bytes());
}

fn write_compound(buf: &mut Vec<u8>, compound: &Compound) {
    for (name, tag) in compound {
        buf.write_u8(tag.kind() as u8).unwrap();
        write_string(buf, name);
        write_payload(buf, tag);
    }
    buf.write_u8(TagKind::End as u8).unwrap();
}

fn write_payload(buf: &mut Vec<u8>, tag: &Tag) {
    match tag {
        Tag::Byte(v) => buf.write_i8(*v).unwrap(),
        Tag::Short(v) => buf.write_i16::<BigEndian>(*v).unwrap(),
        Tag::Int(v) => buf.write_i32::<BigEndian>(*v).unwrap(),
        Tag::Long(v) => buf.write_i64::<BigEndian>(*v).unwrap(),
        Tag::Float(v) => buf.write_f32::<BigEndian>(*v).unwrap(),
        Tag::Double(v) => buf.write_f64::<BigEndian>(*v).unwrap(),
        Tag::ByteArray(values) => {
            buf.write_i32::<BigEndian>(values.len() as i32).unwrap();
            for v in values {
                buf.write_i8(*v).unwrap();
            }
        }
        Tag::String(v) => write_string(buf, v),
        Tag::List(list) => {
            buf.write_u8(list.kind() as u8).unwrap();
            buf.write_i32::<BigEndian>(list.len() as i32).unwrap();
            for item in list {
                write_payload(buf, item);
            }
        }
        Tag::Compound(compound) => write_compound(buf, compound),
        Tag::IntArray(values) => {
            buf.write_i32::<BigEndian>(values.len() as i32).unwrap();
            for v in values {
                buf.write_i32::<BigEndian>(*v).unwrap();
            }
        }
        Tag::LongArray(values) => {
            buf.write_i32::<BigEndian>(values.len() as i32).unwrap();
            for v in values {
                buf.write_i64::<BigEndian>(*v).unwrap();
            }
        }
    }
}

/// Builds a compound from `(name, tag)` pairs.
pub fn compound<const N: usize>(entries: [(&str, Tag); N]) -> Compound {
    entries
        .into_iter()
        .map(|(name, tag)| (name.to_string(), tag))
        .collect()
}

/// An item stack with a numeric id.
pub fn legacy_item(id: i16, count: i8, slot: i8, damage: i16) -> Tag {
    Tag::Compound(compound([
        ("id", Tag::Short(id)),
        ("Count", Tag::Byte(count)),
        ("Slot", Tag::Byte(slot)),
        ("Damage", Tag::Short(damage)),
    ]))
}

/// An item stack with a namespaced string id.
pub fn named_item(id: &str, count: i8, slot: i8) -> Tag {
    Tag::Compound(compound([
        ("id", Tag::String(id.to_string())),
        ("Count", Tag::Byte(count)),
        ("Slot", Tag::Byte(slot)),
        ("Damage", Tag::Short(0)),
    ]))
}

/// A player root holding `items` in its ender chest.
pub fn player_root(items: Vec<Tag>) -> Compound {
    let list = if items.is_empty() {
        List::empty()
    } else {
        List::new(TagKind::Compound, items).unwrap()
    };
    compound([
        ("EnderItems", Tag::List(list)),
        ("Health", Tag::Float(20.0)),
    ])
}

/// A small item table covering the names used in tests.
pub fn item_table() -> ItemTable {
    ItemTable::from_items([
        remote_item(1, "stone"),
        remote_item(264, "diamond"),
        remote_item(387, "written_book"),
        remote_item(403, "enchanted_book"),
    ])
}

fn remote_item(item_type: i32, text_type: &str) -> RemoteItem {
    RemoteItem {
        item_type,
        meta: 0,
        name: text_type.to_string(),
        text_type: text_type.to_string(),
    }
}

/// Answers prompts from a script; confirms every summary.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub shown: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<const N: usize>(answers: [&str; N]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            shown: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, _prompt: &str, _default: &str) -> Result<String> {
        Ok(self.answers.pop_front().unwrap_or_default())
    }

    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }

    fn show(&mut self, text: &str) {
        self.shown.push(text.to_string());
    }
}
