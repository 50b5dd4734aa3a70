//! Binary tag (NBT) decoder for legacy player files.
//!
//! Player files are a single named root compound, usually gzip-compressed.
//! Decoding is all-or-nothing: either the whole tree is returned or a
//! [`DecodeError`] describes why the file was rejected.

use byteorder::{BigEndian, ReadBytesExt};
use flate2::read::{GzDecoder, ZlibDecoder};
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::{self, Cursor, Read};
use std::path::Path;
use thiserror::Error;

/// Maximum nesting of compounds and lists accepted by the decoder.
pub const MAX_DEPTH: usize = 512;

/// Errors raised while decoding a binary tag stream.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The stream ended before the tree was complete.
    #[error("unexpected end of data")]
    UnexpectedEof,

    /// A tag-type byte outside the known range.
    #[error("unknown tag type {0}")]
    UnknownTagType(u8),

    /// The root tag is not a compound.
    #[error("root tag is {0}, expected compound")]
    RootNotCompound(&'static str),

    /// A list holds an element of a different kind than it declares.
    #[error("list declares {declared} elements but holds {found}")]
    ListKindMismatch {
        /// Declared element kind.
        declared: &'static str,
        /// Kind of the offending element.
        found: &'static str,
    },

    /// A list of `End` tags with a non-zero length.
    #[error("list of End tags with length {0}")]
    EndList(usize),

    /// A negative array, list or string length.
    #[error("negative length {0}")]
    NegativeLength(i32),

    /// The same key appears twice in one compound.
    #[error("duplicate key '{0}' in compound")]
    DuplicateKey(String),

    /// Nesting deeper than [`MAX_DEPTH`].
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),

    /// A string that is neither UTF-8 nor modified UTF-8.
    #[error("invalid string: {0}")]
    InvalidString(String),

    /// The compressed stream is corrupt or truncated.
    #[error("decompression failed: {0}")]
    Decompress(io::Error),

    /// The file could not be read.
    #[error("read failed: {0}")]
    Io(io::Error),
}

impl From<io::Error> for DecodeError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEof
        } else {
            Self::Io(err)
        }
    }
}

type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Tag type identifiers as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagKind {
    /// Terminates a compound.
    End = 0,
    /// Signed 8-bit integer.
    Byte = 1,
    /// Signed 16-bit integer.
    Short = 2,
    /// Signed 32-bit integer.
    Int = 3,
    /// Signed 64-bit integer.
    Long = 4,
    /// 32-bit float.
    Float = 5,
    /// 64-bit float.
    Double = 6,
    /// Length-prefixed signed bytes.
    ByteArray = 7,
    /// Length-prefixed modified UTF-8.
    String = 8,
    /// Homogeneous list.
    List = 9,
    /// Named children terminated by `End`.
    Compound = 10,
    /// Length-prefixed 32-bit integers.
    IntArray = 11,
    /// Length-prefixed 64-bit integers.
    LongArray = 12,
}

impl TagKind {
    /// Parses a tag-type byte.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownTagType`] for bytes above 12.
    pub fn from_id(id: u8) -> DecodeResult<Self> {
        Ok(match id {
            0 => Self::End,
            1 => Self::Byte,
            2 => Self::Short,
            3 => Self::Int,
            4 => Self::Long,
            5 => Self::Float,
            6 => Self::Double,
            7 => Self::ByteArray,
            8 => Self::String,
            9 => Self::List,
            10 => Self::Compound,
            11 => Self::IntArray,
            12 => Self::LongArray,
            other => return Err(DecodeError::UnknownTagType(other)),
        })
    }

    /// Human-readable name used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::End => "End",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Int",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::ByteArray => "ByteArray",
            Self::String => "String",
            Self::List => "List",
            Self::Compound => "Compound",
            Self::IntArray => "IntArray",
            Self::LongArray => "LongArray",
        }
    }
}

/// Named children of a compound tag.
pub type Compound = HashMap<String, Tag>;

/// A decoded tag value.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    /// Wire kind of this value.
    #[must_use]
    pub fn kind(&self) -> TagKind {
        match self {
            Self::Byte(_) => TagKind::Byte,
            Self::Short(_) => TagKind::Short,
            Self::Int(_) => TagKind::Int,
            Self::Long(_) => TagKind::Long,
            Self::Float(_) => TagKind::Float,
            Self::Double(_) => TagKind::Double,
            Self::ByteArray(_) => TagKind::ByteArray,
            Self::String(_) => TagKind::String,
            Self::List(_) => TagKind::List,
            Self::Compound(_) => TagKind::Compound,
            Self::IntArray(_) => TagKind::IntArray,
            Self::LongArray(_) => TagKind::LongArray,
        }
    }

    /// Value of a `Byte` tag.
    #[must_use]
    pub fn as_byte(&self) -> Option<i8> {
        match self {
            Self::Byte(v) => Some(*v),
            _ => None,
        }
    }

    /// Value of a `Short` tag.
    #[must_use]
    pub fn as_short(&self) -> Option<i16> {
        match self {
            Self::Short(v) => Some(*v),
            _ => None,
        }
    }

    /// Value of an `Int` tag.
    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Contents of a `String` tag.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Contents of a `List` tag.
    #[must_use]
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// Children of a `Compound` tag.
    #[must_use]
    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Self::Compound(v) => Some(v),
            _ => None,
        }
    }
}

/// A list tag: every element has the declared kind.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    kind: TagKind,
    items: Vec<Tag>,
}

impl List {
    /// Builds a list, checking that every element matches `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::ListKindMismatch`] for a heterogeneous list and
    /// [`DecodeError::EndList`] for a non-empty list of `End`.
    pub fn new(kind: TagKind, items: Vec<Tag>) -> DecodeResult<Self> {
        if kind == TagKind::End && !items.is_empty() {
            return Err(DecodeError::EndList(items.len()));
        }
        if let Some(bad) = items.iter().find(|t| t.kind() != kind) {
            return Err(DecodeError::ListKindMismatch {
                declared: kind.name(),
                found: bad.kind().name(),
            });
        }
        Ok(Self { kind, items })
    }

    /// An empty list of `End`, as written for lists that were never filled.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            kind: TagKind::End,
            items: Vec::new(),
        }
    }

    /// Declared element kind.
    #[must_use]
    pub fn kind(&self) -> TagKind {
        self.kind
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the list has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.items.iter()
    }

    /// Elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Tag] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Reads and decodes a player file from disk.
///
/// Read failures are reported as [`DecodeError::Io`] so that an unreadable
/// file is skipped like a corrupt one.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn read_file(path: &Path) -> DecodeResult<Compound> {
    let bytes = std::fs::read(path).map_err(DecodeError::Io)?;
    decode(&bytes)
}

/// Decompresses (if needed) and decodes a binary tag stream.
///
/// # Errors
///
/// Returns an error if the stream is corrupt, truncated or not rooted in a
/// compound.
pub fn decode(bytes: &[u8]) -> DecodeResult<Compound> {
    let raw = decompress(bytes)?;
    TagReader::new(&raw).read_root()
}

/// Inflates gzip or zlib input; anything else is returned untouched.
///
/// # Errors
///
/// Returns [`DecodeError::Decompress`] if the compressed stream is corrupt.
pub fn decompress(bytes: &[u8]) -> DecodeResult<Cow<'_, [u8]>> {
    match bytes {
        [0x1f, 0x8b, ..] => inflate(GzDecoder::new(bytes)),
        [0x78, flags, ..] if u16::from_be_bytes([0x78, *flags]) % 31 == 0 => {
            inflate(ZlibDecoder::new(bytes))
        }
        _ => Ok(Cow::Borrowed(bytes)),
    }
}

fn inflate<R: Read>(mut reader: R) -> DecodeResult<Cow<'static, [u8]>> {
    let mut out = Vec::new();
    reader
        .read_to_end(&mut out)
        .map_err(DecodeError::Decompress)?;
    Ok(Cow::Owned(out))
}

struct TagReader<'a> {
    cursor: Cursor<&'a [u8]>,
    depth: usize,
}

impl<'a> TagReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
            depth: 0,
        }
    }

    fn read_root(&mut self) -> DecodeResult<Compound> {
        let kind = self.read_kind()?;
        if kind != TagKind::Compound {
            return Err(DecodeError::RootNotCompound(kind.name()));
        }
        let _name = self.read_string()?;
        self.read_compound()
    }

    fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len() as u64;
        len.saturating_sub(self.cursor.position()) as usize
    }

    fn read_kind(&mut self) -> DecodeResult<TagKind> {
        TagKind::from_id(self.cursor.read_u8()?)
    }

    /// Reads an i32 length and checks that `len * width` bytes remain.
    fn read_len(&mut self, width: usize) -> DecodeResult<usize> {
        let len = self.cursor.read_i32::<BigEndian>()?;
        let len = usize::try_from(len).map_err(|_| DecodeError::NegativeLength(len))?;
        if len.saturating_mul(width) > self.remaining() {
            return Err(DecodeError::UnexpectedEof);
        }
        Ok(len)
    }

    fn enter(&mut self) -> DecodeResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(DecodeError::TooDeep(MAX_DEPTH));
        }
        Ok(())
    }

    fn read_payload(&mut self, kind: TagKind) -> DecodeResult<Tag> {
        Ok(match kind {
            // End only terminates compounds; it never carries a payload.
            TagKind::End => return Err(DecodeError::UnknownTagType(0)),
            TagKind::Byte => Tag::Byte(self.cursor.read_i8()?),
            TagKind::Short => Tag::Short(self.cursor.read_i16::<BigEndian>()?),
            TagKind::Int => Tag::Int(self.cursor.read_i32::<BigEndian>()?),
            TagKind::Long => Tag::Long(self.cursor.read_i64::<BigEndian>()?),
            TagKind::Float => Tag::Float(self.cursor.read_f32::<BigEndian>()?),
            TagKind::Double => Tag::Double(self.cursor.read_f64::<BigEndian>()?),
            TagKind::ByteArray => {
                let len = self.read_len(1)?;
                let mut buf = vec![0i8; len];
                self.cursor.read_i8_into(&mut buf)?;
                Tag::ByteArray(buf)
            }
            TagKind::String => Tag::String(self.read_string()?),
            TagKind::List => Tag::List(self.read_list()?),
            TagKind::Compound => Tag::Compound(self.read_compound()?),
            TagKind::IntArray => {
                let len = self.read_len(4)?;
                let mut buf = vec![0i32; len];
                self.cursor.read_i32_into::<BigEndian>(&mut buf)?;
                Tag::IntArray(buf)
            }
            TagKind::LongArray => {
                let len = self.read_len(8)?;
                let mut buf = vec![0i64; len];
                self.cursor.read_i64_into::<BigEndian>(&mut buf)?;
                Tag::LongArray(buf)
            }
        })
    }

    fn read_compound(&mut self) -> DecodeResult<Compound> {
        self.enter()?;
        let mut map = Compound::new();
        loop {
            let kind = self.read_kind()?;
            if kind == TagKind::End {
                break;
            }
            let name = self.read_string()?;
            if map.contains_key(&name) {
                return Err(DecodeError::DuplicateKey(name));
            }
            let value = self.read_payload(kind)?;
            map.insert(name, value);
        }
        self.depth -= 1;
        Ok(map)
    }

    fn read_list(&mut self) -> DecodeResult<List> {
        self.enter()?;
        let kind = self.read_kind()?;
        let len = self.read_len(0)?;
        if kind == TagKind::End {
            if len > 0 {
                return Err(DecodeError::EndList(len));
            }
            self.depth -= 1;
            return Ok(List::empty());
        }
        // Every element takes at least one byte, so `remaining` bounds the
        // allocation for lying length prefixes.
        let mut items = Vec::with_capacity(len.min(self.remaining()));
        for _ in 0..len {
            items.push(self.read_payload(kind)?);
        }
        self.depth -= 1;
        Ok(List { kind, items })
    }

    fn read_string(&mut self) -> DecodeResult<String> {
        let len = usize::from(self.cursor.read_u16::<BigEndian>()?);
        if len > self.remaining() {
            return Err(DecodeError::UnexpectedEof);
        }
        let mut buf = vec![0u8; len];
        self.cursor.read_exact(&mut buf)?;
        decode_mutf8(&buf)
    }
}

/// Decodes Java's modified UTF-8 (two-byte NUL, CESU-8 surrogate pairs).
fn decode_mutf8(bytes: &[u8]) -> DecodeResult<String> {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return Ok(s.to_owned());
    }

    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let (unit, width) = match b {
            0x00..=0x7F => (u16::from(b), 1),
            0xC0..=0xDF => {
                let b2 = continuation(bytes, i + 1)?;
                ((u16::from(b & 0x1F) << 6) | u16::from(b2 & 0x3F), 2)
            }
            0xE0..=0xEF => {
                let b2 = continuation(bytes, i + 1)?;
                let b3 = continuation(bytes, i + 2)?;
                (
                    (u16::from(b & 0x0F) << 12) | (u16::from(b2 & 0x3F) << 6) | u16::from(b3 & 0x3F),
                    3,
                )
            }
            _ => {
                return Err(DecodeError::InvalidString(format!(
                    "byte 0x{b:02x} at offset {i}"
                )))
            }
        };
        units.push(unit);
        i += width;
    }

    String::from_utf16(&units).map_err(|e| DecodeError::InvalidString(e.to_string()))
}

fn continuation(bytes: &[u8], idx: usize) -> DecodeResult<u8> {
    match bytes.get(idx) {
        Some(&c) if c & 0xC0 == 0x80 => Ok(c),
        _ => Err(DecodeError::InvalidString(format!(
            "truncated sequence at offset {idx}"
        ))),
    }
}
