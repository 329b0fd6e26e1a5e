//! nbtree reads and writes NBT data from *Minecraft: Java Edition* as an
//! owned tree of tags, rather than deserializing into Rust structs.
//!
//! * For the tag tree itself see [`NbtTag`], [`NbtCompound`] and [`NbtList`].
//! * For loading and saving whole documents, optionally compressed, see
//!   [`NbtFile`].
//! * For the lower level streaming pieces see [`TagReader`] and [`TagWriter`].
//!
//! The reader only ever moves forward through its input, so it works on
//! sockets and pipes as well as files. Skipping unwanted data never seeks:
//! a [selector][`Selector`] can reject named tags while parsing and their
//! payloads are structurally discarded instead of materialized.
//!
//! ```toml
//! [dependencies]
//! nbtree = "0.1"
//! ```
//!
//! # Quick example
//!
//! Build a small document, save it uncompressed, and read it back with
//! compression auto-detection.
//!
//! ```
//! use nbtree::{Compression, NbtCompound, NbtFile, NbtTag};
//!
//! # fn main() -> nbtree::error::Result<()> {
//! let mut root = NbtCompound::new();
//! root.insert("name", "Bananrama")?;
//!
//! let file = NbtFile::with_root("hello world", root);
//! let mut buf = vec![];
//! let written = file.save_to(&mut buf, Compression::None)?;
//!
//! let mut reloaded = NbtFile::new();
//! let read = reloaded.load_from(buf.as_slice(), Compression::AutoDetect)?;
//!
//! assert_eq!(written, read);
//! assert_eq!(reloaded.root_name(), "hello world");
//! assert_eq!(reloaded.root().get("name"), Some(&NbtTag::String("Bananrama".into())));
//! # Ok(())
//! # }
//! ```
//!
//! # Selective parsing
//!
//! Passing a selector to [`NbtFile::load_from_with`] lets you drop subtrees
//! you don't care about without paying to allocate them. The predicate sees
//! the tag's name, its type and its chain of ancestors, all of which are
//! known before the payload is touched.
//!
//! ```no_run
//! use nbtree::{Compression, NbtFile};
//!
//! # fn main() -> nbtree::error::Result<()> {
//! # let bytes: Vec<u8> = vec![];
//! let mut file = NbtFile::new();
//! file.load_from_with(bytes.as_slice(), Compression::AutoDetect, |tag| {
//!     tag.name() != Some("sections")
//! })?;
//! assert!(!file.root().contains("sections"));
//! # Ok(())
//! # }
//! ```

pub mod error;

mod compression;
mod file;
mod read;
mod tag;
mod write;

pub use compression::Compression;
pub use file::NbtFile;
pub use read::{Selector, TagInfo, TagReader};
pub use tag::{NbtCompound, NbtList, NbtTag};
pub use write::TagWriter;

#[cfg(test)]
mod test;

use std::convert::TryFrom;
use std::fmt;

/// An NBT tag type. This does not carry the value or the name of the data.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64.
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents an array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other tags, all of a single declared type.
    List = 9,
    /// Represents a struct-like structure of named tags.
    Compound = 10,
    /// Represents an array of Int (i32).
    IntArray = 11,
}

// Crates exist to generate this code for us, but would add to our compile
// times. The tag set is fixed by the wire format, so writing it out manually
// is a one-off cost.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::End => 0,
            Tag::Byte => 1,
            Tag::Short => 2,
            Tag::Int => 3,
            Tag::Long => 4,
            Tag::Float => 5,
            Tag::Double => 6,
            Tag::ByteArray => 7,
            Tag::String => 8,
            Tag::List => 9,
            Tag::Compound => 10,
            Tag::IntArray => 11,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tag::End => "TAG_End",
            Tag::Byte => "TAG_Byte",
            Tag::Short => "TAG_Short",
            Tag::Int => "TAG_Int",
            Tag::Long => "TAG_Long",
            Tag::Float => "TAG_Float",
            Tag::Double => "TAG_Double",
            Tag::ByteArray => "TAG_Byte_Array",
            Tag::String => "TAG_String",
            Tag::List => "TAG_List",
            Tag::Compound => "TAG_Compound",
            Tag::IntArray => "TAG_Int_Array",
        })
    }
}
