//! Serialization of tag trees back to the binary NBT layout.

use std::convert::TryInto;
use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::error::{Error, Result};
use crate::tag::{NbtCompound, NbtList, NbtTag};
use crate::Tag;

pub(crate) trait WriteNbt: Write {
    fn write_tag(&mut self, tag: Tag) -> Result<()> {
        self.write_u8(tag.into())?;
        Ok(())
    }

    fn write_size_prefixed_str(&mut self, key: &str) -> Result<()> {
        let key = cesu8::to_java_cesu8(key);
        let len_bytes: u16 = key
            .len()
            .try_into()
            .map_err(|_| Error::bespoke("string too long".to_owned()))?;
        self.write_u16::<BigEndian>(len_bytes)?;
        self.write_all(&key)?;
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        self.write_i32::<BigEndian>(
            len.try_into()
                .map_err(|_| Error::bespoke("len too large".to_owned()))?,
        )?;

        Ok(())
    }
}

impl<T> WriteNbt for T where T: Write {}

/// Encodes one tag tree to a byte sink, big-endian throughout.
///
/// The writer mirrors the reader exactly in reverse. The whole tree supplied
/// is always written, and the byte output for a given tree is deterministic,
/// which is what makes decode/encode round trips byte-exact.
pub struct TagWriter<W> {
    writer: W,
}

impl<W: Write> TagWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes this writer, returning the underlying byte sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Encode a whole document: root compound discriminant, root name, the
    /// compound's children, and the terminating End tag.
    pub fn write_root(&mut self, name: &str, root: &NbtCompound) -> Result<()> {
        self.writer.write_tag(Tag::Compound)?;
        self.writer.write_size_prefixed_str(name)?;
        self.write_compound(root)
    }

    fn write_compound(&mut self, compound: &NbtCompound) -> Result<()> {
        for (name, tag) in compound {
            self.writer.write_tag(tag.tag())?;
            self.writer.write_size_prefixed_str(name)?;
            self.write_payload(tag)?;
        }
        self.writer.write_tag(Tag::End)?;
        Ok(())
    }

    fn write_list(&mut self, list: &NbtList) -> Result<()> {
        self.writer.write_tag(list.element_tag())?;
        self.writer.write_len(list.len())?;
        for element in list {
            self.write_payload(element)?;
        }
        Ok(())
    }

    fn write_payload(&mut self, tag: &NbtTag) -> Result<()> {
        match tag {
            NbtTag::Byte(v) => self.writer.write_i8(*v)?,
            NbtTag::Short(v) => self.writer.write_i16::<BigEndian>(*v)?,
            NbtTag::Int(v) => self.writer.write_i32::<BigEndian>(*v)?,
            NbtTag::Long(v) => self.writer.write_i64::<BigEndian>(*v)?,
            NbtTag::Float(v) => self.writer.write_f32::<BigEndian>(*v)?,
            NbtTag::Double(v) => self.writer.write_f64::<BigEndian>(*v)?,
            NbtTag::String(v) => self.writer.write_size_prefixed_str(v)?,
            NbtTag::ByteArray(v) => {
                self.writer.write_len(v.len())?;
                for b in v {
                    self.writer.write_i8(*b)?;
                }
            }
            NbtTag::IntArray(v) => {
                self.writer.write_len(v.len())?;
                for i in v {
                    self.writer.write_i32::<BigEndian>(*i)?;
                }
            }
            NbtTag::List(list) => self.write_list(list)?,
            NbtTag::Compound(compound) => self.write_compound(compound)?,
        }
        Ok(())
    }
}
