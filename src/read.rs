//! Recursive-descent decoding of NBT byte streams.
//!
//! The reader only requires [`Read`] on its input and never seeks, so it
//! works identically on files, sockets and in-memory buffers. Skipping a
//! subtree is done by structurally walking it and discarding the bytes.

use std::convert::TryFrom;
use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::{Error, Result};
use crate::tag::{NbtCompound, NbtList, NbtTag};
use crate::Tag;

/// The identity of a tag mid-decode: what a [`Selector`] gets to look at.
///
/// A tag's header is parsed before its payload, so the name, the type and
/// the whole chain of ancestors are known before any decision to materialize
/// the value is made. The parent link is a borrow up the decode stack; it
/// never owns anything.
pub struct TagInfo<'a> {
    name: Option<&'a str>,
    tag: Tag,
    parent: Option<&'a TagInfo<'a>>,
}

impl<'a> TagInfo<'a> {
    /// The tag's name. `None` for list elements, which are unnamed.
    pub fn name(&self) -> Option<&str> {
        self.name
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The enclosing container's identity, or `None` at the root.
    pub fn parent(&self) -> Option<&TagInfo<'_>> {
        self.parent
    }
}

/// A predicate deciding whether a named tag should be materialized.
///
/// Returning `false` makes the reader discard the tag's whole subtree: the
/// payload bytes are still consumed, so the stream stays positioned
/// correctly for the siblings that follow, but no model objects are built.
/// Only named tags (compound children, the root included) are put to the
/// predicate; list elements have no name to match against, though their
/// ancestors are still visible to predicates run on tags nested below them.
pub type Selector<'a> = dyn FnMut(&TagInfo) -> bool + 'a;

/// Decodes one tag tree from a byte source.
///
/// ```
/// use nbtree::TagReader;
///
/// # fn main() -> nbtree::error::Result<()> {
/// let bytes: &[u8] = &[0x0a, 0x00, 0x00, 0x00]; // an empty, unnamed compound
/// let (name, root) = TagReader::new(bytes).read_root()?;
/// assert_eq!(name, "");
/// assert!(root.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct TagReader<'sel, R> {
    reader: R,
    selector: Option<&'sel mut Selector<'sel>>,
}

impl<'sel, R: Read> TagReader<'sel, R> {
    /// A reader that materializes everything.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            selector: None,
        }
    }

    /// A reader that consults `selector` before materializing named tags.
    pub fn with_selector(reader: R, selector: &'sel mut Selector<'sel>) -> Self {
        Self {
            reader,
            selector: Some(selector),
        }
    }

    /// Gets a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consumes this reader, returning the underlying byte source.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Decode a whole document. The root of any NBT stream is a single
    /// compound, possibly with an empty name.
    ///
    /// If a selector rejects the root itself, the root's payload is still
    /// drained from the stream and an empty compound is returned.
    pub fn read_root(&mut self) -> Result<(String, NbtCompound)> {
        let tag = self.read_tag()?;
        if tag != Tag::Compound {
            return Err(Error::malformed(format!(
                "root tag must be {}, found {}",
                Tag::Compound,
                tag
            )));
        }
        let name = self.read_string()?;

        let root = {
            let info = TagInfo {
                name: Some(&name),
                tag: Tag::Compound,
                parent: None,
            };
            if self.accepts(&info) {
                Some(self.read_compound(&info)?)
            } else {
                None
            }
        };
        let root = match root {
            Some(root) => root,
            None => {
                self.skip_payload(Tag::Compound)?;
                NbtCompound::new()
            }
        };

        Ok((name, root))
    }

    /// Decode only the root compound's header, leaving its payload unread.
    /// Much cheaper than a full decode when all you want is the name.
    pub fn read_root_name(&mut self) -> Result<String> {
        let tag = self.read_tag()?;
        if tag != Tag::Compound {
            return Err(Error::malformed(format!(
                "root tag must be {}, found {}",
                Tag::Compound,
                tag
            )));
        }
        self.read_string()
    }

    fn accepts(&mut self, info: &TagInfo) -> bool {
        match &mut self.selector {
            Some(selector) => selector(info),
            None => true,
        }
    }

    fn read_tag(&mut self) -> Result<Tag> {
        let tag = self.reader.read_u8()?;
        Tag::try_from(tag).map_err(|_| Error::invalid_tag(tag))
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self.reader.read_u16::<BigEndian>()? as usize;
        let mut buf = vec![0; len];
        self.reader.read_exact(&mut buf)?;

        Ok(cesu8::from_java_cesu8(&buf)
            .map_err(|_| Error::nonunicode(&buf))?
            .into_owned())
    }

    fn read_array_len(&mut self) -> Result<usize> {
        let len = self.reader.read_i32::<BigEndian>()?;
        usize::try_from(len).map_err(|_| Error::malformed(format!("negative array length {}", len)))
    }

    fn read_compound(&mut self, parent: &TagInfo) -> Result<NbtCompound> {
        let mut compound = NbtCompound::new();
        loop {
            let tag = self.read_tag()?;
            if tag == Tag::End {
                break;
            }
            let name = self.read_string()?;

            let value = {
                let info = TagInfo {
                    name: Some(&name),
                    tag,
                    parent: Some(parent),
                };
                if self.accepts(&info) {
                    Some(self.read_payload(tag, &info)?)
                } else {
                    None
                }
            };
            match value {
                Some(value) => compound.insert(name, value)?,
                None => self.skip_payload(tag)?,
            }
        }
        Ok(compound)
    }

    fn read_list(&mut self, info: &TagInfo) -> Result<NbtList> {
        let element_tag = self.read_tag()?;
        let len = self.reader.read_i32::<BigEndian>()?;
        if len < 0 {
            return Err(Error::malformed(format!("negative list length {}", len)));
        }
        if element_tag == Tag::End && len > 0 {
            return Err(Error::malformed("non-empty list of TAG_End"));
        }

        let mut list = NbtList::with_element_tag(element_tag);
        for _ in 0..len {
            let element_info = TagInfo {
                name: None,
                tag: element_tag,
                parent: Some(info),
            };
            let element = self.read_payload(element_tag, &element_info)?;
            list.push(element)?;
        }
        Ok(list)
    }

    fn read_payload(&mut self, tag: Tag, info: &TagInfo) -> Result<NbtTag> {
        Ok(match tag {
            Tag::Byte => NbtTag::Byte(self.reader.read_i8()?),
            Tag::Short => NbtTag::Short(self.reader.read_i16::<BigEndian>()?),
            Tag::Int => NbtTag::Int(self.reader.read_i32::<BigEndian>()?),
            Tag::Long => NbtTag::Long(self.reader.read_i64::<BigEndian>()?),
            Tag::Float => NbtTag::Float(self.reader.read_f32::<BigEndian>()?),
            Tag::Double => NbtTag::Double(self.reader.read_f64::<BigEndian>()?),
            Tag::String => NbtTag::String(self.read_string()?),
            Tag::ByteArray => {
                let len = self.read_array_len()?;
                let mut buf = vec![0u8; len];
                self.reader.read_exact(&mut buf)?;
                NbtTag::ByteArray(buf.into_iter().map(|b| b as i8).collect())
            }
            Tag::IntArray => {
                let len = self.read_array_len()?;
                let mut buf = vec![0i32; len];
                self.reader.read_i32_into::<BigEndian>(&mut buf)?;
                NbtTag::IntArray(buf)
            }
            Tag::List => NbtTag::List(self.read_list(info)?),
            Tag::Compound => NbtTag::Compound(self.read_compound(info)?),
            Tag::End => return Err(Error::malformed("TAG_End is not a value")),
        })
    }

    /// Consume exactly the bytes a payload of `tag` occupies, building
    /// nothing. Always read-and-discard, never a seek, so the skip path
    /// works on forward-only sources and uses O(depth) memory.
    fn skip_payload(&mut self, tag: Tag) -> Result<()> {
        match tag {
            Tag::Byte => self.skip_bytes(1)?,
            Tag::Short => self.skip_bytes(2)?,
            Tag::Int | Tag::Float => self.skip_bytes(4)?,
            Tag::Long | Tag::Double => self.skip_bytes(8)?,
            Tag::String => self.skip_string()?,
            Tag::ByteArray => {
                let len = self.read_array_len()?;
                self.skip_bytes(len as u64)?;
            }
            Tag::IntArray => {
                let len = self.read_array_len()?;
                self.skip_bytes(len as u64 * 4)?;
            }
            Tag::Compound => {
                // Enter the compound and discard children until its End tag.
                // A rejected compound is discarded wholesale; the selector is
                // not consulted again for names deeper inside it.
                loop {
                    let tag = self.read_tag()?;
                    if tag == Tag::End {
                        break;
                    }
                    self.skip_string()?;
                    self.skip_payload(tag)?;
                }
            }
            Tag::List => {
                let element_tag = self.read_tag()?;
                let len = self.reader.read_i32::<BigEndian>()?;
                if len < 0 {
                    return Err(Error::malformed(format!("negative list length {}", len)));
                }
                if element_tag == Tag::End && len > 0 {
                    return Err(Error::malformed("non-empty list of TAG_End"));
                }
                // Fixed-width element runs can be dropped in one go; anything
                // with internal structure is walked element by element.
                match element_tag {
                    Tag::Byte => self.skip_bytes(len as u64)?,
                    Tag::Short => self.skip_bytes(len as u64 * 2)?,
                    Tag::Int | Tag::Float => self.skip_bytes(len as u64 * 4)?,
                    Tag::Long | Tag::Double => self.skip_bytes(len as u64 * 8)?,
                    _ => {
                        for _ in 0..len {
                            self.skip_payload(element_tag)?;
                        }
                    }
                }
            }
            // The compound and list branches above consume every End tag
            // that terminates a structure, so a skip is never asked for one.
            Tag::End => unreachable!("TAG_End has no payload"),
        }

        Ok(())
    }

    fn skip_string(&mut self) -> Result<()> {
        let len = self.reader.read_u16::<BigEndian>()? as u64;
        self.skip_bytes(len)
    }

    fn skip_bytes(&mut self, n: u64) -> Result<()> {
        let mut limited = (&mut self.reader).take(n);
        let copied = io::copy(&mut limited, &mut io::sink())?;
        if copied < n {
            return Err(Error::unexpected_eof());
        }
        Ok(())
    }
}
