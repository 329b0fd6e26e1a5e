//! The owned, in-memory NBT tag tree.

use std::fmt;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::Tag;

/// A complete NBT value. It owns its data; compounds and lists own their
/// children recursively, and a tag belongs to at most one container.
///
/// Names are not stored on the tag itself: compound children are keyed by
/// name in their [`NbtCompound`], list elements are unnamed, and the root's
/// name travels with the document (see [`NbtFile`][crate::NbtFile]).
///
/// There is no `End` variant. TAG_End only exists on the wire, as the
/// terminator of a compound.
#[derive(Debug, Clone, PartialEq)]
pub enum NbtTag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(NbtList),
    Compound(NbtCompound),
    IntArray(Vec<i32>),
}

impl NbtTag {
    /// The wire discriminant for this value.
    pub fn tag(&self) -> Tag {
        match self {
            NbtTag::Byte(_) => Tag::Byte,
            NbtTag::Short(_) => Tag::Short,
            NbtTag::Int(_) => Tag::Int,
            NbtTag::Long(_) => Tag::Long,
            NbtTag::Float(_) => Tag::Float,
            NbtTag::Double(_) => Tag::Double,
            NbtTag::ByteArray(_) => Tag::ByteArray,
            NbtTag::String(_) => Tag::String,
            NbtTag::List(_) => Tag::List,
            NbtTag::Compound(_) => Tag::Compound,
            NbtTag::IntArray(_) => Tag::IntArray,
        }
    }

    pub fn byte(&self) -> Result<i8> {
        match self {
            NbtTag::Byte(v) => Ok(*v),
            other => Err(Error::type_mismatch(Tag::Byte, other.tag())),
        }
    }

    pub fn short(&self) -> Result<i16> {
        match self {
            NbtTag::Short(v) => Ok(*v),
            other => Err(Error::type_mismatch(Tag::Short, other.tag())),
        }
    }

    pub fn int(&self) -> Result<i32> {
        match self {
            NbtTag::Int(v) => Ok(*v),
            other => Err(Error::type_mismatch(Tag::Int, other.tag())),
        }
    }

    pub fn long(&self) -> Result<i64> {
        match self {
            NbtTag::Long(v) => Ok(*v),
            other => Err(Error::type_mismatch(Tag::Long, other.tag())),
        }
    }

    pub fn float(&self) -> Result<f32> {
        match self {
            NbtTag::Float(v) => Ok(*v),
            other => Err(Error::type_mismatch(Tag::Float, other.tag())),
        }
    }

    pub fn double(&self) -> Result<f64> {
        match self {
            NbtTag::Double(v) => Ok(*v),
            other => Err(Error::type_mismatch(Tag::Double, other.tag())),
        }
    }

    pub fn string(&self) -> Result<&str> {
        match self {
            NbtTag::String(v) => Ok(v),
            other => Err(Error::type_mismatch(Tag::String, other.tag())),
        }
    }

    pub fn byte_array(&self) -> Result<&[i8]> {
        match self {
            NbtTag::ByteArray(v) => Ok(v),
            other => Err(Error::type_mismatch(Tag::ByteArray, other.tag())),
        }
    }

    pub fn int_array(&self) -> Result<&[i32]> {
        match self {
            NbtTag::IntArray(v) => Ok(v),
            other => Err(Error::type_mismatch(Tag::IntArray, other.tag())),
        }
    }

    pub fn list(&self) -> Result<&NbtList> {
        match self {
            NbtTag::List(v) => Ok(v),
            other => Err(Error::type_mismatch(Tag::List, other.tag())),
        }
    }

    pub fn list_mut(&mut self) -> Result<&mut NbtList> {
        match self {
            NbtTag::List(v) => Ok(v),
            other => Err(Error::type_mismatch(Tag::List, other.tag())),
        }
    }

    pub fn compound(&self) -> Result<&NbtCompound> {
        match self {
            NbtTag::Compound(v) => Ok(v),
            other => Err(Error::type_mismatch(Tag::Compound, other.tag())),
        }
    }

    pub fn compound_mut(&mut self) -> Result<&mut NbtCompound> {
        match self {
            NbtTag::Compound(v) => Ok(v),
            other => Err(Error::type_mismatch(Tag::Compound, other.tag())),
        }
    }

    /// Render this subtree as indented, human-readable text, one tag per
    /// line, nesting by `unit`. Purely diagnostic; nothing about this
    /// rendering feeds back into the binary format.
    pub fn to_string_indented(&self, name: Option<&str>, unit: &str) -> String {
        Pretty {
            tag: self,
            name,
            unit,
        }
        .to_string()
    }
}

impl fmt::Display for NbtTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tag(f, self, None, "  ", 0)
    }
}

// ------------- From<T> impls -------------

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for NbtTag {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
    };
}
from!(i8, Byte);
from!(u8, Byte, as i8);
from!(i16, Short);
from!(u16, Short, as i16);
from!(i32, Int);
from!(u32, Int, as i32);
from!(i64, Long);
from!(u64, Long, as i64);
from!(f32, Float);
from!(f64, Double);
from!(String, String);
from!(&str, String, .to_owned());
from!(Vec<i8>, ByteArray);
from!(Vec<i32>, IntArray);
from!(NbtList, List);
from!(NbtCompound, Compound);

impl From<bool> for NbtTag {
    fn from(val: bool) -> Self {
        Self::Byte(i8::from(val))
    }
}

/// An ordered sequence of unnamed tags, all of one element type.
///
/// The element type is declared up front and fixed, with one exception: a
/// list that is currently empty adopts the type of the first element pushed
/// into it. A truly empty list has element type [`Tag::End`].
#[derive(Debug, Clone, PartialEq)]
pub struct NbtList {
    element_tag: Tag,
    tags: Vec<NbtTag>,
}

impl NbtList {
    /// An empty list with element type `TAG_End`.
    pub fn new() -> Self {
        Self::with_element_tag(Tag::End)
    }

    /// An empty list declared to hold elements of `element_tag`.
    pub fn with_element_tag(element_tag: Tag) -> Self {
        Self {
            element_tag,
            tags: Vec::new(),
        }
    }

    pub fn element_tag(&self) -> Tag {
        self.element_tag
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&NbtTag> {
        self.tags
            .get(index)
            .ok_or_else(|| Error::index_out_of_range(index, self.tags.len()))
    }

    /// Append a tag. Fails with `TypeMismatch` if the tag's type differs
    /// from the declared element type, unless the list is empty, in which
    /// case the list adopts the new element type.
    pub fn push(&mut self, tag: impl Into<NbtTag>) -> Result<()> {
        let tag = tag.into();
        if self.tags.is_empty() {
            self.element_tag = tag.tag();
        } else if tag.tag() != self.element_tag {
            return Err(Error::type_mismatch(self.element_tag, tag.tag()));
        }
        self.tags.push(tag);
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NbtTag> {
        self.tags.iter()
    }
}

impl Default for NbtList {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a NbtList {
    type Item = &'a NbtTag;
    type IntoIter = std::slice::Iter<'a, NbtTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

/// A mapping from unique names to tags, preserving insertion order.
///
/// On the wire a compound is a sequence of named tags terminated by a lone
/// TAG_End byte rather than a length prefix, so order is meaningful and is
/// kept through a decode/encode round trip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NbtCompound {
    entries: IndexMap<String, NbtTag>,
}

impl NbtCompound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&NbtTag> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut NbtTag> {
        self.entries.get_mut(name)
    }

    /// Insert a tag under `name`. Fails with `DuplicateName` if the name is
    /// already taken; use [`replace`][Self::replace] to overwrite.
    pub fn insert(&mut self, name: impl Into<String>, tag: impl Into<NbtTag>) -> Result<()> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(Error::duplicate_name(&name));
        }
        self.entries.insert(name, tag.into());
        Ok(())
    }

    /// Insert a tag under `name`, returning the tag previously stored there,
    /// if any.
    pub fn replace(&mut self, name: impl Into<String>, tag: impl Into<NbtTag>) -> Option<NbtTag> {
        self.entries.insert(name.into(), tag.into())
    }

    /// Remove and return the tag under `name`. Later entries shift down, so
    /// insertion order stays intact.
    pub fn remove(&mut self, name: &str) -> Option<NbtTag> {
        self.entries.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, NbtTag> {
        self.entries.iter()
    }

    /// Indented diagnostic rendering of this compound, optionally titled
    /// with a name (for example the document's root name).
    pub fn to_string_indented(&self, name: Option<&str>, unit: &str) -> String {
        PrettyCompound {
            compound: self,
            name,
            unit,
        }
        .to_string()
    }
}

impl<'a> IntoIterator for &'a NbtCompound {
    type Item = (&'a String, &'a NbtTag);
    type IntoIter = indexmap::map::Iter<'a, String, NbtTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for NbtCompound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_compound(f, self, None, "  ", 0)
    }
}

// ------------- diagnostic printer -------------

struct Pretty<'a> {
    tag: &'a NbtTag,
    name: Option<&'a str>,
    unit: &'a str,
}

impl fmt::Display for Pretty<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tag(f, self.tag, self.name, self.unit, 0)
    }
}

struct PrettyCompound<'a> {
    compound: &'a NbtCompound,
    name: Option<&'a str>,
    unit: &'a str,
}

impl fmt::Display for PrettyCompound<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_compound(f, self.compound, self.name, self.unit, 0)
    }
}

fn indent(f: &mut fmt::Formatter<'_>, unit: &str, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(unit)?;
    }
    Ok(())
}

fn header(f: &mut fmt::Formatter<'_>, tag: Tag, name: Option<&str>) -> fmt::Result {
    write!(f, "{}", tag)?;
    if let Some(name) = name {
        write!(f, "(\"{}\")", name)?;
    }
    f.write_str(": ")
}

fn fmt_tag(
    f: &mut fmt::Formatter<'_>,
    tag: &NbtTag,
    name: Option<&str>,
    unit: &str,
    depth: usize,
) -> fmt::Result {
    match tag {
        NbtTag::Compound(compound) => return fmt_compound(f, compound, name, unit, depth),
        NbtTag::List(list) => return fmt_list(f, list, name, unit, depth),
        _ => {}
    }

    indent(f, unit, depth)?;
    header(f, tag.tag(), name)?;
    match tag {
        NbtTag::Byte(v) => write!(f, "{}", v),
        NbtTag::Short(v) => write!(f, "{}", v),
        NbtTag::Int(v) => write!(f, "{}", v),
        NbtTag::Long(v) => write!(f, "{}", v),
        NbtTag::Float(v) => write!(f, "{}", v),
        NbtTag::Double(v) => write!(f, "{}", v),
        NbtTag::String(v) => write!(f, "\"{}\"", v),
        NbtTag::ByteArray(v) => write!(f, "[{} bytes]", v.len()),
        NbtTag::IntArray(v) => write!(f, "[{} ints]", v.len()),
        NbtTag::List(_) | NbtTag::Compound(_) => unreachable!("handled above"),
    }
}

fn fmt_list(
    f: &mut fmt::Formatter<'_>,
    list: &NbtList,
    name: Option<&str>,
    unit: &str,
    depth: usize,
) -> fmt::Result {
    indent(f, unit, depth)?;
    header(f, Tag::List, name)?;
    writeln!(f, "{} entries {{", list.len())?;
    for element in list {
        fmt_tag(f, element, None, unit, depth + 1)?;
        writeln!(f)?;
    }
    indent(f, unit, depth)?;
    f.write_str("}")
}

fn fmt_compound(
    f: &mut fmt::Formatter<'_>,
    compound: &NbtCompound,
    name: Option<&str>,
    unit: &str,
    depth: usize,
) -> fmt::Result {
    indent(f, unit, depth)?;
    header(f, Tag::Compound, name)?;
    writeln!(f, "{} entries {{", compound.len())?;
    for (child_name, child) in compound {
        fmt_tag(f, child, Some(child_name), unit, depth + 1)?;
        writeln!(f)?;
    }
    indent(f, unit, depth)?;
    f.write_str("}")
}
