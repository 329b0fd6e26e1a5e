use crate::error::{ErrorKind, Result};
use crate::{NbtCompound, NbtList, NbtTag, Tag};

#[test]
fn accessors_return_payloads() -> Result<()> {
    assert_eq!(NbtTag::Byte(-3).byte()?, -3);
    assert_eq!(NbtTag::Short(300).short()?, 300);
    assert_eq!(NbtTag::Int(70_000).int()?, 70_000);
    assert_eq!(NbtTag::Long(1 << 40).long()?, 1 << 40);
    assert_eq!(NbtTag::Float(0.5).float()?, 0.5);
    assert_eq!(NbtTag::Double(0.25).double()?, 0.25);
    assert_eq!(NbtTag::String("hi".into()).string()?, "hi");
    assert_eq!(NbtTag::ByteArray(vec![1, 2]).byte_array()?, &[1, 2]);
    assert_eq!(NbtTag::IntArray(vec![3, 4]).int_array()?, &[3, 4]);
    Ok(())
}

#[test]
fn wrong_accessor_is_a_type_mismatch() {
    let tag = NbtTag::Int(5);
    assert_eq!(tag.byte().unwrap_err().kind(), ErrorKind::TypeMismatch);
    assert_eq!(tag.string().unwrap_err().kind(), ErrorKind::TypeMismatch);
    assert_eq!(tag.list().unwrap_err().kind(), ErrorKind::TypeMismatch);
    assert_eq!(tag.compound().unwrap_err().kind(), ErrorKind::TypeMismatch);
    assert_eq!(tag.int().unwrap(), 5);
}

#[test]
fn tag_discriminants() {
    assert_eq!(NbtTag::Byte(0).tag(), Tag::Byte);
    assert_eq!(NbtTag::List(NbtList::new()).tag(), Tag::List);
    assert_eq!(NbtTag::Compound(NbtCompound::new()).tag(), Tag::Compound);
    assert_eq!(NbtTag::IntArray(vec![]).tag(), Tag::IntArray);
}

#[test]
fn conversions() {
    assert_eq!(NbtTag::from(true), NbtTag::Byte(1));
    assert_eq!(NbtTag::from(7u8), NbtTag::Byte(7));
    assert_eq!(NbtTag::from(7i64), NbtTag::Long(7));
    assert_eq!(NbtTag::from("abc"), NbtTag::String("abc".into()));
    assert_eq!(NbtTag::from(vec![1i32, 2]), NbtTag::IntArray(vec![1, 2]));
}

#[test]
fn compound_rejects_duplicate_names() {
    let mut compound = NbtCompound::new();
    compound.insert("key", 1i32).unwrap();

    let err = compound.insert("key", 2i32).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateName);

    // The original entry is untouched.
    assert_eq!(compound.get("key").unwrap().int().unwrap(), 1);
}

#[test]
fn compound_replace_is_explicit() {
    let mut compound = NbtCompound::new();
    compound.insert("key", 1i32).unwrap();

    let old = compound.replace("key", 2i32);
    assert_eq!(old, Some(NbtTag::Int(1)));
    assert_eq!(compound.get("key").unwrap().int().unwrap(), 2);

    assert_eq!(compound.replace("fresh", 3i32), None);
}

#[test]
fn compound_remove_and_contains() {
    let mut compound = NbtCompound::new();
    compound.insert("a", 1i8).unwrap();
    compound.insert("b", 2i8).unwrap();

    assert!(compound.contains("a"));
    assert_eq!(compound.remove("a"), Some(NbtTag::Byte(1)));
    assert!(!compound.contains("a"));
    assert_eq!(compound.remove("a"), None);
    assert_eq!(compound.len(), 1);
}

#[test]
fn compound_preserves_insertion_order() {
    let mut compound = NbtCompound::new();
    for name in ["zebra", "apple", "mango", "banana"] {
        compound.insert(name, 0i8).unwrap();
    }
    compound.remove("apple");
    compound.insert("pear", 0i8).unwrap();

    let names: Vec<&str> = compound.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["zebra", "mango", "banana", "pear"]);
}

#[test]
fn empty_list_adopts_first_element_type() {
    let mut list = NbtList::new();
    assert_eq!(list.element_tag(), Tag::End);

    list.push(5i16).unwrap();
    assert_eq!(list.element_tag(), Tag::Short);
}

#[test]
fn declared_but_empty_list_still_adopts() {
    let mut list = NbtList::with_element_tag(Tag::Byte);
    list.push(5i16).unwrap();
    assert_eq!(list.element_tag(), Tag::Short);
}

#[test]
fn nonempty_list_rejects_mismatched_elements() {
    let mut list = NbtList::new();
    list.push(1i32).unwrap();

    let err = list.push(2i64).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(list.len(), 1);
}

#[test]
fn list_index_out_of_range() {
    let mut list = NbtList::new();
    list.push(1i32).unwrap();

    assert_eq!(list.get(0).unwrap().int().unwrap(), 1);
    let err = list.get(1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
}

#[test]
fn tag_type_display() {
    assert_eq!(Tag::ByteArray.to_string(), "TAG_Byte_Array");
    assert_eq!(Tag::Compound.to_string(), "TAG_Compound");
    assert_eq!(Tag::End.to_string(), "TAG_End");
}

#[test]
fn pretty_print_scalar() {
    assert_eq!(NbtTag::Byte(5).to_string(), "TAG_Byte: 5");
    assert_eq!(
        NbtTag::String("hi".into()).to_string_indented(Some("greeting"), "  "),
        "TAG_String(\"greeting\"): \"hi\""
    );
}

#[test]
fn pretty_print_nested() {
    let mut inner = NbtCompound::new();
    inner.insert("value", 7i32).unwrap();

    let mut list = NbtList::new();
    list.push(11i64).unwrap();
    list.push(12i64).unwrap();

    let mut root = NbtCompound::new();
    root.insert("inner", inner).unwrap();
    root.insert("longs", list).unwrap();

    let text = root.to_string_indented(Some("root"), "  ");
    let expected = "\
TAG_Compound(\"root\"): 2 entries {
  TAG_Compound(\"inner\"): 1 entries {
    TAG_Int(\"value\"): 7
  }
  TAG_List(\"longs\"): 2 entries {
    TAG_Long: 11
    TAG_Long: 12
  }
}";
    assert_eq!(text, expected);
}

#[test]
fn pretty_print_arrays() {
    let mut root = NbtCompound::new();
    root.insert("bytes", vec![1i8, 2, 3]).unwrap();

    let text = root.to_string_indented(None, "  ");
    assert_eq!(
        text,
        "TAG_Compound: 1 entries {\n  TAG_Byte_Array(\"bytes\"): [3 bytes]\n}"
    );
}
