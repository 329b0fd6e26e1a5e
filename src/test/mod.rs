use std::convert::TryFrom;

use crate::{NbtCompound, NbtFile, NbtList, Tag};





#[allow(clippy::float_cmp)]
mod tag;


use builder::Builder;

macro_rules! check_tags {
    {$($tag:ident = $val:literal),* $(,)?} => {
        $(
            assert_eq!(u8::from(Tag::$tag), $val);
            assert_eq!(Tag::try_from($val as u8), Ok(Tag::$tag));
        )*
    };
}

#[test]
fn exhaustive_tag_check() {
    check_tags! {
        End = 0,
        Byte = 1,
        Short = 2,
        Int = 3,
        Long = 4,
        Float = 5,
        Double = 6,
        ByteArray = 7,
        String = 8,
        List = 9,
        Compound = 10,
        IntArray = 11,
    }
}

#[test]
fn tags_out_of_range() {
    assert!(Tag::try_from(12).is_err());
    assert!(Tag::try_from(13).is_err());
    assert!(Tag::try_from(u8::MAX).is_err());
}

/// The canonical 33-byte "hello world" document: a compound named
/// `hello world` holding a single string `name` = `Bananrama`.
pub(crate) fn hello_world_bytes() -> Vec<u8> {
    Builder::new()
        .start_compound("hello world")
        .string("name", "Bananrama")
        .end_compound()
        .build()
}

pub(crate) const BYTE_ARRAY_NAME: &str = "byteArrayTest (the first 1000 values of (n*n*255+n*7)%100, starting with n=0 (0, 62, 34, 16, 8, ...))";

/// One deeply-mixed document exercising every tag type, shaped like the
/// classic `bigtest.nbt` fixture.
pub(crate) fn bigtest_file() -> NbtFile {
    let mut root = NbtCompound::new();
    root.insert("longTest", i64::MAX).unwrap();
    root.insert("shortTest", 32767i16).unwrap();
    root.insert("stringTest", "HELLO WORLD THIS IS A TEST STRING ÅÄÖ!")
        .unwrap();
    root.insert("floatTest", 0.498_231_47_f32).unwrap();
    root.insert("intTest", 2147483647i32).unwrap();

    let mut nested = NbtCompound::new();
    let mut ham = NbtCompound::new();
    ham.insert("name", "Hampus").unwrap();
    ham.insert("value", 0.75f32).unwrap();
    let mut egg = NbtCompound::new();
    egg.insert("name", "Eggbert").unwrap();
    egg.insert("value", 0.5f32).unwrap();
    nested.insert("ham", ham).unwrap();
    nested.insert("egg", egg).unwrap();
    root.insert("nested compound test", nested).unwrap();

    let mut longs = NbtList::with_element_tag(Tag::Long);
    for v in 11i64..=15 {
        longs.push(v).unwrap();
    }
    root.insert("listTest (long)", longs).unwrap();

    let mut compounds = NbtList::with_element_tag(Tag::Compound);
    for i in 0..2 {
        let mut c = NbtCompound::new();
        c.insert("name", format!("Compound tag #{}", i)).unwrap();
        c.insert("created-on", 1264099775885i64).unwrap();
        compounds.push(c).unwrap();
    }
    root.insert("listTest (compound)", compounds).unwrap();

    root.insert("byteTest", 127i8).unwrap();

    let bytes: Vec<i8> = (0..1000i64)
        .map(|n| ((n * n * 255 + n * 7) % 100) as i8)
        .collect();
    root.insert(BYTE_ARRAY_NAME, bytes).unwrap();

    root.insert("doubleTest", 0.493_128_713_218_231_5_f64)
        .unwrap();

    let ints: Vec<i32> = (0..10i32).map(|i| i * 31 + 7).collect();
    root.insert("intArrayTest", ints).unwrap();

    NbtFile::with_root("Level", root)
}

/// Deep assertion over everything [`bigtest_file`] put in the tree.
#[allow(clippy::float_cmp)]
pub(crate) fn assert_bigtest(file: &NbtFile) {
    assert_eq!(file.root_name(), "Level");

    let root = file.root();
    assert_eq!(root.len(), 12);

    assert_eq!(root.get("longTest").unwrap().long().unwrap(), i64::MAX);
    assert_eq!(root.get("shortTest").unwrap().short().unwrap(), 32767);
    assert_eq!(
        root.get("stringTest").unwrap().string().unwrap(),
        "HELLO WORLD THIS IS A TEST STRING ÅÄÖ!"
    );
    assert_eq!(
        root.get("floatTest").unwrap().float().unwrap(),
        0.498_231_47
    );
    assert_eq!(root.get("intTest").unwrap().int().unwrap(), 2147483647);

    let nested = root
        .get("nested compound test")
        .unwrap()
        .compound()
        .unwrap();
    assert_eq!(nested.len(), 2);

    let ham = nested.get("ham").unwrap().compound().unwrap();
    assert_eq!(ham.get("name").unwrap().string().unwrap(), "Hampus");
    assert_eq!(ham.get("value").unwrap().float().unwrap(), 0.75);

    let egg = nested.get("egg").unwrap().compound().unwrap();
    assert_eq!(egg.get("name").unwrap().string().unwrap(), "Eggbert");
    assert_eq!(egg.get("value").unwrap().float().unwrap(), 0.5);

    let longs = root.get("listTest (long)").unwrap().list().unwrap();
    assert_eq!(longs.element_tag(), Tag::Long);
    assert_eq!(longs.len(), 5);
    for (i, element) in longs.iter().enumerate() {
        assert_eq!(element.long().unwrap(), i as i64 + 11);
    }

    let compounds = root.get("listTest (compound)").unwrap().list().unwrap();
    assert_eq!(compounds.element_tag(), Tag::Compound);
    assert_eq!(compounds.len(), 2);
    for (i, element) in compounds.iter().enumerate() {
        let c = element.compound().unwrap();
        assert_eq!(
            c.get("name").unwrap().string().unwrap(),
            format!("Compound tag #{}", i)
        );
        assert_eq!(c.get("created-on").unwrap().long().unwrap(), 1264099775885);
    }

    assert_eq!(root.get("byteTest").unwrap().byte().unwrap(), 127);

    let bytes = root.get(BYTE_ARRAY_NAME).unwrap().byte_array().unwrap();
    assert_eq!(bytes.len(), 1000);
    for (n, b) in bytes.iter().enumerate() {
        let n = n as i64;
        assert_eq!(*b as i64, (n * n * 255 + n * 7) % 100);
    }

    assert_eq!(
        root.get("doubleTest").unwrap().double().unwrap(),
        0.493_128_713_218_231_5
    );

    let ints = root.get("intArrayTest").unwrap().int_array().unwrap();
    assert_eq!(ints.len(), 10);
    for (i, v) in ints.iter().enumerate() {
        assert_eq!(*v, i as i32 * 31 + 7);
    }
}
