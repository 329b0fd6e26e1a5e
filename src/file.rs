//! Document-level façade: compression sniffing plus reader/writer
//! orchestration and byte accounting.

use std::io::{self, Cursor, Read, Write};

use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};

use crate::compression::{sniff, Compression};
use crate::error::{Error, Result};
use crate::read::{Selector, TagInfo, TagReader};
use crate::tag::NbtCompound;
use crate::write::TagWriter;

/// Counts the bytes pulled through an underlying reader, so consumption can
/// be reported at the outer (possibly compressed) layer.
struct CountingReader<R> {
    inner: R,
    count: u64,
}

impl<R: Read> CountingReader<R> {
    fn new(inner: R) -> Self {
        Self { inner, count: 0 }
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// A whole NBT document: a named root compound, loadable from and savable to
/// arbitrary byte streams with optional gzip or zlib compression.
///
/// Loading and saving report the number of bytes consumed from or produced
/// to the *underlying* stream, compression included, so a save followed by a
/// reload of the same bytes balances exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct NbtFile {
    root_name: String,
    root: NbtCompound,
    compression: Compression,
}

impl NbtFile {
    /// An empty document: unnamed root compound with no children.
    pub fn new() -> Self {
        Self::with_root("", NbtCompound::new())
    }

    /// A document ready to be saved, built from an existing tree.
    pub fn with_root(name: impl Into<String>, root: NbtCompound) -> Self {
        Self {
            root_name: name.into(),
            root,
            compression: Compression::None,
        }
    }

    pub fn root(&self) -> &NbtCompound {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut NbtCompound {
        &mut self.root
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn set_root_name(&mut self, name: impl Into<String>) {
        self.root_name = name.into();
    }

    /// The compression of the last stream this document was loaded from
    /// (the detected mode when loading with [`Compression::AutoDetect`]).
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Replace this document with the tree decoded from `reader`. Returns
    /// the number of bytes consumed from `reader`.
    pub fn load_from<R: Read>(&mut self, reader: R, compression: Compression) -> Result<u64> {
        self.load_inner(reader, compression, None)
    }

    /// Replace this document with the tree decoded from an in-memory
    /// buffer. Returns the number of bytes consumed, which may be fewer
    /// than `bytes.len()` if data trails the document.
    pub fn load_from_bytes(&mut self, bytes: &[u8], compression: Compression) -> Result<u64> {
        self.load_from(bytes, compression)
    }

    /// Like [`load_from`][Self::load_from], but consults `selector` before
    /// materializing each named tag; rejected subtrees are consumed from the
    /// stream and discarded.
    pub fn load_from_with<R, F>(
        &mut self,
        reader: R,
        compression: Compression,
        mut selector: F,
    ) -> Result<u64>
    where
        R: Read,
        F: FnMut(&TagInfo) -> bool,
    {
        self.load_inner(reader, compression, Some(&mut selector as &mut Selector))
    }

    fn load_inner<R: Read>(
        &mut self,
        reader: R,
        compression: Compression,
        selector: Option<&mut Selector>,
    ) -> Result<u64> {
        let mut counting = CountingReader::new(reader);

        let (mode, peeked) = match compression {
            Compression::AutoDetect => sniff(&mut counting)?,
            explicit => (explicit, Vec::new()),
        };

        // Put any sniffed bytes back in front of the stream; the underlying
        // source may not support seeking, so they are chained, not rewound.
        let chained = Cursor::new(peeked).chain(&mut counting);
        let (name, root) = match mode {
            Compression::None => read_tree(chained, selector)?,
            Compression::Gzip => {
                let mut decoder = GzDecoder::new(chained);
                let tree = read_tree(&mut decoder, selector)?;
                drain(decoder)?;
                tree
            }
            Compression::Zlib => {
                let mut decoder = ZlibDecoder::new(chained);
                let tree = read_tree(&mut decoder, selector)?;
                drain(decoder)?;
                tree
            }
            Compression::AutoDetect => unreachable!("sniffing returns a concrete mode"),
        };

        self.root_name = name;
        self.root = root;
        self.compression = mode;
        Ok(counting.count)
    }

    /// Encode this document to `writer` under the given compression mode.
    /// Returns the number of bytes written to `writer`.
    pub fn save_to<W: Write>(&self, writer: W, compression: Compression) -> Result<u64> {
        let mut counting = CountingWriter::new(writer);
        match compression {
            Compression::AutoDetect => {
                return Err(Error::unsupported_compression(
                    "saving requires a concrete compression mode, not AutoDetect",
                ))
            }
            Compression::None => {
                TagWriter::new(&mut counting).write_root(&self.root_name, &self.root)?;
            }
            Compression::Gzip => {
                let mut encoder = GzEncoder::new(&mut counting, flate2::Compression::default());
                TagWriter::new(&mut encoder).write_root(&self.root_name, &self.root)?;
                encoder.finish()?;
            }
            Compression::Zlib => {
                let mut encoder = ZlibEncoder::new(&mut counting, flate2::Compression::default());
                TagWriter::new(&mut encoder).write_root(&self.root_name, &self.root)?;
                encoder.finish()?;
            }
        }
        Ok(counting.count)
    }

    /// Read only the root compound's name from a stream, decompressing as
    /// needed but decoding none of the root's children.
    pub fn read_root_name<R: Read>(mut reader: R) -> Result<String> {
        let (mode, peeked) = sniff(&mut reader)?;
        let chained = Cursor::new(peeked).chain(reader);
        match mode {
            Compression::None => TagReader::new(chained).read_root_name(),
            Compression::Gzip => TagReader::new(GzDecoder::new(chained)).read_root_name(),
            Compression::Zlib => TagReader::new(ZlibDecoder::new(chained)).read_root_name(),
            Compression::AutoDetect => unreachable!("sniffing returns a concrete mode"),
        }
    }
}

impl Default for NbtFile {
    fn default() -> Self {
        Self::new()
    }
}

// The decoded document ends before the envelope does: gzip carries an 8-byte
// CRC/length trailer and zlib a 4-byte Adler checksum, which the decoder only
// pulls from the source on the read that reports EOF. Finish that read so the
// trailer bytes pass through the counting wrapper and the checksum is checked.
fn drain<R: Read>(mut decoder: R) -> Result<()> {
    io::copy(&mut decoder, &mut io::sink())?;
    Ok(())
}

fn read_tree<R: Read>(
    reader: R,
    selector: Option<&mut Selector>,
) -> Result<(String, NbtCompound)> {
    match selector {
        Some(selector) => TagReader::with_selector(reader, selector).read_root(),
        None => TagReader::new(reader).read_root(),
    }
}
