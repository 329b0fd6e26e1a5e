//! Detection of the compression envelope around an NBT byte stream.

use std::io::Read;

use crate::error::Result;

/// Compression applied around the binary NBT payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Work out the compression from the first bytes of the stream. Only
    /// meaningful when loading; saving needs a concrete mode.
    AutoDetect,
    /// No compression.
    None,
    /// A gzip envelope (RFC 1952), magic bytes `0x1f 0x8b`.
    Gzip,
    /// A zlib envelope (RFC 1950), first byte `0x78`-ish.
    Zlib,
}

impl Compression {
    /// Classify a stream from its first bytes. Anything that is neither a
    /// gzip magic nor a zlib header is taken to be uncompressed NBT.
    pub(crate) fn classify(header: &[u8]) -> Compression {
        match header {
            [0x1f, 0x8b, ..] => Compression::Gzip,
            [first, ..] if first >> 4 == 0x7 => Compression::Zlib,
            _ => Compression::None,
        }
    }
}

/// Read at most two leading bytes off `reader` and classify them. The bytes
/// actually consumed are returned so the caller can chain them back in front
/// of the rest of the stream; this is what lets detection work on sources
/// that cannot seek.
pub(crate) fn sniff<R: Read>(reader: &mut R) -> Result<(Compression, Vec<u8>)> {
    let mut header = [0u8; 2];
    let mut filled = 0;
    while filled < header.len() {
        match reader.read(&mut header[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok((
        Compression::classify(&header[..filled]),
        header[..filled].to_vec(),
    ))
}
