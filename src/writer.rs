//! The chunked output sink used by the encoder.

use std::io;

use bytes::{Bytes, BytesMut};

/// Chunks are spilled into the byte buffer once they reach 64 KiB.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// A write sink that accumulates output in a small head chunk and
/// periodically spills it into a growable byte buffer.
///
/// Serializing element by element into a plain growable string would
/// re-copy the prefix on every growth; bounding the head chunk keeps the
/// copied region small and amortizes appends into [`BytesMut`].
///
/// # Examples
/// ```
/// use std::io::Write;
/// use decjson::ChunkedWriter;
///
/// let mut writer = ChunkedWriter::new();
/// writer.write_all(b"[1,").unwrap();
/// writer.write_all(b"2]").unwrap();
/// assert_eq!(&writer.into_bytes()[..], b"[1,2]");
/// ```
pub struct ChunkedWriter {
    spilled: BytesMut,
    head: Vec<u8>,
    chunk_size: usize,
}

impl ChunkedWriter {
    /// A writer with the default 64 KiB chunk threshold.
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// A writer spilling chunks of at least `chunk_size` bytes.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        ChunkedWriter {
            spilled: BytesMut::new(),
            head: Vec::new(),
            chunk_size: chunk_size.max(1),
        }
    }

    /// Total number of bytes written so far.
    pub fn len(&self) -> usize {
        self.spilled.len() + self.head.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn spill(&mut self) {
        self.spilled.extend_from_slice(&self.head);
        self.head.clear();
    }

    /// Finish writing and freeze the accumulated bytes.
    pub fn into_bytes(mut self) -> Bytes {
        self.spill();
        self.spilled.freeze()
    }

    /// Finish writing and copy the accumulated bytes out.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.spill();
        self.spilled.to_vec()
    }
}

impl Default for ChunkedWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl io::Write for ChunkedWriter {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.head.extend_from_slice(buf);
        if self.head.len() >= self.chunk_size {
            self.spill();
        }
        Ok(buf.len())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_roundtrip() {
        let mut writer = ChunkedWriter::new();
        writer.write_all(b"hello ").unwrap();
        writer.write_all(b"world").unwrap();
        assert_eq!(writer.len(), 11);
        assert_eq!(writer.into_vec(), b"hello world");
    }

    #[test]
    fn test_small_chunks_spill() {
        let mut writer = ChunkedWriter::with_chunk_size(4);
        for chunk in [&b"ab"[..], b"cd", b"ef", b"g"] {
            writer.write_all(chunk).unwrap();
        }
        assert_eq!(&writer.into_bytes()[..], b"abcdefg");
    }

    #[test]
    fn test_empty() {
        let writer = ChunkedWriter::new();
        assert!(writer.is_empty());
        assert_eq!(writer.into_vec(), Vec::<u8>::new());
    }
}
