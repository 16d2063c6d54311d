//! Local dump file readers with transparent gzip decompression.
//!
//! Open Library publishes dumps as `ol_dump_<entity>_<date>.txt.gz`; tests and
//! hand-made samples are usually plain text. Both are read through the same
//! buffered interface, with a byte counter on the on-disk (compressed) stream
//! for progress reporting.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use flate2::read::MultiGzDecoder;

/// Buffer size for dump readers (256KB)
const DUMP_BUF_SIZE: usize = 256 * 1024;

/// Shared byte counter for progress tracking
pub type ByteCounter = Arc<AtomicU64>;

/// Buffered line reader over a plain or gzipped dump file.
///
/// The file handle is owned by the reader and closed when it is dropped.
pub struct DumpReader {
    inner: Box<dyn BufRead>,
    counter: ByteCounter,
    total_bytes: Option<u64>,
    compressed: bool,
}

impl DumpReader {
    /// Bytes consumed from the file so far (compressed bytes for `.gz`).
    pub fn bytes_read(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    /// File size on disk, if the metadata was readable.
    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }
}

impl Read for DumpReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BufRead for DumpReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt)
    }
}

/// Open a dump file, gunzipping when the name ends in `.gz`.
pub fn open_dump(path: &Path) -> io::Result<DumpReader> {
    let file = File::open(path)?;
    let total_bytes = file.metadata().ok().map(|m| m.len());
    let counter = Arc::new(AtomicU64::new(0));
    let counting = CountingReader {
        inner: file,
        count: counter.clone(),
    };

    let compressed = path.extension().is_some_and(|ext| ext == "gz");
    let inner: Box<dyn BufRead> = if compressed {
        Box::new(BufReader::with_capacity(
            DUMP_BUF_SIZE,
            MultiGzDecoder::new(counting),
        ))
    } else {
        Box::new(BufReader::with_capacity(DUMP_BUF_SIZE, counting))
    };

    log::debug!(
        "opened dump {} ({} bytes{})",
        path.display(),
        total_bytes.map_or_else(|| "?".to_string(), |n| n.to_string()),
        if compressed { ", gzip" } else { "" }
    );

    Ok(DumpReader {
        inner,
        counter,
        total_bytes,
        compressed,
    })
}

/// Reader wrapper that tracks bytes read
pub struct CountingReader<R> {
    inner: R,
    count: ByteCounter,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count.fetch_add(n as u64, Ordering::Relaxed);
        Ok(n)
    }
}
