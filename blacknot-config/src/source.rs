//! Character sources.
//!
//! The parser pulls its input one byte at a time through [`CharSource`].
//! Three sources ship with the crate:
//!
//! - [`SliceSource`] - an in-memory buffer
//! - [`ReaderSource`] - any `std::io::Read`, pulled in fixed-size chunks
//! - [`FileSource`] - a path, opened in `start` and closed in `end`

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Default chunk size for [`ReaderSource`].
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Sequential, pull-based supplier of input bytes.
///
/// The parser calls `start` once, then `pop` until it returns `Ok(false)`
/// or the grammar fails, then `end` once. `curr` is only meaningful after
/// a successful `pop`.
pub trait CharSource {
    /// Prepare the source. An error aborts the parse before any byte is read.
    fn start(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Advance to the next byte. Returns `Ok(false)` at end of input.
    fn pop(&mut self) -> io::Result<bool>;

    /// The current byte, or `None` before the first `pop` and after end of input.
    fn curr(&self) -> Option<u8>;

    /// True once no further bytes are available.
    fn eoi(&self) -> bool;

    /// Release the source. Called even when the grammar failed.
    fn end(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn start(&mut self) -> io::Result<()> {
        (**self).start()
    }

    fn pop(&mut self) -> io::Result<bool> {
        (**self).pop()
    }

    fn curr(&self) -> Option<u8> {
        (**self).curr()
    }

    fn eoi(&self) -> bool {
        (**self).eoi()
    }

    fn end(&mut self) -> io::Result<()> {
        (**self).end()
    }
}

// ============================================================================
// SliceSource
// ============================================================================

/// Source over an in-memory byte slice.
///
/// `start` rewinds to the beginning, so the same source can be parsed
/// more than once.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    input: &'a [u8],
    next: usize,
    current: Option<u8>,
}

impl<'a> SliceSource<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            next: 0,
            current: None,
        }
    }

    /// Bytes not yet popped.
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.next..]
    }
}

impl CharSource for SliceSource<'_> {
    fn start(&mut self) -> io::Result<()> {
        self.next = 0;
        self.current = None;
        Ok(())
    }

    #[inline]
    fn pop(&mut self) -> io::Result<bool> {
        self.current = self.input.get(self.next).copied();
        if self.current.is_some() {
            self.next += 1;
        }
        Ok(self.current.is_some())
    }

    #[inline]
    fn curr(&self) -> Option<u8> {
        self.current
    }

    #[inline]
    fn eoi(&self) -> bool {
        self.current.is_none() && self.next >= self.input.len()
    }
}

// ============================================================================
// ReaderSource
// ============================================================================

/// Source over any reader, pulled in fixed-size chunks.
///
/// The chunk buffer is allocated once. `Interrupted` reads are retried;
/// any other read error is returned from `pop`.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    chunk: Box<[u8]>,
    /// Read position within the chunk
    pos: usize,
    /// Valid bytes in the chunk
    len: usize,
    current: Option<u8>,
    exhausted: bool,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
    }

    /// Create with a specific chunk size (at least 1).
    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            chunk: vec![0; chunk_size.max(1)].into_boxed_slice(),
            pos: 0,
            len: 0,
            current: None,
            exhausted: false,
        }
    }

    /// Give back the wrapped reader. Buffered but unread bytes are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill(&mut self) -> io::Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        loop {
            match self.reader.read(&mut self.chunk) {
                Ok(0) => {
                    self.exhausted = true;
                    return Ok(false);
                }
                Ok(n) => {
                    self.pos = 0;
                    self.len = n;
                    return Ok(true);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> CharSource for ReaderSource<R> {
    fn pop(&mut self) -> io::Result<bool> {
        if self.pos == self.len && !self.fill()? {
            self.current = None;
            return Ok(false);
        }
        self.current = Some(self.chunk[self.pos]);
        self.pos += 1;
        Ok(true)
    }

    #[inline]
    fn curr(&self) -> Option<u8> {
        self.current
    }

    #[inline]
    fn eoi(&self) -> bool {
        self.exhausted && self.current.is_none()
    }
}

// ============================================================================
// FileSource
// ============================================================================

/// Source over a file on disk.
///
/// The file is opened by `start` and closed by `end`; a missing file
/// fails the parse before any byte is read.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    inner: Option<ReaderSource<File>>,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            inner: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True between a successful `start` and `end`.
    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }
}

impl CharSource for FileSource {
    fn start(&mut self) -> io::Result<()> {
        let file = File::open(&self.path)?;
        self.inner = Some(ReaderSource::new(file));
        Ok(())
    }

    fn pop(&mut self) -> io::Result<bool> {
        match &mut self.inner {
            Some(source) => source.pop(),
            None => Err(io::Error::new(io::ErrorKind::NotConnected, "file source not started")),
        }
    }

    fn curr(&self) -> Option<u8> {
        self.inner.as_ref().and_then(|source| source.curr())
    }

    fn eoi(&self) -> bool {
        self.inner.as_ref().map_or(true, |source| source.eoi())
    }

    fn end(&mut self) -> io::Result<()> {
        self.inner = None;
        Ok(())
    }
}
