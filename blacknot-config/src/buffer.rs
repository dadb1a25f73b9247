//! Fixed-capacity token buffers.
//!
//! Storage for capacities up to [`PREALLOCATE_MAX`] is allocated once,
//! up front, and never grows. Larger capacities reserve that much and
//! grow on demand, so a huge configured limit costs nothing until a token
//! actually needs it. Either way a push past capacity is refused with
//! [`Overflow`] instead of truncating.

/// Most bytes a buffer reserves at construction.
pub const PREALLOCATE_MAX: usize = 64 * 1024;

/// Returned when a push would exceed the buffer's capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow;

/// Bounded byte buffer holding one token (section name, entry name or value).
#[derive(Debug, Clone)]
pub struct TokenBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl TokenBuffer {
    /// Create an empty buffer holding at most `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity.min(PREALLOCATE_MAX)),
            capacity,
        }
    }

    /// Append one byte, or report [`Overflow`] if the buffer is full.
    #[inline]
    pub fn push(&mut self, b: u8) -> Result<(), Overflow> {
        if self.bytes.len() == self.capacity {
            return Err(Overflow);
        }
        self.bytes.push(b);
        Ok(())
    }

    /// Forget the contents. Keeps allocated storage.
    #[inline]
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// The token bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.bytes.len() == self.capacity
    }

    /// Maximum number of bytes the buffer accepts.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
