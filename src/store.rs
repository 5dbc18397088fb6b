//! Non-volatile store collaborator interface.
//!
//! The log sees persistent memory as a flat run of bytes. On the
//! device this is a 24Cxx EEPROM (`hw::EepromStore`); [`MemStore`] is
//! the RAM-backed stand-in used by tests and by sessions without a
//! working memory chip.

/// Byte-addressable persistent memory.
///
/// An invalid store silently disables persistence: the log never reads
/// from or writes to it and the device runs as if factory-fresh.
pub trait NvStore {
    fn is_valid(&self) -> bool;
    fn capacity(&self) -> usize;
    fn read(&mut self, addr: usize) -> u8;
    fn write(&mut self, addr: usize, byte: u8);
}

/// Volatile store with the same shape as the EEPROM.
pub struct MemStore<const S: usize> {
    bytes: [u8; S],
    valid: bool,
}

impl<const S: usize> MemStore<S> {
    /// A valid, zero-filled store.
    pub fn new() -> Self {
        Self {
            bytes: [0; S],
            valid: true,
        }
    }

    /// A store that reports itself unusable.
    pub fn invalid() -> Self {
        Self {
            bytes: [0; S],
            valid: false,
        }
    }

    /// A valid store seeded with `bytes` (stale/corrupted memory in
    /// tests).
    pub fn from_bytes(bytes: [u8; S]) -> Self {
        Self { bytes, valid: true }
    }
}

impl<const S: usize> Default for MemStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const S: usize> NvStore for MemStore<S> {
    fn is_valid(&self) -> bool {
        self.valid
    }

    fn capacity(&self) -> usize {
        S
    }

    fn read(&mut self, addr: usize) -> u8 {
        self.bytes[addr]
    }

    fn write(&mut self, addr: usize, byte: u8) {
        self.bytes[addr] = byte;
    }
}
