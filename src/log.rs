//! Crash-consistent counting log.
//!
//! An append-only sequence of small command records in a fixed-size
//! ring of non-volatile bytes, terminated by a single 3-byte end mark.
//! Full application state is rebuilt by replaying the ring once after
//! power-up.
//!
//! Record formats (1-byte tag):
//!   - `1 lo hi`  new absolute counter value, little-endian i16
//!   - `2`        clear history
//!   - `3`        start new count
//!   - `FF 00 00` end mark; 0xFF is never a valid tag
//!
//! Writers append at the end mark and re-write a fresh mark behind the
//! new record, so the ring always carries exactly one mark and every
//! byte from the mark forward (in scan order) is a well-formed record
//! or zero. Once the ring fills, the mark wraps past the oldest
//! records and they age out of replay reach; bounded history is a
//! design choice here, not a failure.

use crate::ring::Ring;
use crate::store::NvStore;

const TAG_NEW_VALUE: u8 = 1;
const TAG_CLEAR_HISTORY: u8 = 2;
const TAG_NEW_COUNT: u8 = 3;

/// Tail sentinel; the lead byte can never open a record.
pub const END_MARK: [u8; 3] = [0xFF, 0x00, 0x00];

/// Bytes a record starting with `tag` occupies. Unknown tags (stale or
/// corrupted bytes) are treated as one byte of noise.
fn record_len(tag: u8) -> usize {
    match tag {
        TAG_NEW_VALUE => 3,
        _ => 1,
    }
}

/// One durable user action, as reconstructed during replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogCommand {
    /// Counter set to `value`; `delta` is relative to the previous
    /// replayed value.
    ValueChanged { value: i32, delta: i32 },
    HistoryCleared,
    CountStarted,
}

/// The persistent log: a ring of command records with one end mark.
pub struct EventLog<S: NvStore> {
    ring: Ring<S>,
    // position of the end mark's lead byte; next record lands here
    tail: usize,
}

impl<S: NvStore> EventLog<S> {
    pub fn new(store: S) -> Self {
        let ring = Ring::new(store);
        debug_assert!(
            !ring.is_valid() || ring.capacity() >= 2 * END_MARK.len(),
            "log ring too small"
        );
        Self { ring, tail: 0 }
    }

    /// Whether appends actually reach persistent memory.
    pub fn is_persistent(&self) -> bool {
        self.ring.is_valid()
    }

    pub fn into_store(self) -> S {
        self.ring.into_inner()
    }

    /// Locate the end mark and return the replay of every record still
    /// reachable from it, oldest first.
    ///
    /// Memory without a recognizable end mark (factory-fresh, erased,
    /// or corrupted) is wiped and re-marked; the replay is then empty.
    /// Over an invalid store the replay is empty and nothing is
    /// touched.
    pub fn restore(&mut self) -> Replay<'_, S> {
        let mut live = self.ring.is_valid();
        if live {
            match self.find_end_mark() {
                Some(pos) => self.tail = pos,
                None => {
                    self.reinitialize();
                    live = false;
                }
            }
        }
        let tail = self.tail;
        Replay {
            ring: &mut self.ring,
            tail,
            offset: END_MARK.len(),
            value: 0,
            live,
        }
    }

    /// Durably append "counter is now `value`" (truncated to i16).
    pub fn record_new_value(&mut self, value: i32) {
        let raw = (value as i16).to_le_bytes();
        self.append(&[TAG_NEW_VALUE, raw[0], raw[1]]);
    }

    /// Durably append a history wipe.
    pub fn record_clear_history(&mut self) {
        self.append(&[TAG_CLEAR_HISTORY]);
    }

    /// Durably append a new-count marker.
    pub fn record_start_new_count(&mut self) {
        self.append(&[TAG_NEW_COUNT]);
    }

    fn find_end_mark(&mut self) -> Option<usize> {
        let capacity = self.ring.capacity();
        (0..capacity).find(|&pos| {
            self.ring.get(pos) == END_MARK[0]
                && self.ring.get(pos + 1) == END_MARK[1]
                && self.ring.get(pos + 2) == END_MARK[2]
        })
    }

    fn reinitialize(&mut self) {
        self.ring.fill(0);
        for (i, &byte) in END_MARK.iter().enumerate() {
            self.ring.put(i, byte);
        }
        self.tail = 0;
    }

    /// Zero whole old records starting at `from` until at least `need`
    /// bytes are clear. Clearing record-wise (looking at each old tag
    /// to learn its span) never leaves the trailing bytes of a
    /// partially overwritten multi-byte record behind as a fake
    /// record start.
    fn scrub(&mut self, from: usize, need: usize) {
        let mut pos = from;
        let mut cleared = 0;
        while cleared < need {
            let span = record_len(self.ring.get(pos));
            for i in 0..span {
                self.ring.put(pos + i, 0);
            }
            pos += span;
            cleared += span;
        }
    }

    // The new record overwrites the current end mark; the fresh mark
    // lands right behind it, on ground scrubbed of old records.
    fn append(&mut self, record: &[u8]) {
        if !self.ring.is_valid() {
            return;
        }
        self.scrub(self.tail + END_MARK.len(), record.len());
        for (i, &byte) in record.iter().enumerate() {
            self.ring.put(self.tail + i, byte);
        }
        for (i, &byte) in END_MARK.iter().enumerate() {
            self.ring.put(self.tail + record.len() + i, byte);
        }
        self.tail = (self.tail + record.len()) % self.ring.capacity();
    }
}

/// Iterator over the commands reachable forward from the end mark.
///
/// Scans one ring length, decoding records as it goes; unknown bytes
/// are skipped one at a time and reset the running value, so stale
/// fragments degrade into nothing instead of aborting the replay.
pub struct Replay<'a, S: NvStore> {
    ring: &'a mut Ring<S>,
    tail: usize,
    offset: usize,
    value: i32,
    live: bool,
}

impl<S: NvStore> Iterator for Replay<'_, S> {
    type Item = LogCommand;

    fn next(&mut self) -> Option<LogCommand> {
        if !self.live {
            return None;
        }
        let capacity = self.ring.capacity();
        while self.offset < capacity {
            let pos = self.tail + self.offset;
            match self.ring.get(pos) {
                TAG_NEW_VALUE => {
                    let lo = self.ring.get(pos + 1);
                    let hi = self.ring.get(pos + 2);
                    let value = i16::from_le_bytes([lo, hi]) as i32;
                    let delta = value - self.value;
                    self.value = value;
                    self.offset += 3;
                    return Some(LogCommand::ValueChanged { value, delta });
                }
                TAG_CLEAR_HISTORY => {
                    self.value = 0;
                    self.offset += 1;
                    return Some(LogCommand::HistoryCleared);
                }
                TAG_NEW_COUNT => {
                    self.value = 0;
                    self.offset += 1;
                    return Some(LogCommand::CountStarted);
                }
                _ => {
                    // stale or torn bytes: skip and resynchronize
                    self.value = 0;
                    self.offset += 1;
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;

    fn replay_all<S: NvStore, const N: usize>(log: &mut EventLog<S>) -> heapless::Vec<LogCommand, N> {
        log.restore().collect()
    }

    fn summarize(commands: &[LogCommand]) -> (i32, usize, usize) {
        let mut sum = 0;
        let mut new_counts = 0;
        let mut clears = 0;
        for command in commands {
            match command {
                LogCommand::ValueChanged { value, .. } => sum += value,
                LogCommand::CountStarted => new_counts += 1,
                LogCommand::HistoryCleared => clears += 1,
            }
        }
        (sum, new_counts, clears)
    }

    #[test]
    fn round_trip_within_capacity() {
        let mut log = EventLog::new(MemStore::<32>::new());
        assert_eq!(log.restore().count(), 0);

        for i in 0..5 {
            log.record_new_value(1 << i);
        }
        log.record_start_new_count();
        log.record_start_new_count();
        log.record_new_value(32);
        log.record_clear_history();

        let mut log = EventLog::new(log.into_store());
        let commands: heapless::Vec<_, 16> = replay_all(&mut log);
        assert_eq!(summarize(&commands), (63, 2, 1));
    }

    #[test]
    fn replay_resets_running_value_on_count_boundaries() {
        let mut log = EventLog::new(MemStore::<64>::new());
        log.restore().count();
        log.record_new_value(10);
        log.record_start_new_count();
        log.record_new_value(3);

        let mut log = EventLog::new(log.into_store());
        let commands: heapless::Vec<_, 8> = replay_all(&mut log);
        assert_eq!(
            commands.as_slice(),
            &[
                LogCommand::ValueChanged { value: 10, delta: 10 },
                LogCommand::CountStarted,
                LogCommand::ValueChanged { value: 3, delta: 3 },
            ]
        );
    }

    #[test]
    fn replay_after_wraparound_keeps_only_reachable_records() {
        let mut log = EventLog::new(MemStore::<16>::new());
        assert_eq!(log.restore().count(), 0);

        for i in 0..10 {
            log.record_new_value(1 << i);
        }

        // 3 record bytes + 3 mark bytes per live append: the last four
        // records fit ahead of the mark, older ones aged out
        let mut log = EventLog::new(log.into_store());
        let commands: heapless::Vec<_, 16> = replay_all(&mut log);
        assert_eq!(summarize(&commands), (64 + 128 + 256 + 512, 0, 0));
    }

    #[test]
    fn negative_and_wide_values_survive() {
        let mut log = EventLog::new(MemStore::<64>::new());
        log.restore().count();
        log.record_new_value(300);
        log.record_new_value(-5);

        let mut log = EventLog::new(log.into_store());
        let commands: heapless::Vec<_, 8> = replay_all(&mut log);
        assert_eq!(
            commands.as_slice(),
            &[
                LogCommand::ValueChanged { value: 300, delta: 300 },
                LogCommand::ValueChanged { value: -5, delta: -305 },
            ]
        );
    }

    #[test]
    fn invalid_store_disables_everything() {
        let mut log = EventLog::new(MemStore::<32>::invalid());
        assert!(!log.is_persistent());

        assert_eq!(log.restore().count(), 0);
        for i in 0..5 {
            log.record_new_value(1 << i);
        }
        log.record_start_new_count();
        log.record_clear_history();
        assert_eq!(log.restore().count(), 0);
    }

    #[test]
    fn unrecognizable_memory_is_wiped_and_remarked() {
        let mut log = EventLog::new(MemStore::<32>::from_bytes([0x55; 32]));
        assert_eq!(log.restore().count(), 0);

        let mut store = log.into_store();
        assert_eq!(store.read(0), 0xFF);
        assert_eq!(store.read(1), 0);
        assert_eq!(store.read(2), 0);
        for addr in 3..32 {
            assert_eq!(store.read(addr), 0);
        }

        // and the wiped log is usable
        let mut log = EventLog::new(store);
        log.record_new_value(7);
        let mut log = EventLog::new(log.into_store());
        let commands: heapless::Vec<_, 4> = replay_all(&mut log);
        assert_eq!(commands.as_slice(), &[LogCommand::ValueChanged { value: 7, delta: 7 }]);
    }

    #[test]
    fn garbage_bytes_are_skipped_and_reset_the_running_value() {
        let mut bytes = [0u8; 16];
        bytes[0..3].copy_from_slice(&END_MARK);
        bytes[3..6].copy_from_slice(&[TAG_NEW_VALUE, 100, 0]);
        bytes[6] = 9; // never a valid tag
        bytes[7..10].copy_from_slice(&[TAG_NEW_VALUE, 50, 0]);

        let mut log = EventLog::new(MemStore::from_bytes(bytes));
        let commands: heapless::Vec<_, 8> = replay_all(&mut log);
        assert_eq!(
            commands.as_slice(),
            &[
                LogCommand::ValueChanged { value: 100, delta: 100 },
                // the garbage byte forgot the previous value
                LogCommand::ValueChanged { value: 50, delta: 50 },
            ]
        );
    }

    #[test]
    fn ring_always_holds_exactly_one_end_mark() {
        let mut log = EventLog::new(MemStore::<16>::new());
        log.restore().count();

        let mut check = |log: &mut EventLog<MemStore<16>>| {
            let marks = (0..16)
                .filter(|&pos| {
                    let ring = &mut log.ring;
                    ring.get(pos) == 0xFF && ring.get(pos + 1) == 0 && ring.get(pos + 2) == 0
                })
                .count();
            assert_eq!(marks, 1);
        };

        check(&mut log);
        for i in 0..12 {
            match i % 3 {
                0 => log.record_new_value(255 * i),
                1 => log.record_start_new_count(),
                _ => log.record_clear_history(),
            }
            check(&mut log);
        }
    }

    #[test]
    fn appends_resume_at_the_recovered_tail() {
        let mut log = EventLog::new(MemStore::<32>::new());
        log.restore().count();
        log.record_new_value(1);
        log.record_new_value(2);

        // power cycle between the two halves of the session
        let mut log = EventLog::new(log.into_store());
        log.restore().count();
        log.record_new_value(4);

        let mut log = EventLog::new(log.into_store());
        let commands: heapless::Vec<_, 8> = replay_all(&mut log);
        assert_eq!(summarize(&commands), (7, 0, 0));
    }
}
