//! Fixed-capacity history of the most recently rendered samples.
//!
//! The render thread is the only writer and appends once per rendered
//! chunk. A visualization thread copies the newest window out at whatever
//! rate it likes. Both take the same `parking_lot` mutex for a bounded
//! critical section (one chunk write or one window copy), so a reader can
//! be stale by a chunk but never sees a torn cursor.

use parking_lot::Mutex;

struct HistoryInner {
    samples: Box<[f32]>,
    /// Next slot to write. Oldest sample when the ring is full.
    cursor: usize,
}

pub struct HistoryBuffer {
    inner: Mutex<HistoryInner>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create a zero-filled ring holding `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(HistoryInner {
                samples: vec![0.0; capacity].into_boxed_slice(),
                cursor: 0,
            }),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append samples, overwriting the oldest entries once full.
    pub fn write(&self, block: &[f32]) {
        if self.capacity == 0 || block.is_empty() {
            return;
        }

        // Only the newest `capacity` samples can survive
        let block = &block[block.len().saturating_sub(self.capacity)..];

        let mut inner = self.inner.lock();
        let cursor = inner.cursor;
        let first = block.len().min(self.capacity - cursor);
        inner.samples[cursor..cursor + first].copy_from_slice(&block[..first]);
        let rest = block.len() - first;
        inner.samples[..rest].copy_from_slice(&block[first..]);
        inner.cursor = (cursor + block.len()) % self.capacity;
    }

    /// Copy the newest `min(capacity, destination.len())` samples into
    /// `destination`, oldest first. Returns how many were copied.
    pub fn copy_latest(&self, destination: &mut [f32]) -> usize {
        let count = destination.len().min(self.capacity);
        if count == 0 {
            return 0;
        }

        let inner = self.inner.lock();
        let start = (inner.cursor + self.capacity - count) % self.capacity;
        let first = count.min(self.capacity - start);
        destination[..first].copy_from_slice(&inner.samples[start..start + first]);
        destination[first..count].copy_from_slice(&inner.samples[..count - first]);
        count
    }

    /// Restart writing at slot 0 so the window lines up with a new voice.
    pub fn reset_cursor(&self) {
        self.inner.lock().cursor = 0;
    }

    /// Zero every slot and rewind the cursor.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.samples.fill(0.0);
        inner.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_oldest_first() {
        let history = HistoryBuffer::new(4);
        history.write(&[1.0, 2.0, 3.0]);

        let mut out = [0.0; 3];
        assert_eq!(history.copy_latest(&mut out), 3);
        assert_eq!(out, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn wraps_and_overwrites_oldest() {
        let history = HistoryBuffer::new(4);
        history.write(&[1.0, 2.0, 3.0]);
        history.write(&[4.0, 5.0, 6.0]);

        let mut out = [0.0; 4];
        assert_eq!(history.copy_latest(&mut out), 4);
        assert_eq!(out, [3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn oversized_write_keeps_newest() {
        let history = HistoryBuffer::new(3);
        history.write(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        let mut out = [0.0; 3];
        history.copy_latest(&mut out);
        assert_eq!(out, [3.0, 4.0, 5.0]);
    }

    #[test]
    fn destination_larger_than_capacity() {
        let history = HistoryBuffer::new(2);
        history.write(&[7.0, 8.0]);

        let mut out = [-1.0; 5];
        assert_eq!(history.copy_latest(&mut out), 2);
        assert_eq!(&out[..2], &[7.0, 8.0]);
        assert_eq!(&out[2..], &[-1.0, -1.0, -1.0]);
    }

    #[test]
    fn empty_destination_copies_nothing() {
        let history = HistoryBuffer::new(8);
        history.write(&[1.0]);
        assert_eq!(history.copy_latest(&mut []), 0);
    }

    #[test]
    fn zero_capacity_is_inert() {
        let history = HistoryBuffer::new(0);
        history.write(&[1.0, 2.0]);
        let mut out = [0.0; 4];
        assert_eq!(history.copy_latest(&mut out), 0);
    }

    #[test]
    fn reset_cursor_restarts_at_zero() {
        let history = HistoryBuffer::new(4);
        history.write(&[1.0, 2.0, 3.0]);
        history.reset_cursor();
        history.write(&[9.0]);

        let mut out = [0.0; 4];
        history.copy_latest(&mut out);
        // Slot 0 is newest, window continues from slot 1
        assert_eq!(out, [2.0, 3.0, 0.0, 9.0]);
    }

    #[test]
    fn clear_zeroes_samples() {
        let history = HistoryBuffer::new(2);
        history.write(&[1.0, 2.0]);
        history.clear();
        let mut out = [5.0; 2];
        history.copy_latest(&mut out);
        assert_eq!(out, [0.0, 0.0]);
    }
}
