/// The document buffer and the shared rewriting protocol.
///
/// Exactly one `Buffer` exists per file processed; it owns the document
/// bytes and is replaced wholesale whenever a command rewrites ranges of it.
use crate::interval::{Interval, IntervalList};

pub struct Buffer {
    bytes: Vec<u8>,
}

impl Buffer {
    pub fn new(bytes: Vec<u8>) -> Self {
        Buffer { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn whole(&self) -> Interval {
        Interval::new(0, self.len())
    }

    /// Seeds a fresh selection list covering the entire buffer.
    pub fn select_all(&self) -> IntervalList {
        vec![self.whole()]
    }

    /// The shared mutation protocol: rebuilds the buffer by walking
    /// `targets` in order, copying the bytes between them and interleaving
    /// the per-target replacement returned by `replacement`.
    /// `targets` must be sorted and disjoint. Returns the net byte delta
    /// (`new_len as i64 - old_len as i64`), useful for selection bookkeeping.
    pub fn rewrite<F>(&mut self, targets: &[Interval], mut replacement: F) -> i64
    where
        F: FnMut(usize, &Interval) -> Vec<u8>,
    {
        let old_len = self.bytes.len();
        let mut reps = Vec::with_capacity(targets.len());
        let mut new_len = old_len;
        for (i, t) in targets.iter().enumerate() {
            let r = replacement(i, t);
            new_len = new_len + r.len() - t.len;
            reps.push(r);
        }

        let mut out = Vec::with_capacity(new_len);
        let mut cursor = 0;
        for (t, rep) in targets.iter().zip(reps.into_iter()) {
            out.extend_from_slice(&self.bytes[cursor..t.from]);
            out.extend_from_slice(&rep);
            cursor = t.end();
        }
        out.extend_from_slice(&self.bytes[cursor..]);

        self.bytes = out;
        self.bytes.len() as i64 - old_len as i64
    }
}
