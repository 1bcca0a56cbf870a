/// Accumulates pending write operations and hands them back in fixed-size
/// chunks, independent of any store client.
///
/// The store commits at most `capacity` operations per request, so callers
/// push operations one by one and flush every chunk `push` returns; `finish`
/// drains the remainder.
#[derive(Debug)]
pub struct BatchAccumulator<T> {
    capacity: usize,
    pending: Vec<T>,
}

/// Per-request commit limit of the underlying store
pub const MAX_OPS_PER_BATCH: usize = 500;

impl<T> BatchAccumulator<T> {
    pub fn new() -> Self {
        Self::with_capacity(MAX_OPS_PER_BATCH)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "batch capacity must be positive");
        Self {
            capacity,
            pending: Vec::with_capacity(capacity),
        }
    }

    /// Add one operation. Returns a full chunk once `capacity` operations
    /// are pending; the caller must commit it before pushing more.
    #[must_use = "a returned chunk must be committed"]
    pub fn push(&mut self, op: T) -> Option<Vec<T>> {
        self.pending.push(op);
        if self.pending.len() >= self.capacity {
            Some(std::mem::replace(
                &mut self.pending,
                Vec::with_capacity(self.capacity),
            ))
        } else {
            None
        }
    }

    /// Drain whatever is left; empty when the total was an exact multiple
    /// of the capacity.
    pub fn finish(mut self) -> Vec<T> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl<T> Default for BatchAccumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_at_capacity_and_drains_remainder() {
        let mut acc = BatchAccumulator::with_capacity(500);
        let mut chunks: Vec<Vec<u32>> = Vec::new();

        for i in 0..1200 {
            if let Some(chunk) = acc.push(i) {
                chunks.push(chunk);
            }
        }
        let rest = acc.finish();

        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() == 500));
        assert_eq!(rest.len(), 200);
        // order preserved across chunk boundaries
        assert_eq!(chunks[0][0], 0);
        assert_eq!(chunks[1][0], 500);
        assert_eq!(rest[0], 1000);
    }

    #[test]
    fn exact_multiple_leaves_nothing_to_drain() {
        let mut acc = BatchAccumulator::with_capacity(2);
        assert!(acc.push(1).is_none());
        let chunk = acc.push(2).expect("chunk at capacity");
        assert_eq!(chunk, vec![1, 2]);
        assert!(acc.finish().is_empty());
    }

    #[test]
    fn pending_len_tracks_unflushed_ops() {
        let mut acc = BatchAccumulator::with_capacity(10);
        assert_eq!(acc.pending_len(), 0);
        let _ = acc.push("a");
        let _ = acc.push("b");
        assert_eq!(acc.pending_len(), 2);
    }
}
