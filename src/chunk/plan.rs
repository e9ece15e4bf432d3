//! Chunk planner: partitions `[0, size)` into contiguous byte ranges.

use std::fmt;

/// An inclusive byte range `[start, end]` of the remote resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered by the range.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Always false, a range covers at least one byte.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Value of the `Range` request header for this range.
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// One entry of a chunk plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkEntry {
    /// Position of the chunk in the final file.
    pub index: usize,
    /// Bytes fetched for this chunk.
    pub range: ByteRange,
}

/// Partition `[0, size)` into at most `count` contiguous ranges.
///
/// With `chunk = size / count`, entry 0 covers `[0, chunk]` and every later
/// entry starts right after its predecessor and spans `chunk + 1` bytes.
/// Ends are clamped to `size - 1` and planning stops once the last byte is
/// covered, so a small resource may yield fewer entries than requested.
/// A `count` of zero is treated as one. An empty resource has no entries.
pub fn plan(size: u64, count: usize) -> Vec<ChunkEntry> {
    if size == 0 {
        return Vec::new();
    }

    let count = count.max(1) as u64;
    let chunk = size / count;
    let last = size - 1;

    let mut entries = Vec::with_capacity(count as usize);
    let mut start = 0;
    while (entries.len() as u64) < count && start <= last {
        let end = start.saturating_add(chunk).min(last);
        entries.push(ChunkEntry {
            index: entries.len(),
            range: ByteRange { start, end },
        });
        start = end + 1;
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(size: u64, count: usize) -> Vec<(u64, u64)> {
        plan(size, count)
            .into_iter()
            .map(|e| (e.range.start, e.range.end))
            .collect()
    }

    fn assert_covers(size: u64, count: usize) {
        let entries = plan(size, count);
        assert!(!entries.is_empty());
        assert!(entries.len() <= count.max(1));
        assert_eq!(entries[0].range.start, 0);
        assert_eq!(entries.last().unwrap().range.end, size - 1);
        for (i, pair) in entries.windows(2).enumerate() {
            assert_eq!(pair[0].index, i);
            assert_eq!(pair[0].range.end + 1, pair[1].range.start);
        }
        let total: u64 = entries.iter().map(|e| e.range.len()).sum();
        assert_eq!(total, size, "size={size} count={count}");
    }

    #[test]
    fn ten_thousand_bytes_in_four_chunks() {
        assert_eq!(
            ranges(10_000, 4),
            vec![(0, 2500), (2501, 5001), (5002, 7502), (7503, 9999)]
        );
    }

    #[test]
    fn single_chunk_covers_everything() {
        assert_eq!(ranges(1, 1), vec![(0, 0)]);
        assert_eq!(ranges(4096, 1), vec![(0, 4095)]);
        assert_eq!(ranges(4096, 0), vec![(0, 4095)]);
    }

    #[test]
    fn small_resource_yields_fewer_chunks() {
        assert_eq!(ranges(5, 4), vec![(0, 1), (2, 3), (4, 4)]);
        assert_eq!(ranges(3, 8), vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn overrun_is_clamped_to_last_byte() {
        // chunk = 2, each entry spans 3 bytes, the ninth already reaches byte 24.
        let entries = plan(25, 10);
        assert_eq!(entries.len(), 9);
        assert_eq!(entries[8].range, ByteRange { start: 24, end: 24 });
    }

    #[test]
    fn plans_cover_without_gaps_or_overlap() {
        for size in [1, 2, 7, 100, 999, 1024, 10_000, 65_537] {
            for count in 1..=17 {
                assert_covers(size, count);
            }
        }
    }

    #[test]
    fn empty_resource_has_no_chunks() {
        assert!(plan(0, 4).is_empty());
    }

    #[test]
    fn range_header_value() {
        let range = ByteRange { start: 2501, end: 5001 };
        assert_eq!(range.header_value(), "bytes=2501-5001");
        assert_eq!(range.len(), 2501);
        assert_eq!(range.to_string(), "[2501, 5001]");
    }
}
