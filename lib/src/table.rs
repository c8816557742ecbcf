use std::ops::Range;

use bitvec::vec::BitVec;

/// A half-open interval `[start, end)` of byte positions in an input string.
///
/// The empty span at position `i` is `[i, i)`. A span's `end` is the
/// position right after its last byte, so a span covering the whole of an
/// input of length `n` is `[0, n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    pub(crate) fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Position of the span's first byte.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Position right after the span's last byte.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// The span as a [`Range`], usable for slicing the input.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// True for empty spans (`start == end`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of bytes covered by the span.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// A boolean grid recording which spans of an input a pattern node matches.
///
/// For an input of length `len` the table has one entry per pair
/// `(begin, end)` with `0 <= begin, end <= len`, stored row-major in a
/// bitmap of `(len + 1) * (len + 1)` bits. Only entries with
/// `begin <= end` are ever set; `get(begin, end)` is true iff the owning
/// node matches exactly the bytes `begin..end` of the input most recently
/// passed to the node's `locate`.
///
/// A table is valid for one input only. Re-locating a pattern replaces the
/// bitmap with a fresh one sized for the new input rather than clearing the
/// old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTable {
    len: usize,
    bits: BitVec,
}

impl MatchTable {
    pub(crate) fn new(len: usize) -> Self {
        Self { len, bits: BitVec::repeat(false, (len + 1) * (len + 1)) }
    }

    /// Replaces the table with an all-false table for an input of `len`
    /// bytes.
    pub(crate) fn reset(&mut self, len: usize) {
        *self = Self::new(len);
    }

    /// Length of the input the table was built for.
    #[inline]
    pub fn haystack_len(&self) -> usize {
        self.len
    }

    #[inline]
    fn index(&self, begin: usize, end: usize) -> usize {
        begin * (self.len + 1) + end
    }

    /// Returns true if the span `[begin, end)` is marked as a match.
    ///
    /// # Panics
    ///
    /// If `begin > end` or `end` exceeds the input length.
    #[inline]
    pub fn get(&self, begin: usize, end: usize) -> bool {
        assert!(
            begin <= end && end <= self.len,
            "span ({},{}) out of range for input of length {}",
            begin,
            end,
            self.len
        );
        self.bits[self.index(begin, end)]
    }

    #[inline]
    pub(crate) fn set(&mut self, begin: usize, end: usize) {
        debug_assert!(begin <= end && end <= self.len);
        let index = self.index(begin, end);
        self.bits.set(index, true);
    }

    /// True if any span at all is marked.
    #[inline]
    pub fn any(&self) -> bool {
        self.bits.any()
    }

    /// Number of marked spans.
    pub(crate) fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Marks every span marked in `other`. Both tables must have been built
    /// for the same input length.
    pub(crate) fn merge(&mut self, other: &MatchTable) {
        debug_assert_eq!(self.len, other.len);
        for index in other.bits.iter_ones() {
            self.bits.set(index, true);
        }
    }

    /// Marks the empty span at every position.
    pub(crate) fn mark_empty_spans(&mut self) {
        for pos in 0..=self.len {
            self.set(pos, pos);
        }
    }

    /// Transitive closure over span concatenation: wherever `[begin, k)`
    /// and `[k, end)` are both marked, `[begin, end)` becomes marked too.
    /// Passes repeat until one of them adds nothing new.
    pub(crate) fn close_transitive(&mut self) {
        loop {
            let mut changed = false;
            for begin in 0..=self.len {
                for end in begin..=self.len {
                    if self.get(begin, end) {
                        continue;
                    }
                    for k in begin..=end {
                        if self.get(begin, k) && self.get(k, end) {
                            self.set(begin, end);
                            changed = true;
                            break;
                        }
                    }
                }
            }
            if !changed {
                break;
            }
        }
    }

    /// Iterator over all marked spans, ordered by start position and then
    /// by end position.
    pub fn spans(&self) -> impl Iterator<Item = Span> + '_ {
        let row = self.len + 1;
        self.bits.iter_ones().map(move |index| Span::new(index / row, index % row))
    }
}

impl Default for MatchTable {
    fn default() -> Self {
        Self::new(0)
    }
}
