use std::hash::Hash;
use std::ops::Range;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Positions of one value, ascending. Most values occur only a few times.
pub type Positions = SmallVec<[usize; 4]>;

/// Maps each value of a sequence to the positions it occupies, restricted to
/// a range of that sequence.
#[derive(Debug)]
pub struct EquivalenceIndex<'a, T> {
    positions: FxHashMap<&'a T, Positions>,
}

impl<'a, T: Eq + Hash> EquivalenceIndex<'a, T> {
    /// Indexes `seq[range]`. The range is clamped to the sequence, so an empty
    /// or out-of-bounds range gives an empty index.
    pub fn build(seq: &'a [T], range: Range<usize>) -> Self {
        let end = range.end.min(seq.len());
        let start = range.start.min(end);
        let mut positions: FxHashMap<&'a T, Positions> = FxHashMap::default();
        for (i, value) in seq[start..end].iter().enumerate() {
            positions.entry(value).or_default().push(start + i);
        }
        EquivalenceIndex { positions }
    }

    /// Ascending positions holding `value`; empty when it does not occur.
    pub fn positions(&self, value: &T) -> &[usize] {
        match self.positions.get(value) {
            Some(positions) => positions,
            None => &[],
        }
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
