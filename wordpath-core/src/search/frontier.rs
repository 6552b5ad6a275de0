//! Priority ordering for the Dijkstra frontier.

use std::cmp::Ordering;

/// A tentative distance for a word waiting to be settled.
///
/// [`std::collections::BinaryHeap`] is a max-heap, so the ordering is
/// reversed: the entry with the smallest distance compares greatest, and
/// among equal distances the lexicographically smallest word wins.
#[derive(Clone, Copy, Debug)]
pub(super) struct FrontierEntry<'g> {
    pub(super) distance: f64,
    pub(super) word: &'g str,
}

impl PartialEq for FrontierEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry<'_> {}

impl Ord for FrontierEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.word.cmp(self.word))
    }
}

impl PartialOrd for FrontierEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
