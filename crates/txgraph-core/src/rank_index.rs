//! Participants ranked by degree.

use crate::event::ParticipantId;
use crate::median::{Degree, Median};
use crate::rank_tree::{Iter, RankTree};

/// One participant at one degree. Sorts by degree, then identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedParticipant {
    pub degree: Degree,
    pub participant: ParticipantId,
}

impl RankedParticipant {
    pub fn new(degree: Degree, participant: ParticipantId) -> Self {
        Self {
            degree,
            participant,
        }
    }
}

/// Ordered set of `(degree, participant)` pairs with O(log n) rank lookup.
///
/// The degree is part of the key, so an entry can never be updated in
/// place. [`crate::DegreeRegistry`] owns the only code path that re-keys.
#[derive(Debug, Default)]
pub struct DegreeRankIndex {
    tree: RankTree<RankedParticipant>,
}

impl DegreeRankIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            tree: RankTree::new(),
        }
    }

    pub(crate) fn insert(&mut self, degree: Degree, participant: ParticipantId) -> bool {
        self.tree.insert(RankedParticipant::new(degree, participant))
    }

    pub(crate) fn remove(&mut self, degree: Degree, participant: &ParticipantId) -> bool {
        let key = RankedParticipant::new(degree, participant.clone());
        self.tree.remove(&key).is_some()
    }

    /// Entry at 0-indexed `rank` in ascending `(degree, participant)` order.
    pub fn at(&self, rank: usize) -> Option<&RankedParticipant> {
        self.tree.select(rank)
    }

    /// Degree at 0-indexed `rank`.
    pub fn degree_at(&self, rank: usize) -> Option<Degree> {
        self.at(rank).map(|entry| entry.degree)
    }

    /// Median degree.
    ///
    /// - n = 0: zero
    /// - n odd: degree at rank n/2
    /// - n even: mean of the degrees at ranks n/2 - 1 and n/2
    pub fn median(&self) -> Median {
        let n = self.len();
        if n == 0 {
            return Median::ZERO;
        }
        let upper = self.degree_at(n / 2).unwrap_or_default();
        if n % 2 == 1 {
            return Median::single(upper);
        }
        let lower = self.degree_at(n / 2 - 1).unwrap_or_default();
        Median::between(lower, upper)
    }

    /// Entries in ascending order.
    pub fn iter(&self) -> Iter<'_, RankedParticipant> {
        self.tree.iter()
    }

    /// Number of ranked participants.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.tree.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn index_of(entries: &[(Degree, &str)]) -> DegreeRankIndex {
        let mut index = DegreeRankIndex::new();
        for (degree, name) in entries {
            index.insert(*degree, ParticipantId::new(name));
        }
        index
    }

    #[test]
    fn empty_median_is_zero() {
        assert_eq!(DegreeRankIndex::new().median(), Median::ZERO);
    }

    #[test]
    fn odd_median_takes_middle() {
        let index = index_of(&[(2, "c"), (1, "d"), (1, "a")]);
        assert_eq!(index.median(), Median::single(1));
        assert_eq!(index.at(1).map(|e| e.participant.as_str()), Some("d"));
    }

    #[test]
    fn even_median_averages_middle_pair() {
        let index = index_of(&[(1, "a"), (1, "b"), (2, "c"), (5, "d")]);
        assert_eq!(index.median(), Median::between(1, 2));
    }

    #[test]
    fn ties_break_by_identifier() {
        let index = index_of(&[(3, "z"), (3, "a"), (3, "m")]);
        let names: Vec<_> = index.iter().map(|e| e.participant.as_str()).collect();
        assert_eq!(names, vec!["a", "m", "z"]);
    }

    #[test]
    fn remove_needs_matching_degree() {
        let mut index = index_of(&[(2, "a")]);
        assert!(!index.remove(1, &ParticipantId::new("a")));
        assert!(index.remove(2, &ParticipantId::new("a")));
        assert!(index.is_empty());
    }

    proptest! {
        #[test]
        fn median_matches_sorted_definition(degrees in prop::collection::vec(1u32..20, 0..60)) {
            let mut index = DegreeRankIndex::new();
            for (i, degree) in degrees.iter().enumerate() {
                index.insert(*degree, ParticipantId::new(format!("p{i:03}")));
            }

            let mut sorted = degrees.clone();
            sorted.sort_unstable();
            let n = sorted.len();
            let expected = if n == 0 {
                0.0
            } else if n % 2 == 1 {
                f64::from(sorted[n / 2])
            } else {
                (f64::from(sorted[n / 2 - 1]) + f64::from(sorted[n / 2])) / 2.0
            };
            prop_assert_eq!(index.median().value(), expected);
        }
    }
}
