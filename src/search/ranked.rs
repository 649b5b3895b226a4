//! Ranked candidate list: score, filter by threshold, sort.

use super::scorer::score;

/// Candidates scoring at or below this are never shown.
pub const MATCH_THRESHOLD: u8 = 70;

/// One candidate with its similarity score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate<T> {
    pub score: u8,
    pub item: T,
}

/// Candidates with score above [`MATCH_THRESHOLD`], best first.
///
/// Equal scores keep the order the candidates were discovered in, so the
/// same backing data always produces the same list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCandidates<T> {
    entries: Vec<ScoredCandidate<T>>,
}

impl<T> RankedCandidates<T> {
    /// Score every item's name against `term` and keep the ones above threshold.
    pub fn rank<I, F>(term: &str, items: I, name: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> &str,
    {
        let scored = items.into_iter().map(|item| ScoredCandidate {
            score: score(term, name(&item)),
            item,
        });
        Self::from_scored(scored)
    }

    /// Build from already-scored candidates.
    pub fn from_scored<I>(scored: I) -> Self
    where
        I: IntoIterator<Item = ScoredCandidate<T>>,
    {
        let mut entries: Vec<_> = scored
            .into_iter()
            .filter(|c| c.score > MATCH_THRESHOLD)
            .collect();

        // `sort_by` is stable: ties stay in discovery order.
        entries.sort_by(|a, b| b.score.cmp(&a.score));

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoredCandidate<T>> {
        self.entries.iter()
    }

    /// Drop the scores, keeping the ranked order.
    pub fn into_items(self) -> Vec<T> {
        self.entries.into_iter().map(|c| c.item).collect()
    }
}

impl<T> IntoIterator for RankedCandidates<T> {
    type Item = ScoredCandidate<T>;
    type IntoIter = std::vec::IntoIter<ScoredCandidate<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
