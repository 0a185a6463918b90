//! Scorer-only analysis of the answer list.
//!
//! For every answer, the set of feedback it can produce over all dictionary
//! guesses says how hard it is to pin down. Answers with few distinct
//! feedbacks are hard; pairs with similar sets are easily confused.

use std::{cmp::Ordering, fmt::Display};

use log::debug;
use rayon::prelude::*;

use crate::{feedback::Feedback, words::WordLists};

/// A set of [`Feedback`] values, one bit per encoded value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FeedbackSet {
    bits: [u64; 4],
}

impl FeedbackSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, feedback: Feedback) {
        let v = feedback.value() as usize;
        self.bits[v / 64] |= 1 << (v % 64);
    }

    pub fn contains(&self, feedback: Feedback) -> bool {
        let v = feedback.value() as usize;
        self.bits[v / 64] & (1 << (v % 64)) != 0
    }

    pub fn len(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// The number of values in both sets.
    pub fn intersection_len(&self, other: &FeedbackSet) -> usize {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    /// The number of values in either set.
    pub fn union_len(&self, other: &FeedbackSet) -> usize {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .map(|(a, b)| (a | b).count_ones() as usize)
            .sum()
    }

    /// Iterates over the members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Feedback> + '_ {
        Feedback::all().filter(move |&f| self.contains(f))
    }
}

impl FromIterator<Feedback> for FeedbackSet {
    fn from_iter<I: IntoIterator<Item = Feedback>>(iter: I) -> Self {
        let mut set = FeedbackSet::new();
        for feedback in iter {
            set.insert(feedback);
        }
        set
    }
}

/// Two answers and how much their reachable feedback overlaps.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Similarity<'w> {
    pub first: &'w str,
    pub second: &'w str,
    pub intersection: usize,
    pub union: usize,
}

impl Similarity<'_> {
    /// Intersection over union.
    pub fn ratio(&self) -> f64 {
        self.intersection as f64 / self.union as f64
    }
}

impl Display for Similarity<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}/{}",
            self.first, self.second, self.intersection, self.union
        )
    }
}

/// The reachable feedback of every answer, in answer order.
///
/// # Examples
///
/// ```rust
/// use wordle_tree::{analysis::AnswerSets, Dictionary, WordLists};
///
/// let lists = WordLists::new(
///     Dictionary::from_words(["MOIST"]),
///     vec!["CRANE".to_string(), "SLATE".to_string()],
/// )?;
/// let sets = AnswerSets::new(&lists);
///
/// assert_eq!(sets.worst(), Some(("CRANE", 3)));
/// assert_eq!(sets.most_similar(1)[0].to_string(), "CRANE SLATE 2/4");
/// #
/// # Ok::<_, wordle_tree::FormatError>(())
/// ```
#[derive(Clone, Debug)]
pub struct AnswerSets<'w> {
    sets: Vec<(&'w str, FeedbackSet)>,
}

impl<'w> AnswerSets<'w> {
    /// Scores every dictionary word against every answer.
    pub fn new(words: &'w WordLists) -> Self {
        let guesses: Vec<&str> = words.dictionary().iter().collect();
        let sets: Vec<_> = words
            .answers()
            .par_iter()
            .map(|target| {
                let set = guesses
                    .iter()
                    .map(|guess| Feedback::score(target, guess))
                    .collect();
                (target.as_str(), set)
            })
            .collect();
        debug!(
            "collected feedback sets for {} answers over {} guesses",
            sets.len(),
            guesses.len()
        );
        AnswerSets { sets }
    }

    /// The reachable feedback of `answer`, if it is an answer.
    pub fn get(&self, answer: &str) -> Option<&FeedbackSet> {
        self.sets
            .iter()
            .find(|(word, _)| *word == answer)
            .map(|(_, set)| set)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'w str, &FeedbackSet)> {
        self.sets.iter().map(|(word, set)| (*word, set))
    }

    /// The answer with the fewest distinct feedbacks, and that number.
    ///
    /// Ties go to the earlier answer.
    pub fn worst(&self) -> Option<(&'w str, usize)> {
        self.sets
            .iter()
            .map(|(word, set)| (*word, set.len()))
            .min_by_key(|&(_, len)| len)
    }

    /// The `n` answer pairs whose feedback sets overlap the most, by
    /// intersection over union.
    ///
    /// Equal ratios keep answer order.
    pub fn most_similar(&self, n: usize) -> Vec<Similarity<'w>> {
        let sets = &self.sets;
        let mut best: Vec<(usize, usize, Similarity<'w>)> = (0..sets.len())
            .into_par_iter()
            .flat_map_iter(|i| {
                let mut row: Vec<_> = (i + 1..sets.len())
                    .map(|j| (i, j, similarity(&sets[i], &sets[j])))
                    .collect();
                row.sort_by(by_similarity);
                row.truncate(n);
                row
            })
            .collect();

        best.par_sort_by(by_similarity);
        best.into_iter().take(n).map(|(_, _, s)| s).collect()
    }

    /// Answers whose feedback sets hold every one of `wants`, in answer
    /// order.
    pub fn covering(&self, wants: &[Feedback]) -> Vec<&'w str> {
        self.sets
            .iter()
            .filter(|(_, set)| wants.iter().all(|&f| set.contains(f)))
            .map(|(word, _)| *word)
            .collect()
    }
}

fn similarity<'w>(a: &(&'w str, FeedbackSet), b: &(&'w str, FeedbackSet)) -> Similarity<'w> {
    Similarity {
        first: a.0,
        second: b.0,
        intersection: a.1.intersection_len(&b.1),
        union: a.1.union_len(&b.1),
    }
}

/// Higher ratio first, then earlier pair.
fn by_similarity(a: &(usize, usize, Similarity), b: &(usize, usize, Similarity)) -> Ordering {
    let lhs = b.2.intersection * a.2.union;
    let rhs = a.2.intersection * b.2.union;
    lhs.cmp(&rhs).then_with(|| (a.0, a.1).cmp(&(b.0, b.1)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::words::Dictionary;

    fn fb(s: &str) -> Feedback {
        s.parse().unwrap()
    }

    fn lists() -> WordLists {
        WordLists::new(
            Dictionary::from_words(["FOIST", "BUMPY"]),
            ["CRANE", "SLATE", "MOIST"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn set_operations() {
        let a: FeedbackSet = [Feedback::WIN, fb("BBBBB")].into_iter().collect();
        let b: FeedbackSet = [Feedback::WIN, fb("YYYYY")].into_iter().collect();
        assert_eq!(a.len(), 2);
        assert!(a.contains(Feedback::WIN));
        assert!(!a.contains(fb("YYYYY")));
        assert!(b.contains(fb("YYYYY")));
        assert_eq!(a.intersection_len(&b), 1);
        assert_eq!(a.union_len(&b), 3);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![fb("BBBBB"), Feedback::WIN]);
        assert!(FeedbackSet::new().is_empty());
    }

    #[test]
    fn reachable_feedback() {
        let lists = lists();
        let sets = AnswerSets::new(&lists);

        let crane: Vec<_> = sets.get("CRANE").unwrap().iter().collect();
        assert_eq!(crane, vec![fb("BBBBB"), fb("BBGBG"), Feedback::WIN]);
        assert_eq!(sets.get("SLATE").map(FeedbackSet::len), Some(4));
        assert_eq!(sets.get("MOIST").map(FeedbackSet::len), Some(5));
        assert!(sets.get("FOIST").is_none());
        assert_eq!(sets.worst(), Some(("CRANE", 3)));
    }

    #[test]
    fn most_similar_pairs() {
        let lists = lists();
        let sets = AnswerSets::new(&lists);

        let pairs: Vec<_> = sets
            .most_similar(10)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            pairs,
            vec!["CRANE SLATE 3/4", "CRANE MOIST 2/6", "SLATE MOIST 2/7"]
        );

        let top = sets.most_similar(1);
        assert_eq!(top.len(), 1);
        assert!((top[0].ratio() - 0.75).abs() < f64::EPSILON);
        assert!(sets.most_similar(0).is_empty());
    }

    #[test]
    fn answers_covering_feedback() {
        let lists = lists();
        let sets = AnswerSets::new(&lists);

        assert_eq!(sets.covering(&[fb("BBYBB")]), vec!["MOIST"]);
        assert_eq!(
            sets.covering(&[fb("BBBBB"), fb("BBGBG")]),
            vec!["CRANE", "SLATE"]
        );
        assert_eq!(sets.covering(&[]), vec!["CRANE", "SLATE", "MOIST"]);
        assert!(sets.covering(&[fb("YYYYY")]).is_empty());
    }
}
