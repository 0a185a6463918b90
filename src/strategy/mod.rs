//! Decision-tree strategies.
//!
//! A strategy is a tree of [`Node`]s. Each node names the word to guess and
//! maps every feedback it is prepared for to the node that handles it. The
//! all-green feedback maps to no node at all: the game is over.
//!
//! Trees are read from the column-aligned table format described in
//! [`table`], and print back to the same format through [`Display`].

use std::{collections::BTreeMap, fmt::Display};

use crate::{feedback::Feedback, play::WordResult};

pub mod table;

/// Something that can choose guesses while a game is played.
///
/// [`play()`](crate::play()) drives any implementer; [`Node`] is the one
/// this crate provides.
pub trait Strategy {
    /// The word to guess now, given the guesses made so far.
    fn guess(&self, history: &[WordResult]) -> &str;

    /// Moves on after `feedback` was received for [`guess()`](Strategy::guess()).
    ///
    /// Returns `None` when the strategy has no plan for that feedback.
    fn next(&self, feedback: Feedback) -> Option<&Self>;
}

/// One guess in a strategy tree, and what to do after each feedback.
///
/// The tree is built once by the parser and never changes afterwards; each
/// child has exactly one parent.
///
/// # Examples
///
/// ```rust
/// use wordle_tree::{strategy::table, Dictionary, Feedback};
///
/// let dictionary = Dictionary::from_words(["CRANE"]);
/// let tree = table::parse("CRANE GGGGG", &dictionary)?;
///
/// assert_eq!(tree.word(), "CRANE");
/// assert!(tree.wins_on(Feedback::WIN));
/// assert_eq!(tree.to_string(), "CRANE GGGGG1");
/// #
/// # Ok::<_, wordle_tree::FormatError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node {
    word: String,
    children: BTreeMap<Feedback, Option<Node>>,
}

impl Node {
    pub(crate) fn new(word: impl Into<String>) -> Self {
        Node {
            word: word.into(),
            children: BTreeMap::new(),
        }
    }

    /// The word guessed at this node.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The node that follows `feedback`, if the strategy continues there.
    pub fn child(&self, feedback: Feedback) -> Option<&Node> {
        self.children.get(&feedback).and_then(Option::as_ref)
    }

    /// Returns true if this node ends the game on `feedback`.
    pub fn wins_on(&self, feedback: Feedback) -> bool {
        matches!(self.children.get(&feedback), Some(None))
    }

    /// Iterates over the handled feedback in ascending order, with the node
    /// each one leads to (`None` for a win).
    pub fn children(&self) -> impl Iterator<Item = (Feedback, Option<&Node>)> {
        self.children.iter().map(|(&f, child)| (f, child.as_ref()))
    }

    pub(crate) fn has_child(&self, feedback: Feedback) -> bool {
        self.children.contains_key(&feedback)
    }

    pub(crate) fn insert(&mut self, feedback: Feedback, child: Option<Node>) {
        let previous = self.children.insert(feedback, child);
        debug_assert!(previous.is_none(), "parser must reject duplicate results");
    }

    /// The number of nodes in the tree rooted here.
    pub fn num_nodes(&self) -> usize {
        1 + self
            .children
            .values()
            .flatten()
            .map(Node::num_nodes)
            .sum::<usize>()
    }

    /// The number of winning leaves, which is the number of targets the tree
    /// can solve.
    pub fn num_wins(&self) -> usize {
        self.children
            .values()
            .map(|child| child.as_ref().map_or(1, Node::num_wins))
            .sum()
    }

    /// The largest number of guesses any path through the tree makes.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .values()
            .flatten()
            .map(Node::depth)
            .max()
            .unwrap_or(0)
    }

    fn format(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        write!(f, "{} ", self.word)?;
        let indent = table::column_start(2 * depth + 1);
        for (i, (feedback, child)) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, "\n{:indent$}", "")?;
            }
            write!(f, "{}", feedback)?;
            if let Some(count) = std::char::from_digit(depth as u32 + 1, 10) {
                write!(f, "{}", count)?;
            }
            if let Some(child) = child {
                write!(f, " ")?;
                child.format(f, depth + 1)?;
            }
        }
        Ok(())
    }
}

impl Strategy for Node {
    fn guess(&self, _history: &[WordResult]) -> &str {
        &self.word
    }

    fn next(&self, feedback: Feedback) -> Option<&Self> {
        self.child(feedback)
    }
}

impl Display for Node {
    /// Writes the tree as a strategy table, children in ascending feedback
    /// order and every result tagged with its guess number.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.format(f, 0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fb(s: &str) -> Feedback {
        s.parse().unwrap()
    }

    fn sample() -> Node {
        let mut moist = Node::new("MOIST");
        moist.insert(Feedback::WIN, None);

        let mut slate = Node::new("SLATE");
        slate.insert(fb("BBBBB"), Some(moist));
        slate.insert(Feedback::WIN, None);

        let mut root = Node::new("CRANE");
        root.insert(Feedback::WIN, None);
        root.insert(fb("BBGBY"), Some(slate));
        root
    }

    #[test]
    fn statistics() {
        let root = sample();
        assert_eq!(root.num_nodes(), 3);
        assert_eq!(root.num_wins(), 3);
        assert_eq!(root.depth(), 3);
    }

    #[test]
    fn lookup() {
        let root = sample();
        assert_eq!(root.child(fb("BBGBY")).map(Node::word), Some("SLATE"));
        assert!(root.child(Feedback::WIN).is_none());
        assert!(root.wins_on(Feedback::WIN));
        assert!(!root.wins_on(fb("BBBBB")));
        assert!(root.next(fb("BBBBB")).is_none());
        assert_eq!(root.guess(&[]), "CRANE");
    }

    #[test]
    fn children_are_ordered_by_feedback() {
        let root = sample();
        let order: Vec<_> = root.children().map(|(f, _)| f).collect();
        assert_eq!(order, vec![fb("BBGBY"), Feedback::WIN]);
    }

    #[test]
    fn prints_table() {
        let expected = "\
CRANE BBGBY1 SLATE BBBBB2 MOIST GGGGG3
                   GGGGG2
      GGGGG1";
        assert_eq!(sample().to_string(), expected);
    }
}
