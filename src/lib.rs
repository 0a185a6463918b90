//! Tools to load precomputed Wordle decision-tree strategies and check them
//! against every possible answer.
//!
//! A strategy is written as a column-aligned table (see [`strategy::table`]).
//! Once parsed into a [`Node`] tree it can be replayed against a target word
//! with [`play()`], under either normal or hard mode [`Rules`], and a whole
//! set of strategies can be swept over the answer list with a [`Harness`].
//! The [`analysis`] module uses the scorer alone to study the answer list.

use itertools::Itertools;
use thiserror::Error;

pub mod feedback;
pub use feedback::{Feedback, Grade};

pub mod words;
pub use words::{Dictionary, WordLists};

pub mod strategy;
pub use strategy::Node;

pub mod rules;
pub use rules::{Mode, Rules, Validator};

pub mod play;
pub use play::{play, Game, WordResult};

pub mod harness;
pub use harness::Harness;

pub mod perf;
pub use perf::{Perf, Summary};

pub mod config;
pub use config::{Config, StrategyConfig};

pub mod analysis;

/// Shorthand for results produced by `wordle_tree`.
pub type Result<T> = std::result::Result<T, WordleError>;

/// The errors that `wordle_tree` can produce.
#[derive(Debug, Error)]
pub enum WordleError {
    #[error("malformed strategy or feedback text")]
    Format {
        #[from]
        kind: FormatError,
    },

    #[error("strategy could not be played")]
    Play {
        #[from]
        kind: PlayError,
    },

    #[error("the test harness encountered an error")]
    Harness {
        #[from]
        kind: HarnessError,
    },

    #[error("general IO error")]
    Io(#[from] std::io::Error),

    #[error("trouble serializing or deserializing")]
    Serde(#[from] serde_json::Error),
}

/// Errors found while reading feedback strings or strategy tables.
///
/// Table errors carry the 1-based line number and the text of the line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("result string {0:?} must be of the form [GBY]^5")]
    ResultLength(String),

    #[error("error in result string {string:?} at index {index}: illegal char {found:?}")]
    ResultChar {
        string: String,
        index: usize,
        found: char,
    },

    #[error("result value {0} is larger than 242")]
    OutOfRange(u8),

    #[error("line {line_no} contains non-ASCII text: {line:?}")]
    NonAscii { line_no: usize, line: String },

    #[error("line {line_no} does not end with GGGGG: {line:?}")]
    NotAllGreen { line_no: usize, line: String },

    #[error("strategy guesses {word:?} on line {line_no}, which is not an approved word")]
    NotInDictionary { line_no: usize, word: String },

    #[error("found two initial guesses (second on line {line_no}: {line:?})")]
    TwoRoots { line_no: usize, line: String },

    #[error("found no parent for word {word:?} on line {line_no}: {line:?}")]
    NoParent {
        line_no: usize,
        word: String,
        line: String,
    },

    #[error("no valid result found for word {word:?} on line {line_no}: {line:?}")]
    NoResult {
        line_no: usize,
        word: String,
        line: String,
    },

    #[error("found result but no word at column {column} on line {line_no}: {line:?}")]
    ResultWithoutWord {
        line_no: usize,
        column: usize,
        line: String,
    },

    #[error("found duplicate results {feedback} for {word:?} on line {line_no}")]
    DuplicateResult {
        line_no: usize,
        word: String,
        feedback: Feedback,
    },

    #[error("found GGGGG with no guess to attach it to on line {line_no}: {line:?}")]
    WinWithoutGuess { line_no: usize, line: String },

    #[error("found duplicate GGGGG for {word:?} on line {line_no}")]
    DuplicateWin { line_no: usize, word: String },

    #[error("word list entry {word:?} on line {line_no} is not five ASCII letters")]
    NotAWord { line_no: usize, word: String },

    #[error("word {0:?} is not five ASCII letters")]
    BadWord(String),

    #[error("unknown mode {0:?}, expected \"normal\" or \"hard\"")]
    UnknownMode(String),

    #[error("strategy argument {0:?} must look like NAME=MODE:PATH")]
    StrategyArg(String),

    #[error("strategy table is empty")]
    Empty,
}

/// Errors that end a single playback of a strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    /// The strategy proposed a guess that the active rules reject.
    #[error(
        "bad guess {guess:?} when previous guesses are [{}]",
        .history.iter().join(", ")
    )]
    IllegalGuess {
        guess: String,
        history: Vec<WordResult>,
    },

    /// The strategy has no continuation for the feedback it received.
    #[error("result {feedback} invalid after guessing {word:?}")]
    Incomplete { word: String, feedback: Feedback },
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("no strategies have been added to the harness")]
    NoStrategiesAdded,

    #[error("no answers to test against")]
    NoAnswers,

    #[error("strategy {strategy} failed when guessing {target:?}: {kind}")]
    Play {
        strategy: String,
        target: String,
        kind: PlayError,
    },
}
