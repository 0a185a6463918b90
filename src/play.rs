//! Playing a strategy against a target word.

use std::fmt::Display;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::{feedback::Feedback, rules::Validator, strategy::Strategy, PlayError};

/// A guess that was played and the feedback it received.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordResult {
    word: String,
    feedback: Feedback,
}

impl WordResult {
    /// Pairs a guess with its feedback.
    pub fn new(word: impl Into<String>, feedback: Feedback) -> Self {
        WordResult {
            word: word.into(),
            feedback,
        }
    }

    /// The word that was guessed.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The feedback the guess received.
    pub fn feedback(&self) -> Feedback {
        self.feedback
    }
}

impl Display for WordResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.word, self.feedback)
    }
}

/// A finished, won game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Game {
    target: String,
    history: Vec<WordResult>,
}

impl Game {
    /// The word that was being guessed.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Every guess in order, ending with the winning one.
    pub fn history(&self) -> &[WordResult] {
        &self.history
    }

    /// The number of guesses it took to win.
    pub fn guesses(&self) -> usize {
        self.history.len()
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} in {}:", self.target, self.guesses())?;
        for step in &self.history {
            write!(f, " {}", step.word())?;
        }
        Ok(())
    }
}

/// Plays `strategy` until it guesses `target`.
///
/// Each guess is checked with `validator` against the guesses before it.
/// Playing stops at the first guess the validator rejects, and at the first
/// feedback the strategy has no plan for; both mean the strategy itself is
/// broken, so neither is retried.
///
/// `target` must be five letters, like every dictionary word.
///
/// # Examples
///
/// ```rust
/// use wordle_tree::{play, strategy::table, Dictionary, Mode, PlayError, Rules};
///
/// let dictionary = Dictionary::from_words(["CRANE", "SLATE"]);
/// let tree = table::parse("CRANE GGGGG", &dictionary)?;
/// let rules = Rules::new(&dictionary, Mode::Normal);
///
/// assert_eq!(play(&tree, "CRANE", &rules)?.guesses(), 1);
/// assert!(matches!(
///     play(&tree, "SLATE", &rules),
///     Err(PlayError::Incomplete { .. })
/// ));
/// #
/// # Ok::<_, wordle_tree::WordleError>(())
/// ```
pub fn play<S, V>(strategy: &S, target: &str, validator: &V) -> Result<Game, PlayError>
where
    S: Strategy,
    V: Validator + ?Sized,
{
    let mut history: Vec<WordResult> = Vec::new();
    let mut current = strategy;

    loop {
        let guess = current.guess(&history);
        if !validator.is_valid(guess, &history) {
            return Err(PlayError::IllegalGuess {
                guess: guess.to_string(),
                history,
            });
        }

        let feedback = Feedback::score(target, guess);
        history.push(WordResult::new(guess, feedback));
        if feedback.is_win() {
            trace!("solved {} in {} guesses", target, history.len());
            return Ok(Game {
                target: target.to_string(),
                history,
            });
        }

        current = current
            .next(feedback)
            .ok_or_else(|| PlayError::Incomplete {
                word: guess.to_string(),
                feedback,
            })?;
    }
}
