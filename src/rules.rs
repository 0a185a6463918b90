//! Deciding whether a guess is allowed.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{feedback::Grade, play::WordResult, words::Dictionary, FormatError};

/// Decides whether a guess is legal given the guesses made before it.
///
/// A rejected guess is an ordinary outcome, not an error. Any
/// `Fn(&str, &[WordResult]) -> bool` is a validator, which is handy in tests.
pub trait Validator {
    /// Returns true if `guess` may be played after `history`.
    fn is_valid(&self, guess: &str, history: &[WordResult]) -> bool;
}

impl<F> Validator for F
where
    F: Fn(&str, &[WordResult]) -> bool,
{
    fn is_valid(&self, guess: &str, history: &[WordResult]) -> bool {
        self(guess, history)
    }
}

/// The two sets of Wordle rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Any dictionary word may be guessed.
    Normal,

    /// Every guess must use all the greens and yellows revealed so far.
    Hard,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Normal
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Normal => write!(f, "normal"),
            Mode::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Mode {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" | "easy" => Ok(Mode::Normal),
            "hard" => Ok(Mode::Hard),
            other => Err(FormatError::UnknownMode(other.to_string())),
        }
    }
}

/// A [`Mode`] bound to the dictionary it checks words against.
///
/// # Examples
///
/// ```rust
/// use wordle_tree::{Dictionary, Mode, Rules, Validator, WordResult};
///
/// let dictionary = Dictionary::from_words(["CRANE", "CLERK", "COUNT", "SLATE"]);
/// let history = [WordResult::new("CRANE", "GBBBB".parse()?)];
///
/// let hard = Rules::new(&dictionary, Mode::Hard);
/// assert!(hard.is_valid("COUNT", &history));
/// assert!(hard.is_valid("CLERK", &history));
/// assert!(!hard.is_valid("SLATE", &history));
///
/// let normal = Rules::new(&dictionary, Mode::Normal);
/// assert!(normal.is_valid("SLATE", &history));
/// #
/// # Ok::<_, wordle_tree::FormatError>(())
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Rules<'d> {
    dictionary: &'d Dictionary,
    mode: Mode,
}

impl<'d> Rules<'d> {
    /// Creates rules for `mode` over `dictionary`.
    pub fn new(dictionary: &'d Dictionary, mode: Mode) -> Self {
        Rules { dictionary, mode }
    }

    /// The mode these rules enforce.
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl<'d> Validator for Rules<'d> {
    fn is_valid(&self, guess: &str, history: &[WordResult]) -> bool {
        match self.mode {
            Mode::Normal => valid_normal(self.dictionary, guess),
            Mode::Hard => valid_hard(self.dictionary, guess, history),
        }
    }
}

/// Normal mode: the guess only has to be a dictionary word.
pub fn valid_normal(dictionary: &Dictionary, guess: &str) -> bool {
    dictionary.contains(guess)
}

/// Hard mode: the guess must be a dictionary word that honours every earlier
/// feedback.
///
/// For each earlier guess, every green letter must be repeated in the same
/// position. Then every yellow letter must appear in some position of the new
/// guess not already used by a green or another yellow from that same
/// feedback. Positions are claimed left to right.
pub fn valid_hard(dictionary: &Dictionary, guess: &str, history: &[WordResult]) -> bool {
    if !dictionary.contains(guess) {
        return false;
    }
    let guess = guess.as_bytes();
    if guess.len() != 5 {
        return false;
    }

    history.iter().all(|previous| {
        let word = previous.word().as_bytes();
        let letters = previous.feedback().letters();
        let mut used = [false; 5];

        for (i, &grade) in letters.iter().enumerate() {
            if grade == Grade::Green {
                if guess[i] != word[i] {
                    return false;
                }
                used[i] = true;
            }
        }

        for (i, &grade) in letters.iter().enumerate() {
            if grade != Grade::Yellow {
                continue;
            }
            match (0..5).find(|&j| !used[j] && guess[j] == word[i]) {
                Some(j) => used[j] = true,
                None => return false,
            }
        }

        true
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::feedback::Feedback;

    fn dictionary() -> Dictionary {
        Dictionary::from_words([
            "crane", "clerk", "count", "slate", "spill", "alloy", "limes", "spilt", "level",
            "petal", "lilac", "sober", "spool", "soaks", "bolts", "llama",
        ])
    }

    fn history(guesses: &[(&str, &str)]) -> Vec<WordResult> {
        guesses
            .iter()
            .map(|&(w, r)| WordResult::new(w, r.parse().unwrap()))
            .collect()
    }

    #[test]
    fn normal_only_checks_dictionary() {
        let dictionary = dictionary();
        let rules = Rules::new(&dictionary, Mode::Normal);
        let prev = history(&[("crane", "GBBBB")]);
        assert!(rules.is_valid("slate", &prev));
        assert!(!rules.is_valid("xxxxx", &[]));
    }

    #[test]
    fn hard_rejects_unknown_words() {
        let dictionary = dictionary();
        assert!(!valid_hard(&dictionary, "xxxxx", &[]));
        assert!(valid_hard(&dictionary, "slate", &[]));
    }

    #[test]
    fn hard_requires_greens_in_place() {
        let dictionary = dictionary();
        let prev = history(&[("crane", "GBBBB")]);
        assert!(valid_hard(&dictionary, "count", &prev));
        assert!(valid_hard(&dictionary, "clerk", &prev));
        assert!(!valid_hard(&dictionary, "slate", &prev));

        let prev = history(&[("crane", "BGBBB")]);
        assert!(!valid_hard(&dictionary, "clerk", &prev));
    }

    #[test]
    fn hard_requires_yellows_somewhere() {
        let dictionary = dictionary();
        // The L is in the word somewhere.
        let prev = history(&[("lilac", "YBBBB")]);
        assert!(valid_hard(&dictionary, "alloy", &prev));
        assert!(valid_hard(&dictionary, "lilac", &prev));
        assert!(!valid_hard(&dictionary, "crane", &prev));
    }

    #[test]
    fn hard_counts_repeated_yellows() {
        let dictionary = dictionary();
        // Two yellow Ls need two Ls in the next guess.
        let prev = history(&[("alloy", "BYYBB")]);
        assert!(valid_hard(&dictionary, "spill", &prev));
        assert!(valid_hard(&dictionary, "level", &prev));
        assert!(!valid_hard(&dictionary, "limes", &prev));
        assert!(!valid_hard(&dictionary, "petal", &prev));
    }

    #[test]
    fn hard_green_positions_cannot_satisfy_yellows() {
        let dictionary = dictionary();
        // The first L is green, so the yellow L needs a second one.
        let prev = history(&[("llama", "GYBBB")]);
        assert!(valid_hard(&dictionary, "lilac", &prev));
        assert!(!valid_hard(&dictionary, "limes", &prev));
    }

    #[test]
    fn hard_checks_every_previous_guess() {
        let dictionary = dictionary();
        let prev = history(&[("sober", "GBBBB"), ("spool", "GBBBY")]);
        assert!(valid_hard(&dictionary, "spill", &prev));
        assert!(valid_hard(&dictionary, "spilt", &prev));
        assert!(!valid_hard(&dictionary, "soaks", &prev));
        assert!(!valid_hard(&dictionary, "slate", &[WordResult::new("crane", Feedback::WIN)]));
    }

    #[test]
    fn closures_are_validators() {
        let only_crane = |guess: &str, _: &[WordResult]| guess == "crane";
        assert!(only_crane.is_valid("crane", &[]));
        assert!(!only_crane.is_valid("slate", &[]));
    }

    #[test]
    fn mode_from_str() {
        assert_eq!("hard".parse::<Mode>(), Ok(Mode::Hard));
        assert_eq!("normal".parse::<Mode>(), Ok(Mode::Normal));
        assert!("medium".parse::<Mode>().is_err());
        assert_eq!(Mode::Hard.to_string(), "hard");
    }
}
