//! Wordle feedback: scoring a guess and encoding the result.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::FormatError;

/// The grade given to a single letter of a guess.
///
/// The discriminants are the base-3 digits used by [`Feedback`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// The letter does not appear in any unmatched position of the target.
    Black = 0,

    /// The letter is in the correct position.
    Green = 1,

    /// The letter appears elsewhere in the target.
    Yellow = 2,
}

impl Grade {
    fn from_digit(digit: u8) -> Self {
        match digit {
            0 => Grade::Black,
            1 => Grade::Green,
            2 => Grade::Yellow,
            _ => unreachable!("{} is not a base-3 digit", digit),
        }
    }

    /// The character used for this grade in feedback strings.
    pub fn to_char(self) -> char {
        match self {
            Grade::Black => 'B',
            Grade::Green => 'G',
            Grade::Yellow => 'Y',
        }
    }

    /// Reads a grade from its feedback-string character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'B' => Some(Grade::Black),
            'G' => Some(Grade::Green),
            'Y' => Some(Grade::Yellow),
            _ => None,
        }
    }
}

/// The feedback for a whole guess: five [`Grade`]s packed into one byte.
///
/// The grades are stored as a five digit base-3 number with the first letter
/// as the most significant digit, so every valid value is in `0..=242` and
/// all greens is always 121.
///
/// # Examples
///
/// ```rust
/// use wordle_tree::feedback::{Feedback, Grade::*};
///
/// let feedback: Feedback = "GBYBB".parse()?;
/// assert_eq!(feedback.letters(), [Green, Black, Yellow, Black, Black]);
/// assert_eq!(feedback.to_string(), "GBYBB");
///
/// // A trailing guess count is accepted and dropped.
/// assert_eq!("GGGGG3".parse::<Feedback>()?, Feedback::WIN);
/// #
/// # Ok::<_, wordle_tree::FormatError>(())
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Feedback(u8);

impl Feedback {
    /// Feedback for a guess that matches the target exactly.
    pub const WIN: Feedback = Feedback(121);

    /// The largest valid encoded value.
    pub const MAX: u8 = 242;

    /// Wraps an encoded value, rejecting anything above [`Feedback::MAX`].
    pub fn new(value: u8) -> Result<Self, FormatError> {
        if value <= Self::MAX {
            Ok(Feedback(value))
        } else {
            Err(FormatError::OutOfRange(value))
        }
    }

    /// Encodes five grades, first letter most significant.
    pub fn from_letters(letters: [Grade; 5]) -> Self {
        Feedback(
            letters
                .iter()
                .fold(0_u8, |acc, &grade| acc * 3 + grade as u8),
        )
    }

    /// Decodes the five grades, first letter first.
    pub fn letters(self) -> [Grade; 5] {
        let mut value = self.0;
        let mut letters = [Grade::Black; 5];
        for letter in letters.iter_mut().rev() {
            *letter = Grade::from_digit(value % 3);
            value /= 3;
        }
        letters
    }

    /// The encoded value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns true when every letter is green.
    pub fn is_win(self) -> bool {
        self == Self::WIN
    }

    /// Iterates over every valid feedback in ascending order.
    pub fn all() -> impl Iterator<Item = Feedback> {
        (0..=Self::MAX).map(Feedback)
    }

    /// Scores `guess` against `target`.
    ///
    /// Greens are assigned first. Each remaining guess letter, left to right,
    /// then claims the leftmost unclaimed matching letter of the target and
    /// becomes yellow, or is black when there is none. Repeated letters are
    /// therefore never credited more often than they occur in the target.
    ///
    /// Both words must be five ASCII letters; callers check them against the
    /// dictionary first.
    ///
    /// # Panics
    ///
    /// Panics if either word is shorter than five bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wordle_tree::Feedback;
    ///
    /// assert_eq!(Feedback::score("sober", "spool").to_string(), "GBYBB");
    /// assert!(Feedback::score("crane", "crane").is_win());
    /// ```
    pub fn score(target: &str, guess: &str) -> Self {
        let target = target.as_bytes();
        let guess = guess.as_bytes();

        let mut grades = [Grade::Black; 5];
        let mut used = [false; 5];

        for i in 0..5 {
            if target[i] == guess[i] {
                grades[i] = Grade::Green;
                used[i] = true;
            }
        }

        for i in 0..5 {
            if grades[i] != Grade::Black {
                continue;
            }
            for j in 0..5 {
                if !used[j] && target[j] == guess[i] {
                    grades[i] = Grade::Yellow;
                    used[j] = true;
                    break;
                }
            }
        }

        Self::from_letters(grades)
    }
}

impl TryFrom<u8> for Feedback {
    type Error = FormatError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Feedback> for u8 {
    fn from(feedback: Feedback) -> u8 {
        feedback.0
    }
}

impl FromStr for Feedback {
    type Err = FormatError;

    /// Parses five of `B`, `Y` and `G`, optionally followed by one digit
    /// `1`-`9` (a guess count), which is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let s = match bytes {
            [.., b'1'..=b'9'] if bytes.len() == 6 => &s[..5],
            _ => s,
        };
        if s.len() != 5 {
            return Err(FormatError::ResultLength(s.to_string()));
        }

        let mut letters = [Grade::Black; 5];
        for (index, (letter, found)) in letters.iter_mut().zip(s.chars()).enumerate() {
            *letter = Grade::from_char(found).ok_or_else(|| FormatError::ResultChar {
                string: s.to_string(),
                index,
                found,
            })?;
        }

        Ok(Self::from_letters(letters))
    }
}

impl Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for letter in self.letters() {
            write!(f, "{}", letter.to_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::{Grade::*, *};

    #[test]
    fn all_green_is_121() {
        assert_eq!(Feedback::from_letters([Green; 5]), Feedback::WIN);
        assert_eq!(Feedback::WIN.value(), 121);
        assert_eq!(Feedback::WIN.to_string(), "GGGGG");
    }

    #[test]
    fn first_letter_is_most_significant() {
        assert_eq!(Feedback::from_letters([Yellow, Black, Black, Black, Black]).value(), 162);
        assert_eq!(Feedback::from_letters([Black, Black, Black, Black, Yellow]).value(), 2);
        assert_eq!(Feedback::new(Feedback::MAX).unwrap().letters(), [Yellow; 5]);
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(Feedback::new(243), Err(FormatError::OutOfRange(243)));
        assert_eq!(Feedback::try_from(255), Err(FormatError::OutOfRange(255)));
    }

    #[test]
    fn digits_map_to_grades() {
        assert_eq!(Grade::from_digit(0), Black);
        assert_eq!(Grade::from_digit(1), Green);
        assert_eq!(Grade::from_digit(2), Yellow);
    }

    #[test]
    #[should_panic]
    fn three_is_not_a_digit() {
        Grade::from_digit(3);
    }

    #[test]
    fn deserializing_checks_range() {
        assert_eq!(serde_json::from_str::<Feedback>("121").unwrap(), Feedback::WIN);
        assert_eq!(serde_json::to_string(&Feedback::WIN).unwrap(), "121");
        assert!(serde_json::from_str::<Feedback>("243").is_err());
        assert!(serde_json::from_str::<Feedback>("250").is_err());
    }

    #[test]
    fn round_trips_every_value() {
        for feedback in Feedback::all() {
            assert_eq!(Feedback::from_letters(feedback.letters()), feedback);
            assert_eq!(feedback.to_string().parse::<Feedback>(), Ok(feedback));
        }
        assert_eq!(Feedback::all().count(), 243);
    }

    #[test]
    fn parse_ignores_count_suffix() {
        assert_eq!("BBBBY1".parse::<Feedback>().unwrap().value(), 2);
        assert_eq!("GGGGG9".parse::<Feedback>(), Ok(Feedback::WIN));
    }

    #[test]
    fn parse_rejects_bad_strings() {
        for bad in ["", "GGGG", "GGGGGG", "GGGGG0", "GGGGG12", "BBBBBBB"] {
            assert!(
                matches!(bad.parse::<Feedback>(), Err(FormatError::ResultLength(_))),
                "{bad:?} should have the wrong length"
            );
        }
        assert_eq!(
            "GGXGG".parse::<Feedback>(),
            Err(FormatError::ResultChar {
                string: "GGXGG".to_string(),
                index: 2,
                found: 'X'
            })
        );
        assert!("ggggg".parse::<Feedback>().is_err());
    }

    macro_rules! score_test {
        ($fn_name:ident: $target:expr, $guess:expr => $res:expr) => {
            #[test]
            fn $fn_name() {
                assert_eq!(Feedback::score($target, $guess).to_string(), $res);
            }
        };
    }

    score_test! { no_overlap: "crane", "moist" => "BBBBB" }
    score_test! { repeat_letter_guess: "sober", "spool" => "GBYBB" }
    score_test! { repeat_letter_guess_green_first: "tills", "pines" => "BGBBG" }
    score_test! { repeat_letter_answer: "spoon", "odors" => "YBGBY" }
    // Each L of "lolly" claims a different L of "alloy", leftmost first, so
    // the third L has nothing left to match.
    score_test! { alloy_lolly: "alloy", "lolly" => "YYGBG" }
    score_test! { abbey_babes: "abbey", "babes" => "YYGGB" }
    score_test! { yellow_claims_leftmost: "aabbb", "cccaa" => "BBBYY" }

    proptest! {
        #[test]
        fn identical_words_score_all_green(word in "[a-z]{5}") {
            let feedback = Feedback::score(&word, &word);
            prop_assert_eq!(feedback, Feedback::WIN);
            prop_assert_eq!(feedback.letters(), [Green; 5]);
        }

        #[test]
        fn credit_never_exceeds_target_letters(target in "[a-c]{5}", guess in "[a-c]{5}") {
            let letters = Feedback::score(&target, &guess).letters();
            for c in b'a'..=b'c' {
                let credited = guess
                    .bytes()
                    .zip(letters.iter())
                    .filter(|&(g, &grade)| g == c && grade != Black)
                    .count();
                let available = target.bytes().filter(|&t| t == c).count();
                prop_assert!(credited <= available);
            }
        }
    }
}
