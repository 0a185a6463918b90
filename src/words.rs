//! The word lists a strategy is checked against.
//!
//! Nothing here is global: a [`WordLists`] is built once (usually from two
//! text files) and then shared by reference with the parser, the rules and
//! the harness.

use std::{
    collections::HashSet,
    fs,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use log::debug;

use crate::{FormatError, Result};

/// Every word that may be guessed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Builds a dictionary from already-checked words.
    ///
    /// Every word must be five ASCII letters; [`WordLists::new`] rejects
    /// dictionaries that break this.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Dictionary {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `word` may be guessed.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Iterates over the words in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// The number of words in the dictionary.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the dictionary holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The dictionary of legal guesses together with the ordered list of answers.
///
/// Every answer is also a legal guess, so answers missing from the guess list
/// are added to the dictionary on construction.
///
/// # Examples
///
/// ```rust
/// use wordle_tree::WordLists;
///
/// let lists = WordLists::from_reader("crane\nslate\n".as_bytes(), "slate\n".as_bytes())?;
/// assert!(lists.dictionary().contains("crane"));
/// assert_eq!(lists.answers(), ["slate"]);
/// #
/// # Ok::<_, wordle_tree::WordleError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordLists {
    dictionary: Dictionary,
    answers: Vec<String>,
}

impl WordLists {
    /// Creates word lists from a dictionary and the answers to sweep over.
    ///
    /// Fails if any word is not exactly five ASCII letters, since scoring
    /// compares words position by position.
    pub fn new(
        dictionary: Dictionary,
        answers: Vec<String>,
    ) -> std::result::Result<Self, FormatError> {
        if let Some(bad) = dictionary
            .words
            .iter()
            .chain(answers.iter())
            .find(|word| !is_word(word))
        {
            return Err(FormatError::BadWord(bad.clone()));
        }

        let mut dictionary = dictionary;
        dictionary.words.extend(answers.iter().cloned());
        Ok(WordLists {
            dictionary,
            answers,
        })
    }

    /// Reads both lists from files with one word per line.
    pub fn load(dictionary: impl AsRef<Path>, answers: impl AsRef<Path>) -> Result<Self> {
        let dictionary = fs::File::open(dictionary)?;
        let answers = fs::File::open(answers)?;
        Self::from_reader(dictionary, answers)
    }

    /// Reads both lists from readers with one word per line.
    ///
    /// Blank lines and lines starting with `#` are skipped. Anything else
    /// must be exactly five ASCII letters.
    pub fn from_reader(dictionary: impl Read, answers: impl Read) -> Result<Self> {
        let guesses = read_words(dictionary)?;
        let answers = read_words(answers)?;
        debug!(
            "loaded {} guesses and {} answers",
            guesses.len(),
            answers.len()
        );
        Ok(Self::new(Dictionary::from_words(guesses), answers)?)
    }

    /// The dictionary of legal guesses.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// The possible targets, in file order.
    pub fn answers(&self) -> &[String] {
        &self.answers
    }
}

/// Returns true if `word` is exactly five ASCII letters.
pub(crate) fn is_word(word: &str) -> bool {
    word.len() == 5 && word.bytes().all(|b| b.is_ascii_alphabetic())
}

fn read_words(reader: impl Read) -> Result<Vec<String>> {
    let mut words = Vec::new();
    for (i, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let word = line.trim();
        if word.is_empty() || word.starts_with('#') {
            continue;
        }
        if !is_word(word) {
            return Err(FormatError::NotAWord {
                line_no: i + 1,
                word: word.to_string(),
            }
            .into());
        }
        words.push(word.to_string());
    }
    Ok(words)
}
