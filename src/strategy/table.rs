//! Reading strategy tables.
//!
//! A table has one line per path through the tree. Columns sit at fixed
//! offsets: column `i` starts at byte `13 * (i / 2) + 6 * (i % 2)` and is
//! `5 + i % 2` bytes wide. Even columns hold a guess, odd columns hold the
//! feedback for the guess to their left, optionally followed by a guess-count
//! digit. A path shares its prefix with the line above by leaving those
//! columns blank, and every line ends with `GGGGG`:
//!
//! ```text
//! SALET BBBBB1 COURD BBBBB2 NYMPH GGGGG3
//!                    BBBBG2 FIZZY GGGGG3
//!       BBBBY1 TEPID GGGGG2
//!       GGGGG1
//! ```
//!
//! Parsing is a single pass that keeps the path of the current line as a
//! stack of open nodes, one per depth. A node is attached to its parent when
//! a later line moves back above it.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::debug;

use crate::{
    feedback::Feedback,
    strategy::Node,
    words::{is_word, Dictionary},
    FormatError, Result,
};

/// The byte offset of column `i`.
pub fn column_start(i: usize) -> usize {
    13 * (i / 2) + 6 * (i % 2)
}

/// The width of column `i`: five for guesses, six for feedback.
pub fn column_width(i: usize) -> usize {
    5 + i % 2
}

/// Parses a whole table held in memory.
///
/// Every guess must be in `dictionary`. The first error found aborts the
/// parse.
pub fn parse(text: &str, dictionary: &Dictionary) -> std::result::Result<Node, FormatError> {
    let mut builder = Builder::new(dictionary);
    for (i, line) in text.lines().enumerate() {
        builder.line(i + 1, line)?;
    }
    builder.finish()
}

/// Parses a table from a reader, line by line.
pub fn read(reader: impl BufRead, dictionary: &Dictionary) -> Result<Node> {
    let mut builder = Builder::new(dictionary);
    for (i, line) in reader.lines().enumerate() {
        builder.line(i + 1, &line?)?;
    }
    Ok(builder.finish()?)
}

/// Parses the table stored in the file at `path`.
pub fn load(path: impl AsRef<Path>, dictionary: &Dictionary) -> Result<Node> {
    let file = File::open(path.as_ref())?;
    debug!("reading strategy table {}", path.as_ref().display());
    read(BufReader::new(file), dictionary)
}

/// A node on the current path that has not been attached to its parent yet.
#[derive(Debug)]
struct Open {
    /// The feedback leading here from the parent; `None` for the root.
    key: Option<Feedback>,
    node: Node,
}

#[derive(Debug)]
struct Builder<'d> {
    dictionary: &'d Dictionary,
    stack: Vec<Open>,
}

impl<'d> Builder<'d> {
    fn new(dictionary: &'d Dictionary) -> Self {
        Builder {
            dictionary,
            stack: Vec::new(),
        }
    }

    fn line(&mut self, line_no: usize, line: &str) -> std::result::Result<(), FormatError> {
        let line = line.trim_end();
        if line.is_empty() {
            return Ok(());
        }
        if !line.is_ascii() {
            return Err(FormatError::NonAscii {
                line_no,
                line: line.to_string(),
            });
        }

        let cols = columns(line);
        let ends_in_win = cols.len() % 2 == 0
            && matches!(cols.last().map(|c| c.parse::<Feedback>()), Some(Ok(f)) if f.is_win());
        if !ends_in_win {
            return Err(FormatError::NotAllGreen {
                line_no,
                line: line.to_string(),
            });
        }

        for i in (0..cols.len()).step_by(2) {
            let word = cols[i];
            if word.is_empty() {
                if i > 0 && !cols[i - 1].is_empty() {
                    return Err(FormatError::ResultWithoutWord {
                        line_no,
                        column: i,
                        line: line.to_string(),
                    });
                }
                continue;
            }
            if !is_word(word) || !self.dictionary.contains(word) {
                return Err(FormatError::NotInDictionary {
                    line_no,
                    word: word.to_string(),
                });
            }

            if i == 0 {
                if !self.stack.is_empty() {
                    return Err(FormatError::TwoRoots {
                        line_no,
                        line: line.to_string(),
                    });
                }
                self.stack.push(Open {
                    key: None,
                    node: Node::new(word),
                });
                continue;
            }

            let key = cols[i - 1]
                .parse::<Feedback>()
                .map_err(|_| FormatError::NoResult {
                    line_no,
                    word: word.to_string(),
                    line: line.to_string(),
                })?;
            let depth = i / 2;
            if depth > self.stack.len() {
                return Err(FormatError::NoParent {
                    line_no,
                    word: word.to_string(),
                    line: line.to_string(),
                });
            }
            self.unwind(depth);

            let parent = &self.stack[depth - 1].node;
            if parent.has_child(key) {
                return Err(FormatError::DuplicateResult {
                    line_no,
                    word: parent.word().to_string(),
                    feedback: key,
                });
            }
            self.stack.push(Open {
                key: Some(key),
                node: Node::new(word),
            });
        }

        // The winning guess is the last word column, which may belong to a
        // previous line.
        let depth = cols.len() / 2 - 1;
        if depth >= self.stack.len() {
            return Err(FormatError::WinWithoutGuess {
                line_no,
                line: line.to_string(),
            });
        }
        let open_win = matches!(self.stack.get(depth + 1), Some(o) if o.key == Some(Feedback::WIN));
        let top = &mut self.stack[depth].node;
        if open_win || top.has_child(Feedback::WIN) {
            return Err(FormatError::DuplicateWin {
                line_no,
                word: top.word().to_string(),
            });
        }
        top.insert(Feedback::WIN, None);

        Ok(())
    }

    /// Attaches open nodes to their parents until only `depth` remain.
    fn unwind(&mut self, depth: usize) {
        while self.stack.len() > depth.max(1) {
            if let Some(Open {
                key: Some(key),
                node,
            }) = self.stack.pop()
            {
                if let Some(parent) = self.stack.last_mut() {
                    parent.node.insert(key, Some(node));
                }
            }
        }
    }

    fn finish(mut self) -> std::result::Result<Node, FormatError> {
        self.unwind(1);
        let root = self.stack.pop().ok_or(FormatError::Empty)?.node;
        debug!(
            "parsed strategy starting with {}: {} nodes, {} wins, depth {}",
            root.word(),
            root.num_nodes(),
            root.num_wins(),
            root.depth()
        );
        Ok(root)
    }
}

/// Splits a line into trimmed columns, stopping at the end of the line.
fn columns(line: &str) -> Vec<&str> {
    let mut cols = Vec::new();
    let mut i = 0;
    while column_start(i) < line.len() {
        let start = column_start(i);
        let end = (start + column_width(i)).min(line.len());
        cols.push(line[start..end].trim());
        i += 1;
    }
    cols
}
