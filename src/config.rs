//! Describing which strategies to check, and how.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
    str::FromStr,
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    harness::NamedStrategy, rules::Mode, strategy::table, words::Dictionary, FormatError, Result,
};

/// One strategy file and the rules to check it under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub mode: Mode,
}

impl StrategyConfig {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, mode: Mode) -> Self {
        StrategyConfig {
            name: name.into(),
            path: path.into(),
            mode,
        }
    }

    /// Parses the strategy table at `path` against `dictionary`.
    pub fn load(&self, dictionary: &Dictionary) -> Result<NamedStrategy> {
        debug!("loading strategy {} from {}", self.name, self.path.display());
        let tree = table::load(&self.path, dictionary)?;
        Ok(NamedStrategy::new(self.name.clone(), tree, self.mode))
    }
}

/// Parses `NAME=MODE:PATH`.
///
/// ```rust
/// use wordle_tree::{Mode, StrategyConfig};
///
/// let config: StrategyConfig = "hard(max5)=hard:strategy_hard5.txt".parse()?;
/// assert_eq!(config.name, "hard(max5)");
/// assert_eq!(config.mode, Mode::Hard);
/// #
/// # Ok::<_, wordle_tree::FormatError>(())
/// ```
impl FromStr for StrategyConfig {
    type Err = FormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bad = || FormatError::StrategyArg(s.to_string());
        let (name, rest) = s.split_once('=').ok_or_else(bad)?;
        let (mode, path) = rest.split_once(':').ok_or_else(bad)?;
        if name.is_empty() || path.is_empty() {
            return Err(bad());
        }
        Ok(StrategyConfig::new(name, path, mode.parse()?))
    }
}

/// Everything a checking run needs besides the command line.
///
/// Stored as JSON:
///
/// ```json
/// {
///   "dictionary": "words.txt",
///   "answers": "answers.txt",
///   "strategies": [
///     { "name": "normal", "path": "strategy_normal.txt", "mode": "normal" }
///   ]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dictionary: Option<PathBuf>,
    #[serde(default)]
    pub answers: Option<PathBuf>,
    #[serde(default)]
    pub strategies: Vec<StrategyConfig>,
}

impl Default for Config {
    /// The usual sweep: one normal strategy and two hard ones.
    fn default() -> Self {
        Config {
            dictionary: None,
            answers: None,
            strategies: vec![
                StrategyConfig::new("normal", "strategy_normal.txt", Mode::Normal),
                StrategyConfig::new("hard", "strategy_hard.txt", Mode::Hard),
                StrategyConfig::new("hard(max5)", "strategy_hard5.txt", Mode::Hard),
            ],
        }
    }
}

impl Config {
    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Reads a JSON config from `reader`.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Loads every configured strategy, stopping at the first broken one.
    pub fn load_strategies(&self, dictionary: &Dictionary) -> Result<Vec<NamedStrategy>> {
        self.strategies
            .iter()
            .map(|config| config.load(dictionary))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::WordleError;

    #[test]
    fn default_sweep() {
        let config = Config::default();
        let names: Vec<_> = config.strategies.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["normal", "hard", "hard(max5)"]);
        let modes: Vec<_> = config.strategies.iter().map(|s| s.mode).collect();
        assert_eq!(modes, vec![Mode::Normal, Mode::Hard, Mode::Hard]);
    }

    #[test]
    fn parses_strategy_args() {
        assert_eq!(
            "n=normal:a/b.txt".parse::<StrategyConfig>(),
            Ok(StrategyConfig::new("n", "a/b.txt", Mode::Normal))
        );
        // Only the first colon separates mode from path.
        assert_eq!(
            "h=hard:C:/strats.txt".parse::<StrategyConfig>(),
            Ok(StrategyConfig::new("h", "C:/strats.txt", Mode::Hard))
        );
        assert_eq!(
            "n=medium:x.txt".parse::<StrategyConfig>(),
            Err(FormatError::UnknownMode("medium".to_string()))
        );
        for bad in ["normal", "n=normal", "=hard:x.txt", "n=hard:"] {
            assert_eq!(
                bad.parse::<StrategyConfig>(),
                Err(FormatError::StrategyArg(bad.to_string()))
            );
        }
    }

    #[test]
    fn reads_json() -> Result<()> {
        let json = r#"{
            "answers": "answers.txt",
            "strategies": [
                { "name": "plain", "path": "plain.txt" },
                { "name": "strict", "path": "strict.txt", "mode": "hard" }
            ]
        }"#;
        let config = Config::from_reader(json.as_bytes())?;
        assert_eq!(config.dictionary, None);
        assert_eq!(config.answers, Some(PathBuf::from("answers.txt")));
        assert_eq!(config.strategies[0].mode, Mode::Normal);
        assert_eq!(config.strategies[1].mode, Mode::Hard);
        Ok(())
    }

    #[test]
    fn rejects_bad_json() {
        let err = Config::from_reader(r#"{ "strategies": 3 }"#.as_bytes()).unwrap_err();
        assert!(matches!(err, WordleError::Serde(_)));
    }

    #[test]
    fn missing_strategy_file() {
        let config = StrategyConfig::new("gone", "no/such/strategy.txt", Mode::Normal);
        let err = config.load(&Dictionary::default()).unwrap_err();
        assert!(matches!(err, WordleError::Io(_)));
    }
}
