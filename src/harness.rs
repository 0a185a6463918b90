//! The test harness for checking strategies against every answer.

use std::{fs::File, io::Write, ops::Deref, path::Path};

use comfy_table::{presets::UTF8_FULL, Cell, Table};
use indicatif::ParallelProgressIterator;
use itertools::Itertools;
use log::{debug, info};
use rand::seq::index::sample;
use rayon::prelude::*;

use crate::{
    perf::{Perf, Summary},
    play::{play, Game},
    rules::{Mode, Rules},
    strategy::Node,
    words::WordLists,
    HarnessError, Result,
};

/// A parsed strategy tree with the name and rules it is checked under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedStrategy {
    name: String,
    tree: Node,
    mode: Mode,
}

impl NamedStrategy {
    /// Names a strategy and picks the rules to play it under.
    pub fn new(name: impl Into<String>, tree: Node, mode: Mode) -> Self {
        NamedStrategy {
            name: name.into(),
            tree,
            mode,
        }
    }

    /// The name used in reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The strategy tree.
    pub fn tree(&self) -> &Node {
        &self.tree
    }

    /// The rules the strategy is played under.
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

/// A test harness that can play many strategies against many answers.
///
/// Create a new test harness with [`new()`](Harness::new()), then configure
/// it using various methods. Note that these configuration methods consume
/// the existing [`Harness`] and return a new one.
///
/// Games are played in parallel. The first game that fails stops the whole
/// run: a strategy that breaks on one answer cannot be trusted on any.
///
/// # Examples
///
/// ```rust
/// use wordle_tree::{
///     harness::{Harness, NamedStrategy},
///     strategy::table,
///     Dictionary, Mode, WordLists,
/// };
///
/// let lists = WordLists::new(Dictionary::default(), vec!["CRANE".to_string()])?;
/// let tree = table::parse("CRANE GGGGG", lists.dictionary())?;
///
/// let record = Harness::new()
///     .quiet()
///     .add_strategy(NamedStrategy::new("crane", tree, Mode::Hard))
///     .run(&lists)?;
///
/// assert_eq!(record[0].cumulative_guesses(), 1);
/// #
/// # Ok::<_, wordle_tree::WordleError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Harness {
    strategies: Vec<NamedStrategy>,
    verbose: bool,
    num_answers: Option<usize>,
}

impl Harness {
    /// Creates a new test harness with default configuration.
    ///
    /// Defaults:
    /// 1. tests no strategies
    /// 2. quiet mode
    /// 3. plays each strategy against every answer, in order
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the harness verbose while testing.
    ///
    /// As of right now, this consists of a progress bar and nothing else.
    pub fn verbose(self) -> Self {
        Harness {
            verbose: true,
            ..self
        }
    }

    /// Makes the harness silent while testing.
    pub fn quiet(self) -> Self {
        Harness {
            verbose: false,
            ..self
        }
    }

    /// Adds a strategy to the harness for testing.
    pub fn add_strategy(self, strat: NamedStrategy) -> Self {
        let mut strategies = self.strategies;
        strategies.push(strat);
        Harness { strategies, ..self }
    }

    /// Adds a [`Vec`] of strategies to the harness for testing.
    pub fn add_strategies(self, strats: Vec<NamedStrategy>) -> Self {
        let mut strategies = self.strategies;
        strategies.extend(strats);
        Harness { strategies, ..self }
    }

    /// Sets the harness to test each strategy on every answer.
    pub fn test_all(self) -> Self {
        Harness {
            num_answers: None,
            ..self
        }
    }

    /// Sets the harness to test each strategy on `n` random answers.
    ///
    /// All strategies see the same answers.
    pub fn test_num(self, n: usize) -> Self {
        Harness {
            num_answers: Some(n),
            ..self
        }
    }

    /// Runs the harness and produces performances for each strategy.
    ///
    /// The [`Perf`]s will be in the same order as the strategies were added
    /// to the harness.
    pub fn run(&self, words: &WordLists) -> Result<Record> {
        if self.strategies.is_empty() {
            return Err(HarnessError::NoStrategiesAdded.into());
        }

        let answers = words.answers();
        let targets: Vec<&str> = match self.num_answers {
            None => answers.iter().map(String::as_str).collect(),
            Some(n) => {
                let mut rng = rand::thread_rng();
                sample(&mut rng, answers.len(), n.min(answers.len()))
                    .iter()
                    .sorted_unstable()
                    .map(|i| answers[i].as_str())
                    .collect()
            }
        };
        if targets.is_empty() {
            return Err(HarnessError::NoAnswers.into());
        }

        info!(
            "testing {} strategies on {} answers",
            self.strategies.len(),
            targets.len()
        );

        let mut perfs = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            let games = self.run_strategy(strategy, &targets, words)?;
            let perf = Perf::new(strategy.name(), strategy.mode(), games);
            debug!("{} (worst case {})", perf, perf.max_guesses());
            perfs.push(perf);
        }

        Ok(Record::new(perfs))
    }

    fn run_strategy(
        &self,
        strategy: &NamedStrategy,
        targets: &[&str],
        words: &WordLists,
    ) -> Result<Vec<Game>> {
        let rules = Rules::new(words.dictionary(), strategy.mode());
        let run_inner = |target: &&str| {
            play(strategy.tree(), target, &rules).map_err(|kind| HarnessError::Play {
                strategy: strategy.name().to_string(),
                target: target.to_string(),
                kind,
            })
        };

        let games = if self.verbose {
            targets
                .par_iter()
                .progress_count(targets.len() as u64)
                .map(run_inner)
                .collect::<std::result::Result<Vec<_>, HarnessError>>()?
        } else {
            targets
                .par_iter()
                .map(run_inner)
                .collect::<std::result::Result<Vec<_>, HarnessError>>()?
        };

        Ok(games)
    }

    /// Runs the harness (see [`run()`](Harness::run())) and prints
    /// performance summaries of each strategy.
    pub fn run_and_summarize(&self, words: &WordLists) -> Result<Record> {
        let record = self.run(words)?;
        for perf in record.iter() {
            println!("{}", perf);
        }
        Ok(record)
    }
}

/// The performances from one harness run, in the order the strategies were
/// added.
#[derive(Debug, Clone, Default)]
pub struct Record {
    perfs: Vec<Perf>,
}

impl Deref for Record {
    type Target = [Perf];

    fn deref(&self) -> &Self::Target {
        &self.perfs
    }
}

impl Record {
    fn new(perfs: Vec<Perf>) -> Self {
        Self { perfs }
    }

    /// Summaries of every performance.
    pub fn summaries(&self) -> Vec<Summary> {
        self.perfs.iter().map(Perf::to_summary).collect()
    }

    /// A table with one row per strategy.
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Strategy", "Mode", "Answers", "Sum", "Mean", "Worst"]);
        for perf in &self.perfs {
            table.add_row(vec![
                Cell::new(perf.strategy_name()),
                Cell::new(perf.mode()),
                Cell::new(perf.num_tried()),
                Cell::new(perf.cumulative_guesses()),
                Cell::new(format!("{:.4}", perf.mean_guesses())),
                Cell::new(perf.max_guesses()),
            ]);
        }
        table
    }

    /// Prints the summary table followed by a histogram per strategy.
    pub fn print_report(&self) -> Result<()> {
        let mut stdout = std::io::stdout();
        writeln!(stdout, "{}", self.table())?;
        for perf in &self.perfs {
            writeln!(stdout, "{:-^80}", perf.strategy_name())?;
            write!(stdout, "{}", perf.to_summary().histogram())?;
            let worst = perf.worst_games().map(Game::target).join(" ");
            writeln!(stdout, "worst: {}", worst)?;
        }
        Ok(())
    }

    /// Writes the summaries to `path` as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, &self.summaries())?;
        Ok(())
    }
}
