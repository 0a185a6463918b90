//! Evaluating strategies.

use std::{fmt::Display, ops::Deref};

use serde::{Deserialize, Serialize};

use crate::{play::Game, rules::Mode};

/// A record of one strategy's games after a run of the
/// [test harness](crate::Harness).
///
/// This struct can provide statistics about the games on its own, but it
/// is recommended to produce a [`Summary`] first to cache the computations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Perf {
    strategy_name: String,
    mode: Mode,
    games: Vec<Game>,
}

impl Perf {
    pub(crate) fn new(strategy_name: impl Into<String>, mode: Mode, games: Vec<Game>) -> Self {
        Perf {
            strategy_name: strategy_name.into(),
            mode,
            games,
        }
    }

    /// Gets the name of the strategy that produced this performance record.
    pub fn strategy_name(&self) -> &str {
        &self.strategy_name
    }

    /// Gets the rules the strategy was played under.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Every game played, in answer order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Gets the number of answers the strategy was played against.
    pub fn num_tried(&self) -> u32 {
        self.games.len() as u32
    }

    /// Gets the number of guesses across all games.
    pub fn cumulative_guesses(&self) -> u32 {
        self.games.iter().map(|g| g.guesses() as u32).sum()
    }

    /// Gets the average number of guesses needed to solve a puzzle.
    pub fn mean_guesses(&self) -> f64 {
        f64::from(self.cumulative_guesses()) / f64::from(self.num_tried())
    }

    /// Gets the most guesses any single game needed.
    pub fn max_guesses(&self) -> u32 {
        self.games
            .iter()
            .map(|g| g.guesses() as u32)
            .max()
            .unwrap_or(0)
    }

    /// The games that needed [`max_guesses()`](Self::max_guesses()).
    pub fn worst_games(&self) -> impl Iterator<Item = &Game> {
        let max = self.max_guesses() as usize;
        self.games.iter().filter(move |g| g.guesses() == max)
    }

    /// Converts this performance record to a pre-calculated summary.
    pub fn to_summary(&self) -> Summary {
        let mut bins = vec![0; self.max_guesses() as usize];
        for game in &self.games {
            bins[game.guesses() - 1] += 1;
        }

        Summary {
            strategy_name: self.strategy_name.clone(),
            mode: self.mode,
            num_tried: self.num_tried(),
            cumulative_guesses: self.cumulative_guesses(),
            histogram: bins.into(),
        }
    }
}

impl Display for Perf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_summary())
    }
}

/// A summary of a strategy's performance generated by the
/// [test harness](crate::Harness).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    strategy_name: String,
    mode: Mode,
    num_tried: u32,
    cumulative_guesses: u32,
    histogram: Histogram,
}

impl Summary {
    /// Gets the name of the strategy that produced this performance record.
    pub fn strategy_name(&self) -> &str {
        &self.strategy_name
    }

    /// Gets the rules the strategy was played under.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Gets the number of answers the strategy was played against.
    pub fn num_tried(&self) -> u32 {
        self.num_tried
    }

    /// Gets the number of guesses across all games.
    pub fn cumulative_guesses(&self) -> u32 {
        self.cumulative_guesses
    }

    /// Gets the average number of guesses needed to solve a puzzle.
    pub fn mean_guesses(&self) -> f64 {
        f64::from(self.cumulative_guesses) / f64::from(self.num_tried)
    }

    /// Gets the most guesses any single game needed.
    pub fn max_guesses(&self) -> u32 {
        self.histogram.len() as u32
    }

    /// How many games were won in each number of guesses.
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = format!("{}:", self.strategy_name);
        write!(
            f,
            "{:<11} sum={} mean={:.4}",
            label,
            self.cumulative_guesses,
            self.mean_guesses()
        )
    }
}

/// Game counts by number of guesses; bin `i` counts games won in `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Histogram {
    bins: Vec<u32>,
}

impl From<Vec<u32>> for Histogram {
    fn from(bins: Vec<u32>) -> Self {
        Self { bins }
    }
}

impl Deref for Histogram {
    type Target = [u32];

    fn deref(&self) -> &Self::Target {
        &self.bins
    }
}

impl Display for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let max = self.iter().copied().max().unwrap_or(0);
        let digits =
            std::iter::successors(Some(max), |&n| (n >= 10).then(|| n / 10)).count() as u32;
        let count_per_mark = (max as f32 / (80. - digits as f32 - 6.)).max(1.0);

        for (i, &bin) in self.bins.iter().enumerate() {
            write!(f, "{} |", i + 1)?;
            let marks = (bin as f32 / count_per_mark).floor() as usize;
            writeln!(f, "{:■>marks$} ({})", "", bin)?;
        }

        Ok(())
    }
}
