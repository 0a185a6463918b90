use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use rayon::ThreadPoolBuilder;
use wordle_tree::{
    analysis::AnswerSets, strategy::table, Config, Feedback, Harness, StrategyConfig, WordLists,
};

/// Checks precomputed Wordle strategy tables against every answer.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// File of allowed guesses, one word per line.
    #[clap(long, global = true)]
    dictionary: Option<PathBuf>,

    /// File of possible answers, one word per line.
    ///
    /// Answers are always allowed as guesses too.
    #[clap(long, global = true)]
    answers: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play every strategy against the answers and report how they did.
    Check {
        /// JSON file listing the word lists and strategies to check.
        #[clap(short, long)]
        config: Option<PathBuf>,

        /// A strategy to check, as NAME=MODE:PATH. May be repeated.
        ///
        /// Replaces the strategies from the config file.
        #[clap(short, long)]
        strategy: Vec<StrategyConfig>,

        /// Only play this many randomly chosen answers.
        #[clap(long)]
        sample: Option<usize>,

        /// Sets the number of threads to use in thread pool.
        ///
        /// By default, rayon picks the number of threads.
        #[clap(short, long, default_value = "0")]
        threads: usize,

        /// Show a progress bar while playing.
        #[clap(short, long)]
        verbose: bool,

        /// Also write the summaries to this file as JSON.
        #[clap(long)]
        json: Option<PathBuf>,
    },

    /// Parse one strategy table and describe the tree.
    Show {
        /// The strategy table.
        path: PathBuf,

        /// Print the tree back out as a table.
        #[clap(long)]
        table: bool,
    },

    /// Print the feedback for GUESS when the answer is TARGET.
    Score { target: String, guess: String },

    /// Study which feedback each answer can produce over all guesses.
    ///
    /// Prints the answer with the fewest distinct feedbacks and the answer
    /// pairs whose feedback sets overlap the most.
    Analyze {
        /// How many similar pairs to print.
        #[clap(long, default_value = "10")]
        pairs: usize,

        /// Instead, list the answers that can produce all of these results.
        #[clap(long, multiple_values = true)]
        find: Vec<Feedback>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Check {
            config,
            strategy,
            sample,
            threads,
            verbose,
            json,
        } => {
            let mut config = match config {
                Some(path) => Config::load(&path)
                    .with_context(|| format!("reading config {}", path.display()))?,
                None => Config::default(),
            };
            if !strategy.is_empty() {
                config.strategies = strategy;
            }
            if config.strategies.is_empty() {
                bail!("no strategies to check");
            }

            let words = load_words(
                args.dictionary.or_else(|| config.dictionary.clone()),
                args.answers.or_else(|| config.answers.clone()),
            )?;
            let strategies = config
                .load_strategies(words.dictionary())
                .context("loading strategies")?;

            ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("starting thread pool")?;

            let mut harness = Harness::new().add_strategies(strategies);
            if verbose {
                harness = harness.verbose();
            }
            if let Some(n) = sample {
                harness = harness.test_num(n);
            }

            let record = harness.run(&words).context("checking strategies")?;
            for perf in record.iter() {
                println!("{}", perf);
            }
            if verbose {
                record.print_report()?;
            }
            if let Some(path) = json {
                record
                    .save(&path)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!("wrote summaries to {}", path.display());
            }
        }
        Command::Show { path, table: print } => {
            let words = load_words(args.dictionary, args.answers)?;
            let tree = table::load(&path, words.dictionary())
                .with_context(|| format!("parsing {}", path.display()))?;
            println!(
                "{}: first guess {}, {} guesses, {} wins, depth {}",
                path.display(),
                tree.word(),
                tree.num_nodes(),
                tree.num_wins(),
                tree.depth()
            );
            if print {
                println!("{}", tree);
            }
        }
        Command::Score { target, guess } => {
            if target.len() != 5 || guess.len() != 5 {
                bail!("both words must be five letters");
            }
            let target = target.to_ascii_uppercase();
            let guess = guess.to_ascii_uppercase();
            println!("{}", Feedback::score(&target, &guess));
        }
        Command::Analyze { pairs, find } => {
            let words = load_words(args.dictionary, args.answers)?;
            let sets = AnswerSets::new(&words);
            if find.is_empty() {
                if let Some((answer, len)) = sets.worst() {
                    println!("worst: {} {}", answer, len);
                }
                for pair in sets.most_similar(pairs) {
                    println!("{} {:.4}", pair, pair.ratio());
                }
            } else {
                for answer in sets.covering(&find) {
                    println!("{}", answer);
                }
            }
        }
    }

    Ok(())
}

fn load_words(dictionary: Option<PathBuf>, answers: Option<PathBuf>) -> Result<WordLists> {
    let dictionary = dictionary.unwrap_or_else(|| PathBuf::from("words.txt"));
    let answers = answers.unwrap_or_else(|| PathBuf::from("answers.txt"));
    let words = WordLists::load(&dictionary, &answers).with_context(|| {
        format!(
            "reading word lists {} and {}",
            dictionary.display(),
            answers.display()
        )
    })?;
    if words.answers().is_empty() {
        warn!("{} holds no answers", answers.display());
    }
    Ok(words)
}
