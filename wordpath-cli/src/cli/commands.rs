//! Command implementations and argument parsing for the `wordpath` CLI.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use rand::{SeedableRng, rngs::SmallRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Span, field, info, instrument};
use wordpath_core::{
    DEFAULT_BATCH_MAX_ROUNDS, DEFAULT_BATCH_WORKERS, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_PATH_MOVES,
    DEFAULT_MIN_LAYOUT_DISTANCE_SQUARED, DEFAULT_MIN_NODE_DEGREE, DEFAULT_MIN_PATH_MOVES,
    EngineError, GraphLoadError, GraphModel, PairBatch, PairBatchPlan, PuzzleConstraints,
    PuzzlePair, ShortestPathFinder, generate_pair_batch, generate_puzzle_pair,
    load_graph_from_reader, normalize_word,
};

/// Format version written into batch documents.
pub const BATCH_FORMAT_VERSION: &str = "1.0";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "wordpath",
    about = "Find semantic word paths and generate puzzle pairs."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Find the optimal path between two words.
    Path(PathCommand),
    /// Draw one puzzle pair.
    Pair(PairCommand),
    /// Fill per-length quotas with distinct puzzle pairs.
    Batch(BatchCommand),
}

/// Location of the graph document.
#[derive(Debug, Args, Clone)]
pub struct GraphArgs {
    /// Path to a JSON graph document.
    #[arg(long = "graph")]
    pub graph: PathBuf,
}

/// Acceptance limits shared by `pair` and `batch`.
#[derive(Debug, Args, Clone, Copy)]
pub struct ConstraintArgs {
    /// Fewest moves the optimal path may take.
    #[arg(long = "min-moves", default_value_t = DEFAULT_MIN_PATH_MOVES)]
    pub min_moves: usize,

    /// Most moves the optimal path may take.
    #[arg(long = "max-moves", default_value_t = DEFAULT_MAX_PATH_MOVES)]
    pub max_moves: usize,

    /// Minimum number of neighbours of both words.
    #[arg(long = "min-degree", default_value_t = DEFAULT_MIN_NODE_DEGREE)]
    pub min_degree: usize,

    /// Minimum squared layout distance between the words.
    #[arg(
        long = "min-layout-distance-squared",
        default_value_t = DEFAULT_MIN_LAYOUT_DISTANCE_SQUARED,
    )]
    pub min_layout_distance_squared: f64,

    /// Candidates drawn per pair before giving up.
    #[arg(long = "max-attempts", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,
}

impl Default for ConstraintArgs {
    fn default() -> Self {
        Self {
            min_moves: DEFAULT_MIN_PATH_MOVES,
            max_moves: DEFAULT_MAX_PATH_MOVES,
            min_degree: DEFAULT_MIN_NODE_DEGREE,
            min_layout_distance_squared: DEFAULT_MIN_LAYOUT_DISTANCE_SQUARED,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl From<ConstraintArgs> for PuzzleConstraints {
    fn from(args: ConstraintArgs) -> Self {
        Self::new()
            .with_path_moves(args.min_moves, args.max_moves)
            .with_min_node_degree(args.min_degree)
            .with_min_layout_distance_squared(args.min_layout_distance_squared)
            .with_max_attempts(args.max_attempts)
    }
}

/// Options accepted by the `path` command.
#[derive(Debug, Args, Clone)]
pub struct PathCommand {
    /// Graph to search.
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Start word.
    pub start: String,

    /// Target word.
    pub target: String,
}

/// Options accepted by the `pair` command.
#[derive(Debug, Args, Clone)]
pub struct PairCommand {
    /// Graph to sample from.
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Acceptance limits.
    #[command(flatten)]
    pub constraints: ConstraintArgs,

    /// Seed for reproducible draws; drawn from the OS when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Options accepted by the `batch` command.
#[derive(Debug, Args, Clone)]
pub struct BatchCommand {
    /// Graph to sample from.
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Acceptance limits.
    #[command(flatten)]
    pub constraints: ConstraintArgs,

    /// Pairs wanted per path length, as `MOVES=COUNT`.
    #[arg(long = "quota", required = true)]
    pub quotas: Vec<Quota>,

    /// Base seed for every worker.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Candidate searches per round.
    #[arg(long, default_value_t = DEFAULT_BATCH_WORKERS)]
    pub workers: usize,

    /// Rounds before unmet quotas are reported as a shortfall.
    #[arg(long = "max-rounds", default_value_t = DEFAULT_BATCH_MAX_ROUNDS)]
    pub max_rounds: usize,
}

/// A `MOVES=COUNT` quota argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    /// Path length in moves.
    pub moves: usize,
    /// Number of pairs wanted.
    pub count: usize,
}

impl FromStr for Quota {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (moves, count) = raw
            .split_once('=')
            .ok_or_else(|| format!("expected MOVES=COUNT, got `{raw}`"))?;
        let parse = |part: &str, label: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|err| format!("invalid {label} `{part}`: {err}"))
        };
        Ok(Self {
            moves: parse(moves, "move count")?,
            count: parse(count, "pair count")?,
        })
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The graph document could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The graph document was malformed.
    #[error(transparent)]
    Load(#[from] GraphLoadError),
    /// The engine rejected the query.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result of a `path` query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathReport {
    /// Start word as the graph stores it.
    pub start: String,
    /// Target word as the graph stores it.
    pub target: String,
    /// Words of the optimal path, or `None` when unreachable.
    pub path: Option<Vec<String>>,
    /// Moves in the optimal path.
    pub moves: Option<usize>,
    /// Cost of the optimal path.
    pub cost: Option<f64>,
}

impl From<PuzzlePair> for PathReport {
    fn from(pair: PuzzlePair) -> Self {
        Self {
            start: pair.start().to_owned(),
            target: pair.end().to_owned(),
            moves: Some(pair.moves()),
            cost: Some(pair.cost()),
            path: Some(pair.path().words().to_vec()),
        }
    }
}

/// One entry of a batch document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    /// Start word.
    pub start_word: String,
    /// Target word.
    pub target_word: String,
    /// Moves in the optimal path.
    pub path_length: usize,
}

/// Document written by the `batch` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Format version.
    pub version: &'static str,
    /// Accepted pairs in acceptance order.
    pub pairs: Vec<BatchEntry>,
    /// Unmet quota per path length.
    pub shortfall: BTreeMap<usize, usize>,
}

impl From<PairBatch> for BatchReport {
    fn from(batch: PairBatch) -> Self {
        let shortfall = batch.shortfall().clone();
        let pairs = batch
            .into_pairs()
            .into_iter()
            .map(|pair| BatchEntry {
                path_length: pair.moves(),
                start_word: pair.start().to_owned(),
                target_word: pair.end().to_owned(),
            })
            .collect();
        Self {
            version: BATCH_FORMAT_VERSION,
            pairs,
            shortfall,
        }
    }
}

/// Output of any command, rendered as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
    /// Output of `path`.
    Path(PathReport),
    /// Output of `pair`; `None` when the attempt budget ran out.
    Pair(Option<PathReport>),
    /// Output of `batch`.
    Batch(BatchReport),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the graph cannot be read or the engine fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use wordpath_cli::cli::{Cli, Command, CommandOutput, GraphArgs, PathCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(
///     file.path(),
///     r#"{"a": {"edges": {"b": 0.9}}, "b": {"edges": {"a": 0.9}}}"#,
/// )?;
/// let cli = Cli {
///     command: Command::Path(PathCommand {
///         graph: GraphArgs { graph: file.path().to_path_buf() },
///         start: "a".into(),
///         target: "b".into(),
///     }),
/// };
/// let CommandOutput::Path(report) = run_cli(cli)? else {
///     unreachable!("path command yields a path report");
/// };
/// assert_eq!(report.moves, Some(1));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<CommandOutput, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Path(command) => {
            span.record("command", field::display("path"));
            run_path(&command).map(CommandOutput::Path)
        }
        Command::Pair(command) => {
            span.record("command", field::display("pair"));
            run_pair(&command).map(CommandOutput::Pair)
        }
        Command::Batch(command) => {
            span.record("command", field::display("batch"));
            run_batch(&command).map(CommandOutput::Batch)
        }
    }
}

#[instrument(name = "cli.load_graph", err, skip(args), fields(path = field::Empty))]
pub(super) fn load_graph(args: &GraphArgs) -> Result<GraphModel, CliError> {
    Span::current().record("path", field::display(args.graph.display()));
    let file = File::open(&args.graph).map_err(|source| CliError::Io {
        path: args.graph.clone(),
        source,
    })?;
    let graph = load_graph_from_reader(BufReader::new(file))?;
    info!(
        words = graph.len(),
        dangling_edges = graph.dangling_edges(),
        "graph loaded"
    );
    Ok(graph)
}

pub(super) fn run_path(command: &PathCommand) -> Result<PathReport, CliError> {
    let graph = load_graph(&command.graph)?;
    let found = ShortestPathFinder::new(&graph).find(&command.start, &command.target)?;
    info!(reachable = found.is_some(), "path query completed");
    Ok(PathReport {
        moves: found.as_ref().map(|path| path.moves()),
        cost: found.as_ref().map(|path| path.cost()),
        path: found.map(|path| path.into_words()),
        start: normalize_word(&command.start),
        target: normalize_word(&command.target),
    })
}

#[instrument(name = "cli.pair", err, skip(command), fields(seed = field::Empty))]
pub(super) fn run_pair(command: &PairCommand) -> Result<Option<PathReport>, CliError> {
    let graph = load_graph(&command.graph)?;
    let mut rng = command.seed.map_or_else(SmallRng::from_entropy, |seed| {
        Span::current().record("seed", seed);
        SmallRng::seed_from_u64(seed)
    });
    let pair = generate_puzzle_pair(&graph, command.constraints.into(), &mut rng)?;
    info!(found = pair.is_some(), "pair generation completed");
    Ok(pair.map(PathReport::from))
}

#[instrument(
    name = "cli.batch",
    err,
    skip(command),
    fields(seed = command.seed, workers = command.workers),
)]
pub(super) fn run_batch(command: &BatchCommand) -> Result<BatchReport, CliError> {
    let graph = load_graph(&command.graph)?;
    let plan = command
        .quotas
        .iter()
        .fold(PairBatchPlan::new(), |planned, quota| {
            planned.with_quota(quota.moves, quota.count)
        })
        .with_seed(command.seed)
        .with_workers(command.workers)
        .with_max_rounds(command.max_rounds);
    let batch = generate_pair_batch(&graph, command.constraints.into(), &plan)?;
    info!(
        accepted = batch.pairs().len(),
        complete = batch.is_complete(),
        "batch generation completed"
    );
    Ok(BatchReport::from(batch))
}

/// Renders `output` to `writer` as pretty-printed JSON followed by a newline.
///
/// # Errors
/// Returns [`io::Error`] if serialisation or writing fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use wordpath_cli::cli::{CommandOutput, render_output};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let mut buffer = Vec::new();
/// render_output(&CommandOutput::Pair(None), &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "null\n");
/// # Ok(())
/// # }
/// ```
pub fn render_output(output: &CommandOutput, mut writer: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, output)?;
    writeln!(writer)
}
