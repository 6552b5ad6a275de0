//! Command-line interface for path queries and puzzle-pair generation.
//!
//! `path` solves a single query, `pair` draws one puzzle pair, and `batch`
//! fills per-length quotas with distinct pairs. Every command reads a JSON
//! graph document and prints JSON to stdout.

mod commands;

pub use commands::{
    BATCH_FORMAT_VERSION, BatchCommand, BatchEntry, BatchReport, Cli, CliError, Command,
    CommandOutput, ConstraintArgs, GraphArgs, PairCommand, PathCommand, PathReport, Quota,
    render_output, run_cli,
};
