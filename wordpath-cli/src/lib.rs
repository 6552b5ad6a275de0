//! Support library for the `wordpath` binary.
//!
//! Re-exports the CLI and logging modules so doctests and tests can drive the
//! command pipeline without forking a subprocess.

pub mod cli;
pub mod logging;
