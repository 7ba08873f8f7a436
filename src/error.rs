//! Error taxonomy for the core pipeline (spec §7).
//!
//! `ArgError` is not represented here: invalid/missing CLI arguments are
//! handled by `clap` before any library code runs. `ParseError` is likewise
//! absent as a variant — malformed lines are structurally impossible for
//! conformant input and are only checked via `debug_assert!` on the hot path.

use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to open {path}: {source}")]
    Open { path: PathBuf, #[source] source: io::Error },

    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, #[source] source: io::Error },

    #[error("failed to create {path}: {source}")]
    Create { path: PathBuf, #[source] source: io::Error },

    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),

    #[error("failed to stat {path}: {source}")]
    Stat { path: PathBuf, #[source] source: io::Error },

    #[error("arena allocation failed: {0}")]
    Alloc(String),
}

pub type Result<T> = std::result::Result<T, Error>;
