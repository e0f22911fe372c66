//! # bundle-split
//!
//! Bundle a source tree into one text file and cut it into fixed-size pieces.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bundle_split::{CollectConfig, SplitConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let collect = CollectConfig::builder()
//!     .root_dir("java")
//!     .extensions([".java"])
//!     .output_path("tum_dosyalarin_icerigi.txt")
//!     .build()?;
//! bundle_split::collect(collect)?;
//!
//! let split = SplitConfig::builder()
//!     .input_path("tum_dosyalarin_icerigi.txt")
//!     .max_chars(100_000)
//!     .build()?;
//! bundle_split::split(split)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **Collector**: walks the root directory, keeps files whose names end
//!    with a configured suffix and writes them into one aggregate file, each
//!    behind an `=== <path> ===` header. Unreadable files become inline
//!    `*** <path> okunamadı: <reason> ***` markers.
//! 2. **Chunker**: reads a file, collapses whitespace runs into single spaces
//!    and writes consecutive `max_chars`-character slices to `parca_1.txt`,
//!    `parca_2.txt`, ...

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod chunker;
mod collector;
mod config;
mod error;
mod file;
mod filter;
mod pipeline;
mod scanner;
mod splitter;
mod writer;

pub use chunker::{Chunker, SplitStats};
pub use collector::{render_aggregate, render_block, CollectStats, Collector};
pub use config::{
    CollectConfig, CollectConfigBuilder, SplitConfig, SplitConfigBuilder, DEFAULT_AGGREGATE_FILE,
    DEFAULT_CHUNK_PATTERN, DEFAULT_EXTENSIONS, DEFAULT_MAX_CHARS, DEFAULT_ROOT_DIR,
};
pub use error::{Error, Result};
pub use file::{FileContent, SourceFile};
pub use pipeline::{Pipeline, PipelineStats};
pub use splitter::{normalize, Chunk, Splitter};

/// Concatenates every matching file under the root into the aggregate file.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - Root directory doesn't exist or is not a directory
/// - The aggregate file cannot be written
///
/// Files that fail to read do not produce an error; they are recorded inline.
pub fn collect(config: CollectConfig) -> Result<CollectStats> {
    Collector::new(config)?.run()
}

/// Normalizes the input file and writes it as numbered fixed-size chunks.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - The input file is missing or not valid UTF-8
/// - A chunk file cannot be written
pub fn split(config: SplitConfig) -> Result<SplitStats> {
    Chunker::new(config)?.run()
}

/// Runs [`collect`] and then [`split`] on the aggregate it produced.
///
/// # Errors
///
/// Returns the first error from either stage.
pub fn run(collect: CollectConfig, split: SplitConfig) -> Result<PipelineStats> {
    Pipeline::new(collect, split)?.run()
}
