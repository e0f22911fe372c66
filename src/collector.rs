use crate::{
    config::CollectConfig,
    error::Result,
    file::{ensure_parent_dir, write_atomic, FileContent, SourceFile},
    scanner::Scanner,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Statistics collected during a collector run.
#[derive(Debug, Clone, Serialize)]
pub struct CollectStats {
    /// Regular files visited by the walk
    pub total_files: usize,

    /// Files matching the suffix filter
    pub matched_files: usize,

    /// Matched files written as content blocks
    pub read_files: usize,

    /// Matched files written as error markers
    pub unreadable_files: usize,

    /// Bytes written to the aggregate file
    pub bytes_written: usize,

    /// Aggregate file path
    pub output_path: PathBuf,

    /// Total execution time
    pub duration: Duration,
}

/// Renders one aggregate block.
///
/// Readable files become `=== <path> ===`, the content and a blank line;
/// unreadable files become a `*** <path> okunamadı: <reason> ***` marker.
#[must_use]
pub fn render_block(file: &SourceFile) -> String {
    let path = file.path.display();
    match &file.content {
        FileContent::Text(content) => format!("=== {path} ===\n{content}\n\n"),
        FileContent::Unreadable { reason } => format!("*** {path} okunamadı: {reason} ***\n\n"),
    }
}

/// Renders the whole aggregate, blocks in input order.
#[must_use]
pub fn render_aggregate(files: &[SourceFile]) -> String {
    let capacity = files
        .iter()
        .map(|f| f.content_str().map_or(64, str::len) + f.path.as_os_str().len() + 16)
        .sum();

    files.iter().fold(String::with_capacity(capacity), |mut out, file| {
        out.push_str(&render_block(file));
        out
    })
}

/// Concatenates matching files under a directory into one aggregate file.
pub struct Collector {
    config: CollectConfig,
    scanner: Scanner,
}

impl Collector {
    /// Creates a new collector with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn new(config: CollectConfig) -> Result<Self> {
        config.validate()?;
        let scanner = Scanner::new(&config)?;

        Ok(Self { config, scanner })
    }

    /// Scans the root directory and writes the aggregate file.
    ///
    /// Per-file read failures end up as inline markers and never abort the
    /// run.
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregate file cannot be written.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bundle_split::{CollectConfig, Collector};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = CollectConfig::builder()
    ///     .root_dir("java")
    ///     .extensions([".java"])
    ///     .output_path("tum_dosyalarin_icerigi.txt")
    ///     .build()?;
    ///
    /// let stats = Collector::new(config)?.run()?;
    /// println!("{} files collected", stats.read_files);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(root_dir = %self.config.root_dir.display()))]
    pub fn run(self) -> Result<CollectStats> {
        let start_time = Instant::now();

        info!("Scanning for {:?}", self.config.extensions);
        let (files, scan_stats) = self.scanner.scan();

        if files.is_empty() {
            warn!(
                "No files ending with {:?} found in {}",
                self.config.extensions,
                self.config.root_dir.display()
            );
        }

        let aggregate = render_aggregate(&files);

        let bytes_written = if self.config.dry_run {
            warn!("Dry run mode enabled - skipping file writes");
            self.print_dry_run_summary(&files);
            0
        } else {
            ensure_parent_dir(&self.config.output_path)?;
            write_atomic(&self.config.output_path, aggregate.as_bytes())?;
            aggregate.len()
        };

        let stats = CollectStats {
            total_files: scan_stats.total_files,
            matched_files: scan_stats.matched_files,
            read_files: files.iter().filter(|f| f.is_text()).count(),
            unreadable_files: scan_stats.unreadable_files,
            bytes_written,
            output_path: self.config.output_path.clone(),
            duration: start_time.elapsed(),
        };

        info!(
            "✓ Collected {} files ({} unreadable) into {} in {:.2}s",
            stats.matched_files,
            stats.unreadable_files,
            stats.output_path.display(),
            stats.duration.as_secs_f64()
        );

        Ok(stats)
    }

    fn print_dry_run_summary(&self, files: &[SourceFile]) {
        println!(
            "Dry run: {} file(s) would be written to {}",
            files.len(),
            self.config.output_path.display()
        );
        for file in files {
            let marker = if file.is_text() { ' ' } else { '!' };
            println!("  {marker} {}", file.relative_path);
        }
    }
}
