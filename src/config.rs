use crate::error::{Error, Result};
use crate::filter::FileFilter;
use std::path::PathBuf;

/// Directory scanned by the collector when none is given.
pub const DEFAULT_ROOT_DIR: &str = "java";
/// File name suffixes collected when none are given.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".java"];
/// Aggregate file written by the collector and read by the chunker.
pub const DEFAULT_AGGREGATE_FILE: &str = "tum_dosyalarin_icerigi.txt";
/// Characters per chunk when none is given.
pub const DEFAULT_MAX_CHARS: usize = 3_500;
/// Chunk file name pattern.
pub const DEFAULT_CHUNK_PATTERN: &str = "parca_{index}.txt";

/// Configuration for the collector.
///
/// Use [`CollectConfig::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct CollectConfig {
    /// Root directory to scan
    pub root_dir: PathBuf,

    /// File name suffixes to collect (plain string suffixes, e.g. `.java`)
    pub extensions: Vec<String>,

    /// Aggregate output file
    pub output_path: PathBuf,

    /// Glob patterns for files or directories to skip
    pub exclude_patterns: Vec<String>,

    /// Honour `.gitignore` / `.ignore` files while walking
    pub respect_ignore_files: bool,

    /// Follow symbolic links while walking
    pub follow_links: bool,

    /// Dry run mode (no file writes)
    pub dry_run: bool,
}

impl CollectConfig {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bundle_split::CollectConfig;
    ///
    /// let config = CollectConfig::builder()
    ///     .root_dir("./src")
    ///     .extensions([".rs", ".toml"])
    ///     .build()
    ///     .expect("valid configuration");
    /// ```
    #[must_use]
    pub fn builder() -> CollectConfigBuilder {
        CollectConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Root directory doesn't exist or is not a directory
    /// - No extensions are given
    /// - Output path points at a directory
    /// - An exclude pattern is not a valid glob
    pub fn validate(&self) -> Result<()> {
        if !self.root_dir.exists() {
            return Err(Error::config(format!(
                "Root directory does not exist: {}",
                self.root_dir.display()
            )));
        }

        if !self.root_dir.is_dir() {
            return Err(Error::config(format!(
                "Root path is not a directory: {}",
                self.root_dir.display()
            )));
        }

        if self.extensions.is_empty() {
            return Err(Error::config("at least one extension is required"));
        }

        if self.output_path.is_dir() {
            return Err(Error::config(format!(
                "Output path is a directory: {}",
                self.output_path.display()
            )));
        }

        FileFilter::new(&self.extensions, &self.exclude_patterns)?;

        Ok(())
    }
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from(DEFAULT_ROOT_DIR),
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            output_path: PathBuf::from(DEFAULT_AGGREGATE_FILE),
            exclude_patterns: Vec::new(),
            respect_ignore_files: false,
            follow_links: false,
            dry_run: false,
        }
    }
}

/// Builder for creating a [`CollectConfig`].
#[derive(Debug, Default)]
pub struct CollectConfigBuilder {
    root_dir: Option<PathBuf>,
    extensions: Option<Vec<String>>,
    output_path: Option<PathBuf>,
    exclude_patterns: Vec<String>,
    respect_ignore_files: bool,
    follow_links: bool,
    dry_run: bool,
}

impl CollectConfigBuilder {
    /// Sets the root directory to scan.
    #[must_use]
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(path.into());
        self
    }

    /// Sets the file name suffixes to collect.
    #[must_use]
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the aggregate output file.
    #[must_use]
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Sets glob patterns for files or directories to skip.
    #[must_use]
    pub fn exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    /// Enables or disables `.gitignore` handling.
    #[must_use]
    pub fn respect_ignore_files(mut self, enabled: bool) -> Self {
        self.respect_ignore_files = enabled;
        self
    }

    /// Enables or disables following symbolic links.
    #[must_use]
    pub fn follow_links(mut self, enabled: bool) -> Self {
        self.follow_links = enabled;
        self
    }

    /// Enables dry run mode (no file writes).
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<CollectConfig> {
        let defaults = CollectConfig::default();
        let config = CollectConfig {
            root_dir: self.root_dir.unwrap_or(defaults.root_dir),
            extensions: self.extensions.unwrap_or(defaults.extensions),
            output_path: self.output_path.unwrap_or(defaults.output_path),
            exclude_patterns: self.exclude_patterns,
            respect_ignore_files: self.respect_ignore_files,
            follow_links: self.follow_links,
            dry_run: self.dry_run,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Configuration for the chunker.
///
/// Use [`SplitConfig::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct SplitConfig {
    /// Text file to split
    pub input_path: PathBuf,

    /// Maximum characters per chunk
    pub max_chars: usize,

    /// Directory receiving the chunk files
    pub output_dir: PathBuf,

    /// Chunk filename pattern (supports {index}, {index:02}, {index:03})
    pub output_pattern: String,

    /// Write `summary.json` next to the chunks
    pub write_summary: bool,

    /// Dry run mode (no file writes)
    pub dry_run: bool,
}

impl SplitConfig {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_split::SplitConfig;
    ///
    /// let config = SplitConfig::builder()
    ///     .input_path("bundle.txt")
    ///     .max_chars(100_000)
    ///     .build()
    ///     .expect("valid configuration");
    /// assert_eq!(config.max_chars, 100_000);
    /// ```
    #[must_use]
    pub fn builder() -> SplitConfigBuilder {
        SplitConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// The input file is not checked here; it may be produced later by the
    /// collector.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_chars` is zero or the output pattern lacks an
    /// index placeholder.
    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(Error::config("max_chars must be greater than 0"));
        }

        if !self.output_pattern.contains("{index") {
            return Err(Error::invalid_pattern(
                &self.output_pattern,
                "Pattern must contain {index} or {index:03} placeholder",
            ));
        }

        if self.output_dir.is_file() {
            return Err(Error::config(format!(
                "Output directory is a file: {}",
                self.output_dir.display()
            )));
        }

        Ok(())
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_AGGREGATE_FILE),
            max_chars: DEFAULT_MAX_CHARS,
            output_dir: PathBuf::from("."),
            output_pattern: DEFAULT_CHUNK_PATTERN.to_string(),
            write_summary: false,
            dry_run: false,
        }
    }
}

/// Builder for creating a [`SplitConfig`].
#[derive(Debug, Default)]
pub struct SplitConfigBuilder {
    input_path: Option<PathBuf>,
    max_chars: Option<usize>,
    output_dir: Option<PathBuf>,
    output_pattern: Option<String>,
    write_summary: bool,
    dry_run: bool,
}

impl SplitConfigBuilder {
    /// Sets the file to split.
    #[must_use]
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Sets the maximum characters per chunk.
    #[must_use]
    pub fn max_chars(mut self, chars: usize) -> Self {
        self.max_chars = Some(chars);
        self
    }

    /// Sets the directory receiving the chunk files.
    #[must_use]
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Sets the chunk filename pattern.
    ///
    /// Pattern must contain an `{index}` placeholder.
    #[must_use]
    pub fn output_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.output_pattern = Some(pattern.into());
        self
    }

    /// Enables or disables `summary.json`.
    #[must_use]
    pub fn write_summary(mut self, enabled: bool) -> Self {
        self.write_summary = enabled;
        self
    }

    /// Enables dry run mode (no file writes).
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<SplitConfig> {
        let defaults = SplitConfig::default();
        let config = SplitConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            max_chars: self.max_chars.unwrap_or(defaults.max_chars),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            output_pattern: self.output_pattern.unwrap_or(defaults.output_pattern),
            write_summary: self.write_summary,
            dry_run: self.dry_run,
        };

        config.validate()?;
        Ok(config)
    }
}
