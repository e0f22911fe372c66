use crate::{
    config::SplitConfig,
    error::Result,
    file::read_text,
    splitter::{normalize, Chunk, Splitter},
    writer::Writer,
};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Statistics collected during a chunker run.
#[derive(Debug, Clone, Serialize)]
pub struct SplitStats {
    /// Characters in the input before normalization
    pub input_chars: usize,

    /// Characters after whitespace normalization
    pub normalized_chars: usize,

    /// Total number of chunks created
    pub total_chunks: usize,

    /// Number of files written (chunks plus summary)
    pub files_written: usize,

    /// Output directory path
    pub output_directory: String,

    /// Total execution time
    pub duration: Duration,
}

/// Normalizes a text file and writes it out as numbered fixed-size chunks.
pub struct Chunker {
    config: SplitConfig,
    splitter: Splitter,
    writer: Writer,
}

impl Chunker {
    /// Creates a new chunker with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn new(config: SplitConfig) -> Result<Self> {
        config.validate()?;

        let splitter = Splitter::new(config.max_chars);
        let writer = Writer::new(&config);

        Ok(Self {
            config,
            splitter,
            writer,
        })
    }

    /// Reads, normalizes and splits the input into chunks without writing.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is missing or not valid UTF-8.
    pub fn chunks(&self) -> Result<(usize, Vec<Chunk>)> {
        let raw = read_text(&self.config.input_path)?;
        let input_chars = raw.chars().count();
        let normalized = normalize(&raw);

        Ok((input_chars, self.splitter.split(&normalized)))
    }

    /// Executes the chunker and returns statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or an output file
    /// cannot be written.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bundle_split::{Chunker, SplitConfig};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = SplitConfig::builder()
    ///     .input_path("tum_dosyalarin_icerigi.txt")
    ///     .max_chars(100_000)
    ///     .build()?;
    ///
    /// let stats = Chunker::new(config)?.run()?;
    /// println!("{} chunks", stats.total_chunks);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(input = %self.config.input_path.display()))]
    pub fn run(self) -> Result<SplitStats> {
        let start_time = Instant::now();

        let (input_chars, chunks) = self.chunks()?;
        let normalized_chars: usize = chunks.iter().map(Chunk::char_count).sum();

        info!(
            "Normalized {} chars to {}; {} chunk(s) of up to {} chars",
            input_chars,
            normalized_chars,
            chunks.len(),
            self.config.max_chars
        );

        if chunks.is_empty() {
            warn!("Input contains no text after normalization; nothing to write");
        }

        let files_written = if self.config.dry_run {
            warn!("Dry run mode enabled - skipping file writes");
            self.print_dry_run_summary(&chunks);
            0
        } else {
            self.writer.write_chunks(&chunks)?;
            if self.config.write_summary {
                self.writer.write_summary(&chunks, start_time.elapsed())?;
                chunks.len() + 1
            } else {
                chunks.len()
            }
        };

        let stats = SplitStats {
            input_chars,
            normalized_chars,
            total_chunks: chunks.len(),
            files_written,
            output_directory: self.writer.output_dir().display().to_string(),
            duration: start_time.elapsed(),
        };

        info!(
            "✓ Wrote {} files in {:.2}s",
            stats.files_written,
            stats.duration.as_secs_f64()
        );

        Ok(stats)
    }

    fn print_dry_run_summary(&self, chunks: &[Chunk]) {
        println!(
            "Dry run: {} chunk(s) would be written to {}",
            chunks.len(),
            self.writer.output_dir().display()
        );
        for chunk in chunks {
            println!(
                "  {} ({} karakter)",
                self.writer.file_name(chunk.index),
                chunk.char_count()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use std::fs;

    fn create_test_config(input: &std::path::Path, out: &std::path::Path, max: usize) -> SplitConfig {
        SplitConfig::builder()
            .input_path(input)
            .output_dir(out)
            .max_chars(max)
            .build()
            .unwrap()
    }

    #[test]
    fn test_chunker_example() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("bundle.txt");
        input.write_str("Hello\n\nWorld   !").unwrap();

        let stats = Chunker::new(create_test_config(input.path(), temp.path(), 5))
            .unwrap()
            .run()
            .unwrap();

        temp.child("parca_1.txt").assert("Hello");
        temp.child("parca_2.txt").assert(" Worl");
        temp.child("parca_3.txt").assert("d !");
        assert!(!temp.child("parca_4.txt").exists());
        assert_eq!(stats.total_chunks, 3);
        assert_eq!(stats.normalized_chars, 13);
        assert_eq!(stats.input_chars, 16);
        assert_eq!(stats.files_written, 3);
    }

    #[test]
    fn test_chunker_concatenation_matches_normalized() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("bundle.txt");
        let text = "=== java/A.java ===\nclass A {\n\tint x;\n}\n\n*** java/B.java okunamadı: x ***\n\n";
        input.write_str(text).unwrap();
        let out = temp.child("out");

        let stats = Chunker::new(create_test_config(input.path(), out.path(), 7))
            .unwrap()
            .run()
            .unwrap();

        let joined: String = (1..=stats.total_chunks)
            .map(|i| fs::read_to_string(out.path().join(format!("parca_{i}.txt"))).unwrap())
            .collect();
        assert_eq!(joined, normalize(text));
    }

    #[test]
    fn test_chunker_missing_input() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = create_test_config(&temp.path().join("missing.txt"), temp.path(), 10);

        let err = Chunker::new(config).unwrap().run().unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_chunker_invalid_utf8_input() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("bundle.txt");
        input.write_binary(&[b'o', b'k', 0xff]).unwrap();

        let err = Chunker::new(create_test_config(input.path(), temp.path(), 10))
            .unwrap()
            .run()
            .unwrap_err();
        assert!(err.is_invalid_utf8());
        assert!(!temp.child("parca_1.txt").exists());
    }

    #[test]
    fn test_chunker_whitespace_only_input() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("bundle.txt");
        input.write_str(" \n\t\n ").unwrap();

        let stats = Chunker::new(create_test_config(input.path(), temp.path(), 10))
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(stats.total_chunks, 0);
        assert!(!temp.child("parca_1.txt").exists());
    }

    #[test]
    fn test_chunker_with_summary() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("bundle.txt");
        input.write_str("abcdefghij").unwrap();

        let config = SplitConfig::builder()
            .input_path(input.path())
            .output_dir(temp.path())
            .max_chars(4)
            .write_summary(true)
            .build()
            .unwrap();
        let stats = Chunker::new(config).unwrap().run().unwrap();

        assert_eq!(stats.total_chunks, 3);
        assert_eq!(stats.files_written, 4);
        assert!(temp.child("summary.json").exists());
    }

    #[test]
    fn test_chunker_dry_run() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("bundle.txt");
        input.write_str("abcdefghij").unwrap();
        let out = temp.child("out");

        let config = SplitConfig::builder()
            .input_path(input.path())
            .output_dir(out.path())
            .max_chars(4)
            .dry_run(true)
            .build()
            .unwrap();
        let stats = Chunker::new(config).unwrap().run().unwrap();

        assert_eq!(stats.total_chunks, 3);
        assert_eq!(stats.files_written, 0);
        assert!(!out.exists());
    }
}
