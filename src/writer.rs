use crate::{
    config::SplitConfig,
    error::{Error, Result},
    file::write_atomic,
    splitter::Chunk,
};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info};

/// Summary of written chunk files.
#[derive(Debug, Serialize)]
pub(crate) struct WriteSummary {
    /// File the chunks were cut from
    pub source: String,

    /// Maximum characters per chunk
    pub max_chars: usize,

    /// Total number of chunks written
    pub total_chunks: usize,

    /// Total characters across all chunks
    pub total_chars: usize,

    /// Execution duration in seconds
    pub duration_secs: f64,

    /// Individual chunk summaries
    pub chunks: Vec<ChunkSummary>,

    /// Generation timestamp
    pub generated_at: String,
}

/// Summary of a single chunk.
#[derive(Debug, Serialize)]
pub(crate) struct ChunkSummary {
    /// Chunk index (1-based)
    pub index: usize,

    /// Characters in chunk
    pub chars: usize,

    /// Output filename
    pub filename: String,
}

/// Writes chunks to numbered output files.
pub(crate) struct Writer {
    input_path: PathBuf,
    output_dir: PathBuf,
    output_pattern: String,
    max_chars: usize,
}

impl Writer {
    /// Creates a new writer from configuration.
    pub(crate) fn new(config: &SplitConfig) -> Self {
        Self {
            input_path: config.input_path.clone(),
            output_dir: config.output_dir.clone(),
            output_pattern: config.output_pattern.clone(),
            max_chars: config.max_chars,
        }
    }

    /// Writes all chunks, printing one confirmation line per file.
    ///
    /// Existing files with the same names are overwritten. Chunks written
    /// before a failure stay on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created or a
    /// write fails.
    pub(crate) fn write_chunks(&self, chunks: &[Chunk]) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|e| Error::io(&self.output_dir, e))?;

        info!("Writing {} chunks to {}", chunks.len(), self.output_dir.display());

        for chunk in chunks {
            self.write_chunk(chunk, chunks.len())?;
        }

        Ok(())
    }

    /// Writes a single chunk to file.
    fn write_chunk(&self, chunk: &Chunk, total_chunks: usize) -> Result<()> {
        let path = self.get_output_path(chunk.index);
        write_atomic(&path, chunk.text.as_bytes())?;

        let chars = chunk.char_count();
        println!("{} dosyası oluşturuldu ({chars} karakter).", self.file_name(chunk.index));

        debug!(
            "Wrote chunk {}/{} ({} chars) to {}",
            chunk.index,
            total_chunks,
            chars,
            path.display()
        );

        Ok(())
    }

    /// File name for a 1-based chunk index.
    pub(crate) fn file_name(&self, index: usize) -> String {
        self.output_pattern
            .replace("{index:03}", &format!("{index:03}"))
            .replace("{index:02}", &format!("{index:02}"))
            .replace("{index}", &index.to_string())
    }

    /// Generates the output file path for a chunk.
    pub(crate) fn get_output_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(self.file_name(index))
    }

    /// Writes `summary.json` describing all chunks.
    ///
    /// # Errors
    ///
    /// Returns an error if the summary file cannot be written.
    pub(crate) fn write_summary(&self, chunks: &[Chunk], duration: Duration) -> Result<PathBuf> {
        let chunk_summaries: Vec<ChunkSummary> = chunks
            .iter()
            .map(|c| ChunkSummary {
                index: c.index,
                chars: c.char_count(),
                filename: self.file_name(c.index),
            })
            .collect();

        let summary = WriteSummary {
            source: self.input_path.display().to_string(),
            max_chars: self.max_chars,
            total_chunks: chunks.len(),
            total_chars: chunk_summaries.iter().map(|c| c.chars).sum(),
            duration_secs: duration.as_secs_f64(),
            chunks: chunk_summaries,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };

        let summary_path = self.output_dir.join("summary.json");
        let json = serde_json::to_vec_pretty(&summary)?;
        write_atomic(&summary_path, &json)?;

        info!("Wrote summary to {}", summary_path.display());
        Ok(summary_path)
    }

    pub(crate) fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn create_test_config(output_dir: &Path) -> SplitConfig {
        SplitConfig::builder()
            .input_path("bundle.txt")
            .output_dir(output_dir)
            .max_chars(5)
            .build()
            .unwrap()
    }

    #[test]
    fn test_writer_creates_output_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        let output_dir = temp.child("output");

        let writer = Writer::new(&create_test_config(output_dir.path()));
        writer.write_chunks(&[Chunk::new(1, "Hello")]).unwrap();

        assert!(output_dir.exists());
    }

    #[test]
    fn test_writer_creates_chunk_files() {
        let temp = assert_fs::TempDir::new().unwrap();

        let writer = Writer::new(&create_test_config(temp.path()));
        let chunks = vec![Chunk::new(1, "Hello"), Chunk::new(2, " Worl"), Chunk::new(3, "d !")];
        writer.write_chunks(&chunks).unwrap();

        temp.child("parca_1.txt").assert("Hello");
        temp.child("parca_2.txt").assert(" Worl");
        temp.child("parca_3.txt").assert("d !");
    }

    #[test]
    fn test_writer_overwrites_existing() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("parca_1.txt").write_str("stale content").unwrap();

        let writer = Writer::new(&create_test_config(temp.path()));
        writer.write_chunks(&[Chunk::new(1, "fresh")]).unwrap();

        temp.child("parca_1.txt").assert("fresh");
    }

    #[test]
    fn test_file_name_patterns() {
        let temp = assert_fs::TempDir::new().unwrap();
        let writer = Writer::new(&create_test_config(temp.path()));
        assert_eq!(writer.file_name(1), "parca_1.txt");
        assert_eq!(writer.file_name(12), "parca_12.txt");

        let config = SplitConfig::builder()
            .output_dir(temp.path())
            .output_pattern("chunk_{index:03}.txt")
            .build()
            .unwrap();
        let writer = Writer::new(&config);
        assert_eq!(writer.file_name(7), "chunk_007.txt");
        assert!(writer.get_output_path(7).ends_with("chunk_007.txt"));
    }

    #[test]
    fn test_writer_creates_summary() {
        let temp = assert_fs::TempDir::new().unwrap();

        let writer = Writer::new(&create_test_config(temp.path()));
        let chunks = vec![Chunk::new(1, "Hello"), Chunk::new(2, "ab")];
        writer.write_chunks(&chunks).unwrap();
        let path = writer.write_summary(&chunks, Duration::from_secs(1)).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["total_chunks"], 2);
        assert_eq!(json["total_chars"], 7);
        assert_eq!(json["chunks"][1]["filename"], "parca_2.txt");
        assert_eq!(json["max_chars"], 5);
    }
}
