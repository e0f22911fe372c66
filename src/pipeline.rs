use crate::{
    chunker::{Chunker, SplitStats},
    collector::{CollectStats, Collector},
    config::{CollectConfig, SplitConfig},
    error::Result,
};
use serde::Serialize;
use tracing::{info, instrument};

/// Statistics from a full collect-then-split run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    /// Collector stage results
    pub collect: CollectStats,

    /// Chunker stage results
    pub split: SplitStats,
}

impl PipelineStats {
    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!();
        println!("Collected:  {:>8} files", self.collect.read_files);
        println!("Unreadable: {:>8} files", self.collect.unreadable_files);
        println!("Aggregate:  {}", self.collect.output_path.display());
        println!("Chunks:     {:>8}", self.split.total_chunks);
        println!("Characters: {:>8}", self.split.normalized_chars);
        println!(
            "Total time: {:>8.2}s",
            (self.collect.duration + self.split.duration).as_secs_f64()
        );
    }
}

/// Runs the collector and then the chunker on its output.
pub struct Pipeline {
    collector: Collector,
    chunker: Chunker,
}

impl Pipeline {
    /// Creates a new pipeline.
    ///
    /// The chunker reads whatever file the collector writes, so
    /// `split.input_path` is replaced by `collect.output_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if either configuration is invalid.
    pub fn new(collect: CollectConfig, mut split: SplitConfig) -> Result<Self> {
        split.input_path.clone_from(&collect.output_path);

        Ok(Self {
            collector: Collector::new(collect)?,
            chunker: Chunker::new(split)?,
        })
    }

    /// Executes both stages; the first fatal error stops the run.
    ///
    /// # Errors
    ///
    /// Returns an error if either stage fails.
    #[instrument(skip(self))]
    pub fn run(self) -> Result<PipelineStats> {
        info!("Stage 1/2: Collecting files...");
        let collect = self.collector.run()?;

        info!("Stage 2/2: Splitting aggregate...");
        let split = self.chunker.run()?;

        Ok(PipelineStats { collect, split })
    }
}
