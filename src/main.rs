use anyhow::Context;
use bundle_split::{
    CollectConfig, SplitConfig, DEFAULT_AGGREGATE_FILE, DEFAULT_CHUNK_PATTERN, DEFAULT_ROOT_DIR,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "bundle-split",
    version,
    author,
    about = "Bundle source files into one text file and split it into fixed-size chunks",
    long_about = "Bundle source files into one text file and split it into fixed-size chunks.\n\n\
    `collect` walks a directory and concatenates every file whose name ends with one of \
    the given suffixes, each behind an `=== <path> ===` header. `split` collapses all \
    whitespace in a file and writes it out as numbered pieces of at most --max-chars \
    characters.\n\n\
    USAGE EXAMPLES:\n  \
      # Bundle ./java/**/*.java into tum_dosyalarin_icerigi.txt\n  \
      bundle-split collect\n\n  \
      # Bundle Kotlin and Java sources from another tree\n  \
      bundle-split collect --dir ./app --ext .kt --ext .java --out all.txt\n\n  \
      # Split the bundle into 100000-character pieces\n  \
      bundle-split split\n\n  \
      # Do both in one go\n  \
      bundle-split run --dir ./app --max-chars 50000"
)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Concatenate matching files into one aggregate file
    Collect {
        #[command(flatten)]
        collect: CollectArgs,

        /// Dry run (don't write files)
        #[arg(long)]
        dry_run: bool,
    },

    /// Normalize whitespace in a file and split it into numbered chunks
    Split {
        /// File to split
        #[arg(short, long, default_value = DEFAULT_AGGREGATE_FILE, value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        split: ChunkArgs,

        /// Dry run (don't write files)
        #[arg(long)]
        dry_run: bool,
    },

    /// Collect, then split the aggregate that was just written
    Run {
        #[command(flatten)]
        collect: CollectArgs,

        #[command(flatten)]
        split: ChunkArgs,
    },
}

#[derive(Args, Debug)]
struct CollectArgs {
    /// Root directory to scan
    #[arg(short, long, default_value = DEFAULT_ROOT_DIR, value_name = "PATH")]
    dir: PathBuf,

    /// File name suffix to collect (repeatable)
    #[arg(short, long = "ext", default_value = ".java", value_name = "SUFFIX")]
    extensions: Vec<String>,

    /// Aggregate output file
    #[arg(short, long, default_value = DEFAULT_AGGREGATE_FILE, value_name = "FILE")]
    out: PathBuf,

    /// Glob of files or directories to skip, relative to --dir (repeatable)
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Honour .gitignore and .ignore files
    #[arg(long)]
    respect_ignore: bool,

    /// Follow symbolic links
    #[arg(long)]
    follow_links: bool,
}

#[derive(Args, Debug)]
struct ChunkArgs {
    /// Max characters per chunk
    #[arg(short, long, default_value_t = 100_000)]
    max_chars: usize,

    /// Directory receiving the chunk files
    #[arg(long, default_value = ".", value_name = "PATH")]
    out_dir: PathBuf,

    /// Chunk filename pattern
    #[arg(long, default_value = DEFAULT_CHUNK_PATTERN)]
    pattern: String,

    /// Also write summary.json into the output directory
    #[arg(long)]
    summary: bool,
}

impl CollectArgs {
    fn into_config(self, dry_run: bool) -> anyhow::Result<CollectConfig> {
        CollectConfig::builder()
            .root_dir(self.dir)
            .extensions(self.extensions)
            .output_path(self.out)
            .exclude_patterns(self.exclude)
            .respect_ignore_files(self.respect_ignore)
            .follow_links(self.follow_links)
            .dry_run(dry_run)
            .build()
            .context("Failed to build collect configuration")
    }
}

impl ChunkArgs {
    fn into_config(self, input: PathBuf, dry_run: bool) -> anyhow::Result<SplitConfig> {
        SplitConfig::builder()
            .input_path(input)
            .max_chars(self.max_chars)
            .output_dir(self.out_dir)
            .output_pattern(self.pattern)
            .write_summary(self.summary)
            .dry_run(dry_run)
            .build()
            .context("Failed to build split configuration")
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose)?;

    match cli.command {
        Command::Collect { collect, dry_run } => {
            bundle_split::collect(collect.into_config(dry_run)?).context("Collect failed")?;
        }
        Command::Split {
            input,
            split,
            dry_run,
        } => {
            let config = split.into_config(input, dry_run)?;
            bundle_split::split(config).context("Split failed")?;
        }
        Command::Run { collect, split } => {
            let collect = collect.into_config(false)?;
            let split = split.into_config(collect.output_path.clone(), false)?;
            bundle_split::run(collect, split)
                .context("Pipeline execution failed")?
                .print_summary();
        }
    }

    Ok(())
}

fn setup_tracing(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("bundle_split=info"),
        1 => EnvFilter::new("bundle_split=debug"),
        _ => EnvFilter::new("bundle_split=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false),
        )
        .init();

    Ok(())
}
