use crate::config::FuzzConfig;
use crate::error::{MemFuzzError, MemFuzzResult};
use crate::log::Logger;
use crate::mutator::Mutator;
use crate::output;
use crate::traits::DrawSource;
use crate::width::Width;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "memfuzz", version, about)]
struct MemFuzzCliArgs {
    /// Verbose mode
    #[arg(long, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: MemFuzzCliCommands,
}

#[derive(Debug, Subcommand)]
enum MemFuzzCliCommands {
    /// Mutates a buffer and prints the result, nothing is written back
    Mutate {
        /// text whose bytes are mutated
        #[arg(long, short, conflicts_with = "file", required_unless_present = "file")]
        input: Option<String>,
        /// file whose content is mutated, e.g. a memory or ROM dump
        #[arg(long, short)]
        file: Option<PathBuf>,
        /// requested number of changes, reduced modulo the buffer length
        #[arg(long, short, default_value_t = 5)]
        max_changes: usize,
        /// seed of the draw source, a random one is picked and logged if missing
        #[arg(long, short)]
        seed: Option<u64>,
        /// number of passes over the same buffer
        #[arg(long, short, default_value_t = 1)]
        rounds: usize,
        /// JSON file with the engine config
        #[arg(long, short)]
        config: Option<PathBuf>,
        /// print the mutation reports as JSON instead of a hex dump
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Prints the dangerous value table of one width
    Catalog {
        #[arg(value_enum)]
        width: CatalogWidth,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CatalogWidth {
    Byte,
    Half,
    Word,
    Quad,
}

impl From<CatalogWidth> for Width {
    fn from(width: CatalogWidth) -> Self {
        match width {
            CatalogWidth::Byte => Width::Byte,
            CatalogWidth::Half => Width::Half,
            CatalogWidth::Word => Width::Word,
            CatalogWidth::Quad => Width::Quad,
        }
    }
}

struct MutateJob {
    buffer: Vec<u8>,
    max_changes: usize,
    seed: u64,
    rounds: usize,
    config: FuzzConfig,
    json: bool,
}

/// A helper struct to set up the CLI application. The draw source is created from the seed by
/// the given function, so any `DrawSource` can drive the engine.
pub struct MemFuzzBuilder<S, F>
where
    S: DrawSource,
    F: Fn(u64) -> S,
{
    seeded: F,
    config: FuzzConfig,
}

impl MemFuzzBuilder<ChaChaRng, fn(u64) -> ChaChaRng> {
    /// Uses a `ChaChaRng` seeded with the given seed.
    #[must_use]
    pub fn chacha() -> Self {
        Self::new(ChaChaRng::seed_from_u64)
    }
}

impl<S, F> MemFuzzBuilder<S, F>
where
    S: DrawSource,
    F: Fn(u64) -> S,
{
    /// Generates a new instance creating the draw source with `seeded`.
    pub fn new(seeded: F) -> Self {
        Self {
            seeded,
            config: FuzzConfig::default(),
        }
    }

    /// Config used when `--config` is not given.
    #[must_use]
    pub fn with_config(mut self, config: FuzzConfig) -> Self {
        self.config = config;
        self
    }

    /// Starts memfuzz as a CLI application
    /// # Errors
    pub fn start_cli(self) -> Result<(), MemFuzzError> {
        let args = MemFuzzCliArgs::parse();
        let logger = Logger::init(args.verbose);
        match args.command {
            MemFuzzCliCommands::Catalog { width } => {
                print!("{}", output::catalog_listing(width.into()));
                Ok(())
            }
            MemFuzzCliCommands::Mutate {
                input,
                file,
                max_changes,
                seed,
                rounds,
                config,
                json,
            } => {
                let buffer = match (input, file) {
                    (Some(input), _) => input.into_bytes(),
                    (None, Some(file)) => std::fs::read(file)?,
                    (None, None) => {
                        return Err(MemFuzzError::CommandLineError {
                            command: "mutate needs --input or --file".to_owned(),
                        });
                    }
                };
                let config = match config {
                    Some(path) => FuzzConfig::load(&path)?,
                    None => self.config.clone(),
                };
                let seed = seed.unwrap_or_else(rand::random);
                tracing::info!("Using seed {seed}, pass --seed {seed} to reproduce");

                let job = MutateJob {
                    buffer,
                    max_changes,
                    seed,
                    rounds,
                    config,
                    json,
                };
                print!("{}", self.mutate(job, &logger)?);
                Ok(())
            }
        }
    }

    /// Runs all rounds and renders the result, either a hex dump with a verdict or the JSON
    /// reports. With `json` the logger stays muted for the whole run.
    fn mutate(&self, job: MutateJob, logger: &Logger) -> MemFuzzResult<String> {
        let _muted = job.json.then(|| logger.mute());
        let original = job.buffer.clone();
        let mut buffer = job.buffer;
        let mut mutator = Mutator::with_config((self.seeded)(job.seed), job.config);

        let mut reports = Vec::new();
        for round in 0..job.rounds {
            tracing::debug!("Round {}/{}", round + 1, job.rounds);
            reports.push(mutator.fuzz(&mut buffer, job.max_changes)?);
        }

        if job.json {
            let mut json = serde_json::to_string_pretty(&reports)?;
            json.push('\n');
            return Ok(json);
        }

        Ok(format!(
            "{}{}\n",
            output::hex_dump(&original, &buffer),
            output::verdict(&original, &buffer)
        ))
    }
}
