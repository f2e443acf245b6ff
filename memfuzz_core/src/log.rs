use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;
use tracing_subscriber::filter::Filtered;
use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::reload;
use tracing_subscriber::util::SubscriberInitExt;

type StderrLayer =
    tracing_subscriber::fmt::Layer<Registry, DefaultFields, Format, fn() -> std::io::Stderr>;
type FilteredStderr = Filtered<StderrLayer, LevelFilter, Registry>;

/// Manual manage the logging behavior of memfuzz. Logs go to stderr so stdout only carries the
/// mutated buffer or the JSON report.
#[derive(Clone)]
pub struct Logger {
    level_filter: LevelFilter,
    reload_handle: reload::Handle<FilteredStderr, Registry>,
}

/// Keeps the logger silent while alive, see [`Logger::mute`].
#[must_use = "the logger is unmuted as soon as the guard is dropped"]
pub struct MuteGuard<'a> {
    logger: &'a Logger,
    previous: LevelFilter,
}

impl Drop for MuteGuard<'_> {
    fn drop(&mut self) {
        self.logger.set_level(self.previous);
    }
}

impl Logger {
    /// Initializes the global `tracing` subscriber. If another subscriber is already installed
    /// it stays in place and the returned handle has no effect.
    #[must_use]
    pub fn init(verbose: bool) -> Self {
        let mut level_filter = LevelFilter::INFO;
        if verbose {
            level_filter = LevelFilter::DEBUG;
        }

        let (fmt_logger, logger) = Self::layer(level_filter);
        if tracing_subscriber::registry()
            .with(fmt_logger)
            .try_init()
            .is_err()
        {
            eprintln!("memfuzz: a tracing subscriber is already installed");
        }
        logger
    }

    fn layer(level_filter: LevelFilter) -> (reload::Layer<FilteredStderr, Registry>, Self) {
        let fmt_logger = tracing_subscriber::fmt::Layer::new()
            .with_writer(std::io::stderr as fn() -> std::io::Stderr)
            .with_filter(level_filter);
        let (fmt_logger, reload_handle) = reload::Layer::new(fmt_logger);
        (
            fmt_logger,
            Self {
                level_filter,
                reload_handle,
            },
        )
    }

    /// The level currently applied to the fmt layer
    #[must_use]
    pub fn level(&self) -> LevelFilter {
        self.reload_handle
            .with_current(|layer| *layer.filter())
            .unwrap_or(self.level_filter)
    }

    /// Silences all log output until the returned guard is dropped.
    pub fn mute(&self) -> MuteGuard<'_> {
        let previous = self.level();
        self.set_level(LevelFilter::OFF);
        MuteGuard {
            logger: self,
            previous,
        }
    }

    fn set_level(&self, level: LevelFilter) {
        // fails only if the layer never got installed, `init` already reported that
        let _ = self
            .reload_handle
            .modify(|layer| *layer.filter_mut() = level);
    }
}
