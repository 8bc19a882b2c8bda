//! The `--verbose` and `--debug` options and the progress logger they select.
//!
//! The option state embeds a [`LoggerOptions`] and exposes it through `AsRef` and
//! `AsMut`; [`CommandLine::with_logger_options`] then adds both flags and a validation
//! that rejects giving them together.

use std::fmt::{self, Display};
use std::io::Write;

use clap::Arg;
use env_logger::{Builder, Target};
use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::unsync::OnceCell;

use crate::command_line::CommandLine;
use crate::grammar::OptionGrammar;
use crate::messages::ErrorMessages;

pub const VERBOSE_HOOK_NAME: &str = "verbose";
pub const DEBUG_HOOK_NAME: &str = "debug";
pub const DEBUG_VERBOSE_HOOK_NAME: &str = "debug_verbose_option";

pub const CONFLICTING_FLAGS_MESSAGE: &str = "Can not give both --debug and --verbose";

/// Target attached to records written through a [`ProgressLogger`].
const LOG_TARGET: &str = "progress";

/// Logger used to report progress to the user.
pub enum ProgressLogger {
    /// Writes each message on its own line to stdout.
    Console(env_logger::Logger),
    /// Discards everything and has no output device.
    Null,
}

impl ProgressLogger {
    pub fn console(level: LevelFilter) -> Self {
        let logger = Builder::new()
            .filter_level(level)
            .format(|buf, record| writeln!(buf, "{}", record.args()))
            .target(Target::Stdout)
            .build();

        Self::Console(logger)
    }

    pub fn null() -> Self {
        Self::Null
    }

    /// The most verbose level this logger writes. `Off` for the null logger.
    pub fn level(&self) -> LevelFilter {
        match self {
            Self::Console(logger) => logger.filter(),
            Self::Null => LevelFilter::Off,
        }
    }

    pub fn has_output(&self) -> bool {
        matches!(self, Self::Console(_))
    }

    pub fn info(&self, message: impl Display) {
        self.write(Level::Info, message);
    }

    pub fn debug(&self, message: impl Display) {
        self.write(Level::Debug, message);
    }

    fn write(&self, level: Level, message: impl Display) {
        self.log(
            &Record::builder()
                .args(format_args!("{message}"))
                .level(level)
                .target(LOG_TARGET)
                .build(),
        );
    }
}

impl Log for ProgressLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        match self {
            Self::Console(logger) => logger.enabled(metadata),
            Self::Null => false,
        }
    }

    fn log(&self, record: &Record<'_>) {
        if let Self::Console(logger) = self {
            logger.log(record);
        }
    }

    fn flush(&self) {
        if let Self::Console(logger) = self {
            logger.flush();
        }
    }
}

impl fmt::Debug for ProgressLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Console(logger) => f.debug_tuple("Console").field(&logger.filter()).finish(),
            Self::Null => write!(f, "Null"),
        }
    }
}

/// State behind `--verbose` and `--debug`.
#[derive(Default)]
pub struct LoggerOptions {
    verbose: bool,
    debug: bool,
    logger: OnceCell<ProgressLogger>,
}

impl LoggerOptions {
    /// True if `--verbose` was given.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// True if `--debug` was given.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// The logger to report progress with, chosen the first time it is asked for.
    ///
    /// * `--verbose`: writes info messages to stdout
    /// * `--debug`: writes debug and info messages to stdout
    /// * neither: a null logger that writes nothing
    pub fn logger(&self) -> &ProgressLogger {
        self.logger.get_or_init(|| {
            if self.verbose {
                ProgressLogger::console(LevelFilter::Info)
            } else if self.debug {
                ProgressLogger::console(LevelFilter::Debug)
            } else {
                ProgressLogger::null()
            }
        })
    }

    pub fn define_verbose_option<T: AsMut<LoggerOptions>>(grammar: &mut OptionGrammar<T>) {
        grammar.on_flag(
            Arg::new(VERBOSE_HOOK_NAME)
                .short('v')
                .long("verbose")
                .help("Enable verbose mode (default is off)"),
            |ctx| ctx.options.as_mut().verbose = true,
        );
    }

    pub fn define_debug_option<T: AsMut<LoggerOptions>>(grammar: &mut OptionGrammar<T>) {
        grammar.on_flag(
            Arg::new(DEBUG_HOOK_NAME)
                .short('D')
                .long("debug")
                .help("Enable debug mode (default is off)"),
            |ctx| ctx.options.as_mut().debug = true,
        );
    }

    pub fn validate_debug_verbose_option<T: AsRef<LoggerOptions>>(
        options: &T,
        errors: &mut ErrorMessages,
    ) {
        let logger_options = options.as_ref();
        if logger_options.debug && logger_options.verbose {
            errors.add(CONFLICTING_FLAGS_MESSAGE);
        }
    }
}

impl PartialEq for LoggerOptions {
    fn eq(&self, other: &Self) -> bool {
        self.verbose == other.verbose && self.debug == other.debug
    }
}

impl Eq for LoggerOptions {}

impl fmt::Debug for LoggerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerOptions")
            .field("verbose", &self.verbose)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl AsRef<LoggerOptions> for LoggerOptions {
    fn as_ref(&self) -> &LoggerOptions {
        self
    }
}

impl AsMut<LoggerOptions> for LoggerOptions {
    fn as_mut(&mut self) -> &mut LoggerOptions {
        self
    }
}

impl<T> CommandLine<T>
where
    T: Default + AsRef<LoggerOptions> + AsMut<LoggerOptions> + 'static,
{
    /// Adds `--verbose` / `-v`, `--debug` / `-D` and the check that only one is given.
    pub fn with_logger_options(self) -> Self {
        self.with_option(VERBOSE_HOOK_NAME, LoggerOptions::define_verbose_option)
            .with_option(DEBUG_HOOK_NAME, LoggerOptions::define_debug_option)
            .with_validation(
                DEBUG_VERBOSE_HOOK_NAME,
                LoggerOptions::validate_debug_verbose_option,
            )
    }
}
