//! Command Line Boss Core Library
//!
//! This crate lets a command-line program be described as a set of hooks. The
//! framework runs them in a fixed order, collects problems as error messages instead of
//! stopping at the first one, and decides how the process ends.
//!
//! # Pipeline
//!
//! 1. **Set defaults**: the option state starts from `Default` and defaults hooks run
//! 2. **Define options**: options hooks register flags and their callbacks with the grammar
//! 3. **Parse options**: `clap` parses the arguments; callbacks run in the order the flags appear
//! 4. **Parse arguments**: the arguments hook consumes the positional arguments
//! 5. **Validate**: validation hooks inspect the options and add error messages
//!
//! The parse succeeded if no error message was added.
//!
//! # Examples
//!
//! ```
//! use clap::Arg;
//! use command_line_boss_core::{CommandLine, HelpOption};
//!
//! #[derive(Debug, Default)]
//! struct Options {
//!     names: Vec<String>,
//! }
//!
//! let command_line = CommandLine::<Options>::new()
//!     .with_option("name", |grammar| {
//!         grammar.on_value(
//!             Arg::new("name").long("name").value_name("NAME").help("Name to greet"),
//!             |ctx, name| ctx.options.names.push(name.to_string()),
//!         );
//!     })
//!     .with_validation("names", |options, errors| {
//!         if options.names.is_empty() {
//!             errors.add("At least one --name is required");
//!         }
//!     })
//!     .with_help(HelpOption::new().footer("Greets everyone named."))
//!     .try_parse(["--name=World"])?;
//!
//! assert!(command_line.succeeded());
//! assert_eq!(command_line.options().names, vec!["World"]);
//! # Ok::<(), command_line_boss_core::error::Error>(())
//! ```

pub mod command_line;
pub mod error;
pub mod grammar;
pub mod help_option;
pub mod hooks;
pub mod logger_options;
pub mod messages;

pub use command_line::{CommandLine, FAILURE_STATUS};
pub use error::{Error, Result};
pub use grammar::{Context, OptionGrammar};
pub use help_option::HelpOption;
pub use hooks::{OptionsDecorator, Phase};
pub use logger_options::{LoggerOptions, ProgressLogger};
pub use messages::ErrorMessages;
