//! The option grammar: option registration, flag parsing and help rendering.
//!
//! Flag syntax is left entirely to `clap`. This module keeps the registered options
//! together with their callbacks, builds a `clap::Command` from them when it is time to
//! parse, and reports which options occurred in which order so the callbacks can run in
//! the order the user typed the flags.

use std::fmt;

use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgAction, Command};
use indexmap::IndexMap;

use crate::error::Result;
use crate::messages::ErrorMessages;

/// Name given to the `clap::Command` built for parsing and help rendering.
const GRAMMAR_NAME: &str = "command-line-boss";

/// Id of the hidden positional that collects every token not bound to an option.
const ARGUMENTS_ID: &str = "__arguments";

pub type FlagCallback<T> = Box<dyn Fn(&mut Context<'_, T>)>;
pub type ValueCallback<T> = Box<dyn Fn(&mut Context<'_, T>, &str)>;

/// What an option callback can reach while it runs.
pub struct Context<'a, T> {
    /// The option state being populated.
    pub options: &'a mut T,
    /// Soft errors; a callback reports bad input here instead of failing.
    pub errors: &'a mut ErrorMessages,
    grammar: &'a OptionGrammar<T>,
}

impl<T> Context<'_, T> {
    /// The rendered help text of the grammar the callback belongs to.
    pub fn help(&self) -> String {
        self.grammar.help()
    }

    pub fn program_name(&self) -> &str {
        self.grammar.program_name()
    }
}

enum Callback<T> {
    Flag(FlagCallback<T>),
    Value(ValueCallback<T>),
}

struct RegisteredOption<T> {
    arg: Arg,
    callback: Callback<T>,
}

enum HelpEntry {
    Option(String),
    Separator(String),
}

/// One use of a registered option on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub index: usize,
    pub id: String,
    pub value: Option<String>,
}

/// The result of running the grammar over a list of arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    /// Option occurrences sorted by their position in the input.
    pub occurrences: Vec<Occurrence>,
    /// Tokens that were not consumed by an option, in input order.
    pub arguments: Vec<String>,
}

pub struct OptionGrammar<T> {
    program_name: String,
    banner: Option<String>,
    options: IndexMap<String, RegisteredOption<T>>,
    entries: Vec<HelpEntry>,
}

impl<T> OptionGrammar<T> {
    pub fn new(program_name: impl Into<String>) -> Self {
        Self {
            program_name: program_name.into(),
            banner: None,
            options: IndexMap::new(),
            entries: Vec::new(),
        }
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// Replaces the default `Usage:` line at the top of the help text.
    pub fn set_banner(&mut self, banner: impl Into<String>) {
        self.banner = Some(banner.into());
    }

    /// Adds a line of text to the help output after the options registered so far.
    pub fn separator(&mut self, text: impl Into<String>) {
        self.entries.push(HelpEntry::Separator(text.into()));
    }

    /// Registers a flag that takes no value.
    ///
    /// The callback runs once if the flag was given, however many times it was repeated.
    pub fn on_flag<F>(&mut self, arg: Arg, callback: F)
    where
        F: Fn(&mut Context<'_, T>) + 'static,
    {
        let arg = arg.action(ArgAction::SetTrue);
        self.register(arg, Callback::Flag(Box::new(callback)));
    }

    /// Registers an option that takes exactly one value.
    ///
    /// The callback runs for every occurrence, in input order, with that occurrence's value.
    /// The token after the option is always taken as its value, even if it starts with `-`.
    pub fn on_value<F>(&mut self, arg: Arg, callback: F)
    where
        F: Fn(&mut Context<'_, T>, &str) + 'static,
    {
        let arg = arg
            .action(ArgAction::Append)
            .num_args(1)
            .allow_hyphen_values(true)
            .value_parser(value_parser!(String));
        self.register(arg, Callback::Value(Box::new(callback)));
    }

    fn register(&mut self, arg: Arg, callback: Callback<T>) {
        let id = arg.get_id().as_str().to_string();
        let replaced = self
            .options
            .insert(id.clone(), RegisteredOption { arg, callback });

        if replaced.is_none() {
            self.entries.push(HelpEntry::Option(id));
        }
    }

    pub fn option_ids(&self) -> Vec<&str> {
        self.options.keys().map(String::as_str).collect()
    }

    /// Renders the help text: banner, then options and separators in registration order.
    pub fn help(&self) -> String {
        let mut help = match &self.banner {
            Some(banner) => banner.clone(),
            None => format!("Usage: {} [options]", self.program_name),
        };
        ensure_newline(&mut help);

        let mut pending: Vec<&Arg> = Vec::new();
        for entry in &self.entries {
            match entry {
                HelpEntry::Option(id) => {
                    if let Some(option) = self.options.get(id) {
                        pending.push(&option.arg);
                    }
                }
                HelpEntry::Separator(text) => {
                    help.push_str(&render_options(&pending));
                    pending.clear();
                    help.push_str(text);
                    ensure_newline(&mut help);
                }
            }
        }
        help.push_str(&render_options(&pending));

        help
    }

    fn command(&self) -> Command {
        Command::new(GRAMMAR_NAME)
            .bin_name(self.program_name.clone())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .args_override_self(true)
            .term_width(0)
            .args(self.options.values().map(|option| option.arg.clone()))
            .arg(
                Arg::new(ARGUMENTS_ID)
                    .action(ArgAction::Append)
                    .num_args(1..)
                    .value_parser(value_parser!(String))
                    .hide(true),
            )
    }

    /// Runs clap over `args` and lists the options that occurred, in input order.
    ///
    /// # Errors
    ///
    /// Returns a grammar error for unknown flags, missing or needless values and
    /// arguments that are not valid UTF-8.
    pub fn parse(&self, args: Vec<String>) -> Result<ParsedOptions> {
        let matches = self.command().try_get_matches_from(args)?;

        let mut occurrences = Vec::new();
        for (id, option) in &self.options {
            if matches.value_source(id) != Some(ValueSource::CommandLine) {
                continue;
            }

            match option.callback {
                Callback::Flag(_) => {
                    if let Some(index) = matches.index_of(id) {
                        occurrences.push(Occurrence {
                            index,
                            id: id.clone(),
                            value: None,
                        });
                    }
                }
                Callback::Value(_) => {
                    let indices = matches.indices_of(id).into_iter().flatten();
                    let values = matches.get_many::<String>(id).into_iter().flatten();
                    for (index, value) in indices.zip(values) {
                        occurrences.push(Occurrence {
                            index,
                            id: id.clone(),
                            value: Some(value.clone()),
                        });
                    }
                }
            }
        }
        occurrences.sort_by_key(|occurrence| occurrence.index);

        let arguments = matches
            .get_many::<String>(ARGUMENTS_ID)
            .into_iter()
            .flatten()
            .cloned()
            .collect();

        Ok(ParsedOptions {
            occurrences,
            arguments,
        })
    }

    /// Parses the longest leading run of `args` the grammar accepts.
    ///
    /// Used after [`parse`](Self::parse) failed, so the options given before the bad
    /// token can still take effect.
    pub fn parse_accepted_prefix(&self, args: &[String]) -> ParsedOptions {
        (0..args.len())
            .rev()
            .find_map(|len| self.parse(args[..len].to_vec()).ok())
            .unwrap_or_default()
    }

    /// Runs the callback registered for `occurrence`.
    pub fn invoke(&self, occurrence: &Occurrence, options: &mut T, errors: &mut ErrorMessages) {
        let Some(option) = self.options.get(&occurrence.id) else {
            return;
        };

        let mut context = Context {
            options,
            errors,
            grammar: self,
        };

        match (&option.callback, occurrence.value.as_deref()) {
            (Callback::Flag(callback), _) => callback(&mut context),
            (Callback::Value(callback), Some(value)) => callback(&mut context, value),
            (Callback::Value(_), None) => {}
        }
    }
}

impl<T> fmt::Debug for OptionGrammar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionGrammar")
            .field("program_name", &self.program_name)
            .field("banner", &self.banner)
            .field("options", &self.option_ids())
            .finish()
    }
}

fn render_options(args: &[&Arg]) -> String {
    if args.is_empty() {
        return String::new();
    }

    let mut command = Command::new(GRAMMAR_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .term_width(0)
        .help_template("{options}")
        .args(args.iter().map(|arg| (*arg).clone()));

    let mut rendered = command.render_help().to_string();
    ensure_newline(&mut rendered);
    rendered
}

fn ensure_newline(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}
