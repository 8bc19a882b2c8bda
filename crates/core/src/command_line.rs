//! The parsing pipeline.
//!
//! [`CommandLine`] owns everything one invocation needs: the option state, the option
//! grammar, the registered hooks and the accumulated error messages. Hooks are
//! registered with the `with_*` builder methods and the pipeline is run with either
//! [`CommandLine::try_parse`], which never ends the process, or [`CommandLine::parse`],
//! which reports problems and exits.

use std::collections::VecDeque;
use std::fmt;
use std::path::Path;
use std::process;

use log::debug;

use crate::error::Result;
use crate::grammar::{OptionGrammar, Occurrence};
use crate::hooks::{
    ArgumentsHook, DefaultsHook, HookSet, OptionsDecorator, OptionsHook, Phase, ValidationHook,
};
use crate::messages::ErrorMessages;

/// Exit status used by [`CommandLine::parse`] when validation errors were collected.
pub const FAILURE_STATUS: i32 = 1;

/// Program name used when none can be taken from the process arguments.
const DEFAULT_PROGRAM_NAME: &str = "command";

/// Name reported for the single arguments hook.
const ARGUMENTS_HOOK_NAME: &str = "parse_arguments";

pub struct CommandLine<T> {
    program_name: String,
    defaults: HookSet<DefaultsHook<T>>,
    option_definitions: HookSet<OptionsHook<T>>,
    arguments: Option<ArgumentsHook<T>>,
    validations: HookSet<ValidationHook<T>>,
    decorators: Vec<Box<dyn OptionsDecorator<T>>>,
    grammar: OptionGrammar<T>,
    options: T,
    errors: ErrorMessages,
    args: VecDeque<String>,
}

impl<T: Default> CommandLine<T> {
    pub fn new() -> Self {
        let program_name = default_program_name();
        Self {
            grammar: OptionGrammar::new(program_name.clone()),
            program_name,
            defaults: HookSet::new(),
            option_definitions: HookSet::new(),
            arguments: None,
            validations: HookSet::new(),
            decorators: Vec::new(),
            options: T::default(),
            errors: ErrorMessages::new(),
            args: VecDeque::new(),
        }
    }

    /// Sets the program name shown in the default usage line.
    pub fn with_program_name(mut self, program_name: impl Into<String>) -> Self {
        self.program_name = program_name.into();
        self.grammar = OptionGrammar::new(self.program_name.clone());
        self
    }

    /// Registers a hook that initializes option state before parsing.
    pub fn with_defaults<F>(mut self, name: &str, hook: F) -> Self
    where
        F: Fn(&mut T) + 'static,
    {
        self.defaults.register(name, Box::new(hook));
        self
    }

    /// Registers a hook that defines options on the grammar.
    pub fn with_option<F>(mut self, name: &str, hook: F) -> Self
    where
        F: Fn(&mut OptionGrammar<T>) + 'static,
    {
        self.option_definitions.register(name, Box::new(hook));
        self
    }

    /// Sets the hook that consumes the positional arguments left after option parsing.
    pub fn with_arguments<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut T, &mut VecDeque<String>, &mut ErrorMessages) + 'static,
    {
        self.arguments = Some(Box::new(hook));
        self
    }

    /// Registers a validation hook.
    pub fn with_validation<F>(mut self, name: &str, hook: F) -> Self
    where
        F: Fn(&T, &mut ErrorMessages) + 'static,
    {
        self.validations.register(name, Box::new(hook));
        self
    }

    /// Wraps the define-options phase with `decorator`.
    pub fn with_decorator<D>(mut self, decorator: D) -> Self
    where
        D: OptionsDecorator<T> + 'static,
    {
        self.decorators.push(Box::new(decorator));
        self
    }

    /// Runs the whole pipeline and returns the populated command line.
    ///
    /// Problems found by option callbacks and validations are collected in
    /// [`error_messages`](Self::error_messages); check [`succeeded`](Self::succeeded).
    ///
    /// # Errors
    ///
    /// Returns the grammar's error when the arguments cannot be parsed at all, for
    /// example because of an unknown flag.
    pub fn try_parse<I, S>(mut self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run(args.into_iter().map(Into::into).collect())?;
        Ok(self)
    }

    /// Runs the whole pipeline, exiting the process if it did not succeed.
    ///
    /// A grammar error is printed to stderr with the help text and the process exits
    /// with the error's status. Collected error messages are printed to stderr one per
    /// line and the process exits with [`FAILURE_STATUS`].
    pub fn parse<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Err(error) = self.run(args.into_iter().map(Into::into).collect()) {
            eprintln!("{error}");
            eprint!("{}", self.help());
            process::exit(error.status());
        }

        if self.failed() {
            eprint!("{}", self.errors);
            process::exit(FAILURE_STATUS);
        }

        self
    }

    fn run(&mut self, args: Vec<String>) -> Result<()> {
        debug!("Parsing command line for `{}`: {:?}", self.program_name, args);

        self.options = T::default();
        self.errors = ErrorMessages::new();
        self.args = VecDeque::new();
        self.grammar = OptionGrammar::new(self.program_name.clone());

        self.set_defaults();
        self.define_options();
        for phase in Phase::ALL {
            debug!("{phase} hooks: {:?}", self.hook_names(phase));
        }
        self.parse_options(args)?;
        self.parse_arguments();
        self.validate();

        debug!(
            "Finished parsing `{}` with {} error(s)",
            self.program_name,
            self.errors.len()
        );
        Ok(())
    }
}

impl<T: Default> Default for CommandLine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CommandLine<T> {
    fn set_defaults(&mut self) {
        for (name, hook) in self.defaults.iter() {
            debug!("Running {} hook `{name}`", Phase::SetDefaults);
            hook(&mut self.options);
        }
    }

    fn define_options(&mut self) {
        for decorator in &self.decorators {
            decorator.before(&mut self.grammar);
        }

        for (name, hook) in self.option_definitions.iter() {
            debug!("Running {} hook `{name}`", Phase::DefineOptions);
            hook(&mut self.grammar);
        }

        for decorator in self.decorators.iter().rev() {
            decorator.after(&mut self.grammar);
        }
    }

    fn parse_options(&mut self, args: Vec<String>) -> Result<()> {
        let parsed = match self.grammar.parse(args.clone()) {
            Ok(parsed) => parsed,
            Err(error) => {
                // Options before the bad token still run.
                let accepted = self.grammar.parse_accepted_prefix(&args);
                for occurrence in &accepted.occurrences {
                    debug!("Running {} callback for `{}`", Phase::ParseOptions, occurrence.id);
                    self.invoke(occurrence);
                }
                return Err(error);
            }
        };

        for occurrence in &parsed.occurrences {
            debug!("Running {} callback for `{}`", Phase::ParseOptions, occurrence.id);
            self.invoke(occurrence);
        }

        self.args = parsed.arguments.into();
        Ok(())
    }

    fn invoke(&mut self, occurrence: &Occurrence) {
        self.grammar
            .invoke(occurrence, &mut self.options, &mut self.errors);
    }

    fn parse_arguments(&mut self) {
        if let Some(hook) = &self.arguments {
            debug!("Running {} hook `{ARGUMENTS_HOOK_NAME}`", Phase::ParseArguments);
            hook(&mut self.options, &mut self.args, &mut self.errors);
        }
    }

    fn validate(&mut self) {
        for (name, hook) in self.validations.iter() {
            debug!("Running {} hook `{name}`", Phase::Validate);
            hook(&self.options, &mut self.errors);
        }
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// The parsed option state.
    pub fn options(&self) -> &T {
        &self.options
    }

    pub fn into_options(self) -> T {
        self.options
    }

    pub fn error_messages(&self) -> &[String] {
        self.errors.messages()
    }

    pub fn errors(&self) -> &ErrorMessages {
        &self.errors
    }

    /// True if no error messages were collected.
    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }

    /// True if any error message was collected.
    pub fn failed(&self) -> bool {
        !self.succeeded()
    }

    /// Positional arguments the arguments hook left unconsumed.
    pub fn args(&self) -> &VecDeque<String> {
        &self.args
    }

    pub fn grammar(&self) -> &OptionGrammar<T> {
        &self.grammar
    }

    pub fn help(&self) -> String {
        self.grammar.help()
    }

    /// Names of the hooks registered for `phase`, in the order they run.
    ///
    /// For [`Phase::ParseOptions`] these are the ids of the options defined so far.
    pub fn hook_names(&self, phase: Phase) -> Vec<&str> {
        match phase {
            Phase::SetDefaults => self.defaults.names(),
            Phase::DefineOptions => self.option_definitions.names(),
            Phase::ParseOptions => self.grammar.option_ids(),
            Phase::ParseArguments => self
                .arguments
                .as_ref()
                .map(|_| vec![ARGUMENTS_HOOK_NAME])
                .unwrap_or_default(),
            Phase::Validate => self.validations.names(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CommandLine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandLine")
            .field("program_name", &self.program_name)
            .field("options", &self.options)
            .field("errors", &self.errors)
            .field("args", &self.args)
            .field("defaults", &self.defaults)
            .field("option_definitions", &self.option_definitions)
            .field("validations", &self.validations)
            .finish_non_exhaustive()
    }
}

fn default_program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_string())
}
