//! The `--help` option.
//!
//! Attaching a [`HelpOption`] adds `-h` / `--help` and decorates the define-options
//! phase so the help text starts with an optional banner and header and ends with an
//! optional footer.

use std::io::{self, Write};
use std::process;

use clap::Arg;

use crate::command_line::CommandLine;
use crate::grammar::OptionGrammar;
use crate::hooks::OptionsDecorator;

/// Name of the options hook that defines `--help`.
pub const HELP_HOOK_NAME: &str = "help";

/// Texts placed around the option list in the help output. Each one is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpOption {
    banner: Option<String>,
    header: Option<String>,
    footer: Option<String>,
}

impl HelpOption {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the default usage line at the top of the help text.
    pub fn banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = Some(banner.into());
        self
    }

    /// Text shown after the banner, before the options.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Text shown after the options.
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Defines `-h` / `--help`, which prints the help text to stdout and exits with
    /// status 0.
    pub fn define_help_option<T>(grammar: &mut OptionGrammar<T>) {
        grammar.on_flag(
            Arg::new(HELP_HOOK_NAME)
                .short('h')
                .long("help")
                .help("Show this message"),
            |ctx| {
                print!("{}", ctx.help());
                let _ = io::stdout().flush();
                process::exit(0);
            },
        );
    }
}

impl<T> OptionsDecorator<T> for HelpOption {
    fn before(&self, grammar: &mut OptionGrammar<T>) {
        if let Some(banner) = &self.banner {
            grammar.set_banner(banner.clone());
        }

        if let Some(header) = &self.header {
            grammar.separator(header.clone());
        }
    }

    fn after(&self, grammar: &mut OptionGrammar<T>) {
        if let Some(footer) = &self.footer {
            grammar.separator(footer.clone());
        }
    }
}

impl<T: Default + 'static> CommandLine<T> {
    /// Adds `--help` and the help texts of `help`.
    pub fn with_help(self, help: HelpOption) -> Self {
        self.with_decorator(help)
            .with_option(HELP_HOOK_NAME, HelpOption::define_help_option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::Phase;

    #[derive(Debug, Default)]
    struct Options;

    fn parsed(help: HelpOption) -> CommandLine<Options> {
        CommandLine::<Options>::new()
            .with_program_name("report")
            .with_option("quiet", |grammar| {
                grammar.on_flag(Arg::new("quiet").long("quiet").help("Say less"), |_| {});
            })
            .with_help(help)
            .try_parse(Vec::<String>::new())
            .unwrap()
    }

    #[test]
    fn test_help_option_is_registered() {
        let command_line = parsed(HelpOption::new());

        assert_eq!(
            command_line.hook_names(Phase::DefineOptions),
            vec!["quiet", HELP_HOOK_NAME]
        );
        assert_eq!(
            command_line.hook_names(Phase::ParseOptions),
            vec!["quiet", HELP_HOOK_NAME]
        );
    }

    #[test]
    fn test_help_without_texts_uses_usage_line() {
        let help = parsed(HelpOption::new()).help();

        assert!(help.starts_with("Usage: report [options]\n"));
        assert!(help.contains("-h, --help"));
        assert!(help.contains("Show this message"));
        assert!(help.contains("--quiet"));
    }

    #[test]
    fn test_banner_header_and_footer_surround_options() {
        let help = parsed(
            HelpOption::new()
                .banner("Make a report")
                .header("Options:")
                .footer("See the manual for more."),
        )
        .help();

        assert!(help.starts_with("Make a report\n"));
        assert!(!help.contains("Usage: report"));

        let header = help.find("Options:").unwrap();
        let quiet = help.find("--quiet").unwrap();
        let help_flag = help.find("--help").unwrap();
        let footer = help.find("See the manual for more.").unwrap();
        assert!(header < quiet && quiet < help_flag && help_flag < footer);
    }

    #[test]
    fn test_footer_only() {
        let help = parsed(HelpOption::new().footer("ROLE := reader | writer")).help();

        assert!(help.starts_with("Usage: report [options]\n"));
        assert!(help.trim_end().ends_with("ROLE := reader | writer"));
    }
}
