//! Hook registration for the parsing pipeline.
//!
//! A command line is described by the hooks it registers for each phase. Hooks run in
//! the order they were registered:
//!
//! ```text
//! raw arguments
//!   → SET DEFAULTS      (defaults hooks)
//!   → DEFINE OPTIONS    (decorator `before`s, options hooks, decorator `after`s)
//!   → PARSE OPTIONS     (option callbacks, in the order the flags appear)
//!   → PARSE ARGUMENTS   (the arguments hook, given the leftover tokens)
//!   → VALIDATE          (validation hooks)
//! ```
//!
//! Hooks are keyed by name. Registering a second hook under an existing name replaces
//! the first one without moving it, so an override never runs twice.

use std::collections::VecDeque;
use std::fmt;

use indexmap::IndexMap;

use crate::grammar::OptionGrammar;
use crate::messages::ErrorMessages;

/// Initializes option state before anything is parsed.
pub type DefaultsHook<T> = Box<dyn Fn(&mut T)>;

/// Registers one or more options with the grammar.
pub type OptionsHook<T> = Box<dyn Fn(&mut OptionGrammar<T>)>;

/// Consumes positional arguments left over after option parsing.
pub type ArgumentsHook<T> = Box<dyn Fn(&mut T, &mut VecDeque<String>, &mut ErrorMessages)>;

/// Inspects the parsed options and reports problems. Validation never changes options.
pub type ValidationHook<T> = Box<dyn Fn(&T, &mut ErrorMessages)>;

/// Wraps the define-options phase.
///
/// `before` runs ahead of every options hook and `after` runs once they have all
/// finished. With several decorators, `before`s run in registration order and `after`s
/// in reverse, so the first decorator registered is the outermost one.
pub trait OptionsDecorator<T> {
    fn before(&self, _grammar: &mut OptionGrammar<T>) {}

    fn after(&self, _grammar: &mut OptionGrammar<T>) {}
}

/// The pipeline phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    SetDefaults,
    DefineOptions,
    ParseOptions,
    ParseArguments,
    Validate,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::SetDefaults,
        Phase::DefineOptions,
        Phase::ParseOptions,
        Phase::ParseArguments,
        Phase::Validate,
    ];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::SetDefaults => write!(f, "set-defaults"),
            Phase::DefineOptions => write!(f, "define-options"),
            Phase::ParseOptions => write!(f, "parse-options"),
            Phase::ParseArguments => write!(f, "parse-arguments"),
            Phase::Validate => write!(f, "validate"),
        }
    }
}

/// Named hooks for one phase, kept in registration order.
pub struct HookSet<H> {
    hooks: IndexMap<String, H>,
}

impl<H> HookSet<H> {
    pub fn new() -> Self {
        Self {
            hooks: IndexMap::new(),
        }
    }

    /// Adds a hook at the end, or replaces the hook already registered under `name` in
    /// its current position. Returns the replaced hook.
    pub fn register(&mut self, name: impl Into<String>, hook: H) -> Option<H> {
        self.hooks.insert(name.into(), hook)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &H)> {
        self.hooks.iter().map(|(name, hook)| (name.as_str(), hook))
    }

    pub fn names(&self) -> Vec<&str> {
        self.hooks.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl<H> Default for HookSet<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for HookSet<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.hooks.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hooks_keep_registration_order() {
        let mut hooks: HookSet<u8> = HookSet::new();
        hooks.register("sheet", 1);
        hooks.register("data", 2);
        hooks.register("permission", 3);

        assert_eq!(hooks.names(), vec!["sheet", "data", "permission"]);
        assert_eq!(hooks.len(), 3);
    }

    #[test]
    fn test_override_replaces_in_place() {
        let mut hooks: HookSet<u8> = HookSet::new();
        hooks.register("sheet", 1);
        hooks.register("data", 2);

        let replaced = hooks.register("sheet", 10);

        assert_eq!(replaced, Some(1));
        assert_eq!(hooks.names(), vec!["sheet", "data"]);
        let values: Vec<u8> = hooks.iter().map(|(_, hook)| *hook).collect();
        assert_eq!(values, vec![10, 2]);
    }

    #[test]
    fn test_empty_set() {
        let hooks: HookSet<u8> = HookSet::default();
        assert!(hooks.is_empty());
        assert!(hooks.names().is_empty());
    }

    #[test]
    fn test_phase_display() {
        let names: Vec<String> = Phase::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            vec![
                "set-defaults",
                "define-options",
                "parse-options",
                "parse-arguments",
                "validate"
            ]
        );
    }
}
