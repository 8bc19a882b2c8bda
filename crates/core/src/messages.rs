//! Soft error accumulation.
//!
//! Every phase of the pipeline may report problems by appending a message here. Nothing
//! in the pipeline stops because a message was added; the messages are reported together
//! once every phase has run.

use std::fmt::{Display, Formatter};

/// Ordered, append-only list of human-readable error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMessages {
    messages: Vec<String>,
}

impl ErrorMessages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message. Duplicates are kept.
    pub fn add(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// All messages in the order they were added.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a ErrorMessages {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ErrorMessages {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

/// One message per line.
impl Display for ErrorMessages {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        for message in &self.messages {
            writeln!(formatter, "{message}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let errors = ErrorMessages::new();
        assert!(errors.is_empty());
        assert_eq!(errors.len(), 0);
        assert!(errors.messages().is_empty());
    }

    #[test]
    fn test_add_preserves_order_and_duplicates() {
        let mut errors = ErrorMessages::new();
        errors.add("first");
        errors.add("second".to_string());
        errors.add("first");

        assert_eq!(errors.messages(), ["first", "second", "first"]);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_display_writes_one_message_per_line() {
        let mut errors = ErrorMessages::new();
        errors.add("Invalid permission: bogus");
        errors.add("Only one --folder option is allowed");

        assert_eq!(
            errors.to_string(),
            "Invalid permission: bogus\nOnly one --folder option is allowed\n"
        );
    }

    #[test]
    fn test_into_iter() {
        let mut errors = ErrorMessages::new();
        errors.add("a");
        errors.add("b");

        let borrowed: Vec<&String> = (&errors).into_iter().collect();
        assert_eq!(borrowed, ["a", "b"]);

        let owned: Vec<String> = errors.into_iter().collect();
        assert_eq!(owned, vec!["a".to_string(), "b".to_string()]);
    }
}
