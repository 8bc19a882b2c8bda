use clap::error::{ContextKind, ContextValue, ErrorKind};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Exit status used for every grammar error, matching clap's usage error code.
pub const USAGE_STATUS: i32 = 2;

/// A syntax error raised by the option grammar.
///
/// Soft validation problems never end up here; they are collected as messages on the
/// command line instead. Each variant carries the exit status the terminating parse
/// uses when it reports the error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid option: {}", .option)]
    InvalidOption { option: String, status: i32 },

    #[error("missing argument: {}", .option)]
    MissingArgument { option: String, status: i32 },

    #[error("needless argument: {}", .option)]
    NeedlessArgument { option: String, status: i32 },

    #[error("invalid argument: {}", .detail)]
    InvalidArgument { detail: String, status: i32 },
}

impl Error {
    pub fn invalid_option(option: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            status: USAGE_STATUS,
        }
    }

    pub fn missing_argument(option: impl Into<String>) -> Self {
        Self::MissingArgument {
            option: option.into(),
            status: USAGE_STATUS,
        }
    }

    pub fn needless_argument(option: impl Into<String>) -> Self {
        Self::NeedlessArgument {
            option: option.into(),
            status: USAGE_STATUS,
        }
    }

    pub fn invalid_argument(detail: impl Into<String>) -> Self {
        Self::InvalidArgument {
            detail: detail.into(),
            status: USAGE_STATUS,
        }
    }

    /// The process exit status for this error.
    pub fn status(&self) -> i32 {
        match self {
            Self::InvalidOption { status, .. }
            | Self::MissingArgument { status, .. }
            | Self::NeedlessArgument { status, .. }
            | Self::InvalidArgument { status, .. } => *status,
        }
    }
}

impl From<clap::Error> for Error {
    fn from(error: clap::Error) -> Self {
        let status = error.exit_code();
        let option = context_string(&error, ContextKind::InvalidArg);

        match (error.kind(), option) {
            (ErrorKind::UnknownArgument, Some(option)) => Self::InvalidOption { option, status },
            (ErrorKind::InvalidValue, Some(option))
                if context_string(&error, ContextKind::InvalidValue)
                    .map_or(true, |value| value.is_empty()) =>
            {
                Self::MissingArgument { option, status }
            }
            (
                ErrorKind::NoEquals | ErrorKind::TooFewValues | ErrorKind::WrongNumberOfValues,
                Some(option),
            ) => Self::MissingArgument { option, status },
            (ErrorKind::TooManyValues, Some(option)) => Self::NeedlessArgument { option, status },
            _ => Self::InvalidArgument {
                detail: first_line(&error),
                status,
            },
        }
    }
}

fn context_string(error: &clap::Error, kind: ContextKind) -> Option<String> {
    match error.get(kind) {
        Some(ContextValue::String(value)) => Some(value.clone()),
        _ => None,
    }
}

/// The headline of a rendered clap error, without the `error: ` prefix.
fn first_line(error: &clap::Error) -> String {
    let rendered = error.to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).trim().to_string()
}
