//! Errors raised while parsing command scripts.

use gator_core::error::AppError;
use thiserror::Error;

/// A malformed script line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The line is not of the form `Name(args)`.
    #[error("expected `Name(args)`, found `{text}`")]
    MissingParen {
        /// The offending text.
        text: String,
    },

    /// The command name is not recognized.
    #[error("unknown command `{name}`")]
    UnknownCommand {
        /// The unrecognized name.
        name: String,
    },

    /// An argument is not an integer.
    #[error("argument `{text}` of {command} is not an integer")]
    BadArgument {
        /// The command being parsed.
        command: &'static str,
        /// The offending argument.
        text: String,
    },

    /// Wrong number of arguments.
    #[error("{command} takes {expected} argument(s), found {found}")]
    Arity {
        /// The command being parsed.
        command: &'static str,
        /// Required count.
        expected: usize,
        /// Supplied count.
        found: usize,
    },

    /// A parse error annotated with its 1-based line number.
    #[error("line {line}: {source}")]
    AtLine {
        /// 1-based line number in the script.
        line: usize,
        /// The underlying error.
        #[source]
        source: Box<ScriptError>,
    },
}

impl ScriptError {
    /// Attach a 1-based line number.
    pub fn at_line(self, line: usize) -> Self {
        Self::AtLine {
            line,
            source: Box::new(self),
        }
    }
}

impl From<ScriptError> for AppError {
    fn from(err: ScriptError) -> Self {
        AppError::validation(err.to_string())
    }
}
