#![forbid(unsafe_code)]

//! Error taxonomy for the core.
//!
//! Four failure classes exist, and only one is fatal:
//!
//! - [`Error::MissingCapability`]: a mandatory terminal capability could not
//!   be obtained at construction. Fatal to surface construction.
//! - [`Error::StackUnderflow`] / [`Error::BadParameterSelector`]: a capability
//!   template is inconsistent. These are programmer errors; the interpreter
//!   fails before emitting any output rather than writing a corrupted
//!   sequence.
//! - [`Error::Io`]: the sink or the terminal database failed.
//!
//! Transient conditions are deliberately *not* represented here: a failed
//! dimension refresh is reported as `false` with cached values retained, and
//! an unrecognized escape sequence is a [`crate::input::Resolution::NoMatch`],
//! never an error.

use std::fmt;
use std::io;

/// Core error type.
#[derive(Debug)]
pub enum Error {
    /// A mandatory capability was absent from the terminal database.
    MissingCapability(&'static str),

    /// A `%d` directive popped an empty operand stack.
    StackUnderflow,

    /// A `%p` directive carried a selector other than `1` or `2`.
    ///
    /// `None` means the template ended immediately after `%p`.
    BadParameterSelector(Option<u8>),

    /// I/O failure talking to the sink or the terminal database.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCapability(name) => {
                write!(f, "mandatory terminal capability `{name}` is unavailable")
            }
            Self::StackUnderflow => {
                write!(f, "capability template popped an empty operand stack")
            }
            Self::BadParameterSelector(Some(byte)) => {
                write!(
                    f,
                    "capability template has `%p` with unsupported selector {:?}",
                    char::from(*byte)
                )
            }
            Self::BadParameterSelector(None) => {
                write!(f, "capability template ends inside a `%p` directive")
            }
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for core APIs.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_capability() {
        let err = Error::MissingCapability("cup");
        assert!(err.to_string().contains("cup"));
    }

    #[test]
    fn io_error_is_the_source() {
        use std::error::Error as _;
        let err = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        assert!(err.source().is_some());
    }

    #[test]
    fn selector_display_covers_both_shapes() {
        assert!(
            Error::BadParameterSelector(Some(b'3'))
                .to_string()
                .contains('3')
        );
        assert!(
            Error::BadParameterSelector(None)
                .to_string()
                .contains("ends inside")
        );
    }
}
