use std::{fmt, io};

/// Errors that can occur while parsing or executing commands.
#[derive(Debug)]
pub enum SessionError {
    /// Command token does not start with one of the operation letters.
    UnknownCommand(String),
    /// A numeric operand could not be parsed; `arg` is the full token.
    BadOperand { arg: String, reason: NumError },
    /// The underlying file operation failed.
    Io { op: &'static str, source: io::Error },
    /// A write persisted fewer bytes than requested.
    ShortWrite { requested: usize, written: usize },
}

impl SessionError {
    /// True for errors caused by the command line rather than the file,
    /// i.e. the ones worth reprinting usage text for.
    pub fn is_usage(&self) -> bool {
        matches!(self, SessionError::UnknownCommand(_) | SessionError::BadOperand { .. })
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::UnknownCommand(token) => {
                write!(f, "argument must start with one of r, R, w, s: {token}")
            }
            SessionError::BadOperand { arg, reason } => {
                write!(f, "bad numeric operand in {arg}: {reason}")
            }
            SessionError::Io { op, source } => {
                write!(f, "{op} failed: {source}")
            }
            SessionError::ShortWrite { requested, written } => {
                write!(f, "short write: wrote {written} of {requested} bytes")
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Ways a numeric operand can fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumError {
    /// No valid digits at all.
    NotANumber,
    /// Valid digits followed by characters that are not part of the number.
    TrailingGarbage,
    /// The value does not fit the target offset or length type.
    OutOfRange,
}

impl fmt::Display for NumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumError::NotANumber => write!(f, "not a number"),
            NumError::TrailingGarbage => write!(f, "trailing characters after number"),
            NumError::OutOfRange => write!(f, "value out of range"),
        }
    }
}

impl std::error::Error for NumError {}
