use std::fmt::{self, Display};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request never produced a response, e.g. the host is
    /// unreachable or the connection was reset.
    Transport,
    /// A response was received, but with a non-success status.
    Status,
    /// A successful response whose body is not what the endpoint
    /// promises.
    Malformed,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "Transport failure"),
            ErrorKind::Status => write!(f, "Unsuccessful status"),
            ErrorKind::Malformed => write!(f, "Malformed response"),
        }
    }
}
