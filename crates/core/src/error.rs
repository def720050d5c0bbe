use std::error::Error;
use std::fmt;

/// A type of error which can be returned when the session loop has
/// already terminated.
pub struct SessionClosedError;

impl fmt::Debug for SessionClosedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionClosedError").finish()
    }
}

impl fmt::Display for SessionClosedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "the session has closed".fmt(f)
    }
}

impl Error for SessionClosedError {}
