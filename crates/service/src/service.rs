use std::error::Error;

use crate::error::ErrorKind;
use crate::wire::{ChatReply, ChatRequest, DreamReply};

/// The error type for a Dreamer service.
pub trait ServiceError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns the status code if the error came from an unsuccessful
    /// response.
    fn status(&self) -> Option<u16> {
        None
    }
}

/// A type that represents the remote service, the only thing the chat
/// session talks to.
///
/// Once the service is created, it should behave like a stateless object.
/// It can still have internal state, but callers should not rely on it,
/// and the service should be prepared for being dropped anytime. The
/// returned futures must not borrow the service, so that the session can
/// drive them on a separate task.
pub trait DreamerService: Send + Sync {
    /// The error type that may be returned by the service.
    type Error: ServiceError;

    /// Sends one chat message and waits for the full reply.
    fn send_chat(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static;

    /// Fetches a freshly generated dream.
    fn fetch_dream(
        &self,
    ) -> impl Future<Output = Result<DreamReply, Self::Error>> + Send + 'static;
}
