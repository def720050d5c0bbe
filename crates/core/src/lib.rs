//! Core logic of a chat session: the transcript, the draft, the dream
//! overlay and the single request gate that serializes them.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod error;
pub mod message;
mod service_client;
mod session;
mod state;

pub use error::SessionClosedError;
pub use message::{Message, Role};
pub use session::{Session, SessionBuilder};
pub use state::{FALLBACK_REPLY, SessionState};
