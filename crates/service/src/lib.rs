//! An abstraction layer for the remote Dreamer service.
//!
//! This crate establishes the protocol the chat session uses to talk to
//! the service, so that the session can run against the real HTTP
//! endpoints or an in-process fake without modifying the core codebase.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod service;
mod wire;

pub use error::*;
pub use service::*;
pub use wire::*;
