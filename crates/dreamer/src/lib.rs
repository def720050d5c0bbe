//! A terminal client for the Dreamer service.
//!
//! The crate includes a CLI tool for chatting in the terminal. And you
//! can also use it as a library to wire the HTTP service into a session
//! of your own, reusing the terminal rendering if it suits you.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

mod session;
pub mod view;

pub use dreamer_http_service::{HttpConfig, HttpConfigBuilder};
pub use session::{Session, SessionBuilder};

/// Re-exports of [`dreamer_core`] crate.
pub mod core {
    pub use dreamer_core::*;
}
