//! A service implementation that talks to the Dreamer HTTP API.

#[macro_use]
extern crate tracing;

mod config;
mod decode;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use dreamer_service::{
    ChatReply, ChatRequest, DreamReply, DreamerService, ErrorKind,
    ServiceError,
};
use reqwest::{Client, header};

pub use config::{DEFAULT_BASE_URL, HttpConfig, HttpConfigBuilder};
use decode::decode_response;

/// Error type for [`HttpService`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
    status: Option<u16>,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
            status: None,
        }
    }

    fn transport(err: reqwest::Error) -> Self {
        Self::new(format!("{err}"), ErrorKind::Transport)
    }

    fn unsuccessful(status: u16) -> Self {
        Self {
            message: format!("Unsuccessful status: {status}"),
            kind: ErrorKind::Status,
            status: Some(status),
        }
    }

    fn malformed(message: impl Into<String>) -> Self {
        Self::new(message, ErrorKind::Malformed)
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ServiceError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    fn status(&self) -> Option<u16> {
        self.status
    }
}

/// Dreamer service reached over HTTP.
#[derive(Clone, Debug)]
pub struct HttpService {
    client: Client,
    config: Arc<HttpConfig>,
}

impl HttpService {
    /// Creates a new `HttpService` with the given configuration.
    #[inline]
    pub fn new(config: HttpConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Returns the configuration this service was created with.
    #[inline]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }
}

impl DreamerService for HttpService {
    type Error = Error;

    fn send_chat(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        let url = self.config.endpoint("/chat");
        trace!("POST {url}");
        let resp_fut = self
            .client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .json(req)
            .send();

        async move {
            let resp = resp_fut.await.map_err(Error::transport)?;
            decode_response(resp).await
        }
    }

    fn fetch_dream(
        &self,
    ) -> impl Future<Output = Result<DreamReply, Self::Error>> + Send + 'static
    {
        let url = self.config.endpoint("/dream");
        trace!("GET {url}");
        let resp_fut = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send();

        async move {
            let resp = resp_fut.await.map_err(Error::transport)?;
            decode_response(resp).await
        }
    }
}
