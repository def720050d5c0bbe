use serde::{Deserialize, Serialize};

/// How the fake service answers one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetReply {
    /// Answers successfully with the text.
    #[serde(rename = "text")]
    Text(String),
    /// Fails with an error of the given kind.
    #[serde(rename = "failure")]
    Failure(PresetFailure),
}

impl PresetReply {
    /// Creates a successful reply.
    #[inline]
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self::Text(text.into())
    }
}

/// Mirror of [`dreamer_service::ErrorKind`] that can be stored in a
/// serialized script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetFailure {
    /// See [`dreamer_service::ErrorKind::Transport`].
    Transport,
    /// See [`dreamer_service::ErrorKind::Status`].
    Status(u16),
    /// See [`dreamer_service::ErrorKind::Malformed`].
    Malformed,
}
