use bytes::Bytes;
use mime::Mime;
use reqwest::{Response, header};
use serde::de::DeserializeOwned;

use crate::Error;

/// Turns a response into the expected body, or the reason it isn't one.
pub async fn decode_response<T: DeserializeOwned>(
    resp: Response,
) -> Result<T, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::unsuccessful(status.as_u16()));
    }

    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);
    if let Some(content_type) = &content_type {
        if !is_json(content_type) {
            return Err(Error::malformed(format!(
                "Unexpected content type: {content_type}"
            )));
        }
    }

    let body = resp.bytes().await.map_err(Error::transport)?;
    decode_body(&body)
}

#[inline]
fn decode_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, Error> {
    serde_json::from_slice(body)
        .map_err(|err| Error::malformed(format!("Invalid body: {err}")))
}

fn is_json(content_type: &str) -> bool {
    let Ok(m) = content_type.parse::<Mime>() else {
        return false;
    };
    m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON)
}

#[cfg(test)]
mod tests {
    use dreamer_service::{ChatReply, DreamReply, ErrorKind, ServiceError};

    use super::*;

    #[test]
    fn test_is_json() {
        assert!(is_json("application/json"));
        assert!(is_json("application/json; charset=utf-8"));
        assert!(is_json("application/problem+json"));
        assert!(!is_json("text/html"));
        assert!(!is_json("not a mime"));
    }

    #[test]
    fn test_decode_body() {
        let body = Bytes::from_static(br#"{"dream":"You are flying."}"#);
        let reply: DreamReply = decode_body(&body).unwrap();
        assert_eq!(reply.dream, "You are flying.");

        let body = Bytes::from_static(br#"{"detail":"boom"}"#);
        let err = decode_body::<ChatReply>(&body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }
}
