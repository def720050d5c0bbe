use std::pin::Pin;
use std::sync::Arc;

use dreamer_service::{
    ChatReply, ChatRequest, DreamReply, DreamerService, ServiceError,
};
use tracing::Instrument;

pub type BoxedServiceError = Box<dyn ServiceError>;
pub type ChatResult = Result<ChatReply, BoxedServiceError>;
pub type DreamResult = Result<DreamReply, BoxedServiceError>;

type BoxedFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;
type ChatFn = Arc<dyn Fn(ChatRequest) -> BoxedFuture<ChatResult> + Send + Sync>;
type DreamFn = Arc<dyn Fn() -> BoxedFuture<DreamResult> + Send + Sync>;

/// A wrapper around a service that provides a type-erased interface for
/// the session loop.
#[derive(Clone)]
pub struct ServiceClient {
    chat_fn: ChatFn,
    dream_fn: DreamFn,
}

impl ServiceClient {
    pub fn new<S: DreamerService + 'static>(service: S) -> Self {
        // The session doesn't carry a generic parameter for the service,
        // so both operations are erased into closures sharing it.
        let service = Arc::new(service);

        let chat_fn: ChatFn = {
            let service = Arc::clone(&service);
            Arc::new(move |req: ChatRequest| -> BoxedFuture<ChatResult> {
                let fut = service.send_chat(&req);
                Box::pin(
                    async move {
                        trace!("sending: {:?}", req);
                        match fut.await {
                            Ok(reply) => {
                                trace!("got a reply: {:?}", reply);
                                Ok(reply)
                            }
                            Err(err) => Err(Box::new(err) as BoxedServiceError),
                        }
                    }
                    .instrument(trace_span!("chat request")),
                )
            })
        };

        let dream_fn: DreamFn = Arc::new(move || -> BoxedFuture<DreamResult> {
            let fut = service.fetch_dream();
            Box::pin(
                async move {
                    fut.await.map_err(|err| Box::new(err) as BoxedServiceError)
                }
                .instrument(trace_span!("dream request")),
            )
        });

        Self { chat_fn, dream_fn }
    }

    /// Sends a chat message.
    ///
    /// The request is issued right away, the returned future doesn't
    /// borrow the client.
    #[inline]
    pub fn send_chat(&self, req: ChatRequest) -> BoxedFuture<ChatResult> {
        (self.chat_fn)(req)
    }

    /// Fetches a dream.
    #[inline]
    pub fn fetch_dream(&self) -> BoxedFuture<DreamResult> {
        (self.dream_fn)()
    }
}

#[cfg(test)]
mod tests {
    use dreamer_service::ErrorKind;
    use dreamer_test_service::{PresetFailure, PresetReply, TestService};

    use super::*;

    #[tokio::test]
    async fn test_send_chat() {
        let mut service = TestService::default();
        service.add_chat_reply(PresetReply::text("How are you?"));
        let client = ServiceClient::new(service.clone());

        let reply = client.send_chat(ChatRequest::new("Hi")).await.unwrap();
        assert_eq!(reply.response, "How are you?");
        assert_eq!(service.chat_requests(), [ChatRequest::new("Hi")]);
    }

    #[tokio::test]
    async fn test_error_handling() {
        let mut service = TestService::default();
        service.add_dream_reply(PresetReply::Failure(PresetFailure::Malformed));
        let client = ServiceClient::new(service);

        let err = client.fetch_dream().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);

        let err = client.send_chat(ChatRequest::new("Hi")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
