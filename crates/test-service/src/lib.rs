//! A local fake service for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use dreamer_service::{
    ChatReply, ChatRequest, DreamReply, DreamerService, ErrorKind,
    ServiceError,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
    status: Option<u16>,
}

impl Error {
    fn from_preset(failure: PresetFailure) -> Self {
        match failure {
            PresetFailure::Transport => Self {
                message: "preset transport failure",
                kind: ErrorKind::Transport,
                status: None,
            },
            PresetFailure::Status(status) => Self {
                message: "preset status failure",
                kind: ErrorKind::Status,
                status: Some(status),
            },
            PresetFailure::Malformed => Self {
                message: "preset malformed response",
                kind: ErrorKind::Malformed,
                status: None,
            },
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
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

#[derive(Default)]
struct Script {
    chat_replies: VecDeque<PresetReply>,
    dream_replies: VecDeque<PresetReply>,
    chat_requests: Vec<ChatRequest>,
    dream_fetches: usize,
}

/// A local fake service for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how
/// the service should answer each request. Chat replies and dream replies
/// are consumed from two separate queues in order. If a queue runs out,
/// the request fails with a transport error, like an unreachable host.
///
/// Clones share the same script and request log, so a test can keep one
/// clone for inspection after handing another one to a session.
#[derive(Clone, Default)]
pub struct TestService {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
}

impl TestService {
    #[inline]
    pub fn add_chat_reply(&mut self, reply: PresetReply) {
        self.lock().chat_replies.push_back(reply);
    }

    #[inline]
    pub fn add_dream_reply(&mut self, reply: PresetReply) {
        self.lock().dream_replies.push_back(reply);
    }

    /// Every answer is delayed by `duration` before resolving.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns the chat requests received so far.
    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.lock().chat_requests.clone()
    }

    /// Returns how many times a dream was fetched.
    pub fn dream_fetches(&self) -> usize {
        self.lock().dream_fetches
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        // A panicking test thread may poison the lock, the script is
        // still usable for the remaining assertions.
        self.script.lock().unwrap_or_else(|err| err.into_inner())
    }

    fn answer(
        &self,
        reply: Option<PresetReply>,
    ) -> impl Future<Output = Result<String, Error>> + Send + 'static {
        let delay = self.delay.unwrap_or(Duration::from_millis(1));
        async move {
            sleep(delay).await;
            match reply {
                Some(PresetReply::Text(text)) => Ok(text),
                Some(PresetReply::Failure(failure)) => {
                    Err(Error::from_preset(failure))
                }
                None => Err(Error {
                    message: "no enough replies",
                    kind: ErrorKind::Transport,
                    status: None,
                }),
            }
        }
    }
}

impl DreamerService for TestService {
    type Error = crate::Error;

    fn send_chat(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        let reply = {
            let mut script = self.lock();
            script.chat_requests.push(req.clone());
            script.chat_replies.pop_front()
        };
        let answer = self.answer(reply);
        async move { answer.await.map(ChatReply::new) }
    }

    fn fetch_dream(
        &self,
    ) -> impl Future<Output = Result<DreamReply, Self::Error>> + Send + 'static
    {
        let reply = {
            let mut script = self.lock();
            script.dream_fetches += 1;
            script.dream_replies.pop_front()
        };
        let answer = self.answer(reply);
        async move { answer.await.map(|dream| DreamReply { dream }) }
    }
}

impl Debug for TestService {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let script = self.lock();
        f.debug_struct("TestService")
            .field("chat_replies", &script.chat_replies)
            .field("dream_replies", &script.dream_replies)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_chat() {
        let mut service = TestService::default();
        service.add_chat_reply(PresetReply::text("Hello, world!"));
        service.add_chat_reply(PresetReply::Failure(PresetFailure::Status(
            500,
        )));

        let reply = service
            .send_chat(&ChatRequest::new("Hi"))
            .await
            .unwrap();
        assert_eq!(reply.response, "Hello, world!");

        let err = service
            .send_chat(&ChatRequest::new("Again"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Status);
        assert_eq!(err.status(), Some(500));

        // The script is exhausted now.
        let err = service
            .send_chat(&ChatRequest::new("Once more"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);

        let messages: Vec<_> = service
            .chat_requests()
            .into_iter()
            .map(|req| req.message)
            .collect();
        assert_eq!(messages, ["Hi", "Again", "Once more"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_dream_with_delay() {
        let mut service = TestService::default();
        service.set_delay(Duration::from_secs(5));
        service.add_dream_reply(PresetReply::text("You are flying."));

        let observer = service.clone();
        let reply = service.fetch_dream().await.unwrap();
        assert_eq!(reply.dream, "You are flying.");
        assert_eq!(observer.dream_fetches(), 1);
        assert!(observer.chat_requests().is_empty());
    }
}
