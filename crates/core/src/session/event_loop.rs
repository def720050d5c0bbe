use std::fmt::{self, Debug};

use dreamer_service::ChatRequest;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::message::Message;
use crate::service_client::{ChatResult, DreamResult, ServiceClient};
use crate::state::SessionState;

type OnAppend = Box<dyn Fn(&Message) + Send + Sync>;
type OnDream = Box<dyn Fn(Option<&str>) + Send + Sync>;
type OnIdle = Box<dyn Fn() + Send + Sync>;

#[derive(Default)]
pub struct Callbacks {
    pub on_append: Option<OnAppend>,
    pub on_dream: Option<OnDream>,
    pub on_idle: Option<OnIdle>,
}

#[derive(Debug)]
pub enum Command {
    UpdateDraft(String),
    SubmitMessage,
    RequestDream,
    DismissDream,
    Snapshot(oneshot::Sender<SessionState>),
    ChatFinished(ChatResult),
    DreamFinished(DreamResult),
}

pub struct SessionLoop {
    state: SessionState,
    client: ServiceClient,
    callbacks: Callbacks,
    // Weak, so that in-flight requests don't keep the loop alive after
    // every session handle is gone.
    cmd_tx: mpsc::WeakUnboundedSender<Command>,
    in_flight: Option<JoinHandle<()>>,
}

impl SessionLoop {
    pub fn new(
        client: ServiceClient,
        callbacks: Callbacks,
        cmd_tx: mpsc::WeakUnboundedSender<Command>,
    ) -> Self {
        Self {
            state: SessionState::default(),
            client,
            callbacks,
            cmd_tx,
            in_flight: None,
        }
    }

    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<Command>) {
        debug!("started");
        while let Some(cmd) = cmd_rx.recv().await {
            trace!("received command: {cmd:?}");
            self.handle(cmd);
        }
        if let Some(task) = self.in_flight.take() {
            debug!("abandon the request in flight");
            task.abort();
        }
        debug!("will terminate");
    }

    fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::UpdateDraft(text) => self.state.update_draft(text),
            Command::SubmitMessage => self.submit_message(),
            Command::RequestDream => self.request_dream(),
            Command::DismissDream => {
                if self.state.dismiss_dream() {
                    self.notify_dream();
                }
            }
            Command::Snapshot(tx) => {
                tx.send(self.state.clone()).ok();
            }
            Command::ChatFinished(result) => self.finish_chat(result),
            Command::DreamFinished(result) => self.finish_dream(result),
        }
    }

    fn submit_message(&mut self) {
        let Some(text) = self.state.begin_submit() else {
            debug!(
                busy = self.state.is_busy(),
                "ignore submission, the draft is blank or a request is in flight"
            );
            return;
        };
        if let (Some(on_append), Some(msg)) =
            (&self.callbacks.on_append, self.state.transcript().last())
        {
            on_append(msg);
        }

        let fut = self.client.send_chat(ChatRequest::new(text));
        self.spawn_request(async move { Command::ChatFinished(fut.await) });
    }

    fn finish_chat(&mut self, result: ChatResult) {
        let reply = match result {
            Ok(reply) => {
                if let Some(memories) = &reply.related_memories {
                    trace!("reply recalled memories: {memories}");
                }
                Some(reply.response)
            }
            Err(err) => {
                error!(kind = ?err.kind(), "chat exchange failed: {err}");
                None
            }
        };
        self.in_flight = None;

        let msg = self.state.finish_chat(reply);
        if let Some(on_append) = &self.callbacks.on_append {
            on_append(msg);
        }
        self.notify_idle();
    }

    fn request_dream(&mut self) {
        if !self.state.begin_dream() {
            debug!("ignore dream request, a request is in flight");
            return;
        }

        let fut = self.client.fetch_dream();
        self.spawn_request(async move { Command::DreamFinished(fut.await) });
    }

    fn finish_dream(&mut self, result: DreamResult) {
        self.in_flight = None;
        match result {
            Ok(reply) => {
                self.state.finish_dream(Some(reply.dream));
                self.notify_dream();
            }
            Err(err) => {
                // Nothing is shown to the user for a failed dream, unlike
                // a failed chat exchange.
                error!(kind = ?err.kind(), "fetching dream failed: {err}");
                self.state.finish_dream(None);
            }
        }
        self.notify_idle();
    }

    fn spawn_request<F>(&mut self, fut: F)
    where
        F: Future<Output = Command> + Send + 'static,
    {
        let cmd_tx = self.cmd_tx.clone();
        let task = tokio::spawn(async move {
            let cmd = fut.await;
            match cmd_tx.upgrade() {
                Some(cmd_tx) => {
                    cmd_tx.send(cmd).ok();
                }
                None => debug!("session is gone, discard the result"),
            }
        });
        self.in_flight = Some(task);
    }

    #[inline]
    fn notify_dream(&self) {
        if let Some(on_dream) = &self.callbacks.on_dream {
            on_dream(self.state.auxiliary_text());
        }
    }

    #[inline]
    fn notify_idle(&self) {
        if let Some(on_idle) = &self.callbacks.on_idle {
            on_idle();
        }
    }
}

impl Debug for SessionLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionLoop")
            .field("state", &self.state)
            .field("in_flight", &self.in_flight.is_some())
            .finish_non_exhaustive()
    }
}
