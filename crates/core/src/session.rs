mod builder;
mod event_loop;

use tokio::sync::{mpsc, oneshot};
use tracing::Instrument;

use crate::error::SessionClosedError;
use crate::state::SessionState;
pub use builder::SessionBuilder;
use event_loop::{Command, SessionLoop};

/// A chat session, like a window that displays messages and has an
/// input box and a button for dreams.
///
/// The state lives in a loop task spawned by [`SessionBuilder::build`].
/// Commands sent through this handle are handled in order, immediately,
/// no matter whether a request is in flight. While one is, submitting
/// a message or requesting a dream does nothing, so at most one request
/// is ever outstanding.
///
/// Dropping every handle ends the loop. A request still in flight at
/// that point is abandoned and its result is discarded.
#[derive(Clone)]
pub struct Session {
    cmd_tx: mpsc::UnboundedSender<Command>,
}

impl Session {
    /// Replaces the draft with `text`.
    #[inline]
    pub fn update_draft<S: Into<String>>(&self, text: S) {
        self.send(Command::UpdateDraft(text.into()));
    }

    /// Submits the draft as a user message.
    ///
    /// The message is appended to the transcript right away and the
    /// reply follows once the service answers. A blank draft is ignored.
    #[inline]
    pub fn submit_message(&self) {
        self.send(Command::SubmitMessage);
    }

    /// Fetches a dream and opens the overlay with it.
    #[inline]
    pub fn request_dream(&self) {
        self.send(Command::RequestDream);
    }

    /// Closes the dream overlay, if it's open.
    #[inline]
    pub fn dismiss_dream(&self) {
        self.send(Command::DismissDream);
    }

    /// Returns a copy of the state, taken after every command sent
    /// before this call has been handled.
    pub async fn snapshot(&self) -> Result<SessionState, SessionClosedError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Snapshot(tx))
            .map_err(|_| SessionClosedError)?;
        rx.await.map_err(|_| SessionClosedError)
    }

    fn spawn_from_builder(builder: SessionBuilder) -> Self {
        let SessionBuilder { client, callbacks } = builder;

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let session_loop =
            SessionLoop::new(client, callbacks, cmd_tx.downgrade());
        tokio::spawn(
            session_loop.run(cmd_rx).instrument(trace_span!("session")),
        );
        Self { cmd_tx }
    }

    fn send(&self, cmd: Command) {
        if self.cmd_tx.send(cmd).is_err() {
            warn!("session loop has terminated, discard the command");
        }
    }
}
