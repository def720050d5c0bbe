//! The state a chat session owns, and the transitions allowed on it.

use crate::message::Message;

/// The transcript entry appended in place of a reply when a chat
/// exchange fails for any reason.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error.";

/// Everything a chat session knows about.
///
/// Only the session loop mutates this value. Callers get copies of it
/// through [`crate::Session::snapshot`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    transcript: Vec<Message>,
    draft: String,
    busy: bool,
    auxiliary_text: Option<String>,
}

impl SessionState {
    /// Returns the exchanged messages, oldest first.
    #[inline]
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Returns the text being composed.
    #[inline]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Returns `true` while a chat or dream request is in flight.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Returns the dream currently shown in the overlay, if it's open.
    #[inline]
    pub fn auxiliary_text(&self) -> Option<&str> {
        self.auxiliary_text.as_deref()
    }

    #[inline]
    pub(crate) fn update_draft(&mut self, text: String) {
        self.draft = text;
    }

    /// Starts a chat exchange with the current draft.
    ///
    /// Returns the text to send, or `None` if the draft is blank or
    /// another request is in flight. In that case nothing changes.
    pub(crate) fn begin_submit(&mut self) -> Option<String> {
        if self.busy || self.draft.trim().is_empty() {
            return None;
        }
        let text = std::mem::take(&mut self.draft);
        self.transcript.push(Message::user(text.clone()));
        self.busy = true;
        Some(text)
    }

    /// Finishes the chat exchange, `None` meaning it failed.
    ///
    /// Returns the appended message.
    pub(crate) fn finish_chat(&mut self, reply: Option<String>) -> &Message {
        debug_assert!(self.busy, "no chat exchange in flight");
        let content = reply.unwrap_or_else(|| FALLBACK_REPLY.to_owned());
        self.transcript.push(Message::assistant(content));
        self.busy = false;
        // Just pushed, never empty.
        &self.transcript[self.transcript.len() - 1]
    }

    /// Starts a dream fetch. Returns `false` if another request is in
    /// flight.
    pub(crate) fn begin_dream(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    /// Finishes the dream fetch, `None` meaning it failed.
    pub(crate) fn finish_dream(&mut self, dream: Option<String>) {
        debug_assert!(self.busy, "no dream fetch in flight");
        if dream.is_some() {
            self.auxiliary_text = dream;
        }
        self.busy = false;
    }

    /// Closes the overlay. Returns whether it was open.
    #[inline]
    pub(crate) fn dismiss_dream(&mut self) -> bool {
        self.auxiliary_text.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_echoes_and_clears_draft() {
        let mut state = SessionState::default();
        state.update_draft("Hello".to_owned());

        let text = state.begin_submit().unwrap();
        assert_eq!(text, "Hello");
        assert_eq!(state.transcript(), [Message::user("Hello")]);
        assert_eq!(state.draft(), "");
        assert!(state.is_busy());

        let appended = state.finish_chat(Some("Hi there".to_owned()));
        assert_eq!(appended, &Message::assistant("Hi there"));
        assert!(!state.is_busy());
        assert_eq!(state.transcript().len(), 2);
    }

    #[test]
    fn test_submit_keeps_surrounding_whitespace() {
        let mut state = SessionState::default();
        state.update_draft("  padded  ".to_owned());
        assert_eq!(state.begin_submit().as_deref(), Some("  padded  "));
    }

    #[test]
    fn test_blank_draft_is_ignored() {
        let mut state = SessionState::default();
        state.update_draft("   ".to_owned());
        assert_eq!(state.begin_submit(), None);
        assert!(state.transcript().is_empty());
        assert_eq!(state.draft(), "   ");
        assert!(!state.is_busy());
    }

    #[test]
    fn test_busy_gate() {
        let mut state = SessionState::default();
        state.update_draft("one".to_owned());
        state.begin_submit().unwrap();

        state.update_draft("two".to_owned());
        assert_eq!(state.begin_submit(), None);
        assert!(!state.begin_dream());
        assert_eq!(state.transcript().len(), 1);
        assert_eq!(state.draft(), "two");

        state.finish_chat(None);
        assert!(state.begin_dream());
        state.update_draft("three".to_owned());
        assert_eq!(state.begin_submit(), None);
    }

    #[test]
    fn test_failed_chat_appends_fallback() {
        let mut state = SessionState::default();
        state.update_draft("test".to_owned());
        state.begin_submit().unwrap();
        state.finish_chat(None);
        assert_eq!(
            state.transcript(),
            [Message::user("test"), Message::assistant(FALLBACK_REPLY)]
        );
    }

    #[test]
    fn test_dream_lifecycle() {
        let mut state = SessionState::default();
        assert!(state.begin_dream());
        state.finish_dream(Some("You are flying.".to_owned()));
        assert_eq!(state.auxiliary_text(), Some("You are flying."));
        assert!(state.transcript().is_empty());

        assert!(state.dismiss_dream());
        assert!(!state.dismiss_dream());
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn test_failed_dream_keeps_overlay_closed() {
        let mut state = SessionState::default();
        assert!(state.begin_dream());
        state.finish_dream(None);
        assert_eq!(state.auxiliary_text(), None);
        assert!(!state.is_busy());
    }
}
