use dreamer_service::DreamerService;

use super::Session;
use super::event_loop::Callbacks;
use crate::message::Message;
use crate::service_client::ServiceClient;

/// [`Session`] builder.
pub struct SessionBuilder {
    pub(crate) client: ServiceClient,
    pub(crate) callbacks: Callbacks,
}

impl SessionBuilder {
    /// Creates a new builder with the specified service.
    #[inline]
    pub fn with_service<S: DreamerService + 'static>(service: S) -> Self {
        Self {
            client: ServiceClient::new(service),
            callbacks: Callbacks::default(),
        }
    }

    /// Attaches a callback to be invoked after every transcript append,
    /// with the appended message.
    ///
    /// This is where a view brings the newest entry into sight.
    #[inline]
    pub fn on_append(
        mut self,
        on_append: impl Fn(&Message) + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.on_append = Some(Box::new(on_append));
        self
    }

    /// Attaches a callback to be invoked when the dream overlay opens
    /// (`Some`) or closes (`None`).
    #[inline]
    pub fn on_dream(
        mut self,
        on_dream: impl Fn(Option<&str>) + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.on_dream = Some(Box::new(on_dream));
        self
    }

    /// Attaches a callback to be invoked once per finished request, when
    /// the session becomes idle again.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Builds the session.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    #[inline]
    pub fn build(self) -> Session {
        Session::spawn_from_builder(self)
    }
}
