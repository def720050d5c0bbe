use dreamer_core::{Message, SessionBuilder as CoreSessionBuilder};
use dreamer_http_service::{HttpConfig, HttpService};

pub use dreamer_core::Session;

/// A session builder talking to the service over HTTP.
///
/// See [`Session`].
pub struct SessionBuilder {
    core_builder: CoreSessionBuilder,
}

impl SessionBuilder {
    /// Creates a session builder for the service at the configured
    /// origin.
    pub fn with_config(config: HttpConfig) -> Self {
        debug!("using service at {}", config.base_url());
        let core_builder =
            CoreSessionBuilder::with_service(HttpService::new(config));
        Self { core_builder }
    }

    /// Attaches a callback to be invoked after every transcript append.
    #[inline]
    pub fn on_append(
        mut self,
        on_append: impl Fn(&Message) + Send + Sync + 'static,
    ) -> Self {
        self.core_builder = self.core_builder.on_append(on_append);
        self
    }

    /// Attaches a callback to be invoked when the dream overlay opens or
    /// closes.
    #[inline]
    pub fn on_dream(
        mut self,
        on_dream: impl Fn(Option<&str>) + Send + Sync + 'static,
    ) -> Self {
        self.core_builder = self.core_builder.on_dream(on_dream);
        self
    }

    /// Attaches a callback to be invoked when the session is idle.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.core_builder = self.core_builder.on_idle(on_idle);
        self
    }

    /// Builds a new session. Must be called inside a tokio runtime.
    #[inline]
    pub fn build(self) -> Session {
        self.core_builder.build()
    }
}
