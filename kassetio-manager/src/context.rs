/// Opaque per-session call context.
///
/// Created once by [`crate::Manager::create_context`] and threaded through
/// every subsequent call, so a backend can correlate related requests.
/// Hosts treat it as a token.
#[derive(Debug, Clone, Default)]
pub struct Context {
    _private: (),
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
