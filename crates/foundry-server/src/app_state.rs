use std::sync::Arc;

use foundry_mcp::Dispatcher;

use crate::session::SessionManager;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    /// Wrap a dispatcher; each streaming session gets an outbound queue of
    /// `session_buffer` envelopes.
    #[must_use]
    pub fn new(dispatcher: Dispatcher, session_buffer: usize) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            sessions: Arc::new(SessionManager::new(session_buffer)),
        }
    }
}
