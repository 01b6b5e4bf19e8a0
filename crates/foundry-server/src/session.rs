use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use foundry_mcp::{Dispatcher, JsonRpcResponse};

/// Why an inbound message could not be handed to a session.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(Uuid),

    #[error("session closed: {0}")]
    Closed(Uuid),
}

type Sessions = Arc<RwLock<HashMap<Uuid, mpsc::Sender<Bytes>>>>;

/// Tracks open streaming sessions.
///
/// A session is an inbound queue feeding one worker task. The worker decodes
/// and dispatches messages one at a time and pushes each envelope onto the
/// session's outbound queue, so responses leave in the order requests came in.
pub struct SessionManager {
    sessions: Sessions,
    buffer: usize,
}

impl SessionManager {
    #[must_use]
    pub fn new(buffer: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            buffer: buffer.max(1),
        }
    }

    /// Open a session and start its worker.
    ///
    /// Returns the session id and the receiving half of the outbound queue.
    /// Dropping the receiver closes the session.
    pub async fn open(
        &self,
        dispatcher: Arc<Dispatcher>,
    ) -> (Uuid, mpsc::Receiver<JsonRpcResponse>) {
        let id = Uuid::new_v4();
        let (inbound_tx, inbound_rx) = mpsc::channel(self.buffer);
        let (outbound_tx, outbound_rx) = mpsc::channel(self.buffer);

        self.sessions.write().await.insert(id, inbound_tx);
        tracing::info!(session = %id, "Session opened");

        let sessions = Arc::clone(&self.sessions);
        tokio::spawn(async move {
            run_worker(id, &dispatcher, inbound_rx, &outbound_tx).await;
            sessions.write().await.remove(&id);
            tracing::info!(session = %id, "Session closed");
        });

        (id, outbound_rx)
    }

    /// Queue one raw inbound message for a session.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotFound`] if no such session is open, or
    /// [`SessionError::Closed`] if its worker has already stopped.
    pub async fn post(&self, id: Uuid, message: Bytes) -> Result<(), SessionError> {
        let sender = self
            .sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound(id))?;

        sender
            .send(message)
            .await
            .map_err(|_| SessionError::Closed(id))
    }

    /// Drop a session. Its worker stops once the queued messages are drained.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn is_open(&self, id: Uuid) -> bool {
        self.sessions.read().await.contains_key(&id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(64)
    }
}

async fn run_worker(
    id: Uuid,
    dispatcher: &Dispatcher,
    mut inbound: mpsc::Receiver<Bytes>,
    outbound: &mpsc::Sender<JsonRpcResponse>,
) {
    loop {
        let message = tokio::select! {
            () = outbound.closed() => break,
            message = inbound.recv() => match message {
                Some(message) => message,
                None => break,
            },
        };

        let Some(response) = dispatcher.handle_bytes(&message).await else {
            continue;
        };

        if outbound.send(response).await.is_err() {
            tracing::warn!(session = %id, "Client went away before the response was sent");
            break;
        }
    }
}
