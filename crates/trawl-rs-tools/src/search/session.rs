//! Session lifecycle for the remote search endpoint.

use std::collections::HashMap;
use std::sync::Arc;
use trawl_rs_protocol::RemoteOperation;

/// State established by a successful handshake.
#[derive(Debug, Clone)]
pub struct ReadySession {
    /// Operation invoked for every search.
    pub operation: RemoteOperation,
    /// Every discovered operation, keyed by name.
    pub operations: HashMap<String, RemoteOperation>,
    /// Session id assigned by the remote, echoed on later requests.
    pub remote_session_id: Option<String>,
}

impl ReadySession {
    /// Build a ready session, selecting the search operation from the list.
    ///
    /// Returns `None` when nothing was discovered.
    pub fn from_operations(
        operations: Vec<RemoteOperation>,
        remote_session_id: Option<String>,
    ) -> Option<Self> {
        let operation = select_operation(&operations)?.clone();
        let operations = operations
            .into_iter()
            .map(|operation| (operation.name.clone(), operation))
            .collect();
        Some(Self {
            operation,
            operations,
            remote_session_id,
        })
    }

    /// Names of every discovered operation, sorted.
    pub fn operation_names(&self) -> Vec<String> {
        let mut names = self.operations.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }
}

/// Handshake lifecycle: uninitialized -> handshaking -> ready.
#[derive(Debug, Clone, Default)]
pub enum SessionPhase {
    #[default]
    Uninitialized,
    Handshaking,
    Ready(Arc<ReadySession>),
}

impl SessionPhase {
    /// The ready session, if the handshake has completed.
    pub fn ready(&self) -> Option<Arc<ReadySession>> {
        match self {
            SessionPhase::Ready(session) => Some(Arc::clone(session)),
            _ => None,
        }
    }

    /// Enter the handshaking phase.
    ///
    /// Returns false when the session is already ready, leaving it untouched.
    /// A stale `Handshaking` phase (left behind by a cancelled call) restarts.
    pub fn begin_handshake(&mut self) -> bool {
        if matches!(self, SessionPhase::Ready(_)) {
            return false;
        }
        *self = SessionPhase::Handshaking;
        true
    }

    /// Record a completed handshake.
    pub fn complete(&mut self, session: Arc<ReadySession>) {
        *self = SessionPhase::Ready(session);
    }

    /// Record a failed handshake so the next call retries.
    pub fn fail(&mut self) {
        if matches!(self, SessionPhase::Handshaking) {
            *self = SessionPhase::Uninitialized;
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionPhase::Uninitialized => "uninitialized",
            SessionPhase::Handshaking => "handshaking",
            SessionPhase::Ready(_) => "ready",
        }
    }
}

/// Pick the operation used for searching.
///
/// Walks the list in order; every name containing "search" or "web" replaces
/// the previous pick, so the last match wins. Falls back to the first entry.
pub fn select_operation(operations: &[RemoteOperation]) -> Option<&RemoteOperation> {
    operations
        .iter()
        .rev()
        .find(|operation| is_search_like(&operation.name))
        .or_else(|| operations.first())
}

fn is_search_like(name: &str) -> bool {
    let lowered = name.to_lowercase();
    lowered.contains("search") || lowered.contains("web")
}
