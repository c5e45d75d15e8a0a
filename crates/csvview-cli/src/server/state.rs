//! Application state for the web server.

use std::sync::Arc;
use tokio::sync::RwLock;

use csvview::{SubmissionGate, ViewerConfig, ViewerSnapshot, ViewerState};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// What the page currently shows. Replaced whole on every transition.
    pub viewer: Arc<RwLock<ViewerState>>,
    /// Rejects a second upload while one is being processed.
    pub gate: Arc<SubmissionGate>,
    /// How uploads are loaded.
    pub config: Arc<ViewerConfig>,
}

impl AppState {
    /// Create new application state showing the sample table.
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            viewer: Arc::new(RwLock::new(ViewerState::new())),
            gate: Arc::new(SubmissionGate::new()),
            config: Arc::new(config),
        }
    }

    /// Apply a transition to the viewer state.
    pub async fn replace<F>(&self, transition: F)
    where
        F: FnOnce(ViewerState) -> ViewerState,
    {
        let mut viewer = self.viewer.write().await;
        let current = std::mem::take(&mut *viewer);
        *viewer = transition(current);
    }

    pub async fn snapshot(&self) -> ViewerSnapshot {
        self.viewer.read().await.snapshot()
    }
}
