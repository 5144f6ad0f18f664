//! Timer-based query coalescing for the search input.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::time::sleep;

/// Pause length after the last keystroke before a query commits.
pub const DEBOUNCE_WINDOW_MS: u64 = 250;

/// Coalesces raw keystroke input into a stable committed query.
///
/// Each keystroke submits the full current text; only the newest submission
/// still current after the debounce window commits. The committed value
/// feeds the pure [`view`](super::view) projection, which stays synchronous
/// and timing-independent.
#[derive(Clone)]
pub struct QueryDebouncer {
    window: Duration,
    committed: Arc<RwLock<String>>,
    generation: Arc<AtomicU64>,
}

impl QueryDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            committed: Arc::new(RwLock::new(String::new())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Latest committed query.
    pub fn committed(&self) -> String {
        self.committed.read().unwrap().clone()
    }

    /// Submits the current raw input. Resolves to `true` when this
    /// submission committed, `false` when a newer keystroke superseded it
    /// during the window.
    pub async fn submit(&self, text: impl Into<String>) -> bool {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        sleep(self.window).await;
        if self.generation.load(Ordering::SeqCst) != token {
            return false;
        }
        *self.committed.write().unwrap() = text.into();
        true
    }
}

impl Default for QueryDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_WINDOW_MS))
    }
}
