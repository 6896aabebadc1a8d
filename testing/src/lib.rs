pub use insta::{assert_debug_snapshot, assert_snapshot};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::Level;

pub fn logging() {
    use std::sync::Once;

    static ONCE: Once = Once::new();

    ONCE.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_test_writer()
            .init();
    });
}

/// Ordered record of calls, shared between a fixture and the test observing it.
///
/// Clones write to the same record.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &self,
        entry: impl Into<String>,
    ) {
        let entry = entry.into();
        tracing::trace!(%entry, "journal");
        self.lock().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Number of times `entry` was recorded.
    pub fn count(
        &self,
        entry: &str,
    ) -> usize {
        self.lock().iter().filter(|e| *e == entry).count()
    }

    pub fn contains(
        &self,
        entry: &str,
    ) -> bool {
        self.count(entry) > 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // a panicking action can poison the lock; entries are still intact
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
