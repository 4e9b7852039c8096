use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use shared_config::AppConfig;

/// Monotonic revision for the admin dashboard's appointment views. Every
/// workflow write bumps it; dashboard clients poll it to know when to
/// re-fetch lists. Injected through [`AppState`] rather than living as a
/// module-level singleton.
#[derive(Debug, Clone, Default)]
pub struct DashboardRevision(Arc<AtomicU64>);

impl DashboardRevision {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Process-wide application state, constructed once by the entry point.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub dashboard: DashboardRevision,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            dashboard: DashboardRevision::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidate_is_monotonic_across_clones() {
        let revision = DashboardRevision::new();
        let other = revision.clone();

        assert_eq!(revision.current(), 0);
        assert_eq!(revision.invalidate(), 1);
        assert_eq!(other.invalidate(), 2);
        assert_eq!(revision.current(), 2);
    }
}
