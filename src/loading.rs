use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "catalog is loading" flag.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag {
    loading: Arc<AtomicBool>,
}

impl LoadingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.store(loading, Ordering::SeqCst);
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Raise the flag until the returned guard is dropped.
    ///
    /// Returns `None` when a load is already in progress.
    pub fn begin(&self) -> Option<LoadingGuard> {
        self.loading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| LoadingGuard { flag: self.clone() })
    }
}

/// Clears the loading flag on drop.
#[derive(Debug)]
pub struct LoadingGuard {
    flag: LoadingFlag,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.set_loading(false);
    }
}
