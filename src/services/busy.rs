use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "a request is in flight" flag. Cloning shares the same flag.
#[derive(Clone, Debug, Default)]
pub struct BusyFlag {
    flag: Arc<AtomicBool>,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Marks the flag busy until the returned guard is dropped. Returns `None`
    /// if someone else already holds it.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.flag
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard {
                flag: self.flag.clone(),
            })
    }
}

/// Clears the busy flag on drop, whichever way the holder exits.
#[must_use = "the flag is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
