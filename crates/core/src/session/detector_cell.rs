use std::sync::{Condvar, Mutex, MutexGuard};

use crate::detection::domain::detector_provider::DetectorProvider;

/// Where the detector stands in its once-per-session acquisition.
///
/// `Ready` and `Failed` are terminal; there is no re-initialization path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectorLifecycle {
    Uninitialized,
    Ready,
    Failed,
}

struct CellInner {
    lifecycle: DetectorLifecycle,
    provider: Option<Box<dyn DetectorProvider>>,
}

/// Single-writer holder for the provider handle and its lifecycle.
///
/// The initializer writes exactly once (lifecycle and handle together, under
/// one lock); the detection path only reads. A Condvar lets synchronous
/// drivers block until the lifecycle settles instead of polling.
pub struct DetectorCell {
    inner: Mutex<CellInner>,
    settled: Condvar,
}

impl DetectorCell {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(CellInner {
                lifecycle: DetectorLifecycle::Uninitialized,
                provider: None,
            }),
            settled: Condvar::new(),
        }
    }

    pub fn lifecycle(&self) -> DetectorLifecycle {
        self.lock().lifecycle
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle() == DetectorLifecycle::Ready
    }

    /// Store the provider and transition to `Ready`. A write after the
    /// lifecycle has already settled is ignored (terminal states stay put).
    pub(crate) fn complete(&self, provider: Box<dyn DetectorProvider>) {
        let mut inner = self.lock();
        if inner.lifecycle != DetectorLifecycle::Uninitialized {
            return;
        }
        inner.provider = Some(provider);
        inner.lifecycle = DetectorLifecycle::Ready;
        drop(inner);
        self.settled.notify_all();
    }

    /// Transition to `Failed` with the provider slot left empty.
    pub(crate) fn fail(&self) {
        let mut inner = self.lock();
        if inner.lifecycle != DetectorLifecycle::Uninitialized {
            return;
        }
        inner.lifecycle = DetectorLifecycle::Failed;
        drop(inner);
        self.settled.notify_all();
    }

    /// Block until the lifecycle leaves `Uninitialized`, then return it.
    pub fn wait_until_settled(&self) -> DetectorLifecycle {
        let mut inner = self.lock();
        while inner.lifecycle == DetectorLifecycle::Uninitialized {
            inner = self
                .settled
                .wait(inner)
                .unwrap_or_else(|e| e.into_inner());
        }
        inner.lifecycle
    }

    /// Run `f` against the held provider, or return `None` when no provider
    /// is present. The lock is held for the duration of `f`.
    pub fn with_provider<R>(&self, f: impl FnOnce(&mut dyn DetectorProvider) -> R) -> Option<R> {
        let mut inner = self.lock();
        inner.provider.as_mut().map(|p| f(p.as_mut()))
    }

    fn lock(&self) -> MutexGuard<'_, CellInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for DetectorCell {
    fn default() -> Self {
        Self::new()
    }
}
