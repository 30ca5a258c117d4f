use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crate::detection::domain::detector_provider::ProviderFactory;
use crate::detection::domain::provider_options::ProviderOptions;
use crate::session::detector_cell::DetectorCell;

/// How the hosting environment reports its own startup progress.
///
/// Mirrors a page's "document ready" handshake: while the host is still
/// loading, work is deferred to its ready signal instead of running
/// immediately.
pub trait HostLifecycle {
    fn is_loading(&self) -> bool;

    /// Register `callback` to run when the host finishes loading. Only
    /// called while `is_loading()` is true.
    fn on_ready(&self, callback: Box<dyn FnOnce() + Send>);
}

/// A host that has already finished loading (CLI processes, tests).
pub struct ImmediateHost;

impl HostLifecycle for ImmediateHost {
    fn is_loading(&self) -> bool {
        false
    }

    fn on_ready(&self, callback: Box<dyn FnOnce() + Send>) {
        callback();
    }
}

/// One-shot acquisition of a detector provider.
///
/// Exactly one attempt happens per initializer, no matter how many times
/// `trigger` fires or how the host's ready signal races a direct call.
/// The outcome lands in the [`DetectorCell`]; nothing is returned to the
/// trigger site and nothing is retried.
pub struct Initializer {
    cell: Arc<DetectorCell>,
    factory: Arc<dyn ProviderFactory>,
    options: ProviderOptions,
    attempted: AtomicBool,
}

impl Initializer {
    pub fn new(
        cell: Arc<DetectorCell>,
        factory: Arc<dyn ProviderFactory>,
        options: ProviderOptions,
    ) -> Arc<Self> {
        Arc::new(Self {
            cell,
            factory,
            options,
            attempted: AtomicBool::new(false),
        })
    }

    /// Start initialization per the host's state: immediately if the host is
    /// already up, otherwise once on its ready signal.
    pub fn trigger(self: &Arc<Self>, host: &dyn HostLifecycle) {
        if host.is_loading() {
            let this = Arc::clone(self);
            host.on_ready(Box::new(move || this.spawn_attempt()));
        } else {
            self.spawn_attempt();
        }
    }

    /// Run the single attempt on a background thread. Subsequent calls are
    /// no-ops; the guard flips before the thread spawns, so concurrent
    /// triggers cannot double-attempt.
    fn spawn_attempt(self: &Arc<Self>) {
        if self.attempted.swap(true, Ordering::SeqCst) {
            return;
        }
        let this = Arc::clone(self);
        thread::spawn(move || this.attempt());
    }

    fn attempt(&self) {
        match self.factory.create(&self.options) {
            Ok(provider) => {
                self.cell.complete(provider);
                log::info!("face detector provider initialized");
            }
            Err(e) => {
                self.cell.fail();
                log::warn!("face detector initialization failed: {e}");
            }
        }
    }
}
