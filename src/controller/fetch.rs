use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::app::{ErrorInfo, ReelError, Result};
use crate::controller::state::{FetchSnapshot, FetchState};

/// Deferred computation a controller re-runs on every trigger.
pub type Operation<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T>> + Send + Sync>;

struct Lifecycle {
    generation: u64,
    disposed: bool,
}

struct Shared<T> {
    lifecycle: Mutex<Lifecycle>,
    state: watch::Sender<FetchState<T>>,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, Lifecycle> {
        // Lifecycle holds plain counters, still consistent after a panic.
        self.lifecycle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Publish `outcome` only if `generation` is still the latest trigger.
    fn settle(&self, generation: u64, outcome: Result<T>) {
        let lifecycle = self.lock();

        if lifecycle.disposed {
            tracing::debug!("Dropping settlement of generation {} after dispose", generation);
            return;
        }

        if lifecycle.generation != generation {
            tracing::debug!(
                "Discarding stale settlement of generation {} (current {})",
                generation,
                lifecycle.generation
            );
            return;
        }

        let next = match outcome {
            Ok(data) => FetchState::Success(Arc::new(data)),
            Err(err) => {
                let info = err.info();
                tracing::debug!("Generation {} failed: {}", generation, info);
                FetchState::Failure(info)
            }
        };

        self.state.send_replace(next);
    }
}

/// Owns the visible lifecycle of one repeatable async operation.
///
/// Every [`refetch`](Self::refetch) and [`reset`](Self::reset) bumps a
/// generation counter; an operation that settles after a newer trigger is
/// ignored, so the visible state always belongs to the latest trigger.
/// Dropping the controller (or calling [`dispose`](Self::dispose)) freezes
/// the visible state even if operations are still in flight.
///
/// Triggering spawns onto the current Tokio runtime. A trigger made outside
/// one settles straight to a `Config` failure without running the operation.
pub struct FetchController<T> {
    operation: Operation<T>,
    shared: Arc<Shared<T>>,
}

impl<T> FetchController<T>
where
    T: Send + Sync + 'static,
{
    pub fn new<F, Fut>(operation: F, auto_run: bool) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let operation: Operation<T> = Arc::new(move || operation().boxed());
        Self::from_operation(operation, auto_run)
    }

    pub fn from_operation(operation: Operation<T>, auto_run: bool) -> Self {
        let (state, _) = watch::channel(FetchState::Idle);
        let controller = Self {
            operation,
            shared: Arc::new(Shared {
                lifecycle: Mutex::new(Lifecycle {
                    generation: 0,
                    disposed: false,
                }),
                state,
            }),
        };

        if auto_run {
            controller.refetch();
        }

        controller
    }

    /// Run the operation again. State is `Loading` when this returns.
    pub fn refetch(&self) {
        let generation = {
            let mut lifecycle = self.shared.lock();
            if lifecycle.disposed {
                tracing::debug!("Ignoring refetch on disposed controller");
                return;
            }
            lifecycle.generation += 1;
            self.shared.state.send_replace(FetchState::Loading);
            lifecycle.generation
        };

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::warn!("Cannot start generation {}: {}", generation, err);
                self.shared.settle(
                    generation,
                    Err(ReelError::Config(format!("no async runtime available: {}", err))),
                );
                return;
            }
        };

        tracing::debug!("Starting generation {}", generation);

        let pending = (self.operation)();
        let shared = Arc::clone(&self.shared);
        runtime.spawn(async move {
            let outcome = pending.await;
            shared.settle(generation, outcome);
        });
    }

    /// Back to `Idle`. Operations still in flight are left running but their
    /// results are ignored.
    pub fn reset(&self) {
        let mut lifecycle = self.shared.lock();
        if lifecycle.disposed {
            return;
        }
        lifecycle.generation += 1;
        self.shared.state.send_replace(FetchState::Idle);
    }
}

impl<T> FetchController<T> {
    /// Stop publishing. Idempotent; also run on drop.
    pub fn dispose(&self) {
        let mut lifecycle = self.shared.lock();
        if !lifecycle.disposed {
            lifecycle.disposed = true;
            tracing::debug!("Controller disposed at generation {}", lifecycle.generation);
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.lock().disposed
    }

    pub fn generation(&self) -> u64 {
        self.shared.lock().generation
    }

    pub fn state(&self) -> FetchState<T> {
        self.shared.state.borrow().clone()
    }

    pub fn snapshot(&self) -> FetchSnapshot<T> {
        self.shared.state.borrow().snapshot()
    }

    pub fn data(&self) -> Option<Arc<T>> {
        self.shared.state.borrow().data().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.state.borrow().is_loading()
    }

    pub fn error(&self) -> Option<ErrorInfo> {
        self.shared.state.borrow().error().cloned()
    }

    /// Receiver notified on every visible state change.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.shared.state.subscribe()
    }

    /// Wait for the current trigger to settle and return the resulting state.
    ///
    /// Returns immediately when nothing is loading. Does not resolve if the
    /// controller is disposed while loading.
    pub async fn settled(&self) -> FetchState<T> {
        let mut receiver = self.subscribe();
        let settled = match receiver.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }
}

impl<T> Drop for FetchController<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}
