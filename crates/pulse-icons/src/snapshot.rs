//! Shared catalog snapshots.
//!
//! A resolver keeps its catalog behind an `Arc` inside a lock. Readers clone
//! the `Arc` and drop the lock before doing any work, so a rebuild never
//! blocks or disturbs a resolution that is already running.

use std::future::Future;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::resolver::CachePolicy;
use crate::Result;

#[derive(Debug)]
pub(crate) struct Snapshot<T> {
    slot: RwLock<Option<Arc<T>>>,
    policy: CachePolicy,
}

impl<T> Snapshot<T> {
    pub(crate) fn new(policy: CachePolicy) -> Self {
        Self {
            slot: RwLock::new(None),
            policy,
        }
    }

    pub(crate) fn with_value(value: T, policy: CachePolicy) -> Self {
        Self {
            slot: RwLock::new(Some(Arc::new(value))),
            policy,
        }
    }

    pub(crate) fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub(crate) fn set_policy(&mut self, policy: CachePolicy) {
        self.policy = policy;
    }

    pub(crate) fn current(&self) -> Option<Arc<T>> {
        self.slot.read().clone()
    }

    /// Swap in a new value and return it.
    pub(crate) fn store(&self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        *self.slot.write() = Some(Arc::clone(&value));
        value
    }

    /// Drop the cached value.
    pub(crate) fn invalidate(&self) {
        self.slot.write().take();
    }

    /// Return the cached value, or load one.
    ///
    /// With [`CachePolicy::Memoize`] a loaded value is kept for later calls;
    /// with [`CachePolicy::Rebuild`] every call loads afresh.
    pub(crate) fn get_or_load(&self, load: impl FnOnce() -> Result<T>) -> Result<Arc<T>> {
        if self.policy == CachePolicy::Memoize
            && let Some(value) = self.current()
        {
            return Ok(value);
        }

        let value = load()?;
        Ok(match self.policy {
            CachePolicy::Memoize => self.store(value),
            CachePolicy::Rebuild => Arc::new(value),
        })
    }

    /// Async version of [`get_or_load`](Self::get_or_load).
    ///
    /// The lock is not held while `load` runs; concurrent loads may race and
    /// the last one to finish is kept.
    pub(crate) async fn get_or_load_async<F, Fut>(&self, load: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if self.policy == CachePolicy::Memoize
            && let Some(value) = self.current()
        {
            return Ok(value);
        }

        let value = load().await?;
        Ok(match self.policy {
            CachePolicy::Memoize => self.store(value),
            CachePolicy::Rebuild => Arc::new(value),
        })
    }
}
