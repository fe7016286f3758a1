use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;

/// Coalesces concurrent executions of the same keyed operation.
///
/// The first caller for a key becomes the leader and runs the supplied
/// future; everyone arriving while that run is in flight waits on it and
/// receives a clone of the leader's result. The entry is removed as soon as
/// the result is published, so a later call with the same key starts a fresh
/// run; nothing is cached here.
///
/// The work future must not re-enter `run` with the same key, or leader and
/// follower will wait on each other forever.
pub struct Flight<T: Clone> {
    calls: Mutex<HashMap<String, watch::Receiver<Option<T>>>>,
}

enum Lead<T: Clone> {
    Lead(watch::Sender<Option<T>>),
    Follow(watch::Receiver<Option<T>>),
}

impl<T: Clone> Flight<T> {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(HashMap::new()),
        }
    }

    fn calls(&self) -> MutexGuard<'_, HashMap<String, watch::Receiver<Option<T>>>> {
        // A poisoning panic cannot leave the map in a bad state: entries are
        // only inserted or removed whole.
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Joins the in-flight call for `key`, or registers as its leader.
    ///
    /// Kept as a plain (non-async) method so the map guard is fully released
    /// on return, rather than conditionally live across the caller's await.
    fn join_or_lead(&self, key: &str) -> Lead<T> {
        let mut calls = self.calls();
        match calls.get(key) {
            Some(in_flight) => Lead::Follow(in_flight.clone()),
            None => {
                let (tx, rx) = watch::channel(None);
                calls.insert(key.to_owned(), rx);
                Lead::Lead(tx)
            }
        }
    }

    /// Runs `work` for `key`, unless a run for the same key is already in
    /// flight, in which case the in-flight result is awaited and returned.
    ///
    /// The lock guards only map accesses, never the execution of `work`.
    /// Errs only when the in-flight leader was torn down (panicked or was
    /// cancelled) before publishing; waiters never hang on a dead leader.
    pub async fn run<F, Fut>(&self, key: &str, work: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let publish = match self.join_or_lead(key) {
            Lead::Follow(rx) => return self.wait(key, rx).await,
            Lead::Lead(tx) => tx,
        };

        let result = work().await;
        // Publish before unregistering: a caller landing in between sees the
        // completed call and returns its value immediately.
        let _ = publish.send(Some(result.clone()));
        self.calls().remove(key);
        Ok(result)
    }

    async fn wait(&self, key: &str, mut rx: watch::Receiver<Option<T>>) -> Result<T> {
        if let Ok(slot) = rx.wait_for(|slot| slot.is_some()).await
            && let Some(value) = slot.as_ref()
        {
            return Ok(value.clone());
        }

        // The leader dropped its sender without publishing. Unregister the
        // dead call (unless a fresh one already took its place) so the next
        // caller can retry.
        let mut calls = self.calls();
        if calls
            .get(key)
            .is_some_and(|current| current.same_channel(&rx))
        {
            calls.remove(key);
        }
        Err(anyhow!("in-flight load for key {:?} was aborted", key))
    }
}

impl<T: Clone> Default for Flight<T> {
    fn default() -> Self {
        Self::new()
    }
}
