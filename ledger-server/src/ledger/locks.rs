//! Per-worker mutual exclusion
//!
//! Serialises the multi-step wallet operations of one worker inside this
//! process. Cross-process safety comes from the SQLite write lock taken by the
//! first statement of each settlement transaction.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// `(salon_id, worker_id)`
type WorkerKey = (i64, i64);

type LockMap = DashMap<WorkerKey, Arc<Mutex<()>>>;

#[derive(Debug, Default)]
pub struct WorkerLocks {
    locks: Arc<LockMap>,
}

/// Held lock of one worker; the map entry is dropped with the last holder
#[derive(Debug)]
pub struct WorkerGuard {
    key: WorkerKey,
    locks: Arc<LockMap>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for WorkerGuard {
    fn drop(&mut self) {
        // release first: the guard itself keeps a reference to the mutex
        self.guard.take();
        // entry() and remove_if() share the shard lock, so a waiter that cloned
        // the mutex keeps the count above one and the entry stays
        self.locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl WorkerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for and hold the lock of one worker
    pub async fn acquire(&self, salon_id: i64, worker_id: i64) -> WorkerGuard {
        let key = (salon_id, worker_id);
        let lock = self
            .locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        WorkerGuard {
            key,
            locks: self.locks.clone(),
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Number of workers currently locked or waited on
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_worker_is_exclusive() {
        let locks = Arc::new(WorkerLocks::new());
        let guard = locks.acquire(1, 10).await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _g = locks.acquire(1, 10).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .unwrap()
            .unwrap();
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_different_workers_do_not_block() {
        let locks = WorkerLocks::new();
        let _a = locks.acquire(1, 10).await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire(1, 11)).await;
        assert!(b.is_ok());
        // same worker id in another salon is a different key
        let c = tokio::time::timeout(Duration::from_millis(100), locks.acquire(2, 10)).await;
        assert!(c.is_ok());
        assert_eq!(locks.len(), 3);
    }

    #[tokio::test]
    async fn test_released_locks_are_pruned() {
        let locks = WorkerLocks::new();
        {
            let _a = locks.acquire(1, 10).await;
            let _b = locks.acquire(1, 11).await;
            assert_eq!(locks.len(), 2);
        }
        assert!(locks.is_empty());

        // a waiter keeps the entry alive after the holder releases
        let locks = Arc::new(locks);
        let held = locks.acquire(1, 10).await;
        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _g = locks.acquire(1, 10).await;
                tokio::time::sleep(Duration::from_millis(20)).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(held);
        assert_eq!(locks.len(), 1);

        waiter.await.unwrap();
        assert!(locks.is_empty());
    }
}
