//! C1 — a reusable counting semaphore with an optional per-acquire
//! timeout and a strictly FIFO wait queue.
//!
//! The active-count-plus-wait-queue pair is guarded by a single narrow
//! `parking_lot::Mutex` (per the multi-threaded re-architecture note in
//! the design doc); waiters are one-shot channels woken in arrival
//! order. All waits are cooperative — nothing spins.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SemaphoreError {
    #[error("acquire timed out")]
    TimedOut,
}

struct Inner {
    max: usize,
    active: usize,
    waiters: VecDeque<(u64, oneshot::Sender<()>)>,
    next_waiter_id: u64,
}

/// A counting semaphore. Cheap to clone — clones share the same
/// underlying counter and queue.
#[derive(Clone)]
pub struct Semaphore {
    inner: Arc<Mutex<Inner>>,
}

/// RAII permit. Releasing is automatic on drop; the oldest waiter (if
/// any) is woken in the same operation.
pub struct SemaphorePermit {
    inner: Arc<Mutex<Inner>>,
}

impl Drop for SemaphorePermit {
    fn drop(&mut self) {
        release(&self.inner);
    }
}

fn release(inner: &Arc<Mutex<Inner>>) {
    let mut guard = inner.lock();
    if let Some((_, tx)) = guard.waiters.pop_front() {
        // The freed slot transfers directly to the oldest waiter — the
        // active count does not change, it just changes owner.
        let _ = tx.send(());
    } else {
        guard.active = guard.active.saturating_sub(1);
    }
}

impl Semaphore {
    pub fn new(max: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                max,
                active: 0,
                waiters: VecDeque::new(),
                next_waiter_id: 0,
            })),
        }
    }

    pub fn active(&self) -> usize {
        self.inner.lock().active
    }

    pub fn waiting(&self) -> usize {
        self.inner.lock().waiters.len()
    }

    /// Blocks until a slot is available; never fails.
    pub async fn acquire(&self) -> SemaphorePermit {
        let rx = {
            let mut guard = self.inner.lock();
            if guard.active < guard.max {
                guard.active += 1;
                None
            } else {
                let (tx, rx) = oneshot::channel();
                let id = guard.next_waiter_id;
                guard.next_waiter_id += 1;
                guard.waiters.push_back((id, tx));
                Some(rx)
            }
        };
        if let Some(rx) = rx {
            // Granted by whichever release() pops us off the queue.
            let _ = rx.await;
        }
        SemaphorePermit {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Blocks until a slot is available or `timeout` elapses. On
    /// timeout the waiter is removed from the queue before the error is
    /// surfaced, so it never lingers to be woken later.
    pub async fn acquire_timeout(
        &self,
        timeout: Duration,
    ) -> Result<SemaphorePermit, SemaphoreError> {
        let (id, rx) = {
            let mut guard = self.inner.lock();
            if guard.active < guard.max {
                guard.active += 1;
                return Ok(SemaphorePermit {
                    inner: Arc::clone(&self.inner),
                });
            }
            let (tx, rx) = oneshot::channel();
            let id = guard.next_waiter_id;
            guard.next_waiter_id += 1;
            guard.waiters.push_back((id, tx));
            (id, rx)
        };

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(())) => Ok(SemaphorePermit {
                inner: Arc::clone(&self.inner),
            }),
            Ok(Err(_)) => Err(SemaphoreError::TimedOut),
            Err(_elapsed) => {
                let mut guard = self.inner.lock();
                let removed = guard.waiters.iter().position(|(wid, _)| *wid == id);
                match removed {
                    Some(pos) => {
                        guard.waiters.remove(pos);
                        Err(SemaphoreError::TimedOut)
                    }
                    None => {
                        // release() already popped us in the race
                        // between the timer firing and this lock
                        // acquisition, orphaning the slot it freed
                        // (our receiver was dropped before or after
                        // the send, either way unread). Reclaim it by
                        // running the same release logic ourselves so
                        // it passes to the next waiter or back to the
                        // pool instead of leaking.
                        drop(guard);
                        release(&self.inner);
                        Err(SemaphoreError::TimedOut)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "semaphore_tests.rs"]
mod tests;
