//! Per-account nonce sequencing.
//!
//! Every operation that signs for the account reserves its nonce through a
//! single [`NonceSequence`]. The reservation holds the sequence's lock until
//! the attempt is either broadcast (and committed) or abandoned, so two
//! concurrent operations can never observe the same pending nonce.

use crate::error::Result;
use std::future::Future;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct NonceSequence {
    /// Lowest nonce not yet handed to an accepted broadcast.
    floor: Mutex<u64>,
}

impl NonceSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the sequence and asks `fetch_pending` for the node's pending nonce.
    ///
    /// The reserved nonce is `max(pending, floor)`: the node's count is always
    /// re-read, and the floor only covers broadcasts the node has accepted but
    /// may not report yet.
    pub async fn reserve<F, Fut>(&self, fetch_pending: F) -> Result<NonceSlot<'_>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<u64>>,
    {
        let guard = self.floor.lock().await;
        let pending = fetch_pending().await?;
        let nonce = pending.max(*guard);
        Ok(NonceSlot { guard, nonce })
    }

    pub async fn floor(&self) -> u64 {
        *self.floor.lock().await
    }
}

/// A reserved nonce. Dropping it without [`NonceSlot::commit`] releases the
/// lock and leaves the sequence untouched.
#[derive(Debug)]
pub struct NonceSlot<'a> {
    guard: MutexGuard<'a, u64>,
    nonce: u64,
}

impl NonceSlot<'_> {
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Marks the nonce as used by an accepted broadcast.
    pub fn commit(mut self) {
        *self.guard = self.nonce.saturating_add(1);
    }
}
