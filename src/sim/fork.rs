//! Exclusive-use forks
//!
//! A fork is the unit of contention: one nullable owner plus the handle
//! lock a philosopher must hold while the fork is in use. Picking up the
//! handle and claiming ownership are separate exclusion scopes, and two
//! forks are never locked under a single scope; acquiring a pair is always
//! two independent steps. A philosopher parked in [`Fork::pickup`] stays
//! parked until the current holder lets go, however long that takes.

use parking_lot::Mutex;

use crate::utils::errors::{Result, SimError};

/// Identifies a fork within its table
pub type ForkId = usize;

/// A single exclusive-use fork
pub struct Fork {
    /// Table-assigned id, unique within the table
    id: ForkId,

    /// Name of the philosopher currently holding the fork, if any.
    /// The lock makes the free-check and the set indivisible per fork.
    owner: Mutex<Option<String>>,

    /// The handle contended pickups park on. This is the only point in the
    /// simulation where a task can block indefinitely.
    handle: tokio::sync::Mutex<()>,
}

impl Fork {
    pub(crate) fn new(id: ForkId) -> Self {
        Self {
            id,
            owner: Mutex::new(None),
            handle: tokio::sync::Mutex::new(()),
        }
    }

    /// Numeric id of this fork
    pub fn id(&self) -> ForkId {
        self.id
    }

    /// True iff no philosopher currently owns the fork. Side-effect free.
    pub fn is_free(&self) -> bool {
        self.owner.lock().is_none()
    }

    /// Current holder, if any. A monitoring snapshot.
    pub fn owner(&self) -> Option<String> {
        self.owner.lock().clone()
    }

    /// Wait for the fork's handle. The guard must be held for as long as
    /// the fork is in use.
    pub async fn pickup(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.handle.lock().await
    }

    /// Claim ownership of the fork for `who`.
    ///
    /// Check-and-set runs under the owner lock. On conflict the error names
    /// the fork, the current holder, and the requester, and ownership is
    /// unchanged.
    pub fn acquire(&self, who: &str) -> Result<()> {
        let mut owner = self.owner.lock();

        match owner.as_ref() {
            None => {
                *owner = Some(who.to_string());
                Ok(())
            }
            Some(held_by) => Err(SimError::ForkInUse {
                fork: self.id,
                held_by: held_by.clone(),
                requested_by: who.to_string(),
            }),
        }
    }

    /// Put the fork down. A no-op unless `who` is the current holder.
    pub fn release(&self, who: &str) {
        let mut owner = self.owner.lock();

        if owner.as_deref() == Some(who) {
            *owner = None;
        }
    }
}
