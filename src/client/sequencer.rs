//! Out-of-order response guard.
//!
//! Each request takes a ticket before it suspends. When it resumes, its
//! result is only used if no newer ticket was issued meanwhile, so a slow
//! stale response can never overwrite a fresher one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: Arc<AtomicU64>,
}

#[derive(Debug)]
pub struct RequestTicket {
    seq: u64,
    latest: Arc<AtomicU64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket, superseding every earlier one.
    pub fn issue(&self) -> RequestTicket {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket {
            seq,
            latest: Arc::clone(&self.latest),
        }
    }
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// True while no newer ticket exists.
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.seq
    }

    /// Passes `value` through only if this ticket is still current.
    pub fn accept<T>(&self, value: T) -> Option<T> {
        self.is_current().then_some(value)
    }
}
