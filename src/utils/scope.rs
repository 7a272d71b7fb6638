use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Epoch counter for a view. Work started under one epoch must not update
/// state once the view has moved on.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    epoch: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeTicket(u64);

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket(&self) -> ScopeTicket {
        ScopeTicket(self.epoch.load(Ordering::Acquire))
    }

    /// Marks every outstanding ticket stale.
    pub fn invalidate(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }

    pub fn is_current(&self, ticket: ScopeTicket) -> bool {
        self.epoch.load(Ordering::Acquire) == ticket.0
    }
}
