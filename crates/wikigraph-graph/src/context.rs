//! Per-query deadline and cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use wikigraph_core::{Error, Result};

/// Carries an optional deadline and a shared cancellation flag.
///
/// Engines call [`QueryContext::check`] between units of work (a BFS
/// frontier, a candidate batch) and abort with [`Error::Cancelled`] once
/// the deadline has passed or [`QueryContext::cancel`] was called on any
/// clone.
#[derive(Clone, Debug, Default)]
pub struct QueryContext {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl QueryContext {
    /// A context with no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().deadline(Instant::now() + timeout)
    }

    /// Set the deadline.
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Request cancellation. Visible to every clone of this context.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested or the deadline passed.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Fail with [`Error::Cancelled`] if the query should stop.
    pub fn check(&self, operation: &str) -> Result<()> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Err(Error::cancelled(format!("{operation} cancelled by caller")));
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(Error::cancelled(format!("{operation} exceeded its deadline")));
        }
        Ok(())
    }
}
