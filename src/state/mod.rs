//! Client-side State
//!
//! Plain state containers with pure reducers. The view wraps them in
//! `reactive_stores::Store`; actions only touch them through [`StateCell`].

mod metrics;
mod tasks;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub use metrics::*;
pub use tasks::*;

/// Mutable access to one state container.
pub trait StateCell<S> {
    fn apply(&self, f: impl FnOnce(&mut S));
    fn peek<R>(&self, f: impl FnOnce(&S) -> R) -> R;
}

impl<S> StateCell<S> for Rc<RefCell<S>> {
    fn apply(&self, f: impl FnOnce(&mut S)) {
        f(&mut self.borrow_mut());
    }

    fn peek<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.borrow())
    }
}

/// Lifecycle of one async request family.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestStatus {
    pub loading: bool,
    pub error: Option<String>,
}

impl RequestStatus {
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self) {
        self.loading = false;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Settled after its consumer went away: nothing is recorded.
    pub fn abandon(&mut self) {
        self.loading = false;
    }
}

/// Shared cancellation flag for requests started on behalf of one view.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
