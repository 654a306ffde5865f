//! Global Application Stores
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Views read
//! fields through the generated accessors; all writes go through actions.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::state::{MetricsState, StateCell, TasksState};

/// Type alias for the task store
pub type TasksStore = Store<TasksState>;

/// Type alias for the metrics store
pub type MetricsStore = Store<MetricsState>;

impl<S> StateCell<S> for Store<S>
where
    S: Send + Sync + 'static,
{
    fn apply(&self, f: impl FnOnce(&mut S)) {
        f(&mut *self.write());
    }

    fn peek<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&*self.read_untracked())
    }
}

pub fn new_stores() -> (TasksStore, MetricsStore) {
    (Store::new(TasksState::new()), Store::new(MetricsState::new()))
}
