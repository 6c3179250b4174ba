//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions that determine whether a transition
//! can execute. The tracking machine uses one to express the terminal
//! lock declaratively.

use super::state::State;
use std::fmt;
use std::marker::PhantomData;

/// Pure predicate that determines if a transition can execute.
///
/// # Example
///
/// ```rust
/// use waybill::core::{Guard, State, TrackingStatus};
///
/// // Only allow forward transitions from non-final states
/// let open = Guard::new(|status: &TrackingStatus| !status.is_final());
///
/// assert!(open.check(&TrackingStatus::InTransit));
/// assert!(open.check(&TrackingStatus::OnHold));
/// assert!(!open.check(&TrackingStatus::Delivered));
/// ```
pub struct Guard<S: State> {
    predicate: Box<dyn Fn(&S) -> bool + Send + Sync>,
    _phantom: PhantomData<S>,
}

impl<S: State> Guard<S> {
    /// Wrap a deterministic predicate. It may be shared across threads.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            _phantom: PhantomData,
        }
    }

    /// Whether `state` passes.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
