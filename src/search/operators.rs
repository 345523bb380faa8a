//! Operator contracts: undoable mutation and candidate initialization.
//!
//! Both contracts include `split`, which returns an independent copy with
//! the same configuration and its own mutable state (RNG, undo record).
//! A split copy can be driven on another thread without any locking.

/// A mutation that perturbs a candidate in place and can revert the most
/// recent perturbation exactly.
///
/// `undo` after `mutate` must restore a candidate that compares equal to
/// the one passed to `mutate`. Only the single most recent mutation needs
/// to be undoable.
pub trait UndoableMutationOperator<T>: Send {
    /// Perturbs `candidate` in place.
    fn mutate(&mut self, candidate: &mut T);

    /// Reverts the most recent call to [`mutate`](Self::mutate).
    fn undo(&mut self, candidate: &mut T);

    /// Independent copy with the same configuration.
    fn split(&self) -> Self
    where
        Self: Sized;
}

/// Produces fresh random candidates.
pub trait Initializer<T>: Send {
    fn create_candidate_solution(&mut self) -> T;

    /// Independent copy with the same configuration.
    fn split(&self) -> Self
    where
        Self: Sized;
}
