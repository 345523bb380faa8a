//! Shared best-so-far record and cooperative cancellation.

use super::cost::{Cost, CostValue};
use super::solution::SolutionCostPair;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::time::{Duration, Instant};

struct Best<T> {
    solution: T,
    cost: Cost,
    elapsed: Duration,
}

/// Best solution found across every search sharing this tracker, plus
/// two one-way flags: *found best* and *stopped*.
///
/// A tracker is shared by `Arc` between an engine, all of its split
/// copies and any refinement stage. The compare-and-replace in
/// [`update`](Self::update) runs under a mutex; the costs are mirrored in
/// atomics so the per-iteration reads in search loops never lock.
///
/// Invariants:
/// - the recorded best cost never increases;
/// - once set, *found best* and *stopped* stay set.
///
/// # Examples
///
/// ```
/// use u_anneal::search::ProgressTracker;
///
/// let tracker = ProgressTracker::new();
/// assert_eq!(tracker.update(10_i64, &vec![1, 2, 3]), 10);
/// assert_eq!(tracker.update(12_i64, &vec![3, 2, 1]), 10);
/// assert_eq!(tracker.cost(), 10);
/// assert_eq!(tracker.solution(), Some(vec![1, 2, 3]));
/// ```
pub struct ProgressTracker<T> {
    best: Mutex<Option<Best<T>>>,
    int_cost: AtomicI64,
    real_cost: AtomicU64,
    found_best: AtomicBool,
    stopped: AtomicBool,
    created: Instant,
}

impl<T> ProgressTracker<T> {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            best: Mutex::new(None),
            int_cost: AtomicI64::new(i64::MAX),
            real_cost: AtomicU64::new(f64::INFINITY.to_bits()),
            found_best: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            created: Instant::now(),
        }
    }

    /// Best cost as an integer; `i64::MAX` when nothing is recorded.
    pub fn cost(&self) -> i64 {
        self.int_cost.load(Ordering::Acquire)
    }

    /// Best cost as a real; `f64::INFINITY` when nothing is recorded.
    pub fn cost_real(&self) -> f64 {
        f64::from_bits(self.real_cost.load(Ordering::Acquire))
    }

    /// Whether the recorded best came from an integer-cost problem.
    pub fn contains_int_cost(&self) -> bool {
        self.best
            .lock()
            .as_ref()
            .is_some_and(|best| best.cost.is_integer())
    }

    /// Time between tracker creation and the recording of the current best.
    pub fn elapsed_at_best(&self) -> Option<Duration> {
        self.best.lock().as_ref().map(|best| best.elapsed)
    }

    /// Whether some search reached the problem's theoretical minimum.
    pub fn did_find_best(&self) -> bool {
        self.found_best.load(Ordering::Acquire)
    }

    /// Marks the theoretical minimum as reached. Permanent.
    pub fn set_found_best(&self) {
        self.found_best.store(true, Ordering::Release);
    }

    /// Whether an external actor asked all searches to stop.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Asks every search sharing this tracker to stop. Permanent.
    ///
    /// Searches poll the flag once per iteration, so a search blocked
    /// inside a cost evaluation finishes that evaluation first.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }
}

impl<T: Clone> ProgressTracker<T> {
    /// Offers a solution; it is recorded only if strictly better than the
    /// current best.
    ///
    /// Returns the best cost after the call in the caller's flavor, which
    /// may belong to a solution recorded concurrently by another thread.
    pub fn update<C: CostValue>(&self, cost: C, solution: &T) -> C {
        let mut best = self.best.lock();
        let current = match best.as_ref() {
            Some(_) => C::tracked(self),
            None => C::WORST,
        };
        if cost < current {
            let tagged = cost.to_cost();
            *best = Some(Best {
                solution: solution.clone(),
                cost: tagged,
                elapsed: self.created.elapsed(),
            });
            self.int_cost.store(tagged.as_i64(), Ordering::Release);
            self.real_cost
                .store(tagged.as_f64().to_bits(), Ordering::Release);
            cost
        } else {
            current
        }
    }

    /// Records a solution known to be optimal and sets *found best*.
    pub fn update_known_optimal<C: CostValue>(&self, cost: C, solution: &T) -> C {
        let best = self.update(cost, solution);
        self.set_found_best();
        best
    }

    /// Copy of the best solution, if any has been recorded.
    pub fn solution(&self) -> Option<T> {
        self.best.lock().as_ref().map(|best| best.solution.clone())
    }

    /// Copy of the best solution together with its cost.
    pub fn solution_cost_pair(&self) -> Option<SolutionCostPair<T>> {
        self.best
            .lock()
            .as_ref()
            .map(|best| SolutionCostPair::new(best.solution.clone(), best.cost))
    }
}

impl<T> Default for ProgressTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for ProgressTracker<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("cost", &self.cost_real())
            .field("found_best", &self.did_find_best())
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_empty_tracker() {
        let tracker: ProgressTracker<Vec<u8>> = ProgressTracker::new();
        assert_eq!(tracker.cost(), i64::MAX);
        assert_eq!(tracker.cost_real(), f64::INFINITY);
        assert!(tracker.solution().is_none());
        assert!(tracker.solution_cost_pair().is_none());
        assert!(tracker.elapsed_at_best().is_none());
        assert!(!tracker.contains_int_cost());
        assert!(!tracker.did_find_best());
        assert!(!tracker.is_stopped());
    }

    #[test]
    fn test_update_keeps_strictly_better_only() {
        let tracker = ProgressTracker::new();
        assert_eq!(tracker.update(5.5, &"a"), 5.5);
        assert_eq!(tracker.update(5.5, &"b"), 5.5);
        assert_eq!(tracker.update(9.0, &"c"), 5.5);
        assert_eq!(tracker.solution(), Some("a"));
        assert_eq!(tracker.update(1.25, &"d"), 1.25);
        assert_eq!(tracker.solution(), Some("d"));
        assert_eq!(tracker.cost_real(), 1.25);
        assert_eq!(tracker.cost(), 2);
        assert!(!tracker.contains_int_cost());
    }

    #[test]
    fn test_integer_update() {
        let tracker = ProgressTracker::new();
        tracker.update(42_i64, &7_u32);
        assert!(tracker.contains_int_cost());
        assert_eq!(tracker.cost(), 42);
        assert_eq!(tracker.cost_real(), 42.0);
        let pair = tracker.solution_cost_pair().unwrap();
        assert_eq!(*pair.solution(), 7);
        assert_eq!(pair.cost(), Cost::Integer(42));
        assert!(tracker.elapsed_at_best().is_some());
    }

    #[test]
    fn test_returned_solution_is_independent_copy() {
        let tracker = ProgressTracker::new();
        let mut v = vec![1, 2, 3];
        tracker.update(3_i64, &v);
        v.push(4);
        let mut copy = tracker.solution().unwrap();
        copy.clear();
        assert_eq!(tracker.solution(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_flags_are_permanent() {
        let tracker: ProgressTracker<i64> = ProgressTracker::new();
        tracker.set_found_best();
        tracker.set_found_best();
        assert!(tracker.did_find_best());
        tracker.stop();
        assert!(tracker.is_stopped());
        tracker.update(1_i64, &0);
        assert!(tracker.did_find_best());
        assert!(tracker.is_stopped());
    }

    #[test]
    fn test_update_known_optimal() {
        let tracker = ProgressTracker::new();
        assert_eq!(tracker.update_known_optimal(0_i64, &3_i64), 0);
        assert!(tracker.did_find_best());
        assert_eq!(tracker.solution(), Some(3));
    }

    #[test]
    fn test_concurrent_updates_keep_minimum() {
        let tracker = Arc::new(ProgressTracker::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let tracker = Arc::clone(&tracker);
                thread::spawn(move || {
                    let mut last = i64::MAX;
                    for i in 0..2_000_i64 {
                        let cost = (i * 7919 + t * 104_729) % 10_007 + 1;
                        let best = tracker.update(cost, &(t, cost));
                        assert!(best <= cost);
                        // Never observe a regression.
                        assert!(best <= last);
                        last = best;
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let expected = (0..8_i64)
            .flat_map(|t| (0..2_000_i64).map(move |i| (i * 7919 + t * 104_729) % 10_007 + 1))
            .min()
            .unwrap();
        assert_eq!(tracker.cost(), expected);
        let (_, recorded) = tracker.solution().unwrap();
        assert_eq!(recorded, expected);
    }

    proptest! {
        #[test]
        fn prop_best_is_minimum_offered(costs in prop::collection::vec(-1_000_000_i64..1_000_000, 1..200)) {
            let tracker = ProgressTracker::new();
            for (i, &c) in costs.iter().enumerate() {
                tracker.update(c, &i);
            }
            let min = *costs.iter().min().unwrap();
            prop_assert_eq!(tracker.cost(), min);
            let first = costs.iter().position(|&c| c == min).unwrap();
            prop_assert_eq!(tracker.solution(), Some(first));
        }

        #[test]
        fn prop_real_best_is_minimum_offered(costs in prop::collection::vec(-1.0e6_f64..1.0e6, 1..200)) {
            let tracker = ProgressTracker::new();
            for &c in &costs {
                tracker.update(c, &c.to_bits());
            }
            let min = costs.iter().cloned().fold(f64::INFINITY, f64::min);
            prop_assert_eq!(tracker.cost_real(), min);
        }
    }
}
