use crate::{primitive::*, ClusterError, Result};

/// Number of consecutive futile turns after which a calculation is stopped.
pub const DEFAULT_FUTILE_TURN_LIMIT: usize = 3;
/// Minimum cohesion improvement for an iteration to count as progress.
pub const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 1e-5;

/// Stopping rule for a running k-means calculation.
///
/// Every iteration produces a new cohesion value. An iteration whose cohesion
/// did not drop by at least **threshold** below the best cohesion recorded so far
/// is a *futile turn*. The calculation stops once **limit** futile turns happened
/// in a row; any real improvement resets the counter and becomes the new best.
///
/// Since each reset lowers the recorded cohesion by at least **threshold**, and
/// cohesion can never go below zero, the rule always trips after a finite number
/// of iterations.
/// ## Fields:
/// - **limit**: Amount of consecutive futile turns, after which the calculation is aborted
/// - **threshold**: Threshold, used to detect an improvement (`improvement >= threshold`)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbortStrategy<T: Primitive> {
    pub limit: usize,
    pub threshold: T,
}
impl<T: Primitive> Default for AbortStrategy<T> {
    fn default() -> Self {
        Self {
            limit: DEFAULT_FUTILE_TURN_LIMIT,
            threshold: T::constant(DEFAULT_CONVERGENCE_THRESHOLD),
        }
    }
}
impl<T: Primitive> AbortStrategy<T> {
    /// Reject rules that could keep a calculation running forever.
    pub fn validate(&self) -> Result<()> {
        if self.limit < 1 || !(self.threshold > T::zero()) {
            return Err(ClusterError::InvalidAbortStrategy {
                limit: self.limit,
                threshold: self.threshold.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }

    pub(crate) fn create_logic(&self) -> ConvergenceMonitor<T> {
        ConvergenceMonitor {
            limit: self.limit,
            threshold: self.threshold,
            prev_cohesion: T::infinity(),
            futile_turns: 0,
        }
    }
}


/// Running state of an [`AbortStrategy`].
#[derive(Debug)]
pub(crate) struct ConvergenceMonitor<T: Primitive> {
    limit: usize,
    threshold: T,
    prev_cohesion: T,
    futile_turns: usize,
}
impl<T: Primitive> ConvergenceMonitor<T> {
    /// Function that has to be called once an iteration computed its cohesion.
    /// ## Arguments
    /// - **cohesion**: The new cohesion, after an assignment step
    /// ## Returns
    /// - **true** if the calculation should continue
    /// - **false** if the calculation should stop
    pub fn next(&mut self, cohesion: T) -> bool {
        // a NaN cohesion never counts as progress
        if !(self.prev_cohesion - cohesion >= self.threshold) {
            self.futile_turns += 1;
        } else {
            self.futile_turns = 0;
            self.prev_cohesion = cohesion;
        }
        self.futile_turns < self.limit
    }

    pub fn futile_turns(&self) -> usize { self.futile_turns }

    /// Lowest cohesion that counted as an improvement so far.
    pub fn best_cohesion(&self) -> T { self.prev_cohesion }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn strategy<T: Primitive>(limit: usize) -> AbortStrategy<T> {
        AbortStrategy { limit, threshold: T::constant(0.0005) }
    }

    #[test] fn futile_turns_f32() { futile_turns::<f32>(); }
    #[test] fn futile_turns_f64() { futile_turns::<f64>(); }

    fn futile_turns<T: Primitive>() {
        {
            let mut logic = strategy::<T>(1).create_logic();
            assert_eq!(logic.next( T::constant(3000.0) ), true);
            assert_eq!(logic.next( T::constant(3000.0) ), false);
        }
        {
            let mut logic = strategy::<T>(1).create_logic();
            assert_eq!(logic.next( T::constant(3000.0) ), true);
            assert_eq!(logic.next( T::constant(2000.0) ), true);
            assert_eq!(logic.next( T::constant(1999.0) ), true);
            assert_eq!(logic.next( T::constant(1999.5) ), false);
        }
        {
            let mut logic = strategy::<T>(3).create_logic();
            assert_eq!(logic.next( T::constant(100.0) ), true);
            assert_eq!(logic.next( T::constant(100.0) ), true);
            assert_eq!(logic.futile_turns(), 1);
            assert_eq!(logic.next( T::constant(100.0) ), true);
            assert_eq!(logic.next( T::constant(100.0) ), false);
            assert_eq!(logic.futile_turns(), 3);
        }
        { // an improvement in between resets the counter
            let mut logic = strategy::<T>(3).create_logic();
            assert_eq!(logic.next( T::constant(100.0) ), true);
            assert_eq!(logic.next( T::constant(100.0) ), true);
            assert_eq!(logic.next( T::constant(100.0) ), true);
            assert_eq!(logic.next( T::constant(50.0) ), true);
            assert_eq!(logic.futile_turns(), 0);
            assert_eq!(logic.next( T::constant(50.0) ), true);
            assert_eq!(logic.next( T::constant(50.0) ), true);
            assert_eq!(logic.next( T::constant(50.0) ), false);
        }
    }

    #[test]
    fn worse_iterations_do_not_replace_the_best_cohesion() {
        let mut logic = strategy::<f64>(3).create_logic();
        assert!(logic.next(10.0));
        assert!(logic.next(12.0));
        assert_eq!(logic.best_cohesion(), 10.0);
        // 9.9 improves on the recorded best (10.0), not just on the last value (12.0)
        assert!(logic.next(9.9));
        assert_eq!(logic.futile_turns(), 0);
        assert_eq!(logic.best_cohesion(), 9.9);
        // 10.5 would be an improvement over 12.0 but not over 9.9
        assert!(logic.next(10.5));
        assert_eq!(logic.futile_turns(), 1);
    }

    #[test]
    fn nan_cohesion_is_futile() {
        let mut logic = strategy::<f64>(3).create_logic();
        assert!(logic.next(f64::NAN));
        assert!(logic.next(f64::NAN));
        assert!(!logic.next(f64::NAN));
        assert_eq!(logic.best_cohesion(), f64::INFINITY);

        let mut logic = strategy::<f64>(2).create_logic();
        assert!(logic.next(5.0));
        assert!(logic.next(f64::NAN));
        assert!(!logic.next(f64::NAN));
        assert_eq!(logic.best_cohesion(), 5.0);
    }

    #[test]
    fn rules_that_never_trip_are_rejected() {
        assert!(AbortStrategy::<f64>::default().validate().is_ok());
        for (limit, threshold) in [(3, 0.0), (3, -1e-5), (3, f64::NAN), (0, 1e-5)] {
            match (AbortStrategy { limit, threshold }).validate() {
                Err(ClusterError::InvalidAbortStrategy { limit: l, .. }) => assert_eq!(l, limit),
                other => panic!("expected invalid stopping rule for {:?}, got {:?}", (limit, threshold), other),
            }
        }
    }

    #[test]
    fn first_iteration_always_counts_as_progress() {
        let mut logic = AbortStrategy::<f32>::default().create_logic();
        assert!(logic.next(f32::MAX));
        assert_eq!(logic.futile_turns(), 0);
    }
}
