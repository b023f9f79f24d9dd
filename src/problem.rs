use num_traits::SaturatingAdd;

use crate::cost::Cost;
use crate::space::Action;
use crate::space::State;

/// A search problem.
///
/// Implementations must be pure: every method is a function of its inputs
/// so the same problem can be searched any number of times.
pub trait Problem<St, A, C>: std::fmt::Debug
where
    St: State,
    A: Action,
    C: Cost,
{
    fn initial(&self) -> St;
    /// The goal state, if the goal is a single known state.
    ///
    /// Problems that override [`Problem::goal_test`] with a predicate may
    /// return `None`.
    fn goal(&self) -> Option<St>;

    /// Enumerates the applicable actions. Must be finite.
    ///
    /// The enumeration order decides tie-breaks, so it should be
    /// deterministic.
    fn actions(&self, s: &St) -> Vec<A>;
    /// Applies an action. `None` means the transition is undefined.
    fn result(&self, s: &St, a: &A) -> Option<St>;

    fn goal_test(&self, s: &St) -> bool {
        self.goal().is_some_and(|g| g == *s)
    }

    /// Cost of reaching `to` through `from` and `a`, given the cost `c` of
    /// reaching `from`. Defaults to counting steps.
    fn path_cost(&self, c: C, _from: &St, _a: &A, _to: &St) -> C {
        c.saturating_add(&C::one())
    }
}
