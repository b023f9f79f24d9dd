use std::fmt::Debug;
use std::hash::Hash;

use crate::cost::Cost;
use crate::problem::Problem;

const MAX_ELEMENTS_DISPLAYED: usize = 20;

/// A domain action, consumed by [`Problem::result`].
///
/// Graph-like domains may use the destination state as the action.
pub trait Action: Copy + Clone + Debug + PartialEq + Eq {}
/// A domain state. Opaque to the search besides equality and hashing.
pub trait State: Copy + Clone + Debug + PartialEq + Eq + Hash {}

/// A route from the initial state to a goal.
///
/// `states` always holds one more element than `actions`, as `actions[i]`
/// takes `states[i]` into `states[i + 1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path<S, A, C>
where
    S: State,
    A: Action,
    C: Cost,
{
    pub states: Vec<S>,
    pub actions: Vec<A>,
    pub cost: C,
}

impl<S, A, C> Path<S, A, C>
where
    S: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    pub fn new_from_start(start: S) -> Self {
        Self {
            states: vec![start],
            actions: vec![],
            cost: C::zero(),
        }
    }

    #[inline(always)]
    pub fn start(&self) -> Option<&S> {
        self.states.first()
    }
    #[inline(always)]
    pub fn end(&self) -> Option<&S> {
        self.states.last()
    }

    /// Number of actions along the path.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Extends the path by one step, replacing the accumulated cost.
    ///
    /// The cost is not added up here as `Problem::path_cost` may not be a
    /// plain sum.
    #[inline(always)]
    pub fn append(&mut self, a: A, s: S, cost: C) {
        self.actions.push(a);
        self.states.push(s);
        self.cost = cost;
    }

    /// Replays the path on a problem.
    ///
    /// The path is valid when it starts at the initial state, every action is
    /// offered by `Problem::actions` and leads where the path says it does,
    /// and the recomputed cost matches.
    pub fn is_valid_for<P: Problem<S, A, C>>(&self, problem: &P) -> bool {
        if self.states.len() != self.actions.len() + 1 {
            return false;
        }
        let Some(start) = self.start() else {
            return false;
        };
        if *start != problem.initial() {
            return false;
        }

        let mut cost = C::zero();
        for (i, a) in self.actions.iter().enumerate() {
            let from = &self.states[i];
            let to = &self.states[i + 1];
            if !problem.actions(from).contains(a) {
                return false;
            }
            match problem.result(from, a) {
                Some(s) if s == *to => {
                    cost = problem.path_cost(cost, from, a, to);
                }
                _ => return false,
            }
        }

        cost == self.cost
    }
}

impl<S, A, C> std::fmt::Display for Path<S, A, C>
where
    S: State,
    A: Action,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Path({}, {:?})",
            self.cost,
            self.states
                .iter()
                .take(MAX_ELEMENTS_DISPLAYED)
                .collect::<Vec<_>>(),
        )
    }
}
