//! Uniform-cost search, Dijkstra's algorithm stopping at the first goal.

use crate::algorithms::graph_search::GraphSearch;
use crate::algorithms::graph_search::SearchResult;
use crate::config::SearchConfig;
use crate::cost::Cost;
use crate::frontier::PriorityFrontier;
use crate::heuristic::ZeroHeuristic;
use crate::problem::Problem;
use crate::space::Action;
use crate::space::State;

pub type UniformCostSearch<'p, P, St, A, C> =
    GraphSearch<'p, P, PriorityFrontier<C>, ZeroHeuristic, St, A, C>;

impl<'p, P, St, A, C> GraphSearch<'p, P, PriorityFrontier<C>, ZeroHeuristic, St, A, C>
where
    P: Problem<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    /// Expands the cheapest node first.
    ///
    /// With non-negative step costs the first goal to leave the frontier is
    /// reached through a cheapest path, for every `DuplicatePolicy`.
    /// `DuplicatePolicy::ByStateAndCost` may expand a state more than once
    /// before that happens.
    #[must_use]
    pub fn uniform_cost(problem: &'p P, config: SearchConfig) -> Self {
        Self::new(
            problem,
            PriorityFrontier::new(),
            ZeroHeuristic,
            config.duplicates,
            config,
        )
    }
}

pub fn uniform_cost_search<P, St, A, C>(problem: &P) -> SearchResult<St, A, C>
where
    P: Problem<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    UniformCostSearch::uniform_cost(problem, SearchConfig::default()).find_first()
}
