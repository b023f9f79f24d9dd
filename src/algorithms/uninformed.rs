//! Breadth-first and depth-first search.
//!
//! Both ignore costs when choosing what to expand and identify frontier
//! nodes by their state alone.

use crate::algorithms::graph_search::GraphSearch;
use crate::algorithms::graph_search::SearchResult;
use crate::config::DuplicatePolicy;
use crate::config::SearchConfig;
use crate::cost::Cost;
use crate::frontier::FifoFrontier;
use crate::frontier::LifoFrontier;
use crate::heuristic::ZeroHeuristic;
use crate::problem::Problem;
use crate::space::Action;
use crate::space::State;

pub type BreadthFirstSearch<'p, P, St, A, C> =
    GraphSearch<'p, P, FifoFrontier, ZeroHeuristic, St, A, C>;
pub type DepthFirstSearch<'p, P, St, A, C> =
    GraphSearch<'p, P, LifoFrontier, ZeroHeuristic, St, A, C>;

impl<'p, P, St, A, C> GraphSearch<'p, P, FifoFrontier, ZeroHeuristic, St, A, C>
where
    P: Problem<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    /// Expands nodes in the order they were generated.
    ///
    /// Finds a path with the fewest actions. Its cost is only minimal when
    /// every step costs the same.
    ///
    /// `config.duplicates` is ignored.
    #[must_use]
    pub fn breadth_first(problem: &'p P, config: SearchConfig) -> Self {
        Self::new(
            problem,
            FifoFrontier::new(),
            ZeroHeuristic,
            DuplicatePolicy::ByState,
            config,
        )
    }
}

impl<'p, P, St, A, C> GraphSearch<'p, P, LifoFrontier, ZeroHeuristic, St, A, C>
where
    P: Problem<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    /// Expands the most recently generated node first.
    ///
    /// Any path it finds is legal, but nothing more is promised. The last
    /// action a problem enumerates is the first one tried.
    ///
    /// `config.duplicates` is ignored.
    #[must_use]
    pub fn depth_first(problem: &'p P, config: SearchConfig) -> Self {
        Self::new(
            problem,
            LifoFrontier::new(),
            ZeroHeuristic,
            DuplicatePolicy::ByState,
            config,
        )
    }
}

pub fn breadth_first_search<P, St, A, C>(problem: &P) -> SearchResult<St, A, C>
where
    P: Problem<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    BreadthFirstSearch::breadth_first(problem, SearchConfig::default()).find_first()
}

pub fn depth_first_search<P, St, A, C>(problem: &P) -> SearchResult<St, A, C>
where
    P: Problem<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    DepthFirstSearch::depth_first(problem, SearchConfig::default()).find_first()
}
