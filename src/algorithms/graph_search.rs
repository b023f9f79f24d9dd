use std::cmp::max;

use derive_more::Display;
use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

use crate::config::DuplicatePolicy;
use crate::config::SearchConfig;
use crate::cost::Cost;
use crate::debug::type_name;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::frontier::Rank;
use crate::heuristic::Heuristic;
use crate::problem::Problem;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::search::SearchTreeNode;
use crate::space::Action;
use crate::space::Path;
use crate::space::State;

/// What a search returns: the goal node, `None` if the frontier ran out, or
/// an error.
pub type SearchResult<St, A, C> = Result<Option<Solution<St, A, C>>, SearchError>;

#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq)]
#[display("expanded: {expanded}, generated: {generated}, max frontier: {max_frontier}")]
pub struct SearchStats {
    /// Nodes popped and expanded. The goal node is popped but not expanded.
    pub expanded: usize,
    /// Children built, duplicates included.
    pub generated: usize,
    /// Largest frontier seen.
    pub max_frontier: usize,
}

/// Frontier membership, mirroring the frontier for constant time duplicate
/// checks.
#[derive(Debug)]
enum FrontierStates<St, C>
where
    St: State,
    C: Cost,
{
    ByState(FxHashSet<St>),
    ByStateAndCost(FxHashSet<(St, C)>),
    Replace(FxHashMap<St, (C, SearchTreeIndex)>),
}

/// What to do with a freshly generated node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Admission {
    New,
    Duplicate,
    /// Beats the frontier node it should replace.
    Improves(SearchTreeIndex),
}

impl<St, C> FrontierStates<St, C>
where
    St: State,
    C: Cost,
{
    fn new(policy: DuplicatePolicy) -> Self {
        match policy {
            DuplicatePolicy::ByState => Self::ByState(FxHashSet::default()),
            DuplicatePolicy::ByStateAndCost => Self::ByStateAndCost(FxHashSet::default()),
            DuplicatePolicy::Replace => Self::Replace(FxHashMap::default()),
        }
    }

    fn admit(&self, s: &St, g: C) -> Admission {
        match self {
            Self::ByState(states) if states.contains(s) => Admission::Duplicate,
            Self::ByStateAndCost(states) if states.contains(&(*s, g)) => Admission::Duplicate,
            Self::Replace(states) => match states.get(s) {
                Some((best_g, _)) if *best_g <= g => Admission::Duplicate,
                Some((_, node_index)) => Admission::Improves(*node_index),
                None => Admission::New,
            },
            _ => Admission::New,
        }
    }

    fn insert(&mut self, s: St, g: C, node_index: SearchTreeIndex) {
        match self {
            Self::ByState(states) => {
                states.insert(s);
            }
            Self::ByStateAndCost(states) => {
                states.insert((s, g));
            }
            Self::Replace(states) => {
                states.insert(s, (g, node_index));
            }
        }
    }

    fn remove(&mut self, s: &St, g: C) {
        match self {
            Self::ByState(states) => {
                states.remove(s);
            }
            Self::ByStateAndCost(states) => {
                states.remove(&(*s, g));
            }
            Self::Replace(states) => {
                states.remove(s);
            }
        }
    }
}

/// The expand, dedupe, terminate loop every search shares.
///
/// Nodes are goal-tested when they leave the frontier, not when they are
/// generated. A state is explored once its node leaves the frontier, and
/// explored states are never generated again. Which node leaves next is up
/// to the frontier `F`.
///
/// Construct it through `GraphSearch::breadth_first`,
/// `GraphSearch::depth_first`, `GraphSearch::uniform_cost` or
/// `GraphSearch::astar`.
#[derive(Debug)]
pub struct GraphSearch<'p, P, F, H, St, A, C>
where
    P: Problem<St, A, C>,
    F: Frontier<C>,
    H: Heuristic<St, C>,
    St: State,
    A: Action,
    C: Cost,
{
    problem: &'p P,
    heuristic: H,
    goal: Option<St>,

    /// Every node generated so far, the parent links form the search tree.
    search_tree: SearchTree<St, A, C>,
    frontier: F,
    frontier_states: FrontierStates<St, C>,
    explored: FxHashSet<St>,

    config: SearchConfig,
    stats: SearchStats,
}

impl<'p, P, F, H, St, A, C> GraphSearch<'p, P, F, H, St, A, C>
where
    P: Problem<St, A, C>,
    F: Frontier<C>,
    H: Heuristic<St, C>,
    St: State,
    A: Action,
    C: Cost,
{
    #[must_use]
    pub(crate) fn new(
        problem: &'p P,
        frontier: F,
        heuristic: H,
        duplicates: DuplicatePolicy,
        config: SearchConfig,
    ) -> Self {
        let mut search = Self {
            problem,
            heuristic,
            goal: problem.goal(),

            search_tree: SearchTree::new(),
            frontier,
            frontier_states: FrontierStates::new(duplicates),
            explored: FxHashSet::default(),

            config,
            stats: SearchStats::default(),
        };

        let root = SearchTreeNode::root(problem.initial());
        search.push_new(root);
        search.stats.max_frontier = search.frontier.len();

        search
    }

    #[inline(always)]
    fn h(&mut self, s: &St) -> C {
        match &self.goal {
            Some(goal) => self.heuristic.h(s, goal),
            None => C::zero(),
        }
    }

    #[inline(always)]
    fn rank(&mut self, node: &SearchTreeNode<St, A, C>) -> Rank<C> {
        let h = self.h(node.state());
        Rank::new(node.cost(), h)
    }

    fn push_new(&mut self, node: SearchTreeNode<St, A, C>) {
        let rank = self.rank(&node);
        let (s, g) = (*node.state(), node.cost());
        let node_index = self.search_tree.push(node);
        self.frontier_states.insert(s, g, node_index);
        self.frontier.push(node_index, rank);
    }

    fn push_replacement(&mut self, old: SearchTreeIndex, node: SearchTreeNode<St, A, C>) {
        let rank = self.rank(&node);
        let (s, g) = (*node.state(), node.cost());
        let node_index = self.search_tree.push(node);
        self.frontier_states.insert(s, g, node_index);
        let replaced = self.frontier.replace(old, node_index, rank);
        debug_assert!(replaced, "Frontier lost track of {s:?}");
    }

    /// Runs until the first goal leaves the frontier.
    pub fn find_first(mut self) -> SearchResult<St, A, C> {
        log::debug!(
            "{} on {} from {:?}",
            type_name::<F>(),
            type_name::<P>(),
            self.problem.initial(),
        );

        while let Some(node_index) = self.frontier.pop() {
            let state = *self.search_tree[node_index].state();
            let g: C = self.search_tree[node_index].cost();

            self.frontier_states.remove(&state, g);
            self.explored.insert(state);

            if self.problem.goal_test(&state) {
                log::debug!("Found {state:?} at cost {g} ({})", self.stats);
                return Ok(Some(Solution {
                    search_tree: self.search_tree,
                    goal: node_index,
                    stats: self.stats,
                }));
            }

            if let Some(limit) = self.config.limits.max_expansions {
                if self.stats.expanded >= limit {
                    log::debug!("Giving up at {state:?} ({})", self.stats);
                    return Err(SearchError::Aborted {
                        expansions: self.stats.expanded,
                        limit,
                    });
                }
            }

            // Expand state
            log::trace!("Expanding {state:?} at cost {g}");
            self.stats.expanded += 1;
            for child in self.search_tree.expand(self.problem, node_index)? {
                self.stats.generated += 1;
                if !child.cost().valid() {
                    log::trace!("Dropping {:?}, its cost saturated", child.state());
                    continue;
                }
                if self.explored.contains(child.state()) {
                    continue;
                }
                match self.frontier_states.admit(child.state(), child.cost()) {
                    Admission::New => self.push_new(child),
                    Admission::Duplicate => {}
                    Admission::Improves(old) => self.push_replacement(old, child),
                }
            }
            self.stats.max_frontier = max(self.stats.max_frontier, self.frontier.len());
        }

        log::debug!("Frontier exhausted ({})", self.stats);
        Ok(None)
    }
}

/// The goal node found by a search, together with the tree that leads to it.
#[derive(Clone, Debug)]
pub struct Solution<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    search_tree: SearchTree<St, A, C>,
    goal: SearchTreeIndex,
    stats: SearchStats,
}

impl<St, A, C> Solution<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub fn node(&self) -> &SearchTreeNode<St, A, C> {
        &self.search_tree[self.goal]
    }
    pub fn node_index(&self) -> SearchTreeIndex {
        self.goal
    }
    pub fn search_tree(&self) -> &SearchTree<St, A, C> {
        &self.search_tree
    }
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Nodes from the root to the goal.
    pub fn path(&self) -> Vec<&SearchTreeNode<St, A, C>> {
        self.search_tree
            .path(self.goal)
            .into_iter()
            .map(|i| &self.search_tree[i])
            .collect()
    }
    pub fn states(&self) -> Vec<St> {
        self.path().into_iter().map(|n| *n.state()).collect()
    }
    pub fn cost(&self) -> C {
        self.node().cost()
    }

    pub fn to_path(&self) -> Path<St, A, C> {
        self.search_tree.build_path(self.goal)
    }
    /// Drops the search tree, keeping only the route.
    pub fn into_path(self) -> Path<St, A, C> {
        self.to_path()
    }

    pub fn write_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use size::Size;
        use std::mem::size_of;
        use thousands::Separable;

        writeln!(out, "Search Stats:")?;
        let s = size_of::<SearchTreeNode<St, A, C>>();
        let l = self.search_tree.len();
        writeln!(
            out,
            "  - |Nodes|:   {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - Expanded nodes:  {}",
            self.stats.expanded.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - Generated nodes: {}",
            self.stats.generated.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - Max frontier:    {}",
            self.stats.max_frontier.separate_with_commas()
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_by_state() {
        let mut m = FrontierStates::<u64, u32>::new(DuplicatePolicy::ByState);
        assert_eq!(m.admit(&1, 5), Admission::New);
        m.insert(1, 5, fake_index());
        assert_eq!(m.admit(&1, 5), Admission::Duplicate);
        assert_eq!(m.admit(&1, 2), Admission::Duplicate);
        m.remove(&1, 5);
        assert_eq!(m.admit(&1, 5), Admission::New);
    }

    #[test]
    fn membership_by_state_and_cost() {
        let mut m = FrontierStates::<u64, u32>::new(DuplicatePolicy::ByStateAndCost);
        m.insert(1, 5, fake_index());
        assert_eq!(m.admit(&1, 5), Admission::Duplicate);
        assert_eq!(m.admit(&1, 2), Admission::New);
        assert_eq!(m.admit(&1, 7), Admission::New);
        m.insert(1, 2, fake_index());
        m.remove(&1, 5);
        assert_eq!(m.admit(&1, 5), Admission::New);
        assert_eq!(m.admit(&1, 2), Admission::Duplicate);
    }

    #[test]
    fn membership_replace() {
        let i = fake_index();
        let mut m = FrontierStates::<u64, u32>::new(DuplicatePolicy::Replace);
        m.insert(1, 5, i);
        assert_eq!(m.admit(&1, 5), Admission::Duplicate);
        assert_eq!(m.admit(&1, 7), Admission::Duplicate);
        assert_eq!(m.admit(&1, 2), Admission::Improves(i));
        m.remove(&1, 5);
        assert_eq!(m.admit(&1, 7), Admission::New);
    }

    #[test]
    fn solution_views() {
        use crate::algorithms::uniform_cost_search;
        use crate::problems::road_map::EdgeCost;
        use crate::problems::road_map::RoadMap;
        use crate::problems::road_map::RoadMapProblem;

        let map = RoadMap::romania();
        let problem =
            RoadMapProblem::between(&map, "Fagaras", "Craiova", EdgeCost::Distance).unwrap();
        let solution = uniform_cost_search(&problem).unwrap().unwrap();

        let nodes = solution.path();
        assert_eq!(nodes.first().map(|n| n.depth()), Some(0));
        assert_eq!(nodes.last().map(|n| n.cost()), Some(solution.cost()));
        assert_eq!(solution.node().depth() + 1, nodes.len());
        assert_eq!(
            solution.search_tree()[solution.node_index()].state(),
            solution.node().state()
        );
        assert!(solution.search_tree().len() > nodes.len());

        let stats = solution.stats();
        assert!(stats.expanded <= stats.generated);
        assert!(stats.max_frontier > 0);

        let mut report = vec![];
        solution.write_stats(&mut report).unwrap();
        let report = String::from_utf8(report).unwrap();
        assert!(report.starts_with("Search Stats:"));
        assert!(report.contains(&format!("Expanded nodes:  {}", stats.expanded)));

        let states = solution.states();
        let path = solution.into_path();
        assert_eq!(path.states, states);
        assert_eq!(path.len() + 1, states.len());
        assert!(path.is_valid_for(&problem));
        assert!(path.to_string().starts_with(&format!("Path({}, ", path.cost)));
    }

    fn fake_index() -> SearchTreeIndex {
        let mut tree = SearchTree::<u64, u64, u32>::new();
        tree.push(SearchTreeNode::root(0))
    }

    impl State for u64 {}
    impl Action for u64 {}
}
