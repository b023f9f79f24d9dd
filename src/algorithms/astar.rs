//! A*, uniform-cost search guided by a heuristic.
//!
//! Nodes are ranked by `f = g + h`, breaking ties for lower `h`.

use crate::algorithms::graph_search::GraphSearch;
use crate::algorithms::graph_search::SearchResult;
use crate::config::SearchConfig;
use crate::cost::Cost;
use crate::frontier::PriorityFrontier;
use crate::heuristic::Heuristic;
use crate::problem::Problem;
use crate::space::Action;
use crate::space::State;

pub type AStarSearch<'p, P, H, St, A, C> = GraphSearch<'p, P, PriorityFrontier<C>, H, St, A, C>;

impl<'p, P, H, St, A, C> GraphSearch<'p, P, PriorityFrontier<C>, H, St, A, C>
where
    P: Problem<St, A, C>,
    H: Heuristic<St, C>,
    St: State,
    A: Action,
    C: Cost,
{
    /// Expands the node with the lowest `g + h` first.
    ///
    /// The heuristic is evaluated once per generated node, against the
    /// problem's goal. Problems without a single goal state get `h = 0`
    /// everywhere, which behaves like uniform-cost search.
    ///
    /// Solutions are optimal when `heuristic` is consistent.
    #[must_use]
    pub fn astar(problem: &'p P, heuristic: H, config: SearchConfig) -> Self {
        if problem.goal().is_none() {
            log::warn!("A* on a problem without a goal state, ignoring {heuristic:?}");
        }
        Self::new(
            problem,
            PriorityFrontier::new(),
            heuristic,
            config.duplicates,
            config,
        )
    }
}

pub fn astar_search<P, H, St, A, C>(problem: &P, heuristic: H) -> SearchResult<St, A, C>
where
    P: Problem<St, A, C>,
    H: Heuristic<St, C>,
    St: State,
    A: Action,
    C: Cost,
{
    AStarSearch::astar(problem, heuristic, SearchConfig::default()).find_first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::uniform_cost_search;
    use crate::config::DuplicatePolicy;
    use crate::heuristic::FnHeuristic;
    use crate::heuristic::MemoizedHeuristic;
    use crate::heuristic::ZeroHeuristic;
    use crate::problems::maze_2d::DiagonalHeuristic;
    use crate::problems::maze_2d::ManhattanHeuristic;
    use crate::problems::maze_2d::Maze2DProblem;
    use crate::problems::road_map::CityId;
    use crate::problems::road_map::EdgeCost;
    use crate::problems::road_map::RoadMap;
    use crate::problems::road_map::RoadMapProblem;

    #[test]
    fn astar_romania() {
        let map = RoadMap::romania();
        let problem =
            RoadMapProblem::between(&map, "Arad", "Bucharest", EdgeCost::Distance).unwrap();

        for duplicates in [DuplicatePolicy::ByStateAndCost, DuplicatePolicy::Replace] {
            let config = SearchConfig::default().with_duplicates(duplicates);
            let solution = AStarSearch::astar(&problem, map.heuristic(), config)
                .find_first()
                .unwrap()
                .unwrap();
            assert_eq!(
                map.names(&solution.states()),
                vec!["Arad", "Sibiu", "Rimnicu", "Pitesti", "Bucharest"],
                "{duplicates}"
            );
            assert_eq!(solution.cost(), 418, "{duplicates}");
            assert!(solution.to_path().is_valid_for(&problem));
        }
    }

    #[test]
    fn astar_expands_less_than_ucs() {
        let map = RoadMap::romania();
        let problem =
            RoadMapProblem::between(&map, "Arad", "Bucharest", EdgeCost::Distance).unwrap();

        let ucs = uniform_cost_search(&problem).unwrap().unwrap();
        let astar = astar_search(&problem, map.heuristic()).unwrap().unwrap();
        assert_eq!(astar.cost(), ucs.cost());
        assert!(astar.stats().expanded < ucs.stats().expanded);
    }

    #[test]
    fn astar_matches_ucs() {
        let map = RoadMap::romania();
        for (from, to) in [
            ("Timisoara", "Neamt"),
            ("Oradea", "Eforie"),
            ("Giurgiu", "Zerind"),
            ("Drobeta", "Vaslui"),
        ] {
            let problem = RoadMapProblem::between(&map, from, to, EdgeCost::Distance).unwrap();
            let ucs = uniform_cost_search(&problem).unwrap().unwrap();
            let astar = astar_search(&problem, map.heuristic()).unwrap().unwrap();
            assert_eq!(astar.cost(), ucs.cost(), "{from} -> {to}");
        }
    }

    #[test]
    fn zero_heuristic_is_ucs() {
        let map = RoadMap::romania();
        let problem =
            RoadMapProblem::between(&map, "Mehadia", "Iasi", EdgeCost::Distance).unwrap();

        let ucs = uniform_cost_search(&problem).unwrap().unwrap();
        let astar = astar_search(&problem, ZeroHeuristic).unwrap().unwrap();
        assert_eq!(astar.states(), ucs.states());
        assert_eq!(astar.stats(), ucs.stats());
    }

    #[test]
    fn memoized_heuristic() {
        let map = RoadMap::romania();
        let problem =
            RoadMapProblem::between(&map, "Arad", "Bucharest", EdgeCost::Distance).unwrap();

        let mut calls = 0usize;
        let mut euclidean = map.heuristic();
        let counting = FnHeuristic(|s: &CityId, goal: &CityId| -> u32 {
            calls += 1;
            Heuristic::<CityId, u32>::h(&mut euclidean, s, goal)
        });
        let solution = astar_search(&problem, MemoizedHeuristic::new(counting))
            .unwrap()
            .unwrap();
        assert_eq!(solution.cost(), 418);
        // One call per distinct city reached.
        assert!(calls <= map.len());
    }

    #[test]
    fn astar_edge_cases() {
        let map = RoadMap::try_from(indoc::indoc! {"
            A (0, 0): B 1, C 1
            B (1, 0): C 1
            C (0, 1)
            D (5, 5): E 1
            E (5, 6)
        "})
        .unwrap();

        let problem = RoadMapProblem::between(&map, "A", "E", EdgeCost::Distance).unwrap();
        assert!(astar_search(&problem, map.heuristic()).unwrap().is_none());

        let problem = RoadMapProblem::between(&map, "B", "B", EdgeCost::Distance).unwrap();
        let solution = astar_search(&problem, map.heuristic()).unwrap().unwrap();
        assert_eq!(map.names(&solution.states()), vec!["B"]);
        assert_eq!(solution.cost(), 0);
        assert_eq!(solution.stats().expanded, 0);
    }

    /// Reaching a city, known only through `goal_test`.
    #[derive(Debug)]
    struct Reaching<'m> {
        roads: RoadMapProblem<'m>,
        target: CityId,
    }

    impl Problem<CityId, CityId, u32> for Reaching<'_> {
        fn initial(&self) -> CityId {
            self.roads.initial()
        }
        fn goal(&self) -> Option<CityId> {
            None
        }
        fn actions(&self, s: &CityId) -> Vec<CityId> {
            self.roads.actions(s)
        }
        fn result(&self, s: &CityId, a: &CityId) -> Option<CityId> {
            self.roads.result(s, a)
        }
        fn goal_test(&self, s: &CityId) -> bool {
            *s == self.target
        }
        fn path_cost(&self, c: u32, from: &CityId, a: &CityId, to: &CityId) -> u32 {
            self.roads.path_cost(c, from, a, to)
        }
    }

    #[test]
    fn goal_by_predicate() {
        let map = RoadMap::romania();
        let problem = Reaching {
            roads: RoadMapProblem::between(&map, "Arad", "Bucharest", EdgeCost::Distance).unwrap(),
            target: map.city("Bucharest").unwrap(),
        };

        let ucs = uniform_cost_search(&problem).unwrap().unwrap();
        assert_eq!(ucs.cost(), 418);

        // Without a goal state the heuristic is never consulted.
        let mut calls = 0;
        let heuristic = FnHeuristic(|_: &CityId, _: &CityId| {
            calls += 1;
            u32::MAX
        });
        let astar = astar_search(&problem, heuristic).unwrap().unwrap();
        assert_eq!(astar.cost(), 418);
        assert_eq!(astar.states(), ucs.states());
        assert_eq!(calls, 0);
    }

    #[test]
    fn astar_idempotent() {
        let map = RoadMap::romania();
        let problem =
            RoadMapProblem::between(&map, "Timisoara", "Vaslui", EdgeCost::Distance).unwrap();

        let first = astar_search(&problem, map.heuristic()).unwrap().unwrap();
        let second = astar_search(&problem, map.heuristic()).unwrap().unwrap();
        assert_eq!(first.states(), second.states());
        assert_eq!(first.cost(), second.cost());
    }

    #[test]
    fn astar_mazes() {
        let problem = Maze2DProblem::try_from(indoc::indoc! {"
            ##########
            #S   #   #
            # ## # # #
            #  #   # #
            ## ##### #
            #       G#
            ##########
        "})
        .unwrap();

        let ucs = uniform_cost_search(&problem).unwrap().unwrap();
        let manhattan = astar_search(&problem, ManhattanHeuristic).unwrap().unwrap();
        let diagonal = astar_search(&problem, DiagonalHeuristic).unwrap().unwrap();

        assert_eq!(diagonal.cost(), ucs.cost());
        assert!(diagonal.to_path().is_valid_for(&problem));
        // Diagonal moves make Manhattan distance overestimate, so it may
        // settle for a worse path.
        assert!(manhattan.cost() >= ucs.cost());
        assert!(manhattan.to_path().is_valid_for(&problem));
    }

    #[test]
    fn astar_random_mazes() {
        use rand::SeedableRng;

        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0x5EA2C4);
        let mut problem = Maze2DProblem::try_from(indoc::indoc! {"
            ############
            #S   #     #
            # ## # ### #
            #  #   #   #
            ## ##### # #
            #        #G#
            ############
        "})
        .unwrap();

        for _ in 0..20 {
            problem.randomize(&mut rng);
            let ucs = uniform_cost_search(&problem).unwrap();
            let astar = astar_search(&problem, DiagonalHeuristic).unwrap();
            assert_eq!(
                ucs.as_ref().map(|s| s.cost()),
                astar.as_ref().map(|s| s.cost()),
                "{problem}"
            );
        }
    }
}
