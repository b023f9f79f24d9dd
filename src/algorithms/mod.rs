//! Implementation of search algorithms.
//!
//! These algorithms do path-finding on generic search problems. All of them
//! share `GraphSearch`'s loop and differ only on the frontier they use, and
//! for A*, the heuristic that ranks it.

pub mod astar;
pub mod graph_search;
pub mod uniform_cost;
pub mod uninformed;

pub use astar::astar_search;
pub use astar::AStarSearch;
pub use graph_search::GraphSearch;
pub use graph_search::SearchResult;
pub use graph_search::SearchStats;
pub use graph_search::Solution;
pub use uniform_cost::uniform_cost_search;
pub use uniform_cost::UniformCostSearch;
pub use uninformed::breadth_first_search;
pub use uninformed::depth_first_search;
pub use uninformed::BreadthFirstSearch;
pub use uninformed::DepthFirstSearch;
