use std::path::PathBuf;
use std::time::Instant;

use anstream::println;
use clap::Parser;
use derive_more::Display;
use owo_colors::OwoColorize;

use classic_search::algorithms::AStarSearch;
use classic_search::algorithms::BreadthFirstSearch;
use classic_search::algorithms::DepthFirstSearch;
use classic_search::algorithms::SearchResult;
use classic_search::algorithms::UniformCostSearch;
use classic_search::config::DuplicatePolicy;
use classic_search::config::SearchConfig;
use classic_search::problems::road_map::CityId;
use classic_search::problems::road_map::EdgeCost;
use classic_search::problems::road_map::RoadCost;
use classic_search::problems::road_map::RoadMap;
use classic_search::problems::road_map::RoadMapProblem;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, clap::ValueEnum)]
pub enum Algorithm {
    /// Breadth-first search
    #[display("bfs")]
    Bfs,
    /// Depth-first search
    #[display("dfs")]
    Dfs,
    /// Uniform-cost search
    #[display("ucs")]
    Ucs,
    /// A* with straight-line distances
    #[display("astar")]
    Astar,
}

/// Finds routes between cities on a road map
#[derive(Parser, Debug)]
#[clap(long_version = classic_search::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Road map to load, the map of Romania when missing
    #[arg(short, long, env = "ROUTE_MAP")]
    pub map: Option<PathBuf>,

    #[arg(long, default_value = "Arad")]
    pub from: String,
    #[arg(long, default_value = "Bucharest")]
    pub to: String,

    #[arg(
        short,
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::Ucs, Algorithm::Astar],
    )]
    pub algorithms: Vec<Algorithm>,

    /// Charge every road the same instead of its length
    #[arg(long)]
    pub uniform: bool,

    /// How uniform-cost search and A* handle states already in the frontier
    #[arg(long, value_enum, default_value_t = DuplicatePolicy::ByStateAndCost)]
    pub duplicates: DuplicatePolicy,

    /// Give up after expanding this many nodes
    #[arg(long, env = "ROUTE_MAX_EXPANSIONS")]
    pub max_expansions: Option<usize>,

    /// Print search statistics for every route found
    #[arg(long)]
    pub stats: bool,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

fn run(
    algorithm: Algorithm,
    problem: &RoadMapProblem,
    config: SearchConfig,
) -> SearchResult<CityId, CityId, RoadCost> {
    match algorithm {
        Algorithm::Bfs => BreadthFirstSearch::breadth_first(problem, config).find_first(),
        Algorithm::Dfs => DepthFirstSearch::depth_first(problem, config).find_first(),
        Algorithm::Ucs => UniformCostSearch::uniform_cost(problem, config).find_first(),
        Algorithm::Astar => {
            AStarSearch::astar(problem, problem.map().heuristic(), config).find_first()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    args.color.write_global();

    let map = match &args.map {
        Some(p) => RoadMap::from_file(p)?,
        None => RoadMap::romania(),
    };
    log::info!("Loaded {map:?}");

    let edge_cost = if args.uniform {
        EdgeCost::Uniform
    } else {
        EdgeCost::Distance
    };
    let problem = RoadMapProblem::between(&map, &args.from, &args.to, edge_cost)?;
    let mut config = SearchConfig::default().with_duplicates(args.duplicates);
    if let Some(limit) = args.max_expansions {
        config = config.with_max_expansions(limit);
    }

    println!(
        "Routes from {} to {} ({} cost)",
        args.from.green(),
        args.to.green(),
        edge_cost
    );
    for algorithm in &args.algorithms {
        let label = format!("{algorithm:>5}");

        let start = Instant::now();
        let result = run(*algorithm, &problem, config);
        let elapsed = start.elapsed();

        match result {
            Ok(Some(solution)) => {
                println!(
                    "{}: {} (cost {}, {:?})",
                    label.bold(),
                    map.names(&solution.states()).join(" -> "),
                    solution.cost().yellow(),
                    elapsed.dimmed(),
                );
                if args.stats {
                    solution.write_stats(anstream::stdout())?;
                }
            }
            Ok(None) => println!("{}: {}", label.bold(), "No route".red()),
            Err(e) => println!("{}: {}", label.bold(), e.red()),
        }
    }

    Ok(())
}
