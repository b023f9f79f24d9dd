//! Weighted, undirected road maps between cities.
//!
//! Maps are read from a line based text format:
//!
//! ```text
//! # Comments run until the end of the line
//! Arad (91, 492): Zerind 75, Sibiu 140, Timisoara 118
//! Zerind (108, 531)
//! ```
//!
//! Each line declares a city, optionally its location, and optionally the
//! roads leaving it. Roads mentioned on any line work both ways. Every
//! city's roads are listed in the order they were declared, followed by the
//! roads declared from the other end, in the order those lines appear.

use std::path::Path;
use std::path::PathBuf;

use derive_more::Display;
use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::heuristic::EuclideanHeuristic;
use crate::heuristic::Point;
use crate::problem::Problem;
use crate::space::Action;
use crate::space::State;

const MAX_ELEMENTS_DISPLAYED: usize = 20;

/// A city in a `RoadMap`.
///
/// Also used as the action of driving to it.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("#{_0}")]
pub struct CityId(u32);

impl State for CityId {}
impl Action for CityId {}

impl CityId {
    #[inline(always)]
    fn index(&self) -> usize {
        self.0 as usize
    }
}

pub type RoadCost = u32;

#[derive(Clone, Default)]
pub struct RoadMap {
    names: Vec<String>,
    locations: Vec<Option<Point>>,
    roads: Vec<Vec<(CityId, RoadCost)>>,
    index: FxHashMap<String, CityId>,
}

impl RoadMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The classic map of Romanian cities, with road distances and map
    /// coordinates.
    pub fn romania() -> Self {
        Self::try_from(ROMANIA).expect("The bundled Romania map is well formed")
    }

    pub fn from_file(p: &Path) -> Result<Self, RoadMapError> {
        let text = std::fs::read_to_string(p).map_err(|e| RoadMapError::IOError {
            p: p.to_path_buf(),
            e,
        })?;
        Self::try_from(text.as_str()).map_err(|e| RoadMapError::ParseError {
            p: p.to_path_buf(),
            e,
        })
    }

    /// Gets the city called `name`, adding it if it's new.
    ///
    /// A `location` replaces any location known for the city.
    pub fn add_city(&mut self, name: &str, location: Option<Point>) -> CityId {
        if let Some(&id) = self.index.get(name) {
            if location.is_some() {
                self.locations[id.index()] = location;
            }
            return id;
        }

        debug_assert!(self.names.len() < u32::MAX as usize);
        let id = CityId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.locations.push(location);
        self.roads.push(vec![]);
        self.index.insert(name.to_string(), id);
        id
    }

    /// Adds a one-way road, or updates its length if it already exists.
    ///
    /// New roads go after the ones `from` already has.
    pub fn connect(&mut self, from: CityId, to: CityId, distance: RoadCost) {
        let roads = &mut self.roads[from.index()];
        match roads.iter_mut().find(|(c, _)| *c == to) {
            Some((_, d)) => *d = distance,
            None => roads.push((to, distance)),
        }
    }

    /// Adds a road both ways.
    pub fn connect_both(&mut self, a: CityId, b: CityId, distance: RoadCost) {
        self.connect(a, b, distance);
        self.connect(b, a, distance);
    }

    pub fn city(&self, name: &str) -> Option<CityId> {
        self.index.get(name).copied()
    }
    /// Like `RoadMap::city`, but failing with `RoadMapError::UnknownCity`.
    pub fn try_city(&self, name: &str) -> Result<CityId, RoadMapError> {
        self.city(name)
            .ok_or_else(|| RoadMapError::UnknownCity(name.to_string()))
    }

    pub fn cities(&self) -> impl Iterator<Item = CityId> + '_ {
        (0..self.names.len()).map(|i| CityId(i as u32))
    }

    /// # Panics
    /// When `id` belongs to another map.
    pub fn name(&self, id: CityId) -> &str {
        &self.names[id.index()]
    }
    pub fn names(&self, ids: &[CityId]) -> Vec<&str> {
        ids.iter().map(|id| self.name(*id)).collect()
    }

    pub fn location(&self, id: CityId) -> Option<Point> {
        self.locations[id.index()]
    }

    /// The roads leaving `id`, in enumeration order.
    pub fn neighbours(&self, id: CityId) -> &[(CityId, RoadCost)] {
        &self.roads[id.index()]
    }

    /// Length of the road from `from` to `to`, if there's one.
    pub fn distance(&self, from: CityId, to: CityId) -> Option<RoadCost> {
        self.neighbours(from)
            .iter()
            .find(|(c, _)| *c == to)
            .map(|(_, d)| *d)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of roads, each counted once for both directions.
    pub fn road_count(&self) -> usize {
        self.roads.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Straight-line distance between city locations.
    pub fn heuristic(&self) -> EuclideanHeuristic<CityId> {
        self.cities()
            .filter_map(|c| Some((c, self.location(c)?)))
            .collect()
    }
}

impl std::fmt::Debug for RoadMap {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "RoadMap({} cities, {} roads)",
            self.len(),
            self.road_count()
        )
    }
}

/// Writes the map back in its text format.
///
/// Every road is written from both ends, so parsing the output gives back
/// the same map with the same enumeration order.
impl std::fmt::Display for RoadMap {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for c in self.cities() {
            write!(f, "{}", self.name(c))?;
            if let Some(p) = self.location(c) {
                write!(f, " {p}")?;
            }
            let roads = self.neighbours(c);
            if !roads.is_empty() {
                let roads: Vec<String> = roads
                    .iter()
                    .map(|(to, d)| format!("{} {d}", self.name(*to)))
                    .collect();
                write!(f, ": {}", roads.join(", "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoadMapParseError {
    #[error("Line {line}: Missing city name")]
    MissingName { line: usize },
    #[error("Line {line}: Invalid location '{text}', expected '(x, y)'")]
    InvalidLocation { line: usize, text: String },
    #[error("Line {line}: Invalid road '{text}', expected '<city> <distance>'")]
    InvalidRoad { line: usize, text: String },
    #[error("Line {line}: City '{name}' was already declared")]
    DuplicateCity { line: usize, name: String },
}

#[derive(Debug, Error)]
pub enum RoadMapError {
    #[error("I/O error when loading '{p}': {e}")]
    IOError { p: PathBuf, e: std::io::Error },
    #[error("Failed to parse '{p}': {e}")]
    ParseError { p: PathBuf, e: RoadMapParseError },
    #[error("Unknown city '{0}'")]
    UnknownCity(String),
}

fn parse_location(text: &str, line: usize) -> Result<Point, RoadMapParseError> {
    let invalid = || RoadMapParseError::InvalidLocation {
        line,
        text: text.to_string(),
    };

    let coords = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .ok_or_else(invalid)?;
    let (x, y) = coords.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<f64>().map_err(|_| invalid())?;
    let y = y.trim().parse::<f64>().map_err(|_| invalid())?;
    Ok(Point::new(x, y))
}

fn parse_road(text: &str, line: usize) -> Result<(&str, RoadCost), RoadMapParseError> {
    let invalid = || RoadMapParseError::InvalidRoad {
        line,
        text: text.to_string(),
    };

    let (name, distance) = text.rsplit_once(char::is_whitespace).ok_or_else(invalid)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }
    let distance = distance.parse::<RoadCost>().map_err(|_| invalid())?;
    Ok((name, distance))
}

impl std::convert::TryFrom<&str> for RoadMap {
    type Error = RoadMapParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut map = RoadMap::new();
        let mut declared = FxHashSet::<CityId>::default();
        let mut roads = Vec::<(CityId, CityId, RoadCost)>::new();

        for (i, line) in s.lines().enumerate() {
            let line_number = i + 1;
            let line = match line.split_once('#') {
                Some((content, _comment)) => content,
                None => line,
            }
            .trim();
            if line.is_empty() {
                continue;
            }

            let (head, tail) = match line.split_once(':') {
                Some((head, tail)) => (head.trim(), Some(tail)),
                None => (line, None),
            };
            let (name, location) = match head.find('(') {
                Some(i) => (
                    head[..i].trim(),
                    Some(parse_location(head[i..].trim(), line_number)?),
                ),
                None => (head, None),
            };
            if name.is_empty() {
                return Err(RoadMapParseError::MissingName { line: line_number });
            }

            let city = map.add_city(name, location);
            if !declared.insert(city) {
                return Err(RoadMapParseError::DuplicateCity {
                    line: line_number,
                    name: name.to_string(),
                });
            }

            for road in tail.iter().flat_map(|t| t.split(',')) {
                let road = road.trim();
                if road.is_empty() {
                    continue;
                }
                let (to, distance) = parse_road(road, line_number)?;
                let to = map.add_city(to, None);
                map.connect(city, to, distance);
                roads.push((city, to, distance));
            }
        }

        // Roads work both ways, the reverse ones go last.
        for (from, to, distance) in roads {
            map.connect(to, from, distance);
        }

        Ok(map)
    }
}

/// How a `RoadMapProblem` charges for driving down a road.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq)]
pub enum EdgeCost {
    /// The road's length.
    #[default]
    #[display("distance")]
    Distance,
    /// `1` per road, to count hops.
    #[display("uniform")]
    Uniform,
}

/// Finding a route between two cities.
#[derive(Clone, Debug)]
pub struct RoadMapProblem<'m> {
    map: &'m RoadMap,
    initial: CityId,
    goal: CityId,
    edge_cost: EdgeCost,
}

impl<'m> RoadMapProblem<'m> {
    pub fn new(map: &'m RoadMap, initial: CityId, goal: CityId, edge_cost: EdgeCost) -> Self {
        Self {
            map,
            initial,
            goal,
            edge_cost,
        }
    }

    /// Looks both cities up by name.
    pub fn between(
        map: &'m RoadMap,
        from: &str,
        to: &str,
        edge_cost: EdgeCost,
    ) -> Result<Self, RoadMapError> {
        Ok(Self::new(
            map,
            map.try_city(from)?,
            map.try_city(to)?,
            edge_cost,
        ))
    }

    pub fn map(&self) -> &'m RoadMap {
        self.map
    }
}

impl Problem<CityId, CityId, RoadCost> for RoadMapProblem<'_> {
    fn initial(&self) -> CityId {
        self.initial
    }
    fn goal(&self) -> Option<CityId> {
        Some(self.goal)
    }

    fn actions(&self, s: &CityId) -> Vec<CityId> {
        self.map.neighbours(*s).iter().map(|(c, _)| *c).collect()
    }
    fn result(&self, s: &CityId, a: &CityId) -> Option<CityId> {
        self.map.distance(*s, *a).map(|_| *a)
    }

    fn path_cost(&self, c: RoadCost, from: &CityId, a: &CityId, _to: &CityId) -> RoadCost {
        match self.edge_cost {
            EdgeCost::Uniform => c.saturating_add(1),
            EdgeCost::Distance => self
                .map
                .distance(*from, *a)
                .map_or(RoadCost::MAX, |d| c.saturating_add(d)),
        }
    }
}

impl std::fmt::Display for RoadMapProblem<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "RoadMapProblem({} -> {}, {} cost, {:?})",
            self.map.name(self.initial),
            self.map.name(self.goal),
            self.edge_cost,
            self.map
        )?;
        if self.map.len() <= MAX_ELEMENTS_DISPLAYED {
            write!(f, ":\n{}", self.map)?;
        }
        Ok(())
    }
}

const ROMANIA: &str = indoc::indoc! {"
    # Road distances in km, locations on a 600x600 map.
    Arad (91, 492): Zerind 75, Sibiu 140, Timisoara 118
    Bucharest (400, 327): Urziceni 85, Pitesti 101, Giurgiu 90, Fagaras 211
    Craiova (253, 288): Drobeta 120, Rimnicu 146, Pitesti 138
    Drobeta (165, 299): Mehadia 75
    Eforie (562, 293): Hirsova 86
    Fagaras (305, 449): Sibiu 99
    Hirsova (534, 350): Urziceni 98
    Iasi (473, 506): Vaslui 92, Neamt 87
    Lugoj (165, 379): Timisoara 111, Mehadia 70
    Oradea (131, 571): Zerind 71, Sibiu 151
    Pitesti (320, 368): Rimnicu 97
    Rimnicu (233, 410): Sibiu 80
    Urziceni (456, 350): Vaslui 142
    Giurgiu (375, 270)
    Mehadia (168, 339)
    Neamt (406, 537)
    Sibiu (207, 457)
    Timisoara (94, 410)
    Vaslui (509, 444)
    Zerind (108, 531)
"};
