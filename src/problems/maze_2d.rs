//! 8-connected grid mazes.
//!
//! ```text
//! #######
//! #S  #G#
//! # #   #
//! #######
//! ```
//!
//! `#` are walls, ` ` and `.` are free cells, `S` and `G` are the free cells
//! where the route starts and ends. Moving diagonally costs `141`, moving
//! orthogonally `100`. Diagonal moves may cut wall corners.

use derive_more::Display;
use nonmax::NonMaxU32;
use thiserror::Error;

use crate::heuristic::Heuristic;
use crate::problem::Problem;
use crate::space::Action;
use crate::space::State;

const MAX_ELEMENTS_DISPLAYED: usize = 20;
const RANDOM_STATE_MAX_TRIES: usize = 10_000;

pub(crate) type CoordIntrinsic = u32;
pub type Coord = NonMaxU32;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
#[display("({x},{y})")]
pub struct Maze2DState {
    pub(crate) x: Coord,
    pub(crate) y: Coord,
}

impl Maze2DState {
    pub fn new(x: CoordIntrinsic, y: CoordIntrinsic) -> Option<Maze2DState> {
        Some(Maze2DState {
            x: Coord::new(x)?,
            y: Coord::new(y)?,
        })
    }
    pub fn new_from_usize(x: usize, y: usize) -> Option<Maze2DState> {
        let x = CoordIntrinsic::try_from(x).ok()?;
        let y = CoordIntrinsic::try_from(y).ok()?;
        Self::new(x, y)
    }

    pub fn x(&self) -> CoordIntrinsic {
        self.x.get()
    }
    pub fn y(&self) -> CoordIntrinsic {
        self.y.get()
    }
}
impl State for Maze2DState {}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, PartialOrd)]
pub enum Maze2DAction {
    #[display("↑")]
    Up = 0, // y++
    #[display("↓")]
    Down = 1, // y--
    #[display("←")]
    Left = 2, // x--
    #[display("→")]
    Right = 3, // x++
    #[display("↖")]
    LeftUp = 4, // x--, y++
    #[display("↗")]
    RightUp = 5, // x++, y++
    #[display("↙")]
    LeftDown = 6, // x--, y--
    #[display("↘")]
    RightDown = 7, // x++, y--
}
impl Action for Maze2DAction {}

impl Maze2DAction {
    /// Every move, in the order `Maze2DSpace::neighbours` tries them.
    pub const ALL: [Maze2DAction; 8] = [
        Maze2DAction::LeftDown,
        Maze2DAction::Left,
        Maze2DAction::LeftUp,
        Maze2DAction::Down,
        Maze2DAction::Up,
        Maze2DAction::RightDown,
        Maze2DAction::Right,
        Maze2DAction::RightUp,
    ];

    #[rustfmt::skip]
    fn delta(&self) -> (i32, i32) {
        match self {
            Maze2DAction::Up        => ( 0,  1),
            Maze2DAction::Down      => ( 0, -1),
            Maze2DAction::Left      => (-1,  0),
            Maze2DAction::Right     => ( 1,  0),
            Maze2DAction::LeftUp    => (-1,  1),
            Maze2DAction::RightUp   => ( 1,  1),
            Maze2DAction::LeftDown  => (-1, -1),
            Maze2DAction::RightDown => ( 1, -1),
        }
    }

    pub fn is_diagonal(&self) -> bool {
        *self > Maze2DAction::Right
    }
}

pub type Maze2DCost = CoordIntrinsic;

const ORTHOGONAL_COST: Maze2DCost = 100u32;
const DIAGONAL_COST: Maze2DCost = 141u32; // 1.414213562373095

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Maze2DCell {
    #[display("░")]
    Empty,
    #[display("█")]
    Wall,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Maze2DCellParseError {
    #[error("Invalid character '{0}' found.")]
    InvalidCharacter(char),
}

impl std::convert::TryFrom<char> for Maze2DCell {
    type Error = Maze2DCellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            ' ' | '.' => Ok(Maze2DCell::Empty),
            '#' | '█' => Ok(Maze2DCell::Wall),
            ch => Err(Maze2DCellParseError::InvalidCharacter(ch)),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Maze2DSpace {
    pub(crate) map: Vec<Vec<Maze2DCell>>,
}

impl Maze2DSpace {
    /// Rows shorter than the longest one are padded with walls.
    pub fn new_from_map(mut map: Vec<Vec<Maze2DCell>>) -> Self {
        let width = map.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut map {
            row.resize(width, Maze2DCell::Wall);
        }
        Self { map }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        match self.map.first() {
            Some(row) => (row.len(), self.map.len()),
            None => (0, 0),
        }
    }

    /// The cell at `state`, `None` when out of bounds.
    #[inline(always)]
    pub fn at(&self, state: &Maze2DState) -> Option<Maze2DCell> {
        self.map
            .get(state.y.get() as usize)?
            .get(state.x.get() as usize)
            .copied()
    }

    #[inline(always)]
    pub fn is_free(&self, state: &Maze2DState) -> bool {
        self.at(state) == Some(Maze2DCell::Empty)
    }

    /// Picks a free cell at random, giving up after a while on crowded mazes.
    pub fn random_state<R: rand::Rng>(&self, r: &mut R) -> Option<Maze2DState> {
        let (max_x, max_y) = self.dimensions();
        if max_x == 0 || max_y == 0 {
            return None;
        }

        for _tries in 0..RANDOM_STATE_MAX_TRIES {
            let x = r.random_range(0..max_x);
            let y = r.random_range(0..max_y);
            if self.map[y][x] == Maze2DCell::Empty {
                return Maze2DState::new_from_usize(x, y);
            }
        }

        None
    }

    /// Takes a step, `None` when it leaves the maze or hits a wall.
    #[inline(always)]
    pub fn apply(&self, state: &Maze2DState, action: &Maze2DAction) -> Option<Maze2DState> {
        let (dx, dy) = action.delta();
        let s = Maze2DState::new(
            state.x.get().checked_add_signed(dx)?,
            state.y.get().checked_add_signed(dy)?,
        )?;
        self.is_free(&s).then_some(s)
    }

    #[inline(always)]
    pub fn cost(&self, a: &Maze2DAction) -> Maze2DCost {
        if a.is_diagonal() {
            DIAGONAL_COST
        } else {
            ORTHOGONAL_COST
        }
    }

    /// Gets the free neighbours of a given position.
    pub fn neighbours(&self, state: &Maze2DState) -> Vec<(Maze2DState, Maze2DAction)> {
        Maze2DAction::ALL
            .iter()
            .filter_map(|a| Some((self.apply(state, a)?, *a)))
            .collect()
    }
}

impl std::fmt::Debug for Maze2DSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Maze2D{:?}", self.dimensions())
    }
}

/// Getting from the start cell to the goal cell of a maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze2DProblem {
    space: Maze2DSpace,
    start: Maze2DState,
    goal: Option<Maze2DState>,
}

impl Maze2DProblem {
    pub fn space(&self) -> &Maze2DSpace {
        &self.space
    }

    /// Moves the start and the goal to random free cells.
    ///
    /// Returns `false`, leaving the problem untouched, when no free cells
    /// were found.
    pub fn randomize<R: rand::Rng>(&mut self, r: &mut R) -> bool {
        let Some(start) = self.space.random_state(r) else {
            return false;
        };
        let Some(goal) = self.space.random_state(r) else {
            return false;
        };
        log::trace!("Randomized maze route: {start} -> {goal}");
        self.start = start;
        self.goal = Some(goal);
        true
    }
}

impl Problem<Maze2DState, Maze2DAction, Maze2DCost> for Maze2DProblem {
    fn initial(&self) -> Maze2DState {
        self.start
    }
    fn goal(&self) -> Option<Maze2DState> {
        self.goal
    }

    fn actions(&self, s: &Maze2DState) -> Vec<Maze2DAction> {
        self.space
            .neighbours(s)
            .into_iter()
            .map(|(_, a)| a)
            .collect()
    }
    fn result(&self, s: &Maze2DState, a: &Maze2DAction) -> Option<Maze2DState> {
        self.space.apply(s, a)
    }

    fn path_cost(
        &self,
        c: Maze2DCost,
        _from: &Maze2DState,
        a: &Maze2DAction,
        _to: &Maze2DState,
    ) -> Maze2DCost {
        c.saturating_add(self.space.cost(a))
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq)]
pub enum Maze2DProblemCell {
    Cell(Maze2DCell),
    #[display("S")]
    Start,
    #[display("G")]
    Goal,
}

impl std::convert::TryFrom<char> for Maze2DProblemCell {
    type Error = Maze2DCellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            'S' => Ok(Maze2DProblemCell::Start),
            'G' => Ok(Maze2DProblemCell::Goal),
            ch => Ok(Maze2DProblemCell::Cell(Maze2DCell::try_from(ch)?)),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Maze2DProblemParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Maze too large ({x}x{y})")]
    TooLarge { x: usize, y: usize },
    #[error("Invalid cell {e} found at ({x},{y})")]
    InvalidCell {
        e: Maze2DCellParseError,
        x: usize,
        y: usize,
    },
    #[error("No start cell")]
    MissingStart,
    #[error("Second start cell found at ({x},{y})")]
    MultipleStarts { x: usize, y: usize },
    #[error("Second goal cell found at ({x},{y})")]
    MultipleGoals { x: usize, y: usize },
}

/// Parses a maze, one row per line.
///
/// Rows shorter than the longest one are padded with walls. A maze without
/// a goal cell is valid, it just can't be solved.
impl std::convert::TryFrom<&str> for Maze2DProblem {
    type Error = Maze2DProblemParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let lines: Vec<&str> = s.lines().collect();

        let max_x = lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let max_y = lines.len();
        if max_x == 0 {
            return Err(Maze2DProblemParseError::EmptyInput);
        }
        if Maze2DState::new_from_usize(max_x, max_y).is_none() {
            return Err(Maze2DProblemParseError::TooLarge { x: max_x, y: max_y });
        }

        let mut map = vec![vec![Maze2DCell::Wall; max_x]; max_y];
        let mut start = None;
        let mut goal = None;

        for (y, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let cell = Maze2DProblemCell::try_from(ch)
                    .map_err(|e| Maze2DProblemParseError::InvalidCell { e, x, y })?;
                let Some(here) = Maze2DState::new_from_usize(x, y) else {
                    return Err(Maze2DProblemParseError::TooLarge { x: max_x, y: max_y });
                };

                map[y][x] = match cell {
                    Maze2DProblemCell::Start => {
                        if start.replace(here).is_some() {
                            return Err(Maze2DProblemParseError::MultipleStarts { x, y });
                        }
                        Maze2DCell::Empty
                    }
                    Maze2DProblemCell::Goal => {
                        if goal.replace(here).is_some() {
                            return Err(Maze2DProblemParseError::MultipleGoals { x, y });
                        }
                        Maze2DCell::Empty
                    }
                    Maze2DProblemCell::Cell(c) => c,
                }
            }
        }

        Ok(Maze2DProblem {
            space: Maze2DSpace::new_from_map(map),
            start: start.ok_or(Maze2DProblemParseError::MissingStart)?,
            goal,
        })
    }
}

impl std::fmt::Display for Maze2DProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let d = self.space.dimensions();

        match self.goal {
            Some(goal) => writeln!(
                f,
                "Maze2DProblem({}x{}) (s:{}, g:{}):",
                d.0, d.1, self.start, goal
            )?,
            None => writeln!(
                f,
                "Maze2DProblem({}x{}) (s:{}, no goal):",
                d.0, d.1, self.start
            )?,
        }
        let map = &self.space.map;
        for (y, line) in map.iter().enumerate().take(MAX_ELEMENTS_DISPLAYED) {
            for (x, cell) in line.iter().enumerate().take(MAX_ELEMENTS_DISPLAYED) {
                let s = Maze2DState::new_from_usize(x, y);

                let is_start = s == Some(self.start);
                let is_goal = s.is_some() && s == self.goal;

                match (is_start, is_goal) {
                    (true, true) => write!(f, "!")?,
                    (true, false) => write!(f, "S")?,
                    (false, true) => write!(f, "G")?,
                    (false, false) => write!(f, "{cell}")?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[inline(always)]
fn deltas(a: &Maze2DState, b: &Maze2DState) -> (Maze2DCost, Maze2DCost) {
    (a.x.get().abs_diff(b.x.get()), a.y.get().abs_diff(b.y.get()))
}

/// The distance of following straight lines.
///
/// Overestimates when diagonal moves are shorter, so A* may return worse
/// routes with it.
#[derive(Copy, Clone, Debug, Default)]
pub struct ManhattanHeuristic;

impl Heuristic<Maze2DState, Maze2DCost> for ManhattanHeuristic {
    #[inline(always)]
    fn h(&mut self, a: &Maze2DState, b: &Maze2DState) -> Maze2DCost {
        let (delta_x, delta_y) = deltas(a, b);
        (delta_x + delta_y).saturating_mul(ORTHOGONAL_COST)
    }
}

/// The distance of maximising useful diagonals.
///
/// Exact on a maze without walls, so it's consistent.
#[derive(Copy, Clone, Debug, Default)]
pub struct DiagonalHeuristic;

impl Heuristic<Maze2DState, Maze2DCost> for DiagonalHeuristic {
    #[inline(always)]
    fn h(&mut self, a: &Maze2DState, b: &Maze2DState) -> Maze2DCost {
        let (delta_x, delta_y) = deltas(a, b);
        let delta_min = delta_x.min(delta_y);
        let delta_max = delta_x.max(delta_y);

        let diagonal_cost = delta_min.saturating_mul(DIAGONAL_COST);
        let orthogonal_cost = (delta_max - delta_min).saturating_mul(ORTHOGONAL_COST);
        orthogonal_cost.saturating_add(diagonal_cost)
    }
}
