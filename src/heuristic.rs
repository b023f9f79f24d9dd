//! Estimates of the remaining cost to a goal.

use std::fmt::Debug;

use num_traits::FromPrimitive;
use rustc_hash::FxHashMap;

use crate::cost::Cost;
use crate::space::State;

/// Estimates the cost of reaching `goal` from `s`.
///
/// A* needs it non-negative, and admissible and consistent for its result to
/// be optimal. Neither is checked.
pub trait Heuristic<St, C>: Debug
where
    St: State,
    C: Cost,
{
    fn h(&mut self, s: &St, goal: &St) -> C;
}

/// The heuristic that knows nothing. Turns A* into uniform-cost search.
#[derive(Copy, Clone, Debug, Default)]
pub struct ZeroHeuristic;

impl<St: State, C: Cost> Heuristic<St, C> for ZeroHeuristic {
    #[inline(always)]
    fn h(&mut self, _s: &St, _goal: &St) -> C {
        C::zero()
    }
}

/// Lifts a plain function into a `Heuristic`.
#[derive(Clone)]
pub struct FnHeuristic<F>(pub F);

impl<F> Debug for FnHeuristic<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "FnHeuristic")
    }
}

impl<St, C, F> Heuristic<St, C> for FnHeuristic<F>
where
    St: State,
    C: Cost,
    F: FnMut(&St, &St) -> C,
{
    #[inline(always)]
    fn h(&mut self, s: &St, goal: &St) -> C {
        (self.0)(s, goal)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, derive_more::Display)]
#[display("({x}, {y})")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance.
    ///
    /// ```
    /// use classic_search::heuristic::Point;
    /// assert_eq!(Point::new(0.0, 0.0).distance(&Point::new(3.0, 4.0)), 5.0);
    /// ```
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Straight-line distance between the locations of two states.
///
/// The distance is rounded down into the cost type. With integer step costs
/// flooring keeps the heuristic admissible and consistent whenever the exact
/// distance is. States without a known location estimate `0`.
#[derive(Clone, Debug)]
pub struct EuclideanHeuristic<St: State> {
    locations: FxHashMap<St, Point>,
}

impl<St: State> EuclideanHeuristic<St> {
    pub fn new(locations: FxHashMap<St, Point>) -> Self {
        Self { locations }
    }

    pub fn location(&self, s: &St) -> Option<&Point> {
        self.locations.get(s)
    }
}

impl<St: State> FromIterator<(St, Point)> for EuclideanHeuristic<St> {
    fn from_iter<I: IntoIterator<Item = (St, Point)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<St, C> Heuristic<St, C> for EuclideanHeuristic<St>
where
    St: State,
    C: Cost + FromPrimitive,
{
    fn h(&mut self, s: &St, goal: &St) -> C {
        match (self.locations.get(s), self.locations.get(goal)) {
            (Some(a), Some(b)) => C::from_f64(a.distance(b).floor()).unwrap_or_else(C::zero),
            _ => {
                log::trace!("No location for {s:?} or {goal:?}, estimating 0");
                C::zero()
            }
        }
    }
}

/// Caches another heuristic by `(state, goal)`.
#[derive(Clone, Debug)]
pub struct MemoizedHeuristic<H, St, C>
where
    H: Heuristic<St, C>,
    St: State,
    C: Cost,
{
    inner: H,
    cache: FxHashMap<(St, St), C>,
    hits: usize,
}

impl<H, St, C> MemoizedHeuristic<H, St, C>
where
    H: Heuristic<St, C>,
    St: State,
    C: Cost,
{
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            cache: FxHashMap::default(),
            hits: 0,
        }
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits
    }
    /// Lookups that reached the wrapped heuristic.
    pub fn misses(&self) -> usize {
        self.cache.len()
    }
}

impl<H, St, C> Heuristic<St, C> for MemoizedHeuristic<H, St, C>
where
    H: Heuristic<St, C>,
    St: State,
    C: Cost,
{
    fn h(&mut self, s: &St, goal: &St) -> C {
        if let Some(h) = self.cache.get(&(*s, *goal)) {
            self.hits += 1;
            return *h;
        }
        let h = self.inner.h(s, goal);
        self.cache.insert((*s, *goal), h);
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    struct Spot(u8);
    impl State for Spot {}

    fn corners() -> EuclideanHeuristic<Spot> {
        [
            (Spot(0), Point::new(0.0, 0.0)),
            (Spot(1), Point::new(3.0, 4.0)),
            (Spot(2), Point::new(1.0, 1.0)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn zero() {
        let h: u32 = ZeroHeuristic.h(&Spot(0), &Spot(1));
        assert_eq!(h, 0);
    }

    #[test]
    fn euclidean_floors() {
        let mut e = corners();
        assert_eq!(Heuristic::<Spot, u32>::h(&mut e, &Spot(0), &Spot(1)), 5);
        // sqrt(2) ~ 1.41
        assert_eq!(Heuristic::<Spot, u32>::h(&mut e, &Spot(0), &Spot(2)), 1);
        assert_eq!(Heuristic::<Spot, u32>::h(&mut e, &Spot(1), &Spot(1)), 0);
        assert_eq!(e.location(&Spot(1)), Some(&Point::new(3.0, 4.0)));
    }

    #[test]
    fn euclidean_unknown_location() {
        let mut e = corners();
        assert_eq!(Heuristic::<Spot, u64>::h(&mut e, &Spot(9), &Spot(1)), 0);
        assert_eq!(Heuristic::<Spot, u64>::h(&mut e, &Spot(0), &Spot(9)), 0);
    }

    #[test]
    fn memoized() {
        let mut calls = 0;
        let mut m = MemoizedHeuristic::new(FnHeuristic(|a: &Spot, b: &Spot| {
            calls += 1;
            (a.0 as u32).abs_diff(b.0 as u32)
        }));
        assert_eq!(m.h(&Spot(1), &Spot(4)), 3);
        assert_eq!(m.h(&Spot(1), &Spot(4)), 3);
        assert_eq!(m.h(&Spot(4), &Spot(1)), 3);
        assert_eq!(m.hits(), 1);
        assert_eq!(m.misses(), 2);
        drop(m);
        assert_eq!(calls, 2);
    }
}
