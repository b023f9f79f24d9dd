use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod debug;
pub mod heap_primitives;

// Search space and problems
// -------------------------
pub mod cost;
pub mod problem;
pub mod search;
pub mod space;

// Search machinery
// ----------------
pub mod config;
pub mod error;
pub mod frontier;
pub mod heuristic;

// Problems
// --------
pub mod problems;

// Algorithms
// ----------
pub mod algorithms;
