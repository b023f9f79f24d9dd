//! Search problems to run the algorithms on.
//!
//! Both expose their states through `Problem`, so any algorithm can find
//! routes on them.

pub mod maze_2d;
pub mod road_map;
