//! CFOP Cross and F2L Search Library
//!
//! Finds short move sequences for the first two CFOP stages of a 3x3x3 cube:
//! the four-edge cross on the down face and the four corner-edge pairs.
//! Each stage is an A* search over only the cubies it cares about, guided by
//! a Manhattan-distance heuristic and pruned of redundant move sequences.

pub mod cube;
pub mod facelets;
pub mod goal;
pub mod heuristic;
pub mod moves;
mod open_set;
pub mod prune;
pub mod search;
pub mod solver;
pub mod state;

pub use cube::{Color, Coord, Cube, Stickers};
pub use goal::{extract, Centers, PairSlot, Stage, Subgoal};
pub use heuristic::{Heuristic, PlacementHeuristic};
pub use moves::{format_moves, parse_moves, Face, Move, Rotation, Turn};
pub use prune::MovePruner;
pub use search::{solve, ConfigError, Search, SearchError, SearchOptions, SearchStats, Solution};
pub use solver::{progress, Progress, SolveError, SolveReport, Solver, SolverConfig, StageReport};
pub use state::{CubieKey, SubState};
