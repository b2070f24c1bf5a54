//! Best-first A* search over sub-states.
//!
//! Nodes are ordered by `f = len_weight * g + h`, with `g` the number of
//! moves so far. A node counts as solved only when its fingerprint equals the
//! goal's; the heuristic merely steers. Fingerprints that were expanded once
//! go into CLOSED and are never expanded again. Duplicates already waiting in
//! OPEN are skipped when popped.

use std::fmt;

use log::{debug, log_enabled, trace, Level};
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::goal::Subgoal;
use crate::heuristic::{Heuristic, PlacementHeuristic};
use crate::moves::{format_moves, Move};
use crate::open_set::OpenSet;
use crate::prune::MovePruner;
use crate::state::{CubieKey, Fingerprint, SubState};

/// Tuning knobs of one search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    /// Nodes with this many moves are not expanded further.
    pub depth_cap: usize,
    /// Weight of the path length `g` in `f`.
    pub len_weight: u32,
    /// Heuristic cost of each flipped piece.
    pub flip_penalty_weight: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            depth_cap: 10,
            len_weight: 1,
            flip_penalty_weight: 2,
        }
    }
}

impl SearchOptions {
    /// Defaults with the deeper cap F2L pairs need.
    pub fn for_pairs() -> Self {
        Self::default().with_depth_cap(14)
    }

    #[must_use]
    pub fn with_depth_cap(mut self, depth_cap: usize) -> Self {
        self.depth_cap = depth_cap;
        self
    }

    #[must_use]
    pub fn with_len_weight(mut self, len_weight: u32) -> Self {
        self.len_weight = len_weight;
        self
    }

    #[must_use]
    pub fn with_flip_penalty_weight(mut self, flip_penalty_weight: u32) -> Self {
        self.flip_penalty_weight = flip_penalty_weight;
        self
    }
}

/// Counters of one search run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped and moved into CLOSED.
    pub expanded: usize,
    /// Children pushed onto OPEN.
    pub generated: usize,
    pub open_len: usize,
    pub closed_len: usize,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expanded={} generated={} open={} closed={}",
            self.expanded, self.generated, self.open_len, self.closed_len
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub moves: Vec<Move>,
    pub stats: SearchStats,
}

/// A search that cannot start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Move catalog is empty")]
    EmptyMoveCatalog,
    #[error("Move {0} appears twice in the catalog")]
    DuplicateMove(Move),
    #[error("Goal cubie {0} is missing from the initial state")]
    MissingCubie(CubieKey),
    #[error("Initial state tracks {initial} cubies but the goal tracks {goal}")]
    CubieCountMismatch { initial: usize, goal: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Invalid search configuration: {0}")]
    Configuration(#[from] ConfigError),
    #[error("No solution within the depth cap ({stats})")]
    NoSolutionFound {
        stats: SearchStats,
        /// Moves of the last node that was expanded.
        last_expanded: Vec<Move>,
    },
}

struct Node {
    state: SubState,
    fingerprint: Fingerprint,
    moves: Vec<Move>,
}

/// An A* search towards one goal sub-state.
pub struct Search<'a, H> {
    goal: &'a SubState,
    goal_fingerprint: Fingerprint,
    heuristic: H,
    options: SearchOptions,
    pruner: MovePruner,
}

impl<'a, H: Heuristic> Search<'a, H> {
    /// Only `depth_cap` and `len_weight` of `options` apply here. The flip
    /// penalty belongs to the heuristic, which [`solve`] builds from
    /// `flip_penalty_weight`.
    pub fn new(goal: &'a SubState, heuristic: H, options: SearchOptions) -> Self {
        Self {
            goal,
            goal_fingerprint: goal.fingerprint(),
            heuristic,
            options,
            pruner: MovePruner::default(),
        }
    }

    /// Replaces the default pruner over all 18 face moves.
    #[must_use]
    pub fn with_pruner(mut self, pruner: MovePruner) -> Self {
        self.pruner = pruner;
        self
    }

    fn validate(&self, initial: &SubState) -> Result<(), ConfigError> {
        if let Some(missing) = self.goal.keys().find(|&key| initial.get(key).is_none()) {
            return Err(ConfigError::MissingCubie(missing));
        }
        if initial.len() != self.goal.len() {
            return Err(ConfigError::CubieCountMismatch {
                initial: initial.len(),
                goal: self.goal.len(),
            });
        }
        Ok(())
    }

    #[inline]
    fn priority(&self, depth: usize, h: u32) -> u32 {
        let depth = u32::try_from(depth).unwrap_or(u32::MAX);
        self.options.len_weight.saturating_mul(depth).saturating_add(h)
    }

    /// Searches from `initial` until the goal fingerprint is popped or OPEN
    /// runs dry.
    ///
    /// Returned solutions never exceed `depth_cap` moves.
    pub fn run(&self, initial: &SubState) -> Result<Solution, SearchError> {
        self.validate(initial)?;

        let mut open = OpenSet::new();
        let mut closed: FxHashSet<Fingerprint> = FxHashSet::default();
        let mut stats = SearchStats::default();
        let mut last_expanded = Vec::new();

        let h = self.heuristic.estimate(initial);
        debug!(
            target: "search",
            "Starting: cubies={} h={h} depth_cap={} len_weight={}",
            initial.len(),
            self.options.depth_cap,
            self.options.len_weight
        );
        open.push(
            self.priority(0, h),
            h,
            Node {
                state: initial.clone(),
                fingerprint: initial.fingerprint(),
                moves: Vec::new(),
            },
        );

        while let Some(Node {
            state,
            fingerprint,
            moves,
        }) = open.pop()
        {
            if fingerprint == self.goal_fingerprint {
                stats.open_len = open.len();
                stats.closed_len = closed.len();
                debug!(target: "search", "Solved: moves={} {stats}", moves.len());
                return Ok(Solution { moves, stats });
            }

            if !closed.insert(fingerprint) {
                continue;
            }
            stats.expanded += 1;
            if log_enabled!(target: "search", Level::Trace) {
                trace!(
                    target: "search",
                    "Expanding: n={} g={} h={} moves=[{}]",
                    stats.expanded,
                    moves.len(),
                    self.heuristic.estimate(&state),
                    format_moves(&moves)
                );
            }

            if moves.len() < self.options.depth_cap {
                for &mv in self.pruner.next_moves(moves.last().copied()) {
                    let child = state.apply(mv);
                    let child_fingerprint = child.fingerprint();
                    if closed.contains(&child_fingerprint) {
                        continue;
                    }

                    let h = self.heuristic.estimate(&child);
                    let mut child_moves = Vec::with_capacity(moves.len() + 1);
                    child_moves.extend_from_slice(&moves);
                    child_moves.push(mv);

                    open.push(
                        self.priority(child_moves.len(), h),
                        h,
                        Node {
                            state: child,
                            fingerprint: child_fingerprint,
                            moves: child_moves,
                        },
                    );
                    stats.generated += 1;
                }
            }
            last_expanded = moves;
        }

        stats.open_len = open.len();
        stats.closed_len = closed.len();
        debug!(target: "search", "Exhausted: {stats}");
        Err(SearchError::NoSolutionFound {
            stats,
            last_expanded,
        })
    }
}

/// Solves `subgoal` with the placement heuristic and the default pruner.
pub fn solve(subgoal: &Subgoal, options: SearchOptions) -> Result<Solution, SearchError> {
    let heuristic = PlacementHeuristic::new(subgoal, options.flip_penalty_weight);
    Search::new(&subgoal.goal, heuristic, options).run(&subgoal.initial)
}
