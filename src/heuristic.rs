//! Distance estimates that guide the search.

use crate::cube::Coord;
use crate::goal::{FlipRule, Subgoal};
use crate::state::{Piece, SubState};

/// Estimates how far a sub-state is from its goal. Zero at the goal.
pub trait Heuristic {
    fn estimate(&self, state: &SubState) -> u32;
}

#[inline(always)]
fn manhattan((ax, ay, az): Coord, (bx, by, bz): Coord) -> u32 {
    ax.abs_diff(bx) + ay.abs_diff(by) + az.abs_diff(bz)
}

/// Sum of Manhattan distances to the nearest acceptable target layout, plus a
/// weighted count of flipped pieces.
///
/// The estimate is not admissible, so solutions are short but not guaranteed
/// optimal.
#[derive(Clone, Debug)]
pub struct PlacementHeuristic {
    goal: Vec<Piece>,
    alternatives: Vec<Vec<Coord>>,
    flip_rule: FlipRule,
    flip_weight: u32,
}

impl PlacementHeuristic {
    pub fn new(subgoal: &Subgoal, flip_weight: u32) -> Self {
        Self {
            goal: subgoal.goal.pieces().to_vec(),
            alternatives: subgoal.alternatives.clone(),
            flip_rule: subgoal.flip_rule,
            flip_weight,
        }
    }

    /// Minimum over the strict goal and every alternative of the summed
    /// piece distances.
    ///
    /// `state` must track the same cubies as the goal.
    pub fn distance(&self, state: &SubState) -> u32 {
        let pieces = state.pieces();
        let strict: u32 = pieces
            .iter()
            .zip(&self.goal)
            .map(|(piece, target)| manhattan(piece.coord, target.coord))
            .sum();

        self.alternatives
            .iter()
            .map(|targets| {
                pieces
                    .iter()
                    .zip(targets)
                    .map(|(piece, &target)| manhattan(piece.coord, target))
                    .sum()
            })
            .fold(strict, u32::min)
    }

    /// Number of pieces the flip rule counts as flipped.
    pub fn flips(&self, state: &SubState) -> u32 {
        let flipped = match self.flip_rule {
            FlipRule::DownSticker(down) => state
                .pieces()
                .iter()
                .filter(|piece| piece.coord.1 != 0 && piece.stickers[1] != Some(down))
                .count(),
            FlipRule::AtGoal => state
                .pieces()
                .iter()
                .zip(&self.goal)
                .filter(|(piece, target)| {
                    piece.coord == target.coord && piece.stickers != target.stickers
                })
                .count(),
        };
        flipped as u32
    }
}

impl Heuristic for PlacementHeuristic {
    fn estimate(&self, state: &SubState) -> u32 {
        self.flip_weight
            .saturating_mul(self.flips(state))
            .saturating_add(self.distance(state))
    }
}
