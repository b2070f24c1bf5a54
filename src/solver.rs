//! Stage orchestration: cross, then F2L pairs one at a time.
//!
//! Every stage is its own search over a small sub-state. The moves it finds
//! are applied to the full cube before the next stage is extracted, and
//! pairs solved earlier stay tracked so later searches keep them intact.

use std::fmt;
use std::time::{Duration, Instant};

use log::info;
use thiserror::Error;

use crate::cube::{Color, Cube, CubieKind, FACE_CENTERS};
use crate::goal::{self, default_pair_order, Centers, GoalError, PairSlot, Stage};
use crate::moves::{format_moves, Axis, Move, Rotation, Turn};
use crate::search::{self, SearchError, SearchOptions, SearchStats};
use crate::state::CubieKey;

/// Search options per stage kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    pub cross: SearchOptions,
    pub pairs: SearchOptions,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            cross: SearchOptions::default(),
            pairs: SearchOptions::for_pairs(),
        }
    }
}

impl SolverConfig {
    #[must_use]
    pub fn with_cross(mut self, cross: SearchOptions) -> Self {
        self.cross = cross;
        self
    }

    #[must_use]
    pub fn with_pairs(mut self, pairs: SearchOptions) -> Self {
        self.pairs = pairs;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    pub moves: Vec<Move>,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

impl fmt::Display for StageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let moves = if self.moves.is_empty() {
            "(solved)".to_owned()
        } else {
            format_moves(&self.moves)
        };
        write!(
            f,
            "{:<8} {moves} [{} moves, {} expanded, {:.2?}]",
            self.stage.to_string(),
            self.moves.len(),
            self.stats.expanded,
            self.elapsed
        )
    }
}

/// Reports of a cross and F2L solve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveReport {
    pub cross: StageReport,
    pub pairs: Vec<StageReport>,
}

impl SolveReport {
    pub fn stages(&self) -> impl Iterator<Item = &StageReport> {
        std::iter::once(&self.cross).chain(&self.pairs)
    }

    /// All stage moves in order.
    pub fn moves(&self) -> Vec<Move> {
        self.stages()
            .flat_map(|report| report.moves.iter().copied())
            .collect()
    }
}

/// Cross solved with one center rotated to the bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceReport {
    pub down: Color,
    pub rotations: Vec<Rotation>,
    pub cross: StageReport,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error(transparent)]
    Goal(#[from] GoalError),
    #[error("Search for the {stage} failed: {source}")]
    Search {
        stage: Stage,
        #[source]
        source: SearchError,
    },
}

/// How far a cube is through cross and F2L, named by the step still to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Progress {
    Cross,
    F2l,
    Oll,
    Pll,
    Solved,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Progress::Cross => "cross",
            Progress::F2l => "F2L",
            Progress::Oll => "OLL",
            Progress::Pll => "PLL",
            Progress::Solved => "solved",
        };
        write!(f, "{name}")
    }
}

/// Classifies `cube` relative to its own centers.
///
/// The cross and F2L count as done when their cubies sit at their solved
/// placements. OLL is done when every up-layer cubie shows the up color on
/// top, and PLL when the up layer is placed as well.
pub fn progress(cube: &Cube) -> Result<Progress, GoalError> {
    let centers = Centers::from_cube(cube)?;
    let up = centers.up();

    let mut cross = true;
    let mut f2l = true;
    let mut oriented = true;
    let mut permuted = true;

    for (coord, stickers) in cube.cubies() {
        if CubieKind::of(coord) == Some(CubieKind::Center) {
            continue;
        }
        let key = CubieKey::from_stickers(&stickers);
        let target = centers.solved_placement(key).coord;
        let placed = centers.is_placed(cube, key);
        match (target.1, CubieKind::of(target)) {
            (-1, Some(CubieKind::Edge)) => cross &= placed,
            (1, _) => permuted &= placed,
            _ => f2l &= placed,
        }
        if coord.1 == 1 {
            oriented &= stickers[1] == Some(up);
        }
    }

    Ok(match (cross, f2l, oriented, permuted) {
        (false, ..) => Progress::Cross,
        (true, false, ..) => Progress::F2l,
        (true, true, false, _) => Progress::Oll,
        (true, true, true, false) => Progress::Pll,
        (true, true, true, true) => Progress::Solved,
    })
}

const X: Rotation = Rotation::new(Axis::X, Turn::Clockwise);
const X_PRIME: Rotation = Rotation::new(Axis::X, Turn::CounterClockwise);
const X2: Rotation = Rotation::new(Axis::X, Turn::Half);
const Z: Rotation = Rotation::new(Axis::Z, Turn::Clockwise);
const Z_PRIME: Rotation = Rotation::new(Axis::Z, Turn::CounterClockwise);

/// Rotations that bring the center at each of [`FACE_CENTERS`] to the bottom.
const TO_BOTTOM: [&[Rotation]; 6] = [
    &[X2],
    &[Z_PRIME],
    &[X_PRIME],
    &[Z],
    &[X],
    &[],
];

/// Runs the stage searches and applies their moves.
#[derive(Clone, Debug, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn run_stage(
        &self,
        cube: &mut Cube,
        stage: Stage,
        solved_pairs: &[PairSlot],
        options: SearchOptions,
    ) -> Result<StageReport, SolveError> {
        let start = Instant::now();
        let subgoal = goal::extract(cube, stage, solved_pairs)?;
        let solution = search::solve(&subgoal, options)
            .map_err(|source| SolveError::Search { stage, source })?;
        cube.apply_all(&solution.moves);

        let report = StageReport {
            stage,
            moves: solution.moves,
            stats: solution.stats,
            elapsed: start.elapsed(),
        };
        info!(
            target: "solver",
            "Solved {stage}: moves=[{}] {} elapsed={:.2?}",
            format_moves(&report.moves),
            report.stats,
            report.elapsed
        );
        Ok(report)
    }

    /// Solves the cross on whichever face is down and applies it.
    pub fn solve_cross(&self, cube: &mut Cube) -> Result<StageReport, SolveError> {
        self.run_stage(cube, Stage::Cross, &[], self.config.cross)
    }

    /// Solves each pair of `order` in turn, keeping earlier pairs solved.
    ///
    /// Expects the cross to be solved already.
    pub fn solve_pairs(
        &self,
        cube: &mut Cube,
        order: &[PairSlot],
    ) -> Result<Vec<StageReport>, SolveError> {
        let mut solved = Vec::with_capacity(order.len());
        let mut reports = Vec::with_capacity(order.len());
        for &slot in order {
            reports.push(self.run_stage(cube, Stage::Pair(slot), &solved, self.config.pairs)?);
            solved.push(slot);
        }
        Ok(reports)
    }

    /// Cross then F2L. `order = None` uses [`default_pair_order`].
    pub fn solve(
        &self,
        cube: &mut Cube,
        order: Option<&[PairSlot]>,
    ) -> Result<SolveReport, SolveError> {
        let cross = self.solve_cross(cube)?;
        let pairs = match order {
            Some(order) => self.solve_pairs(cube, order)?,
            None => self.solve_pairs(cube, &default_pair_order(cube)?)?,
        };
        Ok(SolveReport { cross, pairs })
    }

    /// Solves the cross once for every center, each time on a copy of `cube`
    /// rotated so that center is down.
    ///
    /// Reports come in `U L F R B D` order of the centers' current positions.
    pub fn cross_per_face(&self, cube: &Cube) -> Result<Vec<FaceReport>, SolveError> {
        FACE_CENTERS
            .iter()
            .zip(TO_BOTTOM)
            .map(|(&coord, rotations)| {
                let mut rotated = cube.clone();
                for &rotation in rotations {
                    rotated.rotate(rotation);
                }
                let down = Centers::from_cube(&rotated)?.down();
                debug_assert_eq!(cube.center_color(coord), Some(down));

                let cross = self.solve_cross(&mut rotated)?;
                Ok(FaceReport {
                    down,
                    rotations: rotations.to_vec(),
                    cross,
                })
            })
            .collect()
    }
}
