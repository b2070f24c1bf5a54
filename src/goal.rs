//! Subgoal definitions: which cubies a stage tracks and where they belong.
//!
//! Targets are never hard-coded. They are derived from where the centers are
//! right now, so any color may be on the down face.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::cube::{Color, Coord, Cube, FACE_CENTERS};
use crate::state::{CubieKey, Piece, SubState};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GoalError {
    #[error("No center color at {0:?}")]
    MissingCenter(Coord),
    #[error("Two centers show {0}")]
    DuplicateCenter(Color),
    #[error("{0} and {1} are not two adjacent side colors")]
    InvalidPair(Color, Color),
    #[error("Invalid pair `{0}`, expected two color letters such as `gr`")]
    PairSyntax(String),
    #[error("Cubie {0} is not on the cube")]
    MissingCubie(CubieKey),
}

/// Where each center is. Centers keep their arrangement under face turns, so
/// this is the fixed reference every goal is measured against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Centers {
    /// Indexed by [`Color::index`].
    positions: [Coord; 6],
    /// Indexed like [`FACE_CENTERS`].
    by_face: [Color; 6],
}

impl Centers {
    pub fn from_cube(cube: &Cube) -> Result<Self, GoalError> {
        let mut positions = [(0, 0, 0); 6];
        let mut by_face = [Color::White; 6];
        let mut seen = [false; 6];

        for (face_index, &coord) in FACE_CENTERS.iter().enumerate() {
            let color = cube
                .center_color(coord)
                .ok_or(GoalError::MissingCenter(coord))?;
            if seen[color.index()] {
                return Err(GoalError::DuplicateCenter(color));
            }
            seen[color.index()] = true;
            positions[color.index()] = coord;
            by_face[face_index] = color;
        }

        Ok(Self { positions, by_face })
    }

    #[inline]
    pub fn position(&self, color: Color) -> Coord {
        self.positions[color.index()]
    }

    pub fn up(&self) -> Color {
        self.by_face[0]
    }

    pub fn down(&self) -> Color {
        self.by_face[5]
    }

    /// Side colors in Front, Right, Back, Left order.
    pub fn side_ring(&self) -> [Color; 4] {
        [self.by_face[2], self.by_face[3], self.by_face[4], self.by_face[1]]
    }

    /// Where the cubie `key` sits and how it faces on a solved cube with
    /// these centers.
    ///
    /// Its position is the sum of its colors' center positions, and each
    /// color faces along its center's axis.
    pub fn solved_placement(&self, key: CubieKey) -> Piece {
        let mut coord = (0, 0, 0);
        let mut stickers = [None; 3];
        for color in key.colors() {
            let (x, y, z) = self.position(color);
            coord = (coord.0 + x, coord.1 + y, coord.2 + z);
            let axis = if x != 0 {
                0
            } else if y != 0 {
                1
            } else {
                2
            };
            stickers[axis] = Some(color);
        }
        Piece {
            key,
            coord,
            stickers,
        }
    }

    /// Whether the tracked cubie `key` is at its solved placement on `cube`.
    pub fn is_placed(&self, cube: &Cube, key: CubieKey) -> bool {
        let target = self.solved_placement(key);
        Piece::new(target.coord, cube.stickers(target.coord)) == target
    }

    /// Keys of the four edges that share the down color.
    pub fn cross_keys(&self) -> [CubieKey; 4] {
        let down = self.down();
        self.side_ring().map(|side| CubieKey::of(&[down, side]))
    }

    fn check_pair(&self, pair: PairSlot) -> Result<(), GoalError> {
        let [a, b] = pair.colors();
        let (ax, ay, az) = self.position(a);
        let (bx, by, bz) = self.position(b);
        let both_sides = ay == 0 && by == 0;
        let opposite = (ax, az) == (-bx, -bz);
        if a == b || !both_sides || opposite {
            return Err(GoalError::InvalidPair(a, b));
        }
        Ok(())
    }
}

/// An F2L slot named by its two side colors, e.g. green-red.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PairSlot {
    colors: [Color; 2],
}

impl PairSlot {
    pub fn new(a: Color, b: Color) -> Self {
        Self {
            colors: if a <= b { [a, b] } else { [b, a] },
        }
    }

    pub fn colors(self) -> [Color; 2] {
        self.colors
    }

    pub fn edge_key(self) -> CubieKey {
        CubieKey::of(&self.colors)
    }

    pub fn corner_key(self, down: Color) -> CubieKey {
        CubieKey::of(&[self.colors[0], self.colors[1], down])
    }
}

impl fmt::Display for PairSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.colors[0], self.colors[1])
    }
}

impl FromStr for PairSlot {
    type Err = GoalError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let colors: Vec<Color> = text.chars().filter_map(Color::from_letter).collect();
        match colors[..] {
            [a, b] if text.chars().count() == 2 => Ok(PairSlot::new(a, b)),
            _ => Err(GoalError::PairSyntax(text.to_owned())),
        }
    }
}

/// The four slots front-left, front-right, back-left, back-right for the
/// cube's current orientation.
pub fn default_pair_order(cube: &Cube) -> Result<[PairSlot; 4], GoalError> {
    let [front, right, back, left] = Centers::from_cube(cube)?.side_ring();
    Ok([
        PairSlot::new(front, left),
        PairSlot::new(front, right),
        PairSlot::new(back, left),
        PairSlot::new(back, right),
    ])
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Cross,
    Pair(PairSlot),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Cross => write!(f, "cross"),
            Stage::Pair(slot) => write!(f, "pair {slot}"),
        }
    }
}

/// Which pieces count as flipped for the heuristic's penalty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipRule {
    /// A piece in the top or bottom layer whose sticker of this color does
    /// not face up or down.
    DownSticker(Color),
    /// A piece at its goal position whose stickers differ from the goal.
    AtGoal,
}

/// Everything one search needs to know about a stage.
#[derive(Clone, Debug)]
pub struct Subgoal {
    pub stage: Stage,
    pub initial: SubState,
    pub goal: SubState,
    /// Relabeled target coordinates, each aligned with `goal.pieces()`.
    ///
    /// The cross uses the three other rotations of the side-center ring, so a
    /// cross that is only off by a down-face turn is not penalized.
    pub alternatives: Vec<Vec<Coord>>,
    pub flip_rule: FlipRule,
}

/// Projects `cube` onto the cubies `stage` tracks and derives its goal.
///
/// F2L stages also track the cross and every pair in `solved_pairs`, so the
/// search notices when it disturbs them.
pub fn extract(cube: &Cube, stage: Stage, solved_pairs: &[PairSlot]) -> Result<Subgoal, GoalError> {
    let centers = Centers::from_cube(cube)?;
    let down = centers.down();
    let mut keys = centers.cross_keys().to_vec();

    if let Stage::Pair(slot) = stage {
        for &pair in solved_pairs.iter().chain([&slot]) {
            centers.check_pair(pair)?;
            keys.push(pair.edge_key());
            keys.push(pair.corner_key(down));
        }
    }
    keys.sort();
    keys.dedup();

    let initial = project(cube, &keys)?;
    let goal = SubState::new(
        keys.iter()
            .map(|&key| centers.solved_placement(key))
            .collect(),
    );
    let (alternatives, flip_rule) = match stage {
        Stage::Cross => (cross_alternatives(&centers), FlipRule::DownSticker(down)),
        Stage::Pair(_) => (Vec::new(), FlipRule::AtGoal),
    };

    Ok(Subgoal {
        stage,
        initial,
        goal,
        alternatives,
        flip_rule,
    })
}

/// The current pieces of `cube` whose keys are in `keys`.
fn project(cube: &Cube, keys: &[CubieKey]) -> Result<SubState, GoalError> {
    let pieces: Vec<Piece> = cube
        .cubies()
        .map(|(coord, stickers)| Piece::new(coord, stickers))
        .filter(|piece| keys.contains(&piece.key))
        .collect();

    if let Some(&missing) = keys
        .iter()
        .find(|&&key| !pieces.iter().any(|piece| piece.key == key))
    {
        return Err(GoalError::MissingCubie(missing));
    }

    Ok(SubState::new(pieces))
}

/// Cross targets with the side labels shifted one, two and three steps
/// around the ring, each sorted by key like the goal.
fn cross_alternatives(centers: &Centers) -> Vec<Vec<Coord>> {
    let down = centers.down();
    let ring = centers.side_ring();

    (1..4)
        .map(|shift| {
            let mut targets: Vec<(CubieKey, Coord)> = (0..4)
                .map(|m| {
                    let relabeled = CubieKey::of(&[down, ring[(m + shift) % 4]]);
                    (
                        CubieKey::of(&[down, ring[m]]),
                        centers.solved_placement(relabeled).coord,
                    )
                })
                .collect();
            targets.sort_by_key(|&(key, _)| key);
            targets.into_iter().map(|(_, coord)| coord).collect()
        })
        .collect()
}
