//! Face turns and whole-cube rotations.
//!
//! A clockwise quarter turn (looking at the face from outside the cube) moves
//! every cubie of the turning layer along one of the formulas in [`quarter`]
//! and swaps the two sticker slots that are perpendicular to the turning
//! axis, since those are the stickers that change which direction they face.
//! Counter-clockwise turns are three quarters and half turns are two.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::cube::{Coord, Stickers};

/// One of the three cube axes. Sticker slots are indexed by axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Sticker slot (and coordinate component) index of this axis.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline(always)]
    pub const fn component(self, (x, y, z): Coord) -> i32 {
        match self {
            Axis::X => x,
            Axis::Y => y,
            Axis::Z => z,
        }
    }

    const fn letter(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
}

/// A face of the cube, named by its fixed position (not by its color).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    U,
    L,
    F,
    R,
    B,
    D,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::L, Face::F, Face::R, Face::B, Face::D];

    pub const fn axis(self) -> Axis {
        match self {
            Face::L | Face::R => Axis::X,
            Face::U | Face::D => Axis::Y,
            Face::F | Face::B => Axis::Z,
        }
    }

    /// Coordinate of this face's layer along its axis.
    pub const fn layer(self) -> i32 {
        match self {
            Face::U | Face::R | Face::F => 1,
            Face::D | Face::L | Face::B => -1,
        }
    }

    pub const fn opposite(self) -> Face {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::L => Face::R,
            Face::R => Face::L,
            Face::F => Face::B,
            Face::B => Face::F,
        }
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::L => 'L',
            Face::F => 'F',
            Face::R => 'R',
            Face::B => 'B',
            Face::D => 'D',
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        Face::ALL.into_iter().find(|face| face.letter() == letter)
    }
}

/// Rotates `coord` a clockwise quarter turn about `face`, as seen from
/// outside that face. The layer test is up to the caller.
#[inline(always)]
const fn quarter(face: Face, (x, y, z): Coord) -> Coord {
    match face {
        // front goes to left
        Face::U => (-z, y, x),
        // front goes to right
        Face::D => (z, y, -x),
        // front goes to up
        Face::R => (x, z, -y),
        // up goes to front
        Face::L => (x, -z, y),
        // up goes to right
        Face::F => (y, -x, z),
        // up goes to left
        Face::B => (-y, x, z),
    }
}

/// Exchanges the two sticker slots perpendicular to `axis`.
#[inline(always)]
fn swap_off_axis(mut stickers: Stickers, axis: Axis) -> Stickers {
    match axis {
        Axis::X => stickers.swap(1, 2),
        Axis::Y => stickers.swap(0, 2),
        Axis::Z => stickers.swap(0, 1),
    }
    stickers
}

/// Amount of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
    Half,
}

impl Turn {
    pub const ALL: [Turn; 3] = [Turn::Clockwise, Turn::CounterClockwise, Turn::Half];

    pub const fn inverse(self) -> Turn {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Half => Turn::Half,
        }
    }

    /// Number of clockwise quarter turns this amount is equivalent to.
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Turn::Clockwise => 1,
            Turn::Half => 2,
            Turn::CounterClockwise => 3,
        }
    }

    const fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Half => "2",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" => Some(Turn::Clockwise),
            "'" => Some(Turn::CounterClockwise),
            "2" | "2'" => Some(Turn::Half),
            _ => None,
        }
    }
}

/// Turns one cubie about `face`'s axis, ignoring which layer it is in.
#[inline]
fn turn_cubie(face: Face, turn: Turn, mut coord: Coord, stickers: Stickers) -> (Coord, Stickers) {
    for _ in 0..turn.quarter_turns() {
        coord = quarter(face, coord);
    }
    // two swaps cancel out for a half turn
    let stickers = match turn {
        Turn::Half => stickers,
        Turn::Clockwise | Turn::CounterClockwise => swap_off_axis(stickers, face.axis()),
    };
    (coord, stickers)
}

/// A single-layer face turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

impl Move {
    /// Every face turn, grouped by face in `U L F R B D` order.
    pub const ALL: [Move; 18] = [
        Move::new(Face::U, Turn::Clockwise),
        Move::new(Face::U, Turn::CounterClockwise),
        Move::new(Face::U, Turn::Half),
        Move::new(Face::L, Turn::Clockwise),
        Move::new(Face::L, Turn::CounterClockwise),
        Move::new(Face::L, Turn::Half),
        Move::new(Face::F, Turn::Clockwise),
        Move::new(Face::F, Turn::CounterClockwise),
        Move::new(Face::F, Turn::Half),
        Move::new(Face::R, Turn::Clockwise),
        Move::new(Face::R, Turn::CounterClockwise),
        Move::new(Face::R, Turn::Half),
        Move::new(Face::B, Turn::Clockwise),
        Move::new(Face::B, Turn::CounterClockwise),
        Move::new(Face::B, Turn::Half),
        Move::new(Face::D, Turn::Clockwise),
        Move::new(Face::D, Turn::CounterClockwise),
        Move::new(Face::D, Turn::Half),
    ];

    pub const fn new(face: Face, turn: Turn) -> Self {
        Self { face, turn }
    }

    pub const fn inverse(self) -> Self {
        Self::new(self.face, self.turn.inverse())
    }

    /// Whether a cubie at `coord` lies in the turning layer.
    #[inline(always)]
    pub fn affects(self, coord: Coord) -> bool {
        self.face.axis().component(coord) == self.face.layer()
    }

    /// Returns where a cubie ends up after this move, and how its stickers
    /// are relabeled. Cubies outside the layer are returned unchanged.
    #[inline]
    pub fn apply(self, coord: Coord, stickers: Stickers) -> (Coord, Stickers) {
        if !self.affects(coord) {
            return (coord, stickers);
        }
        turn_cubie(self.face, self.turn, coord, stickers)
    }
}

/// A whole-cube rotation. `x` follows R, `y` follows U and `z` follows F.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rotation {
    pub axis: Axis,
    pub turn: Turn,
}

impl Rotation {
    pub const fn new(axis: Axis, turn: Turn) -> Self {
        Self { axis, turn }
    }

    pub const fn inverse(self) -> Self {
        Self::new(self.axis, self.turn.inverse())
    }

    const fn face(self) -> Face {
        match self.axis {
            Axis::X => Face::R,
            Axis::Y => Face::U,
            Axis::Z => Face::F,
        }
    }

    /// Moves any cubie; every layer turns.
    #[inline]
    pub fn apply(self, coord: Coord, stickers: Stickers) -> (Coord, Stickers) {
        turn_cubie(self.face(), self.turn, coord, stickers)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face.letter(), self.turn.suffix())
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.axis.letter(), self.turn.suffix())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("Empty move token")]
    Empty,
    #[error("Unknown face or axis `{0}`")]
    UnknownLetter(char),
    #[error("Unknown turn suffix `{0}`")]
    UnknownSuffix(String),
}

/// Splits a token into its leading letter and the turn amount that follows.
fn split_token(token: &str) -> Result<(char, Turn), ParseMoveError> {
    let mut chars = token.chars();
    let letter = chars.next().ok_or(ParseMoveError::Empty)?;
    let suffix = chars.as_str();
    let turn =
        Turn::from_suffix(suffix).ok_or_else(|| ParseMoveError::UnknownSuffix(suffix.to_owned()))?;
    Ok((letter, turn))
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (letter, turn) = split_token(token)?;
        let face = Face::from_letter(letter).ok_or(ParseMoveError::UnknownLetter(letter))?;
        Ok(Move::new(face, turn))
    }
}

impl FromStr for Rotation {
    type Err = ParseMoveError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (letter, turn) = split_token(token)?;
        let axis = [Axis::X, Axis::Y, Axis::Z]
            .into_iter()
            .find(|axis| axis.letter() == letter)
            .ok_or(ParseMoveError::UnknownLetter(letter))?;
        Ok(Rotation::new(axis, turn))
    }
}

/// Parses a whitespace-separated sequence such as `"R U R' U2"`.
pub fn parse_moves(text: &str) -> Result<Vec<Move>, ParseMoveError> {
    text.split_whitespace().map(str::parse).collect()
}

/// Formats moves separated by single spaces.
pub fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
