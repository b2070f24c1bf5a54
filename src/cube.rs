//! Full cube state and coordinate helpers.
//!
//! Coordinates put x towards Right, y towards Up and z towards Front, each in
//! `-1..=1`. The 27 cells are stored as a flat array indexed x-major; the
//! core cell at the origin never holds a cubie.

use std::fmt;

use crate::moves::{Move, Rotation};

/// A cubie position.
pub type Coord = (i32, i32, i32);

/// Colors facing along the x, y and z axes. Slots for axes the cubie has no
/// face on are `None`: centers carry one color, edges two, corners three.
pub type Stickers = [Option<Color>; 3];

/// Number of cells in the flat cell array, including the empty core.
pub const NUM_CELLS: usize = 27;

/// Cell index of the origin.
const CORE: usize = coord_to_idx((0, 0, 0));

/// Center positions in `U L F R B D` order.
pub const FACE_CENTERS: [Coord; 6] = [
    (0, 1, 0),
    (-1, 0, 0),
    (0, 0, 1),
    (1, 0, 0),
    (0, 0, -1),
    (0, -1, 0),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Orange,
    Green,
    Red,
    Blue,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Orange,
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::Yellow,
    ];

    pub const fn letter(self) -> char {
        match self {
            Color::White => 'w',
            Color::Orange => 'o',
            Color::Green => 'g',
            Color::Red => 'r',
            Color::Blue => 'b',
            Color::Yellow => 'y',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        Color::ALL.into_iter().find(|color| color.letter() == letter)
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Converts a coordinate to its cell index.
///
/// Index order is x-major: `idx = (x + 1) * 9 + (y + 1) * 3 + (z + 1)`.
#[inline(always)]
pub const fn coord_to_idx((x, y, z): Coord) -> usize {
    ((x + 1) * 9 + (y + 1) * 3 + (z + 1)) as usize
}

/// Converts a cell index back to its coordinate.
#[inline(always)]
pub const fn idx_to_coord(cell_index: usize) -> Coord {
    (
        (cell_index / 9) as i32 - 1,
        ((cell_index / 3) % 3) as i32 - 1,
        (cell_index % 3) as i32 - 1,
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CubieKind {
    Center,
    Edge,
    Corner,
}

impl CubieKind {
    /// Kind of the cubie sitting at `coord`, `None` for the core.
    pub fn of((x, y, z): Coord) -> Option<Self> {
        match [x, y, z].iter().filter(|&&c| c == 0).count() {
            0 => Some(CubieKind::Corner),
            1 => Some(CubieKind::Edge),
            2 => Some(CubieKind::Center),
            _ => None,
        }
    }
}

/// The whole cube: every cubie's stickers, addressed by position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cube {
    cells: [Stickers; NUM_CELLS],
}

impl Default for Cube {
    fn default() -> Self {
        Self::solved()
    }
}

impl Cube {
    /// A solved cube with White up, Green front, Red right and Yellow down.
    pub fn solved() -> Self {
        let mut cells = [[None; 3]; NUM_CELLS];
        for (cell_index, stickers) in cells.iter_mut().enumerate() {
            if cell_index == CORE {
                continue;
            }
            let (x, y, z) = idx_to_coord(cell_index);
            *stickers = [
                match x {
                    1 => Some(Color::Red),
                    -1 => Some(Color::Orange),
                    _ => None,
                },
                match y {
                    1 => Some(Color::White),
                    -1 => Some(Color::Yellow),
                    _ => None,
                },
                match z {
                    1 => Some(Color::Green),
                    -1 => Some(Color::Blue),
                    _ => None,
                },
            ];
        }
        Self { cells }
    }

    pub(crate) fn from_cells(cells: [Stickers; NUM_CELLS]) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn stickers(&self, coord: Coord) -> Stickers {
        self.cells[coord_to_idx(coord)]
    }

    /// All 26 cubies with their positions, in cell order.
    pub fn cubies(&self) -> impl Iterator<Item = (Coord, Stickers)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(cell_index, _)| cell_index != CORE)
            .map(|(cell_index, &stickers)| (idx_to_coord(cell_index), stickers))
    }

    /// Color of the center at `coord`, `None` if `coord` is not a center.
    pub fn center_color(&self, coord: Coord) -> Option<Color> {
        if CubieKind::of(coord) != Some(CubieKind::Center) {
            return None;
        }
        self.stickers(coord).into_iter().flatten().next()
    }

    /// Where the center of `color` currently sits.
    pub fn center_position(&self, color: Color) -> Option<Coord> {
        FACE_CENTERS
            .into_iter()
            .find(|&coord| self.center_color(coord) == Some(color))
    }

    pub fn apply(&mut self, mv: Move) {
        self.permute(|coord, stickers| mv.apply(coord, stickers));
    }

    pub fn apply_all(&mut self, moves: &[Move]) {
        for &mv in moves {
            self.apply(mv);
        }
    }

    pub fn rotate(&mut self, rotation: Rotation) {
        self.permute(|coord, stickers| rotation.apply(coord, stickers));
    }

    /// Moves every cubie to the position `relocate` gives it.
    fn permute(&mut self, relocate: impl Fn(Coord, Stickers) -> (Coord, Stickers)) {
        let mut cells = [[None; 3]; NUM_CELLS];
        for (coord, stickers) in self.cubies() {
            let (destination, relabeled) = relocate(coord, stickers);
            cells[coord_to_idx(destination)] = relabeled;
        }
        self.cells = cells;
    }

    /// Number of stickers of each color, indexed by [`Color::index`].
    pub fn color_counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for color in self.cells.iter().flatten().flatten() {
            counts[color.index()] += 1;
        }
        counts
    }
}
