//! Facelet strings and the flat net rendering.
//!
//! A cube is described by six strings of nine sticker letters, one per face
//! in the order Up, Left, Front, Right, Back, Down. Each string reads the face
//! row by row from its top-left sticker, with the face held so that:
//! - Up is seen from above with Back at the top,
//! - Left, Front, Right and Back are seen from outside with Up at the top,
//! - Down is seen from below with Front at the top.

use std::fmt;

use thiserror::Error;

use crate::cube::{coord_to_idx, Color, Coord, Cube, CubieKind, Stickers, NUM_CELLS};
use crate::moves::Face;

/// Face order of facelet strings.
pub const FACE_ORDER: [Face; 6] = [Face::U, Face::L, Face::F, Face::R, Face::B, Face::D];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FaceletError {
    #[error("Expected 6 faces but got {0}")]
    FaceCount(usize),
    #[error("Face {face} has {len} stickers, expected 9")]
    StickerCount { face: char, len: usize },
    #[error("Unknown sticker color `{0}`")]
    UnknownColor(char),
    #[error("Color {color} appears {count} times, expected 9")]
    ColorCount { color: Color, count: usize },
    #[error("Two centers share the color {0}")]
    DuplicateCenter(Color),
    #[error("Cubie at {0:?} shows the same color twice")]
    RepeatedColor(Coord),
}

/// Returns the cubie position and sticker slot of one facelet.
///
/// `row` and `col` are in `0..3`, read as described in the module docs.
const fn facelet_position(face: Face, row: i32, col: i32) -> (Coord, usize) {
    match face {
        Face::U => ((col - 1, 1, row - 1), 1),
        Face::L => ((-1, 1 - row, col - 1), 0),
        Face::F => ((col - 1, 1 - row, 1), 2),
        Face::R => ((1, 1 - row, 1 - col), 0),
        Face::B => ((1 - col, 1 - row, -1), 2),
        Face::D => ((col - 1, -1, 1 - row), 1),
    }
}

impl Cube {
    /// Builds a cube from six facelet strings.
    ///
    /// Validates sticker counts, color counts, distinct centers and that no
    /// cubie repeats a color. Whether the cube is reachable by turning is not
    /// checked.
    pub fn from_facelets<S: AsRef<str>>(faces: &[S]) -> Result<Self, FaceletError> {
        if faces.len() != FACE_ORDER.len() {
            return Err(FaceletError::FaceCount(faces.len()));
        }

        let mut cells: [Stickers; NUM_CELLS] = [[None; 3]; NUM_CELLS];
        let mut counts = [0usize; 6];

        for (&face, stickers) in FACE_ORDER.iter().zip(faces) {
            let stickers = stickers.as_ref();
            let len = stickers.chars().count();
            if len != 9 {
                return Err(FaceletError::StickerCount {
                    face: face.letter(),
                    len,
                });
            }

            for (n, letter) in stickers.chars().enumerate() {
                let color = Color::from_letter(letter).ok_or(FaceletError::UnknownColor(letter))?;
                counts[color.index()] += 1;
                let (coord, slot) = facelet_position(face, n as i32 / 3, n as i32 % 3);
                cells[coord_to_idx(coord)][slot] = Some(color);
            }
        }

        for color in Color::ALL {
            let count = counts[color.index()];
            if count != 9 {
                return Err(FaceletError::ColorCount { color, count });
            }
        }

        let cube = Cube::from_cells(cells);
        let mut seen_centers = [false; 6];
        for (coord, stickers) in cube.cubies() {
            let colors: Vec<Color> = stickers.into_iter().flatten().collect();
            if colors
                .iter()
                .enumerate()
                .any(|(i, color)| colors[i + 1..].contains(color))
            {
                return Err(FaceletError::RepeatedColor(coord));
            }
            if CubieKind::of(coord) == Some(CubieKind::Center) {
                let color = colors[0];
                if seen_centers[color.index()] {
                    return Err(FaceletError::DuplicateCenter(color));
                }
                seen_centers[color.index()] = true;
            }
        }

        Ok(cube)
    }

    /// The inverse of [`Cube::from_facelets`].
    pub fn to_facelets(&self) -> [String; 6] {
        FACE_ORDER.map(|face| {
            (0..9)
                .map(|n| self.facelet(face, n / 3, n % 3))
                .collect()
        })
    }

    fn facelet(&self, face: Face, row: i32, col: i32) -> char {
        let (coord, slot) = facelet_position(face, row, col);
        self.stickers(coord)[slot].map_or('.', Color::letter)
    }

    /// Formats the cube as an unfolded net.
    ///
    /// Up sits above Front, Down below it, and the middle band reads
    /// Left, Front, Right, Back.
    pub fn format_net(&self) -> String {
        let mut output = String::new();

        let push_face_row = |output: &mut String, face: Face, row: i32| {
            for col in 0..3 {
                output.push(self.facelet(face, row, col));
            }
        };

        for row in 0..3 {
            output.push_str("    ");
            push_face_row(&mut output, Face::U, row);
            output.push('\n');
        }
        for row in 0..3 {
            for (i, face) in [Face::L, Face::F, Face::R, Face::B].into_iter().enumerate() {
                if i > 0 {
                    output.push(' ');
                }
                push_face_row(&mut output, face, row);
            }
            output.push('\n');
        }
        for row in 0..3 {
            output.push_str("    ");
            push_face_row(&mut output, Face::D, row);
            output.push('\n');
        }

        output
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_net())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{parse_moves, Rotation};

    const SOLVED: [&str; 6] = [
        "wwwwwwwww",
        "ooooooooo",
        "ggggggggg",
        "rrrrrrrrr",
        "bbbbbbbbb",
        "yyyyyyyyy",
    ];

    fn rotate_all(cube: &mut Cube, rotations: &str) {
        for token in rotations.split_whitespace() {
            cube.rotate(token.parse::<Rotation>().unwrap());
        }
    }

    #[test]
    fn test_solved_facelets_match_solved_cube() {
        let cube = Cube::from_facelets(&SOLVED).unwrap();
        assert_eq!(cube, Cube::solved());
        assert_eq!(cube.to_facelets(), SOLVED.map(String::from));
    }

    #[test]
    fn test_face_turns_against_known_facelets() {
        let mut cube = Cube::solved();
        cube.apply_all(&parse_moves("U F D B L R").unwrap());
        assert_eq!(
            cube.to_facelets(),
            ["orrowrooy", "wwwbogbyy", "bgrwgroob", "gwwgrbyyb", "gbgwbyrby", "gyrgyroow"]
                .map(String::from)
        );

        let mut cube = Cube::solved();
        cube.apply_all(&parse_moves("U2 F2 D2 B2 L2 R2").unwrap());
        assert_eq!(
            cube.to_facelets(),
            ["ywyywywyw", "rrororrro", "gggbgbbbb", "rooororoo", "bbbgbgggg", "wywwywywy"]
                .map(String::from)
        );
    }

    #[test]
    fn test_rotations_against_known_facelets() {
        let start = [
            "gobowrowb",
            "ogbgoygwg",
            "yrobgywww",
            "wgrorrbby",
            "ywwybygbo",
            "rgrbyryor",
        ];

        let mut cube = Cube::from_facelets(&start).unwrap();
        rotate_all(&mut cube, "x y z");
        assert_eq!(
            cube.to_facelets(),
            ["ybroygrrr", "obgybywwy", "ybbrrorgw", "wwwygbory", "gwgyogbgo", "brbowwgoo"]
                .map(String::from)
        );

        let mut cube = Cube::from_facelets(&start).unwrap();
        rotate_all(&mut cube, "x' y' z'");
        assert_eq!(
            cube.to_facelets(),
            ["brbowwgoo", "ywwybygbo", "ogbgoygwg", "yrobgywww", "wgrorrbby", "ybroygrrr"]
                .map(String::from)
        );

        let mut cube = Cube::from_facelets(&start).unwrap();
        rotate_all(&mut cube, "x2 y2 z2");
        assert_eq!(cube.to_facelets(), start.map(String::from));
    }

    #[test]
    fn test_scrambled_facelets_roundtrip() {
        let mut cube = Cube::solved();
        cube.apply_all(&parse_moves("R U2 F' L D B2 R' U").unwrap());
        let faces = cube.to_facelets();
        assert_eq!(Cube::from_facelets(&faces).unwrap(), cube);
    }

    #[test]
    fn test_invalid_facelets() {
        assert_eq!(
            Cube::from_facelets(&SOLVED[..5]),
            Err(FaceletError::FaceCount(5))
        );

        let mut short = SOLVED;
        short[2] = "gggg";
        assert_eq!(
            Cube::from_facelets(&short),
            Err(FaceletError::StickerCount { face: 'F', len: 4 })
        );

        let mut unknown = SOLVED;
        unknown[0] = "wwwwwwwwk";
        assert_eq!(
            Cube::from_facelets(&unknown),
            Err(FaceletError::UnknownColor('k'))
        );

        let mut miscounted = SOLVED;
        miscounted[0] = "wwwwwwwwy";
        assert_eq!(
            Cube::from_facelets(&miscounted),
            Err(FaceletError::ColorCount {
                color: Color::White,
                count: 8
            })
        );
    }

    #[test]
    fn test_solved_net_snapshot() {
        insta::assert_snapshot!(Cube::solved().format_net(), @r"
            www
            www
            www
        ooo ggg rrr bbb
        ooo ggg rrr bbb
        ooo ggg rrr bbb
            yyy
            yyy
            yyy
        ");
    }
}
