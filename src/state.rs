//! Search sub-states: the few cubies one subgoal cares about.
//!
//! Cubies are identified by their set of colors ([`CubieKey`]) rather than by
//! position, so a physical piece is tracked wherever the moves take it.

use std::fmt;

use crate::cube::{coord_to_idx, Color, Coord, Stickers};
use crate::moves::Move;

/// Rotation-invariant identity of a cubie: the set of its colors as a bitmask
/// indexed by [`Color::index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubieKey(u8);

impl CubieKey {
    pub fn of(colors: &[Color]) -> Self {
        Self(colors.iter().fold(0, |mask, color| mask | 1 << color.index()))
    }

    pub fn from_stickers(stickers: &Stickers) -> Self {
        Self(
            stickers
                .iter()
                .flatten()
                .fold(0, |mask, color| mask | 1 << color.index()),
        )
    }

    #[inline]
    pub fn contains(self, color: Color) -> bool {
        self.0 & (1 << color.index()) != 0
    }

    pub fn colors(self) -> impl Iterator<Item = Color> {
        Color::ALL.into_iter().filter(move |&color| self.contains(color))
    }

    /// Number of colors, which is the number of stickers on the cubie.
    pub fn sticker_count(self) -> usize {
        self.0.count_ones() as usize
    }
}

impl fmt::Display for CubieKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in self.colors() {
            write!(f, "{color}")?;
        }
        Ok(())
    }
}

/// One tracked cubie: who it is, where it is and how it is turned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub key: CubieKey,
    pub coord: Coord,
    pub stickers: Stickers,
}

impl Piece {
    pub fn new(coord: Coord, stickers: Stickers) -> Self {
        Self {
            key: CubieKey::from_stickers(&stickers),
            coord,
            stickers,
        }
    }

    #[inline]
    fn moved(self, mv: Move) -> Self {
        let (coord, stickers) = mv.apply(self.coord, self.stickers);
        Self {
            key: self.key,
            coord,
            stickers,
        }
    }

    /// Cell index in bits 9..14, then the x, y and z sticker codes.
    #[inline]
    fn packed(&self) -> u16 {
        let [x, y, z] = self.stickers.map(sticker_code);
        (coord_to_idx(self.coord) as u16) << 9 | x << 6 | y << 3 | z
    }
}

/// 3-bit code of one sticker slot, zero for an empty slot.
#[inline(always)]
fn sticker_code(sticker: Option<Color>) -> u16 {
    sticker.map_or(0, |color| color.index() as u16 + 1)
}

/// Canonical, hashable form of a sub-state, one packed `u16` per piece in
/// key order.
///
/// Only meaningful between sub-states that track the same cubies.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint(Box<[u16]>);

/// The tracked cubies of a subgoal, sorted by [`CubieKey`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubState {
    pieces: Vec<Piece>,
}

impl SubState {
    /// Sorts `pieces` by key. Keys are expected to be unique.
    pub fn new(mut pieces: Vec<Piece>) -> Self {
        pieces.sort_by_key(|piece| piece.key);
        Self { pieces }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = CubieKey> + '_ {
        self.pieces.iter().map(|piece| piece.key)
    }

    pub fn get(&self, key: CubieKey) -> Option<&Piece> {
        self.pieces
            .binary_search_by_key(&key, |piece| piece.key)
            .ok()
            .map(|index| &self.pieces[index])
    }

    /// The sub-state after `mv`. Key order is unaffected by moves.
    pub fn apply(&self, mv: Move) -> SubState {
        SubState {
            pieces: self.pieces.iter().map(|piece| piece.moved(mv)).collect(),
        }
    }

    pub fn apply_all(&self, moves: &[Move]) -> SubState {
        moves
            .iter()
            .fold(self.clone(), |state, &mv| state.apply(mv))
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint(self.pieces.iter().map(Piece::packed).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{Face, Turn};

    fn front_down_edge() -> Piece {
        Piece::new((0, -1, 1), [None, Some(Color::Yellow), Some(Color::Green)])
    }

    #[test]
    fn test_key_ignores_sticker_slots() {
        let a = CubieKey::from_stickers(&[None, Some(Color::Yellow), Some(Color::Green)]);
        let b = CubieKey::from_stickers(&[Some(Color::Green), None, Some(Color::Yellow)]);
        assert_eq!(a, b);
        assert_eq!(a, CubieKey::of(&[Color::Green, Color::Yellow]));
        assert_eq!(a.sticker_count(), 2);
        assert_eq!(a.to_string(), "gy");
        assert!(a.contains(Color::Yellow));
        assert!(!a.contains(Color::White));
    }

    #[test]
    fn test_sub_state_is_sorted_by_key() {
        let corner = Piece::new(
            (1, -1, 1),
            [Some(Color::Red), Some(Color::Yellow), Some(Color::Green)],
        );
        let state = SubState::new(vec![corner, front_down_edge()]);
        let keys: Vec<_> = state.keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(state.get(corner.key), Some(&corner));
        assert_eq!(state.get(CubieKey::of(&[Color::White])), None);
    }

    #[test]
    fn test_apply_tracks_piece_by_identity() {
        let state = SubState::new(vec![front_down_edge()]);
        let moved = state.apply(Move::new(Face::F, Turn::Clockwise));

        let piece = moved.pieces()[0];
        assert_eq!(piece.key, front_down_edge().key);
        assert_eq!(piece.coord, (-1, 0, 1));
        assert_eq!(
            moved.apply(Move::new(Face::F, Turn::CounterClockwise)),
            state
        );
        // U does not touch the bottom layer
        assert_eq!(state.apply(Move::new(Face::U, Turn::Half)), state);
    }

    #[test]
    fn test_fingerprint_sees_orientation() {
        let state = SubState::new(vec![front_down_edge()]);
        let flipped = SubState::new(vec![Piece::new(
            (0, -1, 1),
            [None, Some(Color::Green), Some(Color::Yellow)],
        )]);
        assert_ne!(state.fingerprint(), flipped.fingerprint());
        assert_eq!(state.fingerprint(), state.clone().fingerprint());

        let round_trip = state.apply_all(&[
            Move::new(Face::F, Turn::Half),
            Move::new(Face::F, Turn::Half),
        ]);
        assert_eq!(round_trip.fingerprint(), state.fingerprint());
    }
}
