//! Successor move lists with redundant sequences removed.
//!
//! Two turns of the same face always collapse into one turn or nothing, and
//! turns of opposite faces commute. So after a face, none of its own moves
//! are offered, and after U, L or F the moves of D, R or B are dropped; the
//! other order of each opposite pair stays reachable.

use crate::moves::{Face, Move};
use crate::search::ConfigError;

#[derive(Clone, Debug)]
pub struct MovePruner {
    catalog: Vec<Move>,
    /// Successors indexed by the [`Face::index`] of the last move.
    after: [Vec<Move>; 6],
}

/// Whether `face` goes first in its opposite pair.
#[inline]
const fn leads_opposite(face: Face) -> bool {
    matches!(face, Face::U | Face::L | Face::F)
}

#[inline]
fn may_follow(last: Face, next: Face) -> bool {
    next != last && !(leads_opposite(last) && next == last.opposite())
}

impl MovePruner {
    /// Checks that `catalog` is non-empty without repeats, then builds the
    /// successor lists. Catalog order is kept in every list.
    pub fn new(catalog: &[Move]) -> Result<Self, ConfigError> {
        if catalog.is_empty() {
            return Err(ConfigError::EmptyMoveCatalog);
        }
        for (i, &mv) in catalog.iter().enumerate() {
            if catalog[..i].contains(&mv) {
                return Err(ConfigError::DuplicateMove(mv));
            }
        }
        Ok(Self::build(catalog))
    }

    fn build(catalog: &[Move]) -> Self {
        let after = Face::ALL.map(|last| {
            catalog
                .iter()
                .copied()
                .filter(|mv| may_follow(last, mv.face))
                .collect()
        });
        Self {
            catalog: catalog.to_vec(),
            after,
        }
    }

    /// Moves worth trying after `last`, the whole catalog at the root.
    #[inline]
    pub fn next_moves(&self, last: Option<Move>) -> &[Move] {
        match last {
            None => &self.catalog,
            Some(mv) => &self.after[mv.face.index()],
        }
    }

    pub fn catalog(&self) -> &[Move] {
        &self.catalog
    }
}

impl Default for MovePruner {
    fn default() -> Self {
        Self::build(&Move::ALL)
    }
}
