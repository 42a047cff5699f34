//! Board state: marbles on the 61 cells plus the maintained position hash

use crate::space::{self, Direction, Space};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// The marble color this player moves.
    pub fn marble(self) -> Marble {
        match self {
            Player::Black => Marble::Black,
            Player::White => Marble::White,
        }
    }
}

/// Contents of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marble {
    Blank,
    Black,
    White,
}

impl Marble {
    /// The player owning this marble, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Marble::Blank => None,
            Marble::Black => Some(Player::Black),
            Marble::White => Some(Player::White),
        }
    }
}

/// Lengths of the nine rows in display order, row `I` first.
pub const ROW_LENGTHS: [usize; 9] = [5, 6, 7, 8, 9, 8, 7, 6, 5];

/// Seed for the Zobrist key table. Fixed so position hashes are identical
/// across runs and an externally persisted memo table stays valid.
const ZOBRIST_SEED: u64 = 0xABA1_0E55;

static ZOBRIST: OnceLock<[[u64; 2]; 61]> = OnceLock::new();

fn zobrist_keys() -> &'static [[u64; 2]; 61] {
    ZOBRIST.get_or_init(|| {
        let mut rng = ChaCha8Rng::seed_from_u64(ZOBRIST_SEED);
        let mut keys = [[0u64; 2]; 61];
        for cell in keys.iter_mut() {
            cell[0] = rng.gen();
            cell[1] = rng.gen();
        }
        keys
    })
}

fn zobrist_key(space: Space, marble: Marble) -> u64 {
    match marble {
        Marble::Blank => 0,
        Marble::Black => zobrist_keys()[space.index()][0],
        Marble::White => zobrist_keys()[space.index()][1],
    }
}

/// The 61-cell board. Storage is a flat array in scan order; the jagged
/// row/column shape lives in the [`Space`] coordinate conversions.
///
/// The position hash is a 64-bit Zobrist value over (cell, color) pairs,
/// maintained incrementally by [`Board::set`]. It is a cache key only:
/// distinct positions can collide, so nothing correctness-critical may
/// treat hash equality as board equality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Marble; 61],
    hash: u64,
}

impl Board {
    /// A board with no marbles on it.
    pub fn empty() -> Board {
        Board {
            cells: [Marble::Blank; 61],
            hash: 0,
        }
    }

    /// Build a board from nine rows given in display order (row `I` first),
    /// the orientation [`Board::rows`] returns.
    ///
    /// Panics if a row has the wrong length.
    pub fn from_rows(rows: &[&[Marble]; 9]) -> Board {
        let mut board = Board::empty();
        for (i, row) in rows.iter().enumerate() {
            let span = space::row_span(8 - i);
            assert_eq!(row.len(), span.len(), "row {} has the wrong length", i);
            for (offset, &marble) in row.iter().enumerate() {
                board.set(Space::from_index(span.start + offset), marble);
            }
        }
        board
    }

    /// The marble at `space`.
    ///
    /// Panics if `space` is `Off`; geometry never hands `Off` to an
    /// accessor, so hitting this is a caller bug.
    pub fn get(&self, space: Space) -> Marble {
        assert!(space != Space::Off, "cannot read the state of Space::Off");
        self.cells[space.index()]
    }

    /// Put `marble` at `space`, keeping the position hash in step.
    ///
    /// Panics if `space` is `Off`.
    pub fn set(&mut self, space: Space, marble: Marble) {
        assert!(space != Space::Off, "cannot set the state of Space::Off");
        let index = space.index();
        let old = self.cells[index];
        self.hash ^= zobrist_key(space, old) ^ zobrist_key(space, marble);
        self.cells[index] = marble;
    }

    /// The position hash of the current contents.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub(crate) fn restore_hash(&mut self, hash: u64) {
        self.hash = hash;
    }

    /// Marble counts, black then white.
    pub fn score(&self) -> (u8, u8) {
        let mut black = 0;
        let mut white = 0;
        for &marble in &self.cells {
            match marble {
                Marble::Black => black += 1,
                Marble::White => white += 1,
                Marble::Blank => {}
            }
        }
        (black, white)
    }

    /// Counts of (friendly, enemy) marbles among the six neighbors of
    /// `space`, relative to the marble sitting on it. Off-board neighbors
    /// are skipped.
    pub fn count_neighbors(&self, space: Space) -> (u8, u8) {
        let marble = self.get(space);
        let mut friendly = 0;
        let mut enemy = 0;
        for direction in Direction::ALL {
            let neighbor = space.neighbor(direction);
            if neighbor == Space::Off {
                continue;
            }
            match self.get(neighbor) {
                Marble::Blank => {}
                m if m == marble => friendly += 1,
                _ => enemy += 1,
            }
        }
        (friendly, enemy)
    }

    /// The nine rows in display order, row `I` first. This is the dump a
    /// rendering collaborator consumes; the orientation matches
    /// [`Board::from_rows`].
    pub fn rows(&self) -> [&[Marble]; 9] {
        std::array::from_fn(|i| &self.cells[space::row_span(8 - i)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Space::*;

    #[test]
    fn test_empty_board() {
        let board = Board::empty();
        assert_eq!(board.score(), (0, 0));
        assert_eq!(board.hash(), 0);
        for space in Space::all() {
            assert_eq!(board.get(space), Marble::Blank);
        }
    }

    #[test]
    fn test_set_get_roundtrip() {
        let mut board = Board::empty();
        board.set(E5, Marble::Black);
        board.set(A1, Marble::White);
        assert_eq!(board.get(E5), Marble::Black);
        assert_eq!(board.get(A1), Marble::White);
        assert_eq!(board.score(), (1, 1));
    }

    #[test]
    fn test_hash_tracks_contents() {
        let mut board = Board::empty();
        board.set(E5, Marble::Black);
        let with_black = board.hash();
        assert_ne!(with_black, 0);

        board.set(E5, Marble::White);
        assert_ne!(board.hash(), with_black);

        board.set(E5, Marble::Black);
        assert_eq!(board.hash(), with_black);

        board.set(E5, Marble::Blank);
        assert_eq!(board.hash(), 0);
    }

    #[test]
    fn test_hash_distinguishes_cells() {
        let mut a = Board::empty();
        let mut b = Board::empty();
        a.set(E5, Marble::Black);
        b.set(E6, Marble::Black);
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn test_count_neighbors() {
        let mut board = Board::empty();
        board.set(E5, Marble::Black);
        board.set(E6, Marble::Black);
        board.set(F5, Marble::White);
        assert_eq!(board.count_neighbors(E5), (1, 1));
        assert_eq!(board.count_neighbors(E6), (1, 0));
        assert_eq!(board.count_neighbors(F5), (0, 1));
    }

    #[test]
    fn test_count_neighbors_at_rim() {
        let mut board = Board::empty();
        board.set(A1, Marble::Black);
        board.set(B2, Marble::White);
        assert_eq!(board.count_neighbors(A1), (0, 1));
    }

    #[test]
    fn test_rows_shape_and_orientation() {
        let mut board = Board::empty();
        board.set(I5, Marble::White);
        board.set(A1, Marble::Black);
        let rows = board.rows();
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), ROW_LENGTHS[i]);
        }
        assert_eq!(rows[0][0], Marble::White); // I5 is top-left
        assert_eq!(rows[8][0], Marble::Black); // A1 is bottom-left
    }

    #[test]
    #[should_panic(expected = "Space::Off")]
    fn test_get_off_panics() {
        Board::empty().get(Off);
    }

    #[test]
    #[should_panic(expected = "Space::Off")]
    fn test_set_off_panics() {
        Board::empty().set(Off, Marble::Black);
    }
}
