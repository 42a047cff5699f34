//! Board geometry: spaces, directions and straight-line queries
//!
//! The board is a hexagon of 61 cells in nine rows, `A` (bottom, 5 cells)
//! through `I` (top, 5 cells), with columns numbered `1`..`9`. Rows above the
//! middle do not start at column 1, so only the listed variants are valid
//! coordinates.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// First valid column of each row, row 0 = `A` through row 8 = `I`.
const FIRST_COL: [u8; 9] = [1, 1, 1, 1, 1, 2, 3, 4, 5];

/// Last valid column of each row.
const LAST_COL: [u8; 9] = [5, 6, 7, 8, 9, 9, 9, 9, 9];

/// Flat index of the first cell of each row.
const ROW_BASE: [u8; 9] = [0, 5, 11, 18, 26, 35, 43, 50, 56];

/// One cell of the board, or the `Off` sentinel for everything beyond the
/// rim (where pushed marbles go, and what [`Space::neighbor`] returns past
/// the edge).
///
/// Cells are declared in scan order, row `A` first, so the discriminant
/// doubles as a flat storage index.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Space {
    A1, A2, A3, A4, A5,
    B1, B2, B3, B4, B5, B6,
    C1, C2, C3, C4, C5, C6, C7,
    D1, D2, D3, D4, D5, D6, D7, D8,
    E1, E2, E3, E4, E5, E6, E7, E8, E9,
    F2, F3, F4, F5, F6, F7, F8, F9,
    G3, G4, G5, G6, G7, G8, G9,
    H4, H5, H6, H7, H8, H9,
    I5, I6, I7, I8, I9,
    /// Off the board.
    Off,
}

/// Every cell in scan order, used for iteration and index conversion.
const ALL: [Space; 61] = {
    use Space::*;
    [
        A1, A2, A3, A4, A5,
        B1, B2, B3, B4, B5, B6,
        C1, C2, C3, C4, C5, C6, C7,
        D1, D2, D3, D4, D5, D6, D7, D8,
        E1, E2, E3, E4, E5, E6, E7, E8, E9,
        F2, F3, F4, F5, F6, F7, F8, F9,
        G3, G4, G5, G6, G7, G8, G9,
        H4, H5, H6, H7, H8, H9,
        I5, I6, I7, I8, I9,
    ]
};

impl Space {
    /// The middle cell, reference point for centrality measures.
    pub const CENTER: Space = Space::E5;

    /// Iterate every on-board cell in scan order (`A1` through `I9`).
    pub fn all() -> impl Iterator<Item = Space> {
        ALL.into_iter()
    }

    /// Flat storage index in scan order. Only valid for on-board cells.
    pub fn index(self) -> usize {
        debug_assert!(self != Space::Off, "Space::Off has no storage index");
        self as usize
    }

    pub(crate) fn from_index(index: usize) -> Space {
        ALL[index]
    }

    /// The cell at `(row, col)` with row 0 = `A`, or `Off` if no such cell
    /// exists.
    pub fn from_coords(row: i8, col: i8) -> Space {
        if !(0..=8).contains(&row) {
            return Space::Off;
        }
        let r = row as usize;
        if col < FIRST_COL[r] as i8 || col > LAST_COL[r] as i8 {
            return Space::Off;
        }
        Space::from_index(ROW_BASE[r] as usize + (col - FIRST_COL[r] as i8) as usize)
    }

    /// Row index, 0 = `A` through 8 = `I`.
    pub fn row(self) -> u8 {
        let index = self.index() as u8;
        let mut row = 8;
        while ROW_BASE[row as usize] > index {
            row -= 1;
        }
        row
    }

    /// Column number, 1 through 9.
    pub fn col(self) -> u8 {
        let row = self.row() as usize;
        self.index() as u8 - ROW_BASE[row] + FIRST_COL[row]
    }

    /// The adjacent cell in `direction`, or `Off` past the rim. Total:
    /// `Off.neighbor(d)` is `Off` for every direction.
    pub fn neighbor(self, direction: Direction) -> Space {
        if self == Space::Off {
            return Space::Off;
        }
        neighbor_table()[self.index()][direction as usize]
    }

    /// Hex-grid distance between two on-board cells.
    pub fn distance_to(self, other: Space) -> u8 {
        assert!(
            self != Space::Off && other != Space::Off,
            "distance is only defined between on-board spaces"
        );
        let dr = other.row() as i16 - self.row() as i16;
        let dc = other.col() as i16 - self.col() as i16;
        (((dc - dr).abs() + dr.abs() + dc.abs()) / 2) as u8
    }

    /// Distance to the middle cell `E5`.
    pub fn distance_to_center(self) -> u8 {
        self.distance_to(Space::CENTER)
    }
}

/// The six directions of marble movement.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    NorthEast,
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    /// Coordinate step `(Δrow, Δcol)` with row `A` at the bottom.
    fn step(self) -> (i8, i8) {
        match self {
            Direction::NorthEast => (1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (-1, 0),
            Direction::SouthWest => (-1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (1, 0),
        }
    }
}

/// Adjacency of all 61 cells in all six directions, built once from the
/// coordinate step rule. This is the hottest lookup in move generation.
static NEIGHBORS: OnceLock<[[Space; 6]; 61]> = OnceLock::new();

fn neighbor_table() -> &'static [[Space; 6]; 61] {
    NEIGHBORS.get_or_init(|| {
        let mut table = [[Space::Off; 6]; 61];
        for space in Space::all() {
            let (row, col) = (space.row() as i8, space.col() as i8);
            for direction in Direction::ALL {
                let (dr, dc) = direction.step();
                table[space.index()][direction as usize] = Space::from_coords(row + dr, col + dc);
            }
        }
        table
    })
}

/// Flat-index range of a row's cells, row 0 = `A`.
pub(crate) fn row_span(row: usize) -> std::ops::Range<usize> {
    let len = (LAST_COL[row] - FIRST_COL[row] + 1) as usize;
    ROW_BASE[row] as usize..ROW_BASE[row] as usize + len
}

/// The straight path from `from` (inclusive) to the rim in `direction`,
/// excluding `Off` itself.
///
/// Panics if `from` is `Off`; that is a caller bug, not a game state.
pub fn line_to_edge(from: Space, direction: Direction) -> Vec<Space> {
    assert!(from != Space::Off, "line_to_edge called with Space::Off");
    let mut line = Vec::with_capacity(9);
    let mut cursor = from;
    while cursor != Space::Off {
        line.push(cursor);
        cursor = cursor.neighbor(direction);
    }
    line
}

/// The inclusive straight path from `from` to `to` and its direction, or
/// `None` when the two cells are identical or share no straight line.
///
/// Panics if either endpoint is `Off`.
pub fn line_from_to(from: Space, to: Space) -> Option<(Vec<Space>, Direction)> {
    assert!(
        from != Space::Off && to != Space::Off,
        "line_from_to called with Space::Off"
    );
    if from == to {
        return None;
    }
    for direction in Direction::ALL {
        let mut line = vec![from];
        let mut cursor = from.neighbor(direction);
        while cursor != Space::Off {
            line.push(cursor);
            if cursor == to {
                return Some((line, direction));
            }
            cursor = cursor.neighbor(direction);
        }
    }
    None
}
