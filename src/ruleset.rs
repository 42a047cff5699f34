//! Named starting arrangements

use crate::board::{Board, Marble};
use serde::{Deserialize, Serialize};

const B: Marble = Marble::Black;
const W: Marble = Marble::White;
const E: Marble = Marble::Blank;

/// Standard tournament setup: white fills the top two rows plus the middle
/// of row `G`, black mirrors at the bottom.
///
/// ```text
///     I O O O O O
///    H O O O O O O
///   G + + O O O + +
///  F + + + + + + + +
/// E + + + + + + + + +
///  D + + + + + + + +
///   C + + @ @ @ + +
///    B @ @ @ @ @ @
///     A @ @ @ @ @
/// ```
const DEFAULT: [&[Marble]; 9] = [
    &[W, W, W, W, W],
    &[W, W, W, W, W, W],
    &[E, E, W, W, W, E, E],
    &[E, E, E, E, E, E, E, E],
    &[E, E, E, E, E, E, E, E, E],
    &[E, E, E, E, E, E, E, E],
    &[E, E, B, B, B, E, E],
    &[B, B, B, B, B, B],
    &[B, B, B, B, B],
];

/// Two daisies per side, grown against the west and east edges.
const GERMAN_DAISY: [&[Marble]; 9] = [
    &[E, E, E, E, E],
    &[W, W, E, E, B, B],
    &[W, W, W, E, B, B, B],
    &[E, W, W, E, E, B, B, E],
    &[E, E, E, E, E, E, E, E, E],
    &[E, B, B, E, E, W, W, E],
    &[B, B, B, E, W, W, W],
    &[B, B, E, E, W, W],
    &[E, E, E, E, E],
];

/// Two daisies per side, packed into the north and south corners.
const BELGIAN_DAISY: [&[Marble]; 9] = [
    &[W, W, E, B, B],
    &[W, W, W, B, B, B],
    &[E, W, W, E, B, B, E],
    &[E, E, E, E, E, E, E, E],
    &[E, E, E, E, E, E, E, E, E],
    &[E, E, E, E, E, E, E, E],
    &[E, B, B, E, W, W, E],
    &[B, B, B, W, W, W],
    &[B, B, E, W, W],
];

/// The commonly played starting arrangements. Each gives both players 14
/// marbles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InitialPosition {
    Default,
    GermanDaisy,
    BelgianDaisy,
}

impl InitialPosition {
    /// Build the starting board for this arrangement.
    pub fn board(self) -> Board {
        match self {
            InitialPosition::Default => Board::from_rows(&DEFAULT),
            InitialPosition::GermanDaisy => Board::from_rows(&GERMAN_DAISY),
            InitialPosition::BelgianDaisy => Board::from_rows(&BELGIAN_DAISY),
        }
    }
}
