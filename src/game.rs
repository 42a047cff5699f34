//! Game session, the two move kinds, and legal move generation

use crate::board::{Board, Marble, Player};
use crate::eval::{self, winner, Heuristics, MATERIAL_WEIGHT};
use crate::ruleset::InitialPosition;
use crate::space::{line_from_to, line_to_edge, Direction, Space};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// CONSTANTS
// ============================================================================

/// The three axes scanned when collecting marble runs. One direction per
/// axis keeps every run from being found twice.
const LINE_AXES: [Direction; 3] = [
    Direction::NorthWest,
    Direction::NorthEast,
    Direction::East,
];

/// Longest line of own marbles that may move together.
const MAX_LINE: usize = 3;

// ============================================================================
// MOVES
// ============================================================================

/// A move for the player in turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Move a line of up to three own marbles one step along its own axis,
    /// named by the trailing marble ("caboose"). The only move kind that
    /// can push opponent marbles.
    Inline { caboose: Space, direction: Direction },
    /// Shift a line of two or three own marbles sideways into empty cells,
    /// named by its two outermost marbles.
    Broadside {
        first: Space,
        last: Space,
        direction: Direction,
    },
}

/// Why [`Game::apply`] rejected a move. Recoverable: pick another move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("only own marbles may be moved")]
    NotOwnMarble,
    #[error("only lines of up to three marbles may be moved")]
    LineTooLong,
    #[error("own marbles must not be moved off the board")]
    WouldFallOff,
    #[error("only lines that are shorter than the player's line can be pushed")]
    SumitoOutnumbered,
    #[error("marbles must be pushed to an empty space or off the board")]
    PushBlocked,
    #[error("only two or three neighboring marbles may be moved with a broadside move")]
    InvalidBroadsideLine,
    #[error("broadside boundaries must be on the board")]
    OffBoardBoundary,
    #[error("the direction of a broadside move must be sideways")]
    NotSideways,
    #[error("with a broadside move, marbles can only be moved to empty spaces")]
    DestinationNotEmpty,
}

/// Reversal record for one applied move: the prior contents of every cell
/// the move touched, plus the position hash before it. Consumed by
/// [`Game::undo`], so a record can never be replayed.
#[derive(Debug)]
pub struct Undo {
    cells: Vec<(Space, Marble)>,
    hash: u64,
}

/// Resolved effect of a legal inline move.
struct InlinePush {
    /// The cell just past the mover's run, filled with the mover's marble.
    advance: Space,
    /// Where the displaced opponent marble lands, if the push stays on the
    /// board.
    push_to: Option<Space>,
}

/// A run of own marbles as yielded by the board scan: a lone marble, or the
/// two outermost cells of a run of two or three.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MarbleLine {
    Single(Space),
    Pair(Space, Space),
}

// ============================================================================
// GAME SESSION
// ============================================================================

/// The mutable state of one Abalone game: board, player in turn, and the
/// per-session evaluation memo table.
///
/// Exactly one caller may mutate a `Game` at a time; parallel search must
/// clone per worker, since apply/undo rewrite board cells in place.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: Player,
    heuristics: Heuristics,
    heuristic_table: FxHashMap<u64, f32>,
}

impl Game {
    /// Start a game from a named arrangement; black opens.
    pub fn new(initial: InitialPosition, heuristics: Heuristics) -> Game {
        Game::with_first_turn(initial, heuristics, Player::Black)
    }

    /// Start a game with an explicit opening player.
    pub fn with_first_turn(
        initial: InitialPosition,
        heuristics: Heuristics,
        first_turn: Player,
    ) -> Game {
        Game {
            board: initial.board(),
            turn: first_turn,
            heuristics,
            heuristic_table: FxHashMap::default(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player whose turn it is.
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn heuristics(&self) -> &Heuristics {
        &self.heuristics
    }

    /// Marble counts, black then white.
    pub fn score(&self) -> (u8, u8) {
        self.board.score()
    }

    pub fn get_marble(&self, space: Space) -> Marble {
        self.board.get(space)
    }

    /// Edit one cell directly, e.g. to set up a position. The position hash
    /// stays consistent.
    pub fn set_marble(&mut self, space: Space, marble: Marble) {
        self.board.set(space, marble);
    }

    /// The memoized adjustment table, keyed by position hash. Exposed so an
    /// integrator can persist it across processes; the core never touches
    /// disk.
    pub fn heuristic_table(&self) -> &FxHashMap<u64, f32> {
        &self.heuristic_table
    }

    /// Reseed the memo table, e.g. from a previously persisted copy.
    pub fn set_heuristic_table(&mut self, table: FxHashMap<u64, f32>) {
        self.heuristic_table = table;
    }

    /// Whether either player has been reduced to eight marbles.
    pub fn is_over(&self) -> bool {
        winner(self.board.score()).is_some()
    }

    // ========================================================================
    // APPLY / UNDO
    // ========================================================================

    /// Validate a move without touching the board.
    pub fn check(&self, mv: Move) -> Result<(), IllegalMove> {
        match mv {
            Move::Inline { caboose, direction } => {
                self.check_inline(caboose, direction).map(|_| ())
            }
            Move::Broadside {
                first,
                last,
                direction,
            } => self.check_broadside(first, last, direction).map(|_| ()),
        }
    }

    /// Apply a move for the player in turn. Legality is checked in full
    /// before the first cell is written, so a rejected move leaves the board
    /// untouched. On success the turn passes to the opponent and the
    /// returned [`Undo`] reverses the move.
    ///
    /// Undo records must be consumed in reverse order of application.
    pub fn apply(&mut self, mv: Move) -> Result<Undo, IllegalMove> {
        let mut undo = Undo {
            cells: Vec::with_capacity(6),
            hash: self.board.hash(),
        };
        match mv {
            Move::Inline { caboose, direction } => {
                let push = self.check_inline(caboose, direction)?;
                if let Some(target) = push.push_to {
                    self.write(&mut undo, target, self.turn.opponent().marble());
                }
                self.write(&mut undo, push.advance, self.turn.marble());
                self.write(&mut undo, caboose, Marble::Blank);
            }
            Move::Broadside {
                first,
                last,
                direction,
            } => {
                let marbles = self.check_broadside(first, last, direction)?;
                for &marble in &marbles {
                    self.write(&mut undo, marble, Marble::Blank);
                    self.write(&mut undo, marble.neighbor(direction), self.turn.marble());
                }
            }
        }
        self.turn = self.turn.opponent();
        Ok(undo)
    }

    /// Revert the most recently applied move: logged cells are restored in
    /// reverse, the prior hash is reinstated and the turn passes back.
    pub fn undo(&mut self, undo: Undo) {
        for &(space, marble) in undo.cells.iter().rev() {
            self.board.set(space, marble);
        }
        debug_assert_eq!(self.board.hash(), undo.hash);
        self.board.restore_hash(undo.hash);
        self.turn = self.turn.opponent();
    }

    fn write(&mut self, undo: &mut Undo, space: Space, marble: Marble) {
        undo.cells.push((space, self.board.get(space)));
        self.board.set(space, marble);
    }

    // ========================================================================
    // LEGALITY
    // ========================================================================

    /// Lengths of the leading run of own marbles and the opponent run
    /// directly behind it, over a straight line of cells.
    fn line_run_lengths(&self, line: &[Space]) -> (usize, usize) {
        let own = self.turn.marble();
        let opp = self.turn.opponent().marble();
        let own_n = line
            .iter()
            .take_while(|&&space| self.board.get(space) == own)
            .count();
        let opp_n = line[own_n..]
            .iter()
            .take_while(|&&space| self.board.get(space) == opp)
            .count();
        (own_n, opp_n)
    }

    fn check_inline(
        &self,
        caboose: Space,
        direction: Direction,
    ) -> Result<InlinePush, IllegalMove> {
        if self.board.get(caboose) != self.turn.marble() {
            return Err(IllegalMove::NotOwnMarble);
        }
        let line = line_to_edge(caboose, direction);
        let (own_n, opp_n) = self.line_run_lengths(&line);
        if own_n > MAX_LINE {
            return Err(IllegalMove::LineTooLong);
        }
        if own_n == line.len() {
            return Err(IllegalMove::WouldFallOff);
        }
        let mut push_to = None;
        if opp_n > 0 {
            // sumito: the pushed line must be strictly shorter
            if opp_n >= own_n {
                return Err(IllegalMove::SumitoOutnumbered);
            }
            let target = line[own_n + opp_n - 1].neighbor(direction);
            if target != Space::Off {
                if self.board.get(target) == self.turn.marble() {
                    return Err(IllegalMove::PushBlocked);
                }
                push_to = Some(target);
            }
        }
        Ok(InlinePush {
            advance: line[own_n],
            push_to,
        })
    }

    fn check_broadside(
        &self,
        first: Space,
        last: Space,
        direction: Direction,
    ) -> Result<Vec<Space>, IllegalMove> {
        if first == Space::Off || last == Space::Off {
            return Err(IllegalMove::OffBoardBoundary);
        }
        let Some((marbles, axis)) = line_from_to(first, last) else {
            return Err(IllegalMove::InvalidBroadsideLine);
        };
        if marbles.len() < 2 || marbles.len() > MAX_LINE {
            return Err(IllegalMove::InvalidBroadsideLine);
        }
        if direction == axis || direction == axis.opposite() {
            return Err(IllegalMove::NotSideways);
        }
        for &marble in &marbles {
            if self.board.get(marble) != self.turn.marble() {
                return Err(IllegalMove::NotOwnMarble);
            }
            let destination = marble.neighbor(direction);
            if destination == Space::Off || self.board.get(destination) != Marble::Blank {
                return Err(IllegalMove::DestinationNotEmpty);
            }
        }
        Ok(marbles)
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Every run of one to three of `player`'s marbles, in board scan
    /// order. Shared by move generation and the "threes" evaluation term.
    pub(crate) fn marble_lines(&self, player: Player) -> Vec<MarbleLine> {
        let own = player.marble();
        let mut lines = Vec::new();
        for space in Space::all() {
            if self.board.get(space) != own {
                continue;
            }
            lines.push(MarbleLine::Single(space));
            for axis in LINE_AXES {
                let second = space.neighbor(axis);
                if second == Space::Off || self.board.get(second) != own {
                    continue;
                }
                lines.push(MarbleLine::Pair(space, second));
                let third = second.neighbor(axis);
                if third != Space::Off && self.board.get(third) == own {
                    lines.push(MarbleLine::Pair(space, third));
                }
            }
        }
        lines
    }

    /// All legal moves for the player in turn. The order is deterministic
    /// (board scan order crossed with direction order) but carries no
    /// quality information; recompute after every position change.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for line in self.marble_lines(self.turn) {
            for direction in Direction::ALL {
                let mv = match line {
                    MarbleLine::Single(caboose) => Move::Inline { caboose, direction },
                    MarbleLine::Pair(first, last) => Move::Broadside {
                        first,
                        last,
                        direction,
                    },
                };
                if self.check(mv).is_ok() {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    // ========================================================================
    // EVALUATION
    // ========================================================================

    /// Heuristic value of the position from black's perspective. The
    /// material term is recomputed every call; the positional adjustment is
    /// memoized per position hash, so transpositions pay for it once.
    pub fn evaluate(&mut self) -> f32 {
        let (black, white) = self.board.score();
        let material = (black as f32 - white as f32) * MATERIAL_WEIGHT;
        let hash = self.board.hash();
        let adjustment = match self.heuristic_table.get(&hash) {
            Some(&cached) => cached,
            None => {
                let fresh =
                    eval::adjustment(self, Player::Black) - eval::adjustment(self, Player::White);
                self.heuristic_table.insert(hash, fresh);
                fresh
            }
        };
        material + adjustment
    }
}

// ============================================================================
// TESTS
// ============================================================================
