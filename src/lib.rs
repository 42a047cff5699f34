//! Abalone rules engine core
//!
//! This crate provides the game core for Abalone:
//! - Board geometry (the 61-cell hexagon, six directions, line queries)
//! - Board state with an incrementally maintained position hash
//! - The two move kinds (inline and broadside) with reversible application
//! - Legal move generation for the player in turn
//! - Position evaluation with a per-session memo table
//!
//! Search algorithms, UIs and environment wrappers are consumers of this
//! crate rather than part of it: they drive [`Game::legal_moves`],
//! [`Game::apply`], [`Game::undo`] and [`Game::evaluate`].

pub mod board;
pub mod eval;
pub mod game;
pub mod ruleset;
pub mod space;

// Re-exports for convenient access
pub use board::{Board, Marble, Player};
pub use eval::{winner, Heuristics, LOSING_MARBLE_COUNT, MATERIAL_WEIGHT};
pub use game::{Game, IllegalMove, Move, Undo};
pub use ruleset::InitialPosition;
pub use space::{line_from_to, line_to_edge, Direction, Space};
