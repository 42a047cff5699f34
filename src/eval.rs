//! Position evaluation: weights, terminal detection, positional adjustment

use crate::board::Player;
use crate::game::{Game, MarbleLine};
use crate::space::Space;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Value of one marble of material advantage. Large enough that no
/// positional adjustment ever outweighs a capture.
pub const MATERIAL_WEIGHT: f32 = 150.0;

/// A player reduced to this many marbles (of the starting 14) has lost.
pub const LOSING_MARBLE_COUNT: u8 = 8;

/// Heuristic weights for the positional adjustment. There are no hidden
/// defaults: every session states its weights.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Heuristics {
    /// Reward per three-marble run.
    pub threes: f32,
    /// Penalty per marble with no friendly neighbor and at least one enemy
    /// neighbor.
    pub isolated: f32,
    /// Penalty on the mean distance of a color's marbles from the center.
    pub center_distance: f32,
}

impl Heuristics {
    /// Load weights from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Heuristics> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save weights to a JSON file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// The winner by marble count, or `None` while the game is running.
pub fn winner(score: (u8, u8)) -> Option<Player> {
    if score.0 == LOSING_MARBLE_COUNT {
        Some(Player::White)
    } else if score.1 == LOSING_MARBLE_COUNT {
        Some(Player::Black)
    } else {
        None
    }
}

/// Positional adjustment for one color, before the black-minus-white
/// difference is taken. Memoized per position by [`Game::evaluate`].
pub(crate) fn adjustment(game: &Game, player: Player) -> f32 {
    let weights = game.heuristics();
    let threes = count_threes(game, player) as f32;
    let isolated = count_isolated(game, player) as f32;
    let center = mean_center_distance(game, player);
    threes * weights.threes - isolated * weights.isolated - center * weights.center_distance
}

/// Runs of three: boundary pairs of the marble scan whose ends sit two
/// cells apart.
fn count_threes(game: &Game, player: Player) -> usize {
    let mut count = 0;
    for line in game.marble_lines(player) {
        if let MarbleLine::Pair(first, last) = line {
            if first.distance_to(last) == 2 {
                count += 1;
            }
        }
    }
    count
}

fn count_isolated(game: &Game, player: Player) -> usize {
    let own = player.marble();
    let mut count = 0;
    for space in Space::all() {
        if game.board().get(space) != own {
            continue;
        }
        let (friendly, enemy) = game.board().count_neighbors(space);
        if friendly == 0 && enemy >= 1 {
            count += 1;
        }
    }
    count
}

fn mean_center_distance(game: &Game, player: Player) -> f32 {
    let own = player.marble();
    let mut marbles = 0u32;
    let mut total = 0u32;
    for space in Space::all() {
        if game.board().get(space) != own {
            continue;
        }
        marbles += 1;
        total += space.distance_to_center() as u32;
    }
    if marbles == 0 {
        // A color with no marbles left means the game ended long ago.
        return 0.0;
    }
    total as f32 / marbles as f32
}
