//! Which tile may move next.
//!
//! Tiles 1..=3 take turns in order. Before each expansion the cursor skips
//! over tiles already sitting in their goal cell (at most once per tile), and
//! after each expansion it moves on unconditionally. The two steps compound,
//! so a tile's turn can be skipped or repeated depending on placement.

use crate::{Grid, TURN_TILES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnTracker {
    tile: u8,
}

impl Default for TurnTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnTracker {
    pub fn new() -> Self {
        Self { tile: 1 }
    }

    /// The tile allowed to move.
    pub fn active(&self) -> u8 {
        self.tile
    }

    /// Step past placed tiles, checking at most [`TURN_TILES`] times.
    pub fn skip_placed(&mut self, grid: &Grid, goal: &Grid) {
        for _ in 0..TURN_TILES {
            if grid.is_tile_placed(goal, self.tile) {
                self.advance();
            }
        }
    }

    pub fn advance(&mut self) {
        self.tile = self.tile % TURN_TILES + 1;
    }
}
