use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::tile::{Color, Tile};

/// One color's pool of undrawn tiles. Starts at 28 (all (i, j) with
/// 0 <= i <= j <= 6) and only ever shrinks; drawing takes from the back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boneyard {
    tiles: Vec<Tile>,
}

impl Boneyard {
    /// The full 28-tile set for one color, in (i, j) order. Callers shuffle
    /// before dealing.
    pub fn full(color: Color) -> Boneyard {
        let mut tiles = Vec::with_capacity(28);
        for i in 0..=6u8 {
            for j in i..=6 {
                // Pips are in range by construction.
                tiles.push(Tile::new(color, i, j).unwrap());
            }
        }
        Boneyard { tiles }
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Boneyard {
        Boneyard { tiles }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.tiles.shuffle(rng);
    }

    /// Next tile that `draw` would remove, without removing it. Used by the
    /// sudden-death draw-off, which only commits the draw on a strict win.
    pub fn peek_next(&self) -> Option<Tile> {
        self.tiles.last().copied()
    }

    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }
}
