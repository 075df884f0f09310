use serde::{Deserialize, Serialize};

use crate::game::tile::Tile;

/// One side's holding of drawn tiles for the active hand, in draw order.
/// Never exceeds 6 tiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    tiles: Vec<Tile>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand { tiles: Vec::new() }
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Hand {
        Hand { tiles }
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

    pub fn get(&self, index: usize) -> Option<Tile> {
        self.tiles.get(index).copied()
    }

    pub fn add(&mut self, tile: Tile) {
        debug_assert!(self.tiles.len() < 6, "a hand never holds more than 6 tiles");
        self.tiles.push(tile);
    }

    pub fn remove(&mut self, index: usize) -> Option<Tile> {
        if index < self.tiles.len() {
            Some(self.tiles.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    /// Sum of pips across all held tiles; the leftover penalty at hand end.
    pub fn total_pips(&self) -> u32 {
        self.tiles.iter().map(|t| t.total_pips() as u32).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tile::Color;

    fn tile(l: u8, r: u8) -> Tile {
        Tile::new(Color::Black, l, r).unwrap()
    }

    #[test]
    fn test_hand_preserves_draw_order() {
        let mut hand = Hand::new();
        hand.add(tile(5, 6));
        hand.add(tile(0, 1));
        hand.add(tile(3, 3));
        assert_eq!(hand.tiles(), &[tile(5, 6), tile(0, 1), tile(3, 3)]);
        assert_eq!(hand.get(1), Some(tile(0, 1)));
    }

    #[test]
    fn test_remove_shifts_order() {
        let mut hand = Hand::from_tiles(vec![tile(1, 2), tile(3, 4), tile(5, 5)]);
        assert_eq!(hand.remove(1), Some(tile(3, 4)));
        assert_eq!(hand.tiles(), &[tile(1, 2), tile(5, 5)]);
        assert_eq!(hand.remove(5), None, "Out-of-range removal is a no-op.");
    }

    #[test]
    fn test_total_pips() {
        let hand = Hand::from_tiles(vec![tile(2, 3), tile(1, 2)]);
        assert_eq!(hand.total_pips(), 8);
        assert_eq!(Hand::new().total_pips(), 0);
    }
}
