use serde::{Deserialize, Serialize};

use crate::game::tile::{Color, Tile};

/// Identity of one of the 12 stacks: the side whose row it belongs to and a
/// 1-based index within that row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackId {
    pub side: Color,
    pub index: u8,
}

impl StackId {
    pub fn new(side: Color, index: u8) -> Option<StackId> {
        if (1..=6).contains(&index) {
            Some(StackId { side, index })
        } else {
            None
        }
    }

    /// Boundary form, e.g. `W5`. Kept only for the save codec and external
    /// input; the engine works with the structured pair.
    pub fn label(self) -> String {
        format!("{}{}", self.side.letter(), self.index)
    }

    pub fn parse(label: &str) -> Option<StackId> {
        let mut chars = label.chars();
        let (c, d) = (chars.next()?, chars.next()?);
        if chars.next().is_some() {
            return None;
        }
        StackId::new(Color::from_letter(c)?, d.to_digit(10)? as u8)
    }

    /// All 12 stack identities in enumeration order: `first` side 1..=6,
    /// then the other side 1..=6. The advisor's tie-breaks depend on this
    /// order.
    pub fn enumerate_from(first: Color) -> impl Iterator<Item = StackId> {
        (1..=6)
            .map(move |i| StackId { side: first, index: i })
            .chain((1..=6).map(move |i| StackId {
                side: first.opposite(),
                index: i,
            }))
    }
}

/// The six stack tops of one side's row. Each slot always holds exactly one
/// tile once a round has started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackRow {
    tops: [Tile; 6],
}

impl StackRow {
    pub fn new(tops: [Tile; 6]) -> StackRow {
        StackRow { tops }
    }

    pub fn top(&self, index: u8) -> Tile {
        self.tops[(index - 1) as usize]
    }

    pub fn replace_top(&mut self, index: u8, tile: Tile) {
        self.tops[(index - 1) as usize] = tile;
    }

    pub fn tops(&self) -> &[Tile; 6] {
        &self.tops
    }

    /// How many of the six tops currently belong to `color`.
    pub fn topped_by(&self, color: Color) -> usize {
        self.tops.iter().filter(|t| t.color() == color).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_id_label_round_trip() {
        let id = StackId::new(Color::White, 5).unwrap();
        assert_eq!(id.label(), "W5");
        assert_eq!(StackId::parse("W5"), Some(id));
    }

    #[test]
    fn test_stack_id_rejects_bad_labels() {
        assert!(StackId::parse("W0").is_none(), "Index must be 1..=6.");
        assert!(StackId::parse("W7").is_none(), "Index must be 1..=6.");
        assert!(StackId::parse("Q3").is_none(), "Side must be B or W.");
        assert!(StackId::parse("W55").is_none(), "Label is exactly 2 chars.");
        assert!(StackId::new(Color::Black, 0).is_none());
    }

    #[test]
    fn test_enumeration_order_is_acting_side_first() {
        let order: Vec<StackId> = StackId::enumerate_from(Color::White).collect();
        assert_eq!(order.len(), 12);
        assert_eq!(order[0], StackId::new(Color::White, 1).unwrap());
        assert_eq!(order[5], StackId::new(Color::White, 6).unwrap());
        assert_eq!(order[6], StackId::new(Color::Black, 1).unwrap());
        assert_eq!(order[11], StackId::new(Color::Black, 6).unwrap());
    }

    #[test]
    fn test_replace_top() {
        let base = Tile::new(Color::Black, 1, 2).unwrap();
        let mut row = StackRow::new([base; 6]);
        let incoming = Tile::new(Color::White, 6, 6).unwrap();
        row.replace_top(3, incoming);
        assert_eq!(row.top(3), incoming);
        assert_eq!(row.topped_by(Color::White), 1);
        assert_eq!(row.topped_by(Color::Black), 5);
    }
}
