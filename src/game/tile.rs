use serde::{Deserialize, Serialize};

/// Owning color of a tile or side. Black belongs to the Human, White to the
/// Computer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn letter(self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }

    pub fn from_letter(c: char) -> Option<Color> {
        match c {
            'B' => Some(Color::Black),
            'W' => Some(Color::White),
            _ => None,
        }
    }

    pub fn opposite(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

/// Immutable tile value: a color and two pip counts in 0..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    color: Color,
    left_pips: u8,
    right_pips: u8,
}

impl Tile {
    /// Pip values outside 0..=6 are not representable in the game; `None`
    /// for out-of-range input.
    pub fn new(color: Color, left_pips: u8, right_pips: u8) -> Option<Tile> {
        if left_pips > 6 || right_pips > 6 {
            return None;
        }
        Some(Tile {
            color,
            left_pips,
            right_pips,
        })
    }

    pub fn color(self) -> Color {
        self.color
    }

    pub fn left_pips(self) -> u8 {
        self.left_pips
    }

    pub fn right_pips(self) -> u8 {
        self.right_pips
    }

    pub fn is_double(self) -> bool {
        self.left_pips == self.right_pips
    }

    pub fn total_pips(self) -> u8 {
        self.left_pips + self.right_pips
    }

    /// The 3-character token form used by the save codec and the input
    /// boundary, e.g. `B34`.
    pub fn token(self) -> String {
        format!("{}{}{}", self.color.letter(), self.left_pips, self.right_pips)
    }

    /// Strict parse of the token form: exactly 3 characters, a `B`/`W`
    /// color letter, then two pip digits each in 0..=6.
    pub fn from_token(token: &str) -> Option<Tile> {
        let mut chars = token.chars();
        let (c, l, r) = (chars.next()?, chars.next()?, chars.next()?);
        if chars.next().is_some() {
            return None;
        }
        let color = Color::from_letter(c)?;
        let left = l.to_digit(10)? as u8;
        let right = r.to_digit(10)? as u8;
        Tile::new(color, left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_derived_values() {
        let tile = Tile::new(Color::Black, 3, 4).unwrap();
        assert_eq!(tile.total_pips(), 7, "A B34 tile should total 7 pips.");
        assert!(!tile.is_double(), "B34 is not a double.");

        let double = Tile::new(Color::White, 5, 5).unwrap();
        assert!(double.is_double(), "W55 should be a double.");
        assert_eq!(double.total_pips(), 10);
    }

    #[test]
    fn test_tile_rejects_out_of_range_pips() {
        assert!(Tile::new(Color::Black, 7, 0).is_none());
        assert!(Tile::new(Color::White, 0, 9).is_none());
    }

    #[test]
    fn test_token_round_trip() {
        let tile = Tile::new(Color::White, 0, 6).unwrap();
        assert_eq!(tile.token(), "W06");
        assert_eq!(
            Tile::from_token("W06"),
            Some(tile),
            "Token form should parse back to the same tile."
        );
    }

    #[test]
    fn test_from_token_rejects_corruption() {
        assert!(Tile::from_token("B78").is_none(), "Pip 7/8 is out of range.");
        assert!(Tile::from_token("X34").is_none(), "Color must be B or W.");
        assert!(Tile::from_token("B3").is_none(), "Token must be 3 chars.");
        assert!(Tile::from_token("B345").is_none(), "Token must be 3 chars.");
        assert!(Tile::from_token("3B4").is_none());
        assert!(Tile::from_token("").is_none());
    }
}
