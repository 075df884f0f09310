use serde::{Deserialize, Serialize};

use crate::game::boneyard::Boneyard;
use crate::game::hand::Hand;
use crate::game::stack::StackRow;
use crate::game::tile::Color;

/// One side of the contest. Both sides are structurally identical; what
/// differs between the human and the computer is the selection strategy
/// driving them, not the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub color: Color,
    pub hand: Hand,
    pub stacks: StackRow,
    pub boneyard: Boneyard,
    pub score: i32,
}

impl Player {
    pub fn new(color: Color, stacks: StackRow, boneyard: Boneyard) -> Player {
        Player {
            color,
            hand: Hand::new(),
            stacks,
            boneyard,
            score: 0,
        }
    }
}
