use crate::game::hand::Hand;
use crate::game::stack::{StackId, StackRow};
use crate::game::tile::{Color, Tile};

/// Whether `tile` may replace a stack whose current top is `top`. The rule
/// ignores stack color entirely:
/// - a non-double replaces any top with total pips <= its own (ties allowed)
/// - a double replaces any non-double top, and a double top only with
///   strictly more pips
pub fn may_replace(tile: Tile, top: Tile) -> bool {
    if !tile.is_double() {
        tile.total_pips() >= top.total_pips()
    } else if !top.is_double() {
        true
    } else {
        tile.total_pips() > top.total_pips()
    }
}

/// All stacks `tile` may legally replace, enumerated acting side 1..=6 then
/// opposite side 1..=6. Pure function of its inputs.
pub fn legal_stacks(
    tile: Tile,
    acting_side: Color,
    own: &StackRow,
    other: &StackRow,
) -> Vec<StackId> {
    let mut stacks = Vec::new();
    for index in 1..=6u8 {
        if may_replace(tile, own.top(index)) {
            stacks.push(StackId { side: acting_side, index });
        }
    }
    for index in 1..=6u8 {
        if may_replace(tile, other.top(index)) {
            stacks.push(StackId {
                side: acting_side.opposite(),
                index,
            });
        }
    }
    stacks
}

/// True iff any tile in `hand` has at least one legal destination on either
/// row. An empty hand can never place.
pub fn can_place(hand: &Hand, own: &StackRow, other: &StackRow) -> bool {
    hand.tiles().iter().any(|&tile| {
        own.tops().iter().chain(other.tops().iter()).any(|&top| may_replace(tile, top))
    })
}
