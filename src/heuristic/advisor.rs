//! Deterministic tile and stack recommendation.
//!
//! The same procedure drives the computer opponent and the human hint
//! facility: the caller passes its own hand and stacks as "acting" and the
//! true opponent's stacks as "opponent", and the procedure never knows which
//! role invoked it. Callers must check `can_place` first; invoking the
//! advisor with no legal placement anywhere is a caller bug.

use log::debug;
use serde::Serialize;

use crate::game::hand::Hand;
use crate::game::legality::legal_stacks;
use crate::game::stack::{StackId, StackRow};
use crate::game::tile::{Color, Tile};
use crate::{BuildUpError, Result};

/// Which branch of the procedure produced a recommendation. The numeric
/// code selects the canned explanation the display collaborator renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecisionCode {
    /// Disadvantaged: largest non-double aimed at an opponent-topped stack.
    ReclaimWithNonDouble,
    /// Disadvantaged: no non-double qualified, largest qualifying double.
    ReclaimWithDouble,
    /// Neutral/advantaged: shedding the smallest qualifying non-double.
    ShedNonDouble,
    /// Neutral/advantaged: no non-double qualified, smallest qualifying double.
    ShedDouble,
    /// No tile reaches an opponent-topped stack; smallest tile with any
    /// destination, aimed at the weakest reachable top.
    OwnStackFallback,
    /// Hint only: the already-chosen tile reaches an opponent-topped stack.
    ChosenTileOffensive,
    /// Hint only: the already-chosen tile reaches no opponent-topped stack.
    ChosenTileDefensive,
}

impl DecisionCode {
    pub fn code(self) -> u8 {
        match self {
            DecisionCode::ReclaimWithNonDouble => 0,
            DecisionCode::ReclaimWithDouble => 1,
            DecisionCode::ShedNonDouble => 2,
            DecisionCode::ShedDouble => 3,
            DecisionCode::OwnStackFallback => 4,
            DecisionCode::ChosenTileOffensive => 5,
            DecisionCode::ChosenTileDefensive => 6,
        }
    }
}

/// A complete recommendation: which tile (by hand index, absent for the
/// hint-on-chosen-tile entry point), which stack, and which branch decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub hand_index: Option<usize>,
    pub tile: Tile,
    pub stack: StackId,
    pub code: DecisionCode,
}

/// Full recommendation for a non-empty hand with at least one legal
/// placement somewhere.
pub fn recommend(
    hand: &Hand,
    acting_side: Color,
    acting: &StackRow,
    opponent: &StackRow,
) -> Result<Recommendation> {
    let opp = acting_side.opposite();
    let disadvantaged = acting.topped_by(opp) + opponent.topped_by(opp) > 6;

    let (hand_index, code) = if disadvantaged {
        select_extreme(hand, acting_side, acting, opponent, false, Extreme::Largest)
            .map(|i| (i, DecisionCode::ReclaimWithNonDouble))
            .or_else(|| {
                select_extreme(hand, acting_side, acting, opponent, true, Extreme::Largest)
                    .map(|i| (i, DecisionCode::ReclaimWithDouble))
            })
            .or_else(|| fallback(hand, acting_side, acting, opponent))
            .ok_or(BuildUpError::HeuristicPrecondition)?
    } else {
        select_extreme(hand, acting_side, acting, opponent, false, Extreme::Smallest)
            .map(|i| (i, DecisionCode::ShedNonDouble))
            .or_else(|| {
                select_extreme(hand, acting_side, acting, opponent, true, Extreme::Smallest)
                    .map(|i| (i, DecisionCode::ShedDouble))
            })
            .or_else(|| fallback(hand, acting_side, acting, opponent))
            .ok_or(BuildUpError::HeuristicPrecondition)?
    };

    let tile = hand.get(hand_index).ok_or(BuildUpError::HeuristicPrecondition)?;
    let stack = select_stack(tile, code, acting_side, acting, opponent)
        .ok_or(BuildUpError::HeuristicPrecondition)?;
    debug!(
        "advisor: {:?} -> tile {} on stack {} (code {})",
        code,
        tile.token(),
        stack.label(),
        code.code()
    );
    Ok(Recommendation {
        hand_index: Some(hand_index),
        tile,
        stack,
        code,
    })
}

/// Hint entry point for a tile the human has already picked: classify it as
/// offensive (reaches an opponent-topped stack) or defensive, then run the
/// stack selection for that code.
pub fn advise_placement(
    tile: Tile,
    acting_side: Color,
    acting: &StackRow,
    opponent: &StackRow,
) -> Result<Recommendation> {
    let code = if has_opponent_destination(tile, acting_side, acting, opponent) {
        DecisionCode::ChosenTileOffensive
    } else if !legal_stacks(tile, acting_side, acting, opponent).is_empty() {
        DecisionCode::ChosenTileDefensive
    } else {
        return Err(BuildUpError::HeuristicPrecondition);
    };
    let stack = select_stack(tile, code, acting_side, acting, opponent)
        .ok_or(BuildUpError::HeuristicPrecondition)?;
    Ok(Recommendation {
        hand_index: None,
        tile,
        stack,
        code,
    })
}

enum Extreme {
    Largest,
    Smallest,
}

/// The largest (or smallest) tile of the requested doubleness that reaches
/// an opponent-topped stack. Hand order breaks pip ties.
fn select_extreme(
    hand: &Hand,
    acting_side: Color,
    acting: &StackRow,
    opponent: &StackRow,
    doubles: bool,
    extreme: Extreme,
) -> Option<usize> {
    let mut best: Option<(usize, u8)> = None;
    for (i, &tile) in hand.tiles().iter().enumerate() {
        if tile.is_double() != doubles {
            continue;
        }
        if !has_opponent_destination(tile, acting_side, acting, opponent) {
            continue;
        }
        let pips = tile.total_pips();
        let better = match (&best, &extreme) {
            (None, _) => true,
            (Some((_, b)), Extreme::Largest) => pips > *b,
            (Some((_, b)), Extreme::Smallest) => pips < *b,
        };
        if better {
            best = Some((i, pips));
        }
    }
    best.map(|(i, _)| i)
}

/// Smallest tile with any legal destination at all, ties broken by hand
/// order. By construction the destination will be among the acting side's
/// own stacks.
fn fallback(
    hand: &Hand,
    acting_side: Color,
    acting: &StackRow,
    opponent: &StackRow,
) -> Option<(usize, DecisionCode)> {
    let mut best: Option<(usize, u8)> = None;
    for (i, &tile) in hand.tiles().iter().enumerate() {
        if legal_stacks(tile, acting_side, acting, opponent).is_empty() {
            continue;
        }
        let pips = tile.total_pips();
        if best.map_or(true, |(_, b)| pips < b) {
            best = Some((i, pips));
        }
    }
    best.map(|(i, _)| (i, DecisionCode::OwnStackFallback))
}

fn has_opponent_destination(
    tile: Tile,
    acting_side: Color,
    acting: &StackRow,
    opponent: &StackRow,
) -> bool {
    let opp = acting_side.opposite();
    legal_stacks(tile, acting_side, acting, opponent)
        .iter()
        .any(|&s| top_of(s, acting_side, acting, opponent).color() == opp)
}

fn top_of(stack: StackId, acting_side: Color, acting: &StackRow, opponent: &StackRow) -> Tile {
    if stack.side == acting_side {
        acting.top(stack.index)
    } else {
        opponent.top(stack.index)
    }
}

/// Stack selection for a chosen tile. Offensive codes hit the strongest
/// reachable opponent-topped stack; fallback codes cover the weakest
/// reachable top of any color. Enumeration runs acting side 1..=6 then
/// opponent side 1..=6, and the first extreme found wins ties.
fn select_stack(
    tile: Tile,
    code: DecisionCode,
    acting_side: Color,
    acting: &StackRow,
    opponent: &StackRow,
) -> Option<StackId> {
    let legal = legal_stacks(tile, acting_side, acting, opponent);
    let opp = acting_side.opposite();
    match code {
        DecisionCode::OwnStackFallback | DecisionCode::ChosenTileDefensive => {
            let mut best: Option<(StackId, u8)> = None;
            for &stack in &legal {
                let pips = top_of(stack, acting_side, acting, opponent).total_pips();
                if best.map_or(true, |(_, b)| pips < b) {
                    best = Some((stack, pips));
                }
            }
            best.map(|(s, _)| s)
        }
        _ => {
            let mut best: Option<(StackId, u8)> = None;
            for &stack in &legal {
                let top = top_of(stack, acting_side, acting, opponent);
                if top.color() != opp {
                    continue;
                }
                let pips = top.total_pips();
                if best.map_or(true, |(_, b)| pips > b) {
                    best = Some((stack, pips));
                }
            }
            best.map(|(s, _)| s)
        }
    }
}
