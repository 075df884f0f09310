//! Hand-end score attribution.
//!
//! Every stack top pays its pips to the side whose *color* owns the tile,
//! regardless of which row the stack sits in. Tiles stranded in a hand cost
//! their holder the same pips.

use log::info;

use crate::game::stack::StackRow;
use crate::game::tile::Color;
use crate::services::round::Round;

/// Pips credited to each color across both stack rows, (black, white).
pub fn stack_pips(human_stacks: &StackRow, cpu_stacks: &StackRow) -> (i32, i32) {
    let mut black = 0;
    let mut white = 0;
    for &top in human_stacks.tops().iter().chain(cpu_stacks.tops().iter()) {
        match top.color() {
            Color::Black => black += top.total_pips() as i32,
            Color::White => white += top.total_pips() as i32,
        }
    }
    (black, white)
}

/// Applies the end-of-hand scoring rule to `round`: credit all 12 stack
/// tops, subtract each side's leftover hand pips, then clear both hands.
pub fn score_hand(round: &mut Round) {
    let (black, white) = stack_pips(&round.human.stacks, &round.cpu.stacks);
    round.human.score += black;
    round.cpu.score += white;

    let human_penalty = round.human.hand.total_pips() as i32;
    if human_penalty > 0 {
        info!(
            "hand {}: human holds {} leftover pips",
            round.hand_number, human_penalty
        );
        round.human.score -= human_penalty;
    }
    let cpu_penalty = round.cpu.hand.total_pips() as i32;
    if cpu_penalty > 0 {
        info!(
            "hand {}: computer holds {} leftover pips",
            round.hand_number, cpu_penalty
        );
        round.cpu.score -= cpu_penalty;
    }
    round.human.hand.clear();
    round.cpu.hand.clear();

    info!(
        "hand {} scored: human {} computer {}",
        round.hand_number, round.human.score, round.cpu.score
    );
}
