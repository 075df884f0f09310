//! Selection strategies: the seam between the turn machine and whoever
//! chooses moves. The computer side calls the advisor directly; a human
//! driver wraps its input collaborator behind the same trait.

use crate::game::hand::Hand;
use crate::game::stack::{StackId, StackRow};
use crate::game::tile::Color;
use crate::heuristic::advisor::{recommend, Recommendation};
use crate::{BuildUpError, Result};

/// What the acting side sees when asked to move.
pub struct TurnView<'a> {
    pub acting_side: Color,
    pub hand: &'a Hand,
    pub own_stacks: &'a StackRow,
    pub opponent_stacks: &'a StackRow,
}

/// One turn's intent. `Pass` is an explicit variant; there is no sentinel
/// tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Pass,
    Place { hand_index: usize, stack: StackId },
}

pub trait SelectionStrategy {
    fn select(&mut self, view: &TurnView<'_>) -> Result<Selection>;

    /// Advisor branch behind the latest selection, when one exists. The
    /// round records it for the display collaborator.
    fn last_decision(&self) -> Option<Recommendation> {
        None
    }
}

/// The computer opponent: defers every turn to the advisor.
#[derive(Debug, Default)]
pub struct CpuStrategy {
    last: Option<Recommendation>,
}

impl CpuStrategy {
    pub fn new() -> CpuStrategy {
        CpuStrategy { last: None }
    }
}

impl SelectionStrategy for CpuStrategy {
    fn select(&mut self, view: &TurnView<'_>) -> Result<Selection> {
        let rec = recommend(
            view.hand,
            view.acting_side,
            view.own_stacks,
            view.opponent_stacks,
        )?;
        self.last = Some(rec);
        let hand_index = rec.hand_index.ok_or(BuildUpError::HeuristicPrecondition)?;
        Ok(Selection::Place {
            hand_index,
            stack: rec.stack,
        })
    }

    fn last_decision(&self) -> Option<Recommendation> {
        self.last
    }
}
