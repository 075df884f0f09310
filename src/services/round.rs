//! Round aggregate and turn state machine.
//!
//! A round runs four hands. Within a hand the two sides alternate turns;
//! a side that cannot place skips, and the hand ends when neither side can
//! place. After every actual placement the driver's keep-playing signal is
//! consulted; declining freezes the round for persistence.

use log::info;
use rand::Rng;
use serde::Serialize;

use crate::game::boneyard::Boneyard;
use crate::game::legality::{can_place, legal_stacks};
use crate::game::player::Player;
use crate::game::stack::{StackId, StackRow};
use crate::game::tile::{Color, Tile};
use crate::heuristic::advisor::DecisionCode;
use crate::scoring::score_hand;
use crate::services::strategy::{Selection, SelectionStrategy, TurnView};
use crate::{BuildUpError, Result};

pub const HANDS_PER_ROUND: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundPhase {
    /// Dealing the next hand's tiles from the boneyards.
    HandSetup,
    /// Alternating turns within a hand.
    Turn,
    /// All four hands scored.
    RoundComplete,
    /// Frozen mid-round at a turn boundary; only persistence may follow.
    Suspended,
}

/// An applied placement, kept for the display collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacedMove {
    pub side: Color,
    pub tile: Tile,
    pub stack: StackId,
    /// Advisor branch that produced the move; `None` for externally chosen
    /// (human) placements.
    pub code: Option<DecisionCode>,
}

/// Read-only projection of one side for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SideView {
    pub hand: Vec<Tile>,
    pub stacks: Vec<Tile>,
    pub score: i32,
    pub boneyard_remaining: usize,
}

/// Read-only projection of the whole round for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct RoundView {
    pub hand_number: u8,
    pub human_turn: bool,
    pub phase: RoundPhase,
    pub human: SideView,
    pub cpu: SideView,
    pub last_move: Option<PlacedMove>,
}

/// The full round aggregate: both sides, progress bookkeeping, and the last
/// applied move. Mutated one turn at a time; never shared.
#[derive(Debug, Clone)]
pub struct Round {
    pub human: Player,
    pub cpu: Player,
    pub hand_number: u8,
    pub human_turn: bool,
    pub phase: RoundPhase,
    needs_draw_off: bool,
    last_move: Option<PlacedMove>,
}

impl Round {
    /// Fresh round: both boneyards built and shuffled, six tiles dealt to
    /// each side's stacks. The sudden-death draw-off runs on the first call
    /// to `play`.
    pub fn start<R: Rng>(rng: &mut R) -> Round {
        let mut black = Boneyard::full(Color::Black);
        let mut white = Boneyard::full(Color::White);
        black.shuffle(rng);
        white.shuffle(rng);

        let human_stacks = deal_stacks(&mut black);
        let cpu_stacks = deal_stacks(&mut white);
        info!("round started: stacks dealt, 22 tiles left per boneyard");

        Round {
            human: Player::new(Color::Black, human_stacks, black),
            cpu: Player::new(Color::White, cpu_stacks, white),
            hand_number: 1,
            human_turn: true,
            phase: RoundPhase::HandSetup,
            needs_draw_off: true,
            last_move: None,
        }
    }

    /// Rebuilds a round from restored state. `pre_deal` marks the
    /// checkpoint taken before the draw-off (22 tiles per boneyard), which
    /// re-runs the draw-off on resume.
    pub fn resume(
        human: Player,
        cpu: Player,
        hand_number: u8,
        human_turn: bool,
        pre_deal: bool,
    ) -> Round {
        Round {
            human,
            cpu,
            hand_number,
            human_turn,
            phase: if pre_deal { RoundPhase::HandSetup } else { RoundPhase::Turn },
            needs_draw_off: pre_deal,
            last_move: None,
        }
    }

    pub fn acting_side(&self) -> Color {
        if self.human_turn {
            Color::Black
        } else {
            Color::White
        }
    }

    fn acting(&self) -> &Player {
        if self.human_turn {
            &self.human
        } else {
            &self.cpu
        }
    }

    fn opponent_stacks(&self) -> &StackRow {
        if self.human_turn {
            &self.cpu.stacks
        } else {
            &self.human.stacks
        }
    }

    /// Whether the acting side can make any legal placement this turn.
    pub fn acting_can_place(&self) -> bool {
        let acting = self.acting();
        can_place(&acting.hand, &acting.stacks, self.opponent_stacks())
    }

    fn either_can_place(&self) -> bool {
        can_place(&self.human.hand, &self.human.stacks, &self.cpu.stacks)
            || can_place(&self.cpu.hand, &self.cpu.stacks, &self.human.stacks)
    }

    /// Sudden-death draw-off: each side reveals its next boneyard tile;
    /// equal pips return the tiles and reshuffle both boneyards. The strict
    /// winner goes first and both revealed tiles join the hands.
    fn run_draw_off<R: Rng>(&mut self, rng: &mut R) {
        loop {
            // A full boneyard can never run dry mid-draw-off; the tiles
            // only leave it once a strict winner exists.
            let (Some(human_draw), Some(cpu_draw)) =
                (self.human.boneyard.peek_next(), self.cpu.boneyard.peek_next())
            else {
                unreachable!("draw-off on empty boneyard");
            };
            if human_draw.total_pips() == cpu_draw.total_pips() {
                info!(
                    "draw-off tie on {} pips, reshuffling",
                    human_draw.total_pips()
                );
                self.human.boneyard.shuffle(rng);
                self.cpu.boneyard.shuffle(rng);
                continue;
            }
            self.human_turn = human_draw.total_pips() > cpu_draw.total_pips();
            self.human.boneyard.draw();
            self.cpu.boneyard.draw();
            self.human.hand.add(human_draw);
            self.cpu.hand.add(cpu_draw);
            info!(
                "draw-off: human {} vs computer {}, {} goes first",
                human_draw.token(),
                cpu_draw.token(),
                if self.human_turn { "human" } else { "computer" }
            );
            return;
        }
    }

    /// Deals the current hand. The count is derived from the live boneyard
    /// size: 21 right after the draw-off means 5, a fuller boneyard means 6,
    /// and the final hand takes whatever remains.
    fn deal_hand(&mut self) {
        let count = match self.human.boneyard.len() {
            21 => 5,
            n if n > 6 => 6,
            n => n,
        };
        for player in [&mut self.human, &mut self.cpu] {
            for _ in 0..count {
                if let Some(tile) = player.boneyard.draw() {
                    player.hand.add(tile);
                }
            }
        }
        info!(
            "hand {}: dealt {} tiles per side, {} left per boneyard",
            self.hand_number,
            count,
            self.human.boneyard.len()
        );
        self.phase = RoundPhase::Turn;
    }

    fn turn_view(&self) -> TurnView<'_> {
        let acting = self.acting();
        TurnView {
            acting_side: acting.color,
            hand: &acting.hand,
            own_stacks: &acting.stacks,
            opponent_stacks: self.opponent_stacks(),
        }
    }

    /// Validates and applies one selection for the acting side, then
    /// alternates the turn. A `Pass` (or an acting side that cannot place)
    /// changes nothing but the turn flag. `IllegalPlacement` leaves the
    /// round untouched so the caller can re-solicit.
    pub fn apply_selection(&mut self, selection: Selection) -> Result<Option<PlacedMove>> {
        let placed = match selection {
            Selection::Pass => {
                info!("{:?} passes", self.acting_side());
                None
            }
            Selection::Place { hand_index, stack } => {
                let side = self.acting_side();
                let acting = self.acting();
                let tile = acting.hand.get(hand_index).ok_or_else(|| {
                    BuildUpError::IllegalPlacement(format!(
                        "no tile at hand index {hand_index}"
                    ))
                })?;
                let legal =
                    legal_stacks(tile, side, &acting.stacks, self.opponent_stacks());
                if !legal.contains(&stack) {
                    return Err(BuildUpError::IllegalPlacement(format!(
                        "tile {} may not replace stack {}",
                        tile.token(),
                        stack.label()
                    )));
                }

                let row = match stack.side {
                    Color::Black => &mut self.human.stacks,
                    Color::White => &mut self.cpu.stacks,
                };
                row.replace_top(stack.index, tile);
                let _ = match side {
                    Color::Black => self.human.hand.remove(hand_index),
                    Color::White => self.cpu.hand.remove(hand_index),
                };
                info!("{:?} places {} on {}", side, tile.token(), stack.label());
                Some(PlacedMove {
                    side,
                    tile,
                    stack,
                    code: None,
                })
            }
        };
        self.human_turn = !self.human_turn;
        if placed.is_some() {
            self.last_move = placed;
        }
        Ok(placed)
    }

    /// Drives the round to completion or suspension. `keep_playing` is
    /// queried after every actual placement (not after skips); answering
    /// `false` suspends the round at that turn boundary.
    pub fn play<'a, R: Rng>(
        &mut self,
        rng: &mut R,
        human: &'a mut dyn SelectionStrategy,
        cpu: &'a mut dyn SelectionStrategy,
        keep_playing: &mut dyn FnMut(&Round) -> bool,
    ) -> Result<RoundPhase> {
        if self.needs_draw_off {
            self.run_draw_off(rng);
            self.needs_draw_off = false;
        }
        loop {
            match self.phase {
                RoundPhase::HandSetup => self.deal_hand(),
                RoundPhase::Turn => {
                    if !self.either_can_place() {
                        self.finish_hand();
                        continue;
                    }
                    if !self.acting_can_place() {
                        info!("{:?} cannot place, skipping turn", self.acting_side());
                        self.human_turn = !self.human_turn;
                        continue;
                    }
                    let strategy = if self.human_turn { &mut *human } else { &mut *cpu };
                    let selection = strategy.select(&self.turn_view())?;
                    let code = strategy.last_decision().map(|r| r.code);
                    if let Some(mut placed) = self.apply_selection(selection)? {
                        placed.code = code;
                        self.last_move = Some(placed);
                        if !keep_playing(self) {
                            self.phase = RoundPhase::Suspended;
                            info!("round suspended at hand {}", self.hand_number);
                            return Ok(self.phase);
                        }
                    }
                }
                RoundPhase::RoundComplete | RoundPhase::Suspended => return Ok(self.phase),
            }
        }
    }

    fn finish_hand(&mut self) {
        info!("hand {} over: neither side can place", self.hand_number);
        score_hand(self);
        if self.hand_number < HANDS_PER_ROUND {
            self.hand_number += 1;
            self.phase = RoundPhase::HandSetup;
        } else {
            self.phase = RoundPhase::RoundComplete;
            info!(
                "round complete: human {} computer {}",
                self.human.score, self.cpu.score
            );
        }
    }

    /// Read-only projection for the display collaborator.
    pub fn view(&self) -> RoundView {
        RoundView {
            hand_number: self.hand_number,
            human_turn: self.human_turn,
            phase: self.phase,
            human: side_view(&self.human),
            cpu: side_view(&self.cpu),
            last_move: self.last_move,
        }
    }
}

fn side_view(player: &Player) -> SideView {
    SideView {
        hand: player.hand.tiles().to_vec(),
        stacks: player.stacks.tops().to_vec(),
        score: player.score,
        boneyard_remaining: player.boneyard.len(),
    }
}

fn deal_stacks(boneyard: &mut Boneyard) -> StackRow {
    // The boneyard holds 28 tiles here; six draws cannot fail.
    let tops = std::array::from_fn(|_| boneyard.draw().expect("full boneyard"));
    StackRow::new(tops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::hand::Hand;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn b(l: u8, r: u8) -> Tile {
        Tile::new(Color::Black, l, r).unwrap()
    }

    fn w(l: u8, r: u8) -> Tile {
        Tile::new(Color::White, l, r).unwrap()
    }

    #[test]
    fn test_start_deals_stacks_and_conserves_tiles() {
        let round = Round::start(&mut StdRng::seed_from_u64(7));
        assert_eq!(round.human.boneyard.len(), 22);
        assert_eq!(round.cpu.boneyard.len(), 22);
        assert!(round.human.stacks.tops().iter().all(|t| t.color() == Color::Black));
        assert!(round.cpu.stacks.tops().iter().all(|t| t.color() == Color::White));

        let black: HashSet<Tile> = round
            .human
            .boneyard
            .tiles()
            .iter()
            .chain(round.human.stacks.tops())
            .copied()
            .collect();
        assert_eq!(black.len(), 28, "All 28 black tiles accounted for.");
    }

    #[test]
    fn test_draw_off_produces_strict_winner_and_conserves_boneyards() {
        for seed in 0..20 {
            let mut round = Round::start(&mut StdRng::seed_from_u64(seed));
            let before: HashSet<Tile> = round
                .human
                .boneyard
                .tiles()
                .iter()
                .copied()
                .collect();
            round.run_draw_off(&mut StdRng::seed_from_u64(seed * 31 + 1));
            assert_eq!(round.human.hand.len(), 1);
            assert_eq!(round.cpu.hand.len(), 1);
            let human_pips = round.human.hand.get(0).unwrap().total_pips();
            let cpu_pips = round.cpu.hand.get(0).unwrap().total_pips();
            assert_ne!(human_pips, cpu_pips, "Draw-off must end with a strict winner.");
            assert_eq!(round.human_turn, human_pips > cpu_pips);

            let after: HashSet<Tile> = round
                .human
                .boneyard
                .tiles()
                .iter()
                .chain(round.human.hand.tiles())
                .copied()
                .collect();
            assert_eq!(before, after, "Retries must conserve the boneyard multiset.");
        }
    }

    #[test]
    fn test_deal_counts_follow_boneyard_size() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut round = Round::start(&mut rng);
        round.run_draw_off(&mut rng);
        round.needs_draw_off = false;

        // Hand 1: 21 left, draw 5 on top of the draw-off tile.
        round.deal_hand();
        assert_eq!(round.human.hand.len(), 6);
        assert_eq!(round.human.boneyard.len(), 16);

        // Hands 2 and 3 draw 6; the final hand takes the remaining 4.
        for (hand, expected_left) in [(2u8, 10usize), (3, 4), (4, 0)] {
            round.human.hand.clear();
            round.cpu.hand.clear();
            round.hand_number = hand;
            round.deal_hand();
            assert_eq!(round.human.boneyard.len(), expected_left);
            assert_eq!(round.cpu.boneyard.len(), expected_left);
        }
        assert_eq!(round.human.hand.len(), 4, "Final hand takes what remains.");
    }

    fn fixed_round() -> Round {
        let human_stacks = StackRow::new([b(1, 2), b(0, 3), b(2, 4), b(5, 6), b(0, 2), b(3, 4)]);
        let cpu_stacks = StackRow::new([w(0, 1), w(2, 3), w(1, 4), w(2, 2), w(1, 1), w(2, 5)]);
        let mut human = Player::new(
            Color::Black,
            human_stacks,
            Boneyard::from_tiles(Vec::new()),
        );
        let cpu = Player::new(Color::White, cpu_stacks, Boneyard::from_tiles(Vec::new()));
        human.hand = Hand::from_tiles(vec![b(3, 5), b(0, 0)]);
        Round::resume(human, cpu, 4, true, false)
    }

    #[test]
    fn test_apply_selection_places_and_alternates() {
        let mut round = fixed_round();
        let stack = StackId::new(Color::White, 6).unwrap();
        let placed = round
            .apply_selection(Selection::Place { hand_index: 0, stack })
            .unwrap()
            .unwrap();
        assert_eq!(placed.tile, b(3, 5));
        assert_eq!(round.cpu.stacks.top(6), b(3, 5), "Stack top replaced.");
        assert_eq!(round.human.hand.tiles(), &[b(0, 0)], "Tile left the hand.");
        assert!(!round.human_turn, "Turn alternates after a placement.");
    }

    #[test]
    fn test_illegal_placement_leaves_state_untouched() {
        let mut round = fixed_round();
        let before = round.clone();
        // B35 (8 pips) cannot replace the 11-pip top on B4.
        let stack = StackId::new(Color::Black, 4).unwrap();
        let err = round
            .apply_selection(Selection::Place { hand_index: 0, stack })
            .unwrap_err();
        assert_matches!(err, BuildUpError::IllegalPlacement(_));
        assert_eq!(round.human.hand, before.human.hand);
        assert_eq!(round.human.stacks, before.human.stacks);
        assert_eq!(round.cpu.stacks, before.cpu.stacks);
        assert_eq!(round.human_turn, before.human_turn, "Turn did not alternate.");

        let err = round
            .apply_selection(Selection::Place {
                hand_index: 9,
                stack: StackId::new(Color::Black, 1).unwrap(),
            })
            .unwrap_err();
        assert_matches!(err, BuildUpError::IllegalPlacement(_));
    }

    struct Scripted {
        moves: Vec<Selection>,
    }

    impl SelectionStrategy for Scripted {
        fn select(&mut self, _view: &TurnView<'_>) -> Result<Selection> {
            Ok(self.moves.remove(0))
        }
    }

    #[test]
    fn test_play_with_scripted_selections_finishes_the_round() {
        let mut round = fixed_round();
        let mut human = Scripted {
            moves: vec![
                Selection::Place {
                    hand_index: 0,
                    stack: StackId::new(Color::White, 6).unwrap(),
                },
                Selection::Place {
                    hand_index: 0,
                    stack: StackId::new(Color::Black, 1).unwrap(),
                },
            ],
        };
        // The computer's hand is empty; it skips every turn and its
        // strategy is never consulted.
        let mut cpu = Scripted { moves: Vec::new() };
        let phase = round
            .play(&mut StdRng::seed_from_u64(0), &mut human, &mut cpu, &mut |_| true)
            .unwrap();

        assert_eq!(phase, RoundPhase::RoundComplete, "Hand 4 ends the round.");
        assert_eq!(round.cpu.stacks.top(6), b(3, 5));
        assert_eq!(round.human.stacks.top(1), b(0, 0));
        assert_eq!(round.human.score, 37, "Black tops: 0+3+6+11+2+7 plus 8 on W6.");
        assert_eq!(round.cpu.score, 17, "White tops: 1+5+5+4+2.");
    }

    #[test]
    fn test_pass_alternates_without_moving() {
        let mut round = fixed_round();
        let placed = round.apply_selection(Selection::Pass).unwrap();
        assert!(placed.is_none());
        assert!(!round.human_turn);
        assert_eq!(round.human.hand.len(), 2);
    }
}
