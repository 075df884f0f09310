//! Round checkpoint serialization.
//!
//! The document is a deterministic whitespace-token text form: one block per
//! side (stacks, boneyard, hand, score, rounds won) and a trailing turn
//! indicator. Tiles appear in their 3-character token form. The resuming
//! hand number is never stored; it is re-derived from the boneyard sizes on
//! restore.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use log::info;

use crate::game::player::Player;
use crate::services::round::Round;
use crate::Result;

/// Renders the save document for `round`. Tournament win counts ride along
/// so the round number can be recomputed as wins + 1 on restore.
pub fn serialize_round(round: &Round, human_wins: u32, cpu_wins: u32) -> String {
    let mut out = String::new();
    write_side(&mut out, "Computer", &round.cpu, cpu_wins);
    write_side(&mut out, "Human", &round.human, human_wins);
    let turn = if round.human_turn { "Human" } else { "Computer" };
    let _ = writeln!(out, "Turn: {turn}");
    out
}

fn write_side(out: &mut String, label: &str, player: &Player, wins: u32) {
    let _ = write!(out, "{label}:\n\tStacks: ");
    for top in player.stacks.tops() {
        let _ = write!(out, "{} ", top.token());
    }
    let _ = write!(out, "\n\tBoneyard: ");
    for tile in player.boneyard.tiles() {
        let _ = write!(out, "{} ", tile.token());
    }
    let _ = write!(out, "\n\tHand: ");
    for tile in player.hand.tiles() {
        let _ = write!(out, "{} ", tile.token());
    }
    let _ = write!(out, "\n\tScore: {}\n\tRounds Won: {}\n\n", player.score, wins);
}

/// Writes the save document to `path`.
pub fn save_round(
    path: &Path,
    round: &Round,
    human_wins: u32,
    cpu_wins: u32,
) -> Result<()> {
    fs::write(path, serialize_round(round, human_wins, cpu_wins))?;
    info!("round saved to {}", path.display());
    Ok(())
}
