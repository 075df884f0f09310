//! Round checkpoint restoration.
//!
//! A strict token-stream parse of the save document. Every tile token is
//! validated (3 characters, `B`/`W` color letter, pip digits in 0..=6) and
//! any violation aborts the whole restoration: parsing builds a detached
//! [`RoundSnapshot`] and nothing live is touched on failure. A missing save
//! file is not an error; it means "start a new round".

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::SplitWhitespace;

use log::{info, warn};

use crate::game::boneyard::Boneyard;
use crate::game::hand::Hand;
use crate::game::player::Player;
use crate::game::stack::StackRow;
use crate::game::tile::{Color, Tile};
use crate::services::round::Round;
use crate::{BuildUpError, Result};

/// A fully validated restored round, detached from any live state.
#[derive(Debug, Clone)]
pub struct RoundSnapshot {
    pub human: Player,
    pub cpu: Player,
    pub human_turn: bool,
    /// Hand to resume, derived from the boneyard sizes.
    pub hand_number: u8,
    /// True for the checkpoint taken before the draw-off (22 tiles per
    /// boneyard); resuming re-runs the draw-off.
    pub pre_deal: bool,
    pub human_wins: u32,
    pub cpu_wins: u32,
}

impl RoundSnapshot {
    /// Round number is not persisted; every finished round awarded exactly
    /// one win (a drawn round awards one to each side, counted as one round
    /// here by the caller's bookkeeping).
    pub fn round_number(&self) -> u32 {
        self.human_wins + self.cpu_wins + 1
    }

    pub fn into_round(self) -> Round {
        Round::resume(
            self.human,
            self.cpu,
            self.hand_number,
            self.human_turn,
            self.pre_deal,
        )
    }
}

/// Reads and parses a save file. `Ok(None)` when the file does not exist.
pub fn load_round(path: &Path) -> Result<Option<RoundSnapshot>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!("no save file at {}, starting fresh", path.display());
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    match parse_round(&text) {
        Ok(snapshot) => {
            info!(
                "round {} restored from {} (resuming hand {})",
                snapshot.round_number(),
                path.display(),
                snapshot.hand_number
            );
            Ok(Some(snapshot))
        }
        Err(err) => {
            warn!("restore from {} failed: {err}", path.display());
            Err(err)
        }
    }
}

/// Parses a save document into a snapshot. All-or-nothing: any invalid
/// token fails the whole parse.
pub fn parse_round(text: &str) -> Result<RoundSnapshot> {
    let mut tokens = Tokens::new(text);

    let (cpu_side, cpu_score, cpu_wins) = parse_side(&mut tokens, "Computer:", Color::White)?;
    let (human_side, human_score, human_wins) = parse_side(&mut tokens, "Human:", Color::Black)?;

    if human_side.boneyard.len() != cpu_side.boneyard.len() {
        return Err(BuildUpError::BoneyardMismatch {
            black: human_side.boneyard.len(),
            white: cpu_side.boneyard.len(),
        });
    }

    tokens.expect("turn", "Turn:")?;
    let human_turn = match tokens.next("turn")? {
        "Human" => true,
        "Computer" => false,
        other => return Err(malformed("turn", format!("unknown side `{other}`"))),
    };
    if let Some(extra) = tokens.peek() {
        return Err(malformed("turn", format!("trailing data `{extra}`")));
    }

    let (hand_number, pre_deal) = match human_side.boneyard.len() {
        22 => {
            if !human_side.hand.is_empty() || !cpu_side.hand.is_empty() {
                return Err(malformed(
                    "boneyard count",
                    "22 tiles left but hands are not empty".to_string(),
                ));
            }
            (1, true)
        }
        16 => (1, false),
        10 => (2, false),
        4 => (3, false),
        0 => (4, false),
        n => {
            return Err(malformed(
                "boneyard count",
                format!("{n} tiles does not match any hand boundary"),
            ))
        }
    };

    let mut human = Player::new(Color::Black, human_side.stacks, human_side.boneyard);
    human.hand = human_side.hand;
    human.score = human_score;
    let mut cpu = Player::new(Color::White, cpu_side.stacks, cpu_side.boneyard);
    cpu.hand = cpu_side.hand;
    cpu.score = cpu_score;

    Ok(RoundSnapshot {
        human,
        cpu,
        human_turn,
        hand_number,
        pre_deal,
        human_wins,
        cpu_wins,
    })
}

struct SideData {
    stacks: StackRow,
    boneyard: Boneyard,
    hand: Hand,
}

fn parse_side(
    tokens: &mut Tokens<'_>,
    header: &'static str,
    color: Color,
) -> Result<(SideData, i32, u32)> {
    let section: &'static str = match color {
        Color::White => "computer",
        Color::Black => "human",
    };
    tokens.expect(section, header)?;
    tokens.expect(section, "Stacks:")?;

    let mut tops = Vec::with_capacity(6);
    for _ in 0..6 {
        let token = tokens.next(section)?;
        if token == "Boneyard:" {
            return Err(malformed(section, "fewer than 6 stacks".to_string()));
        }
        // Stack tops may be either color; any tile may have landed there.
        tops.push(parse_tile(section, token, None)?);
    }
    let stacks = StackRow::new(tops.try_into().expect("exactly 6 tops collected"));

    tokens.expect(section, "Boneyard:")?;
    let mut boneyard_tiles = Vec::new();
    loop {
        let token = tokens.next(section)?;
        if token == "Hand:" {
            break;
        }
        // Undrawn tiles always belong to the owning color.
        boneyard_tiles.push(parse_tile(section, token, Some(color))?);
    }
    if boneyard_tiles.len() > 28 {
        return Err(malformed(section, "more than 28 boneyard tiles".to_string()));
    }

    let mut hand_tiles = Vec::new();
    loop {
        let token = tokens.next(section)?;
        if token == "Score:" {
            break;
        }
        hand_tiles.push(parse_tile(section, token, Some(color))?);
    }
    if hand_tiles.len() > 6 {
        return Err(malformed(section, "more than 6 hand tiles".to_string()));
    }

    // Leftover penalties can drive a score below zero, so the token is a
    // signed integer.
    let score_token = tokens.next(section)?;
    let score: i32 = score_token
        .parse()
        .map_err(|_| malformed(section, format!("invalid score `{score_token}`")))?;

    tokens.expect(section, "Rounds")?;
    tokens.expect(section, "Won:")?;
    let wins_token = tokens.next(section)?;
    let wins: u32 = wins_token
        .parse()
        .map_err(|_| malformed(section, format!("invalid win count `{wins_token}`")))?;

    Ok((
        SideData {
            stacks,
            boneyard: Boneyard::from_tiles(boneyard_tiles),
            hand: Hand::from_tiles(hand_tiles),
        },
        score,
        wins,
    ))
}

fn parse_tile(section: &'static str, token: &str, required: Option<Color>) -> Result<Tile> {
    let tile = Tile::from_token(token)
        .ok_or_else(|| malformed(section, format!("invalid tile token `{token}`")))?;
    if let Some(color) = required {
        if tile.color() != color {
            return Err(malformed(
                section,
                format!("tile {} has the wrong color", tile.token()),
            ));
        }
    }
    Ok(tile)
}

fn malformed(section: &'static str, detail: String) -> BuildUpError {
    BuildUpError::MalformedSave { section, detail }
}

/// Whitespace token cursor over the save document.
struct Tokens<'a> {
    iter: std::iter::Peekable<SplitWhitespace<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Tokens<'a> {
        Tokens {
            iter: text.split_whitespace().peekable(),
        }
    }

    fn next(&mut self, section: &'static str) -> Result<&'a str> {
        self.iter
            .next()
            .ok_or_else(|| malformed(section, "unexpected end of document".to_string()))
    }

    fn peek(&mut self) -> Option<&'a str> {
        self.iter.peek().copied()
    }

    fn expect(&mut self, section: &'static str, literal: &str) -> Result<()> {
        let token = self.next(section)?;
        if token == literal {
            Ok(())
        } else {
            Err(malformed(
                section,
                format!("expected `{literal}`, found `{token}`"),
            ))
        }
    }
}
