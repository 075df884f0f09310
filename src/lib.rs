//! # BuildUp Game Library
//!
//! Engine for the BuildUp tile-stacking contest: two sides (Human and
//! Computer) play four hands per round, replacing stack tops under the
//! pip-count legality rule.
//!
//! ## Features
//!
//! - **Game Engine**: tiles, stacks, boneyards, legality and scoring rules
//! - **Advisor**: the deterministic tile/stack recommendation procedure,
//!   shared by the computer opponent and the human hint facility
//! - **Round Machine**: hand/round progression with mid-round suspension
//! - **Checkpointing**: whitespace-token text snapshots of a full round

/// Core game data and rules
pub mod game;

/// Deterministic recommendation engine (opponent play and hints)
pub mod heuristic;

/// Hand-end score attribution
pub mod scoring;

/// Round aggregate, turn state machine, selection strategies
pub mod services;

/// Round snapshot serialization and restoration
pub mod data;

mod logging;

pub use game::legality::{can_place, legal_stacks};
pub use game::player::Player;
pub use game::stack::{StackId, StackRow};
pub use game::tile::{Color, Tile};
pub use heuristic::advisor::{advise_placement, recommend, DecisionCode, Recommendation};
pub use logging::setup_logging;
pub use services::round::{Round, RoundPhase, RoundView};
pub use services::strategy::{CpuStrategy, Selection, SelectionStrategy};

/// Main error type for the BuildUp library
#[derive(Debug, thiserror::Error)]
pub enum BuildUpError {
    /// The submitted tile/stack pair is not a legal placement. Recoverable:
    /// the caller re-solicits a selection; no round state was changed.
    #[error("illegal placement: {0}")]
    IllegalPlacement(String),

    /// The advisor was invoked with no legal placement available. This is a
    /// caller bug (the `can_place` precondition was skipped), not a
    /// recoverable game situation.
    #[error("advisor invoked with no legal placement available")]
    HeuristicPrecondition,

    /// A save document failed validation. Restoration was aborted with no
    /// partial state applied.
    #[error("malformed save document ({section}): {detail}")]
    MalformedSave { section: &'static str, detail: String },

    /// The restored boneyards are not the same size.
    #[error("restored boneyards differ in size: black {black}, white {white}")]
    BoneyardMismatch { black: usize, white: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BuildUpError>;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
