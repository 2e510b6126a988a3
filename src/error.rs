//! Recoverable error surface.
//!
//! Invariant violations (missing king, inconsistent bitboards) are
//! programming errors and remain `debug_assert!`/`panic!` per the core's
//! error-handling design; this enum covers everything a caller can trigger
//! with bad-but-plausible input (a malformed FEN, a move string that isn't
//! in the legal list) and that must come back as a `Result`, never applied.

use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum EngineError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("move is not in the legal move list for this position")]
    IllegalMove,

    #[error("unrecognized move notation: {0}")]
    UnknownMove(String),
}
