//! # Tether Chess ("Tal's Forest") — rule engine core
//!
//! Tether Chess is a chess variant built on **geometric entanglement**:
//! every piece may, on its turn, borrow the native movement of any
//! friendly piece standing on the same rank (a *transporter move*). This
//! crate is the rule engine core: board representation, move generation,
//! legality filtering, move execution, and terminal-state detection.
//!
//! ## The variant in four rules
//!
//! - **Transporter moves**: a piece applies a rank-mate's native vector
//!   table from its *own* square. Borrowed sliding vectors traverse empty
//!   squares only.
//! - **Native lethality**: only native attacks give check or mate. A king
//!   standing in transporter reach is not in check.
//! - **Stealth capture prevention**: the king may never *step onto* a
//!   square the opponent threatens, natively or by transporter reach,
//!   and may not castle through one.
//! - **Pawn-Knight Apex**: a pawn borrowing a knight's L-jump onto its
//!   far rank promotes mid-jump.
//!
//! Entanglement is memoryless: rank-mates are recomputed from the live
//! board on every generation, so a piece that changes rank is
//! disconnected from its former mates immediately. There is no recursive
//! jumping: only a mate's *native* vectors can be borrowed, never its
//! own transporter moves.
//!
//! ## Usage
//!
//! ```
//! use tetherchess::Engine;
//!
//! let mut engine = Engine::new();
//!
//! // The Michael Tal opening: the queen vaults the pawn wall on a
//! // borrowed knight jump.
//! let result = engine.apply_text("d1-c3");
//! assert!(result.ok);
//! let mv = result.mv.unwrap();
//! assert!(mv.is_transporter());
//! assert_eq!(mv.to_text(), "Q~Nd1-c3");
//! ```
//!
//! The engine is single-threaded and synchronous; an `apply` is atomic
//! from the caller's perspective. Hosts run multiple games by holding one
//! engine per game. All errors come back as values; see
//! [`MoveResult`] and [`EngineError`].

pub mod attack;
pub mod board;
pub mod engine;
pub mod error;
pub mod movegen;
pub mod moves;
pub mod types;

pub use crate::board::Board;
pub use crate::engine::{Engine, GameState, MoveResult, new_game};
pub use crate::error::{EngineError, ErrorCategory};
pub use crate::movegen::{PROMOTION_KINDS, generate_legal_moves};
pub use crate::moves::{Move, MoveBuilder, PieceOnSquare};
pub use crate::types::{CastlingRights, Color, Piece, PieceKind, SideCastlingRights, Square};
