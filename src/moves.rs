//! The move record for the Tether Chess rule engine.
//!
//! A [`Move`] is an immutable description of one move: endpoints, a
//! snapshot of the mover, the captured piece (if any), the lender behind a
//! transporter move (if any), the promotion kind, and the castling /
//! en-passant flags. Moves carry value snapshots rather than references
//! into the board grid, so a record stays meaningful after the board has
//! changed underneath it.
//!
//! Construction goes through [`MoveBuilder`], which checks the record's
//! structural invariants. The builder is only driven by the move
//! generator; hosts receive finished `Move` values.

use crate::types::{Color, PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot of a piece as it stood when a move was generated:
/// kind, color, and the square it occupied at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceOnSquare {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
}

impl PieceOnSquare {
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            kind,
            color,
            square,
        }
    }
}

/// An immutable description of a single move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Origin square (always the mover's square at generation time).
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// The mover as it was before the move.
    pub mover: PieceOnSquare,
    /// The captured piece, if the move captures.
    pub captured: Option<PieceOnSquare>,
    /// The rank-mate whose vector table this move borrows.
    /// Present exactly for transporter moves.
    pub borrowed_from: Option<PieceOnSquare>,
    /// The promotion kind, present exactly when a pawn reaches its far rank.
    pub promotion: Option<PieceKind>,
    /// Whether this is a castling move (king two-file step).
    pub is_castling: bool,
    /// Whether this is an en-passant capture.
    pub is_en_passant: bool,
}

impl Move {
    /// Whether this move borrows a rank-mate's vector table.
    pub fn is_transporter(&self) -> bool {
        self.borrowed_from.is_some()
    }

    /// Whether this move captures a piece.
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Whether this move is a Pawn-Knight Apex: a pawn borrowing a
    /// knight's L-vector onto its far rank, promoting mid-jump.
    pub fn is_pawn_knight_apex(&self) -> bool {
        self.mover.kind == PieceKind::Pawn
            && self
                .borrowed_from
                .is_some_and(|lender| lender.kind == PieceKind::Knight)
            && self.promotion.is_some()
    }

    /// Renders the move in the engine's log/test notation:
    ///
    /// ```text
    /// [KindSymbol][~BorrowedKindSymbol]from("-"|"x")to["=" PromoKind ["!" if apex]]
    /// ```
    ///
    /// Castling renders as `O-O` / `O-O-O`. Examples: `Pe2-e4`,
    /// `Q~Nd1-c3`, `P~Nd6-e8=Q!`. This notation is for logs and tests;
    /// it is not a parser input.
    pub fn to_text(&self) -> String {
        if self.is_castling {
            return if self.to.file == 6 {
                "O-O".to_string()
            } else {
                "O-O-O".to_string()
            };
        }

        let mut s = String::new();
        s.push(self.mover.kind.symbol());
        if let Some(lender) = self.borrowed_from {
            s.push('~');
            s.push(lender.kind.symbol());
        }
        s.push_str(&self.from.to_algebraic());
        s.push(if self.is_capture() { 'x' } else { '-' });
        s.push_str(&self.to.to_algebraic());
        if let Some(promo) = self.promotion {
            s.push('=');
            s.push(promo.symbol());
            if self.is_pawn_knight_apex() {
                s.push('!');
            }
        }
        s
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

/// Builder for [`Move`] records.
///
/// The builder starts from the mover snapshot and the destination; the
/// optional parts are layered on. `build` checks the structural
/// invariants of the record (promotion exactly on the pawn's far rank,
/// castling only as a king two-file step, transporter never combined
/// with castling or en passant).
#[derive(Debug, Clone)]
pub struct MoveBuilder {
    mover: PieceOnSquare,
    to: Square,
    captured: Option<PieceOnSquare>,
    borrowed_from: Option<PieceOnSquare>,
    promotion: Option<PieceKind>,
    is_castling: bool,
    is_en_passant: bool,
}

impl MoveBuilder {
    /// Starts a move of `mover` to `to`.
    pub fn new(mover: PieceOnSquare, to: Square) -> Self {
        Self {
            mover,
            to,
            captured: None,
            borrowed_from: None,
            promotion: None,
            is_castling: false,
            is_en_passant: false,
        }
    }

    /// Records the captured piece.
    pub fn captures(mut self, target: PieceOnSquare) -> Self {
        self.captured = Some(target);
        self
    }

    /// Marks the move as a transporter move borrowing `lender`'s table.
    pub fn borrowing(mut self, lender: PieceOnSquare) -> Self {
        self.borrowed_from = Some(lender);
        self
    }

    /// Stamps the promotion kind.
    pub fn promotes_to(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }

    /// Marks the move as castling.
    pub fn castling(mut self) -> Self {
        self.is_castling = true;
        self
    }

    /// Marks the move as an en-passant capture.
    pub fn en_passant(mut self) -> Self {
        self.is_en_passant = true;
        self
    }

    /// Finishes the record, checking its structural invariants.
    pub fn build(self) -> Move {
        let mover = self.mover;

        if self.is_castling {
            debug_assert_eq!(mover.kind, PieceKind::King);
            debug_assert!(self.to.file == 6 || self.to.file == 2);
            debug_assert_eq!(self.to.rank, mover.square.rank);
            debug_assert!(self.borrowed_from.is_none());
        }
        if self.is_en_passant {
            debug_assert_eq!(mover.kind, PieceKind::Pawn);
            debug_assert!(self.captured.is_some());
            debug_assert!(self.borrowed_from.is_none());
        }
        // Promotion is present exactly when a pawn lands on its far rank.
        debug_assert_eq!(
            self.promotion.is_some(),
            mover.kind == PieceKind::Pawn && self.to.is_promotion_rank(mover.color)
        );
        debug_assert!(
            self.promotion
                .is_none_or(|k| k != PieceKind::King && k != PieceKind::Pawn)
        );

        Move {
            from: mover.square,
            to: self.to,
            mover,
            captured: self.captured,
            borrowed_from: self.borrowed_from,
            promotion: self.promotion,
            is_castling: self.is_castling,
            is_en_passant: self.is_en_passant,
        }
    }
}
