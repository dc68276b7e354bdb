//! Core types for the Tether Chess rule engine.
//!
//! This module defines the geometric and piece-model primitives used
//! throughout the engine: colors, piece kinds with their native
//! movement-vector tables, squares, and castling rights. Everything here
//! is a small `Copy` value with structural equality.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// Represents the color (side) of a piece or player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// The White side (starts on ranks 1–2).
    White,
    /// The Black side (starts on ranks 7–8).
    Black,
}

impl Color {
    /// Returns the opposite color.
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the home rank index (0-based) for pawns of this color.
    /// White pawns start on rank 2 (index 1), Black on rank 7 (index 6).
    pub fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Returns the promotion rank index (0-based).
    /// White promotes on rank 8 (index 7), Black on rank 1 (index 0).
    pub fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Returns the back rank index (0-based): where the royal pieces start.
    pub fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Returns the direction pawns move: +1 for White, -1 for Black.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

// ---------------------------------------------------------------------------
// PieceKind & native vector tables
// ---------------------------------------------------------------------------

/// Represents a piece type (without color information).
///
/// Each kind carries its native movement-vector table. In Tether Chess the
/// tables matter beyond a piece's own moves: any piece may borrow a
/// rank-mate's table for a transporter move, so the tables are the single
/// source of truth for both native movement and lending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

const KING_VECTORS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1), (0, -1),
    (0, 1), (1, -1), (1, 0), (1, 1),
];
const QUEEN_VECTORS: [(i8, i8); 8] = [
    (-1, 0), (1, 0), (0, -1), (0, 1),
    (-1, -1), (-1, 1), (1, -1), (1, 1),
];
const ROOK_VECTORS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_VECTORS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_VECTORS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];
const WHITE_PAWN_VECTORS: [(i8, i8); 1] = [(0, 1)];
const BLACK_PAWN_VECTORS: [(i8, i8); 1] = [(0, -1)];

impl PieceKind {
    /// Returns the one-letter mnemonic for the kind.
    pub fn symbol(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'P',
        }
    }

    /// Parses a one-letter mnemonic into a kind.
    /// Returns `None` if the character is not a valid piece symbol.
    pub fn from_symbol(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'K' => Some(PieceKind::King),
            'Q' => Some(PieceKind::Queen),
            'R' => Some(PieceKind::Rook),
            'B' => Some(PieceKind::Bishop),
            'N' => Some(PieceKind::Knight),
            'P' => Some(PieceKind::Pawn),
            _ => None,
        }
    }

    /// Whether the kind slides: its vectors repeat along a ray until
    /// blocked. Queen, Rook and Bishop slide; King, Knight and Pawn step.
    pub fn is_sliding(self) -> bool {
        matches!(self, PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop)
    }

    /// Returns the native movement-vector table for the kind.
    ///
    /// The Pawn's table is the single forward push for its color; pawn
    /// captures and the double push are rendered directly by the move
    /// generator, never by the table. All other kinds are color-blind.
    pub fn vectors(self, color: Color) -> &'static [(i8, i8)] {
        match self {
            PieceKind::King => &KING_VECTORS,
            PieceKind::Queen => &QUEEN_VECTORS,
            PieceKind::Rook => &ROOK_VECTORS,
            PieceKind::Bishop => &BISHOP_VECTORS,
            PieceKind::Knight => &KNIGHT_VECTORS,
            PieceKind::Pawn => match color {
                Color::White => &WHITE_PAWN_VECTORS,
                Color::Black => &BLACK_PAWN_VECTORS,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Piece
// ---------------------------------------------------------------------------

/// A piece with kind, color, and its displacement flag.
///
/// A piece's position lives on the board grid, not in the piece, so the
/// two can never desynchronize. `has_moved` transitions false → true on
/// the piece's first displacement and is consulted only for castling
/// eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    /// Creates a new, not-yet-moved piece.
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
        }
    }

    /// Converts the piece to its board-map character representation.
    /// Uppercase for White, lowercase for Black.
    pub fn to_char(self) -> char {
        match self.color {
            Color::White => self.kind.symbol(),
            Color::Black => self.kind.symbol().to_ascii_lowercase(),
        }
    }

    /// Parses a board-map character into a `Piece`.
    /// Returns `None` if the character is not a valid piece symbol.
    pub fn from_char(c: char) -> Option<Self> {
        let color = if c.is_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        PieceKind::from_symbol(c).map(|kind| Piece::new(kind, color))
    }
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// Represents a square on the board using 0-based file and rank indices.
///
/// - `file`: 0 (a) to 7 (h)
/// - `rank`: 0 (rank 1) to 7 (rank 8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub file: u8,
    pub rank: u8,
}

impl Square {
    /// Creates a new square from 0-based file and rank.
    pub fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8, "Square out of bounds");
        Self { file, rank }
    }

    /// Parses an algebraic notation string (e.g. "e4") into a `Square`.
    /// Returns `None` for invalid input.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file < 8 && rank < 8 {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    /// Converts the square to its algebraic notation string (e.g. "e4").
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.file) as char, self.rank + 1)
    }

    /// Returns a new square offset by `(df, dr)`, or `None` if out of bounds.
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let f = self.file as i8 + df;
        let r = self.rank as i8 + dr;
        if (0..8).contains(&f) && (0..8).contains(&r) {
            Some(Square::new(f as u8, r as u8))
        } else {
            None
        }
    }

    /// Returns a flat index (0..63) for the square.
    pub fn index(self) -> usize {
        (self.rank as usize) * 8 + self.file as usize
    }

    /// Whether this square lies on the promotion rank for `color`.
    pub fn is_promotion_rank(self, color: Color) -> bool {
        self.rank == color.promotion_rank()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

// ---------------------------------------------------------------------------
// Castling rights
// ---------------------------------------------------------------------------

/// Castling rights for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideCastlingRights {
    /// Whether kingside castling (short castling) is still available.
    pub kingside: bool,
    /// Whether queenside castling (long castling) is still available.
    pub queenside: bool,
}

impl SideCastlingRights {
    /// Rights with both options revoked.
    pub fn none() -> Self {
        Self {
            kingside: false,
            queenside: false,
        }
    }
}

impl Default for SideCastlingRights {
    fn default() -> Self {
        Self {
            kingside: true,
            queenside: true,
        }
    }
}

/// Castling rights for both sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white: SideCastlingRights,
    pub black: SideCastlingRights,
}

impl CastlingRights {
    /// Rights with every option revoked, for hand-built test positions.
    pub fn none() -> Self {
        Self {
            white: SideCastlingRights::none(),
            black: SideCastlingRights::none(),
        }
    }

    /// Returns the castling rights for the given color.
    pub fn for_color(&self, color: Color) -> &SideCastlingRights {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Returns a mutable reference to the castling rights for the given color.
    pub fn for_color_mut(&mut self, color: Color) -> &mut SideCastlingRights {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_algebraic_round_trip() {
        for file in 0..8u8 {
            for rank in 0..8u8 {
                let sq = Square::new(file, rank);
                assert_eq!(Square::from_algebraic(&sq.to_algebraic()), Some(sq));
            }
        }
    }

    #[test]
    fn square_rejects_malformed_text() {
        assert_eq!(Square::from_algebraic(""), None);
        assert_eq!(Square::from_algebraic("e"), None);
        assert_eq!(Square::from_algebraic("e9"), None);
        assert_eq!(Square::from_algebraic("i4"), None);
        assert_eq!(Square::from_algebraic("e44"), None);
    }

    #[test]
    fn square_offset_stays_on_board() {
        let sq = Square::new(0, 0); // a1
        assert_eq!(sq.offset(1, 2), Some(Square::new(1, 2)));
        assert_eq!(sq.offset(-1, 0), None);
        assert_eq!(sq.offset(0, -1), None);
        assert_eq!(Square::new(7, 7).offset(1, 0), None);
    }

    #[test]
    fn promotion_rank_is_far_rank() {
        assert!(Square::new(4, 7).is_promotion_rank(Color::White));
        assert!(!Square::new(4, 7).is_promotion_rank(Color::Black));
        assert!(Square::new(4, 0).is_promotion_rank(Color::Black));
    }

    #[test]
    fn sliding_flag_matches_kinds() {
        assert!(PieceKind::Queen.is_sliding());
        assert!(PieceKind::Rook.is_sliding());
        assert!(PieceKind::Bishop.is_sliding());
        assert!(!PieceKind::King.is_sliding());
        assert!(!PieceKind::Knight.is_sliding());
        assert!(!PieceKind::Pawn.is_sliding());
    }

    #[test]
    fn pawn_table_is_single_forward_push() {
        assert_eq!(PieceKind::Pawn.vectors(Color::White), &[(0, 1)]);
        assert_eq!(PieceKind::Pawn.vectors(Color::Black), &[(0, -1)]);
    }

    #[test]
    fn piece_char_round_trip() {
        let p = Piece::new(PieceKind::Knight, Color::Black);
        assert_eq!(p.to_char(), 'n');
        assert_eq!(Piece::from_char('n'), Some(p));
        assert_eq!(Piece::from_char('x'), None);
    }
}
