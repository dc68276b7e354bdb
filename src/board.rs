//! Board representation for the Tether Chess rule engine.
//!
//! The board is a flat 64-element array of `Option<Piece>` — `None` means
//! the square is empty. Index mapping: `rank * 8 + file` (both 0-based).
//! The board performs requested mutations; it does not decide legality.
//! Rank-mate lookup lives here because entanglement is re-derived from
//! the current grid every time it is needed; the board holds no memory
//! of former rank-mates.

use crate::moves::Move;
use crate::types::{Color, Piece, PieceKind, Square};
use std::collections::HashMap;

/// The 8×8 occupancy grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub squares: [Option<Piece>; 64],
}

impl Default for Board {
    /// Returns an empty board.
    fn default() -> Self {
        Self {
            squares: [None; 64],
        }
    }
}

impl Board {
    /// Returns the piece at the given square, if any.
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Sets (or clears) the piece at the given square.
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index()] = piece;
    }

    /// Creates the standard starting position.
    pub fn starting_position() -> Self {
        let mut board = Board::default();

        let mut place = |file: u8, rank: u8, kind: PieceKind, color: Color| {
            board.set(Square::new(file, rank), Some(Piece::new(kind, color)));
        };

        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in back_rank.iter().enumerate() {
            place(file as u8, 0, kind, Color::White);
            place(file as u8, 7, kind, Color::Black);
        }
        for file in 0..8 {
            place(file, 1, PieceKind::Pawn, Color::White);
            place(file, 6, PieceKind::Pawn, Color::Black);
        }

        board
    }

    /// Finds the king square for the given color.
    /// Returns `None` if the king is not on the board. (Should never happen
    /// in a legal game.)
    pub fn find_king(&self, color: Color) -> Option<Square> {
        for rank in 0..8u8 {
            for file in 0..8u8 {
                let sq = Square::new(file, rank);
                if let Some(piece) = self.get(sq)
                    && piece.kind == PieceKind::King
                    && piece.color == color
                {
                    return Some(sq);
                }
            }
        }
        None
    }

    /// Returns the rank-mates of the piece on `sq`: friendly pieces on the
    /// same rank, excluding the piece itself, in ascending file order.
    ///
    /// Returns an empty list if `sq` is empty. The lookup always reads the
    /// current grid, so a piece that changed rank has exactly the mates of
    /// its new rank and none of its old ones.
    pub fn rank_mates(&self, sq: Square) -> Vec<(Square, Piece)> {
        let Some(piece) = self.get(sq) else {
            return Vec::new();
        };
        let mut mates = Vec::new();
        for file in 0..8u8 {
            if file == sq.file {
                continue;
            }
            let mate_sq = Square::new(file, sq.rank);
            if let Some(mate) = self.get(mate_sq)
                && mate.color == piece.color
            {
                mates.push((mate_sq, mate));
            }
        }
        mates
    }

    /// Applies a move to the grid (mutating it). Used both for testing
    /// legality on a clone and for actually making moves in the game.
    ///
    /// This handles the physical mutation only:
    /// - normal moves and captures
    /// - castling (relocates the rook)
    /// - en passant (removes the captured pawn from its own square)
    /// - promotion (replaces the pawn with the promoted piece)
    /// - the `has_moved` flag on every displaced piece
    ///
    /// Castle rights, the en-passant target, and history are maintained by
    /// the engine on top of this.
    pub fn apply_move(&mut self, mv: &Move) {
        let mut piece = self.get(mv.from).expect("No piece on from square");
        piece.has_moved = true;

        self.set(mv.from, None);

        // Castling: relocate the rook (h -> f kingside, a -> d queenside).
        if mv.is_castling {
            let rank = mv.from.rank;
            let (rook_from, rook_to) = if mv.to.file == 6 {
                (Square::new(7, rank), Square::new(5, rank))
            } else {
                (Square::new(0, rank), Square::new(3, rank))
            };
            if let Some(mut rook) = self.get(rook_from) {
                rook.has_moved = true;
                self.set(rook_from, None);
                self.set(rook_to, Some(rook));
            }
        }

        // En passant: the captured pawn sits on the mover's origin rank,
        // on the destination file.
        if mv.is_en_passant {
            self.set(Square::new(mv.to.file, mv.from.rank), None);
        }

        let placed = if let Some(promo_kind) = mv.promotion {
            Piece {
                kind: promo_kind,
                color: piece.color,
                has_moved: true,
            }
        } else {
            piece
        };
        self.set(mv.to, Some(placed));
    }

    /// Converts the board to its display map (only occupied squares).
    /// Key = square name (e.g. "e4"), value = piece symbol, uppercase for
    /// White and lowercase for Black.
    pub fn to_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        for rank in 0..8u8 {
            for file in 0..8u8 {
                let sq = Square::new(file, rank);
                if let Some(piece) = self.get(sq) {
                    map.insert(sq.to_algebraic(), piece.to_char().to_string());
                }
            }
        }
        map
    }
}
