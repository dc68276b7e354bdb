//! Attack detection for the Tether Chess rule engine.
//!
//! Two distinct relations coexist over (attacker, target):
//!
//! - **Native reach** ([`can_natively_attack`], [`natively_attacked`]):
//!   attack produced by a piece's own vector table, path-checked for
//!   sliders. This is the check relation: the only thing that can put a
//!   king in check or deliver checkmate.
//! - **Full threat** ([`threatens`]): native reach plus pseudo-legal
//!   transporter reach. Used exclusively to forbid the king from stepping
//!   onto a square (and to gate castling transit squares); it never
//!   contributes to check.
//!
//! `threatens` works on pseudo-legal transporter moves (the lender side's
//! own king safety is ignored), so it never recurses through the legality
//! filter.

use crate::board::Board;
use crate::movegen;
use crate::types::{Color, PieceKind, Square};

/// Returns `true` if the piece on `origin` natively attacks `target`.
///
/// - A pawn attacks the two squares diagonally ahead of it (its table
///   holds only the push, which is not an attack).
/// - A king or knight attacks the squares its vector table steps to.
/// - A slider attacks along its rays through empty squares only.
///
/// Returns `false` if `origin` is empty.
pub fn can_natively_attack(board: &Board, origin: Square, target: Square) -> bool {
    let Some(piece) = board.get(origin) else {
        return false;
    };
    if origin == target {
        return false;
    }
    let df = target.file as i8 - origin.file as i8;
    let dr = target.rank as i8 - origin.rank as i8;

    match piece.kind {
        PieceKind::Pawn => df.abs() == 1 && dr == piece.color.pawn_direction(),
        PieceKind::King | PieceKind::Knight => {
            piece.kind.vectors(piece.color).contains(&(df, dr))
        }
        _ => {
            // Slider: walk each ray until blocked; the target must be the
            // first occupied square (or reached over empty ones).
            for &(vf, vr) in piece.kind.vectors(piece.color) {
                let mut cur = origin;
                while let Some(next) = cur.offset(vf, vr) {
                    if next == target {
                        return true;
                    }
                    if board.get(next).is_some() {
                        break;
                    }
                    cur = next;
                }
            }
            false
        }
    }
}

/// Returns `true` if any piece of `by_color` natively attacks `target`.
///
/// This is the check relation: kings are in check exactly when their
/// square is natively attacked.
pub fn natively_attacked(board: &Board, target: Square, by_color: Color) -> bool {
    for rank in 0..8u8 {
        for file in 0..8u8 {
            let origin = Square::new(file, rank);
            if let Some(piece) = board.get(origin)
                && piece.color == by_color
                && can_natively_attack(board, origin, target)
            {
                return true;
            }
        }
    }
    false
}

/// Returns `true` if the king of the given color is currently in check.
///
/// Only the native relation counts; a square reachable solely by an
/// opposing transporter move is not check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    if let Some(king_sq) = board.find_king(color) {
        natively_attacked(board, king_sq, color.opponent())
    } else {
        // No king found — should never happen in a legal game
        false
    }
}

/// Returns `true` if `by_color` threatens `target`: natively attacks it,
/// or has a pseudo-legal transporter move ending on it.
///
/// This is the stealth-capture-prevention relation. It gates king
/// destinations and castling transit squares; it does not define check.
pub fn threatens(board: &Board, target: Square, by_color: Color) -> bool {
    natively_attacked(board, target, by_color)
        || movegen::transporter_reaches(board, by_color, target)
}
