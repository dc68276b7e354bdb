//! Move generation and validation for the Tether Chess rule engine.
//!
//! This module generates complete legal moves for the variant:
//!
//! - Native piece movement (King, Queen, Rook, Bishop, Knight, Pawn),
//!   including castling, en passant and promotion
//! - Transporter moves: a piece borrowing the native vector table of a
//!   friendly rank-mate, applied from the borrower's own square
//! - The Pawn-Knight Apex (a pawn promoting mid-L-jump)
//! - The legality filter: no move may leave the own king natively
//!   attacked, and the king may not move onto any threatened square
//!
//! "No recursive jumping" holds by construction: the transporter loop
//! iterates over a mate's *native* vectors only, so a transporter move is
//! never fed back in as something further to borrow.

use crate::attack;
use crate::board::Board;
use crate::moves::{Move, MoveBuilder, PieceOnSquare};
use crate::types::{CastlingRights, Color, Piece, PieceKind, Square};

/// The four kinds a pawn may promote to, queen first (the default).
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

fn snapshot(piece: Piece, sq: Square) -> PieceOnSquare {
    PieceOnSquare::new(piece.kind, piece.color, sq)
}

// ---------------------------------------------------------------------------
// Pseudo-legal move generation (before the king-safety filter)
// ---------------------------------------------------------------------------

/// Generates all pseudo-legal moves for the given side: native moves plus
/// transporter moves for every friendly piece.
///
/// "Pseudo-legal" means the moves follow movement rules but may leave the
/// own king exposed. `generate_legal_moves` filters those out.
fn generate_pseudo_legal_moves(
    board: &Board,
    turn: Color,
    castling: &CastlingRights,
    en_passant: Option<Square>,
) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);

    for rank in 0..8u8 {
        for file in 0..8u8 {
            let from = Square::new(file, rank);
            let piece = match board.get(from) {
                Some(p) if p.color == turn => p,
                _ => continue,
            };

            match piece.kind {
                PieceKind::King => generate_king_moves(board, from, piece, castling, &mut moves),
                PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop => {
                    generate_sliding_moves(board, from, piece, &mut moves)
                }
                PieceKind::Knight => generate_step_moves(board, from, piece, &mut moves),
                PieceKind::Pawn => generate_pawn_moves(board, from, piece, en_passant, &mut moves),
            }

            generate_transporter_moves(board, from, piece, &mut moves);
        }
    }

    moves
}

/// Generates native sliding moves (rook, bishop, queen) from the piece's
/// own vector table.
fn generate_sliding_moves(board: &Board, from: Square, piece: Piece, moves: &mut Vec<Move>) {
    let mover = snapshot(piece, from);
    for &(df, dr) in piece.kind.vectors(piece.color) {
        let mut cur = from;
        while let Some(to) = cur.offset(df, dr) {
            match board.get(to) {
                None => {
                    moves.push(MoveBuilder::new(mover, to).build());
                    cur = to;
                }
                Some(target) => {
                    if target.color != piece.color {
                        moves.push(
                            MoveBuilder::new(mover, to)
                                .captures(snapshot(target, to))
                                .build(),
                        );
                    }
                    break;
                }
            }
        }
    }
}

/// Generates native single-step moves (knight, and the king's plain
/// steps) from the piece's own vector table.
fn generate_step_moves(board: &Board, from: Square, piece: Piece, moves: &mut Vec<Move>) {
    let mover = snapshot(piece, from);
    for &(df, dr) in piece.kind.vectors(piece.color) {
        if let Some(to) = from.offset(df, dr) {
            match board.get(to) {
                None => moves.push(MoveBuilder::new(mover, to).build()),
                Some(target) => {
                    if target.color != piece.color {
                        moves.push(
                            MoveBuilder::new(mover, to)
                                .captures(snapshot(target, to))
                                .build(),
                        );
                    }
                }
            }
        }
    }
}

/// Generates king moves, including castling.
///
/// Castling is emitted only when the rights are intact, the squares
/// between king and rook are empty, the rook is present, and none of
/// {king square, transit square, destination} is under *full threat*, so
/// the king may not castle through squares an opposing transporter move
/// could reach either.
fn generate_king_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    castling: &CastlingRights,
    moves: &mut Vec<Move>,
) {
    generate_step_moves(board, from, piece, moves);

    let color = piece.color;
    let rights = castling.for_color(color);
    let rank = color.back_rank();
    let king_start = Square::new(4, rank);

    if from != king_start {
        return;
    }
    if !rights.kingside && !rights.queenside {
        return;
    }

    let enemy = color.opponent();
    let mover = snapshot(piece, from);

    if attack::threatens(board, from, enemy) {
        return;
    }

    // Kingside: f and g must be empty, the rook on h present, and the
    // king's path e-f-g free of threat.
    if rights.kingside {
        let f_sq = Square::new(5, rank);
        let g_sq = Square::new(6, rank);
        let rook_sq = Square::new(7, rank);

        let path_clear = board.get(f_sq).is_none() && board.get(g_sq).is_none();
        let rook_present = matches!(
            board.get(rook_sq),
            Some(Piece { kind: PieceKind::Rook, color: c, .. }) if c == color
        );
        let safe =
            !attack::threatens(board, f_sq, enemy) && !attack::threatens(board, g_sq, enemy);

        if path_clear && rook_present && safe {
            moves.push(MoveBuilder::new(mover, g_sq).castling().build());
        }
    }

    // Queenside: b, c and d must be empty, the rook on a present, and the
    // king's path e-d-c free of threat (b needs only to be empty).
    if rights.queenside {
        let d_sq = Square::new(3, rank);
        let c_sq = Square::new(2, rank);
        let b_sq = Square::new(1, rank);
        let rook_sq = Square::new(0, rank);

        let path_clear = board.get(d_sq).is_none()
            && board.get(c_sq).is_none()
            && board.get(b_sq).is_none();
        let rook_present = matches!(
            board.get(rook_sq),
            Some(Piece { kind: PieceKind::Rook, color: c, .. }) if c == color
        );
        let safe =
            !attack::threatens(board, d_sq, enemy) && !attack::threatens(board, c_sq, enemy);

        if path_clear && rook_present && safe {
            moves.push(MoveBuilder::new(mover, c_sq).castling().build());
        }
    }
}

/// Generates native pawn moves: single push, double push from the start
/// rank, diagonal captures, en passant, and promotion variants.
fn generate_pawn_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    en_passant: Option<Square>,
    moves: &mut Vec<Move>,
) {
    let color = piece.color;
    let dir = color.pawn_direction();
    let mover = snapshot(piece, from);

    // Pushes and captures onto the far rank promote; all four variants
    // are emitted, queen first.
    let mut add_move = |to: Square, captured: Option<PieceOnSquare>, is_ep: bool| {
        if to.is_promotion_rank(color) {
            for kind in PROMOTION_KINDS {
                let mut builder = MoveBuilder::new(mover, to).promotes_to(kind);
                if let Some(target) = captured {
                    builder = builder.captures(target);
                }
                moves.push(builder.build());
            }
        } else {
            let mut builder = MoveBuilder::new(mover, to);
            if let Some(target) = captured {
                builder = builder.captures(target);
            }
            if is_ep {
                builder = builder.en_passant();
            }
            moves.push(builder.build());
        }
    };

    // Single step forward
    if let Some(one_ahead) = from.offset(0, dir)
        && board.get(one_ahead).is_none()
    {
        add_move(one_ahead, None, false);

        // Double step from the starting rank
        if from.rank == color.pawn_start_rank()
            && let Some(two_ahead) = from.offset(0, dir * 2)
            && board.get(two_ahead).is_none()
        {
            add_move(two_ahead, None, false);
        }
    }

    // Diagonal captures
    for df in [-1i8, 1] {
        if let Some(to) = from.offset(df, dir) {
            if let Some(target) = board.get(to)
                && target.color != color
            {
                add_move(to, Some(snapshot(target, to)), false);
            }

            // En passant: the captured pawn sits beside the mover, on the
            // mover's origin rank.
            if en_passant == Some(to) {
                let victim_sq = Square::new(to.file, from.rank);
                if let Some(victim) = board.get(victim_sq) {
                    add_move(to, Some(snapshot(victim, victim_sq)), true);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Transporter moves
// ---------------------------------------------------------------------------

/// Walks every pseudo-legal transporter destination of the piece on
/// `from` and calls `f(dest, mate_square, mate)` for each.
///
/// For every rank-mate M and every vector in M's *native* table, the
/// ray/step originates at the borrower's square. Borrowed sliding vectors
/// traverse empty squares only; the destination must be empty or hold an
/// enemy piece. Duplicates across mates are reported once per lender.
pub(crate) fn for_each_transporter_target<F>(board: &Board, from: Square, piece: Piece, mut f: F)
where
    F: FnMut(Square, Square, Piece),
{
    for (mate_sq, mate) in board.rank_mates(from) {
        let sliding = mate.kind.is_sliding();
        for &(df, dr) in mate.kind.vectors(mate.color) {
            if sliding {
                let mut cur = from;
                while let Some(to) = cur.offset(df, dr) {
                    match board.get(to) {
                        None => {
                            f(to, mate_sq, mate);
                            cur = to;
                        }
                        Some(target) => {
                            if target.color != piece.color {
                                f(to, mate_sq, mate);
                            }
                            break;
                        }
                    }
                }
            } else if let Some(to) = from.offset(df, dr) {
                match board.get(to) {
                    None => f(to, mate_sq, mate),
                    Some(target) => {
                        if target.color != piece.color {
                            f(to, mate_sq, mate);
                        }
                    }
                }
            }
        }
    }
}

/// Generates transporter moves for the piece on `from`.
///
/// A pawn transported onto its far rank promotes; all four variants are
/// emitted, and a knight lender makes them Pawn-Knight Apex moves. A
/// transporter move never captures a king: the opposing king is shielded
/// from stealth capture by the threat filter, and a position where it is
/// exposed anyway must not lose the king off the board.
fn generate_transporter_moves(board: &Board, from: Square, piece: Piece, moves: &mut Vec<Move>) {
    let mover = snapshot(piece, from);
    for_each_transporter_target(board, from, piece, |to, mate_sq, mate| {
        let captured = board.get(to).map(|target| snapshot(target, to));
        if captured.is_some_and(|c| c.kind == PieceKind::King) {
            return;
        }
        let lender = snapshot(mate, mate_sq);

        if piece.kind == PieceKind::Pawn && to.is_promotion_rank(piece.color) {
            for kind in PROMOTION_KINDS {
                let mut builder = MoveBuilder::new(mover, to)
                    .borrowing(lender)
                    .promotes_to(kind);
                if let Some(target) = captured {
                    builder = builder.captures(target);
                }
                moves.push(builder.build());
            }
        } else {
            let mut builder = MoveBuilder::new(mover, to).borrowing(lender);
            if let Some(target) = captured {
                builder = builder.captures(target);
            }
            moves.push(builder.build());
        }
    });
}

/// Returns `true` if any piece of `by_color` has a pseudo-legal
/// transporter move ending on `target`.
///
/// Pseudo-legal: the mover's own king safety is ignored, which cannot
/// affect whether `target` is reachable in one ply. Used by the full
/// threat relation.
pub(crate) fn transporter_reaches(board: &Board, by_color: Color, target: Square) -> bool {
    for rank in 0..8u8 {
        for file in 0..8u8 {
            let from = Square::new(file, rank);
            let piece = match board.get(from) {
                Some(p) if p.color == by_color => p,
                _ => continue,
            };
            let mut hit = false;
            for_each_transporter_target(board, from, piece, |to, _, _| {
                if to == target {
                    hit = true;
                }
            });
            if hit {
                return true;
            }
        }
    }
    false
}

// ---------------------------------------------------------------------------
// Legal move generation (with the king-safety filter)
// ---------------------------------------------------------------------------

/// Generates all legal moves for the given position.
///
/// Every pseudo-legal move is played out on a throwaway copy of the
/// board. Non-king moves are kept when the own king is not natively
/// attacked afterward. King moves (native and transporter alike) are
/// held to the stricter standard: the destination must not be under full
/// threat, so the king cannot step onto a square an opposing transporter
/// move could reach.
pub fn generate_legal_moves(
    board: &Board,
    turn: Color,
    castling: &CastlingRights,
    en_passant: Option<Square>,
) -> Vec<Move> {
    let pseudo_moves = generate_pseudo_legal_moves(board, turn, castling, en_passant);
    let mut legal_moves = Vec::with_capacity(pseudo_moves.len());

    for mv in pseudo_moves {
        let mut test_board = board.clone();
        test_board.apply_move(&mv);

        let safe = if mv.mover.kind == PieceKind::King {
            !attack::threatens(&test_board, mv.to, turn.opponent())
        } else {
            !attack::is_in_check(&test_board, turn)
        };
        if safe {
            legal_moves.push(mv);
        }
    }

    legal_moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn put(board: &mut Board, s: &str, kind: PieceKind, color: Color) {
        board.set(sq(s), Some(Piece::new(kind, color)));
    }

    fn legal_from(moves: &[Move], from: &str) -> Vec<Move> {
        moves.iter().filter(|m| m.from == sq(from)).copied().collect()
    }

    #[test]
    fn starting_position_native_moves_are_20() {
        let board = Board::starting_position();
        let moves =
            generate_legal_moves(&board, Color::White, &CastlingRights::default(), None);
        let native = moves.iter().filter(|m| !m.is_transporter()).count();
        assert_eq!(native, 20, "16 pawn moves and 4 knight moves");
    }

    #[test]
    fn starting_position_transporter_moves_are_80() {
        // Back rank: Ra1 2, Nb1 2, Bc1 4, Qd1 4, Ke1 4, Bf1 4, Ng1 2,
        // Rh1 2 (knight borrows only; everything else is walled in).
        // Each pawn borrows the forward push from its seven mates: 56.
        let board = Board::starting_position();
        let moves =
            generate_legal_moves(&board, Color::White, &CastlingRights::default(), None);
        let transporter = moves.iter().filter(|m| m.is_transporter()).count();
        assert_eq!(transporter, 80);
        assert_eq!(moves.len(), 100);
    }

    #[test]
    fn rook_borrows_knight_jump_from_its_own_square() {
        let board = Board::starting_position();
        let moves =
            generate_legal_moves(&board, Color::White, &CastlingRights::default(), None);
        let rook_moves = legal_from(&moves, "a1");

        // Both knights lend the same (+1,+2); the two moves are distinct.
        assert_eq!(rook_moves.len(), 2);
        for mv in &rook_moves {
            assert_eq!(mv.to, sq("b3"));
            let lender = mv.borrowed_from.unwrap();
            assert_eq!(lender.kind, PieceKind::Knight);
        }
        let lenders: HashSet<Square> =
            rook_moves.iter().map(|m| m.borrowed_from.unwrap().square).collect();
        assert_eq!(lenders, HashSet::from([sq("b1"), sq("g1")]));
    }

    #[test]
    fn duplicate_destinations_across_lenders_are_retained() {
        let board = Board::starting_position();
        let moves =
            generate_legal_moves(&board, Color::White, &CastlingRights::default(), None);
        let queen_to_c3: Vec<_> = moves
            .iter()
            .filter(|m| m.from == sq("d1") && m.to == sq("c3"))
            .collect();
        assert_eq!(queen_to_c3.len(), 2);
        assert!(queen_to_c3.iter().all(|m| m.is_transporter()));
    }

    #[test]
    fn no_recursive_jumping() {
        // Queen d1 with a knight and a bishop as rank-mates: its
        // transporter destinations are exactly knight-reach(d1) union
        // bishop-reach(d1); no landing square chains into a second hop.
        let mut board = Board::default();
        put(&mut board, "d1", PieceKind::Queen, Color::White);
        put(&mut board, "b1", PieceKind::Knight, Color::White);
        put(&mut board, "c1", PieceKind::Bishop, Color::White);
        put(&mut board, "h2", PieceKind::King, Color::White);
        put(&mut board, "h7", PieceKind::King, Color::Black);

        let moves =
            generate_legal_moves(&board, Color::White, &CastlingRights::none(), None);
        let queen_transporters: Vec<_> = legal_from(&moves, "d1")
            .into_iter()
            .filter(|m| m.is_transporter())
            .collect();

        let expected: HashSet<Square> = ["b2", "c3", "e3", "f2"] // knight reach
            .iter()
            .chain(["e2", "f3", "g4", "h5", "c2", "b3", "a4"].iter()) // bishop reach
            .map(|s| sq(s))
            .collect();
        let actual: HashSet<Square> = queen_transporters.iter().map(|m| m.to).collect();
        assert_eq!(actual, expected);
        assert_eq!(queen_transporters.len(), 11, "one lender per destination here");
    }

    #[test]
    fn borrowed_slide_is_blocked_by_any_occupant() {
        // Knight b1 borrows the rook's horizontal ray; a friendly pawn on
        // d1 stops it regardless of color, an enemy piece is a capture
        // endpoint.
        let mut board = Board::default();
        put(&mut board, "a1", PieceKind::Rook, Color::White);
        put(&mut board, "b1", PieceKind::Knight, Color::White);
        put(&mut board, "d1", PieceKind::Bishop, Color::White);
        put(&mut board, "h3", PieceKind::King, Color::White);
        put(&mut board, "h8", PieceKind::King, Color::Black);

        let moves =
            generate_legal_moves(&board, Color::White, &CastlingRights::none(), None);
        let knight_slides: Vec<_> = legal_from(&moves, "b1")
            .into_iter()
            .filter(|m| m.is_transporter())
            .collect();

        let dests: HashSet<Square> = knight_slides.iter().map(|m| m.to).collect();
        assert!(dests.contains(&sq("c1")), "one step right is open");
        assert!(!dests.contains(&sq("d1")), "own piece is not a capture");
        assert!(!dests.contains(&sq("e1")), "ray stops at the blocker");
        assert!(dests.contains(&sq("b8")), "vertical ray runs the file");
    }

    #[test]
    fn pawn_transporter_promotes_on_far_rank() {
        let mut board = Board::default();
        put(&mut board, "d6", PieceKind::Pawn, Color::White);
        put(&mut board, "a6", PieceKind::Knight, Color::White);
        put(&mut board, "e1", PieceKind::King, Color::White);
        put(&mut board, "h1", PieceKind::King, Color::Black);

        let moves =
            generate_legal_moves(&board, Color::White, &CastlingRights::none(), None);
        let apex: Vec<_> = moves
            .iter()
            .filter(|m| m.from == sq("d6") && m.to == sq("e8"))
            .collect();

        assert_eq!(apex.len(), 4, "all four promotion variants");
        assert!(apex.iter().all(|m| m.is_pawn_knight_apex()));
        let kinds: HashSet<PieceKind> = apex.iter().map(|m| m.promotion.unwrap()).collect();
        assert_eq!(kinds.len(), 4);
    }

    #[test]
    fn pawn_borrowing_a_rook_slide_to_the_far_rank_promotes_without_apex() {
        let mut board = Board::default();
        put(&mut board, "d6", PieceKind::Pawn, Color::White);
        put(&mut board, "h6", PieceKind::Rook, Color::White);
        put(&mut board, "e1", PieceKind::King, Color::White);
        put(&mut board, "h1", PieceKind::King, Color::Black);

        let moves =
            generate_legal_moves(&board, Color::White, &CastlingRights::none(), None);
        let promos: Vec<_> = moves
            .iter()
            .filter(|m| m.from == sq("d6") && m.to == sq("d8") && m.is_transporter())
            .collect();

        assert_eq!(promos.len(), 4);
        assert!(promos.iter().all(|m| m.promotion.is_some()));
        assert!(promos.iter().all(|m| !m.is_pawn_knight_apex()));
    }

    #[test]
    fn king_may_not_step_onto_transporter_reach() {
        // b5 is reachable only by the rook borrowing the knight's jump;
        // the black king may not step there.
        let mut board = Board::default();
        put(&mut board, "a3", PieceKind::Rook, Color::White);
        put(&mut board, "b3", PieceKind::Knight, Color::White);
        put(&mut board, "h1", PieceKind::King, Color::White);
        put(&mut board, "b6", PieceKind::King, Color::Black);

        let moves =
            generate_legal_moves(&board, Color::Black, &CastlingRights::none(), None);
        let dests: HashSet<Square> = legal_from(&moves, "b6").iter().map(|m| m.to).collect();

        assert!(!dests.contains(&sq("b5")), "stealth capture prevention");
        assert!(!dests.contains(&sq("a5")), "native knight attack");
        assert!(
            !dests.contains(&sq("b7")),
            "the knight's borrowed b-file ray reaches b7 once the king steps aside"
        );
        assert_eq!(dests, HashSet::from([sq("c6"), sq("c7")]));
    }

    #[test]
    fn castling_through_transporter_threat_is_forbidden() {
        // Black rook e3 borrows the knight's (+1,-2) onto f1: nothing
        // attacks e1/f1/g1 natively, yet kingside castling must be off.
        let mut board = Board::default();
        put(&mut board, "e1", PieceKind::King, Color::White);
        put(&mut board, "h1", PieceKind::Rook, Color::White);
        put(&mut board, "e2", PieceKind::Pawn, Color::White);
        put(&mut board, "e3", PieceKind::Rook, Color::Black);
        put(&mut board, "a3", PieceKind::Knight, Color::Black);
        put(&mut board, "a8", PieceKind::King, Color::Black);

        let mut castling = CastlingRights::none();
        castling.white.kingside = true;

        assert!(!attack::is_in_check(&board, Color::White));
        assert!(!attack::natively_attacked(&board, sq("f1"), Color::Black));

        let moves = generate_legal_moves(&board, Color::White, &castling, None);
        assert!(
            !moves.iter().any(|m| m.is_castling),
            "f1 is under transporter threat"
        );

        // Swap the lender away and the same position castles fine.
        board.set(sq("a3"), Some(Piece::new(PieceKind::Pawn, Color::Black)));
        let moves = generate_legal_moves(&board, Color::White, &castling, None);
        assert!(moves.iter().any(|m| m.is_castling));
    }

    #[test]
    fn castling_available_in_clear_position() {
        let mut board = Board::default();
        put(&mut board, "e1", PieceKind::King, Color::White);
        put(&mut board, "h1", PieceKind::Rook, Color::White);
        put(&mut board, "a1", PieceKind::Rook, Color::White);
        put(&mut board, "e8", PieceKind::King, Color::Black);

        let mut castling = CastlingRights::none();
        castling.white = Default::default();

        let moves = generate_legal_moves(&board, Color::White, &castling, None);
        let castles: Vec<_> = moves.iter().filter(|m| m.is_castling).collect();
        assert_eq!(castles.len(), 2, "both kingside and queenside");
    }

    #[test]
    fn en_passant_move_generated() {
        let mut board = Board::default();
        put(&mut board, "e1", PieceKind::King, Color::White);
        put(&mut board, "e8", PieceKind::King, Color::Black);
        put(&mut board, "e5", PieceKind::Pawn, Color::White);
        put(&mut board, "d5", PieceKind::Pawn, Color::Black);

        let ep = Some(sq("d6"));
        let moves = generate_legal_moves(&board, Color::White, &CastlingRights::none(), ep);

        let ep_moves: Vec<_> = moves.iter().filter(|m| m.is_en_passant).collect();
        assert_eq!(ep_moves.len(), 1);
        assert_eq!(ep_moves[0].from, sq("e5"));
        assert_eq!(ep_moves[0].to, sq("d6"));
        assert_eq!(ep_moves[0].captured.unwrap().square, sq("d5"));
    }

    #[test]
    fn transporter_never_captures_a_king() {
        // The black king stands on the rook's borrowed-jump square; the
        // capture is suppressed even though the threat relation sees it.
        let mut board = Board::default();
        put(&mut board, "a3", PieceKind::Rook, Color::White);
        put(&mut board, "b3", PieceKind::Knight, Color::White);
        put(&mut board, "h1", PieceKind::King, Color::White);
        put(&mut board, "b5", PieceKind::King, Color::Black);

        let moves =
            generate_legal_moves(&board, Color::White, &CastlingRights::none(), None);
        assert!(!moves.iter().any(|m| m.to == sq("b5")));
        assert!(attack::threatens(&board, sq("b5"), Color::White));
    }

    #[test]
    fn no_move_may_leave_own_king_in_native_check() {
        // The white knight is pinned to the e-file. Its native jumps and
        // its borrowed diagonals all leave the file, so every move of the
        // knight is filtered out.
        let mut board = Board::default();
        put(&mut board, "e1", PieceKind::King, Color::White);
        put(&mut board, "e4", PieceKind::Knight, Color::White);
        put(&mut board, "a4", PieceKind::Bishop, Color::White);
        put(&mut board, "e8", PieceKind::Rook, Color::Black);
        put(&mut board, "h8", PieceKind::King, Color::Black);

        let moves =
            generate_legal_moves(&board, Color::White, &CastlingRights::none(), None);
        assert!(legal_from(&moves, "e4").is_empty(), "pinned absolutely");
    }

    #[test]
    fn borrowed_slide_along_the_pin_file_stays_legal() {
        // Same pin, but the lender is a rook: the knight may crawl up the
        // e-file on the borrowed ray, staying between rook and king, and
        // may capture the pinning rook at the end of it.
        let mut board = Board::default();
        put(&mut board, "e1", PieceKind::King, Color::White);
        put(&mut board, "e4", PieceKind::Knight, Color::White);
        put(&mut board, "a4", PieceKind::Rook, Color::White);
        put(&mut board, "e8", PieceKind::Rook, Color::Black);
        put(&mut board, "h8", PieceKind::King, Color::Black);

        let moves =
            generate_legal_moves(&board, Color::White, &CastlingRights::none(), None);
        let knight_moves = legal_from(&moves, "e4");
        let dests: HashSet<Square> = knight_moves.iter().map(|m| m.to).collect();

        assert_eq!(
            dests,
            HashSet::from([sq("e2"), sq("e3"), sq("e5"), sq("e6"), sq("e7"), sq("e8")])
        );
        let capture = knight_moves.iter().find(|m| m.to == sq("e8")).unwrap();
        assert!(capture.is_capture() && capture.is_transporter());
    }
}
