//! Game orchestration for the Tether Chess rule engine.
//!
//! The [`Engine`] owns one game: the board, side to move, castling
//! rights, the en-passant target, and the move history. It validates
//! requested moves against the generator, applies them, and classifies
//! the resulting position (check, checkmate, stalemate). One engine
//! instance is the scope of all mutable state; hosts that run many games
//! hold one engine per game, keyed by [`Engine::id`], and serialize
//! operations on each instance themselves.

use crate::attack;
use crate::board::Board;
use crate::error::EngineError;
use crate::movegen;
use crate::moves::Move;
use crate::types::{CastlingRights, Color, PieceKind, SideCastlingRights, Square};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Game state & move result
// ---------------------------------------------------------------------------

/// The state of a game as classified after every applied move.
///
/// The three draw variants beyond stalemate are reserved enumerants for
/// hosts that track them externally; this engine never produces them
/// (repetition and move-count clocks are out of its scope).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    WhiteWinsCheckmate,
    BlackWinsCheckmate,
    Stalemate,
    /// Reserved; never produced.
    DrawByRepetition,
    /// Reserved; never produced.
    DrawByFiftyMoves,
    /// Reserved; never produced.
    DrawByInsufficientMaterial,
}

impl GameState {
    /// Whether the game has reached a terminal state.
    pub fn is_terminal(self) -> bool {
        self != GameState::InProgress
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::InProgress => write!(f, "in progress"),
            GameState::WhiteWinsCheckmate => write!(f, "1-0 (checkmate)"),
            GameState::BlackWinsCheckmate => write!(f, "0-1 (checkmate)"),
            GameState::Stalemate => write!(f, "1/2-1/2 (stalemate)"),
            GameState::DrawByRepetition => write!(f, "1/2-1/2 (repetition)"),
            GameState::DrawByFiftyMoves => write!(f, "1/2-1/2 (fifty moves)"),
            GameState::DrawByInsufficientMaterial => {
                write!(f, "1/2-1/2 (insufficient material)")
            }
        }
    }
}

/// The outcome of one move request.
///
/// `ok == false` means the board is unchanged; `message` carries a short
/// human description either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResult {
    /// Whether the move was accepted and applied.
    pub ok: bool,
    /// A descriptive message about the result.
    pub message: String,
    /// The applied move, if any.
    #[serde(rename = "move")]
    pub mv: Option<Move>,
    /// Whether the move put the opposing king in check (native attacks
    /// only; transporter reach never checks).
    pub gives_check: bool,
    /// Whether the move ended the game by checkmate.
    pub is_checkmate: bool,
}

impl MoveResult {
    fn accepted(mv: Move, gives_check: bool, is_checkmate: bool) -> Self {
        Self {
            ok: true,
            message: format!("move played: {}", mv.to_text()),
            mv: Some(mv),
            gives_check,
            is_checkmate,
        }
    }

    fn rejected(err: &EngineError) -> Self {
        Self {
            ok: false,
            message: err.to_string(),
            mv: None,
            gives_check: false,
            is_checkmate: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// A complete Tether Chess game with full state and history tracking.
#[derive(Debug, Clone)]
pub struct Engine {
    /// Unique identifier for the game.
    pub id: Uuid,

    /// Current board position.
    pub board: Board,

    /// Side to move.
    pub turn: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// En passant target square (if a pawn just advanced two squares).
    pub en_passant: Option<Square>,

    /// History of moves made in the game, append-only.
    pub history: Vec<Move>,

    state: GameState,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates a new game from the standard starting position.
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        log::debug!("game {}: new game from the starting position", id);
        Self {
            id,
            board: Board::starting_position(),
            turn: Color::White,
            castling: CastlingRights::default(),
            en_passant: None,
            history: Vec::new(),
            state: GameState::InProgress,
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns `true` if the game has ended.
    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns `true` if the side to move is in check (native attacks only).
    pub fn in_check(&self) -> bool {
        attack::is_in_check(&self.board, self.turn)
    }

    /// Returns the board as a display map (only occupied squares):
    /// square name → piece symbol, uppercase for White.
    pub fn board_view(&self) -> HashMap<String, String> {
        self.board.to_map()
    }

    /// Returns the rank-mates of the piece on `sq`: the squares of the
    /// friendly pieces it is currently entangled with. Recomputed from
    /// the live board on every call; there is no stored entanglement.
    pub fn rank_mates_of(&self, sq: Square) -> Vec<Square> {
        self.board
            .rank_mates(sq)
            .into_iter()
            .map(|(mate_sq, _)| mate_sq)
            .collect()
    }

    /// Generates all legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        movegen::generate_legal_moves(&self.board, self.turn, &self.castling, self.en_passant)
    }

    /// Generates the legal moves starting on `from`.
    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|m| m.from == from)
            .collect()
    }

    // -- analysis filters ---------------------------------------------------

    /// The legal moves that borrow a rank-mate's vector table.
    pub fn transporter_moves(&self) -> Vec<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|m| m.is_transporter())
            .collect()
    }

    /// The legal Pawn-Knight Apex moves: pawns promoting mid-L-jump.
    pub fn pawn_knight_apex_moves(&self) -> Vec<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|m| m.is_pawn_knight_apex())
            .collect()
    }

    /// The legal moves that put the opposing king in check.
    pub fn checking_moves(&self) -> Vec<Move> {
        let enemy = self.turn.opponent();
        self.legal_moves()
            .into_iter()
            .filter(|mv| {
                let mut test_board = self.board.clone();
                test_board.apply_move(mv);
                attack::is_in_check(&test_board, enemy)
            })
            .collect()
    }

    /// The Michael Tal openings: available only before the first move, a
    /// queen or rook on its back rank borrowing a back-rank knight's
    /// L-jump to vault the pawn wall.
    pub fn michael_tal_moves(&self) -> Vec<Move> {
        if !self.history.is_empty() {
            return Vec::new();
        }
        let back = self.turn.back_rank();
        self.transporter_moves()
            .into_iter()
            .filter(|m| {
                matches!(m.mover.kind, PieceKind::Queen | PieceKind::Rook)
                    && m.mover.square.rank == back
                    && m.borrowed_from
                        .is_some_and(|l| l.kind == PieceKind::Knight && l.square.rank == back)
            })
            .collect()
    }

    // -- move application ---------------------------------------------------

    /// Applies the move `(from, to, promotion)` if it is legal.
    ///
    /// On rejection the board is unchanged and the result carries the
    /// reason. Omitting `promotion` for a promotion move selects the
    /// queen, the documented default.
    pub fn apply(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> MoveResult {
        match self.try_apply(from, to, promotion) {
            Ok(result) => result,
            Err(err) => {
                log::debug!(
                    "game {}: rejected {} -> {}: {}",
                    self.id,
                    from,
                    to,
                    err
                );
                MoveResult::rejected(&err)
            }
        }
    }

    /// Applies a move given in the minimal text form
    /// `from-to[=promo]` (the dash is optional): `"e2-e4"`, `"e2e4"`,
    /// `"d7-d8=Q"`.
    pub fn apply_text(&mut self, text: &str) -> MoveResult {
        match parse_move_text(text) {
            Ok((from, to, promotion)) => self.apply(from, to, promotion),
            Err(err) => {
                log::debug!("game {}: rejected \"{}\": {}", self.id, text, err);
                MoveResult::rejected(&err)
            }
        }
    }

    fn try_apply(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveResult, EngineError> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }

        let piece = self
            .board
            .get(from)
            .ok_or(EngineError::EmptySource(from))?;
        if piece.color != self.turn {
            return Err(EngineError::WrongColorToMove {
                square: from,
                owner: piece.color,
                turn: self.turn,
            });
        }

        let legal = self.legal_moves();
        let mv = match_move(&legal, from, to, promotion)?;

        self.board.apply_move(&mv);
        self.update_castling_rights(&mv);

        // En-passant bookkeeping: only a native two-square pawn push
        // leaves a target behind; everything else clears it.
        self.en_passant = None;
        if mv.mover.kind == PieceKind::Pawn
            && !mv.is_transporter()
            && mv.from.file == mv.to.file
            && (mv.to.rank as i8 - mv.from.rank as i8).abs() == 2
        {
            let transit_rank = (mv.from.rank as i8 + self.turn.pawn_direction()) as u8;
            self.en_passant = Some(Square::new(mv.from.file, transit_rank));
        }

        self.history.push(mv);
        let mover_color = self.turn;
        self.turn = self.turn.opponent();

        // Classification: only native attacks can check or mate.
        let gives_check = attack::is_in_check(&self.board, self.turn);
        let replies = self.legal_moves();
        let is_checkmate = gives_check && replies.is_empty();
        let is_stalemate = !gives_check && replies.is_empty();

        if is_checkmate {
            self.state = match mover_color {
                Color::White => GameState::WhiteWinsCheckmate,
                Color::Black => GameState::BlackWinsCheckmate,
            };
            log::info!("game {}: checkmate — {} wins", self.id, mover_color);
        } else if is_stalemate {
            self.state = GameState::Stalemate;
            log::info!("game {}: stalemate", self.id);
        }

        log::debug!(
            "game {}: {} played {}",
            self.id,
            mover_color,
            mv.to_text()
        );
        Ok(MoveResult::accepted(mv, gives_check, is_checkmate))
    }

    /// Updates castling rights after a move: any king move clears both of
    /// its color's rights; any move from or capture on a rook home square
    /// clears the corresponding right.
    fn update_castling_rights(&mut self, mv: &Move) {
        if mv.mover.kind == PieceKind::King {
            *self.castling.for_color_mut(mv.mover.color) = SideCastlingRights::none();
        }

        let mut check_rook_square = |sq: Square| {
            if sq == Square::new(7, 0) {
                self.castling.white.kingside = false;
            }
            if sq == Square::new(0, 0) {
                self.castling.white.queenside = false;
            }
            if sq == Square::new(7, 7) {
                self.castling.black.kingside = false;
            }
            if sq == Square::new(0, 7) {
                self.castling.black.queenside = false;
            }
        };

        check_rook_square(mv.from);
        check_rook_square(mv.to);
    }
}

/// Creates a new game. Equivalent to [`Engine::new`].
pub fn new_game() -> Engine {
    Engine::new()
}

/// Finds the legal move matching `(from, to, promotion)`.
///
/// Two transporter moves may share endpoints while borrowing from
/// different lenders; the first in generation order (lenders in
/// ascending file order) is selected; the variants are interchangeable on the
/// board. A promotion move requested without a promotion kind selects
/// the queen variant.
fn match_move(
    legal: &[Move],
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> Result<Move, EngineError> {
    let candidates: Vec<&Move> = legal
        .iter()
        .filter(|m| m.from == from && m.to == to)
        .collect();

    if candidates.is_empty() {
        let available: Vec<String> = legal
            .iter()
            .filter(|m| m.from == from)
            .map(|m| m.to.to_algebraic())
            .collect();
        let message = if available.is_empty() {
            format!("{} has no legal moves", from)
        } else {
            format!(
                "{} -> {} is not legal; legal destinations from {}: {}",
                from,
                to,
                from,
                available.join(", ")
            )
        };
        return Err(EngineError::IllegalMove(message));
    }

    let chosen = match promotion {
        Some(kind) => candidates
            .iter()
            .find(|m| m.promotion == Some(kind))
            .ok_or_else(|| {
                EngineError::IllegalMove(format!(
                    "{} -> {} does not promote to {}",
                    from,
                    to,
                    kind.symbol()
                ))
            })?,
        None => candidates
            .iter()
            .find(|m| m.promotion.is_none())
            .or_else(|| {
                // Promotion required but unspecified: the queen is the
                // documented default.
                candidates
                    .iter()
                    .find(|m| m.promotion == Some(PieceKind::Queen))
            })
            .expect("promotion variants always include a queen"),
    };
    Ok(**chosen)
}

/// Parses the minimal move text `from-to[=promo]`; the dash is optional.
fn parse_move_text(
    text: &str,
) -> Result<(Square, Square, Option<PieceKind>), EngineError> {
    let trimmed = text.trim();
    let (move_part, promotion) = match trimmed.split_once('=') {
        Some((m, p)) => {
            let mut chars = p.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Err(EngineError::IllegalMove(format!(
                    "invalid promotion piece: \"{}\"",
                    p
                )));
            };
            let kind = PieceKind::from_symbol(c)
                .filter(|k| !matches!(k, PieceKind::King | PieceKind::Pawn))
                .ok_or_else(|| {
                    EngineError::IllegalMove(format!("invalid promotion piece: \"{}\"", p))
                })?;
            (m, Some(kind))
        }
        None => (trimmed, None),
    };

    let (from_text, to_text) = match move_part.split_once('-') {
        Some((a, b)) => (a, b),
        None if move_part.len() == 4 => move_part.split_at(2),
        None => {
            return Err(EngineError::InvalidSquare(move_part.to_string()));
        }
    };

    let from = Square::from_algebraic(from_text)
        .ok_or_else(|| EngineError::InvalidSquare(from_text.to_string()))?;
    let to = Square::from_algebraic(to_text)
        .ok_or_else(|| EngineError::InvalidSquare(to_text.to_string()))?;
    Ok((from, to, promotion))
}
