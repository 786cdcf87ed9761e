//! Square-centric chess board: an 8x8 grid of optional pieces together with
//! the side to move and the en passant square.
//!
//! The rules are only partially enforced here. [`Board::move_piece`] does
//! whatever the move implies (captures, castling, en passant and promotion)
//! but trusts the caller to pick the destination from
//! [`Board::available_moves`].

use std::collections::HashMap;
use std::fmt::{self, Write};

use anyhow::{bail, Context};
use tracing::{debug, info};

use crate::chess::core::{PieceKind, Player, Square, BOARD_WIDTH};
use crate::chess::movegen::MoveList;
use crate::chess::piece::{Piece, PieceId};
use crate::chess::promotion::PromotionChooser;

const BACKRANK_PIECES: [PieceKind; BOARD_WIDTH as usize] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Rows a pawn lands on when capturing en passant: Black captures on the
/// third rank and White on the sixth.
const EN_PASSANT_CAPTURE_ROWS: [i8; 2] = [2, 5];

/// What happened as a result of [`Board::move_piece`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum MoveOutcome {
    /// There was no piece of the player to move on the source square: the
    /// board is unchanged.
    Ignored,
    /// The move was made and the turn passed to the opponent.
    Moved,
    /// The move was made and captured the opponent's king. This is the only
    /// "game over" signal: it stands in for checkmate detection.
    KingCaptured {
        #[allow(missing_docs)]
        winner: Player,
    },
}

impl MoveOutcome {
    /// The player who has won the game with this move, if any.
    #[must_use]
    pub const fn winner(self) -> Option<Player> {
        match self {
            Self::KingCaptured { winner } => Some(winner),
            Self::Ignored | Self::Moved => None,
        }
    }
}

/// The chess board and the state of the game on it.
///
/// In addition to the grid, the board maintains a [`PieceId`] to [`Square`]
/// index so that pieces can be located without scanning all squares.
#[derive(Clone)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_WIDTH as usize]; BOARD_WIDTH as usize],
    locations: HashMap<PieceId, Square>,
    current_player: Player,
    /// Square of the pawn that made a double step on the last move. It can
    /// only be captured en passant on the move that immediately follows.
    en_passant: Option<Square>,
}

impl Board {
    /// Creates a board without any pieces, White to move.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            squares: [[None; BOARD_WIDTH as usize]; BOARD_WIDTH as usize],
            locations: HashMap::new(),
            current_player: Player::White,
            en_passant: None,
        }
    }

    /// Creates the starting position of the standard chess variant.
    ///
    /// ```
    /// use chessington::chess::board::Board;
    ///
    /// assert_eq!(
    ///     Board::starting().to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for player in [Player::White, Player::Black] {
            for (col, kind) in (0..).zip(BACKRANK_PIECES) {
                board.put(
                    Square::new(player.backrank(), col),
                    Some(Piece::new(kind, player)),
                );
                board.put(
                    Square::new(player.pawns_starting(), col),
                    Some(Piece::new(PieceKind::Pawn, player)),
                );
            }
        }
        board
    }

    /// The player whose turn it is.
    #[must_use]
    pub const fn current_player(&self) -> Player {
        self.current_player
    }

    /// Square of the pawn that has just made a double step, if any.
    #[must_use]
    pub const fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// True iff the square is on the board, see [`Square::is_on_board`].
    #[must_use]
    pub const fn is_in_board(&self, square: Square) -> bool {
        square.is_on_board()
    }

    /// Returns the piece on given square. Squares outside of the board are
    /// always empty.
    #[must_use]
    pub fn get_piece(&self, square: Square) -> Option<Piece> {
        if square.is_on_board() {
            let (row, col) = index(square);
            self.squares[row][col]
        } else {
            None
        }
    }

    /// Places the piece on given square (or clears the square if `piece` is
    /// `None`), replacing the previous occupant.
    ///
    /// # Errors
    ///
    /// If the square is outside of the board.
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) -> anyhow::Result<()> {
        if !square.is_on_board() {
            bail!("square {square} is outside of the board");
        }
        self.put(square, piece);
        Ok(())
    }

    /// True for squares on the board that hold no piece.
    #[must_use]
    pub fn is_square_empty(&self, square: Square) -> bool {
        square.is_on_board() && self.get_piece(square).is_none()
    }

    /// True if the square holds a piece of the player who is not to move.
    #[must_use]
    pub fn has_enemy(&self, square: Square) -> bool {
        self.has_enemy_of(square, self.current_player)
    }

    /// True if the square holds a piece of the player to move.
    #[must_use]
    pub fn has_friend(&self, square: Square) -> bool {
        self.has_friend_of(square, self.current_player)
    }

    /// True if the square holds a piece that does not belong to `player`.
    #[must_use]
    pub fn has_enemy_of(&self, square: Square, player: Player) -> bool {
        self.get_piece(square)
            .is_some_and(|piece| piece.owner() != player)
    }

    /// True if the square holds a piece that belongs to `player`.
    #[must_use]
    pub fn has_friend_of(&self, square: Square, player: Player) -> bool {
        self.get_piece(square)
            .is_some_and(|piece| piece.owner() == player)
    }

    /// Locates the piece on the board by its identity.
    ///
    /// # Errors
    ///
    /// If the piece is not on the board. Pieces obtained from the board itself
    /// are always found, so this indicates a bug in the caller.
    pub fn find_piece(&self, piece: &Piece) -> anyhow::Result<Square> {
        let holds = |square: Square| {
            self.get_piece(square)
                .is_some_and(|occupant| occupant.id() == piece.id())
        };
        if let Some(&square) = self.locations.get(&piece.id()) {
            if holds(square) {
                return Ok(square);
            }
        }
        // The index only tracks the latest placement: a piece put on several
        // squares via set_piece is still found on the remaining ones.
        Square::iter()
            .find(|&square| holds(square))
            .with_context(|| format!("piece {} ({piece}) is not on the board", piece.id()))
    }

    /// Destinations of the piece standing on `square` (none if the square is
    /// empty).
    #[must_use]
    pub fn available_moves(&self, square: Square) -> MoveList {
        self.get_piece(square)
            .map_or_else(MoveList::new, |piece| piece.moves_from(self, square))
    }

    /// Makes a move of the piece on `from` to `to`. This is the only place the
    /// board transitions between game states:
    ///
    /// 1. A piece standing on `to` is captured.
    /// 2. A king moving more than one column also brings the corresponding rook
    ///    to the other side of it (castling).
    /// 3. A pawn landing behind the pawn that has just made a double step
    ///    captures it en passant.
    /// 4. The en passant square is updated.
    /// 5. A pawn that has reached a back rank is promoted to the piece supplied
    ///    by `chooser`.
    /// 6. The turn passes to the opponent.
    ///
    /// Moves of an empty square or of a piece that does not belong to the
    /// player to move are ignored. Otherwise the move is not validated.
    ///
    /// # Errors
    ///
    /// If either of the squares is outside of the board.
    #[tracing::instrument(level = "debug", skip(self, chooser), fields(player = %self.current_player))]
    pub fn move_piece(
        &mut self,
        from: Square,
        to: Square,
        chooser: &mut impl PromotionChooser,
    ) -> anyhow::Result<MoveOutcome> {
        if !from.is_on_board() || !to.is_on_board() {
            bail!("move {from}{to} goes outside of the board");
        }
        let Some(mut piece) = self.get_piece(from) else {
            debug!(%from, "no piece to move");
            return Ok(MoveOutcome::Ignored);
        };
        if piece.owner() != self.current_player {
            debug!(%piece, "piece does not belong to the player to move");
            return Ok(MoveOutcome::Ignored);
        }
        let captures_king = self.get_piece(to).is_some_and(|target| {
            target.kind() == PieceKind::King && target.owner() == self.current_player.opponent()
        });

        piece.mark_moved();
        self.put(from, None);
        self.put(to, Some(piece));
        debug!(%piece, %from, %to, "moved");

        self.complete_castling(&piece, from, to);
        self.complete_en_passant(&piece, to);
        self.en_passant = (piece.kind() == PieceKind::Pawn && (to.row() - from.row()).abs() > 1)
            .then_some(to);
        self.promote(&piece, to, chooser);
        self.current_player = self.current_player.opponent();

        if captures_king {
            info!(winner = %piece.owner(), "king captured");
            return Ok(MoveOutcome::KingCaptured {
                winner: piece.owner(),
            });
        }
        Ok(MoveOutcome::Moved)
    }

    /// Brings the rook over the king that has just moved two columns.
    fn complete_castling(&mut self, king: &Piece, from: Square, to: Square) {
        if king.kind() != PieceKind::King || (to.col() - from.col()).abs() <= 1 {
            return;
        }
        if !is_backrank(to.row()) {
            return;
        }
        let (rook_from, rook_to) = match to.col() {
            2 => (0, 3),
            6 => (BOARD_WIDTH - 1, 5),
            _ => return,
        };
        let (rook_from, rook_to) = (Square::new(to.row(), rook_from), Square::new(to.row(), rook_to));
        // The king is offered castling without looking at the corner square:
        // only the king's own rook comes along.
        let Some(mut rook) = self.get_piece(rook_from) else {
            return;
        };
        if rook.kind() == PieceKind::Rook && rook.owner() == king.owner() {
            rook.mark_moved();
            self.put(rook_from, None);
            self.put(rook_to, Some(rook));
            debug!(%rook, from = %rook_from, to = %rook_to, "castled");
        }
    }

    /// Removes the pawn captured en passant. Uses the en passant square set by
    /// the previous move.
    fn complete_en_passant(&mut self, pawn: &Piece, to: Square) {
        let Some(passed) = self.en_passant else {
            return;
        };
        if pawn.kind() == PieceKind::Pawn
            && to.col() == passed.col()
            && EN_PASSANT_CAPTURE_ROWS.contains(&to.row())
            && passed == to.offset(-pawn.direction(), 0)
        {
            self.put(passed, None);
            debug!(captured = %passed, "captured en passant");
        }
    }

    fn promote(&mut self, pawn: &Piece, to: Square, chooser: &mut impl PromotionChooser) {
        if pawn.kind() != PieceKind::Pawn || !is_backrank(to.row()) {
            return;
        }
        let promotion = chooser
            .choose_promotion(pawn.owner(), to)
            .unwrap_or_default();
        let mut promoted = Piece::new(promotion.into(), pawn.owner());
        promoted.mark_moved();
        self.put(to, Some(promoted));
        debug!(%promoted, square = %to, "promoted");
    }

    /// Unchecked placement that keeps the piece index in sync with the grid.
    fn put(&mut self, square: Square, piece: Option<Piece>) {
        debug_assert!(square.is_on_board(), "{square} is outside of the board");
        let (row, col) = index(square);
        let slot = &mut self.squares[row][col];
        if let Some(previous) = slot.take() {
            if self.locations.get(&previous.id()) == Some(&square) {
                let _ = self.locations.remove(&previous.id());
            }
        }
        if let Some(piece) = piece {
            let _ = self.locations.insert(piece.id(), square);
        }
        *slot = piece;
    }
}

const fn index(square: Square) -> (usize, usize) {
    (square.row() as usize, square.col() as usize)
}

const fn is_backrank(row: i8) -> bool {
    row == Player::White.backrank() || row == Player::Black.backrank()
}

impl fmt::Display for Board {
    /// Prints piece placement in FEN format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..BOARD_WIDTH).rev() {
            let mut empty_squares = 0;
            for col in 0..BOARD_WIDTH {
                if let Some(piece) = self.get_piece(Square::new(row, col)) {
                    if empty_squares != 0 {
                        write!(f, "{empty_squares}")?;
                        empty_squares = 0;
                    }
                    write!(f, "{piece}")?;
                } else {
                    empty_squares += 1;
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if row != 0 {
                const RANK_SEPARATOR: char = '/';
                f.write_char(RANK_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece) followed by the side to move and en passant square.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..BOARD_WIDTH).rev() {
            for col in 0..BOARD_WIDTH {
                match self.get_piece(Square::new(row, col)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if col != BOARD_WIDTH - 1 {
                    f.write_str(SQUARE_SEPARATOR)?;
                }
            }
            f.write_str(LINE_SEPARATOR)?;
        }
        writeln!(f, "Player to move: {:?}", &self.current_player)?;
        match self.en_passant {
            Some(square) => writeln!(f, "En Passant: {square}"),
            None => writeln!(f, "En Passant: -"),
        }
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";
