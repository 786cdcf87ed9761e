//! Pieces standing on the [`Board`] and the operations a caller performs
//! through them.
//!
//! Pieces have identity: two white pawns are different pieces even though they
//! have the same kind and owner. Each [`Piece`] receives a unique [`PieceId`]
//! on creation and the board locates pieces by that id.

use std::fmt::{self, Write};
use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::bail;

use crate::chess::board::{Board, MoveOutcome};
use crate::chess::core::{CastleSide, PieceKind, Player, Promotion, Square};
use crate::chess::movegen::{self, MoveList};
use crate::chess::promotion::PromotionChooser;

/// Unique identity of a [`Piece`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(u32);

impl PieceId {
    fn next() -> Self {
        static NEXT_ID: AtomicU32 = AtomicU32::new(0);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Represents a specific piece owned by a player.
///
/// `Piece` is a cheap copyable handle: the copy stored on the [`Board`] is the
/// authoritative one and the board updates its "has moved" flag as the game
/// goes on.
#[derive(Clone, Copy, Debug)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    owner: Player,
    has_moved: bool,
}

impl Piece {
    /// Creates a new piece that has never moved.
    #[must_use]
    pub fn new(kind: PieceKind, owner: Player) -> Self {
        Self {
            id: PieceId::next(),
            kind,
            owner,
            has_moved: false,
        }
    }

    /// Identity of this piece, stable for as long as it is on the board.
    #[must_use]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    /// What kind of piece this is.
    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// The player this piece belongs to.
    #[must_use]
    pub const fn owner(&self) -> Player {
        self.owner
    }

    /// Once a piece moves, it can no longer take part in castling (king and
    /// rook) or make a double step (pawn).
    #[must_use]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub(super) fn mark_moved(&mut self) {
        self.has_moved = true;
    }

    /// Row increment of moving "forward" for this piece's owner.
    #[must_use]
    pub const fn direction(&self) -> i8 {
        self.owner.forward()
    }

    /// Square this piece is standing on.
    ///
    /// # Errors
    ///
    /// If the piece is not on the board.
    pub fn position(&self, board: &Board) -> anyhow::Result<Square> {
        board.find_piece(self)
    }

    /// Squares this piece can move to, see [`movegen::available_moves`].
    ///
    /// # Errors
    ///
    /// If the piece is not on the board.
    pub fn available_moves(&self, board: &Board) -> anyhow::Result<MoveList> {
        let from = self.position(board)?;
        Ok(board.available_moves(from))
    }

    /// Moves this piece to `to`.
    ///
    /// # Errors
    ///
    /// If the piece is not on the board or `to` is outside of the board.
    pub fn move_to(
        &self,
        board: &mut Board,
        to: Square,
        chooser: &mut impl PromotionChooser,
    ) -> anyhow::Result<MoveOutcome> {
        let from = self.position(board)?;
        board.move_piece(from, to, chooser)
    }

    /// Castles a rook manually: an unmoved rook jumps two columns towards the
    /// king. The king is not touched. This is an ordinary move of the rook,
    /// so it also passes the turn.
    ///
    /// Returns [`MoveOutcome::Ignored`] if the rook has already moved.
    ///
    /// # Errors
    ///
    /// If the piece is not a rook, is not on the board or the target square is
    /// outside of the board.
    pub fn castle(&self, board: &mut Board, side: CastleSide) -> anyhow::Result<MoveOutcome> {
        if self.kind != PieceKind::Rook {
            bail!("only rooks can castle on their own, got {:?}", self.kind);
        }
        let from = self.position(board)?;
        let has_moved = board.get_piece(from).map_or(self.has_moved, |rook| rook.has_moved);
        if has_moved {
            return Ok(MoveOutcome::Ignored);
        }
        let to = match side {
            CastleSide::Queenside => from.offset(0, 2),
            CastleSide::Kingside => from.offset(0, -2),
        };
        board.move_piece(from, to, &mut Promotion::Queen)
    }

    /// Squares reachable from `from` according to this piece's movement rules.
    pub(super) fn moves_from(&self, board: &Board, from: Square) -> MoveList {
        movegen::available_moves(board, self, from)
    }
}

/// Pieces are equal when they are the same piece, whatever their state.
impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Piece {}

impl fmt::Display for Piece {
    /// FEN symbol: uppercase for White, lowercase for Black.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.kind.symbol();
        f.write_char(match self.owner {
            Player::White => symbol.to_ascii_uppercase(),
            Player::Black => symbol,
        })
    }
}
