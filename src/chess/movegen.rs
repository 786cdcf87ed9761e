//! Pseudo-legal move generation: destinations that follow the piece movement
//! rules and respect occupancy, without checking whether the mover's king is
//! left in check.
//!
//! Friends and enemies are always determined relative to the owner of the
//! moving piece, so the generator works for either side regardless of whose
//! turn it is.

use std::ops::RangeInclusive;

use arrayvec::ArrayVec;

use crate::chess::board::Board;
use crate::chess::core::{Direction, PieceKind, Square};
use crate::chess::piece::Piece;

/// Destination squares of a single piece. A queen in the middle of an empty
/// board has 27 of them, which is the maximum.
pub type MoveList = ArrayVec<Square, 32>;

/// Knight jumps as `(rows, cols)` offsets.
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, -1),
    (2, 1),
    (-2, -1),
    (-2, 1),
    (1, -2),
    (-1, -2),
    (1, 2),
    (-1, 2),
];

/// Squares between the king and the queenside rook.
const QUEENSIDE_GAP: i8 = 3;
/// Squares between the king and the kingside rook.
const KINGSIDE_GAP: i8 = 2;

/// Destinations of `piece` standing on `from`.
#[must_use]
pub fn available_moves(board: &Board, piece: &Piece, from: Square) -> MoveList {
    let mut moves = MoveList::new();
    match piece.kind() {
        PieceKind::Pawn => pawn_moves(board, piece, from, &mut moves),
        PieceKind::Knight => knight_moves(board, piece, from, &mut moves),
        PieceKind::Bishop => bishop_moves(board, piece, from, &mut moves),
        PieceKind::Rook => rook_moves(board, piece, from, &mut moves),
        PieceKind::Queen => queen_moves(board, piece, from, &mut moves),
        PieceKind::King => king_moves(board, piece, from, &mut moves),
    }
    moves
}

/// Walks from `from` in `direction` (relative to the owner of `piece`)
/// collecting empty squares. The first square with an enemy piece is
/// collected and ends the walk; a friendly piece or the edge of the board ends
/// it without being collected. `limited` walks are a single step long.
pub fn steps_along(
    board: &Board,
    piece: &Piece,
    from: Square,
    direction: Direction,
    limited: bool,
    moves: &mut MoveList,
) {
    let (rows, cols) = direction.offset(piece.owner());
    let mut square = from;
    loop {
        square = square.offset(rows, cols);
        if !square.is_on_board() {
            break;
        }
        match board.get_piece(square) {
            None => moves.push(square),
            Some(occupant) if occupant.owner() != piece.owner() => {
                moves.push(square);
                break;
            },
            Some(_) => break,
        }
        if limited {
            break;
        }
    }
}

/// A single push to an empty square, a double push from the starting row
/// through empty squares and diagonal captures. A diagonal capture is also
/// offered en passant: when the enemy pawn that has just made a double step
/// stands right next to this one.
pub fn pawn_moves(board: &Board, pawn: &Piece, from: Square, moves: &mut MoveList) {
    let forward = pawn.direction();
    let single = from.offset(forward, 0);
    if board.is_square_empty(single) {
        moves.push(single);
        let double = single.offset(forward, 0);
        if from.row() == pawn.owner().pawns_starting() && board.is_square_empty(double) {
            moves.push(double);
        }
    }
    for side in [-1, 1] {
        let target = from.offset(forward, side);
        if !target.is_on_board() {
            continue;
        }
        let passed = from.offset(0, side);
        let en_passant =
            board.en_passant() == Some(passed) && board.has_enemy_of(passed, pawn.owner());
        if board.has_enemy_of(target, pawn.owner()) || en_passant {
            moves.push(target);
        }
    }
}

/// All L-shaped jumps that stay on the board and do not land on a friendly
/// piece.
pub fn knight_moves(board: &Board, knight: &Piece, from: Square, moves: &mut MoveList) {
    moves.extend(
        KNIGHT_JUMPS
            .iter()
            .map(|&(rows, cols)| from.offset(rows, cols))
            .filter(|&to| to.is_on_board() && !board.has_friend_of(to, knight.owner())),
    );
}

#[allow(missing_docs)]
pub fn bishop_moves(board: &Board, bishop: &Piece, from: Square, moves: &mut MoveList) {
    for direction in Direction::DIAGONAL {
        steps_along(board, bishop, from, direction, false, moves);
    }
}

#[allow(missing_docs)]
pub fn rook_moves(board: &Board, rook: &Piece, from: Square, moves: &mut MoveList) {
    for direction in Direction::ORTHOGONAL {
        steps_along(board, rook, from, direction, false, moves);
    }
}

#[allow(missing_docs)]
pub fn queen_moves(board: &Board, queen: &Piece, from: Square, moves: &mut MoveList) {
    bishop_moves(board, queen, from, moves);
    rook_moves(board, queen, from, moves);
}

/// One step in any direction. An unmoved king is also offered castling two
/// columns towards either rook when all squares in between are empty.
///
/// NOTE: Neither the rook's "has moved" flag nor attacks on the squares the king
/// passes are checked.
pub fn king_moves(board: &Board, king: &Piece, from: Square, moves: &mut MoveList) {
    for direction in Direction::ALL {
        steps_along(board, king, from, direction, true, moves);
    }
    if king.has_moved() {
        return;
    }
    let gap_is_empty =
        |mut cols: RangeInclusive<i8>| cols.all(|col| board.is_square_empty(from.offset(0, col)));
    if gap_is_empty(-QUEENSIDE_GAP..=-1) {
        moves.push(from.offset(0, -2));
    }
    if gap_is_empty(1..=KINGSIDE_GAP) {
        moves.push(from.offset(0, 2));
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::core::Player;

    fn place(board: &mut Board, square: &str, kind: PieceKind, owner: Player) -> Piece {
        let piece = Piece::new(kind, owner);
        board
            .set_piece(Square::try_from(square).unwrap(), Some(piece))
            .unwrap();
        piece
    }

    fn sorted(moves: &MoveList) -> Vec<String> {
        moves.iter().map(Square::to_string).sorted().collect()
    }

    fn squares(expected: &[&str]) -> Vec<String> {
        expected.iter().map(|s| (*s).to_string()).sorted().collect()
    }

    #[test]
    fn limited_steps() {
        let mut board = Board::empty();
        let rook = place(&mut board, "d4", PieceKind::Rook, Player::White);
        let mut moves = MoveList::new();
        steps_along(
            &board,
            &rook,
            Square::try_from("d4").unwrap(),
            Direction::Forward,
            true,
            &mut moves,
        );
        assert_eq!(sorted(&moves), squares(&["d5"]));
    }

    #[test]
    fn steps_stop_at_pieces() {
        let mut board = Board::empty();
        let rook = place(&mut board, "a1", PieceKind::Rook, Player::White);
        let _ = place(&mut board, "a4", PieceKind::Pawn, Player::Black);
        let _ = place(&mut board, "d1", PieceKind::Knight, Player::White);
        let from = Square::try_from("a1").unwrap();
        let mut moves = MoveList::new();
        steps_along(&board, &rook, from, Direction::Forward, false, &mut moves);
        assert_eq!(sorted(&moves), squares(&["a2", "a3", "a4"]));
        moves.clear();
        steps_along(&board, &rook, from, Direction::Right, false, &mut moves);
        assert_eq!(sorted(&moves), squares(&["b1", "c1"]));
        moves.clear();
        steps_along(&board, &rook, from, Direction::Left, false, &mut moves);
        assert!(moves.is_empty());
    }

    #[test]
    fn black_directions_are_mirrored() {
        let mut board = Board::empty();
        let pawn = place(&mut board, "e7", PieceKind::Pawn, Player::Black);
        let mut moves = MoveList::new();
        steps_along(
            &board,
            &pawn,
            Square::try_from("e7").unwrap(),
            Direction::ForwardLeft,
            true,
            &mut moves,
        );
        assert_eq!(sorted(&moves), squares(&["f6"]));
    }

    #[test]
    fn queen_maximum() {
        let mut board = Board::empty();
        let queen = place(&mut board, "d4", PieceKind::Queen, Player::White);
        let moves = available_moves(&board, &queen, Square::try_from("d4").unwrap());
        assert_eq!(moves.len(), 27);
    }

    #[test]
    fn knight_skips_friends() {
        let mut board = Board::empty();
        let knight = place(&mut board, "b1", PieceKind::Knight, Player::White);
        let _ = place(&mut board, "d2", PieceKind::Pawn, Player::White);
        let _ = place(&mut board, "c3", PieceKind::Pawn, Player::Black);
        let moves = available_moves(&board, &knight, Square::try_from("b1").unwrap());
        assert_eq!(sorted(&moves), squares(&["a3", "c3"]));
    }

    #[test]
    fn blocked_pawn() {
        let mut board = Board::empty();
        let pawn = place(&mut board, "e2", PieceKind::Pawn, Player::White);
        let _ = place(&mut board, "e3", PieceKind::Knight, Player::Black);
        let moves = available_moves(&board, &pawn, Square::try_from("e2").unwrap());
        assert!(moves.is_empty());
    }
}
