//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};

use anyhow::bail;
use itertools::Itertools;

#[allow(missing_docs)]
pub const BOARD_WIDTH: i8 = 8;

/// A coordinate on the board: `row` 0 is White's back rank, `col` 0 is the
/// a-file.
///
/// Squares are plain values and can point outside of the board: move
/// generation walks off the edge and relies on [`Square::is_on_board`] to stop.
///
/// ```
/// use chessington::chess::core::Square;
///
/// let e2 = Square::new(1, 4);
/// assert_eq!(e2.to_string(), "e2");
/// assert_eq!(Square::try_from("e2").unwrap(), e2);
/// assert!(!Square::new(8, 4).is_on_board());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: i8,
    col: i8,
}

impl Square {
    /// Creates a square without checking the coordinates.
    #[must_use]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Rank index, 0 for rank 1.
    #[must_use]
    pub const fn row(self) -> i8 {
        self.row
    }

    /// File index, 0 for the a-file.
    #[must_use]
    pub const fn col(self) -> i8 {
        self.col
    }

    /// True iff both coordinates are within `0..BOARD_WIDTH`.
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        0 <= self.row && self.row < BOARD_WIDTH && 0 <= self.col && self.col < BOARD_WIDTH
    }

    /// Returns the square displaced by given number of rows and columns. The
    /// result is not checked against board boundaries.
    #[must_use]
    pub const fn offset(self, rows: i8, cols: i8) -> Self {
        Self::new(self.row + rows, self.col + cols)
    }

    /// Iterates over all 64 squares of the board, row by row starting from
    /// White's back rank.
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..BOARD_WIDTH)
            .cartesian_product(0..BOARD_WIDTH)
            .map(|(row, col)| Self::new(row, col))
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    /// Parses algebraic notation: "a1" is `(0, 0)`, "h8" is `(7, 7)`.
    fn try_from(square: &str) -> anyhow::Result<Self> {
        let Some((file, rank)) = square.chars().collect_tuple() else {
            bail!(
                "square should be two-char, got {square} with {} chars",
                square.chars().count()
            )
        };
        let col = match file {
            'a'..='h' => (file as u8 - b'a') as i8,
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        };
        let row = match rank {
            '1'..='8' => (rank as u8 - b'1') as i8,
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        };
        Ok(Self::new(row, col))
    }
}

impl fmt::Display for Square {
    /// Algebraic notation for squares on the board, raw coordinates otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            write!(
                f,
                "{}{}",
                (b'a' + self.col as u8) as char,
                self.row + 1
            )
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Row increment of a pawn push: White moves up the board, Black moves
    /// down.
    #[must_use]
    pub const fn forward(self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Row the player's pieces start on.
    #[must_use]
    pub const fn backrank(self) -> i8 {
        match self {
            Self::White => 0,
            Self::Black => BOARD_WIDTH - 1,
        }
    }

    /// Row the player's pawns start on, the only row a double step is
    /// possible from.
    #[must_use]
    pub const fn pawns_starting(self) -> i8 {
        self.backrank() + self.forward()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl From<Promotion> for PieceKind {
    fn from(promotion: Promotion) -> Self {
        match promotion {
            Promotion::Queen => Self::Queen,
            Promotion::Rook => Self::Rook,
            Promotion::Bishop => Self::Bishop,
            Promotion::Knight => Self::Knight,
        }
    }
}

impl PieceKind {
    /// Lowercase FEN symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.symbol())
    }
}

/// A pawn reaching the opposite back rank is replaced by one of these. Queen
/// is the default choice.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Promotion {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

/// Named directions relative to the player: "forward" points towards the
/// opponent's back rank, so Black's directions are White's ones mirrored.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    ForwardLeft,
    ForwardRight,
    BackwardLeft,
    BackwardRight,
}

impl Direction {
    /// Rook lines.
    pub const ORTHOGONAL: [Self; 4] = [Self::Forward, Self::Backward, Self::Left, Self::Right];
    /// Bishop lines.
    pub const DIAGONAL: [Self; 4] = [
        Self::ForwardLeft,
        Self::ForwardRight,
        Self::BackwardLeft,
        Self::BackwardRight,
    ];
    #[allow(missing_docs)]
    pub const ALL: [Self; 8] = [
        Self::Forward,
        Self::Backward,
        Self::Left,
        Self::Right,
        Self::ForwardLeft,
        Self::ForwardRight,
        Self::BackwardLeft,
        Self::BackwardRight,
    ];

    /// Returns `(rows, cols)` increment of a single step in this direction for
    /// given player.
    #[must_use]
    pub const fn offset(self, player: Player) -> (i8, i8) {
        let (rows, cols) = match self {
            Self::Forward => (1, 0),
            Self::Backward => (-1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::ForwardLeft => (1, -1),
            Self::ForwardRight => (1, 1),
            Self::BackwardLeft => (-1, -1),
            Self::BackwardRight => (-1, 1),
        };
        let sign = player.forward();
        (rows * sign, cols * sign)
    }
}

/// Castling can be done towards either of the two rooks: the queenside one
/// sits on the a-file, the kingside one on the h-file.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastleSide {
    Queenside,
    Kingside,
}
