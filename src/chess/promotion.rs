//! Pawn promotion choice is made outside of the board: typically a user
//! interface asks the player which piece they want. [`Board::move_piece`]
//! consults a [`PromotionChooser`] synchronously whenever a pawn lands on a
//! back rank.
//!
//! [`Board::move_piece`]: crate::chess::board::Board::move_piece

use anyhow::{anyhow, bail};
use tracing::warn;

use crate::chess::core::{Player, Promotion, Square};

/// Supplies the piece a pawn is promoted to. `None` falls back to
/// [`Promotion::Queen`].
pub trait PromotionChooser {
    /// Called when `player`'s pawn has just landed on `square`.
    fn choose_promotion(&mut self, player: Player, square: Square) -> Option<Promotion>;
}

/// Always promotes to the same piece.
impl PromotionChooser for Promotion {
    fn choose_promotion(&mut self, _player: Player, _square: Square) -> Option<Promotion> {
        Some(*self)
    }
}

impl<F> PromotionChooser for F
where
    F: FnMut(Player, Square) -> Option<Promotion>,
{
    fn choose_promotion(&mut self, player: Player, square: Square) -> Option<Promotion> {
        self(player, square)
    }
}

impl Promotion {
    /// Interprets an answer to "which piece to promote to?" prompt. Unknown
    /// answers are not an error: the pawn becomes a queen.
    ///
    /// ```
    /// use chessington::chess::core::Promotion;
    ///
    /// assert_eq!(Promotion::from_choice("r"), Promotion::Rook);
    /// assert_eq!(Promotion::from_choice("K"), Promotion::Knight);
    /// assert_eq!(Promotion::from_choice("pawn, please"), Promotion::Queen);
    /// ```
    #[must_use]
    pub fn from_choice(choice: &str) -> Self {
        let mut chars = choice.trim().chars();
        let parsed = match (chars.next(), chars.next()) {
            (Some(symbol), None) => Self::try_from(symbol),
            _ => Err(anyhow!("promotion should be a single symbol")),
        };
        parsed.unwrap_or_else(|e| {
            warn!(choice, error = %e, "unrecognized promotion choice, promoting to queen");
            Self::default()
        })
    }
}

impl TryFrom<char> for Promotion {
    type Error = anyhow::Error;

    /// Knight is accepted both as `N` (FEN) and `K` (what people type when
    /// asked for a "Knight").
    fn try_from(symbol: char) -> anyhow::Result<Self> {
        match symbol.to_ascii_uppercase() {
            'Q' => Ok(Self::Queen),
            'R' => Ok(Self::Rook),
            'B' => Ok(Self::Bishop),
            'N' | 'K' => Ok(Self::Knight),
            _ => bail!("promotion should be one of \"QRBNK\", got '{symbol}'"),
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn symbols() {
        assert_eq!(Promotion::try_from('q').unwrap(), Promotion::Queen);
        assert_eq!(Promotion::try_from('B').unwrap(), Promotion::Bishop);
        assert_eq!(Promotion::try_from('n').unwrap(), Promotion::Knight);
        assert_eq!(Promotion::try_from('K').unwrap(), Promotion::Knight);
    }

    #[test]
    #[should_panic(expected = "promotion should be one of \"QRBNK\", got 'p'")]
    fn pawn_is_not_a_promotion() {
        let _ = Promotion::try_from('p').unwrap();
    }

    #[test]
    fn lenient_choice() {
        assert_eq!(Promotion::from_choice(" B\n"), Promotion::Bishop);
        assert_eq!(Promotion::from_choice(""), Promotion::Queen);
        assert_eq!(Promotion::from_choice("x"), Promotion::Queen);
        assert_eq!(Promotion::from_choice("RB"), Promotion::Queen);
    }

    #[test]
    fn choosers() {
        let square = Square::new(7, 0);
        assert_eq!(
            Promotion::Rook.choose_promotion(Player::White, square),
            Some(Promotion::Rook)
        );
        let mut asked = vec![];
        let mut chooser = |player: Player, square: Square| -> Option<Promotion> {
            asked.push((player, square));
            None
        };
        assert_eq!(chooser.choose_promotion(Player::Black, Square::new(0, 3)), None);
        assert_eq!(asked, vec![(Player::Black, Square::new(0, 3))]);
    }
}
