//! Chess board model: computes the squares each piece may move to and applies
//! moves, including captures, castling, en passant and pawn promotion.
//!
//! Moves are pseudo-legal: they follow piece movement rules and respect
//! occupancy, but leaving one's own king in check is not detected. The game
//! ends when a king is captured, which [`chess::board::Board::move_piece`]
//! reports as [`chess::board::MoveOutcome::KingCaptured`].
//!
//! ```
//! use chessington::chess::board::{Board, MoveOutcome};
//! use chessington::chess::core::{Promotion, Square};
//!
//! let mut board = Board::starting();
//! let e2 = Square::try_from("e2").unwrap();
//! let e4 = Square::try_from("e4").unwrap();
//! assert!(board.available_moves(e2).contains(&e4));
//! assert_eq!(
//!     board.move_piece(e2, e4, &mut Promotion::Queen).unwrap(),
//!     MoveOutcome::Moved
//! );
//! assert_eq!(board.en_passant(), Some(e4));
//! ```

// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]
// Rustdoc lints.
#![warn(
    rustdoc::private_doc_tests,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]

pub mod chess;
