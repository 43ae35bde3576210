//! # Grid-based chess rules
//!
//! `gridchess` keeps a chess position as a plain 8x8 grid of pieces and implements the rules on
//! top of it: move generation, filtering out moves that leave the king in check, castling,
//! promotion to a queen, and checkmate and stalemate detection. Positions can be read from and
//! written to FEN, and moves use the UCI notation.
//!
//! Besides the rules, the crate can drive an external UCI engine while restricting its choice
//! to a given set of moves (see [`engine`]), and encode positions as occupancy planes for
//! neural networks (see [`planes`]).
//!
//! En passant and underpromotion are not supported.
//!
//! # Example
//!
//! ```
//! use gridchess::{Board, Color, Game, Outcome};
//!
//! let mut game = Game::new_initial();
//! game.push_uci_list("f2f3 e7e5 g2g4 d8h4").unwrap();
//! assert_eq!(
//!     game.outcome(),
//!     Some(Outcome::Checkmate { winner: Color::Black })
//! );
//! assert_eq!(
//!     game.board().as_fen(),
//!     "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
//! );
//! ```

pub mod board;
pub mod castling;
pub mod direction;
pub mod engine;
pub mod game;
pub mod legal;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod planes;

pub use gridchess_base::{bitboard, geometry, types};

pub use bitboard::Bitboard;
pub use board::Board;
pub use direction::DirectionRules;
pub use engine::{EngineConfig, EngineError, MoveSelector, UciEngine};
pub use game::Game;
pub use legal::LegalMoveMap;
pub use moves::{Move, MoveError, MoveKind, MoveList, MoveRecord, UciMove};
pub use piece::Piece;
pub use planes::Planes;
pub use types::{CastlingRights, CastlingSide, Color, File, Outcome, PieceKind, Rank, Square};
