use crate::piece::Piece;
use crate::types::{CastlingSide, Color, Square};

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;
use thiserror::Error;

/// Chess move, given by its source and destination squares
///
/// Castling is represented as the king's two-square move, promotion as the pawn's move to the
/// last rank. Which of those a move is depends on the position, see [`MoveKind`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    src: Square,
    dst: Square,
}

impl Move {
    #[inline]
    pub const fn new(src: Square, dst: Square) -> Move {
        Move { src, dst }
    }

    #[inline]
    pub const fn src(&self) -> Square {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Square {
        self.dst
    }
}

/// Formats the move as two lowercase squares, e.g. `e2e4`
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)
    }
}

/// Move kind, determined when the move is applied
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    /// Any move or capture except castling and promotion
    Simple = 0,
    /// Kingside castling
    CastlingKingside = 1,
    /// Queenside castling
    CastlingQueenside = 2,
    /// Pawn reaching the last rank and turning into a queen (either non-capture or capture)
    Promote = 3,
}

impl From<CastlingSide> for MoveKind {
    #[inline]
    fn from(side: CastlingSide) -> Self {
        match side {
            CastlingSide::King => Self::CastlingKingside,
            CastlingSide::Queen => Self::CastlingQueenside,
        }
    }
}

impl TryFrom<MoveKind> for CastlingSide {
    type Error = ();

    #[inline]
    fn try_from(kind: MoveKind) -> Result<Self, Self::Error> {
        match kind {
            MoveKind::CastlingKingside => Ok(Self::King),
            MoveKind::CastlingQueenside => Ok(Self::Queen),
            _ => Err(()),
        }
    }
}

/// Applied move, with everything needed to display and to undo it
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub mv: Move,
    pub kind: MoveKind,
    /// The moving piece as it was before the move
    pub piece: Piece,
    /// Piece removed from the destination square, if any
    pub captured: Option<Piece>,
    pub(crate) prev_halfmove_clock: u16,
    pub(crate) prev_move_number: u16,
}

impl MoveRecord {
    #[inline]
    pub fn side(&self) -> Color {
        self.piece.color
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Formats the record as in a move log, e.g. `W: E2 -> E4`
impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "{}: {} -> {}",
            self.side().as_char().to_ascii_uppercase(),
            self.mv.src.name(),
            self.mv.dst.name()
        )
    }
}

/// Error indicating that a move or a move query was rejected
///
/// The board is never modified when one of these is returned.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MoveError {
    /// There is no piece on the square
    #[error("no piece on {0}")]
    EmptySquare(Square),
    /// The piece on the square belongs to the side not to move
    #[error("piece on {0} does not belong to the side to move")]
    NotSideToMove(Square),
    /// The move is not in the current set of legal moves
    #[error("move {0} is not legal")]
    Illegal(Move),
    /// The game is already over
    #[error("game is finished")]
    GameFinished,
}

#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, 256>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, 256>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        MoveList(iter.into_iter().collect())
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}
