//! Utilities to work with moves in UCI format

use super::base;
use crate::board::Board;
use crate::geometry;
use crate::types::{PieceKind, Square, SquareParseError};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing a UCI move string
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ParseError {
    /// Bad string length
    #[error("bad string length")]
    BadLength,
    /// Bad source square
    #[error("bad source: {0}")]
    BadSrc(SquareParseError),
    /// Bad destination square
    #[error("bad destination: {0}")]
    BadDst(SquareParseError),
    /// Bad promote character
    #[error("bad promote char {0:?}")]
    BadPromote(char),
    /// Promotion to anything except a queen
    #[error("promotion to {0:?} is not supported")]
    Underpromotion(PieceKind),
}

/// Parsed move in UCI format
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    /// Source square
    pub src: Square,
    /// Destination square
    pub dst: Square,
    /// Piece to promote, if any
    pub promote: Option<PieceKind>,
}

impl Move {
    /// Converts `mv` into UCI form in position `b`
    ///
    /// A pawn move to the last rank gets the `q` suffix, as promotion always yields a queen.
    pub fn from_move(mv: base::Move, b: &Board) -> Move {
        let promote = b.piece_at(mv.src()).and_then(|p| {
            (p.kind == PieceKind::Pawn && mv.dst().rank() == geometry::promote_rank(p.color))
                .then_some(PieceKind::Queen)
        });
        Move {
            src: mv.src(),
            dst: mv.dst(),
            promote,
        }
    }

    /// Converts the UCI move into [`moves::Move`](super::Move)
    ///
    /// The returned move is **not** checked for legality.
    pub fn into_move(self) -> Result<base::Move, ParseError> {
        match self.promote {
            None | Some(PieceKind::Queen) => Ok(base::Move::new(self.src, self.dst)),
            Some(p) => Err(ParseError::Underpromotion(p)),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)?;
        if let Some(p) = self.promote {
            write!(f, "{}", p.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        if !s.is_ascii() || !matches!(s.len(), 4 | 5) {
            return Err(ParseError::BadLength);
        }
        let src = Square::from_str(&s[0..2]).map_err(ParseError::BadSrc)?;
        let dst = Square::from_str(&s[2..4]).map_err(ParseError::BadDst)?;
        let promote = if s.len() == 5 {
            let c = s.as_bytes()[4] as char;
            match PieceKind::from_char(c) {
                Some(p @ (PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen))
                    if c.is_ascii_lowercase() =>
                {
                    Some(p)
                }
                _ => return Err(ParseError::BadPromote(c)),
            }
        } else {
            None
        };
        Ok(Move { src, dst, promote })
    }
}
