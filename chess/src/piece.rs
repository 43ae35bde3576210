//! Pieces placed on the board

use crate::types::{Color, PieceKind, Square};

use std::fmt;

/// A chess piece standing on the board
///
/// The piece knows the square it occupies; the board keeps `grid[piece.square]` pointing back to
/// it. `has_moved` is set the first time the piece leaves its square and is never cleared,
/// except when a move is undone.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    pub has_moved: bool,
}

impl Piece {
    /// Creates a piece that has not moved yet
    #[inline]
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Piece {
        Piece {
            kind,
            color,
            square,
            has_moved: false,
        }
    }

    #[inline]
    pub fn is(&self, color: Color, kind: PieceKind) -> bool {
        self.color == color && self.kind == kind
    }

    /// FEN letter of the piece: uppercase for White, lowercase for Black
    pub fn as_char(&self) -> char {
        let c = self.kind.as_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Unicode chess symbol of the piece
    pub fn as_utf8_char(&self) -> char {
        const WHITE: [char; PieceKind::COUNT] = ['♙', '♘', '♗', '♖', '♕', '♔'];
        const BLACK: [char; PieceKind::COUNT] = ['♟', '♞', '♝', '♜', '♛', '♚'];
        match self.color {
            Color::White => WHITE[self.kind.index()],
            Color::Black => BLACK[self.kind.index()],
        }
    }

    /// Parses a FEN letter into a piece standing on `square`
    pub fn from_char(c: char, square: Square) -> Option<Piece> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color, square))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} {} on {}", self.color.name(), self.kind.name(), self.square.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};
    use std::mem;

    #[test]
    fn test_size() {
        assert_eq!(mem::size_of::<Piece>(), 4);
        assert_eq!(mem::size_of::<Option<Piece>>(), 4);
    }

    #[test]
    fn test_chars() {
        let sq = Square::from_parts(File::D, Rank::R1);
        let queen = Piece::new(PieceKind::Queen, Color::White, sq);
        assert_eq!(queen.as_char(), 'Q');
        assert_eq!(queen.as_utf8_char(), '♕');
        assert_eq!(Piece::from_char('Q', sq), Some(queen));

        let knight = Piece::from_char('n', sq).unwrap();
        assert!(knight.is(Color::Black, PieceKind::Knight));
        assert!(!knight.has_moved);
        assert_eq!(knight.as_char(), 'n');

        assert_eq!(Piece::from_char('x', sq), None);
        assert_eq!(queen.to_string(), "White Queen on D1");
    }
}
