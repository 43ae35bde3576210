//! Pseudo-legal move generation and attack detection
//!
//! Everything here is a pure function of a piece and the grid occupancy. Side to move and king
//! safety are not considered; see [`legal`](crate::legal) for that.

use crate::bitboard::Bitboard;
use crate::geometry;
use crate::piece::Piece;
use crate::types::{Color, PieceKind, Square};

/// Board occupancy: one optional piece per square, indexed by [`Square::index()`]
pub type Grid = [Option<Piece>; 64];

#[inline]
fn at(grid: &Grid, sq: Square) -> Option<Piece> {
    grid[sq.index()]
}

fn steps(p: &Piece, grid: &Grid, deltas: &[(isize, isize)]) -> Bitboard {
    let mut res = Bitboard::EMPTY;
    for &(df, dr) in deltas {
        if let Some(dst) = p.square.try_shift(df, dr) {
            match at(grid, dst) {
                Some(other) if other.color == p.color => {}
                _ => res.set(dst),
            }
        }
    }
    res
}

fn rays(p: &Piece, grid: &Grid, dirs: &[(isize, isize)]) -> Bitboard {
    let mut res = Bitboard::EMPTY;
    for &(df, dr) in dirs {
        let mut cur = p.square;
        while let Some(dst) = cur.try_shift(df, dr) {
            match at(grid, dst) {
                None => res.set(dst),
                Some(other) => {
                    if other.color != p.color {
                        res.set(dst);
                    }
                    break;
                }
            }
            cur = dst;
        }
    }
    res
}

fn pawn_attacks(p: &Piece) -> Bitboard {
    let fwd = geometry::pawn_forward(p.color);
    [-1, 1]
        .iter()
        .filter_map(|&df| p.square.try_shift(df, fwd))
        .collect()
}

fn pawn_moves(p: &Piece, grid: &Grid) -> Bitboard {
    let fwd = geometry::pawn_forward(p.color);
    let mut res = Bitboard::EMPTY;

    if let Some(one) = p.square.try_shift(0, fwd) {
        if at(grid, one).is_none() {
            res.set(one);
            if !p.has_moved && p.square.rank() == geometry::pawn_start_rank(p.color) {
                if let Some(two) = one.try_shift(0, fwd) {
                    if at(grid, two).is_none() {
                        res.set(two);
                    }
                }
            }
        }
    }

    for dst in pawn_attacks(p) {
        if matches!(at(grid, dst), Some(other) if other.color != p.color) {
            res.set(dst);
        }
    }
    res
}

/// Returns the squares `p` could move to, ignoring checks
///
/// Castling is not included, see [`castling`](crate::castling).
pub fn pseudo_legal(p: &Piece, grid: &Grid) -> Bitboard {
    match p.kind {
        PieceKind::Pawn => pawn_moves(p, grid),
        PieceKind::Knight => steps(p, grid, &geometry::KNIGHT_JUMPS),
        PieceKind::Bishop => rays(p, grid, &geometry::DIAGONALS),
        PieceKind::Rook => rays(p, grid, &geometry::ORTHOGONALS),
        PieceKind::Queen => {
            rays(p, grid, &geometry::DIAGONALS) | rays(p, grid, &geometry::ORTHOGONALS)
        }
        PieceKind::King => steps(p, grid, &geometry::KING_STEPS),
    }
}

/// Returns the squares attacked by `p`
///
/// Same as [`pseudo_legal()`] except for pawns: a pawn attacks both forward diagonals, empty or
/// not, and never attacks the square in front of it.
pub fn attacks(p: &Piece, grid: &Grid) -> Bitboard {
    match p.kind {
        PieceKind::Pawn => pawn_attacks(p),
        _ => pseudo_legal(p, grid),
    }
}

/// Returns all the pieces of color `by` attacking `sq`
pub fn attackers(grid: &Grid, sq: Square, by: Color) -> Bitboard {
    grid.iter()
        .flatten()
        .filter(|p| p.color == by && attacks(p, grid).has(sq))
        .map(|p| p.square)
        .collect()
}

/// Returns `true` if any piece of color `by` attacks `sq`
pub fn is_attacked(grid: &Grid, sq: Square, by: Color) -> bool {
    grid.iter()
        .flatten()
        .any(|p| p.color == by && attacks(p, grid).has(sq))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use std::str::FromStr;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    fn squares(list: &[&str]) -> Bitboard {
        list.iter().map(|s| sq(s)).collect()
    }

    fn moves_of(b: &Board, s: &str) -> Bitboard {
        pseudo_legal(&b.piece_at(sq(s)).unwrap(), b.grid())
    }

    #[test]
    fn test_initial() {
        let b = Board::initial();
        assert_eq!(moves_of(&b, "e2"), squares(&["e3", "e4"]));
        assert_eq!(moves_of(&b, "g1"), squares(&["f3", "h3"]));
        assert_eq!(moves_of(&b, "a1"), Bitboard::EMPTY);
        assert_eq!(moves_of(&b, "d1"), Bitboard::EMPTY);
        assert_eq!(moves_of(&b, "e1"), Bitboard::EMPTY);
        assert_eq!(moves_of(&b, "c8"), Bitboard::EMPTY);
        assert_eq!(moves_of(&b, "b8"), squares(&["a6", "c6"]));
        assert_eq!(moves_of(&b, "d7"), squares(&["d6", "d5"]));
    }

    #[test]
    fn test_pawns() {
        let b = Board::from_fen("4k3/8/8/3p4/2P1P3/3n4/3P4/4K3 w - - 0 1").unwrap();
        assert_eq!(moves_of(&b, "c4"), squares(&["c5", "d5"]));
        assert_eq!(moves_of(&b, "e4"), squares(&["e5", "d5"]));
        // Blocked by the knight in front
        assert_eq!(moves_of(&b, "d2"), Bitboard::EMPTY);
        assert_eq!(moves_of(&b, "d5"), squares(&["d4", "c4", "e4"]));

        // Double step is blocked if the far square is taken
        let b = Board::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(moves_of(&b, "e2"), squares(&["e3"]));
    }

    #[test]
    fn test_moved_pawn_on_start_rank() {
        let mut b = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let mut pawn = b.piece_at(sq("e2")).unwrap();
        pawn.has_moved = true;
        b.put_unchecked(pawn);
        assert_eq!(moves_of(&b, "e2"), squares(&["e3"]));
    }

    #[test]
    fn test_sliders() {
        let b = Board::from_fen("4k3/8/8/1p6/8/3B4/8/R2QK3 w - - 0 1").unwrap();
        assert_eq!(
            moves_of(&b, "d3"),
            squares(&["c4", "b5", "e4", "f5", "g6", "h7", "c2", "b1", "e2", "f1"])
        );
        assert_eq!(moves_of(&b, "a1"), squares(&[
            "b1", "c1", "a2", "a3", "a4", "a5", "a6", "a7", "a8"
        ]));
        assert_eq!(moves_of(&b, "d1").len(), 2 + 3 + 1 + 4);
    }

    #[test]
    fn test_knight_and_king() {
        let b = Board::from_fen("7k/8/8/8/8/8/1P6/N6K w - - 0 1").unwrap();
        assert_eq!(moves_of(&b, "a1"), squares(&["c2", "b3"]));
        assert_eq!(moves_of(&b, "h1"), squares(&["g1", "g2", "h2"]));
        assert_eq!(moves_of(&b, "h8"), squares(&["g8", "g7", "h7"]));
    }

    #[test]
    fn test_attacks() {
        let b = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let pawn = b.piece_at(sq("e2")).unwrap();
        assert_eq!(attacks(&pawn, b.grid()), squares(&["d3", "f3"]));
        assert!(is_attacked(b.grid(), sq("d3"), Color::White));
        assert!(!is_attacked(b.grid(), sq("e3"), Color::White));
        assert!(is_attacked(b.grid(), sq("d7"), Color::Black));
        assert_eq!(
            attackers(b.grid(), sq("f2"), Color::White),
            squares(&["e1"])
        );
        assert_eq!(attackers(b.grid(), sq("f2"), Color::Black), Bitboard::EMPTY);
    }
}
