//! Filtering pseudo-legal moves down to legal ones

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::moves::{Move, MoveList};
use crate::movegen::{self, Grid};
use crate::piece::Piece;
use crate::types::{CastlingSide, Color, PieceKind, Square};
use crate::{castling, geometry};

use arrayvec::ArrayVec;

/// Decides whether a move leaves the mover's own king attacked
///
/// Each query simulates the move on a scratch copy of the grid and asks whether any opposing
/// piece attacks the king afterwards. The grid is a small `Copy` array, so no undo log is kept.
#[derive(Clone, Debug)]
pub struct Checker<'a> {
    src: &'a Board,
    side: Color,
    king: Square,
}

impl<'a> Checker<'a> {
    pub fn new(src: &'a Board) -> Self {
        let side = src.side();
        Checker {
            src,
            side,
            king: src.king_square(side),
        }
    }

    fn is_king_safe(&self, grid: &Grid, king: Square) -> bool {
        !movegen::is_attacked(grid, king, self.side.inv())
    }

    /// Returns `true` if moving the piece from `src` to `dst` does not expose the king
    ///
    /// The move must be pseudo-legal for a piece of the side to move.
    pub fn is_legal(&self, src: Square, dst: Square) -> bool {
        let mut grid = *self.src.grid();
        let mut piece = match grid[src.index()].take() {
            Some(p) => p,
            None => return false,
        };
        piece.square = dst;
        grid[dst.index()] = Some(piece);
        let king = if src == self.king { dst } else { self.king };
        self.is_king_safe(&grid, king)
    }

    /// Returns `true` if the king is safe after relocating both king and rook for castling
    ///
    /// Only the final position is checked here; the squares the king passes through are
    /// verified by [`castling`](crate::castling).
    pub fn is_legal_castling(&self, s: CastlingSide) -> bool {
        let c = self.side;
        let mut grid = *self.src.grid();
        let (king, rook) = match (
            grid[geometry::king_home(c).index()].take(),
            grid[geometry::rook_home(c, s).index()].take(),
        ) {
            (Some(king), Some(rook)) => (king, rook),
            _ => return false,
        };
        let king_dst = geometry::castling_king_dst(c, s);
        let rook_dst = geometry::castling_rook_dst(c, s);
        grid[king_dst.index()] = Some(king);
        grid[rook_dst.index()] = Some(rook);
        self.is_king_safe(&grid, king_dst)
    }

    /// Keeps only the destinations in `dsts` that are legal for the piece on `src`
    pub fn filter(&self, src: Square, dsts: Bitboard) -> Bitboard {
        dsts.into_iter()
            .filter(|&dst| self.is_legal(src, dst))
            .collect()
    }

    /// Returns all legal destinations of `p`, castling included
    ///
    /// `p` must belong to the side to move.
    pub fn destinations(&self, p: &Piece) -> Bitboard {
        let mut res = self.filter(p.square, movegen::pseudo_legal(p, self.src.grid()));
        if p.kind == PieceKind::King {
            res |= castling::destinations(self.src);
        }
        res
    }
}

/// Legal destinations of every piece of the side to move
///
/// The map is built from scratch for a given position and never updated in place. Pieces with
/// no legal moves are present with an empty set. Entries are ordered by square index.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct LegalMoveMap(ArrayVec<(Square, Bitboard), 16>);

impl LegalMoveMap {
    pub fn new(b: &Board) -> LegalMoveMap {
        let checker = Checker::new(b);
        LegalMoveMap(
            b.pieces_of(b.side())
                .map(|p| (p.square, checker.destinations(p)))
                .collect(),
        )
    }

    /// Returns the legal destinations of the piece on `sq`, or `None` if there is no piece of
    /// the side to move there
    pub fn get(&self, sq: Square) -> Option<Bitboard> {
        self.0.iter().find(|(s, _)| *s == sq).map(|(_, d)| *d)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Square, Bitboard)> + '_ {
        self.0.iter().copied()
    }

    /// Number of pieces in the map, including the ones that cannot move
    pub fn piece_count(&self) -> usize {
        self.0.len()
    }

    /// Total number of legal moves
    pub fn move_count(&self) -> usize {
        self.0.iter().map(|(_, d)| d.len() as usize).sum()
    }

    /// Returns `true` if at least one piece has a legal move
    pub fn has_moves(&self) -> bool {
        self.0.iter().any(|(_, d)| d.is_nonempty())
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.get(mv.src()).map_or(false, |d| d.has(mv.dst()))
    }

    /// Flattens the map into a list of moves
    pub fn moves(&self) -> MoveList {
        self.0
            .iter()
            .flat_map(|&(src, dsts)| dsts.into_iter().map(move |dst| Move::new(src, dst)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    #[test]
    fn test_pinned() {
        // The knight on e2 is pinned by the rook on e8
        let b = Board::from_fen("k3r3/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let checker = Checker::new(&b);
        assert!(!checker.is_legal(sq("e2"), sq("c3")));
        assert!(!checker.is_legal(sq("e2"), sq("g1")));
        assert!(checker.is_legal(sq("e1"), sq("d1")));
        assert!(checker.is_legal(sq("e1"), sq("f2")));
    }

    #[test]
    fn test_capture_resolves_check() {
        let b = Board::from_fen("k7/8/8/8/8/8/3q4/4K3 w - - 0 1").unwrap();
        let checker = Checker::new(&b);
        // The queen on d2 is unprotected, so the king may take it
        assert!(checker.is_legal(sq("e1"), sq("d2")));
        assert!(!checker.is_legal(sq("e1"), sq("e2")));
        assert!(!checker.is_legal(sq("e1"), sq("d1")));
        assert!(!checker.is_legal(sq("e1"), sq("f2")));
        assert!(checker.is_legal(sq("e1"), sq("f1")));
    }

    #[test]
    fn test_king_cannot_step_along_ray() {
        // Stepping away from the rook along its line is still check
        let b = Board::from_fen("k7/8/8/8/8/8/8/r3K3 w - - 0 1").unwrap();
        let checker = Checker::new(&b);
        assert!(!checker.is_legal(sq("e1"), sq("f1")));
        assert!(checker.is_legal(sq("e1"), sq("e2")));
        assert_eq!(
            checker.filter(sq("e1"), Bitboard::EMPTY.with(sq("d1")).with(sq("d2"))),
            Bitboard::EMPTY.with(sq("d2"))
        );
    }

    #[test]
    fn test_initial_map() {
        let map = LegalMoveMap::new(&Board::initial());
        assert_eq!(map.piece_count(), 16);
        assert_eq!(map.move_count(), 20);
        assert_eq!(map.moves().len(), 20);
        assert!(map.has_moves());
        assert_eq!(
            map.get(sq("b1")),
            Some(Bitboard::EMPTY.with(sq("a3")).with(sq("c3")))
        );
        assert_eq!(map.get(sq("a1")), Some(Bitboard::EMPTY));
        assert_eq!(map.get(sq("e4")), None);
        assert_eq!(map.get(sq("e7")), None);
        assert!(map.contains(Move::new(sq("e2"), sq("e4"))));
        assert!(!map.contains(Move::new(sq("e2"), sq("e5"))));
        let mut squares: Vec<_> = map.iter().map(|(s, _)| s).collect();
        let sorted = squares.clone();
        squares.sort();
        assert_eq!(squares, sorted);
    }

    #[test]
    fn test_pinned_entry_is_empty() {
        let b = Board::from_fen("k3r3/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let map = LegalMoveMap::new(&b);
        assert_eq!(map.get(sq("e2")), Some(Bitboard::EMPTY));
        assert_eq!(map.get(sq("e1")).map(|d| d.len()), Some(4));
    }

    #[test]
    fn test_castling_in_king_entry() {
        let b = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let map = LegalMoveMap::new(&b);
        let king = map.get(sq("e1")).unwrap();
        assert!(king.has(sq("g1")));
        assert!(king.has(sq("c1")));
        assert!(king.has(sq("f1")));
        assert_eq!(map.get(sq("a1")).map(|d| d.has(sq("a8"))), Some(true));
    }

    #[test]
    fn test_mate_map() {
        let b = Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
        let map = LegalMoveMap::new(&b);
        assert_eq!(map.piece_count(), 16);
        assert_eq!(map.move_count(), 0);
        assert!(!map.has_moves());
        assert!(map.iter().all(|(_, d)| d.is_empty()));
    }
}
