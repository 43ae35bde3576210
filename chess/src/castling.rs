//! Castling availability

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::geometry;
use crate::legal::Checker;
use crate::movegen;
use crate::types::{CastlingSide, Color, File, PieceKind, Square};

/// Files strictly between the king and the rook
const fn between_files(s: CastlingSide) -> &'static [File] {
    match s {
        CastlingSide::King => &[File::F, File::G],
        CastlingSide::Queen => &[File::B, File::C, File::D],
    }
}

/// Files the king stands on, crosses or lands on
const fn king_path_files(s: CastlingSide) -> &'static [File] {
    match s {
        CastlingSide::King => &[File::E, File::F, File::G],
        CastlingSide::Queen => &[File::E, File::D, File::C],
    }
}

fn on_castling_rank(c: Color, files: &[File]) -> impl Iterator<Item = Square> + '_ {
    let rank = geometry::castling_rank(c);
    files.iter().map(move |&f| Square::from_parts(f, rank))
}

/// Returns `true` if the king and the rook of color `c` for side `s` are both unmoved on their
/// home squares
///
/// This is what castling rights are derived from.
pub fn has_right(b: &Board, c: Color, s: CastlingSide) -> bool {
    let unmoved = |sq: Square, kind: PieceKind| {
        matches!(b.piece_at(sq), Some(p) if p.is(c, kind) && !p.has_moved)
    };
    unmoved(geometry::king_home(c), PieceKind::King)
        && unmoved(geometry::rook_home(c, s), PieceKind::Rook)
}

/// Returns `true` if color `c` can castle to side `s` right now
///
/// All of the following must hold: king and rook are unmoved, the squares between them are
/// empty, the king is not in check and does not pass through or land on an attacked square,
/// and the king is safe once both pieces are relocated.
///
/// `c` must be the side to move for the final check to be meaningful.
pub fn can_castle(b: &Board, c: Color, s: CastlingSide) -> bool {
    if !has_right(b, c, s) {
        return false;
    }
    if on_castling_rank(c, between_files(s)).any(|sq| b.piece_at(sq).is_some()) {
        return false;
    }
    if on_castling_rank(c, king_path_files(s)).any(|sq| movegen::is_attacked(b.grid(), sq, c.inv()))
    {
        return false;
    }
    Checker::new(b).is_legal_castling(s)
}

/// Returns the king destinations for every castling currently available to the side to move
pub fn destinations(b: &Board) -> Bitboard {
    let c = b.side();
    CastlingSide::ALL
        .iter()
        .filter(|&&s| can_castle(b, c, s))
        .map(|&s| geometry::castling_king_dst(c, s))
        .collect()
}

/// Returns the castling side if `src -> dst` is a king move between castling squares
pub fn side_of(c: Color, src: Square, dst: Square) -> Option<CastlingSide> {
    if src != geometry::king_home(c) {
        return None;
    }
    CastlingSide::ALL
        .iter()
        .copied()
        .find(|&s| geometry::castling_king_dst(c, s) == dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;
    use std::str::FromStr;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    const BASE: &str = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";

    #[test]
    fn test_all_conditions_hold() {
        let b = Board::from_fen(BASE).unwrap();
        assert!(can_castle(&b, Color::White, CastlingSide::King));
        assert!(can_castle(&b, Color::White, CastlingSide::Queen));
        assert_eq!(destinations(&b), Bitboard::EMPTY.with(sq("g1")).with(sq("c1")));
    }

    #[test]
    fn test_king_moved() {
        let mut b = Board::from_fen(BASE).unwrap();
        b.apply_move(Move::new(sq("e1"), sq("f1"))).unwrap();
        b.apply_move(Move::new(sq("a7"), sq("a6"))).unwrap();
        b.apply_move(Move::new(sq("f1"), sq("e1"))).unwrap();
        b.apply_move(Move::new(sq("a6"), sq("a5"))).unwrap();
        assert!(!has_right(&b, Color::White, CastlingSide::King));
        assert!(!has_right(&b, Color::White, CastlingSide::Queen));
        assert_eq!(destinations(&b), Bitboard::EMPTY);
    }

    #[test]
    fn test_rook_moved() {
        let mut b = Board::from_fen(BASE).unwrap();
        b.apply_move(Move::new(sq("h1"), sq("g1"))).unwrap();
        b.apply_move(Move::new(sq("a7"), sq("a6"))).unwrap();
        b.apply_move(Move::new(sq("g1"), sq("h1"))).unwrap();
        b.apply_move(Move::new(sq("a6"), sq("a5"))).unwrap();
        assert!(!can_castle(&b, Color::White, CastlingSide::King));
        assert!(can_castle(&b, Color::White, CastlingSide::Queen));
        assert_eq!(destinations(&b), Bitboard::EMPTY.with(sq("c1")));
    }

    #[test]
    fn test_path_blocked() {
        let b = Board::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3KB1R w KQkq - 0 1").unwrap();
        assert!(!can_castle(&b, Color::White, CastlingSide::King));
        assert!(can_castle(&b, Color::White, CastlingSide::Queen));

        // The b-file square must be empty too, even though the king never crosses it
        let b = Board::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/RN2K2R w KQkq - 0 1").unwrap();
        assert!(!can_castle(&b, Color::White, CastlingSide::Queen));
        assert!(can_castle(&b, Color::White, CastlingSide::King));
    }

    #[test]
    fn test_in_check() {
        let b = Board::from_fen("r3k2r/pppp1ppp/8/8/8/8/PPPP1PPP/R3K2R w KQkq - 0 1")
            .unwrap();
        assert!(can_castle(&b, Color::White, CastlingSide::King));
        let b = Board::from_fen("r3kr2/pppp2pp/8/8/8/8/PPPP3P/R3K2R w KQq - 0 1").unwrap();
        assert!(!can_castle(&b, Color::White, CastlingSide::King));
        let b = Board::from_fen("r3k2r/pppp1ppp/4r3/8/8/8/PPPP1PPP/R3K2R w KQq - 0 1").unwrap();
        assert!(b.is_check());
        assert!(!can_castle(&b, Color::White, CastlingSide::King));
        assert!(!can_castle(&b, Color::White, CastlingSide::Queen));
    }

    #[test]
    fn test_passing_square_attacked() {
        // The bishop on a6 covers f1, which the king would cross
        let b = Board::from_fen("4k3/8/b7/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(!b.is_check());
        assert!(!can_castle(&b, Color::White, CastlingSide::King));
        assert!(can_castle(&b, Color::White, CastlingSide::Queen));
    }

    #[test]
    fn test_destination_attacked() {
        // The pawn on b2 covers c1, the king's destination
        let b = Board::from_fen("4k3/8/8/8/8/8/1p6/R3K2R w KQ - 0 1").unwrap();
        assert!(can_castle(&b, Color::White, CastlingSide::King));
        assert!(!can_castle(&b, Color::White, CastlingSide::Queen));
    }

    #[test]
    fn test_side_of() {
        assert_eq!(
            side_of(Color::White, sq("e1"), sq("g1")),
            Some(CastlingSide::King)
        );
        assert_eq!(
            side_of(Color::Black, sq("e8"), sq("c8")),
            Some(CastlingSide::Queen)
        );
        assert_eq!(side_of(Color::White, sq("e1"), sq("f1")), None);
        assert_eq!(side_of(Color::White, sq("e8"), sq("g8")), None);
    }

    #[test]
    fn test_black() {
        let mut b = Board::from_fen(BASE).unwrap();
        b.apply_move(Move::new(sq("a2"), sq("a3"))).unwrap();
        assert_eq!(destinations(&b), Bitboard::EMPTY.with(sq("g8")).with(sq("c8")));
    }
}
