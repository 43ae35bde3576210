use crate::types::{CastlingSide, Color, File, Rank, Square};

pub const KNIGHT_JUMPS: [(isize, isize); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_STEPS: [(isize, isize); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const DIAGONALS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

pub const ORTHOGONALS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub const fn castling_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    }
}

pub const fn pawn_start_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    }
}

pub const fn promote_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R8,
        Color::Black => Rank::R1,
    }
}

/// Rank delta of a single pawn step
pub const fn pawn_forward(c: Color) -> isize {
    match c {
        Color::White => 1,
        Color::Black => -1,
    }
}

pub const fn king_home(c: Color) -> Square {
    Square::from_parts(File::E, castling_rank(c))
}

pub const fn rook_home(c: Color, s: CastlingSide) -> Square {
    let file = match s {
        CastlingSide::King => File::H,
        CastlingSide::Queen => File::A,
    };
    Square::from_parts(file, castling_rank(c))
}

pub const fn castling_king_dst(c: Color, s: CastlingSide) -> Square {
    let file = match s {
        CastlingSide::King => File::G,
        CastlingSide::Queen => File::C,
    };
    Square::from_parts(file, castling_rank(c))
}

pub const fn castling_rook_dst(c: Color, s: CastlingSide) -> Square {
    let file = match s {
        CastlingSide::King => File::F,
        CastlingSide::Queen => File::D,
    };
    Square::from_parts(file, castling_rank(c))
}
