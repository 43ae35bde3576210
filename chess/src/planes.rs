//! Occupancy planes for feeding positions to a neural network

use crate::board::Board;
use crate::moves::Move;
use crate::types::{Color, PieceKind, Square};

/// Number of planes: one per piece kind and color
pub const PLANE_COUNT: usize = 2 * PieceKind::COUNT;

/// Size of the flat representation returned by [`Planes::as_flat()`]
pub const FLAT_LEN: usize = PLANE_COUNT * 64;

/// Board occupancy as `12 x 8 x 8` floats
///
/// Plane `kind` holds White pieces of this kind and plane `kind + 6` holds Black ones, with
/// kinds numbered from pawn (`0`) to king (`5`). Each plane is indexed by file first, then by
/// rank. A cell is `1.0` if the corresponding piece occupies the square and `0.0` otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Planes([[[f32; 8]; 8]; PLANE_COUNT]);

/// Returns the plane holding pieces of kind `kind` and color `color`
#[inline]
pub const fn plane_index(color: Color, kind: PieceKind) -> usize {
    color.index() * PieceKind::COUNT + kind.index()
}

/// Index of `sq` along one axis of a `64 x 64` move score table
#[inline]
pub const fn square_index(sq: Square) -> usize {
    sq.file().index() * 8 + sq.rank().index()
}

/// Returns the `(from, to)` cell of a `64 x 64` move score table that corresponds to `mv`
#[inline]
pub const fn move_index(mv: Move) -> (usize, usize) {
    (square_index(mv.src()), square_index(mv.dst()))
}

/// Picks the move with the highest score in a flattened `64 x 64` table
///
/// Returns `None` if there are no moves or the table is too short.
pub fn best_move<'a>(scores: &[f32], moves: impl IntoIterator<Item = &'a Move>) -> Option<Move> {
    if scores.len() < 64 * 64 {
        return None;
    }
    let mut best: Option<(Move, f32)> = None;
    for &mv in moves {
        let (from, to) = move_index(mv);
        let score = scores[from * 64 + to];
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((mv, score));
        }
    }
    best.map(|(mv, _)| mv)
}

impl Planes {
    pub fn from_board(b: &Board) -> Planes {
        let mut res = [[[0.0; 8]; 8]; PLANE_COUNT];
        for p in b.pieces() {
            let plane = plane_index(p.color, p.kind);
            res[plane][p.square.file().index()][p.square.rank().index()] = 1.0;
        }
        Planes(res)
    }

    #[inline]
    pub fn get(&self, plane: usize, sq: Square) -> f32 {
        self.0[plane][sq.file().index()][sq.rank().index()]
    }

    #[inline]
    pub fn raw(&self) -> &[[[f32; 8]; 8]; PLANE_COUNT] {
        &self.0
    }

    /// Flattens the planes in plane, file, rank order
    pub fn as_flat(&self) -> Vec<f32> {
        self.0.iter().flatten().flatten().copied().collect()
    }
}

impl From<&Board> for Planes {
    fn from(b: &Board) -> Planes {
        Planes::from_board(b)
    }
}
