//! Restricting candidate moves by their direction

use crate::geometry;
use crate::moves::Move;
use crate::piece::Piece;
use crate::types::{Color, PieceKind};

/// Set of move directions a side is allowed to play
///
/// A direction is the `(file, rank)` delta of a move, with positive rank pointing towards
/// rank 8. Straight and diagonal deltas are normalized to unit vectors before the lookup, so
/// `(0, 1)` admits every forward move along a file. Any other delta is looked up as is.
///
/// # Example
///
/// ```
/// # use gridchess::{Board, Color, DirectionRules, Move, Square};
/// # use std::str::FromStr;
/// #
/// let b = Board::initial();
/// let rules = DirectionRules::no_retreat(Color::White);
/// let mv = Move::new(Square::from_str("e2").unwrap(), Square::from_str("e4").unwrap());
/// assert!(rules.is_allowed(&b.piece_at(mv.src()).unwrap(), mv));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionRules {
    allowed: Vec<(isize, isize)>,
    allow_knight: bool,
}

/// Reduces a straight or diagonal delta to its unit vector
///
/// Other deltas, such as knight jumps, are returned unchanged.
pub fn normalize(dx: isize, dy: isize) -> (isize, isize) {
    if dx == 0 || dy == 0 || dx.abs() == dy.abs() {
        (dx.signum(), dy.signum())
    } else {
        (dx, dy)
    }
}

impl DirectionRules {
    /// Creates rules that allow exactly the directions in `allowed`
    ///
    /// If `allow_knight` is set, knights may jump anywhere regardless of `allowed`.
    pub fn new(allowed: impl IntoIterator<Item = (isize, isize)>, allow_knight: bool) -> Self {
        let mut res = DirectionRules {
            allowed: Vec::new(),
            allow_knight,
        };
        for (dx, dy) in allowed {
            res.allow(dx, dy);
        }
        res
    }

    /// Rules that allow every move
    pub fn any() -> Self {
        Self::new(geometry::KING_STEPS, true)
    }

    /// Rules that forbid every move towards the own back rank
    ///
    /// Sideways moves are still allowed, and so are knights.
    pub fn no_retreat(c: Color) -> Self {
        let forward = geometry::pawn_forward(c);
        Self::new(
            geometry::KING_STEPS
                .into_iter()
                .filter(|&(_, dy)| dy * forward >= 0),
            true,
        )
    }

    /// Adds a direction, normalizing it first
    pub fn allow(&mut self, dx: isize, dy: isize) {
        let dir = normalize(dx, dy);
        if !self.allowed.contains(&dir) {
            self.allowed.push(dir);
        }
    }

    pub fn allow_knight(&self) -> bool {
        self.allow_knight
    }

    /// Returns `true` if `piece` may play `mv` under these rules
    pub fn is_allowed(&self, piece: &Piece, mv: Move) -> bool {
        if self.allow_knight && piece.kind == PieceKind::Knight {
            return true;
        }
        let (src, dst) = (mv.src(), mv.dst());
        let dx = dst.file().index() as isize - src.file().index() as isize;
        let dy = dst.rank().index() as isize - src.rank().index() as isize;
        self.allowed.contains(&normalize(dx, dy))
    }
}
