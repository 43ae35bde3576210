//! Board and related things

use crate::bitboard::Bitboard;
use crate::legal::{Checker, LegalMoveMap};
use crate::movegen::{self, Grid};
use crate::moves::{Move, MoveError, MoveKind, MoveRecord};
use crate::piece::Piece;
use crate::types::{
    self, CastlingRights, CastlingSide, Color, File, Outcome, PieceKind, Rank, Square,
};
use crate::{castling, geometry};

use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

/// Board validation error
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// Too many pieces of given color
    ///
    /// No more than 16 pieces of each color is allowed.
    #[error("too many pieces of color {0:?}")]
    TooManyPieces(Color),
    /// One of the sides doesn't have a king
    #[error("no king of color {0:?}")]
    NoKing(Color),
    /// One of the sides has more than one king
    #[error("more than one king of color {0:?}")]
    TooManyKings(Color),
    /// There is a pawn on the 1st or on the 8th rank
    #[error("invalid pawn position {0}")]
    InvalidPawn(Square),
    /// Opponent's king is under attack
    #[error("opponent's king is attacked")]
    OpponentKingAttacked,
}

/// Error parsing the first part of FEN (i.e. the positions of pieces on the board)
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum CellsParseError {
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Error parsing [`Board`] from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum FenParseError {
    /// FEN contains non-ASCII characters
    #[error("non-ASCII data in FEN")]
    NonAscii,
    /// FEN doesn't have board part
    #[error("board not specified")]
    NoBoard,
    /// Error parsing board from FEN
    #[error("bad board: {0}")]
    Board(#[from] CellsParseError),
    /// FEN doesn't have move side part
    #[error("no move side")]
    NoMoveSide,
    /// Error parsing move side from FEN
    #[error("bad move side: {0}")]
    MoveSide(#[from] types::ColorParseError),
    /// FEN doesn't have castling rights part
    #[error("no castling rights")]
    NoCastling,
    /// Error parsing castling rights from FEN
    #[error("bad castling rights: {0}")]
    Castling(#[from] types::CastlingRightsParseError),
    /// FEN doesn't have enpassant part
    #[error("no enpassant")]
    NoEnpassant,
    /// Error parsing enpassant from FEN
    #[error("bad enpassant: {0}")]
    Enpassant(#[from] types::SquareParseError),
    /// Enpassant rank is invalid
    #[error("invalid enpassant rank {0}")]
    InvalidEnpassantRank(Rank),
    /// Error parsing halfmove clock
    #[error("bad halfmove clock: {0}")]
    HalfmoveClock(ParseIntError),
    /// Error parsing move number
    #[error("bad move number: {0}")]
    MoveNumber(ParseIntError),
    /// FEN contains extra data
    #[error("extra data in FEN")]
    ExtraData,
    /// Board was parsed, but it's invalid
    #[error("invalid position: {0}")]
    Valid(#[from] ValidateError),
}

/// Chess board: an 8x8 grid of pieces plus the game state around it
///
/// The board is created once per game and then mutated in place by [`Board::apply_move()`].
/// It always holds a valid position: exactly one king per color, and the side that has just
/// moved is never in check. Every move is checked against the freshly computed set of legal
/// moves before anything is changed.
///
/// Castling rights are not stored. They are derived from the pieces: a right exists as long
/// as the king and the corresponding rook stand unmoved on their home squares.
///
/// # Example
///
/// ```
/// # use gridchess::{Board, Move, Square};
/// # use std::str::FromStr;
/// #
/// let mut board = Board::initial();
/// assert_eq!(board.legal_moves().move_count(), 20);
///
/// let e2 = Square::from_str("e2").unwrap();
/// let e4 = Square::from_str("e4").unwrap();
/// board.apply_move(Move::new(e2, e4)).unwrap();
/// assert_eq!(
///     board.as_fen(),
///     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    side: Color,
    history: Vec<MoveRecord>,
    captured_white: Vec<Piece>,
    captured_black: Vec<Piece>,
    halfmove_clock: u16,
    move_number: u16,
}

impl Board {
    fn empty(side: Color) -> Board {
        Board {
            grid: [None; 64],
            side,
            history: Vec::new(),
            captured_white: Vec::new(),
            captured_black: Vec::new(),
            halfmove_clock: 0,
            move_number: 1,
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> Board {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut res = Board::empty(Color::White);
        for color in [Color::White, Color::Black] {
            let back = geometry::castling_rank(color);
            let pawns = geometry::pawn_start_rank(color);
            for (file, kind) in File::iter().zip(BACK_RANK) {
                res.put_unchecked(Piece::new(kind, color, Square::from_parts(file, back)));
                res.put_unchecked(Piece::new(
                    PieceKind::Pawn,
                    color,
                    Square::from_parts(file, pawns),
                ));
            }
        }
        res
    }

    /// Parses a board from FEN
    ///
    /// Does the same as [`Board::from_str`]. It is recommended to use this function instead of
    /// `from_str()` for better readability.
    pub fn from_fen(fen: &str) -> Result<Board, FenParseError> {
        Board::from_str(fen)
    }

    /// Converts the board into a FEN string
    ///
    /// Does the same as `Board::to_string()`. It is recommended to use this function instead of
    /// `to_string()` for better readability.
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }

    /// Returns the underlying grid
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the piece on square `sq`
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.index()]
    }

    /// Returns the piece on the square with file `file` and rank `rank`
    #[inline]
    pub fn piece_at2(&self, file: File, rank: Rank) -> Option<Piece> {
        self.piece_at(Square::from_parts(file, rank))
    }

    /// Iterates over all the pieces on the board, ordered by square index
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.grid.iter().flatten()
    }

    /// Iterates over all the pieces of color `c`, ordered by square index
    pub fn pieces_of(&self, c: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |p| p.color == c)
    }

    /// Returns the bitboard over all the squares occupied by pieces of color `c`
    pub fn occupied_by(&self, c: Color) -> Bitboard {
        self.pieces_of(c).map(|p| p.square).collect()
    }

    /// Returns side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    /// Returns all the moves applied to this board, oldest first
    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Returns the pieces of color `c` captured so far, in capture order
    #[inline]
    pub fn captured(&self, c: Color) -> &[Piece] {
        match c {
            Color::White => &self.captured_white,
            Color::Black => &self.captured_black,
        }
    }

    fn captured_mut(&mut self, c: Color) -> &mut Vec<Piece> {
        match c {
            Color::White => &mut self.captured_white,
            Color::Black => &mut self.captured_black,
        }
    }

    /// Number of half-moves since the last capture or pawn move
    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// Move number, incremented after each move by Black
    #[inline]
    pub fn move_number(&self) -> u16 {
        self.move_number
    }

    /// Returns the square of the king of color `c`
    ///
    /// # Panics
    ///
    /// Panics if there is no such king. A valid board always has one, so this indicates a bug.
    pub fn king_square(&self, c: Color) -> Square {
        match self.pieces().find(|p| p.is(c, PieceKind::King)) {
            Some(p) => p.square,
            None => panic!("no {} king on the board", c.name()),
        }
    }

    /// Returns castling rights derived from the positions of unmoved kings and rooks
    pub fn castling_rights(&self) -> CastlingRights {
        let mut res = CastlingRights::EMPTY;
        for c in [Color::White, Color::Black] {
            for s in CastlingSide::ALL {
                if castling::has_right(self, c, s) {
                    res.set(c, s);
                }
            }
        }
        res
    }

    pub(crate) fn put_unchecked(&mut self, p: Piece) {
        self.grid[p.square.index()] = Some(p);
    }

    /// Returns the legal moves of every piece of the side to move
    pub fn legal_moves(&self) -> LegalMoveMap {
        LegalMoveMap::new(self)
    }

    /// Returns the legal destinations of the piece on `sq`
    ///
    /// Fails if the square is empty or holds a piece of the side not to move.
    pub fn legal_moves_from(&self, sq: Square) -> Result<Bitboard, MoveError> {
        let p = self.piece_at(sq).ok_or(MoveError::EmptySquare(sq))?;
        if p.color != self.side {
            return Err(MoveError::NotSideToMove(sq));
        }
        Ok(Checker::new(self).destinations(&p))
    }

    /// Returns the king destinations of castlings available to the side to move
    pub fn castling_destinations(&self) -> Bitboard {
        castling::destinations(self)
    }

    /// Returns `true` if the current side is in check
    pub fn is_check(&self) -> bool {
        let c = self.side;
        movegen::is_attacked(&self.grid, self.king_square(c), c.inv())
    }

    /// Returns all the pieces that give check currently
    pub fn checkers(&self) -> Bitboard {
        let c = self.side;
        movegen::attackers(&self.grid, self.king_square(c), c.inv())
    }

    /// Returns `true` if the opponent's king is under attack
    ///
    /// This never holds for a board reached by legal moves.
    pub fn is_opponent_king_attacked(&self) -> bool {
        let c = self.side;
        movegen::is_attacked(&self.grid, self.king_square(c.inv()), c)
    }

    /// Returns `true` if the current side has at least one legal move
    pub fn has_legal_moves(&self) -> bool {
        let checker = Checker::new(self);
        self.pieces_of(self.side)
            .any(|p| checker.destinations(p).is_nonempty())
    }

    /// Returns `true` if the side to move is in check and has no legal moves
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_moves()
    }

    /// Returns `true` if the side to move is not in check but has no legal moves
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_moves()
    }

    /// Calculates the outcome on the board, if the game is over
    pub fn outcome(&self) -> Option<Outcome> {
        if self.has_legal_moves() {
            return None;
        }
        if self.is_check() {
            Some(Outcome::Checkmate {
                winner: self.side.inv(),
            })
        } else {
            Some(Outcome::Stalemate)
        }
    }

    /// Applies a legal move to the board
    ///
    /// The move is validated against the current legal moves first, and the board is left
    /// untouched if it is not among them. Captures, castling and promotion are detected from
    /// the position.
    pub fn apply_move(&mut self, mv: Move) -> Result<&MoveRecord, MoveError> {
        if !self.legal_moves_from(mv.src())?.has(mv.dst()) {
            return Err(MoveError::Illegal(mv));
        }
        let record = self.apply_unchecked(mv);
        debug!("applied {} ({:?})", record, record.kind);
        self.history.push(record);
        debug_assert!(
            !self.is_opponent_king_attacked(),
            "move {} left its own king attacked",
            mv
        );
        Ok(&self.history[self.history.len() - 1])
    }

    /// Returns a copy of the board with the move applied
    ///
    /// Same as [`Board::apply_move()`], but leaves `self` intact.
    pub fn make_move(&self, mv: Move) -> Result<Board, MoveError> {
        let mut res = self.clone();
        res.apply_move(mv)?;
        Ok(res)
    }

    fn apply_unchecked(&mut self, mv: Move) -> MoveRecord {
        let (src, dst) = (mv.src(), mv.dst());
        let side = self.side;
        let piece = match self.grid[src.index()].take() {
            Some(p) => p,
            None => unreachable!("source square of a validated move is empty"),
        };

        let mut kind = MoveKind::Simple;
        if piece.kind == PieceKind::King {
            if let Some(s) = castling::side_of(side, src, dst) {
                kind = MoveKind::from(s);
                if let Some(mut rook) = self.grid[geometry::rook_home(side, s).index()].take() {
                    rook.square = geometry::castling_rook_dst(side, s);
                    rook.has_moved = true;
                    self.put_unchecked(rook);
                }
            }
        }

        let captured = self.grid[dst.index()].take();
        if let Some(c) = captured {
            self.captured_mut(c.color).push(c);
        }

        let mut moved = Piece {
            square: dst,
            has_moved: true,
            ..piece
        };
        if piece.kind == PieceKind::Pawn && dst.rank() == geometry::promote_rank(side) {
            kind = MoveKind::Promote;
            moved.kind = PieceKind::Queen;
        }
        self.put_unchecked(moved);

        let prev_halfmove_clock = self.halfmove_clock;
        if piece.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        let prev_move_number = self.move_number;
        if side == Color::Black {
            self.move_number = self.move_number.saturating_add(1);
        }
        self.side = side.inv();

        MoveRecord {
            mv,
            kind,
            piece,
            captured,
            prev_halfmove_clock,
            prev_move_number,
        }
    }

    /// Reverts the last applied move
    ///
    /// Returns `None` if no moves were applied to this board.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        let r = self.history.pop()?;
        let side = r.side();
        let (src, dst) = (r.mv.src(), r.mv.dst());

        self.grid[dst.index()] = None;
        if let Some(c) = r.captured {
            self.captured_mut(c.color).pop();
            self.put_unchecked(c);
        }
        self.put_unchecked(r.piece);
        debug_assert_eq!(r.piece.square, src);

        if let Ok(s) = CastlingSide::try_from(r.kind) {
            if let Some(mut rook) = self.grid[geometry::castling_rook_dst(side, s).index()].take() {
                rook.square = geometry::rook_home(side, s);
                rook.has_moved = false;
                self.put_unchecked(rook);
            }
        }

        self.halfmove_clock = r.prev_halfmove_clock;
        self.move_number = r.prev_move_number;
        self.side = side;
        debug!("undone {}", r);
        Some(r)
    }

    /// Checks that the position is valid
    ///
    /// Boards parsed from FEN are validated automatically, and legal moves keep a valid board
    /// valid.
    pub fn validate(&self) -> Result<(), ValidateError> {
        for c in [Color::White, Color::Black] {
            if self.pieces_of(c).count() > 16 {
                return Err(ValidateError::TooManyPieces(c));
            }
            match self.pieces_of(c).filter(|p| p.kind == PieceKind::King).count() {
                0 => return Err(ValidateError::NoKing(c)),
                1 => {}
                _ => return Err(ValidateError::TooManyKings(c)),
            }
        }

        if let Some(p) = self
            .pieces()
            .find(|p| p.kind == PieceKind::Pawn && matches!(p.square.rank(), Rank::R1 | Rank::R8))
        {
            return Err(ValidateError::InvalidPawn(p.square));
        }

        if self.is_opponent_king_attacked() {
            return Err(ValidateError::OpponentKingAttacked);
        }

        Ok(())
    }

    /// Wraps the board to allow pretty-printing with the given style `Style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use gridchess::{Board, board::PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    /// W|abcdefgh
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::initial()
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

fn parse_cells(s: &str) -> Result<Grid, CellsParseError> {
    type Error = CellsParseError;

    let mut grid = [None; 64];
    let mut file = 0_usize;
    let mut row = 0_usize;
    let rank = |row: usize| Rank::from_index(7 - row);
    for b in s.bytes() {
        match b {
            b'1'..=b'8' => {
                let add = (b - b'0') as usize;
                if file + add > 8 {
                    return Err(Error::RankOverflow(rank(row)));
                }
                file += add;
            }
            b'/' => {
                if file < 8 {
                    return Err(Error::RankUnderflow(rank(row)));
                }
                row += 1;
                file = 0;
                if row >= 8 {
                    return Err(Error::Overflow);
                }
            }
            _ => {
                if file >= 8 {
                    return Err(Error::RankOverflow(rank(row)));
                }
                let sq = Square::from_parts(File::from_index(file), rank(row));
                let p = Piece::from_char(b as char, sq).ok_or(Error::UnexpectedChar(b as char))?;
                grid[sq.index()] = Some(p);
                file += 1;
            }
        };
    }

    if file < 8 {
        return Err(Error::RankUnderflow(rank(row)));
    }
    if row < 7 {
        return Err(Error::Underflow);
    }

    Ok(grid)
}

fn check_ep(s: &str, side: Color) -> Result<(), FenParseError> {
    if s == "-" {
        return Ok(());
    }
    let ep = Square::from_str(s)?;
    let expected = match side {
        Color::White => Rank::R6,
        Color::Black => Rank::R3,
    };
    if ep.rank() != expected {
        return Err(FenParseError::InvalidEnpassantRank(ep.rank()));
    }
    Ok(())
}

/// Marks the pieces that must have moved, given the castling rights from FEN
///
/// Pawns off their start rank have moved. Kings and rooks count as unmoved only if a castling
/// right vouches for them; rights that don't match the placement are dropped.
fn restore_moved_flags(grid: &mut Grid, mut castling: CastlingRights) {
    for c in [Color::White, Color::Black] {
        let holds = |grid: &Grid, sq: Square, kind: PieceKind| {
            matches!(grid[sq.index()], Some(p) if p.is(c, kind))
        };
        if !holds(grid, geometry::king_home(c), PieceKind::King) {
            castling.unset_color(c);
        }
        for s in CastlingSide::ALL {
            if !holds(grid, geometry::rook_home(c, s), PieceKind::Rook) {
                castling.unset(c, s);
            }
        }
    }

    for p in grid.iter_mut().flatten() {
        let c = p.color;
        p.has_moved = match p.kind {
            PieceKind::Pawn => p.square.rank() != geometry::pawn_start_rank(c),
            PieceKind::King => !castling.has_color(c),
            PieceKind::Rook => !CastlingSide::ALL
                .iter()
                .any(|&s| castling.has(c, s) && geometry::rook_home(c, s) == p.square),
            _ => false,
        };
    }
}

impl FromStr for Board {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        type Error = FenParseError;

        if !s.is_ascii() {
            return Err(Error::NonAscii);
        }
        let mut iter = s.split_ascii_whitespace().fuse();

        let mut grid = parse_cells(iter.next().ok_or(Error::NoBoard)?)?;
        let side = Color::from_str(iter.next().ok_or(Error::NoMoveSide)?)?;
        let castling = CastlingRights::from_str(iter.next().ok_or(Error::NoCastling)?)?;
        check_ep(iter.next().ok_or(Error::NoEnpassant)?, side)?;
        let halfmove_clock = match iter.next() {
            Some(s) => u16::from_str(s).map_err(Error::HalfmoveClock)?,
            None => 0,
        };
        let move_number = match iter.next() {
            Some(s) => u16::from_str(s).map_err(Error::MoveNumber)?,
            None => 1,
        };

        if iter.next().is_some() {
            return Err(Error::ExtraData);
        }

        restore_moved_flags(&mut grid, castling);
        let res = Board {
            grid,
            halfmove_clock,
            move_number,
            ..Board::empty(side)
        };
        // King checks must come before anything that looks kings up
        res.validate()?;
        Ok(res)
    }
}

fn format_cells(grid: &Grid, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
    for rank in Rank::iter().rev() {
        if rank != Rank::R8 {
            write!(f, "/")?;
        }
        let mut empty = 0;
        for file in File::iter() {
            let p = match grid[Square::from_parts(file, rank).index()] {
                Some(p) => p,
                None => {
                    empty += 1;
                    continue;
                }
            };
            if empty != 0 {
                write!(f, "{}", empty)?;
                empty = 0;
            }
            write!(f, "{}", p.as_char())?;
        }
        if empty != 0 {
            write!(f, "{}", empty)?;
        }
    }
    Ok(())
}

/// Formats the board as FEN
impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        format_cells(&self.grid, f)?;
        write!(f, " {} {} -", self.side, self.castling_rights())?;
        write!(f, " {} {}", self.halfmove_clock, self.move_number)?;
        Ok(())
    }
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;
    const WHITE_INDICATOR: char;
    const BLACK_INDICATOR: char;
    const EMPTY: char = '.';

    fn piece(p: &Piece) -> char;

    fn indicator(c: Color) -> char {
        match c {
            Color::White => Self::WHITE_INDICATOR,
            Color::Black => Self::BLACK_INDICATOR,
        }
    }

    fn fmt(b: &Board, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter().rev() {
            write!(f, "{}{}", rank, Self::VERT_FRAME)?;
            for file in File::iter() {
                let c = b
                    .piece_at2(file, rank)
                    .map_or(Self::EMPTY, |p| Self::piece(&p));
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, "{}{}", Self::indicator(b.side), Self::VERT_FRAME)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';
    const WHITE_INDICATOR: char = 'W';
    const BLACK_INDICATOR: char = 'B';

    fn piece(p: &Piece) -> char {
        p.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';
    const WHITE_INDICATOR: char = '○';
    const BLACK_INDICATOR: char = '●';

    fn piece(p: &Piece) -> char {
        p.as_utf8_char()
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, f),
        }
    }
}
