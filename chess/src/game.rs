//! Driving a game from start to finish

use crate::bitboard::Bitboard;
use crate::board::{self, Board};
use crate::direction::DirectionRules;
use crate::engine::MoveSelector;
use crate::legal::LegalMoveMap;
use crate::moves::{self, Move, MoveError, MoveKind, MoveList, MoveRecord, UciMove};
use crate::types::{Color, Outcome, Square};

use std::fmt;
use std::str::FromStr;

use log::{info, warn};
use thiserror::Error;

/// Error playing a move given in UCI format
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum UciPlayError {
    /// The string is not a valid UCI move
    #[error("cannot parse move: {0}")]
    Parse(#[from] moves::uci::ParseError),
    /// The move was rejected by the board
    #[error("cannot apply move: {0}")]
    Move(#[from] MoveError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot play UCI move #{}: {}", .pos + 1, .source)]
pub struct UciListError {
    pub pos: usize,
    pub source: UciPlayError,
}

/// Game in progress
///
/// Wraps a [`Board`] and keeps the legal moves of the side to move, together with the outcome,
/// up to date after every move. Once the game is finished, no more moves are accepted until
/// one is popped.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    moves: LegalMoveMap,
    outcome: Option<Outcome>,
}

impl Game {
    pub fn new(board: Board) -> Self {
        let mut res = Game {
            board,
            moves: LegalMoveMap::default(),
            outcome: None,
        };
        res.refresh();
        res
    }

    pub fn new_initial() -> Self {
        Self::new(Board::initial())
    }

    pub fn from_fen(s: &str) -> Result<Self, board::FenParseError> {
        Ok(Self::new(Board::from_fen(s)?))
    }

    /// Creates a game from `b` and plays the space-separated UCI moves from `uci_list` on it
    pub fn from_uci_list(b: Board, uci_list: &str) -> Result<Self, UciListError> {
        let mut res = Game::new(b);
        res.push_uci_list(uci_list)?;
        Ok(res)
    }

    fn refresh(&mut self) {
        self.moves = self.board.legal_moves();
        self.outcome = if self.moves.has_moves() {
            None
        } else if self.board.is_check() {
            Some(Outcome::Checkmate {
                winner: self.board.side().inv(),
            })
        } else {
            Some(Outcome::Stalemate)
        };
        if let Some(outcome) = self.outcome {
            info!("game over: {}", outcome);
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side(&self) -> Color {
        self.board.side()
    }

    /// Legal moves of the side to move
    #[inline]
    pub fn legal_moves(&self) -> &LegalMoveMap {
        &self.moves
    }

    /// Legal destinations of the piece on `sq`
    pub fn moves_from(&self, sq: Square) -> Result<Bitboard, MoveError> {
        if let Some(dsts) = self.moves.get(sq) {
            return Ok(dsts);
        }
        match self.board.piece_at(sq) {
            Some(_) => Err(MoveError::NotSideToMove(sq)),
            None => Err(MoveError::EmptySquare(sq)),
        }
    }

    pub fn castling_destinations(&self) -> Bitboard {
        self.board.castling_destinations()
    }

    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        self.board.history()
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Plays a move
    ///
    /// On error, the game is left unchanged.
    pub fn push(&mut self, mv: Move) -> Result<MoveRecord, MoveError> {
        if self.is_finished() {
            return Err(MoveError::GameFinished);
        }
        let record = *self.board.apply_move(mv)?;
        self.refresh();
        Ok(record)
    }

    /// Plays a move given in UCI format, like `e2e4` or `e7e8q`
    pub fn push_uci(&mut self, s: &str) -> Result<MoveRecord, UciPlayError> {
        let mv = UciMove::from_str(s)?.into_move()?;
        Ok(self.push(mv)?)
    }

    /// Plays the space-separated UCI moves from `uci_list`
    ///
    /// Stops at the first move that fails, keeping the moves before it applied.
    pub fn push_uci_list(&mut self, uci_list: &str) -> Result<(), UciListError> {
        for (pos, token) in uci_list.split_ascii_whitespace().enumerate() {
            self.push_uci(token)
                .map_err(|source| UciListError { pos, source })?;
        }
        Ok(())
    }

    /// Takes back the last move
    pub fn pop(&mut self) -> Option<MoveRecord> {
        let record = self.board.undo()?;
        self.refresh();
        Some(record)
    }

    /// Returns the legal moves that pass `rules`, or all the legal moves if there are no rules
    pub fn candidates(&self, rules: Option<&DirectionRules>) -> MoveList {
        let mut res = self.moves.moves();
        if let Some(rules) = rules {
            res.retain(|mv| match self.board.piece_at(mv.src()) {
                Some(p) => rules.is_allowed(&p, *mv),
                None => false,
            });
        }
        res
    }

    /// Asks `selector` to pick one of the candidate moves and plays it
    ///
    /// Returns `Ok(None)` and leaves the game unchanged if there are no candidates, or if the
    /// selector declines to choose or picks a move outside of the candidates.
    pub fn play_selected(
        &mut self,
        selector: &mut impl MoveSelector,
        rules: Option<&DirectionRules>,
    ) -> Result<Option<MoveRecord>, MoveError> {
        if self.is_finished() {
            return Err(MoveError::GameFinished);
        }
        let candidates = self.candidates(rules);
        if candidates.is_empty() {
            return Ok(None);
        }
        let mv = match selector.select(&self.board, &candidates) {
            Some(mv) => mv,
            None => return Ok(None),
        };
        if !candidates.contains(&mv) {
            warn!("selected move {} is not among the candidates", mv);
            return Ok(None);
        }
        self.push(mv).map(Some)
    }

    /// Wraps the game to display its moves in UCI format, separated by spaces
    pub fn uci_list(&self) -> UciList<'_> {
        UciList(self)
    }

    /// Wraps the game to display its moves as a log, one move per line
    pub fn log(&self) -> MoveLog<'_> {
        MoveLog(self)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new_initial()
    }
}

pub struct UciList<'a>(&'a Game);

impl<'a> fmt::Display for UciList<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, r) in self.0.history().iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", r.mv)?;
            if r.kind == MoveKind::Promote {
                write!(f, "q")?;
            }
        }
        Ok(())
    }
}

pub struct MoveLog<'a>(&'a Game);

impl<'a> fmt::Display for MoveLog<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for r in self.0.history() {
            writeln!(f, "{}", r)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    const FOOLS_MATE: &str = "f2f3 e7e5 g2g4 d8h4";

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    #[test]
    fn test_initial() {
        let game = Game::new_initial();
        assert_eq!(game.legal_moves().move_count(), 20);
        assert_eq!(game.candidates(None).len(), 20);
        assert_eq!(game.side(), Color::White);
        assert_eq!(game.outcome(), None);
        assert_eq!(game.moves_from(sq("e2")).map(|d| d.len()), Ok(2));
        assert_eq!(
            game.moves_from(sq("e4")),
            Err(MoveError::EmptySquare(sq("e4")))
        );
        assert_eq!(
            game.moves_from(sq("e7")),
            Err(MoveError::NotSideToMove(sq("e7")))
        );
        assert!(game.castling_destinations().is_empty());
    }

    #[test]
    fn test_fools_mate() {
        let mut game = Game::from_uci_list(Board::initial(), FOOLS_MATE).unwrap();
        assert!(game.is_finished());
        assert_eq!(
            game.outcome(),
            Some(Outcome::Checkmate {
                winner: Color::Black
            })
        );
        assert!(game.board().is_checkmate());
        assert_eq!(game.legal_moves().piece_count(), 16);
        assert!(game.legal_moves().iter().all(|(_, d)| d.is_empty()));
        assert!(game.candidates(None).is_empty());
        assert_eq!(game.uci_list().to_string(), FOOLS_MATE);
        assert_eq!(
            game.log().to_string(),
            "W: F2 -> F3\nB: E7 -> E5\nW: G2 -> G4\nB: D8 -> H4\n"
        );

        assert_eq!(
            game.push_uci("e1f2"),
            Err(UciPlayError::Move(MoveError::GameFinished))
        );
        assert_eq!(game.history().len(), 4);

        let last = game.pop().unwrap();
        assert_eq!(last.mv.to_string(), "d8h4");
        assert!(!game.is_finished());
        assert_eq!(game.side(), Color::Black);
    }

    #[test]
    fn test_stalemate() {
        let mut game = Game::from_fen("k7/8/8/1Q6/8/8/8/7K w - - 0 1").unwrap();
        assert!(!game.is_finished());
        game.push_uci("b5b6").unwrap();
        assert_eq!(game.outcome(), Some(Outcome::Stalemate));
        assert_eq!(game.outcome().and_then(|o| o.winner()), None);
        assert!(game.board().is_stalemate());
    }

    #[test]
    fn test_uci_errors() {
        let mut game = Game::new_initial();
        assert!(matches!(game.push_uci("e2"), Err(UciPlayError::Parse(_))));
        assert_eq!(
            game.push_uci("e2e5"),
            Err(UciPlayError::Move(MoveError::Illegal(Move::new(
                sq("e2"),
                sq("e5")
            ))))
        );

        let res = Game::from_uci_list(Board::initial(), "e2e4 e7e5 e4e5");
        assert_eq!(res.as_ref().err().map(|e| e.pos), Some(2));
        assert_eq!(
            res.map(|_| ()).map_err(|e| e.to_string()),
            Err("cannot play UCI move #3: cannot apply move: move e4e5 is not legal".to_string())
        );

        assert!(game.push_uci_list("e2e4 e7e5 zzz").is_err());
        assert_eq!(game.uci_list().to_string(), "e2e4 e7e5");
    }

    #[test]
    fn test_promotion_in_uci_list() {
        let mut game = Game::from_fen("k7/4P3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(matches!(
            game.push_uci("e7e8n"),
            Err(UciPlayError::Parse(moves::uci::ParseError::Underpromotion(
                PieceKind::Knight
            )))
        ));
        game.push_uci("e7e8q").unwrap();
        assert_eq!(game.uci_list().to_string(), "e7e8q");
        assert!(game
            .board()
            .piece_at(sq("e8"))
            .unwrap()
            .is(Color::White, PieceKind::Queen));
    }

    #[test]
    fn test_candidates_with_rules() {
        let game = Game::from_uci_list(Board::initial(), "e2e4 e7e5 d1h5 b8c6").unwrap();
        let rules = DirectionRules::no_retreat(Color::White);
        let all = game.candidates(None);
        let forward = game.candidates(Some(&rules));
        assert!(forward.len() < all.len());
        assert!(all.contains(&Move::new(sq("h5"), sq("h3"))));
        assert!(!forward.contains(&Move::new(sq("h5"), sq("h3"))));
        assert!(!forward.contains(&Move::new(sq("h5"), sq("f3"))));
        assert!(forward.contains(&Move::new(sq("h5"), sq("f7"))));
        assert!(forward.contains(&Move::new(sq("h5"), sq("g5"))));
        assert!(forward.contains(&Move::new(sq("g1"), sq("e2"))));
    }

    #[test]
    fn test_play_selected() {
        let mut game = Game::new_initial();

        let mut first = |_: &Board, cands: &MoveList| -> Option<Move> { cands.first().copied() };
        let record = game.play_selected(&mut first, None).unwrap().unwrap();
        assert_eq!(game.history().len(), 1);
        assert_eq!(record.side(), Color::White);

        let mut decline = |_: &Board, _: &MoveList| -> Option<Move> { None };
        assert_eq!(game.play_selected(&mut decline, None), Ok(None));
        assert_eq!(game.history().len(), 1);

        let illegal = Move::new(sq("e7"), sq("e4"));
        let mut cheat = |_: &Board, _: &MoveList| -> Option<Move> { Some(illegal) };
        assert_eq!(game.play_selected(&mut cheat, None), Ok(None));
        assert_eq!(game.history().len(), 1);

        // Legal, but filtered out by the rules
        let rules = DirectionRules::new([(0, 1)], false);
        let mut sideways =
            |_: &Board, _: &MoveList| -> Option<Move> { Some(Move::new(sq("e7"), sq("e5"))) };
        assert_eq!(game.play_selected(&mut sideways, Some(&rules)), Ok(None));
        assert_eq!(game.side(), Color::Black);

        let mut mate = Game::from_uci_list(Board::initial(), FOOLS_MATE).unwrap();
        assert_eq!(
            mate.play_selected(&mut first, None),
            Err(MoveError::GameFinished)
        );
    }
}
