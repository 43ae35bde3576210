mod base;

pub mod uci;

pub use base::*;

pub type UciMove = uci::Move;
