//! # Base types for gridchess
//!
//! This is an auxiliary crate for `gridchess` with the plain value types: squares, colors, piece
//! kinds, castling rights and square sets.
//!
//! Normally you don't want to use this crate directly. Use `gridchess` instead, which re-exports
//! everything declared here.

pub mod bitboard;
pub mod geometry;
pub mod types;
