//! Lights Out: a square grid of lights where pressing a light toggles it along with its orthogonal
//! neighbors. The goal is to turn every light off.
//!
//! The heart of this crate is [`solver`], which finds a set of presses clearing any solvable
//! [`Board`] by Gaussian elimination over GF(2). The remaining modules implement the game around
//! it: [`pattern`]s and a [`generator`] to build starting boards, a [`game_state`] that tracks a
//! running game including hints and auto-solve playback, as well as [`settings`] and
//! [`statistics`] that a front end can persist.

pub mod board;
pub mod game_state;
pub mod generator;
pub mod light_map;
pub mod pattern;
pub mod settings;
pub mod solver;
pub mod statistics;

pub use board::{
    grid::{BoardSize, GridPos},
    Board,
};
pub use solver::{solve, Solution, Unsolvable};
