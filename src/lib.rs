#![deny(missing_docs)]
//! This crate provides a backtracking solver for Tango sun/moon logic puzzles.

/// The `tango` module implements the Tango puzzle model, the constraint compiler and the
/// backtracking solver, which fills a 6x6 grid of suns and moons.
pub mod tango;
