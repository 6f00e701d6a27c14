//! Command-line front end for the tango solver.

/// Argument definitions and the solve/report drivers.
pub(crate) mod cli;
