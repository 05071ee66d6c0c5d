//! Command-line front end for the `catalog` binary.

pub mod commands;
pub mod display;
pub mod session;
