//! Command-line interface for the changelog viewer.

pub mod commands;

pub use commands::run;
