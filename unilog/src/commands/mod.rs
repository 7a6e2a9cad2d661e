//! Command implementations for the `unilog` binary.

pub mod config;
pub mod process;
