// unilog/src/lib.rs
//! # unilog CLI Application
//!
//! This crate provides the command-line interface for the unilog pipeline:
//! argument parsing, logger setup, stream reading and sink routing. All
//! transformation logic lives in `unilog-core`.

pub mod cli;
pub mod commands;
pub mod logger;

pub use commands::process::{process_input, run_process, LogWriters, ProcessOptions};
