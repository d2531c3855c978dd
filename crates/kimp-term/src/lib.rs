//! Term model for the KIMP harness.
//!
//! This crate defines the `Term` tree exchanged with the K tools, the
//! `Configuration` cell view over a final configuration, the decode
//! helpers that extract primitive values from cells, and the kast-JSON
//! wire representation.

mod config;
mod term;
pub mod decode;
pub mod json;

pub use config::{Configuration, MissingCellError, ERRORS_CELL, EXIT_CODE_CELL, K_CELL};
pub use term::Term;
