//! todoctl - extract TODO, FIXME and XXX annotations from source comments
//!
//! todoctl is a CLI tool and library that finds work-item annotations in comments of
//! any language: single-line markers (`TODO: text`), brace blocks (`TODO: {` ... `}`)
//! and collection blocks (`TODOS.START` ... `TODOS.END`). Each annotation is bound to
//! the code line that follows it.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine and scan orchestration
//! - `issues`: Issue type definitions and reporting
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod utils;
