//! # CLI Command Implementations
//!
//! The tool has a single command, `filter`, which is run directly from the
//! top-level arguments. It follows the usual layout:
//! - An `Args` struct that defines the command's arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args`, calls into the
//!   `filter_directory` library, and prints the results.

pub mod filter;
