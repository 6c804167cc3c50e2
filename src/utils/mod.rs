//! Common utilities shared by the binaries.
//!
//! - **`data_loader`**: Reads and writes dense matrices as headerless CSV, the
//!   input format of the `eigenlab` command-line runner.

pub mod data_loader;
