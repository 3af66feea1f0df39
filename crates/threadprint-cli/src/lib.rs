//! Threadprint CLI internals, exposed as a library so integration tests
//! can exercise the same code paths as the binary.

pub mod commands;
pub mod image;
