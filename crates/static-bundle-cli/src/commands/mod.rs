//! Command implementations.
//!
//! There is a single command: [`build`].

pub mod build;

pub use build::execute as build_execute;
