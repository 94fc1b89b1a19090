//! Command-line interface module.

mod args;
pub mod build;
pub mod current;
pub mod query;
pub mod serve;
pub mod share;

pub use args::{BuildArgs, Cli, Commands, QueryArgs};
