//! Command-line interface module.

mod args;
pub mod build;
pub mod cards;
pub mod common;
pub mod query;
pub mod validate;

pub use args::{BuildArgs, CardsArgs, Cli, Commands, QueryArgs, ValidateArgs};
