//! `vw-cli` subcommands.

pub mod cart;
pub mod catalog;
pub mod migrate;
