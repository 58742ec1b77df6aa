//! CLI commands.

pub mod emit;
pub mod eval;
pub mod info;
pub mod purge;
