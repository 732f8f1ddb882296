//! Command modules - one file per CLI command

pub mod generate;
pub mod show;
