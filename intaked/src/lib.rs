#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod cli;
pub use cli::{Cli, Commands};

pub mod commands;

mod config;
pub use config::AppConfig;
