// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod specs;

pub mod classify;
pub mod deck;
pub mod file;
pub mod progress;
pub mod runner;
pub mod summary;

pub use error::{Error, Result};
