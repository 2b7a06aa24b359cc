//! Общие типы и утилиты для objspec-tokenizer

pub mod config;
pub mod constants;
pub mod error;

pub use config::*;
pub use constants::*;
pub use error::{Error, ErrorKind, Result};
