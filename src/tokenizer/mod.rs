//! Потоковый токенизатор языка описания объектов

pub mod classifier;
pub mod config;
pub mod source;
pub mod stream;
pub mod token;

#[cfg(test)]
pub mod tests;

// Переэкспортируем основные типы
pub use classifier::Classifier;
pub use config::{ReservedChars, ReservedWords, TokenizerBuilder};
pub use source::CharSource;
pub use stream::StreamTokenizer;
pub use token::{Token, TokenType};
