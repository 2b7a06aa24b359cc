//! objspec-tokenizer - потоковый токенизатор языка описания объектов
//!
//! Преобразует поток символов в последовательность классифицированных
//! лексем с метаданными позиции. Хранит всю историю токенов и предоставляет
//! курсор с просмотром вперед, потреблением и возвратом назад.
//!
//! ```
//! use objspec_tokenizer::{StreamTokenizer, TokenType};
//!
//! let mut st = StreamTokenizer::from_string("int x = 17;").unwrap();
//! assert_eq!(st.peek_token_type(), TokenType::ReservedWord);
//! assert_eq!(st.next_token().unwrap(), "int");
//! st.putback();
//! assert_eq!(st.peek(), "int");
//! ```

pub mod cli;
pub mod common;
pub mod tokenizer;

pub use common::error::{Error, ErrorKind, Result};
pub use common::TokenizerConfig;
pub use tokenizer::{
    CharSource, Classifier, ReservedChars, ReservedWords, StreamTokenizer, Token, TokenType,
    TokenizerBuilder,
};
