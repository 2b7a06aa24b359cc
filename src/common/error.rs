//! Обработка ошибок для objspec-tokenizer

use thiserror::Error;

/// Основной тип ошибки токенизатора
#[derive(Error, Debug)]
pub enum Error {
    /// Ошибка I/O операций нижележащего потока
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Нарушение протокола вызывающей стороной
    #[error("Protocol violation: {message}")]
    ProtocolViolation { message: String },

    /// Лексема, которую невозможно завершить по правилам языка
    #[error("Malformed lexeme at byte {offset} (line {line}): {message}")]
    MalformedLexeme {
        message: String,
        offset: usize,
        line: usize,
    },

    /// Ошибка конфигурации
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Ошибка сериализации токенов
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Категория ошибки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ProtocolViolation,
    MalformedLexeme,
    UnderlyingIoFault,
    Configuration,
    Serialization,
}

/// Тип результата для objspec-tokenizer
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Создает ошибку нарушения протокола
    pub fn protocol_violation(message: impl Into<String>) -> Self {
        Self::ProtocolViolation {
            message: message.into(),
        }
    }

    /// Создает ошибку некорректной лексемы
    pub fn malformed_lexeme(message: impl Into<String>, offset: usize, line: usize) -> Self {
        Self::MalformedLexeme {
            message: message.into(),
            offset,
            line,
        }
    }

    /// Создает ошибку конфигурации
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Возвращает категорию ошибки
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::UnderlyingIoFault,
            Error::ProtocolViolation { .. } => ErrorKind::ProtocolViolation,
            Error::MalformedLexeme { .. } => ErrorKind::MalformedLexeme,
            Error::Configuration { .. } => ErrorKind::Configuration,
            Error::Serialization(_) => ErrorKind::Serialization,
        }
    }
}
