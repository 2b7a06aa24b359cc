//! Токены для потокового токенизатора objspec
//!
//! Определяет типы токенов, которые может распознать лексический анализатор
//! языка описания объектов, и метаданные их позиции в исходном потоке.

use serde::Serialize;
use std::fmt;

use crate::common::constants::{ESCAPE_CHAR, STRING_QUOTE};

/// Типы токенов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    /// Конец входа (следующего токена нет)
    EndOfInput,
    /// Зарезервированный символ
    ReservedChar,
    /// Зарезервированное слово
    ReservedWord,
    /// Строковый литерал в двойных кавычках
    StringLiteral,
    /// Числовой литерал
    Number,
    /// Идентификатор
    Identifier,
}

impl TokenType {
    /// Имя типа, используемое в диагностических сообщениях
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::EndOfInput => "EOF",
            TokenType::ReservedChar => "RESERVED_CHAR",
            TokenType::ReservedWord => "RESERVED_WORD",
            TokenType::StringLiteral => "STRING",
            TokenType::Number => "NUMBER",
            TokenType::Identifier => "IDENTIFIER",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Токен с позицией и значением
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Текст лексемы в точности как в источнике
    pub text: String,
    pub token_type: TokenType,
    /// Смещение первого байта лексемы
    pub start: usize,
    /// Номер строки первого байта (с нуля)
    pub line_number: usize,
    /// Смещение в потоке сразу после лексемы
    pub position_after: usize,
}

impl Token {
    pub fn new(
        token_type: TokenType,
        text: String,
        start: usize,
        line_number: usize,
        position_after: usize,
    ) -> Self {
        Self {
            text,
            token_type,
            start,
            line_number,
            position_after,
        }
    }

    /// Длина лексемы в байтах
    pub fn len(&self) -> usize {
        self.position_after - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Возвращает содержимое строкового литерала без кавычек и с раскрытыми
    /// экранированиями. Для остальных типов возвращает `None`.
    pub fn string_value(&self) -> Option<String> {
        if self.token_type != TokenType::StringLiteral {
            return None;
        }

        let quote = STRING_QUOTE as char;
        let escape = ESCAPE_CHAR as char;
        let inner = self
            .text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))?;

        let mut value = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            if ch == escape {
                if let Some(escaped) = chars.next() {
                    value.push(escaped);
                }
            } else {
                value.push(ch);
            }
        }
        Some(value)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}('{}') at {}:{}",
            self.token_type, self.text, self.line_number, self.start
        )
    }
}
