//! Лексический классификатор
//!
//! Читает байты из [`CharSource`], пропускает пробелы и комментарии и
//! классифицирует очередную лексему. Классификация однопроходная: однажды
//! выданный токен больше не переклассифицируется.

use crate::common::constants::{COMMENT_CHAR, ESCAPE_CHAR, STRING_QUOTE};
use crate::common::{Error, Result};
use crate::tokenizer::config::{ReservedChars, ReservedWords};
use crate::tokenizer::source::CharSource;
use crate::tokenizer::token::{Token, TokenType};

/// Пробельный байт в смысле ASCII (включая вертикальную табуляцию)
pub(crate) fn is_space(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0x0b
}

/// Может ли байт начинать числовую лексему
fn starts_number(byte: u8) -> bool {
    byte.is_ascii_digit() || byte == b'-' || byte == b'+' || byte == b'.'
}

/// Проверяет синтаксис числа:
/// `[+-]? (digits (. digits?)? | . digits) ([eE] [+-]? digits)?`
pub(crate) fn is_number_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut pos = 0;

    let digits = |pos: &mut usize| {
        let begin = *pos;
        while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
            *pos += 1;
        }
        *pos - begin
    };

    if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
        pos += 1;
    }

    let integral = digits(&mut pos);
    let mut fractional = 0;
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        fractional = digits(&mut pos);
    }
    if integral == 0 && fractional == 0 {
        return false;
    }

    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        pos += 1;
        if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
            pos += 1;
        }
        if digits(&mut pos) == 0 {
            return false;
        }
    }

    pos == bytes.len()
}

/// Классификатор лексем
#[derive(Debug, Clone)]
pub struct Classifier {
    reserved_chars: ReservedChars,
    reserved_words: ReservedWords,
}

impl Classifier {
    pub fn new(reserved_chars: ReservedChars, reserved_words: ReservedWords) -> Self {
        Self {
            reserved_chars,
            reserved_words,
        }
    }

    pub fn reserved_chars(&self) -> &ReservedChars {
        &self.reserved_chars
    }

    pub fn reserved_words(&self) -> &ReservedWords {
        &self.reserved_words
    }

    /// Классифицирует следующую лексему. `Ok(None)` означает конец входа.
    pub fn next_token(&self, source: &mut CharSource<'_>) -> Result<Option<Token>> {
        let first = match self.skip_insignificant(source)? {
            Some(byte) => byte,
            None => return Ok(None),
        };

        // Первый значимый байт уже потреблен и не является переводом строки
        let start = source.bytes_read() - 1;
        let line = source.line_number();

        let (token_type, text) = if self.reserved_chars.contains(first) {
            (TokenType::ReservedChar, (first as char).to_string())
        } else if first == STRING_QUOTE {
            let bytes = self.read_string_literal(source, start, line)?;
            (TokenType::StringLiteral, into_text(bytes, start, line)?)
        } else {
            let bytes = self.read_word(source, first)?;
            let text = into_text(bytes, start, line)?;
            (self.classify_word(&text, start, line)?, text)
        };

        let token = Token::new(token_type, text, start, line, source.bytes_read());
        log::trace!("Токен {}", token);
        Ok(Some(token))
    }

    /// Пропускает пробелы и комментарии, возвращая первый значимый байт
    fn skip_insignificant(&self, source: &mut CharSource<'_>) -> Result<Option<u8>> {
        let comments_enabled = self.reserved_chars.contains(COMMENT_CHAR);

        while let Some(byte) = source.read_char()? {
            if is_space(byte) {
                continue;
            }
            if comments_enabled && byte == COMMENT_CHAR && source.peek_char()? == Some(COMMENT_CHAR)
            {
                while let Some(skipped) = source.read_char()? {
                    if skipped == b'\n' {
                        break;
                    }
                }
                continue;
            }
            return Ok(Some(byte));
        }

        Ok(None)
    }

    /// Читает строковый литерал; открывающая кавычка уже потреблена
    fn read_string_literal(
        &self,
        source: &mut CharSource<'_>,
        start: usize,
        line: usize,
    ) -> Result<Vec<u8>> {
        let mut bytes = vec![STRING_QUOTE];

        loop {
            match source.peek_char()? {
                Some(STRING_QUOTE) => {
                    source.consume_char(STRING_QUOTE)?;
                    bytes.push(STRING_QUOTE);
                    return Ok(bytes);
                }
                Some(ESCAPE_CHAR) => {
                    source.consume_char(ESCAPE_CHAR)?;
                    bytes.push(ESCAPE_CHAR);
                    match source.read_char()? {
                        Some(b'\n') | None => {
                            return Err(unterminated_string(&bytes, start, line))
                        }
                        Some(escaped) => bytes.push(escaped),
                    }
                }
                Some(b'\n') | None => return Err(unterminated_string(&bytes, start, line)),
                Some(_) => {
                    if let Some(byte) = source.read_char()? {
                        bytes.push(byte);
                    }
                }
            }
        }
    }

    /// Читает максимальную последовательность байт до пробела или
    /// зарезервированного символа
    fn read_word(&self, source: &mut CharSource<'_>, first: u8) -> Result<Vec<u8>> {
        let mut bytes = vec![first];

        while let Some(byte) = source.peek_char()? {
            if is_space(byte) || self.reserved_chars.contains(byte) {
                break;
            }
            source.read_char()?;
            bytes.push(byte);
        }

        Ok(bytes)
    }

    /// Определяет тип лексемы, не являющейся строкой или символом
    fn classify_word(&self, text: &str, start: usize, line: usize) -> Result<TokenType> {
        if self.reserved_words.contains(text) {
            return Ok(TokenType::ReservedWord);
        }

        let starts_numeric = text.bytes().next().is_some_and(starts_number);
        if !starts_numeric {
            return Ok(TokenType::Identifier);
        }

        if is_number_literal(text) {
            Ok(TokenType::Number)
        } else {
            log::warn!("Некорректный числовой литерал '{}' на байте {}", text, start);
            Err(Error::malformed_lexeme(
                format!("invalid numeric literal '{}'", text),
                start,
                line,
            ))
        }
    }
}

fn into_text(bytes: Vec<u8>, start: usize, line: usize) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|_| Error::malformed_lexeme("lexeme is not valid UTF-8", start, line))
}

fn unterminated_string(partial: &[u8], start: usize, line: usize) -> Error {
    log::warn!("Незакрытый строковый литерал, начатый на байте {}", start);
    Error::malformed_lexeme(
        format!(
            "could not find closing double quote for string literal; partial literal read: {}",
            String::from_utf8_lossy(partial)
        ),
        start,
        line,
    )
}
