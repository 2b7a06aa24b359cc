//! Источник символов для токенизатора
//!
//! Оборачивает либо собственный буфер, построенный из строки, либо
//! заимствованный поток `Read`. Ведет счетчик прочитанных байт и строк.

use std::io::{self, Cursor, Read};

use crate::common::{Error, Result};

/// Вход источника: собственный буфер или заимствованный поток
enum Input<'a> {
    Owned(Cursor<Vec<u8>>),
    Borrowed(&'a mut dyn Read),
}

impl Input<'_> {
    fn reader(&mut self) -> &mut dyn Read {
        match self {
            Input::Owned(cursor) => cursor,
            Input::Borrowed(reader) => &mut **reader,
        }
    }
}

/// Побайтовый источник символов с одним байтом предпросмотра
pub struct CharSource<'a> {
    input: Input<'a>,
    /// Байт, прочитанный из потока, но еще не потребленный
    lookahead: Option<u8>,
    /// Количество потребленных байт
    bytes_read: usize,
    /// Количество потребленных символов перевода строки
    line_number: usize,
    /// Все потребленные байты (для диагностики)
    consumed: Vec<u8>,
}

impl CharSource<'static> {
    /// Создает источник, владеющий копией строки
    pub fn from_string(text: impl Into<String>) -> Self {
        Self::with_input(Input::Owned(Cursor::new(text.into().into_bytes())))
    }
}

impl<'a> CharSource<'a> {
    /// Создает источник поверх заимствованного потока
    pub fn from_reader(reader: &'a mut dyn Read) -> Self {
        Self::with_input(Input::Borrowed(reader))
    }

    fn with_input(input: Input<'a>) -> Self {
        Self {
            input,
            lookahead: None,
            bytes_read: 0,
            line_number: 0,
            consumed: Vec::new(),
        }
    }

    /// Читает один байт из нижележащего потока
    fn fill(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.reader().read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }

    /// Возвращает следующий байт без его потребления
    pub fn peek_char(&mut self) -> Result<Option<u8>> {
        if self.lookahead.is_none() {
            self.lookahead = self.fill()?;
        }
        Ok(self.lookahead)
    }

    /// Потребляет следующий байт. `Ok(None)` означает конец входа.
    pub fn read_char(&mut self) -> Result<Option<u8>> {
        let next = match self.lookahead.take() {
            Some(byte) => Some(byte),
            None => self.fill()?,
        };

        if let Some(byte) = next {
            self.bytes_read += 1;
            if byte == b'\n' {
                self.line_number += 1;
            }
            self.consumed.push(byte);
        }

        Ok(next)
    }

    /// Потребляет следующий байт, требуя, чтобы он совпал с ожидаемым
    pub fn consume_char(&mut self, expected: u8) -> Result<()> {
        let offset = self.bytes_read;
        let line = self.line_number;
        match self.read_char()? {
            Some(byte) if byte == expected => Ok(()),
            Some(byte) => Err(Error::malformed_lexeme(
                format!(
                    "expected '{}' but found '{}'",
                    expected.escape_ascii(),
                    byte.escape_ascii()
                ),
                offset,
                line,
            )),
            None => Err(Error::malformed_lexeme(
                format!("expected '{}' but reached end of input", expected.escape_ascii()),
                offset,
                line,
            )),
        }
    }

    /// Количество потребленных байт
    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    /// Количество потребленных символов перевода строки
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Все потребленные к этому моменту символы
    pub fn consumed_text(&self) -> String {
        String::from_utf8_lossy(&self.consumed).into_owned()
    }
}
