//! Буфер токенов с перемещаемым курсором
//!
//! Хранит всю историю классифицированных токенов и курсор чтения над ней.
//! Классификатор всегда опережает курсор ровно на один токен, поэтому
//! возврат курсора назад никогда не требует повторного чтения источника.

use std::io::Read;

use crate::common::{Error, Result};
use crate::tokenizer::classifier::Classifier;
use crate::tokenizer::config::{ReservedChars, ReservedWords, TokenizerBuilder};
use crate::tokenizer::source::CharSource;
use crate::tokenizer::token::{Token, TokenType};

/// Потоковый токенизатор языка описания объектов
pub struct StreamTokenizer<'a> {
    source: CharSource<'a>,
    classifier: Classifier,
    /// Все токены, прочитанные к этому моменту
    tokens: Vec<Token>,
    /// Индекс следующего токена в `tokens` (или `tokens.len()`)
    next_index: usize,
    /// Источник исчерпан или классификация завершилась ошибкой
    exhausted: bool,
    /// Сообщение о фатальной ошибке классификации
    failure: Option<String>,
}

impl StreamTokenizer<'static> {
    /// Построитель токенизатора над строкой
    pub fn builder(text: impl Into<String>) -> TokenizerBuilder<'static> {
        TokenizerBuilder::from_string(text)
    }

    /// Создает токенизатор над строкой с настройками по умолчанию
    pub fn from_string(text: impl Into<String>) -> Result<Self> {
        TokenizerBuilder::from_string(text).start()
    }
}

impl<'a> StreamTokenizer<'a> {
    /// Создает токенизатор над заимствованным потоком с настройками по умолчанию
    pub fn from_reader(reader: &'a mut dyn Read) -> Result<Self> {
        TokenizerBuilder::from_reader(reader).start()
    }

    /// Вызывается построителем: классифицирует первый токен
    pub(crate) fn start(source: CharSource<'a>, classifier: Classifier) -> Result<Self> {
        let mut tokenizer = Self {
            source,
            classifier,
            tokens: Vec::new(),
            next_index: 0,
            exhausted: false,
            failure: None,
        };
        tokenizer.fetch()?;
        Ok(tokenizer)
    }

    /// Классифицирует еще один токен и добавляет его в историю
    fn fetch(&mut self) -> Result<()> {
        if self.exhausted {
            return Ok(());
        }

        match self.classifier.next_token(&mut self.source) {
            Ok(Some(token)) => {
                self.tokens.push(token);
                Ok(())
            }
            Ok(None) => {
                self.exhausted = true;
                log::debug!(
                    "Источник исчерпан: {} байт, {} строк, {} токенов",
                    self.source.bytes_read(),
                    self.source.line_number(),
                    self.tokens.len()
                );
                Ok(())
            }
            Err(e) => {
                self.exhausted = true;
                self.failure = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Есть ли еще токен под курсором
    pub fn has_next(&self) -> bool {
        self.next_index < self.tokens.len()
    }

    /// Был ли уже потреблен хотя бы один токен
    pub fn has_prev(&self) -> bool {
        self.next_index > 0
    }

    /// Следующий токен без его потребления
    pub fn peek_token(&self) -> Option<&Token> {
        self.tokens.get(self.next_index)
    }

    /// Последний потребленный токен
    pub fn prev_token(&self) -> Option<&Token> {
        if self.has_prev() {
            self.tokens.get(self.next_index - 1)
        } else {
            None
        }
    }

    /// Текст следующего токена или пустая строка
    pub fn peek(&self) -> &str {
        self.peek_token().map_or("", |t| t.text.as_str())
    }

    pub fn peek_token_type(&self) -> TokenType {
        self.peek_token()
            .map_or(TokenType::EndOfInput, |t| t.token_type)
    }

    /// Начало следующего токена или текущая позиция в источнике
    pub fn peek_token_start(&self) -> usize {
        self.peek_token()
            .map_or(self.source.bytes_read(), |t| t.start)
    }

    /// Строка следующего токена или текущая строка источника
    pub fn peek_token_line_number(&self) -> usize {
        self.peek_token()
            .map_or(self.source.line_number(), |t| t.line_number)
    }

    pub fn peek_prev(&self) -> &str {
        self.prev_token().map_or("", |t| t.text.as_str())
    }

    pub fn peek_prev_token_start(&self) -> usize {
        self.prev_token().map_or(0, |t| t.start)
    }

    pub fn peek_prev_token_type(&self) -> TokenType {
        self.prev_token()
            .map_or(TokenType::EndOfInput, |t| t.token_type)
    }

    /// Потребляет следующий токен и возвращает его текст.
    ///
    /// Вызов при `has_next() == false` — нарушение протокола. Если курсор
    /// стоит на последнем буферизованном токене, сначала классифицируется
    /// еще один токен; ошибка классификации возвращается без сдвига курсора.
    pub fn next_token(&mut self) -> Result<String> {
        if !self.has_next() {
            return Err(Error::protocol_violation(
                "invoking next_token when has_next returns false",
            ));
        }

        let current = self.next_index;
        if self.next_index + 1 == self.tokens.len() {
            self.fetch()?;
        }
        self.next_index += 1;

        Ok(self.tokens[current].text.clone())
    }

    /// Возвращает курсор в начало
    pub fn rewind(&mut self) {
        self.next_index = 0;
    }

    /// Сдвигает курсор назад на `num_tokens`, но не дальше начала
    pub fn rewind_by(&mut self, num_tokens: usize) {
        self.next_index -= num_tokens.min(self.next_index);
    }

    /// Синоним `rewind_by(1)`
    pub fn putback(&mut self) {
        self.rewind_by(1);
    }

    /// Позиция в источнике сразу после последнего потребленного токена
    pub fn tellg(&self) -> usize {
        self.prev_token().map_or(0, |t| t.position_after)
    }

    /// Строка следующего токена или текущая строка источника
    pub fn line_number(&self) -> usize {
        self.peek_token_line_number()
    }

    /// Все символы, прочитанные из источника к этому моменту
    pub fn consumed_text(&self) -> String {
        self.source.consumed_text()
    }

    /// Индекс курсора в истории
    pub fn position(&self) -> usize {
        self.next_index
    }

    /// Вся история классифицированных токенов
    pub fn history(&self) -> &[Token] {
        &self.tokens
    }

    /// Больше токенов из источника не будет
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Сообщение о фатальной ошибке, остановившей классификацию
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn reserved_chars(&self) -> &ReservedChars {
        self.classifier.reserved_chars()
    }

    pub fn reserved_words(&self) -> &ReservedWords {
        self.classifier.reserved_words()
    }

    /// Потребляет все оставшиеся токены и возвращает их
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let first = self.next_index;
        while self.has_next() {
            self.next_token()?;
        }
        Ok(self.tokens[first..self.next_index].to_vec())
    }
}
