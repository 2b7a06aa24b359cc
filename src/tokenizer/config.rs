//! Наборы зарезервированных символов и слов и построитель токенизатора
//!
//! Конфигурация фиксируется до начала классификации: [`TokenizerBuilder`]
//! принимает наборы, а [`TokenizerBuilder::start`] читает первый токен и
//! возвращает готовый [`StreamTokenizer`]. Изменить зарезервированные слова
//! после этого нельзя.

use std::collections::BTreeSet;
use std::fmt;
use std::io::Read;

use crate::common::constants::{DEFAULT_RESERVED_CHARS, DEFAULT_RESERVED_WORDS, STRING_QUOTE};
use crate::common::{Error, Result};
use crate::tokenizer::classifier::{is_space, Classifier};
use crate::tokenizer::source::CharSource;
use crate::tokenizer::stream::StreamTokenizer;

/// Набор зарезервированных символов
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedChars {
    chars: BTreeSet<u8>,
}

impl ReservedChars {
    /// Разбирает строку, каждый символ которой становится зарезервированным.
    /// Допускаются только видимые ASCII символы, кроме кавычки строкового
    /// литерала.
    pub fn parse(chars: &str) -> Result<Self> {
        let mut set = BTreeSet::new();
        for ch in chars.chars() {
            if !ch.is_ascii() {
                return Err(Error::configuration(format!(
                    "reserved character '{}' is not ASCII",
                    ch
                )));
            }
            let byte = ch as u8;
            if is_space(byte) || byte.is_ascii_control() {
                return Err(Error::configuration(format!(
                    "reserved character '{}' is whitespace or a control character",
                    byte.escape_ascii()
                )));
            }
            if byte == STRING_QUOTE {
                return Err(Error::configuration(
                    "the string quote cannot be a reserved character",
                ));
            }
            set.insert(byte);
        }
        Ok(Self { chars: set })
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.chars.contains(&byte)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl Default for ReservedChars {
    fn default() -> Self {
        Self {
            chars: DEFAULT_RESERVED_CHARS.bytes().collect(),
        }
    }
}

impl fmt::Display for ReservedChars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.chars {
            write!(f, "{}", *byte as char)?;
        }
        Ok(())
    }
}

/// Набор зарезервированных слов (с учетом регистра)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedWords {
    words: BTreeSet<String>,
}

impl ReservedWords {
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Проверяет, что каждое слово может быть прочитано как одна лексема
    pub(crate) fn validate(&self, reserved_chars: &ReservedChars) -> Result<()> {
        for word in &self.words {
            if word.is_empty() {
                return Err(Error::configuration("reserved word cannot be empty"));
            }
            if word.bytes().any(|b| is_space(b) || reserved_chars.contains(b)) {
                return Err(Error::configuration(format!(
                    "reserved word '{}' contains whitespace or a reserved character",
                    word
                )));
            }
        }
        Ok(())
    }
}

impl Default for ReservedWords {
    fn default() -> Self {
        DEFAULT_RESERVED_WORDS.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ReservedWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Построитель токенизатора (первая фаза инициализации)
pub struct TokenizerBuilder<'a> {
    source: CharSource<'a>,
    reserved_chars: String,
    reserved_words: ReservedWords,
}

impl TokenizerBuilder<'static> {
    /// Токенизатор над собственной копией строки
    pub fn from_string(text: impl Into<String>) -> Self {
        Self::new(CharSource::from_string(text))
    }
}

impl<'a> TokenizerBuilder<'a> {
    /// Токенизатор над заимствованным потоком
    pub fn from_reader(reader: &'a mut dyn Read) -> Self {
        Self::new(CharSource::from_reader(reader))
    }

    fn new(source: CharSource<'a>) -> Self {
        Self {
            source,
            reserved_chars: DEFAULT_RESERVED_CHARS.to_string(),
            reserved_words: ReservedWords::default(),
        }
    }

    /// Заменяет набор зарезервированных символов
    pub fn reserved_chars(mut self, chars: &str) -> Self {
        self.reserved_chars = chars.to_string();
        self
    }

    /// Заменяет набор зарезервированных слов целиком
    pub fn reserved_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_words = words.into_iter().collect();
        self
    }

    /// Вторая фаза: проверяет конфигурацию и классифицирует первый токен
    pub fn start(self) -> Result<StreamTokenizer<'a>> {
        let reserved_chars = ReservedChars::parse(&self.reserved_chars)?;
        self.reserved_words.validate(&reserved_chars)?;

        log::debug!(
            "Запуск токенизатора: символы '{}', слов {}",
            reserved_chars,
            self.reserved_words.len()
        );

        let classifier = Classifier::new(reserved_chars, self.reserved_words);
        StreamTokenizer::start(self.source, classifier)
    }
}
