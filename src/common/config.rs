//! Конфигурация для objspec-tokenizer
//!
//! Наборы зарезервированных символов и слов и уровень логирования.
//! Загружается из TOML файла или переменных окружения.

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

use crate::common::constants::{
    DEFAULT_LOG_LEVEL, DEFAULT_RESERVED_CHARS, DEFAULT_RESERVED_WORDS, ENV_LOG_LEVEL,
    ENV_RESERVED_CHARS, ENV_RESERVED_WORDS,
};
use crate::common::{Error, Result};
use crate::tokenizer::{ReservedChars, ReservedWords, TokenizerBuilder};

/// Конфигурация токенизатора
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Зарезервированные символы, по одному на символ строки
    pub reserved_chars: String,
    /// Зарезервированные слова
    pub reserved_words: Vec<String>,
    /// Уровень логирования
    pub log_level: String,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            reserved_chars: DEFAULT_RESERVED_CHARS.to_string(),
            reserved_words: DEFAULT_RESERVED_WORDS.iter().map(|w| w.to_string()).collect(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl TokenizerConfig {
    /// Загружает конфигурацию из TOML файла
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: TokenizerConfig = toml::from_str(&content).map_err(|e| {
            Error::configuration(format!("cannot parse {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    /// Сохраняет конфигурацию в TOML файл
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Представление конфигурации в формате TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::configuration(e.to_string()))
    }

    /// Загружает конфигурацию из переменных окружения
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Загружает конфигурацию, получая значения переменных через `lookup`
    fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = TokenizerConfig::default();

        if let Some(chars) = lookup(ENV_RESERVED_CHARS) {
            config.reserved_chars = chars;
        }

        if let Some(words) = lookup(ENV_RESERVED_WORDS) {
            config.reserved_words = words
                .split(',')
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level;
        }

        config
    }

    /// Объединяет конфигурацию с другой; значения `other`, отличные от
    /// значений по умолчанию, имеют приоритет
    pub fn merge(mut self, other: Self) -> Self {
        let defaults = Self::default();
        if other.reserved_chars != defaults.reserved_chars {
            self.reserved_chars = other.reserved_chars;
        }
        if other.reserved_words != defaults.reserved_words {
            self.reserved_words = other.reserved_words;
        }
        if other.log_level != defaults.log_level {
            self.log_level = other.log_level;
        }
        self
    }

    /// Валидирует конфигурацию теми же правилами, что и
    /// [`TokenizerBuilder::start`]
    pub fn validate(&self) -> Result<()> {
        let chars = ReservedChars::parse(&self.reserved_chars)?;
        let words: ReservedWords = self.reserved_words.iter().map(String::as_str).collect();
        words.validate(&chars)?;

        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(Error::configuration(format!(
                "unknown log level '{}'",
                self.log_level
            )));
        }

        Ok(())
    }

    /// Применяет конфигурацию к построителю токенизатора
    pub fn apply<'a>(&self, builder: TokenizerBuilder<'a>) -> TokenizerBuilder<'a> {
        builder
            .reserved_chars(&self.reserved_chars)
            .reserved_words(self.reserved_words.iter().cloned())
    }

    /// Построитель над строкой с этой конфигурацией
    pub fn builder_for_string(&self, text: impl Into<String>) -> TokenizerBuilder<'static> {
        self.apply(TokenizerBuilder::from_string(text))
    }

    /// Построитель над потоком с этой конфигурацией
    pub fn builder_for_reader<'a>(&self, reader: &'a mut dyn Read) -> TokenizerBuilder<'a> {
        self.apply(TokenizerBuilder::from_reader(reader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::TokenType;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = TokenizerConfig::default();
        assert_eq!(config.reserved_chars, "(){},=;/");
        assert_eq!(config.reserved_words.len(), 13);
        assert_eq!(config.log_level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = TokenizerConfig::default();
        config.reserved_chars = "( )".to_string();
        assert!(config.validate().is_err());

        config = TokenizerConfig::default();
        config.reserved_words.push(String::new());
        assert!(config.validate().is_err());

        config = TokenizerConfig::default();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_matches_builder() {
        let mut config = TokenizerConfig::default();
        config.reserved_words = vec!["two words".to_string()];
        assert!(config.validate().is_err());
        assert!(config.builder_for_string("x").start().is_err());

        config.reserved_words = vec!["a;b".to_string()];
        assert!(config.validate().is_err());
        assert!(config.builder_for_string("x").start().is_err());

        // Пустой набор символов допустим в обоих случаях
        config = TokenizerConfig::default();
        config.reserved_chars = String::new();
        assert!(config.validate().is_ok());
        assert!(config.builder_for_string("x").start().is_ok());
    }

    #[test]
    fn test_config_from_vars() {
        let vars: HashMap<&str, &str> = [
            (ENV_RESERVED_CHARS, "(),;"),
            (ENV_RESERVED_WORDS, " let , var,,const "),
            (ENV_LOG_LEVEL, "debug"),
        ]
        .into_iter()
        .collect();

        let config = TokenizerConfig::from_vars(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.reserved_chars, "(),;");
        assert_eq!(config.reserved_words, vec!["let", "var", "const"]);
        assert_eq!(config.log_level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_vars_without_variables() {
        let config = TokenizerConfig::from_vars(|_| None);
        assert_eq!(config, TokenizerConfig::default());
    }

    #[test]
    fn test_config_merge() {
        let config1 = TokenizerConfig::default();
        let mut config2 = TokenizerConfig::default();

        config2.reserved_chars = "()[]".to_string();
        config2.log_level = "debug".to_string();

        let merged = config1.merge(config2);
        assert_eq!(merged.reserved_chars, "()[]");
        assert_eq!(merged.log_level, "debug");
        assert_eq!(merged.reserved_words, TokenizerConfig::default().reserved_words);
    }

    #[test]
    fn test_config_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("objspec.toml");

        let mut config = TokenizerConfig::default();
        config.reserved_words = vec!["let".to_string(), "true".to_string()];
        config.to_file(&path).unwrap();

        let loaded = TokenizerConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "log_level = \"trace\"\n").unwrap();

        let loaded = TokenizerConfig::from_file(&path).unwrap();
        assert_eq!(loaded.log_level, "trace");
        assert_eq!(loaded.reserved_chars, "(){},=;/");
    }

    #[test]
    fn test_missing_config_file() {
        let dir = TempDir::new().unwrap();
        let err = TokenizerConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_apply_to_builder() {
        let mut config = TokenizerConfig::default();
        config.reserved_words = vec!["let".to_string()];

        let mut st = config.builder_for_string("let x = true;").start().unwrap();
        assert_eq!(st.peek_token_type(), TokenType::ReservedWord);
        st.next_token().unwrap();
        st.next_token().unwrap();
        st.next_token().unwrap();
        assert_eq!(st.peek(), "true");
        assert_eq!(st.peek_token_type(), TokenType::Identifier);
    }
}
