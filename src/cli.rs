//! CLI интерфейс для objspec-tokenizer
//!
//! Читает описание объектов из файла или стандартного ввода и печатает
//! классифицированные токены.

use crate::common::{TokenizerConfig, DEFAULT_CONFIG_FILE, ENV_RUST_LOG};
use crate::tokenizer::Token;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// objspec-tok - токенизатор языка описания объектов
#[derive(Parser)]
#[command(name = "objspec-tok")]
#[command(about = "Tokenizer for the object-construction language")]
#[command(version)]
pub struct Cli {
    /// Конфигурационный файл
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Уровень детализации логирования
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Переопределение зарезервированных символов
    #[arg(long, value_name = "CHARS")]
    pub reserved_chars: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Напечатать все токены
    Tokens {
        /// Входной файл (по умолчанию stdin)
        file: Option<PathBuf>,

        /// Вывод в формате JSON, по одному токену на строку
        #[arg(long)]
        json: bool,
    },

    /// Проверить, что вход токенизируется без ошибок
    Check {
        /// Входной файл (по умолчанию stdin)
        file: Option<PathBuf>,
    },

    /// Показать действующую конфигурацию
    Config,
}

impl Cli {
    /// Загружает конфигурацию
    pub fn load_config(&self) -> crate::Result<TokenizerConfig> {
        self.load_config_with_default(Path::new(DEFAULT_CONFIG_FILE))
    }

    fn load_config_with_default(&self, default_path: &Path) -> crate::Result<TokenizerConfig> {
        let mut config = if let Some(config_path) = &self.config {
            TokenizerConfig::from_file(config_path)?
        } else {
            // Отсутствующий файл по умолчанию не ошибка, испорченный - ошибка
            let from_file = if default_path.exists() {
                TokenizerConfig::from_file(default_path)?
            } else {
                TokenizerConfig::default()
            };
            from_file.merge(TokenizerConfig::from_env())
        };

        // Применяем настройки из командной строки
        if let Some(chars) = &self.reserved_chars {
            config.reserved_chars = chars.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Построитель логгера: `--log-level`, затем `RUST_LOG`, затем конфигурация
    pub fn logger_builder(&self, config: &TokenizerConfig) -> env_logger::Builder {
        let env_filters = std::env::var(ENV_RUST_LOG).ok();
        self.logger_builder_with(config, env_filters.as_deref())
    }

    fn logger_builder_with(
        &self,
        config: &TokenizerConfig,
        env_filters: Option<&str>,
    ) -> env_logger::Builder {
        let filters = match (&self.log_level, env_filters) {
            (Some(level), _) => level.as_str(),
            (None, Some(filters)) => filters,
            (None, None) => config.log_level.as_str(),
        };

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(filters);
        builder
    }

    /// Выполняет команду
    pub fn execute(&self, config: &TokenizerConfig) -> crate::Result<()> {
        match &self.command {
            Commands::Tokens { file, json } => self.print_tokens(config, file.as_deref(), *json),
            Commands::Check { file } => self.check(config, file.as_deref()),
            Commands::Config => {
                print!("{}", config.to_toml()?);
                Ok(())
            }
        }
    }

    /// Печатает все токены входа
    fn print_tokens(
        &self,
        config: &TokenizerConfig,
        file: Option<&Path>,
        json: bool,
    ) -> crate::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();

        with_input(file, |reader| {
            let mut st = config.builder_for_reader(reader).start()?;
            while st.has_next() {
                if let Some(token) = st.peek_token() {
                    let line = if json {
                        serde_json::to_string(token)?
                    } else {
                        format_token(token)
                    };
                    writeln!(out, "{}", line)?;
                }
                st.next_token()?;
            }
            Ok(())
        })
    }

    /// Токенизирует вход целиком и сообщает количество токенов
    fn check(&self, config: &TokenizerConfig, file: Option<&Path>) -> crate::Result<()> {
        with_input(file, |reader| {
            let mut st = config.builder_for_reader(reader).start()?;
            let tokens = st.tokenize()?;
            log::info!(
                "Прочитано {} токенов, {} строк",
                tokens.len(),
                st.line_number()
            );
            println!("ok: {} tokens", tokens.len());
            Ok(())
        })
    }
}

/// Открывает файл или стандартный ввод и передает поток обработчику
fn with_input<F>(file: Option<&Path>, f: F) -> crate::Result<()>
where
    F: FnOnce(&mut dyn Read) -> crate::Result<()>,
{
    match file {
        Some(path) => {
            let mut reader = BufReader::new(File::open(path)?);
            f(&mut reader)
        }
        None => {
            let stdin = io::stdin();
            let mut reader = stdin.lock();
            f(&mut reader)
        }
    }
}

/// Строка вида `line:start..after TYPE text`
pub fn format_token(token: &Token) -> String {
    format!(
        "{}:{}..{} {} {}",
        token.line_number, token.start, token.position_after, token.token_type, token.text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::TokenType;
    use log::LevelFilter;
    use tempfile::TempDir;

    fn tokenize_str(config: &TokenizerConfig, text: &str) -> crate::Result<Vec<Token>> {
        config.builder_for_string(text).start()?.tokenize()
    }

    #[test]
    fn test_cli_parsing() {
        let args = vec!["objspec-tok", "--log-level", "debug", "tokens", "input.objspec", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.log_level, Some("debug".to_string()));
        match cli.command {
            Commands::Tokens { file, json } => {
                assert_eq!(file, Some(PathBuf::from("input.objspec")));
                assert!(json);
            }
            _ => panic!("Expected tokens command"),
        }
    }

    #[test]
    fn test_check_command_reads_stdin_by_default() {
        let args = vec!["objspec-tok", "check"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Commands::Check { file: None }));
    }

    #[test]
    fn test_reserved_chars_override() {
        let args = vec!["objspec-tok", "--reserved-chars", "()", "--config", "missing.toml", "config"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.reserved_chars.as_deref(), Some("()"));
        assert!(cli.load_config().is_err());
    }

    #[test]
    fn test_format_token() {
        let tokens = tokenize_str(&TokenizerConfig::default(), "\nx = 1;").unwrap();
        assert_eq!(tokens[0].token_type, TokenType::Identifier);
        assert_eq!(format_token(&tokens[0]), "1:1..2 IDENTIFIER x");
        assert_eq!(format_token(&tokens[2]), "1:5..6 NUMBER 1");
    }

    #[test]
    fn test_malformed_default_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("objspec.toml");
        std::fs::write(&path, "reserved_chars = [[[ not toml").unwrap();

        let cli = Cli::try_parse_from(["objspec-tok", "config"]).unwrap();
        let err = cli.load_config_with_default(&path).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Configuration);
    }

    #[test]
    fn test_missing_default_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::try_parse_from(["objspec-tok", "--reserved-chars", "();", "config"]).unwrap();

        let config = cli
            .load_config_with_default(&dir.path().join("objspec.toml"))
            .unwrap();
        assert_eq!(config.reserved_chars, "();");
    }

    #[test]
    fn test_log_level_flag_overrides_rust_log() {
        let config = TokenizerConfig::default();

        let cli = Cli::try_parse_from(["objspec-tok", "--log-level", "trace", "config"]).unwrap();
        let logger = cli.logger_builder_with(&config, Some("error")).build();
        assert_eq!(logger.filter(), LevelFilter::Trace);

        let cli = Cli::try_parse_from(["objspec-tok", "config"]).unwrap();
        let logger = cli.logger_builder_with(&config, Some("error")).build();
        assert_eq!(logger.filter(), LevelFilter::Error);

        let logger = cli.logger_builder_with(&config, None).build();
        assert_eq!(logger.filter(), LevelFilter::Warn);
    }
}
