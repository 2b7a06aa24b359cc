//! Константы для objspec-tokenizer

/// Зарезервированные символы по умолчанию: группировка, разделитель,
/// присваивание, конец оператора и маркер комментария
pub const DEFAULT_RESERVED_CHARS: &str = "(){},=;/";

/// Зарезервированные слова по умолчанию
pub const DEFAULT_RESERVED_WORDS: &[&str] = &[
    "-",
    "nullptr",
    "NULL",
    "false",
    "true",
    "bool",
    "int",
    "double",
    "string",
    "bool[]",
    "int[]",
    "double[]",
    "string[]",
];

/// Символ, открывающий комментарий (удвоенный — до конца строки)
pub const COMMENT_CHAR: u8 = b'/';

/// Кавычка строкового литерала
pub const STRING_QUOTE: u8 = b'"';

/// Символ экранирования внутри строкового литерала
pub const ESCAPE_CHAR: u8 = b'\\';

/// Уровень логирования по умолчанию
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Имя конфигурационного файла по умолчанию
pub const DEFAULT_CONFIG_FILE: &str = "objspec.toml";

/// Переменная окружения с зарезервированными символами
pub const ENV_RESERVED_CHARS: &str = "OBJSPEC_RESERVED_CHARS";

/// Переменная окружения с зарезервированными словами (через запятую)
pub const ENV_RESERVED_WORDS: &str = "OBJSPEC_RESERVED_WORDS";

/// Переменная окружения с уровнем логирования
pub const ENV_LOG_LEVEL: &str = "OBJSPEC_LOG_LEVEL";

/// Переменная окружения с фильтрами env_logger
pub const ENV_RUST_LOG: &str = "RUST_LOG";
