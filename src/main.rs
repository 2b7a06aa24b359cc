//! Главный исполняемый файл objspec-tok

use clap::Parser;
use objspec_tokenizer::cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("objspec-tok: {}", e);
            return ExitCode::from(2);
        }
    };

    cli.logger_builder(&config).init();

    log::debug!("Конфигурация: {:?}", config);

    match cli.execute(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Токенизация прервана: {}", e);
            eprintln!("objspec-tok: {}", e);
            ExitCode::FAILURE
        }
    }
}
