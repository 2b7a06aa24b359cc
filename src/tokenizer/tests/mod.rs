//! Тесты для модуля tokenizer

pub mod source_tests;
