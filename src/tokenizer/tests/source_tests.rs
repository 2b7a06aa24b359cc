//! Тесты для источника символов

use crate::common::{Error, ErrorKind};
use crate::tokenizer::CharSource;
use std::io::{self, Read};

/// Поток, который отдает несколько байт, а затем падает
struct FailingReader {
    data: Vec<u8>,
    pos: usize,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos < self.data.len() {
            buf[0] = self.data[self.pos];
            self.pos += 1;
            Ok(1)
        } else {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "stream reset"))
        }
    }
}

#[test]
fn test_read_counts_bytes_and_lines() {
    let mut source = CharSource::from_string("a\nb\n");

    assert_eq!(source.read_char().unwrap(), Some(b'a'));
    assert_eq!(source.bytes_read(), 1);
    assert_eq!(source.line_number(), 0);

    assert_eq!(source.read_char().unwrap(), Some(b'\n'));
    assert_eq!(source.line_number(), 1);

    assert_eq!(source.read_char().unwrap(), Some(b'b'));
    assert_eq!(source.read_char().unwrap(), Some(b'\n'));
    assert_eq!(source.read_char().unwrap(), None);

    assert_eq!(source.bytes_read(), 4);
    assert_eq!(source.line_number(), 2);
    assert_eq!(source.consumed_text(), "a\nb\n");
}

#[test]
fn test_peek_does_not_consume() {
    let mut source = CharSource::from_string("xy");

    assert_eq!(source.peek_char().unwrap(), Some(b'x'));
    assert_eq!(source.peek_char().unwrap(), Some(b'x'));
    assert_eq!(source.bytes_read(), 0);
    assert_eq!(source.consumed_text(), "");

    assert_eq!(source.read_char().unwrap(), Some(b'x'));
    assert_eq!(source.peek_char().unwrap(), Some(b'y'));
    assert_eq!(source.bytes_read(), 1);
}

#[test]
fn test_consume_expected_char() {
    let mut source = CharSource::from_string("\"x");

    source.consume_char(b'"').unwrap();
    assert_eq!(source.bytes_read(), 1);

    let err = source.consume_char(b'"').unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedLexeme);

    let err = source.consume_char(b'"').unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedLexeme);
}

#[test]
fn test_borrowed_reader() {
    let mut input: &[u8] = b"int x";
    let mut source = CharSource::from_reader(&mut input);

    let mut read = Vec::new();
    while let Some(byte) = source.read_char().unwrap() {
        read.push(byte);
    }
    assert_eq!(read, b"int x");
}

#[test]
fn test_io_fault_is_distinguished_from_end_of_input() {
    let mut reader = FailingReader {
        data: b"ab".to_vec(),
        pos: 0,
    };
    let mut source = CharSource::from_reader(&mut reader);

    assert_eq!(source.read_char().unwrap(), Some(b'a'));
    assert_eq!(source.read_char().unwrap(), Some(b'b'));

    let err = source.read_char().unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(err.kind(), ErrorKind::UnderlyingIoFault);
    assert_eq!(source.bytes_read(), 2);
}
