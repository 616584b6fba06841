use std::{io::Error as IoError, path::PathBuf};
use thiserror::Error;

/// Ошибки при генерации MT940/MT950
///
/// Все ошибки фатальные: генерация прерывается, уже записанное в выход не откатывается.
#[derive(Debug, Error)]
pub enum Mt9Error {
    // обёртки

    /// обёртка csv::Error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// обёртка std::io::Error
    #[error("io error: {0}")]
    Io(#[from] IoError),

    // логические ошибки

    /// неверное количество полей в строке
    #[error("row {row}: bad column count {actual}, expected {expected}")]
    MalformedRow {
        row: u64,
        expected: usize,
        actual: usize,
    },
    /// дату не удалось привести к YYMMDD
    #[error("row {row}: malformed date in field {field}: '{value}'")]
    MalformedDate {
        row: u64,
        field: &'static str,
        value: String,
    },
    /// во входных данных нет ни одной строки с операцией
    #[error("no statement rows in input, nothing to close")]
    EmptyInput,
    /// входной файл не существует или не является файлом
    #[error("input unavailable: {}", .0.display())]
    InputUnavailable(PathBuf),
}
