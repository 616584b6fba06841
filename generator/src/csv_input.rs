use std::fs::File;
use std::io::Read;
use std::path::Path;
use csv::{ReaderBuilder, StringRecordsIntoIter};
use crate::error::Mt9Error;
use crate::model::RawRow;

/// Открывает входной файл, проверив, что он существует
///
/// Отсутствие файла - [`Mt9Error::InputUnavailable`], до начала какой-либо обработки.
pub fn open_input(path: &Path) -> Result<File, Mt9Error> {
    if !path.is_file() {
        return Err(Mt9Error::InputUnavailable(path.to_path_buf()));
    }
    Ok(File::open(path)?)
}

/// Строки CSV-файла в виде [`RawRow`]
///
/// Количество колонок здесь не проверяется: строки разной длины читаются как есть,
/// проверка делается при нормализации.
pub struct CsvRows<R: Read> {
    records: StringRecordsIntoIter<R>,
}

/// Go to [`CsvRows`]
pub fn read_rows<R: Read>(reader: R) -> CsvRows<R> {
    let rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    CsvRows {
        records: rdr.into_records(),
    }
}

impl<R: Read> Iterator for CsvRows<R> {
    type Item = Result<RawRow, Mt9Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let fields = record.iter().map(str::to_string).collect();

        Some(Ok(RawRow::new(line, fields)))
    }
}
