mod common;
mod envelope_helpers;
mod statement_helpers;

use crate::config::Config;
use crate::model::{CarryState, Row};

pub use statement_helpers::ReferenceCounter;

/// Открывает сообщение: блоки {1:, {2:, {3: и начало {4:
///
/// BIC отправителя и получателя берутся из первой строки сообщения.
pub fn open_message_block(config: &Config, row: &Row) -> String {
    let mut out = envelope_helpers::basic_header(config, row);
    out.push_str(&envelope_helpers::application_header(config, row));
    out.push_str(&envelope_helpers::user_header(config));
    out
}

/// Закрывает блок {4: и пишет трейлер {5:, с контрольной суммой, если она задана
pub fn close_message_block(config: &Config) -> String {
    envelope_helpers::trailer(config)
}

/// Строки начала страницы: :20:, :25:, :28C:, :60x:
///
/// Если у строки нет внешнего референса, :20: берётся из `counter`.
pub fn open_page_lines(config: &Config, row: &Row, counter: &mut ReferenceCounter) -> String {
    statement_helpers::open_page_lines(row, config.message_type, counter)
}

/// Строки закрытия страницы (:62x: и :64:) по перенесённому состоянию
pub fn close_page_lines(state: &CarryState) -> String {
    statement_helpers::close_page_lines(state)
}

/// :61: операции, дополнительная строка ref3 и :86: для MT940
pub fn transaction_line(config: &Config, row: &Row) -> String {
    statement_helpers::transaction_lines(row, config.message_type)
}
