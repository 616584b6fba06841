mod utils;

use crate::error::Mt9Error;
use crate::model::{AvailableBalance, Balance, DateFormat, FIELD_COUNT, RawRow, Row};
pub use utils::{normalize_amount, normalize_date, renormalize_date};
use utils::{blank_if_empty, upper};

/// Индексы колонок входной строки
mod col {
    pub const SENDER_BIC: usize = 0;
    pub const RECEIVER_BIC: usize = 1;
    pub const ACCOUNT: usize = 2;
    pub const STATEMENT_NO: usize = 3;
    pub const PAGE_NO: usize = 4;
    pub const OPENING_SIGN: usize = 5;
    pub const OPENING_TYPE: usize = 6;
    pub const OPENING_DATE: usize = 7;
    pub const OPENING_AMOUNT: usize = 8;
    pub const TXN_DATE: usize = 9;
    pub const ENTRY_DATE: usize = 10;
    pub const FUNDS_CODE: usize = 11;
    pub const AMOUNT: usize = 12;
    pub const TXN_TYPE: usize = 13;
    pub const REF1: usize = 14;
    pub const REF2: usize = 15;
    pub const REF3: usize = 16;
    pub const CLOSING_SIGN: usize = 17;
    pub const CLOSING_TYPE: usize = 18;
    pub const CLOSING_DATE: usize = 19;
    pub const CLOSING_AMOUNT: usize = 20;
    pub const AVAILABLE_SIGN: usize = 21;
    pub const AVAILABLE_DATE: usize = 22;
    pub const AVAILABLE_AMOUNT: usize = 23;
    pub const CURRENCY: usize = 24;
    pub const REF4: usize = 25;
    pub const EXTERNAL_REFERENCE: usize = 26;
}

/// Приводит сырую строку к виду, готовому для записи в теги MT940/MT950
///
/// Ошибки:
/// - [`Mt9Error::MalformedRow`], если в строке не 27 полей
/// - [`Mt9Error::MalformedDate`], если дату не удалось разобрать
pub fn normalize(raw: &RawRow, date_format: DateFormat) -> Result<Row, Mt9Error> {
    if raw.fields.len() != FIELD_COUNT {
        return Err(Mt9Error::MalformedRow {
            row: raw.line,
            expected: FIELD_COUNT,
            actual: raw.fields.len(),
        });
    }

    // хелперы
    let get = |idx: usize| -> String { raw.fields[idx].clone() };

    let date = |idx: usize, field: &'static str| -> Result<String, Mt9Error> {
        normalize_date(&raw.fields[idx], date_format).ok_or_else(|| Mt9Error::MalformedDate {
            row: raw.line,
            field,
            value: raw.fields[idx].clone(),
        })
    };

    // необязательная дата: пустая остаётся пустой
    let optional_date = |idx: usize, field: &'static str| -> Result<String, Mt9Error> {
        if raw.fields[idx].trim().is_empty() {
            Ok(String::new())
        } else {
            date(idx, field)
        }
    };

    let opening_balance = Balance {
        sign: upper(&raw.fields[col::OPENING_SIGN]),
        kind: upper(&raw.fields[col::OPENING_TYPE]),
        date: date(col::OPENING_DATE, "opening_balance_date")?,
        amount: normalize_amount(&raw.fields[col::OPENING_AMOUNT]),
    };

    let closing_balance = Balance {
        sign: upper(&raw.fields[col::CLOSING_SIGN]),
        kind: upper(&raw.fields[col::CLOSING_TYPE]),
        date: date(col::CLOSING_DATE, "closing_balance_date")?,
        amount: normalize_amount(&raw.fields[col::CLOSING_AMOUNT]),
    };

    // дата доступного баланса обязательна, как только задан его знак
    let available_sign = upper(&blank_if_empty(&raw.fields[col::AVAILABLE_SIGN]));
    let available_date = if available_sign.is_empty() {
        optional_date(col::AVAILABLE_DATE, "available_balance_date")?
    } else {
        date(col::AVAILABLE_DATE, "available_balance_date")?
    };
    let available_balance = AvailableBalance {
        sign: available_sign,
        date: available_date,
        amount: normalize_amount(&raw.fields[col::AVAILABLE_AMOUNT]),
    };

    Ok(Row {
        line: raw.line,
        sender_bic: get(col::SENDER_BIC),
        receiver_bic: get(col::RECEIVER_BIC),
        account: get(col::ACCOUNT),
        statement_no: get(col::STATEMENT_NO),
        page_no: get(col::PAGE_NO),
        opening_balance,
        txn_date: date(col::TXN_DATE, "txn_date")?,
        // пустая дата проводки допустима, в :61: её тогда просто нет
        entry_date: optional_date(col::ENTRY_DATE, "entry_date")?,
        funds_code: upper(&raw.fields[col::FUNDS_CODE]),
        amount: normalize_amount(&raw.fields[col::AMOUNT]),
        txn_type: get(col::TXN_TYPE),
        ref1: get(col::REF1),
        ref2: get(col::REF2),
        ref3: blank_if_empty(&raw.fields[col::REF3]),
        closing_balance,
        available_balance,
        currency: get(col::CURRENCY),
        ref4: get(col::REF4),
        external_reference: blank_if_empty(&raw.fields[col::EXTERNAL_REFERENCE]),
    })
}
