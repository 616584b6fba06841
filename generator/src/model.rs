use std::fmt;
use std::str::FromStr;

/// Количество колонок во входной строке
pub const FIELD_COUNT: usize = 27;

/// Тип генерируемого сообщения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageType {
    /// MT940, выписка клиенту (с полем :86:)
    Mt940,
    /// MT950, выписка между банками
    #[default]
    Mt950,
}

impl MessageType {
    /// Трёхзначный код типа, как он пишется в заголовке
    pub fn code(self) -> &'static str {
        match self {
            MessageType::Mt940 => "940",
            MessageType::Mt950 => "950",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MT{}", self.code())
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().trim_start_matches("MT") {
            "940" => Ok(MessageType::Mt940),
            "950" => Ok(MessageType::Mt950),
            other => Err(format!("unsupported message type: {other}")),
        }
    }
}

/// Формат дат во входном файле
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    #[default]
    DdMmYyyy,
    MmDdYyyy,
    YyyyMmDd,
}

impl FromStr for DateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DDMMYYYY" => Ok(DateFormat::DdMmYyyy),
            "MMDDYYYY" => Ok(DateFormat::MmDdYyyy),
            "YYYYMMDD" => Ok(DateFormat::YyyyMmDd),
            other => Err(format!("unsupported date format: {other}")),
        }
    }
}

/// Направление сообщения в заголовке приложения {2:
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// I - входящее в SWIFT
    #[default]
    Input,
    /// O - исходящее из SWIFT
    Output,
}

impl Direction {
    pub fn code(self) -> char {
        match self {
            Direction::Input => 'I',
            Direction::Output => 'O',
        }
    }
}

/// Баланс в уже нормализованном виде (строки, готовые к записи в тег)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Balance {
    /// C / D
    pub sign: String,
    /// F (final) / M (intermediate)
    pub kind: String,
    /// YYMMDD
    pub date: String,
    /// сумма с запятой в качестве десятичного разделителя
    pub amount: String,
}

/// Доступный баланс (:64:), необязательный
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableBalance {
    /// пустой знак означает, что доступного баланса нет
    pub sign: String,
    pub date: String,
    pub amount: String,
}

impl AvailableBalance {
    pub fn is_present(&self) -> bool {
        !self.sign.is_empty()
    }
}

/// Сырая строка входных данных: поля как есть и номер строки для диагностики
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// номер строки во входном файле (с 1)
    pub line: u64,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn new(line: u64, fields: Vec<String>) -> Self {
        RawRow { line, fields }
    }

    /// Пустая строка: все поля пустые или из пробелов
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.trim().is_empty())
    }

    /// Строка заголовка: предпоследняя колонка называется "Ref4 (MT940 only)"
    pub fn is_header(&self) -> bool {
        if self.fields.len() < 2 {
            return false;
        }
        let marker: String = self.fields[self.fields.len() - 2]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        marker == "REF4(MT940ONLY)"
    }
}

/// Одна нормализованная строка выписки: одна операция и контекст её страницы
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// номер строки во входном файле
    pub line: u64,

    pub sender_bic: String,
    pub receiver_bic: String,
    pub account: String,
    pub statement_no: String,
    pub page_no: String,
    pub opening_balance: Balance,

    /// дата валютирования
    pub txn_date: String,
    /// дата проводки
    pub entry_date: String,
    /// признак дебет/кредит (и код средств)
    pub funds_code: String,
    pub amount: String,
    pub txn_type: String,
    /// референс владельца счёта
    pub ref1: String,
    /// референс банка (после //)
    pub ref2: String,
    /// дополнительная строка, пишется как есть
    pub ref3: String,

    pub closing_balance: Balance,
    pub available_balance: AvailableBalance,
    pub currency: String,
    /// текст для :86:, только MT940
    pub ref4: String,
    /// внешний референс для :20:, если пуст - генерируется
    pub external_reference: String,
}

/// Состояние, переносимое от предыдущей строки к следующей
///
/// Заменяется целиком после обработки каждой строки.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarryState {
    pub account: String,
    pub sender_bic: String,
    pub receiver_bic: String,
    pub statement_no: String,
    pub page_no: String,
    /// валюта строки, открывшей текущую страницу
    pub currency: String,
    pub opening_balance: Balance,
    pub closing_balance: Balance,
    pub available_balance: AvailableBalance,
}

impl CarryState {
    /// Состояние после строки `row`
    ///
    /// `page_opened` - открыла ли эта строка новую страницу. Если нет,
    /// валюта берётся из предыдущего состояния.
    pub fn after(prev: Option<&CarryState>, row: &Row, page_opened: bool) -> Self {
        let currency = match prev {
            Some(p) if !page_opened => p.currency.clone(),
            _ => row.currency.clone(),
        };

        CarryState {
            account: row.account.clone(),
            sender_bic: row.sender_bic.clone(),
            receiver_bic: row.receiver_bic.clone(),
            statement_no: row.statement_no.clone(),
            page_no: row.page_no.clone(),
            currency,
            opening_balance: row.opening_balance.clone(),
            closing_balance: row.closing_balance.clone(),
            available_balance: row.available_balance.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(fields: &[&str]) -> RawRow {
        RawRow::new(1, fields.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn header_row_is_detected_case_and_space_insensitive() {
        assert!(raw(&["Sender", "x", "Ref4 (MT940 only)", "ExtRef"]).is_header());
        assert!(raw(&["a", "ref4(mt940ONLY) ", "b"]).is_header());
        assert!(!raw(&["a", "narrative", "b"]).is_header());
        assert!(!raw(&["ref4(mt940only)"]).is_header());
    }

    #[test]
    fn blank_row_is_detected() {
        assert!(raw(&["", "  ", "\t"]).is_blank());
        assert!(!raw(&["", "x"]).is_blank());
    }

    #[test]
    fn message_type_parses_with_and_without_prefix() {
        assert_eq!("940".parse::<MessageType>(), Ok(MessageType::Mt940));
        assert_eq!("mt950".parse::<MessageType>(), Ok(MessageType::Mt950));
        assert!("942".parse::<MessageType>().is_err());
    }

    #[test]
    fn date_format_parses_case_insensitive() {
        assert_eq!("yyyymmdd".parse::<DateFormat>(), Ok(DateFormat::YyyyMmDd));
        assert_eq!("DDMMYYYY".parse::<DateFormat>(), Ok(DateFormat::DdMmYyyy));
        assert!("YYMMDD".parse::<DateFormat>().is_err());
    }

    #[test]
    fn carry_state_keeps_page_currency_within_page() {
        let mut row = Row {
            currency: "EUR".into(),
            ..Row::default()
        };
        let first = CarryState::after(None, &row, true);
        assert_eq!(first.currency, "EUR");

        row.currency = "USD".into();
        let same_page = CarryState::after(Some(&first), &row, false);
        assert_eq!(same_page.currency, "EUR");

        let new_page = CarryState::after(Some(&same_page), &row, true);
        assert_eq!(new_page.currency, "USD");
    }
}
