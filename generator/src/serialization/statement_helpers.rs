use crate::model::{AvailableBalance, Balance, CarryState, MessageType, Row};
use super::common::zero_pad;

/// Счётчик автоматических референсов :20:
///
/// Один на весь запуск, только растёт.
#[derive(Debug, Default, Clone)]
pub struct ReferenceCounter {
    next: u32,
}

impl ReferenceCounter {
    pub fn new() -> Self {
        ReferenceCounter::default()
    }

    /// Сколько референсов уже выдано
    pub fn issued(&self) -> u32 {
        self.next
    }

    /// MT<тип>GEN + шестизначный номер
    pub fn next_reference(&mut self, message_type: MessageType) -> String {
        let reference = format!("MT{}GEN{:06}", message_type.code(), self.next);
        self.next += 1;
        reference
    }
}

/// :60x: / :62x: - баланс с типом F/M в теге
pub(super) fn format_balance_line(tag: &str, balance: &Balance, currency: &str) -> String {
    format!(
        ":{tag}{}:{}{}{currency}{}\n",
        balance.kind, balance.sign, balance.date, balance.amount,
    )
}

/// :64: - доступный баланс
pub(super) fn format_available_line(balance: &AvailableBalance, currency: &str) -> String {
    format!(
        ":64:{}{}{currency}{}\n",
        balance.sign, balance.date, balance.amount,
    )
}

/// :20:, :25:, :28C:, :60x: для новой страницы
pub(super) fn open_page_lines(
    row: &Row,
    message_type: MessageType,
    counter: &mut ReferenceCounter,
) -> String {
    let reference = if row.external_reference.is_empty() {
        counter.next_reference(message_type)
    } else {
        row.external_reference.clone()
    };

    let mut out = format!(":20:{reference}\n");
    out.push_str(&format!(":25:{}\n", row.account));
    out.push_str(&format!(
        ":28C:{}/{}\n",
        zero_pad(&row.statement_no, 5),
        zero_pad(&row.page_no, 5),
    ));
    out.push_str(&format_balance_line("60", &row.opening_balance, &row.currency));
    out
}

/// :62x: и, если есть, :64: по состоянию закрываемой страницы
pub(super) fn close_page_lines(state: &CarryState) -> String {
    let mut out = format_balance_line("62", &state.closing_balance, &state.currency);
    if state.available_balance.is_present() {
        out.push_str(&format_available_line(&state.available_balance, &state.currency));
    }
    out
}

/// :61: и сопутствующие строки одной операции
///
/// Дата проводки необязательна: если её нет, за датой валютирования
/// сразу идёт признак дебет/кредит.
pub(super) fn transaction_lines(row: &Row, message_type: MessageType) -> String {
    let mut out = format!(
        ":61:{}{}{}{}{}{}//{}\n",
        row.txn_date,
        row.entry_date,
        row.funds_code,
        row.amount,
        row.txn_type,
        row.ref1,
        row.ref2,
    );

    if !row.ref3.is_empty() {
        out.push_str(&row.ref3);
        out.push('\n');
    }

    // :86: есть только в MT940
    if message_type == MessageType::Mt940 && !row.ref4.trim().is_empty() {
        out.push_str(&format!(":86:{}\n", row.ref4));
    }

    out
}
