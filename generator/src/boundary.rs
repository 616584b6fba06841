use crate::model::{CarryState, Row};

/// Переходы, которые вызывает очередная строка
///
/// Вывод для них пишется строго в порядке полей:
/// закрытие страницы, закрытие сообщения, открытие сообщения, открытие страницы.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transitions {
    pub close_page: bool,
    pub close_message: bool,
    pub open_message: bool,
    pub open_page: bool,
}

impl Transitions {
    /// Ничего не открывается и не закрывается
    pub fn is_none(&self) -> bool {
        *self == Transitions::default()
    }
}

/// Определяет переходы между предыдущей строкой (её состоянием) и текущей
///
/// `prev == None` - это первая строка: закрывать нечего, открывается и сообщение, и страница.
/// Смена отправителя или получателя закрывает сообщение, а вместе с ним и страницу,
/// даже если счёт и номер страницы не поменялись.
pub fn detect(prev: Option<&CarryState>, cur: &Row) -> Transitions {
    let Some(prev) = prev else {
        return Transitions {
            close_page: false,
            close_message: false,
            open_message: true,
            open_page: true,
        };
    };

    let page_moved = prev.page_no != cur.page_no || prev.account != cur.account;
    let close_message =
        prev.sender_bic != cur.sender_bic || prev.receiver_bic != cur.receiver_bic;

    let close_page = page_moved || close_message;
    let open_message = close_message;
    let open_page = close_page || open_message;

    Transitions {
        close_page,
        close_message,
        open_message,
        open_page,
    }
}
