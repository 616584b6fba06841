use crate::config::{Config, Mir};
use crate::model::{Direction, Row};
use super::common::{pad_bic, zero_pad};

/// {1: Basic Header
pub(super) fn basic_header(config: &Config, row: &Row) -> String {
    format!(
        "{{1:{}{}{}{}{}}}",
        config.app_id,
        config.service_id,
        pad_bic(&row.sender_bic),
        config.session_no,
        config.sequence_no,
    )
}

/// MIR для исходящего сообщения: YYMMDD + BIC отправителя + сессия + последовательность
pub(super) fn message_input_reference(config: &Config, row: &Row) -> String {
    match &config.mir {
        Mir::Literal(mir) => mir.clone(),
        Mir::Auto => format!(
            "{}{}{}{}",
            config.run_date.format("%y%m%d"),
            pad_bic(&row.sender_bic),
            config.session_no,
            config.sequence_no,
        ),
    }
}

/// {2: Application Header, вид зависит от направления
pub(super) fn application_header(config: &Config, row: &Row) -> String {
    let msg_type = config.message_type.code();
    let direction = config.direction.code();

    match config.direction {
        Direction::Input => format!(
            "{{2:{direction}{msg_type}{}{}{}{}}}",
            pad_bic(&row.receiver_bic),
            config.priority,
            config.delivery_monitoring,
            config.obsolescence,
        ),
        Direction::Output => format!(
            "{{2:{direction}{msg_type}{}{}{}{}{}}}",
            config.input_time,
            message_input_reference(config, row),
            config.output_date,
            config.output_time,
            config.priority,
        ),
    }
}

/// {3: User Header и начало блока {4:
pub(super) fn user_header(config: &Config) -> String {
    let banking_priority = config
        .banking_priority
        .as_deref()
        .map(|p| format!("{{113:{}}}", zero_pad(p.trim(), 4)))
        .unwrap_or_default();

    format!("{{3:{banking_priority}{{118:{}}}{{4:\n", config.user_reference)
}

/// -}{5: закрывает блок {4: и пишет трейлер
pub(super) fn trailer(config: &Config) -> String {
    match &config.checksum {
        Some(chk) => format!("-}}{{5:{{CHK:{chk}}}}}"),
        None => "-}{5:}".to_string(),
    }
}
