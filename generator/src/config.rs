use chrono::{NaiveDate, Utc};
use crate::model::{DateFormat, Direction, MessageType};

/// Message Input Reference для исходящих сообщений
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mir {
    /// собирается из даты запуска, BIC отправителя, номера сессии и последовательности
    #[default]
    Auto,
    /// готовое значение, пишется как есть
    Literal(String),
}

/// Параметры одного запуска генерации
///
/// Создаётся один раз перед обработкой и дальше только читается.
/// Значения по умолчанию:
/// ```
/// # use generator::{Config, MessageType};
/// let config = Config::default();
/// assert_eq!(config.message_type, MessageType::Mt950);
/// assert_eq!(config.user_reference, "MT940950GEN");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 940 или 950
    pub message_type: MessageType,
    /// формат дат во входном файле
    pub date_format: DateFormat,

    // {1: Basic Header

    /// Application ID: A - general purpose, F - financial, L - logins
    pub app_id: String,
    /// Service ID: 01 - FIN/GPA, 21 - ACK/NAK
    pub service_id: String,
    pub session_no: String,
    pub sequence_no: String,

    // {2: Application Header

    pub direction: Direction,
    /// S - system, N - normal, U - urgent
    pub priority: String,
    /// только для I: 1 - non delivery warning, 2 - delivery notification, 3 - оба
    pub delivery_monitoring: String,
    /// только для I: 003 (при U) или 020 (при N)
    pub obsolescence: String,
    /// только для O: HHMM
    pub input_time: String,
    /// только для O: YYMMDD
    pub output_date: String,
    /// только для O: HHMM
    pub output_time: String,
    /// только для O
    pub mir: Mir,
    /// дата, из которой берётся YYMMDD для автоматического MIR
    pub run_date: NaiveDate,

    // {3: User Header

    /// поле 113, дополняется нулями до 4 знаков
    pub banking_priority: Option<String>,
    /// поле 118
    pub user_reference: String,

    // {5: Trailer

    pub checksum: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            message_type: MessageType::default(),
            date_format: DateFormat::default(),
            app_id: "A".into(),
            service_id: "21".into(),
            session_no: "0000".into(),
            sequence_no: "000000".into(),
            direction: Direction::default(),
            priority: "N".into(),
            delivery_monitoring: String::new(),
            obsolescence: String::new(),
            input_time: "0000".into(),
            output_date: "010101".into(),
            output_time: "1200".into(),
            mir: Mir::default(),
            run_date: Utc::now().date_naive(),
            banking_priority: None,
            user_reference: "MT940950GEN".into(),
            checksum: None,
        }
    }
}
