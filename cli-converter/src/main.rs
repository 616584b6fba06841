use std::fs::OpenOptions;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;
use chrono::{NaiveDate, Utc};
use clap::{Parser, ValueEnum};
use generator::{Config, Mir, Mt9Error, Summary, assemble, open_input};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};


#[derive(Parser, Debug)]
#[command(
    name = "cli_converter",
    version,
    about = "Конвертирует CSV-выписку в сообщения SWIFT MT940/MT950.",
    long_about = None,
)]
struct Args {
    /// Входной CSV-файл (27 колонок на строку)
    #[arg(long)]
    input: PathBuf,

    /// Выходной файл, дописывается в конец. Без него - stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Тип сообщения
    #[arg(long, value_enum, default_value_t = MessageType::Mt950)]
    message_type: MessageType,

    /// Формат дат во входном файле
    #[arg(long, value_enum, ignore_case = true, default_value_t = DateFormat::Ddmmyyyy)]
    date_format: DateFormat,

    // {1: Basic Header

    /// Application ID: A - general purpose, F - financial, L - logins
    #[arg(long, default_value = "A")]
    app_id: String,

    /// Service ID: 01 - FIN/GPA, 21 - ACK/NAK
    #[arg(long, default_value = "21")]
    service_id: String,

    /// Номер сессии
    #[arg(long, default_value = "0000")]
    session_no: String,

    /// Номер последовательности
    #[arg(long, default_value = "000000")]
    sequence_no: String,

    // {2: Application Header

    /// Направление: I - в SWIFT, O - из SWIFT
    #[arg(long, value_enum, ignore_case = true, default_value_t = Direction::I)]
    direction: Direction,

    /// Приоритет: S - system, N - normal, U - urgent
    #[arg(long, default_value = "N")]
    priority: String,

    /// Delivery monitoring (только I): 1, 2 или 3
    #[arg(long, default_value = "")]
    delivery_monitoring: String,

    /// Obsolescence period (только I): 003 или 020
    #[arg(long, default_value = "")]
    obsolescence: String,

    /// Время ввода HHMM (только O)
    #[arg(long, default_value = "0000")]
    input_time: String,

    /// Дата вывода YYMMDD (только O)
    #[arg(long, default_value = "010101")]
    output_date: String,

    /// Время вывода HHMM (только O)
    #[arg(long, default_value = "1200")]
    output_time: String,

    /// Готовый MIR (только O). Без него MIR генерируется
    #[arg(long)]
    mir: Option<String>,

    /// Дата для автоматического MIR, YYYY-MM-DD. По умолчанию сегодня
    #[arg(long)]
    run_date: Option<NaiveDate>,

    // {3: User Header

    /// Banking priority (поле 113), дополняется нулями до 4 знаков
    #[arg(long)]
    banking_priority: Option<String>,

    /// Message user reference (поле 118)
    #[arg(long, default_value = "MT940950GEN")]
    user_reference: String,

    // {5: Trailer

    /// Контрольная сумма для {5:{CHK:...}}
    #[arg(long)]
    checksum: Option<String>,
}

/// Поддерживаемые типы сообщений для CLI
#[derive(Copy, Clone, Debug, ValueEnum)]
enum MessageType {
    #[value(name = "940")]
    Mt940,
    #[value(name = "950")]
    Mt950,
}

/// Форматы дат для CLI
#[derive(Copy, Clone, Debug, ValueEnum)]
enum DateFormat {
    #[value(name = "DDMMYYYY")]
    Ddmmyyyy,
    #[value(name = "MMDDYYYY")]
    Mmddyyyy,
    #[value(name = "YYYYMMDD")]
    Yyyymmdd,
}

/// Направления для CLI
#[derive(Copy, Clone, Debug, ValueEnum)]
enum Direction {
    #[value(name = "I")]
    I,
    #[value(name = "O")]
    O,
}

impl From<MessageType> for generator::MessageType {
    fn from(value: MessageType) -> Self {
        match value {
            MessageType::Mt940 => generator::MessageType::Mt940,
            MessageType::Mt950 => generator::MessageType::Mt950,
        }
    }
}

impl From<DateFormat> for generator::DateFormat {
    fn from(value: DateFormat) -> Self {
        match value {
            DateFormat::Ddmmyyyy => generator::DateFormat::DdMmYyyy,
            DateFormat::Mmddyyyy => generator::DateFormat::MmDdYyyy,
            DateFormat::Yyyymmdd => generator::DateFormat::YyyyMmDd,
        }
    }
}

impl From<Direction> for generator::Direction {
    fn from(value: Direction) -> Self {
        match value {
            Direction::I => generator::Direction::Input,
            Direction::O => generator::Direction::Output,
        }
    }
}

impl Args {
    fn to_config(&self) -> Config {
        Config {
            message_type: self.message_type.into(),
            date_format: self.date_format.into(),
            app_id: self.app_id.clone(),
            service_id: self.service_id.clone(),
            session_no: self.session_no.clone(),
            sequence_no: self.sequence_no.clone(),
            direction: self.direction.into(),
            priority: self.priority.clone(),
            delivery_monitoring: self.delivery_monitoring.clone(),
            obsolescence: self.obsolescence.clone(),
            input_time: self.input_time.clone(),
            output_date: self.output_date.clone(),
            output_time: self.output_time.clone(),
            mir: match &self.mir {
                Some(mir) => Mir::Literal(mir.clone()),
                None => Mir::Auto,
            },
            run_date: self.run_date.unwrap_or_else(|| Utc::now().date_naive()),
            banking_priority: self.banking_priority.clone(),
            user_reference: self.user_reference.clone(),
            checksum: self.checksum.clone(),
        }
    }
}

fn main() {
    // логи в stderr, чтобы не смешивать их с сообщением в stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Mt9Error> {
    let args = Args::parse();
    tracing::debug!(?args, "parsed arguments");

    let config = args.to_config();

    // проверяем вход до того, как что-то открыть на запись
    let input = open_input(&args.input)?;

    let summary: Summary = match &args.output {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            assemble(input, &config, BufWriter::new(file))?
        }
        None => {
            let stdout = io::stdout();
            let handle = stdout.lock();
            assemble(input, &config, handle)?
        }
    };

    tracing::info!(
        rows = summary.rows,
        messages = summary.messages,
        pages = summary.pages,
        "{} created successfully",
        config.message_type,
    );

    Ok(())
}
