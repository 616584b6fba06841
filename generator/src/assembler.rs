use std::io::{Read, Write};
use tracing::{debug, info, trace};
use crate::boundary::{Transitions, detect};
use crate::config::Config;
use crate::convert::normalize;
use crate::csv_input::read_rows;
use crate::error::Mt9Error;
use crate::model::{CarryState, RawRow, Row};
use crate::serialization::{
    ReferenceCounter, close_message_block, close_page_lines, open_message_block, open_page_lines,
    transaction_line,
};

/// Итоги одного запуска
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// обработано строк с операциями
    pub rows: usize,
    /// пропущено пустых строк и заголовков
    pub skipped: usize,
    /// открыто сообщений
    pub messages: usize,
    /// открыто страниц
    pub pages: usize,
    /// выдано автоматических референсов :20:
    pub references: u32,
}

/// Сборщик сообщений MT940/MT950 из потока строк
///
/// Для каждой строки определяет переходы относительно предыдущей,
/// пишет в `sink` закрытие страницы, закрытие сообщения, открытие сообщения,
/// открытие страницы и саму операцию - одним куском на строку.
/// После последней строки нужно вызвать [`Assembler::finish`].
///
/// Пример использования:
/// ```no_run
/// # use generator::{Assembler, Config, Mt9Error};
/// # fn rows() -> Vec<generator::RawRow> { vec![] }
/// # fn main() -> Result<(), Mt9Error> {
/// let config = Config::default();
/// let mut assembler = Assembler::new(&config, std::io::stdout().lock());
/// for raw in rows() {
///     assembler.push_raw(&raw)?;
/// }
/// let (_, summary) = assembler.finish()?;
/// # Ok(())
/// # }
/// ```
pub struct Assembler<'a, W: Write> {
    config: &'a Config,
    sink: W,
    carry: Option<CarryState>,
    counter: ReferenceCounter,
    summary: Summary,
}

impl<'a, W: Write> Assembler<'a, W> {
    /// Go to [`Assembler`]
    pub fn new(config: &'a Config, sink: W) -> Self {
        Assembler {
            config,
            sink,
            carry: None,
            counter: ReferenceCounter::new(),
            summary: Summary::default(),
        }
    }

    /// Состояние, перенесённое от последней обработанной строки
    pub fn carry(&self) -> Option<&CarryState> {
        self.carry.as_ref()
    }

    /// Обрабатывает сырую строку: пропускает пустые строки и заголовок,
    /// остальное нормализует и передаёт в [`Assembler::push`]
    pub fn push_raw(&mut self, raw: &RawRow) -> Result<(), Mt9Error> {
        if raw.is_blank() || raw.is_header() {
            debug!(line = raw.line, "skipping blank or header row");
            self.summary.skipped += 1;
            return Ok(());
        }

        let row = normalize(raw, self.config.date_format)?;
        self.push(&row)
    }

    /// Обрабатывает нормализованную строку
    pub fn push(&mut self, row: &Row) -> Result<(), Mt9Error> {
        let transitions = detect(self.carry.as_ref(), row);
        let chunk = self.render(row, transitions);

        self.sink.write_all(chunk.as_bytes())?;

        // состояние меняется только после записи
        self.carry = Some(CarryState::after(self.carry.as_ref(), row, transitions.open_page));
        self.summary.rows += 1;
        Ok(())
    }

    fn render(&mut self, row: &Row, t: Transitions) -> String {
        let mut out = String::new();

        if t.close_page {
            if let Some(prev) = &self.carry {
                trace!(line = row.line, account = %prev.account, page = %prev.page_no, "closing page");
                out.push_str(&close_page_lines(prev));
            }
        }

        if t.close_message {
            trace!(line = row.line, "closing message");
            out.push_str(&close_message_block(self.config));
            out.push('\n');
        }

        if t.open_message {
            debug!(
                line = row.line,
                sender = %row.sender_bic,
                receiver = %row.receiver_bic,
                "opening message"
            );
            out.push_str(&open_message_block(self.config, row));
            self.summary.messages += 1;
        }

        if t.open_page {
            trace!(line = row.line, account = %row.account, page = %row.page_no, "opening page");
            out.push_str(&open_page_lines(self.config, row, &mut self.counter));
            self.summary.pages += 1;
        }

        out.push_str(&transaction_line(self.config, row));
        out
    }

    /// Закрывает последнюю страницу и последнее сообщение
    ///
    /// Если не было ни одной строки - [`Mt9Error::EmptyInput`]:
    /// закрывающий баланс брать неоткуда.
    pub fn finish(mut self) -> Result<(W, Summary), Mt9Error> {
        let state = self.carry.take().ok_or(Mt9Error::EmptyInput)?;

        let mut out = close_page_lines(&state);
        out.push_str(&close_message_block(self.config));

        self.sink.write_all(out.as_bytes())?;
        self.sink.flush()?;

        self.summary.references = self.counter.issued();
        info!(
            message_type = %self.config.message_type,
            rows = self.summary.rows,
            messages = self.summary.messages,
            pages = self.summary.pages,
            "statement assembled"
        );

        Ok((self.sink, self.summary))
    }
}

/// Читает CSV из `reader` и пишет готовые сообщения в `writer`
pub fn assemble<R: Read, W: Write>(
    reader: R,
    config: &Config,
    writer: W,
) -> Result<Summary, Mt9Error> {
    let mut assembler = Assembler::new(config, writer);

    for raw in read_rows(reader) {
        assembler.push_raw(&raw?)?;
    }

    let (_, summary) = assembler.finish()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Balance, MessageType};
    use chrono::NaiveDate;

    fn config() -> Config {
        Config {
            run_date: NaiveDate::from_ymd_opt(2020, 10, 15).unwrap(),
            ..Config::default()
        }
    }

    fn row(account: &str, page: &str, amount: &str) -> Row {
        Row {
            sender_bic: "SENDBIC".into(),
            receiver_bic: "RECVBIC".into(),
            account: account.into(),
            statement_no: "1".into(),
            page_no: page.into(),
            opening_balance: Balance {
                sign: "C".into(),
                kind: "F".into(),
                date: "201001".into(),
                amount: "100,00".into(),
            },
            txn_date: "201015".into(),
            entry_date: "201015".into(),
            funds_code: "C".into(),
            amount: amount.into(),
            txn_type: "NTRF".into(),
            ref1: "R1".into(),
            closing_balance: Balance {
                sign: "C".into(),
                kind: "F".into(),
                date: "201015".into(),
                amount: "200,00".into(),
            },
            currency: "EUR".into(),
            ..Row::default()
        }
    }

    fn run(rows: &[Row]) -> (String, Summary) {
        let cfg = config();
        let mut assembler = Assembler::new(&cfg, Vec::new());
        for r in rows {
            assembler.push(r).expect("push should succeed");
        }
        let (buf, summary) = assembler.finish().expect("finish should succeed");
        (String::from_utf8(buf).expect("output is utf-8"), summary)
    }

    const HEADER: &str = "{1:A21SENDBICXXXXX0000000000}{2:I950RECVBICXXXXXN}{3:{118:MT940950GEN}{4:\n";

    #[test]
    fn single_row_is_fully_opened_and_closed() {
        let (out, summary) = run(&[row("ACC", "1", "5,00")]);

        let expected = format!(
            "{HEADER}\
             :20:MT950GEN000000\n\
             :25:ACC\n\
             :28C:00001/00001\n\
             :60F:C201001EUR100,00\n\
             :61:201015201015C5,00NTRFR1//\n\
             :62F:C201015EUR200,00\n\
             -}}{{5:}}"
        );
        assert_eq!(out, expected);
        assert_eq!(
            summary,
            Summary {
                rows: 1,
                skipped: 0,
                messages: 1,
                pages: 1,
                references: 1,
            }
        );
    }

    #[test]
    fn same_page_rows_share_envelope_and_page() {
        let (out, summary) = run(&[row("ACC", "1", "5,00"), row("ACC", "1", "6,00")]);

        assert_eq!(out.matches("{1:").count(), 1);
        assert_eq!(out.matches(":20:").count(), 1);
        assert_eq!(out.matches(":61:").count(), 2);
        assert_eq!(out.matches(":62F:").count(), 1);
        assert_eq!(out.matches("-}{5:}").count(), 1);
        assert_eq!(summary.pages, 1);
    }

    #[test]
    fn page_change_closes_page_inside_same_message() {
        let (out, summary) = run(&[row("ACC", "1", "5,00"), row("ACC", "2", "6,00")]);

        assert_eq!(out.matches("{1:").count(), 1);
        assert_eq!(out.matches("-}{5:}").count(), 1);
        assert!(out.contains(
            ":61:201015201015C5,00NTRFR1//\n\
             :62F:C201015EUR200,00\n\
             :20:MT950GEN000001\n\
             :25:ACC\n\
             :28C:00001/00002\n"
        ));
        assert_eq!(summary.pages, 2);
        assert_eq!(summary.references, 2);
    }

    #[test]
    fn participant_change_closes_page_then_message() {
        let mut second = row("ACC", "1", "6,00");
        second.receiver_bic = "OTHERBIC".into();

        let (out, summary) = run(&[row("ACC", "1", "5,00"), second]);

        assert!(out.contains(
            ":62F:C201015EUR200,00\n\
             -}{5:}\n\
             {1:A21SENDBICXXXXX0000000000}{2:I950OTHERBICXXXXN}"
        ));
        assert_eq!(out.matches("{1:").count(), out.matches("{5:").count());
        assert_eq!(summary.messages, 2);
    }

    #[test]
    fn closing_lines_use_page_currency() {
        let mut second = row("ACC", "1", "6,00");
        second.currency = "USD".into();

        let (out, _) = run(&[row("ACC", "1", "5,00"), second]);
        assert!(out.ends_with(":62F:C201015EUR200,00\n-}{5:}"));
    }

    #[test]
    fn checksum_goes_into_every_trailer() {
        let cfg = Config {
            checksum: Some("123456789ABC".into()),
            message_type: MessageType::Mt940,
            ..config()
        };
        let mut second = row("ACC", "1", "6,00");
        second.sender_bic = "NEWBIC".into();

        let mut assembler = Assembler::new(&cfg, Vec::new());
        assembler.push(&row("ACC", "1", "5,00")).unwrap();
        assembler.push(&second).unwrap();
        let (buf, _) = assembler.finish().unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert_eq!(out.matches("-}{5:{CHK:123456789ABC}}").count(), 2);
        assert!(out.contains(":20:MT940GEN000001\n"));
    }

    #[test]
    fn finish_without_rows_is_an_error() {
        let cfg = config();
        let assembler = Assembler::new(&cfg, Vec::new());
        assert!(matches!(assembler.finish(), Err(Mt9Error::EmptyInput)));
    }

    #[test]
    fn carry_state_follows_last_row() {
        let cfg = config();
        let mut assembler = Assembler::new(&cfg, Vec::new());
        assert!(assembler.carry().is_none());

        assembler.push(&row("ACC", "1", "5,00")).unwrap();
        assembler.push(&row("ACC", "7", "5,00")).unwrap();

        let carry = assembler.carry().expect("state after two rows");
        assert_eq!(carry.page_no, "7");
        assert_eq!(carry.account, "ACC");
    }
}
