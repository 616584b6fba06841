use chrono::NaiveDate;
use lazy_regex::{regex, regex_is_match};
use once_cell::sync::Lazy;
use regex::Regex;
use crate::model::DateFormat;

// уже нормализованная дата: YYMMDD
static YYMMDD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2})(\d{2})(\d{2})$").unwrap()
});

// DDMMYYYY и MMDDYYYY: две пары цифр и год, между частями не больше одного разделителя
static PAIRS_FIRST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2})\D?(\d{2})\D?(\d{4})$").unwrap()
});

// YYYYMMDD
static YEAR_FIRST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})\D?(\d{2})\D?(\d{2})$").unwrap()
});

/// Приводит дату из входного файла к YYMMDD
///
/// Возвращает `None`, если строка не похожа на дату в указанном формате
/// или такой даты нет в календаре. Год всегда четырёхзначный: короткая
/// запись вроде `151020` не принимается ни в одном формате.
pub fn normalize_date(raw: &str, format: DateFormat) -> Option<String> {
    let s = raw.trim();

    let (year, month, day) = match format {
        DateFormat::DdMmYyyy => {
            let caps = PAIRS_FIRST_RE.captures(s)?;
            (caps[3].parse().ok()?, caps[2].parse().ok()?, caps[1].parse().ok()?)
        }
        DateFormat::MmDdYyyy => {
            let caps = PAIRS_FIRST_RE.captures(s)?;
            (caps[3].parse().ok()?, caps[1].parse().ok()?, caps[2].parse().ok()?)
        }
        DateFormat::YyyyMmDd => {
            let caps = YEAR_FIRST_RE.captures(s)?;
            (caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?)
        }
    };

    yymmdd(year, month, day)
}

/// Повторная нормализация уже приведённой даты YYMMDD
///
/// Проверяет, что это настоящая дата, и возвращает её без изменений.
/// Для сырых значений из файла не подходит: там нужен [`normalize_date`].
pub fn renormalize_date(normalized: &str) -> Option<String> {
    let caps = YYMMDD_RE.captures(normalized.trim())?;
    let yy: i32 = caps[1].parse().ok()?;
    yymmdd(2000 + yy, caps[2].parse().ok()?, caps[3].parse().ok()?)
}

fn yymmdd(year: i32, month: u32, day: u32) -> Option<String> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.format("%y%m%d").to_string())
}

/// Приводит сумму к виду SWIFT: без разделителей тысяч, запятая вместо точки
///
/// "1,234.56" -> "1234,56". Сумма, уже записанная через запятую
/// (не больше двух знаков после неё), возвращается как есть.
pub fn normalize_amount(raw: &str) -> String {
    let s = raw.trim();

    if regex_is_match!(r"^\d+,\d{0,2}$", s) {
        return s.to_string();
    }

    regex!(r"[,\-]").replace_all(s, "").replace('.', ",")
}

pub(crate) fn upper(raw: &str) -> String {
    raw.to_uppercase()
}

pub(crate) fn blank_if_empty(raw: &str) -> String {
    if raw.trim().is_empty() {
        String::new()
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_amount_strips_thousands_and_swaps_decimal_point() {
        assert_eq!(normalize_amount("1,234.56"), "1234,56");
        assert_eq!(normalize_amount("1-234-567.8"), "1234567,8");
        assert_eq!(normalize_amount("1,000"), "1000");
        assert_eq!(normalize_amount("100"), "100");
        assert_eq!(normalize_amount(""), "");
    }

    #[test]
    fn normalize_amount_keeps_swift_form_as_is() {
        // запятая с двумя знаками после неё читается как десятичная, а не как разделитель тысяч
        assert_eq!(normalize_amount("12,50"), "12,50");
        assert_eq!(normalize_amount("12,5"), "12,5");
        assert_eq!(normalize_amount("12,"), "12,");
        // три знака после запятой - это уже тысячи
        assert_eq!(normalize_amount("12,500"), "12500");
    }

    #[test]
    fn normalize_amount_is_a_projection() {
        for raw in ["1,234.56", "0.5", "12,5", "1,000", "7", "1-000.00"] {
            let once = normalize_amount(raw);
            assert_eq!(normalize_amount(&once), once, "not idempotent for {raw}");
        }
    }

    #[test]
    fn normalize_date_handles_all_formats() {
        assert_eq!(normalize_date("15-10-2020", DateFormat::DdMmYyyy).as_deref(), Some("201015"));
        assert_eq!(normalize_date("10/15/2020", DateFormat::MmDdYyyy).as_deref(), Some("201015"));
        assert_eq!(normalize_date("2020-10-15", DateFormat::YyyyMmDd).as_deref(), Some("201015"));
        assert_eq!(normalize_date("15102020", DateFormat::DdMmYyyy).as_deref(), Some("201015"));
        assert_eq!(normalize_date("31.12.1999", DateFormat::DdMmYyyy).as_deref(), Some("991231"));
    }

    #[test]
    fn normalize_date_is_a_projection() {
        let cases = [
            ("15-10-2020", DateFormat::DdMmYyyy),
            ("10/15/2020", DateFormat::MmDdYyyy),
            ("20201015", DateFormat::YyyyMmDd),
        ];
        for (raw, format) in cases {
            let once = normalize_date(raw, format).expect("valid date");
            assert_eq!(renormalize_date(&once), Some(once.clone()), "not idempotent for {raw}");
        }
        assert_eq!(renormalize_date("200230"), None);
    }

    #[test]
    fn normalize_date_rejects_short_year_in_every_format() {
        for format in [DateFormat::DdMmYyyy, DateFormat::MmDdYyyy, DateFormat::YyyyMmDd] {
            assert_eq!(normalize_date("151020", format), None);
        }
    }

    #[test]
    fn normalize_date_rejects_garbage() {
        assert_eq!(normalize_date("", DateFormat::DdMmYyyy), None);
        assert_eq!(normalize_date("15-10-20", DateFormat::DdMmYyyy), None);
        assert_eq!(normalize_date("aa-bb-cccc", DateFormat::DdMmYyyy), None);
        // 31 февраля
        assert_eq!(normalize_date("31-02-2020", DateFormat::DdMmYyyy), None);
        // формат не тот
        assert_eq!(normalize_date("2020-10-15", DateFormat::DdMmYyyy), None);
    }

    #[test]
    fn blank_if_empty_collapses_whitespace() {
        assert_eq!(blank_if_empty("   "), "");
        assert_eq!(blank_if_empty(" x "), " x ");
    }
}
