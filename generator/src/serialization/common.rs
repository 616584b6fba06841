/// Дополняет BIC справа символами 'X' до 12 знаков (как в заголовках {1: и {2:)
pub(crate) fn pad_bic(bic: &str) -> String {
    format!("{bic:X<12}")
}

/// Дополняет строку слева нулями до `width`; длинные строки не обрезаются
pub(crate) fn zero_pad(value: &str, width: usize) -> String {
    format!("{value:0>width$}")
}
