//! Генерация SWIFT MT940/MT950 из табличных выписок (одна строка - одна операция).
//!
//! Поток строк режется на сообщения и страницы, для каждого перехода пишутся
//! нужные блоки и балансы. Основной вход - [`assemble`] или [`Assembler`].

pub mod assembler;
pub mod boundary;
pub mod config;
pub mod convert;
pub mod csv_input;
pub mod error;
pub mod model;
pub mod serialization;

pub use crate::assembler::{Assembler, Summary, assemble};
pub use crate::config::{Config, Mir};
pub use crate::csv_input::{open_input, read_rows};
pub use crate::error::Mt9Error;
pub use crate::model::{CarryState, DateFormat, Direction, MessageType, RawRow, Row};
