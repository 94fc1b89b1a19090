//! Localized long date labels.

use crate::config::Language;
use chrono::{Datelike, NaiveDate};

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Long form of `date`: `15 de noviembre de 2024` or `November 15, 2024`.
pub fn long_label(date: NaiveDate, language: Language) -> String {
    match language {
        Language::Es => {
            let month = MONTHS_ES[date.month0() as usize];
            format!("{} de {} de {}", date.day(), month, date.year())
        }
        Language::En => date.format("%B %-d, %Y").to_string(),
    }
}
