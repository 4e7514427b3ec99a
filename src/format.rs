//! Rendering helpers shared by list views and the filter engine.
//!
//! Filters match against these rendered strings, so every consumer must go
//! through the same formatting path. Dates are date-only end to end; no
//! datetime ever reaches a formatter, so no timezone can shift a day.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::Schedule;

/// Separator preferences for rendered amounts. Defaults to the pt-BR
/// convention the original views used.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    pub currency_symbol: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "R$".into(),
            decimal_separator: ',',
            grouping_separator: '.',
        }
    }
}

/// Renders an amount as e.g. `R$ 1.234,56`. Values carrying more than two
/// decimal places keep their full scale; nothing is rounded away.
pub fn format_amount(value: Decimal, locale: &LocaleConfig) -> String {
    let body = if value.scale() < 2 {
        format!("{:.2}", value)
    } else {
        value.to_string()
    };
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part.to_string(), Some(frac_part.to_string())),
        None => (body, None),
    };
    let mut rendered = group_digits(&int_part, locale.grouping_separator);
    if let Some(frac) = frac_part {
        rendered.push(locale.decimal_separator);
        rendered.push_str(&frac);
    }
    format!("{} {}", locale.currency_symbol, rendered)
}

/// Renders a calendar date as `dd/mm/yyyy`, the one date representation
/// used everywhere.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Localized label for the obligation's plan shape.
pub fn schedule_label(schedule: &Schedule) -> &'static str {
    match schedule {
        Schedule::Single => "Única",
        Schedule::Installment { .. } => "Parcelado",
        Schedule::Recurring { .. } => "Recorrente",
    }
}

fn group_digits(int_part: &str, separator: char) -> String {
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    format!("{}{}", sign, grouped)
}
