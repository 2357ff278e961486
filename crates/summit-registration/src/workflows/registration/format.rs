use chrono::{Datelike, NaiveDate};

/// Whole-dollar USD rendering used in attendee options and price summaries.
pub fn format_currency(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${grouped}")
}

/// "July 23-26, 2026" within a month, full dates on both ends otherwise.
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() == end.year() && start.month() == end.month() {
        return format!(
            "{} {}-{}, {}",
            start.format("%B"),
            start.day(),
            end.day(),
            start.year()
        );
    }

    format!(
        "{} - {}",
        start.format("%B %-d, %Y"),
        end.format("%B %-d, %Y")
    )
}

/// Summits run for two consecutive days starting on `start`.
pub fn format_summit_date_range(start: NaiveDate) -> String {
    let end = start.succ_opt().unwrap_or(start);
    format_date_range(start, end)
}
