use chrono::{DateTime, Local, NaiveDate};

use crate::{JournalError, Result};

/// Formats a file timestamp for journal listings, e.g. `2024/05/01  09:15:00`.
pub fn pretty_timestamp(time: &DateTime<Local>) -> String {
    time.format("%Y/%m/%d  %H:%M:%S").to_string()
}

/// Capitalizes the first letter of every word, for displaying journal names.
pub fn title_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut at_word_start = true;

    for c in name.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(c);
            at_word_start = true;
        }
    }

    result
}

// Helper method for parsing ISO dates given on the command line
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        JournalError::ApplicationError {
            message: format!("Invalid date: {}. Expected YYYY-MM-DD", value),
        }
    })
}
