use time::macros::format_description;
use time::{format_description, OffsetDateTime, UtcOffset};

use super::{timestamp, TimestampStyle};

const DATETIME_FORMAT: &[format_description::FormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

const ELLIPSIS: char = '…';

pub fn format_utc(date_time: OffsetDateTime) -> String {
    date_time
        .to_offset(UtcOffset::UTC)
        .format(DATETIME_FORMAT)
        .expect("Hard-coded format should be correct")
}

pub fn format_local(date_time: OffsetDateTime) -> String {
    timestamp(date_time, TimestampStyle::LongDateTime)
}

/// Cuts `text` down to at most `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push(ELLIPSIS);
    truncated
}

/// Splits `text` into messages of at most `max_chars` characters, breaking only between lines.
///
/// A single line longer than the limit is truncated.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let mut messages = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.lines() {
        let line = truncate(line, max_chars);
        let line_len = line.chars().count();

        let separator_len = usize::from(!current.is_empty());
        if current_len + separator_len + line_len > max_chars {
            messages.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(&line);
        current_len += line_len;
    }

    if !current.trim().is_empty() {
        messages.push(current);
    }

    messages.retain(|message| !message.trim().is_empty());
    messages
}
