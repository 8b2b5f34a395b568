use std::fmt::Display;

use time::OffsetDateTime;

/// Discord renders `<t:...>` markup in the reader's own timezone.
pub enum TimestampStyle {
    /// Long date/time, e.g. `Tuesday, 20 April 2021 16:20`
    LongDateTime,
    /// Relative time, e.g. `in 3 days`
    RelativeTime,
}

impl Display for TimestampStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}

impl TimestampStyle {
    pub fn suffix(&self) -> &'static str {
        use TimestampStyle::*;

        match self {
            LongDateTime => "F",
            RelativeTime => "R",
        }
    }
}

pub fn timestamp(datetime: OffsetDateTime, style: TimestampStyle) -> String {
    let unix_timestamp = datetime.unix_timestamp();
    format!("<t:{unix_timestamp}:{style}>")
}
