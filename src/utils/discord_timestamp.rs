use std::fmt::Display;

use crate::models::types::UtcDateTime;

pub enum TimestampStyle {
    /// Relative time, e.g. `2 months ago`
    RelativeTime,
}

impl Display for TimestampStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

impl TimestampStyle {
    pub fn suffix(&self) -> &'static str {
        use TimestampStyle::*;

        match self {
            RelativeTime => "R",
        }
    }
}

/// Discord renders `<t:UNIX:STYLE>` in each reader's own locale and time zone.
pub fn timestamp(datetime: UtcDateTime, style: TimestampStyle) -> String {
    let unix_timestamp = datetime.unix_timestamp();
    format!("<t:{unix_timestamp}:{style}>")
}
