use std::fmt;

use chrono::Duration;

/// Renders a duration through a strftime-like pattern so literal text can be
/// interleaved with the numeric fields. Recognized placeholders are `%D`
/// (whole days), `%H` (hours of the remainder, zero-padded), `%M` (minutes)
/// and `%S` (seconds); `%%` is a literal percent sign. Anything else after a
/// `%` is an error rather than being passed through silently.
pub fn format_duration(duration: Duration, pattern: &str) -> Result<String, DurationFormatError> {
    let total = duration.num_seconds();
    let days = total / 86_400;
    let mut rem = total % 86_400;
    let hours = rem / 3_600;
    rem %= 3_600;
    let minutes = rem / 60;
    let seconds = rem % 60;

    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('D') => out.push_str(&days.to_string()),
            Some('H') => out.push_str(&format!("{:02}", hours)),
            Some('M') => out.push_str(&minutes.to_string()),
            Some('S') => out.push_str(&seconds.to_string()),
            Some('%') => out.push('%'),
            Some(other) => return Err(DurationFormatError::UnknownPlaceholder(other)),
            None => return Err(DurationFormatError::TrailingDelimiter),
        }
    }

    Ok(out)
}

#[derive(Debug, PartialEq, Eq)]
pub enum DurationFormatError {
    UnknownPlaceholder(char),
    TrailingDelimiter,
}

impl std::error::Error for DurationFormatError {}

impl fmt::Display for DurationFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DurationFormatError::UnknownPlaceholder(c) => {
                write!(f, "unrecognized duration placeholder `%{}`", c)
            }
            DurationFormatError::TrailingDelimiter => {
                write!(f, "duration pattern ends with a bare `%`")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_and_seconds() {
        let avg = Duration::seconds(125);
        assert_eq!(
            format_duration(avg, "%M min %S sec").unwrap(),
            "2 min 5 sec"
        );
    }

    #[test]
    fn days_and_padded_hours() {
        let d = Duration::seconds(90_000);
        assert_eq!(format_duration(d, "%D day %H hr").unwrap(), "1 day 01 hr");
    }

    #[test]
    fn zero_duration() {
        assert_eq!(
            format_duration(Duration::zero(), "%M min %S sec").unwrap(),
            "0 min 0 sec"
        );
    }

    #[test]
    fn escaped_percent() {
        assert_eq!(format_duration(Duration::seconds(30), "%S%%").unwrap(), "30%");
    }

    #[test]
    fn unknown_placeholder_is_an_error() {
        assert_eq!(
            format_duration(Duration::zero(), "%M min %X sec"),
            Err(DurationFormatError::UnknownPlaceholder('X'))
        );
    }

    #[test]
    fn dangling_delimiter_is_an_error() {
        assert_eq!(
            format_duration(Duration::zero(), "%M min %"),
            Err(DurationFormatError::TrailingDelimiter)
        );
    }
}
