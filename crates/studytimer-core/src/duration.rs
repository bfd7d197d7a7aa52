//! Duration parsing and formatting helpers.
//!
//! All durations are whole seconds.

/// Render seconds as zero-padded `MM:SS`.
///
/// Minutes are not folded into hours, so a 90 minute focus block renders as
/// `90:00`.
pub fn format_mmss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Render seconds as a short human label such as `25 min` or `1h 30m`.
pub fn format_minutes(seconds: u64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;

    if seconds < 60 {
        format!("{} sec", seconds)
    } else if hours == 0 {
        format!("{} min", minutes)
    } else if minutes % 60 == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}m", hours, minutes % 60)
    }
}

/// Parse a duration such as `25`, `25m`, `1h30m` or `90s` into seconds.
///
/// A bare number, or a trailing number without a unit, is read as minutes.
/// Returns `None` for malformed input or a zero total.
pub fn parse_duration(input: &str) -> Option<u64> {
    let input = input.trim().to_ascii_lowercase();
    if input.is_empty() {
        return None;
    }

    let mut total: u64 = 0;
    let mut digits = String::new();

    for ch in input.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }

        if digits.is_empty() {
            return None;
        }
        let value: u64 = digits.parse().ok()?;
        digits.clear();

        let unit = match ch {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return None,
        };
        total = total.checked_add(value.checked_mul(unit)?)?;
    }

    if !digits.is_empty() {
        let value: u64 = digits.parse().ok()?;
        total = total.checked_add(value.checked_mul(60)?)?;
    }

    (total > 0).then_some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(1500), "25:00");
        assert_eq!(format_mmss(90), "01:30");
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(5400), "90:00");
        assert_eq!(format_mmss(59), "00:59");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(1500), "25 min");
        assert_eq!(format_minutes(2700), "45 min");
        assert_eq!(format_minutes(5400), "1h 30m");
        assert_eq!(format_minutes(7200), "2h");
        assert_eq!(format_minutes(30), "30 sec");
    }

    #[test]
    fn test_parse_duration_minutes() {
        assert_eq!(parse_duration("25"), Some(1500));
        assert_eq!(parse_duration("25m"), Some(1500));
        assert_eq!(parse_duration(" 45M "), Some(2700));
    }

    #[test]
    fn test_parse_duration_mixed_units() {
        assert_eq!(parse_duration("1h30m"), Some(5400));
        assert_eq!(parse_duration("90s"), Some(90));
        assert_eq!(parse_duration("1m30s"), Some(90));
        assert_eq!(parse_duration("1h5"), Some(3900));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration("10x"), None);
        assert_eq!(parse_duration("0"), None);
        assert_eq!(parse_duration("m"), None);
    }
}
