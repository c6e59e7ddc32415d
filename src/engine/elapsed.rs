use chrono::{DateTime, Utc};

/// Format the span between two instants as `"2m 30s"` or `"45s"`.
/// Empty when either end is missing.
pub fn format_elapsed(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> String {
    let (Some(start), Some(end)) = (start, end) else {
        return String::new();
    };
    format_millis((end - start).num_milliseconds())
}

pub fn format_millis(ms: i64) -> String {
    let ms = ms.max(0);
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_seconds_only() {
        let end = t0() + Duration::milliseconds(45_000);
        assert_eq!(format_elapsed(Some(t0()), Some(end)), "45s");
    }

    #[test]
    fn test_minutes_and_seconds() {
        let end = t0() + Duration::milliseconds(150_000);
        assert_eq!(format_elapsed(Some(t0()), Some(end)), "2m 30s");
    }

    #[test]
    fn test_missing_bound_is_empty() {
        assert_eq!(format_elapsed(None, Some(t0())), "");
        assert_eq!(format_elapsed(Some(t0()), None), "");
        assert_eq!(format_elapsed(None, None), "");
    }

    #[test]
    fn test_floors_partial_seconds() {
        assert_eq!(format_millis(59_999), "59s");
        assert_eq!(format_millis(60_000), "1m 0s");
        assert_eq!(format_millis(999), "0s");
    }

    #[test]
    fn test_negative_span_clamps_to_zero() {
        let before = t0() - Duration::seconds(5);
        assert_eq!(format_elapsed(Some(t0()), Some(before)), "0s");
    }
}
