//! Query-parameter date parsing and local day bounds.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::AppError;

/// Treat an absent or blank query value as missing.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a `YYYY-MM-DD` parameter.
pub fn parse_date(name: &'static str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| AppError::InvalidParameter {
        name,
        value: value.to_string(),
    })
}

/// Which end of a day a date-only bound stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayEdge {
    /// 00:00:00.000
    Start,
    /// 23:59:59.999
    End,
}

/// Instant at the given edge of `date` in the site's local offset.
pub fn day_edge(date: NaiveDate, edge: DayEdge, offset: FixedOffset) -> DateTime<Utc> {
    let time = match edge {
        DayEdge::Start => NaiveTime::MIN,
        DayEdge::End => NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN),
    };

    // A fixed offset maps every local time to exactly one instant
    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| date.and_time(time).and_utc())
}

/// Parse a range bound: either a date (expanded to `edge` of that day) or an
/// RFC 3339 instant used as-is.
pub fn parse_bound(
    name: &'static str,
    value: &str,
    edge: DayEdge,
    offset: FixedOffset,
) -> Result<DateTime<Utc>, AppError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value.trim()) {
        return Ok(instant.with_timezone(&Utc));
    }
    parse_date(name, value).map(|date| day_edge(date, edge, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_present() {
        assert_eq!(present(Some(" 2025-03-15 ")), Some("2025-03-15"));
        assert_eq!(present(Some("  ")), None);
        assert_eq!(present(None), None);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("date", "2024-01-01").unwrap(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(matches!(
            parse_date("date", "01/01/2024"),
            Err(AppError::InvalidParameter { name: "date", .. })
        ));
        assert!(parse_date("date", "2024-02-30").is_err());
    }

    #[test]
    fn test_day_edges_utc() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(day_edge(day, DayEdge::Start, utc()).to_rfc3339(), "2025-03-15T00:00:00+00:00");
        assert_eq!(
            day_edge(day, DayEdge::End, utc()).to_rfc3339(),
            "2025-03-15T23:59:59.999+00:00"
        );
    }

    #[test]
    fn test_day_edges_with_offset() {
        // UTC+8: local midnight is 16:00 the previous day in UTC
        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        let day = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(day_edge(day, DayEdge::Start, offset).to_rfc3339(), "2025-03-14T16:00:00+00:00");
    }

    #[test]
    fn test_parse_bound_accepts_instants() {
        let bound = parse_bound("start", "2025-03-15T10:30:00+02:00", DayEdge::Start, utc()).unwrap();
        assert_eq!(bound.to_rfc3339(), "2025-03-15T08:30:00+00:00");

        let bound = parse_bound("end", "2025-03-15", DayEdge::End, utc()).unwrap();
        assert_eq!(bound.to_rfc3339(), "2025-03-15T23:59:59.999+00:00");

        assert!(parse_bound("start", "tomorrow", DayEdge::Start, utc()).is_err());
    }
}
