/// Window parsing and calendar-day segmentation.
///
/// The generator covers an inclusive `[start, end]` window with consecutive
/// 1-day segments, then expands each segment into a closed-interval sequence
/// of sampled instants at the configured frequency. All arithmetic is naive
/// UTC — inputs are assumed already UTC and no conversion is applied.

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};

use crate::model::{DaySegment, ObsPackError, ObservationWindow, WINDOW_TIME_FORMAT};

const SECONDS_PER_DAY: i64 = 86_400;

// ---------------------------------------------------------------------------
// Window parsing
// ---------------------------------------------------------------------------

/// Parses a window boundary in the fixed `YYYYMMDD HH:MM:SS` format.
pub fn parse_window_time(text: &str) -> Result<NaiveDateTime, ObsPackError> {
    NaiveDateTime::parse_from_str(text, WINDOW_TIME_FORMAT).map_err(|e| {
        ObsPackError::ParseError(format!(
            "'{}' does not match 'YYYYMMDD HH:MM:SS': {}",
            text, e
        ))
    })
}

/// Parses and validates a full observation window.
///
/// Returns a `ParseError` if either boundary is malformed or if `end`
/// precedes `start`.
pub fn parse_window(start: &str, end: &str) -> Result<ObservationWindow, ObsPackError> {
    let start = parse_window_time(start)?;
    let end = parse_window_time(end)?;
    if end < start {
        return Err(ObsPackError::ParseError(format!(
            "window end {} precedes start {}",
            end, start
        )));
    }
    Ok(ObservationWindow { start, end })
}

// ---------------------------------------------------------------------------
// Day segmentation
// ---------------------------------------------------------------------------

/// Partitions an inclusive window into consecutive calendar-day segments.
///
/// Segment starts are 1-day-aligned relative to the window start. Each
/// segment ends at `segment_start + 1 day - 1 second`, except the final
/// segment, which is clamped to the window end. A window covering a single
/// instant yields exactly one segment.
pub fn partition_into_days(window: &ObservationWindow) -> Vec<DaySegment> {
    let total_seconds = (window.end - window.start).num_seconds();
    // Inclusive coverage: ceil((total + 1) / seconds_per_day).
    let segment_count = (total_seconds + SECONDS_PER_DAY) / SECONDS_PER_DAY;

    let mut segments = Vec::with_capacity(segment_count as usize);
    for i in 0..segment_count {
        let segment_start = window.start + Duration::days(i);
        let full_day_end = segment_start + Duration::days(1) - Duration::seconds(1);
        let segment_end = if full_day_end > window.end {
            window.end
        } else {
            full_day_end
        };
        segments.push(DaySegment {
            segment_start,
            segment_end,
        });
    }
    segments
}

// ---------------------------------------------------------------------------
// Record expansion
// ---------------------------------------------------------------------------

/// Generates the closed-interval sequence of sampled instants within a
/// segment, stepping by `frequency_seconds`.
///
/// Both endpoints are candidates: the count is
/// `floor((segment_end - segment_start) / frequency) + 1`.
/// `frequency_seconds` must be positive; the generator rejects zero before
/// this is ever called.
pub fn sample_instants(segment: &DaySegment, frequency_seconds: u32) -> Vec<NaiveDateTime> {
    debug_assert!(frequency_seconds > 0);
    let span = (segment.segment_end - segment.segment_start).num_seconds();
    let count = span / i64::from(frequency_seconds) + 1;

    let mut instants = Vec::with_capacity(count as usize);
    let step = Duration::seconds(i64::from(frequency_seconds));
    let mut t = segment.segment_start;
    while t <= segment.segment_end {
        instants.push(t);
        t += step;
    }
    instants
}

/// Decomposes an instant into the six integer calendar components in the
/// fixed column order: year, month, day, hour, minute, second.
pub fn time_components(t: NaiveDateTime) -> [i32; 6] {
    [
        t.year(),
        t.month() as i32,
        t.day() as i32,
        t.hour() as i32,
        t.minute() as i32,
        t.second() as i32,
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window(start: &str, end: &str) -> ObservationWindow {
        parse_window(start, end).expect("test window should parse")
    }

    #[test]
    fn test_parse_window_time_accepts_fixed_format() {
        let t = parse_window_time("20130601 12:34:56").unwrap();
        assert_eq!(
            t,
            NaiveDate::from_ymd_opt(2013, 6, 1)
                .unwrap()
                .and_hms_opt(12, 34, 56)
                .unwrap()
        );
    }

    #[test]
    fn test_parse_window_time_rejects_other_formats() {
        for bad in ["2013-06-01 00:00:00", "20130601", "20130601T00:00:00", ""] {
            let err = parse_window_time(bad).unwrap_err();
            assert!(
                matches!(err, ObsPackError::ParseError(_)),
                "'{}' should fail with a parse error",
                bad
            );
        }
    }

    #[test]
    fn test_parse_window_rejects_end_before_start() {
        let err = parse_window("20130602 00:00:00", "20130601 00:00:00").unwrap_err();
        assert!(matches!(err, ObsPackError::ParseError(_)));
    }

    #[test]
    fn test_single_instant_window_yields_one_segment() {
        let w = window("20130601 06:00:00", "20130601 06:00:00");
        let segments = partition_into_days(&w);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].segment_start, w.start);
        assert_eq!(segments[0].segment_end, w.end);
    }

    #[test]
    fn test_whole_day_windows_need_no_clamping() {
        // [start, start + k days - 1 s] splits into exactly k full segments.
        let w = window("20130601 00:00:00", "20130603 23:59:59");
        let segments = partition_into_days(&w);
        assert_eq!(segments.len(), 3);
        for seg in &segments {
            assert_eq!(
                (seg.segment_end - seg.segment_start).num_seconds(),
                86_399,
                "each segment should span exactly 1 day minus 1 second"
            );
        }
    }

    #[test]
    fn test_day_boundary_end_gets_its_own_segment() {
        // A window ending exactly on the next midnight still covers that
        // final instant, so a second (clamped, single-instant) segment exists.
        let w = window("20130601 00:00:00", "20130602 00:00:00");
        let segments = partition_into_days(&w);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].segment_start, w.end);
        assert_eq!(segments[1].segment_end, w.end);
    }

    #[test]
    fn test_segments_tile_the_window_contiguously() {
        let w = window("20130601 07:30:00", "20130605 12:00:00");
        let segments = partition_into_days(&w);
        assert_eq!(segments[0].segment_start, w.start);
        for pair in segments.windows(2) {
            assert_eq!(
                pair[0].segment_end + Duration::seconds(1),
                pair[1].segment_start,
                "adjacent segments must be contiguous and non-overlapping"
            );
        }
        assert_eq!(segments.last().unwrap().segment_end, w.end);
    }

    #[test]
    fn test_final_segment_is_clamped_to_window_end() {
        let w = window("20130601 00:00:00", "20130601 12:00:00");
        let segments = partition_into_days(&w);
        assert_eq!(segments.len(), 1);
        assert_eq!(
            segments[0].segment_end, w.end,
            "half-day remainder should be clamped, not extended to midnight"
        );
    }

    #[test]
    fn test_segmentation_crosses_month_boundary() {
        let w = window("20130630 00:00:00", "20130701 23:59:59");
        let segments = partition_into_days(&w);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].segment_start.month(), 7);
        assert_eq!(segments[1].segment_start.day(), 1);
    }

    #[test]
    fn test_sample_count_matches_span_over_frequency() {
        let w = window("20130601 00:00:00", "20130601 23:59:59");
        let seg = partition_into_days(&w)[0];
        // floor(86399 / 3600) + 1 = 24 hourly records, 00:00 through 23:00.
        let instants = sample_instants(&seg, 3600);
        assert_eq!(instants.len(), 24);
        assert_eq!(instants[0], seg.segment_start);
        assert_eq!(instants[23].hour(), 23);
        assert_eq!(instants[23].minute(), 0);
    }

    #[test]
    fn test_sample_instants_include_segment_end_when_aligned() {
        let w = window("20130601 00:00:00", "20130601 12:00:00");
        let seg = partition_into_days(&w)[0];
        let instants = sample_instants(&seg, 3600);
        assert_eq!(instants.len(), 13, "12*3600/3600 + 1 records expected");
        assert_eq!(*instants.last().unwrap(), seg.segment_end);
    }

    #[test]
    fn test_single_instant_segment_yields_one_sample() {
        let seg = DaySegment {
            segment_start: parse_window_time("20130602 00:00:00").unwrap(),
            segment_end: parse_window_time("20130602 00:00:00").unwrap(),
        };
        assert_eq!(sample_instants(&seg, 3600).len(), 1);
    }

    #[test]
    fn test_time_components_round_trip() {
        let t = parse_window_time("20131231 23:58:59").unwrap();
        let [year, month, day, hour, minute, second] = time_components(t);
        let rebuilt = NaiveDate::from_ymd_opt(year, month as u32, day as u32)
            .unwrap()
            .and_hms_opt(hour as u32, minute as u32, second as u32)
            .unwrap();
        assert_eq!(rebuilt, t, "components must reconstruct the instant");
    }
}
