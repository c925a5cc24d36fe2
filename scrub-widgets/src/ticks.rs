//! Time axis ticks and labels

/// Candidate tick intervals in seconds, smallest first
pub const TICK_DIVISIONS: [f64; 11] = [
    0.0625, 0.125, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0,
];

/// A tick mark on a time axis
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Time of the tick in seconds
    pub seconds: f64,
    /// Pixel coordinate along the axis
    pub x: f64,
    pub label: String,
}

/// Format seconds as `m:ss`, or `h:mm:ss` from one hour up
pub fn seconds_text(seconds: f64) -> String {
    let sec = seconds as i64;
    if sec >= 3600 {
        format!("{}:{:02}:{:02}", sec / 3600, (sec % 3600) / 60, sec % 60)
    } else {
        format!("{}:{:02}", sec / 60, sec % 60)
    }
}

/// Smallest tick interval that keeps the tick count under `max_ticks`.
///
/// Spans too long for the table keep multiplying the largest division by ten.
pub fn tick_increment(span_seconds: f64, max_ticks: usize) -> f64 {
    let threshold = span_seconds / max_ticks.max(1) as f64;
    if let Some(&division) = TICK_DIVISIONS.iter().find(|&&d| d > threshold) {
        return division;
    }
    let mut division = TICK_DIVISIONS[TICK_DIVISIONS.len() - 1];
    while division <= threshold {
        division *= 10.0;
    }
    division
}

/// Lay out ticks between `min_seconds` and `max_seconds` over the pixel span
/// `[x_start, x_end]`.
///
/// Ticks within `x_buffer` (a fraction of the span) outside either end are
/// still kept so that labels at the edges are not lost to rounding.
pub fn layout_ticks(
    min_seconds: f64,
    max_seconds: f64,
    x_start: f64,
    x_end: f64,
    max_ticks: usize,
    x_buffer: f64,
) -> Vec<Tick> {
    let span = max_seconds - min_seconds;
    if span <= 0.0 || !span.is_finite() {
        return Vec::new();
    }

    let increment = tick_increment(span, max_ticks);
    let first = (min_seconds / increment) as i64;
    let last = (max_seconds / increment) as i64;
    let pixels = x_end - x_start;
    let margin = pixels * x_buffer;

    (first..=last)
        .filter_map(|i| {
            let seconds = i as f64 * increment;
            let x = x_start + pixels * (seconds - min_seconds) / span;
            if x + margin >= x_start && x - margin <= x_end {
                Some(Tick {
                    seconds,
                    x,
                    label: seconds_text(seconds),
                })
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_text_minutes() {
        assert_eq!(seconds_text(0.0), "0:00");
        assert_eq!(seconds_text(9.9), "0:09");
        assert_eq!(seconds_text(75.0), "1:15");
        assert_eq!(seconds_text(3599.0), "59:59");
    }

    #[test]
    fn test_seconds_text_hours() {
        assert_eq!(seconds_text(3600.0), "1:00:00");
        assert_eq!(seconds_text(3725.0), "1:02:05");
    }

    #[test]
    fn test_tick_increment_picks_smallest_division() {
        // 10 seconds over 15 ticks -> threshold 0.667 -> 1 second
        assert_eq!(tick_increment(10.0, 15), 1.0);
        // exactly on a division moves to the next one
        assert_eq!(tick_increment(15.0, 15), 2.0);
        assert_eq!(tick_increment(0.5, 15), 0.0625);
        assert_eq!(tick_increment(600.0, 15), 50.0);
    }

    #[test]
    fn test_tick_increment_beyond_table() {
        assert_eq!(tick_increment(3000.0, 15), 1000.0);
    }

    #[test]
    fn test_layout_ticks_count_and_positions() {
        let ticks = layout_ticks(0.0, 10.0, 0.0, 100.0, 15, 0.01);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[0].x, 0.0);
        assert_eq!(ticks[10].x, 100.0);
        assert_eq!(ticks[5].label, "0:05");
        assert!(ticks.len() <= 15);
    }

    #[test]
    fn test_layout_ticks_offset_range() {
        // 3.3s..6.7s, increment 0.25; 3.25 lands outside the buffer and is dropped
        let ticks = layout_ticks(3.3, 6.7, 0.0, 340.0, 15, 0.01);
        assert!(ticks.iter().all(|t| t.x >= -3.4 && t.x <= 343.4));
        assert!(ticks.iter().any(|t| t.seconds == 3.5));
        assert!(!ticks.iter().any(|t| t.seconds == 3.25));
    }

    #[test]
    fn test_layout_ticks_empty_span() {
        assert!(layout_ticks(2.0, 2.0, 0.0, 100.0, 15, 0.01).is_empty());
    }
}
