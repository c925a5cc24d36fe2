//! Active region arithmetic
//!
//! The active region is a sub-range of a scrollbar that must keep the current
//! frame strictly inside it. When the frame moves, or the region is dragged,
//! the region is "squeezed" back into a valid spot with its width preserved.

use crate::error::WidgetError;

/// Smallest width an active region may have
pub const MIN_REGION_WIDTH: i64 = 2;

/// Inclusive integer frame range with `min < max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    min: i64,
    max: i64,
}

impl FrameRange {
    pub fn new(min: i64, max: i64) -> Result<Self, WidgetError> {
        if min >= max {
            return Err(WidgetError::InvalidRange {
                min: min as f64,
                max: max as f64,
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn width(&self) -> i64 {
        self.max - self.min
    }

    /// Clamp a position into the selectable frames `min + 1 ..= max`
    pub fn clamp_position(&self, frame: i64) -> i64 {
        frame.clamp(self.min + 1, self.max)
    }
}

/// Active region `[start, end]` in frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: i64,
    pub end: i64,
}

impl Region {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn width(&self) -> i64 {
        self.end - self.start
    }

    /// True if `frame` lies strictly between the edges
    pub fn surrounds(&self, frame: i64) -> bool {
        self.start < frame && frame < self.end
    }

    /// True if the region is a valid home for `position` inside `range`
    pub fn is_valid_for(&self, range: FrameRange, position: i64) -> bool {
        (range.min()..position).contains(&self.start)
            && (position + 1..=range.max()).contains(&self.end)
    }

    /// Shift back inside `range` if an edge overhangs it
    pub fn fit_within(self, range: FrameRange) -> Self {
        if self.start < range.min() {
            self.shifted(range.min() - self.start)
        } else if self.end > range.max() {
            self.shifted(range.max() - self.end)
        } else {
            self
        }
    }

    fn shifted(self, offset: i64) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

/// Move `candidate` so that it sits inside `range` around `position`.
///
/// The width is clamped to `[MIN_REGION_WIDTH, range width]` and then kept.
/// At most one corrective shift is applied, checked in this order: left edge
/// below `min`, left edge not below `position`, right edge not above
/// `position`, right edge above `max`.
pub fn squeeze(range: FrameRange, position: i64, candidate: Region) -> Region {
    let width = MIN_REGION_WIDTH.max(range.width().min(candidate.width()));
    let region = Region::new(candidate.start, candidate.start + width);

    if region.start < range.min() {
        region.shifted(range.min() - region.start)
    } else if region.start > position - 1 {
        region.shifted(-(region.start - (position - 1)))
    } else if region.end < position + 1 {
        region.shifted(position + 1 - region.end)
    } else if region.end > range.max() {
        region.shifted(-(region.end - range.max()))
    } else {
        region
    }
}

/// Keep `candidate` if it is already valid, otherwise squeeze it and pull
/// the result back inside the range.
///
/// A position sitting on `max` can never be strictly inside a region that
/// fits the range; such a region ends up flush with `max`.
pub fn settle(range: FrameRange, position: i64, candidate: Region) -> Region {
    if candidate.is_valid_for(range, position) {
        return candidate;
    }
    squeeze(range, position, candidate).fit_within(range)
}

/// Region centred on `position` covering `fraction` of `range`, pushed back
/// inside the range if it overhangs either end.
pub fn centered_region(range: FrameRange, position: i64, fraction: f64) -> Region {
    let (min, max) = (range.min() as f64, range.max() as f64);
    let pad = (max - min) * fraction / 2.0;
    let (mut x0, mut x1) = (position as f64 - pad, position as f64 + pad);
    if x0 < min {
        x1 += min - x0;
        x0 = min;
    }
    if x1 > max {
        x0 -= x1 - max;
        x1 = max;
    }
    // truncation toward zero, matching frame conversion elsewhere
    Region::new(x0 as i64, x1 as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: i64, max: i64) -> FrameRange {
        FrameRange::new(min, max).unwrap()
    }

    #[test]
    fn test_frame_range_rejects_inverted() {
        assert!(FrameRange::new(10, 10).is_err());
        assert!(FrameRange::new(10, 3).is_err());
        assert!(FrameRange::new(3, 10).is_ok());
    }

    #[test]
    fn test_squeeze_left_overhang_only_first_branch() {
        // [-10, 5] around 50: only the left-edge correction fires
        let out = squeeze(range(0, 100), 50, Region::new(-10, 5));
        assert_eq!(out, Region::new(0, 15));
    }

    #[test]
    fn test_squeeze_start_past_position() {
        let out = squeeze(range(0, 100), 50, Region::new(60, 80));
        assert_eq!(out, Region::new(49, 69));
    }

    #[test]
    fn test_squeeze_end_before_position() {
        let out = squeeze(range(0, 100), 50, Region::new(20, 40));
        assert_eq!(out, Region::new(31, 51));
    }

    #[test]
    fn test_squeeze_right_overhang() {
        let out = squeeze(range(0, 100), 95, Region::new(90, 110));
        assert_eq!(out, Region::new(80, 100));
    }

    #[test]
    fn test_squeeze_is_idempotent_on_valid_region() {
        let r = range(0, 100);
        for p in 1..100 {
            let valid = Region::new((p - 5).max(0), (p + 5).min(100));
            assert!(valid.is_valid_for(r, p));
            assert_eq!(squeeze(r, p, valid), valid);
            assert_eq!(squeeze(r, p, squeeze(r, p, valid)), valid);
        }
    }

    #[test]
    fn test_squeeze_preserves_clamped_width() {
        let r = range(0, 50);
        for (start, end) in [(-30, -20), (10, 11), (0, 500), (40, 90), (5, 5)] {
            let out = squeeze(r, 25, Region::new(start, end));
            let expected = 2.max((end - start).min(50));
            assert_eq!(out.width(), expected, "{}..{}", start, end);
        }
    }

    #[test]
    fn test_squeeze_keeps_position_inside_after_single_shift() {
        let r = range(0, 100);
        for p in 1..100 {
            // regions that are only displaced relative to the position
            for candidate in [Region::new(p, p + 10), Region::new(p - 10, p)] {
                let out = squeeze(r, p, candidate);
                if out.start >= 0 && out.end <= 100 {
                    assert!(out.surrounds(p), "p={} out={:?}", p, out);
                }
            }
        }
    }

    #[test]
    fn test_squeeze_minimum_width() {
        let out = squeeze(range(0, 100), 50, Region::new(49, 49));
        assert_eq!(out, Region::new(49, 51));
        assert!(out.surrounds(50));
    }

    #[test]
    fn test_settle_keeps_valid_region() {
        assert_eq!(settle(range(0, 100), 50, Region::new(40, 60)), Region::new(40, 60));
    }

    #[test]
    fn test_settle_at_max_stays_in_range() {
        // squeeze alone would push the right edge to 101
        assert_eq!(squeeze(range(0, 100), 100, Region::new(40, 60)), Region::new(81, 101));
        assert_eq!(settle(range(0, 100), 100, Region::new(40, 60)), Region::new(80, 100));
        assert_eq!(settle(range(0, 100), 100, Region::new(80, 100)), Region::new(80, 100));
    }

    #[test]
    fn test_centered_region() {
        assert_eq!(centered_region(range(0, 100), 50, 0.2), Region::new(40, 60));
        assert_eq!(centered_region(range(0, 100), 3, 0.2), Region::new(0, 20));
        assert_eq!(centered_region(range(0, 100), 98, 0.2), Region::new(80, 100));
    }

    #[test]
    fn test_clamp_position_excludes_floor() {
        let r = range(0, 10);
        assert_eq!(r.clamp_position(0), 1);
        assert_eq!(r.clamp_position(-5), 1);
        assert_eq!(r.clamp_position(11), 10);
        assert_eq!(r.clamp_position(4), 4);
    }
}
