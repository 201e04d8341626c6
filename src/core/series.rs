//! Stepwise center-crop series.
//!
//! A [`SeriesPlan`] fixes everything that stays constant during a run: source size,
//! the initial (100% area) frame, the step, and the minimum-allowed limits. The
//! per-step [`SeriesState`] is threaded through the pure [`SeriesPlan::advance`]
//! function, and [`CropSeries`] wraps that as a lazy, finite iterator.
//!
//! Each step checks the current frame before emitting it and the next frame before
//! committing to another iteration, so a frame below the limits is never emitted
//! and the series always ends once the width drops under its minimum.
use serde::Serialize;

use crate::core::geometry::{CropFrame, area_ratio, largest_centered_frame, round_half_even};
use crate::core::params::SeriesParams;
use crate::error::{Error, Result};

/// Minimum sizes, fixed for a whole run.
#[derive(Copy, Clone, PartialEq, Debug, Serialize)]
pub struct SeriesLimits {
    pub min_width: f64,
    pub min_height: f64,
    pub min_size_ratio: f64,
    pub min_pixel_limit: u32,
}

impl SeriesLimits {
    /// `max(initial_side * min_size_ratio, min_pixel_limit)` per side.
    pub fn for_initial(initial: CropFrame, min_size_ratio: f64, min_pixel_limit: u32) -> Self {
        let limit = min_pixel_limit as f64;
        Self {
            min_width: (initial.width as f64 * min_size_ratio).max(limit),
            min_height: (initial.height as f64 * min_size_ratio).max(limit),
            min_size_ratio,
            min_pixel_limit,
        }
    }

    /// Width and height are checked independently against their own minimum.
    pub fn violations(&self, width: i64, height: i64, area_ratio: f64) -> Vec<LimitViolation> {
        let mut reasons = Vec::new();
        if (width as f64) < self.min_width || (height as f64) < self.min_height {
            reasons.push(LimitViolation::SizeBelowMinimum {
                width,
                height,
                min_width: self.min_width,
                min_height: self.min_height,
            });
        }
        if area_ratio < self.min_size_ratio {
            reasons.push(LimitViolation::AreaRatioBelowMinimum {
                area_ratio,
                min_size_ratio: self.min_size_ratio,
            });
        }
        reasons
    }
}

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LimitViolation {
    SizeBelowMinimum {
        width: i64,
        height: i64,
        min_width: f64,
        min_height: f64,
    },
    AreaRatioBelowMinimum {
        area_ratio: f64,
        min_size_ratio: f64,
    },
}

/// Which check ended the series.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopPhase {
    /// The frame about to be emitted was already below the limits.
    Current,
    /// The frame after the last emitted one would be below the limits.
    LookAhead,
}

/// Why and where a series stopped. `index` is the first index that was not generated.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct StopReport {
    pub index: u32,
    pub phase: StopPhase,
    pub width: i64,
    pub height: i64,
    pub area_ratio: f64,
    pub reasons: Vec<LimitViolation>,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SeriesState {
    pub frame: CropFrame,
    pub index: u32,
}

/// One emitted frame, positioned at the center of the source.
#[derive(Copy, Clone, PartialEq, Debug, Serialize)]
pub struct SeriesItem {
    pub index: u32,
    pub frame: CropFrame,
    pub left: u32,
    pub top: u32,
    pub area_ratio: f64,
}

/// Outcome of one call to [`SeriesPlan::advance`].
#[derive(Clone, PartialEq, Debug)]
pub enum Step {
    /// `item` is emitted; `next` is the state to continue from, or the look-ahead stop.
    Emit {
        item: SeriesItem,
        next: std::result::Result<SeriesState, StopReport>,
    },
    /// The current state failed the pre-check; nothing is emitted.
    Halt(StopReport),
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize)]
pub struct SeriesPlan {
    pub source_width: u32,
    pub source_height: u32,
    pub initial: CropFrame,
    pub step_pixels: u32,
    pub aspect_ratio: f64,
    pub limits: SeriesLimits,
}

impl SeriesPlan {
    pub fn new(source_width: u32, source_height: u32, params: &SeriesParams) -> Result<Self> {
        params.validate()?;
        if source_width == 0 || source_height == 0 {
            return Err(Error::invalid_argument(
                "source_size",
                format!("{}x{}", source_width, source_height),
            ));
        }

        let initial = largest_centered_frame(source_width, source_height, params.aspect_ratio);
        let limits =
            SeriesLimits::for_initial(initial, params.min_size_ratio, params.min_pixel_limit);

        Ok(Self {
            source_width,
            source_height,
            initial,
            step_pixels: params.step_pixels,
            aspect_ratio: params.aspect_ratio,
            limits,
        })
    }

    pub fn initial_state(&self) -> SeriesState {
        SeriesState {
            frame: self.initial,
            index: 1,
        }
    }

    /// Run the pre-check on `state`, and if it passes emit it and look one step ahead.
    pub fn advance(&self, state: SeriesState) -> Step {
        let (width, height) = (state.frame.width as i64, state.frame.height as i64);
        let ratio = area_ratio(width, height, self.initial);

        let reasons = self.limits.violations(width, height, ratio);
        if !reasons.is_empty() {
            return Step::Halt(StopReport {
                index: state.index,
                phase: StopPhase::Current,
                width,
                height,
                area_ratio: ratio,
                reasons,
            });
        }

        let (left, top) = state
            .frame
            .centered_in(self.source_width, self.source_height);
        let item = SeriesItem {
            index: state.index,
            frame: state.frame,
            left,
            top,
            area_ratio: ratio,
        };

        let next_width = width - self.step_pixels as i64;
        let next_height = round_half_even(next_width as f64 / self.aspect_ratio) as i64;
        let next_ratio = area_ratio(next_width, next_height, self.initial);

        let reasons = self.limits.violations(next_width, next_height, next_ratio);
        let next = if reasons.is_empty() {
            // Passing the limits implies both sides are at least min_pixel_limit >= 1.
            Ok(SeriesState {
                frame: CropFrame::new(next_width as u32, next_height as u32),
                index: state.index + 1,
            })
        } else {
            Err(StopReport {
                index: state.index + 1,
                phase: StopPhase::LookAhead,
                width: next_width,
                height: next_height,
                area_ratio: next_ratio,
                reasons,
            })
        };

        Step::Emit { item, next }
    }

    /// A fresh series starting from the initial frame. Can be called any number of times.
    pub fn iter(&self) -> CropSeries {
        CropSeries::new(*self)
    }
}

/// Lazy iterator over the frames of a [`SeriesPlan`].
/// After it returns `None`, [`CropSeries::stop_report`] says why.
#[derive(Clone, Debug)]
pub struct CropSeries {
    plan: SeriesPlan,
    pending: Option<SeriesState>,
    stop: Option<StopReport>,
}

impl CropSeries {
    pub fn new(plan: SeriesPlan) -> Self {
        Self {
            pending: Some(plan.initial_state()),
            plan,
            stop: None,
        }
    }

    pub fn plan(&self) -> &SeriesPlan {
        &self.plan
    }

    pub fn stop_report(&self) -> Option<&StopReport> {
        self.stop.as_ref()
    }

    pub fn into_stop_report(self) -> Option<StopReport> {
        self.stop
    }
}

impl Iterator for CropSeries {
    type Item = SeriesItem;

    fn next(&mut self) -> Option<SeriesItem> {
        let state = self.pending.take()?;
        match self.plan.advance(state) {
            Step::Emit { item, next } => {
                match next {
                    Ok(state) => self.pending = Some(state),
                    Err(report) => self.stop = Some(report),
                }
                Some(item)
            }
            Step::Halt(report) => {
                self.stop = Some(report);
                None
            }
        }
    }
}

impl std::iter::FusedIterator for CropSeries {}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(step: u32, aspect: f64, min_ratio: f64, min_pixels: u32) -> SeriesParams {
        SeriesParams {
            step_pixels: step,
            aspect_ratio: aspect,
            min_size_ratio: min_ratio,
            min_pixel_limit: min_pixels,
            ..Default::default()
        }
    }

    fn assert_series_invariants(plan: &SeriesPlan, items: &[SeriesItem]) {
        let mut previous_ratio = f64::INFINITY;
        for item in items {
            let w = item.frame.width as f64;
            let h = item.frame.height as f64;
            assert!(
                (w / plan.aspect_ratio - h).abs() <= 1.0,
                "frame {} is off ratio",
                item.frame
            );
            assert!(item.area_ratio <= previous_ratio);
            assert!(w >= plan.limits.min_width && h >= plan.limits.min_height);
            assert!(item.area_ratio >= plan.limits.min_size_ratio);
            previous_ratio = item.area_ratio;
        }
    }

    #[test]
    fn full_hd_series_at_sixteen_nine() {
        let plan = SeriesPlan::new(1920, 1080, &params(20, 16.0 / 9.0, 0.0025, 100)).unwrap();
        assert_eq!(plan.initial, CropFrame::new(1920, 1080));
        assert_eq!(plan.limits.min_width, 100.0);
        assert_eq!(plan.limits.min_height, 100.0);

        let mut series = plan.iter();
        let items: Vec<_> = series.by_ref().collect();

        assert_eq!(items[0].index, 1);
        assert_eq!(items[0].frame, CropFrame::new(1920, 1080));
        assert_eq!(items[0].area_ratio, 1.0);
        for pair in items.windows(2) {
            assert_eq!(pair[0].frame.width - pair[1].frame.width, 20);
            assert_eq!(pair[1].index, pair[0].index + 1);
        }

        assert_eq!(items.len(), 88);
        let last = items.last().unwrap();
        assert_eq!(last.frame, CropFrame::new(180, 101));
        assert_series_invariants(&plan, &items);

        let stop = series.stop_report().unwrap();
        assert_eq!(stop.index, 89);
        assert_eq!(stop.phase, StopPhase::LookAhead);
        assert_eq!((stop.width, stop.height), (160, 90));
        assert!(matches!(
            stop.reasons.as_slice(),
            [LimitViolation::SizeBelowMinimum { .. }]
        ));
    }

    #[test]
    fn square_series_halts_below_fifty_pixels() {
        let plan = SeriesPlan::new(500, 500, &params(5, 1.0, 0.01, 50)).unwrap();
        assert_eq!(plan.limits.min_width, 50.0);

        let mut series = plan.iter();
        let items: Vec<_> = series.by_ref().collect();

        assert_eq!(items[0].frame, CropFrame::new(500, 500));
        assert_eq!(items.len(), 91);
        let last = items.last().unwrap();
        assert_eq!(last.frame, CropFrame::new(50, 50));
        assert_eq!(last.area_ratio, 0.01);
        assert_eq!((last.left, last.top), (225, 225));
        assert_series_invariants(&plan, &items);

        let stop = series.into_stop_report().unwrap();
        assert_eq!(stop.index, 92);
        assert_eq!(stop.width, 45);
    }

    #[test]
    fn area_ratio_limit_can_end_the_series_first() {
        let plan = SeriesPlan::new(1000, 1000, &params(100, 1.0, 0.5, 1)).unwrap();
        let mut series = plan.iter();
        let widths: Vec<u32> = series.by_ref().map(|item| item.frame.width).collect();
        assert_eq!(widths, vec![1000, 900, 800]);

        let stop = series.stop_report().unwrap();
        assert_eq!(stop.phase, StopPhase::LookAhead);
        assert_eq!(
            stop.reasons,
            vec![LimitViolation::AreaRatioBelowMinimum {
                area_ratio: 0.49,
                min_size_ratio: 0.5,
            }]
        );
    }

    #[test]
    fn initial_frame_below_limits_emits_nothing() {
        let plan = SeriesPlan::new(80, 60, &params(10, 1.0, 0.1, 100)).unwrap();
        let mut series = plan.iter();
        assert_eq!(series.next(), None);
        assert_eq!(series.next(), None);

        let stop = series.stop_report().unwrap();
        assert_eq!(stop.index, 1);
        assert_eq!(stop.phase, StopPhase::Current);
        assert_eq!((stop.width, stop.height), (60, 60));
    }

    #[test]
    fn step_larger_than_frame_emits_only_the_initial_frame() {
        let plan = SeriesPlan::new(400, 300, &params(1000, 4.0 / 3.0, 0.1, 10)).unwrap();
        let mut series = plan.iter();
        let items: Vec<_> = series.by_ref().collect();
        assert_eq!(items.len(), 1);
        let stop = series.stop_report().unwrap();
        assert_eq!((stop.width, stop.height), (-600, -450));
        assert!(matches!(
            stop.reasons.as_slice(),
            [LimitViolation::SizeBelowMinimum { .. }]
        ));
    }

    #[test]
    fn advance_is_pure_and_restartable() {
        let plan = SeriesPlan::new(640, 480, &params(16, 4.0 / 3.0, 0.1, 32)).unwrap();
        let state = plan.initial_state();
        assert_eq!(plan.advance(state), plan.advance(state));

        let first: Vec<_> = plan.iter().collect();
        let second: Vec<_> = plan.iter().collect();
        assert_eq!(first, second);
        assert_series_invariants(&plan, &first);
    }

    #[test]
    fn wide_source_is_centered_horizontally() {
        let plan = SeriesPlan::new(1000, 400, &params(50, 1.0, 0.1, 100)).unwrap();
        let first = plan.iter().next().unwrap();
        assert_eq!(first.frame, CropFrame::new(400, 400));
        assert_eq!((first.left, first.top), (300, 0));
    }

    #[test]
    fn invalid_parameters_fail_before_planning() {
        assert!(SeriesPlan::new(100, 100, &params(0, 1.0, 0.1, 10)).is_err());
        assert!(SeriesPlan::new(100, 100, &params(5, 0.0, 0.1, 10)).is_err());
        assert!(SeriesPlan::new(0, 100, &params(5, 1.0, 0.1, 10)).is_err());
    }
}
