//! Prediction instants and their elapsed hours since the start epoch.
//!
//! The engine treats a [`Timeline`] as read-only input. It can come from
//! anywhere; the constructors here just cover the common shapes.

use crate::error::{Result, TideError};
use chrono::{Duration, NaiveDateTime};

/// Milliseconds per hour, for elapsed-hour conversion.
const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Ordered instants paired with hours elapsed since a fixed epoch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    items: Vec<NaiveDateTime>,
    hours: Vec<f64>,
}

impl Timeline {
    /// Take caller-supplied `(instant, elapsed hours)` pairs as-is.
    pub fn new(points: impl IntoIterator<Item = (NaiveDateTime, f64)>) -> Self {
        let (items, hours) = points.into_iter().unzip();
        Self { items, hours }
    }

    /// Elapsed hours measured from `epoch` for each instant.
    pub fn from_instants(
        epoch: NaiveDateTime,
        instants: impl IntoIterator<Item = NaiveDateTime>,
    ) -> Self {
        Self::new(
            instants
                .into_iter()
                .map(|t| (t, elapsed_hours(epoch, t))),
        )
    }

    /// Evenly spaced instants from `start` through `end` inclusive, hours from `start`.
    ///
    /// Stops early if the next instant would pass the last representable
    /// timestamp.
    ///
    /// # Errors
    /// [`TideError::InvalidStep`] if `step` is zero or negative.
    ///
    /// # Example
    /// ```
    /// use chrono::{Duration, NaiveDate};
    /// use tide_predictor::timeline::Timeline;
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let timeline = Timeline::span(start, start + Duration::hours(24), Duration::minutes(10)).unwrap();
    /// assert_eq!(timeline.len(), 145);
    /// ```
    pub fn span(start: NaiveDateTime, end: NaiveDateTime, step: Duration) -> Result<Self> {
        if step <= Duration::zero() {
            return Err(TideError::InvalidStep);
        }
        let mut instants = Vec::new();
        let mut t = start;
        while t <= end {
            instants.push(t);
            match t.checked_add_signed(step) {
                Some(next) => t = next,
                None => break,
            }
        }
        Ok(Self::from_instants(start, instants))
    }

    /// Number of instants.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no instants.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The instants, in order.
    pub fn items(&self) -> &[NaiveDateTime] {
        &self.items
    }

    /// Elapsed hours, one per instant.
    pub fn hours(&self) -> &[f64] {
        &self.hours
    }

    /// `(instant, elapsed hours)` in order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.items.iter().copied().zip(self.hours.iter().copied())
    }
}

fn elapsed_hours(epoch: NaiveDateTime, t: NaiveDateTime) -> f64 {
    (t - epoch).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 16)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn span_is_inclusive_with_hours_from_start() {
        let timeline =
            Timeline::span(start(), start() + Duration::hours(24), Duration::minutes(10)).unwrap();

        assert_eq!(timeline.len(), 145);
        assert_eq!(timeline.hours()[0], 0.0);
        assert_eq!(timeline.hours()[6], 1.0);
        assert_eq!(*timeline.hours().last().unwrap(), 24.0);
        for window in timeline.items().windows(2) {
            assert_eq!(window[1] - window[0], Duration::minutes(10));
        }
    }

    #[test]
    fn span_rejects_non_positive_step() {
        let end = start() + Duration::hours(1);
        assert!(matches!(
            Timeline::span(start(), end, Duration::zero()),
            Err(TideError::InvalidStep)
        ));
        assert!(matches!(
            Timeline::span(start(), end, Duration::minutes(-5)),
            Err(TideError::InvalidStep)
        ));
    }

    #[test]
    fn span_stops_at_last_representable_instant() {
        let end = NaiveDateTime::MAX;
        let timeline = Timeline::span(end - Duration::days(1), end, Duration::hours(1)).unwrap();
        assert_eq!(timeline.len(), 25);
        assert_eq!(*timeline.items().last().unwrap(), end);
        assert_eq!(*timeline.hours().last().unwrap(), 24.0);

        let timeline = Timeline::span(end, end, Duration::days(365)).unwrap();
        assert_eq!(timeline.items(), &[end]);
    }

    #[test]
    fn instants_before_epoch_have_negative_hours() {
        let earlier = start() - Duration::minutes(90);
        let timeline = Timeline::from_instants(start(), [earlier, start()]);
        assert_eq!(timeline.hours(), &[-1.5, 0.0]);
    }

    #[test]
    fn caller_supplied_pairs_are_kept_verbatim() {
        let timeline = Timeline::new([(start(), 7.25)]);
        assert_eq!(timeline.iter().collect::<Vec<_>>(), vec![(start(), 7.25)]);
        assert!(!timeline.is_empty());
        assert!(Timeline::default().is_empty());
    }
}
