//! # Harmonic Prediction
//!
//! Superposes constituents into a water level series and finds its highs and
//! lows.
//!
//! ## Level Model
//!
//! At elapsed hour `t` with the nodal corrections `(u, f)` of that instant:
//!
//! ```text
//! level(t) = Σ amplitude · f · cos(speed · t + (V0 + u) − phase)
//! ```
//!
//! `V0` and `speed` come from the constituents evaluated once at the start
//! epoch; `amplitude` and `phase` are station harmonic constants; `u` and `f`
//! are recomputed from a fresh [`AstroState`] at every timeline instant.
//!
//! ## Extremes
//!
//! [`detect_extremes`] makes one forward pass remembering only the previous
//! level and whether the series was last rising or falling. When the
//! direction flips, the *previous* instant is the extreme. Equal consecutive
//! levels change nothing: a plateau is neither reported nor resets the
//! direction.
//!
//! [`Prediction::extremes_prediction`] seeds the scan with the level at
//! elapsed hour zero (using the first instant's `u`/`f`), so a timeline that
//! starts after the epoch can report its first instant.
//!
//! ## Cost
//!
//! Preparation evaluates the astronomy once per instant and is independent
//! per instant. The extremes scan is inherently sequential.

use crate::astronomy::{astro, AstroState};
use crate::catalog;
use crate::constituent::Constituent;
use crate::error::Result;
use crate::node_factor::NodeFactorProvider;
use crate::timeline::Timeline;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A constituent with its station amplitude and phase.
#[derive(Clone, Debug)]
pub struct Harmonic {
    pub constituent: Constituent,
    /// Amplitude in the caller's length unit
    pub amplitude: f64,
    /// Phase lag in degrees
    pub phase: f64,
}

/// Station harmonic constant for one constituent, as found in datasets.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HarmonicConstant {
    pub amplitude: f64,
    /// Degrees
    pub phase: f64,
}

/// Pair name-keyed harmonic constants with the model's constituents.
///
/// # Errors
/// [`crate::TideError::UnknownConstituent`] if a name is not in `model`.
pub fn bind_harmonics<K, I>(model: &[Constituent], constants: I) -> Result<Vec<Harmonic>>
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, HarmonicConstant)>,
{
    constants
        .into_iter()
        .map(|(name, constant)| -> Result<Harmonic> {
            Ok(Harmonic {
                constituent: catalog::find_in(model, name.as_ref())?.clone(),
                amplitude: constant.amplitude,
                phase: constant.phase,
            })
        })
        .collect()
}

/// Labels attached to extreme records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtremeLabels {
    pub high: String,
    pub low: String,
}

impl Default for ExtremeLabels {
    fn default() -> Self {
        Self {
            high: "High".to_string(),
            low: "Low".to_string(),
        }
    }
}

/// Water level at one timeline instant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineLevel {
    pub time: NaiveDateTime,
    pub hour: f64,
    pub level: f64,
}

/// A detected high or low water.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Extreme {
    pub time: NaiveDateTime,
    pub level: f64,
    pub high: bool,
    pub low: bool,
    pub label: String,
}

/// Unit for prepared angles and speeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AngleUnit {
    Degrees,
    Radians,
}

impl AngleUnit {
    fn convert(self, degrees: f64) -> f64 {
        match self {
            AngleUnit::Degrees => degrees,
            AngleUnit::Radians => degrees.to_radians(),
        }
    }
}

/// Per-constituent quantities computed ahead of level evaluation.
///
/// Vectors are indexed by harmonic; `u` and `f` are additionally indexed by
/// timeline instant first.
#[derive(Clone, Debug, PartialEq)]
pub struct Prepared {
    pub unit: AngleUnit,
    pub base_value: Vec<f64>,
    pub base_speed: Vec<f64>,
    pub u: Vec<Vec<f64>>,
    pub f: Vec<Vec<f64>>,
}

/// Prediction over a timeline for a set of harmonics.
pub struct Prediction<'a> {
    harmonics: &'a [Harmonic],
    timeline: &'a Timeline,
    start: NaiveDateTime,
    nodes: &'a dyn NodeFactorProvider,
    labels: ExtremeLabels,
}

impl<'a> Prediction<'a> {
    /// `start` is the epoch the timeline's hours are measured from.
    pub fn new(
        harmonics: &'a [Harmonic],
        timeline: &'a Timeline,
        start: NaiveDateTime,
        nodes: &'a dyn NodeFactorProvider,
    ) -> Self {
        Self {
            harmonics,
            timeline,
            start,
            nodes,
            labels: ExtremeLabels::default(),
        }
    }

    /// Replace the default "High"/"Low" labels.
    pub fn with_labels(mut self, labels: ExtremeLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Base value/speed at the start epoch and `(u, f)` at every instant.
    pub fn prepare(&self, unit: AngleUnit) -> Prepared {
        let base: AstroState = astro(&self.start);
        let base_value: Vec<f64> = self
            .harmonics
            .iter()
            .map(|h| unit.convert(h.constituent.value(&base)))
            .collect();
        let base_speed: Vec<f64> = self
            .harmonics
            .iter()
            .map(|h| unit.convert(h.constituent.speed(&base)))
            .collect();

        let mut u = Vec::with_capacity(self.timeline.len());
        let mut f = Vec::with_capacity(self.timeline.len());
        for time in self.timeline.items() {
            let state = astro(time);
            let (u_row, f_row): (Vec<f64>, Vec<f64>) = self
                .harmonics
                .iter()
                .map(|h| {
                    (
                        unit.convert(h.constituent.u(&state, self.nodes)),
                        h.constituent.f(&state, self.nodes),
                    )
                })
                .unzip();
            u.push(u_row);
            f.push(f_row);
        }

        debug!(
            constituents = self.harmonics.len(),
            instants = self.timeline.len(),
            "prepared harmonic model"
        );

        Prepared {
            unit,
            base_value,
            base_speed,
            u,
            f,
        }
    }

    /// Level at every timeline instant, in order.
    pub fn timeline_prediction(&self) -> impl Iterator<Item = TimelineLevel> + 'a {
        let prepared = self.prepare(AngleUnit::Radians);
        let harmonics = self.harmonics;
        self.timeline
            .iter()
            .enumerate()
            .map(move |(index, (time, hour))| TimelineLevel {
                time,
                hour,
                level: level(harmonics, &prepared, index, hour),
            })
    }

    /// Highs and lows over the timeline.
    pub fn extremes_prediction(&self) -> Vec<Extreme> {
        if self.timeline.is_empty() {
            return Vec::new();
        }
        let prepared = self.prepare(AngleUnit::Radians);
        let baseline = level(self.harmonics, &prepared, 0, 0.0);
        let points = self
            .timeline
            .iter()
            .enumerate()
            .map(|(index, (time, hour))| (time, level(self.harmonics, &prepared, index, hour)));
        detect_extremes(Some(baseline), points, &self.labels)
    }
}

/// Superposed level at elapsed `hour`, using the `(u, f)` row for `index`.
///
/// `prepared` must be in radians.
fn level(harmonics: &[Harmonic], prepared: &Prepared, index: usize, hour: f64) -> f64 {
    harmonics
        .iter()
        .enumerate()
        .map(|(j, h)| {
            let phase = h.phase.to_radians();
            let argument =
                prepared.base_speed[j] * hour + (prepared.base_value[j] + prepared.u[index][j]) - phase;
            h.amplitude * prepared.f[index][j] * argument.cos()
        })
        .sum()
}

/// Scan `(time, level)` points in order and report each turning point.
///
/// `baseline` is the level before the first point. Without one the first
/// point only seeds the scan and can never be an extreme itself.
pub fn detect_extremes(
    baseline: Option<f64>,
    points: impl IntoIterator<Item = (NaiveDateTime, f64)>,
    labels: &ExtremeLabels,
) -> Vec<Extreme> {
    let mut points = points.into_iter().peekable();
    let Some(mut last_level) = baseline.or_else(|| points.peek().map(|&(_, level)| level)) else {
        return Vec::new();
    };
    let mut last_time: Option<NaiveDateTime> = None;

    let mut rising = false;
    let mut falling = false;
    let mut extremes = Vec::new();

    for (time, level) in points {
        // Rising or falling implies a previous instant
        if let Some(previous) = last_time {
            if level > last_level && falling {
                extremes.push(Extreme {
                    time: previous,
                    level: last_level,
                    high: false,
                    low: true,
                    label: labels.low.clone(),
                });
            }
            if level < last_level && rising {
                extremes.push(Extreme {
                    time: previous,
                    level: last_level,
                    high: true,
                    low: false,
                    label: labels.high.clone(),
                });
            }
        }
        if level > last_level {
            rising = true;
            falling = false;
        } else if level < last_level {
            rising = false;
            falling = true;
        }
        last_time = Some(time);
        last_level = level;
    }

    debug!(count = extremes.len(), "detected extremes");
    extremes
}
