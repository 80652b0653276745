//! # Tide Predictor Core Library
//!
//! Harmonic tide prediction: astronomical arguments from a timestamp,
//! constituent equilibrium arguments from Doodson numbers, and a superposition
//! engine that turns station harmonic constants into a level series and its
//! highs and lows.
//!
//! ## Data Flow
//!
//! 1. **Astronomy**: [`astronomy::astro`] turns a UTC timestamp into an
//!    [`astronomy::AstroState`] (lunar/solar longitudes, node, perigees,
//!    obliquity and the Schureman quantities).
//! 2. **Constituents**: a [`Constituent`] dots its Doodson coefficient vector
//!    with that state for its equilibrium argument and speed, and asks a
//!    [`NodeFactorProvider`] for its nodal corrections `u`/`f`.
//! 3. **Prediction**: [`Prediction`] evaluates every constituent at the start
//!    epoch once, the nodal corrections at each [`Timeline`] instant, and sums
//!    the cosines. Extremes come from a single forward scan.
//!
//! ## Example
//!
//! ```
//! use chrono::{Duration, NaiveDate};
//! use tide_predictor::{bind_harmonics, catalog, HarmonicConstant, NoCorrection, Prediction, Timeline};
//!
//! let model = catalog::standard().unwrap();
//! let harmonics = bind_harmonics(
//!     &model,
//!     [
//!         ("M2", HarmonicConstant { amplitude: 4.5, phase: 100.0 }),
//!         ("S2", HarmonicConstant { amplitude: 0.7, phase: 130.0 }),
//!     ],
//! )
//! .unwrap();
//!
//! let start = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let timeline = Timeline::span(start, start + Duration::hours(48), Duration::minutes(10)).unwrap();
//!
//! let prediction = Prediction::new(&harmonics, &timeline, start, &NoCorrection);
//! assert_eq!(prediction.timeline_prediction().count(), timeline.len());
//! assert!(prediction.extremes_prediction().len() >= 6);
//! ```

pub mod astronomy;
pub mod catalog;
pub mod coefficients;
pub mod config;
pub mod constituent;
pub mod doodson;
pub mod error;
pub mod node_factor;
pub mod prediction;
pub mod timeline;


pub use astronomy::{astro, AstroState};
pub use config::Config;
pub use constituent::{Constituent, Member};
pub use doodson::Coefficients;
pub use error::TideError;
pub use node_factor::{NoCorrection, NodeFactor, NodeFactorProvider, SchuremanLunar, Species};
pub use prediction::{
    bind_harmonics, detect_extremes, Extreme, ExtremeLabels, Harmonic, HarmonicConstant,
    Prediction, TimelineLevel,
};
pub use timeline::Timeline;
