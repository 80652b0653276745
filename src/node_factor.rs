//! # Node Factors
//!
//! The 18.6-year regression of the lunar node modulates each constituent's
//! amplitude by a factor `f` and shifts its phase by `u`. Which formula applies
//! depends on the constituent's [`Species`], so the correction is injected
//! through [`NodeFactorProvider`] rather than baked into the constituent.
//!
//! Two providers ship with the crate:
//! - [`NoCorrection`]: `u = 0`, `f = 1` for everything. This is what plain
//!   constituents use when no station-specific table is available.
//! - [`SchuremanLunar`]: Schureman's lunar formulas for each species
//!   (Mm, O1, M2, M3), with shallow-water species scaled from M2.
//!
//! Any closure `Fn(Species, &NodeArguments) -> NodeFactor` also works as a
//! provider, which is the easiest way to plug in a full per-constituent table.

use crate::astronomy::AstroState;
use crate::doodson::Coefficients;
use serde::{Deserialize, Serialize};

/// Constituent classification by its `T+h-s` multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Species {
    /// Zero cycles per lunar day
    LongPeriod,
    /// Once per lunar day
    Diurnal,
    /// Twice per lunar day
    Semidiurnal,
    /// Three times per lunar day
    Terdiurnal,
    /// Four or more times per lunar day (overtides and compound tides)
    Shallow(u32),
}

impl Species {
    /// Classify from the first coefficient's magnitude.
    pub fn from_coefficients(coefficients: &Coefficients) -> Self {
        match coefficients[0].unsigned_abs() {
            0 => Species::LongPeriod,
            1 => Species::Diurnal,
            2 => Species::Semidiurnal,
            3 => Species::Terdiurnal,
            n => Species::Shallow(n),
        }
    }

    /// Cycles per lunar day.
    pub fn cycles(self) -> u32 {
        match self {
            Species::LongPeriod => 0,
            Species::Diurnal => 1,
            Species::Semidiurnal => 2,
            Species::Terdiurnal => 3,
            Species::Shallow(n) => n,
        }
    }
}

/// Astronomical inputs every node factor formula draws from, degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeArguments {
    pub n: f64,
    pub equator_inclination: f64,
    pub xi: f64,
    pub nu: f64,
    pub nu_prime: f64,
    pub nu_double_prime: f64,
}

impl From<&AstroState> for NodeArguments {
    fn from(state: &AstroState) -> Self {
        Self {
            n: state.n.value,
            equator_inclination: state.equator_inclination.value,
            xi: state.xi.value,
            nu: state.nu.value,
            nu_prime: state.nu_prime.value,
            nu_double_prime: state.nu_double_prime.value,
        }
    }
}

/// Phase correction `u` (degrees) and amplitude factor `f` (dimensionless, ≥ 0).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeFactor {
    pub u: f64,
    pub f: f64,
}

impl NodeFactor {
    pub const UNITY: NodeFactor = NodeFactor { u: 0.0, f: 1.0 };
}

/// Supplies the nodal correction for a species at one instant.
pub trait NodeFactorProvider {
    fn node_factor(&self, species: Species, args: &NodeArguments) -> NodeFactor;
}

impl<F> NodeFactorProvider for F
where
    F: Fn(Species, &NodeArguments) -> NodeFactor,
{
    fn node_factor(&self, species: Species, args: &NodeArguments) -> NodeFactor {
        self(species, args)
    }
}

/// No nodal modulation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCorrection;

impl NodeFactorProvider for NoCorrection {
    fn node_factor(&self, _species: Species, _args: &NodeArguments) -> NodeFactor {
        NodeFactor::UNITY
    }
}

/// Schureman's lunar node factors, one representative formula per species.
///
/// Formulas follow Schureman, *Manual of Harmonic Analysis and Prediction of
/// Tides* (1958), equations 73-78 and 149. Solar-dominated constituents
/// (S2, K1, K2) need their own table and are not distinguished here.
#[derive(Clone, Copy, Debug, Default)]
pub struct SchuremanLunar;

impl SchuremanLunar {
    /// Mm: `u = 0`, `f = (2/3 - sin²I) / 0.5021`.
    fn long_period(args: &NodeArguments) -> NodeFactor {
        let i = args.equator_inclination.to_radians();
        NodeFactor {
            u: 0.0,
            f: (2.0 / 3.0 - i.sin().powi(2)) / 0.5021,
        }
    }

    /// O1: `u = 2xi - nu`, `f = sin I cos²(I/2) / 0.3800`.
    fn diurnal(args: &NodeArguments) -> NodeFactor {
        let i = args.equator_inclination.to_radians();
        NodeFactor {
            u: 2.0 * args.xi - args.nu,
            f: i.sin() * (0.5 * i).cos().powi(2) / 0.3800,
        }
    }

    /// M2: `u = 2xi - 2nu`, `f = cos⁴(I/2) / 0.9154`.
    fn semidiurnal(args: &NodeArguments) -> NodeFactor {
        let i = args.equator_inclination.to_radians();
        NodeFactor {
            u: 2.0 * args.xi - 2.0 * args.nu,
            f: (0.5 * i).cos().powi(4) / 0.9154,
        }
    }

    /// M3: `u = 3xi - 3nu`, `f = cos⁶(I/2) / 0.8758`.
    fn terdiurnal(args: &NodeArguments) -> NodeFactor {
        let i = args.equator_inclination.to_radians();
        NodeFactor {
            u: 3.0 * args.xi - 3.0 * args.nu,
            f: (0.5 * i).cos().powi(6) / 0.8758,
        }
    }
}

impl NodeFactorProvider for SchuremanLunar {
    fn node_factor(&self, species: Species, args: &NodeArguments) -> NodeFactor {
        match species {
            Species::LongPeriod => Self::long_period(args),
            Species::Diurnal => Self::diurnal(args),
            Species::Semidiurnal => Self::semidiurnal(args),
            Species::Terdiurnal => Self::terdiurnal(args),
            Species::Shallow(n) => {
                // Overtide of M2: n/2 copies of the semidiurnal correction
                let m2 = Self::semidiurnal(args);
                let half = n as f64 / 2.0;
                NodeFactor {
                    u: m2.u * half,
                    f: m2.f.powf(half),
                }
            }
        }
    }
}
