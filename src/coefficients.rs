//! Polynomial series for the slowly varying astronomical arguments.
//!
//! Each table holds the coefficients of a polynomial in `T`, Julian centuries
//! since J2000.0, lowest order first. Values are degrees. Sources are Meeus,
//! *Astronomical Algorithms* (2nd ed.), chapters 22, 25 and 47.

/// Arcseconds per degree.
const ARCSEC: f64 = 3600.0;

/// Mean longitude of the Moon, `s` (Meeus 47.1).
pub const LUNAR_LONGITUDE: [f64; 4] = [
    218.316_459_1,
    481_267.881_342_36,
    -0.001_326_8,
    1.0 / 538_841.0 - 1.0 / 65_194_000.0,
];

/// Mean longitude of the Sun, `h` (Meeus 25.2).
pub const SOLAR_LONGITUDE: [f64; 3] = [280.466_45, 36_000.769_83, 0.000_303_2];

/// Longitude of the lunar perigee, `p` (Meeus 47.7).
pub const LUNAR_PERIGEE: [f64; 5] = [
    83.353_243,
    4_069.013_711_1,
    -0.010_323_8,
    -1.0 / 80_053.0,
    1.0 / 18_999_000.0,
];

/// Longitude of the Moon's ascending node, `N` (Meeus 47.7).
pub const LUNAR_NODE: [f64; 5] = [
    125.044_555,
    -1_934.136_184_9,
    0.002_076_2,
    1.0 / 467_410.0,
    -1.0 / 60_616_000.0,
];

/// Longitude of the solar perigee, `pp`: mean longitude minus mean anomaly
/// of the Sun (Meeus 25.2 and 25.3).
pub const SOLAR_PERIGEE: [f64; 4] = [
    280.466_45 - 357.529_1,
    36_000.769_32 - 35_999.050_3,
    0.000_303_2 + 0.000_155_9,
    0.000_000_48,
];

/// The constant `90` argument.
pub const NINETY: [f64; 1] = [90.0];

/// Mean obliquity of the ecliptic, `omega` (Meeus 22.3).
///
/// Meeus gives this series in `U = T / 100`; each term here is already
/// rescaled by `0.01^k` so the polynomial is evaluated in `T` like the others.
pub const TERRESTRIAL_OBLIQUITY: [f64; 11] = [
    23.0 + 26.0 / 60.0 + 21.448 / ARCSEC,
    -4680.93 / ARCSEC * 1e-2,
    -1.55 / ARCSEC * 1e-4,
    1999.25 / ARCSEC * 1e-6,
    -51.38 / ARCSEC * 1e-8,
    -249.67 / ARCSEC * 1e-10,
    -39.05 / ARCSEC * 1e-12,
    7.12 / ARCSEC * 1e-14,
    27.87 / ARCSEC * 1e-16,
    5.79 / ARCSEC * 1e-18,
    2.45 / ARCSEC * 1e-20,
];

/// Mean inclination of the lunar orbit to the ecliptic, `i`.
pub const LUNAR_INCLINATION: [f64; 1] = [5.145];
