//! # Doodson Numbers
//!
//! A constituent's equilibrium argument is an integer combination of the seven
//! spanning arguments `T+h-s, s, h, p, N, pp, 90`. The combination is stored as
//! a [`Coefficients`] vector and exchanged as seven letters.
//!
//! ## Letter Encoding
//!
//! Each coefficient `d` in [-5, 5] maps to the letter at alphabet index
//! `(25 + d) mod 26`, counting outward from `Z`:
//!
//! | d      | -5 | -4 | -3 | -2 | -1 | 0 | 1 | 2 | 3 | 4 | 5 |
//! |--------|----|----|----|----|----|---|---|---|---|---|---|
//! | letter | U  | V  | W  | X  | Y  | Z | A | B | C | D | E |
//!
//! Harmonic-constant datasets use this form, so it is kept exactly rather than
//! the signed-decimal notation found in textbooks. Letters may be grouped with
//! spaces (`"A AYZ ZZA"`); whitespace is ignored when decoding.
//!
//! ## Hash Keys
//!
//! [`hash`] renders a vector as its absolute digits with an `m` before each
//! negative term (`[1, 2, 0, -1, 0, 0, -1]` → `"120m100m1"`). It is compact and
//! readable but not guaranteed unambiguous once coefficients leave one digit.

use crate::error::{Result, TideError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Number of spanning arguments, and so of coefficients.
pub const LEN: usize = 7;

/// Largest coefficient magnitude the letter encoding can carry.
pub const MAX_COEFFICIENT: i32 = 5;

/// A 7-entry Doodson coefficient vector.
///
/// Vectors decoded from letters or built through [`Coefficients::new`] are
/// range-checked. Compound constituents combine vectors with
/// [`Coefficients::scaled`] and [`Coefficients::checked_add`], which may leave
/// the letter range (`M8` is
/// `8 × T+h-s`); such vectors still hash and still drive value/speed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coefficients([i32; LEN]);

impl Coefficients {
    /// Build a range-checked vector.
    pub fn new(values: [i32; LEN]) -> Result<Self> {
        for (index, &value) in values.iter().enumerate() {
            if value.unsigned_abs() > MAX_COEFFICIENT.unsigned_abs() {
                return Err(TideError::CoefficientOutOfRange { index, value });
            }
        }
        Ok(Self(values))
    }

    /// Build a range-checked vector from a slice that must hold 7 entries.
    pub fn from_slice(values: &[i32]) -> Result<Self> {
        let values: [i32; LEN] = values
            .try_into()
            .map_err(|_| TideError::CoefficientCount(values.len()))?;
        Self::new(values)
    }

    /// The raw coefficients in `T+h-s, s, h, p, N, pp, 90` order.
    pub fn as_array(&self) -> &[i32; LEN] {
        &self.0
    }

    /// Coefficients in order, by value.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }

    /// Multiply every entry by `factor`, `None` on `i32` overflow.
    pub fn scaled(&self, factor: i32) -> Option<Self> {
        let mut values = self.0;
        for value in values.iter_mut() {
            *value = value.checked_mul(factor)?;
        }
        Some(Self(values))
    }

    /// Elementwise sum, `None` on `i32` overflow.
    pub fn checked_add(&self, rhs: &Coefficients) -> Option<Self> {
        let mut values = self.0;
        for (value, &other) in values.iter_mut().zip(&rhs.0) {
            *value = value.checked_add(other)?;
        }
        Some(Self(values))
    }

    /// Dot product with per-argument quantities.
    pub fn dot(&self, quantities: &[f64; LEN]) -> f64 {
        self.0
            .iter()
            .zip(quantities)
            .map(|(&c, q)| c as f64 * q)
            .sum()
    }
}

impl Index<usize> for Coefficients {
    type Output = i32;

    fn index(&self, index: usize) -> &i32 {
        &self.0[index]
    }
}

impl fmt::Display for Coefficients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hash(self))
    }
}

/// Decode letter text into a range-checked coefficient vector.
///
/// # Errors
/// - [`TideError::DoodsonLength`] unless exactly 7 non-whitespace characters remain
/// - [`TideError::DoodsonCharacter`] for anything outside `A`-`Z`
/// - [`TideError::CoefficientOutOfRange`] for letters `F`-`T`, which decode beyond ±5
///
/// # Example
/// ```
/// use tide_predictor::doodson::decode;
///
/// let c = decode("A BZY ZZY").unwrap();
/// assert_eq!(c.as_array(), &[1, 2, 0, -1, 0, 0, -1]);
/// ```
pub fn decode(text: &str) -> Result<Coefficients> {
    let letters: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    if letters.len() != LEN {
        return Err(TideError::DoodsonLength(letters.len()));
    }

    let mut values = [0; LEN];
    for (slot, &letter) in values.iter_mut().zip(&letters) {
        if !letter.is_ascii_uppercase() {
            return Err(TideError::DoodsonCharacter(letter));
        }
        let index = (letter as u8 - b'A') as i32;
        *slot = (index - 25 + MAX_COEFFICIENT).rem_euclid(26) - MAX_COEFFICIENT;
    }

    let coefficients = Coefficients::new(values)?;
    tracing::trace!(text, %coefficients, "decoded Doodson number");
    Ok(coefficients)
}

/// Encode a vector as 7 letters with no separators.
///
/// # Errors
/// [`TideError::CoefficientOutOfRange`] when an entry exceeds ±5, which only
/// happens for combined compound vectors.
pub fn encode(coefficients: &Coefficients) -> Result<String> {
    coefficients
        .iter()
        .enumerate()
        .map(|(index, value)| {
            if value.unsigned_abs() > MAX_COEFFICIENT.unsigned_abs() {
                return Err(TideError::CoefficientOutOfRange { index, value });
            }
            Ok((b'A' + (25 + value).rem_euclid(26) as u8) as char)
        })
        .collect()
}

/// Compact lookup key: absolute digits, `m` before negative terms.
pub fn hash(coefficients: &Coefficients) -> String {
    coefficients
        .iter()
        .map(|value| {
            if value < 0 {
                format!("m{}", value.unsigned_abs())
            } else {
                value.to_string()
            }
        })
        .collect()
}
