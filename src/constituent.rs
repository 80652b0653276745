//! # Tidal Constituents
//!
//! A constituent is a named Doodson coefficient vector. Given an
//! [`AstroState`] it yields an equilibrium argument (`value`), an angular
//! speed, and through a [`NodeFactorProvider`] its nodal corrections `u`/`f`.
//!
//! ## Variants
//!
//! [`Constituent`] is a tagged union rather than a trait object hierarchy:
//! - [`Constituent::Basic`] owns its vector directly, either given as
//!   integers or decoded from Doodson letters.
//! - [`Constituent::Compound`] is a linear combination of other constituents
//!   (`MS4 = M2 + S2`, `M4 = 2 × M2`). Its effective vector is the
//!   factor-weighted sum of its members' vectors, computed once at
//!   construction.
//!
//! Both variants answer `value`, `speed`, `u` and `f` through the same code
//! path, keyed off the effective vector.
//!
//! ## Equality
//!
//! Two constituents are equal when their coefficient vectors are equal. Names
//! are labels for lookup only.
//!
//! ## Ranges
//!
//! `value` is a plain dot product and is not reduced modulo 360; the cosine
//! downstream does not care. `u` is reduced into [0, 360).

use crate::astronomy::{modulus, Argument, AstroState};
use crate::doodson::{self, Coefficients, LEN};
use crate::error::{Result, TideError};
use crate::node_factor::{NodeArguments, NodeFactor, NodeFactorProvider, Species};

/// A constituent defined directly by its coefficient vector.
#[derive(Clone, Debug)]
pub struct Basic {
    name: String,
    coefficients: Coefficients,
}

/// One term of a compound constituent.
#[derive(Clone, Debug)]
pub struct Member {
    pub constituent: Constituent,
    pub factor: i32,
}

impl Member {
    /// `factor` copies of `constituent`; negative factors subtract.
    pub fn new(constituent: Constituent, factor: i32) -> Self {
        Self {
            constituent,
            factor,
        }
    }
}

/// A constituent built as a linear combination of others.
#[derive(Clone, Debug)]
pub struct Compound {
    name: String,
    members: Vec<Member>,
    coefficients: Coefficients,
}

impl Compound {
    /// Members in declaration order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }
}

/// A tidal constituent, basic or compound.
#[derive(Clone, Debug)]
pub enum Constituent {
    Basic(Basic),
    Compound(Compound),
}

impl Constituent {
    /// Wrap an already validated vector.
    pub fn basic(name: impl Into<String>, coefficients: Coefficients) -> Self {
        Constituent::Basic(Basic {
            name: name.into(),
            coefficients,
        })
    }

    /// Decode a Doodson number such as `"B ZZZ ZZZ"`.
    pub fn from_doodson(name: impl Into<String>, doodson: &str) -> Result<Self> {
        Ok(Self::basic(name, doodson::decode(doodson)?))
    }

    /// Build from 7 integers in [-5, 5].
    pub fn from_coefficients(name: impl Into<String>, coefficients: &[i32]) -> Result<Self> {
        Ok(Self::basic(name, Coefficients::from_slice(coefficients)?))
    }

    /// Start a builder that accepts either coefficient source.
    pub fn builder<'a>(name: impl Into<String>) -> ConstituentBuilder<'a> {
        ConstituentBuilder {
            name: name.into(),
            doodson: None,
            coefficients: None,
        }
    }

    /// Combine `(constituent, factor)` members into a new constituent.
    ///
    /// # Errors
    /// [`TideError::EmptyCompound`] without members, [`TideError::CompoundOverflow`]
    /// if the weighted sum leaves `i32`.
    ///
    /// # Example
    /// ```
    /// use tide_predictor::constituent::{Constituent, Member};
    ///
    /// let m2 = Constituent::from_doodson("M2", "B ZZZ ZZZ").unwrap();
    /// let s2 = Constituent::from_doodson("S2", "B BXZ ZZZ").unwrap();
    /// let ms4 = Constituent::compound("MS4", vec![Member::new(m2, 1), Member::new(s2, 1)]).unwrap();
    /// assert_eq!(ms4.coefficients().as_array(), &[4, 2, -2, 0, 0, 0, 0]);
    /// ```
    pub fn compound(name: impl Into<String>, members: Vec<Member>) -> Result<Self> {
        let name = name.into();
        if members.is_empty() {
            return Err(TideError::EmptyCompound(name));
        }
        let coefficients = members
            .iter()
            .try_fold(Coefficients::default(), |sum, m| {
                let term = m.constituent.coefficients().scaled(m.factor)?;
                sum.checked_add(&term)
            })
            .ok_or_else(|| TideError::CompoundOverflow(name.clone()))?;

        Ok(Constituent::Compound(Compound {
            name,
            members,
            coefficients,
        }))
    }

    /// Lookup name, such as `"M2"`.
    pub fn name(&self) -> &str {
        match self {
            Constituent::Basic(b) => &b.name,
            Constituent::Compound(c) => &c.name,
        }
    }

    /// The effective coefficient vector.
    pub fn coefficients(&self) -> &Coefficients {
        match self {
            Constituent::Basic(b) => &b.coefficients,
            Constituent::Compound(c) => &c.coefficients,
        }
    }

    pub fn is_compound(&self) -> bool {
        matches!(self, Constituent::Compound(_))
    }

    /// Node factor species of the effective vector.
    pub fn species(&self) -> Species {
        Species::from_coefficients(self.coefficients())
    }

    /// Doodson letters for the effective vector; fails if a compound left ±5.
    pub fn doodson(&self) -> Result<String> {
        doodson::encode(self.coefficients())
    }

    /// Compact lookup key, see [`doodson::hash`].
    pub fn hash(&self) -> String {
        doodson::hash(self.coefficients())
    }

    /// The seven spanning arguments in coefficient order.
    pub fn astronomic_doodson_number(&self, astro: &AstroState) -> [Argument; LEN] {
        astro.fundamentals()
    }

    pub fn astronomic_values(&self, astro: &AstroState) -> [f64; LEN] {
        astro.fundamentals().map(|a| a.value)
    }

    /// Spanning argument speeds. All seven always carry a speed.
    pub fn astronomic_speed(&self, astro: &AstroState) -> [f64; LEN] {
        astro.fundamentals().map(|a| a.speed.unwrap_or_default())
    }

    /// Equilibrium argument in degrees, not range-reduced.
    pub fn value(&self, astro: &AstroState) -> f64 {
        self.coefficients().dot(&self.astronomic_values(astro))
    }

    /// Angular speed in degrees/hour.
    pub fn speed(&self, astro: &AstroState) -> f64 {
        self.coefficients().dot(&self.astronomic_speed(astro))
    }

    /// Raw nodal correction from the provider for this constituent's species.
    pub fn node_factor(&self, astro: &AstroState, nodes: &dyn NodeFactorProvider) -> NodeFactor {
        nodes.node_factor(self.species(), &NodeArguments::from(astro))
    }

    /// Nodal phase correction in [0, 360).
    pub fn u(&self, astro: &AstroState, nodes: &dyn NodeFactorProvider) -> f64 {
        modulus(self.node_factor(astro, nodes).u, 360.0)
    }

    /// Nodal amplitude factor.
    pub fn f(&self, astro: &AstroState, nodes: &dyn NodeFactorProvider) -> f64 {
        self.node_factor(astro, nodes).f
    }
}

impl PartialEq for Constituent {
    fn eq(&self, other: &Self) -> bool {
        self.coefficients() == other.coefficients()
    }
}

impl Eq for Constituent {}

/// Builder taking a name plus a Doodson number and/or a coefficient vector.
///
/// The Doodson number wins when both are set. Building with neither fails
/// with [`TideError::MissingCoefficients`].
#[derive(Debug)]
pub struct ConstituentBuilder<'a> {
    name: String,
    doodson: Option<&'a str>,
    coefficients: Option<&'a [i32]>,
}

impl<'a> ConstituentBuilder<'a> {
    pub fn doodson(mut self, doodson: &'a str) -> Self {
        self.doodson = Some(doodson);
        self
    }

    pub fn coefficients(mut self, coefficients: &'a [i32]) -> Self {
        self.coefficients = Some(coefficients);
        self
    }

    pub fn build(self) -> Result<Constituent> {
        match (self.doodson, self.coefficients) {
            (Some(text), _) => Constituent::from_doodson(self.name, text),
            (None, Some(values)) => Constituent::from_coefficients(self.name, values),
            (None, None) => Err(TideError::MissingCoefficients),
        }
    }
}
