//! Standard constituent definitions.
//!
//! Base constituents are declared by their Doodson letters; compound and
//! shallow-water constituents are declared as combinations of base ones, so
//! their speeds and arguments follow automatically.

use crate::constituent::{Constituent, Member};
use crate::error::{Result, TideError};

/// Base constituents as `(name, Doodson letters)`.
const BASE: &[(&str, &str)] = &[
    // Long period
    ("Z0", "Z ZZZ ZZZ"),
    ("Sa", "Z ZAZ ZZZ"),
    ("Ssa", "Z ZBZ ZZZ"),
    ("Mm", "Z AZY ZZZ"),
    ("Mf", "Z BZZ ZZZ"),
    // Diurnal
    ("Q1", "A XZA ZZA"),
    ("O1", "A YZZ ZZA"),
    ("K1", "A AZZ ZZY"),
    ("J1", "A BZY ZZY"),
    ("M1", "A ZZZ ZZA"),
    ("P1", "A AXZ ZZA"),
    ("S1", "A AYZ ZZZ"),
    ("OO1", "A CZZ ZZY"),
    // Semidiurnal
    ("2N2", "B XZB ZZZ"),
    ("N2", "B YZA ZZZ"),
    ("nu2", "B YBY ZZZ"),
    ("M2", "B ZZZ ZZZ"),
    ("lambda2", "B AXA ZZB"),
    ("L2", "B AZY ZZB"),
    ("T2", "B BWZ ZAZ"),
    ("S2", "B BXZ ZZZ"),
    ("R2", "B BYZ ZYB"),
    ("K2", "B BZZ ZZZ"),
    // Terdiurnal
    ("M3", "C ZZZ ZZZ"),
];

/// Compound constituents as `(name, [(member, factor)])`.
const COMPOUND: &[(&str, &[(&str, i32)])] = &[
    ("MSF", &[("S2", 1), ("M2", -1)]),
    ("2Q1", &[("N2", 1), ("J1", -1)]),
    ("rho1", &[("nu2", 1), ("K1", -1)]),
    ("mu2", &[("M2", 2), ("S2", -1)]),
    ("2SM2", &[("S2", 2), ("M2", -1)]),
    ("2MK3", &[("M2", 1), ("O1", 1)]),
    ("MK3", &[("M2", 1), ("K1", 1)]),
    ("MN4", &[("M2", 1), ("N2", 1)]),
    ("M4", &[("M2", 2)]),
    ("MS4", &[("M2", 1), ("S2", 1)]),
    ("S4", &[("S2", 2)]),
    ("M6", &[("M2", 3)]),
    ("S6", &[("S2", 3)]),
    ("M8", &[("M2", 4)]),
];

/// Every standard constituent, base ones first.
pub fn standard() -> Result<Vec<Constituent>> {
    let mut all = BASE
        .iter()
        .map(|(name, letters)| Constituent::from_doodson(*name, letters))
        .collect::<Result<Vec<_>>>()?;

    for (name, terms) in COMPOUND {
        let members = terms
            .iter()
            .map(|(member, factor)| -> Result<Member> {
                let constituent = find_in(&all, member)?.clone();
                Ok(Member::new(constituent, *factor))
            })
            .collect::<Result<Vec<_>>>()?;
        all.push(Constituent::compound(*name, members)?);
    }

    Ok(all)
}

/// Look a constituent up by name.
pub fn find_in<'a>(constituents: &'a [Constituent], name: &str) -> Result<&'a Constituent> {
    constituents
        .iter()
        .find(|c| c.name() == name)
        .ok_or_else(|| TideError::UnknownConstituent(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astronomy::astro;
    use crate::node_factor::Species;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    #[test]
    fn builds_every_standard_constituent() {
        let all = standard().unwrap();
        assert_eq!(all.len(), BASE.len() + COMPOUND.len());
    }

    #[test]
    fn published_speeds() {
        let all = standard().unwrap();
        let state = astro(
            &NaiveDate::from_ymd_opt(2000, 1, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        );
        let speed = |name: &str| find_in(&all, name).unwrap().speed(&state);

        assert_abs_diff_eq!(speed("M2"), 28.984_104_2, epsilon = 1e-4);
        assert_abs_diff_eq!(speed("S2"), 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(speed("N2"), 28.439_729_5, epsilon = 1e-4);
        assert_abs_diff_eq!(speed("K1"), 15.041_068_6, epsilon = 1e-4);
        assert_abs_diff_eq!(speed("O1"), 13.943_035_6, epsilon = 1e-4);
        assert_abs_diff_eq!(speed("Mm"), 0.544_374_7, epsilon = 1e-4);
        assert_abs_diff_eq!(speed("M4"), 57.968_208_4, epsilon = 1e-4);
        assert_abs_diff_eq!(speed("MS4"), 58.984_104_2, epsilon = 1e-4);
    }

    #[test]
    fn compound_species_follow_combined_vector() {
        let all = standard().unwrap();
        assert_eq!(find_in(&all, "MK3").unwrap().species(), Species::Terdiurnal);
        assert_eq!(find_in(&all, "MSF").unwrap().species(), Species::LongPeriod);
        assert_eq!(find_in(&all, "M8").unwrap().species(), Species::Shallow(8));
    }

    #[test]
    fn unknown_names_are_errors() {
        let all = standard().unwrap();
        assert!(matches!(
            find_in(&all, "X9"),
            Err(TideError::UnknownConstituent(name)) if name == "X9"
        ));
    }
}
