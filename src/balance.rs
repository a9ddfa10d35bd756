//! Ionic-compound balancing. Given a resolved cation and anion this module
//! validates the charge signs, derives the minimal integer stoichiometric
//! ratio, and computes the total molar mass. Pure arithmetic, no store
//! access, so it tests in isolation.
//!
//! One quirk is preserved on purpose: when the charge magnitudes differ, the
//! total molar mass is weighted by the raw cross-multiplied magnitudes
//! (`|anionCharge| * cationMass + |cationCharge| * anionMass`) even when the
//! displayed subscripts have been gcd-reduced. The formula string and the
//! mass can therefore disagree about the counts, and callers (and tests)
//! rely on that exact behavior.

use thiserror::Error;

use crate::models::Ion;

#[derive(Debug, Error, PartialEq)]
/// Charge-sign precondition violations. These are user-input/data errors:
/// the calculation aborts with a message naming the offending ion, the
/// session keeps running.
pub enum BalanceError {
    #[error("cation charge must be positive: the database shows {symbol} with charge {charge}")]
    CationChargeNotPositive { symbol: String, charge: i64 },
    #[error("anion charge must be negative: the database shows {symbol} with charge {charge}")]
    AnionChargeNotNegative { symbol: String, charge: i64 },
}

#[derive(Debug, Clone, PartialEq)]
/// A balanced ionic compound. Derived per request, never persisted. Counts
/// are the gcd-reduced subscripts; the narrative breakdown (subtotals, net
/// charge, formula) is exposed as accessors so callers render it however
/// they like instead of parsing formatted text.
pub struct BalancedCompound {
    pub cation_symbol: String,
    pub cation_count: i64,
    pub cation_charge: i64,
    pub cation_mass: f64,
    pub anion_symbol: String,
    pub anion_count: i64,
    pub anion_charge: i64,
    pub anion_mass: f64,
    /// Total molar mass in g/mol, per the unreduced-magnitude rule above.
    pub molar_mass: f64,
}

impl BalancedCompound {
    /// Empirical formula: cation then anion, a count of 1 rendered as the
    /// bare symbol, larger counts appended as decimal digits.
    pub fn formula(&self) -> String {
        let mut formula = String::new();
        append_term(&mut formula, &self.cation_symbol, self.cation_count);
        append_term(&mut formula, &self.anion_symbol, self.anion_count);
        formula
    }

    /// Combined charge contributed by the cation side (count x signed charge).
    pub fn cation_subtotal_charge(&self) -> i64 {
        self.cation_count * self.cation_charge
    }

    /// Combined charge contributed by the anion side.
    pub fn anion_subtotal_charge(&self) -> i64 {
        self.anion_count * self.anion_charge
    }

    /// Net charge of the compound. Zero by construction since the counts come
    /// from cross-multiplied, gcd-reduced magnitudes.
    pub fn net_charge(&self) -> i64 {
        self.cation_subtotal_charge() + self.anion_subtotal_charge()
    }

    /// True when the charges had equal magnitude and no cross-multiplication
    /// was needed. The UI words its narrative differently for this case.
    pub fn is_one_to_one(&self) -> bool {
        self.cation_count == 1 && self.anion_count == 1
    }
}

fn append_term(formula: &mut String, symbol: &str, count: i64) {
    formula.push_str(symbol);
    if count > 1 {
        formula.push_str(&count.to_string());
    }
}

/// Greatest common divisor, Euclidean.
fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a
}

/// Balance a cation/anion pair into a neutral compound.
///
/// Validates the sign preconditions rather than assuming them: the store may
/// hold a wrong-sign or zero charge, and resolution deliberately lets that
/// through so the error message can cite the stored value.
pub fn balance(cation: &Ion, anion: &Ion) -> Result<BalancedCompound, BalanceError> {
    if cation.charge <= 0 {
        return Err(BalanceError::CationChargeNotPositive {
            symbol: cation.symbol.clone(),
            charge: cation.charge,
        });
    }
    if anion.charge >= 0 {
        return Err(BalanceError::AnionChargeNotNegative {
            symbol: anion.symbol.clone(),
            charge: anion.charge,
        });
    }

    let cation_magnitude = cation.charge.abs();
    let anion_magnitude = anion.charge.abs();

    let (cation_count, anion_count, molar_mass) = if cation_magnitude == anion_magnitude {
        (1, 1, cation.atomic_mass + anion.atomic_mass)
    } else {
        // Cross-multiply: each ion's count is the other's charge magnitude,
        // then reduce the pair for display. The mass stays weighted by the
        // unreduced magnitudes.
        let divisor = gcd(anion_magnitude, cation_magnitude);
        let mass = anion_magnitude as f64 * cation.atomic_mass
            + cation_magnitude as f64 * anion.atomic_mass;
        (anion_magnitude / divisor, cation_magnitude / divisor, mass)
    };

    Ok(BalancedCompound {
        cation_symbol: cation.symbol.clone(),
        cation_count,
        cation_charge: cation.charge,
        cation_mass: cation.atomic_mass,
        anion_symbol: anion.symbol.clone(),
        anion_count,
        anion_charge: anion.charge,
        anion_mass: anion.atomic_mass,
        molar_mass,
    })
}
