//! Per-screen state containers and the calculation report builder. The app
//! swaps these in and out of its `Screen` enum; keeping them here leaves
//! `app.rs` focused on navigation and rendering.

use crate::balance::BalancedCompound;
use crate::models::{CatalogEntry, ElementRecord, Ion};

/// Outcome of an element lookup, ready for rendering.
pub(crate) enum LookupOutcome {
    Found(ElementRecord),
    /// No row matched; carries the normalized (uppercased) symbol so the
    /// message quotes the spelling that was actually looked up.
    NotFound(String),
    Failed(String),
}

/// State for the element-information screen: the pick-list of available
/// elements, the symbol being typed, and the last outcome if any.
pub(crate) struct LookupScreen {
    pub(crate) catalog: Vec<CatalogEntry>,
    pub(crate) input: String,
    pub(crate) outcome: Option<LookupOutcome>,
}

impl LookupScreen {
    pub(crate) fn new(catalog: Vec<CatalogEntry>) -> Self {
        Self {
            catalog,
            input: String::new(),
            outcome: None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
/// Which ion the calculator is currently prompting for.
pub(crate) enum CompoundStage {
    Cation,
    Anion,
}

/// State for the compound-calculator screen. The flow runs in two stages:
/// resolve the cation, then the anion, then balance. The catalog is reloaded
/// when the stage advances so it lists the relation being prompted for.
pub(crate) struct CompoundScreen {
    pub(crate) stage: CompoundStage,
    pub(crate) catalog: Vec<CatalogEntry>,
    pub(crate) input: String,
    pub(crate) cation: Option<Ion>,
    pub(crate) report: Option<Vec<String>>,
}

impl CompoundScreen {
    pub(crate) fn new(catalog: Vec<CatalogEntry>) -> Self {
        Self {
            stage: CompoundStage::Cation,
            catalog,
            input: String::new(),
            cation: None,
            report: None,
        }
    }
}

/// Render the calculation narrative as plain lines: both ions echoed with
/// charge and weight, the balancing story, the zero-sum verification, the
/// formula, and the mass arithmetic. Everything here is derived from the
/// compound's discrete fields.
pub(crate) fn build_report(compound: &BalancedCompound) -> Vec<String> {
    let mut lines = vec![
        "--- Calculation Results ---".to_string(),
        format!("Cation:        {}", compound.cation_symbol),
        format!("Charge:        {:+}", compound.cation_charge),
        format!("Atomic Weight: {:.4} g/mol", compound.cation_mass),
        String::new(),
        format!("Anion:         {}", compound.anion_symbol),
        format!("Charge:        {:+}", compound.anion_charge),
        format!("Atomic Weight: {:.4} g/mol", compound.anion_mass),
        String::new(),
    ];

    if compound.is_one_to_one() {
        lines.push("The charges have the same magnitude, so we have a 1:1 ratio.".to_string());
        lines.push(String::new());
        lines.push(format!("Chemical formula: {}", compound.formula()));
        lines.push(format!(
            "Molar mass calculation: {:.4} g/mol + {:.4} g/mol = {:.4} g/mol",
            compound.cation_mass, compound.anion_mass, compound.molar_mass
        ));
    } else {
        lines.push("Charge Balancing:".to_string());
        lines.push(format!(
            "To balance charges ({:+} and {:+}), we need:",
            compound.cation_charge, compound.anion_charge
        ));
        lines.push(format!(
            "- {} {} ions (total charge: {:+})",
            compound.cation_count,
            compound.cation_symbol,
            compound.cation_subtotal_charge()
        ));
        lines.push(format!(
            "- {} {} ions (total charge: {:+})",
            compound.anion_count,
            compound.anion_symbol,
            compound.anion_subtotal_charge()
        ));
        lines.push(format!(
            "Total charge: {} (should be 0)",
            compound.net_charge()
        ));
        lines.push(String::new());
        lines.push(format!("Chemical formula: {}", compound.formula()));
        // The printed arithmetic uses the displayed (reduced) counts while
        // the total keeps the unreduced weighting; when a gcd reduction
        // happened the two sides of this equation deliberately disagree.
        lines.push(format!(
            "Molar mass calculation: ({:.4} g/mol x {}) + ({:.4} g/mol x {}) = {:.4} g/mol",
            compound.cation_mass,
            compound.cation_count,
            compound.anion_mass,
            compound.anion_count,
            compound.molar_mass
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::balance;
    use crate::models::Polarity;

    fn ion(symbol: &str, polarity: Polarity, charge: i64, mass: f64) -> Ion {
        Ion {
            symbol: symbol.to_string(),
            polarity,
            charge,
            atomic_mass: mass,
        }
    }

    #[test]
    fn one_to_one_report_mentions_the_ratio_and_formula() {
        let compound = balance(
            &ion("Na", Polarity::Cation, 1, 22.99),
            &ion("Cl", Polarity::Anion, -1, 35.45),
        )
        .unwrap();
        let report = build_report(&compound);
        assert!(report.iter().any(|line| line.contains("1:1 ratio")));
        assert!(report.iter().any(|line| line == "Chemical formula: NaCl"));
        assert!(report.iter().any(|line| line.contains("58.4400 g/mol")));
    }

    #[test]
    fn balancing_report_verifies_zero_net_charge() {
        let compound = balance(
            &ion("Ca", Polarity::Cation, 2, 40.08),
            &ion("Cl", Polarity::Anion, -1, 35.45),
        )
        .unwrap();
        let report = build_report(&compound);
        assert!(report.iter().any(|line| line.contains("Charge Balancing")));
        assert!(report
            .iter()
            .any(|line| line == "Total charge: 0 (should be 0)"));
        assert!(report.iter().any(|line| line == "Chemical formula: CaCl2"));
        assert!(report
            .iter()
            .any(|line| line.contains("- 2 Cl ions (total charge: -2)")));
    }
}
