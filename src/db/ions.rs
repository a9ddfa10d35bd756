//! Ion resolution against the cation/anion relations. Lookups normalize the
//! symbol to uppercase while the returned `Ion` keeps the typed casing for
//! display. Missing or unreadable numeric fields are substituted with
//! documented defaults rather than failing: the store is best-effort data
//! and the calculation should keep going. That substitution is silent and
//! intentional, even though it can mask genuinely malformed rows.

use crate::models::{CatalogEntry, Ion, Polarity, ResolutionResult};

use super::gateway::{QueryError, QueryGateway};

/// Atomic mass substituted when the stored weight is null or unparseable.
const DEFAULT_ATOMIC_MASS: f64 = 1.0;

/// Resolve a typed symbol to an `Ion` in the relation selected by `polarity`.
///
/// Charge magnitude zero is not rejected here; the balancer owns sign
/// validation and wants to cite the stored value in its error message.
pub fn resolve_ion(
    store: &dyn QueryGateway,
    symbol: &str,
    polarity: Polarity,
) -> ResolutionResult<Ion> {
    let typed = symbol.trim();
    let lookup = typed.to_uppercase();
    let sql = format!(
        "SELECT Charge, AtomicWeight FROM {} WHERE Symbol = ?1",
        polarity.table_name()
    );

    let rows = match store.select(&sql, &[&lookup]) {
        Ok(rows) => rows,
        Err(err) => return ResolutionResult::QueryFailed(err.diagnostics),
    };

    let Some(row) = rows.first() else {
        return ResolutionResult::NotFound;
    };

    let charge = row
        .first()
        .and_then(|field| field.as_deref())
        .and_then(parse_charge)
        .unwrap_or_else(|| polarity.default_charge());
    let atomic_mass = row
        .get(1)
        .and_then(|field| field.as_deref())
        .and_then(parse_mass)
        .unwrap_or(DEFAULT_ATOMIC_MASS);

    ResolutionResult::Found(Ion {
        symbol: typed.to_string(),
        polarity,
        charge,
        atomic_mass,
    })
}

/// Parse a stored charge. The store keeps charges as loosely typed text, so
/// the value is read as a real and truncated toward zero; fractional charge
/// text still yields an integer charge.
fn parse_charge(text: &str) -> Option<i64> {
    text.trim().parse::<f64>().ok().map(|value| value.trunc() as i64)
}

fn parse_mass(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Every ion in the relation for `polarity`, ordered by symbol. Feeds the
/// pick-list shown before the symbol prompt.
pub fn list_ions(
    store: &dyn QueryGateway,
    polarity: Polarity,
) -> Result<Vec<CatalogEntry>, QueryError> {
    let sql = format!(
        "SELECT Symbol, Name FROM {} ORDER BY Symbol",
        polarity.table_name()
    );
    let rows = store.select(&sql, &[])?;
    Ok(rows
        .into_iter()
        .map(|mut row| CatalogEntry {
            symbol: row.first_mut().and_then(Option::take),
            name: row.get_mut(1).and_then(Option::take),
        })
        .collect())
}
