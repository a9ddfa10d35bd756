//! Domain models shared between the persistence layer, the balancer, and the
//! TUI. These types stay light-weight data holders so the other layers can
//! focus on query execution and presentation. The commentary captures the
//! null-handling and casing assumptions so later refactors can reconstruct
//! them without digging through the resolvers.

use std::fmt;

/// Marker text shown to the user when a stored field is SQL NULL. Element
/// lookups display nulls verbatim instead of substituting values, so the
/// marker itself is part of the observable output.
pub const NULL_MARKER: &str = "NULL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Whether an ion lookup targets the cation or the anion relation. The
/// polarity also determines the default charge substituted when the stored
/// charge is null or unparseable.
pub enum Polarity {
    Cation,
    Anion,
}

impl Polarity {
    /// Relation queried for this polarity. Table names are fixed strings, so
    /// they may be interpolated into statement text; symbol values never are.
    pub fn table_name(self) -> &'static str {
        match self {
            Polarity::Cation => "Cations",
            Polarity::Anion => "Anions",
        }
    }

    /// Best-effort charge used when the stored value cannot be read. Cations
    /// fall back to +1, anions to -1.
    pub fn default_charge(self) -> i64 {
        match self {
            Polarity::Cation => 1,
            Polarity::Anion => -1,
        }
    }

    /// Noun used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Polarity::Cation => "Cation",
            Polarity::Anion => "Anion",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A resolved ion, produced per request and never persisted. `symbol` keeps
/// the casing the user typed; lookups run against the uppercased copy.
pub struct Ion {
    /// Display symbol exactly as typed by the user.
    pub symbol: String,
    /// Which relation the ion came from.
    pub polarity: Polarity,
    /// Signed charge. Cations must resolve positive and anions negative, but
    /// that invariant is enforced by the balancer, not here: a zero or
    /// wrong-sign charge in the store flows through resolution untouched.
    pub charge: i64,
    /// Atomic mass in g/mol. Defaults to 1.0 when the store has no usable
    /// value.
    pub atomic_mass: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Row returned by element lookup. Every stored field stays as nullable text:
/// element display never substitutes defaults, it shows the null marker
/// instead.
pub struct ElementRecord {
    /// Symbol as stored, when present.
    pub symbol: Option<String>,
    /// Charge as raw text; elements may legitimately have no charge recorded.
    pub charge: Option<String>,
    pub name: Option<String>,
    pub atomic_weight: Option<String>,
    pub atomic_number: Option<String>,
    /// The literal text the user typed, kept so display can fall back to it
    /// when the stored symbol is null or empty.
    pub typed_symbol: String,
}

impl ElementRecord {
    /// Symbol shown to the user: the stored value when present and non-empty,
    /// otherwise the text they typed.
    pub fn display_symbol(&self) -> &str {
        match self.symbol.as_deref() {
            Some(stored) if !stored.is_empty() => stored,
            _ => &self.typed_symbol,
        }
    }
}

/// Render a nullable text field for display, substituting the null marker.
pub fn display_or_null(field: Option<&str>) -> &str {
    field.unwrap_or(NULL_MARKER)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One line of the "available elements/ions" pick-lists shown before each
/// prompt. Both fields are nullable because the store may hold partial rows;
/// display substitutes the null marker.
pub struct CatalogEntry {
    pub symbol: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Tagged outcome of a store lookup. Element and ion resolution both return
/// this shape so callers branch on the same three cases. `PartialEq` is
/// derived so repeated lookups against an unchanged store can be compared
/// directly.
pub enum ResolutionResult<T> {
    /// A matching row existed and was converted into a value.
    Found(T),
    /// No row matched the normalized symbol. Not a system error.
    NotFound,
    /// The statement itself failed; carries the joined diagnostic records.
    QueryFailed(String),
}

impl<T> ResolutionResult<T> {
    /// Convenience used by the UI flows and tests.
    pub fn is_found(&self) -> bool {
        matches!(self, ResolutionResult::Found(_))
    }
}
