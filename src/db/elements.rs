//! Element lookup. Unlike ion resolution this path applies no numeric
//! defaulting: every field comes back as nullable text and the UI renders
//! nulls with an explicit marker. The one fallback is the symbol itself,
//! which reuses the user's typed text when the stored value is missing.

use crate::models::{CatalogEntry, ElementRecord, ResolutionResult};

use super::gateway::{QueryError, QueryGateway};

/// Resolve a typed symbol to its element row.
pub fn resolve_element(store: &dyn QueryGateway, symbol: &str) -> ResolutionResult<ElementRecord> {
    let typed = symbol.trim();
    let lookup = typed.to_uppercase();

    let rows = match store.select(
        "SELECT Symbol, Charge, Name, AtomicWeight, AtomicNumber
         FROM Elements WHERE Symbol = ?1",
        &[&lookup],
    ) {
        Ok(rows) => rows,
        Err(err) => return ResolutionResult::QueryFailed(err.diagnostics),
    };

    let Some(row) = rows.first() else {
        return ResolutionResult::NotFound;
    };

    let field = |index: usize| row.get(index).cloned().flatten();
    ResolutionResult::Found(ElementRecord {
        symbol: field(0),
        charge: field(1),
        name: field(2),
        atomic_weight: field(3),
        atomic_number: field(4),
        typed_symbol: typed.to_string(),
    })
}

/// Uppercased form of a typed symbol, as used for the store lookup. "Not
/// found" messages quote this normalized spelling.
pub fn normalized_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// Every element ordered by atomic number, for the pick-list shown before
/// the symbol prompt.
pub fn list_elements(store: &dyn QueryGateway) -> Result<Vec<CatalogEntry>, QueryError> {
    let rows = store.select(
        "SELECT Symbol, Name FROM Elements ORDER BY AtomicNumber",
        &[],
    )?;
    Ok(rows
        .into_iter()
        .map(|mut row| CatalogEntry {
            symbol: row.first_mut().and_then(|field| field.take()),
            name: row.get_mut(1).and_then(|field| field.take()),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::seeded_store;

    #[test]
    fn found_element_carries_all_fields_as_text() {
        let conn = seeded_store();
        let ResolutionResult::Found(record) = resolve_element(&conn, "na") else {
            panic!("expected Found");
        };
        assert_eq!(record.symbol.as_deref(), Some("NA"));
        assert_eq!(record.name.as_deref(), Some("Sodium"));
        assert_eq!(record.atomic_number.as_deref(), Some("11"));
        assert_eq!(record.atomic_weight.as_deref(), Some("22.99"));
        assert_eq!(record.charge.as_deref(), Some("1"));
        assert_eq!(record.typed_symbol, "na");
        assert_eq!(record.display_symbol(), "NA");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let conn = seeded_store();
        let lower = resolve_element(&conn, "cl");
        let upper = resolve_element(&conn, "CL");
        let ResolutionResult::Found(lower_record) = &lower else {
            panic!("expected Found");
        };
        let ResolutionResult::Found(upper_record) = &upper else {
            panic!("expected Found");
        };
        // Same stored row; only the remembered input differs.
        assert_eq!(lower_record.symbol, upper_record.symbol);
        assert_eq!(lower_record.name, upper_record.name);
        assert_eq!(lower_record.typed_symbol, "cl");
        assert_eq!(upper_record.typed_symbol, "CL");
    }

    #[test]
    fn null_fields_stay_absent_without_defaulting() {
        // H is seeded with NULL charge.
        let conn = seeded_store();
        let ResolutionResult::Found(record) = resolve_element(&conn, "H") else {
            panic!("expected Found");
        };
        assert_eq!(record.charge, None);
        assert_eq!(record.name.as_deref(), Some("Hydrogen"));
    }

    #[test]
    fn null_stored_symbol_falls_back_to_typed_text() {
        use crate::db::gateway::{QueryError, QueryGateway, TextRow};
        use rusqlite::ToSql;

        // A store whose element row has no symbol of its own.
        struct AnonymousRowStore;
        impl QueryGateway for AnonymousRowStore {
            fn select(
                &self,
                _sql: &str,
                _params: &[&dyn ToSql],
            ) -> Result<Vec<TextRow>, QueryError> {
                Ok(vec![vec![
                    None,
                    None,
                    Some("Mystery".to_string()),
                    None,
                    None,
                ]])
            }
        }

        let ResolutionResult::Found(record) = resolve_element(&AnonymousRowStore, "zZ") else {
            panic!("expected Found");
        };
        assert_eq!(record.symbol, None);
        assert_eq!(record.display_symbol(), "zZ");
        assert_eq!(record.name.as_deref(), Some("Mystery"));
    }

    #[test]
    fn missing_symbol_reports_not_found() {
        let conn = seeded_store();
        assert_eq!(resolve_element(&conn, "Xx"), ResolutionResult::NotFound);
        assert_eq!(normalized_symbol(" xx "), "XX");
    }

    #[test]
    fn repeated_lookups_are_idempotent() {
        let conn = seeded_store();
        assert_eq!(resolve_element(&conn, "Na"), resolve_element(&conn, "Na"));
    }

    #[test]
    fn listing_orders_by_atomic_number() {
        let conn = seeded_store();
        let entries = list_elements(&conn).unwrap();
        let symbols: Vec<_> = entries
            .iter()
            .filter_map(|entry| entry.symbol.as_deref())
            .collect();
        let hydrogen = symbols.iter().position(|s| *s == "H").unwrap();
        let sodium = symbols.iter().position(|s| *s == "NA").unwrap();
        assert!(hydrogen < sodium);
    }
}
