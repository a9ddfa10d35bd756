use ratatui::text::Line;

use crate::models::{display_or_null, CatalogEntry};

/// Render one pick-list row as `Symbol     | Name`, with null markers for
/// partial rows.
pub(crate) fn catalog_line(entry: &CatalogEntry) -> String {
    format!(
        "{:<10} | {}",
        display_or_null(entry.symbol.as_deref()),
        display_or_null(entry.name.as_deref())
    )
}

/// Turn plain report lines into owned ratatui lines.
pub(crate) fn text_lines(lines: &[String]) -> Vec<Line<'static>> {
    lines.iter().map(|line| Line::from(line.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_line_pads_and_marks_nulls() {
        let entry = CatalogEntry {
            symbol: Some("NA".to_string()),
            name: None,
        };
        assert_eq!(catalog_line(&entry), "NA         | NULL");
    }
}
