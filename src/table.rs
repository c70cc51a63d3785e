//! Tabular extraction from a resolved fragment.

use scraper::{Html, Selector};

use crate::dom::Fragment;
use crate::util;

/// Ordered rows of ordered cell values extracted from a table-like fragment.
///
/// Rows are `tr` elements top-to-bottom; cells are `td`/`th` left-to-right
/// with whitespace-normalized text content. Derived per export, never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Walk the fragment's table rows and collect cell text.
    pub fn extract(fragment: &Fragment) -> Table {
        let row_selector = Selector::parse("tr").expect("constant selector");
        let cell_selector = Selector::parse("td, th").expect("constant selector");

        let parsed = Html::parse_fragment(fragment.markup());
        let rows = parsed
            .select(&row_selector)
            .map(|row| {
                row.select(&cell_selector)
                    .map(|cell| {
                        let text: String = cell.text().collect::<Vec<_>>().join(" ");
                        util::normalize_ws(&text)
                    })
                    .collect()
            })
            .collect();

        Table { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first row, conventionally the header row.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows after the header row.
    pub fn body(&self) -> &[Vec<String>] {
        if self.rows.is_empty() {
            &[]
        } else {
            &self.rows[1..]
        }
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<Vec<String>>) -> Table {
        Table { rows }
    }
}
