use std::cmp::max;

/// Collects rows of cells and renders them with each column padded to its
/// widest cell. Rows may have different lengths.
#[derive(Default, Debug, Clone)]
pub(crate) struct Table {
    column_widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub(crate) fn push_row(&mut self, row: Vec<String>) {
        if row.len() > self.column_widths.len() {
            self.column_widths.resize(row.len(), 0);
        }
        self.column_widths
            .iter_mut()
            .zip(&row)
            .for_each(|(width, cell)| *width = max(*width, cell.chars().count()));
        self.rows.push(row);
    }

    pub(crate) fn to_string(&self, sep: &str) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&self.column_widths)
                    .map(|(cell, width)| format!("{cell:<w$}{sep}", w = *width))
                    .collect::<Vec<_>>()
                    .join("")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
