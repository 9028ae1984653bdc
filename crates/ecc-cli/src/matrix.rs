//! Parsing of matrices written on the command line.
//!
//! Rows are separated by `;` and entries by `,` or whitespace, so
//! `"1,0,5; 0,1,5; 0,0,1"` is a 3x3 matrix.

use anyhow::{bail, Context, Result};
use nalgebra::DMatrix;

/// Parse a matrix literal.
pub fn parse_matrix(text: &str) -> Result<DMatrix<f64>> {
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (r, row) in text.split(';').enumerate() {
        let values = row
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<f64>()
                    .with_context(|| format!("row {}: invalid number {:?}", r + 1, s))
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(values);
    }

    // A lone empty row is an empty matrix; a trailing `;` is tolerated.
    if rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }

    let ncols = rows.first().map_or(0, Vec::len);
    if let Some((r, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != ncols) {
        bail!(
            "row {} has {} entries, expected {}",
            r + 1,
            row.len(),
            ncols
        );
    }

    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    let nrows = if ncols == 0 { 0 } else { flat.len() / ncols };
    Ok(DMatrix::from_row_slice(nrows, ncols, &flat))
}
