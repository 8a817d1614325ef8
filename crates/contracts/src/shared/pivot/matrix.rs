use serde::{Deserialize, Serialize};

/// Dense two-dimensional pivot: `cells[row][column]`.
///
/// Keys are ordered ascending. A cell with no source value is `None`
/// (serialized as `null`), which is not the same as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotMatrix<R, C> {
    pub row_keys: Vec<R>,
    pub column_keys: Vec<C>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl<R, C> PivotMatrix<R, C> {
    pub fn empty() -> Self {
        Self {
            row_keys: Vec::new(),
            column_keys: Vec::new(),
            cells: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_keys.is_empty()
    }
}

impl<R: PartialEq, C: PartialEq> PivotMatrix<R, C> {
    /// Cell lookup by keys; `None` for unknown keys or empty cells
    pub fn get(&self, row: &R, column: &C) -> Option<f64> {
        let r = self.row_keys.iter().position(|k| k == row)?;
        let c = self.column_keys.iter().position(|k| k == column)?;
        self.cells.get(r).and_then(|cells| cells.get(c)).copied().flatten()
    }
}
