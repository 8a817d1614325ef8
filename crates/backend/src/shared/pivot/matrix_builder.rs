use contracts::shared::pivot::{AggregateFunction, PivotMatrix};
use std::collections::{BTreeMap, BTreeSet};

/// Running state of one pivot cell
#[derive(Debug, Clone, Copy)]
struct CellAccumulator {
    sum: f64,
    count: usize,
    last: f64,
    min: f64,
    max: f64,
}

impl CellAccumulator {
    fn new(value: f64) -> Self {
        Self {
            sum: value,
            count: 1,
            last: value,
            min: value,
            max: value,
        }
    }

    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
        self.last = value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn finish(&self, aggregate: AggregateFunction) -> f64 {
        match aggregate {
            AggregateFunction::Mean => self.sum / self.count as f64,
            AggregateFunction::Last => self.last,
            AggregateFunction::Min => self.min,
            AggregateFunction::Max => self.max,
            AggregateFunction::Sum => self.sum,
        }
    }
}

/// Builder pivoting `(row, column, value)` triples into a dense matrix
pub struct MatrixBuilder<R, C> {
    aggregate: AggregateFunction,
    cells: BTreeMap<(R, C), CellAccumulator>,
}

impl<R: Ord + Clone, C: Ord + Clone> MatrixBuilder<R, C> {
    /// Create a new matrix builder
    pub fn new(aggregate: AggregateFunction) -> Self {
        Self {
            aggregate,
            cells: BTreeMap::new(),
        }
    }

    /// Add one value; repeated keys are combined by the aggregate
    pub fn push(&mut self, row: R, column: C, value: f64) {
        self.cells
            .entry((row, column))
            .and_modify(|cell| cell.push(value))
            .or_insert_with(|| CellAccumulator::new(value));
    }

    /// Build the matrix with ascending row and column keys
    pub fn build(self) -> PivotMatrix<R, C> {
        if self.cells.is_empty() {
            return PivotMatrix::empty();
        }

        // Map keys are sorted by row first, so equal rows are adjacent
        let mut row_keys: Vec<R> = self.cells.keys().map(|(r, _)| r.clone()).collect();
        row_keys.dedup();
        let column_keys: Vec<C> = self
            .cells
            .keys()
            .map(|(_, c)| c.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut cells = vec![vec![None; column_keys.len()]; row_keys.len()];
        for ((row, column), accumulator) in &self.cells {
            if let (Ok(r), Ok(c)) = (row_keys.binary_search(row), column_keys.binary_search(column)) {
                cells[r][c] = Some(accumulator.finish(self.aggregate));
            }
        }

        PivotMatrix {
            row_keys,
            column_keys,
            cells,
        }
    }
}
