/// Tracks which column is basic in which tableau row.
///
/// Rows are numbered as in the tableau: row 0 is the objective row and never
/// holds a basic variable, so constraint rows are `1..=m`. A column that is not
/// basic maps to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basis {
    /// column -> owning row
    rows: Vec<Option<usize>>,
    /// row - 1 -> basic column
    columns: Vec<usize>,
}

impl Basis {
    /// Initial slack basis: slack column `n + i` is basic in row `i + 1`.
    pub fn slack(num_variables: usize, num_constraints: usize) -> Self {
        let mut rows = vec![None; num_variables + num_constraints];
        for i in 0..num_constraints {
            rows[num_variables + i] = Some(i + 1);
        }
        Self {
            rows,
            columns: (num_variables..num_variables + num_constraints).collect(),
        }
    }

    /// Row currently holding `column` as basic
    pub fn row_of(&self, column: usize) -> Option<usize> {
        self.rows.get(column).copied().flatten()
    }

    /// Basic column of constraint row `row` (1-based)
    pub fn column_of(&self, row: usize) -> usize {
        self.columns[row - 1]
    }

    /// Make `column` basic in `row`, evicting whichever column held it before.
    /// Returns the evicted column.
    pub fn enter(&mut self, column: usize, row: usize) -> usize {
        let leaving = std::mem::replace(&mut self.columns[row - 1], column);
        self.rows[leaving] = None;
        self.rows[column] = Some(row);
        leaving
    }
}
