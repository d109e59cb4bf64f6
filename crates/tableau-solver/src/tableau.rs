use crate::basis::Basis;
use crate::problem::LpProblem;

/// Owned iteration state of one solve.
///
/// `data` has `m + 1` rows and `n + m` columns. Row 0 is the objective row,
/// stored in minimization form; rows `1..=m` are the constraints with their
/// slack identity block. `rhs[i - 1]` belongs to row `i` and `solution` is the
/// objective row's accumulated value.
#[derive(Debug, Clone)]
pub(crate) struct Tableau {
    pub(crate) data: Vec<Vec<f64>>,
    pub(crate) rhs: Vec<f64>,
    pub(crate) solution: f64,
    pub(crate) basis: Basis,
    pub(crate) n_vars: usize,
    pub(crate) n_constraints: usize,
}

impl Tableau {
    pub(crate) fn build(problem: &LpProblem) -> Self {
        let n_vars = problem.num_variables();
        let n_constraints = problem.num_constraints();
        let n_cols = n_vars + n_constraints;

        let mut data = Vec::with_capacity(n_constraints + 1);

        // The engine minimizes, so a maximization objective is negated
        let sign = if problem.direction().is_maximize() { -1.0 } else { 1.0 };
        let mut objective_row = vec![0.0; n_cols];
        for (j, &c) in problem.objective().iter().enumerate() {
            objective_row[j] = sign * c;
        }
        data.push(objective_row);

        for (i, coefficients) in problem.constraints().iter().enumerate() {
            let mut row = vec![0.0; n_cols];
            row[..n_vars].copy_from_slice(coefficients);
            row[n_vars + i] = 1.0;
            data.push(row);
        }

        Self {
            data,
            rhs: problem.rhs().to_vec(),
            solution: 0.0,
            basis: Basis::slack(n_vars, n_constraints),
            n_vars,
            n_constraints,
        }
    }

    pub(crate) fn objective_row(&self) -> &[f64] {
        &self.data[0]
    }

    /// Gauss-Jordan step on `(row, col)`. After it, `col` is a unit column
    /// with its 1 in `row`, and `col` is recorded as basic there.
    pub(crate) fn pivot(&mut self, row: usize, col: usize) {
        let pivot_val = self.data[row][col];
        for value in self.data[row].iter_mut() {
            *value /= pivot_val;
        }
        self.rhs[row - 1] /= pivot_val;

        self.basis.enter(col, row);

        let pivot_row = std::mem::take(&mut self.data[row]);
        let pivot_rhs = self.rhs[row - 1];

        for (i, current) in self.data.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = current[col];
            if factor == 0.0 {
                continue;
            }
            for (value, &p) in current.iter_mut().zip(&pivot_row) {
                *value -= factor * p;
            }
            if i == 0 {
                self.solution -= factor * pivot_rhs;
            } else {
                self.rhs[i - 1] -= factor * pivot_rhs;
            }
        }

        self.data[row] = pivot_row;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_one() -> LpProblem {
        LpProblem::maximize(
            vec![5.0, 4.0],
            vec![
                vec![6.0, 4.0],
                vec![1.0, 2.0],
                vec![-1.0, 2.0],
                vec![0.0, 1.0],
            ],
            vec![24.0, 6.0, 1.0, 2.0],
        )
        .unwrap()
    }

    #[test]
    fn test_build_maximization() {
        let tableau = Tableau::build(&scenario_one());

        assert_eq!(tableau.data.len(), 5);
        assert_eq!(tableau.data[0].len(), 6);
        assert_eq!(tableau.objective_row(), &[-5.0, -4.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(tableau.data[1], vec![6.0, 4.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(tableau.data[3], vec![-1.0, 2.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(tableau.data[4], vec![0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(tableau.rhs, vec![24.0, 6.0, 1.0, 2.0]);
        assert_eq!(tableau.solution, 0.0);
        assert_eq!(tableau.basis.row_of(0), None);
        assert_eq!(tableau.basis.row_of(2), Some(1));
    }

    #[test]
    fn test_build_minimization_keeps_sign() {
        let problem = LpProblem::minimize(vec![-2.0, 2.0], vec![vec![1.0, 1.0]], vec![3.0]).unwrap();
        let tableau = Tableau::build(&problem);
        assert_eq!(tableau.objective_row(), &[-2.0, 2.0, 0.0]);
    }

    #[test]
    fn test_pivot_makes_unit_column() {
        let mut tableau = Tableau::build(&scenario_one());
        tableau.pivot(1, 0);

        for (i, row) in tableau.data.iter().enumerate() {
            let expected = if i == 1 { 1.0 } else { 0.0 };
            assert_eq!(row[0], expected, "row {i}");
        }
        assert_eq!(tableau.rhs[0], 4.0);
        // x1 = 4 improves 5*x1 by 20
        assert_eq!(tableau.solution, 20.0);
        assert_eq!(tableau.rhs[1], 2.0);
        assert_eq!(tableau.rhs[2], 5.0);
        assert_eq!(tableau.rhs[3], 2.0);
        assert_eq!(tableau.basis.row_of(0), Some(1));
        assert_eq!(tableau.basis.row_of(2), None);
    }
}
