use log::{debug, trace};

use crate::error::SolveError;
use crate::problem::{Direction, LpProblem};
use crate::solution::{Pivot, Solution, digits_for};
use crate::tableau::Tableau;

/// Lifecycle of a single solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SolverState {
    Built,
    Iterating,
    Optimal,
    Unbounded,
    IterationLimit,
}

/// Entering/leaving selection in effect for one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PivotRule {
    /// Most negative reduced cost; ties go to the lowest index
    Dantzig,
    /// First negative reduced cost; ratio ties go to the lowest basic column
    Bland,
}

/// Tableau simplex solver for `optimize c'x s.t. Ax <= b, x >= 0`
#[derive(Debug, Clone)]
pub struct Solver {
    /// Rounding resolution of reported values
    epsilon: f64,
    /// Absolute tolerance for sign tests; zero compares exactly
    tolerance: f64,
    /// Maximum pivots before giving up
    max_iterations: Option<usize>,
    /// Switch to Bland's rule after this many pivots
    bland_after: Option<usize>,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            epsilon: 1e-3,
            tolerance: 0.0,
            max_iterations: Some(10_000),
            bland_after: None,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Treat reduced costs above `-tol` as non-improving and pivot-column
    /// entries at or below `tol` as non-positive.
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// `None` lets the pivot loop run until it terminates on its own
    pub fn with_max_iterations(mut self, max: Option<usize>) -> Self {
        self.max_iterations = max;
        self
    }

    /// Fall back to Bland's anti-cycling rule once `pivots` pivots have been
    /// performed.
    pub fn with_bland_after(mut self, pivots: usize) -> Self {
        self.bland_after = Some(pivots);
        self
    }

    /// Solve the problem with the primal tableau simplex method
    pub fn solve(&self, problem: &LpProblem) -> Result<Solution, SolveError> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(SolveError::InvalidEpsilon {
                epsilon: self.epsilon,
            });
        }

        let mut tableau = Tableau::build(problem);
        debug!(
            "{:?}: vars: {}, constraints: {}, direction: {}",
            SolverState::Built,
            tableau.n_vars,
            tableau.n_constraints,
            problem.direction(),
        );

        let pivots = self.iterate(&mut tableau)?;
        let solution = Solution::extract(&tableau, problem.direction(), digits_for(self.epsilon), pivots);

        debug!(
            "{:?} after {} pivots: objective {}",
            SolverState::Optimal,
            solution.iterations,
            solution.objective_value
        );
        Ok(solution)
    }

    /// Pivot until no improving column remains
    fn iterate(&self, tableau: &mut Tableau) -> Result<Vec<Pivot>, SolveError> {
        let mut pivots = Vec::new();

        if let Some(col) = self.find_pivot_column(tableau, PivotRule::Dantzig) {
            debug!("{:?}: first entering column {}", SolverState::Iterating, col);
        }

        loop {
            let rule = match self.bland_after {
                Some(after) if pivots.len() >= after => PivotRule::Bland,
                _ => PivotRule::Dantzig,
            };

            let Some(col) = self.find_pivot_column(tableau, rule) else {
                return Ok(pivots);
            };

            if let Some(max) = self.max_iterations {
                if pivots.len() >= max {
                    debug!("{:?} at {} pivots", SolverState::IterationLimit, max);
                    return Err(SolveError::IterationLimit { iterations: max });
                }
            }

            let Some(row) = self.find_pivot_row(tableau, col, rule) else {
                debug!("{:?}: column {} has no leaving row", SolverState::Unbounded, col);
                return Err(SolveError::Unbounded { column: col });
            };

            trace!(
                "pivot {} ({:?}): column {} enters at row {}, replacing column {}",
                pivots.len() + 1,
                rule,
                col,
                row,
                tableau.basis.column_of(row),
            );
            tableau.pivot(row, col);
            pivots.push(Pivot { row, column: col });
        }
    }

    fn find_pivot_column(&self, tableau: &Tableau, rule: PivotRule) -> Option<usize> {
        let row = tableau.objective_row();
        let threshold = -self.tolerance;

        match rule {
            PivotRule::Dantzig => {
                let mut min_val = row[0];
                let mut min_col = 0;
                for (j, &value) in row.iter().enumerate() {
                    if value < min_val {
                        min_val = value;
                        min_col = j;
                    }
                }
                (min_val < threshold).then_some(min_col)
            }
            PivotRule::Bland => row.iter().position(|&value| value < threshold),
        }
    }

    /// Minimum-ratio test over rows with a positive entry in `col`
    fn find_pivot_row(&self, tableau: &Tableau, col: usize, rule: PivotRule) -> Option<usize> {
        let mut min_ratio = f64::INFINITY;
        let mut min_row: Option<usize> = None;

        for i in 1..=tableau.n_constraints {
            let val = tableau.data[i][col];
            if val <= self.tolerance {
                continue;
            }
            let ratio = tableau.rhs[i - 1] / val;
            if ratio < 0.0 {
                continue;
            }

            let better = match min_row {
                None => true,
                Some(_) if ratio < min_ratio => true,
                Some(current) => {
                    rule == PivotRule::Bland
                        && ratio == min_ratio
                        && tableau.basis.column_of(i) < tableau.basis.column_of(current)
                }
            };
            if better {
                min_ratio = ratio;
                min_row = Some(i);
            }
        }

        min_row
    }
}

/// Solve `optimize c'x s.t. Ax <= b, x >= 0` in one call.
///
/// `epsilon` is the rounding resolution of the reported values.
pub fn solve(
    objective: Vec<f64>,
    constraints: Vec<Vec<f64>>,
    rhs: Vec<f64>,
    direction: Direction,
    epsilon: f64,
) -> Result<Solution, SolveError> {
    let problem = LpProblem::new(objective, constraints, rhs, direction)?;
    Solver::new().with_epsilon(epsilon).solve(&problem)
}
