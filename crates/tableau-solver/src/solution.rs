use std::fmt;

use crate::problem::Direction;
use crate::tableau::Tableau;

/// The result of solving an LP problem
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Optimal objective value, in the caller's sign convention
    pub objective_value: f64,
    /// Optimal values for each decision variable
    pub values: Vec<f64>,
    /// Number of pivots performed
    pub iterations: usize,
    /// Pivot sequence, in the order it was applied
    pub pivots: Vec<Pivot>,
    /// Tableau row holding each decision variable, `None` when non-basic
    pub basis: Vec<Option<usize>>,
}

/// One Gauss-Jordan step: `column` entered the basis at tableau `row`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pivot {
    pub row: usize,
    pub column: usize,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// An optimal solution was found
    Optimal,
    /// The objective improves without limit
    Unbounded,
    /// The problem dimensions do not agree
    ShapeError,
    /// The pivot loop hit its iteration cap
    IterationLimit,
    /// Solver configuration was rejected
    InvalidInput,
}

impl Solution {
    pub(crate) fn extract(
        tableau: &Tableau,
        direction: Direction,
        digits: i32,
        pivots: Vec<Pivot>,
    ) -> Self {
        let basis: Vec<Option<usize>> = (0..tableau.n_vars)
            .map(|j| tableau.basis.row_of(j))
            .collect();

        let values = basis
            .iter()
            .map(|row| match row {
                Some(row) => round_to(tableau.rhs[row - 1], digits),
                None => 0.0,
            })
            .collect();

        // `solution` accumulates c'x for a maximization and -c'x for a
        // minimization, since row 0 starts out as -c and c respectively.
        let objective = if direction.is_maximize() {
            tableau.solution
        } else {
            -tableau.solution
        };

        Self {
            objective_value: round_to(objective, digits),
            values,
            iterations: pivots.len(),
            pivots,
            basis,
        }
    }

    pub fn status(&self) -> SolutionStatus {
        SolutionStatus::Optimal
    }
}

/// Number of decimal digits kept for a rounding resolution `eps`
pub(crate) fn digits_for(epsilon: f64) -> i32 {
    (-epsilon.log10()).round() as i32
}

/// Round to `digits` decimals with ties to even; negative zero becomes zero.
///
/// Values with no fractional part left at that resolution, or whose scaled
/// form overflows, are returned unchanged.
pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    const EXACT: f64 = 4_503_599_627_370_496.0; // 2^52

    let scale = 10f64.powi(digits);
    let scaled = value * scale;
    let rounded = if !scaled.is_finite() || scaled.abs() >= EXACT {
        value
    } else {
        scaled.round_ties_even() / scale
    };
    if rounded == 0.0 { 0.0 } else { rounded }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.objective_value)?;
        write!(f, "[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}
