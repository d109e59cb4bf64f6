use std::fmt;

use crate::error::ShapeError;

/// Optimization direction
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Maximize,
    Minimize,
}

impl Direction {
    pub fn is_maximize(self) -> bool {
        matches!(self, Direction::Maximize)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Maximize => write!(f, "max"),
            Direction::Minimize => write!(f, "min"),
        }
    }
}

/// A linear program `optimize c'x subject to Ax <= b, x >= 0`.
///
/// Built once through [`LpProblem::new`], which checks the shape; the
/// problem is read-only afterwards.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawProblem"))]
#[derive(Debug, Clone, PartialEq)]
pub struct LpProblem {
    /// Objective function coefficients, one per decision variable
    objective: Vec<f64>,
    /// Constraint coefficient rows
    constraints: Vec<Vec<f64>>,
    /// Right-hand side value of each constraint
    rhs: Vec<f64>,
    direction: Direction,
}

impl LpProblem {
    pub fn new(
        objective: Vec<f64>,
        constraints: Vec<Vec<f64>>,
        rhs: Vec<f64>,
        direction: Direction,
    ) -> Result<Self, ShapeError> {
        if objective.is_empty() {
            return Err(ShapeError::EmptyObjective);
        }
        if constraints.is_empty() {
            return Err(ShapeError::NoConstraints);
        }

        let n = objective.len();
        if let Some((row, found)) = constraints
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != n)
        {
            return Err(ShapeError::RowLength { row, expected: n, found });
        }

        if rhs.len() != constraints.len() {
            return Err(ShapeError::RhsLength {
                expected: constraints.len(),
                found: rhs.len(),
            });
        }

        Ok(Self {
            objective,
            constraints,
            rhs,
            direction,
        })
    }

    pub fn maximize(
        objective: Vec<f64>,
        constraints: Vec<Vec<f64>>,
        rhs: Vec<f64>,
    ) -> Result<Self, ShapeError> {
        Self::new(objective, constraints, rhs, Direction::Maximize)
    }

    pub fn minimize(
        objective: Vec<f64>,
        constraints: Vec<Vec<f64>>,
        rhs: Vec<f64>,
    ) -> Result<Self, ShapeError> {
        Self::new(objective, constraints, rhs, Direction::Minimize)
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn constraints(&self) -> &[Vec<f64>] {
        &self.constraints
    }

    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Objective value `c'x` of a candidate point, in the caller's sign
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        dot(&self.objective, values)
    }

    /// Left-hand side `Ax` of every constraint for a candidate point
    pub fn constraint_activity(&self, values: &[f64]) -> Vec<f64> {
        self.constraints.iter().map(|row| dot(row, values)).collect()
    }
}

fn dot(coefficients: &[f64], values: &[f64]) -> f64 {
    coefficients
        .iter()
        .zip(values)
        .map(|(c, x)| c * x)
        .sum()
}

/// Writes `c1*x1 + c2*x2 - c3*x3`, with a leading minus kept on the first term
fn write_linear(f: &mut fmt::Formatter<'_>, coefficients: &[f64]) -> fmt::Result {
    for (i, &c) in coefficients.iter().enumerate() {
        let var = i + 1;
        match (i, c >= 0.0) {
            (0, _) => write!(f, "{c}*x{var}")?,
            (_, true) => write!(f, " + {c}*x{var}")?,
            (_, false) => write!(f, " - {}*x{var}", -c)?,
        }
    }
    Ok(())
}

impl fmt::Display for LpProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} z = ", self.direction)?;
        write_linear(f, &self.objective)?;
        writeln!(f)?;
        write!(f, "subject to the constraints:")?;
        for (row, b) in self.constraints.iter().zip(&self.rhs) {
            writeln!(f)?;
            write_linear(f, row)?;
            write!(f, " <= {b}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawProblem {
    objective: Vec<f64>,
    constraints: Vec<Vec<f64>>,
    rhs: Vec<f64>,
    #[serde(default)]
    direction: Direction,
}

#[cfg(feature = "serde")]
impl TryFrom<RawProblem> for LpProblem {
    type Error = ShapeError;

    fn try_from(raw: RawProblem) -> Result<Self, Self::Error> {
        LpProblem::new(raw.objective, raw.constraints, raw.rhs, raw.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_length_mismatch() {
        let err = LpProblem::maximize(vec![1.0, 2.0], vec![vec![1.0, 1.0], vec![1.0]], vec![4.0, 3.0])
            .unwrap_err();
        assert_eq!(err, ShapeError::RowLength { row: 1, expected: 2, found: 1 });
    }

    #[test]
    fn test_rhs_length_mismatch() {
        let err = LpProblem::minimize(vec![1.0], vec![vec![1.0], vec![2.0]], vec![4.0]).unwrap_err();
        assert_eq!(err, ShapeError::RhsLength { expected: 2, found: 1 });
    }

    #[test]
    fn test_empty_problem() {
        assert_eq!(
            LpProblem::maximize(vec![], vec![vec![]], vec![1.0]).unwrap_err(),
            ShapeError::EmptyObjective
        );
        assert_eq!(
            LpProblem::maximize(vec![1.0], vec![], vec![]).unwrap_err(),
            ShapeError::NoConstraints
        );
    }

    #[test]
    fn test_negative_rhs_is_accepted() {
        let problem = LpProblem::maximize(vec![1.0], vec![vec![1.0]], vec![-3.0]).unwrap();
        assert_eq!(problem.rhs(), &[-3.0]);
    }

    #[test]
    fn test_evaluate_and_activity() {
        let problem = LpProblem::maximize(
            vec![5.0, 4.0],
            vec![vec![6.0, 4.0], vec![1.0, 2.0]],
            vec![24.0, 6.0],
        )
        .unwrap();

        assert_eq!(problem.evaluate(&[3.0, 1.5]), 21.0);
        assert_eq!(problem.constraint_activity(&[3.0, 1.5]), vec![24.0, 6.0]);
    }

    #[test]
    fn test_display() {
        let problem = LpProblem::minimize(
            vec![-2.0, 2.0, -6.0],
            vec![vec![2.0, 1.0, -2.0], vec![1.0, 2.0, 4.0]],
            vec![24.0, 23.0],
        )
        .unwrap();

        let expected = "min z = -2*x1 + 2*x2 - 6*x3\n\
                        subject to the constraints:\n\
                        2*x1 + 1*x2 - 2*x3 <= 24\n\
                        1*x1 + 2*x2 + 4*x3 <= 23";
        assert_eq!(problem.to_string(), expected);
    }
}
