mod basis;
mod error;
mod problem;
mod simplex;
mod solution;
mod tableau;

pub use error::{ShapeError, SolveError};
pub use problem::{Direction, LpProblem};
pub use simplex::{Solver, solve};
pub use solution::{Pivot, Solution, SolutionStatus};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_problem_from_json_is_validated() {
        let problem: LpProblem = serde_json::from_str(
            r#"{"objective": [5, 4], "constraints": [[6, 4], [1, 2]], "rhs": [24, 6], "direction": "maximize"}"#,
        )
        .unwrap();
        assert_eq!(problem.direction(), Direction::Maximize);
        assert_eq!(problem.num_constraints(), 2);

        let malformed = serde_json::from_str::<LpProblem>(
            r#"{"objective": [5, 4], "constraints": [[6]], "rhs": [24]}"#,
        );
        assert!(malformed.is_err());
    }

    #[test]
    fn test_solution_to_json() {
        let problem = LpProblem::minimize(vec![-1.0], vec![vec![2.0]], vec![3.0]).unwrap();
        let solution = Solver::new().solve(&problem).unwrap();

        let json = serde_json::to_value(&solution).unwrap();
        assert_eq!(json["objective_value"], -1.5);
        assert_eq!(json["values"], serde_json::json!([1.5]));
        assert_eq!(json["pivots"], serde_json::json!([{"row": 1, "column": 0}]));
    }
}
