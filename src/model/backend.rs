//! Lowering to `good_lp` and solving with the pure-Rust `microlp` backend.

use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable, constraint,
    microlp, variable,
};
use log::{debug, warn};

use super::{BoneMarketModel, LinearExpr, Literal, VarId};
use crate::error::{BoneMarketError, Result};

/// Integer values for every variable of a solved model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<i64>,
}

impl Assignment {
    pub fn value(&self, var: VarId) -> i64 {
        self.values[var.0]
    }

    pub fn evaluate(&self, expr: &LinearExpr) -> i64 {
        expr.evaluate(&self.values) as i64
    }

    pub fn literal(&self, literal: Literal) -> bool {
        (self.value(literal.var) != 0) != literal.negated
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Assignment),
    Infeasible,
}

fn expression(expr: &LinearExpr, variables: &[Variable]) -> Expression {
    let mut lowered = Expression::default();
    for (var, c) in expr.terms() {
        lowered += variables[var.0] * c as f64;
    }
    lowered
}

impl BoneMarketModel {
    /// Maximise `objective` over the model.
    ///
    /// The assignment is rounded to integers and checked against every row in
    /// exact arithmetic. An assignment that breaks any row is an error.
    pub fn maximise(&self, objective: &LinearExpr) -> Result<Outcome> {
        let mut problem = ProblemVariables::new();
        let variables: Vec<Variable> = self
            .variables()
            .iter()
            .map(|v| {
                problem.add(
                    variable()
                        .integer()
                        .min(v.min as f64)
                        .max(v.max as f64)
                        .name(v.name.clone()),
                )
            })
            .collect();

        let rows = self.lowered_rows();
        debug!(
            "lowered model: {} variables, {} rows",
            variables.len(),
            rows.len()
        );

        let mut lp = problem
            .maximise(expression(objective, &variables))
            .using(microlp);

        for row in &rows {
            let lhs = expression(&row.expr, &variables);
            let constant = row.expr.constant_term();
            match (row.min, row.max) {
                (Some(min), Some(max)) if min == max => {
                    let rhs = (max - constant) as f64;
                    lp.add_constraint(constraint!(lhs == rhs));
                }
                (min, max) => {
                    if let Some(max) = max {
                        let rhs = (max - constant) as f64;
                        lp.add_constraint(constraint!(lhs.clone() <= rhs));
                    }
                    if let Some(min) = min {
                        let rhs = (min - constant) as f64;
                        lp.add_constraint(constraint!(lhs >= rhs));
                    }
                }
            }
        }

        let solution = match lp.solve() {
            Ok(solution) => solution,
            Err(ResolutionError::Infeasible) => return Ok(Outcome::Infeasible),
            Err(ResolutionError::Unbounded) => {
                return Err(BoneMarketError::UnexpectedStatus("UNBOUNDED".to_string()));
            }
            Err(other) => return Err(BoneMarketError::UnexpectedStatus(other.to_string())),
        };

        let values: Vec<i64> = variables
            .iter()
            .map(|v| solution.value(*v).round() as i64)
            .collect();

        self.check_assignment(values).map(Outcome::Solved)
    }

    /// Accept `values` only if they keep every variable in bounds and satisfy
    /// every row whose enforcement literals all hold.
    pub fn check_assignment(&self, values: Vec<i64>) -> Result<Assignment> {
        if values.len() != self.num_variables() {
            return Err(BoneMarketError::UnexpectedStatus(format!(
                "MODEL_INVALID: {} values for {} variables",
                values.len(),
                self.num_variables()
            )));
        }

        let broken = self.violations(&values);
        if let Some(first) = broken.first() {
            for violation in &broken {
                warn!("assignment breaks {violation}");
            }
            return Err(BoneMarketError::UnexpectedStatus(format!(
                "MODEL_INVALID: solver assignment breaks {} constraints, first {first}",
                broken.len()
            )));
        }

        Ok(Assignment { values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Compare;

    #[test]
    fn test_maximise_simple_program() {
        let mut model = BoneMarketModel::new();
        let x = model.new_int_var("x", 0, 10);
        let y = model.new_int_var("y", 0, 10);
        model.add((x + y).at_most(7));
        model.add((x - y).at_least(1));

        match model.maximise(&(3 * x + 2 * y)) {
            Ok(Outcome::Solved(assignment)) => {
                assert_eq!(assignment.evaluate(&(3 * x + 2 * y)), 21);
                assert_eq!(assignment.value(x), 7);
            }
            other => panic!("expected a solution, got {other:?}"),
        }
    }

    #[test]
    fn test_infeasible() {
        let mut model = BoneMarketModel::new();
        let x = model.new_int_var("x", 0, 10);
        model.add(x.at_least(11));
        assert_eq!(model.maximise(&x.into()).unwrap(), Outcome::Infeasible);
    }

    #[test]
    fn test_assignment_breaking_a_row_is_rejected() {
        let mut model = BoneMarketModel::new();
        let x = model.new_int_var("x", 0, 10);
        let y = model.new_int_var("y", 0, 10);
        model.add((x + y).at_most(7));

        assert!(model.check_assignment(vec![3, 4]).is_ok());
        assert!(matches!(
            model.check_assignment(vec![4, 4]),
            Err(BoneMarketError::UnexpectedStatus(_))
        ));
        assert!(matches!(
            model.check_assignment(vec![11, 0]),
            Err(BoneMarketError::UnexpectedStatus(_))
        ));
        assert!(model.check_assignment(vec![1]).is_err());
    }

    #[test]
    fn test_product_off_by_one_is_rejected() {
        let mut model = BoneMarketModel::new();
        let a = model.new_int_var("a", 0, 10);
        let b = model.new_int_var("b", 0, 10);
        let (t, _) = model.new_product(vec![a.into(), b.into()], "t");
        model.fix(a, 3);
        model.fix(b, 5);

        let solved = match model.maximise(&LinearExpr::default()) {
            Ok(Outcome::Solved(assignment)) => assignment,
            other => panic!("expected a solution, got {other:?}"),
        };
        assert_eq!(solved.value(t), 15);

        let mut nudged = solved.values().to_vec();
        nudged[t.index()] += 1;
        assert!(model.check_assignment(nudged).is_err());
    }

    #[test]
    fn test_unenforced_row_does_not_reject() {
        let mut model = BoneMarketModel::new();
        let x = model.new_int_var("x", 0, 10);
        let switch = model.new_bool_var("switch");
        model.add_enforced(x.at_most(2), &[switch.literal()]);

        assert!(model.check_assignment(vec![9, 0]).is_ok());
        assert!(model.check_assignment(vec![9, 1]).is_err());
    }

    #[test]
    fn test_reified_membership_both_ways() {
        for (value, expected) in [(0, false), (3, true), (5, true), (6, false)] {
            let mut model = BoneMarketModel::new();
            let x = model.new_int_var("x", 0, 10);
            let inside = model.bool_expression(x.within(3, 5));
            model.fix(x, value);
            match model.maximise(&LinearExpr::default()) {
                Ok(Outcome::Solved(assignment)) => {
                    assert_eq!(assignment.literal(inside), expected, "x = {value}");
                }
                other => panic!("expected a solution, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_negated_enforcement() {
        let mut model = BoneMarketModel::new();
        let x = model.new_int_var("x", 0, 10);
        let positive = model.bool_expression(x.at_least(1));
        let y = model.new_int_var("y", -10, 10);
        model.add_enforced(y.equals(x), &[positive]);
        model.add_enforced(y.equals(-1), &[!positive]);
        model.fix(x, 0);

        match model.maximise(&LinearExpr::default()) {
            Ok(Outcome::Solved(assignment)) => assert_eq!(assignment.value(y), -1),
            other => panic!("expected a solution, got {other:?}"),
        }
    }
}
