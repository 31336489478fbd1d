//! An integer model with enforcement literals, lowered to a MILP for solving.
//!
//! Constraints are stored as bounded linear expressions plus a conjunction of
//! literals that must all hold for the constraint to apply. Lowering turns each
//! enforced row into big-M inequalities, using interval bounds of the row's
//! expression over the current variable bounds.

pub mod arithmetic;
pub mod backend;
pub mod conditional;
pub mod expr;

use std::collections::HashMap;

pub use backend::{Assignment, Outcome};
pub use conditional::{Item, deferred};
pub use expr::{BoundedExpr, Compare, Domain, LinearExpr, Literal, VarId};

/// Magnitude past which bounds are clamped so that every coefficient stays
/// exactly representable once lowered to floating point.
pub const BOUND_LIMIT: i64 = 1 << 50;

#[derive(Debug, Clone)]
pub(crate) struct Variable {
    pub(crate) name: String,
    pub(crate) min: i64,
    pub(crate) max: i64,
}

#[derive(Debug, Clone)]
struct Row {
    bounded: BoundedExpr,
    enforcement: Vec<Literal>,
}

/// Handle to a constraint, used to attach enforcement literals after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintId(usize);

/// A row ready for the backend: `min <= expr <= max` with no enforcement.
#[derive(Debug, Clone)]
pub(crate) struct LinearRow {
    pub(crate) expr: LinearExpr,
    pub(crate) min: Option<i64>,
    pub(crate) max: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct BoneMarketModel {
    variables: Vec<Variable>,
    rows: Vec<Row>,
    bool_expressions: HashMap<BoundedExpr, Literal>,
}

impl BoneMarketModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Variables ──────────────────────────────────────────────────────────

    pub fn new_int_var(&mut self, name: impl Into<String>, min: i64, max: i64) -> VarId {
        let min = min.clamp(-BOUND_LIMIT, BOUND_LIMIT);
        let max = max.clamp(-BOUND_LIMIT, BOUND_LIMIT);
        self.variables.push(Variable {
            name: name.into(),
            min,
            max: max.max(min),
        });
        VarId(self.variables.len() - 1)
    }

    pub fn new_bool_var(&mut self, name: impl Into<String>) -> VarId {
        self.new_int_var(name, 0, 1)
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.rows.len()
    }

    pub fn name(&self, var: VarId) -> &str {
        &self.variables[var.0].name
    }

    pub fn bounds(&self, var: VarId) -> (i64, i64) {
        let v = &self.variables[var.0];
        (v.min, v.max)
    }

    /// Narrow a variable's bounds to `[min, max]` intersected with its current ones.
    pub fn restrict(&mut self, var: VarId, min: i64, max: i64) {
        let v = &mut self.variables[var.0];
        v.min = v.min.max(min);
        v.max = v.max.min(max);
        if v.min > v.max {
            // Keep the bounds well formed; the model is infeasible either way.
            v.max = v.min;
            self.rows.push(Row {
                bounded: LinearExpr::from(var).within(min, max),
                enforcement: Vec::new(),
            });
        }
    }

    pub fn fix(&mut self, var: VarId, value: i64) {
        self.restrict(var, value, value);
    }

    /// `Some(value)` if the literal can only take one value under the current bounds.
    pub fn fixed_literal(&self, literal: Literal) -> Option<bool> {
        let (min, max) = self.bounds(literal.var);
        if min == max {
            Some((min != 0) != literal.negated)
        } else {
            None
        }
    }

    /// Smallest and largest values `expr` can take under the current bounds.
    pub fn expr_bounds(&self, expr: &LinearExpr) -> (i64, i64) {
        let (mut min, mut max) = (expr.constant as i128, expr.constant as i128);
        for (var, c) in expr.terms() {
            let (lo, hi) = self.bounds(var);
            let (a, b) = (c as i128 * lo as i128, c as i128 * hi as i128);
            min += a.min(b);
            max += a.max(b);
        }
        let limit = BOUND_LIMIT as i128;
        (
            min.clamp(-limit, limit) as i64,
            max.clamp(-limit, limit) as i64,
        )
    }

    // ── Constraints ────────────────────────────────────────────────────────

    pub fn add(&mut self, bounded: BoundedExpr) -> ConstraintId {
        self.rows.push(Row {
            bounded,
            enforcement: Vec::new(),
        });
        ConstraintId(self.rows.len() - 1)
    }

    /// Enforce `constraint` only when `literal` is true, in addition to any
    /// literals already attached.
    pub fn only_enforce_if(&mut self, constraint: ConstraintId, literal: Literal) -> ConstraintId {
        let row = &mut self.rows[constraint.0];
        if !row.enforcement.contains(&literal) {
            row.enforcement.push(literal);
        }
        constraint
    }

    pub fn add_enforced(&mut self, bounded: BoundedExpr, literals: &[Literal]) -> ConstraintId {
        let id = self.add(bounded);
        for literal in literals {
            self.only_enforce_if(id, *literal);
        }
        id
    }

    /// A variable equal to `expr` and the constraint linking them.
    ///
    /// The variable's bounds are those of `expr` narrowed to `[min, max]`, so
    /// the variable never restricts anything while the link is not enforced.
    /// If the narrowing leaves nothing, the link is unsatisfiable.
    pub fn new_intermediate(
        &mut self,
        expr: impl Into<LinearExpr>,
        name: impl Into<String>,
        min: Option<i64>,
        max: Option<i64>,
    ) -> (VarId, ConstraintId) {
        let expr: LinearExpr = expr.into();
        let (lo, hi) = self.expr_bounds(&expr);
        let lo = min.map_or(lo, |m| lo.max(m));
        let hi = max.map_or(hi, |m| hi.min(m));
        let var = self.new_int_var(name, lo, hi.max(lo));
        let link = if hi < lo {
            self.add(LinearExpr::constant(0).equals(1))
        } else {
            self.add(var.equals(expr))
        };
        (var, link)
    }

    /// A literal that is true exactly when `bounded` holds.
    ///
    /// Both polarities are enforced, so the literal and its negation are safe
    /// to use as enforcement conditions. Results are cached per expression.
    pub fn bool_expression(&mut self, bounded: BoundedExpr) -> Literal {
        if let Some(literal) = self.bool_expressions.get(&bounded) {
            return *literal;
        }

        let holds = self.new_bool_var(bounded.to_string()).literal();
        let expr = bounded.expr.clone();
        let domain = bounded.domain;

        match (domain.min, domain.max) {
            (None, None) => self.fix(holds.var, 1),
            (Some(min), None) => {
                self.add_enforced(BoundedExpr::new(expr.clone(), domain), &[holds]);
                self.add_enforced(expr.at_most(min - 1), &[!holds]);
            }
            (None, Some(max)) => {
                self.add_enforced(BoundedExpr::new(expr.clone(), domain), &[holds]);
                self.add_enforced(expr.at_least(max + 1), &[!holds]);
            }
            (Some(min), Some(max)) => {
                self.add_enforced(BoundedExpr::new(expr.clone(), domain), &[holds]);
                let below = self
                    .new_bool_var(format!("{bounded}: below"))
                    .literal();
                self.add_enforced(expr.clone().at_most(min - 1), &[!holds, below]);
                self.add_enforced(expr.at_least(max + 1), &[!holds, !below]);
            }
        }

        self.bool_expressions.insert(bounded, holds);
        holds
    }

    // ── Lowering ───────────────────────────────────────────────────────────

    pub(crate) fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Every row with its enforcement turned into big-M terms.
    ///
    /// Rows enforced by a literal fixed false are dropped, and literals fixed
    /// true are ignored.
    pub(crate) fn lowered_rows(&self) -> Vec<LinearRow> {
        let mut lowered = Vec::with_capacity(self.rows.len());

        'rows: for row in &self.rows {
            let mut slack = LinearExpr::default();
            let mut enforced = false;
            for literal in &row.enforcement {
                match self.fixed_literal(*literal) {
                    Some(false) => continue 'rows,
                    Some(true) => {}
                    None => {
                        // 1 - literal
                        slack += LinearExpr::constant(1) - LinearExpr::from(*literal);
                        enforced = true;
                    }
                }
            }

            let expr = &row.bounded.expr;
            let domain = row.bounded.domain;

            if !enforced {
                lowered.push(LinearRow {
                    expr: expr.clone(),
                    min: domain.min,
                    max: domain.max,
                });
                continue;
            }

            let (emin, emax) = self.expr_bounds(expr);
            if let Some(max) = domain.max.filter(|max| emax > *max) {
                // expr <= max + (emax - max)·slack
                lowered.push(LinearRow {
                    expr: expr.clone() - slack.clone() * (emax - max),
                    min: None,
                    max: Some(max),
                });
            }
            if let Some(min) = domain.min.filter(|min| emin < *min) {
                // expr >= min - (min - emin)·slack
                lowered.push(LinearRow {
                    expr: expr.clone() + slack.clone() * (min - emin),
                    min: Some(min),
                    max: None,
                });
            }
        }

        lowered
    }

    /// Descriptions of every row the assignment breaks, checked in exact integers.
    pub fn violations(&self, values: &[i64]) -> Vec<String> {
        let mut broken = Vec::new();

        for (i, v) in self.variables.iter().enumerate() {
            if values[i] < v.min || values[i] > v.max {
                broken.push(format!(
                    "{} = {} outside [{}, {}]",
                    v.name, values[i], v.min, v.max
                ));
            }
        }

        for row in &self.rows {
            let active = row.enforcement.iter().all(|literal| {
                let value = values[literal.var.0] != 0;
                value != literal.negated
            });
            if active && !row.bounded.is_satisfied(values) {
                broken.push(format!(
                    "{} (value {})",
                    row.bounded,
                    row.bounded.expr.evaluate(values)
                ));
            }
        }

        broken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_bounds() {
        let mut model = BoneMarketModel::new();
        let x = model.new_int_var("x", 0, 10);
        let y = model.new_int_var("y", -5, 5);
        assert_eq!(model.expr_bounds(&(2 * x - y + 1)), (-4, 26));
    }

    #[test]
    fn test_restrict_and_fixed_literals() {
        let mut model = BoneMarketModel::new();
        let b = model.new_bool_var("b");
        assert_eq!(model.fixed_literal(b.literal()), None);
        model.fix(b, 0);
        assert_eq!(model.fixed_literal(b.literal()), Some(false));
        assert_eq!(model.fixed_literal(!b), Some(true));
    }

    #[test]
    fn test_intermediate_takes_expression_bounds() {
        let mut model = BoneMarketModel::new();
        let x = model.new_int_var("x", -3, 7);
        let (copy, _) = model.new_intermediate(x + 1, "copy", Some(0), None);
        assert_eq!(model.bounds(copy), (0, 8));
    }

    #[test]
    fn test_intermediate_with_empty_range_cannot_be_linked() {
        let mut model = BoneMarketModel::new();
        let x = model.new_int_var("x", 5, 7);
        let (capped, link) = model.new_intermediate(x, "capped", None, Some(2));
        assert_eq!(model.bounds(capped), (5, 5));
        assert!(!model.violations(&[5, 5]).is_empty());

        let b = model.new_bool_var("b");
        model.only_enforce_if(link, b.literal());
        assert!(model.violations(&[5, 5, 0]).is_empty());
    }

    #[test]
    fn test_lowering_drops_rows_behind_false_literals() {
        let mut model = BoneMarketModel::new();
        let x = model.new_int_var("x", 0, 10);
        let b = model.new_bool_var("b");
        model.add_enforced(x.equals(3), &[b.literal()]);
        assert_eq!(model.lowered_rows().len(), 2);

        model.fix(b, 0);
        assert!(model.lowered_rows().is_empty());
    }

    #[test]
    fn test_lowering_skips_redundant_sides() {
        let mut model = BoneMarketModel::new();
        let x = model.new_int_var("x", 0, 10);
        let b = model.new_bool_var("b");
        model.add_enforced(x.at_most(20), &[b.literal()]);
        assert!(model.lowered_rows().is_empty());
    }

    #[test]
    fn test_violations_respect_enforcement() {
        let mut model = BoneMarketModel::new();
        let x = model.new_int_var("x", 0, 10);
        let b = model.new_bool_var("b");
        model.add_enforced(x.equals(3), &[b.literal()]);
        assert!(model.violations(&[5, 0]).is_empty());
        assert_eq!(model.violations(&[5, 1]).len(), 1);
        assert!(model.violations(&[3, 1]).is_empty());
    }

    #[test]
    fn test_bool_expression_is_cached() {
        let mut model = BoneMarketModel::new();
        let x = model.new_int_var("x", 0, 10);
        let a = model.bool_expression(x.within(2, 4));
        let b = model.bool_expression(x.within(2, 4));
        assert_eq!(a, b);
    }
}
