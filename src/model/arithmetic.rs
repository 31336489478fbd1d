//! Nonlinear integer relations decomposed into linear rows.
//!
//! Every helper returns the handles of the constraints that tie its result to
//! the caller's expressions. Attaching an enforcement literal to all of them
//! switches the relation off entirely: the helper's own variables take their
//! bounds from its core, so an unenforced helper never restricts the model.

use super::{BoneMarketModel, Compare, ConstraintId, LinearExpr, VarId};

/// `round((base / denominator) ** exponent)`, the tabulated value of a power law.
pub fn approximate_power(base: i64, denominator: i64, exponent: f64) -> i64 {
    (base as f64 / denominator as f64).powf(exponent).round() as i64
}

fn corners(a: (i64, i64), b: (i64, i64)) -> (i64, i64) {
    let products = [
        a.0 as i128 * b.0 as i128,
        a.0 as i128 * b.1 as i128,
        a.1 as i128 * b.0 as i128,
        a.1 as i128 * b.1 as i128,
    ];
    let limit = super::BOUND_LIMIT as i128;
    let min = products.iter().copied().min().unwrap_or(0).clamp(-limit, limit);
    let max = products.iter().copied().max().unwrap_or(0).clamp(-limit, limit);
    (min as i64, max as i64)
}

impl BoneMarketModel {
    /// A variable standing for `expr`, at least `min`, plus the link if one was needed.
    fn operand(
        &mut self,
        expr: LinearExpr,
        name: String,
        min: Option<i64>,
    ) -> (VarId, Option<ConstraintId>) {
        if let Some(value) = expr.as_constant().filter(|v| min.is_none_or(|m| *v >= m)) {
            return (self.new_int_var(name, value, value), None);
        }
        if let Some(var) = expr.as_var() {
            let (lo, _) = self.bounds(var);
            if min.is_none_or(|m| lo >= m) {
                return (var, None);
            }
        }
        let (var, link) = self.new_intermediate(expr, name, min, None);
        (var, Some(link))
    }

    /// `z == x·y`, always enforced.
    fn product(&mut self, x: VarId, y: VarId, name: &str) -> VarId {
        let (xlo, xhi) = self.bounds(x);
        let (ylo, yhi) = self.bounds(y);
        let (zlo, zhi) = corners((xlo, xhi), (ylo, yhi));
        let z = self.new_int_var(name, zlo, zhi);

        if xlo == xhi {
            self.add(z.equals(xlo * y));
        } else if ylo == yhi {
            self.add(z.equals(ylo * x));
        } else if xlo >= 0 && xhi <= 1 {
            self.bool_product(z, x, y);
        } else if ylo >= 0 && yhi <= 1 {
            self.bool_product(z, y, x);
        } else {
            // Write the narrower factor in binary and multiply bit by bit.
            let (small, other) = if xhi - xlo <= yhi - ylo { (x, y) } else { (y, x) };
            let (lo, hi) = self.bounds(small);
            let bits = 64 - ((hi - lo) as u64).leading_zeros();

            let mut rebuilt = LinearExpr::constant(lo);
            let mut partials = lo * other;
            for i in 0..bits {
                let bit = self.new_bool_var(format!("{name}: bit {i}"));
                let partial = self.product(bit, other, &format!("{name}: partial {i}"));
                rebuilt += bit * (1i64 << i);
                partials += partial * (1i64 << i);
            }
            self.add(small.equals(rebuilt));
            self.add(z.equals(partials));
        }

        z
    }

    /// `z == b·y` for a 0/1 variable `b`.
    fn bool_product(&mut self, z: VarId, b: VarId, y: VarId) {
        let (l, u) = self.bounds(y);
        self.add((z - u * b).at_most(0));
        self.add((z - l * b).at_least(0));
        self.add((z - y - l * b).at_most(-l));
        self.add((z - y - u * b).at_least(-u));
    }

    /// `num == q·den + r` with `0 <= r < den`, for `num >= 0` and `den >= 1`.
    fn divmod(&mut self, num: VarId, den: VarId, name: &str) -> (VarId, VarId) {
        let (nlo, nhi) = self.bounds(num);
        let (dlo, dhi) = self.bounds(den);
        let quotient = self.new_int_var(format!("{name}: quotient"), nlo / dhi, nhi / dlo);
        let remainder = self.new_int_var(format!("{name}: remainder"), 0, dhi - 1);

        if dlo == dhi {
            self.add(num.equals(dlo * quotient + remainder));
        } else {
            let scaled = self.product(quotient, den, &format!("{name}: quotient times denominator"));
            self.add(num.equals(scaled + remainder));
            self.add((remainder - den).at_most(-1));
        }

        (quotient, remainder)
    }

    /// A fresh variable equal to the product of `factors`, and its links.
    pub fn new_product(
        &mut self,
        factors: Vec<LinearExpr>,
        name: impl Into<String>,
    ) -> (VarId, Vec<ConstraintId>) {
        let (lo, hi) = factors
            .iter()
            .map(|f| self.expr_bounds(f))
            .fold((1, 1), corners);
        let var = self.new_int_var(name, lo, hi);
        let links = self.add_multiplication_equality(var, factors);
        (var, links)
    }

    /// A fresh variable equal to `num // denom`, and its links.
    pub fn new_quotient(
        &mut self,
        num: impl Into<LinearExpr>,
        denom: i64,
        name: impl Into<String>,
    ) -> (VarId, Vec<ConstraintId>) {
        let num: LinearExpr = num.into();
        let denom = denom.max(1);
        let (lo, hi) = self.expr_bounds(&num);
        let var = self.new_int_var(name, lo.max(0) / denom, hi.max(0) / denom);
        let links = self.add_division_equality(var, num, denom);
        (var, links)
    }

    /// A fresh variable equal to `num % modulus`, and its links.
    pub fn new_remainder(
        &mut self,
        num: impl Into<LinearExpr>,
        modulus: i64,
        name: impl Into<String>,
    ) -> (VarId, Vec<ConstraintId>) {
        let modulus = modulus.max(1);
        let var = self.new_int_var(name, 0, modulus - 1);
        let links = self.add_modulo_equality(var, num, modulus);
        (var, links)
    }

    /// A fresh variable equal to `round((base / denominator) ** exponent)`
    /// for bases up to `upto`, and its links.
    pub fn new_power(
        &mut self,
        base: impl Into<LinearExpr>,
        denominator: i64,
        exponent: f64,
        upto: i64,
        name: impl Into<String>,
    ) -> (VarId, Vec<ConstraintId>) {
        let base: LinearExpr = base.into();
        let (lo, hi) = self.expr_bounds(&base);
        let lo = lo.clamp(0, upto);
        let hi = hi.clamp(lo, upto);
        let var = self.new_int_var(
            name,
            approximate_power(lo, denominator, exponent),
            approximate_power(hi, denominator, exponent),
        );
        let links = self.add_division_approximate_exponentiation_equality(
            var,
            base,
            denominator,
            exponent,
            upto,
        );
        (var, links)
    }

    /// Adds `target == factors[0] * .. * factors[n]`.
    ///
    /// Constant factors are folded into a single scale; the rest are multiplied
    /// pairwise from the left through fresh variables.
    pub fn add_multiplication_equality(
        &mut self,
        target: impl Into<LinearExpr>,
        factors: impl IntoIterator<Item = LinearExpr>,
    ) -> Vec<ConstraintId> {
        let target: LinearExpr = target.into();
        let name = format!("{target} == product");
        let mut scale = 1i64;
        let mut links = Vec::new();
        let mut product: Option<VarId> = None;

        for (i, factor) in factors.into_iter().enumerate() {
            if let Some(c) = factor.as_constant() {
                scale *= c;
                continue;
            }
            let (var, link) = self.operand(factor, format!("{name}: factor {i}"), None);
            links.extend(link);
            product = Some(match product {
                None => var,
                Some(acc) => self.product(acc, var, &format!("{name}: partial {i}")),
            });
        }

        let row = match product {
            None => target.equals(scale),
            Some(p) => target.equals(scale * p),
        };
        links.push(self.add(row));
        links
    }

    /// Adds `target == num // denom`.
    ///
    /// The numerator is clamped to at least 0 and the denominator to at least 1.
    pub fn add_division_equality(
        &mut self,
        target: impl Into<LinearExpr>,
        num: impl Into<LinearExpr>,
        denom: impl Into<LinearExpr>,
    ) -> Vec<ConstraintId> {
        let target: LinearExpr = target.into();
        let name = format!("{target} == quotient");
        let (n, num_link) = self.operand(num.into(), format!("{name}: num"), Some(0));
        let (d, denom_link) = self.operand(denom.into(), format!("{name}: denom"), Some(1));
        let (quotient, _) = self.divmod(n, d, &name);

        let mut links: Vec<ConstraintId> = num_link.into_iter().chain(denom_link).collect();
        links.push(self.add(target.equals(quotient)));
        links
    }

    /// Adds `target == (num // denom) * multiple`.
    ///
    /// `multiple` defaults to `denom`, which rounds `num` down to a multiple of it.
    pub fn add_division_multiplication_equality(
        &mut self,
        target: impl Into<LinearExpr>,
        num: impl Into<LinearExpr>,
        denom: impl Into<LinearExpr>,
        multiple: Option<LinearExpr>,
    ) -> Vec<ConstraintId> {
        let target: LinearExpr = target.into();
        let denom: LinearExpr = denom.into();
        let name = format!("{target} == rounded quotient");
        let multiple = multiple.unwrap_or_else(|| denom.clone());

        let (n, num_link) = self.operand(num.into(), format!("{name}: num"), Some(0));
        let (d, denom_link) = self.operand(denom, format!("{name}: denom"), Some(1));
        let (quotient, _) = self.divmod(n, d, &name);

        let mut links: Vec<ConstraintId> = num_link.into_iter().chain(denom_link).collect();
        let row = match multiple.as_constant() {
            Some(m) => target.equals(m * quotient),
            None => {
                let (m, multiple_link) = self.operand(multiple, format!("{name}: multiple"), None);
                links.extend(multiple_link);
                let scaled = self.product(quotient, m, &format!("{name}: scaled"));
                target.equals(scaled)
            }
        };
        links.push(self.add(row));
        links
    }

    /// Adds `target == num % modulus` for `num >= 0` and `modulus >= 1`.
    pub fn add_modulo_equality(
        &mut self,
        target: impl Into<LinearExpr>,
        num: impl Into<LinearExpr>,
        modulus: impl Into<LinearExpr>,
    ) -> Vec<ConstraintId> {
        let target: LinearExpr = target.into();
        let name = format!("{target} == remainder");
        let (n, num_link) = self.operand(num.into(), format!("{name}: num"), Some(0));
        let (d, modulus_link) = self.operand(modulus.into(), format!("{name}: modulus"), Some(1));
        let (_, remainder) = self.divmod(n, d, &name);

        let mut links: Vec<ConstraintId> = num_link.into_iter().chain(modulus_link).collect();
        links.push(self.add(target.equals(remainder)));
        links
    }

    /// Adds `target == max(exprs)`.
    pub fn add_max_equality(
        &mut self,
        target: impl Into<LinearExpr>,
        exprs: Vec<LinearExpr>,
    ) -> Vec<ConstraintId> {
        self.extremum(target.into(), exprs, true)
    }

    /// Adds `target == min(exprs)`.
    pub fn add_min_equality(
        &mut self,
        target: impl Into<LinearExpr>,
        exprs: Vec<LinearExpr>,
    ) -> Vec<ConstraintId> {
        self.extremum(target.into(), exprs, false)
    }

    /// Adds `target == |expr|`.
    pub fn add_abs_equality(
        &mut self,
        target: impl Into<LinearExpr>,
        expr: impl Into<LinearExpr>,
    ) -> Vec<ConstraintId> {
        let expr: LinearExpr = expr.into();
        self.extremum(target.into(), vec![expr.clone(), -expr], true)
    }

    fn extremum(&mut self, target: LinearExpr, exprs: Vec<LinearExpr>, maximum: bool) -> Vec<ConstraintId> {
        if exprs.is_empty() {
            return vec![self.add(LinearExpr::constant(0).equals(1))];
        }

        let bounds: Vec<(i64, i64)> = exprs.iter().map(|e| self.expr_bounds(e)).collect();
        let (lo, hi) = if maximum {
            (
                bounds.iter().map(|b| b.0).max().unwrap_or(0),
                bounds.iter().map(|b| b.1).max().unwrap_or(0),
            )
        } else {
            (
                bounds.iter().map(|b| b.0).min().unwrap_or(0),
                bounds.iter().map(|b| b.1).min().unwrap_or(0),
            )
        };
        let label = if maximum { "max" } else { "min" };
        let extreme = self.new_int_var(format!("{target} == {label}"), lo, hi);

        let mut chosen = LinearExpr::default();
        for (i, expr) in exprs.into_iter().enumerate() {
            let selector = self.new_bool_var(format!("{target} == {label}: selects {i}"));
            chosen += selector;
            if maximum {
                self.add(extreme.at_least(expr.clone()));
                self.add_enforced(extreme.at_most(expr), &[selector.literal()]);
            } else {
                self.add(extreme.at_most(expr.clone()));
                self.add_enforced(extreme.at_least(expr), &[selector.literal()]);
            }
        }
        self.add(chosen.equals(1));

        vec![self.add(target.equals(extreme))]
    }

    /// Restricts `(exprs[0], .., exprs[n])` to one of the rows of `tuples`.
    ///
    /// Each column is a fresh variable selected by a one-hot row choice; the
    /// returned links tie the columns to `exprs`.
    pub fn add_allowed_assignments(
        &mut self,
        exprs: Vec<LinearExpr>,
        tuples: &[Vec<i64>],
    ) -> Vec<ConstraintId> {
        if tuples.is_empty() {
            return vec![self.add(LinearExpr::constant(0).equals(1))];
        }

        let name = format!(
            "allowed ({})",
            exprs.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", ")
        );
        let selectors: Vec<VarId> = (0..tuples.len())
            .map(|t| self.new_bool_var(format!("{name}: row {t}")))
            .collect();
        self.add(selectors.iter().copied().sum::<LinearExpr>().equals(1));

        let mut links = Vec::with_capacity(exprs.len());
        for (j, expr) in exprs.into_iter().enumerate() {
            let column: Vec<i64> = tuples.iter().map(|row| row[j]).collect();
            let lo = column.iter().copied().min().unwrap_or(0);
            let hi = column.iter().copied().max().unwrap_or(0);
            let var = self.new_int_var(format!("{name}: column {j}"), lo, hi);
            let selected = LinearExpr::weighted_sum(selectors.iter().copied().zip(column));
            self.add(var.equals(selected));
            links.push(self.add(expr.equals(var)));
        }
        links
    }

    /// Adds `target == round(base ** exponent)` using a lookup table over
    /// integer bases in `[0, upto]`.
    ///
    /// Set `upto` to a value that is unlikely to come into play.
    pub fn add_approximate_exponentiation_equality(
        &mut self,
        target: impl Into<LinearExpr>,
        base: impl Into<LinearExpr>,
        exponent: f64,
        upto: i64,
    ) -> Vec<ConstraintId> {
        self.add_division_approximate_exponentiation_equality(target, base, 1, exponent, upto)
    }

    /// Adds `target == round((base / denominator) ** exponent)` using a lookup
    /// table over integer bases in `[0, upto]`.
    pub fn add_division_approximate_exponentiation_equality(
        &mut self,
        target: impl Into<LinearExpr>,
        base: impl Into<LinearExpr>,
        denominator: i64,
        exponent: f64,
        upto: i64,
    ) -> Vec<ConstraintId> {
        let base: LinearExpr = base.into();
        let (lo, hi) = self.expr_bounds(&base);
        // Bases the expression cannot reach are left out of the table.
        let tuples: Vec<Vec<i64>> = (lo.max(0)..=hi.min(upto))
            .map(|b| vec![approximate_power(b, denominator, exponent), b])
            .collect();
        self.add_allowed_assignments(vec![target.into(), base], &tuples)
    }
}
