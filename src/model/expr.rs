//! Integer linear expressions over model variables.

use std::collections::BTreeMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Not, Sub};

/// Handle to an integer variable owned by a [`BoneMarketModel`](super::BoneMarketModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub(crate) usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }

    /// This variable read as a true literal. Only meaningful for 0/1 variables.
    pub fn literal(self) -> Literal {
        Literal {
            var: self,
            negated: false,
        }
    }
}

/// A boolean variable or its negation, used as an enforcement condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    pub var: VarId,
    pub negated: bool,
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal {
            var: self.var,
            negated: !self.negated,
        }
    }
}

impl Not for VarId {
    type Output = Literal;

    fn not(self) -> Literal {
        !self.literal()
    }
}

/// An inclusive integer interval. `None` leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Domain {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl Domain {
    pub const fn new(min: i64, max: i64) -> Self {
        Domain {
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn point(value: i64) -> Self {
        Domain::new(value, value)
    }

    pub const fn at_least(min: i64) -> Self {
        Domain {
            min: Some(min),
            max: None,
        }
    }

    pub const fn at_most(max: i64) -> Self {
        Domain {
            min: None,
            max: Some(max),
        }
    }

    pub fn contains(&self, value: i128) -> bool {
        self.min.is_none_or(|min| value >= min as i128)
            && self.max.is_none_or(|max| value <= max as i128)
    }

    fn shifted(self, by: i64) -> Self {
        Domain {
            min: self.min.map(|m| m.saturating_add(by)),
            max: self.max.map(|m| m.saturating_add(by)),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => write!(f, "== {min}"),
            (Some(min), Some(max)) => write!(f, "in [{min}, {max}]"),
            (Some(min), None) => write!(f, ">= {min}"),
            (None, Some(max)) => write!(f, "<= {max}"),
            (None, None) => f.write_str("free"),
        }
    }
}

/// `Σ coefficient·variable + constant`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LinearExpr {
    pub(crate) terms: BTreeMap<VarId, i64>,
    pub(crate) constant: i64,
}

impl LinearExpr {
    pub fn constant(value: i64) -> Self {
        LinearExpr {
            terms: BTreeMap::new(),
            constant: value,
        }
    }

    /// `Σ coefficient·variable` over the given pairs.
    pub fn weighted_sum(pairs: impl IntoIterator<Item = (VarId, i64)>) -> Self {
        let mut expr = LinearExpr::default();
        for (var, coefficient) in pairs {
            expr.add_term(var, coefficient);
        }
        expr
    }

    pub fn add_term(&mut self, var: VarId, coefficient: i64) {
        if coefficient == 0 {
            return;
        }
        let entry = self.terms.entry(var).or_insert(0);
        *entry += coefficient;
        if *entry == 0 {
            self.terms.remove(&var);
        }
    }

    pub fn terms(&self) -> impl Iterator<Item = (VarId, i64)> + '_ {
        self.terms.iter().map(|(v, c)| (*v, *c))
    }

    pub fn constant_term(&self) -> i64 {
        self.constant
    }

    /// The value of this expression if it mentions no variable.
    pub fn as_constant(&self) -> Option<i64> {
        self.terms.is_empty().then_some(self.constant)
    }

    /// The variable if this expression is exactly one variable.
    pub fn as_var(&self) -> Option<VarId> {
        match (self.terms.len(), self.constant) {
            (1, 0) => self
                .terms
                .iter()
                .next()
                .filter(|(_, c)| **c == 1)
                .map(|(v, _)| *v),
            _ => None,
        }
    }

    pub fn evaluate(&self, values: &[i64]) -> i128 {
        self.terms.iter().fold(self.constant as i128, |acc, (var, c)| {
            acc + *c as i128 * values[var.0] as i128
        })
    }
}

impl fmt::Display for LinearExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (var, c) in &self.terms {
            let sign = if *c < 0 { "-" } else { "+" };
            if first {
                if *c < 0 {
                    f.write_str("-")?;
                }
            } else {
                write!(f, " {sign} ")?;
            }
            if c.abs() != 1 {
                write!(f, "{}*", c.abs())?;
            }
            write!(f, "x{}", var.0)?;
            first = false;
        }
        if first {
            write!(f, "{}", self.constant)
        } else if self.constant != 0 {
            let sign = if self.constant < 0 { "-" } else { "+" };
            write!(f, " {sign} {}", self.constant.abs())
        } else {
            Ok(())
        }
    }
}

impl From<VarId> for LinearExpr {
    fn from(var: VarId) -> Self {
        LinearExpr::weighted_sum([(var, 1)])
    }
}

impl From<Literal> for LinearExpr {
    fn from(literal: Literal) -> Self {
        if literal.negated {
            LinearExpr::constant(1) - literal.var
        } else {
            literal.var.into()
        }
    }
}

impl From<i64> for LinearExpr {
    fn from(value: i64) -> Self {
        LinearExpr::constant(value)
    }
}

impl From<&LinearExpr> for LinearExpr {
    fn from(expr: &LinearExpr) -> Self {
        expr.clone()
    }
}

impl<T: Into<LinearExpr>> AddAssign<T> for LinearExpr {
    fn add_assign(&mut self, rhs: T) {
        let rhs: LinearExpr = rhs.into();
        for (var, c) in rhs.terms {
            self.add_term(var, c);
        }
        self.constant += rhs.constant;
    }
}

impl<T: Into<LinearExpr>> Add<T> for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: T) -> LinearExpr {
        self += rhs;
        self
    }
}

impl<T: Into<LinearExpr>> Sub<T> for LinearExpr {
    type Output = LinearExpr;

    fn sub(mut self, rhs: T) -> LinearExpr {
        let rhs: LinearExpr = rhs.into();
        self += -rhs;
        self
    }
}

impl Neg for LinearExpr {
    type Output = LinearExpr;

    fn neg(self) -> LinearExpr {
        self * -1
    }
}

impl Mul<i64> for LinearExpr {
    type Output = LinearExpr;

    fn mul(self, rhs: i64) -> LinearExpr {
        if rhs == 0 {
            return LinearExpr::default();
        }
        LinearExpr {
            terms: self.terms.into_iter().map(|(v, c)| (v, c * rhs)).collect(),
            constant: self.constant * rhs,
        }
    }
}

impl Mul<LinearExpr> for i64 {
    type Output = LinearExpr;

    fn mul(self, rhs: LinearExpr) -> LinearExpr {
        rhs * self
    }
}

impl<T: Into<LinearExpr>> Add<T> for VarId {
    type Output = LinearExpr;

    fn add(self, rhs: T) -> LinearExpr {
        LinearExpr::from(self) + rhs
    }
}

impl<T: Into<LinearExpr>> Sub<T> for VarId {
    type Output = LinearExpr;

    fn sub(self, rhs: T) -> LinearExpr {
        LinearExpr::from(self) - rhs
    }
}

impl Neg for VarId {
    type Output = LinearExpr;

    fn neg(self) -> LinearExpr {
        -LinearExpr::from(self)
    }
}

impl Mul<i64> for VarId {
    type Output = LinearExpr;

    fn mul(self, rhs: i64) -> LinearExpr {
        LinearExpr::from(self) * rhs
    }
}

impl Mul<VarId> for i64 {
    type Output = LinearExpr;

    fn mul(self, rhs: VarId) -> LinearExpr {
        LinearExpr::from(rhs) * self
    }
}

impl<T: Into<LinearExpr>> Sum<T> for LinearExpr {
    fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(LinearExpr::default(), |acc, e| acc + e)
    }
}

/// A linear expression constrained to lie in a domain.
///
/// The constant term is folded into the domain, so `x + 2 <= 5` and
/// `x <= 3` are the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundedExpr {
    pub(crate) expr: LinearExpr,
    pub(crate) domain: Domain,
}

impl BoundedExpr {
    pub fn new(mut expr: LinearExpr, domain: Domain) -> Self {
        let constant = std::mem::take(&mut expr.constant);
        BoundedExpr {
            expr,
            domain: domain.shifted(-constant),
        }
    }

    pub fn expr(&self) -> &LinearExpr {
        &self.expr
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn is_satisfied(&self, values: &[i64]) -> bool {
        self.domain.contains(self.expr.evaluate(values))
    }
}

impl fmt::Display for BoundedExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.expr, self.domain)
    }
}

/// Comparison builders producing [`BoundedExpr`]s.
pub trait Compare: Into<LinearExpr> + Sized {
    /// `self - rhs` as one expression.
    fn difference(self, rhs: impl Into<LinearExpr>) -> LinearExpr {
        let lhs: LinearExpr = self.into();
        lhs - rhs
    }

    fn equals(self, rhs: impl Into<LinearExpr>) -> BoundedExpr {
        BoundedExpr::new(self.difference(rhs), Domain::point(0))
    }

    fn at_most(self, rhs: impl Into<LinearExpr>) -> BoundedExpr {
        BoundedExpr::new(self.difference(rhs), Domain::at_most(0))
    }

    fn at_least(self, rhs: impl Into<LinearExpr>) -> BoundedExpr {
        BoundedExpr::new(self.difference(rhs), Domain::at_least(0))
    }

    fn less_than(self, rhs: impl Into<LinearExpr>) -> BoundedExpr {
        BoundedExpr::new(self.difference(rhs), Domain::at_most(-1))
    }

    fn greater_than(self, rhs: impl Into<LinearExpr>) -> BoundedExpr {
        BoundedExpr::new(self.difference(rhs), Domain::at_least(1))
    }

    fn within(self, min: i64, max: i64) -> BoundedExpr {
        BoundedExpr::new(self.into(), Domain::new(min, max))
    }
}

impl<T: Into<LinearExpr>> Compare for T {}
