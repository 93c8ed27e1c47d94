//! Equations and equation sets.
//!
//! An [`Equation`] is an atomic constraint: a variable compared with a constant
//! (`x == 5`, `x != 5`) or with another variable (`x == y`, `x != y`).
//! An [`EquationSet`] groups equations with AND or OR.

use std::fmt::{Display, Formatter};

use num_bigint::BigUint;

use crate::types::Var;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Equation {
    /// `var == value` or `var != value`.
    Value { var: Var, value: BigUint, equal: bool },
    /// `lhs == rhs` or `lhs != rhs`.
    Vars { lhs: Var, rhs: Var, equal: bool },
}

impl Equation {
    pub fn value(var: &Var, value: impl Into<BigUint>, equal: bool) -> Self {
        Equation::Value {
            var: var.clone(),
            value: value.into(),
            equal,
        }
    }

    pub fn vars(lhs: &Var, rhs: &Var, equal: bool) -> Self {
        Equation::Vars {
            lhs: lhs.clone(),
            rhs: rhs.clone(),
            equal,
        }
    }

    /// Returns `true` for `==`, `false` for `!=`.
    pub fn is_equality(&self) -> bool {
        match self {
            Equation::Value { equal, .. } | Equation::Vars { equal, .. } => *equal,
        }
    }
}

impl Display for Equation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let op = if self.is_equality() { "==" } else { "!=" };
        match self {
            Equation::Value { var, value, .. } => write!(f, "{} {} {}", var, op, value),
            Equation::Vars { lhs, rhs, .. } => write!(f, "{} {} {}", lhs, op, rhs),
        }
    }
}

/// How the equations of a set are combined.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SetKind {
    /// All equations must hold.
    And,
    /// At least one equation must hold.
    Or,
}

/// An AND- or OR-combined group of equations.
///
/// ```
/// use fd_solver::equation::EquationSet;
/// use fd_solver::types::Var;
///
/// let a = Var::new("a", 4);
/// let b = Var::new("b", 4);
///
/// let mut set = EquationSet::or();
/// set.add_var_equation(&a, &b, true);
/// set.add_value_equation(&a, 3u32, true);
/// assert_eq!(set.size(), 2);
/// assert_eq!(set.to_string(), "(a == b || a == 3)");
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EquationSet {
    kind: SetKind,
    equations: Vec<Equation>,
}

impl EquationSet {
    pub fn new(kind: SetKind) -> Self {
        Self {
            kind,
            equations: Vec::new(),
        }
    }

    pub fn and() -> Self {
        Self::new(SetKind::And)
    }

    pub fn or() -> Self {
        Self::new(SetKind::Or)
    }

    pub fn kind(&self) -> SetKind {
        self.kind
    }

    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    pub fn size(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    pub fn add(&mut self, equation: Equation) {
        self.equations.push(equation);
    }

    pub fn add_var_equation(&mut self, lhs: &Var, rhs: &Var, equal: bool) {
        self.add(Equation::vars(lhs, rhs, equal));
    }

    pub fn add_value_equation(&mut self, var: &Var, value: impl Into<BigUint>, equal: bool) {
        self.add(Equation::value(var, value, equal));
    }
}

impl Extend<Equation> for EquationSet {
    fn extend<T: IntoIterator<Item = Equation>>(&mut self, iter: T) {
        self.equations.extend(iter);
    }
}

impl Display for EquationSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sep = match self.kind {
            SetKind::And => " && ",
            SetKind::Or => " || ",
        };
        write!(f, "(")?;
        for (i, equation) in self.equations.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", sep)?;
            }
            write!(f, "{}", equation)?;
        }
        write!(f, ")")
    }
}
