//! Finite-domain equation solver.
//!
//! The [`Solver`] decides whether a system of equalities and inequalities over
//! bounded-width integer variables is satisfiable. Supported atomic constraints
//! are `x == y`, `x != y`, `x == c` and `x != c`. A system has the shape
//!
//! ```text
//! (e[1,1] || ... || e[1,n1]) && ... && (e[m,1] || ... || e[m,nm])
//! ```
//!
//! and is expected to contain only a few non-trivial disjunctions: every OR set
//! with more than one member splits the solver into independent branches.
//!
//! # Algorithm
//!
//! 1. Every variable starts with its full domain; `x == c` and `x != c` narrow it.
//! 2. Equalities are eliminated by substitution: for `x == y`, the domain of `x`
//!    is intersected with the domain of `y` and `x` is replaced by `y` everywhere.
//!    `x == y && x != y` is detected as a conflict.
//! 3. Inequalities over disjoint domains are dropped; an inequality with one side
//!    fixed to a single value removes that value from the other side.
//! 4. If every remaining variable has more values than inequality partners, the
//!    system is satisfiable (pigeonhole). Otherwise the variable with the smallest
//!    domain is fixed to each of its values in turn, and the search recurses.
//!
//! # Example
//!
//! ```
//! use fd_solver::solver::Solver;
//! use fd_solver::types::Var;
//!
//! let x = Var::new("x", 1);
//! let y = Var::new("y", 1);
//! let z = Var::new("z", 1);
//!
//! let mut solver = Solver::new();
//! for v in [&x, &y, &z] {
//!     solver.add_variable(v);
//! }
//! solver.add_var_equation(&x, &y, false);
//! solver.add_var_equation(&y, &z, false);
//! solver.add_var_equation(&x, &z, false);
//!
//! // Three pairwise distinct 1-bit values do not exist.
//! assert!(!solver.solve());
//! ```

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use log::{debug, trace};
use num_bigint::BigUint;

use crate::domain::Domain;
use crate::equation::{Equation, EquationSet, SetKind};
use crate::relation::Relation;
use crate::types::Var;

/// Tuning knobs of the [`Solver`].
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Accept pending inequalities without search when every variable has more
    /// values than inequality partners.
    pub pigeonhole: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { pigeonhole: true }
    }
}

impl SolverConfig {
    pub fn with_pigeonhole(mut self, pigeonhole: bool) -> Self {
        self.pigeonhole = pigeonhole;
        self
    }
}

/// Constraint solver over finite integer domains.
///
/// A solver is either *conjunctive* (domains plus the equal-to and not-equal-to
/// relations) or *disjunctive* (a list of independent sub-solvers). It becomes
/// disjunctive the first time an OR set with two or more equations is added;
/// from then on every `add_*` call is forwarded to each branch.
///
/// Variables must be added before the equations mentioning them.
///
/// [`solve`][Solver::solve] consumes the solver, since solving destructively narrows
/// domains and removes constraints. Clone the solver to solve the same system twice;
/// clones share no state.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
    domains: BTreeMap<Var, Domain>,
    equal_to: Relation,
    not_equal_to: Relation,
    disjunction: Vec<Solver>,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Checks whether the solver has been split into OR-connected branches.
    pub fn is_disjunctive(&self) -> bool {
        !self.disjunction.is_empty()
    }

    /// The OR-connected branches (empty for a conjunctive solver).
    pub fn branches(&self) -> &[Solver] {
        &self.disjunction
    }

    /// Current domain of a declared variable (conjunctive solvers only).
    pub fn domain(&self, var: &Var) -> Option<&Domain> {
        self.domains.get(var)
    }

    /// Declared variables, in name order (conjunctive solvers only).
    pub fn variables(&self) -> impl Iterator<Item = &Var> {
        self.domains.keys()
    }

    /// Declares a variable with the full domain of its width.
    ///
    /// Declaring a variable again resets its domain.
    pub fn add_variable(&mut self, var: &Var) {
        if self.is_disjunctive() {
            for solver in &mut self.disjunction {
                solver.add_variable(var);
            }
        } else {
            self.domains.insert(var.clone(), Domain::full(var.width()));
        }
    }

    /// Adds `lhs == rhs` (or `lhs != rhs` if `equal` is `false`).
    pub fn add_var_equation(&mut self, lhs: &Var, rhs: &Var, equal: bool) {
        self.add_equation(Equation::vars(lhs, rhs, equal));
    }

    /// Adds `var == value` (or `var != value` if `equal` is `false`).
    pub fn add_value_equation(&mut self, var: &Var, value: impl Into<BigUint>, equal: bool) {
        self.add_equation(Equation::value(var, value, equal));
    }

    /// Adds the equation to the conjunction.
    ///
    /// # Panics
    ///
    /// Panics if the equation refers to an undeclared variable, or if it relates a
    /// variable to itself.
    pub fn add_equation(&mut self, equation: Equation) {
        if self.is_disjunctive() {
            for solver in &mut self.disjunction {
                solver.add_equation(equation.clone());
            }
            return;
        }

        match equation {
            Equation::Value { var, value, equal } => {
                let domain = self.domain_mut(&var);
                let value = Domain::singleton(value);
                if equal {
                    domain.intersect(&value);
                } else {
                    domain.exclude(&value);
                }
            }
            Equation::Vars { lhs, rhs, equal } => {
                assert_ne!(lhs, rhs, "Equation relates variable {} to itself", lhs);
                for var in [&lhs, &rhs] {
                    assert!(self.domains.contains_key(var), "Variable {} has not been declared", var);
                }
                if equal {
                    self.equal_to.connect(&lhs, &rhs);
                } else {
                    self.not_equal_to.connect(&lhs, &rhs);
                }
            }
        }
    }

    /// Adds the equation set.
    ///
    /// An OR set with several equations turns a conjunctive solver into a
    /// disjunction of copies, one per equation.
    pub fn add_equation_set(&mut self, set: &EquationSet) {
        if self.is_disjunctive() {
            for solver in &mut self.disjunction {
                solver.add_equation_set(set);
            }
            return;
        }

        if set.kind() == SetKind::Or && set.size() > 1 {
            debug!("add_equation_set: splitting into {} branches on {}", set.size(), set);

            let branches: Vec<Solver> = set
                .equations()
                .iter()
                .map(|equation| {
                    let mut branch = self.clone();
                    branch.add_equation(equation.clone());
                    branch
                })
                .collect();

            self.domains.clear();
            self.equal_to.clear();
            self.not_equal_to.clear();
            self.disjunction = branches;
        } else {
            for equation in set.equations() {
                self.add_equation(equation.clone());
            }
        }
    }

    /// Checks whether the system is satisfiable.
    ///
    /// Infeasibility is reported as `false`; it never panics on a well-formed system.
    pub fn solve(mut self) -> bool {
        debug!(
            "solve(vars = {}, eq = {}, ne = {}, branches = {})",
            self.domains.len(),
            self.equal_to.edges().count(),
            self.not_equal_to.edges().count(),
            self.disjunction.len()
        );

        if self.is_disjunctive() {
            return self.disjunction.into_iter().any(Solver::solve);
        }

        if !self.check_domains() {
            debug!("solve: empty domain");
            return false;
        }
        if !self.eliminate_equalities() {
            return false;
        }
        self.solve_inequalities()
    }

    /// Returns `false` if some variable has an empty domain.
    fn check_domains(&self) -> bool {
        self.domains.values().all(|domain| !domain.is_empty())
    }

    fn domain_mut(&mut self, var: &Var) -> &mut Domain {
        match self.domains.get_mut(var) {
            Some(domain) => domain,
            None => panic!("Variable {} has not been declared", var),
        }
    }

    /// Removes all equalities by substitution.
    fn eliminate_equalities(&mut self) -> bool {
        while let Some((lhs, rhs)) = self.equal_to.first_edge() {
            if !self.handle_equality(&lhs, &rhs) {
                return false;
            }
        }

        assert!(
            self.equal_to.is_empty(),
            "The set of equalities has not been reduced:\n{}",
            self
        );
        true
    }

    /// Handles `lhs == rhs` and replaces `lhs` with `rhs`.
    fn handle_equality(&mut self, lhs: &Var, rhs: &Var) -> bool {
        trace!("handle_equality({} == {})", lhs, rhs);
        assert_ne!(lhs, rhs, "Unexpected equality {} == {}", lhs, rhs);

        if self.not_equal_to.contains(lhs, rhs) {
            debug!("conflict: {} == {} && {} != {}", lhs, rhs, lhs, rhs);
            return false;
        }

        // The whole equivalence class of `lhs` (including `rhs`) shares one domain.
        let class: Vec<Var> = self.equal_to.neighbours(lhs).cloned().collect();
        let mut common = self.domains[lhs].clone();
        for var in &class {
            common.intersect(&self.domains[var]);
        }
        if common.is_empty() {
            debug!("conflict: empty domain for the class of {}", lhs);
            return false;
        }

        self.domain_mut(lhs).set(&common);
        for var in &class {
            self.domain_mut(var).set(&common);
        }

        self.equal_to.merge(lhs, rhs);
        self.not_equal_to.merge(lhs, rhs);
        true
    }

    /// Checks whether the remaining inequalities are satisfiable.
    ///
    /// Requires all equalities to be eliminated.
    fn solve_inequalities(&mut self) -> bool {
        if self.not_equal_to.is_empty() {
            return true;
        }
        if !self.check_domains() {
            return false;
        }

        let pending: Vec<(Var, Var)> = self
            .not_equal_to
            .edges()
            .map(|(a, b)| (a.clone(), b.clone()))
            .collect();

        for (lhs, rhs) in &pending {
            if !self.handle_inequality(lhs, rhs) {
                return false;
            }
        }

        let Some(var) = self.choose_split_variable() else {
            trace!("solve_inequalities: satisfiable without search");
            return true;
        };

        let candidates = self.domains[&var].clone();
        debug!("case split on {} in {}", var, candidates);

        for value in &candidates {
            let mut problem = self.clone();
            trace!("case split: trying {} = {}", var, value);
            problem.domains.insert(var.clone(), Domain::singleton(value));
            if problem.solve_inequalities() {
                return true;
            }
        }

        false
    }

    /// Handles `lhs != rhs`, dropping the inequality once it is implied by the domains.
    ///
    /// Disjoint domains make the inequality redundant. If one side is fixed to a
    /// single value, that value is removed from the other side.
    fn handle_inequality(&mut self, lhs: &Var, rhs: &Var) -> bool {
        trace!("handle_inequality({} != {})", lhs, rhs);
        assert_ne!(lhs, rhs, "Unexpected inequality {} != {}", lhs, rhs);

        let lhs_domain = &self.domains[lhs];
        let rhs_domain = &self.domains[rhs];

        if !lhs_domain.overlaps(rhs_domain) {
            self.not_equal_to.disconnect(lhs, rhs);
            return true;
        }

        let (fixed, other) = match (lhs_domain.is_singular(), rhs_domain.is_singular()) {
            (true, true) => {
                debug!("conflict: {} != {} with dom = {}", lhs, rhs, lhs_domain);
                return false;
            }
            (true, false) => (lhs_domain.clone(), rhs),
            (false, true) => (rhs_domain.clone(), lhs),
            (false, false) => return true,
        };

        let domain = self.domain_mut(other);
        domain.exclude(&fixed);
        if domain.is_empty() {
            debug!("conflict: dom({}) is empty after excluding {}", other, fixed);
            return false;
        }
        self.not_equal_to.disconnect(lhs, rhs);
        true
    }

    /// Picks the variable to branch on, or `None` if no branching is needed.
    ///
    /// Without branching the system is satisfiable: each variable has more values
    /// than partners it must differ from. Among the variables violating that bound,
    /// the one with the smallest domain is chosen.
    fn choose_split_variable(&self) -> Option<Var> {
        let mut best: Option<(&Var, BigUint)> = None;

        for var in self.not_equal_to.vertices() {
            let size = self.domains[var].size();
            if size > BigUint::from(self.not_equal_to.degree(var)) {
                continue;
            }
            if best.as_ref().map_or(true, |(_, min)| size < *min) {
                best = Some((var, size));
            }
        }

        if let Some((var, _)) = best {
            return Some(var.clone());
        }
        if self.config.pigeonhole {
            return None;
        }

        // No shortcut: branch on the smallest constrained domain.
        self.not_equal_to
            .vertices()
            .min_by_key(|var| self.domains[*var].size())
            .cloned()
    }
}

impl Display for Solver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_disjunctive() {
            writeln!(f, "OR {{")?;
            for solver in &self.disjunction {
                write!(f, "{}", solver)?;
            }
        } else {
            writeln!(f, "AND {{")?;
            for (lhs, rhs) in self.equal_to.edges() {
                writeln!(f, "{} == {}", lhs, rhs)?;
            }
            for (lhs, rhs) in self.not_equal_to.edges() {
                writeln!(f, "{} != {}", lhs, rhs)?;
            }
        }
        writeln!(f, "}}")
    }
}
