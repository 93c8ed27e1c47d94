//! # fd-solver: finite-domain equation solving in Rust
//!
//! **`fd-solver`** decides satisfiability of systems of equalities and inequalities
//! over bounded-width integer variables. It is designed for test-case generation:
//! before a concrete instruction sequence is emitted, facts such as "these two
//! operands must alias" or "this address must not hit that cache set" are checked
//! for consistency.
//!
//! ## Constraints
//!
//! Every variable has a bit width `w` and ranges over `[0, 2^w - 1]`.
//! The supported atomic constraints are:
//!
//! - `x == c` and `x != c`, for a constant `c`,
//! - `x == y` and `x != y`, for variables `x` and `y`.
//!
//! Constraints are combined with AND, and with OR through [`EquationSet`][crate::equation::EquationSet]s.
//! Values are arbitrary-precision ([`num_bigint::BigUint`]), so 64-bit addresses and wider fields are fine.
//!
//! ## Basic Usage
//!
//! ```rust
//! use fd_solver::equation::EquationSet;
//! use fd_solver::solver::Solver;
//! use fd_solver::types::Var;
//!
//! let a = Var::new("a", 4);
//! let b = Var::new("b", 4);
//! let c = Var::new("c", 4);
//!
//! let mut solver = Solver::new();
//! solver.add_variable(&a);
//! solver.add_variable(&b);
//! solver.add_variable(&c);
//!
//! // a == b && (b == c || a == 3) && c != 3
//! solver.add_var_equation(&a, &b, true);
//! let mut set = EquationSet::or();
//! set.add_var_equation(&b, &c, true);
//! set.add_value_equation(&a, 3u32, true);
//! solver.add_equation_set(&set);
//! solver.add_value_equation(&c, 3u32, false);
//!
//! assert!(solver.solve());
//! ```
//!
//! ## Core Components
//!
//! - **[`solver`]**: the [`Solver`][crate::solver::Solver] and its configuration.
//! - **[`domain`]** and **[`range`]**: finite sets of integers.
//! - **[`equation`]**: equations and AND/OR equation sets.
//! - **[`relation`]**: symmetric variable relations used by the solver.
//! - **[`types`]**: variables.

pub mod domain;
pub mod equation;
pub mod range;
pub mod relation;
pub mod solver;
pub mod types;
