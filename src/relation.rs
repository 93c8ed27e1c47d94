//! Symmetric binary relations between variables.
//!
//! The solver keeps two relations: "is equal to" and "is not equal to".
//! Both are undirected graphs over variables. [`Relation`] only exposes
//! operations that keep the graph symmetric, so `b ∈ neighbours(a)` always
//! implies `a ∈ neighbours(b)`.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::Var;

/// An undirected graph over variables without self-loops.
///
/// Vertices without edges are never stored: a variable is present iff it has
/// at least one neighbour.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Relation {
    edges: BTreeMap<Var, BTreeSet<Var>>,
}

impl Relation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }

    /// Adds the edge `a -- b`.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`.
    pub fn connect(&mut self, a: &Var, b: &Var) {
        assert_ne!(a, b, "Self-loop {} -- {} is not allowed", a, b);
        self.edges.entry(a.clone()).or_default().insert(b.clone());
        self.edges.entry(b.clone()).or_default().insert(a.clone());
    }

    /// Removes the edge `a -- b`, if present.
    pub fn disconnect(&mut self, a: &Var, b: &Var) {
        self.remove_half(a, b);
        self.remove_half(b, a);
    }

    pub fn contains(&self, a: &Var, b: &Var) -> bool {
        self.edges.get(a).is_some_and(|set| set.contains(b))
    }

    /// Returns the neighbours of `v` (empty if `v` has none).
    pub fn neighbours<'a>(&'a self, v: &Var) -> impl Iterator<Item = &'a Var> + 'a {
        self.edges.get(v).into_iter().flatten()
    }

    /// Number of neighbours of `v`.
    pub fn degree(&self, v: &Var) -> usize {
        self.edges.get(v).map_or(0, BTreeSet::len)
    }

    /// Variables having at least one neighbour, in name order.
    pub fn vertices(&self) -> impl Iterator<Item = &Var> {
        self.edges.keys()
    }

    /// All edges, each reported once as `(a, b)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (&Var, &Var)> {
        self.edges
            .iter()
            .flat_map(|(a, set)| set.iter().filter(move |b| a < *b).map(move |b| (a, b)))
    }

    /// Returns some edge of the relation, or `None` if it is empty.
    pub fn first_edge(&self) -> Option<(Var, Var)> {
        let (a, set) = self.edges.iter().next()?;
        let b = set.iter().next()?;
        Some((a.clone(), b.clone()))
    }

    /// Substitutes `from` with `into`.
    ///
    /// Every neighbour of `from` (except `into` itself) becomes a neighbour of `into`,
    /// then `from` is removed from the graph.
    pub fn merge(&mut self, from: &Var, into: &Var) {
        let Some(neighbours) = self.edges.remove(from) else {
            return;
        };

        for z in &neighbours {
            self.remove_half(z, from);
            if z != into {
                self.connect(z, into);
            }
        }
    }

    /// Removes `v` together with all its edges.
    pub fn remove(&mut self, v: &Var) {
        if let Some(neighbours) = self.edges.remove(v) {
            for z in &neighbours {
                self.remove_half(z, v);
            }
        }
    }

    fn remove_half(&mut self, a: &Var, b: &Var) {
        if let Some(set) = self.edges.get_mut(a) {
            set.remove(b);
            if set.is_empty() {
                self.edges.remove(a);
            }
        }
    }
}
