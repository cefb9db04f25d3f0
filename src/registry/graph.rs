//! Inheritance graph for scriptable classes.
//!
//! Tracks the declared bases of every class so that each class can be
//! registered with its full set of ancestors, and rejects cycles.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};

/// Declared base lists, keyed by class name in registration order.
#[derive(Debug, Default)]
pub struct InheritanceGraph {
    bases: IndexMap<String, Vec<String>>,
}

impl InheritanceGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class with its direct bases. Re-registering replaces the
    /// earlier bases.
    pub fn add_class(&mut self, name: impl Into<String>, bases: Vec<String>) {
        self.bases.insert(name.into(), bases);
    }

    /// Whether `name` is a registered class.
    pub fn contains(&self, name: &str) -> bool {
        self.bases.contains_key(name)
    }

    /// Direct bases of `name`.
    pub fn bases_of(&self, name: &str) -> &[String] {
        self.bases.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get the total number of classes.
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Check if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// `(class, base)` pairs where the base is not a registered class.
    pub fn unresolved_bases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bases.iter().flat_map(move |(class, bases)| {
            bases
                .iter()
                .filter(move |base| !self.contains(base))
                .map(move |base| (class.as_str(), base.as_str()))
        })
    }

    /// Compute the ancestors of every class.
    ///
    /// Ancestors are the direct bases in declared order, followed by the
    /// ancestors of each registered base, each name appearing once. Bases
    /// that are not registered are kept as given. Returns an error naming
    /// the cycle if the bases are circular.
    pub fn closure(&self) -> Result<IndexMap<String, Vec<String>>, CycleError> {
        if let Some(cycle) = self.find_cycle() {
            return Err(CycleError { cycle });
        }

        let mut memo: HashMap<&str, Vec<String>> = HashMap::new();
        let mut result = IndexMap::with_capacity(self.bases.len());
        for name in self.bases.keys() {
            let ancestors = self.ancestors(name, &mut memo);
            result.insert(name.clone(), ancestors);
        }
        Ok(result)
    }

    fn ancestors<'a>(&'a self, name: &'a str, memo: &mut HashMap<&'a str, Vec<String>>) -> Vec<String> {
        if let Some(done) = memo.get(name) {
            return done.clone();
        }

        let direct = self.bases_of(name);
        let mut seen: IndexSet<String> = direct.iter().cloned().collect();
        for base in direct {
            if self.contains(base) {
                seen.extend(self.ancestors(base, memo));
            }
        }

        let ancestors: Vec<String> = seen.into_iter().collect();
        memo.insert(name, ancestors.clone());
        ancestors
    }

    /// Find a cycle in the graph (for error reporting).
    fn find_cycle(&self) -> Option<Vec<String>> {
        let mut visited = IndexSet::new();
        let mut rec_stack = IndexSet::new();
        let mut path = Vec::new();

        for start in self.bases.keys() {
            if !visited.contains(start.as_str()) {
                if let Some(cycle) = self.dfs_find_cycle(start, &mut visited, &mut rec_stack, &mut path) {
                    return Some(cycle);
                }
            }
        }

        None
    }

    fn dfs_find_cycle<'a>(
        &'a self,
        node: &'a str,
        visited: &mut IndexSet<&'a str>,
        rec_stack: &mut IndexSet<&'a str>,
        path: &mut Vec<&'a str>,
    ) -> Option<Vec<String>> {
        visited.insert(node);
        rec_stack.insert(node);
        path.push(node);

        for base in self.bases_of(node) {
            if !self.contains(base) {
                continue; // unresolved bases cannot close a cycle
            }

            if !visited.contains(base.as_str()) {
                if let Some(cycle) = self.dfs_find_cycle(base, visited, rec_stack, path) {
                    return Some(cycle);
                }
            } else if rec_stack.contains(base.as_str()) {
                let cycle_start = path.iter().position(|x| *x == base.as_str()).unwrap_or(0);
                let mut cycle: Vec<String> = path[cycle_start..].iter().map(|s| s.to_string()).collect();
                cycle.push(base.clone()); // close the loop
                return Some(cycle);
            }
        }

        path.pop();
        rec_stack.shift_remove(node);
        None
    }
}

/// Error returned when class bases form a cycle.
#[derive(Debug)]
pub struct CycleError {
    /// The classes involved, first and last being the same.
    pub cycle: Vec<String>,
}

impl std::fmt::Display for CycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cycle.join(" -> "))
    }
}

impl std::error::Error for CycleError {}
