use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DependencyError {
    #[error("Circular dependency detected: {0}")]
    CircularDependency(String),
    #[error("Duplicate type name: {0}")]
    DuplicateNode(String),
}

/// A type declared in a generation unit and its direct supertypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    pub name: String,
    pub supertypes: Vec<String>,
}

/// Orders the types of one unit so that every locally declared supertype is
/// emitted before its subtypes. Supertypes declared elsewhere are ignored.
#[derive(Debug, Default)]
pub struct DependencyResolver {
    nodes: Vec<DependencyNode>,
    index: HashMap<String, usize>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

impl DependencyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, name: &str, supertypes: &[String]) -> Result<(), DependencyError> {
        if self.index.contains_key(name) {
            return Err(DependencyError::DuplicateNode(name.to_string()));
        }
        self.index.insert(name.to_string(), self.nodes.len());
        self.nodes.push(DependencyNode {
            name: name.to_string(),
            supertypes: supertypes.to_vec(),
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first walk of the supertype closure, in insertion order.
    /// The result is independent of anything but insertion order and edges.
    pub fn resolve_build_order(&self) -> Result<Vec<&DependencyNode>, DependencyError> {
        let mut marks: HashMap<usize, Mark> = HashMap::new();
        let mut order = Vec::with_capacity(self.nodes.len());
        for idx in 0..self.nodes.len() {
            let mut path = Vec::new();
            self.visit(idx, &mut marks, &mut path, &mut order)?;
        }
        Ok(order.into_iter().map(|idx| &self.nodes[idx]).collect())
    }

    fn visit(
        &self,
        idx: usize,
        marks: &mut HashMap<usize, Mark>,
        path: &mut Vec<usize>,
        order: &mut Vec<usize>,
    ) -> Result<(), DependencyError> {
        match marks.get(&idx) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = path.iter().position(|p| *p == idx).unwrap_or(0);
                let mut cycle: Vec<&str> = path[start..]
                    .iter()
                    .map(|p| self.nodes[*p].name.as_str())
                    .collect();
                cycle.push(&self.nodes[idx].name);
                return Err(DependencyError::CircularDependency(cycle.join(" -> ")));
            }
            None => {}
        }
        marks.insert(idx, Mark::Visiting);
        path.push(idx);
        for supertype in &self.nodes[idx].supertypes {
            if let Some(&next) = self.index.get(supertype) {
                self.visit(next, marks, path, order)?;
            }
        }
        path.pop();
        marks.insert(idx, Mark::Done);
        order.push(idx);
        Ok(())
    }

    /// Local supertypes of a node, i.e. the edges the ordering honours.
    pub fn get_dependencies_for(&self, name: &str) -> Vec<&str> {
        let Some(&idx) = self.index.get(name) else {
            return Vec::new();
        };
        self.nodes[idx]
            .supertypes
            .iter()
            .filter(|s| self.index.contains_key(s.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Text rendering of the local edges, for debug logging.
    pub fn generate_text_graph(&self) -> String {
        let mut output = String::new();
        for node in &self.nodes {
            output.push_str(&node.name);
            output.push('\n');
            for dep in self.get_dependencies_for(&node.name) {
                output.push_str(&format!("  -> {}\n", dep));
            }
        }
        output
    }

    /// Names reachable through local supertype edges, the node itself excluded.
    pub fn supertype_closure(&self, name: &str) -> HashSet<&str> {
        let mut seen = HashSet::new();
        let mut stack = self.get_dependencies_for(name);
        while let Some(next) = stack.pop() {
            if seen.insert(next) {
                stack.extend(self.get_dependencies_for(next));
            }
        }
        seen
    }
}
