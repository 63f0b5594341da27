//! Hierarchical symbol table.
//!
//! Paths are name sequences from the global root (the empty path is the
//! global scope). Names are visible from a path when declared at any node on
//! the walk from the root down to that path.

use std::collections::BTreeMap;

/// The renderer's axis names. Always visible, never declared or prefixed.
pub const AXIS_NAMES: [&str; 4] = ["x", "y", "X", "Y"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Namespace,
    Function,
    Macro,
}

/// A declared name: `None` for a variable or parameter, or the nested
/// scope it opens.
pub type Member = Option<ScopeNode>;

#[derive(Debug, Clone, PartialEq)]
pub struct ScopeNode {
    pub kind: ScopeKind,
    pub members: BTreeMap<String, Member>,
}

impl ScopeNode {
    fn new(kind: ScopeKind) -> Self {
        ScopeNode {
            kind,
            members: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScopeTree {
    root: ScopeNode,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    /// An empty tree holding only the axis names.
    pub fn new() -> Self {
        let mut root = ScopeNode::new(ScopeKind::Namespace);
        for axis in AXIS_NAMES {
            root.members.insert(axis.to_owned(), None);
        }
        ScopeTree { root }
    }

    /// A tree whose global scope also holds `builtins`.
    pub fn with_builtins<'a>(builtins: impl IntoIterator<Item = &'a str>) -> Self {
        let mut tree = Self::new();
        for name in builtins {
            tree.root.members.insert(name.to_owned(), None);
        }
        tree
    }

    /// Node at `path`, creating namespace nodes along the way. A variable
    /// in the way becomes an empty namespace.
    fn node_mut(&mut self, path: &[String]) -> &mut ScopeNode {
        let mut node = &mut self.root;
        for name in path {
            node = node
                .members
                .entry(name.clone())
                .or_default()
                .get_or_insert_with(|| ScopeNode::new(ScopeKind::Namespace));
        }
        node
    }

    fn node(&self, path: &[String]) -> Option<&ScopeNode> {
        let mut node = &self.root;
        for name in path {
            match node.members.get(name) {
                Some(Some(child)) => node = child,
                _ => return None,
            }
        }
        Some(node)
    }

    /// Declare `name` as a variable at `path`. An existing scope of the same
    /// name is left untouched.
    pub fn declare(&mut self, path: &[String], name: &str) {
        self.node_mut(path)
            .members
            .entry(name.to_owned())
            .or_default();
    }

    /// Declare `name` as a nested scope at `path`, returning whether it was
    /// newly created. An existing scope keeps its members.
    pub fn declare_scope(&mut self, path: &[String], name: &str, kind: ScopeKind) -> bool {
        let node = self.node_mut(path);
        match node.members.get_mut(name) {
            Some(Some(existing)) => {
                existing.kind = kind;
                false
            }
            _ => {
                node.members
                    .insert(name.to_owned(), Some(ScopeNode::new(kind)));
                true
            }
        }
    }

    /// Find `name` from `path`, innermost scope first. Returns the path of
    /// the scope that declares it.
    pub fn resolve(&self, path: &[String], name: &str) -> Option<Vec<String>> {
        (0..=path.len())
            .rev()
            .find(|&depth| {
                self.node(&path[..depth])
                    .is_some_and(|node| node.members.contains_key(name))
            })
            .map(|depth| path[..depth].to_vec())
    }

    /// Find a nested scope called `name` visible from `path` and return its
    /// own full path.
    pub fn resolve_scope(&self, path: &[String], name: &str) -> Option<(Vec<String>, ScopeKind)> {
        (0..=path.len()).rev().find_map(|depth| {
            let node = self.node(&path[..depth])?;
            match node.members.get(name) {
                Some(Some(child)) => {
                    let mut full = path[..depth].to_vec();
                    full.push(name.to_owned());
                    Some((full, child.kind))
                }
                _ => None,
            }
        })
    }

    /// Whether `name` is a user function visible from `path`.
    pub fn resolve_function(&self, path: &[String], name: &str) -> bool {
        matches!(
            self.resolve_scope(path, name),
            Some((_, ScopeKind::Function))
        )
    }
}
