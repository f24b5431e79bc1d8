//! Flowchart store: identifier lookup with alias chasing, static validation
//! and tree display.

use std::collections::{BTreeMap, HashSet};

use termtree::Tree;
use tracing::{debug, instrument};

use crate::domain::entities::{Entry, Node, NodeKind};
use crate::domain::error::DomainError;

/// Immutable mapping from node identifier to table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flowchart {
    root: String,
    entries: BTreeMap<String, Entry>,
}

impl Flowchart {
    /// Build a table. `root` is the identifier restart items point to.
    pub fn new<K: Into<String>>(
        root: impl Into<String>,
        entries: impl IntoIterator<Item = (K, Entry)>,
    ) -> Self {
        Self {
            root: root.into(),
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All identifiers in the table, aliases included.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Resolve an identifier to its node, following aliases.
    pub fn resolve(&self, id: &str) -> Result<&Node, DomainError> {
        self.resolve_with_id(id).map(|(_, node)| node)
    }

    /// Like [`Flowchart::resolve`], also returning the identifier the chain ended on.
    ///
    /// Terminates within `len()` hops: a revisited identifier is reported as
    /// [`DomainError::AliasCycle`], a missing one as [`DomainError::NodeNotFound`].
    pub fn resolve_with_id<'a>(&'a self, id: &str) -> Result<(&'a str, &'a Node), DomainError> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = id;

        loop {
            if !visited.insert(current) {
                debug!("resolve: alias cycle at {}", current);
                return Err(DomainError::AliasCycle(id.to_string()));
            }
            match self.entries.get_key_value(current) {
                None => return Err(DomainError::NodeNotFound(current.to_string())),
                Some((key, Entry::Node(node))) => return Ok((key.as_str(), node)),
                Some((_, Entry::Alias(target))) => current = target.as_str(),
            }
        }
    }

    /// Check the whole table for structural defects.
    ///
    /// Returns every defect found; an empty list means the table is consistent.
    #[instrument(level = "debug", skip(self))]
    pub fn validate(&self) -> Vec<DomainError> {
        let mut defects = Vec::new();

        if let Err(e) = self.resolve(&self.root) {
            defects.push(match e {
                DomainError::AliasCycle(_) => e,
                _ => DomainError::MissingRoot(self.root.clone()),
            });
        }

        for (id, entry) in &self.entries {
            match entry {
                Entry::Alias(target) => match self.resolve(id) {
                    Ok(_) => {}
                    Err(DomainError::AliasCycle(_)) => {
                        defects.push(DomainError::AliasCycle(id.clone()))
                    }
                    Err(_) => defects.push(DomainError::DanglingAlias {
                        alias: id.clone(),
                        target: target.clone(),
                    }),
                },
                Entry::Node(node) => self.validate_node(id, node, &mut defects),
            }
        }

        debug!("validate: {} entries, {} defects", self.len(), defects.len());
        defects
    }

    fn validate_node(&self, id: &str, node: &Node, defects: &mut Vec<DomainError>) {
        if node.text.is_empty() {
            defects.push(DomainError::EmptyText(id.to_string()));
        }
        match &node.kind {
            NodeKind::Result { diagnoses, .. } => {
                if diagnoses.is_empty() {
                    defects.push(DomainError::EmptyDiagnoses(id.to_string()));
                }
            }
            NodeKind::Question { options } => {
                if options.is_empty() {
                    defects.push(DomainError::EmptyOptions(id.to_string()));
                }
                let mut seen = HashSet::new();
                for choice in options {
                    if !seen.insert(choice.next.as_str()) {
                        defects.push(DomainError::DuplicateTarget {
                            node: id.to_string(),
                            target: choice.next.clone(),
                        });
                    }
                    if self.resolve(&choice.next).is_err() {
                        defects.push(DomainError::DanglingTarget {
                            node: id.to_string(),
                            label: choice.label.clone(),
                            target: choice.next.clone(),
                        });
                    }
                }
            }
        }
    }

    /// Everything reachable from the root, as a printable tree.
    ///
    /// Option cycles are cut and marked instead of followed.
    pub fn to_tree(&self) -> Tree<String> {
        let mut path = Vec::new();
        self.subtree(&self.root, None, &mut path)
    }

    fn subtree(&self, id: &str, label: Option<&str>, path: &mut Vec<String>) -> Tree<String> {
        let prefix = label.map(|l| format!("[{}] ", l)).unwrap_or_default();

        let (resolved, node) = match self.resolve_with_id(id) {
            Ok(found) => found,
            Err(e) => return Tree::new(format!("{}{}: {}", prefix, id, e)),
        };
        if path.iter().any(|p| p == resolved) {
            return Tree::new(format!("{}{} (cycle)", prefix, resolved));
        }

        let caption = match &node.kind {
            NodeKind::Question { .. } => format!("{}{}: {}", prefix, resolved, node.headline()),
            NodeKind::Result { diagnoses, .. } => {
                format!("{}{}: {} => {}", prefix, resolved, node.headline(), diagnoses.join(", "))
            }
        };

        path.push(resolved.to_string());
        let leaves: Vec<_> = node
            .options()
            .iter()
            .map(|c| self.subtree(&c.next, Some(&c.label), path))
            .collect();
        path.pop();

        Tree::new(caption).with_leaves(leaves)
    }
}
