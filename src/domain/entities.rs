//! Domain entities: core data structures

use serde::{Deserialize, Serialize};

/// Separator used when diagnoses are listed on one line.
pub const DIAGNOSIS_SEPARATOR: &str = ", ";

/// One option of a question node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    /// Identifier fed back as the next invocation's argument
    pub next: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, next: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            next: next.into(),
        }
    }
}

/// Content of a node: either it asks something or it concludes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Question {
        options: Vec<Choice>,
    },
    Result {
        diagnoses: Vec<String>,
        note: Option<String>,
    },
}

/// A resolved unit of the decision tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Display lines, first is the headline
    pub text: Vec<String>,
    pub kind: NodeKind,
}

impl Node {
    pub fn question(text: &[&str], options: Vec<Choice>) -> Self {
        Self {
            text: text.iter().map(|s| s.to_string()).collect(),
            kind: NodeKind::Question { options },
        }
    }

    pub fn result(text: &[&str], diagnoses: &[&str], note: Option<&str>) -> Self {
        Self {
            text: text.iter().map(|s| s.to_string()).collect(),
            kind: NodeKind::Result {
                diagnoses: diagnoses.iter().map(|s| s.to_string()).collect(),
                note: note.map(str::to_string),
            },
        }
    }

    pub fn headline(&self) -> &str {
        self.text.first().map(String::as_str).unwrap_or_default()
    }

    /// Detail lines joined into one subtitle.
    pub fn detail(&self) -> String {
        self.text.iter().skip(1).map(String::as_str).collect::<Vec<_>>().join(" ")
    }

    pub fn options(&self) -> &[Choice] {
        match &self.kind {
            NodeKind::Question { options } => options,
            NodeKind::Result { .. } => &[],
        }
    }

    pub fn is_result(&self) -> bool {
        matches!(self.kind, NodeKind::Result { .. })
    }
}

/// An entry of the flowchart table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Pure redirection to another identifier
    Alias(String),
    Node(Node),
}

/// Icon reference as understood by the launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    pub path: String,
}

/// One row in the launcher's result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayItem {
    pub title: String,
    pub subtitle: String,
    /// Opaque payload, empty when there is nothing to submit
    pub arg: String,
    /// Whether the launcher may submit this item
    pub valid: bool,
    pub icon: Icon,
}

/// The single JSON document printed per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    pub items: Vec<DisplayItem>,
}

impl Document {
    pub fn first(&self) -> Option<&DisplayItem> {
        self.items.first()
    }

    /// Arguments of all submittable items, in order.
    pub fn selectable_args(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|i| i.valid)
            .map(|i| i.arg.as_str())
            .collect()
    }
}

/// Expand environment variables in a path string.
///
/// Supports `$VAR`, `${VAR}` and `~`. Falls back to the input unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_multiline_text_when_split_then_headline_and_detail() {
        let node = Node::result(&["head", "a", "b"], &["x"], None);
        assert_eq!(node.headline(), "head");
        assert_eq!(node.detail(), "a b");
    }

    #[test]
    fn given_result_node_when_options_then_empty() {
        let node = Node::result(&["head"], &["x"], Some("n"));
        assert!(node.options().is_empty());
        assert!(node.is_result());
    }

    #[test]
    fn given_item_when_serialized_then_matches_launcher_shape() {
        let doc = Document {
            items: vec![DisplayItem {
                title: "貧血".into(),
                subtitle: "".into(),
                arg: "A".into(),
                valid: true,
                icon: Icon {
                    path: "icon.png".into(),
                },
            }],
        };
        let json = serde_json::to_string(&doc).unwrap();
        let expected = concat!(
            r#"{"items":[{"title":"貧血","subtitle":"","arg":"A","valid":true,"#,
            r#""icon":{"path":"icon.png"}}]}"#
        );
        assert_eq!(json, expected);
    }
}
