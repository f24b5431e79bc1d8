//! Renderer: resolved nodes and lab steps to launcher documents.
//!
//! Pure functions, no I/O. Item order is significant: the first item is
//! always informational (`valid: false`).

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    DisplayItem, Document, DomainError, Icon, LabStep, Node, NodeKind, DIAGNOSIS_SEPARATOR,
};

pub const DIAGNOSIS_TITLE: &str = "鑑別診断結果:";
pub const NOTE_TITLE: &str = "備考";
pub const RESTART_TITLE: &str = "最初からやり直す";
pub const ERROR_TITLE: &str = "Error";

/// Builds display items carrying the configured icon and launcher keyword.
#[derive(Debug, Clone)]
pub struct Renderer {
    icon: String,
    keyword: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new("icon.png", "anemia")
    }
}

impl Renderer {
    pub fn new(icon: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            keyword: keyword.into(),
        }
    }

    fn item(
        &self,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        arg: &str,
        valid: bool,
    ) -> DisplayItem {
        DisplayItem {
            title: title.into(),
            subtitle: subtitle.into(),
            arg: arg.to_string(),
            valid,
            icon: Icon {
                path: self.icon.clone(),
            },
        }
    }

    fn info(&self, title: impl Into<String>, subtitle: impl Into<String>) -> DisplayItem {
        self.item(title, subtitle, "", false)
    }

    /// Question: headline, then one selectable item per option.
    /// Result: headline, diagnoses, optional note, restart pointing at `root`.
    pub fn render_node(&self, node: &Node, root: &str) -> Document {
        let mut items = vec![self.info(node.headline(), node.detail())];

        match &node.kind {
            NodeKind::Question { options } => {
                items.extend(
                    options
                        .iter()
                        .map(|c| self.item(&c.label, "選択して次へ進む", &c.next, true)),
                );
            }
            NodeKind::Result { diagnoses, note } => {
                items.push(self.info(DIAGNOSIS_TITLE, diagnoses.join(DIAGNOSIS_SEPARATOR)));
                if let Some(note) = note {
                    items.push(self.info(NOTE_TITLE, note.as_str()));
                }
                items.push(self.item(RESTART_TITLE, "フローチャートの先頭に戻ります", root, true));
            }
        }
        Document { items }
    }

    /// Single informational item for an unresolvable identifier.
    pub fn render_not_found(&self, id: &str, cause: &DomainError) -> Document {
        debug!("render_not_found: {} ({})", id, cause);
        Document {
            items: vec![self.info(ERROR_TITLE, format!("Node not found: {}", id))],
        }
    }

    pub fn render_lab_step(&self, step: &LabStep) -> Document {
        let items = match step {
            LabStep::Ask {
                prompt,
                findings,
                supplied,
            } => {
                let title = if findings.is_empty() {
                    prompt.request().to_string()
                } else {
                    format!("{}。{}", findings.join(", "), prompt.request())
                };
                let usage = std::iter::once(self.keyword.as_str())
                    .chain(supplied.iter().map(String::as_str))
                    .chain(std::iter::once(prompt.example()))
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                vec![self.info(title, format!("例: {}", usage))]
            }
            LabStep::NoAnemia { sex, hb, threshold } => vec![self.info(
                format!("✅ Hb {:.1} g/dL - 貧血なし", hb),
                format!("性別: {}, Hb < {:.1} g/dL で貧血 (WHO基準)", sex, threshold),
            )],
            LabStep::Conclude { kind, mcv } => {
                let mut items = vec![self.info(
                    format!("🔍 {}", kind.headline(*mcv)),
                    format!("疑われる疾患: {}", kind.diagnoses().join(DIAGNOSIS_SEPARATOR)),
                )];
                if let Some((title, subtitle)) = kind.hint() {
                    items.push(self.info(title, subtitle));
                }
                items
            }
        };
        Document { items }
    }
}

/// Serialize a document; non-ASCII stays literal.
pub fn to_json(document: &Document, pretty: bool) -> ApplicationResult<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(document)
    } else {
        serde_json::to_string(document)
    };
    rendered.map_err(|source| ApplicationError::Render { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Choice, Prompt, ResultKind};

    #[test]
    fn given_question_when_render_then_headline_then_options() {
        let node = Node::question(
            &["head", "detail"],
            vec![Choice::new("one", "X"), Choice::new("two", "Y")],
        );
        let doc = Renderer::default().render_node(&node, "root");

        assert_eq!(doc.items.len(), 3);
        assert_eq!(doc.items[0].title, "head");
        assert_eq!(doc.items[0].subtitle, "detail");
        assert!(!doc.items[0].valid);
        assert_eq!(doc.selectable_args(), vec!["X", "Y"]);
    }

    #[test]
    fn given_result_without_note_when_render_then_no_note_item() {
        let node = Node::result(&["head"], &["a", "b"], None);
        let doc = Renderer::default().render_node(&node, "root");

        let titles: Vec<_> = doc.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["head", DIAGNOSIS_TITLE, RESTART_TITLE]);
        assert_eq!(doc.items[1].subtitle, "a, b");
        assert_eq!(doc.selectable_args(), vec!["root"]);
    }

    #[test]
    fn given_custom_icon_when_render_then_every_item_carries_it() {
        let node = Node::result(&["head"], &["a"], Some("n"));
        let doc = Renderer::new("img/drop.png", "anemia").render_node(&node, "root");
        assert!(doc.items.iter().all(|i| i.icon.path == "img/drop.png"));
    }

    #[test]
    fn given_first_prompt_when_render_then_usage_has_keyword_and_example() {
        let step = LabStep::Ask {
            prompt: Prompt::Wbc,
            findings: vec![],
            supplied: vec![],
        };
        let doc = Renderer::default().render_lab_step(&step);
        assert_eq!(doc.items[0].title, "WBCを入力してください");
        assert_eq!(doc.items[0].subtitle, "例: anemia 4500");
    }

    #[test]
    fn given_pancytopenia_when_render_then_single_result_item() {
        let step = LabStep::Conclude {
            kind: ResultKind::Pancytopenia,
            mcv: None,
        };
        let doc = Renderer::default().render_lab_step(&step);
        assert_eq!(doc.items.len(), 1);
        assert_eq!(doc.items[0].title, "🔍 汎血球減少 → 骨髄検査を検討");
        assert!(!doc.items[0].valid);
    }

    #[test]
    fn given_document_when_to_json_then_non_ascii_literal() {
        let doc = Renderer::default().render_not_found("Z", &DomainError::NodeNotFound("Z".into()));
        let json = to_json(&doc, false).unwrap();
        assert!(json.contains(r#""title":"Error""#));
        assert!(!json.contains("\\u"));

        let step = LabStep::Conclude {
            kind: ResultKind::Microcytic,
            mcv: Some(70.0),
        };
        let json = to_json(&Renderer::default().render_lab_step(&step), true).unwrap();
        assert!(json.contains("小球性貧血 (MCV 70)"));
    }
}
