//! Tests for the flowchart store and identifier-mode rendering

use std::collections::HashSet;

use anemia_flow::application::render::{DIAGNOSIS_TITLE, ERROR_TITLE, RESTART_TITLE};
use anemia_flow::application::strategy::FlowchartStrategy;
use anemia_flow::application::{NextStep, Renderer};
use anemia_flow::domain::{
    anemia_chart, Choice, DomainError, Entry, Flowchart, Node, NodeKind, ROOT_ID,
};
use anemia_flow::util::testing;

fn flow() -> FlowchartStrategy<'static> {
    testing::init_test_setup();
    FlowchartStrategy::new(anemia_chart(), Renderer::default())
}

// ============================================================
// Properties over the whole table
// ============================================================

#[test]
fn given_every_identifier_when_rendered_then_first_item_is_informational() {
    let strategy = flow();
    for id in anemia_chart().ids() {
        let doc = strategy.compute_next_step(id);
        let first = doc.first().expect("at least one item");
        assert!(!first.valid, "first item of {} must not be selectable", id);
        assert_ne!(first.title, ERROR_TITLE, "{} should resolve", id);
    }
}

#[test]
fn given_question_nodes_when_rendered_then_selectable_args_are_option_targets() {
    let chart = anemia_chart();
    let strategy = flow();
    for id in chart.ids() {
        let node = chart.resolve(id).unwrap();
        let NodeKind::Question { options } = &node.kind else {
            continue;
        };

        let doc = strategy.compute_next_step(id);
        let args: HashSet<&str> = doc.selectable_args().into_iter().collect();
        let targets: HashSet<&str> = options.iter().map(|c| c.next.as_str()).collect();

        assert_eq!(args, targets, "node {}", id);
        assert_eq!(targets.len(), options.len(), "duplicate targets in {}", id);
        for target in targets {
            assert!(chart.resolve(target).is_ok(), "{} -> {} dangles", id, target);
        }
    }
}

#[test]
fn given_result_nodes_when_rendered_then_diagnoses_once_and_restart_to_root() {
    let chart = anemia_chart();
    let strategy = flow();
    for id in chart.ids() {
        let node = chart.resolve(id).unwrap();
        let NodeKind::Result { diagnoses, .. } = &node.kind else {
            continue;
        };
        assert!(!diagnoses.is_empty(), "{} has no diagnoses", id);

        let doc = strategy.compute_next_step(id);
        let joined = diagnoses.join(", ");
        let hits = doc.items.iter().filter(|i| i.subtitle == joined).count();
        assert_eq!(hits, 1, "diagnoses of {} should appear once", id);

        let last = doc.items.last().unwrap();
        assert_eq!(last.title, RESTART_TITLE);
        assert_eq!(last.arg, ROOT_ID);
        assert!(last.valid);
    }
}

// ============================================================
// Concrete scenarios
// ============================================================

#[test]
fn given_empty_query_when_rendered_then_root_question_with_c_and_d() {
    let doc = flow().compute_next_step("");

    assert!(doc.items[0].title.contains("貧血"));
    let args = doc.selectable_args();
    assert!(args.contains(&"C"));
    assert!(args.contains(&"D"));
}

#[test]
fn given_c_when_rendered_then_pancytopenia_result_with_restart() {
    let doc = flow().compute_next_step("C");

    let diagnosis = doc
        .items
        .iter()
        .find(|i| i.title == DIAGNOSIS_TITLE)
        .expect("diagnosis item");
    assert!(diagnosis.subtitle.contains("再生不良性貧血"));
    assert!(diagnosis.subtitle.contains("白血病"));
    assert!(doc.items.iter().any(|i| i.valid && i.arg == "root"));
}

#[test]
fn given_result_with_note_when_rendered_then_order_is_fixed() {
    let doc = flow().compute_next_step("C");
    let titles: Vec<_> = doc.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["汎血球減少", DIAGNOSIS_TITLE, "備考", RESTART_TITLE]);
}

#[test]
fn given_unknown_id_when_rendered_then_single_error_item() {
    let doc = flow().compute_next_step("INVALID_ID");

    assert_eq!(doc.items.len(), 1);
    assert_eq!(doc.items[0].title, ERROR_TITLE);
    assert_eq!(doc.items[0].subtitle, "Node not found: INVALID_ID");
    assert!(!doc.items[0].valid);
}

#[test]
fn given_walk_from_root_when_following_options_then_reaches_microcytic_results() {
    let strategy = flow();
    let mut arg = String::new();
    for label in ["WBC・PLTは保たれている", "正常〜低下 (< 2%)", "≤ 80 fL (小球性)"] {
        let doc = strategy.compute_next_step(&arg);
        arg = doc
            .items
            .iter()
            .find(|i| i.title == label)
            .unwrap_or_else(|| panic!("option {} missing", label))
            .arg
            .clone();
    }
    assert_eq!(arg, "I");
    let doc = strategy.compute_next_step(&arg);
    assert_eq!(doc.selectable_args(), vec!["L", "M", "N"]);
}

// ============================================================
// Alias resolution and static validation on custom tables
// ============================================================

fn question(options: &[(&str, &str)]) -> Entry {
    Entry::Node(Node::question(
        &["q"],
        options.iter().map(|(l, n)| Choice::new(*l, *n)).collect(),
    ))
}

#[test]
fn given_alias_cycle_when_resolved_then_not_found_without_hanging() {
    let chart = Flowchart::new(
        "a",
        [
            ("a", Entry::Alias("b".into())),
            ("b", Entry::Alias("c".into())),
            ("c", Entry::Alias("a".into())),
        ],
    );

    assert_eq!(chart.resolve("a"), Err(DomainError::AliasCycle("a".into())));

    let doc = FlowchartStrategy::new(&chart, Renderer::default()).compute_next_step("b");
    assert_eq!(doc.items.len(), 1);
    assert_eq!(doc.items[0].title, ERROR_TITLE);
}

#[test]
fn given_defective_table_when_validate_then_reports_each_defect() {
    let chart = Flowchart::new(
        "root",
        [
            ("root", Entry::Alias("A".into())),
            ("A", question(&[("x", "B"), ("y", "B"), ("z", "missing")])),
            ("B", Entry::Node(Node::result(&["b"], &[], None))),
            ("E", question(&[])),
            ("loop", Entry::Alias("loop".into())),
            ("gone", Entry::Alias("nowhere".into())),
        ],
    );

    let defects = chart.validate();

    assert!(defects.contains(&DomainError::DuplicateTarget {
        node: "A".into(),
        target: "B".into()
    }));
    assert!(defects.contains(&DomainError::DanglingTarget {
        node: "A".into(),
        label: "z".into(),
        target: "missing".into()
    }));
    assert!(defects.contains(&DomainError::EmptyDiagnoses("B".into())));
    assert!(defects.contains(&DomainError::EmptyOptions("E".into())));
    assert!(defects.contains(&DomainError::AliasCycle("loop".into())));
    assert!(defects.contains(&DomainError::DanglingAlias {
        alias: "gone".into(),
        target: "nowhere".into()
    }));
    assert_eq!(defects.len(), 6);
}

#[test]
fn given_table_without_root_when_validate_then_missing_root() {
    let chart = Flowchart::new("root", [("A", question(&[("x", "A")]))]);
    assert_eq!(
        chart.validate(),
        vec![DomainError::MissingRoot("root".into())]
    );
}
