//! The anemia differential-diagnosis flowchart.
//!
//! Follows the classification by cell counts, reticulocytes and MCV
//! (成田美和子「貧血の分類と診断の進め方」日内会誌 104:1375-1382, 2015).

use std::sync::OnceLock;

use crate::domain::entities::{Choice, Entry, Node};
use crate::domain::flowchart::Flowchart;

/// Identifier restart items point to.
pub const ROOT_ID: &str = "root";

static CHART: OnceLock<Flowchart> = OnceLock::new();

/// The process-wide chart, built on first use.
pub fn anemia_chart() -> &'static Flowchart {
    CHART.get_or_init(build)
}

fn q(text: &[&str], options: &[(&str, &str)]) -> Entry {
    Entry::Node(Node::question(
        text,
        options.iter().map(|(l, n)| Choice::new(*l, *n)).collect(),
    ))
}

fn r(text: &[&str], diagnoses: &[&str], note: Option<&str>) -> Entry {
    Entry::Node(Node::result(text, diagnoses, note))
}

fn alias(target: &str) -> Entry {
    Entry::Alias(target.to_string())
}

fn build() -> Flowchart {
    Flowchart::new(
        ROOT_ID,
        [
            (ROOT_ID, alias("A")),
            ("start", alias(ROOT_ID)),
            ("pancytopenia", alias("C")),
            ("aci", alias("M")),
            (
                "A",
                q(
                    &[
                        "貧血あり: 白血球数・血小板数は？",
                        "Hb 男性<13, 女性<12 g/dL",
                    ],
                    &[
                        ("WBC・PLTともに減少 (汎血球減少)", "C"),
                        ("WBC・PLTは保たれている", "D"),
                    ],
                ),
            ),
            (
                "C",
                r(
                    &["汎血球減少", "骨髄検査を検討"],
                    &[
                        "再生不良性貧血",
                        "骨髄異形成症候群",
                        "骨髄線維症",
                        "巨赤芽球性貧血",
                        "白血病",
                        "肝疾患・脾機能亢進症",
                    ],
                    Some("骨髄穿刺・生検で造血能と異形成の有無を評価"),
                ),
            ),
            (
                "D",
                q(
                    &["網赤血球数は？", "基準: Retic ≥ 2% で増加"],
                    &[("増加 (≥ 2%)", "E"), ("正常〜低下 (< 2%)", "F")],
                ),
            ),
            (
                "E",
                q(
                    &["溶血所見は？", "間接Bil↑, LDH↑, ハプトグロビン↓, ヘモジデリン尿"],
                    &[("あり", "G"), ("なし", "H")],
                ),
            ),
            (
                "G",
                r(
                    &["溶血性貧血"],
                    &["溶血性貧血"],
                    Some("直接クームス試験で自己免疫性か否かを確認"),
                ),
            ),
            (
                "H",
                r(
                    &["出血性貧血"],
                    &["出血性貧血"],
                    Some("消化管・婦人科領域の出血源を検索"),
                ),
            ),
            (
                "F",
                q(
                    &["MCVは？"],
                    &[
                        ("≤ 80 fL (小球性)", "I"),
                        ("81〜100 fL (正球性)", "J"),
                        ("≥ 101 fL (大球性)", "K"),
                    ],
                ),
            ),
            (
                "I",
                q(
                    &["血清鉄・TIBC・フェリチンは？"],
                    &[
                        ("Fe↓ TIBC↑ フェリチン↓", "L"),
                        ("Fe↓ TIBC正常〜↓ フェリチン正常〜↑", "M"),
                        ("Fe正常〜↑ フェリチン↑", "N"),
                    ],
                ),
            ),
            ("L", r(&["鉄欠乏性貧血"], &["鉄欠乏性貧血"], Some("出血源の検索を忘れずに"))),
            (
                "M",
                r(
                    &["慢性炎症に伴う貧血 (ACI)"],
                    &["慢性炎症に伴う貧血 (ACI)"],
                    Some("感染症・膠原病・悪性腫瘍の有無を確認"),
                ),
            ),
            (
                "N",
                r(
                    &["鉄利用障害"],
                    &["サラセミア", "鉄芽球性貧血"],
                    Some("ヘモグロビン分析・骨髄の環状鉄芽球を確認"),
                ),
            ),
            (
                "J",
                q(
                    &["EPO・腎機能・炎症所見は？"],
                    &[
                        ("腎機能低下・EPO低値", "O"),
                        ("炎症所見あり", "aci"),
                        ("いずれもなし", "P"),
                    ],
                ),
            ),
            ("O", r(&["腎性貧血"], &["腎性貧血 (EPO低下)"], None)),
            (
                "P",
                r(
                    &["骨髄検査を検討"],
                    &["赤芽球癆", "骨髄異形成症候群", "溶血性貧血"],
                    Some("パルボウイルスB19・胸腺腫の有無を確認"),
                ),
            ),
            (
                "K",
                q(
                    &["VitB12・葉酸は？"],
                    &[("欠乏あり", "Q"), ("欠乏なし", "R")],
                ),
            ),
            (
                "Q",
                r(
                    &["巨赤芽球性貧血"],
                    &["巨赤芽球性貧血 (VitB12/葉酸欠乏)"],
                    Some("VitB12欠乏では抗内因子抗体・胃切除歴を確認"),
                ),
            ),
            (
                "R",
                r(
                    &["大球性貧血 (VitB12・葉酸欠乏なし)"],
                    &["骨髄異形成症候群", "肝疾患", "甲状腺機能低下症", "アルコール性"],
                    None,
                ),
            ),
        ],
    )
}
